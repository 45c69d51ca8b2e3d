mod button;
pub use button::*;

mod checkbox;
pub use checkbox::*;

mod date_picker;
pub use date_picker::*;

mod icon;
pub use icon::*;

pub mod popup_button;
pub use popup_button::{PopupButton, PopupOption};

mod radio;
pub use radio::*;

mod stepper;
pub use stepper::*;

mod text_input;
pub use text_input::*;
