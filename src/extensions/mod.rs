mod deferrable;
pub use deferrable::*;
