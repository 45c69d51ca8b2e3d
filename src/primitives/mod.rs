pub mod input;

mod focus_ring;
pub use focus_ring::*;
