//! macOS-flavored design system for GPUI: theme tokens, materials, controls,
//! window chrome and an overlay motion layer.

pub mod primitives;

pub mod extensions;

pub mod views;

pub mod components;

pub mod materials;

pub mod motion;

pub mod theme;

pub mod window_chrome;

mod utils;
pub use utils::ElementIdExt;

mod assets;
pub use assets::*;

mod init;
pub use init::*;
