//! Theme system: semantic color roles, layout and typography tokens, and the
//! appearance mode context.
//!
//! Themes are data. Each ships both a light and a dark variant over one set
//! of semantic roles, and every lookup goes through the mode-aware resolver.

mod schema;
pub use schema::*;

mod deserializers;

mod resolver;
pub use resolver::*;

mod ext;
pub use ext::*;

mod kinds;
pub use kinds::*;
