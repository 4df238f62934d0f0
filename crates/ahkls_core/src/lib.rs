//! ahkls_core: shared source-location primitives.
//!
//! Every token, AST node, and diagnostic in the workspace carries positions
//! from this crate.

pub mod position;

pub use position::{Position, Range};
