//! Combat decision tree nodes.
//!
//! - `conditions`: read the [`Situation`](super::Situation) and succeed or fail
//! - `actions`: append directives to the situation

pub mod actions;
pub mod conditions;

pub use actions::*;
pub use conditions::*;
