//! Lightweight behavior tree library for interval-driven combat decisions.
//!
//! A tree is evaluated once per decision, not once per frame. The host owns
//! the timer that decides *when* to evaluate; the tree only decides *what*
//! to do with the situation it is handed.
//!
//! - **Instant evaluation**: every node resolves within a single tick
//! - **No Running state**: nodes succeed or fail immediately
//! - **Context-generic**: nodes read and write a caller-supplied blackboard
//! - **Zero dependencies**
//!
//! # Architecture
//!
//! - [`Behavior`]: Core trait for all nodes
//! - [`Status`]: Success or Failure
//! - Composite nodes: [`Sequence`], [`Selector`]
//! - Decorator nodes: [`AlwaysSucceed`]
//! - Leaf nodes: [`Condition`]

pub mod behavior;
pub mod builder;
pub mod composite;
pub mod decorator;
pub mod leaf;
pub mod status;

pub use behavior::Behavior;
pub use composite::{Selector, Sequence};
pub use decorator::AlwaysSucceed;
pub use leaf::Condition;
pub use status::Status;
