//! Core behavior trait.
//!
//! Every node, composite or leaf, implements [`Behavior`] for some blackboard
//! type `C`. The blackboard is passed mutably so action nodes can record
//! their output without the tree holding any state of its own.

use crate::Status;

/// A behavior tree node that can be evaluated against a blackboard.
pub trait Behavior<C>: Send + Sync {
    /// Evaluates this node once.
    fn tick(&self, ctx: &mut C) -> Status;
}

impl<C> Behavior<C> for Box<dyn Behavior<C>> {
    #[inline]
    fn tick(&self, ctx: &mut C) -> Status {
        (**self).tick(ctx)
    }
}
