//! Decorator behavior nodes.

use crate::{Behavior, Status};

/// Runs its child and reports Success regardless of the outcome.
///
/// Used for optional side branches, e.g. a profile-specific hook that may or
/// may not emit a directive before the main decision runs.
pub struct AlwaysSucceed<C> {
    child: Box<dyn Behavior<C>>,
}

impl<C> AlwaysSucceed<C> {
    pub fn new(child: Box<dyn Behavior<C>>) -> Self {
        Self { child }
    }
}

impl<C> Behavior<C> for AlwaysSucceed<C> {
    fn tick(&self, ctx: &mut C) -> Status {
        let _ = self.child.tick(ctx);
        Status::Success
    }
}
