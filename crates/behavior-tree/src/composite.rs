//! Composite behavior nodes.
//!
//! [`Sequence`] runs children until one fails (AND), [`Selector`] runs
//! children until one succeeds (OR). Both short-circuit, so later children
//! never observe side effects they were not meant to.

use crate::{Behavior, Status};

/// Runs children left to right, stopping at the first failure.
///
/// Typical use is a guard chain: `[InRange, UnderCap, Attack]` only reaches
/// `Attack` when both guards hold.
pub struct Sequence<C> {
    children: Vec<Box<dyn Behavior<C>>>,
}

impl<C> Sequence<C> {
    /// # Panics
    ///
    /// Panics if `children` is empty.
    pub fn new(children: Vec<Box<dyn Behavior<C>>>) -> Self {
        assert!(
            !children.is_empty(),
            "Sequence must have at least one child"
        );
        Self { children }
    }
}

impl<C> Behavior<C> for Sequence<C> {
    fn tick(&self, ctx: &mut C) -> Status {
        for child in &self.children {
            if child.tick(ctx).is_failure() {
                return Status::Failure;
            }
        }
        Status::Success
    }
}

/// Runs children left to right, stopping at the first success.
///
/// Children are listed in priority order; the last child is usually an
/// unconditional fallback so the selector never fails outright.
pub struct Selector<C> {
    children: Vec<Box<dyn Behavior<C>>>,
}

impl<C> Selector<C> {
    /// # Panics
    ///
    /// Panics if `children` is empty.
    pub fn new(children: Vec<Box<dyn Behavior<C>>>) -> Self {
        assert!(
            !children.is_empty(),
            "Selector must have at least one child"
        );
        Self { children }
    }
}

impl<C> Behavior<C> for Selector<C> {
    fn tick(&self, ctx: &mut C) -> Status {
        for child in &self.children {
            if child.tick(ctx).is_success() {
                return Status::Success;
            }
        }
        Status::Failure
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Blackboard {
        swings: u32,
        log: Vec<&'static str>,
    }

    struct Swing;
    impl Behavior<Blackboard> for Swing {
        fn tick(&self, ctx: &mut Blackboard) -> Status {
            ctx.swings += 1;
            ctx.log.push("swing");
            Status::Success
        }
    }

    struct Blocked;
    impl Behavior<Blackboard> for Blocked {
        fn tick(&self, ctx: &mut Blackboard) -> Status {
            ctx.log.push("blocked");
            Status::Failure
        }
    }

    #[test]
    fn sequence_runs_every_child_on_success() {
        let seq = Sequence::new(vec![Box::new(Swing), Box::new(Swing)]);

        let mut ctx = Blackboard::default();
        assert_eq!(seq.tick(&mut ctx), Status::Success);
        assert_eq!(ctx.swings, 2);
    }

    #[test]
    fn sequence_stops_at_first_failure() {
        let seq = Sequence::new(vec![Box::new(Swing), Box::new(Blocked), Box::new(Swing)]);

        let mut ctx = Blackboard::default();
        assert_eq!(seq.tick(&mut ctx), Status::Failure);
        assert_eq!(ctx.log, vec!["swing", "blocked"]);
    }

    #[test]
    fn selector_stops_at_first_success() {
        let sel = Selector::new(vec![Box::new(Blocked), Box::new(Swing), Box::new(Swing)]);

        let mut ctx = Blackboard::default();
        assert_eq!(sel.tick(&mut ctx), Status::Success);
        assert_eq!(ctx.swings, 1);
    }

    #[test]
    fn selector_fails_when_every_child_fails() {
        let sel = Selector::new(vec![Box::new(Blocked), Box::new(Blocked)]);

        let mut ctx = Blackboard::default();
        assert_eq!(sel.tick(&mut ctx), Status::Failure);
        assert_eq!(ctx.log.len(), 2);
    }

    #[test]
    #[should_panic(expected = "Selector must have at least one child")]
    fn empty_selector_is_rejected() {
        let _ = Selector::<Blackboard>::new(Vec::new());
    }
}
