//! Leaf nodes built from closures.

use crate::{Behavior, Status};

/// A read-only predicate over the blackboard.
///
/// Conditions never mutate the context; anything that needs to record
/// output should be its own node type.
pub struct Condition<F> {
    predicate: F,
}

impl<F> Condition<F> {
    pub fn new(predicate: F) -> Self {
        Self { predicate }
    }
}

impl<C, F> Behavior<C> for Condition<F>
where
    F: Fn(&C) -> bool + Send + Sync,
{
    #[inline]
    fn tick(&self, ctx: &mut C) -> Status {
        Status::from_bool((self.predicate)(ctx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn condition_maps_predicate_to_status() {
        let low = Condition::new(|hp: &f32| *hp < 0.3);

        let mut wounded = 0.1_f32;
        let mut healthy = 0.8_f32;
        assert_eq!(low.tick(&mut wounded), Status::Success);
        assert_eq!(low.tick(&mut healthy), Status::Failure);
    }
}
