//! Shorthand constructors for assembling trees.
//!
//! `sequence(vec![..])` reads better than
//! `Box::new(Sequence::new(vec![..]))` once trees get a few levels deep.

use crate::{AlwaysSucceed, Behavior, Condition, Selector, Sequence};

#[inline]
pub fn sequence<C: 'static>(children: Vec<Box<dyn Behavior<C>>>) -> Box<dyn Behavior<C>> {
    Box::new(Sequence::new(children))
}

#[inline]
pub fn selector<C: 'static>(children: Vec<Box<dyn Behavior<C>>>) -> Box<dyn Behavior<C>> {
    Box::new(Selector::new(children))
}

#[inline]
pub fn always_succeed<C: 'static>(child: Box<dyn Behavior<C>>) -> Box<dyn Behavior<C>> {
    Box::new(AlwaysSucceed::new(child))
}

/// Wraps a predicate closure as a boxed condition node.
#[inline]
pub fn condition<C: 'static, F>(predicate: F) -> Box<dyn Behavior<C>>
where
    F: Fn(&C) -> bool + Send + Sync + 'static,
{
    Box::new(Condition::new(predicate))
}
