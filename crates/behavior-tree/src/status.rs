//! Status returned by behavior nodes.

/// The result of evaluating a behavior node.
///
/// Decisions resolve instantly: a condition either holds for the current
/// situation or it does not, and an action either records its directive or
/// declines to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    /// The condition held, or the action recorded its output.
    Success,

    /// The condition did not hold, or the action could not apply.
    Failure,
}

impl Status {
    /// Converts a boolean predicate result into a status.
    #[inline]
    pub fn from_bool(value: bool) -> Self {
        if value {
            Status::Success
        } else {
            Status::Failure
        }
    }

    #[inline]
    pub fn is_success(self) -> bool {
        matches!(self, Status::Success)
    }

    #[inline]
    pub fn is_failure(self) -> bool {
        matches!(self, Status::Failure)
    }
}
