//! Common error infrastructure for encounter-core.
//!
//! Domain errors live next to the operations that produce them
//! ([`crate::SpecialAttackError`], [`crate::TemplateError`]). They all share
//! the [`EncounterError`] trait so hosts can decide how loudly to react.
//!
//! Failed calls never mutate state. A rejected special attack leaves the
//! boss exactly as it was, so callers may simply try again next tick.

/// How a caller is expected to react to an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Temporary condition; the same call may succeed on a later tick.
    ///
    /// Examples: attack still on cooldown, boss mid wind-up
    Recoverable,

    /// Invalid input; retrying without changes will fail again.
    ///
    /// Examples: unknown target, malformed phase table
    Validation,

    /// The call arrived after the state machine reached a terminal state.
    ///
    /// Examples: special attack requested from a defeated boss
    Terminal,
}

impl ErrorSeverity {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Terminal => "terminal",
        }
    }

    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }
}

/// Common trait for all encounter-core errors.
pub trait EncounterError: core::fmt::Display + core::fmt::Debug {
    fn severity(&self) -> ErrorSeverity;

    /// Stable identifier for logs and tests.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
