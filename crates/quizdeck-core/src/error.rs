//! Quiz engine error types.
//!
//! Defined in `quizdeck-core` so callers can match on the failure kind for
//! recovery decisions without string matching.

use thiserror::Error;

/// Errors the session state machine can refuse an action with.
///
/// Every variant leaves the engine unchanged; callers may adjust the
/// configuration (or answer the pending question) and try again.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum QuizError {
    /// The current configuration matches no terms, so a pass cannot start.
    #[error("no terms match the current configuration")]
    EmptyPool,

    /// A retake was requested but no terms were answered wrong.
    #[error("no missed terms to retake")]
    NothingToRetake,

    /// An answer was submitted while no question was active.
    #[error("no question is currently active")]
    NoActiveQuestion,
}

impl QuizError {
    /// Returns `true` if the action can succeed after a configuration change.
    pub fn is_configuration_issue(&self) -> bool {
        matches!(self, QuizError::EmptyPool | QuizError::NothingToRetake)
    }
}
