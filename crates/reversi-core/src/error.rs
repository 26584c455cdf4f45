//! Hard-error taxonomy for the engine driver.
//!
//! Soft conditions — timeout (panic-abort), user exit, and opening-book misses —
//! are not modeled here: they are flag-driven cooperative returns with intact
//! partial results (see [`crate::search::time_control::TimeManager`] for the
//! abort flag, and [`crate::engine`] for how a caller observes them). Only the
//! hard-error kinds that the driver cannot recover from on its own are
//! represented as an [`EngineError`], propagated with `?` from the deepest
//! point back to the outermost entry point, matching `board.rs`'s existing
//! `BoardError`/`square.rs`'s `SquareError` convention of hand-rolled
//! `Display`/`Error` impls rather than pulling in a helper crate.

use std::fmt;

/// A hard error the engine cannot recover from internally.
///
/// Each variant is reported to the host via a single error event; the current
/// game state is preserved so the host may re-enter play afterward.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// A skill or time parameter was unset or invalid before a search was started.
    ConfigurationError(String),
    /// A move being replayed from a provided sequence was not legal at its position.
    InvalidMoveInSequence {
        /// Index of the offending move within the sequence.
        index: usize,
        /// Human-readable description of the square and why it was rejected.
        detail: String,
    },
    /// An internal invariant was violated (board/bitboard disagreement, popcount
    /// mismatch, flip-stack underflow, ...). These indicate implementation bugs.
    InternalInvariantFailure(String),
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::ConfigurationError(msg) => write!(f, "configuration error: {msg}"),
            EngineError::InvalidMoveInSequence { index, detail } => {
                write!(f, "invalid move #{index} in sequence: {detail}")
            }
            EngineError::InternalInvariantFailure(msg) => {
                write!(f, "internal invariant failure: {msg}")
            }
        }
    }
}

impl std::error::Error for EngineError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_configuration_error() {
        let err = EngineError::ConfigurationError("skill level unset".to_string());
        assert_eq!(err.to_string(), "configuration error: skill level unset");
    }

    #[test]
    fn test_display_invalid_move_in_sequence() {
        let err = EngineError::InvalidMoveInSequence {
            index: 3,
            detail: "square already occupied".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "invalid move #3 in sequence: square already occupied"
        );
    }

    #[test]
    fn test_display_internal_invariant_failure() {
        let err = EngineError::InternalInvariantFailure("popcount mismatch".to_string());
        assert_eq!(
            err.to_string(),
            "internal invariant failure: popcount mismatch"
        );
    }
}
