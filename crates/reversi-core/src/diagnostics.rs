//! Environment-gated diagnostic tracing.
//!
//! `time_control.rs` already gates its own `eprintln!` traces behind a
//! `REVERSI_DEBUG_TIME`-checking `is_debug_enabled()` helper cached in a
//! `OnceLock`. This module generalizes that one-off into a small set of
//! independently-gated channels so [`crate::engine`] and the search driver
//! can each log without coupling to the time manager's flag. No logging
//! crate is pulled in: the teacher's own tracing is `eprintln!` behind an
//! env check, and that is what every channel here does too.

use std::sync::OnceLock;

/// A single independently-gated diagnostic channel.
///
/// Construct with [`DiagChannel::new`] passing the environment variable name
/// that enables it; check with [`DiagChannel::enabled`] before formatting a
/// message, or just call [`DiagChannel::log`].
pub struct DiagChannel {
    env_var: &'static str,
    enabled: OnceLock<bool>,
}

impl DiagChannel {
    /// Creates a channel gated by `env_var`. The variable is read lazily, once,
    /// the first time the channel is checked.
    pub const fn new(env_var: &'static str) -> Self {
        DiagChannel {
            env_var,
            enabled: OnceLock::new(),
        }
    }

    /// Returns whether this channel's environment variable is set to `1` or
    /// `true` (case-insensitive). Cached after the first call.
    pub fn enabled(&self) -> bool {
        *self.enabled.get_or_init(|| {
            let value = std::env::var(self.env_var).unwrap_or_default();
            value == "1" || value.eq_ignore_ascii_case("true")
        })
    }

    /// Writes `msg` to stderr, prefixed with the channel's env var name, if
    /// the channel is enabled. The message is only formatted if enabled, so
    /// callers may pass an expensive `format_args!` closure-free expression
    /// without cost when the channel is off — as long as they gate
    /// construction of `msg` behind [`DiagChannel::enabled`] themselves for
    /// anything non-trivial.
    pub fn log(&self, msg: &str) {
        if self.enabled() {
            eprintln!("[{}] {msg}", self.env_var);
        }
    }
}

/// Gates search-driver tracing: iterative deepening progress, aspiration
/// window re-searches, MPC cutoffs, ETC hits.
pub static SEARCH: DiagChannel = DiagChannel::new("REVERSI_DEBUG_SEARCH");

/// Gates top-level engine driver tracing: move computation start/end,
/// time allocation handoff, book lookups, forced-opening selection.
pub static ENGINE: DiagChannel = DiagChannel::new("REVERSI_DEBUG_ENGINE");

/// Convenience macro: logs to [`SEARCH`] only when enabled, avoiding the
/// `format!` allocation otherwise.
#[macro_export]
macro_rules! debug_search {
    ($($arg:tt)*) => {
        if $crate::diagnostics::SEARCH.enabled() {
            $crate::diagnostics::SEARCH.log(&format!($($arg)*));
        }
    };
}

/// Convenience macro: logs to [`ENGINE`] only when enabled, avoiding the
/// `format!` allocation otherwise.
#[macro_export]
macro_rules! debug_engine {
    ($($arg:tt)*) => {
        if $crate::diagnostics::ENGINE.enabled() {
            $crate::diagnostics::ENGINE.log(&format!($($arg)*));
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_disabled_by_default() {
        let ch = DiagChannel::new("REVERSI_DEBUG_NONEXISTENT_CHANNEL_XYZ");
        assert!(!ch.enabled());
    }
}
