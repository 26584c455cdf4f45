//! Search engine configuration options.

use std::sync::Arc;

use crate::level::Level;
use crate::probcut::Selectivity;
use crate::search::SearchProgressCallback;
use crate::search::time_control::TimeControlMode;

pub struct SearchOptions {
    pub tt_mb_size: usize,
    /// Root-move score perturbation amplitude in centi-discs (spec.md §4.7).
    /// Zero (the default) disables perturbation entirely.
    pub perturbation_amplitude: i32,
}

impl SearchOptions {
    /// Creates search options with the desired transposition-table size,
    /// relying on the default for everything else.
    #[must_use]
    pub fn new(tt_mb_size: usize) -> Self {
        SearchOptions {
            tt_mb_size,
            ..Default::default()
        }
    }

    /// Sets the root-move score perturbation amplitude (spec.md §4.7).
    #[must_use]
    pub fn perturbation_amplitude(mut self, amplitude_centidiscs: i32) -> Self {
        self.perturbation_amplitude = amplitude_centidiscs;
        self
    }
}

impl Default for SearchOptions {
    fn default() -> Self {
        SearchOptions {
            tt_mb_size: 64,
            perturbation_amplitude: 0,
        }
    }
}

/// What bounds a search run: a fixed level (depth/selectivity table), or a clock.
#[derive(Clone)]
pub enum SearchConstraint {
    /// Search to the depths defined by a [`Level`], with no wall-clock limit.
    Level(Level),
    /// Search under a time budget; depth is driven by iterative deepening until the
    /// [`TimeManager`](crate::search::time_control::TimeManager) calls time.
    Time(TimeControlMode),
}

/// Parameters for a single call to [`Search::run`](crate::search::Search::run).
#[derive(Clone)]
pub struct SearchRunOptions {
    pub constraint: SearchConstraint,
    pub selectivity: Selectivity,
    pub multi_pv: bool,
    pub callback: Option<Arc<SearchProgressCallback>>,
}

impl SearchRunOptions {
    /// Starts building options for a fixed-level search at full selectivity.
    #[must_use]
    pub fn with_level(level: Level, selectivity: Selectivity) -> Self {
        SearchRunOptions {
            constraint: SearchConstraint::Level(level),
            selectivity,
            multi_pv: false,
            callback: None,
        }
    }

    /// Starts building options for a time-controlled search at full selectivity.
    #[must_use]
    pub fn with_time(mode: TimeControlMode, selectivity: Selectivity) -> Self {
        SearchRunOptions {
            constraint: SearchConstraint::Time(mode),
            selectivity,
            multi_pv: false,
            callback: None,
        }
    }

    /// Enables or disables Multi-PV search (one aspiration window per root move).
    #[must_use]
    pub fn multi_pv(mut self, enabled: bool) -> Self {
        self.multi_pv = enabled;
        self
    }

    /// Attaches a progress callback, invoked after each completed iteration/PV line.
    #[must_use]
    pub fn callback(mut self, callback: Arc<SearchProgressCallback>) -> Self {
        self.callback = Some(callback);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default() {
        let opts = SearchOptions::default();
        assert_eq!(opts.tt_mb_size, 64);
    }

    #[test]
    fn test_new() {
        let opts = SearchOptions::new(128);
        assert_eq!(opts.tt_mb_size, 128);
    }

    #[test]
    fn test_with_level_defaults_to_single_pv() {
        let opts = SearchRunOptions::with_level(Level::unlimited(), Selectivity::None);
        assert!(!opts.multi_pv);
        assert!(matches!(opts.constraint, SearchConstraint::Level(_)));
    }

    #[test]
    fn test_multi_pv_builder() {
        let opts =
            SearchRunOptions::with_level(Level::unlimited(), Selectivity::None).multi_pv(true);
        assert!(opts.multi_pv);
    }

    #[test]
    fn test_with_time_constraint() {
        let opts = SearchRunOptions::with_time(TimeControlMode::Infinite, Selectivity::Level3);
        assert!(matches!(opts.constraint, SearchConstraint::Time(TimeControlMode::Infinite)));
    }
}
