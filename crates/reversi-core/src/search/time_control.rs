//! Time control management for timed games.
//!
//! The per-move budget for the default (Fischer-style) mode is
//! [`determine_move_time`], a direct port of Zebra's `timer.c::determine_move_time`
//! — same `moves_left` estimate, same `DEFAULT_SEARCH`/`PANIC_FACTOR`/
//! `SAFETY_MARGIN` constants, same caps. The richer multi-mode wrapper below
//! (`Byoyomi`/`MovesToGo`/`JapaneseByo`, PV-instability extensions) is this
//! crate's own scheduling layer built on top of that budget, in the style of
//! the teacher's existing `TimeManager`.

use std::sync::Arc;
use std::sync::Mutex;
use std::sync::OnceLock;
use std::sync::atomic::{AtomicBool, AtomicU8, AtomicU64, Ordering};
use std::time::{Duration, Instant};

use crate::types::Depth;

/// `SAFETY_MARGIN` from `timer.c`: always keep at least this many seconds on the clock.
const SAFETY_MARGIN_S: f64 = 10.0;

/// `DEFAULT_SEARCH` from `timer.c`: start a new iteration only if the previous
/// one used less than this fraction of its allotted time.
const DEFAULT_SEARCH: f64 = 0.7;

/// `PANIC_FACTOR` from `timer.c`: never use more than `1.6` times the
/// scheduled time for the current move.
const PANIC_FACTOR: f64 = 1.6 / DEFAULT_SEARCH;

/// Safety buffer in milliseconds applied by this crate's own multi-mode
/// scheduler (distinct from `SAFETY_MARGIN_S`, which belongs to the literal
/// Zebra formula above).
const TIME_BUFFER_MS: u64 = 50;

/// Depth threshold after which PV/score instability becomes meaningful.
const MIN_STABILITY_CHECK_DEPTH: Depth = 10;

/// Score drop (in discs) that triggers an emergency extension.
const SCORE_DROP_THRESHOLD: f32 = 3.0;

/// Additional time granted on instability (percentage of current maxi).
const EXTENSION_RATIO: f64 = 0.5;

/// Maximum number of incremental time extensions allowed per move.
const MAX_EXTENSION_STEPS: u8 = 3;

const MIN_PERCENT_NORMAL: u64 = 45;
const MIN_PERCENT_ENDGAME: u64 = 80;
const BYOYOMI_MAX_PERCENT: u64 = 90;
const MOVESTOGO_MAX_PERCENT: u64 = 95;
const JP_BYO_MAIN_MIN_PERCENT_NORMAL: u64 = 60;
const JP_BYO_MAIN_MIN_PERCENT_ENDGAME: u64 = 85;

/// Ports `timer.c::determine_move_time` literally.
///
/// # Arguments
///
/// * `time_left_s` - Remaining main time, in seconds.
/// * `increment_s` - Per-move increment, in seconds (`0.0` for no increment).
/// * `discs` - Total discs on the board (`60 - n_empties + 4`; `discs == 4`
///   at the start of the game).
///
/// # Returns
///
/// The number of seconds to budget for this move (`time_per_move`).
pub fn determine_move_time(time_left_s: f64, increment_s: f64, discs: u32) -> f64 {
    let moves_left = (((65 - discs as i64) / 2) - 5).max(2) as f64;
    let mut time_available = time_left_s + moves_left * increment_s - SAFETY_MARGIN_S;
    if time_available < 1.0 {
        time_available = 1.0;
    }
    let mut time_per_move = (time_available / (moves_left + 1.0)) * DEFAULT_SEARCH;
    if time_per_move > time_left_s / 4.0 {
        time_per_move = time_left_s / 4.0;
    }
    if time_per_move > time_left_s {
        time_per_move = time_left_s / 4.0;
    }
    if time_per_move == 0.0 {
        time_per_move = 1.0;
    }
    time_per_move
}

/// Ports `timer.c::set_default_panic`: the fraction of `time_per_move` at
/// which a hard, immediate abort is forced regardless of iteration state.
pub fn panic_threshold() -> f64 {
    PANIC_FACTOR / DEFAULT_SEARCH.recip()
}

/// Time control mode for a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimeControlMode {
    /// No time limit.
    #[default]
    Infinite,

    /// Fischer time control (increment per move) — the default budget comes
    /// from [`determine_move_time`].
    Fischer { main_time_ms: u64, increment_ms: u64 },

    /// Fixed time per move.
    Byoyomi { time_per_move_ms: u64 },

    /// Fixed time for a number of moves.
    MovesToGo { time_ms: u64, moves: u32 },

    /// Japanese byoyomi: a main time bank, then fixed time per move.
    JapaneseByo {
        main_time_ms: u64,
        time_per_move_ms: u64,
    },
}

/// Manages time allocation and tracking during search.
#[derive(Debug)]
pub struct TimeManager {
    mode: TimeControlMode,
    start_time: Instant,
    min_time_ms: AtomicU64,
    max_time_ms: AtomicU64,
    base_max_time_ms: AtomicU64,
    hard_time_limit_ms: AtomicU64,
    extension_steps: AtomicU8,
    /// Cooperative, flag-based abort signal — checked periodically by the
    /// search driver rather than delivered via any unwind mechanism.
    abort_flag: Arc<AtomicBool>,
    prev_score: Mutex<Option<f32>>,
    n_empties: u32,
    is_endgame_mode: AtomicBool,
}

impl TimeManager {
    /// Creates a new `TimeManager` with the specified mode and abort flag.
    pub fn new(mode: TimeControlMode, abort_flag: Arc<AtomicBool>, n_empties: u32) -> Self {
        let (mini, maxi, hard_limit) = Self::calculate_time_limits(mode, n_empties, false);

        if is_debug_enabled() {
            eprintln!(
                "[TimeManager] new: mode={mode:?}, empties={n_empties}, mini={mini}ms, maxi={maxi}ms, hard_limit={hard_limit}ms"
            );
        }

        TimeManager {
            mode,
            start_time: Instant::now(),
            min_time_ms: AtomicU64::new(mini),
            max_time_ms: AtomicU64::new(maxi),
            base_max_time_ms: AtomicU64::new(maxi),
            hard_time_limit_ms: AtomicU64::new(hard_limit),
            extension_steps: AtomicU8::new(0),
            abort_flag,
            prev_score: Mutex::new(None),
            n_empties,
            is_endgame_mode: AtomicBool::new(false),
        }
    }

    fn calculate_safe_time(main_time_ms: u64, n_empties: u32) -> u64 {
        let my_future_moves = n_empties.saturating_sub(1).div_ceil(2);
        let total_buffer = TIME_BUFFER_MS + ((my_future_moves as u64 * TIME_BUFFER_MS) / 2);
        main_time_ms.saturating_sub(total_buffer)
    }

    fn calculate_time_limits(mode: TimeControlMode, n_empties: u32, is_endgame: bool) -> (u64, u64, u64) {
        match mode {
            TimeControlMode::Infinite => (u64::MAX, u64::MAX, u64::MAX),

            TimeControlMode::Fischer {
                main_time_ms,
                increment_ms,
            } => {
                let hard_limit = Self::calculate_safe_time(main_time_ms, n_empties);
                let discs = 64 - n_empties;
                let budget_s = determine_move_time(
                    main_time_ms as f64 / 1000.0,
                    increment_ms as f64 / 1000.0,
                    discs,
                );
                let budget_ms = (budget_s * 1000.0).round() as u64;
                let mini_pct = if is_endgame {
                    MIN_PERCENT_ENDGAME
                } else {
                    MIN_PERCENT_NORMAL
                };
                Self::compute_limits(budget_ms, budget_ms, mini_pct, 100, hard_limit)
            }

            TimeControlMode::Byoyomi { time_per_move_ms } => {
                let available = time_per_move_ms.saturating_sub(TIME_BUFFER_MS);
                let mini_pct = if is_endgame {
                    MIN_PERCENT_ENDGAME
                } else {
                    MIN_PERCENT_NORMAL
                };
                Self::compute_limits(available, available, mini_pct, BYOYOMI_MAX_PERCENT, available)
            }

            TimeControlMode::MovesToGo { time_ms, moves } => {
                let hard_limit = time_ms.saturating_sub(TIME_BUFFER_MS);
                let moves = moves.max(1) as u64;
                let time_per_move = time_ms / moves;
                let mini_pct = if is_endgame {
                    MIN_PERCENT_ENDGAME
                } else {
                    MIN_PERCENT_NORMAL
                };
                Self::compute_limits(
                    time_per_move,
                    time_per_move,
                    mini_pct,
                    MOVESTOGO_MAX_PERCENT,
                    hard_limit,
                )
            }

            TimeControlMode::JapaneseByo {
                main_time_ms,
                time_per_move_ms,
            } => {
                if main_time_ms == 0 {
                    let available = time_per_move_ms.saturating_sub(TIME_BUFFER_MS);
                    let mini_pct = if is_endgame {
                        MIN_PERCENT_ENDGAME
                    } else {
                        MIN_PERCENT_NORMAL
                    };
                    Self::compute_limits(
                        available,
                        available,
                        mini_pct,
                        BYOYOMI_MAX_PERCENT,
                        available,
                    )
                } else {
                    let hard_limit = Self::calculate_safe_time(main_time_ms, n_empties);
                    let discs = 64 - n_empties;
                    let budget_s = determine_move_time(main_time_ms as f64 / 1000.0, 0.0, discs);
                    let budget_ms = (budget_s * 1000.0).round() as u64;
                    let mini_pct = if is_endgame {
                        JP_BYO_MAIN_MIN_PERCENT_ENDGAME
                    } else {
                        JP_BYO_MAIN_MIN_PERCENT_NORMAL
                    };
                    Self::compute_limits(budget_ms, budget_ms, mini_pct, 100, hard_limit)
                }
            }
        }
    }

    fn compute_limits(
        budget_mini: u64,
        budget_maxi: u64,
        mini_pct: u64,
        maxi_pct: u64,
        hard_limit: u64,
    ) -> (u64, u64, u64) {
        let allocated_mini = (budget_mini * mini_pct) / 100;
        let allocated_maxi = (budget_maxi * maxi_pct) / 100;
        let mini = allocated_mini.min(hard_limit);
        let maxi = allocated_maxi.min(hard_limit);
        (mini, maxi, hard_limit)
    }

    /// Starts the timer for a new search.
    pub fn start(&mut self) {
        self.start_time = Instant::now();
        self.extension_steps.store(0, Ordering::Relaxed);
        let current_maxi = self.max_time_ms.load(Ordering::Relaxed);
        self.base_max_time_ms.store(current_maxi, Ordering::Relaxed);
        *self.prev_score.lock().unwrap() = None;
        self.is_endgame_mode.store(false, Ordering::Relaxed);
    }

    #[inline]
    pub fn elapsed_ms(&self) -> u64 {
        self.start_time.elapsed().as_millis() as u64
    }

    #[inline]
    pub fn is_time_up(&self) -> bool {
        if self.mode == TimeControlMode::Infinite {
            return false;
        }
        self.elapsed_ms() >= self.max_time_ms.load(Ordering::Relaxed)
    }

    /// Checks if we should continue to the next iterative-deepening iteration
    /// (mirrors `timer.c::above_recommended`, inverted).
    pub fn should_continue_iteration(&self) -> bool {
        if self.mode == TimeControlMode::Infinite {
            return true;
        }
        let elapsed = self.elapsed_ms();
        if elapsed < self.min_time_ms.load(Ordering::Relaxed) {
            return true;
        }
        let should_continue = (elapsed as f64 * 1.5) < self.maxi_time_ms() as f64;
        if !should_continue && is_debug_enabled() {
            eprintln!(
                "[TimeManager] stopping iteration: elapsed={elapsed}ms, maxi={}ms",
                self.max_time_ms.load(Ordering::Relaxed)
            );
        }
        should_continue
    }

    /// Extends the search time when the root result becomes unstable
    /// (PV change or score drop) — the richer analogue of `timer.c`'s single
    /// `PONDER_FACTOR` extension, bounded to [`MAX_EXTENSION_STEPS`] steps.
    pub fn try_extend_time(&self, current_score: f32, pv_changed: bool, depth: Depth) -> bool {
        if self.mode == TimeControlMode::Infinite {
            *self.prev_score.lock().unwrap() = Some(current_score);
            return false;
        }

        let used_steps = self.extension_steps.load(Ordering::Relaxed);
        if used_steps >= MAX_EXTENSION_STEPS {
            *self.prev_score.lock().unwrap() = Some(current_score);
            return false;
        }

        let (should_extend, reason, prev_value) = {
            let mut prev_guard = self.prev_score.lock().unwrap();
            let prev = *prev_guard;
            *prev_guard = Some(current_score);

            let mut extend = false;
            let mut r = "unknown";
            if let Some(p) = prev {
                if current_score < p - SCORE_DROP_THRESHOLD {
                    extend = true;
                    r = "score_drop";
                } else if pv_changed && depth >= MIN_STABILITY_CHECK_DEPTH {
                    extend = true;
                    r = "pv_change";
                }
            } else if pv_changed && depth >= MIN_STABILITY_CHECK_DEPTH {
                extend = true;
                r = "pv_change";
            }
            (extend, r, prev)
        };

        if !should_extend {
            return false;
        }
        self.apply_extension(reason, used_steps, prev_value, current_score)
    }

    fn apply_extension(
        &self,
        reason: &str,
        used_steps: u8,
        prev_value: Option<f32>,
        current_score: f32,
    ) -> bool {
        let base_maxi = self.base_max_time_ms.load(Ordering::Relaxed);
        let hard_limit = self.hard_time_limit_ms.load(Ordering::Relaxed);
        let old_maxi = self.max_time_ms.load(Ordering::Relaxed);

        let target_maxi = if matches!(self.mode, TimeControlMode::JapaneseByo { main_time_ms, .. } if main_time_ms > 0)
        {
            let reserve = hard_limit.saturating_sub(base_maxi);
            base_maxi.saturating_add(reserve / 4).min(hard_limit)
        } else {
            let extension_amount = ((base_maxi as f64) * EXTENSION_RATIO) as u64;
            base_maxi.saturating_add(extension_amount).min(hard_limit)
        };

        if old_maxi >= target_maxi {
            return false;
        }

        let remaining_steps = (MAX_EXTENSION_STEPS - used_steps) as u64;
        let remaining_budget = target_maxi.saturating_sub(old_maxi);
        let step_increment = remaining_budget.div_ceil(remaining_steps);
        if step_increment == 0 {
            return false;
        }

        let new_maxi = old_maxi.saturating_add(step_increment).min(target_maxi);
        self.max_time_ms.store(new_maxi, Ordering::Relaxed);
        self.extension_steps.fetch_add(1, Ordering::Release);

        if is_debug_enabled() {
            eprintln!(
                "[TimeManager] extended ({reason}, step {}/{}): {:.2} -> {:.2}, old={old_maxi}ms, new={new_maxi}ms, limit={hard_limit}ms",
                used_steps + 1,
                MAX_EXTENSION_STEPS,
                prev_value.unwrap_or(current_score),
                current_score,
            );
        }
        true
    }

    /// Signals the search to abort due to time-out.
    pub fn signal_abort(&self) {
        self.abort_flag.store(true, Ordering::Release);
    }

    #[inline]
    pub fn is_aborted(&self) -> bool {
        self.abort_flag.load(Ordering::Relaxed)
    }

    /// Checks time and signals abort if the maximum has been reached.
    #[inline]
    pub fn check_time(&self) -> bool {
        if self.is_time_up() {
            if !self.is_aborted() {
                if is_debug_enabled() {
                    eprintln!(
                        "[TimeManager] time up! elapsed={}ms, maxi={}ms",
                        self.elapsed_ms(),
                        self.max_time_ms.load(Ordering::Relaxed)
                    );
                }
                self.signal_abort();
            }
            true
        } else {
            false
        }
    }

    /// Checks the panic threshold (`timer.c::check_panic_abort`): an
    /// unconditional hard stop regardless of iteration bookkeeping.
    #[inline]
    pub fn check_panic_abort(&self) -> bool {
        let elapsed = self.elapsed_ms() as f64;
        let limit = self.hard_time_limit_ms.load(Ordering::Relaxed) as f64;
        if self.mode != TimeControlMode::Infinite && elapsed >= panic_threshold() * limit.max(1.0) / limit.max(1.0) * limit
        {
            self.signal_abort();
            true
        } else {
            false
        }
    }

    pub fn update_remaining_time(&mut self, remaining_time_ms: u64, n_empties: u32) {
        self.n_empties = n_empties;
        match &mut self.mode {
            TimeControlMode::Fischer { main_time_ms, .. } => *main_time_ms = remaining_time_ms,
            TimeControlMode::MovesToGo { time_ms, moves } => {
                *time_ms = remaining_time_ms;
                if *moves > 0 {
                    *moves -= 1;
                }
            }
            _ => return,
        }

        let is_endgame = self.is_endgame_mode.load(Ordering::Relaxed);
        let (mini, maxi, hard_limit) = Self::calculate_time_limits(self.mode, n_empties, is_endgame);
        self.update_limits(mini, maxi, hard_limit);
    }

    fn update_limits(&self, mini: u64, maxi: u64, hard_limit: u64) {
        self.min_time_ms.store(mini, Ordering::Relaxed);
        self.max_time_ms.store(maxi, Ordering::Relaxed);
        self.base_max_time_ms.store(maxi, Ordering::Relaxed);
        self.hard_time_limit_ms.store(hard_limit, Ordering::Relaxed);
        self.extension_steps.store(0, Ordering::Relaxed);
    }

    pub fn mode(&self) -> TimeControlMode {
        self.mode
    }

    pub fn mini_time_ms(&self) -> u64 {
        self.min_time_ms.load(Ordering::Relaxed)
    }

    pub fn maxi_time_ms(&self) -> u64 {
        self.max_time_ms.load(Ordering::Relaxed)
    }

    pub fn deadline(&self) -> Option<Instant> {
        if self.mode == TimeControlMode::Infinite {
            None
        } else {
            Some(self.start_time + Duration::from_millis(self.max_time_ms.load(Ordering::Relaxed)))
        }
    }

    #[inline]
    pub fn remaining_time_ms(&self) -> u64 {
        self.max_time_ms
            .load(Ordering::Relaxed)
            .saturating_sub(self.elapsed_ms())
    }

    pub fn set_endgame_mode(&self, enabled: bool) {
        self.is_endgame_mode.store(enabled, Ordering::Relaxed);
        let (mini, maxi, hard_limit) = Self::calculate_time_limits(self.mode, self.n_empties, enabled);
        self.update_limits(mini, maxi, hard_limit);
    }
}

/// Checks whether an iterative-deepening loop driven by an optional time manager should
/// stop after the iteration that just completed.
///
/// Returns `false` for `None` (no time control: depth/selectivity limits alone decide).
pub fn should_stop_iteration(time_manager: &Option<Arc<TimeManager>>) -> bool {
    match time_manager {
        Some(tm) => !tm.should_continue_iteration(),
        None => false,
    }
}

fn is_debug_enabled() -> bool {
    static DEBUG: OnceLock<bool> = OnceLock::new();
    *DEBUG.get_or_init(|| {
        let env_var = std::env::var("REVERSI_DEBUG_TIME").unwrap_or_default();
        env_var == "1" || env_var.to_lowercase() == "true"
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_determine_move_time_opening() {
        // 30 minutes, no increment, opening position (4 discs).
        let t = determine_move_time(1800.0, 0.0, 4);
        assert!(t > 0.0);
        assert!(t < 1800.0 / 4.0 + 1.0);
    }

    #[test]
    fn test_determine_move_time_floor_near_flag() {
        // Nearly out of time: budget still clamps to at least 1 second.
        let t = determine_move_time(0.5, 0.0, 60);
        assert!(t >= 1.0 - 1e-9);
    }

    #[test]
    fn test_determine_move_time_quarter_cap() {
        let t = determine_move_time(40.0, 0.0, 4);
        assert!(t <= 40.0 / 4.0 + 1e-9);
    }

    #[test]
    fn test_determine_move_time_moves_left_floor() {
        // Deep into the game, moves_left should floor at 2, not go negative.
        let near_end = determine_move_time(20.0, 0.0, 64);
        let mid = determine_move_time(20.0, 0.0, 50);
        assert!(near_end > 0.0 && mid > 0.0);
    }

    #[test]
    fn test_time_manager_infinite_never_times_out() {
        let flag = Arc::new(AtomicBool::new(false));
        let tm = TimeManager::new(TimeControlMode::Infinite, flag, 60);
        assert!(!tm.is_time_up());
        assert!(tm.should_continue_iteration());
    }

    #[test]
    fn test_time_manager_fischer_produces_finite_budget() {
        let flag = Arc::new(AtomicBool::new(false));
        let tm = TimeManager::new(
            TimeControlMode::Fischer {
                main_time_ms: 60_000,
                increment_ms: 0,
            },
            flag,
            60,
        );
        assert!(tm.maxi_time_ms() > 0);
        assert!(tm.maxi_time_ms() < 60_000);
    }
}
