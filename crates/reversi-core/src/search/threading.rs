//! Search execution and cooperative abort.
//!
//! Per the single-threaded cooperative model: exactly one search runs at a time per
//! [`crate::search::Search`] instance, handed off to its own worker thread so the caller
//! gets a [`std::sync::mpsc::Receiver`] back immediately. [`Thread`] is threaded through
//! every recursive call purely so the search can check `is_search_aborted()` without a
//! global; there is no split-point/work-stealing machinery since the driver never
//! searches more than one position at a time. A second, optional timer thread polls the
//! active [`TimeManager`](crate::search::time_control::TimeManager) and flips the abort
//! flag once its deadline (or panic threshold) is reached.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc;
use std::thread::JoinHandle;
use std::time::Duration;

use crate::search::SearchTask;
use crate::search::search_result::SearchResult;
use crate::search::time_control::TimeManager;

/// How often the timer thread wakes up to check the deadline.
const TIMER_POLL_INTERVAL: Duration = Duration::from_millis(5);

/// Cooperative abort handle passed down through the search recursion.
///
/// Holds no work of its own; it is a thin view onto the [`ThreadPool`]'s abort flag.
pub struct Thread {
    abort_flag: Arc<AtomicBool>,
}

impl Thread {
    fn new(abort_flag: Arc<AtomicBool>) -> Self {
        Thread { abort_flag }
    }

    /// Whether the owning search has been asked to stop (time up, or explicit abort).
    #[inline]
    pub fn is_search_aborted(&self) -> bool {
        self.abort_flag.load(Ordering::Relaxed)
    }

    /// Always `false`: there is no split-point search to be cut off by a sibling thread.
    #[inline]
    pub fn cutoff_occurred(&self) -> bool {
        false
    }
}

struct TimerHandle {
    stop: Arc<AtomicBool>,
    join: JoinHandle<()>,
}

/// Owns the abort flag and the search/timer worker threads for one [`Search`](crate::search::Search)
/// instance.
pub struct ThreadPool {
    abort_flag: Arc<AtomicBool>,
    timer: std::sync::Mutex<Option<TimerHandle>>,
}

impl ThreadPool {
    /// Creates a fresh pool with a cleared abort flag and no running timer.
    pub fn new() -> Arc<ThreadPool> {
        Arc::new(ThreadPool {
            abort_flag: Arc::new(AtomicBool::new(false)),
            timer: std::sync::Mutex::new(None),
        })
    }

    /// Returns the shared abort flag, handed to the [`TimeManager`] so it can signal
    /// this pool directly when the deadline passes.
    pub fn get_abort_flag(&self) -> Arc<AtomicBool> {
        self.abort_flag.clone()
    }

    /// Requests that the running search stop as soon as it next checks the abort flag.
    pub fn abort_search(&self) {
        self.abort_flag.store(true, Ordering::Release);
    }

    pub fn is_aborted(&self) -> bool {
        self.abort_flag.load(Ordering::Relaxed)
    }

    /// Starts the search on its own worker thread and returns a receiver for the result.
    pub fn start_thinking(self: &Arc<Self>, task: SearchTask) -> mpsc::Receiver<SearchResult> {
        let (tx, rx) = mpsc::channel();
        let thread = Arc::new(Thread::new(self.abort_flag.clone()));

        std::thread::Builder::new()
            .name("reversi-search".into())
            .spawn(move || {
                let result = crate::search::search_root(task, &thread);
                let _ = tx.send(result);
            })
            .expect("failed to spawn search thread");

        rx
    }

    /// Starts a background timer that aborts the search once `time_manager`'s deadline
    /// (or panic threshold) is reached. A no-op if the mode has no deadline.
    pub fn start_timer(&self, time_manager: Arc<TimeManager>) {
        let stop = Arc::new(AtomicBool::new(false));
        let stop_clone = stop.clone();

        let join = std::thread::Builder::new()
            .name("reversi-timer".into())
            .spawn(move || {
                while !stop_clone.load(Ordering::Relaxed) {
                    if time_manager.check_panic_abort() || time_manager.check_time() {
                        break;
                    }
                    std::thread::sleep(TIMER_POLL_INTERVAL);
                }
            })
            .expect("failed to spawn timer thread");

        *self.timer.lock().unwrap() = Some(TimerHandle { stop, join });
    }

    /// Stops and joins the timer thread, if one is running.
    pub fn stop_timer(&self) {
        if let Some(handle) = self.timer.lock().unwrap().take() {
            handle.stop.store(true, Ordering::Relaxed);
            let _ = handle.join.join();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_pool_not_aborted() {
        let pool = ThreadPool::new();
        assert!(!pool.is_aborted());
    }

    #[test]
    fn test_abort_search_sets_flag() {
        let pool = ThreadPool::new();
        pool.abort_search();
        assert!(pool.is_aborted());
    }

    #[test]
    fn test_thread_observes_pool_abort() {
        let pool = ThreadPool::new();
        let thread = Thread::new(pool.get_abort_flag());
        assert!(!thread.is_search_aborted());
        pool.abort_search();
        assert!(thread.is_search_aborted());
        assert!(!thread.cutoff_occurred());
    }

    #[test]
    fn test_stop_timer_without_start_is_noop() {
        let pool = ThreadPool::new();
        pool.stop_timer();
    }
}
