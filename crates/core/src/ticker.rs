//! Periodic tick task with single ownership
//!
//! A [`TickHandle`] owns exactly one spawned loop. Cancelling or dropping
//! the handle aborts the loop, so a session that holds at most one handle
//! can never have two tickers running.

use std::time::Duration;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

use crate::constants::MAX_TICK_PERIOD_SECS;

/// Timer period for `secs`, or `None` unless it is a finite, non-zero
/// duration of at most [`MAX_TICK_PERIOD_SECS`].
pub fn tick_period(secs: f64) -> Option<Duration> {
    if secs > MAX_TICK_PERIOD_SECS {
        return None;
    }
    Duration::try_from_secs_f64(secs)
        .ok()
        .filter(|period| !period.is_zero())
}

/// Owned periodic task
#[derive(Debug)]
pub struct TickHandle {
    task: Option<JoinHandle<()>>,
    period: Duration,
}

impl TickHandle {
    /// Spawn a loop on `runtime` that calls `on_tick` every `period`.
    ///
    /// The first call happens one full period after spawning. `period` must
    /// be non-zero; use [`tick_period`] to build it from seconds.
    pub fn spawn<F>(runtime: &Handle, period: Duration, mut on_tick: F) -> Self
    where
        F: FnMut() + Send + 'static,
    {
        let first = Instant::now() + period;
        let task = runtime.spawn(async move {
            let mut interval = interval_at(first, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                on_tick();
            }
        });

        Self {
            task: Some(task),
            period,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn is_active(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }

    /// Abort the loop. Safe to call more than once.
    pub fn cancel(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

impl Drop for TickHandle {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[tokio::test(start_paused = true)]
    async fn test_ticks_once_per_period() {
        let count = Arc::new(AtomicUsize::new(0));
        let counter = count.clone();
        let _handle = TickHandle::spawn(&Handle::current(), Duration::from_millis(700), move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        tokio::time::sleep(Duration::from_millis(650)).await;
        assert_eq!(count.load(Ordering::SeqCst), 0);

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(count.load(Ordering::SeqCst), 1);

        tokio::time::sleep(Duration::from_millis(1400)).await;
        assert_eq!(count.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_stops_ticking() {
        let count = Arc::new(AtomicUsize::new(0));
        let counter = count.clone();
        let handle = TickHandle::spawn(&Handle::current(), Duration::from_secs(1), move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        assert!(handle.is_active());
        drop(handle);

        tokio::time::sleep(Duration::from_millis(5_500)).await;
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_tick_period_rejects_unusable_values() {
        assert_eq!(tick_period(1.5), Some(Duration::from_millis(1_500)));
        assert_eq!(tick_period(MAX_TICK_PERIOD_SECS), Some(Duration::from_secs(31_536_000)));
        // rounds down to zero nanoseconds
        assert_eq!(tick_period(1e-10), None);
        for secs in [0.0, -1.0, 1e20, f64::NAN, f64::INFINITY] {
            assert_eq!(tick_period(secs), None, "{secs}");
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_is_idempotent() {
        let mut handle = TickHandle::spawn(&Handle::current(), Duration::from_secs(1), || {});
        handle.cancel();
        handle.cancel();
        assert!(!handle.is_active());
    }
}
