//! Cancellable periodic timer.
//!
//! The timer runs its callback on a dedicated thread. The wait before each
//! tick comes from a schedule closure consulted every time, so a timer can
//! follow the wall clock instead of drifting by a fixed period. Cancellation is
//! delivered over a channel so a sleeping timer wakes immediately instead of
//! finishing its current interval, and [`PeriodicTimer::cancel`] joins the
//! thread so no tick can fire after it returns.

use anyhow::{Context, Result};
use std::sync::mpsc::{RecvTimeoutError, Sender, channel};
use std::thread::JoinHandle;
use std::time::Duration;

/// Handle to a running periodic timer. Dropping the handle cancels the timer.
pub struct PeriodicTimer {
    cancel_tx: Option<Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl PeriodicTimer {
    /// Start a timer that waits `next_delay()` and then calls `on_tick`,
    /// repeating until cancelled.
    ///
    /// The callback returns `false` to stop the timer from its own thread, for
    /// example when the receiving side of an event channel has gone away.
    pub fn start<S, F>(mut next_delay: S, mut on_tick: F) -> Result<Self>
    where
        S: FnMut() -> Duration + Send + 'static,
        F: FnMut() -> bool + Send + 'static,
    {
        let (cancel_tx, cancel_rx) = channel::<()>();

        let handle = std::thread::Builder::new()
            .name("clockface-timer".to_string())
            .spawn(move || {
                loop {
                    match cancel_rx.recv_timeout(next_delay()) {
                        Err(RecvTimeoutError::Timeout) => {
                            if !on_tick() {
                                break;
                            }
                        }
                        // Explicit cancel or the handle was dropped
                        Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                    }
                }
            })
            .context("Failed to spawn timer thread")?;

        Ok(Self {
            cancel_tx: Some(cancel_tx),
            handle: Some(handle),
        })
    }

    /// Stop the timer and wait for its thread to exit. Safe to call repeatedly.
    pub fn cancel(&mut self) {
        if let Some(tx) = self.cancel_tx.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }

    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }
}

impl Drop for PeriodicTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_timer_ticks_until_cancelled() {
        let ticks = Arc::new(AtomicUsize::new(0));
        let counter = ticks.clone();

        let mut timer = PeriodicTimer::start(
            || Duration::from_millis(5),
            move || {
                counter.fetch_add(1, Ordering::SeqCst);
                true
            },
        )
        .unwrap();

        std::thread::sleep(Duration::from_millis(60));
        timer.cancel();
        let after_cancel = ticks.load(Ordering::SeqCst);
        assert!(after_cancel >= 1);
        assert!(!timer.is_running());

        std::thread::sleep(Duration::from_millis(30));
        assert_eq!(ticks.load(Ordering::SeqCst), after_cancel);
    }

    #[test]
    fn test_cancel_wakes_a_sleeping_timer() {
        let mut timer = PeriodicTimer::start(|| Duration::from_secs(3600), || true).unwrap();

        let started = std::time::Instant::now();
        timer.cancel();
        assert!(started.elapsed() < Duration::from_secs(5));
    }

    #[test]
    fn test_callback_can_stop_the_timer() {
        let mut timer = PeriodicTimer::start(|| Duration::from_millis(1), || false).unwrap();

        std::thread::sleep(Duration::from_millis(50));
        assert!(!timer.is_running());
        timer.cancel();
    }

    #[test]
    fn test_schedule_is_consulted_before_every_wait() {
        let delays = Arc::new(AtomicUsize::new(0));
        let ticks = Arc::new(AtomicUsize::new(0));
        let (delay_counter, tick_counter) = (delays.clone(), ticks.clone());

        let mut timer = PeriodicTimer::start(
            move || {
                // One short wait, then effectively never
                if delay_counter.fetch_add(1, Ordering::SeqCst) == 0 {
                    Duration::from_millis(1)
                } else {
                    Duration::from_secs(3600)
                }
            },
            move || {
                tick_counter.fetch_add(1, Ordering::SeqCst);
                true
            },
        )
        .unwrap();

        std::thread::sleep(Duration::from_millis(50));
        timer.cancel();

        assert_eq!(ticks.load(Ordering::SeqCst), 1);
        assert_eq!(delays.load(Ordering::SeqCst), 2);
    }
}
