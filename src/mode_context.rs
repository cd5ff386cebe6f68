//! App-lifetime day/night mode state.
//!
//! `ModeContext` is constructed explicitly by the application and handed to
//! whatever needs theming. It starts out [`ModeState::Uninitialized`], resolves
//! its first mode in [`ModeContext::init`], and afterwards is re-evaluated by a
//! timer that fires on every wall-clock minute boundary. Subscribers hear about
//! a mode exactly once per change.

use anyhow::Result;
use chrono::{DateTime, Local, Timelike};
use std::sync::Arc;
use std::sync::mpsc::Receiver;
use std::time::Duration;

use crate::clock::{ClockReading, Mode, resolve_mode};
use crate::observe::Publisher;
use crate::time_source::TimeSource;
use crate::timer::PeriodicTimer;

/// Lifecycle state of the mode context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeState {
    Uninitialized,
    Day,
    Night,
}

impl From<Mode> for ModeState {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Day => ModeState::Day,
            Mode::Night => ModeState::Night,
        }
    }
}

impl ModeState {
    pub fn mode(&self) -> Option<Mode> {
        match self {
            ModeState::Uninitialized => None,
            ModeState::Day => Some(Mode::Day),
            ModeState::Night => Some(Mode::Night),
        }
    }
}

pub struct ModeContext {
    state: ModeState,
    publisher: Publisher<Mode>,
    timer: Option<PeriodicTimer>,
}

impl Default for ModeContext {
    fn default() -> Self {
        Self::new()
    }
}

impl ModeContext {
    pub fn new() -> Self {
        Self {
            state: ModeState::Uninitialized,
            publisher: Publisher::new(),
            timer: None,
        }
    }

    /// Subscribe to mode changes.
    pub fn subscribe(&mut self) -> Receiver<Mode> {
        self.publisher.subscribe()
    }

    pub fn state(&self) -> ModeState {
        self.state
    }

    /// The resolved mode, or `None` before [`ModeContext::init`].
    pub fn mode(&self) -> Option<Mode> {
        self.state.mode()
    }

    /// Resolve the first mode and publish it unconditionally.
    pub fn init(&mut self, reading: ClockReading) -> Mode {
        let mode = resolve_mode(reading);
        self.state = mode.into();
        self.publisher.publish(&mode);
        log_block_start!("Starting in {} mode {}", mode, mode.symbol());
        mode
    }

    /// Re-evaluate the mode for a new reading.
    ///
    /// Returns the new mode when it changed (and was published), `None` when it
    /// stayed the same. A tick before `init` behaves like `init`.
    pub fn tick(&mut self, reading: ClockReading) -> Option<Mode> {
        let mode = resolve_mode(reading);

        match self.state.mode() {
            Some(current) if current == mode => None,
            Some(current) => {
                self.state = mode.into();
                self.publisher.publish(&mode);
                log_block_start!(
                    "Switching from {} to {} mode {}",
                    current,
                    mode,
                    mode.symbol()
                );
                Some(mode)
            }
            None => Some(self.init(reading)),
        }
    }

    /// Start the re-evaluation timer.
    ///
    /// Every tick lands on the next minute boundary of `clock`, the finest unit
    /// that can change the mode or the minute on the clock face. The delay is
    /// recomputed before each wait so ticks never drift off the minute. Any
    /// previously running timer is cancelled first.
    pub fn start_timer<F>(&mut self, clock: Arc<dyn TimeSource>, on_tick: F) -> Result<()>
    where
        F: FnMut() -> bool + Send + 'static,
    {
        self.stop_timer();
        let schedule = move || duration_until_next_minute(clock.now());
        self.timer = Some(PeriodicTimer::start(schedule, on_tick)?);
        Ok(())
    }

    pub fn has_running_timer(&self) -> bool {
        self.timer.as_ref().is_some_and(PeriodicTimer::is_running)
    }

    fn stop_timer(&mut self) {
        if let Some(mut timer) = self.timer.take() {
            timer.cancel();
        }
    }

    /// Tear the context down: cancel the timer and return to `Uninitialized`.
    pub fn dispose(&mut self) {
        self.stop_timer();
        self.state = ModeState::Uninitialized;
    }
}

impl Drop for ModeContext {
    fn drop(&mut self) {
        self.stop_timer();
    }
}

/// Time left until the wall clock reaches the next whole minute.
pub fn duration_until_next_minute(now: DateTime<Local>) -> Duration {
    // Leap seconds report nanosecond() >= 1e9
    let nanos = u64::from(now.nanosecond() % 1_000_000_000);
    let into_minute = Duration::from_secs(u64::from(now.second())) + Duration::from_nanos(nanos);
    Duration::from_secs(60).saturating_sub(into_minute)
}
