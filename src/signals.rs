//! Signal handling for clockface.
//!
//! - SIGINT, SIGTERM, SIGHUP: shut down cleanly
//! - SIGUSR1: refresh the quote, e.g. `pkill -USR1 clockface`
//! - SIGWINCH: redraw after a terminal resize

use anyhow::{Context, Result};
use signal_hook::{
    consts::signal::{SIGHUP, SIGINT, SIGTERM, SIGUSR1, SIGWINCH},
    iterator::{Handle, Signals},
};
use std::sync::mpsc::Sender;
use std::thread::{self, JoinHandle};

use crate::app::{AppEvent, UserAction};

/// Map a delivered signal to the event it should raise.
pub fn signal_event(signal: i32) -> Option<AppEvent> {
    match signal {
        SIGINT | SIGTERM | SIGHUP => Some(AppEvent::Shutdown),
        SIGUSR1 => Some(AppEvent::Action(UserAction::RefreshQuote)),
        SIGWINCH => Some(AppEvent::Redraw),
        _ => None,
    }
}

/// Running signal listener. Dropping it unregisters the handlers.
pub struct SignalListener {
    handle: Handle,
    thread: Option<JoinHandle<()>>,
}

/// Register the handlers and forward events to the loop.
pub fn setup_signal_handler(
    events: Sender<AppEvent>,
    debug_enabled: bool,
) -> Result<SignalListener> {
    let mut signals = Signals::new([SIGINT, SIGTERM, SIGHUP, SIGUSR1, SIGWINCH])
        .context("failed to register signal handlers")?;
    let handle = signals.handle();

    let thread = thread::Builder::new()
        .name("clockface-signals".to_string())
        .spawn(move || {
            for sig in signals.forever() {
                if debug_enabled {
                    log_debug!("Received signal {sig}");
                }
                if let Some(event) = signal_event(sig)
                    && events.send(event).is_err()
                {
                    break;
                }
            }
        })
        .context("Failed to spawn signal thread")?;

    Ok(SignalListener {
        handle,
        thread: Some(thread),
    })
}

impl Drop for SignalListener {
    fn drop(&mut self) {
        self.handle.close();
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signal_mapping() {
        assert!(matches!(signal_event(SIGTERM), Some(AppEvent::Shutdown)));
        assert!(matches!(signal_event(SIGHUP), Some(AppEvent::Shutdown)));
        assert!(matches!(
            signal_event(SIGUSR1),
            Some(AppEvent::Action(UserAction::RefreshQuote))
        ));
        assert!(matches!(signal_event(SIGWINCH), Some(AppEvent::Redraw)));
        assert!(signal_event(0).is_none());
    }
}
