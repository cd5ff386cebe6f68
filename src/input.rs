//! Keyboard input for the full-screen clock.
//!
//! A reader thread polls crossterm for key events and forwards the mapped
//! [`UserAction`]s to the event loop. Polling with a short timeout lets the
//! thread notice [`KeyReader::stop`] without waiting for another keypress.

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::Sender;
use std::thread::JoinHandle;
use std::time::Duration;

use crate::app::{AppEvent, UserAction};

const POLL_INTERVAL: Duration = Duration::from_millis(200);

/// Translate a key press into an action, ignoring everything unbound.
pub fn key_action(key: &KeyEvent) -> Option<UserAction> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(UserAction::Quit)
        }
        KeyCode::Char('r') | KeyCode::Char('R') => Some(UserAction::RefreshQuote),
        KeyCode::Char('m') | KeyCode::Char('M') | KeyCode::Char(' ') => {
            Some(UserAction::ToggleExpanded)
        }
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(UserAction::Quit),
        _ => None,
    }
}

pub struct KeyReader {
    running: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl KeyReader {
    pub fn spawn(events: Sender<AppEvent>) -> Result<Self> {
        let running = Arc::new(AtomicBool::new(true));
        let running_clone = running.clone();

        let handle = std::thread::Builder::new()
            .name("clockface-input".to_string())
            .spawn(move || {
                while running_clone.load(Ordering::SeqCst) {
                    match event::poll(POLL_INTERVAL) {
                        Ok(true) => {}
                        Ok(false) => continue,
                        Err(_) => break,
                    }
                    let app_event = match event::read() {
                        Ok(Event::Key(key)) => key_action(&key).map(AppEvent::Action),
                        Ok(Event::Resize(_, _)) => Some(AppEvent::Redraw),
                        Ok(_) => None,
                        Err(_) => break,
                    };
                    if let Some(app_event) = app_event
                        && events.send(app_event).is_err()
                    {
                        break;
                    }
                }
            })
            .context("Failed to spawn input thread")?;

        Ok(Self {
            running,
            handle: Some(handle),
        })
    }

    pub fn stop(&mut self) {
        self.running.store(false, Ordering::SeqCst);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for KeyReader {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn test_bound_keys() {
        assert_eq!(
            key_action(&press(KeyCode::Char('r'), KeyModifiers::NONE)),
            Some(UserAction::RefreshQuote)
        );
        assert_eq!(
            key_action(&press(KeyCode::Char(' '), KeyModifiers::NONE)),
            Some(UserAction::ToggleExpanded)
        );
        assert_eq!(
            key_action(&press(KeyCode::Esc, KeyModifiers::NONE)),
            Some(UserAction::Quit)
        );
        assert_eq!(
            key_action(&press(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(UserAction::Quit)
        );
    }

    #[test]
    fn test_unbound_keys_and_releases_are_ignored() {
        assert_eq!(key_action(&press(KeyCode::Char('x'), KeyModifiers::NONE)), None);

        let mut release = press(KeyCode::Char('r'), KeyModifiers::NONE);
        release.kind = KeyEventKind::Release;
        assert_eq!(key_action(&release), None);
    }
}
