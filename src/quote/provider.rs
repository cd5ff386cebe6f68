//! Quote fetch lifecycle with latest-wins ordering.
//!
//! Each fetch request gets a [`FetchTicket`] carrying a sequence number from a
//! monotonically increasing counter. Refreshing while a fetch is in flight
//! issues a new ticket right away; when results come back, only the one whose
//! ticket is the newest issued is applied. Results of superseded tickets are
//! discarded whether they arrive before or after the newest one, so an old
//! request can never overwrite a newer one on screen.

use std::sync::Arc;
use std::sync::mpsc::Receiver;

use super::{Quote, QuoteFetchError, QuoteSource};
use crate::observe::Publisher;

/// Lifecycle state of the quote shown on screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchState {
    Idle,
    Loading,
    Loaded(Quote),
    /// Holds the user-facing message, never the transport detail.
    Failed(String),
}

impl FetchState {
    pub fn is_loading(&self) -> bool {
        matches!(self, FetchState::Loading)
    }

    pub fn quote(&self) -> Option<&Quote> {
        match self {
            FetchState::Loaded(quote) => Some(quote),
            _ => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            FetchState::Failed(message) => Some(message),
            _ => None,
        }
    }
}

/// A published state together with its generation.
///
/// The generation increases on every transition, so two snapshots with equal
/// content (the same quote fetched twice) are still distinguishable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchSnapshot {
    pub generation: u64,
    pub state: FetchState,
}

/// Handle for one issued fetch request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct FetchTicket {
    seq: u64,
}

impl FetchTicket {
    pub fn sequence(&self) -> u64 {
        self.seq
    }
}

/// Owner of the quote [`FetchState`].
#[derive(Debug)]
pub struct QuoteProvider {
    snapshot: FetchSnapshot,
    /// Sequence number of the newest issued ticket
    issued: u64,
    /// Sequence number of the last applied result
    applied: u64,
    discarded: u64,
    debug_enabled: bool,
    publisher: Publisher<FetchSnapshot>,
}

impl QuoteProvider {
    pub fn new(debug_enabled: bool) -> Self {
        Self {
            snapshot: FetchSnapshot {
                generation: 0,
                state: FetchState::Idle,
            },
            issued: 0,
            applied: 0,
            discarded: 0,
            debug_enabled,
            publisher: Publisher::new(),
        }
    }

    pub fn subscribe(&mut self) -> Receiver<FetchSnapshot> {
        self.publisher.subscribe()
    }

    pub fn state(&self) -> &FetchState {
        &self.snapshot.state
    }

    pub fn snapshot(&self) -> &FetchSnapshot {
        &self.snapshot
    }

    /// Number of results dropped because a newer request had been issued.
    pub fn discarded_count(&self) -> u64 {
        self.discarded
    }

    /// Whether a result is still outstanding for the newest ticket.
    pub fn is_in_flight(&self) -> bool {
        self.issued > self.applied
    }

    /// Issue a new request: clear the current quote or error, enter
    /// `Loading`, and hand back the ticket the result must be completed with.
    pub fn begin_fetch(&mut self) -> FetchTicket {
        if self.is_in_flight() && self.debug_enabled {
            log_debug!(
                "Superseding in-flight quote request #{} with #{}",
                self.issued,
                self.issued + 1
            );
        }
        self.issued += 1;
        self.set_state(FetchState::Loading);
        FetchTicket { seq: self.issued }
    }

    /// Apply the result of a request if its ticket is still the newest.
    ///
    /// Returns `false` when the result was discarded as stale.
    pub fn complete(
        &mut self,
        ticket: FetchTicket,
        result: Result<Quote, QuoteFetchError>,
    ) -> bool {
        if ticket.seq != self.issued || ticket.seq <= self.applied {
            self.discarded += 1;
            if self.debug_enabled {
                log_debug!(
                    "Discarding stale quote result #{} (newest is #{})",
                    ticket.seq,
                    self.issued
                );
            }
            return false;
        }

        self.applied = ticket.seq;
        let state = match result {
            Ok(quote) => {
                if self.debug_enabled {
                    log_debug!("Quote #{} loaded: {}", ticket.seq, quote.author());
                }
                FetchState::Loaded(quote)
            }
            Err(error) => {
                log_warning!("Quote request #{} failed", ticket.seq);
                if self.debug_enabled {
                    log_indented!("Cause: {}", error.cause());
                }
                FetchState::Failed(error.user_message().to_string())
            }
        };
        self.set_state(state);
        true
    }

    /// Fetch on the calling thread: begin, wait for `source`, complete.
    pub fn fetch_blocking(&mut self, source: &dyn QuoteSource) -> &FetchState {
        let ticket = self.begin_fetch();
        let result = source.fetch_quote();
        self.complete(ticket, result);
        self.state()
    }

    fn set_state(&mut self, state: FetchState) {
        self.snapshot = FetchSnapshot {
            generation: self.snapshot.generation + 1,
            state,
        };
        self.publisher.publish(&self.snapshot);
    }
}

/// Run `source` on a worker thread and hand the result to `deliver` together
/// with its ticket. The caller routes it back to the provider's thread.
pub fn spawn_fetch<F>(
    source: Arc<dyn QuoteSource>,
    ticket: FetchTicket,
    deliver: F,
) -> std::io::Result<()>
where
    F: FnOnce(FetchTicket, Result<Quote, QuoteFetchError>) + Send + 'static,
{
    std::thread::Builder::new()
        .name(format!("clockface-fetch-{}", ticket.seq))
        .spawn(move || {
            let result = source.fetch_quote();
            deliver(ticket, result);
        })
        .map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::constants::QUOTE_UNAVAILABLE_MESSAGE;
    use crate::quote::MockQuoteSource;
    use std::sync::mpsc::channel;
    use std::time::Duration;

    fn quote(text: &str) -> Quote {
        Quote::new(text, "Tester")
    }

    #[test]
    fn test_initial_fetch_loads_quote() {
        let mut source = MockQuoteSource::new();
        source
            .expect_fetch_quote()
            .times(1)
            .returning(|| Ok(Quote::new("Be curious.", "Anon")));

        let mut provider = QuoteProvider::new(false);
        let state = provider.fetch_blocking(&source);

        assert_eq!(state.quote().unwrap().text(), "Be curious.");
        assert!(!provider.is_in_flight());
    }

    #[test]
    fn test_failure_surfaces_fixed_message() {
        let mut source = MockQuoteSource::new();
        source
            .expect_fetch_quote()
            .returning(|| Err(QuoteFetchError::unavailable("HTTP 503")));

        let mut provider = QuoteProvider::new(false);
        let state = provider.fetch_blocking(&source);

        assert_eq!(state.error_message(), Some(QUOTE_UNAVAILABLE_MESSAGE));
    }

    #[test]
    fn test_refresh_passes_through_loading_even_for_same_quote() {
        let mut provider = QuoteProvider::new(false);
        let rx = provider.subscribe();

        let first = provider.begin_fetch();
        provider.complete(first, Ok(quote("same")));
        let loaded_before = provider.snapshot().clone();

        let second = provider.begin_fetch();
        provider.complete(second, Ok(quote("same")));
        let loaded_after = provider.snapshot().clone();

        let published: Vec<FetchSnapshot> = rx.try_iter().collect();
        let states: Vec<&FetchState> = published.iter().map(|s| &s.state).collect();
        assert_eq!(
            states,
            vec![
                &FetchState::Loading,
                &FetchState::Loaded(quote("same")),
                &FetchState::Loading,
                &FetchState::Loaded(quote("same")),
            ]
        );
        assert_eq!(loaded_before.state, loaded_after.state);
        assert_ne!(loaded_before, loaded_after);
        assert!(loaded_after.generation > loaded_before.generation);
    }

    #[test]
    fn test_stale_result_arriving_late_is_discarded() {
        let mut provider = QuoteProvider::new(false);

        let a = provider.begin_fetch();
        let b = provider.begin_fetch();

        assert!(provider.complete(b, Ok(quote("from B"))));
        assert!(!provider.complete(a, Ok(quote("from A"))));

        assert_eq!(provider.state().quote().unwrap().text(), "from B");
        assert_eq!(provider.discarded_count(), 1);
    }

    #[test]
    fn test_stale_result_arriving_early_is_discarded() {
        let mut provider = QuoteProvider::new(false);

        let a = provider.begin_fetch();
        let b = provider.begin_fetch();

        assert!(!provider.complete(a, Ok(quote("from A"))));
        assert!(provider.state().is_loading());

        assert!(provider.complete(b, Err(QuoteFetchError::unavailable("timeout"))));
        assert_eq!(
            provider.state().error_message(),
            Some(QUOTE_UNAVAILABLE_MESSAGE)
        );
    }

    #[test]
    fn test_ticket_cannot_be_applied_twice() {
        let mut provider = QuoteProvider::new(false);
        let ticket = provider.begin_fetch();

        assert!(provider.complete(ticket, Ok(quote("first"))));
        assert!(!provider.complete(ticket, Ok(quote("second"))));
        assert_eq!(provider.state().quote().unwrap().text(), "first");
    }

    #[test]
    fn test_error_round_trip_clears_error() {
        let mut provider = QuoteProvider::new(false);

        let failing = provider.begin_fetch();
        provider.complete(failing, Err(QuoteFetchError::unavailable("refused")));
        assert!(provider.state().error_message().is_some());

        let retry = provider.begin_fetch();
        assert_eq!(provider.state(), &FetchState::Loading);
        provider.complete(retry, Ok(quote("recovered")));

        assert_eq!(provider.state(), &FetchState::Loaded(quote("recovered")));
        assert!(provider.state().error_message().is_none());
    }

    #[test]
    fn test_spawn_fetch_delivers_with_ticket() {
        let mut source = MockQuoteSource::new();
        source
            .expect_fetch_quote()
            .returning(|| Ok(Quote::new("Threaded.", "Worker")));

        let mut provider = QuoteProvider::new(false);
        let ticket = provider.begin_fetch();
        let (tx, rx) = channel();

        spawn_fetch(Arc::new(source), ticket, move |ticket, result| {
            let _ = tx.send((ticket, result));
        })
        .unwrap();

        let (delivered, result) = rx.recv_timeout(Duration::from_secs(5)).unwrap();
        assert_eq!(delivered, ticket);
        assert!(provider.complete(delivered, result));
        assert_eq!(provider.state().quote().unwrap().author(), "Worker");
    }
}
