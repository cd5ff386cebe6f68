//! The clock screen's event loop.
//!
//! All state lives on the thread that calls [`App::run`]: the mode context, the
//! quote provider and the expanded flag. Everything else (the mode timer, fetch
//! workers, the key reader, the signal listener) only sends [`AppEvent`]s into
//! the loop's channel, so state is never mutated from two places.

use anyhow::Result;
use std::sync::Arc;
use std::sync::mpsc::{Receiver, RecvTimeoutError, Sender, channel};
use std::time::Duration;

use crate::clock::{ClockReading, Mode};
use crate::common::constants::MAX_CONCURRENT_FETCHES;
use crate::config::Config;
use crate::mode_context::ModeContext;
use crate::quote::{
    FetchSnapshot, FetchState, FetchTicket, Quote, QuoteFetchError, QuoteProvider, QuoteSource,
    spawn_fetch,
};
use crate::screen::{Renderer, ScreenInputs, ScreenModel};
use crate::time_source::{TimeSource, reading_at};

/// Actions the user can take on the clock screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserAction {
    RefreshQuote,
    ToggleExpanded,
    Quit,
}

/// Everything the loop reacts to.
#[derive(Debug)]
pub enum AppEvent {
    /// The mode timer fired
    Tick,
    /// A fetch worker finished
    QuoteFetched {
        ticket: FetchTicket,
        result: Result<Quote, QuoteFetchError>,
    },
    Action(UserAction),
    /// The terminal needs repainting (resize)
    Redraw,
    Shutdown,
}

/// Whether the loop should keep going after an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

pub struct App {
    config: Config,
    clock: Arc<dyn TimeSource>,
    source: Arc<dyn QuoteSource>,
    mode: ModeContext,
    quotes: QuoteProvider,
    /// Fetch workers whose result has not come back yet
    fetches_running: usize,
    /// Newest ticket waiting for a free worker slot
    queued_fetch: Option<FetchTicket>,
    expanded: bool,
    events_tx: Sender<AppEvent>,
    events_rx: Receiver<AppEvent>,
    mode_changes: Receiver<Mode>,
    quote_changes: Receiver<FetchSnapshot>,
    debug_enabled: bool,
}

impl App {
    pub fn new(
        config: Config,
        clock: Arc<dyn TimeSource>,
        source: Arc<dyn QuoteSource>,
        debug_enabled: bool,
    ) -> Self {
        let (events_tx, events_rx) = channel();
        let mut mode = ModeContext::new();
        let mut quotes = QuoteProvider::new(debug_enabled);
        let mode_changes = mode.subscribe();
        let quote_changes = quotes.subscribe();

        Self {
            config,
            clock,
            source,
            mode,
            quotes,
            fetches_running: 0,
            queued_fetch: None,
            expanded: false,
            events_tx,
            events_rx,
            mode_changes,
            quote_changes,
            debug_enabled,
        }
    }

    /// Sender for producers outside the loop (input, signals).
    pub fn event_sender(&self) -> Sender<AppEvent> {
        self.events_tx.clone()
    }

    pub fn mode(&self) -> &ModeContext {
        &self.mode
    }

    pub fn quote_state(&self) -> &FetchState {
        self.quotes.state()
    }

    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    /// Number of fetch workers currently running.
    pub fn fetches_running(&self) -> usize {
        self.fetches_running
    }

    fn reading(&self) -> ClockReading {
        reading_at(self.clock.now(), self.config.timezone())
    }

    /// Resolve the first mode, request the first quote and start the mode timer.
    pub fn start(&mut self) -> Result<()> {
        self.mode.init(self.reading());
        self.refresh_quote();

        let tx = self.events_tx.clone();
        self.mode
            .start_timer(self.clock.clone(), move || tx.send(AppEvent::Tick).is_ok())?;
        if self.debug_enabled {
            log_debug!("Mode timer started (ticks on every minute boundary)");
        }
        Ok(())
    }

    /// Issue a new quote request. Any request still in flight is superseded
    /// and its result will be discarded.
    ///
    /// At most [`MAX_CONCURRENT_FETCHES`] workers run at once. When all slots
    /// are busy the ticket is queued, replacing any older queued ticket, and
    /// starts as soon as a worker reports back.
    pub fn refresh_quote(&mut self) -> FetchTicket {
        let ticket = self.quotes.begin_fetch();

        if self.fetches_running >= MAX_CONCURRENT_FETCHES {
            if self.debug_enabled {
                log_debug!(
                    "Quote request #{} queued ({} requests already running)",
                    ticket.sequence(),
                    self.fetches_running
                );
            }
            self.queued_fetch = Some(ticket);
        } else {
            self.launch_fetch(ticket);
        }
        ticket
    }

    fn launch_fetch(&mut self, ticket: FetchTicket) {
        let tx = self.events_tx.clone();
        let spawned = spawn_fetch(self.source.clone(), ticket, move |ticket, result| {
            let _ = tx.send(AppEvent::QuoteFetched { ticket, result });
        });

        match spawned {
            Ok(()) => self.fetches_running += 1,
            Err(e) => {
                self.quotes
                    .complete(ticket, Err(QuoteFetchError::unavailable(e)));
            }
        }
    }

    /// Apply one event to the owned state.
    pub fn handle_event(&mut self, event: AppEvent) -> Flow {
        match event {
            AppEvent::Tick => {
                let reading = self.reading();
                self.mode.tick(reading);
            }
            AppEvent::QuoteFetched { ticket, result } => {
                self.fetches_running = self.fetches_running.saturating_sub(1);
                self.quotes.complete(ticket, result);
                if let Some(queued) = self.queued_fetch.take() {
                    self.launch_fetch(queued);
                }
            }
            AppEvent::Action(UserAction::RefreshQuote) => {
                self.refresh_quote();
            }
            AppEvent::Action(UserAction::ToggleExpanded) => {
                self.expanded = !self.expanded;
            }
            AppEvent::Redraw => {}
            AppEvent::Action(UserAction::Quit) | AppEvent::Shutdown => return Flow::Exit,
        }
        Flow::Continue
    }

    /// Drain published changes. Returns whether the mode or quote changed.
    pub fn take_changes(&mut self) -> bool {
        let mode_changed = self.mode_changes.try_iter().count() > 0;
        let quote_changed = self.quote_changes.try_iter().count() > 0;
        mode_changed || quote_changed
    }

    /// Snapshot of the screen as it should look now.
    pub fn model(&self) -> ScreenModel {
        ScreenModel::build(ScreenInputs {
            now: self.clock.now(),
            timezone: self.config.timezone(),
            mode: self.mode.mode(),
            location: self.config.location(),
            fetch_state: self.quotes.state(),
            expanded: self.expanded,
        })
    }

    /// Wait up to `timeout` for one event, apply it and repaint if needed.
    ///
    /// Returns `None` when no event arrived in time.
    pub fn pump(
        &mut self,
        timeout: Duration,
        renderer: &mut dyn Renderer,
    ) -> Result<Option<Flow>> {
        let event = match self.events_rx.recv_timeout(timeout) {
            Ok(event) => event,
            Err(RecvTimeoutError::Timeout) => return Ok(None),
            // The loop holds its own sender, so this cannot happen while alive
            Err(RecvTimeoutError::Disconnected) => return Ok(Some(Flow::Exit)),
        };
        Ok(Some(self.dispatch(event, renderer)?))
    }

    fn dispatch(&mut self, event: AppEvent, renderer: &mut dyn Renderer) -> Result<Flow> {
        // Ticks always repaint since the minute on the clock face moved
        let repaint = matches!(
            event,
            AppEvent::Tick | AppEvent::Redraw | AppEvent::Action(UserAction::ToggleExpanded)
        );
        let flow = self.handle_event(event);
        if flow == Flow::Continue && (self.take_changes() || repaint) {
            renderer.render(&self.model())?;
        }
        Ok(flow)
    }

    /// Run until quit or shutdown, then tear down.
    pub fn run(&mut self, renderer: &mut dyn Renderer) -> Result<()> {
        self.start()?;
        self.take_changes();
        renderer.render(&self.model())?;

        let result = loop {
            let event = match self.events_rx.recv() {
                Ok(event) => event,
                Err(_) => break Ok(()),
            };
            match self.dispatch(event, renderer) {
                Ok(Flow::Continue) => {}
                Ok(Flow::Exit) => break Ok(()),
                Err(e) => break Err(e),
            }
        };

        self.shutdown();
        result
    }

    /// Render a single frame after fetching a quote on this thread.
    pub fn render_once(&mut self, renderer: &mut dyn Renderer) -> Result<()> {
        self.mode.init(self.reading());
        let source = self.source.clone();
        self.quotes.fetch_blocking(source.as_ref());
        self.take_changes();
        renderer.render(&self.model())
    }

    /// Stop periodic work. Pending fetch results are dropped with the channel.
    pub fn shutdown(&mut self) {
        self.mode.dispose();
        self.queued_fetch = None;
        if self.debug_enabled {
            log_debug!(
                "Mode timer cancelled ({} stale quote results discarded this session)",
                self.quotes.discarded_count()
            );
        }
    }
}
