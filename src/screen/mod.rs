//! Presentation layer for the clock screen.
//!
//! [`ScreenModel`] is a plain snapshot of everything on screen, built from the
//! current instant, the resolved mode and the quote [`FetchState`]. Renderers
//! in [`terminal`] only turn a model into output; they never make decisions.

pub mod terminal;
pub mod theme;

pub use terminal::{PlainRenderer, Renderer, TerminalRenderer};
pub use theme::Theme;

use chrono::{DateTime, Datelike, Local};
use chrono_tz::Tz;

use crate::clock::{ClockReading, Greeting, Meridiem, Mode, resolve_greeting, resolve_mode};
use crate::quote::FetchState;

/// What occupies the quote area.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuoteLine {
    Empty,
    Loading,
    Quote { text: String, author: String },
    Error(String),
}

impl From<&FetchState> for QuoteLine {
    fn from(state: &FetchState) -> Self {
        match state {
            FetchState::Idle => QuoteLine::Empty,
            FetchState::Loading => QuoteLine::Loading,
            FetchState::Loaded(quote) => QuoteLine::Quote {
                text: quote.text().to_string(),
                author: quote.author().to_string(),
            },
            FetchState::Failed(message) => QuoteLine::Error(message.clone()),
        }
    }
}

/// Calendar details shown when the info panel is expanded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpandedInfo {
    pub timezone: String,
    pub day_of_year: u32,
    /// 1 = Monday through 7 = Sunday
    pub day_of_week: u32,
    /// ISO 8601 week number
    pub week_number: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScreenModel {
    pub greeting: Greeting,
    pub mode: Mode,
    pub reading: ClockReading,
    pub zone_abbreviation: String,
    pub location: String,
    pub quote: QuoteLine,
    pub expanded: Option<ExpandedInfo>,
}

/// Inputs from which a [`ScreenModel`] is built.
pub struct ScreenInputs<'a> {
    pub now: DateTime<Local>,
    pub timezone: Option<Tz>,
    /// Mode from the mode context; resolved from `now` when not yet known
    pub mode: Option<Mode>,
    pub location: &'a str,
    pub fetch_state: &'a FetchState,
    pub expanded: bool,
}

impl ScreenModel {
    pub fn build(inputs: ScreenInputs<'_>) -> Self {
        let (reading, zone_abbreviation, expanded) = match inputs.timezone {
            Some(tz) => {
                let zoned = inputs.now.with_timezone(&tz);
                (
                    ClockReading::from_time(&zoned),
                    zoned.format("%Z").to_string(),
                    inputs
                        .expanded
                        .then(|| expanded_info(&zoned, tz.name().to_string())),
                )
            }
            None => {
                let offset = inputs.now.format("UTC%:z").to_string();
                (
                    ClockReading::from_time(&inputs.now),
                    offset.clone(),
                    inputs
                        .expanded
                        .then(|| expanded_info(&inputs.now, format!("Local ({offset})"))),
                )
            }
        };

        Self {
            greeting: resolve_greeting(reading),
            mode: inputs.mode.unwrap_or_else(|| resolve_mode(reading)),
            reading,
            zone_abbreviation,
            location: inputs.location.to_string(),
            quote: QuoteLine::from(inputs.fetch_state),
            expanded,
        }
    }

    pub fn theme(&self) -> &'static Theme {
        Theme::for_mode(self.mode)
    }

    pub fn meridiem(&self) -> Meridiem {
        self.reading.meridiem()
    }

    /// Label of the more/less toggle.
    pub fn toggle_label(&self) -> &'static str {
        if self.expanded.is_some() {
            "Less"
        } else {
            "More"
        }
    }

    /// The quote area as display lines.
    pub fn quote_lines(&self) -> Vec<String> {
        match &self.quote {
            QuoteLine::Empty => Vec::new(),
            QuoteLine::Loading => vec!["Fetching a quote...".to_string()],
            QuoteLine::Quote { text, author } => vec![format!("\"{text}\""), author.clone()],
            QuoteLine::Error(message) => vec![message.clone()],
        }
    }

    /// The expanded panel as `(label, value)` rows.
    pub fn panel_rows(&self) -> Vec<(&'static str, String)> {
        match &self.expanded {
            Some(info) => vec![
                ("CURRENT TIMEZONE", info.timezone.clone()),
                ("DAY OF THE YEAR", info.day_of_year.to_string()),
                ("DAY OF THE WEEK", info.day_of_week.to_string()),
                ("WEEK NUMBER", info.week_number.to_string()),
            ],
            None => Vec::new(),
        }
    }
}

fn expanded_info<D: Datelike>(date: &D, timezone: String) -> ExpandedInfo {
    ExpandedInfo {
        timezone,
        day_of_year: date.ordinal(),
        day_of_week: date.weekday().number_from_monday(),
        week_number: date.iso_week().week(),
    }
}
