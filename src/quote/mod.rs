//! Quotes shown under the clock.
//!
//! ## Module Structure
//!
//! - [`provider`]: owns the [`FetchState`] and decides which fetch results are
//!   allowed to reach the screen
//! - [`http`]: the [`QuoteSource`] backed by a JSON web service
//!
//! Every way a fetch can go wrong collapses into [`QuoteFetchError`], whose
//! display text is a fixed, non-technical message. The underlying cause is kept
//! only for debug logging.

pub mod http;
pub mod provider;

pub use http::HttpQuoteSource;
pub use provider::{FetchSnapshot, FetchState, FetchTicket, QuoteProvider, spawn_fetch};

use std::fmt;

use crate::common::constants::{QUOTE_UNAVAILABLE_MESSAGE, UNKNOWN_AUTHOR};

/// A quote and its author. Replaced as a whole, never edited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quote {
    text: String,
    author: String,
}

impl Quote {
    /// Build a quote, trimming whitespace and substituting a placeholder for a
    /// blank author.
    pub fn new(text: impl Into<String>, author: impl Into<String>) -> Self {
        let text = text.into().trim().to_string();
        let author = author.into().trim().to_string();
        Self {
            text,
            author: if author.is_empty() {
                UNKNOWN_AUTHOR.to_string()
            } else {
                author
            },
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn author(&self) -> &str {
        &self.author
    }
}

impl fmt::Display for Quote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\" - {}", self.text, self.author)
    }
}

/// The single failure kind of quote fetching.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QuoteFetchError {
    /// The service could not produce a usable quote. `cause` is diagnostic
    /// detail and never shown on screen.
    #[error("{}", QUOTE_UNAVAILABLE_MESSAGE)]
    Unavailable { cause: String },
}

impl QuoteFetchError {
    pub fn unavailable(cause: impl fmt::Display) -> Self {
        QuoteFetchError::Unavailable {
            cause: cause.to_string(),
        }
    }

    pub fn cause(&self) -> &str {
        match self {
            QuoteFetchError::Unavailable { cause } => cause,
        }
    }

    /// Text shown in place of the quote.
    pub fn user_message(&self) -> &'static str {
        QUOTE_UNAVAILABLE_MESSAGE
    }
}

/// Anything that can produce a quote on demand.
///
/// Implementations block until the quote arrives or the attempt fails; the
/// provider runs them off the event-loop thread.
#[cfg_attr(test, mockall::automock)]
pub trait QuoteSource: Send + Sync {
    fn fetch_quote(&self) -> Result<Quote, QuoteFetchError>;
}
