//! Configuration system for clockface.
//!
//! Settings live in `clockface.toml`, searched in:
//! 1. the directory given with `--config <dir>`
//! 2. **XDG_CONFIG_HOME**/clockface/clockface.toml
//!
//! A commented default file is created when none exists. Every field is
//! optional:
//!
//! ```toml
//! #[Quotes]
//! quote_url = "https://zenquotes.io/api/random" # JSON quote service
//! request_timeout = 10                          # Seconds before a fetch fails (1-60)
//!
//! #[Clock]
//! location = "Unknown location"                 # Label shown under the clock
//! timezone = "Europe/London"                    # IANA zone (defaults to system zone)
//! ```

pub mod builder;
pub mod loading;
pub mod validation;

use anyhow::Result;
use chrono_tz::Tz;
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

use crate::common::constants::*;

pub use builder::create_default_config;
pub use loading::{get_config_path, load, load_from_path, set_config_dir};

/// Configuration structure for clockface settings.
///
/// Missing fields fall back to the defaults in `common::constants`; use the
/// accessor methods rather than the raw fields.
#[derive(Debug, Deserialize, Clone, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Endpoint returning a JSON quote.
    pub quote_url: Option<String>,
    /// Seconds before a quote request is abandoned.
    pub request_timeout: Option<u64>,
    /// Opaque location label displayed on screen.
    pub location: Option<String>,
    /// IANA timezone used to read the clock.
    pub timezone: Option<String>,
}

impl Config {
    /// Load configuration using automatic path detection.
    pub fn load() -> Result<Self> {
        load()
    }

    pub fn load_from_path(path: &std::path::Path) -> Result<Self> {
        load_from_path(path)
    }

    pub fn get_config_path() -> Result<PathBuf> {
        get_config_path()
    }

    pub fn quote_url(&self) -> &str {
        self.quote_url.as_deref().unwrap_or(DEFAULT_QUOTE_URL)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout.unwrap_or(DEFAULT_REQUEST_TIMEOUT))
    }

    pub fn location(&self) -> &str {
        self.location.as_deref().unwrap_or(DEFAULT_LOCATION)
    }

    /// The configured timezone, `None` meaning the system zone.
    ///
    /// Validation has already rejected unknown names, so a parse failure here
    /// only happens for hand-built configs and is treated as "system zone".
    pub fn timezone(&self) -> Option<Tz> {
        self.timezone
            .as_deref()
            .and_then(|name| crate::time_source::parse_timezone(name).ok())
    }

    /// Log the effective configuration.
    pub fn log_config(&self, path: Option<&std::path::Path>) {
        match path {
            Some(path) => log_block_start!("Loaded configuration from {}", path.display()),
            None => log_block_start!("Using default configuration"),
        }
        log_indented!("Quote service: {}", self.quote_url());
        log_indented!("Request timeout: {}s", self.request_timeout().as_secs());
        log_indented!("Location: {}", self.location());
        log_indented!(
            "Timezone: {}",
            self.timezone.as_deref().unwrap_or("system local")
        );
    }
}

#[cfg(test)]
mod tests;
