//! Time source abstraction for supporting both real and frozen time.
//!
//! Everything that reads "now" goes through the process-wide source installed
//! here, so the clock screen can be pinned to a fixed instant (`--at`) for
//! screenshots and tests without touching the decision logic.

use anyhow::{Context, Result};
use chrono::{DateTime, Local, NaiveTime, TimeZone};
use chrono_tz::Tz;
use once_cell::sync::OnceCell;
use std::sync::Arc;

use crate::clock::ClockReading;

/// Global time source instance, defaults to RealTimeSource
static TIME_SOURCE: OnceCell<Arc<dyn TimeSource>> = OnceCell::new();

/// Trait for abstracting time operations
pub trait TimeSource: Send + Sync {
    /// Get the current time
    fn now(&self) -> DateTime<Local>;

    /// Check if this source always reports the same instant
    fn is_frozen(&self) -> bool;
}

/// Real-time implementation that uses the system clock
pub struct RealTimeSource;

impl TimeSource for RealTimeSource {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }

    fn is_frozen(&self) -> bool {
        false
    }
}

/// A clock stopped at a single instant.
pub struct FixedTimeSource {
    instant: DateTime<Local>,
}

impl FixedTimeSource {
    pub fn new(instant: DateTime<Local>) -> Self {
        Self { instant }
    }

    /// Freeze today's date at the given wall-clock time.
    pub fn today_at(reading: ClockReading) -> Result<Self> {
        let time =
            NaiveTime::from_hms_opt(u32::from(reading.hour()), u32::from(reading.minute()), 0)
                .context("Invalid clock reading")?;
        let naive = Local::now().date_naive().and_time(time);
        let instant = Local
            .from_local_datetime(&naive)
            .earliest()
            .with_context(|| format!("{reading} {} does not exist today", reading.meridiem()))?;
        Ok(Self::new(instant))
    }
}

impl TimeSource for FixedTimeSource {
    fn now(&self) -> DateTime<Local> {
        self.instant
    }

    fn is_frozen(&self) -> bool {
        true
    }
}

/// Initialize the global time source (call once at startup)
pub fn init_time_source(source: Arc<dyn TimeSource>) {
    TIME_SOURCE.set(source).ok();
}

/// Check if the time source has been initialized
pub fn is_initialized() -> bool {
    TIME_SOURCE.get().is_some()
}

/// Get the current time from the global time source
pub fn now() -> DateTime<Local> {
    TIME_SOURCE.get_or_init(|| Arc::new(RealTimeSource)).now()
}

/// Check if the clock is frozen
pub fn is_frozen() -> bool {
    TIME_SOURCE
        .get_or_init(|| Arc::new(RealTimeSource))
        .is_frozen()
}

/// Convert an instant into a reading, viewed in `timezone` when one is
/// configured and in the system zone otherwise.
pub fn reading_at(instant: DateTime<Local>, timezone: Option<Tz>) -> ClockReading {
    match timezone {
        Some(tz) => ClockReading::from_time(&instant.with_timezone(&tz)),
        None => ClockReading::from_time(&instant),
    }
}

/// Parse an IANA timezone name such as `Europe/London`.
pub fn parse_timezone(name: &str) -> Result<Tz> {
    name.parse::<Tz>()
        .map_err(|e| anyhow::anyhow!("Unknown timezone '{name}': {e}"))
}
