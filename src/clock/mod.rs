//! Point-in-time clock readings and the time-of-day decisions made from them.
//!
//! A [`ClockReading`] is the only input to the greeting and mode decisions in
//! [`resolver`]. Readings are captured once from the active time source and
//! never change afterwards; every decision normalizes them to minutes since
//! midnight so the 12:00 AM/PM ambiguity never enters a comparison.

pub mod resolver;

pub use resolver::{Greeting, Mode, resolve_greeting, resolve_mode};

use anyhow::{Result, bail};
use chrono::Timelike;
use std::fmt;

/// Minutes in a full day, used to keep normalized values in range.
pub const MINUTES_PER_DAY: u16 = 24 * 60;

/// Half of the day a reading falls in when shown on a 12-hour clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Meridiem {
    Am,
    Pm,
}

impl Meridiem {
    pub fn as_str(&self) -> &'static str {
        match self {
            Meridiem::Am => "AM",
            Meridiem::Pm => "PM",
        }
    }
}

impl fmt::Display for Meridiem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An immutable hour/minute reading of the clock.
///
/// Stored internally as a 24-hour value. Construct it from 24-hour parts with
/// [`ClockReading::new`], from 12-hour parts with [`ClockReading::from_12h`],
/// or from any chrono time value with [`ClockReading::from_time`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClockReading {
    hour: u8,
    minute: u8,
}

impl ClockReading {
    /// Create a reading from a 24-hour clock value.
    pub fn new(hour: u8, minute: u8) -> Result<Self> {
        if hour > 23 {
            bail!("hour must be between 0 and 23 (got {hour})");
        }
        if minute > 59 {
            bail!("minute must be between 0 and 59 (got {minute})");
        }
        Ok(Self { hour, minute })
    }

    /// Create a reading from a 12-hour clock value (`hour` in 1-12).
    ///
    /// 12:xx AM is just after midnight and 12:xx PM is just after noon.
    pub fn from_12h(hour: u8, minute: u8, meridiem: Meridiem) -> Result<Self> {
        if !(1..=12).contains(&hour) {
            bail!("12-hour clock hour must be between 1 and 12 (got {hour})");
        }
        let hour = match (meridiem, hour) {
            (Meridiem::Am, 12) => 0,
            (Meridiem::Am, h) => h,
            (Meridiem::Pm, 12) => 12,
            (Meridiem::Pm, h) => h + 12,
        };
        Self::new(hour, minute)
    }

    /// Capture the hour and minute of any chrono time value.
    pub fn from_time<T: Timelike>(time: &T) -> Self {
        // chrono guarantees hour < 24 and minute < 60
        Self {
            hour: time.hour() as u8,
            minute: time.minute() as u8,
        }
    }

    /// Rebuild a reading from a minutes-since-midnight value, wrapping past a day.
    pub fn from_minutes(minutes: u16) -> Self {
        let minutes = minutes % MINUTES_PER_DAY;
        Self {
            hour: (minutes / 60) as u8,
            minute: (minutes % 60) as u8,
        }
    }

    /// Parse `HH:MM` (24-hour) or `h:mm AM`/`h:mm PM` (12-hour).
    pub fn parse(input: &str) -> Result<Self> {
        let input = input.trim();
        let (clock, meridiem) = match input.rsplit_once(' ') {
            Some((clock, suffix)) => {
                let meridiem = match suffix.to_ascii_uppercase().as_str() {
                    "AM" => Meridiem::Am,
                    "PM" => Meridiem::Pm,
                    other => bail!("unrecognized meridiem '{other}' (expected AM or PM)"),
                };
                (clock.trim(), Some(meridiem))
            }
            None => (input, None),
        };

        let Some((hour, minute)) = clock.split_once(':') else {
            bail!("invalid time '{input}' (expected HH:MM or h:mm AM/PM)");
        };
        let hour: u8 = hour
            .parse()
            .map_err(|_| anyhow::anyhow!("invalid hour in '{input}'"))?;
        let minute: u8 = minute
            .parse()
            .map_err(|_| anyhow::anyhow!("invalid minute in '{input}'"))?;

        match meridiem {
            Some(meridiem) => Self::from_12h(hour, minute, meridiem),
            None => Self::new(hour, minute),
        }
    }

    /// Hour on the 24-hour clock (0-23).
    pub fn hour(&self) -> u8 {
        self.hour
    }

    pub fn minute(&self) -> u8 {
        self.minute
    }

    /// Hour on the 12-hour clock (1-12).
    pub fn hour_12(&self) -> u8 {
        match self.hour % 12 {
            0 => 12,
            h => h,
        }
    }

    pub fn meridiem(&self) -> Meridiem {
        if self.hour < 12 {
            Meridiem::Am
        } else {
            Meridiem::Pm
        }
    }

    /// Normalized comparison value used by every time-of-day decision.
    pub fn minutes_since_midnight(&self) -> u16 {
        u16::from(self.hour) * 60 + u16::from(self.minute)
    }
}

/// Formats as the clock face shows it: `h:mm` without the meridiem.
impl fmt::Display for ClockReading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{:02}", self.hour_12(), self.minute)
    }
}
