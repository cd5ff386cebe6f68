//! Greeting and day/night mode resolution.
//!
//! Both decisions are pure functions of a [`ClockReading`]. Windows are
//! half-open (`[start, end)`) on minutes since midnight, and a window whose
//! start is later than its end wraps across midnight.

use std::fmt;

use super::ClockReading;
use crate::common::constants::{AFTERNOON_START, DAY_START, EVENING_START, MORNING_START};

/// Time-of-day greeting shown above the clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Greeting {
    Morning,
    Afternoon,
    Evening,
}

impl Greeting {
    /// The phrase displayed for this greeting.
    pub fn display_text(&self) -> &'static str {
        match self {
            Greeting::Morning => "Good morning, it's currently",
            Greeting::Afternoon => "Good afternoon, it's currently",
            Greeting::Evening => "Good evening, it's currently",
        }
    }
}

impl fmt::Display for Greeting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_text())
    }
}

/// Visual theme mode derived from the time of day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    Day,
    Night,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Day => "day",
            Mode::Night => "night",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Mode::Day => "☀",
            Mode::Night => "☾",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether `minutes` lies in `[start, end)`, wrapping across midnight when
/// `start > end`. An empty window (`start == end`) contains nothing.
fn in_window(start: u16, end: u16, minutes: u16) -> bool {
    if start <= end {
        start <= minutes && minutes < end
    } else {
        minutes >= start || minutes < end
    }
}

/// Select the greeting for a reading.
///
/// Morning is `[05:00, 12:00)`, afternoon `[12:00, 18:00)`, and evening
/// covers the rest of the day, `[18:00, 05:00)` across midnight.
pub fn resolve_greeting(reading: ClockReading) -> Greeting {
    let minutes = reading.minutes_since_midnight();

    if in_window(MORNING_START, AFTERNOON_START, minutes) {
        Greeting::Morning
    } else if in_window(AFTERNOON_START, EVENING_START, minutes) {
        Greeting::Afternoon
    } else {
        Greeting::Evening
    }
}

/// Select the visual mode for a reading: night from 18:00 until 05:00.
pub fn resolve_mode(reading: ClockReading) -> Mode {
    let minutes = reading.minutes_since_midnight();

    if in_window(EVENING_START, DAY_START, minutes) {
        Mode::Night
    } else {
        Mode::Day
    }
}
