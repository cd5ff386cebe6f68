//! # Clockface Library
//!
//! Internal library for the clockface binary: a terminal clock screen with a
//! time-of-day greeting, day/night theming and a refreshable quote.
//!
//! ## Architecture
//!
//! - **Decisions**: `clock` maps a clock reading to a greeting and a mode
//! - **State owners**: `mode_context` (day/night, timer driven) and
//!   `quote::provider` (quote fetch lifecycle, latest request wins)
//! - **Event loop**: `app` owns the state and applies events from the timer,
//!   fetch workers, `input` and `signals`
//! - **Presentation**: `screen` builds and renders the screen model
//! - **Infrastructure**: `config`, `time_source`, `timer`, `observe`, `args`,
//!   and the logger in `common`

// Import macros from logger module for use in all submodules
#[macro_use]
pub mod common;

pub mod app;
pub mod args;
pub mod clock;
pub mod config;
pub mod input;
pub mod mode_context;
pub mod observe;
pub mod quote;
pub mod screen;
pub mod signals;
pub mod time_source;
pub mod timer;

pub use app::App;
pub use clock::{ClockReading, Greeting, Mode, resolve_greeting, resolve_mode};
