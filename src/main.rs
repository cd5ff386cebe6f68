//! Main application entry point and high-level flow coordination.
//!
//! The flow is:
//! 1. Argument parsing and early exit for help/version
//! 2. Time source installation (real, or frozen with `--at`)
//! 3. Configuration loading and quote source construction
//! 4. Either a single plain frame (`--once`) or the full-screen clock loop
//!
//! In debug mode the clock is printed frame by frame between log lines instead
//! of taking over the terminal; signals still drive refresh and shutdown.

use anyhow::{Context, Result};
use std::io::Write;
use std::sync::Arc;

use clockface::app::App;
use clockface::args::{self, CliAction, ParsedArgs};
use clockface::common::constants::{EXIT_FAILURE, EXIT_SUCCESS};
use clockface::common::logger::Log;
use clockface::config::{self, Config};
use clockface::input::KeyReader;
use clockface::quote::HttpQuoteSource;
use clockface::screen::{PlainRenderer, TerminalRenderer};
use clockface::signals::setup_signal_handler;
use clockface::time_source::{self, FixedTimeSource, RealTimeSource, TimeSource};
use clockface::{
    clock::ClockReading, log_block_start, log_debug, log_end, log_error_exit, log_indented,
    log_version, log_warning,
};

fn main() {
    let parsed = ParsedArgs::parse(std::env::args());

    let code = match parsed.action {
        CliAction::ShowHelp => {
            args::display_help();
            EXIT_SUCCESS
        }
        CliAction::ShowVersion => {
            println!("clockface {}", env!("CARGO_PKG_VERSION"));
            EXIT_SUCCESS
        }
        CliAction::ShowHelpDueToError { message } => {
            log_version!();
            log_warning!("{message}");
            log_indented!("Run 'clockface --help' for usage");
            log_end!();
            EXIT_FAILURE
        }
        CliAction::Run {
            debug_enabled,
            config_dir,
            frozen_at,
            once,
        } => match run(debug_enabled, config_dir, frozen_at, once) {
            Ok(()) => EXIT_SUCCESS,
            Err(e) => {
                Log::set_enabled(true);
                log_error_exit!("{e:#}");
                EXIT_FAILURE
            }
        },
    };

    std::process::exit(code);
}

fn run(
    debug_enabled: bool,
    config_dir: Option<String>,
    frozen_at: Option<ClockReading>,
    once: bool,
) -> Result<()> {
    config::set_config_dir(config_dir)?;

    let clock: Arc<dyn TimeSource> = match frozen_at {
        Some(reading) => Arc::new(FixedTimeSource::today_at(reading)?),
        None => Arc::new(RealTimeSource),
    };
    time_source::init_time_source(clock.clone());

    log_version!();
    if debug_enabled {
        log_debug!("Debug mode enabled - logging fetch and timer activity");
    }
    if let Some(reading) = frozen_at {
        log_block_start!("Clock frozen at {} {}", reading, reading.meridiem());
    }

    let config = Config::load()?;
    config.log_config(Config::get_config_path().ok().as_deref());

    let source = HttpQuoteSource::new(config.quote_url(), config.request_timeout())
        .context("Failed to set up the quote service client")?;
    let mut app = App::new(config, clock, Arc::new(source), debug_enabled);

    if once {
        // Buffer the frame so every log line lands before the closing marker
        let mut renderer = PlainRenderer::new(Vec::new());
        log_block_start!("Rendering a single frame");
        app.render_once(&mut renderer)?;
        log_end!();

        let mut stdout = std::io::stdout().lock();
        stdout
            .write_all(&renderer.into_inner())
            .context("Failed to write the frame")?;
        stdout.flush()?;
        return Ok(());
    }

    let _signals = setup_signal_handler(app.event_sender(), debug_enabled)?;

    if debug_enabled {
        log_block_start!("Streaming frames (SIGUSR1 refreshes the quote, Ctrl+C quits)");
        let mut renderer = PlainRenderer::new(std::io::stdout());
        app.run(&mut renderer)?;
    } else {
        Log::set_enabled(false);
        let mut renderer = TerminalRenderer::enter()?;
        let mut keys = KeyReader::spawn(app.event_sender())?;
        let result = app.run(&mut renderer);
        keys.stop();
        drop(renderer);
        Log::set_enabled(true);
        result?;
    }

    log_block_start!("Goodbye");
    log_end!();
    Ok(())
}
