//! Structured logging system with visual formatting.
//!
//! Output is drawn as a single vertical "pipe" running down the terminal with
//! messages hanging off it, which keeps startup, configuration and fetch events
//! readable next to each other.
//!
//! The logger supports runtime enable/disable so the full-screen clock can own
//! the terminal while it is being drawn.

use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};

static LOGGING_ENABLED: AtomicBool = AtomicBool::new(true);

/// Main logging interface providing structured output formatting.
///
/// ## Logging Conventions
///
/// - **`log_block_start!`**: begins a new conceptual block (startup phases,
///   mode changes, fetch outcomes). Prints an empty `┃` line, then `┣ message`.
/// - **`log_decorated!`**: a message inside the current block, `┣ message`.
/// - **`log_indented!`**: details belonging to the previous message,
///   `┃   message`.
/// - **`log_version!`** / **`log_end!`**: the header and the final `╹` marker.
/// - **`log_warning!`, `log_debug!`**: semantic messages with a colored
///   `[LEVEL]` prefix.
/// - **`log_error_exit!`**: terminates the pipe with `┗[ERROR]` before exiting.
pub struct Log;

impl Log {
    /// Enable or disable logging.
    pub fn set_enabled(enabled: bool) {
        LOGGING_ENABLED.store(enabled, Ordering::SeqCst);
    }

    /// Check if logging is currently enabled.
    pub fn is_enabled() -> bool {
        LOGGING_ENABLED.load(Ordering::SeqCst)
    }

    /// Timestamp prefix shown while the clock is frozen with `--at`.
    ///
    /// Real-time runs print no prefix; the time source is only consulted if it
    /// has already been installed so logging never initializes it implicitly.
    pub fn get_timestamp_prefix() -> String {
        if crate::time_source::is_initialized() && crate::time_source::is_frozen() {
            format!("[{}] ", crate::time_source::now().format("%H:%M"))
        } else {
            String::new()
        }
    }

    /// Write one formatted entry: `lead` is the box-drawing glyph sequence that
    /// precedes the message. Used by the macros below.
    pub fn emit(lead: &str, message: &str) {
        if !Self::is_enabled() {
            return;
        }
        let prefix = Self::get_timestamp_prefix();
        write_output(&format!("{prefix}{lead}{message}\n"));
    }

    /// Like [`Log::emit`], but preceded by an empty pipe line for spacing.
    pub fn emit_spaced(lead: &str, message: &str) {
        if !Self::is_enabled() {
            return;
        }
        let prefix = Self::get_timestamp_prefix();
        write_output(&format!("{prefix}┃\n{prefix}{lead}{message}\n"));
    }
}

// Public function that routes output (needed by macros)
pub fn write_output(text: &str) {
    let mut stdout = std::io::stdout().lock();
    let _ = stdout.write_all(text.as_bytes());
    let _ = stdout.flush();
}

// # Logging Macros

/// Log a decorated message, typically as part of an existing block.
#[macro_export]
macro_rules! log_decorated {
    ($fmt:literal $($arg:tt)*) => {
        $crate::common::logger::Log::emit("┣ ", &format!($fmt $($arg)*))
    };
    ($expr:expr) => {
        $crate::common::logger::Log::emit("┣ ", &format!("{}", $expr))
    };
}

/// Log an indented message for sub-items or details within a block.
#[macro_export]
macro_rules! log_indented {
    ($fmt:literal $($arg:tt)*) => {
        $crate::common::logger::Log::emit("┃   ", &format!($fmt $($arg)*))
    };
    ($expr:expr) => {
        $crate::common::logger::Log::emit("┃   ", &format!("{}", $expr))
    };
}

/// Log a block start message, initiating a new conceptual block of information.
#[macro_export]
macro_rules! log_block_start {
    ($fmt:literal $($arg:tt)*) => {
        $crate::common::logger::Log::emit_spaced("┣ ", &format!($fmt $($arg)*))
    };
    ($expr:expr) => {
        $crate::common::logger::Log::emit_spaced("┣ ", &format!("{}", $expr))
    };
}

/// Log the application version header.
#[macro_export]
macro_rules! log_version {
    () => {
        $crate::common::logger::Log::emit(
            "┏ ",
            &format!("clockface v{} ━━╸", env!("CARGO_PKG_VERSION")),
        )
    };
}

/// Log the final termination marker.
#[macro_export]
macro_rules! log_end {
    () => {
        $crate::common::logger::Log::emit("╹", "")
    };
}

/// Log a warning message with pipe prefix and yellow-colored text.
#[macro_export]
macro_rules! log_warning {
    ($fmt:literal $($arg:tt)*) => {
        $crate::common::logger::Log::emit("┣[\x1b[33mWARNING\x1b[0m] ", &format!($fmt $($arg)*))
    };
    ($expr:expr) => {
        $crate::common::logger::Log::emit("┣[\x1b[33mWARNING\x1b[0m] ", &format!("{}", $expr))
    };
}

/// Log an error message that terminates the pipe before exiting.
#[macro_export]
macro_rules! log_error_exit {
    ($fmt:literal $($arg:tt)*) => {
        $crate::common::logger::Log::emit_spaced("┗[\x1b[31mERROR\x1b[0m] ", &format!($fmt $($arg)*))
    };
    ($expr:expr) => {
        $crate::common::logger::Log::emit_spaced("┗[\x1b[31mERROR\x1b[0m] ", &format!("{}", $expr))
    };
}

/// Log a debug/operational message with pipe prefix and green-colored text.
#[macro_export]
macro_rules! log_debug {
    ($fmt:literal $($arg:tt)*) => {
        $crate::common::logger::Log::emit("┣[\x1b[32mDEBUG\x1b[0m] ", &format!($fmt $($arg)*))
    };
    ($expr:expr) => {
        $crate::common::logger::Log::emit("┣[\x1b[32mDEBUG\x1b[0m] ", &format!("{}", $expr))
    };
}
