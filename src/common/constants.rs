//! Application-wide constants: time-of-day boundaries, configuration defaults
//! and limits, and the user-facing quote error message.

// # Time-of-day boundaries (minutes since midnight)

/// Start of the morning greeting window (05:00).
pub const MORNING_START: u16 = 5 * 60;
/// Start of the afternoon greeting window (12:00).
pub const AFTERNOON_START: u16 = 12 * 60;
/// Start of the evening greeting window and of night mode (18:00).
pub const EVENING_START: u16 = 18 * 60;
/// End of night mode (05:00).
pub const DAY_START: u16 = MORNING_START;

// # Configuration defaults

pub const DEFAULT_QUOTE_URL: &str = "https://zenquotes.io/api/random";
pub const DEFAULT_REQUEST_TIMEOUT: u64 = 10; // seconds
pub const DEFAULT_LOCATION: &str = "Unknown location";

// # Configuration limits

pub const MINIMUM_REQUEST_TIMEOUT: u64 = 1;
pub const MAXIMUM_REQUEST_TIMEOUT: u64 = 60;

pub const CONFIG_DIR_NAME: &str = "clockface";
pub const CONFIG_FILE_NAME: &str = "clockface.toml";

// # Quotes

/// Fixed message shown in place of the quote whenever fetching fails.
pub const QUOTE_UNAVAILABLE_MESSAGE: &str = "Quote Unavailable. Check Your Internet Connection.";

/// Author shown when the service omits one.
pub const UNKNOWN_AUTHOR: &str = "Unknown";

/// Fetch workers allowed to run at once; further refreshes wait for a slot.
pub const MAX_CONCURRENT_FETCHES: usize = 2;

pub const USER_AGENT: &str = concat!("clockface/", env!("CARGO_PKG_VERSION"));

// # Presentation

pub const DAY_BACKGROUND_IMAGE: &str = "bg-image-daytime.jpg";
pub const NIGHT_BACKGROUND_IMAGE: &str = "bg-image-nighttime.jpg";

/// Opacity of the black overlay that darkens the background image.
pub const BACKGROUND_OVERLAY_ALPHA: f32 = 0.25;

// # Exit codes

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILURE: i32 = 1;
