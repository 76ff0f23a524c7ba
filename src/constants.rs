//! Application-wide constants.
//!
//! This module defines constants used throughout the application,
//! including the application name, grid defaults, and timing values.

use std::time::Duration;

/// The display name of the application (human-readable, with proper capitalization).
pub const APP_NAME: &str = "Seance Board";

/// The binary name of the application (used in command examples, lowercase).
pub const APP_BINARY_NAME: &str = "seance";

/// Number of letters on the board (fixed Latin alphabet A..Z).
pub const ALPHABET_LEN: usize = 26;

/// Default number of grid columns.
pub const DEFAULT_COLUMNS: u16 = 5;

/// Default delay between a completed key press and the board reshuffle.
///
/// Tuned so the pressed key's highlight is visible before the grid reorders.
pub const DEFAULT_RESHUFFLE_DELAY: Duration = Duration::from_millis(50);

/// Default request timeout for the remote translation call.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Environment variable checked for the translation API key.
pub const DEFAULT_API_KEY_ENV: &str = "SEANCE_API_KEY";

/// Environment variable that overrides the trace log location.
pub const TRACE_LOG_ENV: &str = "SEANCE_TRACE_LOG";
