//! Startup configuration: parsing and handing off the session length.

use once_cell::sync::OnceCell;
use thiserror::Error;

/// Session length when none has been configured, in minutes.
pub const DEFAULT_MINUTES: u64 = 1;

/// Why a minutes entry could not be used.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MinutesError {
    /// The entry was not a whole number.
    #[error("{0:?} is not a whole number of minutes")]
    NotANumber(String),
    /// Zero minutes would mean a timer that is already over.
    #[error("the timer needs at least one minute")]
    Zero,
}

/// Parses a number of minutes from a line of user input.
///
/// Surrounding whitespace (including the newline left by `read_line`) is
/// ignored. Anything other than a positive integer is an error.
pub fn parse_minutes(input: &str) -> Result<u64, MinutesError> {
    let trimmed = input.trim();
    let minutes: u64 = trimmed
        .parse()
        .map_err(|_| MinutesError::NotANumber(trimmed.to_string()))?;
    if minutes == 0 {
        return Err(MinutesError::Zero);
    }
    Ok(minutes)
}

// The runtime constructs the application model itself, so the minutes read
// at startup travel through this cell rather than a constructor argument.
static CONFIGURED_MINUTES: OnceCell<u64> = OnceCell::new();

/// Records the session length before the program starts.
///
/// Only the first call takes effect.
pub fn set_configured_minutes(minutes: u64) {
    let _ = CONFIGURED_MINUTES.set(minutes);
}

/// The configured session length, or [`DEFAULT_MINUTES`] if none was set.
pub fn configured_minutes() -> u64 {
    CONFIGURED_MINUTES.get().copied().unwrap_or(DEFAULT_MINUTES)
}
