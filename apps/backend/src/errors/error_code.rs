//! Error codes for the simulation API.
//!
//! Add new codes here; never pass ad-hoc strings as error codes.
//!
//! All error codes are SCREAMING_SNAKE_CASE and map 1:1 to the strings
//! that appear in HTTP responses.

use core::fmt;

/// Centralized error codes for the simulation API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Request Validation
    /// Malformed request body or parameters
    BadRequest,
    /// General validation error
    ValidationError,

    // Resource Not Found
    /// Round not found
    RoundNotFound,
    /// General not found error
    NotFound,

    // Business Logic Conflicts
    /// Round already closed or concurrently resolved
    AlreadyClosed,
    /// Round number already in use
    RoundNumberTaken,
    /// Generic conflict (fallback for unmatched conflicts)
    Conflict,

    // Storage
    /// Reading from storage failed or timed out
    StorageReadError,
    /// Writing to storage failed or timed out
    StorageWriteError,

    // System Errors
    /// Anything not covered above, including panics
    UnexpectedError,
    /// Configuration error
    ConfigError,
}

impl ErrorCode {
    /// Returns the canonical SCREAMING_SNAKE_CASE string for this error code.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::BadRequest => "BAD_REQUEST",
            Self::ValidationError => "VALIDATION_ERROR",

            Self::RoundNotFound => "ROUND_NOT_FOUND",
            Self::NotFound => "NOT_FOUND",

            Self::AlreadyClosed => "ALREADY_CLOSED",
            Self::RoundNumberTaken => "ROUND_NUMBER_TAKEN",
            Self::Conflict => "CONFLICT",

            Self::StorageReadError => "STORAGE_READ_ERROR",
            Self::StorageWriteError => "STORAGE_WRITE_ERROR",

            Self::UnexpectedError => "UNEXPECTED_ERROR",
            Self::ConfigError => "CONFIG_ERROR",
        }
    }

    /// Every code, for uniqueness checks.
    pub const ALL: &'static [ErrorCode] = &[
        Self::BadRequest,
        Self::ValidationError,
        Self::RoundNotFound,
        Self::NotFound,
        Self::AlreadyClosed,
        Self::RoundNumberTaken,
        Self::Conflict,
        Self::StorageReadError,
        Self::StorageWriteError,
        Self::UnexpectedError,
        Self::ConfigError,
    ];
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
