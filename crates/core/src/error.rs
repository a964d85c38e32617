//! Error types for value conversion
//!
//! Every fallible conversion returns [`Result`]. Errors are classified by
//! kind, not by message:
//!
//! | Kind | Raised for |
//! |------|------------|
//! | `InvalidParam` | wrong host type, out-of-range, missing field, bad tuple shape |
//! | `ClientInternal` | exhausted scratch pool, unexpected null, impossible state |
//! | `BinNameTooLong` | bin name over the limit (strict-types mode only) |
//! | `UnicodeEncodingFailure` | host text that cannot be transcoded to UTF-8 |
//!
//! All kinds are non-retriable. On failure the caller receives no output
//! value, and every intermediate allocated before the failure has already
//! been released.

use thiserror::Error;

/// Result type alias for conversion operations
pub type Result<T> = std::result::Result<T, Error>;

/// Status code for `ClientInternal`
pub const CODE_CLIENT_INTERNAL: i32 = -1;
/// Status code for `InvalidParam`
pub const CODE_INVALID_PARAM: i32 = -2;
/// Status code for `UnicodeEncodingFailure`
pub const CODE_UNICODE_ENCODING: i32 = -3;
/// Status code for `BinNameTooLong`
pub const CODE_BIN_NAME_TOO_LONG: i32 = 21;

/// Conversion errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Wrong host type, out-of-range value, missing field or malformed shape
    #[error("invalid parameter: {reason}")]
    InvalidParam {
        /// What was wrong with the input
        reason: String,
    },

    /// Allocation failure, unexpected null, or an impossible state
    #[error("client internal error: {reason}")]
    ClientInternal {
        /// What went wrong
        reason: String,
    },

    /// Bin name exceeds the store limit (strict-types mode only)
    #[error("bin name '{name}' is {len} characters, limit is {max}")]
    BinNameTooLong {
        /// The offending bin name
        name: String,
        /// Its length in bytes
        len: usize,
        /// The configured limit
        max: usize,
    },

    /// Host text could not be transcoded to UTF-8
    #[error("unicode encoding failure: {reason}")]
    UnicodeEncodingFailure {
        /// Why transcoding failed
        reason: String,
    },
}

/// Error kind, independent of the message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// See [`Error::InvalidParam`]
    InvalidParam,
    /// See [`Error::ClientInternal`]
    ClientInternal,
    /// See [`Error::BinNameTooLong`]
    BinNameTooLong,
    /// See [`Error::UnicodeEncodingFailure`]
    UnicodeEncodingFailure,
}

impl Error {
    /// Create an `InvalidParam` error
    pub fn invalid_param(reason: impl Into<String>) -> Self {
        Error::InvalidParam {
            reason: reason.into(),
        }
    }

    /// Create a `ClientInternal` error
    pub fn client(reason: impl Into<String>) -> Self {
        Error::ClientInternal {
            reason: reason.into(),
        }
    }

    /// Create a `UnicodeEncodingFailure` error
    pub fn unicode(reason: impl Into<String>) -> Self {
        Error::UnicodeEncodingFailure {
            reason: reason.into(),
        }
    }

    /// Get the error kind
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::InvalidParam { .. } => ErrorKind::InvalidParam,
            Error::ClientInternal { .. } => ErrorKind::ClientInternal,
            Error::BinNameTooLong { .. } => ErrorKind::BinNameTooLong,
            Error::UnicodeEncodingFailure { .. } => ErrorKind::UnicodeEncodingFailure,
        }
    }

    /// Get the status code reported to the host
    pub fn code(&self) -> i32 {
        match self.kind() {
            ErrorKind::ClientInternal => CODE_CLIENT_INTERNAL,
            ErrorKind::InvalidParam => CODE_INVALID_PARAM,
            ErrorKind::UnicodeEncodingFailure => CODE_UNICODE_ENCODING,
            ErrorKind::BinNameTooLong => CODE_BIN_NAME_TOO_LONG,
        }
    }

    /// Build a report for the host, marking whether the outcome is unknown
    pub fn report(&self, in_doubt: bool) -> ErrorReport {
        ErrorReport {
            code: self.code(),
            message: self.to_string(),
            in_doubt,
        }
    }
}

/// An error as surfaced to the host's exception machinery
///
/// `in_doubt` is separate from the kind: it records that the operation's
/// outcome on the server is unknown, which no conversion error implies
/// by itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorReport {
    /// Status code
    pub code: i32,
    /// Human-readable message
    pub message: String,
    /// Whether the operation's outcome is unknown
    pub in_doubt: bool,
}
