// src/common/response/error.rs

use core::fmt;

/// Why a reply line could not be decoded.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ResponseParseError {
    /// Reply is shorter than the smallest well-formed line for its tag.
    TooShort,
    /// Reply does not end with `\r`.
    MissingTerminator,
    /// Reply does not start with the expected `TAG=`.
    UnexpectedTag,
    /// A numeric field was empty, not decimal, or out of `i32` range.
    NumericError,
    /// The number parsed but does not fit the decoded type (e.g. flags above 255).
    OutOfRange,
    /// Reply text is not valid UTF-8.
    InvalidUtf8,
}

// --- Error Conversions ---

impl From<core::str::Utf8Error> for ResponseParseError {
    fn from(_: core::str::Utf8Error) -> Self { ResponseParseError::InvalidUtf8 }
}

impl From<core::num::ParseIntError> for ResponseParseError {
    fn from(_: core::num::ParseIntError) -> Self { ResponseParseError::NumericError }
}

impl From<core::num::TryFromIntError> for ResponseParseError {
    fn from(_: core::num::TryFromIntError) -> Self { ResponseParseError::OutOfRange }
}

impl fmt::Display for ResponseParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use ResponseParseError::*;
        match self {
            TooShort => write!(f, "response too short"),
            MissingTerminator => write!(f, "response not terminated by CR"),
            UnexpectedTag => write!(f, "unexpected response tag"),
            NumericError => write!(f, "malformed numeric field"),
            OutOfRange => write!(f, "value out of range"),
            InvalidUtf8 => write!(f, "response is not valid UTF-8"),
        }
    }
}

// If std feature is enabled, implement the Error trait
#[cfg(feature = "std")]
impl std::error::Error for ResponseParseError {}
