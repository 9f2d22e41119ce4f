//! Error types for wirebuf.
//!
//! Every failure carries a stable numeric code alongside the message, so
//! callers can branch on [`BufferError::code`] without parsing text:
//!
//! - `401` - argument type errors (including unknown encodings)
//! - `10200001` - argument value out of range
//! - `10200009` - buffer length not a multiple of the required unit
//! - `10200013` - attempted write to a read-only property

use std::fmt;

/// Code for argument type errors.
pub const CODE_TYPE_ERROR: u32 = 401;
/// Code for out-of-range argument values.
pub const CODE_RANGE_ERROR: u32 = 10_200_001;
/// Code for length-multiple violations (`swap16`/`swap32`/`swap64`).
pub const CODE_SIZE_ERROR: u32 = 10_200_009;
/// Code for writes to read-only properties.
pub const CODE_READ_ONLY_ERROR: u32 = 10_200_013;

/// Errors that can occur during buffer, codec, and blob operations.
///
/// Message forms are stable and tested; the range variants carry their
/// bounds as `i128` so a single shape covers both `u64` and `i64` limits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BufferError {
    /// An argument had the wrong type or shape.
    Type {
        /// Name of the offending argument.
        argument: &'static str,
        /// Human-readable list of accepted types, e.g. `"transparent or native"`.
        expected: &'static str,
        /// What was actually received.
        received: String,
    },

    /// An encoding name did not match any supported encoding.
    UnknownEncoding {
        /// The rejected encoding name.
        received: String,
    },

    /// An argument value fell outside a closed range.
    Range {
        /// Name of the offending argument.
        argument: &'static str,
        /// Inclusive lower bound.
        min: i128,
        /// Inclusive upper bound.
        max: i128,
        /// The rejected value.
        received: i128,
    },

    /// An argument value fell below a lower bound with no upper bound.
    RangeLeft {
        /// Name of the offending argument.
        argument: &'static str,
        /// Inclusive lower bound.
        min: i128,
        /// The rejected value.
        received: i128,
    },

    /// A hex string began with an invalid digit pair.
    InvalidHex {
        /// The rejected input.
        received: String,
    },

    /// Buffer length is not a multiple of the unit required by a swap.
    SizeMultiple {
        /// Required unit width in bits (16, 32, or 64).
        bits: u8,
    },

    /// Attempted to assign a property that only has a getter.
    ReadOnly {
        /// Name of the read-only property.
        property: &'static str,
    },
}

impl BufferError {
    /// Returns the stable numeric code for this error.
    ///
    /// # Example
    ///
    /// ```
    /// use wirebuf::BufferError;
    ///
    /// let err = BufferError::SizeMultiple { bits: 16 };
    /// assert_eq!(err.code(), 10200009);
    /// ```
    pub fn code(&self) -> u32 {
        match self {
            BufferError::Type { .. } => CODE_TYPE_ERROR,
            BufferError::UnknownEncoding { .. } => CODE_TYPE_ERROR,
            BufferError::InvalidHex { .. } => CODE_TYPE_ERROR,
            BufferError::Range { .. } => CODE_RANGE_ERROR,
            BufferError::RangeLeft { .. } => CODE_RANGE_ERROR,
            BufferError::SizeMultiple { .. } => CODE_SIZE_ERROR,
            BufferError::ReadOnly { .. } => CODE_READ_ONLY_ERROR,
        }
    }

    pub(crate) fn range(argument: &'static str, min: i128, max: i128, received: i128) -> Self {
        BufferError::Range {
            argument,
            min,
            max,
            received,
        }
    }
}

impl fmt::Display for BufferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BufferError::Type {
                argument,
                expected,
                received,
            } => {
                write!(
                    f,
                    "The type of \"{}\" must be {}. Received value is: {}",
                    argument, expected, received
                )
            }
            BufferError::UnknownEncoding { received } => {
                write!(
                    f,
                    "The type of \"encoding\" must be BufferEncoding. the encoding {} is unknown",
                    received
                )
            }
            BufferError::Range {
                argument,
                min,
                max,
                received,
            } => {
                write!(
                    f,
                    "The value of \"{}\" is out of range. It must be >= {} and <= {}. Received value is: {}",
                    argument, min, max, received
                )
            }
            BufferError::RangeLeft {
                argument,
                min,
                received,
            } => {
                write!(
                    f,
                    "The value of \"{}\" is out of range. It must be >= {}. Received value is: {}",
                    argument, min, received
                )
            }
            BufferError::InvalidHex { received } => {
                write!(f, "The argument 'value' is invalid. Received \"{}\"", received)
            }
            BufferError::SizeMultiple { bits } => {
                write!(f, "Buffer size must be a multiple of {}-bits", bits)
            }
            BufferError::ReadOnly { property } => {
                write!(
                    f,
                    "Cannot set property {} of Buffer which has only a getter",
                    property
                )
            }
        }
    }
}

impl std::error::Error for BufferError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes() {
        let ty = BufferError::Type {
            argument: "options.endings",
            expected: "transparent or native",
            received: "crlf".to_string(),
        };
        assert_eq!(ty.code(), 401);

        let enc = BufferError::UnknownEncoding {
            received: "utf7".to_string(),
        };
        assert_eq!(enc.code(), 401);

        let range = BufferError::range("offset", 0, 3, 9);
        assert_eq!(range.code(), 10200001);

        assert_eq!(BufferError::SizeMultiple { bits: 64 }.code(), 10200009);
        assert_eq!(BufferError::ReadOnly { property: "length" }.code(), 10200013);
    }

    #[test]
    fn test_range_message() {
        let err = BufferError::range("offset", 0, 3, 9);
        assert_eq!(
            err.to_string(),
            "The value of \"offset\" is out of range. It must be >= 0 and <= 3. Received value is: 9"
        );
    }

    #[test]
    fn test_range_left_message() {
        let err = BufferError::RangeLeft {
            argument: "totalLength",
            min: 0,
            received: -1,
        };
        assert_eq!(
            err.to_string(),
            "The value of \"totalLength\" is out of range. It must be >= 0. Received value is: -1"
        );
    }

    #[test]
    fn test_unknown_encoding_message() {
        let err = BufferError::UnknownEncoding {
            received: "utf7".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "The type of \"encoding\" must be BufferEncoding. the encoding utf7 is unknown"
        );
    }

    #[test]
    fn test_size_multiple_message() {
        let err = BufferError::SizeMultiple { bits: 16 };
        assert_eq!(err.to_string(), "Buffer size must be a multiple of 16-bits");
    }

    #[test]
    fn test_read_only_message() {
        let err = BufferError::ReadOnly { property: "length" };
        assert_eq!(
            err.to_string(),
            "Cannot set property length of Buffer which has only a getter"
        );
    }

    #[test]
    fn test_invalid_hex_message() {
        let err = BufferError::InvalidHex {
            received: "zz".to_string(),
        };
        assert_eq!(err.to_string(), "The argument 'value' is invalid. Received \"zz\"");
    }
}
