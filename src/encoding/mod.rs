//! Text encodings for buffer conversion.
//!
//! - [`Encoding`] - Supported encodings and their conversion rules
//! - [`byte_length`] - Encoded size of a string without converting it
//! - [`is_encoding`] - Check whether a name resolves to an encoding
//!
//! Encoding names are matched case-insensitively and the common aliases
//! resolve to their canonical form (`ucs2`, `ucs-2` and `utf-16le` mean
//! `utf16le`; `utf-8` means `utf8`; `binary` means `latin1`).
//!
//! # Example
//!
//! ```
//! use wirebuf::Encoding;
//!
//! let enc = Encoding::parse("UCS-2")?;
//! assert_eq!(enc, Encoding::Utf16Le);
//! assert_eq!(enc.byte_length("ab"), 4);
//! # Ok::<(), wirebuf::BufferError>(())
//! ```

use std::fmt;

use crate::error::BufferError;

// Internal codecs. These are implementation details and not part of the
// public API.
mod base64;
mod hex;

/// A text encoding understood by buffer conversion routines.
///
/// [`byte_length`] measures a string without converting it and
/// [`decode`] turns raw bytes back into text. The reverse direction,
/// string to bytes, runs inside the buffer constructors and write
/// methods rather than standing alone.
///
/// [`byte_length`]: Encoding::byte_length
/// [`decode`]: Encoding::decode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Encoding {
    /// UTF-8.
    Utf8,
    /// UTF-16 little-endian code units.
    Utf16Le,
    /// One byte per UTF-16 code unit, masked to the low 7 bits.
    Ascii,
    /// One byte per UTF-16 code unit, masked to the low 8 bits.
    Latin1,
    /// Base64, standard alphabet with padding.
    Base64,
    /// Base64, URL-safe alphabet without padding.
    Base64Url,
    /// Lowercase hex digit pairs.
    Hex,
}

impl Encoding {
    /// Resolves an encoding name, case-insensitively and through the
    /// usual aliases.
    ///
    /// # Errors
    ///
    /// Returns a type error (code 401) when the name is not a known
    /// encoding.
    ///
    /// # Example
    ///
    /// ```
    /// use wirebuf::Encoding;
    ///
    /// assert_eq!(Encoding::parse("utf-8")?, Encoding::Utf8);
    /// assert_eq!(Encoding::parse("binary")?, Encoding::Latin1);
    /// assert!(Encoding::parse("utf7").is_err());
    /// # Ok::<(), wirebuf::BufferError>(())
    /// ```
    pub fn parse(name: &str) -> Result<Encoding, BufferError> {
        match name.to_ascii_lowercase().as_str() {
            "utf8" | "utf-8" => Ok(Encoding::Utf8),
            "ucs2" | "ucs-2" | "utf16le" | "utf-16le" => Ok(Encoding::Utf16Le),
            "ascii" => Ok(Encoding::Ascii),
            "latin1" | "binary" => Ok(Encoding::Latin1),
            "base64" => Ok(Encoding::Base64),
            "base64url" => Ok(Encoding::Base64Url),
            "hex" => Ok(Encoding::Hex),
            _ => Err(BufferError::UnknownEncoding {
                received: name.to_string(),
            }),
        }
    }

    /// Returns the canonical lowercase name.
    pub fn name(&self) -> &'static str {
        match self {
            Encoding::Utf8 => "utf8",
            Encoding::Utf16Le => "utf16le",
            Encoding::Ascii => "ascii",
            Encoding::Latin1 => "latin1",
            Encoding::Base64 => "base64",
            Encoding::Base64Url => "base64url",
            Encoding::Hex => "hex",
        }
    }

    /// Returns how many bytes encoding `text` would produce, without
    /// converting it.
    ///
    /// Sizes for `ascii`, `latin1` and `utf16le` count UTF-16 code
    /// units, so characters outside the basic plane count twice. Base64
    /// sizes subtract trailing padding before applying the 3/4 ratio.
    ///
    /// # Example
    ///
    /// ```
    /// use wirebuf::Encoding;
    ///
    /// assert_eq!(Encoding::Utf8.byte_length("€"), 3);
    /// assert_eq!(Encoding::Utf16Le.byte_length("ab"), 4);
    /// assert_eq!(Encoding::Hex.byte_length("deadbeef"), 4);
    /// assert_eq!(Encoding::Base64.byte_length("QQ=="), 1);
    /// ```
    pub fn byte_length(&self, text: &str) -> usize {
        match self {
            Encoding::Utf8 => text.len(),
            Encoding::Utf16Le => text.encode_utf16().count() * 2,
            Encoding::Ascii | Encoding::Latin1 => text.encode_utf16().count(),
            Encoding::Hex => text.encode_utf16().count() >> 1,
            Encoding::Base64 | Encoding::Base64Url => {
                let mut units = text.encode_utf16().count();
                if text.ends_with("==") {
                    units -= 2;
                } else if text.ends_with('=') {
                    units -= 1;
                }
                (units * 3) >> 2
            }
        }
    }

    /// Converts `text` into bytes under this encoding.
    ///
    /// For `ascii` and `latin1` each UTF-16 code unit is masked down to
    /// one byte. For `hex` and the base64 family, `text` is the textual
    /// representation and the result is the raw payload.
    ///
    /// # Errors
    ///
    /// Only `hex` can fail: an invalid first digit pair rejects the
    /// whole input (code 401). Later invalid pairs truncate instead.
    pub(crate) fn encode(&self, text: &str) -> Result<Vec<u8>, BufferError> {
        match self {
            Encoding::Utf8 => Ok(text.as_bytes().to_vec()),
            Encoding::Utf16Le => Ok(text
                .encode_utf16()
                .flat_map(|unit| unit.to_le_bytes())
                .collect()),
            Encoding::Ascii => Ok(text.encode_utf16().map(|unit| (unit & 0x7F) as u8).collect()),
            Encoding::Latin1 => Ok(text.encode_utf16().map(|unit| (unit & 0xFF) as u8).collect()),
            Encoding::Base64 | Encoding::Base64Url => Ok(base64::decode(text)),
            Encoding::Hex => hex::decode(text),
        }
    }

    /// Converts raw bytes into text under this encoding.
    ///
    /// `utf8` and `utf16le` replace ill-formed sequences with U+FFFD;
    /// `utf16le` ignores an odd trailing byte. `ascii` masks each byte
    /// to 7 bits, `latin1` maps bytes to U+0000..=U+00FF.
    ///
    /// # Example
    ///
    /// ```
    /// use wirebuf::Encoding;
    ///
    /// assert_eq!(Encoding::Hex.decode(&[0xDE, 0xAD, 0xBE, 0xEF]), "deadbeef");
    /// assert_eq!(Encoding::Latin1.decode(&[0xE9]), "é");
    /// ```
    pub fn decode(&self, bytes: &[u8]) -> String {
        match self {
            Encoding::Utf8 => String::from_utf8_lossy(bytes).into_owned(),
            Encoding::Utf16Le => {
                let units: Vec<u16> = bytes
                    .chunks_exact(2)
                    .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
                    .collect();
                String::from_utf16_lossy(&units)
            }
            Encoding::Ascii => bytes.iter().map(|&b| char::from(b & 0x7F)).collect(),
            Encoding::Latin1 => bytes.iter().map(|&b| char::from(b)).collect(),
            Encoding::Base64 => base64::encode(bytes, false),
            Encoding::Base64Url => base64::encode(bytes, true),
            Encoding::Hex => hex::encode(bytes),
        }
    }
}

impl Default for Encoding {
    fn default() -> Self {
        Encoding::Utf8
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returns whether `name` resolves to a supported encoding.
///
/// # Example
///
/// ```
/// use wirebuf::is_encoding;
///
/// assert!(is_encoding("UTF-8"));
/// assert!(is_encoding("ucs2"));
/// assert!(!is_encoding("utf7"));
/// assert!(!is_encoding(""));
/// ```
pub fn is_encoding(name: &str) -> bool {
    Encoding::parse(name).is_ok()
}

/// Returns the encoded byte length of `text` under the named encoding.
///
/// An empty string measures 0 under every encoding. A name that does
/// not resolve to an encoding falls back to the UTF-8 length instead of
/// failing.
///
/// # Example
///
/// ```
/// use wirebuf::byte_length;
///
/// assert_eq!(byte_length("hello", "utf8"), 5);
/// assert_eq!(byte_length("hello", "utf16le"), 10);
/// assert_eq!(byte_length("hello", "no-such-encoding"), 5);
/// ```
pub fn byte_length(text: &str, encoding: &str) -> usize {
    if text.is_empty() {
        return 0;
    }
    match Encoding::parse(encoding) {
        Ok(enc) => enc.byte_length(text),
        Err(_) => Encoding::Utf8.byte_length(text),
    }
}
