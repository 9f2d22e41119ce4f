//! Needle search over buffer contents.

use crate::encoding::Encoding;

use super::Buffer;

/// A search pattern for [`Buffer::index_of`] and friends.
///
/// Conversions exist from `&str` (UTF-8), `(&str, Encoding)`, `u8`,
/// `&[u8]` and `&Buffer`.
#[derive(Debug, Clone, Copy)]
pub enum Needle<'a> {
    /// Text converted under an encoding before matching.
    Str(&'a str, Encoding),
    /// A single byte.
    Byte(u8),
    /// A raw byte sequence, matched over the decimal-joined rendering.
    Bytes(&'a [u8]),
    /// Another buffer's contents, matched like [`Needle::Bytes`].
    Buffer(&'a Buffer),
}

impl<'a> From<&'a str> for Needle<'a> {
    fn from(value: &'a str) -> Self {
        Needle::Str(value, Encoding::Utf8)
    }
}

impl<'a> From<(&'a str, Encoding)> for Needle<'a> {
    fn from((text, encoding): (&'a str, Encoding)) -> Self {
        Needle::Str(text, encoding)
    }
}

impl From<u8> for Needle<'static> {
    fn from(value: u8) -> Self {
        Needle::Byte(value)
    }
}

impl<'a> From<&'a [u8]> for Needle<'a> {
    fn from(value: &'a [u8]) -> Self {
        Needle::Bytes(value)
    }
}

impl<'a, const N: usize> From<&'a [u8; N]> for Needle<'a> {
    fn from(value: &'a [u8; N]) -> Self {
        Needle::Bytes(value)
    }
}

impl<'a> From<&'a Buffer> for Needle<'a> {
    fn from(value: &'a Buffer) -> Self {
        Needle::Buffer(value)
    }
}

impl Buffer {
    /// Finds the first occurrence of a needle at or after `byte_offset`.
    ///
    /// String needles are converted under their encoding and matched
    /// byte-wise, so the result is a byte index; a string that fails
    /// to convert never matches. Single-byte needles also match
    /// byte-wise. Byte-sequence and buffer needles instead match over
    /// the decimal-joined rendering of both sides (`[1, 2, 13]`
    /// becomes `"1,2,13"`), and both `byte_offset` and the returned
    /// position are indices into that joined text, not byte offsets.
    /// An empty needle matches at `byte_offset` clamped to the end.
    ///
    /// # Example
    ///
    /// ```
    /// use wirebuf::Buffer;
    ///
    /// let buf = Buffer::from_slice(b"hello world");
    /// assert_eq!(buf.index_of("world", 0), Some(6));
    /// assert_eq!(buf.index_of(b'o', 5), Some(7));
    /// assert_eq!(buf.index_of("moon", 0), None);
    /// ```
    pub fn index_of<'n>(
        &self,
        needle: impl Into<Needle<'n>>,
        byte_offset: usize,
    ) -> Option<usize> {
        match needle.into() {
            Needle::Str(text, encoding) => {
                let pattern = encoding.encode(text).ok()?;
                find_forward(&self.to_vec(), &pattern, byte_offset)
            }
            Needle::Byte(byte) => find_forward(&self.to_vec(), &[byte], byte_offset),
            Needle::Bytes(bytes) => {
                let hay = join_decimal(self.iter());
                let pattern = join_decimal(bytes.iter().copied());
                find_forward(hay.as_bytes(), pattern.as_bytes(), byte_offset)
            }
            Needle::Buffer(other) => {
                let hay = join_decimal(self.iter());
                let pattern = join_decimal(other.iter());
                find_forward(hay.as_bytes(), pattern.as_bytes(), byte_offset)
            }
        }
    }

    /// Finds the last occurrence of a needle starting at or before
    /// `byte_offset`.
    ///
    /// The needle kinds behave as in [`index_of`](Buffer::index_of);
    /// pass the buffer length to search the whole buffer.
    pub fn last_index_of<'n>(
        &self,
        needle: impl Into<Needle<'n>>,
        byte_offset: usize,
    ) -> Option<usize> {
        match needle.into() {
            Needle::Str(text, encoding) => {
                let pattern = encoding.encode(text).ok()?;
                find_backward(&self.to_vec(), &pattern, byte_offset)
            }
            Needle::Byte(byte) => find_backward(&self.to_vec(), &[byte], byte_offset),
            Needle::Bytes(bytes) => {
                let hay = join_decimal(self.iter());
                let pattern = join_decimal(bytes.iter().copied());
                find_backward(hay.as_bytes(), pattern.as_bytes(), byte_offset)
            }
            Needle::Buffer(other) => {
                let hay = join_decimal(self.iter());
                let pattern = join_decimal(other.iter());
                find_backward(hay.as_bytes(), pattern.as_bytes(), byte_offset)
            }
        }
    }

    /// Returns `true` if the needle occurs at or after `byte_offset`.
    pub fn includes<'n>(&self, needle: impl Into<Needle<'n>>, byte_offset: usize) -> bool {
        self.index_of(needle, byte_offset).is_some()
    }
}

fn find_forward(hay: &[u8], needle: &[u8], from: usize) -> Option<usize> {
    if needle.is_empty() {
        return Some(from.min(hay.len()));
    }
    if needle.len() > hay.len() {
        return None;
    }
    let start = from.min(hay.len());
    (start..=hay.len() - needle.len()).find(|&i| &hay[i..i + needle.len()] == needle)
}

fn find_backward(hay: &[u8], needle: &[u8], until: usize) -> Option<usize> {
    if needle.is_empty() {
        return Some(until.min(hay.len()));
    }
    if needle.len() > hay.len() {
        return None;
    }
    let last_start = until.min(hay.len() - needle.len());
    (0..=last_start).rev().find(|&i| &hay[i..i + needle.len()] == needle)
}

fn join_decimal<I: IntoIterator<Item = u8>>(bytes: I) -> String {
    bytes
        .into_iter()
        .map(|byte| byte.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==== byte needles ====

    #[test]
    fn test_index_of_byte() {
        let buf = Buffer::from_slice(&[1, 2, 3, 2]);
        assert_eq!(buf.index_of(2u8, 0), Some(1));
        assert_eq!(buf.index_of(2u8, 2), Some(3));
        assert_eq!(buf.index_of(9u8, 0), None);
        assert_eq!(buf.index_of(2u8, 10), None);
    }

    #[test]
    fn test_last_index_of_byte() {
        let buf = Buffer::from_slice(&[1, 2, 3, 2]);
        assert_eq!(buf.last_index_of(2u8, 3), Some(3));
        assert_eq!(buf.last_index_of(2u8, 2), Some(1));
        assert_eq!(buf.last_index_of(2u8, 0), None);
    }

    // ==== string needles ====

    #[test]
    fn test_index_of_str() {
        let buf = Buffer::from_slice(b"hello world");
        assert_eq!(buf.index_of("world", 0), Some(6));
        assert_eq!(buf.index_of("o", 5), Some(7));
        assert_eq!(buf.index_of("moon", 0), None);
    }

    #[test]
    fn test_last_index_of_str() {
        let buf = Buffer::from_slice(b"hello");
        assert_eq!(buf.last_index_of("l", 5), Some(3));
        assert_eq!(buf.last_index_of("l", 2), Some(2));
        assert_eq!(buf.last_index_of("hello", 0), Some(0));
    }

    #[test]
    fn test_empty_string_needle_matches_at_offset() {
        let buf = Buffer::from_slice(b"hello");
        assert_eq!(buf.index_of("", 3), Some(3));
        assert_eq!(buf.index_of("", 99), Some(5));
        assert_eq!(buf.last_index_of("", 2), Some(2));
    }

    #[test]
    fn test_encoded_string_needles() {
        let buf = Buffer::from_slice(&[0xDE, 0xAD, 0xBE]);
        assert_eq!(buf.index_of(("adbe", Encoding::Hex), 0), Some(1));
        assert_eq!(buf.index_of(("zz", Encoding::Hex), 0), None);

        let wide = Buffer::from_slice(&[0x61, 0, 0x62, 0]);
        assert_eq!(wide.index_of(("b", Encoding::Utf16Le), 0), Some(2));
    }

    // ==== joined needles ====

    #[test]
    fn test_byte_sequence_positions_are_joined_text_indices() {
        let buf = Buffer::from_slice(&[10, 11, 12]);
        // "10,11,12" against "11,12" matches at text position 3.
        assert_eq!(buf.index_of(&[11u8, 12], 0), Some(3));
        assert_eq!(buf.index_of(&[10u8, 11], 0), Some(0));
        assert_eq!(buf.index_of(&[12u8, 10], 0), None);
    }

    #[test]
    fn test_buffer_needle() {
        let buf = Buffer::from_slice(&[1, 2, 3]);
        let needle = Buffer::from_slice(&[2, 3]);
        assert_eq!(buf.index_of(&needle, 0), Some(2));
    }

    #[test]
    fn test_last_index_of_byte_sequence() {
        let buf = Buffer::from_slice(&[5, 5, 5]);
        // Joined text is "5,5,5"; the final "5" sits at position 4.
        assert_eq!(buf.last_index_of(&[5u8][..], 4), Some(4));
        assert_eq!(buf.last_index_of(&[5u8][..], 1), Some(0));
    }

    #[test]
    fn test_empty_byte_sequence_needle() {
        let buf = Buffer::from_slice(&[1, 2]);
        assert_eq!(buf.index_of(Needle::Bytes(&[]), 2), Some(2));
    }

    // ==== includes ====

    #[test]
    fn test_includes() {
        let buf = Buffer::from_slice(b"abc");
        assert!(buf.includes("bc", 0));
        assert!(buf.includes(b'a', 0));
        assert!(!buf.includes("bc", 2));
        assert!(!buf.includes("xyz", 0));
    }
}
