//! Hex conversion between raw bytes and text.

use crate::error::BufferError;

const HEX_DIGITS: &[u8; 16] = b"0123456789abcdef";

/// Encodes `bytes` as lowercase hex pairs.
pub(crate) fn encode(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 2);
    for byte in bytes {
        out.push(HEX_DIGITS[(byte >> 4) as usize] as char);
        out.push(HEX_DIGITS[(byte & 0x0F) as usize] as char);
    }
    out
}

/// Decodes hex text into raw bytes, one digit pair per byte.
///
/// The first pair must be valid or the whole input is rejected; a bad
/// pair anywhere later silently ends the decode, keeping the bytes
/// parsed so far. An odd trailing digit counts as a bad pair.
pub(crate) fn decode(text: &str) -> Result<Vec<u8>, BufferError> {
    let digits: Vec<char> = text.chars().collect();
    let mut out = Vec::with_capacity(digits.len() / 2);

    let mut index = 0;
    while index * 2 < digits.len() {
        let pair = parse_pair(&digits, index * 2);
        match pair {
            Some(byte) => out.push(byte),
            None if index == 0 => {
                return Err(BufferError::InvalidHex {
                    received: text.to_string(),
                });
            }
            None => break,
        }
        index += 1;
    }

    Ok(out)
}

fn parse_pair(digits: &[char], at: usize) -> Option<u8> {
    let high = digits.get(at)?.to_digit(16)?;
    let low = digits.get(at + 1)?.to_digit(16)?;
    Some((high << 4 | low) as u8)
}
