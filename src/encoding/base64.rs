//! Base64 conversion between raw bytes and text.
//!
//! Encoding follows the standard alphabet with `=` padding, or the
//! URL-safe alphabet without padding. Decoding is lenient: both
//! alphabets are accepted in one pass and every other character
//! (padding included) is skipped.

const STD_ALPHABET: &[u8; 64] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";
const URL_ALPHABET: &[u8; 64] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-_";

/// Encodes `bytes` as base64 text.
///
/// `url` selects the URL-safe alphabet and drops padding.
pub(crate) fn encode(bytes: &[u8], url: bool) -> String {
    let alphabet = if url { URL_ALPHABET } else { STD_ALPHABET };
    let mut out = String::with_capacity(bytes.len().div_ceil(3) * 4);

    let mut chunks = bytes.chunks_exact(3);
    for chunk in &mut chunks {
        let group = (u32::from(chunk[0]) << 16) | (u32::from(chunk[1]) << 8) | u32::from(chunk[2]);
        out.push(alphabet[(group >> 18) as usize & 0x3F] as char);
        out.push(alphabet[(group >> 12) as usize & 0x3F] as char);
        out.push(alphabet[(group >> 6) as usize & 0x3F] as char);
        out.push(alphabet[group as usize & 0x3F] as char);
    }

    match chunks.remainder() {
        [a] => {
            let group = u32::from(*a) << 16;
            out.push(alphabet[(group >> 18) as usize & 0x3F] as char);
            out.push(alphabet[(group >> 12) as usize & 0x3F] as char);
            if !url {
                out.push_str("==");
            }
        }
        [a, b] => {
            let group = (u32::from(*a) << 16) | (u32::from(*b) << 8);
            out.push(alphabet[(group >> 18) as usize & 0x3F] as char);
            out.push(alphabet[(group >> 12) as usize & 0x3F] as char);
            out.push(alphabet[(group >> 6) as usize & 0x3F] as char);
            if !url {
                out.push('=');
            }
        }
        _ => {}
    }

    out
}

/// Decodes base64 text into raw bytes.
///
/// Characters outside both alphabets never fail the decode; they are
/// skipped, and a trailing partial group contributes its complete
/// high-order bytes only.
pub(crate) fn decode(text: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(text.len() / 4 * 3 + 2);
    let mut acc: u32 = 0;
    let mut bits: u32 = 0;

    for byte in text.bytes() {
        let Some(sextet) = sextet_value(byte) else {
            continue;
        };
        acc = (acc << 6) | sextet;
        bits += 6;
        if bits >= 8 {
            bits -= 8;
            out.push((acc >> bits) as u8);
        }
    }

    out
}

fn sextet_value(byte: u8) -> Option<u32> {
    match byte {
        b'A'..=b'Z' => Some(u32::from(byte - b'A')),
        b'a'..=b'z' => Some(u32::from(byte - b'a') + 26),
        b'0'..=b'9' => Some(u32::from(byte - b'0') + 52),
        b'+' | b'-' => Some(62),
        b'/' | b'_' => Some(63),
        _ => None,
    }
}
