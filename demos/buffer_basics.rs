//! Basic buffer allocation, numeric codec and view example.
//!
//! Run with:
//!     cargo run --example buffer_basics

use wirebuf::{Buffer, Encoding, concat};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Build a small wire frame: magic, version, length, payload
    let mut frame = Buffer::alloc(16)?;
    let mut offset = 0;
    offset = frame.write_u32_be(0xCAFE_BABE, offset)?;
    offset = frame.write_u16_be(2, offset)?;
    offset = frame.write_u16_be(5, offset)?;
    frame.write("hello", offset, Encoding::Utf8)?;

    println!("frame:   {:?}", frame);
    println!("magic:   {:#010x}", frame.read_u32_be(0)?);
    println!("version: {}", frame.read_u16_be(4)?);

    // Views share storage with the frame
    let length = frame.read_u16_be(6)? as usize;
    let payload = frame.subarray(8..8 + length);
    println!("payload: {}", payload.to_text(Encoding::Utf8));

    // Text encodings round trip the raw bytes
    let hex = frame.to_text(Encoding::Hex);
    println!("hex:     {}", hex);
    let parsed = Buffer::from_string(&hex, Encoding::Hex)?;
    println!("round trip matches: {}", parsed == frame);

    // Searching
    println!("payload starts at: {:?}", frame.index_of("hello", 0));

    // Concatenation
    let trailer = Buffer::from_slice(b"\r\n");
    let message = concat(&[frame, trailer], None)?;
    println!("message is {} bytes", message.len());

    Ok(())
}
