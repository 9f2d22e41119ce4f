//! wirebuf
//!
//! Fixed-size binary buffers and blobs for Rust.
//!
//! `wirebuf` owns a fixed byte allocation and gives it scripting-style
//! ergonomics. It is designed as a small, composable primitive for:
//!
//! - wire protocol framing
//! - file format codecs
//! - byte-level test fixtures
//! - text transcoding between `utf-8`, `utf-16le`, `latin1`, `ascii`,
//!   `base64`, `base64url` and `hex`
//!
//! The crate intentionally:
//! - does NOT grow buffers after allocation
//! - does NOT share storage across threads
//! - does NOT perform I/O
//! - does NOT persist anything
//!
//! It only does one thing: **own bytes → read and write them**
//!
//! # Buffers
//!
//! ```
//! use wirebuf::{Buffer, Encoding};
//!
//! fn main() -> Result<(), wirebuf::BufferError> {
//!     let mut buf = Buffer::alloc(8)?;
//!     buf.write_u32_be(0xDEAD_BEEF, 0)?;
//!     buf.write_u32_le(0xDEAD_BEEF, 4)?;
//!
//!     assert_eq!(buf.read_u16_be(0)?, 0xDEAD);
//!     assert_eq!(format!("{buf:?}"), "<Buffer de ad be ef ef be ad de>");
//!
//!     let greeting = Buffer::from_string("hello", Encoding::Utf8)?;
//!     assert_eq!(greeting.to_text(Encoding::Hex), "68656c6c6f");
//!     Ok(())
//! }
//! ```
//!
//! # Blobs
//!
//! ```ignore
//! use wirebuf::{Blob, BlobPart};
//!
//! async fn demo() {
//!     let blob = Blob::new(&[BlobPart::Text("payload")]);
//!     let bytes = blob.array_buffer().await;
//!     assert_eq!(bytes.len(), blob.size());
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod blob;
mod buffer;
mod encoding;
mod error;
mod pool;

//
// Public surface
//

pub use blob::{ArrayBufferFuture, Blob, BlobOptions, BlobPart, LineEndings, TextFuture};
pub use buffer::{
    Buffer, FillValue, Iter, MAX_LENGTH, Needle, compare, concat, is_buffer, transcode,
};
pub use encoding::{Encoding, byte_length, is_encoding};
pub use error::{
    BufferError, CODE_RANGE_ERROR, CODE_READ_ONLY_ERROR, CODE_SIZE_ERROR, CODE_TYPE_ERROR,
};
pub use pool::{Allocation, DEFAULT_POOL_SIZE, PoolAllocator};
