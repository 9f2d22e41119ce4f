//! Immutable byte blobs assembled from heterogeneous parts.
//!
//! A [`Blob`] is built once from [`BlobPart`] sources, remembers its
//! total size and content type, and hands out its bytes through the
//! asynchronous [`Blob::array_buffer`] and [`Blob::text`] futures.

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::str::FromStr;
use std::task::{Context, Poll};

use bytes::Bytes;
use futures_core::future::FusedFuture;

use crate::buffer::Buffer;
use crate::encoding::Encoding;
use crate::error::BufferError;

/// One source fed to [`Blob::new`].
///
/// Text and raw byte sources contribute their bytes directly. The
/// multi-byte numeric sources contribute the UTF-8 text of their
/// elements' decimal renderings concatenated without separators, so
/// `&[258u16, 3]` contributes `b"2583"` rather than four raw bytes.
#[derive(Debug, Clone, Copy)]
pub enum BlobPart<'a> {
    /// UTF-8 text.
    Text(&'a str),
    /// Raw bytes.
    Bytes(&'a [u8]),
    /// A buffer's contents, copied as raw bytes.
    Buffer(&'a Buffer),
    /// Another blob's contents, copied as raw bytes.
    Blob(&'a Blob),
    /// 16-bit values rendered as decimal text.
    Uint16(&'a [u16]),
    /// 32-bit values rendered as decimal text.
    Uint32(&'a [u32]),
    /// 64-bit floats rendered as decimal text.
    Float64(&'a [f64]),
}

impl<'a> From<&'a str> for BlobPart<'a> {
    fn from(value: &'a str) -> Self {
        BlobPart::Text(value)
    }
}

impl<'a> From<&'a [u8]> for BlobPart<'a> {
    fn from(value: &'a [u8]) -> Self {
        BlobPart::Bytes(value)
    }
}

impl<'a, const N: usize> From<&'a [u8; N]> for BlobPart<'a> {
    fn from(value: &'a [u8; N]) -> Self {
        BlobPart::Bytes(value)
    }
}

impl<'a> From<&'a Buffer> for BlobPart<'a> {
    fn from(value: &'a Buffer) -> Self {
        BlobPart::Buffer(value)
    }
}

impl<'a> From<&'a Blob> for BlobPart<'a> {
    fn from(value: &'a Blob) -> Self {
        BlobPart::Blob(value)
    }
}

impl<'a> From<&'a [u16]> for BlobPart<'a> {
    fn from(value: &'a [u16]) -> Self {
        BlobPart::Uint16(value)
    }
}

impl<'a> From<&'a [u32]> for BlobPart<'a> {
    fn from(value: &'a [u32]) -> Self {
        BlobPart::Uint32(value)
    }
}

impl<'a> From<&'a [f64]> for BlobPart<'a> {
    fn from(value: &'a [f64]) -> Self {
        BlobPart::Float64(value)
    }
}

/// Line-ending mode accepted by [`BlobOptions`].
///
/// The mode is validated when parsed but content is stored exactly as
/// given either way.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LineEndings {
    /// Keep line endings as they appear in the source text.
    #[default]
    Transparent,
    /// Accept platform line endings.
    Native,
}

impl FromStr for LineEndings {
    type Err = BufferError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "transparent" => Ok(LineEndings::Transparent),
            "native" => Ok(LineEndings::Native),
            _ => Err(BufferError::Type {
                argument: "options.endings",
                expected: "transparent or native",
                received: s.to_string(),
            }),
        }
    }
}

/// Options for [`Blob::with_options`].
#[derive(Debug, Clone, Default)]
pub struct BlobOptions {
    /// Content type associated with the blob, e.g. `"text/plain"`.
    pub kind: String,
    /// Line-ending mode.
    pub endings: LineEndings,
}

/// An immutable byte sequence with an associated content type.
///
/// Blobs are assembled once from their parts and never change, so any
/// number of readers may materialize the same blob concurrently.
///
/// # Example
///
/// ```
/// use wirebuf::{Blob, BlobPart};
///
/// # tokio_test::block_on(async {
/// let blob = Blob::new(&[BlobPart::Text("hi "), BlobPart::Bytes(&[0x21])]);
/// assert_eq!(blob.size(), 4);
/// assert_eq!(blob.text().await, "hi !");
/// # });
/// ```
#[derive(Debug, Clone)]
pub struct Blob {
    bytes: Bytes,
    mime_type: String,
}

impl Blob {
    /// Builds a blob from `parts` with an empty content type.
    pub fn new(parts: &[BlobPart<'_>]) -> Blob {
        Blob::with_options(parts, BlobOptions::default())
    }

    /// Builds a blob from `parts` with an explicit content type and
    /// line-ending mode.
    pub fn with_options(parts: &[BlobPart<'_>], options: BlobOptions) -> Blob {
        let mut bytes = Vec::new();
        for part in parts {
            bytes.extend_from_slice(&normalize(part));
        }
        Blob {
            bytes: Bytes::from(bytes),
            mime_type: options.kind,
        }
    }

    /// Total number of bytes held by the blob.
    pub fn size(&self) -> usize {
        self.bytes.len()
    }

    /// The content type given at construction, or `""`.
    pub fn kind(&self) -> &str {
        &self.mime_type
    }

    /// Returns a new blob viewing `[start, end)` of this blob's bytes.
    ///
    /// `kind` overrides the content type of the result even when the
    /// window is ignored. A missing `start` duplicates the blob; a
    /// missing `end` runs to the end of the data. Negative bounds
    /// count back from the end. A window with `start > end`, or with
    /// one strictly positive and the other strictly negative bound, is
    /// ignored and duplicates the blob; a window that normalizes to a
    /// reversed range yields an empty blob.
    pub fn slice(&self, start: Option<isize>, end: Option<isize>, kind: Option<&str>) -> Blob {
        let mime_type = kind.map_or_else(|| self.mime_type.clone(), str::to_owned);
        let Some(start) = start else {
            return Blob {
                bytes: self.bytes.clone(),
                mime_type,
            };
        };
        let Some(end) = end else {
            let from = normalize_bound(start, self.size());
            return Blob {
                bytes: self.bytes.slice(from..),
                mime_type,
            };
        };
        if start > end || (start > 0 && end < 0) || (start < 0 && end > 0) {
            return Blob {
                bytes: self.bytes.clone(),
                mime_type,
            };
        }
        let from = normalize_bound(start, self.size());
        let to = normalize_bound(end, self.size());
        if from > to {
            return Blob {
                bytes: Bytes::new(),
                mime_type,
            };
        }
        Blob {
            bytes: self.bytes.slice(from..to),
            mime_type,
        }
    }

    /// Materializes the blob's bytes.
    ///
    /// The returned future is ready on its first poll; awaiting it
    /// never blocks.
    pub fn array_buffer(&self) -> ArrayBufferFuture {
        ArrayBufferFuture {
            bytes: Some(self.bytes.clone()),
        }
    }

    /// Materializes the blob as UTF-8 text, replacing invalid
    /// sequences with U+FFFD.
    pub fn text(&self) -> TextFuture {
        TextFuture {
            text: Some(Encoding::Utf8.decode(&self.bytes)),
        }
    }
}

fn normalize(part: &BlobPart<'_>) -> Vec<u8> {
    match part {
        BlobPart::Text(text) => text.as_bytes().to_vec(),
        BlobPart::Bytes(bytes) => bytes.to_vec(),
        BlobPart::Buffer(buffer) => buffer.to_vec(),
        BlobPart::Blob(blob) => blob.bytes.to_vec(),
        BlobPart::Uint16(values) => decimal_text(values.iter()),
        BlobPart::Uint32(values) => decimal_text(values.iter()),
        BlobPart::Float64(values) => decimal_text(values.iter()),
    }
}

fn decimal_text<T: fmt::Display>(values: impl Iterator<Item = T>) -> Vec<u8> {
    values
        .map(|value| value.to_string())
        .collect::<String>()
        .into_bytes()
}

fn normalize_bound(value: isize, size: usize) -> usize {
    if value < 0 {
        size.saturating_sub(value.unsigned_abs())
    } else {
        (value as usize).min(size)
    }
}

/// Future returned by [`Blob::array_buffer`].
///
/// Ready on the first poll. After completion it reports itself
/// terminated through [`FusedFuture`] and further polls stay pending.
#[derive(Debug)]
#[must_use = "futures do nothing unless you `.await` or poll them"]
pub struct ArrayBufferFuture {
    bytes: Option<Bytes>,
}

impl Future for ArrayBufferFuture {
    type Output = Bytes;

    fn poll(mut self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<Bytes> {
        match self.bytes.take() {
            Some(bytes) => Poll::Ready(bytes),
            None => Poll::Pending,
        }
    }
}

impl FusedFuture for ArrayBufferFuture {
    fn is_terminated(&self) -> bool {
        self.bytes.is_none()
    }
}

/// Future returned by [`Blob::text`].
#[derive(Debug)]
#[must_use = "futures do nothing unless you `.await` or poll them"]
pub struct TextFuture {
    text: Option<String>,
}

impl Future for TextFuture {
    type Output = String;

    fn poll(mut self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<String> {
        match self.text.take() {
            Some(text) => Poll::Ready(text),
            None => Poll::Pending,
        }
    }
}

impl FusedFuture for TextFuture {
    fn is_terminated(&self) -> bool {
        self.text.is_none()
    }
}
