//! The Buffer type and its module-level helpers.
//!
//! - [`Buffer`] - Fixed-length byte sequence over shared storage
//! - [`FillValue`] - Patterns accepted by the fill operations
//! - [`concat`] / [`compare`] / [`transcode`] / [`is_buffer`] - Helpers
//!   operating on buffers as a whole

mod num;
mod search;

pub use search::Needle;

use std::any::Any;
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Bound, RangeBounds};

use bytes::Bytes;

use crate::encoding::Encoding;
use crate::error::BufferError;
use crate::pool::{Allocation, PoolAllocator, with_default_pool};

/// Largest representable buffer length (2^32 bytes).
pub const MAX_LENGTH: u64 = 1 << 32;

/// A pattern accepted by [`Buffer::fill`] and [`Buffer::fill_range`].
///
/// The pattern repeats cyclically until the fill window is full and is
/// truncated when the window is shorter than the pattern. Conversions
/// exist from `u8`, `&str` (UTF-8), `(&str, Encoding)`, `&[u8]` and
/// `&Buffer`.
#[derive(Debug, Clone, Copy)]
pub enum FillValue<'a> {
    /// A single byte.
    Byte(u8),
    /// Text converted to bytes under an encoding.
    Text(&'a str, Encoding),
    /// A raw byte pattern.
    Bytes(&'a [u8]),
    /// The contents of another buffer.
    Buffer(&'a Buffer),
}

impl From<u8> for FillValue<'static> {
    fn from(value: u8) -> Self {
        FillValue::Byte(value)
    }
}

impl<'a> From<&'a str> for FillValue<'a> {
    fn from(value: &'a str) -> Self {
        FillValue::Text(value, Encoding::Utf8)
    }
}

impl<'a> From<(&'a str, Encoding)> for FillValue<'a> {
    fn from((text, encoding): (&'a str, Encoding)) -> Self {
        FillValue::Text(text, encoding)
    }
}

impl<'a> From<&'a [u8]> for FillValue<'a> {
    fn from(value: &'a [u8]) -> Self {
        FillValue::Bytes(value)
    }
}

impl<'a, const N: usize> From<&'a [u8; N]> for FillValue<'a> {
    fn from(value: &'a [u8; N]) -> Self {
        FillValue::Bytes(value)
    }
}

impl<'a> From<&'a Buffer> for FillValue<'a> {
    fn from(value: &'a Buffer) -> Self {
        FillValue::Buffer(value)
    }
}

/// A fixed-length sequence of bytes over a shared backing store.
///
/// A buffer is a view: it holds an [`Allocation`], a byte offset into
/// it and a length. `Clone` produces another view of the same bytes,
/// so writes through one handle are visible through the other. Content
/// is compared with `==` regardless of which store the bytes live in.
///
/// Buffers share storage through `Rc` and implement neither `Send`
/// nor `Sync`.
///
/// # Example
///
/// ```
/// use wirebuf::{Buffer, Encoding};
///
/// let mut buf = Buffer::alloc(5)?;
/// buf.write("hello", 0, Encoding::Utf8)?;
///
/// assert_eq!(buf.to_text(Encoding::Utf8), "hello");
/// assert_eq!(buf.get(0), Some(b'h'));
/// # Ok::<(), wirebuf::BufferError>(())
/// ```
#[derive(Clone)]
pub struct Buffer {
    data: Allocation,
    offset: usize,
    len: usize,
}

impl Buffer {
    /// Creates a zero-filled buffer of `size` bytes in a dedicated
    /// store.
    ///
    /// # Errors
    ///
    /// Returns a range error when `size` exceeds [`MAX_LENGTH`].
    pub fn alloc(size: usize) -> Result<Buffer, BufferError> {
        check_size(size)?;
        Ok(Buffer {
            data: Allocation::new(size),
            offset: 0,
            len: size,
        })
    }

    /// Creates a buffer of `size` bytes in a dedicated store without
    /// promising any particular contents.
    ///
    /// A fresh store always reads as zero, but callers should treat
    /// the contents as unspecified and overwrite them.
    pub fn alloc_uninitialized(size: usize) -> Result<Buffer, BufferError> {
        check_size(size)?;
        Ok(Buffer {
            data: Allocation::new(size),
            offset: 0,
            len: size,
        })
    }

    /// Creates a buffer of `size` bytes carved from the thread-local
    /// pool.
    ///
    /// The contents are whatever the pool region last held, so callers
    /// must overwrite them before reading.
    pub fn alloc_uninitialized_from_pool(size: usize) -> Result<Buffer, BufferError> {
        with_default_pool(|pool| Buffer::alloc_uninitialized_in(pool, size))
    }

    /// Like [`alloc_uninitialized_from_pool`], but carving from the
    /// given pool instead of the thread-local one.
    ///
    /// [`alloc_uninitialized_from_pool`]: Buffer::alloc_uninitialized_from_pool
    pub fn alloc_uninitialized_in(
        pool: &mut PoolAllocator,
        size: usize,
    ) -> Result<Buffer, BufferError> {
        check_size(size)?;
        let (data, offset) = pool.reserve(size);
        Ok(Buffer { data, offset, len: size })
    }

    /// Copies a byte slice into a pooled buffer.
    pub fn from_slice(bytes: &[u8]) -> Buffer {
        with_default_pool(|pool| {
            let (data, offset) = pool.reserve(bytes.len());
            let buf = Buffer {
                data,
                offset,
                len: bytes.len(),
            };
            for (i, &byte) in bytes.iter().enumerate() {
                buf.put(i, byte);
            }
            buf
        })
    }

    /// Copies a byte vector into a pooled buffer.
    pub fn from_vec(bytes: Vec<u8>) -> Buffer {
        Buffer::from_slice(&bytes)
    }

    /// Deep-copies another buffer into a dedicated store.
    pub fn from_buffer(other: &Buffer) -> Buffer {
        let buf = Buffer {
            data: Allocation::new(other.len),
            offset: 0,
            len: other.len,
        };
        for (i, byte) in other.iter().enumerate() {
            buf.put(i, byte);
        }
        buf
    }

    /// Converts `text` under `encoding` into a pooled buffer.
    ///
    /// The store is sized with [`Encoding::byte_length`]; the final
    /// length is the number of bytes the conversion actually produced,
    /// which can be smaller (hex input truncates at the first invalid
    /// pair after the first).
    ///
    /// # Errors
    ///
    /// Returns a range error when the measured size exceeds
    /// [`MAX_LENGTH`], or a type error for hex text whose first digit
    /// pair is invalid.
    pub fn from_string(text: &str, encoding: Encoding) -> Result<Buffer, BufferError> {
        let size = encoding.byte_length(text);
        check_size(size)?;
        let bytes = encoding.encode(text)?;
        Ok(with_default_pool(|pool| {
            let (data, offset) = pool.reserve(size);
            let buf = Buffer {
                data,
                offset,
                len: bytes.len(),
            };
            for (i, &byte) in bytes.iter().enumerate() {
                buf.put(i, byte);
            }
            buf
        }))
    }

    /// Wraps an existing store without copying.
    ///
    /// The view starts `byte_offset` bytes into the store and spans
    /// `length` bytes; `None` means everything from `byte_offset` to
    /// the end.
    ///
    /// # Errors
    ///
    /// Returns a range error naming `"byteOffset"` when the offset
    /// exceeds the store size, or one naming `"length"` when the view
    /// would extend past the end of the store.
    pub fn from_allocation(
        data: Allocation,
        byte_offset: usize,
        length: Option<usize>,
    ) -> Result<Buffer, BufferError> {
        let capacity = data.len();
        if byte_offset > capacity {
            return Err(BufferError::range(
                "byteOffset",
                0,
                capacity as i128,
                byte_offset as i128,
            ));
        }
        let available = capacity - byte_offset;
        let len = length.unwrap_or(available);
        if len > available {
            return Err(BufferError::range("length", 0, available as i128, len as i128));
        }
        Ok(Buffer {
            data,
            offset: byte_offset,
            len,
        })
    }

    /// Number of bytes in the buffer.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the buffer holds no bytes.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Offset of this view within its backing store.
    pub fn byte_offset(&self) -> usize {
        self.offset
    }

    /// The backing store this buffer views.
    pub fn allocation(&self) -> &Allocation {
        &self.data
    }

    /// Reads the byte at `index`, or `None` past the end.
    pub fn get(&self, index: usize) -> Option<u8> {
        if index < self.len { Some(self.at(index)) } else { None }
    }

    /// Writes the byte at `index`. Returns `false` without writing
    /// when `index` is past the end.
    pub fn set(&mut self, index: usize, value: u8) -> bool {
        if index >= self.len {
            return false;
        }
        self.put(index, value);
        true
    }

    /// Fills the whole buffer with a pattern.
    ///
    /// See [`fill_range`](Buffer::fill_range) for the accepted patterns
    /// and failure cases.
    pub fn fill<'a>(
        &mut self,
        value: impl Into<FillValue<'a>>,
    ) -> Result<&mut Self, BufferError> {
        self.fill_range(value, 0, None)
    }

    /// Fills `[offset, end)` with a repeating pattern.
    ///
    /// `end` defaults to the buffer length. The pattern repeats until
    /// the window is full; an empty pattern, an empty window and an
    /// empty buffer are all no-ops. Filling an empty buffer skips
    /// validation entirely.
    ///
    /// # Errors
    ///
    /// Returns a range error when `offset` exceeds [`MAX_LENGTH`] or
    /// `end` exceeds the buffer length, and a type error for hex text
    /// whose first digit pair is invalid.
    ///
    /// # Example
    ///
    /// ```
    /// use wirebuf::Buffer;
    ///
    /// let mut buf = Buffer::alloc(5)?;
    /// buf.fill(b"ab")?;
    /// assert_eq!(buf.to_vec(), b"ababa");
    /// # Ok::<(), wirebuf::BufferError>(())
    /// ```
    pub fn fill_range<'a>(
        &mut self,
        value: impl Into<FillValue<'a>>,
        offset: usize,
        end: Option<usize>,
    ) -> Result<&mut Self, BufferError> {
        if self.len == 0 {
            return Ok(self);
        }
        let end = end.unwrap_or(self.len);
        if offset as u64 > MAX_LENGTH {
            return Err(BufferError::range("offset", 0, MAX_LENGTH as i128, offset as i128));
        }
        if end > self.len {
            return Err(BufferError::range("end", 0, self.len as i128, end as i128));
        }
        if offset >= end {
            return Ok(self);
        }
        let pattern: Vec<u8> = match value.into() {
            FillValue::Byte(byte) => vec![byte],
            FillValue::Text(text, encoding) => encoding.encode(text)?,
            FillValue::Bytes(bytes) => bytes.to_vec(),
            FillValue::Buffer(source) => source.to_vec(),
        };
        if pattern.is_empty() {
            return Ok(self);
        }
        for i in offset..end {
            self.put(i, pattern[(i - offset) % pattern.len()]);
        }
        Ok(self)
    }

    /// Writes encoded text at `offset` and returns the number of bytes
    /// written.
    ///
    /// Text that does not fit between `offset` and the end of the
    /// buffer is truncated.
    ///
    /// # Errors
    ///
    /// Returns a range error unless `offset` is a valid index, so any
    /// write into an empty buffer fails. Hex text whose first digit
    /// pair is invalid yields a type error.
    pub fn write(
        &mut self,
        text: &str,
        offset: usize,
        encoding: Encoding,
    ) -> Result<usize, BufferError> {
        self.write_at(text, offset, self.len.saturating_sub(offset), encoding)
    }

    /// Like [`write`](Buffer::write), but writing at most `max_length`
    /// bytes.
    pub fn write_limited(
        &mut self,
        text: &str,
        offset: usize,
        max_length: usize,
        encoding: Encoding,
    ) -> Result<usize, BufferError> {
        self.write_at(text, offset, max_length, encoding)
    }

    fn write_at(
        &mut self,
        text: &str,
        offset: usize,
        max_length: usize,
        encoding: Encoding,
    ) -> Result<usize, BufferError> {
        let max = self.len as i128 - 1;
        if offset as i128 > max {
            return Err(BufferError::range("offset", 0, max, offset as i128));
        }
        let window = (self.len - offset).min(max_length);
        let bytes = encoding.encode(text)?;
        let count = bytes.len().min(window);
        for (i, &byte) in bytes.iter().take(count).enumerate() {
            self.put(offset + i, byte);
        }
        Ok(count)
    }

    /// Copies bytes from this buffer into `target` and returns how
    /// many were copied.
    ///
    /// Reads `[source_start, source_end)` (default: to the end of this
    /// buffer) and writes starting at `target_start`. Both ranges clamp
    /// to their buffer; degenerate ranges copy nothing. The two buffers
    /// may share a backing store; overlapping copies behave as if the
    /// source were read fully first.
    pub fn copy_to(
        &self,
        target: &mut Buffer,
        target_start: usize,
        source_start: usize,
        source_end: Option<usize>,
    ) -> usize {
        let source_end = source_end.unwrap_or(self.len).min(self.len);
        if target_start >= target.len {
            return 0;
        }
        if source_end <= source_start || source_start >= self.len {
            return 0;
        }
        let count = (source_end - source_start).min(target.len - target_start);
        let forward = !self.data.ptr_eq(&target.data)
            || target.offset + target_start <= self.offset + source_start;
        if forward {
            for i in 0..count {
                target.put(target_start + i, self.at(source_start + i));
            }
        } else {
            for i in (0..count).rev() {
                target.put(target_start + i, self.at(source_start + i));
            }
        }
        count
    }

    /// Returns a view of a sub-range sharing this buffer's store.
    ///
    /// The range clamps to the buffer length. A degenerate range gives
    /// an empty buffer with its own store.
    ///
    /// # Example
    ///
    /// ```
    /// use wirebuf::Buffer;
    ///
    /// let buf = Buffer::from_slice(b"hello");
    /// assert_eq!(buf.subarray(1..4).to_vec(), b"ell");
    /// assert_eq!(buf.subarray(3..).to_vec(), b"lo");
    /// ```
    pub fn subarray(&self, range: impl RangeBounds<usize>) -> Buffer {
        let start = match range.start_bound() {
            Bound::Included(&start) => start,
            Bound::Excluded(&start) => start.saturating_add(1),
            Bound::Unbounded => 0,
        };
        let end = match range.end_bound() {
            Bound::Included(&end) => end.saturating_add(1),
            Bound::Excluded(&end) => end,
            Bound::Unbounded => self.len,
        };
        let end = end.min(self.len);
        if start >= end {
            return Buffer {
                data: Allocation::new(0),
                offset: 0,
                len: 0,
            };
        }
        Buffer {
            data: self.data.clone(),
            offset: self.offset + start,
            len: end - start,
        }
    }

    /// Alias for [`subarray`](Buffer::subarray).
    pub fn slice(&self, range: impl RangeBounds<usize>) -> Buffer {
        self.subarray(range)
    }

    /// Compares the full contents of two buffers lexicographically.
    ///
    /// On a common prefix, the shorter buffer orders first.
    pub fn compare_lex(&self, other: &Buffer) -> Ordering {
        self.iter().cmp(other.iter())
    }

    /// Compares a window of this buffer against a window of `target`.
    ///
    /// `target_end` and `source_end` default to the respective buffer
    /// lengths. An empty source window orders `Equal` against an empty
    /// target window and `Less` otherwise; a non-empty source window
    /// orders `Greater` against an empty target window.
    ///
    /// # Errors
    ///
    /// Returns a range error when `target_start` or `target_end`
    /// exceeds [`MAX_LENGTH`], `target_end` exceeds the target length,
    /// or `source_end` exceeds this buffer's length.
    pub fn compare(
        &self,
        target: &Buffer,
        target_start: usize,
        target_end: Option<usize>,
        source_start: usize,
        source_end: Option<usize>,
    ) -> Result<Ordering, BufferError> {
        let target_end = target_end.unwrap_or(target.len);
        let source_end = source_end.unwrap_or(self.len);
        if target_start as u64 > MAX_LENGTH {
            return Err(BufferError::range(
                "targetStart",
                0,
                MAX_LENGTH as i128,
                target_start as i128,
            ));
        }
        if target_end as u64 > MAX_LENGTH {
            return Err(BufferError::range(
                "targetEnd",
                0,
                MAX_LENGTH as i128,
                target_end as i128,
            ));
        }
        if target_end > target.len {
            return Err(BufferError::range(
                "targetEnd",
                0,
                target.len as i128,
                target_end as i128,
            ));
        }
        if source_end > self.len {
            return Err(BufferError::range(
                "sourceEnd",
                0,
                self.len as i128,
                source_end as i128,
            ));
        }
        if source_start >= source_end {
            return Ok(if target_start >= target_end {
                Ordering::Equal
            } else {
                Ordering::Less
            });
        }
        if target_start >= target_end {
            return Ok(Ordering::Greater);
        }
        Ok(self
            .window_iter(source_start, source_end)
            .cmp(target.window_iter(target_start, target_end)))
    }

    /// Returns `true` if both buffers hold the same bytes.
    pub fn equals(&self, other: &Buffer) -> bool {
        self.compare_lex(other) == Ordering::Equal
    }

    /// Swaps the byte order of each 16-bit group in place.
    ///
    /// # Errors
    ///
    /// Returns a size error when the length is not a multiple of 2.
    pub fn swap16(&mut self) -> Result<&mut Self, BufferError> {
        self.swap_groups(2, 16)
    }

    /// Swaps the byte order of each 32-bit group in place.
    ///
    /// # Errors
    ///
    /// Returns a size error when the length is not a multiple of 4.
    pub fn swap32(&mut self) -> Result<&mut Self, BufferError> {
        self.swap_groups(4, 32)
    }

    /// Swaps the byte order of each 64-bit group in place.
    ///
    /// # Errors
    ///
    /// Returns a size error when the length is not a multiple of 8.
    pub fn swap64(&mut self) -> Result<&mut Self, BufferError> {
        self.swap_groups(8, 64)
    }

    fn swap_groups(&mut self, width: usize, bits: u8) -> Result<&mut Self, BufferError> {
        if self.len % width != 0 {
            return Err(BufferError::SizeMultiple { bits });
        }
        for group in (0..self.len).step_by(width) {
            let mut low = group;
            let mut high = group + width - 1;
            while low < high {
                let tmp = self.at(low);
                self.put(low, self.at(high));
                self.put(high, tmp);
                low += 1;
                high -= 1;
            }
        }
        Ok(self)
    }

    /// Decodes the whole buffer as text under `encoding`.
    pub fn to_text(&self, encoding: Encoding) -> String {
        self.to_text_range(encoding, 0, None)
    }

    /// Decodes `[start, end)` as text under `encoding`.
    ///
    /// `end` defaults to the buffer length and clamps to it. A start
    /// at or past the end of the buffer or the window yields an empty
    /// string rather than an error.
    pub fn to_text_range(&self, encoding: Encoding, start: usize, end: Option<usize>) -> String {
        let end = end.unwrap_or(self.len).min(self.len);
        if start >= self.len || start >= end {
            return String::new();
        }
        let bytes: Vec<u8> = self.window_iter(start, end).collect();
        encoding.decode(&bytes)
    }

    /// Copies the contents into a fresh `Vec<u8>`.
    pub fn to_vec(&self) -> Vec<u8> {
        self.iter().collect()
    }

    /// Copies the contents into an immutable [`Bytes`] snapshot.
    pub fn to_bytes(&self) -> Bytes {
        Bytes::from(self.to_vec())
    }

    /// Iterates over the bytes of the buffer.
    pub fn iter(&self) -> Iter<'_> {
        self.window_iter(0, self.len)
    }

    fn window_iter(&self, start: usize, end: usize) -> Iter<'_> {
        Iter {
            buffer: self,
            front: start,
            back: end,
        }
    }

    // Absolute accessors; callers stay within [0, len).
    fn at(&self, index: usize) -> u8 {
        self.data.get(self.offset + index)
    }

    fn put(&self, index: usize, value: u8) {
        self.data.set(self.offset + index, value);
    }
}

fn check_size(size: usize) -> Result<(), BufferError> {
    if size as u64 > MAX_LENGTH {
        return Err(BufferError::range("size", 0, MAX_LENGTH as i128, size as i128));
    }
    Ok(())
}

impl From<&[u8]> for Buffer {
    fn from(bytes: &[u8]) -> Self {
        Buffer::from_slice(bytes)
    }
}

impl<const N: usize> From<&[u8; N]> for Buffer {
    fn from(bytes: &[u8; N]) -> Self {
        Buffer::from_slice(bytes)
    }
}

impl From<Vec<u8>> for Buffer {
    fn from(bytes: Vec<u8>) -> Self {
        Buffer::from_vec(bytes)
    }
}

impl PartialEq for Buffer {
    fn eq(&self, other: &Buffer) -> bool {
        self.equals(other)
    }
}

impl Eq for Buffer {}

impl fmt::Debug for Buffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<Buffer")?;
        for byte in self.iter().take(50) {
            write!(f, " {:02x}", byte)?;
        }
        if self.len > 50 {
            write!(f, " ... {} more bytes", self.len - 50)?;
        }
        write!(f, ">")
    }
}

impl<'a> IntoIterator for &'a Buffer {
    type Item = u8;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Iter<'a> {
        self.iter()
    }
}

/// Iterator over the bytes of a [`Buffer`].
#[derive(Debug, Clone)]
pub struct Iter<'a> {
    buffer: &'a Buffer,
    front: usize,
    back: usize,
}

impl Iterator for Iter<'_> {
    type Item = u8;

    fn next(&mut self) -> Option<u8> {
        if self.front == self.back {
            return None;
        }
        let byte = self.buffer.at(self.front);
        self.front += 1;
        Some(byte)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.back - self.front;
        (remaining, Some(remaining))
    }
}

impl DoubleEndedIterator for Iter<'_> {
    fn next_back(&mut self) -> Option<u8> {
        if self.front == self.back {
            return None;
        }
        self.back -= 1;
        Some(self.buffer.at(self.back))
    }
}

impl ExactSizeIterator for Iter<'_> {}

#[cfg(feature = "serde")]
impl serde::Serialize for Buffer {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeStruct;

        let mut state = serializer.serialize_struct("Buffer", 2)?;
        state.serialize_field("type", "Buffer")?;
        state.serialize_field("data", &self.to_vec())?;
        state.end()
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Buffer {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(serde::Deserialize)]
        struct Repr {
            #[serde(rename = "type")]
            kind: String,
            data: Vec<u8>,
        }

        let repr = Repr::deserialize(deserializer)?;
        if repr.kind != "Buffer" {
            return Err(serde::de::Error::custom("expected type \"Buffer\""));
        }
        Ok(Buffer::from_slice(&repr.data))
    }
}

/// Concatenates buffers into one pooled buffer.
///
/// `total_length` defaults to the sum of the source lengths. A shorter
/// total truncates; a longer total leaves a zero tail. An empty list
/// gives an empty buffer regardless of `total_length`.
///
/// # Errors
///
/// Returns a range error when the total exceeds [`MAX_LENGTH`].
///
/// # Example
///
/// ```
/// use wirebuf::{concat, Buffer};
///
/// let joined = concat(&[Buffer::from_slice(b"ab"), Buffer::from_slice(b"cd")], None)?;
/// assert_eq!(joined.to_vec(), b"abcd");
/// # Ok::<(), wirebuf::BufferError>(())
/// ```
pub fn concat(list: &[Buffer], total_length: Option<usize>) -> Result<Buffer, BufferError> {
    if list.is_empty() {
        return Buffer::alloc(0);
    }
    let total = match total_length {
        Some(total) => total,
        None => list.iter().map(Buffer::len).sum(),
    };
    if total as u64 > MAX_LENGTH {
        return Err(BufferError::range(
            "totalLength",
            0,
            MAX_LENGTH as i128,
            total as i128,
        ));
    }
    let mut out = Buffer::alloc_uninitialized_from_pool(total)?;
    let mut cursor = 0;
    for source in list {
        cursor += source.copy_to(&mut out, cursor, 0, None);
    }
    // Pooled storage may hold stale bytes past the copied prefix.
    for i in cursor..total {
        out.put(i, 0);
    }
    Ok(out)
}

/// Compares the full contents of two buffers lexicographically.
pub fn compare(a: &Buffer, b: &Buffer) -> Ordering {
    a.compare_lex(b)
}

/// Decodes `source` under `from` and re-encodes the text under `to`
/// into a fresh pooled buffer.
///
/// # Errors
///
/// Propagates the conversion errors of [`Buffer::from_string`].
pub fn transcode(source: &Buffer, from: Encoding, to: Encoding) -> Result<Buffer, BufferError> {
    Buffer::from_string(&source.to_text(from), to)
}

/// Returns `true` if `value` is a [`Buffer`].
///
/// # Example
///
/// ```
/// use wirebuf::{is_buffer, Buffer};
///
/// let buf = Buffer::from_slice(b"ab");
/// assert!(is_buffer(&buf));
/// assert!(!is_buffer(&"ab"));
/// ```
pub fn is_buffer(value: &dyn Any) -> bool {
    value.is::<Buffer>()
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==== construction ====

    #[test]
    fn test_alloc_zero_filled() {
        let buf = Buffer::alloc(8).unwrap();
        assert_eq!(buf.len(), 8);
        assert!(buf.iter().all(|b| b == 0));
    }

    #[test]
    fn test_alloc_empty() {
        let buf = Buffer::alloc(0).unwrap();
        assert!(buf.is_empty());
        assert_eq!(buf.get(0), None);
    }

    #[test]
    fn test_from_slice_round_trip() {
        let buf = Buffer::from_slice(b"hello");
        assert_eq!(buf.to_vec(), b"hello");
        assert_eq!(buf.len(), 5);
    }

    #[test]
    fn test_pooled_buffers_share_store() {
        let a = Buffer::from_slice(b"aaaa");
        let b = Buffer::from_slice(b"bbbb");
        assert!(a.allocation().ptr_eq(b.allocation()));
        assert_ne!(a.byte_offset(), b.byte_offset());
        assert_eq!(a.to_vec(), b"aaaa");
        assert_eq!(b.to_vec(), b"bbbb");
    }

    #[test]
    fn test_from_buffer_is_a_deep_copy() {
        let mut original = Buffer::from_slice(b"abc");
        let copy = Buffer::from_buffer(&original);
        original.set(0, b'z');
        assert_eq!(copy.to_vec(), b"abc");
        assert!(!copy.allocation().ptr_eq(original.allocation()));
    }

    #[test]
    fn test_from_string_utf8() {
        let buf = Buffer::from_string("héllo", Encoding::Utf8).unwrap();
        assert_eq!(buf.len(), 6);
        assert_eq!(buf.to_text(Encoding::Utf8), "héllo");
    }

    #[test]
    fn test_from_string_hex_truncates_after_first_pair() {
        let buf = Buffer::from_string("abzz", Encoding::Hex).unwrap();
        assert_eq!(buf.to_vec(), [0xAB]);
        assert_eq!(buf.len(), 1);
    }

    #[test]
    fn test_from_string_bad_hex_errors() {
        let err = Buffer::from_string("zzab", Encoding::Hex).unwrap_err();
        assert_eq!(err.code(), 401);
    }

    #[test]
    fn test_from_allocation_views_without_copying() {
        let source = Buffer::from_slice(b"abcdef");
        let alloc = source.allocation().clone();
        let offset = source.byte_offset();
        let view = Buffer::from_allocation(alloc, offset + 2, Some(3)).unwrap();
        assert_eq!(view.to_vec(), b"cde");
        assert!(view.allocation().ptr_eq(source.allocation()));
    }

    #[test]
    fn test_from_allocation_checks_offset_and_length() {
        let alloc = Allocation::new(4);
        let err = Buffer::from_allocation(alloc.clone(), 5, None).unwrap_err();
        assert_eq!(
            err.to_string(),
            "The value of \"byteOffset\" is out of range. It must be >= 0 and <= 4. \
             Received value is: 5"
        );

        let err = Buffer::from_allocation(alloc, 2, Some(3)).unwrap_err();
        assert_eq!(
            err.to_string(),
            "The value of \"length\" is out of range. It must be >= 0 and <= 2. \
             Received value is: 3"
        );
    }

    #[test]
    fn test_from_allocation_defaults_to_tail() {
        let alloc = Allocation::new(6);
        let buf = Buffer::from_allocation(alloc, 4, None).unwrap();
        assert_eq!(buf.len(), 2);
    }

    // ==== indexing and views ====

    #[test]
    fn test_get_set_in_bounds() {
        let mut buf = Buffer::alloc(3).unwrap();
        assert!(buf.set(1, 0xAB));
        assert_eq!(buf.get(1), Some(0xAB));
    }

    #[test]
    fn test_set_out_of_bounds_is_rejected() {
        let mut buf = Buffer::alloc(3).unwrap();
        assert!(!buf.set(3, 1));
        assert_eq!(buf.get(3), None);
        assert_eq!(buf.to_vec(), [0, 0, 0]);
    }

    #[test]
    fn test_clone_shares_bytes() {
        let mut buf = Buffer::from_slice(b"abc");
        let view = buf.clone();
        buf.set(0, b'z');
        assert_eq!(view.to_vec(), b"zbc");
    }

    #[test]
    fn test_subarray_shares_and_clamps() {
        let mut buf = Buffer::from_slice(b"abcdef");
        let sub = buf.subarray(2..100);
        assert_eq!(sub.to_vec(), b"cdef");
        buf.set(2, b'X');
        assert_eq!(sub.get(0), Some(b'X'));
    }

    #[test]
    fn test_subarray_degenerate_is_detached_empty() {
        let buf = Buffer::from_slice(b"abc");
        let sub = buf.subarray(3..1);
        assert!(sub.is_empty());
        assert!(!sub.allocation().ptr_eq(buf.allocation()));
        assert!(buf.subarray(10..).is_empty());
    }

    #[test]
    fn test_slice_full_range() {
        let buf = Buffer::from_slice(b"abc");
        assert_eq!(buf.slice(..).to_vec(), b"abc");
    }

    // ==== fill ====

    #[test]
    fn test_fill_byte() {
        let mut buf = Buffer::alloc(4).unwrap();
        buf.fill(0x61u8).unwrap();
        assert_eq!(buf.to_vec(), b"aaaa");
    }

    #[test]
    fn test_fill_pattern_repeats_and_truncates() {
        let mut buf = Buffer::alloc(5).unwrap();
        buf.fill("abc").unwrap();
        assert_eq!(buf.to_vec(), b"abcab");
    }

    #[test]
    fn test_fill_range_window() {
        let mut buf = Buffer::alloc(6).unwrap();
        buf.fill_range(0xFFu8, 2, Some(4)).unwrap();
        assert_eq!(buf.to_vec(), [0, 0, 0xFF, 0xFF, 0, 0]);
    }

    #[test]
    fn test_fill_reversed_window_is_a_noop() {
        let mut buf = Buffer::from_slice(b"abcd");
        buf.fill_range(0u8, 3, Some(2)).unwrap();
        assert_eq!(buf.to_vec(), b"abcd");
    }

    #[test]
    fn test_fill_end_checked_against_length() {
        let mut buf = Buffer::alloc(4).unwrap();
        let err = buf.fill_range(0u8, 0, Some(5)).unwrap_err();
        assert_eq!(err.code(), 10200001);
        assert_eq!(
            err.to_string(),
            "The value of \"end\" is out of range. It must be >= 0 and <= 4. \
             Received value is: 5"
        );
    }

    #[test]
    fn test_fill_empty_buffer_skips_validation() {
        let mut buf = Buffer::alloc(0).unwrap();
        // Even an invalid window is accepted on an empty buffer.
        assert!(buf.fill_range(0u8, 0, Some(9)).is_ok());
    }

    #[test]
    fn test_fill_hex_text() {
        let mut buf = Buffer::alloc(4).unwrap();
        buf.fill(("dead", Encoding::Hex)).unwrap();
        assert_eq!(buf.to_vec(), [0xDE, 0xAD, 0xDE, 0xAD]);

        let err = buf.fill(("zz", Encoding::Hex)).unwrap_err();
        assert_eq!(err.to_string(), "The argument 'value' is invalid. Received \"zz\"");
    }

    #[test]
    fn test_fill_with_buffer_pattern() {
        let mut buf = Buffer::alloc(6).unwrap();
        let pattern = Buffer::from_slice(b"ab");
        buf.fill(&pattern).unwrap();
        assert_eq!(buf.to_vec(), b"ababab");
    }

    // ==== write ====

    #[test]
    fn test_write_returns_bytes_written() {
        let mut buf = Buffer::alloc(5).unwrap();
        assert_eq!(buf.write("hi", 0, Encoding::Utf8).unwrap(), 2);
        assert_eq!(buf.to_vec(), [b'h', b'i', 0, 0, 0]);
    }

    #[test]
    fn test_write_truncates_at_buffer_end() {
        let mut buf = Buffer::alloc(4).unwrap();
        assert_eq!(buf.write("hello", 2, Encoding::Utf8).unwrap(), 2);
        assert_eq!(buf.to_vec(), [0, 0, b'h', b'e']);
    }

    #[test]
    fn test_write_offset_must_be_an_index() {
        let mut buf = Buffer::alloc(4).unwrap();
        let err = buf.write("x", 4, Encoding::Utf8).unwrap_err();
        assert_eq!(err.code(), 10200001);
        assert_eq!(
            err.to_string(),
            "The value of \"offset\" is out of range. It must be >= 0 and <= 3. \
             Received value is: 4"
        );
    }

    #[test]
    fn test_write_into_empty_buffer_fails() {
        let mut buf = Buffer::alloc(0).unwrap();
        let err = buf.write("x", 0, Encoding::Utf8).unwrap_err();
        assert_eq!(
            err.to_string(),
            "The value of \"offset\" is out of range. It must be >= 0 and <= -1. \
             Received value is: 0"
        );
    }

    #[test]
    fn test_write_limited_caps_the_window() {
        let mut buf = Buffer::alloc(6).unwrap();
        assert_eq!(buf.write_limited("abcdef", 1, 3, Encoding::Utf8).unwrap(), 3);
        assert_eq!(buf.to_vec(), [0, b'a', b'b', b'c', 0, 0]);
    }

    #[test]
    fn test_write_utf16le() {
        let mut buf = Buffer::alloc(4).unwrap();
        assert_eq!(buf.write("ab", 0, Encoding::Utf16Le).unwrap(), 4);
        assert_eq!(buf.to_vec(), [0x61, 0, 0x62, 0]);
    }

    // ==== copy ====

    #[test]
    fn test_copy_to_basic() {
        let source = Buffer::from_slice(b"abc");
        let mut target = Buffer::alloc(5).unwrap();
        assert_eq!(source.copy_to(&mut target, 1, 0, None), 3);
        assert_eq!(target.to_vec(), [0, b'a', b'b', b'c', 0]);
    }

    #[test]
    fn test_copy_to_clamps_everywhere() {
        let source = Buffer::from_slice(b"abcdef");
        let mut target = Buffer::alloc(3).unwrap();
        assert_eq!(source.copy_to(&mut target, 0, 2, Some(100)), 3);
        assert_eq!(target.to_vec(), b"cde");

        assert_eq!(source.copy_to(&mut target, 3, 0, None), 0, "target start past end");
        assert_eq!(source.copy_to(&mut target, 0, 4, Some(2)), 0, "reversed source window");
    }

    #[test]
    fn test_copy_between_overlapping_views() {
        let base = Buffer::from_slice(b"abcdef");
        let source = base.subarray(0..4);
        let mut target = base.subarray(2..6);
        // Forward copy over an overlap must not read bytes it already wrote.
        assert_eq!(source.copy_to(&mut target, 0, 0, None), 4);
        assert_eq!(base.to_vec(), b"ababcd");
    }

    #[test]
    fn test_copy_overlap_backward_direction() {
        let base = Buffer::from_slice(b"abcdef");
        let source = base.subarray(2..6);
        let mut target = base.subarray(0..4);
        assert_eq!(source.copy_to(&mut target, 0, 0, None), 4);
        assert_eq!(base.to_vec(), b"cdefef");
    }

    // ==== comparison ====

    #[test]
    fn test_compare_lex_orders_bytes_then_length() {
        let ab = Buffer::from_slice(b"ab");
        let abc = Buffer::from_slice(b"abc");
        let b = Buffer::from_slice(b"b");
        assert_eq!(ab.compare_lex(&abc), Ordering::Less);
        assert_eq!(abc.compare_lex(&ab), Ordering::Greater);
        assert_eq!(ab.compare_lex(&b), Ordering::Less);
        assert_eq!(compare(&ab, &ab.clone()), Ordering::Equal);
    }

    #[test]
    fn test_compare_windows() {
        let this = Buffer::from_slice(b"xxabc");
        let that = Buffer::from_slice(b"abcyy");
        let ord = this.compare(&that, 0, Some(3), 2, Some(5)).unwrap();
        assert_eq!(ord, Ordering::Equal);
    }

    #[test]
    fn test_compare_degenerate_windows() {
        let a = Buffer::from_slice(b"abc");
        let b = Buffer::from_slice(b"abc");
        assert_eq!(a.compare(&b, 1, Some(1), 2, Some(2)).unwrap(), Ordering::Equal);
        assert_eq!(a.compare(&b, 0, Some(1), 2, Some(2)).unwrap(), Ordering::Less);
        assert_eq!(a.compare(&b, 1, Some(1), 0, Some(1)).unwrap(), Ordering::Greater);
    }

    #[test]
    fn test_compare_checks_window_ends() {
        let a = Buffer::from_slice(b"abc");
        let b = Buffer::from_slice(b"ab");
        let err = a.compare(&b, 0, Some(3), 0, None).unwrap_err();
        assert_eq!(
            err.to_string(),
            "The value of \"targetEnd\" is out of range. It must be >= 0 and <= 2. \
             Received value is: 3"
        );
        let err = a.compare(&b, 0, None, 0, Some(4)).unwrap_err();
        assert!(err.to_string().contains("\"sourceEnd\""));
    }

    #[test]
    fn test_equality_is_content_based() {
        let a = Buffer::from_slice(b"abc");
        let b = Buffer::from_buffer(&a);
        assert_eq!(a, b);
        assert!(a.equals(&b));
        assert_ne!(a, Buffer::from_slice(b"abd"));
    }

    // ==== swaps ====

    #[test]
    fn test_swap16() {
        let mut buf = Buffer::from_slice(&[0x01, 0x02, 0x03, 0x04]);
        buf.swap16().unwrap();
        assert_eq!(buf.to_vec(), [0x02, 0x01, 0x04, 0x03]);
    }

    #[test]
    fn test_swap32() {
        let mut buf = Buffer::from_slice(&[1, 2, 3, 4, 5, 6, 7, 8]);
        buf.swap32().unwrap();
        assert_eq!(buf.to_vec(), [4, 3, 2, 1, 8, 7, 6, 5]);
    }

    #[test]
    fn test_swap64() {
        let mut buf = Buffer::from_slice(&[1, 2, 3, 4, 5, 6, 7, 8]);
        buf.swap64().unwrap();
        assert_eq!(buf.to_vec(), [8, 7, 6, 5, 4, 3, 2, 1]);
    }

    #[test]
    fn test_swap_rejects_misaligned_length() {
        let mut buf = Buffer::from_slice(&[1, 2, 3]);
        let err = buf.swap16().unwrap_err();
        assert_eq!(err.code(), 10200009);
        assert_eq!(err.to_string(), "Buffer size must be a multiple of 16-bits");
        assert_eq!(
            buf.swap64().unwrap_err().to_string(),
            "Buffer size must be a multiple of 64-bits"
        );
    }

    // ==== text ====

    #[test]
    fn test_to_text_range_clamps() {
        let buf = Buffer::from_slice(b"hello");
        assert_eq!(buf.to_text_range(Encoding::Utf8, 1, Some(100)), "ello");
        assert_eq!(buf.to_text_range(Encoding::Utf8, 5, None), "");
        assert_eq!(buf.to_text_range(Encoding::Utf8, 3, Some(2)), "");
    }

    #[test]
    fn test_to_text_hex() {
        let buf = Buffer::from_slice(&[0xDE, 0xAD]);
        assert_eq!(buf.to_text(Encoding::Hex), "dead");
    }

    // ==== iteration and formatting ====

    #[test]
    fn test_iter_and_into_iter() {
        let buf = Buffer::from_slice(b"abc");
        let collected: Vec<u8> = (&buf).into_iter().collect();
        assert_eq!(collected, b"abc");
        assert_eq!(buf.iter().len(), 3);
        assert_eq!(buf.iter().rev().collect::<Vec<_>>(), [b'c', b'b', b'a']);
    }

    #[test]
    fn test_debug_format() {
        let buf = Buffer::from_slice(&[0xDE, 0xAD, 0xBE, 0xEF]);
        assert_eq!(format!("{:?}", buf), "<Buffer de ad be ef>");
    }

    #[test]
    fn test_debug_format_truncates_past_fifty_bytes() {
        let buf = Buffer::alloc(53).unwrap();
        let text = format!("{:?}", buf);
        assert!(text.ends_with("... 3 more bytes>"));
        assert_eq!(text.matches("00").count(), 50);
    }

    // ==== module helpers ====

    #[test]
    fn test_concat_sums_lengths() {
        let joined = concat(
            &[Buffer::from_slice(b"ab"), Buffer::from_slice(b"cde")],
            None,
        )
        .unwrap();
        assert_eq!(joined.to_vec(), b"abcde");
    }

    #[test]
    fn test_concat_empty_list() {
        let joined = concat(&[], Some(10)).unwrap();
        assert!(joined.is_empty());
    }

    #[test]
    fn test_concat_truncates_to_total() {
        let joined = concat(
            &[Buffer::from_slice(b"abcd"), Buffer::from_slice(b"efgh")],
            Some(6),
        )
        .unwrap();
        assert_eq!(joined.to_vec(), b"abcdef");
    }

    #[test]
    fn test_concat_zero_fills_excess_total() {
        let joined = concat(&[Buffer::from_slice(b"ab")], Some(5)).unwrap();
        assert_eq!(joined.to_vec(), [b'a', b'b', 0, 0, 0]);
    }

    #[test]
    fn test_concat_explicit_zero_total() {
        let joined = concat(&[Buffer::from_slice(b"ab")], Some(0)).unwrap();
        assert!(joined.is_empty());
    }

    #[test]
    fn test_concat_rejects_oversized_total() {
        if usize::BITS < 64 {
            return;
        }
        let err = concat(&[Buffer::from_slice(b"ab")], Some(5_000_000_000)).unwrap_err();
        assert_eq!(err.code(), 10200001);
        assert_eq!(
            err.to_string(),
            "The value of \"totalLength\" is out of range. It must be >= 0 and <= 4294967296. \
             Received value is: 5000000000"
        );
    }

    #[test]
    fn test_transcode() {
        let source = Buffer::from_string("hi", Encoding::Utf8).unwrap();
        let wide = transcode(&source, Encoding::Utf8, Encoding::Utf16Le).unwrap();
        assert_eq!(wide.to_vec(), [b'h', 0, b'i', 0]);
    }

    #[test]
    fn test_is_buffer() {
        let buf = Buffer::alloc(1).unwrap();
        assert!(is_buffer(&buf));
        assert!(!is_buffer(&vec![1u8, 2]));
        assert!(!is_buffer(&42i32));
    }

    #[test]
    fn test_oversized_alloc_is_rejected() {
        if usize::BITS < 64 {
            return;
        }
        let err = Buffer::alloc((MAX_LENGTH + 1) as usize).unwrap_err();
        assert_eq!(err.code(), 10200001);
        assert!(err.to_string().contains("\"size\""));
    }
}
