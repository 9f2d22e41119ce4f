//! Fixed-width integer and float codecs over [`Buffer`].
//!
//! Every read checks that `offset` leaves enough bytes for the width;
//! every write of a 24, 40 or 48-bit value additionally checks that
//! the value fits before any byte is stored. Extended widths carry no
//! padding on write and sign-extend the top bit on signed reads. The
//! `*_uint_*` and `*_int_*` methods are variable-width entry points
//! dispatching on a byte length of 1 through 6.

use crate::error::BufferError;

use super::Buffer;

impl Buffer {
    fn check_codec_offset(&self, offset: usize, width: usize) -> Result<(), BufferError> {
        let max = self.len as i128 - width as i128;
        if offset as i128 > max {
            return Err(BufferError::range("offset", 0, max, offset as i128));
        }
        Ok(())
    }

    fn load<const W: usize>(&self, offset: usize) -> Result<[u8; W], BufferError> {
        self.check_codec_offset(offset, W)?;
        let mut bytes = [0u8; W];
        for (i, slot) in bytes.iter_mut().enumerate() {
            *slot = self.at(offset + i);
        }
        Ok(bytes)
    }

    fn store<const W: usize>(&mut self, offset: usize, bytes: [u8; W]) -> usize {
        for (i, byte) in bytes.into_iter().enumerate() {
            self.put(offset + i, byte);
        }
        offset + W
    }

    // ==== reads ====

    /// Reads the unsigned byte at `offset`.
    ///
    /// Unlike [`get`](Buffer::get) this fails with a range error past
    /// the end instead of returning `None`.
    pub fn read_u8(&self, offset: usize) -> Result<u8, BufferError> {
        let [byte] = self.load(offset)?;
        Ok(byte)
    }

    /// Reads the byte at `offset` as a signed integer.
    pub fn read_i8(&self, offset: usize) -> Result<i8, BufferError> {
        let [byte] = self.load(offset)?;
        Ok(byte as i8)
    }

    /// Reads an unsigned 16-bit big-endian integer at `offset`.
    pub fn read_u16_be(&self, offset: usize) -> Result<u16, BufferError> {
        Ok(u16::from_be_bytes(self.load(offset)?))
    }

    /// Reads an unsigned 16-bit little-endian integer at `offset`.
    pub fn read_u16_le(&self, offset: usize) -> Result<u16, BufferError> {
        Ok(u16::from_le_bytes(self.load(offset)?))
    }

    /// Reads a signed 16-bit big-endian integer at `offset`.
    pub fn read_i16_be(&self, offset: usize) -> Result<i16, BufferError> {
        Ok(i16::from_be_bytes(self.load(offset)?))
    }

    /// Reads a signed 16-bit little-endian integer at `offset`.
    pub fn read_i16_le(&self, offset: usize) -> Result<i16, BufferError> {
        Ok(i16::from_le_bytes(self.load(offset)?))
    }

    /// Reads an unsigned 24-bit big-endian integer at `offset`.
    pub fn read_u24_be(&self, offset: usize) -> Result<u32, BufferError> {
        let [a, b, c] = self.load(offset)?;
        Ok(u32::from_be_bytes([0, a, b, c]))
    }

    /// Reads an unsigned 24-bit little-endian integer at `offset`.
    pub fn read_u24_le(&self, offset: usize) -> Result<u32, BufferError> {
        let [a, b, c] = self.load(offset)?;
        Ok(u32::from_le_bytes([a, b, c, 0]))
    }

    /// Reads a signed 24-bit big-endian integer at `offset`, sign
    /// extending bit 23.
    pub fn read_i24_be(&self, offset: usize) -> Result<i32, BufferError> {
        Ok(sign_extend_32(self.read_u24_be(offset)?, 24))
    }

    /// Reads a signed 24-bit little-endian integer at `offset`.
    pub fn read_i24_le(&self, offset: usize) -> Result<i32, BufferError> {
        Ok(sign_extend_32(self.read_u24_le(offset)?, 24))
    }

    /// Reads an unsigned 32-bit big-endian integer at `offset`.
    pub fn read_u32_be(&self, offset: usize) -> Result<u32, BufferError> {
        Ok(u32::from_be_bytes(self.load(offset)?))
    }

    /// Reads an unsigned 32-bit little-endian integer at `offset`.
    pub fn read_u32_le(&self, offset: usize) -> Result<u32, BufferError> {
        Ok(u32::from_le_bytes(self.load(offset)?))
    }

    /// Reads a signed 32-bit big-endian integer at `offset`.
    pub fn read_i32_be(&self, offset: usize) -> Result<i32, BufferError> {
        Ok(i32::from_be_bytes(self.load(offset)?))
    }

    /// Reads a signed 32-bit little-endian integer at `offset`.
    pub fn read_i32_le(&self, offset: usize) -> Result<i32, BufferError> {
        Ok(i32::from_le_bytes(self.load(offset)?))
    }

    /// Reads an unsigned 40-bit big-endian integer at `offset`.
    pub fn read_u40_be(&self, offset: usize) -> Result<u64, BufferError> {
        let [a, b, c, d, e] = self.load(offset)?;
        Ok(u64::from_be_bytes([0, 0, 0, a, b, c, d, e]))
    }

    /// Reads an unsigned 40-bit little-endian integer at `offset`.
    pub fn read_u40_le(&self, offset: usize) -> Result<u64, BufferError> {
        let [a, b, c, d, e] = self.load(offset)?;
        Ok(u64::from_le_bytes([a, b, c, d, e, 0, 0, 0]))
    }

    /// Reads a signed 40-bit big-endian integer at `offset`.
    pub fn read_i40_be(&self, offset: usize) -> Result<i64, BufferError> {
        Ok(sign_extend_64(self.read_u40_be(offset)?, 40))
    }

    /// Reads a signed 40-bit little-endian integer at `offset`.
    pub fn read_i40_le(&self, offset: usize) -> Result<i64, BufferError> {
        Ok(sign_extend_64(self.read_u40_le(offset)?, 40))
    }

    /// Reads an unsigned 48-bit big-endian integer at `offset`.
    pub fn read_u48_be(&self, offset: usize) -> Result<u64, BufferError> {
        let [a, b, c, d, e, f] = self.load(offset)?;
        Ok(u64::from_be_bytes([0, 0, a, b, c, d, e, f]))
    }

    /// Reads an unsigned 48-bit little-endian integer at `offset`.
    pub fn read_u48_le(&self, offset: usize) -> Result<u64, BufferError> {
        let [a, b, c, d, e, f] = self.load(offset)?;
        Ok(u64::from_le_bytes([a, b, c, d, e, f, 0, 0]))
    }

    /// Reads a signed 48-bit big-endian integer at `offset`.
    pub fn read_i48_be(&self, offset: usize) -> Result<i64, BufferError> {
        Ok(sign_extend_64(self.read_u48_be(offset)?, 48))
    }

    /// Reads a signed 48-bit little-endian integer at `offset`.
    pub fn read_i48_le(&self, offset: usize) -> Result<i64, BufferError> {
        Ok(sign_extend_64(self.read_u48_le(offset)?, 48))
    }

    /// Reads an unsigned 64-bit big-endian integer at `offset`.
    pub fn read_u64_be(&self, offset: usize) -> Result<u64, BufferError> {
        Ok(u64::from_be_bytes(self.load(offset)?))
    }

    /// Reads an unsigned 64-bit little-endian integer at `offset`.
    pub fn read_u64_le(&self, offset: usize) -> Result<u64, BufferError> {
        Ok(u64::from_le_bytes(self.load(offset)?))
    }

    /// Reads a signed 64-bit big-endian integer at `offset`.
    pub fn read_i64_be(&self, offset: usize) -> Result<i64, BufferError> {
        Ok(i64::from_be_bytes(self.load(offset)?))
    }

    /// Reads a signed 64-bit little-endian integer at `offset`.
    pub fn read_i64_le(&self, offset: usize) -> Result<i64, BufferError> {
        Ok(i64::from_le_bytes(self.load(offset)?))
    }

    /// Reads a 32-bit big-endian IEEE-754 float at `offset`.
    pub fn read_f32_be(&self, offset: usize) -> Result<f32, BufferError> {
        Ok(f32::from_be_bytes(self.load(offset)?))
    }

    /// Reads a 32-bit little-endian IEEE-754 float at `offset`.
    pub fn read_f32_le(&self, offset: usize) -> Result<f32, BufferError> {
        Ok(f32::from_le_bytes(self.load(offset)?))
    }

    /// Reads a 64-bit big-endian IEEE-754 float at `offset`.
    pub fn read_f64_be(&self, offset: usize) -> Result<f64, BufferError> {
        Ok(f64::from_be_bytes(self.load(offset)?))
    }

    /// Reads a 64-bit little-endian IEEE-754 float at `offset`.
    pub fn read_f64_le(&self, offset: usize) -> Result<f64, BufferError> {
        Ok(f64::from_le_bytes(self.load(offset)?))
    }

    // ==== writes ====

    /// Writes a single unsigned byte and returns the offset after it.
    pub fn write_u8(&mut self, value: u8, offset: usize) -> Result<usize, BufferError> {
        self.check_codec_offset(offset, 1)?;
        Ok(self.store(offset, [value]))
    }

    /// Writes a single signed byte.
    pub fn write_i8(&mut self, value: i8, offset: usize) -> Result<usize, BufferError> {
        self.check_codec_offset(offset, 1)?;
        Ok(self.store(offset, [value as u8]))
    }

    /// Writes an unsigned 16-bit big-endian integer.
    pub fn write_u16_be(&mut self, value: u16, offset: usize) -> Result<usize, BufferError> {
        self.check_codec_offset(offset, 2)?;
        Ok(self.store(offset, value.to_be_bytes()))
    }

    /// Writes an unsigned 16-bit little-endian integer.
    pub fn write_u16_le(&mut self, value: u16, offset: usize) -> Result<usize, BufferError> {
        self.check_codec_offset(offset, 2)?;
        Ok(self.store(offset, value.to_le_bytes()))
    }

    /// Writes a signed 16-bit big-endian integer.
    pub fn write_i16_be(&mut self, value: i16, offset: usize) -> Result<usize, BufferError> {
        self.check_codec_offset(offset, 2)?;
        Ok(self.store(offset, value.to_be_bytes()))
    }

    /// Writes a signed 16-bit little-endian integer.
    pub fn write_i16_le(&mut self, value: i16, offset: usize) -> Result<usize, BufferError> {
        self.check_codec_offset(offset, 2)?;
        Ok(self.store(offset, value.to_le_bytes()))
    }

    /// Writes an unsigned 24-bit big-endian integer.
    ///
    /// # Errors
    ///
    /// Returns a range error when `offset` leaves fewer than 3 bytes
    /// or `value` does not fit in 24 bits.
    pub fn write_u24_be(&mut self, value: u32, offset: usize) -> Result<usize, BufferError> {
        self.check_codec_offset(offset, 3)?;
        check_unsigned(value as u64, 24)?;
        let [_, a, b, c] = value.to_be_bytes();
        Ok(self.store(offset, [a, b, c]))
    }

    /// Writes an unsigned 24-bit little-endian integer.
    pub fn write_u24_le(&mut self, value: u32, offset: usize) -> Result<usize, BufferError> {
        self.check_codec_offset(offset, 3)?;
        check_unsigned(value as u64, 24)?;
        let [a, b, c, _] = value.to_le_bytes();
        Ok(self.store(offset, [a, b, c]))
    }

    /// Writes a signed 24-bit big-endian integer.
    ///
    /// `value` must lie in `[-2^23, 2^23 - 1]`.
    pub fn write_i24_be(&mut self, value: i32, offset: usize) -> Result<usize, BufferError> {
        self.check_codec_offset(offset, 3)?;
        check_signed(value as i64, 24)?;
        let [_, a, b, c] = value.to_be_bytes();
        Ok(self.store(offset, [a, b, c]))
    }

    /// Writes a signed 24-bit little-endian integer.
    pub fn write_i24_le(&mut self, value: i32, offset: usize) -> Result<usize, BufferError> {
        self.check_codec_offset(offset, 3)?;
        check_signed(value as i64, 24)?;
        let [a, b, c, _] = value.to_le_bytes();
        Ok(self.store(offset, [a, b, c]))
    }

    /// Writes an unsigned 32-bit big-endian integer.
    ///
    /// # Example
    ///
    /// ```
    /// use wirebuf::Buffer;
    ///
    /// let mut buf = Buffer::alloc(4)?;
    /// let next = buf.write_u32_be(0xDEAD_BEEF, 0)?;
    /// assert_eq!(next, 4);
    /// assert_eq!(buf.to_vec(), [0xDE, 0xAD, 0xBE, 0xEF]);
    /// # Ok::<(), wirebuf::BufferError>(())
    /// ```
    pub fn write_u32_be(&mut self, value: u32, offset: usize) -> Result<usize, BufferError> {
        self.check_codec_offset(offset, 4)?;
        Ok(self.store(offset, value.to_be_bytes()))
    }

    /// Writes an unsigned 32-bit little-endian integer.
    pub fn write_u32_le(&mut self, value: u32, offset: usize) -> Result<usize, BufferError> {
        self.check_codec_offset(offset, 4)?;
        Ok(self.store(offset, value.to_le_bytes()))
    }

    /// Writes a signed 32-bit big-endian integer.
    pub fn write_i32_be(&mut self, value: i32, offset: usize) -> Result<usize, BufferError> {
        self.check_codec_offset(offset, 4)?;
        Ok(self.store(offset, value.to_be_bytes()))
    }

    /// Writes a signed 32-bit little-endian integer.
    pub fn write_i32_le(&mut self, value: i32, offset: usize) -> Result<usize, BufferError> {
        self.check_codec_offset(offset, 4)?;
        Ok(self.store(offset, value.to_le_bytes()))
    }

    /// Writes an unsigned 40-bit big-endian integer.
    pub fn write_u40_be(&mut self, value: u64, offset: usize) -> Result<usize, BufferError> {
        self.check_codec_offset(offset, 5)?;
        check_unsigned(value, 40)?;
        let [_, _, _, a, b, c, d, e] = value.to_be_bytes();
        Ok(self.store(offset, [a, b, c, d, e]))
    }

    /// Writes an unsigned 40-bit little-endian integer.
    pub fn write_u40_le(&mut self, value: u64, offset: usize) -> Result<usize, BufferError> {
        self.check_codec_offset(offset, 5)?;
        check_unsigned(value, 40)?;
        let [a, b, c, d, e, _, _, _] = value.to_le_bytes();
        Ok(self.store(offset, [a, b, c, d, e]))
    }

    /// Writes a signed 40-bit big-endian integer.
    pub fn write_i40_be(&mut self, value: i64, offset: usize) -> Result<usize, BufferError> {
        self.check_codec_offset(offset, 5)?;
        check_signed(value, 40)?;
        let [_, _, _, a, b, c, d, e] = value.to_be_bytes();
        Ok(self.store(offset, [a, b, c, d, e]))
    }

    /// Writes a signed 40-bit little-endian integer.
    pub fn write_i40_le(&mut self, value: i64, offset: usize) -> Result<usize, BufferError> {
        self.check_codec_offset(offset, 5)?;
        check_signed(value, 40)?;
        let [a, b, c, d, e, _, _, _] = value.to_le_bytes();
        Ok(self.store(offset, [a, b, c, d, e]))
    }

    /// Writes an unsigned 48-bit big-endian integer.
    pub fn write_u48_be(&mut self, value: u64, offset: usize) -> Result<usize, BufferError> {
        self.check_codec_offset(offset, 6)?;
        check_unsigned(value, 48)?;
        let [_, _, a, b, c, d, e, f] = value.to_be_bytes();
        Ok(self.store(offset, [a, b, c, d, e, f]))
    }

    /// Writes an unsigned 48-bit little-endian integer.
    pub fn write_u48_le(&mut self, value: u64, offset: usize) -> Result<usize, BufferError> {
        self.check_codec_offset(offset, 6)?;
        check_unsigned(value, 48)?;
        let [a, b, c, d, e, f, _, _] = value.to_le_bytes();
        Ok(self.store(offset, [a, b, c, d, e, f]))
    }

    /// Writes a signed 48-bit big-endian integer.
    pub fn write_i48_be(&mut self, value: i64, offset: usize) -> Result<usize, BufferError> {
        self.check_codec_offset(offset, 6)?;
        check_signed(value, 48)?;
        let [_, _, a, b, c, d, e, f] = value.to_be_bytes();
        Ok(self.store(offset, [a, b, c, d, e, f]))
    }

    /// Writes a signed 48-bit little-endian integer.
    pub fn write_i48_le(&mut self, value: i64, offset: usize) -> Result<usize, BufferError> {
        self.check_codec_offset(offset, 6)?;
        check_signed(value, 48)?;
        let [a, b, c, d, e, f, _, _] = value.to_le_bytes();
        Ok(self.store(offset, [a, b, c, d, e, f]))
    }

    /// Writes an unsigned 64-bit big-endian integer.
    pub fn write_u64_be(&mut self, value: u64, offset: usize) -> Result<usize, BufferError> {
        self.check_codec_offset(offset, 8)?;
        Ok(self.store(offset, value.to_be_bytes()))
    }

    /// Writes an unsigned 64-bit little-endian integer.
    pub fn write_u64_le(&mut self, value: u64, offset: usize) -> Result<usize, BufferError> {
        self.check_codec_offset(offset, 8)?;
        Ok(self.store(offset, value.to_le_bytes()))
    }

    /// Writes a signed 64-bit big-endian integer.
    pub fn write_i64_be(&mut self, value: i64, offset: usize) -> Result<usize, BufferError> {
        self.check_codec_offset(offset, 8)?;
        Ok(self.store(offset, value.to_be_bytes()))
    }

    /// Writes a signed 64-bit little-endian integer.
    pub fn write_i64_le(&mut self, value: i64, offset: usize) -> Result<usize, BufferError> {
        self.check_codec_offset(offset, 8)?;
        Ok(self.store(offset, value.to_le_bytes()))
    }

    /// Writes a 32-bit big-endian IEEE-754 float.
    ///
    /// Any bit pattern is legal; NaN payloads survive the round trip.
    pub fn write_f32_be(&mut self, value: f32, offset: usize) -> Result<usize, BufferError> {
        self.check_codec_offset(offset, 4)?;
        Ok(self.store(offset, value.to_be_bytes()))
    }

    /// Writes a 32-bit little-endian IEEE-754 float.
    pub fn write_f32_le(&mut self, value: f32, offset: usize) -> Result<usize, BufferError> {
        self.check_codec_offset(offset, 4)?;
        Ok(self.store(offset, value.to_le_bytes()))
    }

    /// Writes a 64-bit big-endian IEEE-754 float.
    pub fn write_f64_be(&mut self, value: f64, offset: usize) -> Result<usize, BufferError> {
        self.check_codec_offset(offset, 8)?;
        Ok(self.store(offset, value.to_be_bytes()))
    }

    /// Writes a 64-bit little-endian IEEE-754 float.
    pub fn write_f64_le(&mut self, value: f64, offset: usize) -> Result<usize, BufferError> {
        self.check_codec_offset(offset, 8)?;
        Ok(self.store(offset, value.to_le_bytes()))
    }

    // ==== variable width ====

    /// Reads an unsigned big-endian integer of `byte_length` bytes,
    /// where `byte_length` is 1 through 6.
    ///
    /// # Example
    ///
    /// ```
    /// use wirebuf::Buffer;
    ///
    /// let mut buf = Buffer::alloc(3)?;
    /// buf.write_uint_be(0x0102_03, 0, 3)?;
    /// assert_eq!(buf.read_uint_be(0, 3)?, 0x0102_03);
    /// # Ok::<(), wirebuf::BufferError>(())
    /// ```
    pub fn read_uint_be(&self, offset: usize, byte_length: usize) -> Result<u64, BufferError> {
        check_byte_length(byte_length)?;
        match byte_length {
            1 => self.read_u8(offset).map(u64::from),
            2 => self.read_u16_be(offset).map(u64::from),
            3 => self.read_u24_be(offset).map(u64::from),
            4 => self.read_u32_be(offset).map(u64::from),
            5 => self.read_u40_be(offset),
            _ => self.read_u48_be(offset),
        }
    }

    /// Reads an unsigned little-endian integer of `byte_length` bytes.
    pub fn read_uint_le(&self, offset: usize, byte_length: usize) -> Result<u64, BufferError> {
        check_byte_length(byte_length)?;
        match byte_length {
            1 => self.read_u8(offset).map(u64::from),
            2 => self.read_u16_le(offset).map(u64::from),
            3 => self.read_u24_le(offset).map(u64::from),
            4 => self.read_u32_le(offset).map(u64::from),
            5 => self.read_u40_le(offset),
            _ => self.read_u48_le(offset),
        }
    }

    /// Reads a signed big-endian integer of `byte_length` bytes.
    pub fn read_int_be(&self, offset: usize, byte_length: usize) -> Result<i64, BufferError> {
        check_byte_length(byte_length)?;
        match byte_length {
            1 => self.read_i8(offset).map(i64::from),
            2 => self.read_i16_be(offset).map(i64::from),
            3 => self.read_i24_be(offset).map(i64::from),
            4 => self.read_i32_be(offset).map(i64::from),
            5 => self.read_i40_be(offset),
            _ => self.read_i48_be(offset),
        }
    }

    /// Reads a signed little-endian integer of `byte_length` bytes.
    pub fn read_int_le(&self, offset: usize, byte_length: usize) -> Result<i64, BufferError> {
        check_byte_length(byte_length)?;
        match byte_length {
            1 => self.read_i8(offset).map(i64::from),
            2 => self.read_i16_le(offset).map(i64::from),
            3 => self.read_i24_le(offset).map(i64::from),
            4 => self.read_i32_le(offset).map(i64::from),
            5 => self.read_i40_le(offset),
            _ => self.read_i48_le(offset),
        }
    }

    /// Writes an unsigned big-endian integer of `byte_length` bytes.
    ///
    /// # Errors
    ///
    /// Checks `byte_length` (1 through 6), then `offset`, then that
    /// `value` fits the width; the first violation is reported.
    pub fn write_uint_be(
        &mut self,
        value: u64,
        offset: usize,
        byte_length: usize,
    ) -> Result<usize, BufferError> {
        check_byte_length(byte_length)?;
        self.check_codec_offset(offset, byte_length)?;
        check_unsigned(value, 8 * byte_length as u32)?;
        let bytes = value.to_be_bytes();
        for (i, &byte) in bytes[8 - byte_length..].iter().enumerate() {
            self.put(offset + i, byte);
        }
        Ok(offset + byte_length)
    }

    /// Writes an unsigned little-endian integer of `byte_length` bytes.
    pub fn write_uint_le(
        &mut self,
        value: u64,
        offset: usize,
        byte_length: usize,
    ) -> Result<usize, BufferError> {
        check_byte_length(byte_length)?;
        self.check_codec_offset(offset, byte_length)?;
        check_unsigned(value, 8 * byte_length as u32)?;
        let bytes = value.to_le_bytes();
        for (i, &byte) in bytes[..byte_length].iter().enumerate() {
            self.put(offset + i, byte);
        }
        Ok(offset + byte_length)
    }

    /// Writes a signed big-endian integer of `byte_length` bytes in
    /// two's complement.
    pub fn write_int_be(
        &mut self,
        value: i64,
        offset: usize,
        byte_length: usize,
    ) -> Result<usize, BufferError> {
        check_byte_length(byte_length)?;
        self.check_codec_offset(offset, byte_length)?;
        check_signed(value, 8 * byte_length as u32)?;
        let bytes = value.to_be_bytes();
        for (i, &byte) in bytes[8 - byte_length..].iter().enumerate() {
            self.put(offset + i, byte);
        }
        Ok(offset + byte_length)
    }

    /// Writes a signed little-endian integer of `byte_length` bytes in
    /// two's complement.
    pub fn write_int_le(
        &mut self,
        value: i64,
        offset: usize,
        byte_length: usize,
    ) -> Result<usize, BufferError> {
        check_byte_length(byte_length)?;
        self.check_codec_offset(offset, byte_length)?;
        check_signed(value, 8 * byte_length as u32)?;
        let bytes = value.to_le_bytes();
        for (i, &byte) in bytes[..byte_length].iter().enumerate() {
            self.put(offset + i, byte);
        }
        Ok(offset + byte_length)
    }
}

fn check_byte_length(byte_length: usize) -> Result<(), BufferError> {
    if !(1..=6).contains(&byte_length) {
        return Err(BufferError::range("byteLength", 1, 6, byte_length as i128));
    }
    Ok(())
}

fn check_unsigned(value: u64, bits: u32) -> Result<(), BufferError> {
    let max = (1u64 << bits) - 1;
    if value > max {
        return Err(BufferError::range("value", 0, max as i128, value as i128));
    }
    Ok(())
}

fn check_signed(value: i64, bits: u32) -> Result<(), BufferError> {
    let min = -(1i64 << (bits - 1));
    let max = (1i64 << (bits - 1)) - 1;
    if value < min || value > max {
        return Err(BufferError::range("value", min as i128, max as i128, value as i128));
    }
    Ok(())
}

fn sign_extend_32(raw: u32, bits: u32) -> i32 {
    let shift = 32 - bits;
    ((raw << shift) as i32) >> shift
}

fn sign_extend_64(raw: u64, bits: u32) -> i64 {
    let shift = 64 - bits;
    ((raw << shift) as i64) >> shift
}
