//! Bounded read cursor over borrowed bytes
//!
//! The reader never copies or owns the bytes it decodes. Every read checks
//! the remaining length first; a failed read leaves the cursor untouched.

use core::fmt;

use crate::config::Limits;
use crate::error::{Error, Result};
use crate::primitives::{self, Decimal, FixedLayout};

/// Cursor for decoding values from a byte slice
#[derive(Debug, Clone)]
pub struct Reader<'a> {
    buf: &'a [u8],
    pos: usize,
    limits: Limits,
}

impl<'a> Reader<'a> {
    /// Create a reader over the whole slice with the default limits
    #[inline]
    pub fn new(buf: &'a [u8]) -> Self {
        Self::with_limits(buf, Limits::default())
    }

    /// Create a reader with the given limits
    #[inline]
    pub fn with_limits(buf: &'a [u8], limits: Limits) -> Self {
        Self { buf, pos: 0, limits }
    }

    /// Create a reader over `count` bytes of `bytes` starting at `offset`
    #[inline]
    pub fn from_range(bytes: &'a [u8], offset: usize, count: usize) -> Result<Self> {
        Self::from_range_with_limits(bytes, offset, count, Limits::default())
    }

    /// Like [`from_range`](Self::from_range), enforcing `limits` instead of the defaults
    pub fn from_range_with_limits(
        bytes: &'a [u8],
        offset: usize,
        count: usize,
        limits: Limits,
    ) -> Result<Self> {
        let end = offset
            .checked_add(count)
            .filter(|&end| end <= bytes.len())
            .ok_or(Error::InvalidRange {
                offset,
                count,
                len: bytes.len(),
            })?;
        Ok(Self::with_limits(&bytes[offset..end], limits))
    }

    /// Point the reader at new bytes and rewind it
    #[inline]
    pub fn set_buffer(&mut self, buf: &'a [u8]) {
        self.buf = buf;
        self.pos = 0;
    }

    /// Limits this reader enforces
    #[inline]
    pub fn limits(&self) -> &Limits {
        &self.limits
    }

    /// Current read position
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Move the cursor; it may not pass the end of the bytes
    #[inline]
    pub fn set_position(&mut self, position: usize) -> Result<()> {
        if position > self.buf.len() {
            return Err(Error::InvalidPosition {
                position,
                len: self.buf.len(),
            });
        }
        self.pos = position;
        Ok(())
    }

    /// Total number of bytes in view
    #[inline]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Whether the view holds no bytes at all
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Get remaining bytes after the cursor
    #[inline]
    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    /// Check if cursor is at end
    #[inline]
    pub fn is_at_end(&self) -> bool {
        self.pos >= self.buf.len()
    }

    #[inline]
    fn check(&self, needed: usize) -> Result<usize> {
        let remaining = self.remaining();
        if needed > remaining {
            return Err(Error::EndOfStream {
                position: self.pos,
                needed,
                remaining,
            });
        }
        Ok(self.pos + needed)
    }

    /// Skip bytes in the cursor
    #[inline]
    pub fn skip(&mut self, n: usize) -> Result<()> {
        self.pos = self.check(n)?;
        Ok(())
    }

    /// Read the next `count` bytes as a borrowed slice
    #[inline]
    pub fn read_raw(&mut self, count: usize) -> Result<&'a [u8]> {
        let end = self.check(count)?;
        let bytes = &self.buf[self.pos..end];
        self.pos = end;
        Ok(bytes)
    }

    /// Peek at bytes without advancing cursor
    #[inline]
    pub fn peek_raw(&self, count: usize) -> Result<&'a [u8]> {
        let end = self.check(count)?;
        Ok(&self.buf[self.pos..end])
    }

    /// Read any fixed-layout value
    #[inline]
    pub fn read_fixed<T: FixedLayout>(&mut self) -> Result<T> {
        self.read_raw(T::SIZE).map(T::get)
    }

    /// Read a u8 value
    #[inline]
    pub fn read_u8(&mut self) -> Result<u8> {
        self.read_fixed()
    }

    /// Read an i8 value
    #[inline]
    pub fn read_i8(&mut self) -> Result<i8> {
        self.read_fixed()
    }

    /// Read a u16 value (little-endian)
    #[inline]
    pub fn read_u16(&mut self) -> Result<u16> {
        self.read_fixed()
    }

    /// Read an i16 value (little-endian)
    #[inline]
    pub fn read_i16(&mut self) -> Result<i16> {
        self.read_fixed()
    }

    /// Read a u32 value (little-endian)
    #[inline]
    pub fn read_u32(&mut self) -> Result<u32> {
        self.read_fixed()
    }

    /// Read an i32 value (little-endian)
    #[inline]
    pub fn read_i32(&mut self) -> Result<i32> {
        self.read_fixed()
    }

    /// Read a u64 value (little-endian)
    #[inline]
    pub fn read_u64(&mut self) -> Result<u64> {
        self.read_fixed()
    }

    /// Read an i64 value (little-endian)
    #[inline]
    pub fn read_i64(&mut self) -> Result<i64> {
        self.read_fixed()
    }

    /// Read an f32 value
    #[inline]
    pub fn read_f32(&mut self) -> Result<f32> {
        self.read_fixed()
    }

    /// Read an f64 value
    #[inline]
    pub fn read_f64(&mut self) -> Result<f64> {
        self.read_fixed()
    }

    /// Read a bool; any nonzero byte is true
    #[inline]
    pub fn read_bool(&mut self) -> Result<bool> {
        self.read_fixed()
    }

    /// Read a 16-byte decimal
    #[inline]
    pub fn read_decimal(&mut self) -> Result<Decimal> {
        self.read_fixed()
    }

    /// Read a character stored as one 16-bit code unit
    ///
    /// A lone surrogate is rejected and the cursor is left before it.
    pub fn read_char(&mut self) -> Result<char> {
        let unit = u16::get(self.peek_raw(2)?);
        let c = primitives::unit_to_char(unit)?;
        self.pos += 2;
        Ok(c)
    }

    /// Read an optional value written with
    /// [`Writer::write_nullable`](crate::Writer::write_nullable)
    pub fn read_nullable<T: FixedLayout>(&mut self) -> Result<Option<T>> {
        let start = self.pos;
        if !self.read_bool()? {
            return Ok(None);
        }
        match self.read_fixed() {
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                self.pos = start;
                Err(e)
            }
        }
    }
}

impl fmt::Display for Reader<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{} @ {}/{}]",
            hex::encode(self.buf),
            self.pos,
            self.buf.len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::writer::Writer;

    #[test]
    fn test_reader_basic() {
        let mut writer = Writer::new();
        writer.write_u64(1_000_000_000);
        writer.write_i64(-50_000_000);
        writer.write_u32(100);
        writer.write_bool(true);
        writer.write_f32(1.5);

        let bytes = writer.to_bytes();
        let mut reader = Reader::new(&bytes);
        assert_eq!(reader.read_u64().unwrap(), 1_000_000_000);
        assert_eq!(reader.read_i64().unwrap(), -50_000_000);
        assert_eq!(reader.read_u32().unwrap(), 100);
        assert!(reader.read_bool().unwrap());
        assert_eq!(reader.read_f32().unwrap(), 1.5);
        assert!(reader.is_at_end());
    }

    #[test]
    fn test_reader_cursor_operations() {
        let data = [1, 2, 3, 4, 5, 6, 7, 8];
        let mut reader = Reader::new(&data);

        assert_eq!(reader.remaining(), 8);
        assert!(!reader.is_at_end());

        assert_eq!(reader.read_u16().unwrap(), 0x0201); // little-endian
        assert_eq!(reader.remaining(), 6);

        reader.skip(2).unwrap();
        assert_eq!(reader.remaining(), 4);

        let peeked = reader.peek_raw(2).unwrap();
        assert_eq!(peeked, &[5, 6]);
        assert_eq!(reader.remaining(), 4); // peek doesn't advance

        assert_eq!(reader.read_u32().unwrap(), 0x0807_0605); // little-endian
        assert!(reader.is_at_end());
    }

    #[test]
    fn test_reader_bounds() {
        let data = [1u8, 2, 3];
        let mut reader = Reader::new(&data);

        assert_eq!(
            reader.read_u32(),
            Err(Error::EndOfStream {
                position: 0,
                needed: 4,
                remaining: 3
            })
        );
        // The failed read did not move the cursor
        assert_eq!(reader.position(), 0);
        assert_eq!(reader.read_u16().unwrap(), 0x0201);
        assert!(reader.read_u16().unwrap_err().is_end_of_stream());
        assert_eq!(reader.read_u8().unwrap(), 3);
        assert!(reader.skip(1).is_err());
        assert!(reader.peek_raw(1).is_err());
    }

    #[test]
    fn test_reader_from_range() {
        let data = [9u8, 9, 0x04, 0x03, 0x02, 0x01, 9];
        let mut reader = Reader::from_range(&data, 2, 4).unwrap();
        assert_eq!(reader.len(), 4);
        assert_eq!(reader.read_u32().unwrap(), 0x0102_0304);
        // The trailing byte outside the range is never visible
        assert!(reader.read_u8().is_err());

        assert!(matches!(
            Reader::from_range(&data, 5, 3),
            Err(Error::InvalidRange { .. })
        ));
    }

    #[test]
    fn test_reader_from_range_with_limits() {
        let data = [0xFF, 5, 0, b'a', b'b', b'c', b'd'];
        let limits = Limits::new().with_max_string_length(3);

        let mut reader = Reader::from_range_with_limits(&data, 1, 6, limits).unwrap();
        assert_eq!(reader.limits().max_string_length, 3);
        assert_eq!(
            reader.read_str(),
            Err(Error::StringTooLong { len: 4, max: 3 })
        );
        assert_eq!(reader.position(), 0);

        // The same range under default limits decodes
        let mut reader = Reader::from_range(&data, 1, 6).unwrap();
        assert_eq!(reader.read_str().unwrap(), Some("abcd"));

        assert!(matches!(
            Reader::from_range_with_limits(&data, 4, 6, limits),
            Err(Error::InvalidRange { .. })
        ));
    }

    #[test]
    fn test_reader_set_position_and_buffer() {
        let first = [1u8, 2];
        let second = [3u8];
        let mut reader = Reader::new(&first);

        reader.set_position(2).unwrap();
        assert!(reader.is_at_end());
        assert_eq!(
            reader.set_position(3),
            Err(Error::InvalidPosition { position: 3, len: 2 })
        );

        reader.set_buffer(&second);
        assert_eq!(reader.position(), 0);
        assert_eq!(reader.read_u8().unwrap(), 3);
    }

    #[test]
    fn test_read_char() {
        let mut reader = Reader::new(&[0x41, 0x00, 0x00, 0xD8]);
        assert_eq!(reader.read_char().unwrap(), 'A');
        assert_eq!(reader.read_char(), Err(Error::InvalidChar(0xD800)));
        assert_eq!(reader.position(), 2);
    }

    #[test]
    fn test_read_nullable() {
        let mut reader = Reader::new(&[1, 7, 0, 0, 1, 5]);
        assert_eq!(reader.read_nullable::<u16>().unwrap(), Some(7));
        assert_eq!(reader.read_nullable::<u16>().unwrap(), None);
        // Presence byte says a value follows but only one byte is left
        assert!(reader.read_nullable::<u16>().is_err());
        assert_eq!(reader.position(), 4);
    }

    #[test]
    fn test_reader_display() {
        let data = [0xAB, 0xCD];
        let mut reader = Reader::new(&data);
        reader.read_u8().unwrap();
        assert_eq!(reader.to_string(), "[abcd @ 1/2]");
    }
}
