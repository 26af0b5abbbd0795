//! Growable write buffer
//!
//! The writer owns its storage and appends encoded values at a cursor.
//! `position` is the next write offset and `len` the high-water mark of valid
//! bytes; capacity grows by doubling so appends stay amortized O(1). A writer
//! is meant to be reset and reused for many messages.

use core::fmt;

use crate::config::Limits;
use crate::error::{Error, Result};
use crate::primitives::{self, Decimal, FixedLayout};

/// Growable byte buffer that values are encoded into
#[derive(Debug, Clone)]
pub struct Writer {
    /// `buf.len()` is the valid length, `buf.capacity()` the capacity
    buf: Vec<u8>,
    pos: usize,
    limits: Limits,
}

impl Default for Writer {
    fn default() -> Self {
        Self::new()
    }
}

impl Writer {
    /// Create a writer with the default limits
    #[inline]
    pub fn new() -> Self {
        Self::with_limits(Limits::default())
    }

    /// Create a writer with at least `capacity` bytes preallocated
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_limits(Limits::default().with_initial_capacity(capacity))
    }

    /// Create a writer with the given limits
    pub fn with_limits(limits: Limits) -> Self {
        Self {
            buf: Vec::with_capacity(limits.initial_capacity),
            pos: 0,
            limits,
        }
    }

    /// Limits this writer enforces
    #[inline]
    pub fn limits(&self) -> &Limits {
        &self.limits
    }

    /// Next write offset
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Move the write cursor
    ///
    /// The cursor may run ahead of [`len`](Self::len), up to
    /// [`capacity`](Self::capacity); the next write zero-fills the gap. Call
    /// [`ensure_capacity`](Self::ensure_capacity) first to go further.
    #[inline]
    pub fn set_position(&mut self, position: usize) -> Result<()> {
        let capacity = self.buf.capacity();
        if position > capacity {
            return Err(Error::InvalidPosition {
                position,
                len: capacity,
            });
        }
        self.pos = position;
        Ok(())
    }

    /// Number of valid bytes
    #[inline]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Whether no bytes have been written
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Bytes the storage can hold without reallocating
    #[inline]
    pub fn capacity(&self) -> usize {
        self.buf.capacity()
    }

    /// Make room for at least `n` bytes from offset 0
    ///
    /// Capacity doubles, or jumps straight to `n` when doubling is not enough.
    pub fn ensure_capacity(&mut self, n: usize) {
        let capacity = self.buf.capacity();
        if n <= capacity {
            return;
        }
        let target = capacity.saturating_mul(2).max(n);
        tracing::trace!(from = capacity, to = target, "growing writer storage");
        self.buf.reserve_exact(target - self.buf.len());
    }

    /// Move the valid-data marker to `n`
    ///
    /// Growing zero-fills `[len, n)`. A cursor beyond `n` is pulled back to `n`.
    pub fn set_length(&mut self, n: usize) {
        if n > self.buf.len() {
            self.ensure_capacity(n);
            self.buf.resize(n, 0);
        } else {
            self.buf.truncate(n);
        }
        self.pos = self.pos.min(n);
    }

    /// Remember the cursor, the valid length and the bytes from the cursor
    /// to the end, so a failed multi-part write can be undone
    pub(crate) fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            pos: self.pos,
            len: self.buf.len(),
            tail: self.buf.get(self.pos..).map(<[u8]>::to_vec).unwrap_or_default(),
        }
    }

    /// Undo everything written since `checkpoint`
    pub(crate) fn rollback(&mut self, checkpoint: Checkpoint) {
        self.buf.resize(checkpoint.len, 0);
        if let Some(overwritten) = self.buf.get_mut(checkpoint.pos..) {
            overwritten.copy_from_slice(&checkpoint.tail);
        }
        self.pos = checkpoint.pos;
    }

    /// Make `[pos, pos + width)` writable and return its end
    ///
    /// `pos` never exceeds the capacity, which a `Vec` keeps below
    /// `isize::MAX`, so the sum cannot overflow.
    #[inline]
    fn reserve_at_cursor(&mut self, width: usize) -> usize {
        let end = self.pos + width;
        if end > self.buf.len() {
            self.set_length(end);
        }
        end
    }

    /// Append raw bytes without a length prefix
    #[inline]
    pub fn write_raw(&mut self, bytes: &[u8]) {
        let end = self.reserve_at_cursor(bytes.len());
        self.buf[self.pos..end].copy_from_slice(bytes);
        self.pos = end;
    }

    /// Append `count` bytes of `bytes` starting at `offset`
    pub fn write_raw_range(&mut self, bytes: &[u8], offset: usize, count: usize) -> Result<()> {
        let range = offset
            .checked_add(count)
            .filter(|&end| end <= bytes.len())
            .map(|end| offset..end)
            .ok_or(Error::InvalidRange {
                offset,
                count,
                len: bytes.len(),
            })?;
        self.write_raw(&bytes[range]);
        Ok(())
    }

    /// Append any fixed-layout value
    #[inline]
    pub fn write_fixed<T: FixedLayout>(&mut self, value: T) {
        let end = self.reserve_at_cursor(T::SIZE);
        value.put(&mut self.buf[self.pos..end]);
        self.pos = end;
    }

    /// Write a u8 value
    #[inline]
    pub fn write_u8(&mut self, value: u8) {
        self.write_fixed(value);
    }

    /// Write an i8 value
    #[inline]
    pub fn write_i8(&mut self, value: i8) {
        self.write_fixed(value);
    }

    /// Write a u16 value (little-endian)
    #[inline]
    pub fn write_u16(&mut self, value: u16) {
        self.write_fixed(value);
    }

    /// Write an i16 value (little-endian)
    #[inline]
    pub fn write_i16(&mut self, value: i16) {
        self.write_fixed(value);
    }

    /// Write a u32 value (little-endian)
    #[inline]
    pub fn write_u32(&mut self, value: u32) {
        self.write_fixed(value);
    }

    /// Write an i32 value (little-endian)
    #[inline]
    pub fn write_i32(&mut self, value: i32) {
        self.write_fixed(value);
    }

    /// Write a u64 value (little-endian)
    #[inline]
    pub fn write_u64(&mut self, value: u64) {
        self.write_fixed(value);
    }

    /// Write an i64 value (little-endian)
    #[inline]
    pub fn write_i64(&mut self, value: i64) {
        self.write_fixed(value);
    }

    /// Write an f32 value (little-endian IEEE 754)
    #[inline]
    pub fn write_f32(&mut self, value: f32) {
        self.write_fixed(value);
    }

    /// Write an f64 value (little-endian IEEE 754)
    #[inline]
    pub fn write_f64(&mut self, value: f64) {
        self.write_fixed(value);
    }

    /// Write a bool as one byte, 1 or 0
    #[inline]
    pub fn write_bool(&mut self, value: bool) {
        self.write_fixed(value);
    }

    /// Write a 16-byte decimal
    #[inline]
    pub fn write_decimal(&mut self, value: Decimal) {
        self.write_fixed(value);
    }

    /// Write a character as one 16-bit code unit
    ///
    /// Fails without writing if the character needs a surrogate pair.
    #[inline]
    pub fn write_char(&mut self, value: char) -> Result<()> {
        let unit = primitives::char_to_unit(value)?;
        self.write_u16(unit);
        Ok(())
    }

    /// Write an optional fixed-layout value as a presence byte plus the value
    pub fn write_nullable<T: FixedLayout>(&mut self, value: Option<T>) {
        match value {
            Some(value) => {
                self.write_bool(true);
                self.write_fixed(value);
            }
            None => self.write_bool(false),
        }
    }

    /// Zero-copy view of the valid bytes
    #[inline]
    pub fn as_slice(&self) -> &[u8] {
        &self.buf
    }

    /// Copy of the valid bytes
    #[inline]
    pub fn to_bytes(&self) -> Vec<u8> {
        self.buf.clone()
    }

    /// Consume the writer and return its valid bytes
    #[inline]
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    /// Reset for reuse; capacity is kept
    #[inline]
    pub fn reset(&mut self) {
        self.buf.clear();
        self.pos = 0;
    }
}

/// Writer state saved by [`Writer::checkpoint`]
pub(crate) struct Checkpoint {
    pos: usize,
    len: usize,
    tail: Vec<u8>,
}

impl fmt::Display for Writer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{} @ {}/{}]",
            hex::encode(&self.buf),
            self.pos,
            self.buf.len()
        )
    }
}
