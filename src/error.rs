//! Error types for the gamewire serialization core

use thiserror::Error;

/// Errors that can occur while writing or reading a message
///
/// Every variant is recoverable by the caller: a failed call leaves the
/// writer's valid bytes and the reader's cursor where they were. The caller
/// is expected to drop that message.
/// Integration mistakes (an unregistered type reaching the registry) are
/// panics, not variants here.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Read would run past the end of the supplied bytes
    #[error("end of stream: needed {needed} bytes at position {position}, {remaining} remaining")]
    EndOfStream {
        /// Cursor position when the read was attempted
        position: usize,
        /// Bytes the read required
        needed: usize,
        /// Bytes left after the cursor
        remaining: usize,
    },
    /// String payload exceeds the configured maximum
    #[error("string of {len} bytes exceeds the maximum of {max} bytes")]
    StringTooLong {
        /// UTF-8 byte length of the payload
        len: usize,
        /// Configured maximum
        max: usize,
    },
    /// Byte buffer cannot be described by the 4-byte biased size prefix
    #[error("byte buffer of {len} bytes is too large for a 4-byte size prefix")]
    BufferTooLong {
        /// Buffer length in bytes
        len: usize,
    },
    /// Collection holds more elements than a signed 4-byte count allows
    #[error("collection of {len} elements is too large for a 4-byte count")]
    CollectionTooLong {
        /// Element count
        len: usize,
    },
    /// Decoded collection count is negative but not the null marker
    #[error("invalid collection count {0}")]
    InvalidCount(i32),
    /// A null marker was decoded where a value is required
    #[error("unexpected null value")]
    UnexpectedNull,
    /// String payload is not valid UTF-8
    #[error("string payload is not valid UTF-8")]
    InvalidUtf8,
    /// Character does not fit in a single 16-bit code unit
    #[error("character U+{0:04X} does not fit in a 16-bit code unit")]
    CharOutOfRange(u32),
    /// Decoded 16-bit code unit is a lone surrogate
    #[error("code unit 0x{0:04X} is not a valid character")]
    InvalidChar(u16),
    /// URI text could not be parsed
    #[error("invalid URI: {0}")]
    InvalidUri(String),
    /// Offset and count select bytes outside the source slice
    #[error("range {offset}+{count} is outside a source of {len} elements")]
    InvalidRange {
        /// Start offset
        offset: usize,
        /// Element count
        count: usize,
        /// Source length
        len: usize,
    },
    /// Cursor set past a reader's bytes or a writer's capacity
    #[error("position {position} is beyond the end of a {len}-byte buffer")]
    InvalidPosition {
        /// Requested position
        position: usize,
        /// Reader length or writer capacity
        len: usize,
    },
}

impl Error {
    /// Returns true if the error was caused by truncated or exhausted input
    #[inline]
    pub const fn is_end_of_stream(&self) -> bool {
        matches!(self, Error::EndOfStream { .. })
    }
}

/// Result type alias for gamewire operations
pub type Result<T> = core::result::Result<T, Error>;
