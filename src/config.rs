//! Tunable limits shared by writers and readers

use crate::{DEFAULT_CAPACITY, MAX_ENCODABLE_STRING_LENGTH, MAX_STRING_LENGTH};

/// Size limits applied by [`Writer`](crate::Writer) and [`Reader`](crate::Reader)
///
/// Both ends of a connection should use the same `max_string_length`,
/// otherwise a string accepted by the sender can be rejected by the receiver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Limits {
    /// Capacity a new writer allocates up front
    pub initial_capacity: usize,
    /// Largest UTF-8 byte length accepted for a string, on write and on read
    pub max_string_length: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            initial_capacity: DEFAULT_CAPACITY,
            max_string_length: MAX_STRING_LENGTH,
        }
    }
}

impl Limits {
    /// Create limits with the crate defaults
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the initial writer capacity
    #[inline]
    pub fn with_initial_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = capacity;
        self
    }

    /// Set the string length cap
    ///
    /// Values above [`MAX_ENCODABLE_STRING_LENGTH`] cannot be carried by the
    /// 2-byte biased prefix and are clamped.
    pub fn with_max_string_length(mut self, max: usize) -> Self {
        if max > MAX_ENCODABLE_STRING_LENGTH {
            tracing::warn!(
                requested = max,
                clamped = MAX_ENCODABLE_STRING_LENGTH,
                "string length cap exceeds what the prefix can encode"
            );
        }
        self.max_string_length = max.min(MAX_ENCODABLE_STRING_LENGTH);
        self
    }

    /// Effective string cap, never above what the prefix can encode
    #[inline]
    pub(crate) fn string_cap(&self) -> usize {
        self.max_string_length.min(MAX_ENCODABLE_STRING_LENGTH)
    }
}
