//! Bit-exact encoding of fixed-width values
//!
//! Every multi-byte value is written least-significant byte first, whatever
//! the host byte order. Composite value types are the concatenation of their
//! fields in declaration order with no padding.

use crate::error::{Error, Result};

/// A value whose encoding has a fixed size and needs no length prefix
///
/// `put` and `get` always receive a slice of exactly [`SIZE`](Self::SIZE)
/// bytes; the writer and reader do the bounds work.
pub trait FixedLayout: Copy {
    /// Encoded width in bytes
    const SIZE: usize;

    /// Encode into `out`, which is exactly `SIZE` bytes long
    fn put(&self, out: &mut [u8]);

    /// Decode from `src`, which is exactly `SIZE` bytes long
    fn get(src: &[u8]) -> Self;
}

macro_rules! impl_fixed_le {
    ($($t:ty),* $(,)?) => {
        $(
            impl FixedLayout for $t {
                const SIZE: usize = core::mem::size_of::<$t>();

                #[inline]
                fn put(&self, out: &mut [u8]) {
                    out.copy_from_slice(&self.to_le_bytes());
                }

                #[inline]
                fn get(src: &[u8]) -> Self {
                    let mut bytes = [0u8; core::mem::size_of::<$t>()];
                    bytes.copy_from_slice(src);
                    <$t>::from_le_bytes(bytes)
                }
            }
        )*
    };
}

impl_fixed_le! { u8, i8, u16, i16, u32, i32, u64, i64, f32, f64 }

impl FixedLayout for bool {
    const SIZE: usize = 1;

    #[inline]
    fn put(&self, out: &mut [u8]) {
        out[0] = u8::from(*self);
    }

    #[inline]
    fn get(src: &[u8]) -> Self {
        src[0] != 0
    }
}

/// 128-bit decimal in its 16-byte native layout
///
/// Field order is `flags`, `hi`, `lo`: the flags word carries the scale in
/// bits 16..24 and the sign in bit 31, and the 96-bit mantissa is split into
/// the high 32 bits and the low 64 bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Decimal {
    /// Scale and sign word
    pub flags: u32,
    /// High 32 bits of the mantissa
    pub hi: u32,
    /// Low 64 bits of the mantissa
    pub lo: u64,
}

impl Decimal {
    const SIGN_MASK: u32 = 0x8000_0000;
    const SCALE_SHIFT: u32 = 16;

    /// Largest scale a decimal may carry
    pub const MAX_SCALE: u8 = 28;

    /// Build a decimal from a 96-bit mantissa, a sign and a scale
    ///
    /// Mantissa bits above 96 are discarded; the scale is capped at
    /// [`MAX_SCALE`](Self::MAX_SCALE).
    pub fn from_parts(mantissa: u128, negative: bool, scale: u8) -> Self {
        let scale = u32::from(scale.min(Self::MAX_SCALE));
        let mut flags = scale << Self::SCALE_SHIFT;
        if negative {
            flags |= Self::SIGN_MASK;
        }
        Self {
            flags,
            hi: (mantissa >> 64) as u32,
            lo: mantissa as u64,
        }
    }

    /// The 96-bit unsigned mantissa
    #[inline]
    pub fn mantissa(&self) -> u128 {
        (u128::from(self.hi) << 64) | u128::from(self.lo)
    }

    /// Power of ten the mantissa is divided by
    #[inline]
    pub fn scale(&self) -> u8 {
        ((self.flags >> Self::SCALE_SHIFT) & 0xFF) as u8
    }

    /// Whether the sign bit is set
    #[inline]
    pub fn is_negative(&self) -> bool {
        self.flags & Self::SIGN_MASK != 0
    }
}

impl FixedLayout for Decimal {
    const SIZE: usize = 16;

    #[inline]
    fn put(&self, out: &mut [u8]) {
        self.flags.put(&mut out[0..4]);
        self.hi.put(&mut out[4..8]);
        self.lo.put(&mut out[8..16]);
    }

    #[inline]
    fn get(src: &[u8]) -> Self {
        Self {
            flags: u32::get(&src[0..4]),
            hi: u32::get(&src[4..8]),
            lo: u64::get(&src[8..16]),
        }
    }
}

/// Encode a character as a single 16-bit code unit
///
/// Characters outside the Basic Multilingual Plane need two code units and
/// are rejected.
#[inline]
pub fn char_to_unit(c: char) -> Result<u16> {
    u16::try_from(u32::from(c)).map_err(|_| Error::CharOutOfRange(u32::from(c)))
}

/// Decode a 16-bit code unit, rejecting lone surrogates
#[inline]
pub fn unit_to_char(unit: u16) -> Result<char> {
    char::from_u32(u32::from(unit)).ok_or(Error::InvalidChar(unit))
}
