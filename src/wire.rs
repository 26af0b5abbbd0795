//! Compile-time dispatch: "write a value of type T"
//!
//! Every type the crate knows how to encode implements [`Wire`], so generic
//! code such as [`Writer::write_list`] resolves the element codec statically.
//! User structs implement it by hand, by composing the impls of their
//! fields, or through [`fixed_layout!`](crate::fixed_layout).
//!
//! Nullable forms are spelled out per type because each has its own null
//! marker: `Option<String>` uses the zero string count, `Option<Vec<T>>` the
//! -1 list count and `Option<NetId>` the zero id.

use uuid::Uuid;

use crate::error::{Error, Result};
use crate::netid::NetId;
use crate::primitives::Decimal;
use crate::reader::Reader;
use crate::uri::Uri;
use crate::writer::Writer;

/// A type with a fixed encode/decode pair
pub trait Wire: Sized {
    /// Append the encoding of `self`
    fn write_to(&self, writer: &mut Writer) -> Result<()>;

    /// Decode a value at the reader's cursor
    fn read_from(reader: &mut Reader<'_>) -> Result<Self>;
}

macro_rules! impl_wire_fixed {
    ($($t:ty),* $(,)?) => {
        $(
            impl Wire for $t {
                #[inline]
                fn write_to(&self, writer: &mut Writer) -> Result<()> {
                    writer.write_fixed(*self);
                    Ok(())
                }

                #[inline]
                fn read_from(reader: &mut Reader<'_>) -> Result<Self> {
                    reader.read_fixed()
                }
            }
        )*
    };
}

impl_wire_fixed! { u8, i8, u16, i16, u32, i32, u64, i64, f32, f64, bool, Decimal }

impl Wire for char {
    #[inline]
    fn write_to(&self, writer: &mut Writer) -> Result<()> {
        writer.write_char(*self)
    }

    #[inline]
    fn read_from(reader: &mut Reader<'_>) -> Result<Self> {
        reader.read_char()
    }
}

impl Wire for String {
    #[inline]
    fn write_to(&self, writer: &mut Writer) -> Result<()> {
        writer.write_str(self)
    }

    fn read_from(reader: &mut Reader<'_>) -> Result<Self> {
        reader.read_string()?.ok_or(Error::UnexpectedNull)
    }
}

impl Wire for Option<String> {
    #[inline]
    fn write_to(&self, writer: &mut Writer) -> Result<()> {
        writer.write_string(self.as_deref())
    }

    #[inline]
    fn read_from(reader: &mut Reader<'_>) -> Result<Self> {
        reader.read_string()
    }
}

impl<T: Wire> Wire for Vec<T> {
    #[inline]
    fn write_to(&self, writer: &mut Writer) -> Result<()> {
        writer.write_list(Some(self.as_slice()))
    }

    fn read_from(reader: &mut Reader<'_>) -> Result<Self> {
        reader.read_list()?.ok_or(Error::UnexpectedNull)
    }
}

impl<T: Wire> Wire for Option<Vec<T>> {
    #[inline]
    fn write_to(&self, writer: &mut Writer) -> Result<()> {
        writer.write_list(self.as_deref())
    }

    #[inline]
    fn read_from(reader: &mut Reader<'_>) -> Result<Self> {
        reader.read_list()
    }
}

impl Wire for Uuid {
    #[inline]
    fn write_to(&self, writer: &mut Writer) -> Result<()> {
        writer.write_guid(self);
        Ok(())
    }

    #[inline]
    fn read_from(reader: &mut Reader<'_>) -> Result<Self> {
        reader.read_guid()
    }
}

impl Wire for Uri {
    #[inline]
    fn write_to(&self, writer: &mut Writer) -> Result<()> {
        writer.write_uri(Some(self))
    }

    fn read_from(reader: &mut Reader<'_>) -> Result<Self> {
        reader.read_uri()?.ok_or(Error::UnexpectedNull)
    }
}

impl Wire for Option<Uri> {
    #[inline]
    fn write_to(&self, writer: &mut Writer) -> Result<()> {
        writer.write_uri(self.as_ref())
    }

    #[inline]
    fn read_from(reader: &mut Reader<'_>) -> Result<Self> {
        reader.read_uri()
    }
}

impl Wire for Option<NetId> {
    #[inline]
    fn write_to(&self, writer: &mut Writer) -> Result<()> {
        writer.write_net_id(*self);
        Ok(())
    }

    #[inline]
    fn read_from(reader: &mut Reader<'_>) -> Result<Self> {
        reader.read_net_id()
    }
}

impl Writer {
    /// Write any [`Wire`] value
    #[inline]
    pub fn write<T: Wire>(&mut self, value: &T) -> Result<()> {
        value.write_to(self)
    }
}

impl Reader<'_> {
    /// Read any [`Wire`] value
    #[inline]
    pub fn read<T: Wire>(&mut self) -> Result<T> {
        T::read_from(self)
    }
}
