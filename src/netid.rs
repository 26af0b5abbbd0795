//! References to networked entities
//!
//! A reference to a spawned object goes on the wire as its 4-byte network
//! id instead of the object itself. Id 0 is reserved for "no object".

use core::fmt;
use core::num::NonZeroU32;

use crate::error::Result;
use crate::reader::Reader;
use crate::writer::Writer;

/// Identifier of a spawned networked entity; never 0
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NetId(NonZeroU32);

impl NetId {
    /// Wrap a raw id; 0 yields `None`
    #[inline]
    pub const fn new(raw: u32) -> Option<Self> {
        match NonZeroU32::new(raw) {
            Some(id) => Some(Self(id)),
            None => None,
        }
    }

    /// Raw wire value
    #[inline]
    pub const fn get(self) -> u32 {
        self.0.get()
    }
}

impl fmt::Display for NetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl Writer {
    /// Write an entity reference, 0 for none
    #[inline]
    pub fn write_net_id(&mut self, id: Option<NetId>) {
        self.write_u32(id.map_or(0, NetId::get));
    }
}

impl Reader<'_> {
    /// Read an entity reference; 0 decodes to `None`
    #[inline]
    pub fn read_net_id(&mut self) -> Result<Option<NetId>> {
        self.read_u32().map(NetId::new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_net_id_roundtrip() {
        let id = NetId::new(42).unwrap();
        let mut writer = Writer::new();
        writer.write_net_id(Some(id));
        writer.write_net_id(None);
        assert_eq!(writer.as_slice(), &[42, 0, 0, 0, 0, 0, 0, 0]);

        let mut reader = Reader::new(writer.as_slice());
        assert_eq!(reader.read_net_id().unwrap(), Some(id));
        assert_eq!(reader.read_net_id().unwrap(), None);
    }

    #[test]
    fn test_zero_is_none() {
        assert_eq!(NetId::new(0), None);
        assert_eq!(NetId::new(7).map(NetId::get), Some(7));
        assert_eq!(NetId::new(7).unwrap().to_string(), "#7");
    }
}
