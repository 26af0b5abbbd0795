//! Length-prefixed strings and byte buffers, GUIDs and URIs
//!
//! Strings carry a 2-byte count and sized byte buffers a 4-byte count. The
//! stored count is the payload length plus one so that 0 can mean null:
//!
//! ```text
//! null      -> 00 00
//! ""        -> 01 00
//! "hello"   -> 06 00 68 65 6c 6c 6f
//! ```

use uuid::Uuid;

use crate::error::{Error, Result};
use crate::reader::Reader;
use crate::uri::Uri;
use crate::writer::Writer;

/// Encoded size of a GUID
pub const GUID_SIZE: usize = 16;

impl Writer {
    /// Write an optional string with a biased 2-byte count
    ///
    /// Fails with [`Error::StringTooLong`] before writing anything if the
    /// UTF-8 length exceeds the writer's string cap.
    pub fn write_string(&mut self, value: Option<&str>) -> Result<()> {
        let Some(value) = value else {
            self.write_u16(0);
            return Ok(());
        };
        let max = self.limits().string_cap();
        let len = value.len();
        if len > max {
            tracing::debug!(len, max, "rejecting oversized string");
            return Err(Error::StringTooLong { len, max });
        }
        // string_cap() keeps len + 1 within u16
        self.write_u16((len + 1) as u16);
        self.write_raw(value.as_bytes());
        Ok(())
    }

    /// Write a non-null string
    #[inline]
    pub fn write_str(&mut self, value: &str) -> Result<()> {
        self.write_string(Some(value))
    }

    /// Write an optional byte buffer with a biased 4-byte count
    pub fn write_bytes_and_size(&mut self, value: Option<&[u8]>) -> Result<()> {
        let Some(value) = value else {
            self.write_u32(0);
            return Ok(());
        };
        let count = u32::try_from(value.len())
            .ok()
            .and_then(|len| len.checked_add(1))
            .ok_or_else(|| {
                tracing::debug!(len = value.len(), "rejecting oversized byte buffer");
                Error::BufferTooLong { len: value.len() }
            })?;
        self.write_u32(count);
        self.write_raw(value);
        Ok(())
    }

    /// Write a GUID as its 16 raw bytes
    #[inline]
    pub fn write_guid(&mut self, value: &Uuid) {
        self.write_raw(value.as_bytes());
    }

    /// Write an optional URI as its string form
    #[inline]
    pub fn write_uri(&mut self, value: Option<&Uri>) -> Result<()> {
        self.write_string(value.map(Uri::as_str))
    }
}

impl<'a> Reader<'a> {
    /// Read an optional string as a borrowed slice
    ///
    /// A declared length above the reader's string cap fails before the
    /// payload is touched. On any error the cursor is left before the count.
    pub fn read_str(&mut self) -> Result<Option<&'a str>> {
        let start = self.position();
        let result = self.read_str_inner();
        if result.is_err() {
            self.set_position(start)?;
        }
        result
    }

    fn read_str_inner(&mut self) -> Result<Option<&'a str>> {
        let count = self.read_u16()?;
        if count == 0 {
            return Ok(None);
        }
        let len = usize::from(count) - 1;
        let max = self.limits().string_cap();
        if len > max {
            return Err(Error::StringTooLong { len, max });
        }
        let bytes = self.read_raw(len)?;
        core::str::from_utf8(bytes)
            .map(Some)
            .map_err(|_| Error::InvalidUtf8)
    }

    /// Read an optional string into an owned `String`
    #[inline]
    pub fn read_string(&mut self) -> Result<Option<String>> {
        Ok(self.read_str()?.map(str::to_owned))
    }

    /// Read an optional byte buffer as a borrowed slice
    pub fn read_bytes_and_size(&mut self) -> Result<Option<&'a [u8]>> {
        let start = self.position();
        let count = self.read_u32()?;
        if count == 0 {
            return Ok(None);
        }
        match self.read_raw(count as usize - 1) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) => {
                self.set_position(start)?;
                Err(e)
            }
        }
    }

    /// Read an optional byte buffer into an owned `Vec`
    #[inline]
    pub fn read_bytes_and_size_vec(&mut self) -> Result<Option<Vec<u8>>> {
        Ok(self.read_bytes_and_size()?.map(<[u8]>::to_vec))
    }

    /// Read a GUID from its 16 raw bytes
    #[inline]
    pub fn read_guid(&mut self) -> Result<Uuid> {
        let mut raw = [0u8; GUID_SIZE];
        raw.copy_from_slice(self.read_raw(GUID_SIZE)?);
        Ok(Uuid::from_bytes(raw))
    }

    /// Read an optional URI, parsing its string form
    pub fn read_uri(&mut self) -> Result<Option<Uri>> {
        let start = self.position();
        let Some(text) = self.read_str()? else {
            return Ok(None);
        };
        match text.parse() {
            Ok(uri) => Ok(Some(uri)),
            Err(e) => {
                self.set_position(start)?;
                Err(e)
            }
        }
    }
}
