//! Count-prefixed sequences
//!
//! Lists, arrays and sub-ranges share one layout: a signed 4-byte count
//! followed by each element in order. A count of -1 marks a null sequence
//! and is distinct from an empty one.

use crate::error::{Error, Result};
use crate::reader::Reader;
use crate::wire::Wire;
use crate::writer::Writer;

/// Count written for a null sequence
pub const NULL_COUNT: i32 = -1;

impl Writer {
    /// Write an optional sequence, encoding each element with `write_item`
    ///
    /// Fails before writing anything if the sequence is longer than a
    /// signed 4-byte count can describe. If an element fails, the writer is
    /// restored as it was before the call, including bytes overwritten after
    /// the cursor was moved back with [`set_position`](Writer::set_position).
    pub fn write_list_with<T, F>(&mut self, items: Option<&[T]>, mut write_item: F) -> Result<()>
    where
        F: FnMut(&mut Writer, &T) -> Result<()>,
    {
        let Some(items) = items else {
            self.write_i32(NULL_COUNT);
            return Ok(());
        };
        let count = i32::try_from(items.len())
            .map_err(|_| Error::CollectionTooLong { len: items.len() })?;
        let checkpoint = self.checkpoint();
        self.write_i32(count);
        for item in items {
            if let Err(e) = write_item(self, item) {
                self.rollback(checkpoint);
                return Err(e);
            }
        }
        Ok(())
    }

    /// Write an optional sequence of [`Wire`] values
    #[inline]
    pub fn write_list<T: Wire>(&mut self, items: Option<&[T]>) -> Result<()> {
        self.write_list_with(items, |writer, item| item.write_to(writer))
    }

    /// Write `count` elements of `backing` starting at `offset`
    ///
    /// Only the selected elements go on the wire; the result decodes as an
    /// ordinary non-null list.
    pub fn write_segment<T: Wire>(&mut self, backing: &[T], offset: usize, count: usize) -> Result<()> {
        let range = offset
            .checked_add(count)
            .filter(|&end| end <= backing.len())
            .map(|end| offset..end)
            .ok_or(Error::InvalidRange {
                offset,
                count,
                len: backing.len(),
            })?;
        self.write_list(Some(&backing[range]))
    }
}

impl Reader<'_> {
    /// Read an optional sequence, decoding each element with `read_item`
    ///
    /// Preallocation is bounded by the bytes left, so a forged count cannot
    /// force a large allocation before the reads start failing. On any error
    /// the cursor is left before the count.
    pub fn read_list_with<T, F>(&mut self, mut read_item: F) -> Result<Option<Vec<T>>>
    where
        F: FnMut(&mut Self) -> Result<T>,
    {
        let start = self.position();
        let result = self.read_list_inner(&mut read_item);
        if result.is_err() {
            self.set_position(start)?;
        }
        result
    }

    fn read_list_inner<T, F>(&mut self, read_item: &mut F) -> Result<Option<Vec<T>>>
    where
        F: FnMut(&mut Self) -> Result<T>,
    {
        let count = self.read_i32()?;
        if count == NULL_COUNT {
            return Ok(None);
        }
        let count = usize::try_from(count).map_err(|_| Error::InvalidCount(count))?;
        let mut items = Vec::with_capacity(count.min(self.remaining()));
        for _ in 0..count {
            items.push(read_item(self)?);
        }
        Ok(Some(items))
    }

    /// Read an optional sequence of [`Wire`] values
    #[inline]
    pub fn read_list<T: Wire>(&mut self) -> Result<Option<Vec<T>>> {
        self.read_list_with(T::read_from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Vector2;

    #[test]
    fn test_null_and_empty() {
        let mut writer = Writer::new();
        writer.write_list::<u32>(None).unwrap();
        assert_eq!(writer.as_slice(), &[0xFF, 0xFF, 0xFF, 0xFF]);

        writer.reset();
        writer.write_list::<u32>(Some(&[][..])).unwrap();
        assert_eq!(writer.as_slice(), &[0, 0, 0, 0]);

        let mut writer = Writer::new();
        writer.write_list::<u32>(None).unwrap();
        writer.write_list::<u32>(Some(&[][..])).unwrap();
        let mut reader = Reader::new(writer.as_slice());
        assert_eq!(reader.read_list::<u32>().unwrap(), None);
        assert_eq!(reader.read_list::<u32>().unwrap(), Some(vec![]));
    }

    #[test]
    fn test_list_roundtrip() {
        let items = vec![Vector2::new(1.0, 2.0), Vector2::new(-3.0, 4.5)];
        let names = vec!["alpha".to_owned(), String::new(), "gamma".to_owned()];

        let mut writer = Writer::new();
        writer.write_list(Some(items.as_slice())).unwrap();
        writer.write_list(Some(names.as_slice())).unwrap();
        assert_eq!(&writer.as_slice()[..4], &[2, 0, 0, 0]);

        let mut reader = Reader::new(writer.as_slice());
        assert_eq!(reader.read_list::<Vector2>().unwrap(), Some(items));
        assert_eq!(reader.read_list::<String>().unwrap(), Some(names));
        assert!(reader.is_at_end());
    }

    #[test]
    fn test_segment_hides_backing() {
        let backing = [10u16, 20, 30, 40, 50];
        let mut writer = Writer::new();
        writer.write_segment(&backing, 1, 3).unwrap();
        assert_eq!(writer.as_slice(), &[3, 0, 0, 0, 20, 0, 30, 0, 40, 0]);

        let mut reader = Reader::new(writer.as_slice());
        assert_eq!(reader.read_list::<u16>().unwrap(), Some(vec![20, 30, 40]));

        // An empty segment is empty, never null
        writer.reset();
        writer.write_segment(&backing, 5, 0).unwrap();
        assert_eq!(writer.as_slice(), &[0, 0, 0, 0]);

        assert_eq!(
            writer.write_segment(&backing, 4, 2),
            Err(Error::InvalidRange {
                offset: 4,
                count: 2,
                len: 5
            })
        );
    }

    #[test]
    fn test_invalid_counts() {
        let mut reader = Reader::new(&[0xFE, 0xFF, 0xFF, 0xFF]);
        assert_eq!(reader.read_list::<u8>(), Err(Error::InvalidCount(-2)));

        // Huge count with almost no data fails on the first missing element
        let mut reader = Reader::new(&[0xFF, 0xFF, 0xFF, 0x7F, 1]);
        assert!(reader.read_list::<u32>().unwrap_err().is_end_of_stream());
        assert_eq!(reader.position(), 0);
    }

    #[test]
    fn test_failed_element_rolls_back() {
        let limits = crate::Limits::new().with_max_string_length(3);
        let mut writer = Writer::with_limits(limits);
        writer.write_u8(0xAA);

        let names = vec!["abc".to_owned(), "toolong".to_owned()];
        assert_eq!(
            writer.write_list(Some(names.as_slice())),
            Err(Error::StringTooLong { len: 7, max: 3 })
        );
        assert_eq!(writer.as_slice(), &[0xAA]);
        assert_eq!(writer.position(), 1);
    }

    #[test]
    fn test_failed_element_restores_patched_bytes() {
        let limits = crate::Limits::new().with_max_string_length(3);
        let mut writer = Writer::with_limits(limits);
        writer.write_raw(&[0xAA; 8]);
        writer.set_position(0).unwrap();

        let names = vec!["abc".to_owned(), "toolong".to_owned()];
        assert!(writer.write_list(Some(names.as_slice())).is_err());
        assert_eq!(writer.as_slice(), &[0xAA; 8]);
        assert_eq!(writer.position(), 0);

        // Overwrite that runs past the old end is also undone
        writer.set_position(6).unwrap();
        assert!(writer.write_list(Some(names.as_slice())).is_err());
        assert_eq!(writer.as_slice(), &[0xAA; 8]);
        assert_eq!(writer.position(), 6);
    }

    #[test]
    fn test_list_with_closure() {
        let mut writer = Writer::new();
        writer
            .write_list_with(Some(&[1u8, 2, 3][..]), |w, b| {
                w.write_u8(b * 2);
                Ok(())
            })
            .unwrap();

        let mut reader = Reader::new(writer.as_slice());
        let doubled = reader.read_list_with(|r| r.read_u8()).unwrap();
        assert_eq!(doubled, Some(vec![2, 4, 6]));
    }
}
