//! GameWire: bit-exact binary serialization for multiplayer game traffic
//!
//! This crate encodes values into reusable growable buffers and decodes them
//! from borrowed byte slices. Both ends only have to agree on the order of
//! calls; there is no schema or tag on the wire.
//!
//! # Wire Format
//!
//! ```text
//! +-----------------------+------------------------------------------------+
//! | integers, floats      | little-endian, natural width                   |
//! | bool                  | 1 byte, 0 or 1                                 |
//! | char                  | 2 bytes, one UTF-16 code unit                  |
//! | decimal               | 16 bytes: flags, hi, lo                        |
//! | GUID                  | 16 raw bytes                                   |
//! | string                | u16 (len + 1, 0 = null) + UTF-8 bytes          |
//! | bytes                 | u32 (len + 1, 0 = null) + raw bytes            |
//! | list / array / range  | i32 count (-1 = null) + elements               |
//! | nullable fixed value  | bool present + value if present                |
//! | entity reference      | u32 network id, 0 = none                       |
//! | math structs          | fields in declaration order, no padding        |
//! +-----------------------+------------------------------------------------+
//! ```
//!
//! # Features
//!
//! - Writers grow by doubling and can be reset and pooled
//! - Readers are bounds-checked views that never copy
//! - Static dispatch through [`Wire`], runtime dispatch through [`registry`]
//! - Optional `serde` support for [`Limits`] and the value types
//!
//! # Example
//!
//! ```rust
//! use gamewire::*;
//!
//! let mut writer = Writer::new();
//! writer.write_u32(0x0102_0304);
//! writer.write_str("hello")?;
//! writer.write(&Vector3::new(1.0, 2.0, 3.0))?;
//! writer.write_list(Some(&[10u16, 20, 30][..]))?;
//!
//! let mut reader = Reader::new(writer.as_slice());
//! assert_eq!(reader.read_u32()?, 0x0102_0304);
//! assert_eq!(reader.read_str()?, Some("hello"));
//! assert_eq!(reader.read::<Vector3>()?, Vector3::new(1.0, 2.0, 3.0));
//! assert_eq!(reader.read_list::<u16>()?, Some(vec![10, 20, 30]));
//! assert!(reader.is_at_end());
//! # Ok::<(), gamewire::Error>(())
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod collections;
pub mod config;
pub mod error;
pub mod math;
pub mod netid;
pub mod pool;
pub mod primitives;
pub mod reader;
pub mod registry;
pub mod uri;
pub mod varlen;
pub mod wire;
pub mod writer;

// Re-export main types
pub use config::Limits;
pub use error::{Error, Result};
pub use math::{
    Color, Color32, Matrix4x4, Plane, Quaternion, Ray, Rect, Vector2, Vector2Int, Vector3,
    Vector3Int, Vector4,
};
pub use netid::NetId;
pub use pool::{PooledWriter, WriterPool};
pub use primitives::{Decimal, FixedLayout};
pub use reader::Reader;
pub use uri::Uri;
pub use uuid::Uuid;
pub use wire::Wire;
pub use writer::Writer;

/// Capacity of a new writer, sized to a typical network packet
pub const DEFAULT_CAPACITY: usize = 1500;

/// Default cap on a string's UTF-8 byte length
pub const MAX_STRING_LENGTH: usize = 32 * 1024;

/// Longest string the biased 2-byte prefix can carry
pub const MAX_ENCODABLE_STRING_LENGTH: usize = u16::MAX as usize - 1;

/// Idle writers kept by the default pool
pub const DEFAULT_POOL_SIZE: usize = 64;
