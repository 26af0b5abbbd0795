//! Fixed-layout game math types
//!
//! Each type encodes as its fields in declaration order, each field through
//! [`FixedLayout`](crate::FixedLayout). The layouts match the engine's value
//! types byte for byte, so a client and a server agree without any schema.

/// Declare a struct whose wire encoding is its fields in declaration order
///
/// Implements [`FixedLayout`](crate::FixedLayout) and [`Wire`](crate::Wire)
/// for the struct. Every field type must itself be `FixedLayout`, and the
/// struct must derive `Copy`.
///
/// ```rust
/// use gamewire::{fixed_layout, Reader, Wire, Writer};
///
/// fixed_layout! {
///     #[derive(Debug, Clone, Copy, PartialEq)]
///     pub struct Hit {
///         /// Entity that was hit
///         pub target: u32,
///         pub damage: f32,
///     }
/// }
///
/// let mut writer = Writer::new();
/// Hit { target: 7, damage: 12.5 }.write_to(&mut writer)?;
/// assert_eq!(writer.len(), 8);
///
/// let mut reader = Reader::new(writer.as_slice());
/// assert_eq!(Hit::read_from(&mut reader)?, Hit { target: 7, damage: 12.5 });
/// # Ok::<(), gamewire::Error>(())
/// ```
#[macro_export]
macro_rules! fixed_layout {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[$field_meta:meta])*
                $field_vis:vis $field:ident : $field_ty:ty
            ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis struct $name {
            $(
                $(#[$field_meta])*
                $field_vis $field: $field_ty,
            )+
        }

        impl $crate::FixedLayout for $name {
            const SIZE: usize = 0 $(+ <$field_ty as $crate::FixedLayout>::SIZE)+;

            #[inline]
            fn put(&self, out: &mut [u8]) {
                let mut at = 0;
                $(
                    let end = at + <$field_ty as $crate::FixedLayout>::SIZE;
                    $crate::FixedLayout::put(&self.$field, &mut out[at..end]);
                    at = end;
                )+
                debug_assert_eq!(at, out.len());
            }

            #[inline]
            fn get(src: &[u8]) -> Self {
                let mut at = 0;
                $(
                    let end = at + <$field_ty as $crate::FixedLayout>::SIZE;
                    let $field = <$field_ty as $crate::FixedLayout>::get(&src[at..end]);
                    at = end;
                )+
                debug_assert_eq!(at, src.len());
                Self { $($field),+ }
            }
        }

        impl $crate::Wire for $name {
            #[inline]
            fn write_to(&self, writer: &mut $crate::Writer) -> $crate::Result<()> {
                writer.write_fixed(*self);
                Ok(())
            }

            #[inline]
            fn read_from(reader: &mut $crate::Reader<'_>) -> $crate::Result<Self> {
                reader.read_fixed()
            }
        }
    };
}

fixed_layout! {
    /// 2D vector of f32
    #[derive(Debug, Clone, Copy, PartialEq, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct Vector2 {
        /// X component
        pub x: f32,
        /// Y component
        pub y: f32,
    }
}

fixed_layout! {
    /// 3D vector of f32
    #[derive(Debug, Clone, Copy, PartialEq, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct Vector3 {
        /// X component
        pub x: f32,
        /// Y component
        pub y: f32,
        /// Z component
        pub z: f32,
    }
}

fixed_layout! {
    /// 4D vector of f32
    #[derive(Debug, Clone, Copy, PartialEq, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct Vector4 {
        /// X component
        pub x: f32,
        /// Y component
        pub y: f32,
        /// Z component
        pub z: f32,
        /// W component
        pub w: f32,
    }
}

fixed_layout! {
    /// 2D vector of i32
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct Vector2Int {
        /// X component
        pub x: i32,
        /// Y component
        pub y: i32,
    }
}

fixed_layout! {
    /// 3D vector of i32
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct Vector3Int {
        /// X component
        pub x: i32,
        /// Y component
        pub y: i32,
        /// Z component
        pub z: i32,
    }
}

fixed_layout! {
    /// RGBA color with f32 channels
    #[derive(Debug, Clone, Copy, PartialEq, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct Color {
        /// Red
        pub r: f32,
        /// Green
        pub g: f32,
        /// Blue
        pub b: f32,
        /// Alpha
        pub a: f32,
    }
}

fixed_layout! {
    /// RGBA color with one byte per channel
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct Color32 {
        /// Red
        pub r: u8,
        /// Green
        pub g: u8,
        /// Blue
        pub b: u8,
        /// Alpha
        pub a: u8,
    }
}

fixed_layout! {
    /// Rotation quaternion
    #[derive(Debug, Clone, Copy, PartialEq)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct Quaternion {
        /// X component
        pub x: f32,
        /// Y component
        pub y: f32,
        /// Z component
        pub z: f32,
        /// W component
        pub w: f32,
    }
}

fixed_layout! {
    /// Axis-aligned rectangle: origin then size
    #[derive(Debug, Clone, Copy, PartialEq, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct Rect {
        /// X component
        pub x: f32,
        /// Y component
        pub y: f32,
        /// Extent along x
        pub width: f32,
        /// Extent along y
        pub height: f32,
    }
}

fixed_layout! {
    /// Plane given by its normal and distance from the origin
    #[derive(Debug, Clone, Copy, PartialEq, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct Plane {
        /// Unit normal
        pub normal: Vector3,
        /// Signed distance from the origin along the normal
        pub distance: f32,
    }
}

fixed_layout! {
    /// Half-line given by an origin and a direction
    #[derive(Debug, Clone, Copy, PartialEq, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct Ray {
        /// Start point
        pub origin: Vector3,
        /// Direction, not necessarily normalized
        pub direction: Vector3,
    }
}

fixed_layout! {
    /// 4x4 matrix stored column by column (`mRC` is row R, column C)
    #[derive(Debug, Clone, Copy, PartialEq, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct Matrix4x4 {
        /// Row 0, column 0
        pub m00: f32,
        /// Row 1, column 0
        pub m10: f32,
        /// Row 2, column 0
        pub m20: f32,
        /// Row 3, column 0
        pub m30: f32,
        /// Row 0, column 1
        pub m01: f32,
        /// Row 1, column 1
        pub m11: f32,
        /// Row 2, column 1
        pub m21: f32,
        /// Row 3, column 1
        pub m31: f32,
        /// Row 0, column 2
        pub m02: f32,
        /// Row 1, column 2
        pub m12: f32,
        /// Row 2, column 2
        pub m22: f32,
        /// Row 3, column 2
        pub m32: f32,
        /// Row 0, column 3
        pub m03: f32,
        /// Row 1, column 3
        pub m13: f32,
        /// Row 2, column 3
        pub m23: f32,
        /// Row 3, column 3
        pub m33: f32,
    }
}

impl Vector2 {
    /// Create a vector
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl Vector3 {
    /// Create a vector
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

impl Vector4 {
    /// Create a vector
    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }
}

impl Vector2Int {
    /// Create a vector
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl Vector3Int {
    /// Create a vector
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }
}

impl Color {
    /// Create a color
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }
}

impl Color32 {
    /// Create a color
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

impl Quaternion {
    /// The identity rotation
    pub const IDENTITY: Self = Self::new(0.0, 0.0, 0.0, 1.0);

    /// Create a quaternion
    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }
}

impl Default for Quaternion {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Matrix4x4 {
    /// The identity matrix
    pub const IDENTITY: Self = Self::from_columns([
        [1.0, 0.0, 0.0, 0.0],
        [0.0, 1.0, 0.0, 0.0],
        [0.0, 0.0, 1.0, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ]);

    /// Build a matrix from four columns
    pub const fn from_columns(c: [[f32; 4]; 4]) -> Self {
        Self {
            m00: c[0][0],
            m10: c[0][1],
            m20: c[0][2],
            m30: c[0][3],
            m01: c[1][0],
            m11: c[1][1],
            m21: c[1][2],
            m31: c[1][3],
            m02: c[2][0],
            m12: c[2][1],
            m22: c[2][2],
            m32: c[2][3],
            m03: c[3][0],
            m13: c[3][1],
            m23: c[3][2],
            m33: c[3][3],
        }
    }
}
