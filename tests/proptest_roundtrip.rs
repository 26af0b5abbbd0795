//! Property tests: whatever a writer produces, a reader consumes exactly

use gamewire::*;
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Value {
    U8(u8),
    I16(i16),
    U32(u32),
    I64(i64),
    F32(f32),
    F64(f64),
    Bool(bool),
    Char(char),
    Text(Option<String>),
    Bytes(Option<Vec<u8>>),
    Guid(u128),
    List(Option<Vec<i32>>),
    Point(Vector3),
    Entity(Option<NetId>),
}

fn bmp_char() -> impl Strategy<Value = char> {
    // Surrogates are not chars; everything else in the BMP fits one unit
    prop_oneof![0x0000u32..0xD800, 0xE000u32..0x1_0000]
        .prop_map(|unit| char::from_u32(unit).unwrap_or('?'))
}

fn value() -> impl Strategy<Value = Value> {
    prop_oneof![
        any::<u8>().prop_map(Value::U8),
        any::<i16>().prop_map(Value::I16),
        any::<u32>().prop_map(Value::U32),
        any::<i64>().prop_map(Value::I64),
        any::<f32>().prop_map(Value::F32),
        any::<f64>().prop_map(Value::F64),
        any::<bool>().prop_map(Value::Bool),
        bmp_char().prop_map(Value::Char),
        proptest::option::of(".{0,40}").prop_map(Value::Text),
        proptest::option::of(proptest::collection::vec(any::<u8>(), 0..64)).prop_map(Value::Bytes),
        any::<u128>().prop_map(Value::Guid),
        proptest::option::of(proptest::collection::vec(any::<i32>(), 0..16)).prop_map(Value::List),
        (any::<f32>(), any::<f32>(), any::<f32>())
            .prop_map(|(x, y, z)| Value::Point(Vector3::new(x, y, z))),
        any::<u32>().prop_map(|raw| Value::Entity(NetId::new(raw))),
    ]
}

fn write_value(writer: &mut Writer, value: &Value) -> Result<()> {
    match value {
        Value::U8(v) => writer.write_u8(*v),
        Value::I16(v) => writer.write_i16(*v),
        Value::U32(v) => writer.write_u32(*v),
        Value::I64(v) => writer.write_i64(*v),
        Value::F32(v) => writer.write_f32(*v),
        Value::F64(v) => writer.write_f64(*v),
        Value::Bool(v) => writer.write_bool(*v),
        Value::Char(v) => writer.write_char(*v)?,
        Value::Text(v) => writer.write_string(v.as_deref())?,
        Value::Bytes(v) => writer.write_bytes_and_size(v.as_deref())?,
        Value::Guid(v) => writer.write_guid(&Uuid::from_u128(*v)),
        Value::List(v) => writer.write_list(v.as_deref())?,
        Value::Point(v) => writer.write(v)?,
        Value::Entity(v) => writer.write_net_id(*v),
    }
    Ok(())
}

/// Read the value the writer was given and check it bit for bit
fn check_value(reader: &mut Reader<'_>, expected: &Value) -> Result<()> {
    match expected {
        Value::U8(v) => assert_eq!(reader.read_u8()?, *v),
        Value::I16(v) => assert_eq!(reader.read_i16()?, *v),
        Value::U32(v) => assert_eq!(reader.read_u32()?, *v),
        Value::I64(v) => assert_eq!(reader.read_i64()?, *v),
        Value::F32(v) => assert_eq!(reader.read_f32()?.to_bits(), v.to_bits()),
        Value::F64(v) => assert_eq!(reader.read_f64()?.to_bits(), v.to_bits()),
        Value::Bool(v) => assert_eq!(reader.read_bool()?, *v),
        Value::Char(v) => assert_eq!(reader.read_char()?, *v),
        Value::Text(v) => assert_eq!(reader.read_str()?, v.as_deref()),
        Value::Bytes(v) => assert_eq!(reader.read_bytes_and_size()?, v.as_deref()),
        Value::Guid(v) => assert_eq!(reader.read_guid()?.as_u128(), *v),
        Value::List(v) => assert_eq!(&reader.read_list::<i32>()?, v),
        Value::Point(v) => {
            let point = reader.read::<Vector3>()?;
            assert_eq!(point.x.to_bits(), v.x.to_bits());
            assert_eq!(point.y.to_bits(), v.y.to_bits());
            assert_eq!(point.z.to_bits(), v.z.to_bits());
        }
        Value::Entity(v) => assert_eq!(reader.read_net_id()?, *v),
    }
    Ok(())
}

proptest! {
    #[test]
    fn mixed_sequence_roundtrips(values in proptest::collection::vec(value(), 0..32)) {
        let mut writer = Writer::new();
        for value in &values {
            write_value(&mut writer, value).unwrap();
        }

        let mut reader = Reader::new(writer.as_slice());
        for value in &values {
            check_value(&mut reader, value).unwrap();
        }
        prop_assert!(reader.is_at_end());
    }

    #[test]
    fn truncated_input_never_panics(
        values in proptest::collection::vec(value(), 1..16),
        cut in any::<prop::sample::Index>(),
    ) {
        let mut writer = Writer::new();
        for value in &values {
            write_value(&mut writer, value).unwrap();
        }
        let bytes = writer.as_slice();
        let truncated = &bytes[..cut.index(bytes.len())];

        let mut reader = Reader::new(truncated);
        let mut failed = false;
        for value in &values {
            if check_value(&mut reader, value).is_err() {
                failed = true;
                break;
            }
        }
        // Dropping at least one byte must surface as an error, never a panic
        prop_assert!(failed);
    }

    #[test]
    fn garbage_lists_fail_cleanly(bytes in proptest::collection::vec(any::<u8>(), 0..64)) {
        let mut reader = Reader::new(&bytes);
        let _ = reader.read_list::<String>();
        prop_assert!(reader.position() <= bytes.len());
    }

    #[test]
    fn reused_writer_matches_fresh_writer(
        first in proptest::collection::vec(value(), 0..16),
        second in proptest::collection::vec(value(), 0..16),
    ) {
        let mut reused = Writer::new();
        for value in &first {
            write_value(&mut reused, value).unwrap();
        }
        reused.reset();

        let mut fresh = Writer::new();
        for value in &second {
            write_value(&mut reused, value).unwrap();
            write_value(&mut fresh, value).unwrap();
        }
        prop_assert_eq!(reused.as_slice(), fresh.as_slice());
    }

    #[test]
    fn string_length_prefix_is_biased(text in ".{0,64}") {
        let mut writer = Writer::new();
        writer.write_str(&text).unwrap();
        let prefix = u16::from_le_bytes([writer.as_slice()[0], writer.as_slice()[1]]);
        prop_assert_eq!(usize::from(prefix), text.len() + 1);
        prop_assert_eq!(writer.len(), 2 + text.len());
    }
}
