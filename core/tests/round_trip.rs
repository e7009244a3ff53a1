//! Encode/decode round trips over larger schemas.

use binschema_core::parser::{parse_schema, parse_type};
use binschema_core::{Codec, CodecOptions, Record, TypeManager, Value};
use bumpalo::Bump;
use pretty_assertions::assert_eq;

fn sensor_record(i: u64) -> Record {
    let shape = if i % 2 == 0 {
        Value::enumeration("Circle", Record::new().with("radius", 0.5 * i as f64))
    } else {
        Value::enumeration(
            "Polygon",
            Record::new().with(
                "points",
                (0..i)
                    .map(|p| Value::Array(vec![Value::Int(p as i64), Value::Int(-(p as i64))]))
                    .collect::<Vec<_>>(),
            ),
        )
    };

    Record::new()
        .with("id", i)
        .with("name", format!("sensor-{}", i))
        .with("enabled", i % 3 != 0)
        .with("offset", -(i as i64))
        .with("gain", Value::Float(1.5))
        .with("shape", shape)
        .with("tags", vec![Value::from("a"), Value::from("b")])
}

const SENSOR_SCHEMA: &str = "id: u64, name: string, enabled: bool, offset: i32, gain: f16, \
     shape: enum Circle[radius: f64], Polygon[points: [[i16; 2]]], tags: [string]";

#[test]
fn test_records_round_trip() {
    let arena = Bump::new();
    let codec = Codec::from_schema_str(&arena, SENSOR_SCHEMA).unwrap();

    for i in 0..20 {
        let record = sensor_record(i);
        let bytes = codec.encode(&record).unwrap();
        let (decoded, consumed) = codec.decode(&bytes, 0).unwrap();
        assert_eq!(decoded, record);
        assert_eq!(consumed, bytes.len());
    }
}

#[test]
fn test_concatenated_records() {
    let arena = Bump::new();
    let codec = Codec::from_schema_str(&arena, SENSOR_SCHEMA).unwrap();

    let mut buf = Vec::new();
    for i in 0..5 {
        codec.encode_into(&sensor_record(i), &mut buf).unwrap();
    }

    let mut pos = 0;
    for i in 0..5 {
        let (record, consumed) = codec.decode(&buf, pos).unwrap();
        assert_eq!(record.get("id"), Some(&Value::UInt(i)));
        pos += consumed;
    }
    assert_eq!(pos, buf.len());
}

#[test]
fn test_schema_display_round_trip() {
    let arena = Bump::new();
    let type_mgr = TypeManager::new(&arena);
    let schema = parse_schema(type_mgr, SENSOR_SCHEMA).unwrap();

    let rendered = schema.to_string();
    let reparsed = parse_schema(type_mgr, &rendered).unwrap();
    assert_eq!(reparsed, schema);

    for field in schema.iter() {
        let text = field.ty.to_string();
        let parsed = parse_type(type_mgr, &text).unwrap();
        assert!(core::ptr::eq(parsed.value, field.ty), "{}", text);
        assert_eq!(parsed.len, text.len());
    }
}

#[test]
fn test_strict_codec_round_trips_too() {
    let arena = Bump::new();
    let type_mgr = TypeManager::new(&arena);
    let schema = parse_schema(type_mgr, SENSOR_SCHEMA).unwrap();
    let codec = Codec::from_schema(
        schema,
        CodecOptions {
            strict_strings: true,
            max_sequence_len: 64,
        },
    );

    let record = sensor_record(7);
    let bytes = codec.encode(&record).unwrap();
    assert_eq!(codec.decode(&bytes, 0).unwrap().0, record);
}
