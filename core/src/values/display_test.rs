//! Tests for Display on Value and Record

use crate::values::{Record, Value};

#[test]
fn test_display_integers() {
    assert_eq!(format!("{}", Value::UInt(42)), "42");
    assert_eq!(format!("{}", Value::Int(-100)), "-100");
    assert_eq!(format!("{}", Value::Int(0)), "0");
}

#[test]
fn test_display_float_always_has_decimal_point() {
    assert_eq!(format!("{}", Value::Float(3.5)), "3.5");
    assert_eq!(format!("{}", Value::Float(2.0)), "2.");
    assert_eq!(format!("{}", Value::Float(-0.0)), "-0.");
    assert_eq!(format!("{}", Value::Float(f64::NAN)), "nan");
    assert_eq!(format!("{}", Value::Float(f64::NEG_INFINITY)), "-inf");
}

#[test]
fn test_display_string_escapes() {
    assert_eq!(format!("{}", Value::from("Hi")), "\"Hi\"");
    assert_eq!(
        format!("{}", Value::from("say \"hi\"\n")),
        "\"say \\\"hi\\\"\\n\""
    );
    assert_eq!(format!("{}", Value::from("\u{1}")), "\"\\u{0001}\"");
}

#[test]
fn test_display_array() {
    let value = Value::Array(vec![Value::UInt(0), Value::UInt(255), Value::UInt(127)]);
    assert_eq!(format!("{}", value), "[0, 255, 127]");
    assert_eq!(format!("{}", Value::Array(vec![])), "[]");
}

#[test]
fn test_display_enum() {
    let value = Value::enumeration(
        "A",
        Record::new().with("field0", true).with("field1", 1u8),
    );
    assert_eq!(format!("{}", value), "{A: {field0: true, field1: 1}}");
    assert_eq!(
        format!("{}", Value::enumeration("B", Record::new())),
        "{B: {}}"
    );
}

#[test]
fn test_display_record() {
    let record = Record::new()
        .with("hello", 10u8)
        .with("world", vec![Value::UInt(105), Value::UInt(204)]);
    assert_eq!(format!("{}", record), "{hello: 10, world: [105, 204]}");
}
