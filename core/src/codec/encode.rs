use crate::codec::error::{EncodeError, EncodeErrorKind, PathSegment};
use crate::codec::half::f32_to_f16_bits;
use crate::types::{Field, Type, Width, discriminant_width};
use crate::values::{Record, Value};
use tracing::trace;

/// Append the encoding of `value` as `ty` to `out`.
///
/// Returns the number of bytes written. On error `out` is left exactly as
/// it was.
pub fn encode_type(ty: &Type<'_>, value: &Value, out: &mut Vec<u8>) -> Result<usize, EncodeError> {
    atomically(out, |out| write_type(ty, value, out))
}

/// Append `fields` of `record` in declared order. Record entries that no
/// field names are ignored.
pub fn encode_fields(
    fields: &[Field<'_>],
    record: &Record,
    out: &mut Vec<u8>,
) -> Result<usize, EncodeError> {
    atomically(out, |out| write_fields(fields, record, out))
}

fn atomically(
    out: &mut Vec<u8>,
    write: impl FnOnce(&mut Vec<u8>) -> Result<(), EncodeError>,
) -> Result<usize, EncodeError> {
    let start = out.len();
    match write(out) {
        Ok(()) => Ok(out.len() - start),
        Err(err) => {
            out.truncate(start);
            Err(err)
        }
    }
}

/// Append the low `width` bytes of `raw`, little-endian.
pub(crate) fn write_uint(raw: u64, width: Width, out: &mut Vec<u8>) {
    out.extend_from_slice(&raw.to_le_bytes()[..width.bytes()]);
}

fn mismatch(ty: &Type<'_>, value: &Value) -> EncodeError {
    EncodeErrorKind::TypeMismatch {
        expected: ty.to_string(),
        found: value.kind_name(),
    }
    .into()
}

fn out_of_range(ty: &Type<'_>, value: &Value) -> EncodeError {
    EncodeErrorKind::OutOfRange {
        value: value.to_string(),
        ty: ty.to_string(),
    }
    .into()
}

fn write_type(ty: &Type<'_>, value: &Value, out: &mut Vec<u8>) -> Result<(), EncodeError> {
    match ty {
        Type::Bool => match value {
            Value::Bool(b) => out.push(u8::from(*b)),
            _ => return Err(mismatch(ty, value)),
        },
        Type::UInt(width) => {
            let raw = match value {
                Value::UInt(n) => *n,
                Value::Int(n) => u64::try_from(*n).map_err(|_| out_of_range(ty, value))?,
                _ => return Err(mismatch(ty, value)),
            };
            if raw > width.max_unsigned() {
                return Err(out_of_range(ty, value));
            }
            write_uint(raw, *width, out);
        }
        Type::Int(width) => {
            let n = match value {
                Value::Int(n) => *n,
                Value::UInt(n) => i64::try_from(*n).map_err(|_| out_of_range(ty, value))?,
                _ => return Err(mismatch(ty, value)),
            };
            let (min, max) = width.signed_range();
            if n < min || n > max {
                return Err(out_of_range(ty, value));
            }
            write_uint(n as u64, *width, out);
        }
        Type::Float16 | Type::Float32 | Type::Float64 => {
            let Value::Float(f) = value else {
                return Err(mismatch(ty, value));
            };
            match ty {
                Type::Float16 => out.extend_from_slice(&f32_to_f16_bits(*f as f32).to_le_bytes()),
                Type::Float32 => out.extend_from_slice(&(*f as f32).to_le_bytes()),
                _ => out.extend_from_slice(&f.to_le_bytes()),
            }
        }
        Type::String => {
            let Value::String(s) = value else {
                return Err(mismatch(ty, value));
            };
            if s.as_bytes().contains(&0) {
                return Err(EncodeErrorKind::InteriorNul.into());
            }
            out.extend_from_slice(s.as_bytes());
            out.push(0);
        }
        Type::Array { item, length, .. } => {
            let Value::Array(items) = value else {
                return Err(mismatch(ty, value));
            };
            if items.len() as u64 != *length {
                return Err(EncodeErrorKind::LengthMismatch {
                    ty: ty.to_string(),
                    expected: *length,
                    found: items.len(),
                }
                .into());
            }
            write_items(item, items, out)?;
        }
        Type::Vector { item, .. } => {
            let Value::Array(items) = value else {
                return Err(mismatch(ty, value));
            };
            out.extend_from_slice(&(items.len() as u64).to_le_bytes());
            write_items(item, items, out)?;
        }
        Type::Enum(variants) => {
            let Value::Enum { variant, fields } = value else {
                return Err(mismatch(ty, value));
            };
            let index = variants
                .iter()
                .position(|v| v.name == variant)
                .ok_or_else(|| EncodeErrorKind::UnknownVariant {
                    name: variant.clone(),
                })?;
            write_uint(index as u64, discriminant_width(variants.len() as u64), out);
            write_fields(variants[index].fields, fields, out)
                .map_err(|e| e.within(PathSegment::Variant(variant.clone())))?;
        }
    }
    Ok(())
}

fn write_items(item: &Type<'_>, items: &[Value], out: &mut Vec<u8>) -> Result<(), EncodeError> {
    for (index, value) in items.iter().enumerate() {
        write_type(item, value, out).map_err(|e| e.within(PathSegment::Index(index as u64)))?;
    }
    Ok(())
}

fn write_fields(fields: &[Field<'_>], record: &Record, out: &mut Vec<u8>) -> Result<(), EncodeError> {
    for field in fields {
        trace!(field = field.name, position = out.len(), "Encoding field");
        let value = record.get(field.name).ok_or_else(|| EncodeErrorKind::MissingField {
            name: field.name.to_string(),
        })?;
        write_type(field.ty, value, out)
            .map_err(|e| e.within(PathSegment::Field(field.name.to_string())))?;
    }
    Ok(())
}
