use crate::api::CodecOptions;
use crate::codec::error::{DecodeError, DecodeErrorKind, PathSegment};
use crate::codec::reader::ByteReader;
use crate::types::{Field, Type};
use crate::values::{Record, Value};
use tracing::trace;

/// Walks a [`Type`] tree over a byte buffer, producing [`Value`]s.
#[derive(Debug, Clone, Copy, Default)]
pub struct Decoder {
    options: CodecOptions,
}

impl Decoder {
    pub fn new(options: CodecOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &CodecOptions {
        &self.options
    }

    /// Decode one value of type `ty` starting at `pos`.
    ///
    /// Returns the value and the number of bytes it took.
    pub fn decode_type(
        &self,
        ty: &Type<'_>,
        buf: &[u8],
        pos: usize,
    ) -> Result<(Value, usize), DecodeError> {
        let mut reader = ByteReader::at(buf, pos);
        let value = self.read_type(ty, &mut reader)?;
        Ok((value, reader.position() - pos))
    }

    /// Decode `fields` in order starting at `pos`.
    pub fn decode_fields(
        &self,
        fields: &[Field<'_>],
        buf: &[u8],
        pos: usize,
    ) -> Result<(Record, usize), DecodeError> {
        let mut reader = ByteReader::at(buf, pos);
        let record = self.read_fields(fields, &mut reader)?;
        Ok((record, reader.position() - pos))
    }

    /// Decode one value at the reader's cursor.
    pub fn read_type(
        &self,
        ty: &Type<'_>,
        reader: &mut ByteReader<'_>,
    ) -> Result<Value, DecodeError> {
        let value = match ty {
            Type::Bool => Value::Bool(reader.read_bool()?),
            Type::UInt(width) => Value::UInt(reader.read_uint(*width)?),
            Type::Int(width) => Value::Int(reader.read_int(*width)?),
            Type::Float16 => Value::Float(reader.read_f16()?),
            Type::Float32 => Value::Float(f64::from(reader.read_f32()?)),
            Type::Float64 => Value::Float(reader.read_f64()?),
            Type::String => Value::String(reader.read_cstr(self.options.strict_strings)?),
            Type::Array { item, length, .. } => {
                Value::Array(self.read_items(item, *length, reader)?)
            }
            Type::Vector { item, .. } => {
                let start = reader.position();
                let count = reader.read_u64()?;
                if count > self.options.max_sequence_len {
                    return Err(DecodeError::new(
                        DecodeErrorKind::SequenceTooLong {
                            len: count,
                            max: self.options.max_sequence_len,
                        },
                        start,
                    ));
                }
                // Items that take no bytes are bounded by the buffer instead.
                let remaining = reader.remaining() as u64;
                if count > remaining && item.min_size() == 0 {
                    return Err(DecodeError::new(
                        DecodeErrorKind::SequenceTooLong {
                            len: count,
                            max: remaining,
                        },
                        start,
                    ));
                }
                Value::Array(self.read_items(item, count, reader)?)
            }
            Type::Enum(variants) => {
                let start = reader.position();
                let discriminant = reader.read_discriminant(variants.len())?;
                let variant = usize::try_from(discriminant)
                    .ok()
                    .and_then(|index| variants.get(index))
                    .ok_or_else(|| {
                        DecodeError::new(
                            DecodeErrorKind::UnknownDiscriminant {
                                value: discriminant,
                                variants: variants.len(),
                            },
                            start,
                        )
                    })?;
                let fields = self
                    .read_fields(variant.fields, reader)
                    .map_err(|e| e.within(PathSegment::Variant(variant.name.to_string())))?;
                Value::enumeration(variant.name, fields)
            }
        };
        Ok(value)
    }

    fn read_items(
        &self,
        item: &Type<'_>,
        count: u64,
        reader: &mut ByteReader<'_>,
    ) -> Result<Vec<Value>, DecodeError> {
        // Fail before allocating when fixed-size items cannot fit.
        let item_size = item.fixed_size().unwrap_or(0) as u64;
        if item_size > 0 && count.saturating_mul(item_size) > reader.remaining() as u64 {
            return Err(DecodeError::new(
                DecodeErrorKind::UnexpectedEof {
                    needed: usize::try_from(count.saturating_mul(item_size)).unwrap_or(usize::MAX),
                    available: reader.remaining(),
                },
                reader.position(),
            ));
        }

        // Every non-empty item takes at least one byte.
        let capacity = count.min(reader.remaining() as u64) as usize;
        let mut items = Vec::with_capacity(capacity);
        for index in 0..count {
            let value = self
                .read_type(item, reader)
                .map_err(|e| e.within(PathSegment::Index(index)))?;
            items.push(value);
        }
        Ok(items)
    }

    fn read_fields(
        &self,
        fields: &[Field<'_>],
        reader: &mut ByteReader<'_>,
    ) -> Result<Record, DecodeError> {
        let mut record = Record::with_capacity(fields.len());
        for field in fields {
            trace!(field = field.name, position = reader.position(), "Decoding field");
            let value = self
                .read_type(field.ty, reader)
                .map_err(|e| e.within(PathSegment::Field(field.name.to_string())))?;
            record.insert(field.name, value);
        }
        Ok(record)
    }
}

/// Decode one value with default options.
pub fn decode_type(ty: &Type<'_>, buf: &[u8], pos: usize) -> Result<(Value, usize), DecodeError> {
    Decoder::default().decode_type(ty, buf, pos)
}
