//! Static encoding for Rust types whose layout matches a schema type.
//!
//! Implementations produce exactly the bytes the dynamic codec produces for
//! the type returned by [`Encoded::schema_type`], without going through
//! [`Value`](crate::values::Value). `#[derive(Encoded)]` and
//! `#[derive(EncodedRecord)]` in `binschema-macros` generate these impls
//! for enums and structs.

use crate::api::CodecOptions;
use crate::codec::{
    ByteReader, DecodeError, DecodeErrorKind, EncodeError, EncodeErrorKind, PathSegment,
    write_uint,
};
use crate::types::manager::TypeManager;
use crate::types::{Schema, Type, Width, discriminant_width};

/// A Rust type with a fixed schema type.
pub trait Encoded: Sized {
    /// The schema type describing this type's encoding.
    fn schema_type<'a>(type_mgr: &'a TypeManager<'a>) -> &'a Type<'a>;

    fn encode(&self, out: &mut Vec<u8>) -> Result<(), EncodeError>;

    fn decode(reader: &mut ByteReader<'_>) -> Result<Self, DecodeError>;
}

/// A struct encoded as a top-level record: its fields in declared order.
pub trait EncodedRecord: Sized {
    fn schema<'a>(type_mgr: &'a TypeManager<'a>) -> Schema<'a>;

    fn encode(&self, out: &mut Vec<u8>) -> Result<(), EncodeError>;

    fn decode(reader: &mut ByteReader<'_>) -> Result<Self, DecodeError>;

    fn to_bytes(&self) -> Result<Vec<u8>, EncodeError> {
        let mut out = Vec::new();
        self.encode(&mut out)?;
        Ok(out)
    }

    /// Decode from the start of `buf`, returning the bytes consumed.
    fn from_bytes(buf: &[u8]) -> Result<(Self, usize), DecodeError> {
        let mut reader = ByteReader::new(buf);
        let value = Self::decode(&mut reader)?;
        Ok((value, reader.position()))
    }
}

/// Write the discriminant of variant `index` of an enum with
/// `variant_count` variants.
pub fn encode_discriminant(index: u64, variant_count: usize, out: &mut Vec<u8>) {
    write_uint(index, discriminant_width(variant_count as u64), out);
}

/// Error for a discriminant read at `position` that names no variant.
pub fn unknown_discriminant(value: u64, variant_count: usize, position: usize) -> DecodeError {
    DecodeError::new(
        DecodeErrorKind::UnknownDiscriminant {
            value,
            variants: variant_count,
        },
        position,
    )
}

impl Encoded for bool {
    fn schema_type<'a>(type_mgr: &'a TypeManager<'a>) -> &'a Type<'a> {
        type_mgr.bool()
    }

    fn encode(&self, out: &mut Vec<u8>) -> Result<(), EncodeError> {
        out.push(u8::from(*self));
        Ok(())
    }

    fn decode(reader: &mut ByteReader<'_>) -> Result<Self, DecodeError> {
        reader.read_bool()
    }
}

macro_rules! impl_encoded_int {
    ($($ty:ty => $ctor:ident($width:expr), $read:ident;)*) => {
        $(
            impl Encoded for $ty {
                fn schema_type<'a>(type_mgr: &'a TypeManager<'a>) -> &'a Type<'a> {
                    type_mgr.$ctor($width)
                }

                fn encode(&self, out: &mut Vec<u8>) -> Result<(), EncodeError> {
                    out.extend_from_slice(&self.to_le_bytes());
                    Ok(())
                }

                fn decode(reader: &mut ByteReader<'_>) -> Result<Self, DecodeError> {
                    reader.$read()
                }
            }
        )*
    };
}

impl_encoded_int! {
    u8 => uint(Width::W8), read_u8;
    u16 => uint(Width::W16), read_u16;
    u32 => uint(Width::W32), read_u32;
    u64 => uint(Width::W64), read_u64;
    i8 => int(Width::W8), read_i8;
    i16 => int(Width::W16), read_i16;
    i32 => int(Width::W32), read_i32;
    i64 => int(Width::W64), read_i64;
}

impl Encoded for f32 {
    fn schema_type<'a>(type_mgr: &'a TypeManager<'a>) -> &'a Type<'a> {
        type_mgr.float32()
    }

    fn encode(&self, out: &mut Vec<u8>) -> Result<(), EncodeError> {
        out.extend_from_slice(&self.to_le_bytes());
        Ok(())
    }

    fn decode(reader: &mut ByteReader<'_>) -> Result<Self, DecodeError> {
        reader.read_f32()
    }
}

impl Encoded for f64 {
    fn schema_type<'a>(type_mgr: &'a TypeManager<'a>) -> &'a Type<'a> {
        type_mgr.float64()
    }

    fn encode(&self, out: &mut Vec<u8>) -> Result<(), EncodeError> {
        out.extend_from_slice(&self.to_le_bytes());
        Ok(())
    }

    fn decode(reader: &mut ByteReader<'_>) -> Result<Self, DecodeError> {
        reader.read_f64()
    }
}

impl Encoded for String {
    fn schema_type<'a>(type_mgr: &'a TypeManager<'a>) -> &'a Type<'a> {
        type_mgr.string()
    }

    fn encode(&self, out: &mut Vec<u8>) -> Result<(), EncodeError> {
        if self.as_bytes().contains(&0) {
            return Err(EncodeErrorKind::InteriorNul.into());
        }
        out.extend_from_slice(self.as_bytes());
        out.push(0);
        Ok(())
    }

    fn decode(reader: &mut ByteReader<'_>) -> Result<Self, DecodeError> {
        reader.read_cstr(CodecOptions::default().strict_strings)
    }
}

impl<T: Encoded> Encoded for Vec<T> {
    fn schema_type<'a>(type_mgr: &'a TypeManager<'a>) -> &'a Type<'a> {
        type_mgr.vector(T::schema_type(type_mgr), false)
    }

    fn encode(&self, out: &mut Vec<u8>) -> Result<(), EncodeError> {
        out.extend_from_slice(&(self.len() as u64).to_le_bytes());
        encode_items(self, out)
    }

    fn decode(reader: &mut ByteReader<'_>) -> Result<Self, DecodeError> {
        let start = reader.position();
        let count = reader.read_u64()?;
        let max = CodecOptions::default().max_sequence_len;
        if count > max {
            return Err(DecodeError::new(
                DecodeErrorKind::SequenceTooLong { len: count, max },
                start,
            ));
        }
        let remaining = reader.remaining() as u64;
        let mut items = Vec::with_capacity(count.min(remaining) as usize);
        for index in 0..count {
            let before = reader.position();
            let item = T::decode(reader).map_err(|e| e.within(PathSegment::Index(index)))?;
            // Items that take no bytes are bounded by the buffer instead.
            if reader.position() == before && count > remaining {
                return Err(DecodeError::new(
                    DecodeErrorKind::SequenceTooLong {
                        len: count,
                        max: remaining,
                    },
                    start,
                ));
            }
            items.push(item);
        }
        Ok(items)
    }
}

impl<T: Encoded, const N: usize> Encoded for [T; N] {
    fn schema_type<'a>(type_mgr: &'a TypeManager<'a>) -> &'a Type<'a> {
        type_mgr.array(T::schema_type(type_mgr), N as u64, false)
    }

    fn encode(&self, out: &mut Vec<u8>) -> Result<(), EncodeError> {
        encode_items(self, out)
    }

    fn decode(reader: &mut ByteReader<'_>) -> Result<Self, DecodeError> {
        let items: Vec<T> = decode_items(N as u64, reader)?;
        items
            .try_into()
            .map_err(|_| unreachable!("decoded exactly {N} items"))
    }
}

fn encode_items<T: Encoded>(items: &[T], out: &mut Vec<u8>) -> Result<(), EncodeError> {
    for (index, item) in items.iter().enumerate() {
        item.encode(out)
            .map_err(|e| e.within(PathSegment::Index(index as u64)))?;
    }
    Ok(())
}

fn decode_items<T: Encoded>(count: u64, reader: &mut ByteReader<'_>) -> Result<Vec<T>, DecodeError> {
    let mut items = Vec::with_capacity(count.min(reader.remaining() as u64) as usize);
    for index in 0..count {
        let item = T::decode(reader).map_err(|e| e.within(PathSegment::Index(index)))?;
        items.push(item);
    }
    Ok(items)
}
