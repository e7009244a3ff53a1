//! Binary encoding and decoding driven by a [`Type`](crate::types::Type) tree.
//!
//! The wire format has no header and no embedded schema. Everything is
//! little-endian; strings are NUL-terminated; vectors carry a `u64` element
//! count; arrays carry nothing; enums write a discriminant whose width
//! depends on the variant count, then the active variant's fields.

mod decode;
mod encode;
pub mod error;
pub mod half;
mod reader;

pub use decode::{Decoder, decode_type};
pub use encode::{encode_fields, encode_type};
pub(crate) use encode::write_uint;
pub use error::{DecodeError, DecodeErrorKind, EncodeError, EncodeErrorKind, FieldPath, PathSegment};
pub use reader::ByteReader;
