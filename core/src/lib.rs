//! Schema-driven binary serialization.
//!
//! A record layout is described by a short schema string (`"id: u32, tags:
//! [string], shape: enum Circle[r: f32], Square[side: u16]"`), parsed once
//! into an arena-allocated [`Type`] tree, and then used to decode and encode
//! flat little-endian byte buffers.

pub mod api;
pub mod codec;
pub mod encoded;
pub mod parser;
pub mod types;
pub mod values;


pub use api::{Codec, CodecOptions, Diagnostic, Error, Severity};
pub use codec::{
    ByteReader, DecodeError, DecodeErrorKind, EncodeError, EncodeErrorKind, FieldPath, PathSegment,
};
pub use encoded::{Encoded, EncodedRecord};
pub use parser::{Parsed, SchemaError, SchemaErrorKind, Span};
pub use types::{Field, Schema, Type, Variant, Width, manager::TypeManager};
pub use values::{Record, Value};
