//! Binschema - schema-driven binary serialization
//!
//! # Overview
//!
//! A record layout is written as a short schema string, one `name: type`
//! entry per field. Binschema parses the schema once and then decodes
//! little-endian byte buffers into dynamic [`Record`]s and encodes them back,
//! byte for byte. Supported types:
//!
//! - `bool`, `u8`..`u64`, `i8`..`i64`, `f16`, `f32`, `f64`
//! - `string` (NUL-terminated UTF-8)
//! - `[T]` (u64 count prefix) and `[T; N]` (fixed length)
//! - `enum A[x: u8], B[]` (smallest unsigned discriminant that fits)
//!
//! # Quick Start
//!
//! ```
//! use binschema::{Bump, Codec, Record, Value};
//!
//! let arena = Bump::new();
//! let codec = Codec::from_schema_str(&arena, "id: u16, tags: [string]").unwrap();
//!
//! let record = Record::new()
//!     .with("id", 7u16)
//!     .with("tags", vec![Value::from("a")]);
//! let bytes = codec.encode(&record).unwrap();
//! assert_eq!(bytes, b"\x07\x00\x01\x00\x00\x00\x00\x00\x00\x00a\0");
//!
//! let (decoded, consumed) = codec.decode(&bytes, 0).unwrap();
//! assert_eq!(decoded, record);
//! assert_eq!(consumed, bytes.len());
//! ```
//!
//! # Static types
//!
//! Structs and enums can derive their schema and encode without going
//! through [`Value`]:
//!
//! ```ignore
//! use binschema::{Encoded, EncodedRecord};
//!
//! #[derive(Encoded)]
//! enum Shape {
//!     Circle { radius: f32 },
//!     Square { side: u16 },
//! }
//!
//! #[derive(EncodedRecord)]
//! struct Reading {
//!     id: u32,
//!     shape: Shape,
//! }
//!
//! let bytes = Reading { id: 1, shape: Shape::Square { side: 2 } }.to_bytes()?;
//! ```
//!
//! The generated code names `binschema_core` directly, so crates using the
//! derives depend on `binschema-core` as well.

// Every codec borrows its types from an arena
pub use bumpalo::Bump;

// Re-export public API from binschema_core
pub use binschema_core::api::{Codec, CodecOptions, Diagnostic, Error, Severity};

// Re-export types, values and the codec's error types
pub use binschema_core::codec::{
    ByteReader, DecodeError, DecodeErrorKind, EncodeError, EncodeErrorKind, FieldPath, PathSegment,
};
pub use binschema_core::parser::{SchemaError, SchemaErrorKind, parse_schema, parse_type};
pub use binschema_core::types::{self, Field, Schema, Type, Variant, Width, manager::TypeManager};
pub use binschema_core::values::{self, Record, Value};

// Static encoding traits and their derives
pub use binschema_core::encoded::{Encoded, EncodedRecord};
pub use binschema_macros::{Encoded, EncodedRecord};

mod error_renderer;
pub use error_renderer::{
    render_error, render_error_to, render_error_to_string, render_error_to_string_no_color,
};
