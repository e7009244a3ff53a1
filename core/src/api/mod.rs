//! Public API.
//!
//! [`Codec`] is the entry point: build it once from field schemas, then
//! decode and encode buffers with it.
//!
//! # Example
//!
//! ```
//! use binschema_core::api::{Codec, CodecOptions};
//! use binschema_core::{Record, Value};
//! use bumpalo::Bump;
//!
//! let arena = Bump::new();
//! let codec = Codec::with_options(
//!     &arena,
//!     [("name", "string"), ("shape", "enum Circle[r: f32], Square[side: u16]")],
//!     CodecOptions { strict_strings: true, ..CodecOptions::default() },
//! )
//! .unwrap();
//!
//! let record = Record::new()
//!     .with("name", "unit")
//!     .with("shape", Value::enumeration("Square", Record::new().with("side", 1u16)));
//! let bytes = codec.encode(&record).unwrap();
//! assert_eq!(bytes, b"unit\0\x01\x01\x00");
//! assert_eq!(codec.decode(&bytes, 0).unwrap(), (record, 8));
//! ```

mod codec;
pub mod error;
pub mod options;

pub use codec::Codec;
pub use error::{Diagnostic, Error, Severity};
pub use options::CodecOptions;
