use crate::api::CodecOptions;
use crate::codec::{DecodeError, Decoder, EncodeError, encode_fields};
use crate::parser::{SchemaError, SchemaErrorKind, Span, parse_schema, parse_type};
use crate::types::manager::TypeManager;
use crate::types::{Field, Schema};
use crate::values::Record;
use bumpalo::Bump;
use hashbrown::HashSet;
use tracing::debug;

/// A parsed record layout, ready to decode and encode buffers.
///
/// Schema strings are parsed once, when the codec is built; decoding and
/// encoding only walk the parsed types. A codec holds no mutable state and
/// can be shared between threads.
///
/// # Example
///
/// ```
/// use binschema_core::{Codec, Record, Value};
/// use bumpalo::Bump;
///
/// let arena = Bump::new();
/// let codec = Codec::new(&arena, [("hello", "u8"), ("world", "[u8; 2]")]).unwrap();
///
/// let (record, consumed) = codec.decode(&[10, 105, 204], 0).unwrap();
/// assert_eq!(record.to_string(), "{hello: 10, world: [105, 204]}");
/// assert_eq!(consumed, 3);
///
/// assert_eq!(codec.encode(&record).unwrap(), vec![10, 105, 204]);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Codec<'a> {
    schema: Schema<'a>,
    decoder: Decoder,
}

impl<'a> Codec<'a> {
    /// Build a codec from `(field name, schema string)` pairs, in wire order.
    pub fn new<I, N, S>(arena: &'a Bump, fields: I) -> Result<Self, SchemaError>
    where
        I: IntoIterator<Item = (N, S)>,
        N: AsRef<str>,
        S: AsRef<str>,
    {
        Self::with_options(arena, fields, CodecOptions::default())
    }

    pub fn with_options<I, N, S>(
        arena: &'a Bump,
        fields: I,
        options: CodecOptions,
    ) -> Result<Self, SchemaError>
    where
        I: IntoIterator<Item = (N, S)>,
        N: AsRef<str>,
        S: AsRef<str>,
    {
        let type_mgr = TypeManager::new(arena);
        let mut parsed: Vec<Field<'a>> = Vec::new();
        let mut seen = HashSet::new();

        for (name, text) in fields {
            let (name, text) = (name.as_ref(), text.as_ref());
            let ty = parse_type(type_mgr, text).map_err(|e| e.in_field(name))?;
            if ty.len < text.len() {
                return Err(SchemaError::new(
                    SchemaErrorKind::TrailingInput {
                        text: text[ty.len..].to_string(),
                    },
                    text,
                    Span::new(ty.len, text.len()),
                )
                .in_field(name));
            }

            let field = type_mgr.field(name, ty.value);
            if !seen.insert(field.name) {
                return Err(SchemaError::new(
                    SchemaErrorKind::DuplicateField {
                        name: name.to_string(),
                    },
                    text,
                    Span::new(0, text.len()),
                )
                .in_field(name));
            }
            parsed.push(field);
        }

        Ok(Self::from_schema(type_mgr.schema(&parsed), options))
    }

    /// Build a codec from a whole schema such as `"a: u8, b: string"`.
    pub fn from_schema_str(arena: &'a Bump, text: &str) -> Result<Self, SchemaError> {
        let type_mgr = TypeManager::new(arena);
        let schema = parse_schema(type_mgr, text)?;
        Ok(Self::from_schema(schema, CodecOptions::default()))
    }

    /// Build a codec over an already parsed schema.
    pub fn from_schema(schema: Schema<'a>, options: CodecOptions) -> Self {
        debug!(
            fields = schema.len(),
            fixed_size = ?schema.fixed_size(),
            "Built codec"
        );
        Self {
            schema,
            decoder: Decoder::new(options),
        }
    }

    pub fn schema(&self) -> Schema<'a> {
        self.schema
    }

    pub fn options(&self) -> &CodecOptions {
        self.decoder.options()
    }

    /// Encoded size of every record, when it does not depend on the data.
    pub fn fixed_size(&self) -> Option<usize> {
        self.schema.fixed_size()
    }

    /// Decode one record starting at `pos`.
    ///
    /// Returns the record and the number of bytes consumed.
    pub fn decode(&self, buf: &[u8], pos: usize) -> Result<(Record, usize), DecodeError> {
        self.decoder.decode_fields(self.schema.fields, buf, pos)
    }

    pub fn encode(&self, record: &Record) -> Result<Vec<u8>, EncodeError> {
        let mut out = Vec::with_capacity(self.fixed_size().unwrap_or(0));
        self.encode_into(record, &mut out)?;
        Ok(out)
    }

    /// Append the encoding of `record` to `out`, returning the number of
    /// bytes written. On error `out` is unchanged.
    pub fn encode_into(&self, record: &Record, out: &mut Vec<u8>) -> Result<usize, EncodeError> {
        encode_fields(self.schema.fields, record, out)
    }
}
