use binschema::{Bump, Codec, CodecOptions, Error, TypeManager, parse_schema};
use std::fmt::Write;
use tracing::debug;

#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum CliError {
    #[error("invalid hex input: {0}")]
    #[diagnostic(
        code(binschema::hex),
        help("Pass bytes as hex digits, e.g. `0a69cc`; spaces and a `0x` prefix are allowed")
    )]
    InvalidHex(#[from] hex::FromHexError),

    #[error(transparent)]
    Codec(#[from] Error),
}

/// Parse hex input, ignoring whitespace and an optional `0x` prefix.
pub fn parse_hex(input: &str) -> Result<Vec<u8>, CliError> {
    let digits: String = input.split_whitespace().collect();
    let digits = digits
        .strip_prefix("0x")
        .or_else(|| digits.strip_prefix("0X"))
        .unwrap_or(&digits);
    Ok(hex::decode(digits)?)
}

/// One line per field with its canonical type and encoded size.
pub fn check(schema: &str) -> Result<String, CliError> {
    let arena = Bump::new();
    let codec = Codec::from_schema_str(&arena, schema).map_err(Error::from)?;

    let mut out = String::new();
    for field in codec.schema().iter() {
        let fixed = field.ty.fixed_size();
        let _ = writeln!(out, "{}: {}  ({})", field.name, field.ty, size(fixed));
    }
    let _ = writeln!(out, "record size: {}", size(codec.fixed_size()));
    Ok(out)
}

/// Decode records from `bytes` starting at `offset`.
///
/// With `all`, keeps decoding consecutive records until the buffer is
/// exhausted; otherwise decodes exactly one.
pub fn decode(
    schema: &str,
    options: CodecOptions,
    bytes: &[u8],
    offset: usize,
    all: bool,
) -> Result<String, CliError> {
    let arena = Bump::new();
    let type_mgr = TypeManager::new(&arena);
    let schema = parse_schema(type_mgr, schema).map_err(Error::from)?;
    let codec = Codec::from_schema(schema, options);

    let mut out = String::new();
    let mut pos = offset;
    loop {
        let (record, consumed) = codec.decode(bytes, pos).map_err(Error::from)?;
        debug!(position = pos, consumed, "Decoded record");
        let _ = writeln!(out, "{record}");
        let _ = writeln!(out, "consumed {consumed} bytes at offset {pos}");
        pos += consumed;
        if !all || pos >= bytes.len() || consumed == 0 {
            break;
        }
    }
    Ok(out)
}

fn size(fixed: Option<usize>) -> String {
    match fixed {
        Some(1) => "1 byte".to_string(),
        Some(n) => format!("{n} bytes"),
        None => "variable".to_string(),
    }
}
