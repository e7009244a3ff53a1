pub mod error;
#[allow(clippy::module_inception)]
mod parser;
mod syntax;

pub use error::{SchemaError, SchemaErrorKind};
pub use parser::{Rule, SchemaParser, parse_field, parse_schema, parse_type};
pub use syntax::{Parsed, Span};

#[cfg(test)]
mod parse_test;
