//! Public error types.
//!
//! Each stage has its own typed error ([`SchemaError`], [`DecodeError`],
//! [`EncodeError`]); [`Error`] wraps them for callers that handle all three
//! the same way.

use crate::codec::{DecodeError, EncodeError};
use crate::parser::{SchemaError, Span};
use core::fmt;

/// Any error produced by this crate.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A schema string failed to parse.
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// A buffer did not match the schema.
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// A value did not match the schema.
    #[error(transparent)]
    Encode(#[from] EncodeError),
}

impl Error {
    /// Source-located diagnostic, available for schema errors only.
    pub fn to_diagnostic(&self) -> Option<Diagnostic> {
        match self {
            Error::Schema(err) => Some(err.to_diagnostic()),
            Error::Decode(_) | Error::Encode(_) => None,
        }
    }
}

/// A diagnostic message with a location in schema text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Severity level (error, warning, info).
    pub severity: Severity,

    /// Primary diagnostic message.
    pub message: String,

    /// Source location of the primary issue.
    pub span: Span,

    /// Optional help text suggesting how to fix the issue.
    pub help: Option<String>,

    /// Optional error code (e.g., "S001").
    pub code: Option<String>,
}

/// Severity level for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
    Info,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
            Severity::Info => write!(f, "info"),
        }
    }
}
