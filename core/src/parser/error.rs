use crate::api::{Diagnostic, Severity};
use crate::parser::{Rule, Span};

/// Schema error with the offending text and location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaError {
    pub kind: SchemaErrorKind,
    /// Name of the codec field whose schema string failed, when known.
    pub field: Option<String>,
    /// The schema text the span points into.
    pub text: String,
    pub span: Span,
}

/// Specific kinds of schema errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaErrorKind {
    #[error("unknown type `{found}`")]
    UnknownType { found: String },

    #[error("missing closing bracket `]`")]
    UnclosedBracket,

    #[error("invalid sequence length `{text}`")]
    InvalidLength { text: String },

    #[error("`x:` (buffered) requires a fixed-width numeric item, found `{item}`")]
    BufferedNonPrimitive { item: String },

    #[error("expected an identifier, found `{found}`")]
    InvalidIdentifier { found: String },

    #[error("expected `: ` between a name and its type")]
    MissingSeparator,

    #[error("unexpected trailing input `{text}`")]
    TrailingInput { text: String },

    #[error("field `{name}` is declared more than once")]
    DuplicateField { name: String },

    #[error("variant `{name}` is declared more than once")]
    DuplicateVariant { name: String },

    /// Catch-all for grammar failures that don't map onto a specific kind.
    #[error("expected {expected}, found {found}")]
    UnexpectedToken { expected: String, found: String },
}

impl SchemaError {
    pub fn new(kind: SchemaErrorKind, text: &str, span: Span) -> Self {
        Self {
            kind,
            field: None,
            text: text.to_string(),
            span,
        }
    }

    /// Attach the codec field name this schema text belongs to.
    pub fn in_field(mut self, name: &str) -> Self {
        self.field = Some(name.to_string());
        self
    }

    /// Convert to a Diagnostic for rendering
    pub fn to_diagnostic(&self) -> Diagnostic {
        let (code, help) = match &self.kind {
            SchemaErrorKind::UnknownType { .. } => (
                "S001",
                Some("Known types: bool, u8..u64, i8..i64, f16, f32, f64, string, [T], [T; N], enum"),
            ),
            SchemaErrorKind::UnclosedBracket => ("S002", Some("Add the missing closing `]`")),
            SchemaErrorKind::InvalidLength { .. } => (
                "S003",
                Some("Array lengths are unsigned 64-bit decimal numbers"),
            ),
            SchemaErrorKind::BufferedNonPrimitive { .. } => {
                ("S004", Some("Only u*, i* and f* items can be buffered"))
            }
            SchemaErrorKind::InvalidIdentifier { .. } => (
                "S005",
                Some("Names start with a letter or `_` and contain only letters, digits and `_`"),
            ),
            SchemaErrorKind::MissingSeparator => ("S006", Some("Write fields as `name: type`")),
            SchemaErrorKind::TrailingInput { .. } => ("S007", None),
            SchemaErrorKind::DuplicateField { .. } => ("S008", None),
            SchemaErrorKind::DuplicateVariant { .. } => ("S009", None),
            SchemaErrorKind::UnexpectedToken { .. } => ("S999", None),
        };

        let message = match &self.field {
            Some(field) => format!("invalid schema for field `{}`: {}", field, self.kind),
            None => self.kind.to_string(),
        };

        Diagnostic {
            severity: Severity::Error,
            message,
            span: self.span.clone(),
            help: help.map(str::to_string),
            code: Some(code.to_string()),
        }
    }
}

impl core::fmt::Display for SchemaError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        if let Some(field) = &self.field {
            write!(f, "invalid schema for field `{}`: ", field)?;
        }
        write!(f, "{} at {}..{}", self.kind, self.span.0.start, self.span.0.end)
    }
}

impl std::error::Error for SchemaError {}

/// Convert Pest error to a typed SchemaError
pub fn convert_pest_error(err: pest::error::Error<Rule>, source: &str) -> SchemaError {
    use pest::error::ErrorVariant;

    let span = match err.location {
        pest::error::InputLocation::Pos(pos) => Span(pos..pos),
        pest::error::InputLocation::Span((start, end)) => Span(start..end),
    };
    let found = token_at(source, span.0.start);

    let kind = match err.variant {
        ErrorVariant::ParsingError {
            positives,
            negatives: _,
        } => classify(&positives, found),
        ErrorVariant::CustomError { message } => SchemaErrorKind::UnexpectedToken {
            expected: message,
            found,
        },
    };

    SchemaError::new(kind, source, span)
}

/// Pick the most specific error kind for the rules pest expected.
fn classify(positives: &[Rule], found: String) -> SchemaErrorKind {
    let expects = |rule: Rule| positives.contains(&rule);

    if positives.iter().any(|rule| is_type_rule(*rule)) {
        SchemaErrorKind::UnknownType { found }
    } else if expects(Rule::length) {
        SchemaErrorKind::InvalidLength { text: found }
    } else if expects(Rule::close_bracket) {
        SchemaErrorKind::UnclosedBracket
    } else if expects(Rule::field_sep) {
        SchemaErrorKind::MissingSeparator
    } else if expects(Rule::ident) {
        SchemaErrorKind::InvalidIdentifier { found }
    } else if expects(Rule::EOI) {
        SchemaErrorKind::TrailingInput { text: found }
    } else {
        SchemaErrorKind::UnexpectedToken {
            expected: format_expected_rules(positives),
            found,
        }
    }
}

fn is_type_rule(rule: Rule) -> bool {
    matches!(
        rule,
        Rule::type_expr
            | Rule::bool_type
            | Rule::string_type
            | Rule::enum_type
            | Rule::uint_type
            | Rule::int_type
            | Rule::float_type
            | Rule::sequence_type
            | Rule::int_width
            | Rule::float_width
    )
}

/// Format expected rules in a human-readable way
fn format_expected_rules(rules: &[Rule]) -> String {
    let mut concepts: Vec<&str> = Vec::new();
    for rule in rules {
        let concept = match rule {
            Rule::open_bracket => "`[`",
            Rule::close_bracket => "`]`",
            Rule::length_sep => "`; `",
            Rule::field_sep => "`: `",
            Rule::buffered => "`x:`",
            Rule::variant => "a variant",
            Rule::field => "a field",
            Rule::EOI => "end of input",
            _ => "a type",
        };
        if !concepts.contains(&concept) {
            concepts.push(concept);
        }
    }

    match concepts.len() {
        0 => "something else".to_string(),
        1 => concepts[0].to_string(),
        _ => {
            let last = concepts.pop().unwrap_or_default();
            format!("{} or {}", concepts.join(", "), last)
        }
    }
}

/// The token starting at `pos`, up to the next delimiter.
fn token_at(source: &str, pos: usize) -> String {
    let Some(rest) = source.get(pos..) else {
        return "end of input".to_string();
    };
    let token: String = rest
        .chars()
        .take_while(|c| !matches!(c, ' ' | ',' | ';' | '[' | ']' | ':'))
        .collect();
    if !token.is_empty() {
        token
    } else if let Some(c) = rest.chars().next() {
        c.to_string()
    } else {
        "end of input".to_string()
    }
}
