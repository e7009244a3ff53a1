//! Error rendering using ariadne
//!
//! Schema errors point into the schema text that failed to parse, so they
//! are rendered as annotated snippets. Decode and encode errors carry a byte
//! position and a field path instead and are printed as a single line.

use crate::{Diagnostic, Error, SchemaError, Severity};
use ariadne::{ColorGenerator, Label, Report, ReportKind, Source};
use std::io::Write;

/// Render an error to stderr
///
/// # Example
/// ```no_run
/// use binschema::{Bump, Codec, render_error};
///
/// let arena = Bump::new();
/// if let Err(e) = Codec::from_schema_str(&arena, "id: u33") {
///     render_error(&e.into());
/// }
/// ```
pub fn render_error(error: &Error) {
    render_error_to_writer(error, &mut std::io::stderr(), true).ok();
}

/// Render an error to a specific writer
pub fn render_error_to(error: &Error, writer: &mut dyn Write) -> std::io::Result<()> {
    render_error_to_writer(error, writer, true)
}

/// Render an error to a String (useful for logs, web UIs, etc.)
pub fn render_error_to_string(error: &Error) -> String {
    let mut buf = Vec::new();
    render_error_to_writer(error, &mut buf, true).ok();
    String::from_utf8_lossy(&buf).to_string()
}

/// Render an error to a String without color codes (useful for tests)
pub fn render_error_to_string_no_color(error: &Error) -> String {
    let mut buf = Vec::new();
    render_error_to_writer(error, &mut buf, false).ok();
    String::from_utf8_lossy(&buf).to_string()
}

fn render_error_to_writer(
    error: &Error,
    writer: &mut dyn Write,
    use_color: bool,
) -> std::io::Result<()> {
    match error {
        Error::Schema(err) => render_schema_error(err, writer, use_color),
        Error::Decode(err) => writeln!(writer, "Decode error: {}", err),
        Error::Encode(err) => writeln!(writer, "Encode error: {}", err),
    }
}

fn render_schema_error(
    err: &SchemaError,
    writer: &mut dyn Write,
    use_color: bool,
) -> std::io::Result<()> {
    let source_name = err.field.as_deref().unwrap_or("<schema>");
    render_diagnostic(
        source_name,
        &err.text,
        &err.to_diagnostic(),
        writer,
        use_color,
    )
}

fn render_diagnostic(
    source_name: &str,
    source: &str,
    diag: &Diagnostic,
    writer: &mut dyn Write,
    use_color: bool,
) -> std::io::Result<()> {
    let mut colors = ColorGenerator::new();
    colors.next(); // Skip the first color.

    let kind = match diag.severity {
        Severity::Error => ReportKind::Error,
        Severity::Warning => ReportKind::Warning,
        Severity::Info => ReportKind::Advice,
    };

    let mut report = Report::build(kind, (source_name, diag.span.0.clone()))
        .with_message(&diag.message)
        .with_config(ariadne::Config::default().with_color(use_color));

    if let Some(code) = &diag.code {
        report = report.with_code(code);
    }

    let color = colors.next();
    report = report.with_label(
        Label::new((source_name, diag.span.0.clone()))
            .with_message(&diag.message)
            .with_color(color),
    );

    if let Some(help) = &diag.help {
        report = report.with_help(help);
    }

    report
        .finish()
        .write((source_name, Source::from(source)), &mut *writer)
}
