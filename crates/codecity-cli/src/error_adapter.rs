//! Error adapter for converting CodeCityError to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error types
//! and miette's rich diagnostic formatting used in the CLI.
//!
//! JSON syntax errors carry a line and column; [`ParseAdapter`] turns them
//! into a labelled span over the input so the offending spot is shown.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan, SourceSpan};

use codecity::CodeCityError;

/// Adapter for a JSON input error with its source text.
pub struct ParseAdapter<'a> {
    err: &'a serde_json::Error,
    src: &'a str,
}

impl<'a> ParseAdapter<'a> {
    pub fn new(err: &'a serde_json::Error, src: &'a str) -> Self {
        Self { err, src }
    }

    /// Byte span of the reported position, if serde_json reported one.
    fn span(&self) -> Option<SourceSpan> {
        // Line 0 means the error is not tied to a position (e.g. a type
        // mismatch found after the document was read).
        if self.err.line() == 0 {
            return None;
        }
        let offset = line_column_to_offset(self.src, self.err.line(), self.err.column());
        let len = self.src[offset..]
            .chars()
            .next()
            .map_or(0, char::len_utf8);
        Some(SourceSpan::new(offset.into(), len))
    }
}

impl fmt::Debug for ParseAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParseAdapter")
            .field("err", &self.err)
            .finish()
    }
}

impl fmt::Display for ParseAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid input: {}", self.err)
    }
}

impl std::error::Error for ParseAdapter<'_> {}

impl MietteDiagnostic for ParseAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new("codecity::parse"))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new(
            "input must be an element tree object or an array of project snapshots",
        ))
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        Some(&self.src as &dyn miette::SourceCode)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let span = self.span()?;
        let label = match self.err.classify() {
            serde_json::error::Category::Eof => "input ends here",
            serde_json::error::Category::Syntax => "syntax error here",
            _ => "unexpected value here",
        };
        Some(Box::new(std::iter::once(
            LabeledSpan::new_primary_with_span(Some(label.to_string()), span),
        )))
    }
}

/// Adapter for [`CodeCityError`] variants without source information.
pub struct ErrorAdapter<'a>(pub &'a CodeCityError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            CodeCityError::Io(_) => "codecity::io",
            CodeCityError::Parse { .. } => "codecity::parse",
            CodeCityError::History(_) => "codecity::history",
            CodeCityError::Structure(_) => "codecity::structure",
            CodeCityError::Config(_) => "codecity::config",
            CodeCityError::Export(_) => "codecity::export",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match &self.0 {
            CodeCityError::Structure(_) => Some(Box::new(
                "only CONTAINER elements may have children",
            )),
            CodeCityError::History(_) => Some(Box::new(
                "check --snapshot and --root against the snapshots in the input",
            )),
            _ => None,
        }
    }
}

/// A reportable error that can be rendered by miette.
#[derive(Debug)]
pub enum Reportable<'a> {
    /// A JSON error pointing into the input.
    Parse(ParseAdapter<'a>),
    /// A simple error without source location.
    Error(ErrorAdapter<'a>),
}

impl fmt::Display for Reportable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reportable::Parse(p) => fmt::Display::fmt(p, f),
            Reportable::Error(e) => fmt::Display::fmt(e, f),
        }
    }
}

impl std::error::Error for Reportable<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Reportable::Parse(_) => None,
            Reportable::Error(e) => e.source(),
        }
    }
}

impl MietteDiagnostic for Reportable<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Parse(p) => p.code(),
            Reportable::Error(e) => e.code(),
        }
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Parse(p) => p.help(),
            Reportable::Error(e) => e.help(),
        }
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        match self {
            Reportable::Parse(p) => p.source_code(),
            Reportable::Error(e) => e.source_code(),
        }
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        match self {
            Reportable::Parse(p) => p.labels(),
            Reportable::Error(e) => e.labels(),
        }
    }
}

/// Converts a 1-based line and column into a byte offset into `src`,
/// clamped to the end of the text.
fn line_column_to_offset(src: &str, line: usize, column: usize) -> usize {
    let line_start: usize = src
        .split_inclusive('\n')
        .take(line.saturating_sub(1))
        .map(str::len)
        .sum();
    let line_text = src[line_start..].split('\n').next().unwrap_or("");
    // serde_json counts columns in bytes and points one past the last
    // consumed byte.
    let column = column.saturating_sub(1).min(line_text.len());
    let mut offset = line_start + column;
    while !src.is_char_boundary(offset) {
        offset -= 1;
    }
    offset
}

/// Convert a [`CodeCityError`] into a list of reportable errors.
pub fn to_reportables(err: &CodeCityError) -> Vec<Reportable<'_>> {
    match err {
        CodeCityError::Parse { err: json_err, src } => {
            vec![Reportable::Parse(ParseAdapter::new(json_err, src))]
        }
        _ => vec![Reportable::Error(ErrorAdapter(err))],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_error(src: &str) -> CodeCityError {
        let err = serde_json::from_str::<serde_json::Value>(src).unwrap_err();
        CodeCityError::new_parse_error(err, src)
    }

    #[test]
    fn test_parse_error_points_into_source() {
        let src = "{\n  \"name\": \"Root\",\n  \"type\": ]\n}";
        let err = parse_error(src);

        let reportables = to_reportables(&err);
        assert_eq!(reportables.len(), 1);
        let labels: Vec<_> = reportables[0].labels().unwrap().collect();
        assert_eq!(labels.len(), 1);
        assert!(labels[0].primary());
        assert_eq!(&src[labels[0].offset()..labels[0].offset() + 1], "]");
        assert_eq!(reportables[0].code().unwrap().to_string(), "codecity::parse");
    }

    #[test]
    fn test_eof_is_clamped_to_source() {
        let src = "{\"name\": ";
        let err = parse_error(src);

        let reportables = to_reportables(&err);
        let labels: Vec<_> = reportables[0].labels().unwrap().collect();
        assert!(labels[0].offset() <= src.len());
    }

    #[test]
    fn test_non_parse_error() {
        let err = CodeCityError::Structure("Class A has children".to_string());

        let reportables = to_reportables(&err);

        assert_eq!(reportables.len(), 1);
        match &reportables[0] {
            Reportable::Error(e) => {
                assert_eq!(e.to_string(), "Structure error: Class A has children");
                assert_eq!(e.code().unwrap().to_string(), "codecity::structure");
                assert!(e.help().is_some());
            }
            Reportable::Parse(_) => panic!("Expected Error"),
        }
    }

    #[test]
    fn test_line_column_to_offset() {
        let src = "ab\ncd\n";
        assert_eq!(line_column_to_offset(src, 1, 1), 0);
        assert_eq!(line_column_to_offset(src, 2, 2), 4);
        // Past the end of a line stays on that line.
        assert_eq!(line_column_to_offset(src, 1, 10), 2);
    }
}
