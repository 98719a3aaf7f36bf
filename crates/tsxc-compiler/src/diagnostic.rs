//! Human-readable reports for failed units.

use serde::{Deserialize, Serialize};
use std::fmt;
use tsxc_types::{SourceFile, TranspileError};

/// A compile error with the source line it points at, when known.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub error: TranspileError,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_line: Option<String>,
}

impl Diagnostic {
    /// Attach the offending line from `source`, if the unit carried its text.
    pub fn new(error: TranspileError, source: Option<&str>) -> Self {
        let source_line = source.and_then(|text| {
            let file = SourceFile::new(error.file.as_str(), text);
            file.line(error.span.start_line).map(str::to_string)
        });
        Self { error, source_line }
    }
}

/// ```text
/// Card.tsx:4:12: error[E202]: Spread attributes are not supported.
///    4 |   return <div {...props}/>;
///      |           ^
/// ```
impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let e = &self.error;
        if e.span.is_known() {
            write!(f, "{}:{}: ", e.file, e.span)?;
        } else {
            write!(f, "{}: ", e.file)?;
        }
        write!(f, "error[{}]: {}", e.code, e.message)?;

        if let Some(line) = &self.source_line {
            let number = e.span.start_line.to_string();
            let gutter = " ".repeat(number.len().max(4));
            let caret = " ".repeat(e.span.start_col.saturating_sub(1) as usize);
            write!(f, "\n{number:>4} | {line}")?;
            write!(f, "\n{gutter} | {caret}^")?;
        }
        if let Some(suggestion) = &e.suggestion {
            write!(f, "\n{} = help: {suggestion}", " ".repeat(4))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tsxc_types::{ErrorCode, Span};

    fn spread_error() -> TranspileError {
        TranspileError::new(
            ErrorCode::SPREAD_ATTRIBUTE,
            "spread_attribute",
            "Spread attributes are not supported.",
            Span::point(2, 15),
        )
        .in_file("Card.tsx")
    }

    #[test]
    fn renders_position_code_and_line() {
        let source = "export function Card(props: CardProps): JsxElement {\n  return <div {...props}/>;\n}\n";
        let d = Diagnostic::new(spread_error(), Some(source));
        assert_eq!(d.source_line.as_deref(), Some("  return <div {...props}/>;"));
        assert_eq!(
            d.to_string(),
            "Card.tsx:2:15: error[E202]: Spread attributes are not supported.\n   \
             2 |   return <div {...props}/>;\n     \
             |               ^"
        );
    }

    #[test]
    fn without_source_text() {
        let d = Diagnostic::new(spread_error(), None);
        assert_eq!(
            d.to_string(),
            "Card.tsx:2:15: error[E202]: Spread attributes are not supported."
        );
    }

    #[test]
    fn unknown_position_and_suggestion() {
        let err = TranspileError::new(ErrorCode::NUMBER_TYPE, "number", "No number.", Span::default())
            .with_suggestion("Use `int`.")
            .in_file("A.tsx");
        assert_eq!(
            Diagnostic::new(err, Some("x")).to_string(),
            "A.tsx: error[E306]: No number.\n     = help: Use `int`."
        );
    }
}
