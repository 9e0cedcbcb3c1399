//! Error types for loading and validating floor plan documents

use ariadne::{Color, Label, Report, ReportKind, Source};
use thiserror::Error;

/// Byte range in source text
pub type Span = std::ops::Range<usize>;

/// A blocking problem with the input document: nothing can be laid out
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("TOML error: {message}")]
    Toml { message: String, span: Option<Span> },

    #[error("JSON error at line {line}, column {column}: {message}")]
    Json {
        message: String,
        line: usize,
        column: usize,
    },

    #[error("invalid {field} on '{entity}': {reason}")]
    Invalid {
        entity: String,
        field: String,
        reason: String,
    },
}

impl LoadError {
    pub fn invalid(
        entity: impl Into<String>,
        field: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::Invalid {
            entity: entity.into(),
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Locate the error in the source text, if possible
    pub fn span(&self, source: &str) -> Option<Span> {
        match self {
            LoadError::Toml { span, .. } => span.clone(),
            LoadError::Json { line, column, .. } => {
                let start = line_column_offset(source, *line, *column)?;
                Some(start..(start + 1).min(source.len()))
            }
            LoadError::Invalid { entity, .. } => {
                // Entities are reported as `room.part` or `room object #n`; the
                // leading identifier is what appears in the document.
                let id = entity
                    .split(['.', ' '])
                    .next()
                    .filter(|id| !id.is_empty())?;
                let quoted = format!("\"{id}\"");
                let start = source.find(&quoted)?;
                Some(start..start + quoted.len())
            }
        }
    }

    /// Format the error with source context using ariadne
    pub fn format(&self, source: &str, filename: &str) -> String {
        let Some(span) = self.span(source) else {
            return format!("Error: {self}");
        };

        let message = self.to_string();
        let mut buf = Vec::new();
        let written = Report::build(ReportKind::Error, filename, span.start)
            .with_message(&message)
            .with_label(
                Label::new((filename, span))
                    .with_message(self.label())
                    .with_color(Color::Red),
            )
            .finish()
            .write((filename, Source::from(source)), &mut buf);

        match written {
            Ok(()) => String::from_utf8_lossy(&buf).into_owned(),
            Err(_) => format!("Error: {message}"),
        }
    }

    fn label(&self) -> String {
        match self {
            LoadError::Toml { message, .. } | LoadError::Json { message, .. } => message.clone(),
            LoadError::Invalid { field, reason, .. } => format!("{field} {reason}"),
        }
    }
}

impl From<toml::de::Error> for LoadError {
    fn from(err: toml::de::Error) -> Self {
        LoadError::Toml {
            message: err.message().trim().to_string(),
            span: err.span(),
        }
    }
}

impl From<serde_json::Error> for LoadError {
    fn from(err: serde_json::Error) -> Self {
        // serde_json appends " at line X column Y" to its Display output
        let full = err.to_string();
        let message = full
            .rsplit_once(" at line ")
            .map(|(m, _)| m.to_string())
            .unwrap_or(full);
        LoadError::Json {
            message,
            line: err.line(),
            column: err.column(),
        }
    }
}

/// Convert a 1-based line/column pair to a byte offset
fn line_column_offset(source: &str, line: usize, column: usize) -> Option<usize> {
    if line == 0 {
        return None;
    }
    let mut offset = 0;
    for (i, text) in source.split_inclusive('\n').enumerate() {
        if i + 1 == line {
            let col = column.saturating_sub(1).min(text.len());
            return Some(offset + col);
        }
        offset += text.len();
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_column_offset() {
        let src = "ab\ncd\nef";
        assert_eq!(line_column_offset(src, 1, 1), Some(0));
        assert_eq!(line_column_offset(src, 2, 2), Some(4));
        assert_eq!(line_column_offset(src, 3, 1), Some(6));
        assert_eq!(line_column_offset(src, 4, 1), None);
        assert_eq!(line_column_offset(src, 0, 1), None);
    }

    #[test]
    fn test_invalid_display() {
        let err = LoadError::invalid("kitchen", "width", "must be a positive number, got 0");
        insta::assert_snapshot!(
            err.to_string(),
            @"invalid width on 'kitchen': must be a positive number, got 0"
        );
    }

    #[test]
    fn test_invalid_span_points_at_quoted_id() {
        let src = "[[rooms]]\nid = \"kitchen\"\n";
        let err = LoadError::invalid("kitchen.island", "width", "bad");
        let span = err.span(src).unwrap();
        assert_eq!(&src[span], "\"kitchen\"");
    }

    #[test]
    fn test_toml_error_has_span() {
        let err: LoadError = toml::from_str::<toml::Value>("a = ").unwrap_err().into();
        assert!(matches!(err, LoadError::Toml { span: Some(_), .. }));
        let formatted = err.format("a = ", "plan.toml");
        assert!(formatted.contains("plan.toml"));
    }

    #[test]
    fn test_json_error_strips_location_suffix() {
        let err: LoadError = serde_json::from_str::<serde_json::Value>("{\n  \"a\": }")
            .unwrap_err()
            .into();
        match &err {
            LoadError::Json { message, line, .. } => {
                assert!(!message.contains(" at line "));
                assert_eq!(*line, 2);
            }
            other => panic!("expected JSON error, got {other:?}"),
        }
    }
}
