//! Resolution errors reported by the layout engine
//!
//! None of these abort a layout: the offending entity (and whatever depends
//! on it) is left out and everything else still resolves.

use serde::Serialize;
use thiserror::Error;

/// How a host application should surface a resolution record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ResolutionError {
    /// `attachTo` names an id that is not defined in its namespace
    #[error("'{id}' is attached to undefined target '{target}'")]
    MissingReference { id: String, target: String },

    /// A set of entities attach to each other in a loop
    #[error("circular attachment: {}", format_cycle(.cycle))]
    CircularDependency { cycle: Vec<String> },

    /// The target exists but could not be resolved itself
    #[error("'{id}' depends on unresolved target '{target}'")]
    UnresolvedDependency { id: String, target: String },

    /// The iteration ceiling was reached while passes were still progressing
    #[error(
        "gave up after {} passes with {} unresolved: {}",
        iterations,
        remaining.len(),
        remaining.join(", ")
    )]
    MaxIterationsExceeded {
        iterations: usize,
        remaining: Vec<String>,
    },

    /// The same id is declared twice in one namespace
    #[error("duplicate id '{id}' ignored")]
    DuplicateId { id: String },

    /// A door or window names an unknown wall or an unresolved host
    #[error("{element} has invalid wall reference '{reference}': {reason}")]
    InvalidWallReference {
        element: String,
        reference: String,
        reason: String,
    },

    /// No top-level room attaches to the origin
    #[error("no room is attached to the origin")]
    NoOriginAttachment { required: bool },
}

fn format_cycle(cycle: &[String]) -> String {
    match cycle.first() {
        Some(first) => format!("{} -> {}", cycle.join(" -> "), first),
        None => String::new(),
    }
}

impl ResolutionError {
    pub fn missing(id: impl Into<String>, target: impl Into<String>) -> Self {
        Self::MissingReference {
            id: id.into(),
            target: target.into(),
        }
    }

    pub fn circular(cycle: Vec<String>) -> Self {
        Self::CircularDependency { cycle }
    }

    pub fn unresolved(id: impl Into<String>, target: impl Into<String>) -> Self {
        Self::UnresolvedDependency {
            id: id.into(),
            target: target.into(),
        }
    }

    pub fn invalid_wall(
        element: impl Into<String>,
        reference: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidWallReference {
            element: element.into(),
            reference: reference.into(),
            reason: reason.into(),
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            Self::MissingReference { .. }
            | Self::CircularDependency { .. }
            | Self::UnresolvedDependency { .. } => Severity::Error,
            Self::NoOriginAttachment { required } if *required => Severity::Error,
            Self::NoOriginAttachment { .. }
            | Self::MaxIterationsExceeded { .. }
            | Self::DuplicateId { .. }
            | Self::InvalidWallReference { .. } => Severity::Warning,
        }
    }

    /// Ids of the entities this record left out of the layout
    pub fn entities(&self) -> Vec<&str> {
        match self {
            Self::MissingReference { id, .. }
            | Self::UnresolvedDependency { id, .. }
            | Self::DuplicateId { id } => vec![id.as_str()],
            Self::CircularDependency { cycle } => cycle.iter().map(String::as_str).collect(),
            Self::MaxIterationsExceeded { remaining, .. } => {
                remaining.iter().map(String::as_str).collect()
            }
            Self::InvalidWallReference { element, .. } => vec![element.as_str()],
            Self::NoOriginAttachment { .. } => vec![],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_reference_display() {
        let err = ResolutionError::missing("B", "ghost");
        insta::assert_snapshot!(err.to_string(), @"'B' is attached to undefined target 'ghost'");
    }

    #[test]
    fn test_cycle_display_closes_loop() {
        let err = ResolutionError::circular(vec!["a".into(), "b".into(), "c".into()]);
        insta::assert_snapshot!(err.to_string(), @"circular attachment: a -> b -> c -> a");
    }

    #[test]
    fn test_max_iterations_display() {
        let err = ResolutionError::MaxIterationsExceeded {
            iterations: 20,
            remaining: vec!["x".into(), "y".into()],
        };
        insta::assert_snapshot!(err.to_string(), @"gave up after 20 passes with 2 unresolved: x, y");
    }

    #[test]
    fn test_severity() {
        assert_eq!(ResolutionError::missing("a", "b").severity(), Severity::Error);
        assert_eq!(
            ResolutionError::invalid_wall("door #1", "a:up", "unknown wall").severity(),
            Severity::Warning
        );
        assert_eq!(
            ResolutionError::NoOriginAttachment { required: true }.severity(),
            Severity::Error
        );
        assert_eq!(
            ResolutionError::NoOriginAttachment { required: false }.severity(),
            Severity::Warning
        );
    }

    #[test]
    fn test_entities() {
        let err = ResolutionError::circular(vec!["a".into(), "b".into()]);
        assert_eq!(err.entities(), vec!["a", "b"]);
    }
}
