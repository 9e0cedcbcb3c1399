//! Stylesheet system for floor plan palettes
//!
//! Rendered SVG refers to colors through CSS custom properties named after
//! symbolic tokens (`--wall`, `--room-fill`, ...). A stylesheet maps those
//! tokens to concrete values so one plan can be drawn in several themes.

use std::path::Path;

use indexmap::IndexMap;
use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur when loading or parsing stylesheets
#[derive(Error, Debug)]
pub enum StylesheetError {
    #[error("Failed to read stylesheet file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse stylesheet TOML: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// A stylesheet mapping symbolic colors to concrete values
#[derive(Debug, Clone, PartialEq)]
pub struct Stylesheet {
    pub name: Option<String>,
    pub description: Option<String>,
    /// Token name -> CSS value, in file order
    pub colors: IndexMap<String, String>,
}

#[derive(Deserialize)]
struct TomlStylesheet {
    metadata: Option<TomlMetadata>,
    #[serde(default)]
    colors: IndexMap<String, String>,
}

#[derive(Deserialize)]
struct TomlMetadata {
    name: Option<String>,
    description: Option<String>,
}

/// Default palette: dark walls on white, pale room fills, blue openings
const DEFAULT_PALETTE: &str = r##"
[colors]
background = "#ffffff"
wall = "#2b2b2b"
room-fill = "#f7f4ee"
part-fill = "#efe9de"
door = "#8d6e63"
door-swing = "#bcaaa4"
window = "#4f8fc0"
label = "#333333"
object = "#c8c8c8"
font-family = "sans-serif"
"##;

impl Stylesheet {
    /// Load stylesheet from TOML file
    pub fn from_file(path: &Path) -> Result<Self, StylesheetError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Load stylesheet from TOML string
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self, StylesheetError> {
        let parsed: TomlStylesheet = toml::from_str(content)?;

        Ok(Stylesheet {
            name: parsed.metadata.as_ref().and_then(|m| m.name.clone()),
            description: parsed.metadata.as_ref().and_then(|m| m.description.clone()),
            colors: parsed.colors,
        })
    }

    /// Resolve a token defined in this stylesheet
    pub fn resolve(&self, token: &str) -> Option<&str> {
        self.colors.get(token).map(|s| s.as_str())
    }

    /// Resolve a token, falling back to the default palette.
    ///
    /// Fill tokens that neither palette knows fall back to the background,
    /// everything else to the wall color.
    pub fn resolve_or_default(&self, token: &str) -> String {
        if let Some(color) = self.resolve(token) {
            return color.to_string();
        }

        let default = Self::default();
        if let Some(color) = default.resolve(token) {
            return color.to_string();
        }

        if token.ends_with("-fill") {
            return default.resolve_or_default("background");
        }
        default.resolve_or_default("wall")
    }

    /// Overlay `other` on top of this stylesheet; its tokens win
    pub fn merged_with(mut self, other: Stylesheet) -> Self {
        self.name = other.name.or(self.name);
        self.description = other.description.or(self.description);
        self.colors.extend(other.colors);
        self
    }
}

impl Default for Stylesheet {
    fn default() -> Self {
        match Self::from_str(DEFAULT_PALETTE) {
            Ok(stylesheet) => stylesheet,
            Err(_) => unreachable!("default palette is valid TOML"),
        }
    }
}
