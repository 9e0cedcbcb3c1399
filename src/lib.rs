//! Floorplan - anchor-graph floor plans rendered to SVG
//!
//! This library loads a floor plan document (TOML or JSON), resolves every
//! room and part from its corner attachment to an absolute rectangle, places
//! doors, windows and objects on the result, and renders it as SVG.
//!
//! # Example
//!
//! ```rust
//! use floorplan::render;
//!
//! let svg = render(r#"
//!     [[rooms]]
//!     id = "hall"
//!     attachTo = "zeropoint:top-left"
//!     width = 3000
//!     depth = 2000
//! "#).unwrap();
//! assert!(svg.contains(r#"id="room-hall""#));
//! ```

pub mod error;
pub mod layout;
pub mod model;
pub mod renderer;
pub mod stylesheet;

pub use error::LoadError;
pub use layout::{
    compute, LayoutConfig, LayoutResult, LintWarning, OriginPolicy, ResolutionError, Severity,
};
pub use model::{FloorPlan, PlanFormat};
pub use renderer::{render_svg, SvgConfig};
pub use stylesheet::Stylesheet;

use thiserror::Error;
use tracing::{debug, warn};

/// Errors that can occur during the render pipeline
///
/// Resolution problems are not errors here: they are recorded on the
/// [`LayoutResult`] and the plan still renders.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The document could not be deserialized or failed validation
    #[error("load errors: {}", format_load_errors(.0))]
    Load(Vec<LoadError>),

    /// The layout could not be written as JSON
    #[error("failed to serialize layout: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl From<Vec<LoadError>> for RenderError {
    fn from(errors: Vec<LoadError>) -> Self {
        RenderError::Load(errors)
    }
}

fn format_load_errors(errors: &[LoadError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Configuration for the complete render pipeline
#[derive(Debug, Clone, Default)]
pub struct RenderConfig {
    /// Layout configuration
    pub layout: LayoutConfig,
    /// SVG output configuration
    pub svg: SvgConfig,
    /// Stylesheet for color resolution
    pub stylesheet: Stylesheet,
    /// Format of the source document
    pub format: PlanFormat,
    /// Debug mode: log every resolved rectangle and draw shared edges
    pub debug: bool,
    /// Run lint checks in [`render_with_lint`]
    pub lint: bool,
}

impl RenderConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the layout configuration
    pub fn with_layout(mut self, config: LayoutConfig) -> Self {
        self.layout = config;
        self
    }

    /// Set the SVG configuration
    pub fn with_svg(mut self, config: SvgConfig) -> Self {
        self.svg = config;
        self
    }

    /// Set the stylesheet for color resolution
    pub fn with_stylesheet(mut self, stylesheet: Stylesheet) -> Self {
        self.stylesheet = stylesheet;
        self
    }

    /// Set the source document format
    pub fn with_format(mut self, format: PlanFormat) -> Self {
        self.format = format;
        self
    }

    /// Enable or disable debug mode
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Enable or disable lint checks
    pub fn with_lint(mut self, lint: bool) -> Self {
        self.lint = lint;
        self
    }
}

/// Render a TOML floor plan to SVG with default configuration
pub fn render(source: &str) -> Result<String, RenderError> {
    render_with_config(source, &RenderConfig::default())
}

/// Render a floor plan to SVG with custom configuration
///
/// # Example
///
/// ```rust
/// use floorplan::{render_with_config, LayoutConfig, PlanFormat, RenderConfig, SvgConfig};
///
/// let config = RenderConfig::new()
///     .with_format(PlanFormat::Json)
///     .with_layout(LayoutConfig::default().with_padding_ratio(0.0))
///     .with_svg(SvgConfig::default().with_scale(1.0));
///
/// let source = r#"{"rooms": [{"id": "a", "attachTo": "zeropoint:top-left",
///                             "width": 400, "depth": 300}]}"#;
/// let svg = render_with_config(source, &config).unwrap();
/// assert!(svg.contains(r#"viewBox="0 0 400 300" width="400" height="300""#));
/// ```
pub fn render_with_config(source: &str, config: &RenderConfig) -> Result<String, RenderError> {
    let result = layout_source(source, config)?;

    let mut svg_config = config.svg.clone();
    svg_config.debug |= config.debug;

    Ok(render_svg(&result, &svg_config, &config.stylesheet))
}

/// Render to SVG and collect lint warnings when `config.lint` is set
pub fn render_with_lint(
    source: &str,
    config: &RenderConfig,
) -> Result<(String, Vec<LintWarning>), RenderError> {
    let result = layout_source(source, config)?;
    let warnings = if config.lint {
        layout::lint::check(&result)
    } else {
        vec![]
    };

    let mut svg_config = config.svg.clone();
    svg_config.debug |= config.debug;

    Ok((render_svg(&result, &svg_config, &config.stylesheet), warnings))
}

/// Lay out a floor plan and serialize the result as pretty-printed JSON
pub fn render_json(source: &str, config: &RenderConfig) -> Result<String, RenderError> {
    let result = layout_source(source, config)?;
    Ok(serde_json::to_string_pretty(&result)?)
}

/// Load a floor plan and compute its layout.
///
/// Resolution errors are logged as warnings and kept on the result; only
/// load failures abort.
pub fn layout_source(source: &str, config: &RenderConfig) -> Result<LayoutResult, RenderError> {
    let plan = FloorPlan::load(source, config.format)?;
    let result = compute(&plan, &config.layout);

    for error in &result.errors {
        warn!(severity = ?error.severity(), "{}", error);
    }

    if config.debug {
        for room in result.rooms.values() {
            debug!(
                id = %room.id,
                x = room.rect.x,
                y = room.rect.y,
                w = room.rect.width,
                h = room.rect.height,
                "room"
            );
        }
        for part in result.parts.values() {
            debug!(
                id = %part.key,
                x = part.rect.x,
                y = part.rect.y,
                w = part.rect.width,
                h = part.rect.height,
                "part"
            );
        }
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PLAN: &str = r#"
        [[rooms]]
        id = "kitchen"
        attachTo = "living:top-right"
        width = 2000
        depth = 3000

        [[rooms]]
        id = "living"
        name = "Living room"
        attachTo = "zeropoint:top-left"
        width = 4000
        depth = 3000

        [[doors]]
        room = "living:right"
        offset = 500
        width = 900
    "#;

    #[test]
    fn test_render_simple_plan() {
        let svg = render(PLAN).unwrap();
        assert!(svg.contains("<svg"));
        assert!(svg.contains("</svg>"));
        assert!(svg.contains(r#"id="room-kitchen""#));
        assert!(svg.contains(r#"id="room-living""#));
        assert!(svg.contains(r#"id="door-0""#));
        assert!(svg.contains("Living room"));
    }

    #[test]
    fn test_render_keeps_going_on_resolution_errors() {
        let source = r#"
            [[rooms]]
            id = "living"
            attachTo = "zeropoint:top-left"
            width = 4000
            depth = 3000

            [[rooms]]
            id = "ghost"
            attachTo = "nowhere:top-left"
            width = 1
            depth = 1
        "#;
        let result = layout_source(source, &RenderConfig::default()).unwrap();
        assert_eq!(result.rooms.len(), 1);
        assert!(matches!(
            result.errors.as_slice(),
            [ResolutionError::MissingReference { .. }]
        ));
        assert!(render(source).is_ok());
    }

    #[test]
    fn test_render_load_error() {
        let err = render("[[rooms]]\nid = \"a\"\n").unwrap_err();
        assert!(matches!(err, RenderError::Load(ref errors) if errors.len() == 1));
        assert!(err.to_string().starts_with("load errors: "));
    }

    #[test]
    fn test_render_json() {
        let json = render_json(PLAN, &RenderConfig::default()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["rooms"]["kitchen"]["rect"]["x"], 4000.0);
        assert_eq!(value["openings"][0]["kind"], "door");
        assert_eq!(value["errors"].as_array().map(Vec::len), Some(0));
    }

    #[test]
    fn test_debug_mode_draws_shared_edges() {
        let source = r#"
            [[rooms]]
            id = "living"
            attachTo = "zeropoint:top-left"
            width = 4000
            depth = 3000

            [[rooms.parts]]
            id = "bay"
            attachTo = "parent:bottom-left"
            width = 1000
            depth = 500
        "#;
        let config = RenderConfig::new().with_debug(true);
        let svg = render_with_config(source, &config).unwrap();
        assert!(svg.contains(r#"<line class="fp-shared-edge" x1="0" y1="3000" x2="1000" y2="3000"/>"#));
        assert!(!render(source).unwrap().contains("fp-shared-edge"));
    }
}
