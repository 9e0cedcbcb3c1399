//! Configuration for SVG rendering

/// Configuration options for SVG output
#[derive(Debug, Clone, PartialEq)]
pub struct SvgConfig {
    /// Whether to include the XML declaration
    pub standalone: bool,

    /// Whether to format output with indentation
    pub pretty_print: bool,

    /// Prefix for CSS class names (e.g., "fp-" for "fp-wall")
    pub class_prefix: Option<String>,

    /// Output pixels per plan unit; sets the `width`/`height` attributes
    pub scale: f64,

    /// Stroke width of walls, in plan units
    pub wall_stroke_width: f64,

    /// Stroke width of door leaves, swings and window panes
    pub detail_stroke_width: f64,

    /// Font size of room labels and object text, in plan units
    pub font_size: f64,

    /// Draw room names at the room center
    pub show_labels: bool,

    /// Also draw shared edges between composite members
    pub debug: bool,
}

impl Default for SvgConfig {
    fn default() -> Self {
        Self {
            standalone: true,
            pretty_print: true,
            class_prefix: Some("fp-".to_string()),
            scale: 0.1,
            wall_stroke_width: 40.0,
            detail_stroke_width: 15.0,
            font_size: 250.0,
            show_labels: true,
            debug: false,
        }
    }
}

impl SvgConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether output is standalone
    pub fn with_standalone(mut self, standalone: bool) -> Self {
        self.standalone = standalone;
        self
    }

    /// Set whether to pretty-print output
    pub fn with_pretty_print(mut self, pretty: bool) -> Self {
        self.pretty_print = pretty;
        self
    }

    /// Set the CSS class prefix
    pub fn with_class_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.class_prefix = Some(prefix.into());
        self
    }

    /// Remove the CSS class prefix
    pub fn without_class_prefix(mut self) -> Self {
        self.class_prefix = None;
        self
    }

    /// Set the output scale
    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    /// Set the wall stroke width
    pub fn with_wall_stroke_width(mut self, width: f64) -> Self {
        self.wall_stroke_width = width;
        self
    }

    /// Set the label font size
    pub fn with_font_size(mut self, size: f64) -> Self {
        self.font_size = size;
        self
    }

    /// Enable or disable room labels
    pub fn with_labels(mut self, show: bool) -> Self {
        self.show_labels = show;
        self
    }

    /// Enable or disable debug overlays
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }
}
