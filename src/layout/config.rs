//! Configuration for the layout engine

use super::types::Rect;

/// What to do when no top-level room attaches to the origin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OriginPolicy {
    /// Say nothing beyond the per-room resolution errors
    Ignore,
    /// Report an advisory and resolve as usual
    #[default]
    Warn,
    /// Report an error and skip resolution entirely
    Require,
}

/// Configuration options for layout computation
#[derive(Debug, Clone)]
pub struct LayoutConfig {
    /// Maximum number of fixed-point passes per namespace
    pub max_iterations: usize,

    /// Padding added around the bounds, as a fraction of the larger dimension
    pub padding_ratio: f64,

    /// Viewport used when nothing resolved
    pub default_viewport: Rect,

    /// Wall-crossing thickness for doors and windows without an explicit depth
    pub default_opening_depth: f64,

    pub origin_policy: OriginPolicy,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            max_iterations: 20,
            padding_ratio: 0.1,
            default_viewport: Rect::new(0.0, 0.0, 10_000.0, 10_000.0),
            default_opening_depth: 100.0,
            origin_policy: OriginPolicy::Warn,
        }
    }
}

impl LayoutConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the fixed-point iteration ceiling
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Set the bounds padding ratio
    pub fn with_padding_ratio(mut self, ratio: f64) -> Self {
        self.padding_ratio = ratio;
        self
    }

    /// Set the viewport used for empty layouts
    pub fn with_default_viewport(mut self, viewport: Rect) -> Self {
        self.default_viewport = viewport;
        self
    }

    /// Set the default door/window depth
    pub fn with_default_opening_depth(mut self, depth: f64) -> Self {
        self.default_opening_depth = depth;
        self
    }

    pub fn with_origin_policy(mut self, policy: OriginPolicy) -> Self {
        self.origin_policy = policy;
        self
    }
}
