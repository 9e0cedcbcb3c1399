//! Viewport bounds over every resolved rectangle

use super::config::LayoutConfig;
use super::types::Rect;

/// Smallest rectangle covering `rects`, padded on every side by
/// `padding_ratio` of its larger dimension.
///
/// An empty input yields the configured default viewport.
pub fn compute_bounds<'a>(rects: impl IntoIterator<Item = &'a Rect>, config: &LayoutConfig) -> Rect {
    let Some(covered) = rects.into_iter().copied().reduce(|acc, r| acc.union(&r)) else {
        return config.default_viewport;
    };
    let padding = covered.width.max(covered.height) * config.padding_ratio;
    covered.inflate(padding)
}
