//! SVG renderer for floor plan layouts
//!
//! This module takes a LayoutResult and produces an SVG string whose
//! colors come from CSS custom properties, so a stylesheet can re-theme it.

pub mod config;
pub mod svg;

pub use config::SvgConfig;
pub use svg::{render_svg, SvgBuilder};
