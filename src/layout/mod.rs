//! Layout engine for floor plans
//!
//! This module takes a loaded [`FloorPlan`](crate::model::FloorPlan) and
//! resolves every room and part to an absolute rectangle, merges parts into
//! composite shapes, places doors, windows and objects, and computes the
//! viewport, producing a [`LayoutResult`].

pub mod bounds;
pub mod composite;
pub mod config;
pub mod engine;
pub mod error;
pub mod lint;
pub mod objects;
pub mod resolver;
pub mod transform;
pub mod types;
pub mod wall;

pub use bounds::compute_bounds;
pub use composite::{merge_parts, shared_edges, CompositeShape};
pub use config::{LayoutConfig, OriginPolicy};
pub use engine::compute;
pub use error::{ResolutionError, Severity};
pub use lint::{LintCategory, LintWarning};
pub use resolver::{resolve, Resolved};
pub use transform::RotationTransform;
pub use types::*;
pub use wall::{
    opening_geometry, place_on_wall, OpeningGeometry, OpeningStyle, SwingArc, WallId,
    WallPlacement, WallRef,
};
