//! Rotation of opening geometry from its local frame into the plan.
//!
//! Doors and windows are described once in a local frame (wall along +x,
//! room interior towards +y) and rotated into place around their base
//! point on the wall.
//!
//! ## Rotation Convention
//!
//! Rotation uses the SVG convention: clockwise positive angles, in degrees,
//! with the y-axis pointing down.
//! - 0° = no rotation
//! - 90° = rotated clockwise (right becomes down)
//! - 180° = upside down
//! - 270° = rotated counter-clockwise (right becomes up)
//!
//! Quarter turns are computed exactly so that walls aligned with the axes
//! produce exact coordinates.

use super::types::Point;

/// A 2D rotation around a pivot point
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationTransform {
    /// Rotation angle in degrees (clockwise positive, per SVG convention)
    pub angle_degrees: f64,
    /// Pivot of the rotation
    pub center: Point,
}

impl RotationTransform {
    pub fn new(angle_degrees: f64, center: Point) -> Self {
        Self {
            angle_degrees,
            center,
        }
    }

    /// Check if this is effectively a no-op (0° rotation).
    pub fn is_identity(&self) -> bool {
        self.angle_degrees.rem_euclid(360.0).abs() < f64::EPSILON
    }

    /// Cosine and sine of the angle, exact for multiples of 90°
    fn cos_sin(&self) -> (f64, f64) {
        let normalized = self.angle_degrees.rem_euclid(360.0);
        let quarter = normalized / 90.0;
        if (quarter - quarter.round()).abs() < 1e-12 {
            match quarter.round() as i64 % 4 {
                0 => (1.0, 0.0),
                1 => (0.0, 1.0),
                2 => (-1.0, 0.0),
                _ => (0.0, -1.0),
            }
        } else {
            let radians = normalized.to_radians();
            (radians.cos(), radians.sin())
        }
    }

    /// Rotate a point around the center.
    ///
    /// In SVG's coordinate system (Y pointing down), clockwise rotation
    /// uses the standard rotation matrix:
    /// ```text
    /// x' = cx + (x - cx) * cos(θ) - (y - cy) * sin(θ)
    /// y' = cy + (x - cx) * sin(θ) + (y - cy) * cos(θ)
    /// ```
    pub fn transform_point(&self, point: Point) -> Point {
        if self.is_identity() {
            return point;
        }

        let (cos_a, sin_a) = self.cos_sin();
        let dx = point.x - self.center.x;
        let dy = point.y - self.center.y;

        Point {
            x: self.center.x + dx * cos_a - dy * sin_a,
            y: self.center.y + dx * sin_a + dy * cos_a,
        }
    }

    /// Map a point given relative to the pivot (local frame) into the plan
    pub fn local_to_world(&self, local: Point) -> Point {
        self.transform_point(self.center.translate(local.x, local.y))
    }
}
