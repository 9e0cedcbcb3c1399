//! Core types for the layout engine

use std::fmt;

use indexmap::IndexMap;
use serde::Serialize;

use crate::model::{Corner, DoorSwing, DoorType, ObjectShape};

use super::composite::CompositeShape;
use super::error::ResolutionError;
use super::wall::{OpeningGeometry, WallId};

/// Tolerance used when comparing coordinates
pub const EPSILON: f64 = 1e-9;

/// Compare two coordinates within [`EPSILON`]
pub fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() <= EPSILON
}

/// A 2D point in the coordinate system (y grows downwards)
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn origin() -> Self {
        Self::new(0.0, 0.0)
    }

    pub fn translate(&self, dx: f64, dy: f64) -> Point {
        Point::new(self.x + dx, self.y + dy)
    }
}

/// An axis-aligned rectangle given by its top-left corner and extent
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create a zero-sized rectangle at the origin
    pub fn zero() -> Self {
        Self::new(0.0, 0.0, 0.0, 0.0)
    }

    /// Right edge x-coordinate
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge y-coordinate
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn top_left(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Center point of the rectangle
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Absolute position of one of the four corners
    pub fn corner(&self, corner: Corner) -> Point {
        let (dx, dy) = corner.offset(self.width, self.height);
        self.top_left().translate(dx, dy)
    }

    /// Check whether the interiors of two rectangles overlap
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right() - EPSILON
            && self.right() > other.x + EPSILON
            && self.y < other.bottom() - EPSILON
            && self.bottom() > other.y + EPSILON
    }

    /// Compute the union of two rectangles (smallest rectangle containing both)
    pub fn union(&self, other: &Rect) -> Rect {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        let right = self.right().max(other.right());
        let bottom = self.bottom().max(other.bottom());
        Rect::new(x, y, right - x, bottom - y)
    }

    /// Grow the rectangle by `amount` on every side
    pub fn inflate(&self, amount: f64) -> Rect {
        Rect::new(
            self.x - amount,
            self.y - amount,
            self.width + 2.0 * amount,
            self.height + 2.0 * amount,
        )
    }
}

/// A straight line segment
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Segment {
    pub start: Point,
    pub end: Point,
}

impl Segment {
    pub fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    pub fn horizontal(y: f64, x1: f64, x2: f64) -> Self {
        Self::new(Point::new(x1.min(x2), y), Point::new(x1.max(x2), y))
    }

    pub fn vertical(x: f64, y1: f64, y2: f64) -> Self {
        Self::new(Point::new(x, y1.min(y2)), Point::new(x, y1.max(y2)))
    }

    pub fn length(&self) -> f64 {
        (self.end.x - self.start.x).hypot(self.end.y - self.start.y)
    }
}

/// Identifier of a part, qualified by the room that owns it
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(into = "String")]
pub struct PartKey {
    pub room: String,
    pub part: String,
}

impl PartKey {
    pub fn new(room: impl Into<String>, part: impl Into<String>) -> Self {
        Self {
            room: room.into(),
            part: part.into(),
        }
    }
}

impl fmt::Display for PartKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.room, self.part)
    }
}

impl From<PartKey> for String {
    fn from(key: PartKey) -> Self {
        key.to_string()
    }
}

/// A room with its absolute rectangle
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedRoom {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub rect: Rect,
}

/// A room part with its absolute rectangle
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedPart {
    pub key: PartKey,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub rect: Rect,
}

/// A decorative object placed in world coordinates
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacedObject {
    /// Room id or qualified part key of the host
    pub host: String,
    pub index: usize,
    pub shape: ObjectShape,
    /// Bounding box; circles are inscribed in it
    pub rect: Rect,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OpeningKind {
    Door,
    Window,
}

impl fmt::Display for OpeningKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OpeningKind::Door => write!(f, "door"),
            OpeningKind::Window => write!(f, "window"),
        }
    }
}

/// A door or window placed on a resolved wall
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacedOpening {
    pub kind: OpeningKind,
    /// Index into the plan's door or window list
    pub index: usize,
    /// Room id or qualified part key of the host
    pub host: String,
    pub wall: WallId,
    pub offset: f64,
    pub width: f64,
    pub depth: f64,
    /// Base point on the wall (see [`super::wall::place_on_wall`])
    pub position: Point,
    /// Degrees, clockwise positive
    pub rotation: f64,
    /// Length of the host wall
    pub wall_length: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub swing: Option<DoorSwing>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub door_type: Option<DoorType>,
    pub geometry: OpeningGeometry,
}

impl PlacedOpening {
    /// Stable identifier used by renderers, e.g. `door-0`
    pub fn element_id(&self) -> String {
        format!("{}-{}", self.kind, self.index)
    }
}

/// Everything the renderer needs: resolved rectangles, composites,
/// openings, objects, viewport and the advisory error list
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutResult {
    pub rooms: IndexMap<String, ResolvedRoom>,
    pub parts: IndexMap<PartKey, ResolvedPart>,
    /// One composite shape per resolved room, keyed by room id
    pub composites: IndexMap<String, CompositeShape>,
    pub openings: Vec<PlacedOpening>,
    pub objects: Vec<PlacedObject>,
    /// Padded viewport covering every resolved rectangle
    pub bounds: Rect,
    pub errors: Vec<ResolutionError>,
}

impl LayoutResult {
    pub fn new() -> Self {
        Self {
            rooms: IndexMap::new(),
            parts: IndexMap::new(),
            composites: IndexMap::new(),
            openings: vec![],
            objects: vec![],
            bounds: Rect::zero(),
            errors: vec![],
        }
    }

    /// Parts belonging to one room, in declaration order
    pub fn parts_of<'a>(&'a self, room: &'a str) -> impl Iterator<Item = &'a ResolvedPart> + 'a {
        self.parts.values().filter(move |p| p.key.room == room)
    }

    /// Every resolved rectangle: rooms followed by their parts
    pub fn all_rects(&self) -> Vec<Rect> {
        self.composites
            .values()
            .flat_map(|c| c.rectangles.iter().copied())
            .collect()
    }

    /// Whether any error-severity record was produced
    pub fn has_errors(&self) -> bool {
        self.errors
            .iter()
            .any(|e| e.severity() == super::error::Severity::Error)
    }
}

impl Default for LayoutResult {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_corners() {
        let r = Rect::new(10.0, 20.0, 100.0, 50.0);
        assert_eq!(r.corner(Corner::TopLeft), Point::new(10.0, 20.0));
        assert_eq!(r.corner(Corner::TopRight), Point::new(110.0, 20.0));
        assert_eq!(r.corner(Corner::BottomLeft), Point::new(10.0, 70.0));
        assert_eq!(r.corner(Corner::BottomRight), Point::new(110.0, 70.0));
    }

    #[test]
    fn test_zero_rect_corners_coincide() {
        let origin = Rect::zero();
        for corner in Corner::ALL {
            assert_eq!(origin.corner(corner), Point::origin());
        }
    }

    #[test]
    fn test_intersects_excludes_touching() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(10.0, 0.0, 10.0, 10.0);
        let c = Rect::new(5.0, 5.0, 10.0, 10.0);
        assert!(!a.intersects(&b));
        assert!(a.intersects(&c));
    }

    #[test]
    fn test_union_and_inflate() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(20.0, 5.0, 10.0, 10.0);
        assert_eq!(a.union(&b), Rect::new(0.0, 0.0, 30.0, 15.0));
        assert_eq!(a.inflate(2.0), Rect::new(-2.0, -2.0, 14.0, 14.0));
    }

    #[test]
    fn test_part_key_display() {
        assert_eq!(PartKey::new("kitchen", "island").to_string(), "kitchen.island");
    }
}
