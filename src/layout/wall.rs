//! Wall anchor math for doors and windows.
//!
//! An opening is placed by naming a wall of a resolved rectangle and an
//! offset from that wall's start corner. The result is a base point and a
//! rotation; the opening's drawing is authored once in a local frame and
//! rotated into place.
//!
//! Local frame: the wall runs along +x starting at the base point, the
//! room interior is towards +y, and the wall line is `y = 0`. Bottom and
//! left walls are rotated by 180° and 270°, which reverses the direction
//! the local x-axis runs along the wall; for those the drawing is shifted
//! by `-width` so every opening covers `[offset, offset + width]` measured
//! from the wall's start corner.
//!
//! Door swing names are read from inside the room facing the wall:
//! `*-left` hinges at local x = 0, `*-right` at local x = width.

use std::fmt;

use serde::Serialize;

use crate::model::{Corner, DoorSwing, DoorType};

use super::transform::RotationTransform;
use super::types::{Point, Rect, Segment};

/// One of a rectangle's four sides
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WallId {
    Top,
    Bottom,
    Left,
    Right,
}

impl WallId {
    pub const ALL: [WallId; 4] = [WallId::Top, WallId::Bottom, WallId::Left, WallId::Right];

    pub fn as_str(&self) -> &'static str {
        match self {
            WallId::Top => "top",
            WallId::Bottom => "bottom",
            WallId::Left => "left",
            WallId::Right => "right",
        }
    }

    pub fn from_name(name: &str) -> Option<WallId> {
        Self::ALL.into_iter().find(|w| w.as_str() == name)
    }

    /// Degrees, clockwise positive
    pub fn rotation(&self) -> f64 {
        match self {
            WallId::Top => 0.0,
            WallId::Right => 90.0,
            WallId::Bottom => 180.0,
            WallId::Left => 270.0,
        }
    }

    /// Corner that offsets along this wall are measured from
    pub fn base_corner(&self) -> Corner {
        match self {
            WallId::Top | WallId::Left => Corner::TopLeft,
            WallId::Bottom => Corner::BottomLeft,
            WallId::Right => Corner::TopRight,
        }
    }

    pub fn is_horizontal(&self) -> bool {
        matches!(self, WallId::Top | WallId::Bottom)
    }

    pub fn length(&self, rect: &Rect) -> f64 {
        if self.is_horizontal() {
            rect.width
        } else {
            rect.height
        }
    }

    fn reverses_direction(&self) -> bool {
        matches!(self, WallId::Bottom | WallId::Left)
    }
}

impl fmt::Display for WallId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A parsed `"<host>:<wall>"` reference
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WallRef {
    pub host: String,
    pub wall: WallId,
}

impl WallRef {
    pub fn parse(reference: &str) -> Result<Self, String> {
        let (host, wall) = reference
            .rsplit_once(':')
            .ok_or_else(|| "expected '<room>:<wall>'".to_string())?;
        if host.is_empty() {
            return Err("missing room id".to_string());
        }
        let wall = WallId::from_name(wall).ok_or_else(|| {
            format!(
                "unknown wall '{wall}' (expected one of: {})",
                WallId::ALL.map(|w| w.as_str()).join(", ")
            )
        })?;
        Ok(Self {
            host: host.to_string(),
            wall,
        })
    }
}

/// Where an opening sits on its wall
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WallPlacement {
    /// Base point: the wall's start corner moved `offset` along the wall
    pub position: Point,
    /// Degrees, clockwise positive
    pub rotation: f64,
    /// The stretch of wall the opening covers
    pub span: Segment,
}

/// Place an element of `element_width` on `wall`, `offset` from its start.
///
/// No bounds check is made; openings running past the wall end are kept.
pub fn place_on_wall(rect: &Rect, wall: WallId, offset: f64, element_width: f64) -> WallPlacement {
    let base = rect.corner(wall.base_corner());
    let (position, span) = if wall.is_horizontal() {
        (
            base.translate(offset, 0.0),
            Segment::horizontal(base.y, base.x + offset, base.x + offset + element_width),
        )
    } else {
        (
            base.translate(0.0, offset),
            Segment::vertical(base.x, base.y + offset, base.y + offset + element_width),
        )
    };
    WallPlacement {
        position,
        rotation: wall.rotation(),
        span,
    }
}

/// A quarter-circle door swing
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SwingArc {
    pub hinge: Point,
    /// Tip of the open leaf
    pub start: Point,
    /// Closing jamb
    pub end: Point,
    pub radius: f64,
    /// SVG sweep flag: true when the arc runs clockwise on screen
    pub sweep: bool,
}

/// World-space drawing primitives of a door or window
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OpeningGeometry {
    /// The gap cut into the wall
    pub outline: [Point; 4],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub leaf: Option<Segment>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arc: Option<SwingArc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pane: Option<Segment>,
}

/// What kind of drawing an opening gets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpeningStyle {
    Door { swing: DoorSwing, door_type: DoorType },
    Window,
}

/// Build an opening's drawing in its local frame and rotate it into place
pub fn opening_geometry(
    placement: &WallPlacement,
    wall: WallId,
    width: f64,
    depth: f64,
    style: OpeningStyle,
) -> OpeningGeometry {
    let transform = RotationTransform::new(placement.rotation, placement.position);
    let shift = if wall.reverses_direction() { -width } else { 0.0 };
    let world = |x: f64, y: f64| transform.local_to_world(Point::new(x + shift, y));

    let half = depth / 2.0;
    let outline = [
        world(0.0, -half),
        world(width, -half),
        world(width, half),
        world(0.0, half),
    ];

    let mut geometry = OpeningGeometry {
        outline,
        leaf: None,
        arc: None,
        pane: None,
    };

    match style {
        OpeningStyle::Window => {
            geometry.pane = Some(Segment::new(world(0.0, 0.0), world(width, 0.0)));
        }
        OpeningStyle::Door { swing, door_type } => {
            let Some((hinge_x, direction)) = swing_frame(swing, door_type, width) else {
                return geometry;
            };
            let jamb_x = width - hinge_x;
            let hinge = world(hinge_x, 0.0);
            let tip = world(hinge_x, direction * width);
            let jamb = world(jamb_x, 0.0);

            // cross product of (tip - hinge) and (jamb - hinge); rotation keeps its sign
            let cross = -direction * width * (jamb_x - hinge_x);

            geometry.leaf = Some(Segment::new(hinge, tip));
            geometry.arc = Some(SwingArc {
                hinge,
                start: tip,
                end: jamb,
                radius: width,
                sweep: cross > 0.0,
            });
        }
    }

    geometry
}

/// Hinge position and swing direction (+1 into the room) in the local frame
fn swing_frame(swing: DoorSwing, door_type: DoorType, width: f64) -> Option<(f64, f64)> {
    if door_type == DoorType::Opening {
        return None;
    }
    match swing {
        DoorSwing::InwardsLeft => Some((0.0, 1.0)),
        DoorSwing::InwardsRight => Some((width, 1.0)),
        DoorSwing::OutwardsLeft => Some((0.0, -1.0)),
        DoorSwing::OutwardsRight => Some((width, -1.0)),
        DoorSwing::Opening => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn room() -> Rect {
        Rect::new(0.0, 0.0, 4000.0, 3000.0)
    }

    #[test]
    fn test_bottom_wall_sample() {
        let placement = place_on_wall(&room(), WallId::Bottom, 1000.0, 800.0);
        assert_eq!(placement.position, Point::new(1000.0, 3000.0));
        assert_eq!(placement.rotation, 180.0);
        assert_eq!(placement.span, Segment::horizontal(3000.0, 1000.0, 1800.0));
    }

    #[test]
    fn test_each_wall_base_point_and_rotation() {
        let r = Rect::new(100.0, 200.0, 4000.0, 3000.0);
        let cases = [
            (WallId::Top, Point::new(600.0, 200.0), 0.0),
            (WallId::Bottom, Point::new(600.0, 3200.0), 180.0),
            (WallId::Left, Point::new(100.0, 700.0), 270.0),
            (WallId::Right, Point::new(4100.0, 700.0), 90.0),
        ];
        for (wall, position, rotation) in cases {
            let placement = place_on_wall(&r, wall, 500.0, 900.0);
            assert_eq!(placement.position, position, "{wall}");
            assert_eq!(placement.rotation, rotation, "{wall}");
        }
    }

    #[test]
    fn test_no_bounds_check() {
        let placement = place_on_wall(&room(), WallId::Top, 3900.0, 800.0);
        assert_eq!(placement.span, Segment::horizontal(0.0, 3900.0, 4700.0));
    }

    #[test]
    fn test_wall_ref_parse() {
        assert_eq!(
            WallRef::parse("kitchen.nook:left").unwrap(),
            WallRef {
                host: "kitchen.nook".into(),
                wall: WallId::Left
            }
        );
        assert!(WallRef::parse("kitchen").is_err());
        assert!(WallRef::parse(":top").is_err());
        let err = WallRef::parse("kitchen:north").unwrap_err();
        assert!(err.contains("unknown wall 'north'"));
    }

    #[test]
    fn test_outline_covers_span_on_every_wall() {
        let r = room();
        for wall in WallId::ALL {
            let placement = place_on_wall(&r, wall, 1000.0, 800.0);
            let geometry = opening_geometry(&placement, wall, 800.0, 100.0, OpeningStyle::Window);
            let pane = geometry.pane.unwrap();
            let (lo, hi) = if wall.is_horizontal() {
                (pane.start.x.min(pane.end.x), pane.start.x.max(pane.end.x))
            } else {
                (pane.start.y.min(pane.end.y), pane.start.y.max(pane.end.y))
            };
            assert_eq!((lo, hi), (1000.0, 1800.0), "{wall}");
        }
    }

    #[test]
    fn test_inwards_door_swings_into_room() {
        let r = room();
        for wall in WallId::ALL {
            let placement = place_on_wall(&r, wall, 1000.0, 800.0);
            let style = OpeningStyle::Door {
                swing: DoorSwing::InwardsLeft,
                door_type: DoorType::Normal,
            };
            let geometry = opening_geometry(&placement, wall, 800.0, 100.0, style);
            let tip = geometry.leaf.unwrap().end;
            assert!(
                tip.x >= r.x && tip.x <= r.right() && tip.y >= r.y && tip.y <= r.bottom(),
                "{wall}: {tip:?}"
            );
        }
    }

    #[test]
    fn test_top_wall_door_geometry() {
        let placement = place_on_wall(&room(), WallId::Top, 1000.0, 800.0);
        let style = OpeningStyle::Door {
            swing: DoorSwing::InwardsLeft,
            door_type: DoorType::Normal,
        };
        let geometry = opening_geometry(&placement, WallId::Top, 800.0, 100.0, style);
        assert_eq!(
            geometry.outline,
            [
                Point::new(1000.0, -50.0),
                Point::new(1800.0, -50.0),
                Point::new(1800.0, 50.0),
                Point::new(1000.0, 50.0),
            ]
        );
        let arc = geometry.arc.unwrap();
        assert_eq!(arc.hinge, Point::new(1000.0, 0.0));
        assert_eq!(arc.start, Point::new(1000.0, 800.0));
        assert_eq!(arc.end, Point::new(1800.0, 0.0));
        assert!(!arc.sweep);
    }

    #[test]
    fn test_outwards_right_door() {
        let placement = place_on_wall(&room(), WallId::Top, 1000.0, 800.0);
        let style = OpeningStyle::Door {
            swing: DoorSwing::OutwardsRight,
            door_type: DoorType::Normal,
        };
        let geometry = opening_geometry(&placement, WallId::Top, 800.0, 100.0, style);
        let arc = geometry.arc.unwrap();
        assert_eq!(arc.hinge, Point::new(1800.0, 0.0));
        assert_eq!(arc.start, Point::new(1800.0, -800.0));
        assert_eq!(arc.end, Point::new(1000.0, 0.0));
        // (0,-800) x (-800,0) = 0*0 - (-800)(-800) < 0
        assert!(!arc.sweep);
    }

    #[test]
    fn test_plain_openings_have_no_leaf() {
        let placement = place_on_wall(&room(), WallId::Right, 0.0, 900.0);
        for style in [
            OpeningStyle::Door {
                swing: DoorSwing::Opening,
                door_type: DoorType::Normal,
            },
            OpeningStyle::Door {
                swing: DoorSwing::InwardsRight,
                door_type: DoorType::Opening,
            },
        ] {
            let geometry = opening_geometry(&placement, WallId::Right, 900.0, 100.0, style);
            assert!(geometry.leaf.is_none());
            assert!(geometry.arc.is_none());
            assert!(geometry.pane.is_none());
        }
    }
}
