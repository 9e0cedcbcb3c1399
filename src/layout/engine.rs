//! Layout pipeline: room graph in, resolved geometry out.
//!
//! Stages run strictly in order: anchor resolution, composite merge per
//! room, object placement, wall placement of doors and windows, and the
//! padded viewport. The whole computation is pure; re-running it on the
//! same plan gives identical output.

use std::collections::HashSet;

use indexmap::IndexMap;
use tracing::debug;

use crate::model::FloorPlan;

use super::bounds::compute_bounds;
use super::composite::{merge_parts, CompositeShape};
use super::config::LayoutConfig;
use super::error::ResolutionError;
use super::objects::place_objects;
use super::resolver::resolve;
use super::types::{LayoutResult, OpeningKind, PartKey, PlacedObject, PlacedOpening, Rect};
use super::wall::{opening_geometry, place_on_wall, OpeningStyle, WallRef};

/// Compute the full layout of a floor plan
pub fn compute(plan: &FloorPlan, config: &LayoutConfig) -> LayoutResult {
    let resolved = resolve(&plan.rooms, config);

    let mut result = LayoutResult::new();
    result.rooms = resolved.rooms;
    result.parts = resolved.parts;
    result.errors = resolved.errors;

    let composites: IndexMap<String, CompositeShape> = result
        .rooms
        .values()
        .map(|room| (room.id.clone(), merge_parts(room, result.parts_of(&room.id))))
        .collect();
    result.composites = composites;
    debug!(
        rooms = result.rooms.len(),
        parts = result.parts.len(),
        "composites merged"
    );

    result.objects = place_all_objects(plan, &result);

    let (openings, errors) = place_openings(plan, &result, config);
    result.openings = openings;
    result.errors.extend(errors);
    debug!(openings = result.openings.len(), "openings placed");

    let rects = result.all_rects();
    result.bounds = compute_bounds(&rects, config);

    result
}

fn place_all_objects(plan: &FloorPlan, result: &LayoutResult) -> Vec<PlacedObject> {
    let mut objects = Vec::new();
    let mut seen = HashSet::new();

    for room in &plan.rooms {
        if !seen.insert(room.id.as_str()) {
            continue;
        }
        let Some(resolved) = result.rooms.get(&room.id) else {
            continue;
        };
        objects.extend(place_objects(&room.id, &resolved.rect, &room.objects));

        let mut seen_parts = HashSet::new();
        for part in &room.parts {
            // later declarations of a part id were dropped by the resolver
            if !seen_parts.insert(part.id.as_str()) {
                continue;
            }
            let key = PartKey::new(&room.id, &part.id);
            if let Some(resolved) = result.parts.get(&key) {
                objects.extend(place_objects(&key.to_string(), &resolved.rect, &part.objects));
            }
        }
    }

    objects
}

/// Find the rectangle an opening's host name refers to.
///
/// `room.part` is tried first, then room ids, then the first part with a
/// matching id in declaration order.
fn find_host(result: &LayoutResult, host: &str) -> Option<(String, Rect)> {
    if let Some((room, part)) = host.split_once('.') {
        if let Some(p) = result.parts.get(&PartKey::new(room, part)) {
            return Some((p.key.to_string(), p.rect));
        }
    }
    if let Some(r) = result.rooms.get(host) {
        return Some((r.id.clone(), r.rect));
    }
    result
        .parts
        .values()
        .find(|p| p.key.part == host)
        .map(|p| (p.key.to_string(), p.rect))
}

struct OpeningDecl<'a> {
    kind: OpeningKind,
    index: usize,
    reference: &'a str,
    offset: f64,
    width: f64,
    depth: Option<f64>,
    style: OpeningStyle,
}

fn place_openings(
    plan: &FloorPlan,
    result: &LayoutResult,
    config: &LayoutConfig,
) -> (Vec<PlacedOpening>, Vec<ResolutionError>) {
    let doors = plan.doors.iter().enumerate().map(|(index, d)| OpeningDecl {
        kind: OpeningKind::Door,
        index,
        reference: &d.room,
        offset: d.offset,
        width: d.width,
        depth: d.depth,
        style: OpeningStyle::Door {
            swing: d.swing,
            door_type: d.door_type,
        },
    });
    let windows = plan.windows.iter().enumerate().map(|(index, w)| OpeningDecl {
        kind: OpeningKind::Window,
        index,
        reference: &w.room,
        offset: w.offset,
        width: w.width,
        depth: w.depth,
        style: OpeningStyle::Window,
    });

    let mut openings = Vec::new();
    let mut errors = Vec::new();
    for decl in doors.chain(windows) {
        match place_opening(&decl, result, config) {
            Ok(opening) => openings.push(opening),
            Err(err) => {
                debug!(%err, "opening skipped");
                errors.push(err);
            }
        }
    }
    (openings, errors)
}

fn place_opening(
    decl: &OpeningDecl<'_>,
    result: &LayoutResult,
    config: &LayoutConfig,
) -> Result<PlacedOpening, ResolutionError> {
    let element = format!("{} #{}", decl.kind, decl.index + 1);
    let invalid = |reason: String| ResolutionError::invalid_wall(&element, decl.reference, reason);

    let wall_ref = WallRef::parse(decl.reference).map_err(invalid)?;
    let (host, rect) = find_host(result, &wall_ref.host).ok_or_else(|| {
        invalid(format!("room or part '{}' is not resolved", wall_ref.host))
    })?;

    let depth = decl.depth.unwrap_or(config.default_opening_depth);
    let placement = place_on_wall(&rect, wall_ref.wall, decl.offset, decl.width);
    let geometry = opening_geometry(&placement, wall_ref.wall, decl.width, depth, decl.style);

    let (swing, door_type) = match decl.style {
        OpeningStyle::Door { swing, door_type } => (Some(swing), Some(door_type)),
        OpeningStyle::Window => (None, None),
    };

    Ok(PlacedOpening {
        kind: decl.kind,
        index: decl.index,
        host,
        wall: wall_ref.wall,
        offset: decl.offset,
        width: decl.width,
        depth,
        position: placement.position,
        rotation: placement.rotation,
        wall_length: wall_ref.wall.length(&rect),
        swing,
        door_type,
        geometry,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::types::{Point, Segment};
    use crate::layout::wall::WallId;
    use crate::model::{AttachmentRef, Corner, Door, Room, RoomObject, RoomPart, Window};
    use pretty_assertions::assert_eq;

    fn sample_plan() -> FloorPlan {
        FloorPlan::new(vec![
            Room::new("A", 4000.0, 3000.0, AttachmentRef::origin(Corner::TopLeft))
                .with_part(RoomPart::new(
                    "bay",
                    1000.0,
                    1000.0,
                    AttachmentRef::parent(Corner::TopRight),
                ))
                .with_object(RoomObject::square(100.0, 100.0, 500.0, 500.0)),
            Room::new("B", 2000.0, 2000.0, AttachmentRef::new("A", Corner::BottomLeft)),
        ])
        .with_door(Door::new("A:bottom", 1000.0, 800.0))
        .with_window(Window::new("A.bay:right", 100.0, 600.0))
    }

    #[test]
    fn test_compute_full_pipeline() {
        let result = compute(&sample_plan(), &LayoutConfig::default());

        assert!(result.errors.is_empty(), "{:?}", result.errors);
        assert_eq!(result.rooms["B"].rect, Rect::new(0.0, 3000.0, 2000.0, 2000.0));

        let composite = &result.composites["A"];
        assert_eq!(composite.rectangles.len(), 2);
        assert_eq!(
            composite.shared_edges,
            vec![Segment::vertical(4000.0, 0.0, 1000.0)]
        );
        // B has no parts
        assert_eq!(result.composites["B"].rectangles.len(), 1);

        assert_eq!(result.objects.len(), 1);
        assert_eq!(result.objects[0].rect, Rect::new(100.0, 100.0, 500.0, 500.0));

        let door = &result.openings[0];
        assert_eq!(door.kind, OpeningKind::Door);
        assert_eq!(door.position, Point::new(1000.0, 3000.0));
        assert_eq!(door.rotation, 180.0);
        assert_eq!(door.depth, 100.0);

        let window = &result.openings[1];
        assert_eq!(window.host, "A.bay");
        assert_eq!(window.wall, WallId::Right);
        assert_eq!(window.position, Point::new(5000.0, 100.0));
        assert_eq!(window.wall_length, 1000.0);

        // rooms + part span (0,0)-(5000,5000); padding 500 each side
        assert_eq!(result.bounds, Rect::new(-500.0, -500.0, 6000.0, 6000.0));
    }

    #[test]
    fn test_invalid_wall_references_are_skipped() {
        let plan = sample_plan()
            .with_door(Door::new("A:north", 0.0, 800.0))
            .with_door(Door::new("ghost:top", 0.0, 800.0))
            .with_window(Window::new("A", 0.0, 800.0));
        let result = compute(&plan, &LayoutConfig::default());

        assert_eq!(result.openings.len(), 2);
        assert_eq!(result.errors.len(), 3);
        assert!(result
            .errors
            .iter()
            .all(|e| matches!(e, ResolutionError::InvalidWallReference { .. })));
        assert!(result.errors[1].to_string().contains("'ghost' is not resolved"));
    }

    #[test]
    fn test_unqualified_part_host() {
        let plan = sample_plan().with_door(Door::new("bay:top", 0.0, 500.0));
        let result = compute(&plan, &LayoutConfig::default());
        let door = result.openings.iter().find(|o| o.index == 1).unwrap();
        assert_eq!(door.host, "A.bay");
        assert_eq!(door.position, Point::new(4000.0, 0.0));
    }

    #[test]
    fn test_duplicate_part_objects_are_ignored() {
        let plan = FloorPlan::new(vec![Room::new(
            "A",
            4000.0,
            3000.0,
            AttachmentRef::origin(Corner::TopLeft),
        )
        .with_part(
            RoomPart::new("p", 1000.0, 1000.0, AttachmentRef::parent(Corner::TopLeft))
                .with_object(RoomObject::square(0.0, 0.0, 100.0, 100.0)),
        )
        .with_part(
            RoomPart::new("p", 500.0, 500.0, AttachmentRef::parent(Corner::BottomRight))
                .with_object(RoomObject::square(50.0, 50.0, 200.0, 200.0)),
        )]);
        let result = compute(&plan, &LayoutConfig::default());

        assert_eq!(
            result.errors,
            vec![ResolutionError::DuplicateId { id: "A.p".into() }]
        );
        assert_eq!(result.objects.len(), 1);
        assert_eq!(result.objects[0].host, "A.p");
        assert_eq!(result.objects[0].rect, Rect::new(0.0, 0.0, 100.0, 100.0));
    }

    #[test]
    fn test_compute_is_idempotent() {
        let plan = sample_plan();
        let config = LayoutConfig::default();
        assert_eq!(compute(&plan, &config), compute(&plan, &config));
    }

    #[test]
    fn test_empty_plan_uses_default_viewport() {
        let result = compute(&FloorPlan::default(), &LayoutConfig::default());
        assert!(result.rooms.is_empty());
        assert!(result.errors.is_empty());
        assert_eq!(result.bounds, LayoutConfig::default().default_viewport);
    }
}
