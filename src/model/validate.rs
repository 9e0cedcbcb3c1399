//! Structural validation of a deserialized floor plan
//!
//! Reference problems (missing targets, cycles, bad wall names) are left to
//! the layout engine, which reports them without aborting. This pass only
//! rejects numbers that no layout could use and ids that cannot be
//! referenced unambiguously: `.` joins room and part ids into host names
//! and `:` separates a target from its corner or wall.

use crate::error::LoadError;

use super::{FloorPlan, RoomObject};

/// Check ids, sizes and offsets of every entity, collecting all violations
pub fn validate(plan: &FloorPlan) -> Result<(), Vec<LoadError>> {
    let mut errors = Vec::new();

    for room in &plan.rooms {
        check_id(&room.id, &room.id, &mut errors);
        check_extent(&room.id, room.width, room.depth, &mut errors);
        check_offset(&room.id, room.offset, &mut errors);
        check_objects(&room.id, &room.objects, &mut errors);

        for part in &room.parts {
            let entity = format!("{}.{}", room.id, part.id);
            check_id(&entity, &part.id, &mut errors);
            check_extent(&entity, part.width, part.depth, &mut errors);
            check_offset(&entity, part.offset, &mut errors);
            check_objects(&entity, &part.objects, &mut errors);
        }
    }

    let openings = plan
        .doors
        .iter()
        .enumerate()
        .map(|(i, d)| (format!("door #{}", i + 1), d.offset, d.width, d.depth))
        .chain(
            plan.windows
                .iter()
                .enumerate()
                .map(|(i, w)| (format!("window #{}", i + 1), w.offset, w.width, w.depth)),
        );
    for (entity, offset, width, depth) in openings {
        if !offset.is_finite() {
            errors.push(LoadError::invalid(&entity, "offset", "must be a finite number"));
        }
        check_positive(&entity, "width", width, &mut errors);
        if let Some(depth) = depth {
            check_positive(&entity, "depth", depth, &mut errors);
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_id(entity: &str, id: &str, errors: &mut Vec<LoadError>) {
    if id.is_empty() {
        errors.push(LoadError::invalid(entity, "id", "must not be empty"));
    } else if let Some(c) = id.chars().find(|c| matches!(c, '.' | ':')) {
        errors.push(LoadError::invalid(
            entity,
            "id",
            format!("must not contain '{c}'"),
        ));
    }
}

fn check_positive(entity: &str, field: &str, value: f64, errors: &mut Vec<LoadError>) {
    if !value.is_finite() || value <= 0.0 {
        errors.push(LoadError::invalid(
            entity,
            field,
            format!("must be a positive number, got {value}"),
        ));
    }
}

fn check_extent(entity: &str, width: f64, depth: f64, errors: &mut Vec<LoadError>) {
    check_positive(entity, "width", width, errors);
    check_positive(entity, "depth", depth, errors);
}

fn check_offset(entity: &str, offset: [f64; 2], errors: &mut Vec<LoadError>) {
    if offset.iter().any(|v| !v.is_finite()) {
        errors.push(LoadError::invalid(
            entity,
            "offset",
            "both components must be finite numbers",
        ));
    }
}

fn check_objects(host: &str, objects: &[RoomObject], errors: &mut Vec<LoadError>) {
    for (i, object) in objects.iter().enumerate() {
        let entity = format!("{} object #{}", host, i + 1);
        if !object.x.is_finite() || !object.y.is_finite() {
            errors.push(LoadError::invalid(&entity, "position", "must be finite numbers"));
        }
        let (w, h) = object.size();
        check_positive(&entity, "width", w, errors);
        check_positive(&entity, "height", h, errors);
    }
}
