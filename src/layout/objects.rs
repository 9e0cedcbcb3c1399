//! Placement of decorative objects inside resolved rooms and parts
//!
//! Objects do not take part in the fixed-point resolution: each one is
//! positioned directly from its host rectangle in a single step.

use crate::model::RoomObject;

use super::types::{PlacedObject, Rect};

/// Position an object inside `host`.
///
/// `(x, y)` is measured from the host's `room_anchor` corner; the object's
/// own `anchor` corner is placed on the resulting point.
pub fn place_object(host: &Rect, object: &RoomObject) -> Rect {
    let reference = host.corner(object.room_anchor);
    let (width, height) = object.size();
    let (ax, ay) = object.anchor.offset(width, height);
    Rect::new(
        reference.x + object.x - ax,
        reference.y + object.y - ay,
        width,
        height,
    )
}

/// Place every object of one host, tagging them with the host's name
pub fn place_objects(host_id: &str, host: &Rect, objects: &[RoomObject]) -> Vec<PlacedObject> {
    objects
        .iter()
        .enumerate()
        .map(|(index, object)| PlacedObject {
            host: host_id.to_string(),
            index,
            shape: object.shape,
            rect: place_object(host, object),
            color: object.color.clone(),
            text: object.text.clone(),
        })
        .collect()
}
