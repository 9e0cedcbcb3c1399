//! Anchor resolver: turns relative attachments into absolute rectangles.
//!
//! Entities may reference targets declared later, so resolution is an
//! iterative fixed point rather than a topological pass. Each pass walks
//! the entities in declaration order and places every entity whose target
//! is already known; a pass that places nothing ends the iteration, and a
//! hard ceiling bounds the worst case.
//!
//! Anything still unplaced afterwards is classified:
//! - its target is not declared at all: [`ResolutionError::MissingReference`]
//! - it sits on a loop of attachments: [`ResolutionError::CircularDependency`]
//! - it hangs off one of the above: [`ResolutionError::UnresolvedDependency`]
//! - the ceiling cut off a still-progressing chain:
//!   [`ResolutionError::MaxIterationsExceeded`]

use std::collections::{HashMap, HashSet};

use indexmap::IndexMap;
use tracing::{debug, trace};

use crate::model::{AttachmentRef, Corner, Room, RoomPart, ORIGIN_ID, PARENT_ID};

use super::config::{LayoutConfig, OriginPolicy};
use super::error::ResolutionError;
use super::types::{PartKey, Point, Rect, ResolvedPart, ResolvedRoom};

/// Anything that is pinned to a target corner by its own anchor corner
pub trait Anchored {
    fn id(&self) -> &str;
    fn attach_to(&self) -> &AttachmentRef;
    fn anchor(&self) -> Corner;
    fn offset(&self) -> [f64; 2];
    fn size(&self) -> (f64, f64);
}

impl Anchored for Room {
    fn id(&self) -> &str {
        &self.id
    }

    fn attach_to(&self) -> &AttachmentRef {
        &self.attach_to
    }

    fn anchor(&self) -> Corner {
        self.anchor
    }

    fn offset(&self) -> [f64; 2] {
        self.offset
    }

    fn size(&self) -> (f64, f64) {
        (self.width, self.depth)
    }
}

impl Anchored for RoomPart {
    fn id(&self) -> &str {
        &self.id
    }

    fn attach_to(&self) -> &AttachmentRef {
        &self.attach_to
    }

    fn anchor(&self) -> Corner {
        self.anchor
    }

    fn offset(&self) -> [f64; 2] {
        self.offset
    }

    fn size(&self) -> (f64, f64) {
        (self.width, self.depth)
    }
}

/// What an attachment target id refers to
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Target<'a> {
    /// The global origin: a zero-size rectangle at (0, 0)
    Origin,
    /// The owning room of a part list
    Parent(Rect),
    /// Another entity in the same namespace
    Entity(&'a str),
}

/// The reserved names visible to one list of entities
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Namespace {
    /// Top-level rooms, which can attach to the origin
    Rooms,
    /// Parts of one room, which can attach to that room
    Parts { parent: Rect },
}

impl Namespace {
    pub fn classify<'a>(&self, target: &'a str) -> Target<'a> {
        match self {
            Namespace::Rooms if target == ORIGIN_ID => Target::Origin,
            Namespace::Parts { parent } if target == PARENT_ID => Target::Parent(*parent),
            _ => Target::Entity(target),
        }
    }
}

/// Result of resolving one namespace
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    /// Absolute rectangles by id, in declaration order
    pub rects: IndexMap<String, Rect>,
    pub errors: Vec<ResolutionError>,
    /// Number of passes run
    pub passes: usize,
}

/// Place an entity so that its anchor corner lands on `point`, then apply its offset
pub fn place<T: Anchored>(entity: &T, point: Point) -> Rect {
    let (width, height) = entity.size();
    let (ax, ay) = entity.anchor().offset(width, height);
    let [dx, dy] = entity.offset();
    Rect::new(point.x - ax + dx, point.y - ay + dy, width, height)
}

fn lookup(target: Target<'_>, resolved: &HashMap<&str, Rect>) -> Option<Rect> {
    match target {
        Target::Origin => Some(Rect::zero()),
        Target::Parent(rect) => Some(rect),
        Target::Entity(id) => resolved.get(id).copied(),
    }
}

/// Resolve one namespace of entities to absolute rectangles.
///
/// `qualify` turns a local id into the name used in error records.
pub fn solve<T: Anchored>(
    entities: &[T],
    namespace: Namespace,
    max_iterations: usize,
    qualify: impl Fn(&str) -> String,
) -> Resolution {
    let mut errors = Vec::new();

    let mut table: IndexMap<&str, &T> = IndexMap::new();
    for entity in entities {
        if table.contains_key(entity.id()) {
            errors.push(ResolutionError::DuplicateId {
                id: qualify(entity.id()),
            });
        } else {
            table.insert(entity.id(), entity);
        }
    }

    let mut resolved: HashMap<&str, Rect> = HashMap::new();
    let mut passes = 0;

    while passes < max_iterations && resolved.len() < table.len() {
        passes += 1;
        let mut progressed = false;

        for (&id, &entity) in &table {
            if resolved.contains_key(id) {
                continue;
            }
            let attach = entity.attach_to();
            if let Some(target) = lookup(namespace.classify(&attach.target), &resolved) {
                resolved.insert(id, place(entity, target.corner(attach.corner)));
                progressed = true;
            }
        }

        trace!(
            pass = passes,
            resolved = resolved.len(),
            total = table.len(),
            "fixed-point pass"
        );

        if !progressed {
            break;
        }
    }

    let unresolved: Vec<&str> = table
        .keys()
        .copied()
        .filter(|id| !resolved.contains_key(id))
        .collect();

    // chains that still lead somewhere placeable were only cut off by the
    // ceiling; everything else failed on its own and is classified
    let (cut_off, failed): (Vec<&str>, Vec<&str>) = unresolved
        .iter()
        .partition(|&&id| reaches_placed(id, &table, namespace, &resolved));

    classify_failures(&table, &failed, namespace, &qualify, &mut errors);
    if !cut_off.is_empty() {
        errors.push(ResolutionError::MaxIterationsExceeded {
            iterations: passes,
            remaining: cut_off.iter().map(|&id| qualify(id)).collect(),
        });
    }

    let rects = table
        .keys()
        .filter_map(|id| resolved.get(id).map(|rect| (id.to_string(), *rect)))
        .collect();

    Resolution {
        rects,
        errors,
        passes,
    }
}

fn classify_failures<'a, T: Anchored>(
    table: &IndexMap<&'a str, &'a T>,
    unresolved: &[&'a str],
    namespace: Namespace,
    qualify: &impl Fn(&str) -> String,
    errors: &mut Vec<ResolutionError>,
) {
    let mut in_reported_cycle: HashSet<&'a str> = HashSet::new();

    for &id in unresolved {
        let Some(entity) = table.get(id) else {
            continue;
        };
        match namespace.classify(&entity.attach_to().target) {
            // pseudo-targets are always resolvable
            Target::Origin | Target::Parent(_) => {}
            Target::Entity(target) if !table.contains_key(target) => {
                debug!(id, target, "missing attachment target");
                errors.push(ResolutionError::missing(qualify(id), target));
            }
            Target::Entity(target) => {
                if in_reported_cycle.contains(id) {
                    continue;
                }
                match find_cycle(id, table, namespace) {
                    Some(cycle) => {
                        debug!(?cycle, "attachment cycle");
                        in_reported_cycle.extend(cycle.iter().copied());
                        errors.push(ResolutionError::circular(
                            cycle.iter().map(|&id| qualify(id)).collect(),
                        ));
                    }
                    None => errors.push(ResolutionError::unresolved(qualify(id), target)),
                }
            }
        }
    }
}

/// Whether the attachment chain from `start` ends on a placed entity or a
/// pseudo-target, so that more passes would have placed it
fn reaches_placed<'a, T: Anchored>(
    start: &'a str,
    table: &IndexMap<&'a str, &'a T>,
    namespace: Namespace,
    resolved: &HashMap<&str, Rect>,
) -> bool {
    let mut visited = HashSet::new();
    let mut current = start;

    while visited.insert(current) {
        let Some(entity) = table.get(current) else {
            return false;
        };
        match namespace.classify(&entity.attach_to().target) {
            Target::Origin | Target::Parent(_) => return true,
            Target::Entity(next) if resolved.contains_key(next) => return true,
            Target::Entity(next) => match table.get_key_value(next) {
                Some((&next, _)) => current = next,
                None => return false,
            },
        }
    }
    false
}

/// Follow attachments from `start`; return the loop if it leads back to `start`
fn find_cycle<'a, T: Anchored>(
    start: &'a str,
    table: &IndexMap<&'a str, &'a T>,
    namespace: Namespace,
) -> Option<Vec<&'a str>> {
    let mut path = vec![start];
    let mut current = start;

    loop {
        let entity = table.get(current)?;
        let next = match namespace.classify(&entity.attach_to().target) {
            Target::Entity(next) => *table.get_key_value(next)?.0,
            Target::Origin | Target::Parent(_) => return None,
        };
        if next == start {
            return Some(path);
        }
        if path.contains(&next) {
            return None;
        }
        path.push(next);
        current = next;
    }
}

/// Resolved rooms and parts plus every resolution record
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Resolved {
    pub rooms: IndexMap<String, ResolvedRoom>,
    pub parts: IndexMap<PartKey, ResolvedPart>,
    pub errors: Vec<ResolutionError>,
}

/// Resolve every room, then each resolved room's parts against it
pub fn resolve(rooms: &[Room], config: &LayoutConfig) -> Resolved {
    let mut resolved = Resolved::default();

    let attaches_to_origin = rooms.iter().any(|r| r.attach_to.target == ORIGIN_ID);
    if !rooms.is_empty() && !attaches_to_origin {
        match config.origin_policy {
            OriginPolicy::Ignore => {}
            OriginPolicy::Warn => resolved
                .errors
                .push(ResolutionError::NoOriginAttachment { required: false }),
            OriginPolicy::Require => {
                resolved
                    .errors
                    .push(ResolutionError::NoOriginAttachment { required: true });
                return resolved;
            }
        }
    }

    debug!(rooms = rooms.len(), "resolving rooms");
    let top = solve(rooms, Namespace::Rooms, config.max_iterations, str::to_string);
    debug!(
        resolved = top.rects.len(),
        passes = top.passes,
        errors = top.errors.len(),
        "rooms resolved"
    );
    resolved.errors.extend(top.errors);

    let mut seen = HashSet::new();
    for room in rooms {
        if !seen.insert(room.id.as_str()) {
            continue;
        }
        let Some(&rect) = top.rects.get(&room.id) else {
            continue;
        };
        resolved.rooms.insert(
            room.id.clone(),
            ResolvedRoom {
                id: room.id.clone(),
                name: room.name.clone(),
                rect,
            },
        );

        if room.parts.is_empty() {
            continue;
        }
        let parts = solve(
            &room.parts,
            Namespace::Parts { parent: rect },
            config.max_iterations,
            |id| PartKey::new(&room.id, id).to_string(),
        );
        resolved.errors.extend(parts.errors);

        for (part_id, rect) in parts.rects {
            let name = room
                .parts
                .iter()
                .find(|p| p.id == part_id)
                .and_then(|p| p.name.clone());
            let key = PartKey::new(&room.id, part_id);
            resolved
                .parts
                .insert(key.clone(), ResolvedPart { key, name, rect });
        }
    }

    resolved
}
