//! Room graph model
//!
//! The declarative input to the layout engine: rooms, their parts and
//! decorative objects, plus the doors and windows hosted on their walls.
//! Every room and part carries an [`AttachmentRef`] naming the corner of
//! another rectangle (or of the origin) that it is pinned to.
//!
//! The model is deserialized wholesale from a TOML or JSON document and is
//! treated as immutable input by the layout engine.

pub mod validate;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::LoadError;

pub use validate::validate;

/// Reserved target id for the global origin at (0, 0)
pub const ORIGIN_ID: &str = "zeropoint";

/// Reserved target id a part uses to attach to its owning room
pub const PARENT_ID: &str = "parent";

/// One of a rectangle's four corners
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Corner {
    #[default]
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Corner {
    pub const ALL: [Corner; 4] = [
        Corner::TopLeft,
        Corner::TopRight,
        Corner::BottomLeft,
        Corner::BottomRight,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Corner::TopLeft => "top-left",
            Corner::TopRight => "top-right",
            Corner::BottomLeft => "bottom-left",
            Corner::BottomRight => "bottom-right",
        }
    }

    /// Look up a corner by its kebab-case name
    pub fn from_name(name: &str) -> Option<Corner> {
        Self::ALL.into_iter().find(|c| c.as_str() == name)
    }

    /// Displacement of this corner from the top-left corner of a
    /// `width` x `height` rectangle
    pub fn offset(&self, width: f64, height: f64) -> (f64, f64) {
        match self {
            Corner::TopLeft => (0.0, 0.0),
            Corner::TopRight => (width, 0.0),
            Corner::BottomLeft => (0.0, height),
            Corner::BottomRight => (width, height),
        }
    }
}

impl fmt::Display for Corner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A `"<target>:<corner>"` reference to the point an entity is pinned to
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AttachmentRef {
    pub target: String,
    pub corner: Corner,
}

impl AttachmentRef {
    pub fn new(target: impl Into<String>, corner: Corner) -> Self {
        Self {
            target: target.into(),
            corner,
        }
    }

    /// Attach to the global origin
    pub fn origin(corner: Corner) -> Self {
        Self::new(ORIGIN_ID, corner)
    }

    /// Attach to the owning room (parts only)
    pub fn parent(corner: Corner) -> Self {
        Self::new(PARENT_ID, corner)
    }
}

impl TryFrom<String> for AttachmentRef {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        let (target, corner) = value.rsplit_once(':').ok_or_else(|| {
            format!("attachment reference '{value}' must have the form '<target>:<corner>'")
        })?;
        if target.is_empty() {
            return Err(format!("attachment reference '{value}' has an empty target"));
        }
        let corner = Corner::from_name(corner).ok_or_else(|| {
            format!(
                "unknown corner '{corner}' in '{value}' (expected one of: {})",
                Corner::ALL.map(|c| c.as_str()).join(", ")
            )
        })?;
        Ok(Self::new(target, corner))
    }
}

impl From<AttachmentRef> for String {
    fn from(value: AttachmentRef) -> Self {
        value.to_string()
    }
}

impl fmt::Display for AttachmentRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.target, self.corner)
    }
}

/// A rectangular room pinned to the origin or to another room
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub width: f64,
    pub depth: f64,
    /// Which of this room's corners sits on the attachment point
    #[serde(default)]
    pub anchor: Corner,
    #[serde(alias = "attach_to")]
    pub attach_to: AttachmentRef,
    /// Translation applied after anchor alignment
    #[serde(default)]
    pub offset: [f64; 2],
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parts: Vec<RoomPart>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub objects: Vec<RoomObject>,
}

impl Room {
    pub fn new(id: impl Into<String>, width: f64, depth: f64, attach_to: AttachmentRef) -> Self {
        Self {
            id: id.into(),
            name: None,
            width,
            depth,
            anchor: Corner::TopLeft,
            attach_to,
            offset: [0.0, 0.0],
            parts: vec![],
            objects: vec![],
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_anchor(mut self, anchor: Corner) -> Self {
        self.anchor = anchor;
        self
    }

    pub fn with_offset(mut self, dx: f64, dy: f64) -> Self {
        self.offset = [dx, dy];
        self
    }

    pub fn with_part(mut self, part: RoomPart) -> Self {
        self.parts.push(part);
        self
    }

    pub fn with_object(mut self, object: RoomObject) -> Self {
        self.objects.push(object);
        self
    }
}

/// A sub-rectangle of a room, attached to the room itself or to a sibling part
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomPart {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub width: f64,
    pub depth: f64,
    #[serde(default)]
    pub anchor: Corner,
    #[serde(alias = "attach_to")]
    pub attach_to: AttachmentRef,
    #[serde(default)]
    pub offset: [f64; 2],
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub objects: Vec<RoomObject>,
}

impl RoomPart {
    pub fn new(id: impl Into<String>, width: f64, depth: f64, attach_to: AttachmentRef) -> Self {
        Self {
            id: id.into(),
            name: None,
            width,
            depth,
            anchor: Corner::TopLeft,
            attach_to,
            offset: [0.0, 0.0],
            objects: vec![],
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_anchor(mut self, anchor: Corner) -> Self {
        self.anchor = anchor;
        self
    }

    pub fn with_offset(mut self, dx: f64, dy: f64) -> Self {
        self.offset = [dx, dy];
        self
    }

    pub fn with_object(mut self, object: RoomObject) -> Self {
        self.objects.push(object);
        self
    }
}

/// Shape of a decorative object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectShape {
    #[default]
    Square,
    Circle,
}

/// A decorative square or circle placed inside a room or part
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomObject {
    #[serde(rename = "type", default)]
    pub shape: ObjectShape,
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
    /// Width for squares, diameter for circles
    pub width: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Which corner of the object sits on the placement point
    #[serde(default)]
    pub anchor: Corner,
    /// Which corner of the host rectangle `(x, y)` is measured from
    #[serde(default, alias = "room_anchor")]
    pub room_anchor: Corner,
}

impl RoomObject {
    pub fn square(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            shape: ObjectShape::Square,
            x,
            y,
            width,
            height: Some(height),
            color: None,
            text: None,
            anchor: Corner::TopLeft,
            room_anchor: Corner::TopLeft,
        }
    }

    pub fn circle(x: f64, y: f64, diameter: f64) -> Self {
        Self {
            shape: ObjectShape::Circle,
            height: None,
            ..Self::square(x, y, diameter, diameter)
        }
    }

    pub fn with_anchor(mut self, anchor: Corner) -> Self {
        self.anchor = anchor;
        self
    }

    pub fn with_room_anchor(mut self, room_anchor: Corner) -> Self {
        self.room_anchor = room_anchor;
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Extent of the object's bounding box
    pub fn size(&self) -> (f64, f64) {
        match self.shape {
            ObjectShape::Square => (self.width, self.height.unwrap_or(self.width)),
            ObjectShape::Circle => (self.width, self.width),
        }
    }
}

/// How a door leaf swings, as seen from inside the host room facing the wall
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DoorSwing {
    InwardsLeft,
    #[default]
    InwardsRight,
    OutwardsLeft,
    OutwardsRight,
    Opening,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DoorType {
    #[default]
    Normal,
    Opening,
}

/// A door hosted on a room or part wall
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Door {
    /// `"<roomOrPart>:<wall>"`
    pub room: String,
    #[serde(default)]
    pub offset: f64,
    pub width: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub depth: Option<f64>,
    #[serde(default)]
    pub swing: DoorSwing,
    #[serde(rename = "type", default)]
    pub door_type: DoorType,
}

impl Door {
    pub fn new(room: impl Into<String>, offset: f64, width: f64) -> Self {
        Self {
            room: room.into(),
            offset,
            width,
            depth: None,
            swing: DoorSwing::default(),
            door_type: DoorType::default(),
        }
    }

    pub fn with_swing(mut self, swing: DoorSwing) -> Self {
        self.swing = swing;
        self
    }

    pub fn with_type(mut self, door_type: DoorType) -> Self {
        self.door_type = door_type;
        self
    }
}

/// A window hosted on a room or part wall
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Window {
    pub room: String,
    #[serde(default)]
    pub offset: f64,
    pub width: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub depth: Option<f64>,
}

impl Window {
    pub fn new(room: impl Into<String>, offset: f64, width: f64) -> Self {
        Self {
            room: room.into(),
            offset,
            width,
            depth: None,
        }
    }
}

/// A complete floor plan document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FloorPlan {
    #[serde(default)]
    pub rooms: Vec<Room>,
    #[serde(default)]
    pub doors: Vec<Door>,
    #[serde(default)]
    pub windows: Vec<Window>,
}

/// Serialization format of a floor plan document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlanFormat {
    #[default]
    Toml,
    Json,
}

impl PlanFormat {
    /// Guess the format from a file extension, defaulting to TOML
    pub fn from_extension(ext: Option<&str>) -> Self {
        match ext {
            Some(e) if e.eq_ignore_ascii_case("json") => PlanFormat::Json,
            _ => PlanFormat::Toml,
        }
    }
}

impl FloorPlan {
    pub fn new(rooms: Vec<Room>) -> Self {
        Self {
            rooms,
            doors: vec![],
            windows: vec![],
        }
    }

    pub fn with_door(mut self, door: Door) -> Self {
        self.doors.push(door);
        self
    }

    pub fn with_window(mut self, window: Window) -> Self {
        self.windows.push(window);
        self
    }

    /// Deserialize and validate a document
    pub fn load(source: &str, format: PlanFormat) -> Result<Self, Vec<LoadError>> {
        let plan: FloorPlan = match format {
            PlanFormat::Toml => toml::from_str(source).map_err(|e| vec![LoadError::from(e)])?,
            PlanFormat::Json => {
                serde_json::from_str(source).map_err(|e| vec![LoadError::from(e)])?
            }
        };
        validate(&plan)?;
        Ok(plan)
    }

    pub fn from_toml_str(source: &str) -> Result<Self, Vec<LoadError>> {
        Self::load(source, PlanFormat::Toml)
    }

    pub fn from_json_str(source: &str) -> Result<Self, Vec<LoadError>> {
        Self::load(source, PlanFormat::Json)
    }
}
