use crate::export::CompassPoint;

/////////////////////////////////
/// PROJECT STRUCTS AND ENUMS ///
/////////////////////////////////

/// Read-only view of a map project as the exporter consumes it.
#[derive(Debug, Clone, Default)]
pub struct Project {
    pub title: String,
    pub author: String,
    pub description: String,
    /// Path stem of the file the project was loaded from, if any.
    pub file_stem: Option<String>,
    pub rooms: Vec<Room>,
    pub connections: Vec<Connection>,
}

/// Index of a room in [`Project::rooms`] (declaration order).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RoomId(pub usize);

#[derive(Debug, Clone, Default)]
pub struct Room {
    pub id: String,
    pub name: String,
    pub description: String,
    /// Dark rooms need a light source to be seen in.
    pub dark: bool,
    /// One object per line; leading spaces denote containment.
    pub objects: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Endpoint {
    pub room: RoomId,
    pub point: CompassPoint,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectionFlow {
    OneWay,
    #[default]
    TwoWay,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectionStyle {
    #[default]
    Solid,
    Dashed,
}

#[derive(Debug, Clone, Default)]
pub struct Connection {
    pub source: Option<Endpoint>, // None when undocked
    pub target: Option<Endpoint>,
    pub flow: ConnectionFlow,
    pub style: ConnectionStyle,
    pub start_text: String, // label at the source end
    pub end_text: String,   // label at the target end
}

impl Room {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Room {
            id: id.into(),
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = description.trim().to_string();
        self
    }

    pub fn dark(mut self) -> Self {
        self.dark = true;
        self
    }

    pub fn with_objects(mut self, objects: &str) -> Self {
        self.objects = normalize_objects_text(objects);
        self
    }
}

impl Connection {
    pub fn new(source: Endpoint, target: Endpoint) -> Self {
        Connection {
            source: Some(source),
            target: Some(target),
            ..Default::default()
        }
    }

    pub fn one_way(mut self) -> Self {
        self.flow = ConnectionFlow::OneWay;
        self
    }

    pub fn dashed(mut self) -> Self {
        self.style = ConnectionStyle::Dashed;
        self
    }

    pub fn labelled(mut self, start_text: &str, end_text: &str) -> Self {
        self.start_text = start_text.to_string();
        self.end_text = end_text.to_string();
        self
    }

    /// True when both ends dock to the same room at the same compass point.
    pub fn is_stub(&self) -> bool {
        matches!((self.source, self.target), (Some(s), Some(t)) if s == t)
    }
}

/// Carriage returns are dropped and tabs count as a single space of indentation.
pub fn normalize_objects_text(raw: &str) -> String {
    raw.chars()
        .filter(|c| *c != '\r')
        .map(|c| if c == '\t' { ' ' } else { c })
        .collect()
}
