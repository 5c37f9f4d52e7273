use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use super::model::{
    Connection, ConnectionFlow, ConnectionStyle, Endpoint, Project, Room, RoomId,
    normalize_objects_text,
};
use crate::error::ProjectError;
use crate::export::CompassPoint;

////////////////////
/// TOML STRUCTS ///
////////////////////

#[derive(Deserialize)]
struct ProjectFile {
    #[serde(default)]
    project: ProjectHeader,
    #[serde(default)]
    room: Vec<RoomConfig>, // [[room]] blocks
    #[serde(default)]
    connection: Vec<ConnectionConfig>, // [[connection]] blocks
}

#[derive(Deserialize, Default)]
struct ProjectHeader {
    #[serde(default)]
    title: String,
    #[serde(default)]
    author: String,
    #[serde(default)]
    description: String,
}

#[derive(Deserialize)]
struct RoomConfig {
    id: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    desc: String,
    #[serde(default)]
    dark: bool,
    #[serde(default)]
    objects: String,
}

#[derive(Deserialize)]
struct ConnectionConfig {
    // A missing room or compass point leaves that end undocked.
    #[serde(default)]
    from: Option<String>,
    #[serde(default)]
    from_point: Option<String>,
    #[serde(default)]
    to: Option<String>,
    #[serde(default)]
    to_point: Option<String>,

    #[serde(default)]
    flow: Option<String>, // "one-way" | "two-way"
    #[serde(default)]
    style: Option<String>, // "solid" | "dashed"

    #[serde(default)]
    start_text: String,
    #[serde(default)]
    end_text: String,
}

////////////////////////////////
/// TOML PARSER FUNCTIONS    ///
////////////////////////////////

/// Public API: load a project from a .toml file on disk.
pub fn load_project_from_file(path: &Path) -> Result<Project, ProjectError> {
    let contents = fs::read_to_string(path)?;
    let mut project = load_project_from_str(&contents)?;
    project.file_stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .filter(|s| !s.is_empty());
    Ok(project)
}

/// Public API: load a project from TOML text.
pub fn load_project_from_str(contents: &str) -> Result<Project, ProjectError> {
    let file: ProjectFile = toml::from_str(contents)?;

    let mut room_index: HashMap<String, RoomId> = HashMap::new();
    let mut rooms = Vec::with_capacity(file.room.len());

    for (index, rc) in file.room.into_iter().enumerate() {
        let id = rc.id.trim().to_string();
        if id.is_empty() {
            return Err(ProjectError::EmptyRoomId { index });
        }
        if room_index.contains_key(&id) {
            return Err(ProjectError::DuplicateRoom(id));
        }
        room_index.insert(id.clone(), RoomId(rooms.len()));

        rooms.push(Room {
            id,
            name: rc.name.trim().to_string(),
            description: normalize_description(&rc.desc),
            dark: rc.dark,
            objects: normalize_objects_text(&rc.objects),
        });
    }

    let mut connections = Vec::with_capacity(file.connection.len());

    for (index, cc) in file.connection.into_iter().enumerate() {
        let source = parse_endpoint(
            index,
            cc.from.as_deref(),
            cc.from_point.as_deref(),
            &room_index,
        )?;
        let target =
            parse_endpoint(index, cc.to.as_deref(), cc.to_point.as_deref(), &room_index)?;

        connections.push(Connection {
            source,
            target,
            flow: parse_flow(cc.flow.as_deref())?,
            style: parse_style(cc.style.as_deref())?,
            start_text: cc.start_text,
            end_text: cc.end_text,
        });
    }

    Ok(Project {
        title: file.project.title.trim().to_string(),
        author: file.project.author.trim().to_string(),
        description: normalize_description(&file.project.description),
        file_stem: None,
        rooms,
        connections,
    })
}

fn parse_endpoint(
    connection: usize,
    room: Option<&str>,
    point: Option<&str>,
    room_index: &HashMap<String, RoomId>,
) -> Result<Option<Endpoint>, ProjectError> {
    // Validate the compass point even when the room is absent, so typos surface early.
    let point = point
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::parse::<CompassPoint>)
        .transpose()?;

    let room = match room.map(str::trim).filter(|r| !r.is_empty()) {
        Some(r) => Some(*room_index.get(r).ok_or_else(|| ProjectError::UnknownRoom {
            connection,
            room: r.to_string(),
        })?),
        None => None,
    };

    Ok(match (room, point) {
        (Some(room), Some(point)) => Some(Endpoint { room, point }),
        _ => None,
    })
}

fn parse_flow(raw: Option<&str>) -> Result<ConnectionFlow, ProjectError> {
    match raw.map(|s| s.trim().to_lowercase()) {
        None => Ok(ConnectionFlow::default()),
        Some(ref s) if s.is_empty() => Ok(ConnectionFlow::default()),
        Some(ref s) if s == "one-way" || s == "oneway" => Ok(ConnectionFlow::OneWay),
        Some(ref s) if s == "two-way" || s == "twoway" => Ok(ConnectionFlow::TwoWay),
        Some(s) => Err(ProjectError::InvalidFlow(s)),
    }
}

fn parse_style(raw: Option<&str>) -> Result<ConnectionStyle, ProjectError> {
    match raw.map(|s| s.trim().to_lowercase()) {
        None => Ok(ConnectionStyle::default()),
        Some(ref s) if s.is_empty() => Ok(ConnectionStyle::default()),
        Some(ref s) if s == "solid" => Ok(ConnectionStyle::Solid),
        Some(ref s) if s == "dashed" => Ok(ConnectionStyle::Dashed),
        Some(s) => Err(ProjectError::InvalidStyle(s)),
    }
}

/// Wrapped lines join with a space; a blank line starts a new paragraph.
fn normalize_description(raw: &str) -> String {
    let mut result = String::new();
    let mut pending_break = false;

    for line in raw.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            pending_break = !result.is_empty();
            continue;
        }

        if !result.is_empty() {
            result.push_str(if pending_break { "\n\n" } else { " " });
        }
        result.push_str(trimmed);
        pending_break = false;
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
[project]
title = "Cellar Crawl"
author = "Someone"
description = """
A short crawl
through a cellar.

Mind the rats.
"""

[[room]]
id = "kitchen"
name = "Kitchen"
desc = """
Copper pans hang
over a cold stove.
"""
objects = "table\n\tplate\r\n"

[[room]]
id = "cellar"
name = "Cellar"
dark = true

[[connection]]
from = "kitchen"
from_point = "s"
to = "cellar"
to_point = "n"
start_text = "down"
end_text = "up"
style = "dashed"

[[connection]]
from = "cellar"
from_point = "e"
flow = "one-way"
"#;

    #[test]
    fn loads_rooms_in_declaration_order() {
        let project = load_project_from_str(SAMPLE).unwrap();
        assert_eq!(project.title, "Cellar Crawl");
        assert_eq!(project.rooms.len(), 2);
        assert_eq!(project.rooms[0].id, "kitchen");
        assert_eq!(project.rooms[1].name, "Cellar");
        assert_eq!(project.rooms[0].description, "Copper pans hang over a cold stove.");
        assert!(!project.rooms[0].dark);
        assert!(project.rooms[1].dark);
        assert_eq!(
            project.description,
            "A short crawl through a cellar.\n\nMind the rats."
        );
    }

    #[test]
    fn normalizes_tabs_and_carriage_returns_in_objects() {
        let project = load_project_from_str(SAMPLE).unwrap();
        assert_eq!(project.rooms[0].objects, "table\n plate\n");
    }

    #[test]
    fn parses_connections_and_undocked_ends() {
        let project = load_project_from_str(SAMPLE).unwrap();
        let first = &project.connections[0];
        assert_eq!(
            first.source,
            Some(Endpoint {
                room: RoomId(0),
                point: CompassPoint::South
            })
        );
        assert_eq!(first.style, ConnectionStyle::Dashed);
        assert_eq!(first.flow, ConnectionFlow::TwoWay);
        assert_eq!(first.start_text, "down");

        let second = &project.connections[1];
        assert!(second.target.is_none());
        assert_eq!(second.flow, ConnectionFlow::OneWay);
    }

    #[test]
    fn rejects_duplicate_room_ids() {
        let err = load_project_from_str(
            "[[room]]\nid = \"a\"\nname = \"A\"\n[[room]]\nid = \"a\"\nname = \"B\"\n",
        )
        .unwrap_err();
        assert!(matches!(err, ProjectError::DuplicateRoom(ref id) if id == "a"));
    }

    #[test]
    fn rejects_unknown_rooms_and_compass_points() {
        let unknown_room = load_project_from_str(concat!(
            "[[room]]\nid = \"a\"\n",
            "[[connection]]\nfrom = \"a\"\nfrom_point = \"n\"\nto = \"b\"\nto_point = \"s\"\n",
        ))
        .unwrap_err();
        assert!(matches!(unknown_room, ProjectError::UnknownRoom { connection: 0, .. }));

        let bad_point = load_project_from_str(
            "[[room]]\nid = \"a\"\n[[connection]]\nfrom = \"a\"\nfrom_point = \"up\"\n",
        )
        .unwrap_err();
        assert!(matches!(bad_point, ProjectError::InvalidCompassPoint(ref p) if p == "up"));
    }

    #[test]
    fn rejects_unknown_flow_and_style() {
        let err = load_project_from_str("[[connection]]\nflow = \"sideways\"\n").unwrap_err();
        assert!(matches!(err, ProjectError::InvalidFlow(_)));

        let err = load_project_from_str("[[connection]]\nstyle = \"dotted\"\n").unwrap_err();
        assert!(matches!(err, ProjectError::InvalidStyle(_)));
    }

    #[test]
    fn reports_malformed_toml() {
        let err = load_project_from_str("[[room]\nid = ").unwrap_err();
        assert!(matches!(err, ProjectError::Toml(_)));
    }
}
