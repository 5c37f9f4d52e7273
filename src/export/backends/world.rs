use serde::Serialize;
use std::io::{self, Write};

use crate::export::backend::{ExportBackend, ExportInfo};
use crate::export::graph::{ExportGraph, Location};

/// Writes a TOML world file for a text-adventure runtime: a `[world]` header,
/// `[[room]]` blocks with `[[room.exit]]` entries and `[[item]]` blocks.
#[derive(Debug, Clone, Copy, Default)]
pub struct WorldBackend;

// Keywords of the world format, including the start_location prefixes.
const RESERVED: &[&str] = &["inventory", "room", "item", "npc", "world", "player"];

///////////////////////////
/// WORLD FILE STRUCTS  ///
///////////////////////////

#[derive(Serialize)]
struct WorldFile<'a> {
    world: WorldHeader<'a>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    room: Vec<RoomEntry<'a>>, // [[room]] blocks
    #[serde(skip_serializing_if = "Vec::is_empty")]
    item: Vec<ItemEntry<'a>>, // [[item]] blocks
}

#[derive(Serialize)]
struct WorldHeader<'a> {
    id: String,
    name: &'a str,
    start_room: &'a str,
    #[serde(skip_serializing_if = "str::is_empty")]
    desc: &'a str,
}

#[derive(Serialize)]
struct RoomEntry<'a> {
    id: &'a str,
    name: &'a str,
    #[serde(skip_serializing_if = "str::is_empty")]
    desc: &'a str,
    #[serde(skip_serializing_if = "is_false")]
    dark: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    exit: Vec<ExitEntry<'a>>, // [[room.exit]]
}

#[derive(Serialize)]
struct ExitEntry<'a> {
    direction: &'static str,
    target: &'a str,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    conditions: Vec<String>,
}

#[derive(Serialize)]
struct ItemEntry<'a> {
    id: &'a str,
    name: &'a str,
    /// "room:<id>" or "item:<container id>"
    start_location: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    kind: Option<&'static str>,
}

impl ExportBackend for WorldBackend {
    fn name(&self) -> &'static str {
        "world"
    }

    fn extension(&self) -> &'static str {
        "toml"
    }

    fn reserved_words(&self) -> &[&'static str] {
        RESERVED
    }

    fn room_export_name(&self, name: &str, suffix: Option<u32>) -> String {
        identifier(name, suffix)
    }

    fn object_export_name(&self, name: &str, suffix: Option<u32>) -> String {
        identifier(name, suffix)
    }

    fn write_header(&self, out: &mut dyn Write, info: &ExportInfo) -> io::Result<()> {
        writeln!(out, "# {}", info.title)?;
        writeln!(out, "# by {}", info.author)?;
        writeln!(out)?;
        Ok(())
    }

    fn write_content(
        &self,
        out: &mut dyn Write,
        graph: &ExportGraph<'_>,
        info: &ExportInfo,
    ) -> io::Result<()> {
        let world = build_world_file(graph, info);
        let text = toml::to_string(&world)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e.to_string()))?;
        out.write_all(text.as_bytes())
    }
}

fn build_world_file<'a>(graph: &'a ExportGraph<'_>, info: &'a ExportInfo) -> WorldFile<'a> {
    let mut world_id = identifier(&info.title, None);
    if world_id.is_empty() {
        world_id = "map".to_string();
    }

    let start_room = graph
        .locations()
        .first()
        .map(|l| l.export_name.as_str())
        .unwrap_or_default();

    let rooms = graph
        .locations()
        .iter()
        .map(|location| RoomEntry {
            id: &location.export_name,
            name: room_title(location),
            desc: &location.room.description,
            dark: location.room.dark,
            exit: location
                .distinct_exits()
                .into_iter()
                .map(|(direction, exit)| ExitEntry {
                    direction: direction.name(),
                    target: &graph.location(exit.target).export_name,
                    conditions: if exit.conditional {
                        vec![format!("{}_{}_open", location.export_name, direction.name())]
                    } else {
                        Vec::new()
                    },
                })
                .collect(),
        })
        .collect();

    let mut items = Vec::new();
    for location in graph.locations() {
        for thing in location.things() {
            let start_location = match thing.container.and_then(|c| location.thing(c)) {
                Some(container) => format!("item:{}", container.export_name),
                None => format!("room:{}", location.export_name),
            };

            items.push(ItemEntry {
                id: &thing.export_name,
                name: &thing.display_name,
                start_location,
                kind: (!thing.contents.is_empty()).then_some("container"),
            });
        }
    }

    WorldFile {
        world: WorldHeader {
            id: world_id,
            name: &info.title,
            start_room,
            desc: &info.description,
        },
        room: rooms,
        item: items,
    }
}

fn is_false(b: &bool) -> bool {
    !*b
}

fn room_title<'a>(location: &'a Location<'_>) -> &'a str {
    match location.room.name.trim() {
        "" => &location.export_name,
        name => name,
    }
}

/// Lower snake case; numbered variants append `_<n>`.
fn identifier(name: &str, suffix: Option<u32>) -> String {
    let base = name
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("_");

    match suffix {
        Some(n) if base.is_empty() => n.to_string(),
        Some(n) => format!("{}_{}", base, n),
        None => base,
    }
}
