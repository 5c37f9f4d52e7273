use std::io::{self, Write};

use crate::export::backend::{ExportBackend, ExportInfo};
use crate::export::graph::{ExportGraph, Location};
use crate::export::things::Thing;

/// Plain, language-neutral listing of the map: one block per room with its
/// exits and its object tree.
#[derive(Debug, Clone, Copy, Default)]
pub struct OutlineBackend;

// Words the outline uses for its own structure.
const RESERVED: &[&str] = &["contains", "nowhere"];

impl ExportBackend for OutlineBackend {
    fn name(&self) -> &'static str {
        "outline"
    }

    fn extension(&self) -> &'static str {
        "txt"
    }

    fn reserved_words(&self) -> &[&'static str] {
        RESERVED
    }

    fn room_export_name(&self, name: &str, suffix: Option<u32>) -> String {
        outline_name(name, suffix)
    }

    fn object_export_name(&self, name: &str, suffix: Option<u32>) -> String {
        outline_name(name, suffix)
    }

    fn write_header(&self, out: &mut dyn Write, info: &ExportInfo) -> io::Result<()> {
        writeln!(out, "Title: {}", info.title)?;
        writeln!(out, "Author: {}", info.author)?;
        if !info.description.is_empty() {
            writeln!(out)?;
            writeln!(out, "{}", info.description)?;
        }
        Ok(())
    }

    fn write_content(
        &self,
        out: &mut dyn Write,
        graph: &ExportGraph<'_>,
        _info: &ExportInfo,
    ) -> io::Result<()> {
        for location in graph.locations() {
            writeln!(out)?;
            if location.room.dark {
                writeln!(out, "== {} == (dark)", location.export_name)?;
            } else {
                writeln!(out, "== {} ==", location.export_name)?;
            }
            if !location.room.description.is_empty() {
                writeln!(out, "{}", location.room.description)?;
            }
            write_exits(out, graph, location)?;
            write_things(out, location)?;
        }
        Ok(())
    }
}

fn write_exits(
    out: &mut dyn Write,
    graph: &ExportGraph<'_>,
    location: &Location<'_>,
) -> io::Result<()> {
    for (direction, exit) in location.distinct_exits() {
        let target = graph.location(exit.target);
        let way = if graph.is_reciprocated(exit.source, direction, exit.target) {
            "two-way"
        } else {
            "one-way"
        };

        write!(out, "{}: {} ({}", direction, target.export_name, way)?;
        if exit.conditional {
            write!(out, ", conditional")?;
        }
        writeln!(out, ")")?;
    }
    Ok(())
}

fn write_things(out: &mut dyn Write, location: &Location<'_>) -> io::Result<()> {
    if location.things().is_empty() {
        return Ok(());
    }

    writeln!(out, "contains:")?;
    let mut stack: Vec<(&Thing, usize)> = location.top_level_things().map(|t| (t, 1)).collect();
    stack.reverse();

    while let Some((thing, depth)) = stack.pop() {
        writeln!(out, "{}{}", "  ".repeat(depth), thing.export_name)?;
        for child in thing.contents.iter().rev().filter_map(|&c| location.thing(c)) {
            stack.push((child, depth + 1));
        }
    }
    Ok(())
}

/// Runs of anything but letters and digits become a single space.
fn outline_name(name: &str, suffix: Option<u32>) -> String {
    let base = name
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

    match suffix {
        Some(n) => format!("{} {}", base, n),
        None => base,
    }
}
