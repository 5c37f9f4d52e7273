use super::graph::LocationId;
use super::names::NameAllocator;

/// An object listed in a room, possibly inside another object in the same room.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Thing {
    pub display_name: String,
    pub export_name: String,
    pub location: LocationId,
    /// Index of the containing thing within the same location's thing list.
    pub container: Option<usize>,
    pub indent: usize,
    /// Indices of directly contained things, in object-list order.
    pub contents: Vec<usize>,
}

/// Parse a room's object list into a flat, parse-ordered list of things with
/// containment links filled in.
///
/// Each non-blank line is one thing. A line nests under the closest earlier
/// line with strictly less indentation; only relative indentation matters, so
/// a jump from 0 to 4 spaces nests exactly like a jump from 0 to 1.
pub fn parse_things<F>(
    location: LocationId,
    objects: &str,
    names: &mut NameAllocator,
    mut mangle: F,
) -> Vec<Thing>
where
    F: FnMut(&str, Option<u32>) -> String,
{
    let mut things: Vec<Thing> = Vec::new();

    for line in objects.split('\n') {
        let display_name = line.trim();
        if display_name.is_empty() {
            continue;
        }

        let export_name = names.allocate(display_name, &mut mangle);
        let indent = line.chars().take_while(|c| *c == ' ').count();

        let container = things.iter().rposition(|prior| indent > prior.indent);

        let index = things.len();
        if let Some(parent) = container {
            debug_assert_eq!(things[parent].location, location);
            things[parent].contents.push(index);
        }

        things.push(Thing {
            display_name: display_name.to_string(),
            export_name,
            location,
            container,
            indent,
            contents: Vec::new(),
        });
    }

    things
}
