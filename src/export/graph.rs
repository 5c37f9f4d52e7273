use std::cmp::Reverse;
use std::collections::HashMap;

use log::debug;

use super::backend::ExportBackend;
use super::direction::{CompassPoint, DIRECTION_COUNT, Direction};
use super::names::NameAllocator;
use super::things::{Thing, parse_things};
use crate::project::{ConnectionFlow, ConnectionStyle, Project, Room, RoomId};

// Exit priorities. Higher is a better representative of a compass direction.
const PRIORITY_CANONICAL: i32 = 4;
const PRIORITY_INTERMEDIATE: i32 = 3;
const PRIORITY_INTERMEDIATE_LABELLED: i32 = -1;
const PRIORITY_CANONICAL_LABELLED: i32 = -2;
const PRIORITY_SECONDARY_MATCH: i32 = 1;
const PRIORITY_NO_MATCH: i32 = -1;

/// Index of a location in [`ExportGraph::locations`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LocationId(pub usize);

/// A directed way out of a location. Stored only on its source location.
#[derive(Debug, Clone)]
pub struct Exit {
    pub source: LocationId,
    pub target: LocationId,
    /// Where the connection docks to the source room on the map.
    pub compass_point: CompassPoint,
    /// Canonical direction nearest to `compass_point`.
    pub primary: Direction,
    /// Up/down/in/out, taken from the connection label at the source end.
    pub secondary: Option<Direction>,
    /// Dashed connections need some in-game action before they can be used.
    pub conditional: bool,
    priority: i32,
}

impl Exit {
    pub fn new(
        source: LocationId,
        target: LocationId,
        compass_point: CompassPoint,
        label: &str,
        style: ConnectionStyle,
    ) -> Self {
        let secondary = Direction::from_label(label);
        let priority = match (compass_point.is_canonical(), secondary.is_some()) {
            (true, false) => PRIORITY_CANONICAL,
            (true, true) => PRIORITY_CANONICAL_LABELLED,
            (false, false) => PRIORITY_INTERMEDIATE,
            (false, true) => PRIORITY_INTERMEDIATE_LABELLED,
        };

        Exit {
            source,
            target,
            compass_point,
            primary: compass_point.canonical_direction(),
            secondary,
            conditional: style == ConnectionStyle::Dashed,
            priority,
        }
    }

    /// The direction this exit is looked up by: its secondary direction when it
    /// has one, otherwise its primary direction.
    pub fn direction(&self) -> Direction {
        self.secondary.unwrap_or(self.primary)
    }

    pub fn priority(&self) -> i32 {
        self.priority
    }

    /// True if the exit can represent `direction` at all.
    pub fn leads(&self, direction: Direction) -> bool {
        self.primary == direction || self.secondary == Some(direction)
    }

    /// How well this exit represents `direction`, compared with the other exits
    /// of the same location.
    pub fn priority_for(&self, direction: Direction) -> i32 {
        if direction == self.primary {
            self.priority
        } else if self.secondary == Some(direction) {
            PRIORITY_SECONDARY_MATCH
        } else {
            PRIORITY_NO_MATCH
        }
    }
}

/// The export-time wrapper around one room.
#[derive(Debug, Clone)]
pub struct Location<'a> {
    pub room_id: RoomId,
    pub room: &'a Room,
    pub export_name: String,
    exits: Vec<Exit>,
    best_exits: [Option<usize>; DIRECTION_COUNT],
    things: Vec<Thing>,
}

impl<'a> Location<'a> {
    fn new(room_id: RoomId, room: &'a Room, export_name: String) -> Self {
        Location {
            room_id,
            room,
            export_name,
            exits: Vec::new(),
            best_exits: [None; DIRECTION_COUNT],
            things: Vec::new(),
        }
    }

    /// Exits in the order they were added.
    pub fn exits(&self) -> &[Exit] {
        &self.exits
    }

    /// Every thing in the room, in object-list order.
    pub fn things(&self) -> &[Thing] {
        &self.things
    }

    pub fn thing(&self, index: usize) -> Option<&Thing> {
        self.things.get(index)
    }

    pub fn top_level_things(&self) -> impl Iterator<Item = &Thing> {
        self.things.iter().filter(|t| t.container.is_none())
    }

    pub fn best_exit(&self, direction: Direction) -> Option<&Exit> {
        self.best_exits[direction.index()].map(|i| &self.exits[i])
    }

    /// Best exits with each exit listed once.
    ///
    /// An exit that wins more than one direction (a lone "up" exit docked at N
    /// wins both north and up) is reported under its own [`Exit::direction`]
    /// when it also wins that, else under the first direction it wins.
    pub fn distinct_exits(&self) -> Vec<(Direction, &Exit)> {
        let mut emitted = vec![false; self.exits.len()];
        let mut result = Vec::new();

        // Secondary directions come last in ALL, so a deferred exit is always picked up.
        for direction in Direction::ALL {
            let Some(index) = self.best_exits[direction.index()] else {
                continue;
            };
            if emitted[index] {
                continue;
            }

            let exit = &self.exits[index];
            let preferred = exit.direction();
            if preferred != direction && self.best_exits[preferred.index()] == Some(index) {
                continue;
            }

            emitted[index] = true;
            result.push((direction, exit));
        }

        result
    }

    fn add_exit(&mut self, exit: Exit) {
        self.exits.push(exit);
    }

    /// Recompute the best exit for every direction.
    fn pick_best_exits(&mut self) {
        for direction in Direction::ALL {
            self.best_exits[direction.index()] = self.pick_best_exit(direction);
        }
    }

    // Rank exits for this one direction; equal priorities keep insertion order.
    // The top exit wins only if it actually leads that way.
    fn pick_best_exit(&self, direction: Direction) -> Option<usize> {
        let mut order: Vec<usize> = (0..self.exits.len()).collect();
        order.sort_by_key(|&i| Reverse(self.exits[i].priority_for(direction)));
        order
            .first()
            .copied()
            .filter(|&i| self.exits[i].leads(direction))
    }
}

/// Locations, exits and things for one export. Rebuilt from scratch every time.
#[derive(Debug, Clone)]
pub struct ExportGraph<'a> {
    locations: Vec<Location<'a>>,
    room_to_location: HashMap<RoomId, LocationId>,
}

impl<'a> ExportGraph<'a> {
    pub fn build(project: &'a Project, backend: &dyn ExportBackend) -> Self {
        let mut graph = ExportGraph {
            locations: Vec::with_capacity(project.rooms.len()),
            room_to_location: HashMap::new(),
        };

        graph.find_rooms(project, backend);
        graph.find_exits(project);
        graph.pick_best_exits();
        graph.find_things(backend);

        debug!(
            "built export graph: {} locations, {} exits, {} things",
            graph.locations.len(),
            graph.exit_count(),
            graph.thing_count()
        );
        graph
    }

    /// Locations in export order (room declaration order).
    pub fn locations(&self) -> &[Location<'a>] {
        &self.locations
    }

    pub fn location(&self, id: LocationId) -> &Location<'a> {
        &self.locations[id.0]
    }

    pub fn location_for_room(&self, room: RoomId) -> Option<LocationId> {
        self.room_to_location.get(&room).copied()
    }

    pub fn exit_count(&self) -> usize {
        self.locations.iter().map(|l| l.exits.len()).sum()
    }

    pub fn thing_count(&self) -> usize {
        self.locations.iter().map(|l| l.things.len()).sum()
    }

    /// True if `target`'s best exit in the opposite direction leads back to `source`.
    pub fn is_reciprocated(
        &self,
        source: LocationId,
        direction: Direction,
        target: LocationId,
    ) -> bool {
        let opposite = direction.opposite();
        match self.location(target).best_exit(opposite) {
            Some(reciprocal) => {
                debug_assert!(
                    reciprocal.leads(opposite),
                    "best exit filed under a direction it does not lead"
                );
                reciprocal.target == source
            }
            None => false,
        }
    }

    fn find_rooms(&mut self, project: &'a Project, backend: &dyn ExportBackend) {
        let mut names = NameAllocator::with_reserved(backend.reserved_words());

        for (index, room) in project.rooms.iter().enumerate() {
            let room_id = RoomId(index);
            let export_name =
                names.allocate(&room.name, |base, suffix| backend.room_export_name(base, suffix));

            let id = LocationId(self.locations.len());
            self.locations.push(Location::new(room_id, room, export_name));
            self.room_to_location.insert(room_id, id);
        }
    }

    fn find_exits(&mut self, project: &Project) {
        for (index, connection) in project.connections.iter().enumerate() {
            let (Some(source), Some(target)) = (connection.source, connection.target) else {
                debug!("skipping connection #{}: undocked", index);
                continue;
            };

            if connection.is_stub() {
                debug!("skipping connection #{}: stub", index);
                continue;
            }

            let (Some(source_location), Some(target_location)) = (
                self.location_for_room(source.room),
                self.location_for_room(target.room),
            ) else {
                debug!("skipping connection #{}: room not in project", index);
                continue;
            };

            self.locations[source_location.0].add_exit(Exit::new(
                source_location,
                target_location,
                source.point,
                &connection.start_text,
                connection.style,
            ));

            if connection.flow == ConnectionFlow::TwoWay {
                self.locations[target_location.0].add_exit(Exit::new(
                    target_location,
                    source_location,
                    target.point,
                    &connection.end_text,
                    connection.style,
                ));
            }
        }
    }

    fn pick_best_exits(&mut self) {
        for location in &mut self.locations {
            location.pick_best_exits();
        }
    }

    fn find_things(&mut self, backend: &dyn ExportBackend) {
        let mut names = NameAllocator::with_reserved(backend.reserved_words());
        for location in &self.locations {
            names.reserve(&location.export_name);
        }

        for (index, location) in self.locations.iter_mut().enumerate() {
            location.things = parse_things(
                LocationId(index),
                &location.room.objects,
                &mut names,
                |base, suffix| backend.object_export_name(base, suffix),
            );
        }
    }
}
