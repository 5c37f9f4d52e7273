use std::fmt;
use std::str::FromStr;

use crate::error::ProjectError;

/// One of the sixteen points at which a connection docks to a room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompassPoint {
    North,
    NorthNorthEast,
    NorthEast,
    EastNorthEast,
    East,
    EastSouthEast,
    SouthEast,
    SouthSouthEast,
    South,
    SouthSouthWest,
    SouthWest,
    WestSouthWest,
    West,
    WestNorthWest,
    NorthWest,
    NorthNorthWest,
}

/// A direction an exporter can ask a location about.
///
/// The first eight are the canonical compass directions; the last four are the
/// secondary directions that come from connection labels. The discriminant is
/// the index into [`Direction::ALL`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Direction {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
    Up,
    Down,
    In,
    Out,
}

pub const DIRECTION_COUNT: usize = 12;

/// Label texts that turn an exit into an up/down/in/out exit.
pub const LABEL_UP: &str = "up";
pub const LABEL_DOWN: &str = "down";
pub const LABEL_IN: &str = "in";
pub const LABEL_OUT: &str = "out";

impl CompassPoint {
    pub const ALL: [CompassPoint; 16] = [
        CompassPoint::North,
        CompassPoint::NorthNorthEast,
        CompassPoint::NorthEast,
        CompassPoint::EastNorthEast,
        CompassPoint::East,
        CompassPoint::EastSouthEast,
        CompassPoint::SouthEast,
        CompassPoint::SouthSouthEast,
        CompassPoint::South,
        CompassPoint::SouthSouthWest,
        CompassPoint::SouthWest,
        CompassPoint::WestSouthWest,
        CompassPoint::West,
        CompassPoint::WestNorthWest,
        CompassPoint::NorthWest,
        CompassPoint::NorthNorthWest,
    ];

    /// Collapse to the nearest canonical direction. Intermediate points fold
    /// onto the cardinal direction they flank (NNE -> N, ENE -> E, ...).
    pub fn canonical_direction(self) -> Direction {
        use CompassPoint::*;
        match self {
            NorthNorthWest | North | NorthNorthEast => Direction::North,
            NorthEast => Direction::NorthEast,
            EastNorthEast | East | EastSouthEast => Direction::East,
            SouthEast => Direction::SouthEast,
            SouthSouthEast | South | SouthSouthWest => Direction::South,
            SouthWest => Direction::SouthWest,
            WestSouthWest | West | WestNorthWest => Direction::West,
            NorthWest => Direction::NorthWest,
        }
    }

    /// True for the eight points that coincide with a canonical direction.
    pub fn is_canonical(self) -> bool {
        use CompassPoint::*;
        matches!(
            self,
            North | NorthEast | East | SouthEast | South | SouthWest | West | NorthWest
        )
    }

    pub fn short_name(self) -> &'static str {
        use CompassPoint::*;
        match self {
            North => "n",
            NorthNorthEast => "nne",
            NorthEast => "ne",
            EastNorthEast => "ene",
            East => "e",
            EastSouthEast => "ese",
            SouthEast => "se",
            SouthSouthEast => "sse",
            South => "s",
            SouthSouthWest => "ssw",
            SouthWest => "sw",
            WestSouthWest => "wsw",
            West => "w",
            WestNorthWest => "wnw",
            NorthWest => "nw",
            NorthNorthWest => "nnw",
        }
    }
}

impl FromStr for CompassPoint {
    type Err = ProjectError;

    /// Accepts short names (`nne`) and long names with or without separators
    /// (`north-north-east`, `NorthNorthEast`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .map(|c| c.to_ascii_lowercase())
            .collect();

        CompassPoint::ALL
            .into_iter()
            .find(|p| p.short_name() == key || long_key(*p) == key)
            .ok_or_else(|| ProjectError::InvalidCompassPoint(s.trim().to_string()))
    }
}

fn long_key(point: CompassPoint) -> String {
    point
        .short_name()
        .chars()
        .map(|c| match c {
            'n' => "north",
            'e' => "east",
            's' => "south",
            _ => "west",
        })
        .collect()
}

impl fmt::Display for CompassPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short_name())
    }
}

impl Direction {
    pub const ALL: [Direction; DIRECTION_COUNT] = [
        Direction::North,
        Direction::NorthEast,
        Direction::East,
        Direction::SouthEast,
        Direction::South,
        Direction::SouthWest,
        Direction::West,
        Direction::NorthWest,
        Direction::Up,
        Direction::Down,
        Direction::In,
        Direction::Out,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    /// Up/down/in/out.
    pub fn is_secondary(self) -> bool {
        matches!(
            self,
            Direction::Up | Direction::Down | Direction::In | Direction::Out
        )
    }

    pub fn opposite(self) -> Direction {
        use Direction::*;
        match self {
            North => South,
            NorthEast => SouthWest,
            East => West,
            SouthEast => NorthWest,
            South => North,
            SouthWest => NorthEast,
            West => East,
            NorthWest => SouthEast,
            Up => Down,
            Down => Up,
            In => Out,
            Out => In,
        }
    }

    /// Secondary direction named by a connection label, if the label is one of
    /// the reserved tokens. Anything else carries no direction.
    pub fn from_label(text: &str) -> Option<Direction> {
        match text {
            LABEL_UP => Some(Direction::Up),
            LABEL_DOWN => Some(Direction::Down),
            LABEL_IN => Some(Direction::In),
            LABEL_OUT => Some(Direction::Out),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        use Direction::*;
        match self {
            North => "north",
            NorthEast => "northeast",
            East => "east",
            SouthEast => "southeast",
            South => "south",
            SouthWest => "southwest",
            West => "west",
            NorthWest => "northwest",
            Up => "up",
            Down => "down",
            In => "in",
            Out => "out",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
