mod backend;
mod backends;
mod direction;
mod graph;
mod names;
mod things;

pub use backend::{
    DEFAULT_AUTHOR, DEFAULT_TITLE, ExportBackend, ExportInfo, all_backends, backend_by_name,
    export_to_file, export_to_string, export_to_writer,
};
pub use backends::{OutlineBackend, WorldBackend};
pub use direction::{CompassPoint, DIRECTION_COUNT, Direction};
pub use graph::{Exit, ExportGraph, Location, LocationId};
pub use names::{FALLBACK_NAME, NameAllocator};
pub use things::{Thing, parse_things};
