mod loader;
mod model;
mod validator;

pub use loader::{load_project_from_file, load_project_from_str};

// Only what the exporter and the CLI need.
pub use model::{
    Connection, ConnectionFlow, ConnectionStyle, Endpoint, Project, Room, RoomId,
    normalize_objects_text,
};
pub use validator::{ValidationIssue, validate_project};
