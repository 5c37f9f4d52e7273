use thiserror::Error;

/// Errors raised while reading a project file.
#[derive(Debug, Error)]
pub enum ProjectError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed project file: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("duplicate room id: {0}")]
    DuplicateRoom(String),

    #[error("room #{index} has an empty id")]
    EmptyRoomId { index: usize },

    /// A connection endpoint names a room that was never declared.
    #[error("connection #{connection} references unknown room '{room}'")]
    UnknownRoom { connection: usize, room: String },

    #[error("invalid compass point '{0}'")]
    InvalidCompassPoint(String),

    #[error("invalid connection flow '{0}': expected 'one-way' or 'two-way'")]
    InvalidFlow(String),

    #[error("invalid connection style '{0}': expected 'solid' or 'dashed'")]
    InvalidStyle(String),
}

/// A failed export. Whatever went wrong, the output is not usable.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to write export: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to read project: {0}")]
    Project(#[from] ProjectError),

    #[error("unknown export backend '{0}'")]
    UnknownBackend(String),
}
