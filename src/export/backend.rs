use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::process;

use log::{info, warn};

use super::backends::{OutlineBackend, WorldBackend};
use super::graph::ExportGraph;
use crate::error::ExportError;
use crate::project::Project;

pub const DEFAULT_TITLE: &str = "An Untitled Map";
pub const DEFAULT_AUTHOR: &str = "An Anonymous Mapper";

/// What a target authoring language contributes to an export: its naming
/// rules and the text it renders from the finished graph.
pub trait ExportBackend {
    /// Short name used to pick the backend on the command line.
    fn name(&self) -> &'static str;

    /// File extension, without the dot, for exported files.
    fn extension(&self) -> &'static str;

    /// Names that may never be used for a room or an object.
    fn reserved_words(&self) -> &[&'static str];

    /// Spell a room name as an identifier; `suffix` asks for the numbered variant.
    fn room_export_name(&self, name: &str, suffix: Option<u32>) -> String;

    /// Spell an object name as an identifier; `suffix` asks for the numbered variant.
    fn object_export_name(&self, name: &str, suffix: Option<u32>) -> String;

    fn write_header(&self, out: &mut dyn Write, info: &ExportInfo) -> io::Result<()>;

    fn write_content(
        &self,
        out: &mut dyn Write,
        graph: &ExportGraph<'_>,
        info: &ExportInfo,
    ) -> io::Result<()>;
}

/// Title block handed to a backend's header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportInfo {
    pub title: String,
    pub author: String,
    pub description: String,
}

impl ExportInfo {
    pub fn from_project(project: &Project) -> Self {
        let title = [Some(project.title.as_str()), project.file_stem.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .find(|s| !s.is_empty())
            .unwrap_or(DEFAULT_TITLE);

        let author = match project.author.trim() {
            "" => DEFAULT_AUTHOR,
            a => a,
        };

        ExportInfo {
            title: title.to_string(),
            author: author.to_string(),
            description: project.description.trim().to_string(),
        }
    }
}

/// Every backend this crate ships, in menu order.
pub fn all_backends() -> Vec<Box<dyn ExportBackend>> {
    vec![Box::new(OutlineBackend), Box::new(WorldBackend)]
}

pub fn backend_by_name(name: &str) -> Result<Box<dyn ExportBackend>, ExportError> {
    all_backends()
        .into_iter()
        .find(|b| b.name().eq_ignore_ascii_case(name.trim()))
        .ok_or_else(|| ExportError::UnknownBackend(name.to_string()))
}

/// Build the graph for `project` and render it through `backend`.
pub fn export_to_writer(
    project: &Project,
    backend: &dyn ExportBackend,
    out: &mut dyn Write,
) -> Result<(), ExportError> {
    let info = ExportInfo::from_project(project);
    let graph = ExportGraph::build(project, backend);

    backend.write_header(out, &info)?;
    backend.write_content(out, &graph, &info)?;
    out.flush()?;

    info!(
        "exported '{}' with the {} backend: {} locations, {} exits, {} things",
        info.title,
        backend.name(),
        graph.locations().len(),
        graph.exit_count(),
        graph.thing_count()
    );
    Ok(())
}

pub fn export_to_string(
    project: &Project,
    backend: &dyn ExportBackend,
) -> Result<String, ExportError> {
    let mut buffer: Vec<u8> = Vec::new();
    export_to_writer(project, backend, &mut buffer)?;
    String::from_utf8(buffer)
        .map_err(|e| ExportError::Io(io::Error::new(io::ErrorKind::InvalidData, e)))
}

/// Render in memory, write a temp file next to `path`, then rename it over
/// `path`. On failure the destination is left as it was.
pub fn export_to_file(
    project: &Project,
    backend: &dyn ExportBackend,
    path: &Path,
) -> Result<(), ExportError> {
    let text = export_to_string(project, backend)?;

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let base = path
        .file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| format!("export.{}", backend.extension()));

    let mut counter = 0u32;
    let (tmp_path, mut tmp) = loop {
        let candidate = dir.join(format!(".{}.tmp-{}-{}", base, process::id(), counter));
        match OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&candidate)
        {
            Ok(file) => break (candidate, file),
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                counter = counter.saturating_add(1);
            }
            Err(e) => return Err(e.into()),
        }
    };

    let written = tmp.write_all(text.as_bytes()).and_then(|_| tmp.sync_all());
    drop(tmp);
    let written = written.and_then(|_| fs::rename(&tmp_path, path));

    if let Err(e) = written {
        if let Err(cleanup) = fs::remove_file(&tmp_path) {
            warn!(
                "could not remove temporary export {}: {}",
                tmp_path.display(),
                cleanup
            );
        }
        return Err(e.into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn info_falls_back_to_file_stem_then_default() {
        let mut project = Project {
            file_stem: Some("cellar".to_string()),
            ..Default::default()
        };
        assert_eq!(ExportInfo::from_project(&project).title, "cellar");
        assert_eq!(ExportInfo::from_project(&project).author, DEFAULT_AUTHOR);

        project.file_stem = None;
        assert_eq!(ExportInfo::from_project(&project).title, DEFAULT_TITLE);

        project.title = "Night Walk".to_string();
        project.author = " Quill ".to_string();
        let info = ExportInfo::from_project(&project);
        assert_eq!(info.title, "Night Walk");
        assert_eq!(info.author, "Quill");
    }

    #[test]
    fn backends_are_found_by_name() {
        assert_eq!(backend_by_name("outline").unwrap().name(), "outline");
        assert_eq!(backend_by_name(" WORLD ").unwrap().name(), "world");
        assert!(matches!(
            backend_by_name("inform"),
            Err(ExportError::UnknownBackend(ref n)) if n == "inform"
        ));
    }

    #[test]
    fn write_failures_surface_as_one_error() {
        struct Broken;
        impl Write for Broken {
            fn write(&mut self, _: &[u8]) -> io::Result<usize> {
                Err(io::Error::new(io::ErrorKind::BrokenPipe, "gone"))
            }
            fn flush(&mut self) -> io::Result<()> {
                Ok(())
            }
        }

        let project = Project {
            rooms: vec![crate::project::Room::new("a", "Attic")],
            ..Default::default()
        };
        let err = export_to_writer(&project, &OutlineBackend, &mut Broken).unwrap_err();
        assert!(matches!(err, ExportError::Io(_)));
        assert!(err.to_string().contains("failed to write export"));
    }
}
