pub mod error;
pub mod export;
pub mod project;

pub use error::{ExportError, ProjectError};
pub use export::{
    ExportBackend, ExportGraph, backend_by_name, export_to_file, export_to_string,
    export_to_writer,
};
pub use project::{Project, load_project_from_file, load_project_from_str, validate_project};

/// Load a project from TOML text and export it with the named backend.
pub fn export_project_toml(project_toml: &str, backend: &str) -> Result<String, ExportError> {
    let project = load_project_from_str(project_toml)?;
    let backend = backend_by_name(backend)?;
    export_to_string(&project, backend.as_ref())
}

#[cfg(feature = "wasm")]
mod wasm_bindings {
    use serde::Serialize;
    use serde_wasm_bindgen::to_value;
    use wasm_bindgen::prelude::*;

    #[derive(Serialize)]
    struct WasmExportResult {
        text: Option<String>,
        error: Option<String>,
        warnings: Vec<String>,
    }

    /// Export a TOML project with the named backend. Returns
    /// `{ text, error, warnings }`; exactly one of `text` and `error` is set.
    #[wasm_bindgen(js_name = exportProject)]
    pub fn export_project(project_toml: &str, backend: &str) -> JsValue {
        let warnings = super::load_project_from_str(project_toml)
            .map(|p| {
                super::validate_project(&p)
                    .into_iter()
                    .map(|issue| issue.message)
                    .collect()
            })
            .unwrap_or_default();

        let result = match super::export_project_toml(project_toml, backend) {
            Ok(text) => WasmExportResult {
                text: Some(text),
                error: None,
                warnings,
            },
            Err(e) => WasmExportResult {
                text: None,
                error: Some(e.to_string()),
                warnings,
            },
        };
        to_value(&result).unwrap_or(JsValue::NULL)
    }
}
