//! Lazily loaded project model.

use crate::error::{ToolError, ToolResult};
use camino::{Utf8Path, Utf8PathBuf};
use pbxtool_model::XcodeProject;
use tracing::debug;

/// Owns the manifest path and, once accessed, the parsed model.
#[derive(Debug)]
pub struct ProjectHandle {
    manifest: Utf8PathBuf,
    model: Option<XcodeProject>,
}

impl ProjectHandle {
    pub fn new(manifest: impl Into<Utf8PathBuf>) -> Self {
        Self {
            manifest: manifest.into(),
            model: None,
        }
    }

    pub fn manifest(&self) -> &Utf8Path {
        &self.manifest
    }

    #[cfg(test)]
    fn is_loaded(&self) -> bool {
        self.model.is_some()
    }

    /// The model, read from disk on first use.
    pub fn get(&mut self) -> ToolResult<&mut XcodeProject> {
        let project = match self.model.take() {
            Some(project) => project,
            None => {
                if !self.manifest.is_file() {
                    return Err(ToolError::ManifestNotFound(self.manifest.clone()));
                }
                XcodeProject::load(&self.manifest)?
            }
        };
        Ok(self.model.insert(project))
    }

    /// Drop the cached model so the next [`get`](Self::get) re-reads the file.
    pub fn invalidate(&mut self) {
        if self.model.take().is_some() {
            debug!(manifest = %self.manifest, "discarded cached project");
        }
    }

    pub fn reload(&mut self) -> ToolResult<&mut XcodeProject> {
        self.invalidate();
        self.get()
    }

    /// Write the cached model back to the manifest. A no-op when nothing is loaded.
    pub fn save(&self) -> ToolResult<()> {
        match &self.model {
            Some(project) => Ok(project.save()?),
            None => Ok(()),
        }
    }
}
