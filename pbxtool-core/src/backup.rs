//! Timestamped snapshots of the manifest.
//!
//! Backups are plain copies named `<manifest file name>.<YYYYMMDD_HHMMSS>`,
//! so sorting names sorts them by age. Nothing here touches the model.

use crate::error::{ToolError, ToolResult};
use crate::ports::Clock;
use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use fs_err as fs;
use pbxtool_types::{BackupEntry, RestoreOutcome};
use std::sync::Arc;
use tracing::{debug, info};

pub const STAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

#[derive(Debug, Clone)]
pub struct BackupManager {
    manifest: Utf8PathBuf,
    dir: Utf8PathBuf,
    clock: Arc<dyn Clock>,
}

impl BackupManager {
    pub fn new(manifest: Utf8PathBuf, dir: Utf8PathBuf, clock: Arc<dyn Clock>) -> Self {
        Self {
            manifest,
            dir,
            clock,
        }
    }

    pub fn dir(&self) -> &Utf8Path {
        &self.dir
    }

    /// Copy the manifest into the backup directory and return the copy's path.
    ///
    /// Two backups within the same second share a name; the later one wins.
    pub fn backup(&self) -> ToolResult<Utf8PathBuf> {
        if !self.manifest.is_file() {
            return Err(ToolError::ManifestNotFound(self.manifest.clone()));
        }
        fs::create_dir_all(&self.dir).with_context(|| format!("create {}", self.dir))?;

        let stamp = self.clock.now().format(STAMP_FORMAT);
        let base = self.manifest.file_name().unwrap_or("project.pbxproj");
        let target = self.dir.join(format!("{base}.{stamp}"));
        fs::copy(&self.manifest, &target)
            .with_context(|| format!("copy {} to {}", self.manifest, target))?;
        info!(backup = %target, "backed up project");
        Ok(target)
    }

    /// Copy a backup over the manifest; `None` picks the newest.
    pub fn restore(&self, name: Option<&str>) -> ToolResult<RestoreOutcome> {
        if !self.dir.is_dir() {
            return Err(ToolError::BackupDirMissing(self.dir.clone()));
        }
        let mut names = self.names()?;
        let Some(newest) = names.pop() else {
            return Err(ToolError::NoBackups(self.dir.clone()));
        };

        let (source, latest) = match name {
            Some(name) => (self.dir.join(name), false),
            None => (self.dir.join(newest), true),
        };
        if !source.is_file() {
            return Err(ToolError::BackupNotFound(source));
        }

        fs::copy(&source, &self.manifest)
            .with_context(|| format!("copy {} to {}", source, self.manifest))?;
        info!(backup = %source, latest, "restored project");
        Ok(RestoreOutcome {
            backup: source,
            latest,
        })
    }

    /// Backups newest first. A missing directory has no backups.
    pub fn list(&self) -> ToolResult<Vec<BackupEntry>> {
        if !self.dir.is_dir() {
            debug!(dir = %self.dir, "no backup directory");
            return Ok(Vec::new());
        }
        let mut entries = Vec::new();
        for name in self.names()?.into_iter().rev() {
            let path = self.dir.join(&name);
            let size_bytes = fs::metadata(&path)
                .with_context(|| format!("stat {path}"))?
                .len();
            entries.push(BackupEntry { name, size_bytes });
        }
        Ok(entries)
    }

    /// File names in the backup directory, ascending.
    fn names(&self) -> ToolResult<Vec<String>> {
        let mut names = Vec::new();
        for entry in fs::read_dir(&self.dir).with_context(|| format!("read {}", self.dir))? {
            let entry = entry.with_context(|| format!("read {}", self.dir))?;
            if !entry.file_type().map(|t| t.is_file()).unwrap_or(false) {
                continue;
            }
            match entry.file_name().into_string() {
                Ok(name) => names.push(name),
                Err(raw) => debug!(name = ?raw, "skipping non-UTF-8 backup name"),
            }
        }
        names.sort();
        Ok(names)
    }
}
