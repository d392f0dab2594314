//! The façade the CLI drives: one manifest, its backups, and every command.

use crate::adapters::SystemClock;
use crate::backup::BackupManager;
use crate::error::{ToolError, ToolResult};
use crate::ports::Clock;
use crate::project::ProjectHandle;
use crate::settings::ToolSettings;
use crate::{check, mutate, query};
use camino::{Utf8Path, Utf8PathBuf};
use pbxtool_model::XcodeProject;
use pbxtool_types::{
    AddFailure, AddReport, BackupEntry, CheckReport, FileEntry, FileInfo, FixReport, GroupRow,
    RemoveReport, RestoreOutcome, TargetEntry,
};
use std::sync::Arc;
use tracing::{debug, info, warn};

#[derive(Debug)]
pub struct PbxTool {
    settings: ToolSettings,
    project: ProjectHandle,
    backups: BackupManager,
}

impl PbxTool {
    pub fn new(settings: ToolSettings) -> Self {
        Self::with_clock(settings, Arc::new(SystemClock))
    }

    pub fn with_clock(settings: ToolSettings, clock: Arc<dyn Clock>) -> Self {
        let project = ProjectHandle::new(settings.project_path.clone());
        let backups = BackupManager::new(
            settings.project_path.clone(),
            settings.backup_dir.clone(),
            clock,
        );
        Self {
            settings,
            project,
            backups,
        }
    }

    pub fn settings(&self) -> &ToolSettings {
        &self.settings
    }

    pub fn manifest(&self) -> &Utf8Path {
        self.project.manifest()
    }

    /// The loaded model, read on first use.
    pub fn project(&mut self) -> ToolResult<&mut XcodeProject> {
        self.project.get()
    }

    pub fn reload(&mut self) -> ToolResult<()> {
        self.project.reload().map(|_| ())
    }

    // Backups

    pub fn backup(&self) -> ToolResult<Utf8PathBuf> {
        self.backups.backup()
    }

    pub fn restore(&mut self, name: Option<&str>) -> ToolResult<RestoreOutcome> {
        let outcome = self.backups.restore(name)?;
        self.project.invalidate();
        Ok(outcome)
    }

    pub fn list_backups(&self) -> ToolResult<Vec<BackupEntry>> {
        self.backups.list()
    }

    // Queries

    pub fn list_files(
        &mut self,
        pattern: Option<&str>,
        file_type: Option<&str>,
    ) -> ToolResult<Vec<FileEntry>> {
        Ok(query::list_files(self.project.get()?, pattern, file_type))
    }

    pub fn list_swift_files(&mut self) -> ToolResult<Vec<FileEntry>> {
        self.list_files(None, Some("swift"))
    }

    pub fn list_groups(&mut self) -> ToolResult<Vec<GroupRow>> {
        query::list_groups(self.project.get()?)
    }

    pub fn list_targets(&mut self) -> ToolResult<Vec<TargetEntry>> {
        Ok(query::list_targets(self.project.get()?))
    }

    pub fn find_files(&mut self, pattern: &str) -> ToolResult<Vec<FileEntry>> {
        query::find_files(self.project.get()?, pattern)
    }

    pub fn file_info(&mut self, name: &str) -> ToolResult<Vec<FileInfo>> {
        query::file_info(self.project.get()?, name)
    }

    pub fn check(&mut self) -> ToolResult<CheckReport> {
        Ok(check::check(self.project.get()?))
    }

    // Mutations

    /// Add one file, backing up first and saving on success.
    ///
    /// On failure the in-memory model is discarded so partial edits never
    /// reach a later save.
    pub fn add_file(
        &mut self,
        file: &Utf8Path,
        target: Option<&str>,
        group: Option<&str>,
    ) -> ToolResult<AddReport> {
        if !file.exists() {
            return Err(ToolError::SourceFileMissing(file.to_path_buf()));
        }
        self.backups.backup()?;

        let project = self.project.get()?;
        let target = mutate::resolve_target(project, target, &self.settings);
        if let Err(e) = mutate::add_one(project, file, target.as_deref(), group) {
            self.project.invalidate();
            return Err(e);
        }
        self.project.save()?;
        info!(file = %file, target = ?target, "added file to project");

        Ok(AddReport {
            target,
            added: vec![file.to_string()],
            failed: Vec::new(),
            saved: true,
        })
    }

    /// Add several files under one backup. Per-file failures are collected,
    /// not raised; the model is saved once if anything was added.
    pub fn add_files(
        &mut self,
        files: &[Utf8PathBuf],
        target: Option<&str>,
        group: Option<&str>,
    ) -> ToolResult<AddReport> {
        self.backups.backup()?;

        let project = self.project.get()?;
        let target = mutate::resolve_target(project, target, &self.settings);
        let mut report = AddReport {
            target,
            ..AddReport::default()
        };

        for file in files {
            if !file.exists() {
                report.failed.push(AddFailure {
                    path: file.to_string(),
                    reason: "file does not exist".to_string(),
                });
                continue;
            }
            match mutate::add_one(project, file, report.target.as_deref(), group) {
                Ok(()) => report.added.push(file.to_string()),
                Err(e) => {
                    warn!(file = %file, error = %e, "could not add file");
                    report.failed.push(AddFailure {
                        path: file.to_string(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        if !report.added.is_empty() {
            self.project.save()?;
            report.saved = true;
        }
        Ok(report)
    }

    /// Remove every reference displayed as `name` from the loaded model.
    ///
    /// Neither backs up nor saves; see [`PbxTool::remove_files`].
    pub fn remove_file(&mut self, name: &str) -> ToolResult<bool> {
        Ok(mutate::remove_by_name(self.project.get()?, name))
    }

    pub fn remove_files(&mut self, names: &[String], save: bool) -> ToolResult<RemoveReport> {
        self.backups.backup()?;

        let mut report = RemoveReport::default();
        for name in names {
            if self.remove_file(name)? {
                report.removed.push(name.clone());
            } else {
                debug!(name = %name, "no reference to remove");
                report.not_found.push(name.clone());
            }
        }

        if save && !report.removed.is_empty() {
            self.project.save()?;
            report.saved = true;
        }
        Ok(report)
    }

    /// Delete broken build files. Running it again fixes nothing.
    pub fn fix(&mut self) -> ToolResult<FixReport> {
        self.backups.backup()?;

        let (fixed, vanished) = mutate::remove_broken(self.project.get()?);
        let mut report = FixReport {
            fixed,
            vanished,
            saved: false,
        };
        if !report.fixed.is_empty() {
            self.project.save()?;
            self.project.invalidate();
            report.saved = true;
        }
        info!(fixed = report.fixed_count(), "fix complete");
        Ok(report)
    }

    /// Strip references to the configured list of deleted views.
    pub fn cleanup_deleted_ui_files(&mut self) -> ToolResult<RemoveReport> {
        let names = self.settings.cleanup_files.clone();
        self.remove_files(&names, true)
    }
}
