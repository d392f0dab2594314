//! Model edits behind `add`, `remove`, and `fix`.
//!
//! These run against an already-loaded model. Backups and saving belong to
//! the façade.

use crate::check::broken_references;
use crate::error::{ToolError, ToolResult};
use crate::query::list_targets;
use crate::settings::ToolSettings;
use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use fs_err as fs;
use pbxtool_model::{FileOptions, XcodeProject};
use tracing::{debug, warn};

/// Explicit target, else the configured default, else the selection policy.
pub fn resolve_target(
    project: &XcodeProject,
    explicit: Option<&str>,
    settings: &ToolSettings,
) -> Option<String> {
    explicit
        .map(str::to_string)
        .or_else(|| settings.default_target.clone())
        .or_else(|| (settings.target_policy)(&list_targets(project)))
}

/// Path and source tree to record for `file`.
///
/// Files under the project's source root are stored relative to it with
/// `SOURCE_ROOT`; anything else keeps its absolute path with `<absolute>`.
pub fn recorded_path(
    project: &XcodeProject,
    file: &Utf8Path,
) -> ToolResult<(String, &'static str)> {
    let root = match project.source_root() {
        Some(root) if !root.as_str().is_empty() => root,
        _ => Utf8Path::new("."),
    };
    let root = canonical(root)?;
    let file = canonical(file)?;
    match file.strip_prefix(&root) {
        Ok(relative) => Ok((relative.as_str().to_string(), "SOURCE_ROOT")),
        Err(_) => Ok((file.into_string(), "<absolute>")),
    }
}

fn canonical(path: &Utf8Path) -> ToolResult<Utf8PathBuf> {
    let resolved = fs::canonicalize(path).with_context(|| format!("resolve {path}"))?;
    Ok(Utf8PathBuf::try_from(resolved).with_context(|| format!("non UTF-8 path for {path}"))?)
}

/// Add one on-disk file. `Err(AddRejected)` when the path is already referenced.
pub fn add_one(
    project: &mut XcodeProject,
    file: &Utf8Path,
    target: Option<&str>,
    group: Option<&str>,
) -> ToolResult<()> {
    let (path, source_tree) = recorded_path(project, file)?;
    let parent = match group {
        Some(group) => Some(project.get_or_create_group(group)?),
        None => None,
    };
    let opts = FileOptions {
        create_build_files: true,
        target_name: target.map(str::to_string),
        parent,
        source_tree: source_tree.to_string(),
    };
    let created = project.add_file(&path, &opts)?;
    if created.is_empty() {
        return Err(ToolError::AddRejected(file.to_string()));
    }
    debug!(file = %file, recorded = %path, ids = created.len(), "added file");
    Ok(())
}

/// Remove every file reference displayed as `name`. False when none matched.
pub fn remove_by_name(project: &mut XcodeProject, name: &str) -> bool {
    let ids = project.files_by_name(name);
    for id in &ids {
        project.remove_file_by_id(id.as_str());
    }
    !ids.is_empty()
}

/// Delete broken build files. Returns `(fixed, vanished)` ids.
pub fn remove_broken(project: &mut XcodeProject) -> (Vec<String>, Vec<String>) {
    let mut fixed = Vec::new();
    let mut vanished = Vec::new();
    for issue in broken_references(project) {
        if project.purge_object(&issue.subject) {
            debug!(id = %issue.subject, "removed broken build file");
            fixed.push(issue.subject);
        } else {
            warn!(id = %issue.subject, "broken build file already gone");
            vanished.push(issue.subject);
        }
    }
    (fixed, vanished)
}
