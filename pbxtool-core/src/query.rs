//! Read-only views over the project model.

use crate::error::{ToolError, ToolResult};
use glob::Pattern;
use pbxtool_model::{Object, XcodeProject, isa};
use pbxtool_types::{FileEntry, FileInfo, GroupRow, NodeKind, TargetEntry};
use std::collections::HashSet;

fn file_entry(id: &str, file: &Object) -> FileEntry {
    FileEntry {
        id: id.to_string(),
        name: file.display_name().unwrap_or("Unknown").to_string(),
        path: file.get_str("path").unwrap_or_default().to_string(),
        file_type: file
            .get_str("lastKnownFileType")
            .or_else(|| file.get_str("explicitFileType"))
            .unwrap_or_default()
            .to_string(),
    }
}

/// File references, optionally filtered, sorted by lower-cased name.
///
/// `pattern` is a case-insensitive substring of the display name; `file_type`
/// a case-sensitive substring of the declared type.
pub fn list_files(
    project: &XcodeProject,
    pattern: Option<&str>,
    file_type: Option<&str>,
) -> Vec<FileEntry> {
    let pattern = pattern.map(str::to_lowercase);
    let mut files: Vec<FileEntry> = project
        .objects()
        .of_isa(isa::FILE_REFERENCE)
        .map(|(id, file)| file_entry(id.as_str(), file))
        .filter(|f| {
            pattern
                .as_deref()
                .is_none_or(|p| f.name.to_lowercase().contains(p))
        })
        .filter(|f| file_type.is_none_or(|t| f.file_type.contains(t)))
        .collect();
    files.sort_by_cached_key(|f| f.name.to_lowercase());
    files
}

/// Depth-first rows of the group tree below the main group.
///
/// Children that are missing or of another kind are skipped, and a group is
/// never entered twice.
pub fn list_groups(project: &XcodeProject) -> ToolResult<Vec<GroupRow>> {
    let main = project.main_group_id()?;
    let mut rows = Vec::new();
    let mut visited = HashSet::new();
    walk_group(project, main.as_str(), 0, &mut visited, &mut rows);
    Ok(rows)
}

fn walk_group<'a>(
    project: &'a XcodeProject,
    id: &'a str,
    depth: usize,
    visited: &mut HashSet<&'a str>,
    rows: &mut Vec<GroupRow>,
) {
    let Some(group) = project.objects().get(id) else {
        return;
    };
    if !visited.insert(id) {
        return;
    }
    rows.push(GroupRow {
        depth,
        kind: NodeKind::Group,
        name: group.display_name().unwrap_or("(unnamed)").to_string(),
    });

    for child_id in group.ids("children") {
        let Some(child) = project.objects().get(child_id) else {
            continue;
        };
        if child.is_group() {
            walk_group(project, child_id, depth + 1, visited, rows);
        } else if child.isa() == isa::FILE_REFERENCE {
            rows.push(GroupRow {
                depth: depth + 1,
                kind: NodeKind::File,
                name: child.display_name().unwrap_or("?").to_string(),
            });
        }
    }
}

pub fn list_targets(project: &XcodeProject) -> Vec<TargetEntry> {
    project
        .native_targets()
        .map(|(id, target)| TargetEntry {
            id: id.to_string(),
            name: target.get_str("name").unwrap_or("Unknown").to_string(),
            product_type: target.get_str("productType").unwrap_or_default().to_string(),
        })
        .collect()
}

/// Shell-style match (`*`, `?`, `[seq]`) against display name or path.
pub fn find_files(project: &XcodeProject, pattern: &str) -> ToolResult<Vec<FileEntry>> {
    let matcher =
        Pattern::new(&shell_pattern(pattern)).map_err(|e| ToolError::InvalidPattern {
            pattern: pattern.to_string(),
            message: e.msg.to_string(),
        })?;
    Ok(list_files(project, None, None)
        .into_iter()
        .filter(|f| matcher.matches(&f.name) || matcher.matches(&f.path))
        .collect())
}

/// Rewrite a shell wildcard into `glob` syntax.
///
/// `*` runs collapse to one `*`, since `**` means something else to `glob`.
/// A `[` with no closing `]` matches itself.
fn shell_pattern(pattern: &str) -> String {
    let chars: Vec<char> = pattern.chars().collect();
    let mut out = String::with_capacity(pattern.len());
    let mut i = 0;
    while i < chars.len() {
        match chars[i] {
            '*' => {
                out.push('*');
                while chars.get(i + 1) == Some(&'*') {
                    i += 1;
                }
                i += 1;
            }
            '[' => match class_end(&chars, i) {
                Some(end) => {
                    out.extend(&chars[i..=end]);
                    i = end + 1;
                }
                None => {
                    out.push_str("[[]");
                    i += 1;
                }
            },
            c => {
                out.push(c);
                i += 1;
            }
        }
    }
    out
}

/// Index of the `]` closing the class opened at `start`. A `]` right after
/// the opening `[` or `[!` is a member, not the end.
fn class_end(chars: &[char], start: usize) -> Option<usize> {
    let mut j = start + 1;
    if chars.get(j) == Some(&'!') {
        j += 1;
    }
    if chars.get(j) == Some(&']') {
        j += 1;
    }
    (j..chars.len()).find(|&k| chars[k] == ']')
}

/// Every file reference whose display name is exactly `name`.
pub fn file_info(project: &XcodeProject, name: &str) -> ToolResult<Vec<FileInfo>> {
    let matches = project.files_by_name(name);
    if matches.is_empty() {
        return Err(ToolError::FileNotInProject(name.to_string()));
    }

    let objects = project.objects();
    Ok(matches
        .iter()
        .filter_map(|id| objects.get(id.as_str()).map(|file| (id, file)))
        .map(|(id, file)| FileInfo {
            id: id.to_string(),
            name: file.get_str("name").map(str::to_string),
            path: file.get_str("path").map(str::to_string),
            file_type: file.get_str("lastKnownFileType").map(str::to_string),
            source_tree: file.get_str("sourceTree").map(str::to_string),
            build_files: objects
                .of_isa(isa::BUILD_FILE)
                .filter(|(_, b)| b.get_str("fileRef") == Some(id.as_str()))
                .map(|(bid, _)| bid.to_string())
                .collect(),
        })
        .collect())
}
