use serde::{Deserialize, Serialize};

/// One `PBXFileReference` as seen by the query layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileEntry {
    pub id: String,
    /// Explicit `name`, else `path`, else `Unknown`.
    pub name: String,
    #[serde(default)]
    pub path: String,
    /// `lastKnownFileType`, else `explicitFileType`, else empty.
    #[serde(default)]
    pub file_type: String,
}

impl FileEntry {
    /// Last dotted component of the declared type (`sourcecode.swift` -> `swift`).
    pub fn short_type(&self) -> &str {
        if self.file_type.is_empty() {
            return "?";
        }
        self.file_type.rsplit('.').next().unwrap_or("?")
    }
}

/// One `PBXNativeTarget`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetEntry {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub product_type: String,
}

impl TargetEntry {
    pub fn short_type(&self) -> &str {
        if self.product_type.is_empty() {
            return "?";
        }
        self.product_type.rsplit('.').next().unwrap_or("?")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    Group,
    File,
}

/// A row of the group tree, in depth-first order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupRow {
    pub depth: usize,
    pub kind: NodeKind,
    pub name: String,
}

/// Detail view of a single file reference plus the build files pointing at it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileInfo {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_tree: Option<String>,
    #[serde(default)]
    pub build_files: Vec<String>,
}
