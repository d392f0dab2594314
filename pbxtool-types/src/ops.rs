use camino::Utf8PathBuf;
use serde::{Deserialize, Serialize};

/// A snapshot in the backup directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackupEntry {
    pub name: String,
    pub size_bytes: u64,
}

impl BackupEntry {
    pub fn size_kib(&self) -> f64 {
        self.size_bytes as f64 / 1024.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestoreOutcome {
    pub backup: Utf8PathBuf,
    /// True when no name was given and the newest backup was picked.
    pub latest: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddFailure {
    pub path: String,
    pub reason: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddReport {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    #[serde(default)]
    pub added: Vec<String>,
    #[serde(default)]
    pub failed: Vec<AddFailure>,
    pub saved: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoveReport {
    #[serde(default)]
    pub removed: Vec<String>,
    #[serde(default)]
    pub not_found: Vec<String>,
    pub saved: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixReport {
    /// Build-file ids deleted from the object table.
    #[serde(default)]
    pub fixed: Vec<String>,
    /// Ids reported broken that were already gone at deletion time.
    #[serde(default)]
    pub vanished: Vec<String>,
    pub saved: bool,
}

impl FixReport {
    pub fn fixed_count(&self) -> usize {
        self.fixed.len()
    }
}
