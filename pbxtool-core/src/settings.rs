//! Clap-free settings for the pbxtool façade.

use camino::Utf8PathBuf;
use pbxtool_types::TargetEntry;

/// Manifest used when neither the command line nor `pbxtool.toml` names one.
pub const DEFAULT_PROJECT_PATH: &str = "DMSAApp/DMSAApp.xcodeproj/project.pbxproj";

pub const DEFAULT_BACKUP_DIR: &str = ".pbxproj_backups";

/// Views deleted from the app whose references `cleanup` strips.
pub const DEFAULT_CLEANUP_FILES: &[&str] = &[
    "GeneralSettingsView.swift",
    "NotificationSettingsView.swift",
    "FilterSettingsView.swift",
    "AdvancedSettingsView.swift",
    "SyncPairSettingsView.swift",
    "VFSSettingsView.swift",
    "SettingsView.swift",
    "DiskSettingsView.swift",
    "StatisticsView.swift",
    "HistoryView.swift",
    "HistoryContentView.swift",
    "NotificationHistoryView.swift",
    "SyncProgressView.swift",
    "WizardView.swift",
];

/// Picks the target used when an add names none.
pub type TargetPolicy = fn(&[TargetEntry]) -> Option<String>;

/// First target whose product type mentions `application`, else the first target.
pub fn prefer_application(targets: &[TargetEntry]) -> Option<String> {
    targets
        .iter()
        .find(|t| t.product_type.contains("application"))
        .or_else(|| targets.first())
        .map(|t| t.name.clone())
}

/// Settings for a [`PbxTool`](crate::PbxTool) session.
#[derive(Debug, Clone)]
pub struct ToolSettings {
    pub project_path: Utf8PathBuf,
    pub backup_dir: Utf8PathBuf,

    // Mutation defaults
    pub default_target: Option<String>,
    pub target_policy: TargetPolicy,
    pub cleanup_files: Vec<String>,
}

impl Default for ToolSettings {
    fn default() -> Self {
        Self {
            project_path: Utf8PathBuf::from(DEFAULT_PROJECT_PATH),
            backup_dir: Utf8PathBuf::from(DEFAULT_BACKUP_DIR),
            default_target: None,
            target_policy: prefer_application,
            cleanup_files: DEFAULT_CLEANUP_FILES.iter().map(|s| s.to_string()).collect(),
        }
    }
}
