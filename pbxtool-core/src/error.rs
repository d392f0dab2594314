//! Error types for the pbxtool façade.

use camino::Utf8PathBuf;
use pbxtool_model::ModelError;
use thiserror::Error;

/// How the dispatcher should treat a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    NotFound,
    LibraryFailure,
    Usage,
    Unexpected,
}

#[derive(Debug, Error)]
pub enum ToolError {
    #[error("project file not found: {0}")]
    ManifestNotFound(Utf8PathBuf),

    #[error("backup directory not found: {0}")]
    BackupDirMissing(Utf8PathBuf),

    #[error("no backups in {0}")]
    NoBackups(Utf8PathBuf),

    #[error("backup file does not exist: {0}")]
    BackupNotFound(Utf8PathBuf),

    /// `add` was pointed at a path that is not on disk.
    #[error("file does not exist: {0}")]
    SourceFileMissing(Utf8PathBuf),

    #[error("file not found in project: {0}")]
    FileNotInProject(String),

    #[error(transparent)]
    Library(#[from] ModelError),

    /// The model refused the add because the path is already referenced.
    #[error("failed to add {0}: already in project")]
    AddRejected(String),

    #[error("invalid pattern {pattern:?}: {message}")]
    InvalidPattern { pattern: String, message: String },

    #[error("{0:#}")]
    Io(#[from] anyhow::Error),
}

impl ToolError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ToolError::ManifestNotFound(_)
            | ToolError::BackupDirMissing(_)
            | ToolError::NoBackups(_)
            | ToolError::BackupNotFound(_)
            | ToolError::SourceFileMissing(_)
            | ToolError::FileNotInProject(_) => ErrorCategory::NotFound,
            ToolError::Library(ModelError::Io { .. }) | ToolError::Io(_) => {
                ErrorCategory::Unexpected
            }
            ToolError::Library(_) | ToolError::AddRejected(_) => ErrorCategory::LibraryFailure,
            ToolError::InvalidPattern { .. } => ErrorCategory::Usage,
        }
    }

    /// Failures the user caused or can act on; printed as one line, exit 0.
    pub fn is_reportable(&self) -> bool {
        self.category() != ErrorCategory::Unexpected
    }
}

pub type ToolResult<T> = Result<T, ToolError>;
