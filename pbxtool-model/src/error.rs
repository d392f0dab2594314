//! Error types for pbxtool-model.

use camino::Utf8PathBuf;
use thiserror::Error;

/// Everything the project model can fail with.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("io error on {path}: {source}")]
    Io {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The text is not a well-formed OpenStep property list.
    #[error("parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    /// The property list parsed but does not look like a project manifest.
    #[error("malformed project: {0}")]
    Structure(String),

    #[error("target not found: {0}")]
    TargetNotFound(String),

    #[error("project has no main group")]
    MissingMainGroup,
}

impl ModelError {
    pub(crate) fn structure(message: impl Into<String>) -> Self {
        ModelError::Structure(message.into())
    }
}

pub type ModelResult<T> = Result<T, ModelError>;

#[cfg(test)]
mod tests {
    use super::ModelError;

    #[test]
    fn parse_error_mentions_line() {
        let err = ModelError::Parse {
            line: 7,
            message: "expected ';'".to_string(),
        };
        assert_eq!(err.to_string(), "parse error at line 7: expected ';'");
    }

    #[test]
    fn target_not_found_names_target() {
        let err = ModelError::TargetNotFound("Widget".to_string());
        assert!(err.to_string().contains("Widget"));
    }
}
