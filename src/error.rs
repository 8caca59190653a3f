//! Error types for schema detection and script extraction

use std::path::PathBuf;
use thiserror::Error;

/// The source could not be matched to a supported CI dialect
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("no document")]
    NoDocument,

    #[error("cannot determine dialect")]
    UnknownDialect,

    #[error("no recognizable attachment point for {dialect} config")]
    NoAttachmentPoint { dialect: String },

    #[error("{dialect} config is recognized but not supported: {reason}")]
    Unsupported { dialect: String, reason: String },
}

/// A node required by a dialect had an unexpected shape
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("unexpected format of element {key}: expected {expected}, found {found}")]
    UnexpectedShape {
        key: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("duplicate job key {0}")]
    DuplicateKey(String),

    #[error(transparent)]
    Schema(#[from] SchemaError),
}

/// Failure to process one source file; never aborts the remaining files
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to read {}: {message}", .path.display())]
    Read { path: PathBuf, message: String },

    #[error("failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("read {}, {source}", .path.display())]
    Schema {
        path: PathBuf,
        #[source]
        source: SchemaError,
    },

    #[error("read {}, {source}", .path.display())]
    Extract {
        path: PathBuf,
        #[source]
        source: ExtractError,
    },
}

impl SourceError {
    pub fn path(&self) -> &PathBuf {
        match self {
            SourceError::Read { path, .. }
            | SourceError::Parse { path, .. }
            | SourceError::Schema { path, .. }
            | SourceError::Extract { path, .. } => path,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_error_messages() {
        assert_eq!(SchemaError::NoDocument.to_string(), "no document");
        assert_eq!(
            SchemaError::UnknownDialect.to_string(),
            "cannot determine dialect"
        );
    }

    #[test]
    fn test_extract_error_wraps_schema_error() {
        let err: ExtractError = SchemaError::Unsupported {
            dialect: "GitHub Actions".to_string(),
            reason: "runs.using is node20".to_string(),
        }
        .into();
        assert!(err.to_string().contains("not supported"));
    }

    #[test]
    fn test_source_error_path() {
        let err = SourceError::Schema {
            path: PathBuf::from("ci.yml"),
            source: SchemaError::UnknownDialect,
        };
        assert_eq!(err.path(), &PathBuf::from("ci.yml"));
        assert_eq!(err.to_string(), "read ci.yml, cannot determine dialect");
    }
}
