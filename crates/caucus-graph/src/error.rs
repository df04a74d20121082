use std::path::PathBuf;

use caucus_core::{CoreError, ErrorCode};

/// Errors raised while building or exporting a network.
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    /// A bill carried a legislator whose name could not be parsed.
    #[error(transparent)]
    Record(#[from] CoreError),

    #[error("unsupported export format {extension:?}; supported formats: {}", supported.join(", "))]
    UnsupportedFormat {
        extension: String,
        supported: Vec<&'static str>,
    },

    #[error("failed to write graph to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize graph: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl GraphError {
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::Record(err) => err.code(),
            Self::UnsupportedFormat { .. } => ErrorCode::UnsupportedExportFormat,
            Self::Write { .. } => ErrorCode::ExportWriteFailed,
            Self::Serialize(_) => ErrorCode::InternalUnexpected,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsupported_format_lists_alternatives() {
        let err = GraphError::UnsupportedFormat {
            extension: "gexf".into(),
            supported: vec!["json"],
        };
        let msg = err.to_string();
        assert!(msg.contains("\"gexf\""));
        assert!(msg.contains("supported formats: json"));
        assert_eq!(err.code(), ErrorCode::UnsupportedExportFormat);
    }

    #[test]
    fn record_errors_keep_their_code() {
        let err = GraphError::from(CoreError::NameParse("Rep. Nobody".into()));
        assert_eq!(err.code(), ErrorCode::NameParseFailed);
    }
}
