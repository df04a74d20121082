use std::fmt;
use std::path::PathBuf;

/// Machine-readable error codes for scripting and log filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    InvalidChamber,
    ConfigParseError,
    UnsupportedExportFormat,
    NameParseFailed,
    MalformedRecord,
    ListingRequestFailed,
    DetailRequestFailed,
    CacheReadFailed,
    CacheWriteFailed,
    ExportWriteFailed,
    InternalUnexpected,
}

impl ErrorCode {
    /// Stable code identifier (`E####`) for machine parsing.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::InvalidChamber => "E1001",
            Self::ConfigParseError => "E1002",
            Self::UnsupportedExportFormat => "E1003",
            Self::NameParseFailed => "E2001",
            Self::MalformedRecord => "E2002",
            Self::ListingRequestFailed => "E3001",
            Self::DetailRequestFailed => "E3002",
            Self::CacheReadFailed => "E4001",
            Self::CacheWriteFailed => "E4002",
            Self::ExportWriteFailed => "E4003",
            Self::InternalUnexpected => "E9001",
        }
    }

    /// Short human-facing summary for logs and terminal output.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::InvalidChamber => "Invalid chamber",
            Self::ConfigParseError => "Config file parse error",
            Self::UnsupportedExportFormat => "Unsupported export format",
            Self::NameParseFailed => "Legislator name could not be parsed",
            Self::MalformedRecord => "Malformed API record",
            Self::ListingRequestFailed => "Listing request failed",
            Self::DetailRequestFailed => "Detail request failed",
            Self::CacheReadFailed => "Cache read failed",
            Self::CacheWriteFailed => "Cache write failed",
            Self::ExportWriteFailed => "Graph export failed",
            Self::InternalUnexpected => "Internal unexpected error",
        }
    }

    /// Optional remediation hint that can be surfaced to operators.
    #[must_use]
    pub const fn hint(self) -> Option<&'static str> {
        match self {
            Self::InvalidChamber => {
                Some("Use one of: lower, representatives, upper, senate.")
            }
            Self::ConfigParseError => Some("Fix syntax in caucus/config.toml and retry."),
            Self::UnsupportedExportFormat => Some("Use an output path ending in .json."),
            Self::NameParseFailed => {
                Some("Names must carry a [P-SS] party/state suffix, e.g. [D-CA5].")
            }
            Self::MalformedRecord => Some("Re-fetch with --ignore-cache; the API shape may have changed."),
            Self::ListingRequestFailed => Some("Check network access to the API host and retry."),
            Self::DetailRequestFailed => None,
            Self::CacheReadFailed => Some("Delete the cache file or pass --ignore-cache."),
            Self::CacheWriteFailed | Self::ExportWriteFailed => {
                Some("Check disk space and write permissions.")
            }
            Self::InternalUnexpected => Some("Retry once. If persistent, report a bug with logs."),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Errors raised by the record model and the retrieval cache.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// The chamber discriminator was not one of the four accepted spellings.
    #[error(
        "invalid value for house, expected lower (representatives) or upper (senate): {0}"
    )]
    InvalidChamber(String),

    /// A legislator name lacked the bracketed `[P-SS...]` suffix.
    #[error("cannot parse party affiliation from name {0:?}")]
    NameParse(String),

    #[error("failed to read cache file {path}: {source}")]
    CacheRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode cache file {path}: {source}")]
    CacheDecode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to write cache file {path}: {source}")]
    CacheWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Fetch(#[from] crate::api::FetchError),
}

impl CoreError {
    /// Map this error onto its stable [`ErrorCode`].
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::InvalidChamber(_) => ErrorCode::InvalidChamber,
            Self::NameParse(_) => ErrorCode::NameParseFailed,
            Self::CacheRead { .. } | Self::CacheDecode { .. } => ErrorCode::CacheReadFailed,
            Self::CacheWrite { .. } => ErrorCode::CacheWriteFailed,
            Self::Fetch(err) => err.code(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{CoreError, ErrorCode};
    use std::collections::HashSet;

    #[test]
    fn all_codes_are_unique() {
        let all = [
            ErrorCode::InvalidChamber,
            ErrorCode::ConfigParseError,
            ErrorCode::UnsupportedExportFormat,
            ErrorCode::NameParseFailed,
            ErrorCode::MalformedRecord,
            ErrorCode::ListingRequestFailed,
            ErrorCode::DetailRequestFailed,
            ErrorCode::CacheReadFailed,
            ErrorCode::CacheWriteFailed,
            ErrorCode::ExportWriteFailed,
            ErrorCode::InternalUnexpected,
        ];

        let mut seen = HashSet::new();
        for code in all {
            assert!(seen.insert(code.code()), "duplicate code {}", code.code());
        }
    }

    #[test]
    fn code_format_is_machine_friendly() {
        let code = ErrorCode::CacheWriteFailed.code();
        assert_eq!(code.len(), 5);
        assert!(code.starts_with('E'));
        assert!(code.chars().skip(1).all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn invalid_chamber_message_names_the_value() {
        let err = CoreError::InvalidChamber("assembly".into());
        assert!(err.to_string().contains("assembly"));
        assert_eq!(err.code(), ErrorCode::InvalidChamber);
    }
}
