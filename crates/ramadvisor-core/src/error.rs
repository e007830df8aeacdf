use std::fmt;
use std::path::PathBuf;

/// Machine-readable error codes for callers that surface degraded states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    KnowledgeNotFound,
    KnowledgeParseError,
    ConfigParseError,
    EmptyQuery,
    EngineUnavailable,
    InternalUnexpected,
}

impl ErrorCode {
    /// Stable code identifier (`E####`) for machine parsing.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::KnowledgeNotFound => "E1001",
            Self::KnowledgeParseError => "E1002",
            Self::ConfigParseError => "E1003",
            Self::EmptyQuery => "E2001",
            Self::EngineUnavailable => "E3001",
            Self::InternalUnexpected => "E9001",
        }
    }

    /// Short human-facing summary for logs and terminal output.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::KnowledgeNotFound => "Knowledge files not found",
            Self::KnowledgeParseError => "Knowledge file parse error",
            Self::ConfigParseError => "Config file parse error",
            Self::EmptyQuery => "Query is empty",
            Self::EngineUnavailable => "Retrieval engine unavailable",
            Self::InternalUnexpected => "Internal unexpected error",
        }
    }

    /// Optional remediation hint that can be surfaced to operators.
    #[must_use]
    pub const fn hint(self) -> Option<&'static str> {
        match self {
            Self::KnowledgeNotFound => Some(
                "Point --data-dir at a directory holding cfa_knowledge_embeddings.json.",
            ),
            Self::KnowledgeParseError => {
                Some("Regenerate the knowledge JSON as a UTF-8 array of chunk records.")
            }
            Self::ConfigParseError => Some("Fix syntax in ramadvisor.toml and retry."),
            Self::EmptyQuery => Some("Provide a non-empty query string."),
            Self::EngineUnavailable => {
                Some("Enable `sample_fallback` or provide a readable knowledge directory.")
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

/// Errors raised while loading a knowledge base from disk.
#[derive(Debug, thiserror::Error)]
pub enum KnowledgeError {
    /// The configured knowledge directory does not exist.
    #[error("knowledge directory not found: {}", .0.display())]
    DirectoryNotFound(PathBuf),

    /// None of the candidate chunk files exist in the directory.
    #[error("no knowledge file found in {} (tried: {tried})", .dir.display())]
    FileNotFound { dir: PathBuf, tried: String },

    /// A knowledge file exists but could not be read as UTF-8 text.
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A knowledge file exists but is not a JSON array of records.
    #[error("failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The file parsed but held no usable chunk.
    #[error("knowledge file {} holds no usable chunk", .0.display())]
    Empty(PathBuf),
}

impl KnowledgeError {
    /// Map to the stable code surfaced by the CLI.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::DirectoryNotFound(_) | Self::FileNotFound { .. } => ErrorCode::KnowledgeNotFound,
            Self::Read { .. } | Self::Parse { .. } | Self::Empty(_) => {
                ErrorCode::KnowledgeParseError
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ErrorCode, KnowledgeError};
    use std::collections::HashSet;
    use std::path::PathBuf;

    const ALL: [ErrorCode; 6] = [
        ErrorCode::KnowledgeNotFound,
        ErrorCode::KnowledgeParseError,
        ErrorCode::ConfigParseError,
        ErrorCode::EmptyQuery,
        ErrorCode::EngineUnavailable,
        ErrorCode::InternalUnexpected,
    ];

    #[test]
    fn all_codes_are_unique() {
        let mut seen = HashSet::new();
        for code in ALL {
            assert!(seen.insert(code.code()), "duplicate code {}", code.code());
        }
    }

    #[test]
    fn code_format_is_machine_friendly() {
        for code in ALL {
            let text = code.code();
            assert_eq!(text.len(), 5);
            assert!(text.starts_with('E'));
            assert!(text[1..].chars().all(|c| c.is_ascii_digit()));
        }
    }

    #[test]
    fn display_uses_code() {
        assert_eq!(ErrorCode::EmptyQuery.to_string(), "E2001");
    }

    #[test]
    fn knowledge_errors_map_to_codes() {
        let missing = KnowledgeError::DirectoryNotFound(PathBuf::from("/nope"));
        assert_eq!(missing.code(), ErrorCode::KnowledgeNotFound);
        assert!(missing.to_string().contains("/nope"));

        let empty = KnowledgeError::Empty(PathBuf::from("chunks.json"));
        assert_eq!(empty.code(), ErrorCode::KnowledgeParseError);

        let unreadable = KnowledgeError::Read {
            path: PathBuf::from("chunks.json"),
            source: std::io::Error::from(std::io::ErrorKind::InvalidData),
        };
        assert_eq!(unreadable.code(), ErrorCode::KnowledgeParseError);
        assert!(unreadable.to_string().starts_with("failed to read chunks.json"));
    }
}
