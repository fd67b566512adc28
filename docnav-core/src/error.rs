//! Error types for docnav-core

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// The requested document does not exist
    #[error("File not found: {}", path.display())]
    InputNotFound { path: PathBuf },

    #[error("Failed to read file: {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A line range given at the CLI boundary could not be used
    #[error("Invalid line range '{input}': {reason}")]
    MalformedRange { input: String, reason: String },

    #[error("Failed to load prompt: {}", path.display())]
    Prompt {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_not_found_names_path() {
        let err = Error::InputNotFound {
            path: PathBuf::from("missing/deepwiki.md"),
        };
        assert_eq!(err.to_string(), "File not found: missing/deepwiki.md");
    }

    #[test]
    fn test_malformed_range_message() {
        let err = Error::MalformedRange {
            input: "abc".to_string(),
            reason: "use format START-END (e.g., 119-164)".to_string(),
        };
        assert!(err.to_string().contains("'abc'"));
        assert!(err.to_string().contains("START-END"));
    }
}
