use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MatcherError {
    /// A keyword with an empty word. Raised when a table is built, never
    /// while matching.
    #[error("Invalid candidate at position {position}: {reason}")]
    InvalidCandidate { position: usize, reason: String },

    #[error("Failed to read stdin: {0}")]
    StdinRead(#[from] io::Error),

    #[error("Failed to parse request JSON: {0}")]
    RequestParse(#[from] serde_json::Error),

    #[error("Failed to read config from {path}: {source}")]
    ConfigRead { path: PathBuf, source: io::Error },

    #[error("Failed to parse config: {0}")]
    ConfigParse(String),

    #[error("Failed to read keyword table from {path}: {source}")]
    TableRead { path: PathBuf, source: io::Error },

    #[error("Failed to parse keyword table: {0}")]
    TableParse(String),

    #[error("Keyword table not found at {0}")]
    TableNotFound(PathBuf),

    #[error("Config directory not found")]
    NoConfigDir,
}

impl MatcherError {
    pub(crate) fn empty_word(position: usize) -> Self {
        MatcherError::InvalidCandidate {
            position,
            reason: "keyword word is empty".to_string(),
        }
    }
}
