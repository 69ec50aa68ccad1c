use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProserError {
    #[error("Unable to match sentences in source text:\n{text}")]
    NoSentencesFound { text: String },

    #[error("Malformed paragraph file {}: {source}", path.display())]
    MalformedSourceFile {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Could not read paragraph file {}: {source}", path.display())]
    SourceRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unknown theme: {0}")]
    UnknownTheme(String),

    #[error("Failed to persist session state: {0}")]
    Persistence(String),

    #[error("The paragraph source is empty")]
    EmptySource,

    #[error("IO error occurred: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ProserError>;
