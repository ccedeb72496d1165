use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CleanerError {
    #[error("Failed to read '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write '{}': {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error in '{}': {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("Line {line} of '{}' has {found} fields, expected at most {expected}", path.display())]
    ExtraFields {
        path: PathBuf,
        line: u64,
        expected: usize,
        found: usize,
    },

    #[error("Missing required column '{column}' in '{}'", path.display())]
    MissingColumn { path: PathBuf, column: String },

    #[error("TOML deserialization failed: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl CleanerError {
    pub fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        CleanerError::Read { path: path.into(), source }
    }

    pub fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        CleanerError::Write { path: path.into(), source }
    }

    pub fn csv(path: impl Into<PathBuf>, source: csv::Error) -> Self {
        CleanerError::Csv { path: path.into(), source }
    }
}

pub type Result<T> = std::result::Result<T, CleanerError>;
