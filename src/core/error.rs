use thiserror::Error;

use crate::core::types::Decade;

/// Failure while reading one of the demographic source files.
///
/// Always fatal: the run aborts before any generation starts.
#[derive(Error, Debug)]
#[error("Failed to load {file}: {kind}")]
pub struct DataLoadError {
    pub file: String,
    pub kind: DataLoadErrorKind,
}

impl DataLoadError {
    pub fn new(file: impl Into<String>, kind: DataLoadErrorKind) -> Self {
        Self { file: file.into(), kind }
    }

    pub fn malformed(file: impl Into<String>, line: usize, reason: impl Into<String>) -> Self {
        Self::new(file, DataLoadErrorKind::Malformed { line, reason: reason.into() })
    }
}

#[derive(Error, Debug)]
pub enum DataLoadErrorKind {
    #[error("file unreadable: {0}")]
    Missing(#[source] std::io::Error),

    #[error("missing column '{0}'")]
    MissingColumn(String),

    #[error("line {line}: {reason}")]
    Malformed { line: usize, reason: String },

    #[error("no data rows")]
    Empty,
}

/// A required key is absent from a loaded table.
///
/// Exact-match lookups have no fallback, so this is fatal during generation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LookupError {
    #[error("No life expectancy for birth year {year}")]
    LifeExpectancy { year: i32 },

    #[error("No birth/marriage rates for {decade}")]
    Rates { decade: Decade },

    #[error("No last-name table for {decade}")]
    LastNames { decade: Decade },

    #[error("No last name of rank {rank} in {decade}")]
    LastNameRank { decade: Decade, rank: usize },
}

#[derive(Error, Debug)]
pub enum TreeError {
    #[error(transparent)]
    DataLoad(#[from] DataLoadError),

    #[error(transparent)]
    Lookup(#[from] LookupError),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, TreeError>;
