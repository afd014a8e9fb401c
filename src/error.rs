use std::path::PathBuf;

use thiserror::Error;

/// Errors produced while loading the coordinate table or answering a query.
#[derive(Debug, Error)]
pub enum ZipError {
    /// The dataset file could not be opened or read.
    #[error("failed to read dataset {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The header row lacks a required column.
    #[error("dataset is missing required column `{0}`")]
    MissingColumn(&'static str),

    /// A data row is malformed. `row` is 1-based and excludes the header.
    #[error("malformed dataset row {row}: {detail}")]
    Data { row: usize, detail: String },

    /// The origin ZIP code is not present in the table.
    #[error("ZIP code not found")]
    NotFound(String),
}

impl ZipError {
    /// True for errors caused by the caller's input rather than the dataset.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

pub type Result<T> = std::result::Result<T, ZipError>;
