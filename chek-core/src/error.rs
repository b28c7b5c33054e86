use std::path::PathBuf;

use thiserror::Error;

/// Conditions surfaced to the front end. None of them is fatal to the process.
#[derive(Debug, Error)]
pub enum ChekError {
    /// URL does not belong to any supported receipt portal
    #[error("not a receipt link: {0} (supported: cabinet.tax.gov.ua, Silpo, Fora)")]
    UnrecognizedUrl(String),

    #[error("link already stored: {0}")]
    Duplicate(String),

    /// Link matched a portal but could not be parsed as a URL
    #[error("malformed URL: {0}")]
    MalformedUrl(String),

    #[error("no date parameter in URL: {0}")]
    NoDateParam(String),

    #[error("purchase date not found on page: {0}")]
    DateNotFound(String),

    #[error("invalid date '{0}'")]
    InvalidDate(String),

    #[error("network failure: {0}")]
    Network(String),

    #[error("io error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Link file exists but is not a valid record list
    #[error("corrupt link file {}: {source}", path.display())]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("encode records: {0}")]
    Encode(#[from] serde_json::Error),
}

impl ChekError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ChekError::Io {
            path: path.into(),
            source,
        }
    }

    /// True for input rejections (bad shape or already stored); the store was not touched.
    pub fn is_rejection(&self) -> bool {
        matches!(self, ChekError::UnrecognizedUrl(_) | ChekError::Duplicate(_))
    }
}
