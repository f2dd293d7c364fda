//! ICC profile parsing errors.

use thiserror::Error;

/// ICC profile parsing errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("invalid ICC profile: {0}")]
    InvalidIcc(String),
}

impl Error {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        Error::InvalidIcc(reason.into())
    }
}

/// Result type alias.
pub type Result<T> = std::result::Result<T, Error>;
