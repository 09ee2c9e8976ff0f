// src/error.rs

use thiserror::Error;

/// The primary error type for the `oneid-jwt-auth` library.
#[derive(Debug, Error)]
pub enum OneIdError {
    /// A construction-time input is empty, out of range or not a valid URL.
    #[error("{0}")]
    Config(String),

    /// The private key text could not be parsed into an RSA signing key.
    #[error("Invalid key format: {0}")]
    KeyFormat(String),

    /// The per-call identity, claims, token or app type was rejected.
    #[error("{0}")]
    Validation(String),

    /// Signing the token failed.
    #[error("Token signing failed: {0}")]
    Signing(String),

    /// Reading the private key file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl OneIdError {
    pub(crate) fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub(crate) fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}

impl From<jsonwebtoken::errors::Error> for OneIdError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        Self::Signing(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, OneIdError>;
