//! Server-side error type for the `api` crate.
//!
//! Internal helpers return [`ApiError`]; server functions convert it into a
//! `ServerFnError` at the boundary with [`server_error`].

use dioxus::prelude::ServerFnError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    InvalidInput(String),

    #[error("An account with this email already exists")]
    DuplicateAccount,

    #[error("Not authenticated")]
    NotAuthenticated,

    #[error("Session error: {0}")]
    Session(String),

    #[error("Failed to hash password: {0}")]
    Hashing(String),

    #[error("Bank link error: {0}")]
    Link(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<tower_sessions::session::Error> for ApiError {
    fn from(e: tower_sessions::session::Error) -> Self {
        ApiError::Session(e.to_string())
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        ApiError::Link(e.to_string())
    }
}

/// Log and convert an [`ApiError`] for the server-function boundary.
pub fn server_error(e: ApiError) -> ServerFnError {
    match &e {
        ApiError::InvalidInput(_) | ApiError::DuplicateAccount | ApiError::NotAuthenticated => {
            tracing::debug!("request refused: {}", e)
        }
        _ => tracing::error!("request failed: {}", e),
    }
    ServerFnError::new(e.to_string())
}
