// File: ./src/client/mod.rs
pub mod core;
pub mod endpoints;

pub use core::{ApiClient, AuthResponse, NewTask, TaskUpdate};

use std::fmt;

/// Errors surfaced by the API client.
///
/// `Unauthorized` is only produced for authenticated endpoints, where it
/// means the stored token was rejected and the session must be cleared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    Unauthorized,
    /// The backend answered with an error `message` body.
    Api(String),
    /// Transport-level failure (connection refused, TLS, timeout).
    Network(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Unauthorized => write!(f, "Session expired. Please sign in again."),
            ApiError::Api(msg) => write!(f, "{}", msg),
            ApiError::Network(detail) => write!(f, "Request failed: {}", detail),
        }
    }
}

impl std::error::Error for ApiError {}
