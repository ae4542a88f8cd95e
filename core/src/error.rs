//! Error types for the recommendation client.
//!
//! # Design
//! Every failure of an operation ends up on that operation's failure branch
//! and is turned into a single status message. `user_message` performs the
//! extraction: a server-reported `{message}` wins; anything else falls back
//! to this error's `Display` text so a malformed payload is still visible.

use thiserror::Error;
use tracing::warn;

use crate::types::ErrorBody;

/// The request never produced an HTTP response.
#[derive(Debug, Error)]
#[error("transport failure: {0}")]
pub struct TransportError(pub String);

/// Configuration could not be read from the environment.
#[derive(Debug, Error)]
#[error("failed to load config: {0}")]
pub struct ConfigError(#[from] pub envy::Error);

/// Errors surfaced on an operation's failure branch.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Network-level failure before any status code was received.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The server answered with a non-2xx status.
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// A 2xx body could not be decoded into the expected shape.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// The outbound payload could not be encoded.
    #[error("serialization failed: {0}")]
    Serialization(String),
}

impl ApiError {
    /// The server's structured `message`, if the failure carried one.
    pub fn server_message(&self) -> Option<String> {
        match self {
            ApiError::Http { body, .. } => serde_json::from_str::<ErrorBody>(body)
                .ok()
                .and_then(|parsed| parsed.message),
            _ => None,
        }
    }

    /// Text shown in the status region for this failure.
    pub fn user_message(&self) -> String {
        match self.server_message() {
            Some(message) => message,
            None => {
                warn!(error = %self, "failure payload carried no message field");
                self.to_string()
            }
        }
    }
}
