//! Error types for statcard
//!
//! All modules use `StatcardResult<T>` as their return type.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for statcard operations
pub type StatcardResult<T> = Result<T, StatcardError>;

/// All errors that can occur in statcard
#[derive(Error, Debug)]
pub enum StatcardError {
    // Configuration errors
    #[error("Invalid configuration at {path}: {reason}")]
    ConfigInvalid { path: PathBuf, reason: String },

    #[error("Failed to create config directory {path}: {source}")]
    ConfigDirCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Missing required setting: {name}")]
    MissingSetting { name: &'static str },

    // Remote API errors
    #[error("Request failed during {operation}: {reason}")]
    Http { operation: String, reason: String },

    #[error("GraphQL error during {operation}: {message}")]
    Graphql { operation: String, message: String },

    #[error("Response for {operation} is missing {field}")]
    MissingField {
        operation: String,
        field: &'static str,
    },

    #[error("User not found: {0}")]
    UserNotFound(String),

    // Cache errors
    #[error("Cache file {path} is unreadable: {source}")]
    CacheCorrupt {
        path: PathBuf,
        #[source]
        source: CacheFormatError,
    },

    // IO errors
    #[error("IO error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    // Serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    // General errors
    #[error("Internal error: {0}")]
    Internal(String),

    #[error("{0}")]
    User(String),
}

/// Why a persisted cache document could not be accepted
#[derive(Error, Debug)]
pub enum CacheFormatError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("schema version {found} is newer than supported version {supported}")]
    NewerVersion { found: u32, supported: u32 },
}

impl StatcardError {
    /// Create an IO error with context
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Create a transport error for a named operation
    pub fn http(operation: impl Into<String>, reason: impl ToString) -> Self {
        Self::Http {
            operation: operation.into(),
            reason: reason.to_string(),
        }
    }

    /// Check if error is retryable
    ///
    /// Nothing in the reconciliation core retries; this is surfaced so
    /// callers can decide.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Http { .. })
    }

    /// Get actionable hint for the error
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::MissingSetting { name: "username" } => {
                Some("Set GITHUB_USERNAME or pass --username")
            }
            Self::MissingSetting { name: "token" } => {
                Some("Set API_TOKEN to a token with read:user and repo scopes")
            }
            Self::UserNotFound(_) => Some("Check the spelling of the GitHub login"),
            Self::Graphql { .. } => Some("Check that the token has access to the requested data"),
            _ => None,
        }
    }
}
