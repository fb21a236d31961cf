//! Error types for loading and configuring an anthology source
//!
//! Load failures are terminal for a single page load: none of them is retried,
//! and every variant is surfaced to the reader through the same error page.
//! Configuration failures happen before any load is attempted.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    #[error("Transport failure while fetching {url}: {message}")]
    TransportFailure { url: String, message: String },
    #[error("Network response was not ok: {status} {status_text}")]
    NetworkError { status: u16, status_text: String },
    #[error("Document is empty")]
    EmptyDocument,
    #[error("Document contains no entries")]
    NoEntries,
}

impl LoadError {
    /// Create a transport failure for `url`.
    pub fn transport(url: impl Into<String>, message: impl ToString) -> Self {
        Self::TransportFailure {
            url: url.into(),
            message: message.to_string(),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            LoadError::TransportFailure { .. } => "transport_failure",
            LoadError::NetworkError { .. } => "network_error",
            LoadError::EmptyDocument => "empty_document",
            LoadError::NoEntries => "no_entries",
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse YAML config: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("Invalid source reference: {0}")]
    InvalidReference(String),
    #[error("Validation error: {0}")]
    Validation(String),
}
