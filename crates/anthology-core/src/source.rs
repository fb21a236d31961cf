//! Where the raw document comes from
//!
//! [`HttpSource`] performs the single GET against the raw file host.
//! [`FileSource`] reads a local copy, which is handy for previewing a draft
//! before it is pushed.

use crate::config::SourceConfig;
use crate::errors::LoadError;
use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::Arc;

const USER_AGENT: &str = concat!("anthology/", env!("CARGO_PKG_VERSION"));

#[async_trait]
pub trait DocumentSource: Send + Sync {
    /// Human readable location used in logs.
    fn location(&self) -> String;

    /// Retrieve the whole document as text.
    async fn fetch(&self) -> Result<String, LoadError>;
}

#[async_trait]
impl<T: DocumentSource + ?Sized> DocumentSource for Arc<T> {
    fn location(&self) -> String {
        (**self).location()
    }

    async fn fetch(&self) -> Result<String, LoadError> {
        (**self).fetch().await
    }
}

/// Fetches `<raw_base_url>/<owner>/<repo>/<branch>/<file_path>` once per call.
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: reqwest::Client,
    url: String,
}

impl HttpSource {
    pub fn new(config: &SourceConfig) -> Result<Self, LoadError> {
        let client = build_client().map_err(|e| LoadError::transport(config.raw_file_url(), e))?;
        Ok(Self::with_client(client, config))
    }

    /// Reuse an existing client, e.g. one shared by a server.
    pub fn with_client(client: reqwest::Client, config: &SourceConfig) -> Self {
        Self {
            client,
            url: config.raw_file_url(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

/// HTTP client with the crate's user agent and no explicit timeout.
pub fn build_client() -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder().user_agent(USER_AGENT).build()
}

#[async_trait]
impl DocumentSource for HttpSource {
    fn location(&self) -> String {
        self.url.clone()
    }

    async fn fetch(&self) -> Result<String, LoadError> {
        log::debug!("Fetching {}", self.url);

        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| LoadError::transport(&self.url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(LoadError::NetworkError {
                status: status.as_u16(),
                status_text: status.canonical_reason().unwrap_or_default().to_string(),
            });
        }

        response
            .text()
            .await
            .map_err(|e| LoadError::transport(&self.url, e))
    }
}

/// Reads the document from the local filesystem.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl DocumentSource for FileSource {
    fn location(&self) -> String {
        self.path.display().to_string()
    }

    async fn fetch(&self) -> Result<String, LoadError> {
        tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| LoadError::transport(self.location(), e))
    }
}
