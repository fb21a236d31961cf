//! Fetch-and-parse pipeline

use crate::config::SourceConfig;
use crate::document::{parse_document, EntryList};
use crate::errors::LoadError;
use crate::source::{DocumentSource, HttpSource};

/// Retrieves a document from its source and turns it into entries.
///
/// Each call to [`EntryLoader::load`] issues exactly one fetch. Nothing is
/// cached and nothing is retried.
pub struct EntryLoader<S> {
    source: S,
}

impl EntryLoader<HttpSource> {
    pub fn from_config(config: &SourceConfig) -> Result<Self, LoadError> {
        Ok(Self::new(HttpSource::new(config)?))
    }
}

impl<S: DocumentSource> EntryLoader<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub async fn load(&self) -> Result<EntryList, LoadError> {
        let body = self.source.fetch().await?;
        let entries = parse_document(&body)?;
        log::info!(
            "Loaded {} entries from {}",
            entries.len(),
            self.source.location()
        );
        Ok(entries)
    }
}
