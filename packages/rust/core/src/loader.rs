//! Product record sources.

use std::future::Future;
use std::path::PathBuf;

use tracing::{debug, instrument};

use pagesmith_shared::{PagesmithError, RawProductRecord, Result};

use crate::normalizer;

/// Supplies the single raw record a run works on.
pub trait ProductLoader: Send + Sync {
    fn load(&self) -> impl Future<Output = Result<RawProductRecord>> + Send;

    /// Short description of the source for logs.
    fn describe(&self) -> String;
}

/// Reads a record from a JSON file on disk.
#[derive(Debug, Clone)]
pub struct JsonFileLoader {
    path: PathBuf,
}

impl JsonFileLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ProductLoader for JsonFileLoader {
    #[instrument(skip_all, fields(path = %self.path.display()))]
    async fn load(&self) -> Result<RawProductRecord> {
        let content = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| PagesmithError::io(&self.path, e))?;

        debug!(bytes = content.len(), "product record read");
        normalizer::parse_record(&content)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Hands out a record that is already in memory.
#[derive(Debug, Clone)]
pub struct InMemoryLoader {
    record: RawProductRecord,
}

impl InMemoryLoader {
    pub fn new(record: RawProductRecord) -> Self {
        Self { record }
    }
}

impl ProductLoader for InMemoryLoader {
    async fn load(&self) -> Result<RawProductRecord> {
        Ok(self.record.clone())
    }

    fn describe(&self) -> String {
        "in-memory record".to_string()
    }
}
