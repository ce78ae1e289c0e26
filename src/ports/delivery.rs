//! Delivery ports. Hand export artifacts to the user's environment.

use crate::domain::DomainError;
use std::path::PathBuf;

/// Opens a link "in a new context" (browser tab, terminal hyperlink, ...).
#[async_trait::async_trait]
pub trait UrlOpenerPort: Send + Sync {
    async fn open(&self, url: &str) -> Result<(), DomainError>;
}

/// Saves a downloaded file.
#[async_trait::async_trait]
pub trait FileSaverPort: Send + Sync {
    /// Write `contents` under `filename`. Returns where the file landed.
    async fn save(&self, filename: &str, contents: &[u8]) -> Result<PathBuf, DomainError>;
}
