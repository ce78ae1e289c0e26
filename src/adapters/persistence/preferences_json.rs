//! Implements PreferencePort using a JSON file.
//!
//! Stores the theme as `{"darkMode": bool}`. A missing or unreadable file
//! means light mode.

use crate::domain::DomainError;
use crate::ports::PreferencePort;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::warn;

#[derive(Debug, Default, Serialize, Deserialize)]
struct Preferences {
    #[serde(rename = "darkMode", default)]
    dark_mode: bool,
}

/// JSON file-based preference storage.
pub struct PreferencesJson {
    path: PathBuf,
    cache: tokio::sync::RwLock<Preferences>,
}

impl PreferencesJson {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            cache: tokio::sync::RwLock::new(Preferences::default()),
        }
    }

    /// Load preferences from disk. A corrupt file is logged and ignored.
    pub async fn load(&self) -> Result<(), DomainError> {
        let data = match fs::read_to_string(&self.path).await {
            Ok(s) => serde_json::from_str(&s).unwrap_or_else(|e| {
                warn!(path = %self.path.display(), error = %e, "preferences file is not valid JSON");
                Preferences::default()
            }),
            Err(_) => Preferences::default(),
        };
        *self.cache.write().await = data;
        Ok(())
    }

    /// Write to a temp file, sync, then rename over the target.
    async fn save(&self) -> Result<(), DomainError> {
        let data = self.cache.read().await;
        let json = serde_json::to_string_pretty(&*data)
            .map_err(|e| DomainError::Preference(e.to_string()))?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| DomainError::Preference(format!("create directory: {}", e)))?;
        }

        let temp_path = self.path.with_extension("json.tmp");
        let mut f = fs::File::create(&temp_path)
            .await
            .map_err(|e| DomainError::Preference(format!("create temp file: {}", e)))?;
        f.write_all(json.as_bytes())
            .await
            .map_err(|e| DomainError::Preference(format!("write temp file: {}", e)))?;
        f.sync_all()
            .await
            .map_err(|e| DomainError::Preference(format!("sync temp file: {}", e)))?;
        drop(f);

        fs::rename(&temp_path, &self.path)
            .await
            .map_err(|e| DomainError::Preference(format!("atomic rename failed: {}", e)))?;

        Ok(())
    }
}

#[async_trait::async_trait]
impl PreferencePort for PreferencesJson {
    async fn dark_mode(&self) -> Result<bool, DomainError> {
        Ok(self.cache.read().await.dark_mode)
    }

    async fn set_dark_mode(&self, enabled: bool) -> Result<(), DomainError> {
        self.cache.write().await.dark_mode = enabled;
        self.save().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_file_means_light_mode() {
        let dir = tempfile::tempdir().unwrap();
        let prefs = PreferencesJson::new(dir.path().join("preferences.json"));
        prefs.load().await.unwrap();
        assert!(!prefs.dark_mode().await.unwrap());
    }

    #[tokio::test]
    async fn test_toggle_is_written_and_reloaded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("preferences.json");

        let prefs = PreferencesJson::new(&path);
        prefs.set_dark_mode(true).await.unwrap();
        let raw = std::fs::read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value, serde_json::json!({"darkMode": true}));
        assert!(!path.with_extension("json.tmp").exists());

        let reloaded = PreferencesJson::new(&path);
        reloaded.load().await.unwrap();
        assert!(reloaded.dark_mode().await.unwrap());
    }

    #[tokio::test]
    async fn test_corrupt_file_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("preferences.json");
        std::fs::write(&path, "{not json").unwrap();

        let prefs = PreferencesJson::new(&path);
        prefs.load().await.unwrap();
        assert!(!prefs.dark_mode().await.unwrap());
    }
}
