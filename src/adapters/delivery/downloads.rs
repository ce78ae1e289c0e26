//! Implements FileSaverPort by writing into a downloads directory.

use crate::domain::DomainError;
use crate::ports::FileSaverPort;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::info;

pub struct DownloadsDir {
    dir: PathBuf,
}

impl DownloadsDir {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }
}

#[async_trait::async_trait]
impl FileSaverPort for DownloadsDir {
    async fn save(&self, filename: &str, contents: &[u8]) -> Result<PathBuf, DomainError> {
        fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| DomainError::Delivery(format!("create downloads dir: {}", e)))?;
        // Only the final component: a filename never escapes the directory.
        let name = Path::new(filename)
            .file_name()
            .ok_or_else(|| DomainError::Delivery(format!("invalid file name '{}'", filename)))?;
        let path = self.dir.join(name);
        fs::write(&path, contents)
            .await
            .map_err(|e| DomainError::Delivery(format!("write {}: {}", path.display(), e)))?;
        info!(path = %path.display(), bytes = contents.len(), "file saved");
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_save_creates_directory_and_writes() {
        let dir = tempfile::tempdir().unwrap();
        let saver = DownloadsDir::new(dir.path().join("downloads"));
        let path = saver
            .save("recherche_spa_Nice_2024-03-09.csv", b"Nom\n")
            .await
            .unwrap();
        assert_eq!(path, dir.path().join("downloads/recherche_spa_Nice_2024-03-09.csv"));
        assert_eq!(std::fs::read(&path).unwrap(), b"Nom\n");
    }

    #[tokio::test]
    async fn test_save_strips_directories_from_name() {
        let dir = tempfile::tempdir().unwrap();
        let saver = DownloadsDir::new(dir.path());
        let path = saver.save("../escape.csv", b"x").await.unwrap();
        assert_eq!(path, dir.path().join("escape.csv"));
    }
}
