// src/core/store/json_store.rs

//! Reads and writes the store document.
//!
//! Writes go to a temporary sibling file which is then renamed over the target, so a
//! successful save never leaves a partially written document behind. The store itself
//! does no locking; callers run every load-mutate-save unit while holding the server's
//! exclusive core lock.

use super::StoreDocument;
use crate::core::FwGateError;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info};

#[derive(Debug, Clone)]
pub struct JsonStore {
    path: PathBuf,
}

impl JsonStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Creates the parent directory and an empty document if the file does not exist yet.
    pub async fn initialize(&self) -> Result<(), FwGateError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            tokio::fs::create_dir_all(parent).await?;
            info!("Created store directory: {}", parent.display());
        }

        if tokio::fs::try_exists(&self.path).await? {
            // Fail early on a corrupt file rather than on the first command.
            let document = self.load().await?;
            info!(
                "Loaded store from {} ({} users, {} rules).",
                self.path.display(),
                document.users.len(),
                document.rules.len()
            );
        } else {
            self.save(&StoreDocument::default()).await?;
            info!("Initialized empty store at {}", self.path.display());
        }
        Ok(())
    }

    /// Reads and deserializes the whole document.
    pub async fn load(&self) -> Result<StoreDocument, FwGateError> {
        let contents = tokio::fs::read(&self.path).await.map_err(|e| {
            FwGateError::CorruptStore(format!("cannot read '{}': {e}", self.path.display()))
        })?;
        serde_json::from_slice(&contents).map_err(|e| {
            error!("Store file '{}' is corrupt: {}", self.path.display(), e);
            FwGateError::CorruptStore(e.to_string())
        })
    }

    /// Serializes the whole document and replaces the file on disk.
    pub async fn save(&self, document: &StoreDocument) -> Result<(), FwGateError> {
        let contents = serde_json::to_vec_pretty(document)
            .map_err(|e| FwGateError::Internal(format!("failed to serialize store: {e}")))?;

        let temp_path = PathBuf::from(format!(
            "{}.tmp.{}",
            self.path.display(),
            rand::random::<u32>()
        ));

        if let Err(e) = tokio::fs::write(&temp_path, &contents).await {
            error!("Failed to write temporary store file: {}", e);
            let _ = tokio::fs::remove_file(&temp_path).await;
            return Err(e.into());
        }

        if let Err(e) = tokio::fs::rename(&temp_path, &self.path).await {
            error!(
                "Failed to rename temporary store file '{}' to '{}': {}",
                temp_path.display(),
                self.path.display(),
                e
            );
            if let Err(remove_err) = tokio::fs::remove_file(&temp_path).await {
                error!(
                    "Additionally failed to remove temporary store file '{}': {remove_err}",
                    temp_path.display()
                );
            }
            return Err(e.into());
        }

        debug!("Store saved to {}", self.path.display());
        Ok(())
    }

    /// Runs one load-mutate-save unit. The document is only written back if `mutate`
    /// succeeds, so a failed command leaves the file untouched.
    pub async fn update<T, F>(&self, mutate: F) -> Result<T, FwGateError>
    where
        F: FnOnce(&mut StoreDocument) -> Result<T, FwGateError>,
    {
        let mut document = self.load().await?;
        let result = mutate(&mut document)?;
        self.save(&document).await?;
        Ok(result)
    }
}
