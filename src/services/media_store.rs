// src/services/media_store.rs
// DOCUMENTATION: Filesystem storage for uploaded image payloads
// PURPOSE: Paths stored in the database are relative to the media root

use crate::errors::GalleryError;
use crate::models::UploadedFile;
use std::path::{Component, Path, PathBuf};
use tokio::fs;
use uuid::Uuid;

const IMAGES_FOLDER: &str = "images";
const UNKNOWN_FILE_BASENAME: &str = "upload";

#[derive(Debug, Clone)]
pub struct MediaStore {
    root: PathBuf,
}

impl MediaStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Create the media folders if missing
    pub async fn init(&self) -> Result<(), GalleryError> {
        fs::create_dir_all(self.root.join(IMAGES_FOLDER))
            .await
            .map_err(|e| storage_error("create media root", e))?;
        log::info!("Media root: {}", self.root.display());
        Ok(())
    }

    /// Write the payload under a fresh unique name, returning its relative path
    pub async fn save(&self, file: &UploadedFile) -> Result<String, GalleryError> {
        let relative = format!(
            "{}/{}-{}",
            IMAGES_FOLDER,
            Uuid::new_v4().simple(),
            sanitize_file_name(&file.file_name)
        );
        let absolute = self.resolve(&relative)?;

        if let Some(parent) = absolute.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| storage_error("create media folder", e))?;
        }
        fs::write(&absolute, &file.bytes)
            .await
            .map_err(|e| storage_error("write image file", e))?;

        log::debug!("Stored {} bytes at {}", file.bytes.len(), relative);
        Ok(relative)
    }

    pub async fn read(&self, relative: &str) -> Result<Vec<u8>, GalleryError> {
        let absolute = self.resolve(relative)?;
        match fs::read(&absolute).await {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(GalleryError::NotFound(format!("file {}", relative)))
            }
            Err(e) => Err(storage_error("read image file", e)),
        }
    }

    /// Delete a stored payload; a missing file is not an error
    pub async fn remove(&self, relative: &str) -> Result<(), GalleryError> {
        let absolute = self.resolve(relative)?;
        match fs::remove_file(&absolute).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(storage_error("remove image file", e)),
        }
    }

    /// Remove several payloads, logging rather than failing on errors
    pub async fn remove_all(&self, relatives: &[String]) {
        for relative in relatives {
            if let Err(e) = self.remove(relative).await {
                log::warn!("Could not remove {}: {}", relative, e);
            }
        }
    }

    fn resolve(&self, relative: &str) -> Result<PathBuf, GalleryError> {
        let path = Path::new(relative);
        let escapes = path
            .components()
            .any(|c| !matches!(c, Component::Normal(_)));
        if escapes {
            return Err(GalleryError::InvalidInput(format!(
                "media path {}",
                relative
            )));
        }
        Ok(self.root.join(path))
    }
}

fn storage_error(operation: &str, e: std::io::Error) -> GalleryError {
    log::error!("Failed to {}: {}", operation, e);
    GalleryError::StorageError(e.to_string())
}

/// Keep only the final path segment with a safe character set
pub fn sanitize_file_name(file_name: &str) -> String {
    let base_name = Path::new(file_name)
        .file_name()
        .map(|value| value.to_string_lossy().to_string())
        .unwrap_or_else(|| UNKNOWN_FILE_BASENAME.to_string());
    let sanitized = base_name
        .chars()
        .map(|character| {
            if character.is_ascii_alphanumeric()
                || character == '.'
                || character == '-'
                || character == '_'
            {
                character
            } else {
                '_'
            }
        })
        .collect::<String>();
    if sanitized.is_empty() {
        UNKNOWN_FILE_BASENAME.to_string()
    } else {
        sanitized
    }
}
