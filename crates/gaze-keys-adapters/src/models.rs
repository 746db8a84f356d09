//! Model file location and integrity.

use anyhow::{Context, Result};
use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Model metadata.
#[derive(Debug, Clone)]
pub struct ModelInfo {
    /// Model name/identifier.
    pub name: &'static str,
    /// Filename in the models directory.
    pub filename: &'static str,
    /// What the model does.
    pub description: &'static str,
}

/// The gaze regression model served by `/capture-gaze`.
pub const GAZE_MODEL: ModelInfo = ModelInfo {
    name: "gaze_net",
    filename: "gaze_net.safetensors",
    description: "64x64 grayscale frame to 2-D gaze vector",
};

/// Known models.
pub const MODELS: &[ModelInfo] = &[GAZE_MODEL];

/// Installation status of a known model.
#[derive(Debug, Clone)]
pub struct ModelStatus {
    /// Model metadata.
    pub info: ModelInfo,
    /// Where the model is expected.
    pub path: PathBuf,
    /// SHA-256 of the file, `None` when it is not installed.
    pub sha256: Option<String>,
}

impl ModelStatus {
    /// Returns true if the model file exists.
    #[must_use]
    pub const fn installed(&self) -> bool {
        self.sha256.is_some()
    }
}

/// A directory holding model files.
#[derive(Debug, Clone)]
pub struct ModelStore {
    dir: PathBuf,
}

impl ModelStore {
    /// Creates a store rooted at `dir`.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Returns the default models directory.
    ///
    /// Uses `XDG_DATA_HOME/gaze-keys/models` or `~/.local/share/gaze-keys/models`.
    #[must_use]
    pub fn default_dir() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("gaze-keys")
            .join("models")
    }

    /// Returns the models directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Returns the path of the gaze model.
    #[must_use]
    pub fn gaze_model_path(&self) -> PathBuf {
        self.dir.join(GAZE_MODEL.filename)
    }

    /// Lists known models with their status.
    ///
    /// Files that exist but cannot be hashed are reported as not installed.
    #[must_use]
    pub fn list(&self) -> Vec<ModelStatus> {
        MODELS
            .iter()
            .map(|m| {
                let path = self.dir.join(m.filename);
                let sha256 = if path.is_file() {
                    file_sha256(&path)
                        .map_err(|e| debug!("Cannot hash {}: {e:#}", path.display()))
                        .ok()
                } else {
                    None
                };
                ModelStatus {
                    info: m.clone(),
                    path,
                    sha256,
                }
            })
            .collect()
    }
}

impl Default for ModelStore {
    fn default() -> Self {
        Self::new(Self::default_dir())
    }
}

/// Computes the hex SHA-256 digest of a file.
///
/// # Errors
///
/// Returns an error if the file cannot be read.
pub fn file_sha256(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;

    let mut hasher = Sha256::new();
    io::copy(&mut BufReader::new(file), &mut hasher)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    Ok(format!("{:x}", hasher.finalize()))
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_default_dir() {
        assert!(ModelStore::default_dir().ends_with("gaze-keys/models"));
    }

    #[test]
    fn test_gaze_model_path() {
        let store = ModelStore::new("/srv/models");
        assert_eq!(store.gaze_model_path(), PathBuf::from("/srv/models/gaze_net.safetensors"));
    }

    #[test]
    fn test_list_uses_store_dir() {
        let statuses = ModelStore::new("/srv/models").list();
        assert_eq!(statuses[0].info.name, "gaze_net");
        assert_eq!(statuses[0].path, PathBuf::from("/srv/models/gaze_net.safetensors"));
    }

    #[test]
    fn test_list_reports_missing_and_installed() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let store = ModelStore::new(dir.path());

        let before = store.list();
        assert_eq!(before.len(), MODELS.len());
        assert!(!before[0].installed());

        std::fs::write(store.gaze_model_path(), b"abc").expect("write fixture");
        let after = store.list();
        assert!(after[0].installed());
        assert_eq!(
            after[0].sha256.as_deref(),
            Some("ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad")
        );
    }

    #[test]
    fn test_sha256_missing_file() {
        assert!(file_sha256("/nonexistent/model.safetensors").is_err());
    }
}
