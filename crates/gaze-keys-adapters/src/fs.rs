//! Filesystem adapter for loading camera frames.

use anyhow::{Context, Result};
use gaze_keys_core::{CapturedFrame, FrameSource};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Extensions of image files the decoder understands.
const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "bmp", "gif", "webp", "tif", "tiff"];

/// Filesystem frame source adapter.
pub struct FsFrameSource {
    paths: Vec<PathBuf>,
    recursive: bool,
}

impl FsFrameSource {
    /// Creates a new filesystem frame source.
    ///
    /// # Arguments
    ///
    /// * `paths` - Files or directories to scan
    /// * `recursive` - Whether to recurse into subdirectories
    #[must_use]
    pub const fn new(paths: Vec<PathBuf>, recursive: bool) -> Self {
        Self { paths, recursive }
    }

    /// Collects all image files from the configured paths, sorted per directory.
    ///
    /// Files named explicitly are kept even without an image extension; the
    /// decoder decides whether they are usable.
    fn collect_files(&self) -> Vec<PathBuf> {
        let mut files = Vec::new();

        for path in &self.paths {
            if path.is_file() {
                files.push(path.clone());
            } else if path.is_dir() {
                self.collect_from_dir(path, &mut files);
            } else {
                warn!("Path does not exist: {}", path.display());
            }
        }

        files
    }

    fn collect_from_dir(&self, dir: &Path, files: &mut Vec<PathBuf>) {
        let mut entries: Vec<PathBuf> = match std::fs::read_dir(dir) {
            Ok(e) => e.flatten().map(|entry| entry.path()).collect(),
            Err(e) => {
                warn!("Failed to read directory {}: {e}", dir.display());
                return;
            }
        };
        entries.sort();

        for path in entries {
            if path.is_file() && is_image_file(&path) {
                files.push(path);
            } else if path.is_dir() && self.recursive {
                self.collect_from_dir(&path, files);
            }
        }
    }
}

impl FrameSource for FsFrameSource {
    fn frames(&self) -> Box<dyn Iterator<Item = Result<CapturedFrame>> + Send + '_> {
        let files = self.collect_files();
        debug!("Found {} frame files", files.len());

        Box::new(files.into_iter().map(|path| load_frame(&path)))
    }

    fn count_hint(&self) -> Option<usize> {
        Some(self.collect_files().len())
    }
}

/// Checks if a path has a known image extension.
fn is_image_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
        .is_some_and(|e| IMAGE_EXTENSIONS.contains(&e.as_str()))
}

/// Reads a frame's encoded bytes from disk.
fn load_frame(path: &Path) -> Result<CapturedFrame> {
    let bytes =
        std::fs::read(path).with_context(|| format!("Failed to read frame: {}", path.display()))?;
    Ok(CapturedFrame::new(path.to_string_lossy(), bytes))
}
