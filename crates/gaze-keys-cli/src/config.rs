//! Configuration file support for gaze-keys.
//!
//! Supports TOML configuration from:
//! - XDG config: `~/.config/gaze-keys/config.toml` (lowest priority)
//! - Project-local: `.gaze-keys.toml` (searched up directory tree)
//! - CLI flags (highest priority, applied separately)

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, info, warn};

/// Name of the project-local config file.
const PROJECT_CONFIG: &str = ".gaze-keys.toml";

/// Top-level configuration structure.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// HTTP server settings.
    pub server: ServerConfig,
    /// Model settings.
    pub models: ModelsConfig,
}

/// HTTP server configuration.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind.
    pub host: Option<String>,
    /// Port to listen on.
    pub port: Option<u16>,
    /// Largest accepted request body in bytes.
    pub max_upload_bytes: Option<usize>,
}

/// Model configuration.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct ModelsConfig {
    /// Custom models directory path.
    pub dir: Option<PathBuf>,
    /// Explicit gaze model file, overriding the one in `dir`.
    pub gaze_model: Option<PathBuf>,
}

impl AppConfig {
    /// Load configuration from XDG and project-local files.
    ///
    /// Priority (lowest to highest):
    /// 1. XDG config: `~/.config/gaze-keys/config.toml`
    /// 2. Project-local: `.gaze-keys.toml` (searched up from cwd)
    ///
    /// Missing files are silently ignored. Invalid values are logged as
    /// warnings and dropped.
    pub fn load() -> Self {
        let mut config = Self::default();

        if let Some(xdg_path) = xdg_config_path() {
            if xdg_path.exists() {
                info!("Loading XDG config: {}", xdg_path.display());
                if let Some(xdg_config) = load_file(&xdg_path) {
                    config = xdg_config;
                }
            } else {
                debug!("XDG config not found: {}", xdg_path.display());
            }
        }

        if let Some(project_path) = find_project_config() {
            info!("Loading project config: {}", project_path.display());
            if let Some(project_config) = load_file(&project_path) {
                config.merge(project_config);
            }
        }

        for problem in config.validate() {
            warn!("Ignoring config value: {problem}");
        }

        config
    }

    /// Drops values outside their acceptable range.
    ///
    /// Returns one message per dropped value.
    fn validate(&mut self) -> Vec<String> {
        let mut problems = Vec::new();

        if self.server.host.as_deref().is_some_and(|h| h.trim().is_empty()) {
            problems.push("server.host must not be empty".to_string());
            self.server.host = None;
        }
        if self.server.port == Some(0) {
            problems.push("server.port must be 1-65535, got 0".to_string());
            self.server.port = None;
        }
        if self.server.max_upload_bytes == Some(0) {
            problems.push("server.max_upload_bytes must be positive, got 0".to_string());
            self.server.max_upload_bytes = None;
        }

        problems
    }

    /// Merge another config into this one.
    /// Values from `other` override values in `self` when present.
    fn merge(&mut self, other: Self) {
        // Server
        self.server.host = other.server.host.or_else(|| self.server.host.take());
        self.server.port = other.server.port.or(self.server.port);
        self.server.max_upload_bytes = other
            .server
            .max_upload_bytes
            .or(self.server.max_upload_bytes);

        // Models
        self.models.dir = other.models.dir.or_else(|| self.models.dir.take());
        self.models.gaze_model = other
            .models
            .gaze_model
            .or_else(|| self.models.gaze_model.take());
    }
}

/// Get the XDG config file path.
fn xdg_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("gaze-keys").join("config.toml"))
}

/// Find project-local config by searching up from current directory.
fn find_project_config() -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    find_config_in_parents(&cwd)
}

/// Search for `.gaze-keys.toml` in the given directory and its parents.
fn find_config_in_parents(start: &Path) -> Option<PathBuf> {
    let mut current = Some(start);

    while let Some(dir) = current {
        let config_path = dir.join(PROJECT_CONFIG);
        if config_path.exists() {
            return Some(config_path);
        }
        current = dir.parent();
    }

    None
}

/// Load and parse a TOML config file.
fn load_file(path: &Path) -> Option<AppConfig> {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            warn!("Failed to read config file {}: {}", path.display(), e);
            return None;
        }
    };

    match toml::from_str(&content) {
        Ok(config) => Some(config),
        Err(e) => {
            warn!("Failed to parse config file {}: {}", path.display(), e);
            None
        }
    }
}
