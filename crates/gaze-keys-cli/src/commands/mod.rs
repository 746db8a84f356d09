//! CLI command definitions and handlers.

pub mod models;
pub mod predict;
pub mod serve;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{Parser, Subcommand};
use gaze_keys_adapters::ModelStore;
use gaze_keys_core::inference::{select_device, GazeNet};
use gaze_keys_core::GazePredictor;
use tracing::{error, info};

use crate::config::AppConfig;

/// Gaze Keys - type with your eyes
#[derive(Parser)]
#[command(name = "gaze-keys")]
#[command(author, version, about, long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    /// Server arguments used when no subcommand is given.
    #[command(flatten)]
    pub serve: serve::ServeArgs,

    /// Custom models directory (overrides default and config)
    #[arg(long, value_name = "DIR", global = true)]
    pub models_dir: Option<PathBuf>,

    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP API (default)
    Serve(serve::ServeArgs),
    /// Predict gaze points for image files
    Predict(predict::PredictArgs),
    /// Manage ML models
    Models(models::ModelsArgs),
}

/// Process exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Everything succeeded.
    Success = 0,
    /// Some frames could not be processed.
    FramesSkipped = 1,
    /// Fatal error.
    Error = 2,
}

impl From<ExitCode> for std::process::ExitCode {
    fn from(code: ExitCode) -> Self {
        Self::from(code as u8)
    }
}

/// Resolves the models directory: CLI > config > default.
pub fn model_store(cli_dir: Option<&Path>, config: &AppConfig) -> ModelStore {
    cli_dir
        .map(Path::to_path_buf)
        .or_else(|| config.models.dir.clone())
        .map_or_else(ModelStore::default, ModelStore::new)
}

/// Resolves the gaze model file: CLI > config > models directory.
pub fn gaze_model_path(cli_model: Option<&Path>, store: &ModelStore, config: &AppConfig) -> PathBuf {
    cli_model
        .map(Path::to_path_buf)
        .or_else(|| config.models.gaze_model.clone())
        .unwrap_or_else(|| store.gaze_model_path())
}

/// Loads the gaze model, falling back to an unavailable predictor.
///
/// A missing or broken model is not fatal here; callers decide whether
/// they can run without one.
pub fn load_predictor(path: &Path, force_cpu: bool) -> GazePredictor {
    let device = select_device(force_cpu);
    match GazeNet::load(path, &device) {
        Ok(net) => {
            info!("Loaded gaze model from {}", path.display());
            GazePredictor::new(Arc::new(net))
        }
        Err(e) => {
            error!("Failed to load gaze model from {}: {e:#}", path.display());
            GazePredictor::unavailable()
        }
    }
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;

    fn config(toml: &str) -> AppConfig {
        toml::from_str(toml).expect("parse config")
    }

    #[test]
    fn test_models_dir_precedence() {
        let cfg = config("[models]\ndir = '/from/config'\n");

        let store = model_store(Some(Path::new("/from/cli")), &cfg);
        assert_eq!(store.dir(), Path::new("/from/cli"));

        let store = model_store(None, &cfg);
        assert_eq!(store.dir(), Path::new("/from/config"));

        let store = model_store(None, &AppConfig::default());
        assert_eq!(store.dir(), ModelStore::default_dir());
    }

    #[test]
    fn test_gaze_model_precedence() {
        let store = ModelStore::new("/models");
        let cfg = config("[models]\ngaze_model = '/cfg/net.safetensors'\n");

        assert_eq!(
            gaze_model_path(Some(Path::new("/cli/net.safetensors")), &store, &cfg),
            PathBuf::from("/cli/net.safetensors")
        );
        assert_eq!(
            gaze_model_path(None, &store, &cfg),
            PathBuf::from("/cfg/net.safetensors")
        );
        assert_eq!(
            gaze_model_path(None, &store, &AppConfig::default()),
            PathBuf::from("/models/gaze_net.safetensors")
        );
    }

    #[test]
    fn test_missing_model_is_unavailable() {
        let predictor = load_predictor(Path::new("/nonexistent/gaze_net.safetensors"), true);
        assert!(!predictor.is_available());
    }

    #[test]
    fn test_top_level_serve_flags_conflict_with_subcommand() {
        assert!(Cli::try_parse_from(["gaze-keys", "--port", "9000", "predict", "x"]).is_err());

        let cli = Cli::try_parse_from(["gaze-keys", "--port", "9000"]).expect("parse args");
        assert_eq!(cli.serve.port, Some(9000));
        assert!(cli.command.is_none());

        let cli = Cli::try_parse_from(["gaze-keys", "predict", "x", "-v"]).expect("parse args");
        assert!(matches!(cli.command, Some(Commands::Predict(_))));
    }

    #[test]
    fn test_exit_code_values() {
        assert_eq!(ExitCode::Success as u8, 0);
        assert_eq!(ExitCode::FramesSkipped as u8, 1);
        assert_eq!(ExitCode::Error as u8, 2);
    }
}
