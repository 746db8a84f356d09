//! Serve command - run the HTTP API.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use gaze_keys_adapters::http::DEFAULT_MAX_UPLOAD_BYTES;
use gaze_keys_adapters::{router, AppState, ModelStore};
use tokio::net::TcpListener;
use tracing::{error, info, warn};

use super::{gaze_model_path, load_predictor};
use crate::config::AppConfig;

/// Hardcoded default values.
mod defaults {
    pub const HOST: &str = "0.0.0.0";
    pub const PORT: u16 = 8000;
}

/// Arguments for the HTTP server.
#[derive(Args, Clone, Default)]
pub struct ServeArgs {
    /// Address to bind
    #[arg(long)]
    pub host: Option<String>,

    /// Port to listen on
    #[arg(long)]
    pub port: Option<u16>,

    /// Gaze model weights (.safetensors)
    #[arg(long, value_name = "FILE")]
    pub model: Option<PathBuf>,

    /// Largest accepted request body in bytes
    #[arg(long, value_name = "BYTES")]
    pub max_upload_bytes: Option<usize>,

    /// Run inference on the CPU even when a GPU is available
    #[arg(long)]
    pub cpu: bool,
}

/// Fully resolved server settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub model_path: PathBuf,
    pub max_upload_bytes: usize,
    pub force_cpu: bool,
}

impl ServerSettings {
    /// Applies layering: CLI > config > hardcoded defaults.
    pub fn resolve(args: &ServeArgs, store: &ModelStore, config: &AppConfig) -> Self {
        Self {
            host: args
                .host
                .clone()
                .filter(|h| !h.trim().is_empty())
                .or_else(|| config.server.host.clone())
                .unwrap_or_else(|| defaults::HOST.to_string()),
            port: args
                .port
                .filter(|&p| p != 0)
                .or(config.server.port)
                .unwrap_or(defaults::PORT),
            model_path: gaze_model_path(args.model.as_deref(), store, config),
            max_upload_bytes: args
                .max_upload_bytes
                .filter(|&b| b > 0)
                .or(config.server.max_upload_bytes)
                .unwrap_or(DEFAULT_MAX_UPLOAD_BYTES),
            force_cpu: args.cpu,
        }
    }

    fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Run the serve command until Ctrl-C.
pub fn run(settings: &ServerSettings) -> Result<()> {
    let predictor = load_predictor(&settings.model_path, settings.force_cpu);
    if !predictor.is_available() {
        warn!("Serving without a gaze model; /capture-gaze will fail until it is installed");
    }

    let state = AppState::new(predictor).with_max_upload_bytes(settings.max_upload_bytes);
    let address = settings.address();

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;

    runtime.block_on(async move {
        let listener = TcpListener::bind(&address)
            .await
            .with_context(|| format!("Failed to bind {address}"))?;
        gaze_keys_adapters::serve(listener, router(state), shutdown_signal()).await
    })
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for Ctrl-C: {e}");
        std::future::pending::<()>().await;
    }
    info!("Shutting down");
}
