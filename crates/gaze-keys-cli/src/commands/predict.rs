//! Predict command - offline gaze prediction for image files.

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Args;
use gaze_keys_adapters::FsFrameSource;
use gaze_keys_core::{
    FrameSource, GazeError, GazePredictor, KeyboardLayout, PredictionRecord, ResultOutput,
};
use tracing::{debug, info, warn};

use super::{load_predictor, ExitCode};
use crate::output::JsonOutput;

/// Arguments for the predict command
#[derive(Args, Clone)]
pub struct PredictArgs {
    /// Image files or directories
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,

    /// Recurse into subdirectories
    #[arg(short, long)]
    pub recursive: bool,

    /// Add the key under each gaze point
    #[arg(short, long)]
    pub translate: bool,

    /// Gaze model weights (.safetensors)
    #[arg(long, value_name = "FILE")]
    pub model: Option<PathBuf>,

    /// Run inference on the CPU even when a GPU is available
    #[arg(long)]
    pub cpu: bool,
}

/// Counts from a predict run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PredictSummary {
    /// Frames written to the output.
    pub processed: usize,
    /// Frames that could not be read or decoded.
    pub skipped: usize,
}

impl PredictSummary {
    /// Exit code for this run.
    pub const fn exit_code(&self) -> ExitCode {
        if self.skipped == 0 {
            ExitCode::Success
        } else {
            ExitCode::FramesSkipped
        }
    }
}

/// Run the predict command.
pub fn run(args: &PredictArgs, model_path: &Path) -> Result<ExitCode> {
    info!("Running predict command on {} paths", args.paths.len());

    let predictor = load_predictor(model_path, args.cpu);
    if !predictor.is_available() {
        anyhow::bail!("{} ({})", GazeError::ModelUnavailable, model_path.display());
    }

    let source = FsFrameSource::new(args.paths.clone(), args.recursive);
    let output = JsonOutput::stdout();
    let layout = args.translate.then(KeyboardLayout::qwerty);

    let summary = process_frames(&source, &predictor, layout, &output)?;
    info!(
        "Processed {} frames, skipped {}",
        summary.processed, summary.skipped
    );

    Ok(summary.exit_code())
}

/// Runs every frame from `source` through the predictor and writes one record each.
///
/// Unreadable or undecodable frames are skipped. Points off the keyboard are
/// written without a key.
pub fn process_frames(
    source: &dyn FrameSource,
    predictor: &GazePredictor,
    layout: Option<&KeyboardLayout>,
    output: &dyn ResultOutput,
) -> Result<PredictSummary> {
    let mut summary = PredictSummary::default();
    debug!("Expecting {:?} frames", source.count_hint());

    for (index, frame) in source.frames().enumerate() {
        let frame = match frame {
            Ok(f) => f,
            Err(e) => {
                warn!("Skipping frame {index}: {e:#}");
                summary.skipped += 1;
                continue;
            }
        };

        let point = match predictor.capture(&frame.bytes) {
            Ok(p) => p,
            Err(e @ GazeError::ModelUnavailable) => return Err(e.into()),
            Err(e) => {
                warn!("Skipping {}: {e}", frame.source);
                summary.skipped += 1;
                continue;
            }
        };

        let key = layout.and_then(|l| match l.key_at(point) {
            Ok(key) => Some(key.to_string()),
            Err(e) => {
                warn!("{}: {e}", frame.source);
                None
            }
        });

        output.write(&PredictionRecord {
            source: frame.source,
            x: point.x,
            y: point.y,
            key,
        })?;
        summary.processed += 1;
    }

    output.flush()?;
    Ok(summary)
}
