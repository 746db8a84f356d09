//! Gaze regression network.
//!
//! A small CNN that regresses a 2-D gaze vector from a 64x64 grayscale frame.
//! The weights are opaque to the rest of the crate; only the input/output
//! contract matters.

use std::path::Path;

use anyhow::{Context, Result};
use candle_core::{Device, Module, Tensor};
use candle_nn::{conv2d, linear, Conv2d, Conv2dConfig, Linear, VarBuilder};
use tracing::debug;

use super::load_safetensors;
use crate::domain::{GazeFrame, GazeVector, FRAME_SIZE};
use crate::ports::GazeEstimator;

/// Channels after the last conv stage.
const FEATURE_CHANNELS: usize = 64;
/// Spatial size after three 2x2 max pools: 64 -> 32 -> 16 -> 8.
const FEATURE_SIZE: usize = FRAME_SIZE / 8;
/// Hidden units in the regression head.
const HIDDEN_UNITS: usize = 128;

/// Gaze regression model.
///
/// Architecture: 3 conv layers with max pooling, followed by 2 FC layers.
/// Input: 64x64 grayscale frame in `[0, 1]`
/// Output: raw `(gx, gy)`, nominally in `[-1, 1]`
pub struct GazeNet {
    conv1: Conv2d,
    conv2: Conv2d,
    conv3: Conv2d,
    fc1: Linear,
    fc2: Linear,
    device: Device,
}

impl GazeNet {
    /// Creates a gaze network from weights.
    ///
    /// # Errors
    ///
    /// Returns an error if model weights are missing or have the wrong shape.
    #[allow(clippy::needless_pass_by_value)]
    pub fn new(vb: VarBuilder) -> Result<Self> {
        let device = vb.device().clone();
        let same = Conv2dConfig {
            padding: 1,
            ..Conv2dConfig::default()
        };

        let conv1 = conv2d(1, 16, 3, same, vb.pp("conv1"))?;
        let conv2 = conv2d(16, 32, 3, same, vb.pp("conv2"))?;
        let conv3 = conv2d(32, FEATURE_CHANNELS, 3, same, vb.pp("conv3"))?;

        let flat = FEATURE_CHANNELS * FEATURE_SIZE * FEATURE_SIZE;
        let fc1 = linear(flat, HIDDEN_UNITS, vb.pp("fc1"))?;
        let fc2 = linear(HIDDEN_UNITS, 2, vb.pp("fc2"))?;

        Ok(Self {
            conv1,
            conv2,
            conv3,
            fc1,
            fc2,
            device,
        })
    }

    /// Loads a gaze network from a safetensors file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or does not hold a
    /// compatible set of weights.
    pub fn load(path: impl AsRef<Path>, device: &Device) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading gaze model from {}", path.display());
        let vb = load_safetensors(path, device).context("Failed to load gaze model weights")?;
        Self::new(vb).context("Failed to create gaze model")
    }

    /// Converts a frame into a `(1, 1, 64, 64)` tensor on the model's device.
    fn to_tensor(&self, frame: &GazeFrame) -> Result<Tensor> {
        Tensor::from_slice(frame.samples(), (1, 1, FRAME_SIZE, FRAME_SIZE), &self.device)
            .context("Failed to create frame tensor")
    }
}

impl Module for GazeNet {
    fn forward(&self, x: &Tensor) -> candle_core::Result<Tensor> {
        let x = self.conv1.forward(x)?.relu()?.max_pool2d(2)?;
        let x = self.conv2.forward(&x)?.relu()?.max_pool2d(2)?;
        let x = self.conv3.forward(&x)?.relu()?.max_pool2d(2)?;

        let x = x.flatten_from(1)?;
        let x = self.fc1.forward(&x)?.relu()?;

        // Raw regression output, no activation
        self.fc2.forward(&x)
    }
}

impl GazeEstimator for GazeNet {
    fn name(&self) -> &'static str {
        "gaze_net"
    }

    fn estimate(&self, frame: &GazeFrame) -> Result<GazeVector> {
        let input = self.to_tensor(frame)?;
        let output = self.forward(&input)?.squeeze(0)?.to_vec1::<f32>()?;

        match output.as_slice() {
            [gx, gy] => Ok(GazeVector::new(*gx, *gy)),
            other => anyhow::bail!("Expected 2 gaze outputs, got {}", other.len()),
        }
    }
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;
    use candle_core::DType;

    #[test]
    fn test_feature_dimensions() {
        // 64x64 -> 32x32 -> 16x16 -> 8x8
        assert_eq!(FRAME_SIZE / 2 / 2 / 2, FEATURE_SIZE);
        assert_eq!(FEATURE_CHANNELS * FEATURE_SIZE * FEATURE_SIZE, 4096);
    }

    #[test]
    fn test_zero_weights_predict_origin() {
        let vb = VarBuilder::zeros(DType::F32, &Device::Cpu);
        let net = GazeNet::new(vb).expect("build gaze model");
        let frame = GazeFrame::from_samples(vec![0.5; FRAME_SIZE * FRAME_SIZE])
            .expect("valid frame");

        let vector = net.estimate(&frame).expect("estimate gaze");
        assert!(vector.gx.abs() < 1e-6);
        assert!(vector.gy.abs() < 1e-6);
    }

    #[test]
    fn test_load_missing_file_fails() {
        assert!(GazeNet::load("/nonexistent/gaze_net.safetensors", &Device::Cpu).is_err());
    }
}
