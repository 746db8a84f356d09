//! Weight files for end-to-end tests.

use std::path::Path;
use std::sync::PoisonError;

use anyhow::Result;
use candle_core::{DType, Device, Tensor};
use candle_nn::{VarBuilder, VarMap};
use gaze_keys_core::inference::GazeNet;

/// Writes a gaze model whose output is always `(gx, gy)`.
///
/// Every weight is zero, so the last layer's bias passes straight through.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_constant_gaze_model(path: impl AsRef<Path>, gx: f32, gy: f32) -> Result<()> {
    let varmap = VarMap::new();
    GazeNet::new(VarBuilder::from_varmap(&varmap, DType::F32, &Device::Cpu))?;

    {
        let vars = varmap.data().lock().unwrap_or_else(PoisonError::into_inner);
        for (name, var) in vars.iter() {
            let value = if name == "fc2.bias" {
                Tensor::new(&[gx, gy], &Device::Cpu)?
            } else {
                var.zeros_like()?
            };
            var.set(&value)?;
        }
    }

    varmap.save(path)?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;
    use gaze_keys_core::ports::GazeEstimator;
    use gaze_keys_core::{GazeFrame, FRAME_SIZE};

    #[test]
    fn test_constant_model_round_trips_through_loader() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("gaze_net.safetensors");
        write_constant_gaze_model(&path, 0.25, -0.5).expect("write gaze model");

        let net = GazeNet::load(&path, &Device::Cpu).expect("load gaze model");
        let frame = GazeFrame::from_samples(vec![0.3; FRAME_SIZE * FRAME_SIZE])
            .expect("valid frame");
        let vector = net.estimate(&frame).expect("estimate gaze");

        assert!((vector.gx - 0.25).abs() < 1e-6);
        assert!((vector.gy + 0.5).abs() < 1e-6);
    }
}
