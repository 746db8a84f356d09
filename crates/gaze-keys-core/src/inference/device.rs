//! Device selection for inference.

use candle_core::Device;
use tracing::info;

/// Returns the device the gaze model should run on.
///
/// Unless `force_cpu` is set, uses a GPU when the crate was built with the
/// `metal` or `cuda` feature and one is present, falling back to CPU.
#[must_use]
pub fn select_device(force_cpu: bool) -> Device {
    if force_cpu {
        info!("Using CPU for inference (forced)");
        return Device::Cpu;
    }

    #[cfg(feature = "metal")]
    {
        if let Ok(device) = Device::new_metal(0) {
            info!("Using Metal device for inference");
            return device;
        }
    }

    #[cfg(feature = "cuda")]
    {
        if let Ok(device) = Device::new_cuda(0) {
            info!("Using CUDA device for inference");
            return device;
        }
    }

    info!("Using CPU for inference");
    Device::Cpu
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forced_cpu() {
        assert!(matches!(select_device(true), Device::Cpu));
    }

    #[test]
    fn test_auto_returns_a_device() {
        let _device = select_device(false);
    }
}
