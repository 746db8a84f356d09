//! ML inference engine using Candle.
//!
//! Provides weight loading, device selection and the gaze regression network.

mod device;
mod gaze_net;
mod loader;

pub use device::select_device;
pub use gaze_net::GazeNet;
pub use loader::{inspect_safetensors, load_safetensors, TensorInfo};
