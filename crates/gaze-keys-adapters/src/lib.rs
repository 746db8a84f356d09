//! Gaze Keys Adapters - External adapters for gaze-keys.
//!
//! This crate provides adapters for:
//! - The HTTP API surface
//! - Filesystem frame source
//! - Model file location and integrity

pub mod fs;
pub mod http;
pub mod models;

pub use fs::FsFrameSource;
pub use http::{router, serve, AppState};
pub use models::{ModelStore, GAZE_MODEL};
