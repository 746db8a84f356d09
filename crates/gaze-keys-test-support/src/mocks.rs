//! Mock implementations of core port traits.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use gaze_keys_core::ports::{FrameSource, GazeEstimator, ResultOutput};
use gaze_keys_core::{CapturedFrame, GazeFrame, GazeVector, PredictionRecord};

/// Mock implementation of `GazeEstimator` for testing.
///
/// Always returns the same vector and counts how often it was asked.
pub struct MockGazeEstimator {
    vector: GazeVector,
    calls: Arc<AtomicUsize>,
}

impl MockGazeEstimator {
    /// Creates an estimator that always returns `(gx, gy)`.
    #[must_use]
    pub fn new(gx: f32, gy: f32) -> Self {
        Self {
            vector: GazeVector::new(gx, gy),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Creates an estimator looking at the screen center.
    #[must_use]
    pub fn centered() -> Self {
        Self::new(0.0, 0.0)
    }

    /// Returns a handle to the call counter that outlives the estimator.
    #[must_use]
    pub fn call_counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.calls)
    }

    /// Returns the number of frames estimated so far.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl GazeEstimator for MockGazeEstimator {
    fn name(&self) -> &'static str {
        "mock"
    }

    fn estimate(&self, _frame: &GazeFrame) -> anyhow::Result<GazeVector> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.vector)
    }
}

/// A `GazeEstimator` whose runtime rejects every frame.
pub struct FailingGazeEstimator;

impl GazeEstimator for FailingGazeEstimator {
    fn name(&self) -> &'static str {
        "failing"
    }

    fn estimate(&self, _frame: &GazeFrame) -> anyhow::Result<GazeVector> {
        anyhow::bail!("runtime rejected input tensor")
    }
}

/// Mock implementation of `FrameSource` for testing.
///
/// Yields pre-built frames, or errors standing in for unreadable files.
pub struct MockFrameSource {
    frames: Vec<Result<CapturedFrame, String>>,
}

impl MockFrameSource {
    /// Creates a new mock source with the given frames.
    #[must_use]
    pub fn new(frames: Vec<CapturedFrame>) -> Self {
        Self {
            frames: frames.into_iter().map(Ok).collect(),
        }
    }

    /// Creates an empty mock source.
    #[must_use]
    pub fn empty() -> Self {
        Self::new(vec![])
    }

    /// Appends a read failure.
    #[must_use]
    pub fn with_read_error(mut self, message: impl Into<String>) -> Self {
        self.frames.push(Err(message.into()));
        self
    }
}

impl FrameSource for MockFrameSource {
    fn frames(&self) -> Box<dyn Iterator<Item = anyhow::Result<CapturedFrame>> + Send + '_> {
        Box::new(self.frames.iter().map(|f| match f {
            Ok(frame) => Ok(frame.clone()),
            Err(msg) => Err(anyhow::anyhow!("{msg}")),
        }))
    }

    fn count_hint(&self) -> Option<usize> {
        Some(self.frames.len())
    }
}

/// Mock implementation of `ResultOutput` for testing.
///
/// Captures records for later assertions.
pub struct MockResultOutput {
    records: Arc<Mutex<Vec<PredictionRecord>>>,
    flush_count: Arc<Mutex<usize>>,
}

impl MockResultOutput {
    /// Creates a new mock output.
    #[must_use]
    pub fn new() -> Self {
        Self {
            records: Arc::new(Mutex::new(Vec::new())),
            flush_count: Arc::new(Mutex::new(0)),
        }
    }

    /// Returns all captured records.
    #[must_use]
    pub fn records(&self) -> Vec<PredictionRecord> {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns the number of times `flush()` was called.
    #[must_use]
    pub fn flush_count(&self) -> usize {
        *self
            .flush_count
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for MockResultOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl ResultOutput for MockResultOutput {
    fn write(&self, record: &PredictionRecord) -> anyhow::Result<()> {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(record.clone());
        Ok(())
    }

    fn flush(&self) -> anyhow::Result<()> {
        *self
            .flush_count
            .lock()
            .unwrap_or_else(PoisonError::into_inner) += 1;
        Ok(())
    }
}
