//! JSON output adapter.

use anyhow::Result;
use gaze_keys_core::{PredictionRecord, ResultOutput};
use std::io::{self, Write};
use std::sync::Mutex;

/// JSON Lines output adapter.
pub struct JsonOutput {
    writer: Mutex<Box<dyn Write + Send>>,
}

impl JsonOutput {
    /// Creates a new JSON output writing to stdout.
    #[must_use]
    pub fn stdout() -> Self {
        Self::new(Box::new(io::stdout()))
    }

    /// Creates a new JSON output writing to the given writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write + Send>) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }
}

impl ResultOutput for JsonOutput {
    #[allow(clippy::significant_drop_tightening)]
    fn write(&self, record: &PredictionRecord) -> Result<()> {
        let json = serde_json::to_string(record)?;
        let mut writer = self
            .writer
            .lock()
            .map_err(|e| anyhow::anyhow!("Lock poisoned: {e}"))?;
        writeln!(writer, "{json}")?;
        Ok(())
    }

    #[allow(clippy::significant_drop_tightening)]
    fn flush(&self) -> Result<()> {
        let mut writer = self
            .writer
            .lock()
            .map_err(|e| anyhow::anyhow!("Lock poisoned: {e}"))?;
        writer.flush()?;
        Ok(())
    }
}
