//! Configuration types for aiter-stream operations

use serde::{Deserialize, Serialize};

use crate::error::{StreamError, StreamResult};

/// Configuration for a broadcast (tee) group
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TeeConfig {
    /// Number of independent outputs to create
    pub outputs: usize,
    /// Capacity each per-output queue is allocated with
    pub initial_queue_capacity: usize,
    /// Queue length above which a lagging output is reported
    pub queue_high_watermark: Option<usize>,
}

impl Default for TeeConfig {
    fn default() -> Self {
        Self {
            outputs: 2,
            initial_queue_capacity: 16,
            queue_high_watermark: Some(10_000),
        }
    }
}

impl TeeConfig {
    /// Create a new tee configuration with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of outputs
    pub fn outputs(mut self, outputs: usize) -> Self {
        self.outputs = outputs;
        self
    }

    /// Set the initial capacity of every per-output queue
    pub fn initial_queue_capacity(mut self, capacity: usize) -> Self {
        self.initial_queue_capacity = capacity;
        self
    }

    /// Set the queue length that triggers a lagging-output warning
    pub fn queue_high_watermark(mut self, watermark: usize) -> Self {
        self.queue_high_watermark = Some(watermark);
        self
    }

    /// Never warn about lagging outputs
    pub fn without_high_watermark(mut self) -> Self {
        self.queue_high_watermark = None;
        self
    }

    /// Parse a configuration from JSON and validate it
    pub fn from_json_str(json: &str) -> StreamResult<Self> {
        let config: TeeConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> StreamResult<()> {
        if let Some(watermark) = self.queue_high_watermark {
            if watermark == 0 {
                return Err(StreamError::InvalidConfiguration(
                    "queue high watermark cannot be zero".to_string(),
                ));
            }
            if self.initial_queue_capacity > watermark {
                return Err(StreamError::InvalidConfiguration(format!(
                    "initial queue capacity {} exceeds high watermark {}",
                    self.initial_queue_capacity, watermark
                )));
            }
        }

        Ok(())
    }
}
