//! Mock encoder for testing.

use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

use crate::encoder::{EncodeJob, EncodeResult, EncoderError, MediaEncoder, MediaProbe};

/// Mock implementation of the `MediaEncoder` trait.
///
/// Provides controllable behavior for testing:
/// - Records every probe and encode call for assertions
/// - Per-path probe results, plus a default duration fallback
/// - Injectable one-shot probe and encode errors
/// - Optional simulated encode delay for cancellation tests
#[derive(Debug)]
pub struct MockEncoder {
    /// Recorded probe paths.
    probes: Arc<RwLock<Vec<PathBuf>>>,
    /// Recorded encode jobs.
    encodes: Arc<RwLock<Vec<EncodeJob>>>,
    /// Pre-configured probe results by path.
    probe_results: Arc<RwLock<HashMap<PathBuf, MediaProbe>>>,
    /// Duration reported for paths without a configured result.
    default_duration_secs: Arc<RwLock<f64>>,
    /// If set, the next probe fails with this error.
    next_probe_error: Arc<RwLock<Option<EncoderError>>>,
    /// If set, the next encode fails with this error.
    next_encode_error: Arc<RwLock<Option<EncoderError>>>,
    /// Simulated encode duration.
    encode_delay: Arc<RwLock<Duration>>,
}

impl Default for MockEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl MockEncoder {
    /// Create a new mock encoder.
    pub fn new() -> Self {
        Self {
            probes: Arc::new(RwLock::new(Vec::new())),
            encodes: Arc::new(RwLock::new(Vec::new())),
            probe_results: Arc::new(RwLock::new(HashMap::new())),
            default_duration_secs: Arc::new(RwLock::new(600.0)),
            next_probe_error: Arc::new(RwLock::new(None)),
            next_encode_error: Arc::new(RwLock::new(None)),
            encode_delay: Arc::new(RwLock::new(Duration::ZERO)),
        }
    }

    /// Number of probe calls recorded.
    pub async fn probe_count(&self) -> usize {
        self.probes.read().await.len()
    }

    /// Number of encode calls recorded.
    pub async fn encode_count(&self) -> usize {
        self.encodes.read().await.len()
    }

    /// All recorded probe paths.
    pub async fn recorded_probes(&self) -> Vec<PathBuf> {
        self.probes.read().await.clone()
    }

    /// All recorded encode jobs.
    pub async fn recorded_encodes(&self) -> Vec<EncodeJob> {
        self.encodes.read().await.clone()
    }

    /// Set a probe result for a specific path.
    pub async fn set_probe_result(&self, path: impl AsRef<Path>, probe: MediaProbe) {
        self.probe_results
            .write()
            .await
            .insert(path.as_ref().to_path_buf(), probe);
    }

    /// Set the duration reported for paths without a configured result.
    pub async fn set_default_duration(&self, duration_secs: f64) {
        *self.default_duration_secs.write().await = duration_secs;
    }

    /// Configure the next probe to fail with the given error.
    pub async fn set_probe_error(&self, error: EncoderError) {
        *self.next_probe_error.write().await = Some(error);
    }

    /// Configure the next encode to fail with the given error.
    pub async fn set_encode_error(&self, error: EncoderError) {
        *self.next_encode_error.write().await = Some(error);
    }

    /// Set the simulated encode duration.
    pub async fn set_encode_delay(&self, delay: Duration) {
        *self.encode_delay.write().await = delay;
    }
}

#[async_trait]
impl MediaEncoder for MockEncoder {
    fn name(&self) -> &str {
        "mock"
    }

    async fn probe(&self, path: &Path) -> Result<MediaProbe, EncoderError> {
        self.probes.write().await.push(path.to_path_buf());

        if let Some(err) = self.next_probe_error.write().await.take() {
            return Err(err);
        }

        if let Some(probe) = self.probe_results.read().await.get(path) {
            return Ok(probe.clone());
        }

        Ok(MediaProbe {
            path: path.to_path_buf(),
            duration_secs: *self.default_duration_secs.read().await,
            size_bytes: 100 * 1024 * 1024,
        })
    }

    async fn encode(&self, job: EncodeJob) -> Result<EncodeResult, EncoderError> {
        self.encodes.write().await.push(job.clone());

        if let Some(err) = self.next_encode_error.write().await.take() {
            return Err(err);
        }

        let delay = *self.encode_delay.read().await;
        if delay > Duration::ZERO {
            tokio::time::sleep(delay).await;
        }

        Ok(EncodeResult {
            output_path: job.output_path,
            output_size_bytes: 50 * 1024 * 1024,
            elapsed_ms: delay.as_millis() as u64,
        })
    }

    async fn validate(&self) -> Result<(), EncoderError> {
        Ok(())
    }
}
