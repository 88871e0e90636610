//! Trait definitions for the encoder module.

use async_trait::async_trait;
use std::path::Path;

use super::error::EncoderError;
use super::types::{EncodeJob, EncodeResult, MediaProbe};

/// An external media tool that can inspect and re-encode video files.
///
/// The compressor only ever talks to this trait, so the real FFmpeg
/// binding can be swapped for a test fake.
#[async_trait]
pub trait MediaEncoder: Send + Sync {
    /// Returns the name of this encoder implementation.
    fn name(&self) -> &str;

    /// Probes a media file for its duration and size.
    ///
    /// Probe failures are never transient; callers must not retry.
    async fn probe(&self, path: &Path) -> Result<MediaProbe, EncoderError>;

    /// Re-encodes a media file at the bitrates given in the job.
    ///
    /// Blocks the calling task until the encoder finishes or fails.
    /// On failure a partial output file may remain at the job's output path.
    async fn encode(&self, job: EncodeJob) -> Result<EncodeResult, EncoderError>;

    /// Validates that the encoder tooling is installed and runnable.
    async fn validate(&self) -> Result<(), EncoderError>;
}
