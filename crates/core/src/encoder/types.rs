//! Types for the encoder module.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Result of probing a source media file.
///
/// Constructed fresh for every probe; never cached across calls.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaProbe {
    /// File path.
    pub path: PathBuf,
    /// Duration in seconds. Always positive and finite.
    pub duration_secs: f64,
    /// Source file size in bytes.
    pub size_bytes: u64,
}

/// An encode job request.
#[derive(Debug, Clone)]
pub struct EncodeJob {
    /// Input file path.
    pub input_path: PathBuf,
    /// Output file path. Existing files are overwritten.
    pub output_path: PathBuf,
    /// Target video bitrate in bits per second.
    pub video_bitrate_bps: u64,
    /// Audio codec name (ffmpeg codec identifier).
    pub audio_codec: String,
    /// Audio bitrate in bits per second.
    pub audio_bitrate_bps: u64,
}

/// Result of a successful encode.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncodeResult {
    /// Output file path.
    pub output_path: PathBuf,
    /// Output file size in bytes.
    pub output_size_bytes: u64,
    /// Wall-clock encode time in milliseconds.
    pub elapsed_ms: u64,
}
