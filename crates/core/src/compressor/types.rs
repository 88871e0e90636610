//! Types for the compressor module.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::error::CompressorError;

/// A one-shot compression request.
#[derive(Debug, Clone)]
pub struct CompressionRequest {
    /// Source video path. Must carry an allow-listed extension.
    pub source_path: PathBuf,
    /// Desired maximum output size in bytes.
    pub target_size_bytes: u64,
}

impl CompressionRequest {
    pub fn new(source_path: impl Into<PathBuf>, target_size_bytes: u64) -> Self {
        Self {
            source_path: source_path.into(),
            target_size_bytes,
        }
    }
}

/// The derived encode parameters for a request. Never caller-supplied.
#[derive(Debug, Clone, PartialEq)]
pub struct EncodePlan {
    /// Computed video bitrate in bits per second. Always above the floor.
    pub video_bitrate_bps: u64,
    /// Fixed audio bitrate in bits per second.
    pub audio_bitrate_bps: u64,
    /// Fixed audio codec.
    pub audio_codec: &'static str,
    /// Derived output path. Always differs from the source path.
    pub output_path: PathBuf,
}

/// Result of a successful compression.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompressionReport {
    /// Where the re-encoded file was written.
    pub output_path: PathBuf,
    /// Size of the re-encoded file in bytes.
    pub output_size_bytes: u64,
    /// Video bitrate the encoder was driven at, in bits per second.
    pub video_bitrate_bps: u64,
    /// Wall-clock time of the encode in milliseconds.
    pub elapsed_ms: u64,
}

/// Status surface for front-ends.
///
/// This is the entire UI contract: idle, in-progress with no percentage,
/// or a terminal state carrying either the output path or a message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum CompressionStatus {
    Idle,
    Compressing,
    Succeeded { output_path: PathBuf },
    Failed { message: String },
}

impl CompressionStatus {
    /// Maps a terminal compression result onto the status surface.
    pub fn from_result(result: &Result<CompressionReport, CompressorError>) -> Self {
        match result {
            Ok(report) => Self::Succeeded {
                output_path: report.output_path.clone(),
            },
            Err(e) => Self::Failed {
                message: e.to_string(),
            },
        }
    }

    /// Whether this status is terminal.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Succeeded { .. } | Self::Failed { .. })
    }
}

impl CompressionRequest {
    /// The lowercased extension of the source path, if any.
    pub(crate) fn extension(&self) -> Option<String> {
        extension_of(&self.source_path)
    }
}

pub(crate) fn extension_of(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder::EncoderError;

    #[test]
    fn test_status_from_success() {
        let result = Ok(CompressionReport {
            output_path: PathBuf::from("/v/movie_compressed.mp4"),
            output_size_bytes: 50_000_000,
            video_bitrate_bps: 629_145,
            elapsed_ms: 1200,
        });
        let status = CompressionStatus::from_result(&result);
        assert_eq!(
            status,
            CompressionStatus::Succeeded {
                output_path: PathBuf::from("/v/movie_compressed.mp4")
            }
        );
        assert!(status.is_terminal());
    }

    #[test]
    fn test_status_from_failure_keeps_message() {
        let result: Result<CompressionReport, CompressorError> = Err(EncoderError::encode_failed(
            "FFmpeg exited with code: Some(1)",
            None,
        )
        .into());
        let status = CompressionStatus::from_result(&result);
        match status {
            CompressionStatus::Failed { message } => {
                assert!(message.contains("FFmpeg exited with code"));
            }
            other => panic!("expected Failed, got {:?}", other),
        }
    }

    #[test]
    fn test_status_serialization() {
        let status = CompressionStatus::Compressing;
        let json = serde_json::to_string(&status).unwrap();
        assert!(json.contains("compressing"));
        assert!(!status.is_terminal());
    }

    #[test]
    fn test_extension_is_lowercased() {
        let request = CompressionRequest::new("/videos/CLIP.MkV", 1024);
        assert_eq!(request.extension(), Some("mkv".to_string()));
    }

    #[test]
    fn test_extension_missing() {
        let request = CompressionRequest::new("/videos/clip", 1024);
        assert_eq!(request.extension(), None);
    }
}
