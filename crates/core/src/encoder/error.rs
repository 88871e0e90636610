//! Error types for the encoder module.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while probing or encoding.
#[derive(Debug, Error)]
pub enum EncoderError {
    /// Input file not found.
    #[error("Input file not found: {path}")]
    InputNotFound { path: PathBuf },

    /// The probe tool could not be invoked at all.
    #[error("Probe tool unavailable: {reason}")]
    ProbeUnavailable { reason: String },

    /// Probe output was returned but the duration could not be extracted.
    #[error("Failed to parse probe output: {reason}")]
    ProbeParseError { reason: String },

    /// Parsed duration is zero, negative or non-finite.
    #[error("Invalid media duration: {duration}")]
    InvalidDuration { duration: f64 },

    /// FFmpeg binary not found or not executable.
    #[error("Encoder unavailable at path: {path}")]
    EncoderUnavailable { path: PathBuf },

    /// The encode process failed.
    #[error("Encoding failed: {reason}")]
    EncodeFailed {
        reason: String,
        stderr: Option<String>,
    },

    /// The encode process exceeded the configured wall-clock limit.
    #[error("Encoding timed out after {timeout_secs} seconds")]
    Timeout { timeout_secs: u64 },

    /// The encode was cancelled by the caller.
    #[error("Encoding cancelled")]
    Cancelled,

    /// I/O error while probing or encoding.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl EncoderError {
    /// Creates a new encode failed error with stderr output.
    pub fn encode_failed(reason: impl Into<String>, stderr: Option<String>) -> Self {
        Self::EncodeFailed {
            reason: reason.into(),
            stderr,
        }
    }

    /// Creates a new probe parse error.
    pub fn probe_parse(reason: impl Into<String>) -> Self {
        Self::ProbeParseError {
            reason: reason.into(),
        }
    }

    /// The diagnostic text to surface to the user, verbatim.
    pub fn diagnostic(&self) -> String {
        match self {
            Self::EncodeFailed {
                reason,
                stderr: Some(stderr),
            } if !stderr.is_empty() => format!("{reason}: {stderr}"),
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnostic_includes_stderr() {
        let err = EncoderError::encode_failed(
            "FFmpeg exited with code: Some(1)",
            Some("Unknown encoder 'libx999'".to_string()),
        );
        let diag = err.diagnostic();
        assert!(diag.contains("FFmpeg exited with code"));
        assert!(diag.contains("Unknown encoder 'libx999'"));
    }

    #[test]
    fn test_diagnostic_without_stderr() {
        let err = EncoderError::encode_failed("output file not created", None);
        assert_eq!(err.diagnostic(), "Encoding failed: output file not created");
    }
}
