//! Error types for the compressor module.

use thiserror::Error;

use crate::encoder::EncoderError;

/// Errors that can occur while compressing.
#[derive(Debug, Error)]
pub enum CompressorError {
    /// Input extension is not in the allow-list.
    #[error("Unsupported input format: {extension:?}")]
    UnsupportedFormat { extension: String },

    /// Target size is zero or above the configured ceiling.
    #[error("Target size {bytes} bytes is out of range (max {max})")]
    TargetSizeOutOfRange { bytes: u64, max: u64 },

    /// Computed video bitrate falls below the configured floor.
    #[error(
        "Target size too small: computed video bitrate {bitrate_bps} bps is below the {floor_bps} bps floor"
    )]
    TargetTooSmall { bitrate_bps: u64, floor_bps: u64 },

    /// Probe or encode failure, surfaced verbatim.
    #[error(transparent)]
    Encoder(#[from] EncoderError),
}
