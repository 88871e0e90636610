//! Bitrate budget and output path derivation.

use std::path::{Path, PathBuf};

use super::config::CompressorConfig;
use super::error::CompressorError;
use super::types::{CompressionRequest, EncodePlan};
use crate::encoder::MediaProbe;

/// Input extensions accepted for compression (lowercase, no dot).
pub const ALLOWED_EXTENSIONS: [&str; 5] = ["mp4", "avi", "mov", "mkv", "wmv"];

/// Fraction of the byte budget given to the encoder. The remaining 10%
/// absorbs container overhead and the audio track, so the output lands
/// under the requested size rather than over it.
pub const SAFETY_MARGIN: f64 = 0.9;

/// Fixed audio bitrate in bits per second.
pub const AUDIO_BITRATE_BPS: u64 = 128_000;

/// Fixed audio codec.
pub const AUDIO_CODEC: &str = "aac";

/// Suffix inserted before the extension of the output file.
pub const OUTPUT_SUFFIX: &str = "_compressed";

/// Computes the video bitrate that fits `target_size_bytes` over
/// `duration_secs`, with the safety margin applied.
pub fn target_video_bitrate(target_size_bytes: u64, duration_secs: f64) -> u64 {
    ((target_size_bytes * 8) as f64 * SAFETY_MARGIN / duration_secs).floor() as u64
}

/// Derives the output path from the source path: stem + suffix + extension,
/// in the same directory. Never equal to the source path for allow-listed
/// extensions.
pub fn derive_output_path(source_path: &Path) -> PathBuf {
    let stem = source_path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or_default();

    let file_name = match source_path.extension().and_then(|e| e.to_str()) {
        Some(ext) => format!("{stem}{OUTPUT_SUFFIX}.{ext}"),
        None => format!("{stem}{OUTPUT_SUFFIX}"),
    };

    source_path.with_file_name(file_name)
}

/// Builds the encode plan for a probed request.
///
/// Rejects plans whose computed bitrate falls below the configured floor;
/// a zero or near-zero bitrate is meaningless to the encoder and would
/// otherwise fail deep inside it with a confusing error.
pub fn build_plan(
    request: &CompressionRequest,
    probe: &MediaProbe,
    config: &CompressorConfig,
) -> Result<EncodePlan, CompressorError> {
    let video_bitrate_bps = target_video_bitrate(request.target_size_bytes, probe.duration_secs);

    if video_bitrate_bps < config.min_video_bitrate_bps {
        return Err(CompressorError::TargetTooSmall {
            bitrate_bps: video_bitrate_bps,
            floor_bps: config.min_video_bitrate_bps,
        });
    }

    Ok(EncodePlan {
        video_bitrate_bps,
        audio_bitrate_bps: AUDIO_BITRATE_BPS,
        audio_codec: AUDIO_CODEC,
        output_path: derive_output_path(&request.source_path),
    })
}
