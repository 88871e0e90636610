//! Compressor module: the size-targeted transcoding orchestrator.
//!
//! Given a source video and a target output size, the compressor probes the
//! source for its duration, derives a video bitrate budget that lands the
//! output under the target, and drives the injected
//! [`MediaEncoder`](crate::encoder::MediaEncoder) to completion.
//!
//! # Example
//!
//! ```ignore
//! use vidfit_core::compressor::{Compressor, CompressionRequest, CompressorConfig};
//! use vidfit_core::encoder::FfmpegEncoder;
//!
//! let compressor = Compressor::new(
//!     CompressorConfig::default(),
//!     Arc::new(FfmpegEncoder::with_defaults()),
//! );
//!
//! let request = CompressionRequest::new("/videos/movie.mp4", 50 * 1024 * 1024);
//! let report = compressor.compress(&request).await?;
//! println!("Wrote {:?} ({} bytes)", report.output_path, report.output_size_bytes);
//! ```

mod config;
mod error;
mod plan;
mod runner;
mod types;

pub use config::CompressorConfig;
pub use error::CompressorError;
pub use plan::{
    derive_output_path, target_video_bitrate, ALLOWED_EXTENSIONS, AUDIO_BITRATE_BPS, AUDIO_CODEC,
    OUTPUT_SUFFIX, SAFETY_MARGIN,
};
pub use runner::Compressor;
pub use types::{CompressionReport, CompressionRequest, CompressionStatus, EncodePlan};
