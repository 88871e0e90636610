//! Encoder module wrapping the external media tooling.
//!
//! This module provides the `MediaEncoder` trait and the FFmpeg-based
//! implementation used to probe source files and re-encode them at a
//! computed bitrate.
//!
//! # Example
//!
//! ```ignore
//! use vidfit_core::encoder::{FfmpegEncoder, MediaEncoder, EncodeJob};
//!
//! let encoder = FfmpegEncoder::with_defaults();
//!
//! // Validate ffmpeg/ffprobe are available
//! encoder.validate().await?;
//!
//! // Probe a media file
//! let probe = encoder.probe(Path::new("/path/to/movie.mp4")).await?;
//! println!("Duration: {} seconds", probe.duration_secs);
//!
//! // Re-encode at a fixed video bitrate
//! let job = EncodeJob {
//!     input_path: PathBuf::from("/path/to/movie.mp4"),
//!     output_path: PathBuf::from("/path/to/movie_compressed.mp4"),
//!     video_bitrate_bps: 629_145,
//!     audio_codec: "aac".to_string(),
//!     audio_bitrate_bps: 128_000,
//! };
//! let result = encoder.encode(job).await?;
//! println!("Encoded in {} ms", result.elapsed_ms);
//! ```

mod config;
mod error;
mod ffmpeg;
mod traits;
mod types;

pub use config::EncoderConfig;
pub use error::EncoderError;
pub use ffmpeg::FfmpegEncoder;
pub use traits::MediaEncoder;
pub use types::{EncodeJob, EncodeResult, MediaProbe};
