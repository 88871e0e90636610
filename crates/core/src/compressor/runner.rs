//! Compression orchestrator implementation.
//!
//! One `compress` call runs start to finish on the calling task:
//! extension check, probe, bitrate budget, output path, encode. No step
//! is retried and no partial output is cleaned up on failure.

use std::sync::Arc;

use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info};

use super::config::CompressorConfig;
use super::error::CompressorError;
use super::plan::{build_plan, ALLOWED_EXTENSIONS};
use super::types::{CompressionReport, CompressionRequest, CompressionStatus};
use crate::encoder::{EncodeJob, EncoderError, MediaEncoder};

/// The compression orchestrator.
///
/// Holds no mutable state; concurrent `compress` calls are independent.
/// Concurrent calls targeting the same output path are a caller-level
/// hazard the compressor does not arbitrate.
pub struct Compressor {
    config: CompressorConfig,
    encoder: Arc<dyn MediaEncoder>,
}

impl Compressor {
    /// Creates a new compressor around the given encoder.
    pub fn new(config: CompressorConfig, encoder: Arc<dyn MediaEncoder>) -> Self {
        Self { config, encoder }
    }

    /// Compresses a video to approximately the requested size.
    ///
    /// Blocks the calling task for the full duration of probing and
    /// encoding. An existing file at the derived output path is
    /// overwritten.
    pub async fn compress(
        &self,
        request: &CompressionRequest,
    ) -> Result<CompressionReport, CompressorError> {
        // Extension is the sole type detection, checked before any
        // subprocess work.
        let extension = request.extension().unwrap_or_default();
        if !ALLOWED_EXTENSIONS.contains(&extension.as_str()) {
            return Err(CompressorError::UnsupportedFormat { extension });
        }

        if request.target_size_bytes == 0
            || request.target_size_bytes > self.config.max_target_size_bytes
        {
            return Err(CompressorError::TargetSizeOutOfRange {
                bytes: request.target_size_bytes,
                max: self.config.max_target_size_bytes,
            });
        }

        let probe = self.encoder.probe(&request.source_path).await?;
        debug!(
            "Probed {:?}: {:.3}s, {} bytes",
            probe.path, probe.duration_secs, probe.size_bytes
        );

        let plan = build_plan(request, &probe, &self.config)?;
        info!(
            "Compressing {:?} -> {:?} at {} bps video / {} bps {} audio",
            request.source_path,
            plan.output_path,
            plan.video_bitrate_bps,
            plan.audio_bitrate_bps,
            plan.audio_codec,
        );

        let result = self
            .encoder
            .encode(EncodeJob {
                input_path: request.source_path.clone(),
                output_path: plan.output_path,
                video_bitrate_bps: plan.video_bitrate_bps,
                audio_codec: plan.audio_codec.to_string(),
                audio_bitrate_bps: plan.audio_bitrate_bps,
            })
            .await?;

        info!(
            "Compression complete: {:?} ({} bytes in {} ms)",
            result.output_path, result.output_size_bytes, result.elapsed_ms
        );

        Ok(CompressionReport {
            output_path: result.output_path,
            output_size_bytes: result.output_size_bytes,
            video_bitrate_bps: plan.video_bitrate_bps,
            elapsed_ms: result.elapsed_ms,
        })
    }

    /// Compresses while reporting the three-state status surface on the
    /// given channel. A dropped receiver never fails the compression.
    pub async fn compress_with_status(
        &self,
        request: &CompressionRequest,
        status_tx: mpsc::Sender<CompressionStatus>,
    ) -> Result<CompressionReport, CompressorError> {
        let _ = status_tx.send(CompressionStatus::Compressing).await;
        let result = self.compress(request).await;
        let _ = status_tx.send(CompressionStatus::from_result(&result)).await;
        result
    }

    /// Compresses, racing against a cancel signal.
    ///
    /// On cancel the in-flight encoder subprocess is killed and the
    /// outcome is `EncoderError::Cancelled`. A dropped sender disables
    /// cancellation rather than triggering it.
    pub async fn compress_with_cancel(
        &self,
        request: &CompressionRequest,
        mut cancel: oneshot::Receiver<()>,
    ) -> Result<CompressionReport, CompressorError> {
        tokio::select! {
            result = self.compress(request) => result,
            Ok(()) = &mut cancel => {
                info!("Compression of {:?} cancelled", request.source_path);
                Err(EncoderError::Cancelled.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockEncoder;
    use std::path::PathBuf;

    fn compressor_with(encoder: Arc<MockEncoder>) -> Compressor {
        Compressor::new(CompressorConfig::default(), encoder)
    }

    #[tokio::test]
    async fn test_unsupported_extension_skips_probe_and_encode() {
        let encoder = Arc::new(MockEncoder::new());
        let compressor = compressor_with(encoder.clone());

        let request = CompressionRequest::new("/videos/document.pdf", 50 * 1024 * 1024);
        let err = compressor.compress(&request).await.unwrap_err();

        assert!(matches!(
            err,
            CompressorError::UnsupportedFormat { ref extension } if extension == "pdf"
        ));
        assert_eq!(encoder.probe_count().await, 0);
        assert_eq!(encoder.encode_count().await, 0);
    }

    #[tokio::test]
    async fn test_missing_extension_is_unsupported() {
        let encoder = Arc::new(MockEncoder::new());
        let compressor = compressor_with(encoder.clone());

        let request = CompressionRequest::new("/videos/clip", 1024 * 1024);
        let err = compressor.compress(&request).await.unwrap_err();
        assert!(matches!(err, CompressorError::UnsupportedFormat { .. }));
        assert_eq!(encoder.probe_count().await, 0);
    }

    #[tokio::test]
    async fn test_extension_check_is_case_insensitive() {
        let encoder = Arc::new(MockEncoder::new());
        encoder.set_default_duration(600.0).await;
        let compressor = compressor_with(encoder.clone());

        let request = CompressionRequest::new("/videos/CLIP.MP4", 50 * 1024 * 1024);
        compressor.compress(&request).await.unwrap();
        assert_eq!(encoder.encode_count().await, 1);
    }

    #[tokio::test]
    async fn test_zero_target_size_rejected_before_probe() {
        let encoder = Arc::new(MockEncoder::new());
        let compressor = compressor_with(encoder.clone());

        let request = CompressionRequest::new("/videos/movie.mp4", 0);
        let err = compressor.compress(&request).await.unwrap_err();
        assert!(matches!(
            err,
            CompressorError::TargetSizeOutOfRange { bytes: 0, .. }
        ));
        assert_eq!(encoder.probe_count().await, 0);
    }

    #[tokio::test]
    async fn test_target_size_above_ceiling_rejected() {
        let encoder = Arc::new(MockEncoder::new());
        let compressor = compressor_with(encoder.clone());

        let request = CompressionRequest::new("/videos/movie.mp4", 3000 * 1024 * 1024);
        let err = compressor.compress(&request).await.unwrap_err();
        assert!(matches!(err, CompressorError::TargetSizeOutOfRange { .. }));
    }

    #[tokio::test]
    async fn test_successful_compression_drives_planned_bitrate() {
        let encoder = Arc::new(MockEncoder::new());
        encoder.set_default_duration(600.0).await;
        let compressor = compressor_with(encoder.clone());

        let request = CompressionRequest::new("/videos/movie.mp4", 50 * 1024 * 1024);
        let report = compressor.compress(&request).await.unwrap();

        assert_eq!(report.video_bitrate_bps, 629_145);
        assert_eq!(
            report.output_path,
            PathBuf::from("/videos/movie_compressed.mp4")
        );

        let encodes = encoder.recorded_encodes().await;
        assert_eq!(encodes.len(), 1);
        assert_eq!(encodes[0].video_bitrate_bps, 629_145);
        assert_eq!(encodes[0].audio_codec, "aac");
        assert_eq!(encodes[0].audio_bitrate_bps, 128_000);
        assert_eq!(encodes[0].input_path, PathBuf::from("/videos/movie.mp4"));
    }

    #[tokio::test]
    async fn test_probe_error_propagates_and_skips_encode() {
        let encoder = Arc::new(MockEncoder::new());
        encoder
            .set_probe_error(EncoderError::ProbeUnavailable {
                reason: "ffprobe: No such file or directory".to_string(),
            })
            .await;
        let compressor = compressor_with(encoder.clone());

        let request = CompressionRequest::new("/videos/movie.mp4", 50 * 1024 * 1024);
        let err = compressor.compress(&request).await.unwrap_err();

        assert!(matches!(
            err,
            CompressorError::Encoder(EncoderError::ProbeUnavailable { .. })
        ));
        assert_eq!(encoder.encode_count().await, 0);
    }

    #[tokio::test]
    async fn test_zero_duration_is_invalid_duration_not_success() {
        let encoder = Arc::new(MockEncoder::new());
        encoder
            .set_probe_error(EncoderError::InvalidDuration { duration: 0.0 })
            .await;
        let compressor = compressor_with(encoder.clone());

        let request = CompressionRequest::new("/videos/movie.mp4", 50 * 1024 * 1024);
        let err = compressor.compress(&request).await.unwrap_err();

        assert!(matches!(
            err,
            CompressorError::Encoder(EncoderError::InvalidDuration { .. })
        ));
        assert_eq!(encoder.encode_count().await, 0);
    }

    #[tokio::test]
    async fn test_target_too_small_skips_encode() {
        let encoder = Arc::new(MockEncoder::new());
        encoder.set_default_duration(3600.0).await;
        let compressor = compressor_with(encoder.clone());

        let request = CompressionRequest::new("/videos/movie.mp4", 1);
        let err = compressor.compress(&request).await.unwrap_err();

        assert!(matches!(err, CompressorError::TargetTooSmall { .. }));
        assert_eq!(encoder.probe_count().await, 1);
        assert_eq!(encoder.encode_count().await, 0);
    }

    #[tokio::test]
    async fn test_encode_failure_message_passes_through() {
        let encoder = Arc::new(MockEncoder::new());
        encoder.set_default_duration(600.0).await;
        encoder
            .set_encode_error(EncoderError::encode_failed(
                "FFmpeg exited with code: Some(1)",
                Some("Invalid data found when processing input".to_string()),
            ))
            .await;
        let compressor = compressor_with(encoder.clone());

        let request = CompressionRequest::new("/videos/movie.mp4", 50 * 1024 * 1024);
        let err = compressor.compress(&request).await.unwrap_err();

        match err {
            CompressorError::Encoder(encoder_err) => {
                let diag = encoder_err.diagnostic();
                assert!(diag.contains("FFmpeg exited with code"));
                assert!(diag.contains("Invalid data found when processing input"));
            }
            other => panic!("expected encoder error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_repeated_compression_is_idempotent() {
        let encoder = Arc::new(MockEncoder::new());
        encoder.set_default_duration(600.0).await;
        let compressor = compressor_with(encoder.clone());

        let request = CompressionRequest::new("/videos/movie.mp4", 50 * 1024 * 1024);
        let first = compressor.compress(&request).await.unwrap();
        let second = compressor.compress(&request).await.unwrap();

        // Same derived output path both times; the second run overwrites.
        assert_eq!(first.output_path, second.output_path);
        assert_eq!(encoder.encode_count().await, 2);
    }

    #[tokio::test]
    async fn test_compress_with_status_emits_terminal_states() {
        let encoder = Arc::new(MockEncoder::new());
        encoder.set_default_duration(600.0).await;
        let compressor = compressor_with(encoder);

        let (tx, mut rx) = mpsc::channel(4);
        let request = CompressionRequest::new("/videos/movie.mp4", 50 * 1024 * 1024);
        compressor
            .compress_with_status(&request, tx)
            .await
            .unwrap();

        assert_eq!(rx.recv().await, Some(CompressionStatus::Compressing));
        match rx.recv().await {
            Some(CompressionStatus::Succeeded { output_path }) => {
                assert_eq!(output_path, PathBuf::from("/videos/movie_compressed.mp4"));
            }
            other => panic!("expected Succeeded, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_compress_with_status_reports_failure() {
        let encoder = Arc::new(MockEncoder::new());
        let compressor = compressor_with(encoder);

        let (tx, mut rx) = mpsc::channel(4);
        let request = CompressionRequest::new("/videos/notes.txt", 50 * 1024 * 1024);
        let result = compressor.compress_with_status(&request, tx).await;
        assert!(result.is_err());

        assert_eq!(rx.recv().await, Some(CompressionStatus::Compressing));
        assert!(matches!(
            rx.recv().await,
            Some(CompressionStatus::Failed { .. })
        ));
    }

    #[tokio::test]
    async fn test_cancel_aborts_compression() {
        let encoder = Arc::new(MockEncoder::new());
        encoder.set_default_duration(600.0).await;
        encoder
            .set_encode_delay(std::time::Duration::from_secs(30))
            .await;
        let compressor = compressor_with(encoder);

        let (cancel_tx, cancel_rx) = oneshot::channel();
        let request = CompressionRequest::new("/videos/movie.mp4", 50 * 1024 * 1024);

        let _ = cancel_tx.send(());
        let err = compressor
            .compress_with_cancel(&request, cancel_rx)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            CompressorError::Encoder(EncoderError::Cancelled)
        ));
    }

    #[tokio::test]
    async fn test_dropped_cancel_sender_does_not_cancel() {
        let encoder = Arc::new(MockEncoder::new());
        encoder.set_default_duration(600.0).await;
        let compressor = compressor_with(encoder);

        let (cancel_tx, cancel_rx) = oneshot::channel::<()>();
        drop(cancel_tx);

        let request = CompressionRequest::new("/videos/movie.mp4", 50 * 1024 * 1024);
        let report = compressor
            .compress_with_cancel(&request, cancel_rx)
            .await
            .unwrap();
        assert_eq!(report.video_bitrate_bps, 629_145);
    }
}
