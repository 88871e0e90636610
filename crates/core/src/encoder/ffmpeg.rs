//! FFmpeg-based encoder implementation.

use async_trait::async_trait;
use serde::Deserialize;
use std::io::ErrorKind;
use std::path::Path;
use std::process::Stdio;
use std::time::Instant;
use tokio::process::Command;
use tokio::time::{timeout, Duration};
use tracing::debug;

use super::config::EncoderConfig;
use super::error::EncoderError;
use super::traits::MediaEncoder;
use super::types::{EncodeJob, EncodeResult, MediaProbe};

/// FFmpeg-based encoder implementation.
pub struct FfmpegEncoder {
    config: EncoderConfig,
}

impl FfmpegEncoder {
    /// Creates a new FFmpeg encoder with the given configuration.
    pub fn new(config: EncoderConfig) -> Self {
        Self { config }
    }

    /// Creates an encoder with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(EncoderConfig::default())
    }

    /// Builds ffmpeg arguments for an encode job.
    fn build_encode_args(&self, job: &EncodeJob) -> Vec<String> {
        let mut args = vec![
            "-y".to_string(), // Overwrite output
            "-i".to_string(),
            job.input_path.to_string_lossy().to_string(),
            "-b:v".to_string(),
            job.video_bitrate_bps.to_string(),
            "-c:a".to_string(),
            job.audio_codec.clone(),
            "-b:a".to_string(),
            format!("{}k", job.audio_bitrate_bps / 1000),
            "-loglevel".to_string(),
            self.config.ffmpeg_log_level.clone(),
        ];

        args.extend(self.config.extra_ffmpeg_args.iter().cloned());
        args.push(job.output_path.to_string_lossy().to_string());

        args
    }

    /// Parses ffprobe JSON output into a MediaProbe.
    fn parse_probe_output(path: &Path, output: &str) -> Result<MediaProbe, EncoderError> {
        #[derive(Deserialize)]
        struct ProbeOutput {
            format: ProbeFormat,
        }

        #[derive(Deserialize)]
        struct ProbeFormat {
            duration: Option<String>,
            size: Option<String>,
        }

        let probe: ProbeOutput = serde_json::from_str(output).map_err(|e| {
            EncoderError::probe_parse(format!("Failed to parse ffprobe output: {}", e))
        })?;

        let duration_field = probe
            .format
            .duration
            .ok_or_else(|| EncoderError::probe_parse("ffprobe reported no duration"))?;

        let duration_secs = duration_field.parse::<f64>().map_err(|_| {
            EncoderError::probe_parse(format!("duration is not a number: {:?}", duration_field))
        })?;

        if !duration_secs.is_finite() || duration_secs <= 0.0 {
            return Err(EncoderError::InvalidDuration {
                duration: duration_secs,
            });
        }

        let size_bytes = probe
            .format
            .size
            .as_ref()
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(0);

        Ok(MediaProbe {
            path: path.to_path_buf(),
            duration_secs,
            size_bytes,
        })
    }
}

#[async_trait]
impl MediaEncoder for FfmpegEncoder {
    fn name(&self) -> &str {
        "ffmpeg"
    }

    async fn probe(&self, path: &Path) -> Result<MediaProbe, EncoderError> {
        if !path.exists() {
            return Err(EncoderError::InputNotFound {
                path: path.to_path_buf(),
            });
        }

        debug!("Probing {:?} with {:?}", path, self.config.ffprobe_path);

        let output = Command::new(&self.config.ffprobe_path)
            .args(["-v", "error", "-print_format", "json", "-show_format"])
            .arg(path)
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound | ErrorKind::PermissionDenied => {
                    EncoderError::ProbeUnavailable {
                        reason: format!("{}: {}", self.config.ffprobe_path.display(), e),
                    }
                }
                _ => EncoderError::Io(e),
            })?;

        if !output.status.success() {
            return Err(EncoderError::probe_parse(format!(
                "ffprobe failed: {}",
                String::from_utf8_lossy(&output.stderr)
            )));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        Self::parse_probe_output(path, &stdout)
    }

    async fn encode(&self, job: EncodeJob) -> Result<EncodeResult, EncoderError> {
        let start = Instant::now();
        let args = self.build_encode_args(&job);

        debug!(
            "Encoding {:?} -> {:?} at {} bps",
            job.input_path, job.output_path, job.video_bitrate_bps
        );

        let mut command = Command::new(&self.config.ffmpeg_path);
        command
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            // Dropping the in-flight future (timeout, cancel) must kill ffmpeg.
            .kill_on_drop(true);

        let timeout_duration = Duration::from_secs(self.config.timeout_secs);
        let output = match timeout(timeout_duration, command.output()).await {
            Ok(Ok(output)) => output,
            Ok(Err(e)) if e.kind() == ErrorKind::NotFound => {
                return Err(EncoderError::EncoderUnavailable {
                    path: self.config.ffmpeg_path.clone(),
                });
            }
            Ok(Err(e)) => return Err(EncoderError::Io(e)),
            Err(_) => {
                return Err(EncoderError::Timeout {
                    timeout_secs: self.config.timeout_secs,
                });
            }
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(EncoderError::encode_failed(
                format!("FFmpeg exited with code: {:?}", output.status.code()),
                if stderr.is_empty() {
                    None
                } else {
                    Some(stderr)
                },
            ));
        }

        let output_meta = tokio::fs::metadata(&job.output_path)
            .await
            .map_err(|_| EncoderError::encode_failed("Output file not created", None))?;

        Ok(EncodeResult {
            output_path: job.output_path,
            output_size_bytes: output_meta.len(),
            elapsed_ms: start.elapsed().as_millis() as u64,
        })
    }

    async fn validate(&self) -> Result<(), EncoderError> {
        // Check ffmpeg exists
        let ffmpeg_result = Command::new(&self.config.ffmpeg_path)
            .arg("-version")
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await;

        if let Err(e) = ffmpeg_result {
            if e.kind() == ErrorKind::NotFound {
                return Err(EncoderError::EncoderUnavailable {
                    path: self.config.ffmpeg_path.clone(),
                });
            }
            return Err(EncoderError::Io(e));
        }

        // Check ffprobe exists
        let ffprobe_result = Command::new(&self.config.ffprobe_path)
            .arg("-version")
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await;

        if let Err(e) = ffprobe_result {
            if e.kind() == ErrorKind::NotFound {
                return Err(EncoderError::ProbeUnavailable {
                    reason: format!("{}: {}", self.config.ffprobe_path.display(), e),
                });
            }
            return Err(EncoderError::Io(e));
        }

        Ok(())
    }
}
