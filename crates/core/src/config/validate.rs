use super::{types::Config, ConfigError};

/// Validate configuration
/// Currently validates:
/// - Encoder binary paths are not empty
/// - Compressor bitrate floor and size ceiling are not zero
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.encoder.ffmpeg_path.as_os_str().is_empty() {
        return Err(ConfigError::ValidationError(
            "encoder.ffmpeg_path cannot be empty".to_string(),
        ));
    }

    if config.encoder.ffprobe_path.as_os_str().is_empty() {
        return Err(ConfigError::ValidationError(
            "encoder.ffprobe_path cannot be empty".to_string(),
        ));
    }

    if config.encoder.timeout_secs == 0 {
        return Err(ConfigError::ValidationError(
            "encoder.timeout_secs cannot be 0".to_string(),
        ));
    }

    if config.compressor.min_video_bitrate_bps == 0 {
        return Err(ConfigError::ValidationError(
            "compressor.min_video_bitrate_bps cannot be 0".to_string(),
        ));
    }

    if config.compressor.max_target_size_bytes == 0 {
        return Err(ConfigError::ValidationError(
            "compressor.max_target_size_bytes cannot be 0".to_string(),
        ));
    }

    Ok(())
}
