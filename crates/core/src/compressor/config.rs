//! Configuration for the compressor module.

use serde::{Deserialize, Serialize};

/// Configuration for the compression orchestrator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompressorConfig {
    /// Ceiling on the caller-supplied target size in bytes.
    #[serde(default = "default_max_target_size")]
    pub max_target_size_bytes: u64,

    /// Floor on the computed video bitrate in bits per second.
    ///
    /// Requests whose size budget computes to less than this are rejected
    /// instead of being handed to the encoder.
    #[serde(default = "default_min_video_bitrate")]
    pub min_video_bitrate_bps: u64,
}

fn default_max_target_size() -> u64 {
    2000 * 1024 * 1024 // 2000 MiB, the upper bound of the original UI range
}

fn default_min_video_bitrate() -> u64 {
    1000
}

impl Default for CompressorConfig {
    fn default() -> Self {
        Self {
            max_target_size_bytes: default_max_target_size(),
            min_video_bitrate_bps: default_min_video_bitrate(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = CompressorConfig::default();
        assert_eq!(config.max_target_size_bytes, 2000 * 1024 * 1024);
        assert_eq!(config.min_video_bitrate_bps, 1000);
    }

    #[test]
    fn test_config_deserialization_defaults() {
        let config: CompressorConfig = toml::from_str("").unwrap();
        assert_eq!(config.max_target_size_bytes, 2000 * 1024 * 1024);
    }
}
