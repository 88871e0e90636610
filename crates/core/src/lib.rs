pub mod compressor;
pub mod config;
pub mod encoder;
pub mod testing;

pub use compressor::{
    CompressionReport, CompressionRequest, CompressionStatus, Compressor, CompressorConfig,
    CompressorError, EncodePlan, ALLOWED_EXTENSIONS, AUDIO_BITRATE_BPS, AUDIO_CODEC,
    OUTPUT_SUFFIX, SAFETY_MARGIN,
};
pub use config::{load_config, load_config_from_str, validate_config, Config, ConfigError};
pub use encoder::{
    EncodeJob, EncodeResult, EncoderConfig, EncoderError, FfmpegEncoder, MediaEncoder, MediaProbe,
};
