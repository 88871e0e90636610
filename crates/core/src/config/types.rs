use serde::{Deserialize, Serialize};

use crate::compressor::CompressorConfig;
use crate::encoder::EncoderConfig;

/// Root configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub encoder: EncoderConfig,
    #[serde(default)]
    pub compressor: CompressorConfig,
}
