use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::signal;
use tokio::sync::oneshot;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use vidfit_core::{
    load_config, validate_config, CompressionRequest, Compressor, CompressorError, Config,
    EncoderError, FfmpegEncoder, MediaEncoder,
};

/// Compress a video file down to a target size.
#[derive(Parser, Debug)]
#[command(name = "vidfit", version, about)]
struct Args {
    /// Input video file (.mp4, .avi, .mov, .mkv, .wmv)
    input: PathBuf,

    /// Target output size in MB
    #[arg(long, default_value_t = 50)]
    size_mb: u64,

    /// Path to a TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("Fatal error: {:#}", e);
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => load_config(path)
            .with_context(|| format!("Failed to load config from {:?}", path))?,
        None => Config::default(),
    };
    validate_config(&config).context("Configuration validation failed")?;

    let encoder = Arc::new(FfmpegEncoder::new(config.encoder));
    encoder
        .validate()
        .await
        .context("Encoder tooling is not usable")?;

    let compressor = Compressor::new(config.compressor, encoder);
    let request = CompressionRequest::new(&args.input, args.size_mb * 1024 * 1024);

    // Ctrl-C kills the in-flight ffmpeg process and reports a cancelled outcome.
    let (cancel_tx, cancel_rx) = oneshot::channel();
    tokio::spawn(async move {
        if signal::ctrl_c().await.is_ok() {
            let _ = cancel_tx.send(());
        }
    });

    info!("Compressing {:?} to ~{} MB", args.input, args.size_mb);
    println!("Compressing {} ...", args.input.display());

    match compressor.compress_with_cancel(&request, cancel_rx).await {
        Ok(report) => {
            println!(
                "Compression complete!\nSaved to: {} ({:.1} MB, video bitrate {} bps)",
                report.output_path.display(),
                report.output_size_bytes as f64 / (1024.0 * 1024.0),
                report.video_bitrate_bps,
            );
            Ok(())
        }
        Err(e) => Err(describe_failure(e)),
    }
}

/// Maps core error kinds onto actionable CLI messages.
fn describe_failure(err: CompressorError) -> anyhow::Error {
    let hint = match &err {
        CompressorError::UnsupportedFormat { .. } => {
            "Please pick a video file (.mp4, .avi, .mov, .mkv, .wmv)".to_string()
        }
        CompressorError::TargetSizeOutOfRange { .. } | CompressorError::TargetTooSmall { .. } => {
            "Try a larger --size-mb value".to_string()
        }
        CompressorError::Encoder(EncoderError::Cancelled) => "Compression was cancelled".to_string(),
        CompressorError::Encoder(encoder_err) => encoder_err.diagnostic(),
    };
    anyhow::Error::from(err).context(hint)
}
