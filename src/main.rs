use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::{error, info, Level};
use tracing_subscriber::EnvFilter;

use caption_compositor::{config::Config, FrameComposer};

#[derive(Parser)]
#[command(
    name = "caption-compositor",
    version,
    about = "Put a caption above a looping GIF",
    long_about = "Caption-Compositor upscales a source GIF, reserves a caption band above it, \
                  fits the caption text to the band and writes the result as a new infinitely \
                  looping GIF."
)]
struct Cli {
    /// Caption text to render above the animation
    caption: String,

    /// Source GIF (overrides the configuration)
    #[arg(short, long)]
    source: Option<PathBuf>,

    /// Font file (overrides the configuration)
    #[arg(short, long)]
    font: Option<PathBuf>,

    /// Output GIF path
    #[arg(short, long, default_value = "captioned.gif")]
    output: PathBuf,

    /// Configuration file (optional)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging; RUST_LOG wins over --verbose
    let log_level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(log_level.into())
                .from_env_lossy(),
        )
        .init();

    info!("Starting Caption-Compositor v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let mut config = match cli.config {
        Some(config_path) => {
            info!("Loading configuration from {:?}", config_path);
            Config::from_file(&config_path)?
        }
        None => {
            info!("Using default configuration");
            Config::default()
        }
    };

    if let Some(source) = cli.source {
        config.source.path = source;
    }
    if let Some(font) = cli.font {
        config.font.path = font;
    }
    config.validate()?;

    info!("Source: {:?}", config.source.path);
    info!("Font: {:?}", config.font.path);
    info!("Output: {:?}", cli.output);

    let composer = FrameComposer::new(config);
    let encoded = match composer.compose_async(cli.caption).await {
        Ok(encoded) => encoded,
        Err(e) => {
            error!("{}", e);
            anyhow::bail!(e.user_message());
        }
    };

    tokio::fs::write(&cli.output, &encoded.bytes).await?;
    info!("Captioned GIF saved to: {:?}", cli.output);
    Ok(())
}
