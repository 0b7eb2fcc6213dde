//! kiosk: telemetry graphs and demo rotation for a showcase display.
//!
//! Run with:  `RUST_LOG=info kiosk --config kiosk.toml`

use anyhow::Result;
use clap::Parser;
use kiosk_app::RunOptions;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(version, about = "Kiosk demo dashboard")]
struct Args {
    /// Path to the TOML config file.
    #[arg(long, env = "KIOSK_CONFIG")]
    config: Option<PathBuf>,

    /// Print every painted frame as a JSON line on stdout.
    #[arg(long)]
    frames: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // RUST_LOG controls verbosity (default: info).
    // Logs go to stderr so `--frames` output stays clean.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("kiosk v{} starting", env!("CARGO_PKG_VERSION"));

    kiosk_app::run(RunOptions {
        config_path: args.config.unwrap_or_else(kiosk_config::default_path),
        emit_frames: args.frames,
    })
    .map_err(Into::into)
}
