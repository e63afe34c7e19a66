// SPDX-License-Identifier: GPL-3.0-only

use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod cli;

#[derive(Parser)]
#[command(name = "viewfinder")]
#[command(about = "Webcam session controller with screenshot and clip capture")]
#[command(version = viewfinder::constants::app_info::version())]
#[command(subcommand_required = false)]
struct Cli {
    /// Use the synthetic test-pattern camera instead of real hardware
    #[arg(long, global = true)]
    synthetic: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List available cameras
    List,

    /// Take a screenshot
    Photo {
        /// Camera index to use (from 'viewfinder list')
        #[arg(short, long, default_value = "0")]
        camera: usize,

        /// Output file path (default: ~/Pictures/Viewfinder/screenshot_TIMESTAMP.png)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Record a clip
    Record {
        /// Camera index to use (from 'viewfinder list')
        #[arg(short, long, default_value = "0")]
        camera: usize,

        /// Recording duration in seconds
        #[arg(short, long, default_value = "10")]
        duration: u64,

        /// Output file path (default: ~/Videos/Viewfinder/recording_TIMESTAMP.mjpeg)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    // Set RUST_LOG environment variable to control log level
    // Examples: RUST_LOG=debug, RUST_LOG=viewfinder=debug, RUST_LOG=info
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(true)
        .with_level(true)
        .init();

    let args = Cli::parse();

    match args.command {
        Some(Commands::List) => cli::list_devices(args.synthetic),
        Some(Commands::Photo { camera, output }) => cli::take_photo(args.synthetic, camera, output),
        Some(Commands::Record {
            camera,
            duration,
            output,
        }) => cli::record_clip(args.synthetic, camera, duration, output),
        None => cli::run_console(args.synthetic),
    }
}
