mod app;
mod canvas;
mod config;
mod recorder;
mod ui;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use app::{App, RunOptions};
use config::Config;

#[derive(Parser)]
#[command(name = "sheen-tester", about = "Scripted headless run of sheen buttons")]
struct Cli {
    /// Button layout and script
    #[arg(short, long, default_value = "sheen.toml")]
    config: PathBuf,

    /// Directory for snapshots and recordings
    #[arg(short, long, default_value = "out")]
    out: PathBuf,

    /// Save every Nth frame as a PNG
    #[arg(long, value_name = "N")]
    snapshot_every: Option<u32>,

    /// Record whichever button is hovered at this frame
    #[arg(long, value_name = "FRAME")]
    record_at: Option<u32>,
}

fn main() -> ExitCode {
    // Initialize logging
    env_logger::init();

    let cli = Cli::parse();

    let config = match Config::load_or_default(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            log::error!("Failed to load {}: {}", cli.config.display(), e);
            return ExitCode::FAILURE;
        }
    };

    let options = RunOptions {
        snapshot_every: cli.snapshot_every,
        record_at: cli.record_at,
    };

    let summary = App::new(config, &cli.out, options).and_then(|mut app| app.run());
    match summary {
        Ok(summary) => {
            println!(
                "{} frames, {} clicks, {} snapshots, {} recordings in {}",
                summary.frames,
                summary.clicks.len(),
                summary.snapshots.len(),
                summary.recordings.len(),
                cli.out.display()
            );
            for (frame, name) in &summary.clicks {
                println!("  frame {:>4}: {}", frame, name);
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
