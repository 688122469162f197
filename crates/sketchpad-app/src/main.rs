//! Sketchpad command line: replay a pointer script and export the drawing.

use clap::Parser;
use sketchpad_app::{AppConfig, AppResult, DrawingSession, Script};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(name = "sketchpad", version, about = "Replay a drawing script and export it as PNG")]
struct Cli {
    /// JSON configuration file (surface size, background, initial tool).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write a `data:image/png;base64,...` URL instead of PNG bytes.
    #[arg(long)]
    data_url: bool,

    /// JSON array of actions to replay.
    script: PathBuf,

    /// Where to write the exported image.
    output: PathBuf,
}

fn run(cli: &Cli) -> AppResult<()> {
    let config = match &cli.config {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::default(),
    };

    let script = Script::load(&cli.script)?;
    let mut session = DrawingSession::new(&config)?;
    let report = script.replay(&mut session)?;

    // A script may end mid-stroke; treat the end of input as pointer-up.
    session.pointer_up()?;

    if cli.data_url {
        std::fs::write(&cli.output, session.export_data_url()?)?;
    } else {
        std::fs::write(&cli.output, session.export_png()?)?;
    }

    log::info!(
        "Wrote {:?} ({} strokes, {} history no-ops)",
        cli.output,
        report.strokes,
        report.history_noops
    );
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    log::info!("Starting Sketchpad");

    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            eprintln!("sketchpad: {}", e);
            ExitCode::FAILURE
        }
    }
}
