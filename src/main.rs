mod audio;
mod config;
mod error;
mod input;
mod playback;
mod scale;
mod state;
mod timer;
mod ui;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::audio::Synth;
use crate::config::Cli;
use crate::error::AppError;

fn main() -> Result<(), AppError> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&cli.log_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let selection = cli.selection();
    info!(
        "Starting with {} {} in octave {}",
        selection.key,
        selection.mode,
        selection.octave()
    );

    // The synth loads in the background; the window opens straight away.
    let runtime = tokio::runtime::Runtime::new()?;
    let synth = Synth::new(cli.volume);
    runtime.spawn(audio::run_sound_source(synth.clone()));

    let result = ui::run_ui(selection, synth);

    // The audio thread never returns, so don't wait for it.
    runtime.shutdown_background();
    result?;
    Ok(())
}
