use clap::{Parser, ValueEnum};

use crate::scale::{PitchClass, ScaleMode};
use crate::state::{AppSelection, MAX_OCTAVE, MIN_OCTAVE};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    Major,
    Minor,
}

impl From<ModeArg> for ScaleMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Major => ScaleMode::Major,
            ModeArg::Minor => ScaleMode::Minor,
        }
    }
}

/// Practice a major or minor scale on eight pads.
#[derive(Debug, Parser)]
#[command(name = "scale_pads", version, about)]
pub struct Cli {
    /// Root of the scale: C, C#, D, D#, E, F, F#, G, G#, A, Bb or B.
    #[arg(short, long, default_value = "C", value_parser = parse_key)]
    pub key: PitchClass,

    /// Starting octave.
    #[arg(short, long, default_value_t = 4, value_parser = clap::value_parser!(i32).range(MIN_OCTAVE as i64..=MAX_OCTAVE as i64))]
    pub octave: i32,

    #[arg(short, long, value_enum, default_value_t = ModeArg::Major)]
    pub mode: ModeArg,

    /// Output volume between 0.0 and 1.0.
    #[arg(long, default_value_t = 0.5, value_parser = parse_volume)]
    pub volume: f32,

    /// Log filter used when RUST_LOG is not set.
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

impl Cli {
    pub fn selection(&self) -> AppSelection {
        AppSelection::new(self.key, self.octave, self.mode.into())
    }
}

fn parse_key(s: &str) -> Result<PitchClass, String> {
    s.parse().map_err(|e: crate::error::ScaleError| e.to_string())
}

fn parse_volume(s: &str) -> Result<f32, String> {
    let volume: f32 = s.parse().map_err(|_| format!("`{s}` is not a number"))?;
    if (0.0..=1.0).contains(&volume) {
        Ok(volume)
    } else {
        Err(format!("volume {volume} is outside 0.0..=1.0"))
    }
}
