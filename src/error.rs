use thiserror::Error;

/// Errors raised by the scale engine and the pad coordinator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScaleError {
    #[error("invalid key `{0}`: expected one of C, C#, D, D#, E, F, F#, G, G#, A, Bb, B")]
    InvalidKey(String),

    #[error("invalid pad slot {0}: expected 0..=7")]
    InvalidSlot(usize),
}

/// Top-level failures that abort the application.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("failed to start async runtime: {0}")]
    Runtime(#[from] std::io::Error),

    #[error("ui error: {0}")]
    Ui(#[from] eframe::Error),
}
