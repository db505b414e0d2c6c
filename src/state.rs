use crate::scale::{compute_scale, octave_tonic, Pitch, PitchClass, ScaleMode};

pub const MIN_OCTAVE: i32 = 1;
pub const MAX_OCTAVE: i32 = 8;

/// The user's current key, octave and mode, owned by the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppSelection {
    pub key: PitchClass,
    octave: i32,
    pub mode: ScaleMode,
}

impl AppSelection {
    /// Create a selection; `octave` is clamped to 1..=8.
    pub fn new(key: PitchClass, octave: i32, mode: ScaleMode) -> Self {
        Self {
            key,
            octave: octave.clamp(MIN_OCTAVE, MAX_OCTAVE),
            mode,
        }
    }

    pub fn octave(&self) -> i32 {
        self.octave
    }

    pub fn set_octave(&mut self, octave: i32) {
        self.octave = octave.clamp(MIN_OCTAVE, MAX_OCTAVE);
    }

    pub fn octave_up(&mut self) {
        self.set_octave(self.octave + 1);
    }

    pub fn octave_down(&mut self) {
        self.set_octave(self.octave - 1);
    }

    pub fn scale(&self) -> [Pitch; 7] {
        compute_scale(self.key, self.octave, self.mode)
    }

    pub fn octave_tonic(&self) -> Pitch {
        octave_tonic(self.key, self.octave)
    }
}

impl Default for AppSelection {
    fn default() -> Self {
        Self::new(PitchClass::C, 4, ScaleMode::Major)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn octave_is_clamped() {
        let mut selection = AppSelection::new(PitchClass::D, 12, ScaleMode::Minor);
        assert_eq!(selection.octave(), 8);

        selection.octave_up();
        assert_eq!(selection.octave(), 8);

        selection.set_octave(1);
        selection.octave_down();
        assert_eq!(selection.octave(), 1);

        selection.set_octave(-3);
        assert_eq!(selection.octave(), 1);
    }

    #[test]
    fn default_is_c4_major() {
        let selection = AppSelection::default();
        assert_eq!(selection.scale()[0].to_string(), "C4");
        assert_eq!(selection.octave_tonic().to_string(), "C5");
    }
}
