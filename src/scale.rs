use std::fmt;
use std::str::FromStr;

use crate::error::ScaleError;

/// Number of pads: seven scale degrees plus the tonic one octave up.
pub const PAD_COUNT: usize = 8;

/// Pad index of the upper-octave tonic.
pub const OCTAVE_TONIC_SLOT: usize = 7;

/// The twelve pitch classes in chromatic order, starting at C.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PitchClass {
    C,
    CSharp,
    D,
    DSharp,
    E,
    F,
    FSharp,
    G,
    GSharp,
    A,
    BFlat,
    B,
}

impl PitchClass {
    pub const ALL: [PitchClass; 12] = [
        Self::C,
        Self::CSharp,
        Self::D,
        Self::DSharp,
        Self::E,
        Self::F,
        Self::FSharp,
        Self::G,
        Self::GSharp,
        Self::A,
        Self::BFlat,
        Self::B,
    ];

    /// Semitones above C (C = 0, B = 11).
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::C => "C",
            Self::CSharp => "C#",
            Self::D => "D",
            Self::DSharp => "D#",
            Self::E => "E",
            Self::F => "F",
            Self::FSharp => "F#",
            Self::G => "G",
            Self::GSharp => "G#",
            Self::A => "A",
            Self::BFlat => "Bb",
            Self::B => "B",
        }
    }
}

impl fmt::Display for PitchClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PitchClass {
    type Err = ScaleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|pc| pc.name() == trimmed)
            .ok_or_else(|| ScaleError::InvalidKey(s.to_string()))
    }
}

/// Diatonic mode of the practised scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ScaleMode {
    #[default]
    Major,
    Minor,
}

impl ScaleMode {
    pub const ALL: [ScaleMode; 2] = [Self::Major, Self::Minor];

    /// Semitone offsets from the root, one per degree, strictly ascending.
    pub fn intervals(self) -> &'static [u8; 7] {
        match self {
            Self::Major => &[0, 2, 4, 5, 7, 9, 11],
            Self::Minor => &[0, 2, 3, 5, 7, 8, 10],
        }
    }

    /// Display labels for all eight pads.
    pub fn labels(self) -> &'static [&'static str; PAD_COUNT] {
        match self {
            Self::Major => &["1", "2", "3", "4", "5", "6", "7", "1"],
            Self::Minor => &["1", "2", "b3", "4", "5", "b6", "b7", "1"],
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Major => "Major",
            Self::Minor => "Minor",
        }
    }
}

impl fmt::Display for ScaleMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A pitch class placed in a specific octave, e.g. `C4`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pitch {
    pub pitch_class: PitchClass,
    pub octave: i32,
}

impl Pitch {
    pub fn new(pitch_class: PitchClass, octave: i32) -> Self {
        Self { pitch_class, octave }
    }

    /// MIDI note number, with C4 = 60.
    pub fn midi_number(&self) -> i32 {
        (self.octave + 1) * 12 + self.pitch_class.index() as i32
    }

    /// Equal-tempered frequency in Hz (A4 = 440 Hz).
    pub fn frequency(&self) -> f32 {
        440.0 * 2.0_f32.powf((self.midi_number() - 69) as f32 / 12.0)
    }
}

impl fmt::Display for Pitch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.pitch_class, self.octave)
    }
}

/// Computes the seven degrees of `key` `mode` starting in `octave`.
///
/// Each degree is placed independently: a degree moves up one octave exactly
/// when `root + offset` reaches past B, so B major yields `B4 C#5 D#5 ...`.
pub fn compute_scale(key: PitchClass, octave: i32, mode: ScaleMode) -> [Pitch; 7] {
    let root = key.index();
    (*mode.intervals()).map(|offset| {
        let absolute = root + offset as usize;
        let rollover = if absolute >= 12 { 1 } else { 0 };
        Pitch::new(PitchClass::ALL[absolute % 12], octave + rollover)
    })
}

/// The root replayed one octave above the selected octave (pad 7).
pub fn octave_tonic(key: PitchClass, octave: i32) -> Pitch {
    Pitch::new(key, octave + 1)
}

/// Display label for a pad.
pub fn degree_label(slot: usize, mode: ScaleMode) -> Result<&'static str, ScaleError> {
    mode.labels()
        .get(slot)
        .copied()
        .ok_or(ScaleError::InvalidSlot(slot))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(name: &str, octave: i32) -> Pitch {
        Pitch::new(name.parse().unwrap(), octave)
    }

    #[test]
    fn every_scale_starts_on_its_key_and_ascends() {
        for key in PitchClass::ALL {
            for mode in ScaleMode::ALL {
                let scale = compute_scale(key, 4, mode);
                assert_eq!(scale.len(), 7);
                assert_eq!(scale[0], Pitch::new(key, 4));

                let midi: Vec<i32> = scale.iter().map(Pitch::midi_number).collect();
                let offsets: Vec<i32> = midi.iter().map(|m| m - midi[0]).collect();
                let expected: Vec<i32> = mode.intervals().iter().map(|&o| o as i32).collect();
                assert_eq!(offsets, expected, "{key} {mode}");
            }
        }
    }

    #[test]
    fn c_major_stays_in_octave() {
        let scale = compute_scale(PitchClass::C, 4, ScaleMode::Major);
        let names: Vec<String> = scale.iter().map(|p| p.to_string()).collect();
        assert_eq!(names, ["C4", "D4", "E4", "F4", "G4", "A4", "B4"]);
    }

    #[test]
    fn b_major_rolls_over_from_second_degree() {
        let scale = compute_scale(PitchClass::B, 4, ScaleMode::Major);
        assert_eq!(scale[0], p("B", 4));
        assert_eq!(scale[1], p("C#", 5));
        let names: Vec<String> = scale.iter().map(|p| p.to_string()).collect();
        assert_eq!(names, ["B4", "C#5", "D#5", "E5", "F#5", "G#5", "Bb5"]);
    }

    #[test]
    fn rollover_is_per_degree() {
        // G (7) crosses B at the fourth degree: 7 + 5 = 12.
        let scale = compute_scale(PitchClass::G, 3, ScaleMode::Major);
        let names: Vec<String> = scale.iter().map(|p| p.to_string()).collect();
        assert_eq!(names, ["G3", "A3", "B3", "C4", "D4", "E4", "F#4"]);

        let scale = compute_scale(PitchClass::E, 2, ScaleMode::Minor);
        let names: Vec<String> = scale.iter().map(|p| p.to_string()).collect();
        assert_eq!(names, ["E2", "F#2", "G2", "A2", "B2", "C3", "D3"]);
    }

    #[test]
    fn minor_third_differs_from_major_third() {
        assert_eq!(compute_scale(PitchClass::C, 4, ScaleMode::Minor)[2], p("D#", 4));
        assert_eq!(compute_scale(PitchClass::C, 4, ScaleMode::Major)[2], p("E", 4));
    }

    #[test]
    fn compute_scale_is_deterministic() {
        let a = compute_scale(PitchClass::FSharp, 5, ScaleMode::Minor);
        let b = compute_scale(PitchClass::FSharp, 5, ScaleMode::Minor);
        assert_eq!(a, b);
    }

    #[test]
    fn octave_tonic_ignores_mode_and_rollover() {
        assert_eq!(octave_tonic(PitchClass::C, 4).to_string(), "C5");
        assert_eq!(octave_tonic(PitchClass::B, 4).to_string(), "B5");
    }

    #[test]
    fn parses_only_the_twelve_names() {
        assert_eq!("Bb".parse::<PitchClass>(), Ok(PitchClass::BFlat));
        assert_eq!(" C# ".parse::<PitchClass>(), Ok(PitchClass::CSharp));
        assert_eq!(
            "A#".parse::<PitchClass>(),
            Err(ScaleError::InvalidKey("A#".to_string()))
        );
        assert!("H".parse::<PitchClass>().is_err());
    }

    #[test]
    fn labels_flag_minor_degrees() {
        let labels: Vec<_> = (0..PAD_COUNT)
            .map(|i| degree_label(i, ScaleMode::Minor).unwrap())
            .collect();
        assert_eq!(labels, ["1", "2", "b3", "4", "5", "b6", "b7", "1"]);
        assert_eq!(degree_label(7, ScaleMode::Major), Ok("1"));
        assert_eq!(degree_label(8, ScaleMode::Major), Err(ScaleError::InvalidSlot(8)));
    }

    #[test]
    fn a4_is_440() {
        let a4 = p("A", 4);
        assert_eq!(a4.midi_number(), 69);
        assert!((a4.frequency() - 440.0).abs() < 0.01);
        assert_eq!(p("C", 4).midi_number(), 60);
    }
}
