use egui::{Event, Key};

use crate::scale::OCTAVE_TONIC_SLOT;

/// What a key press asks the instrument to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Play { slot: usize, octave_tonic: bool },
    OctaveUp,
    OctaveDown,
}

/// `1`..`7` play the scale degrees, `8` the tonic an octave up, and the
/// up/down arrows step the octave.
pub fn command_for_key(key: Key) -> Option<Command> {
    let slot = match key {
        Key::Num1 => 0,
        Key::Num2 => 1,
        Key::Num3 => 2,
        Key::Num4 => 3,
        Key::Num5 => 4,
        Key::Num6 => 5,
        Key::Num7 => 6,
        Key::Num8 => OCTAVE_TONIC_SLOT,
        Key::ArrowUp => return Some(Command::OctaveUp),
        Key::ArrowDown => return Some(Command::OctaveDown),
        _ => return None,
    };
    Some(Command::Play {
        slot,
        octave_tonic: slot == OCTAVE_TONIC_SLOT,
    })
}

/// Commands for this frame's key presses, in order. Auto-repeat counts as a
/// press, so holding a digit keeps retriggering its pad.
pub fn commands_from_events(events: &[Event]) -> Vec<Command> {
    events
        .iter()
        .filter_map(|event| match event {
            Event::Key {
                key, pressed: true, ..
            } => command_for_key(*key),
            _ => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::Modifiers;

    fn key_event(key: Key, pressed: bool, repeat: bool) -> Event {
        Event::Key {
            key,
            physical_key: None,
            pressed,
            repeat,
            modifiers: Modifiers::NONE,
        }
    }

    #[test]
    fn digits_map_to_pads() {
        assert_eq!(
            command_for_key(Key::Num1),
            Some(Command::Play { slot: 0, octave_tonic: false })
        );
        assert_eq!(
            command_for_key(Key::Num7),
            Some(Command::Play { slot: 6, octave_tonic: false })
        );
        assert_eq!(
            command_for_key(Key::Num8),
            Some(Command::Play { slot: 7, octave_tonic: true })
        );
        assert_eq!(command_for_key(Key::Num9), None);
        assert_eq!(command_for_key(Key::Num0), None);
        assert_eq!(command_for_key(Key::A), None);
    }

    #[test]
    fn arrows_step_octave() {
        assert_eq!(command_for_key(Key::ArrowUp), Some(Command::OctaveUp));
        assert_eq!(command_for_key(Key::ArrowDown), Some(Command::OctaveDown));
    }

    #[test]
    fn only_presses_and_repeats_produce_commands() {
        let events = [
            key_event(Key::Num3, true, false),
            key_event(Key::Num3, true, true),
            key_event(Key::Num3, false, false),
            Event::Text("3".to_string()),
            key_event(Key::ArrowUp, true, false),
        ];
        assert_eq!(
            commands_from_events(&events),
            [
                Command::Play { slot: 2, octave_tonic: false },
                Command::Play { slot: 2, octave_tonic: false },
                Command::OctaveUp,
            ]
        );
    }
}
