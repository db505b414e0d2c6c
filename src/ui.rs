use std::time::Instant;

use eframe::{App, CreationContext};
use egui::{Button, CentralPanel, Color32, ComboBox, Context, DragValue, RichText, Stroke, Ui};
use tracing::{debug, error};

use crate::audio::Synth;
use crate::input::{commands_from_events, Command};
use crate::playback::{PlaybackCoordinator, SoundSource};
use crate::scale::{degree_label, Pitch, PitchClass, ScaleMode, OCTAVE_TONIC_SLOT, PAD_COUNT};
use crate::state::{AppSelection, MAX_OCTAVE, MIN_OCTAVE};

/// One color per pad, root to upper tonic.
const PAD_COLORS: [Color32; PAD_COUNT] = [
    Color32::from_rgb(0xE5, 0x39, 0x35),
    Color32::from_rgb(0xFB, 0x8C, 0x00),
    Color32::from_rgb(0xFD, 0xD8, 0x35),
    Color32::from_rgb(0x43, 0xA0, 0x47),
    Color32::from_rgb(0x00, 0x89, 0x7B),
    Color32::from_rgb(0x1E, 0x88, 0xE5),
    Color32::from_rgb(0x8E, 0x24, 0xAA),
    Color32::from_rgb(0xE5, 0x39, 0x35),
];

/// The scale practice window.
pub struct ScaleApp {
    selection: AppSelection,
    pads: PlaybackCoordinator<Synth>,
}

impl ScaleApp {
    pub fn new(selection: AppSelection, synth: Synth) -> Self {
        Self {
            selection,
            pads: PlaybackCoordinator::new(synth),
        }
    }

    fn apply(&mut self, command: Command, now: Instant) {
        match command {
            Command::Play { slot, octave_tonic } => self.play(slot, octave_tonic, now),
            Command::OctaveUp => {
                self.selection.octave_up();
                debug!("octave {}", self.selection.octave());
            }
            Command::OctaveDown => {
                self.selection.octave_down();
                debug!("octave {}", self.selection.octave());
            }
        }
    }

    fn play(&mut self, slot: usize, octave_tonic: bool, now: Instant) {
        if let Err(e) = self.pads.trigger(&self.selection, slot, octave_tonic, now) {
            error!("Failed to trigger pad: {}", e);
        }
    }

    fn pad_pitch(&self, scale: &[Pitch; 7], slot: usize) -> Pitch {
        if slot == OCTAVE_TONIC_SLOT {
            self.selection.octave_tonic()
        } else {
            scale[slot]
        }
    }

    fn show_pads(&mut self, ui: &mut Ui, now: Instant) {
        let scale = self.selection.scale();
        ui.horizontal(|ui| {
            for slot in 0..PAD_COUNT {
                let label = degree_label(slot, self.selection.mode).unwrap_or("?");
                let pitch = self.pad_pitch(&scale, slot);
                let active = self.pads.is_active(slot);

                let color = PAD_COLORS[slot];
                let (fill, stroke) = if active {
                    (color, Stroke::new(3.0, Color32::WHITE))
                } else {
                    (color.linear_multiply(0.45), Stroke::NONE)
                };

                let text = RichText::new(format!("{}\n{}", label, pitch))
                    .size(22.0)
                    .color(Color32::WHITE);
                let button = Button::new(text)
                    .fill(fill)
                    .stroke(stroke)
                    .min_size(egui::vec2(72.0, 96.0));

                if ui.add(button).clicked() {
                    self.play(slot, slot == OCTAVE_TONIC_SLOT, now);
                }
            }
        });
    }

    fn show_controls(&mut self, ui: &mut Ui) {
        ui.horizontal(|ui| {
            ui.label("Key:");
            ComboBox::from_id_salt("key")
                .selected_text(self.selection.key.name())
                .show_ui(ui, |ui| {
                    for key in PitchClass::ALL {
                        ui.selectable_value(&mut self.selection.key, key, key.name());
                    }
                });

            ui.label("Octave:");
            let mut octave = self.selection.octave();
            if ui
                .add(DragValue::new(&mut octave).range(MIN_OCTAVE..=MAX_OCTAVE))
                .changed()
            {
                self.selection.set_octave(octave);
            }

            ui.label("Mode:");
            ComboBox::from_id_salt("mode")
                .selected_text(self.selection.mode.name())
                .show_ui(ui, |ui| {
                    for mode in ScaleMode::ALL {
                        ui.selectable_value(&mut self.selection.mode, mode, mode.name());
                    }
                });
        });
    }
}

impl App for ScaleApp {
    fn update(&mut self, ctx: &Context, _: &mut eframe::Frame) {
        let now = Instant::now();
        self.pads.tick(now);

        let commands = ctx.input(|i| commands_from_events(&i.events));
        for command in commands {
            self.apply(command, now);
        }

        CentralPanel::default().show(ctx, |ui| {
            ui.heading(self.selection.mode.name());
            ui.add_space(8.0);
            self.show_pads(ui, now);
            ui.add_space(8.0);
            ui.separator();
            self.show_controls(ui);
            if !self.pads.source().ready() {
                ui.weak("Sound is loading; pads will light without audio until it is ready.");
            }
        });

        if let Some(deadline) = self.pads.next_deadline() {
            ctx.request_repaint_after(deadline.saturating_duration_since(Instant::now()));
        }
    }
}

/// Initializes and runs the eframe application.
pub fn run_ui(selection: AppSelection, synth: Synth) -> Result<(), eframe::Error> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([680.0, 240.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Scale Pads",
        options,
        Box::new(move |_cc: &CreationContext| Ok(Box::new(ScaleApp::new(selection, synth)))),
    )
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn key_commands_drive_pads_and_octave() {
        let t0 = Instant::now();
        let mut app = ScaleApp::new(AppSelection::default(), Synth::new(0.5));

        app.apply(Command::Play { slot: 7, octave_tonic: true }, t0);
        assert!(app.pads.is_active(7));

        app.apply(Command::OctaveUp, t0);
        app.apply(Command::OctaveUp, t0);
        assert_eq!(app.selection.octave(), 6);
        app.apply(Command::OctaveDown, t0);
        assert_eq!(app.selection.octave(), 5);

        app.pads.tick(t0 + Duration::from_millis(500));
        assert!(!app.pads.is_active(7));
    }

    #[test]
    fn top_pad_shows_root_an_octave_up() {
        let app = ScaleApp::new(
            AppSelection::new(PitchClass::A, 3, ScaleMode::Minor),
            Synth::new(0.5),
        );
        let scale = app.selection.scale();
        assert_eq!(app.pad_pitch(&scale, 0).to_string(), "A3");
        assert_eq!(app.pad_pitch(&scale, 2).to_string(), "C4");
        assert_eq!(app.pad_pitch(&scale, 7).to_string(), "A4");
    }
}
