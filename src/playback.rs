use std::time::{Duration, Instant};

use tracing::debug;

use crate::error::ScaleError;
use crate::scale::{Pitch, OCTAVE_TONIC_SLOT, PAD_COUNT};
use crate::state::AppSelection;
use crate::timer::{TimerId, TimerQueue};

/// How long a note sounds and how long its pad stays lit.
pub const NOTE_DURATION: Duration = Duration::from_millis(500);

/// A sounding note that can be silenced.
pub trait Voice {
    fn stop(self);
}

/// Something that can turn a pitch into sound.
///
/// A source starts out not ready while its instrument loads and becomes ready
/// at most once; it never goes back.
pub trait SoundSource {
    type Voice: Voice;

    fn ready(&self) -> bool;

    /// Start playing `pitch`. Returns `None` when the source cannot play yet.
    fn play(&self, pitch: Pitch) -> Option<Self::Voice>;
}

enum PlaybackTimer<V> {
    /// Turn a pad's pulse off.
    Deactivate(usize),
    /// Silence a voice started by a trigger. Never cancelled.
    StopVoice(V),
}

#[derive(Debug, Clone, Copy, Default)]
struct PadState {
    active: bool,
    pulse: Option<TimerId>,
}

/// Plays scale degrees and keeps each pad's "now playing" pulse in step.
///
/// Every pad owns at most one pending deactivation. Retriggering a lit pad
/// cancels the pending one before arming a new one, so the pulse always ends
/// `NOTE_DURATION` after the latest trigger.
pub struct PlaybackCoordinator<S: SoundSource> {
    source: S,
    pads: [PadState; PAD_COUNT],
    timers: TimerQueue<PlaybackTimer<S::Voice>>,
}

impl<S: SoundSource> PlaybackCoordinator<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            pads: [PadState::default(); PAD_COUNT],
            timers: TimerQueue::new(),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Play pad `slot` for the current selection and light it up.
    ///
    /// Pad 7, or any trigger with `octave_tonic` set, plays the root one
    /// octave above the selection and lights pad 7. Returns the pitch that was
    /// requested, whether or not the source was ready to sound it.
    pub fn trigger(
        &mut self,
        selection: &AppSelection,
        slot: usize,
        octave_tonic: bool,
        now: Instant,
    ) -> Result<Pitch, ScaleError> {
        if slot >= PAD_COUNT {
            return Err(ScaleError::InvalidSlot(slot));
        }

        let (pad, pitch) = if octave_tonic || slot == OCTAVE_TONIC_SLOT {
            (OCTAVE_TONIC_SLOT, selection.octave_tonic())
        } else {
            (slot, selection.scale()[slot])
        };

        let voice = if self.source.ready() {
            self.source.play(pitch)
        } else {
            None
        };
        match voice {
            Some(voice) => {
                debug!("pad {} playing {}", pad, pitch);
                self.timers
                    .schedule(now, NOTE_DURATION, PlaybackTimer::StopVoice(voice));
            }
            None => debug!("pad {}: sound source not ready, skipping {}", pad, pitch),
        }

        self.arm_pulse(pad, now);
        Ok(pitch)
    }

    fn arm_pulse(&mut self, pad: usize, now: Instant) {
        let state = &mut self.pads[pad];
        if let Some(stale) = state.pulse.take() {
            self.timers.cancel(stale);
        }
        state.active = true;
        state.pulse = Some(
            self.timers
                .schedule(now, NOTE_DURATION, PlaybackTimer::Deactivate(pad)),
        );
    }

    /// Fire everything due at `now`. Returns the pads whose pulse ended.
    pub fn tick(&mut self, now: Instant) -> Vec<usize> {
        let mut ended = Vec::new();
        for (id, timer) in self.timers.advance(now) {
            match timer {
                PlaybackTimer::Deactivate(pad) => {
                    let state = &mut self.pads[pad];
                    debug_assert_eq!(state.pulse, Some(id));
                    state.active = false;
                    state.pulse = None;
                    debug!("pad {} pulse ended", pad);
                    ended.push(pad);
                }
                PlaybackTimer::StopVoice(voice) => voice.stop(),
            }
        }
        ended
    }

    pub fn is_active(&self, slot: usize) -> bool {
        self.pads.get(slot).is_some_and(|pad| pad.active)
    }

    /// When `tick` next has work to do.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.timers.next_deadline()
    }
}
