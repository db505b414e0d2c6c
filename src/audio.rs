use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use cpal::{
    traits::{DeviceTrait, HostTrait, StreamTrait},
    Sample, StreamConfig,
};
use tracing::{error, info};

use crate::playback::{SoundSource, Voice};
use crate::scale::Pitch;

/// Seconds for a voice to decay to roughly a third of its level.
const DECAY_SECONDS: f32 = 0.35;
/// Fade-in length in seconds, long enough to avoid a click.
const ATTACK_SECONDS: f32 = 0.005;

#[derive(Debug)]
struct ActiveVoice {
    frequency: f32,
    phase: f32,
    age: u64,
}

#[derive(Debug)]
struct SynthState {
    voices: Mutex<HashMap<u64, ActiveVoice>>,
    ready: AtomicBool,
    next_voice: AtomicU64,
    volume: f32,
}

/// Tone generator behind a `cpal` output stream.
///
/// Cheap to clone; all clones share one set of voices. Not ready until
/// [`run_sound_source`] has opened the output device.
#[derive(Debug, Clone)]
pub struct Synth {
    state: Arc<SynthState>,
}

impl Synth {
    pub fn new(volume: f32) -> Self {
        Self {
            state: Arc::new(SynthState {
                voices: Mutex::new(HashMap::new()),
                ready: AtomicBool::new(false),
                next_voice: AtomicU64::new(0),
                volume: volume.clamp(0.0, 1.0),
            }),
        }
    }

    fn mark_ready(&self) {
        self.state.ready.store(true, Ordering::Release);
    }
}

impl SoundSource for Synth {
    type Voice = SynthVoice;

    fn ready(&self) -> bool {
        self.state.ready.load(Ordering::Acquire)
    }

    fn play(&self, pitch: Pitch) -> Option<SynthVoice> {
        if !self.ready() {
            return None;
        }
        let id = self.state.next_voice.fetch_add(1, Ordering::Relaxed);
        let mut voices = self.state.voices.lock().ok()?;
        voices.insert(
            id,
            ActiveVoice {
                frequency: pitch.frequency(),
                phase: 0.0,
                age: 0,
            },
        );
        Some(SynthVoice {
            id,
            state: Arc::clone(&self.state),
        })
    }
}

/// A note held by the [`Synth`] until stopped.
#[derive(Debug)]
pub struct SynthVoice {
    id: u64,
    state: Arc<SynthState>,
}

impl Voice for SynthVoice {
    fn stop(self) {
        if let Ok(mut voices) = self.state.voices.lock() {
            voices.remove(&self.id);
        }
    }
}

/// Opens the default output device and keeps the stream alive.
///
/// The synth becomes ready once the stream is playing. If no device can be
/// opened the synth stays not ready and the pads only light up.
pub async fn run_sound_source(synth: Synth) {
    let result = tokio::task::spawn_blocking(move || {
        let host = cpal::default_host();
        let device = match host.default_output_device() {
            Some(device) => {
                info!(
                    "Default output device found: {}",
                    device.name().unwrap_or_else(|_| "Unknown".to_string())
                );
                device
            }
            None => {
                error!("No output device found");
                return;
            }
        };

        let supported_config = match device.default_output_config() {
            Ok(config) => config,
            Err(e) => {
                error!("Failed to get default output config: {}", e);
                return;
            }
        };

        let config = StreamConfig {
            channels: supported_config.channels(),
            sample_rate: supported_config.sample_rate(),
            buffer_size: cpal::BufferSize::Default,
        };

        info!("Audio stream configuration: {:?}", config);

        let state = Arc::clone(&synth.state);
        let channels = config.channels as usize;
        let sample_rate = config.sample_rate.0 as f32;
        let stream = match device.build_output_stream(
            &config,
            move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
                process_audio_data(data, &state, channels, sample_rate);
            },
            |err| {
                error!("An error occurred on the audio stream: {}", err);
            },
            None,
        ) {
            Ok(stream) => stream,
            Err(e) => {
                error!("Failed to build audio stream: {}", e);
                return;
            }
        };

        if let Err(e) = stream.play() {
            error!("Failed to play audio stream: {}", e);
            return;
        }
        synth.mark_ready();
        info!("Sound source ready");

        // The stream stops when dropped, so this thread holds it for good.
        loop {
            std::thread::sleep(std::time::Duration::from_secs(1));
        }
    })
    .await;

    if let Err(e) = result {
        error!("Sound source task failed: {}", e);
    }
}

/// Fills an interleaved output buffer with the sum of all active voices.
fn process_audio_data(data: &mut [f32], state: &SynthState, channels: usize, sample_rate: f32) {
    let Ok(mut voices) = state.voices.lock() else {
        data.fill(0.0);
        return;
    };

    let attack = (ATTACK_SECONDS * sample_rate).max(1.0);
    let decay = DECAY_SECONDS * sample_rate;

    for frame in data.chunks_mut(channels.max(1)) {
        let mut sample_value: f32 = 0.0;

        for voice in voices.values_mut() {
            voice.phase = (voice.phase + voice.frequency / sample_rate) % 1.0;
            let age = voice.age as f32;
            voice.age += 1;

            // A sine with a little triangle on top, shaped like a struck string.
            let sine_wave = (2.0 * std::f32::consts::PI * voice.phase).sin();
            let triangle_wave = (2.0 * voice.phase - 1.0).abs() * 2.0 - 1.0;
            let envelope = (age / attack).min(1.0) * (-age / decay).exp();

            sample_value += (0.8 * sine_wave + 0.2 * triangle_wave) * envelope * state.volume;
        }

        sample_value = sample_value.clamp(-1.0, 1.0);

        for sample in frame.iter_mut() {
            *sample = Sample::from_sample(sample_value);
        }
    }
}
