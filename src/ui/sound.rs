/// Sound engine: procedural retro-PC sound effects via rodio.
///
/// All sounds are generated as in-memory WAV buffers at init time.
/// Playback is fire-and-forget (non-blocking) via rodio's Sink.
///
/// Compile without the "sound" feature to disable audio entirely (the stub
/// SoundEngine does nothing).

use crate::sim::event::WizardEvent;

/// Every effect the wizard can make.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Sfx {
    /// Screen change / button press.
    Click,
    /// A file went into the trash.
    Trash,
    /// Error window or refused delete.
    Error,
    /// One install item finished.
    Blip,
    /// Desktop cleared, fortune revealed.
    Chime,
}

impl Sfx {
    pub const ALL: [Sfx; 5] = [Sfx::Click, Sfx::Trash, Sfx::Error, Sfx::Blip, Sfx::Chime];
}

/// Which effect, if any, accompanies an event.
pub fn sfx_for(event: &WizardEvent) -> Option<Sfx> {
    match event {
        WizardEvent::TransitionStarted { .. } => Some(Sfx::Click),
        WizardEvent::FileTrashed { .. } => Some(Sfx::Trash),
        WizardEvent::AccessDenied { .. } | WizardEvent::ErrorPopped(_) => Some(Sfx::Error),
        WizardEvent::DialogOpened => Some(Sfx::Error),
        WizardEvent::InstallItemDone(_) | WizardEvent::ConsoleCommand => Some(Sfx::Blip),
        WizardEvent::DesktopCleared | WizardEvent::FortuneConsulted | WizardEvent::EggToggled(true) => {
            Some(Sfx::Chime)
        }
        WizardEvent::ScreenEntered(_)
        | WizardEvent::DialogDismissed
        | WizardEvent::ConsoleToggled(_)
        | WizardEvent::EggToggled(false)
        | WizardEvent::Reset => None,
    }
}

#[cfg(feature = "sound")]
mod inner {
    use std::collections::HashMap;
    use std::io::Cursor;
    use std::sync::Arc;

    use rodio::{OutputStream, OutputStreamHandle, Sink};

    use super::{synth, Sfx};

    /// Pre-generated WAV buffers for each sound effect.
    pub struct SoundEngine {
        _stream: OutputStream,
        handle: OutputStreamHandle,
        buffers: HashMap<Sfx, Arc<Vec<u8>>>,
    }

    impl SoundEngine {
        pub fn new() -> Option<Self> {
            let (stream, handle) = OutputStream::try_default().ok()?;

            let buffers = Sfx::ALL
                .iter()
                .map(|&s| (s, Arc::new(synth::make_wav(&synth::generate(s)))))
                .collect();

            Some(SoundEngine {
                _stream: stream,
                handle,
                buffers,
            })
        }

        pub fn play(&self, sfx: Sfx) {
            let Some(buf) = self.buffers.get(&sfx) else { return };
            if let Ok(sink) = Sink::try_new(&self.handle) {
                let cursor = Cursor::new(buf.as_ref().clone());
                if let Ok(src) = rodio::Decoder::new(cursor) {
                    sink.append(src);
                    sink.detach(); // fire-and-forget
                }
            }
        }
    }
}

// ════════════════════════════════════════════════════════════
//  Waveform generators and WAV encoder
// ════════════════════════════════════════════════════════════

#[cfg_attr(not(feature = "sound"), allow(dead_code))]
mod synth {
    use std::f32::consts::TAU;

    use super::Sfx;

    pub const SAMPLE_RATE: u32 = 22050;

    pub fn generate(sfx: Sfx) -> Vec<f32> {
        match sfx {
            Sfx::Click => gen_click(),
            Sfx::Trash => gen_trash(),
            Sfx::Error => gen_error(),
            Sfx::Blip => notes(&[(880.0, 0.04)], 0.2),
            // C5 → E5 → G5, last one held
            Sfx::Chime => notes(&[(523.0, 0.08), (659.0, 0.08), (784.0, 0.22)], 0.25),
        }
    }

    /// A run of sine notes, each fading out over its own duration.
    fn notes(seq: &[(f32, f32)], volume: f32) -> Vec<f32> {
        let mut samples = Vec::new();
        for &(freq, dur) in seq {
            let n = (SAMPLE_RATE as f32 * dur) as usize;
            for i in 0..n {
                let t = i as f32 / SAMPLE_RATE as f32;
                let env = 1.0 - (i as f32 / n as f32).powf(0.5);
                samples.push((t * freq * TAU).sin() * env * volume);
            }
        }
        samples
    }

    /// Very short tick, like a mouse button.
    fn gen_click() -> Vec<f32> {
        let n = (SAMPLE_RATE as f32 * 0.012) as usize;
        (0..n)
            .map(|i| {
                let env = 1.0 - i as f32 / n as f32;
                let t = i as f32 / SAMPLE_RATE as f32;
                (t * 2000.0 * TAU).sin().signum() * env * 0.15
            })
            .collect()
    }

    /// Crumpled-paper noise sweep.
    fn gen_trash() -> Vec<f32> {
        let n = (SAMPLE_RATE as f32 * 0.18) as usize;
        let mut rng: u32 = 2025;
        (0..n)
            .map(|i| {
                let t = i as f32 / n as f32;
                rng = rng.wrapping_mul(1103515245).wrapping_add(12345);
                let noise = (rng >> 16) as f32 / 32768.0 - 1.0;
                noise * (1.0 - t).powf(1.5) * 0.25
            })
            .collect()
    }

    /// Classic two-tone error buzz.
    fn gen_error() -> Vec<f32> {
        let mut samples = Vec::new();
        for &freq in &[220.0_f32, 196.0] {
            let n = (SAMPLE_RATE as f32 * 0.09) as usize;
            for i in 0..n {
                let t = i as f32 / SAMPLE_RATE as f32;
                let square = (t * freq * TAU).sin().signum();
                samples.push(square * (1.0 - i as f32 / n as f32 * 0.4) * 0.15);
            }
        }
        samples
    }

    /// Wrap mono f32 samples into a 16-bit PCM WAV buffer.
    pub fn make_wav(samples: &[f32]) -> Vec<u8> {
        let channels: u16 = 1;
        let bits: u16 = 16;
        let byte_rate = SAMPLE_RATE * channels as u32 * bits as u32 / 8;
        let block_align = channels * bits / 8;
        let data_size = samples.len() as u32 * 2;

        let mut buf = Vec::with_capacity(44 + data_size as usize);
        buf.extend_from_slice(b"RIFF");
        buf.extend_from_slice(&(36 + data_size).to_le_bytes());
        buf.extend_from_slice(b"WAVE");

        buf.extend_from_slice(b"fmt ");
        buf.extend_from_slice(&16u32.to_le_bytes());
        buf.extend_from_slice(&1u16.to_le_bytes()); // PCM
        buf.extend_from_slice(&channels.to_le_bytes());
        buf.extend_from_slice(&SAMPLE_RATE.to_le_bytes());
        buf.extend_from_slice(&byte_rate.to_le_bytes());
        buf.extend_from_slice(&block_align.to_le_bytes());
        buf.extend_from_slice(&bits.to_le_bytes());

        buf.extend_from_slice(b"data");
        buf.extend_from_slice(&data_size.to_le_bytes());
        for &s in samples {
            let val = (s.clamp(-1.0, 1.0) * 32767.0) as i16;
            buf.extend_from_slice(&val.to_le_bytes());
        }
        buf
    }
}

// ════════════════════════════════════════════════════════════
//  Public API: compiles to no-ops when sound feature is off
// ════════════════════════════════════════════════════════════

#[cfg(feature = "sound")]
pub use inner::SoundEngine;

#[cfg(not(feature = "sound"))]
pub struct SoundEngine;

#[cfg(not(feature = "sound"))]
impl SoundEngine {
    pub fn new() -> Option<Self> { Some(SoundEngine) }
    pub fn play(&self, _sfx: Sfx) {}
}
