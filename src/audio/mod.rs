//! Audio cues and sinks
//!
//! Every sound is synthesized from a short description ([`Tone`]); no audio
//! files are shipped. The browser backend lives in `web` (wasm32 only).

#[cfg(target_arch = "wasm32")]
pub mod web;

use crate::sim::CueKind;

/// How a tone's gain evolves
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Envelope {
    /// Flat, then a fast fade over the last quarter
    Blip,
    /// Decaying from the start (used for chords)
    Swell,
}

/// A synthesized sound effect
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    /// Sine partials played together
    pub freqs: &'static [f32],
    /// Seconds
    pub duration: f32,
    /// Peak gain before master/sfx volume
    pub volume: f32,
    pub envelope: Envelope,
}

impl Tone {
    const fn blip(freqs: &'static [f32], duration: f32, volume: f32) -> Self {
        Self {
            freqs,
            duration,
            volume,
            envelope: Envelope::Blip,
        }
    }

    const fn chord(freqs: &'static [f32], duration: f32, volume: f32) -> Self {
        Self {
            freqs,
            duration,
            volume,
            envelope: Envelope::Swell,
        }
    }

    /// Gain of each partial so the sum stays at `volume`
    pub fn partial_gain(&self) -> f32 {
        self.volume / self.freqs.len().max(1) as f32
    }
}

/// Synthesis recipe for a cue
pub fn tone_for(cue: CueKind) -> Tone {
    match cue {
        CueKind::Pop => Tone::blip(&[700.0], 0.08, 0.28),
        CueKind::Ok => Tone::chord(&[523.0, 659.0, 784.0], 0.30, 0.32),
        CueKind::Wrong => Tone::blip(&[180.0], 0.20, 0.25),
        CueKind::Combo => Tone::chord(&[523.0, 659.0, 784.0, 1047.0], 0.38, 0.34),
        CueKind::Expire => Tone::blip(&[280.0], 0.18, 0.20),
        CueKind::LevelUp => Tone::chord(&[392.0, 494.0, 587.0, 784.0], 0.50, 0.35),
        CueKind::Click => Tone::blip(&[1050.0], 0.05, 0.15),
    }
}

// === Background loop ===

/// Café loop tempo
pub const BGM_BPM: f32 = 80.0;
pub const BGM_BARS: usize = 8;
/// Loop gain before master/music volume
pub const BGM_VOLUME: f32 = 0.18;

const PENTATONIC: [f32; 10] = [
    261.63, 293.66, 329.63, 392.00, 440.00, 523.25, 587.33, 659.25, 783.99, 880.00,
];

/// Melody in half-beats (pentatonic indices, None = rest)
#[rustfmt::skip]
const MELODY: [Option<usize>; 32] = {
    const R: Option<usize> = None;
    [
        Some(0), R, Some(2), R, Some(4), Some(2), Some(0), R,
        Some(3), Some(2), Some(3), R, Some(5), Some(4), Some(3), R,
        Some(0), R, Some(2), Some(4), Some(5), Some(4), Some(2), R,
        Some(3), R, Some(2), Some(0), Some(2), Some(0), R, R,
    ]
};

/// Bass line, one note per beat, an octave below
const BASS: [usize; 8] = [0, 0, 2, 2, 0, 0, 3, 3];

/// One scheduled note of the background loop
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Note {
    /// Offset from the loop start (seconds)
    pub start: f32,
    pub duration: f32,
    pub freq: f32,
    pub gain: f32,
}

pub fn beat_secs() -> f32 {
    60.0 / BGM_BPM
}

/// Length of one pass of the loop
pub fn loop_secs() -> f32 {
    beat_secs() * 4.0 * BGM_BARS as f32
}

/// Every note in one pass of the loop, in start order per voice
pub fn bgm_notes() -> Vec<Note> {
    let half = beat_secs() * 0.5;
    let melody = MELODY.iter().enumerate().filter_map(|(i, note)| {
        note.map(|n| Note {
            start: i as f32 * half,
            duration: half,
            freq: PENTATONIC[n % PENTATONIC.len()],
            gain: 0.10,
        })
    });
    let bass = BASS.iter().enumerate().map(|(i, &n)| Note {
        start: i as f32 * beat_secs(),
        duration: beat_secs(),
        freq: PENTATONIC[n % PENTATONIC.len()] / 2.0,
        gain: 0.045,
    });
    melody.chain(bass).collect()
}

/// Something that can play cues
///
/// Implementations must never block; failures are swallowed.
pub trait AudioSink {
    fn play(&mut self, cue: CueKind);

    /// Start (or keep scheduling) the background loop
    fn update_music(&mut self) {}

    /// Stop everything (restart, shutdown)
    fn stop(&mut self) {}
}

/// Silent sink (headless runs, or when no audio device is available)
#[derive(Debug, Default)]
pub struct NullAudio {
    /// Cues received, for logging at shutdown
    pub played: usize,
}

impl AudioSink for NullAudio {
    fn play(&mut self, cue: CueKind) {
        self.played += 1;
        log::trace!("cue {}", cue.name());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_cue_has_a_tone() {
        for cue in CueKind::ALL {
            let tone = tone_for(cue);
            assert!(!tone.freqs.is_empty(), "{}", cue.name());
            assert!(tone.duration > 0.0 && tone.duration <= 0.5);
            assert!(tone.volume > 0.0 && tone.volume < 0.5);
        }
    }

    #[test]
    fn test_chords_split_gain() {
        let combo = tone_for(CueKind::Combo);
        assert_eq!(combo.envelope, Envelope::Swell);
        assert!((combo.partial_gain() - 0.085).abs() < 1e-6);
        assert_eq!(tone_for(CueKind::Pop).partial_gain(), 0.28);
    }

    #[test]
    fn test_bgm_fits_in_loop() {
        let notes = bgm_notes();
        let rests = MELODY.iter().filter(|n| n.is_none()).count();
        assert_eq!(notes.len(), MELODY.len() - rests + BASS.len());
        assert!((loop_secs() - 24.0).abs() < 1e-4);
        assert!(notes.iter().all(|n| n.start + n.duration <= loop_secs()));
        // Bass sits an octave below middle C
        assert!(notes.iter().any(|n| (n.freq - 130.815).abs() < 1e-3));
    }

    #[test]
    fn test_null_sink_counts() {
        let mut sink = NullAudio::default();
        sink.play(CueKind::Pop);
        sink.play(CueKind::Ok);
        assert_eq!(sink.played, 2);
    }
}
