//! Web Audio backend
//!
//! Cues become short oscillator bursts; the background loop is scheduled one
//! pass ahead on the audio clock.

use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

use super::{AudioSink, BGM_VOLUME, Envelope, Tone, bgm_notes, loop_secs, tone_for};
use crate::settings::Settings;
use crate::sim::CueKind;

/// Schedule the next loop pass this many seconds before the current one ends
const MUSIC_LOOKAHEAD: f64 = 1.0;
/// Attack time for loop notes
const NOTE_ATTACK: f64 = 0.04;

/// Audio manager for the game
pub struct WebAudio {
    ctx: Option<AudioContext>,
    sfx_volume: f32,
    music_volume: f32,
    /// Audio-clock time at which the next loop pass starts
    next_loop_at: Option<f64>,
}

impl WebAudio {
    pub fn new(settings: &Settings) -> Self {
        // Try to create audio context (may fail if not in secure context)
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - audio disabled");
        }
        Self {
            ctx,
            sfx_volume: settings.effective_sfx_volume(),
            music_volume: settings.effective_music_volume() * BGM_VOLUME,
            next_loop_at: None,
        }
    }

    /// Resume audio context (required after user gesture)
    pub fn resume(&self) {
        if let Some(ctx) = &self.ctx {
            let _ = ctx.resume();
        }
    }

    /// Create an oscillator with gain envelope
    fn create_osc(
        ctx: &AudioContext,
        freq: f32,
        osc_type: OscillatorType,
    ) -> Option<(OscillatorNode, GainNode)> {
        let osc = ctx.create_oscillator().ok()?;
        let gain = ctx.create_gain().ok()?;

        osc.set_type(osc_type);
        osc.frequency().set_value(freq);
        osc.connect_with_audio_node(&gain).ok()?;
        gain.connect_with_audio_node(&ctx.destination()).ok()?;

        Some((osc, gain))
    }

    fn play_tone(ctx: &AudioContext, tone: &Tone, vol: f32) {
        let t = ctx.current_time();
        let dur = tone.duration as f64;
        let peak = tone.partial_gain() * vol;
        for &freq in tone.freqs {
            let Some((osc, gain)) = Self::create_osc(ctx, freq, OscillatorType::Sine) else {
                continue;
            };
            match tone.envelope {
                Envelope::Blip => {
                    gain.gain().set_value_at_time(peak, t).ok();
                    gain.gain().set_value_at_time(peak, t + dur * 0.75).ok();
                    gain.gain().linear_ramp_to_value_at_time(0.0, t + dur).ok();
                }
                Envelope::Swell => {
                    gain.gain().set_value_at_time(peak, t).ok();
                    gain.gain()
                        .exponential_ramp_to_value_at_time(0.001, t + dur)
                        .ok();
                }
            }
            osc.start().ok();
            osc.stop_with_when(t + dur + 0.02).ok();
        }
    }

    fn schedule_loop(ctx: &AudioContext, start: f64, vol: f32) {
        for note in bgm_notes() {
            let Some((osc, gain)) = Self::create_osc(ctx, note.freq, OscillatorType::Sine) else {
                continue;
            };
            let t = start + note.start as f64;
            let end = t + note.duration as f64;
            gain.gain().set_value_at_time(0.0, t).ok();
            gain.gain()
                .linear_ramp_to_value_at_time(note.gain * vol, t + NOTE_ATTACK)
                .ok();
            gain.gain().linear_ramp_to_value_at_time(0.0, end).ok();
            osc.start_with_when(t).ok();
            osc.stop_with_when(end + 0.02).ok();
        }
    }
}

impl AudioSink for WebAudio {
    fn play(&mut self, cue: CueKind) {
        if self.sfx_volume <= 0.0 {
            return;
        }
        let Some(ctx) = &self.ctx else { return };

        // Resume context if suspended (browsers require user gesture)
        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }
        Self::play_tone(ctx, &tone_for(cue), self.sfx_volume);
    }

    fn update_music(&mut self) {
        if self.music_volume <= 0.0 {
            return;
        }
        let Some(ctx) = &self.ctx else { return };
        if ctx.state() != web_sys::AudioContextState::Running {
            return;
        }

        let now = ctx.current_time();
        let start = match self.next_loop_at {
            Some(at) if at - now > MUSIC_LOOKAHEAD => return,
            Some(at) => at.max(now),
            None => now + 0.1,
        };
        Self::schedule_loop(ctx, start, self.music_volume);
        self.next_loop_at = Some(start + loop_secs() as f64);
    }

    fn stop(&mut self) {
        if let Some(ctx) = &self.ctx {
            let _ = ctx.close();
            log::info!("Audio stopped");
        }
        self.ctx = None;
        self.next_loop_at = None;
    }
}
