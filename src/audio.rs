//! Cue playback using Web Audio and the Vibration API
//!
//! Tones are synthesized on the fly - no audio files needed.

use wasm_bindgen::JsValue;
use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

use crate::feedback::{Cue, HapticPattern, Sweep, SweepCurve, Tone};

/// Plays feedback cues in the browser
pub struct CuePlayer {
    ctx: Option<AudioContext>,
}

impl Default for CuePlayer {
    fn default() -> Self {
        Self::new()
    }
}

impl CuePlayer {
    pub fn new() -> Self {
        // May fail outside a secure context
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - tones disabled");
        }
        Self { ctx }
    }

    pub fn play_all(&self, cues: &[Cue]) {
        for cue in cues {
            self.play(cue);
        }
    }

    pub fn play(&self, cue: &Cue) {
        match cue {
            Cue::Haptic(pattern) => vibrate(pattern),
            Cue::Tone(tone) => self.play_tone(tone),
        }
    }

    fn play_tone(&self, tone: &Tone) {
        let Some(ctx) = &self.ctx else { return };

        // Browsers suspend the context until a user gesture
        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }

        let Some(gain) = self.create_gain(ctx) else {
            return;
        };
        let t = ctx.current_time();
        let end = t + tone.duration_secs as f64;
        let param = gain.gain();

        if tone.attack_secs > 0.0 {
            param.set_value_at_time(0.0, t).ok();
            param
                .linear_ramp_to_value_at_time(tone.peak_gain, t + tone.attack_secs as f64)
                .ok();
        } else {
            param.set_value_at_time(tone.peak_gain, t).ok();
        }
        param.exponential_ramp_to_value_at_time(tone.end_gain, end).ok();

        for sweep in tone.voices {
            let Some(osc) = self.create_osc(ctx, &gain, sweep) else {
                continue;
            };
            let freq = osc.frequency();
            freq.set_value_at_time(sweep.from_hz, t).ok();
            if sweep.to_hz != sweep.from_hz {
                let _ = match tone.curve {
                    SweepCurve::Linear => freq.linear_ramp_to_value_at_time(sweep.to_hz, end),
                    SweepCurve::Exponential => {
                        freq.exponential_ramp_to_value_at_time(sweep.to_hz, end)
                    }
                };
            }
            osc.start_with_when(t).ok();
            osc.stop_with_when(end).ok();
        }
    }

    fn create_gain(&self, ctx: &AudioContext) -> Option<GainNode> {
        let gain = ctx.create_gain().ok()?;
        gain.connect_with_audio_node(&ctx.destination()).ok()?;
        Some(gain)
    }

    /// Sine oscillator feeding `gain`
    fn create_osc(
        &self,
        ctx: &AudioContext,
        gain: &GainNode,
        sweep: &Sweep,
    ) -> Option<OscillatorNode> {
        let osc = ctx.create_oscillator().ok()?;
        osc.set_type(OscillatorType::Sine);
        osc.frequency().set_value(sweep.from_hz);
        osc.connect_with_audio_node(gain).ok()?;
        Some(osc)
    }
}

/// Vibrate if the device supports it
fn vibrate(pattern: &HapticPattern) {
    let Some(window) = web_sys::window() else { return };
    let navigator = window.navigator();
    let ok = match pattern.0 {
        [single] => navigator.vibrate_with_duration(*single),
        steps => {
            let array = js_sys::Array::new();
            for ms in steps {
                array.push(&JsValue::from(*ms));
            }
            navigator.vibrate_with_pattern(&array)
        }
    };
    if !ok {
        log::debug!("Vibration unavailable");
    }
}
