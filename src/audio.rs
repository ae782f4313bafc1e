//! Audio synthesis using the Web Audio API (wasm only)
//!
//! Every cue is generated from oscillators and gain envelopes - no sound
//! files. Native hosts drain the engine's cues themselves; the demo binary
//! just logs them.

#[cfg(target_arch = "wasm32")]
pub use web::AudioManager;

#[cfg(target_arch = "wasm32")]
mod web {
    use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

    use crate::events::AudioCue;

    /// Plays [`AudioCue`]s drained from the engine.
    pub struct AudioManager {
        ctx: Option<AudioContext>,
        master_volume: f32,
        muted: bool,
    }

    impl Default for AudioManager {
        fn default() -> Self {
            Self::new()
        }
    }

    impl AudioManager {
        pub fn new() -> Self {
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("failed to create AudioContext - audio disabled");
            }
            Self {
                ctx,
                master_volume: 0.8,
                muted: false,
            }
        }

        /// Resume the context (browsers require a user gesture first).
        pub fn resume(&self) {
            if let Some(ctx) = &self.ctx {
                let _ = ctx.resume();
            }
        }

        pub fn set_master_volume(&mut self, vol: f32) {
            self.master_volume = vol.clamp(0.0, 1.0);
        }

        pub fn set_muted(&mut self, muted: bool) {
            self.muted = muted;
        }

        fn effective_volume(&self) -> f32 {
            if self.muted { 0.0 } else { self.master_volume }
        }

        /// Play one cue.
        pub fn play(&self, cue: AudioCue) {
            let vol = self.effective_volume();
            if vol <= 0.0 {
                return;
            }
            let Some(ctx) = &self.ctx else { return };
            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }

            match cue {
                AudioCue::DetectorPing(tier) => self.play_ping(ctx, vol, tier.ping_hz()),
                AudioCue::ShovelThud => self.play_thud(ctx, vol),
                AudioCue::BrushRustle => self.play_rustle(ctx, vol),
                AudioCue::CrackWarning => self.play_crack(ctx, vol),
                AudioCue::Shatter => self.play_shatter(ctx, vol),
                AudioCue::RevealFanfare => self.play_fanfare(ctx, vol),
            }
        }

        /// Create an oscillator wired through a gain node.
        fn create_osc(
            &self,
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

        /// Detector ping - clean sine, pitch carries the information.
        fn play_ping(&self, ctx: &AudioContext, vol: f32, freq: f32) {
            let Some((osc, gain)) = self.create_osc(ctx, freq, OscillatorType::Sine) else {
                return;
            };
            let t = ctx.current_time();
            gain.gain().set_value_at_time(vol * 0.3, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.1)
                .ok();
            osc.start().ok();
            osc.stop_with_when(t + 0.12).ok();
        }

        /// Shovel thud - low triangle with a falling tail.
        fn play_thud(&self, ctx: &AudioContext, vol: f32) {
            let Some((osc, gain)) = self.create_osc(ctx, 140.0, OscillatorType::Triangle) else {
                return;
            };
            let t = ctx.current_time();
            gain.gain().set_value_at_time(vol * 0.6, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.001, t + 0.12)
                .ok();
            osc.frequency().set_value_at_time(140.0, t).ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(70.0, t + 0.1)
                .ok();
            osc.start().ok();
            osc.stop_with_when(t + 0.13).ok();
        }

        /// Brush rustle - quiet, short, high and breathy.
        fn play_rustle(&self, ctx: &AudioContext, vol: f32) {
            let Some((osc, gain)) = self.create_osc(ctx, 1400.0, OscillatorType::Square) else {
                return;
            };
            let t = ctx.current_time();
            gain.gain().set_value_at_time(vol * 0.05, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.005, t + 0.05)
                .ok();
            osc.frequency().set_value_at_time(1400.0, t).ok();
            osc.frequency().set_value_at_time(900.0, t + 0.02).ok();
            osc.start().ok();
            osc.stop_with_when(t + 0.06).ok();
        }

        /// Crack warning - two harsh descending notes.
        fn play_crack(&self, ctx: &AudioContext, vol: f32) {
            let t = ctx.current_time();
            for (i, freq) in [520.0, 380.0].into_iter().enumerate() {
                let start = t + i as f64 * 0.09;
                if let Some((osc, gain)) = self.create_osc(ctx, freq, OscillatorType::Sawtooth) {
                    gain.gain().set_value_at_time(vol * 0.3, start).ok();
                    gain.gain()
                        .exponential_ramp_to_value_at_time(0.01, start + 0.12)
                        .ok();
                    osc.start_with_when(start).ok();
                    osc.stop_with_when(start + 0.15).ok();
                }
            }
        }

        /// Shatter - saw sweep down with a square crack on top.
        fn play_shatter(&self, ctx: &AudioContext, vol: f32) {
            let t = ctx.current_time();
            if let Some((osc, gain)) = self.create_osc(ctx, 200.0, OscillatorType::Sawtooth) {
                gain.gain().set_value_at_time(vol * 0.5, t).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + 0.45)
                    .ok();
                osc.frequency().set_value_at_time(200.0, t).ok();
                osc.frequency()
                    .exponential_ramp_to_value_at_time(40.0, t + 0.4)
                    .ok();
                osc.start().ok();
                osc.stop_with_when(t + 0.5).ok();
            }
            if let Some((osc, gain)) = self.create_osc(ctx, 2400.0, OscillatorType::Square) {
                gain.gain().set_value_at_time(vol * 0.15, t).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + 0.1)
                    .ok();
                osc.start().ok();
                osc.stop_with_when(t + 0.12).ok();
            }
        }

        /// Reveal fanfare - rising triangle arpeggio.
        fn play_fanfare(&self, ctx: &AudioContext, vol: f32) {
            for (i, freq) in [400.0, 500.0, 600.0, 800.0].into_iter().enumerate() {
                let start = ctx.current_time() + i as f64 * 0.1;
                if let Some((osc, gain)) = self.create_osc(ctx, freq, OscillatorType::Triangle) {
                    gain.gain().set_value_at_time(vol * 0.3, start).ok();
                    gain.gain()
                        .exponential_ramp_to_value_at_time(0.01, start + 0.4)
                        .ok();
                    osc.start_with_when(start).ok();
                    osc.stop_with_when(start + 0.5).ok();
                }
            }
        }
    }
}
