//! Audio system using Web Audio API
//!
//! Procedurally generated sound effects and music - no external files needed!

use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Heart collected
    Collect,
    /// Hidden message revealed
    Secret,
    /// Run ended
    GameOver,
}

/// The sustained background pad, held so it can be faded out later
struct MusicHandle {
    oscs: Vec<OscillatorNode>,
    gain: GainNode,
}

/// Audio manager for the game
pub struct AudioManager {
    ctx: Option<AudioContext>,
    music: Option<MusicHandle>,
    master_volume: f32,
    sfx_volume: f32,
    music_volume: f32,
    muted: bool,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioManager {
    pub fn new() -> Self {
        // Try to create audio context (may fail if not in secure context)
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - audio disabled");
        }
        Self {
            ctx,
            music: None,
            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.7,
            muted: false,
        }
    }

    /// Resume audio context (required after user gesture)
    pub fn resume(&self) {
        if let Some(ctx) = &self.ctx {
            let _ = ctx.resume();
        }
    }

    /// Suspend audio context (pause everything in flight)
    pub fn suspend(&self) {
        if let Some(ctx) = &self.ctx {
            let _ = ctx.suspend();
        }
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
        self.sync_music_gain();
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Set music volume (0.0 - 1.0)
    pub fn set_music_volume(&mut self, vol: f32) {
        self.music_volume = vol.clamp(0.0, 1.0);
        self.sync_music_gain();
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
        self.sync_music_gain();
    }

    pub fn muted(&self) -> bool {
        self.muted
    }

    /// Get effective SFX volume
    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Get effective music volume
    fn effective_music_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.music_volume
        }
    }

    /// Push the current effective music volume onto a running pad
    fn sync_music_gain(&self) {
        if let Some(handle) = &self.music {
            handle.gain.gain().set_value(self.effective_music_volume());
        }
    }

    /// React to a simulation event
    pub fn on_event(&mut self, event: &GameEvent) {
        match event {
            GameEvent::Started => {
                self.resume();
                self.start_music();
            }
            GameEvent::Paused => self.suspend(),
            GameEvent::Resumed => self.resume(),
            GameEvent::HeartCollected { .. } => self.play(SoundEffect::Collect),
            GameEvent::NewBest { .. } => {}
            GameEvent::SecretRevealed => self.play(SoundEffect::Secret),
            GameEvent::RunEnded { .. } => {
                self.stop_music();
                self.play(SoundEffect::GameOver);
            }
        }
    }

    /// Play a sound effect
    pub fn play(&self, effect: SoundEffect) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }

        let Some(ctx) = &self.ctx else { return };

        // Resume context if suspended (browsers require user gesture)
        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }

        match effect {
            SoundEffect::Collect => self.play_collect(ctx, vol),
            SoundEffect::Secret => self.play_secret(ctx, vol),
            SoundEffect::GameOver => self.play_game_over(ctx, vol),
        }
    }

    // === Sound generators ===

    /// Create an oscillator with gain envelope
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

    /// Heart collect - bright ascending chime
    fn play_collect(&self, ctx: &AudioContext, vol: f32) {
        for (i, freq) in [660.0, 880.0, 1100.0].iter().enumerate() {
            let delay = i as f64 * 0.08;
            if let Some((osc, gain)) = self.create_osc(ctx, *freq, OscillatorType::Sine) {
                let t = ctx.current_time() + delay;
                gain.gain().set_value_at_time(vol * 0.25, t).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + 0.15)
                    .ok();
                osc.start_with_when(t).ok();
                osc.stop_with_when(t + 0.2).ok();
            }
        }
    }

    /// Hidden message reveal - little fanfare up a major chord
    fn play_secret(&self, ctx: &AudioContext, vol: f32) {
        for (i, freq) in [523.25, 659.25, 783.99, 1046.5, 1318.51].iter().enumerate() {
            let delay = i as f64 * 0.09;
            if let Some((osc, gain)) = self.create_osc(ctx, *freq, OscillatorType::Triangle) {
                let t = ctx.current_time() + delay;
                gain.gain().set_value_at_time(vol * 0.25, t).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + 0.35)
                    .ok();
                osc.start_with_when(t).ok();
                osc.stop_with_when(t + 0.4).ok();
            }
        }
    }

    /// Game over - sad descending
    fn play_game_over(&self, ctx: &AudioContext, vol: f32) {
        for (i, freq) in [400.0, 350.0, 300.0, 200.0].iter().enumerate() {
            let delay = i as f64 * 0.2;
            if let Some((osc, gain)) = self.create_osc(ctx, *freq, OscillatorType::Sine) {
                let t = ctx.current_time() + delay;
                gain.gain().set_value_at_time(vol * 0.3, t).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + 0.3)
                    .ok();
                osc.start_with_when(t).ok();
                osc.stop_with_when(t + 0.4).ok();
            }
        }
    }

    // === Background music ===

    /// Start the ambient pad: a soft detuned A minor drone that swells in
    /// over a couple of seconds. No-op if it is already sounding.
    fn start_music(&mut self) {
        if self.music.is_some() {
            return;
        }
        let Some(ctx) = &self.ctx else { return };

        let Ok(gain) = ctx.create_gain() else { return };
        if gain.connect_with_audio_node(&ctx.destination()).is_err() {
            return;
        }

        let t = ctx.current_time();
        gain.gain().set_value_at_time(0.0001, t).ok();
        gain.gain()
            .linear_ramp_to_value_at_time(self.effective_music_volume(), t + 2.0)
            .ok();

        let mut oscs = Vec::new();
        let voices = [
            (110.0, OscillatorType::Sine),
            (164.81, OscillatorType::Sine),
            (220.7, OscillatorType::Triangle), // slightly sharp for slow beating
        ];
        for (freq, osc_type) in voices {
            let Ok(osc) = ctx.create_oscillator() else {
                continue;
            };
            osc.set_type(osc_type);
            osc.frequency().set_value(freq);
            if osc.connect_with_audio_node(&gain).is_err() {
                continue;
            }
            osc.start().ok();
            oscs.push(osc);
        }

        if oscs.is_empty() {
            return;
        }
        self.music = Some(MusicHandle { oscs, gain });
    }

    /// Fade the pad out and drop it
    fn stop_music(&mut self) {
        let Some(handle) = self.music.take() else {
            return;
        };
        let Some(ctx) = &self.ctx else { return };

        let t = ctx.current_time();
        handle
            .gain
            .gain()
            .set_value_at_time(self.effective_music_volume().max(0.0001), t)
            .ok();
        handle
            .gain
            .gain()
            .exponential_ramp_to_value_at_time(0.0001, t + 0.8)
            .ok();
        for osc in &handle.oscs {
            osc.stop_with_when(t + 0.9).ok();
        }
    }
}
