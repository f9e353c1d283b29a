//! Audio system using Web Audio API
//!
//! Procedurally generated sound effects - no external files needed!
//! Off the web the manager keeps its volume state but never makes a sound.

#[cfg(target_arch = "wasm32")]
use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Player left the ground
    Jump,
    /// Player touched a coin
    Coin,
    /// Puzzle answered correctly
    PointEarned,
    /// Puzzle answered wrong
    PointLost,
}

impl SoundEffect {
    /// Sound for a simulation event, if it has one
    pub fn from_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::Jump => Some(SoundEffect::Jump),
            GameEvent::CoinPickup => Some(SoundEffect::Coin),
            GameEvent::PointEarned => Some(SoundEffect::PointEarned),
            GameEvent::PointLost => Some(SoundEffect::PointLost),
            GameEvent::PuzzleOpened(_) | GameEvent::GameOver { .. } => None,
        }
    }
}

/// Audio manager for the game
pub struct AudioManager {
    #[cfg(target_arch = "wasm32")]
    ctx: Option<AudioContext>,
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioManager {
    #[cfg(target_arch = "wasm32")]
    pub fn new() -> Self {
        // Try to create audio context (may fail if not in secure context)
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - audio disabled");
        }
        Self {
            ctx,
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn new() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }

    /// Resume audio context (required after user gesture)
    pub fn resume(&self) {
        #[cfg(target_arch = "wasm32")]
        if let Some(ctx) = &self.ctx {
            let _ = ctx.resume();
        }
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Get effective volume
    pub fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Play whatever sounds a batch of drained events calls for
    pub fn play_events(&self, events: &[GameEvent]) {
        for effect in events.iter().filter_map(SoundEffect::from_event) {
            self.play(effect);
        }
    }

    /// Play a sound effect
    #[cfg(not(target_arch = "wasm32"))]
    pub fn play(&self, effect: SoundEffect) {
        log::trace!("sfx {:?} at volume {:.2}", effect, self.effective_volume());
    }

    /// Play a sound effect
    #[cfg(target_arch = "wasm32")]
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
            SoundEffect::Jump => self.play_jump(ctx, vol),
            SoundEffect::Coin => self.play_coin(ctx, vol),
            SoundEffect::PointEarned => self.play_point_earned(ctx, vol),
            SoundEffect::PointLost => self.play_point_lost(ctx, vol),
        }
    }
}

// === Sound generators ===
#[cfg(target_arch = "wasm32")]
impl AudioManager {
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

    /// Jump - quick upward chirp
    fn play_jump(&self, ctx: &AudioContext, vol: f32) {
        let Some((osc, gain)) = self.create_osc(ctx, 200.0, OscillatorType::Sine) else {
            return;
        };
        let t = ctx.current_time();

        osc.frequency().set_value_at_time(200.0, t).ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(600.0, t + 0.1)
            .ok();
        gain.gain().set_value_at_time(vol * 0.3, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.15)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.15).ok();
    }

    /// Coin - two-note ding
    fn play_coin(&self, ctx: &AudioContext, vol: f32) {
        let Some((osc, gain)) = self.create_osc(ctx, 880.0, OscillatorType::Sine) else {
            return;
        };
        let t = ctx.current_time();

        osc.frequency().set_value_at_time(880.0, t).ok();
        osc.frequency().set_value_at_time(1108.0, t + 0.05).ok();
        gain.gain().set_value_at_time(vol * 0.2, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.15)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.15).ok();
    }

    /// Correct answer - rising C major arpeggio
    fn play_point_earned(&self, ctx: &AudioContext, vol: f32) {
        let Some((osc, gain)) = self.create_osc(ctx, 523.0, OscillatorType::Sine) else {
            return;
        };
        let t = ctx.current_time();

        for (i, freq) in [523.0, 659.0, 784.0].into_iter().enumerate() {
            osc.frequency()
                .set_value_at_time(freq, t + i as f64 * 0.1)
                .ok();
        }
        gain.gain().set_value_at_time(vol * 0.3, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.4)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.4).ok();
    }

    /// Wrong answer - falling buzz
    fn play_point_lost(&self, ctx: &AudioContext, vol: f32) {
        let Some((osc, gain)) = self.create_osc(ctx, 400.0, OscillatorType::Sawtooth) else {
            return;
        };
        let t = ctx.current_time();

        osc.frequency().set_value_at_time(400.0, t).ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(100.0, t + 0.3)
            .ok();
        gain.gain().set_value_at_time(vol * 0.2, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.35)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.35).ok();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::PuzzleKind;

    #[test]
    fn test_event_mapping() {
        assert_eq!(SoundEffect::from_event(&GameEvent::Jump), Some(SoundEffect::Jump));
        assert_eq!(
            SoundEffect::from_event(&GameEvent::CoinPickup),
            Some(SoundEffect::Coin)
        );
        assert_eq!(
            SoundEffect::from_event(&GameEvent::PointLost),
            Some(SoundEffect::PointLost)
        );
        assert_eq!(
            SoundEffect::from_event(&GameEvent::PuzzleOpened(PuzzleKind::Coin)),
            None
        );
        assert_eq!(
            SoundEffect::from_event(&GameEvent::GameOver { victory: true }),
            None
        );
    }

    #[test]
    fn test_volume_controls() {
        let mut audio = AudioManager::new();
        audio.set_master_volume(1.5);
        audio.set_sfx_volume(0.5);
        assert_eq!(audio.effective_volume(), 0.5);
        audio.set_muted(true);
        assert_eq!(audio.effective_volume(), 0.0);
        // Silent playback is a no-op, never a panic
        audio.play_events(&[GameEvent::Jump, GameEvent::PointEarned]);
    }
}
