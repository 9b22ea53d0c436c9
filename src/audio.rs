//! Audio system using Web Audio API
//!
//! Procedurally generated sound effects - no external files needed!
//! Each effect is a short sequence of enveloped oscillator tones.

use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// New run started
    Start,
    /// Food eaten
    Eat,
    /// Pause or resume
    Pause,
    /// Settings cursor moved or value changed
    Cursor,
    /// Run ended
    GameOver,
    /// Run ended with a new record
    HighScore,
}

impl SoundEffect {
    /// Effects to play for a simulation event
    pub fn for_event(event: &GameEvent) -> &'static [SoundEffect] {
        match event {
            GameEvent::Started => &[SoundEffect::Start],
            GameEvent::FoodEaten { .. } => &[SoundEffect::Eat],
            GameEvent::Paused | GameEvent::Resumed => &[SoundEffect::Pause],
            GameEvent::CursorMoved => &[SoundEffect::Cursor],
            GameEvent::GameOver {
                new_high_score: true,
                ..
            } => &[SoundEffect::GameOver, SoundEffect::HighScore],
            GameEvent::GameOver { .. } => &[SoundEffect::GameOver],
            GameEvent::SettingsChanged => &[],
        }
    }

    fn tones(self) -> &'static [Tone] {
        match self {
            SoundEffect::Start => &START,
            SoundEffect::Eat => &EAT,
            SoundEffect::Pause => &PAUSE,
            SoundEffect::Cursor => &CURSOR,
            SoundEffect::GameOver => &GAME_OVER,
            SoundEffect::HighScore => &HIGH_SCORE,
        }
    }
}

/// One enveloped oscillator note
#[derive(Debug, Clone, Copy)]
struct Tone {
    freq: f32,
    /// Frequency at the end of the note, for sweeps
    end_freq: Option<f32>,
    wave: Wave,
    /// Start offset (seconds)
    delay: f64,
    /// Decay length (seconds)
    length: f64,
    gain: f32,
}

/// `OscillatorType` isn't usable in consts
#[derive(Debug, Clone, Copy)]
enum Wave {
    Sine,
    Triangle,
    Square,
}

impl Wave {
    fn osc_type(self) -> OscillatorType {
        match self {
            Wave::Sine => OscillatorType::Sine,
            Wave::Triangle => OscillatorType::Triangle,
            Wave::Square => OscillatorType::Square,
        }
    }
}

const fn note(freq: f32, wave: Wave, delay: f64, length: f64, gain: f32) -> Tone {
    Tone {
        freq,
        end_freq: None,
        wave,
        delay,
        length,
        gain,
    }
}

const fn sweep(freq: f32, end_freq: f32, wave: Wave, length: f64, gain: f32) -> Tone {
    Tone {
        freq,
        end_freq: Some(end_freq),
        wave,
        delay: 0.0,
        length,
        gain,
    }
}

const START: [Tone; 3] = [
    note(400.0, Wave::Triangle, 0.0, 0.12, 0.3),
    note(500.0, Wave::Triangle, 0.08, 0.12, 0.3),
    note(700.0, Wave::Triangle, 0.16, 0.2, 0.3),
];
const EAT: [Tone; 1] = [sweep(500.0, 900.0, Wave::Sine, 0.1, 0.35)];
const PAUSE: [Tone; 1] = [note(350.0, Wave::Sine, 0.0, 0.1, 0.25)];
const CURSOR: [Tone; 1] = [note(800.0, Wave::Square, 0.0, 0.04, 0.08)];
const GAME_OVER: [Tone; 4] = [
    note(400.0, Wave::Sine, 0.0, 0.3, 0.3),
    note(350.0, Wave::Sine, 0.2, 0.3, 0.3),
    note(300.0, Wave::Sine, 0.4, 0.3, 0.3),
    note(200.0, Wave::Sine, 0.6, 0.3, 0.3),
];
const HIGH_SCORE: [Tone; 5] = [
    note(500.0, Wave::Triangle, 0.9, 0.25, 0.25),
    note(600.0, Wave::Triangle, 0.98, 0.25, 0.25),
    note(700.0, Wave::Triangle, 1.06, 0.25, 0.25),
    note(800.0, Wave::Triangle, 1.14, 0.25, 0.25),
    note(1000.0, Wave::Triangle, 1.22, 0.25, 0.25),
];

/// Audio manager for the game
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
        // May fail outside a secure context
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - audio disabled");
        }
        Self {
            ctx,
            master_volume: 0.8,
            muted: false,
        }
    }

    /// Resume audio context (required after user gesture)
    pub fn resume(&self) {
        if let Some(ctx) = &self.ctx {
            let _ = ctx.resume();
        }
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn effective_volume(&self) -> f32 {
        if self.muted { 0.0 } else { self.master_volume }
    }

    /// Play every effect tied to a simulation event
    pub fn play_event(&self, event: &GameEvent) {
        for effect in SoundEffect::for_event(event) {
            self.play(*effect);
        }
    }

    /// Play a sound effect
    pub fn play(&self, effect: SoundEffect) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }

        let Some(ctx) = &self.ctx else { return };

        // Browsers keep the context suspended until a user gesture
        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }

        for tone in effect.tones() {
            self.play_tone(ctx, tone, vol);
        }
    }

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

    fn play_tone(&self, ctx: &AudioContext, tone: &Tone, vol: f32) {
        let Some((osc, gain)) = self.create_osc(ctx, tone.freq, tone.wave.osc_type()) else {
            return;
        };
        let t = ctx.current_time() + tone.delay;

        gain.gain().set_value_at_time(vol * tone.gain, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + tone.length)
            .ok();
        if let Some(end) = tone.end_freq {
            osc.frequency().set_value_at_time(tone.freq, t).ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(end, t + tone.length)
                .ok();
        }

        osc.start_with_when(t).ok();
        osc.stop_with_when(t + tone.length + 0.05).ok();
    }
}
