//! Web Audio playback of procedural cues and the background loop

use web_sys::{AudioContext, AudioNode, GainNode, OscillatorNode, OscillatorType};

use super::{MUSIC_BAR_SECONDS, MusicCommand, MusicTrack, SoundEffect, Tone, Waveform};
use crate::settings::Settings;

/// How far ahead of the audio clock music bars are scheduled (seconds)
const MUSIC_LOOKAHEAD: f64 = 0.5;

/// Audio manager for the game
pub struct AudioManager {
    ctx: Option<AudioContext>,
    volume: f32,
    music_volume: f32,
    music: MusicTrack,
    /// Every scheduled music note routes through this; dropping it silences
    /// notes that were queued ahead
    music_bus: Option<GainNode>,
    /// Audio-clock time the next bar starts at
    music_next: f64,
}

impl AudioManager {
    pub fn new(settings: &Settings) -> Self {
        // Try to create audio context (may fail if not in secure context)
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - audio disabled");
        }
        Self {
            ctx,
            volume: settings.effective_sfx_volume(),
            music_volume: settings.effective_music_volume(),
            music: MusicTrack::default(),
            music_bus: None,
            music_next: 0.0,
        }
    }

    /// Pick up volume or mute changes
    pub fn apply_settings(&mut self, settings: &Settings) {
        self.volume = settings.effective_sfx_volume();
        self.music_volume = settings.effective_music_volume();
        if let Some(bus) = &self.music_bus {
            bus.gain().set_value(self.music_volume);
        }
    }

    /// Play a sound effect
    pub fn play(&self, effect: SoundEffect) {
        if self.volume <= 0.0 {
            return;
        }
        let Some(ctx) = &self.ctx else { return };
        Self::wake(ctx);

        let start = ctx.current_time();
        for tone in effect.cue() {
            self.play_tone(ctx, &ctx.destination(), tone, start, self.volume);
        }
    }

    /// Start, stop, pause or resume the background loop
    pub fn music(&mut self, command: MusicCommand) {
        if !self.music.apply(command) {
            return;
        }
        log::debug!("Music {:?}", self.music.state());
        self.release_bus();

        let Some(ctx) = &self.ctx else { return };
        if !self.music.is_playing() {
            return;
        }
        Self::wake(ctx);
        let Ok(bus) = ctx.create_gain() else { return };
        bus.gain().set_value(self.music_volume);
        if bus.connect_with_audio_node(&ctx.destination()).is_err() {
            return;
        }
        self.music_bus = Some(bus);
        self.music_next = ctx.current_time() + 0.05;
        self.schedule_music();
    }

    /// Queue music bars that fall inside the lookahead window; call every frame
    pub fn schedule_music(&mut self) {
        let (Some(ctx), Some(bus)) = (&self.ctx, &self.music_bus) else {
            return;
        };
        // A suspended or throttled context must not queue a backlog
        let now = ctx.current_time();
        if self.music_next < now {
            self.music_next = now;
        }
        while self.music_next < now + MUSIC_LOOKAHEAD {
            let Some(bar) = self.music.next_bar() else { return };
            for tone in bar {
                self.play_tone(ctx, bus, tone, self.music_next, 1.0);
            }
            self.music_next += MUSIC_BAR_SECONDS as f64;
        }
    }

    fn release_bus(&mut self) {
        if let Some(bus) = self.music_bus.take() {
            bus.gain().set_value(0.0);
            bus.disconnect().ok();
        }
    }

    /// Resume context if suspended (browsers require user gesture)
    fn wake(ctx: &AudioContext) {
        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }
    }

    /// Create an oscillator with gain envelope
    fn create_osc(
        &self,
        ctx: &AudioContext,
        out: &AudioNode,
        freq: f32,
        osc_type: OscillatorType,
    ) -> Option<(OscillatorNode, GainNode)> {
        let osc = ctx.create_oscillator().ok()?;
        let gain = ctx.create_gain().ok()?;

        osc.set_type(osc_type);
        osc.frequency().set_value(freq);
        osc.connect_with_audio_node(&gain).ok()?;
        gain.connect_with_audio_node(out).ok()?;

        Some((osc, gain))
    }

    fn play_tone(&self, ctx: &AudioContext, out: &AudioNode, tone: &Tone, at: f64, volume: f32) {
        let osc_type = match tone.waveform {
            Waveform::Sine => OscillatorType::Sine,
            Waveform::Square => OscillatorType::Square,
            Waveform::Sawtooth => OscillatorType::Sawtooth,
            Waveform::Triangle => OscillatorType::Triangle,
        };
        let Some((osc, gain)) = self.create_osc(ctx, out, tone.freq_start, osc_type) else {
            return;
        };
        let start = at + tone.delay as f64;
        let end = start + tone.duration as f64;

        gain.gain().set_value_at_time(volume * tone.gain, start).ok();
        gain.gain().exponential_ramp_to_value_at_time(0.01, end).ok();
        osc.frequency().set_value_at_time(tone.freq_start, start).ok();
        if tone.freq_end != tone.freq_start {
            osc.frequency()
                .exponential_ramp_to_value_at_time(tone.freq_end, end)
                .ok();
        }

        osc.start_with_when(start).ok();
        osc.stop_with_when(end + 0.02).ok();
    }
}
