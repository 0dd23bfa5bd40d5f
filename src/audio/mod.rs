//! Sound effects and background music
//!
//! The sim never touches audio. Hosts feed drained `GameEvent`s through
//! `SoundEffect::for_event` and play the resulting procedural cue, so no
//! sample files are needed. The same events drive the looping background
//! track through `MusicCommand::for_event` and `MusicTrack`.

#[cfg(target_arch = "wasm32")]
mod web;
#[cfg(target_arch = "wasm32")]
pub use web::AudioManager;

use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Bird flapped
    Flap,
    /// Pipe passed
    Score,
    /// Hit a pipe, the floor or the ceiling
    Hit,
    /// Session beat the best score
    NewBest,
    /// Pause toggled
    Pause,
}

/// Oscillator shape
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Square,
    Sawtooth,
    Triangle,
}

/// One oscillator note with an exponential pitch and gain decay
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    pub waveform: Waveform,
    /// Offset from the cue start (seconds)
    pub delay: f32,
    pub duration: f32,
    pub freq_start: f32,
    pub freq_end: f32,
    /// Peak gain before volume scaling
    pub gain: f32,
}

impl Tone {
    const fn new(
        waveform: Waveform,
        delay: f32,
        duration: f32,
        freq_start: f32,
        freq_end: f32,
        gain: f32,
    ) -> Self {
        Self {
            waveform,
            delay,
            duration,
            freq_start,
            freq_end,
            gain,
        }
    }
}

const FLAP_CUE: &[Tone] = &[Tone::new(Waveform::Sine, 0.0, 0.09, 280.0, 560.0, 0.4)];

const SCORE_CUE: &[Tone] = &[
    Tone::new(Waveform::Triangle, 0.0, 0.08, 880.0, 880.0, 0.3),
    Tone::new(Waveform::Triangle, 0.07, 0.12, 1320.0, 1320.0, 0.3),
];

// 400 Hz sliding down to 80 Hz, the classic crash
const HIT_CUE: &[Tone] = &[Tone::new(Waveform::Sawtooth, 0.0, 0.5, 400.0, 80.0, 0.15)];

const NEW_BEST_CUE: &[Tone] = &[
    Tone::new(Waveform::Square, 0.55, 0.12, 523.25, 523.25, 0.15),
    Tone::new(Waveform::Square, 0.67, 0.12, 659.25, 659.25, 0.15),
    Tone::new(Waveform::Square, 0.79, 0.12, 783.99, 783.99, 0.15),
    Tone::new(Waveform::Square, 0.91, 0.3, 1046.5, 1046.5, 0.15),
];

const PAUSE_CUE: &[Tone] = &[Tone::new(Waveform::Sine, 0.0, 0.06, 660.0, 440.0, 0.2)];

impl SoundEffect {
    /// The sound a sim event should make, if any
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::Flapped => Some(Self::Flap),
            GameEvent::Scored { .. } => Some(Self::Score),
            GameEvent::Collided { .. } => Some(Self::Hit),
            GameEvent::SessionEnded { new_best: true, .. } => Some(Self::NewBest),
            GameEvent::PauseToggled { .. } => Some(Self::Pause),
            GameEvent::SessionEnded { .. }
            | GameEvent::SessionStarted
            | GameEvent::MuteToggled { .. } => None,
        }
    }

    /// Oscillator recipe for this effect
    pub fn cue(self) -> &'static [Tone] {
        match self {
            Self::Flap => FLAP_CUE,
            Self::Score => SCORE_CUE,
            Self::Hit => HIT_CUE,
            Self::NewBest => NEW_BEST_CUE,
            Self::Pause => PAUSE_CUE,
        }
    }

    /// Total length of the cue in seconds
    pub fn duration(self) -> f32 {
        self.cue()
            .iter()
            .map(|t| t.delay + t.duration)
            .fold(0.0, f32::max)
    }
}

/// What the background track does in response to an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MusicCommand {
    /// Rewind and start looping
    Play,
    /// Halt and rewind
    Stop,
    /// Halt, keeping the position
    Pause,
    /// Continue from the paused position
    Resume,
}

impl MusicCommand {
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::SessionStarted => Some(Self::Play),
            GameEvent::SessionEnded { .. } => Some(Self::Stop),
            GameEvent::PauseToggled { paused: true } => Some(Self::Pause),
            GameEvent::PauseToggled { paused: false } => Some(Self::Resume),
            GameEvent::Flapped
            | GameEvent::Scored { .. }
            | GameEvent::Collided { .. }
            | GameEvent::MuteToggled { .. } => None,
        }
    }
}

/// Length of one bar of the background loop (seconds, 4/4 at 120 bpm)
pub const MUSIC_BAR_SECONDS: f32 = 2.0;

const BEAT: f32 = MUSIC_BAR_SECONDS / 4.0;

const fn bass(beat: f32, freq: f32) -> Tone {
    Tone::new(Waveform::Triangle, beat * BEAT, BEAT * 0.9, freq, freq, 0.35)
}

const fn lead(beat: f32, freq: f32) -> Tone {
    Tone::new(Waveform::Square, beat * BEAT, BEAT * 0.45, freq, freq, 0.06)
}

// C - Am - F - G
const MUSIC_BARS: &[&[Tone]] = &[
    &[
        bass(0.0, 130.81),
        bass(2.0, 130.81),
        lead(0.0, 523.25),
        lead(1.0, 659.25),
        lead(2.0, 783.99),
        lead(3.0, 659.25),
    ],
    &[
        bass(0.0, 110.0),
        bass(2.0, 110.0),
        lead(0.0, 440.0),
        lead(1.0, 523.25),
        lead(2.0, 659.25),
        lead(3.0, 523.25),
    ],
    &[
        bass(0.0, 87.31),
        bass(2.0, 87.31),
        lead(0.0, 349.23),
        lead(1.0, 440.0),
        lead(2.0, 523.25),
        lead(3.0, 440.0),
    ],
    &[
        bass(0.0, 98.0),
        bass(2.0, 98.0),
        lead(0.0, 392.0),
        lead(1.0, 493.88),
        lead(2.0, 587.33),
        lead(2.5, 493.88),
    ],
];

/// Playback state of the background track
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MusicState {
    #[default]
    Stopped,
    Playing,
    Paused,
}

/// Looping bar sequencer; the host schedules whatever `next_bar` hands out
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MusicTrack {
    state: MusicState,
    bar: usize,
}

impl MusicTrack {
    pub fn state(&self) -> MusicState {
        self.state
    }

    pub fn is_playing(&self) -> bool {
        self.state == MusicState::Playing
    }

    /// Index of the next bar to be scheduled
    pub fn position(&self) -> usize {
        self.bar
    }

    /// Apply a command; returns true if the state changed
    pub fn apply(&mut self, command: MusicCommand) -> bool {
        let before = *self;
        match command {
            MusicCommand::Play => {
                self.bar = 0;
                self.state = MusicState::Playing;
            }
            MusicCommand::Stop => {
                self.bar = 0;
                self.state = MusicState::Stopped;
            }
            MusicCommand::Pause if self.state == MusicState::Playing => {
                self.state = MusicState::Paused;
            }
            MusicCommand::Resume if self.state == MusicState::Paused => {
                self.state = MusicState::Playing;
            }
            MusicCommand::Pause | MusicCommand::Resume => {}
        }
        *self != before
    }

    /// Tones of the next bar, wrapping at the end of the loop
    pub fn next_bar(&mut self) -> Option<&'static [Tone]> {
        if !self.is_playing() {
            return None;
        }
        let tones = MUSIC_BARS[self.bar];
        self.bar = (self.bar + 1) % MUSIC_BARS.len();
        Some(tones)
    }
}

/// Sounds for a batch of events, in order
pub fn effects_for(events: &[GameEvent]) -> Vec<SoundEffect> {
    events.iter().filter_map(SoundEffect::for_event).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::TerminalCause;

    #[test]
    fn test_event_mapping() {
        let events = [
            GameEvent::SessionStarted,
            GameEvent::Flapped,
            GameEvent::Scored { score: 1 },
            GameEvent::Collided {
                cause: TerminalCause::Floor,
            },
            GameEvent::SessionEnded {
                score: 1,
                best: 1,
                new_best: true,
            },
        ];
        assert_eq!(
            effects_for(&events),
            vec![
                SoundEffect::Flap,
                SoundEffect::Score,
                SoundEffect::Hit,
                SoundEffect::NewBest
            ]
        );
    }

    #[test]
    fn test_music_follows_session() {
        let events = [
            GameEvent::SessionStarted,
            GameEvent::Flapped,
            GameEvent::PauseToggled { paused: true },
            GameEvent::PauseToggled { paused: false },
            GameEvent::MuteToggled { muted: true },
            GameEvent::Collided {
                cause: TerminalCause::Pipe,
            },
            GameEvent::SessionEnded {
                score: 2,
                best: 5,
                new_best: false,
            },
        ];
        let commands: Vec<_> = events.iter().filter_map(MusicCommand::for_event).collect();
        assert_eq!(
            commands,
            vec![
                MusicCommand::Play,
                MusicCommand::Pause,
                MusicCommand::Resume,
                MusicCommand::Stop
            ]
        );
    }

    #[test]
    fn test_music_loops_and_rewinds() {
        let mut track = MusicTrack::default();
        assert_eq!(track.next_bar(), None);

        assert!(track.apply(MusicCommand::Play));
        for _ in 0..MUSIC_BARS.len() {
            assert!(track.next_bar().is_some());
        }
        // Wrapped back to the first bar
        assert_eq!(track.position(), 0);
        assert_eq!(track.next_bar(), Some(MUSIC_BARS[0]));

        assert!(track.apply(MusicCommand::Pause));
        assert_eq!(track.next_bar(), None);
        assert!(track.apply(MusicCommand::Resume));
        assert_eq!(track.position(), 1);

        assert!(track.apply(MusicCommand::Stop));
        assert_eq!(track.position(), 0);
        // Resume only applies to a paused track
        assert!(!track.apply(MusicCommand::Resume));
        assert_eq!(track.state(), MusicState::Stopped);
    }

    #[test]
    fn test_music_bars_fit_their_slot() {
        for bar in MUSIC_BARS {
            for tone in *bar {
                assert!(tone.delay + tone.duration <= MUSIC_BAR_SECONDS);
            }
        }
    }

    #[test]
    fn test_plain_game_over_has_no_fanfare() {
        let event = GameEvent::SessionEnded {
            score: 0,
            best: 3,
            new_best: false,
        };
        assert_eq!(SoundEffect::for_event(&event), None);
    }

    #[test]
    fn test_new_best_plays_after_hit() {
        assert!(SoundEffect::NewBest.cue()[0].delay >= SoundEffect::Hit.duration());
    }
}
