//! Pipe generation, scrolling and retirement
//!
//! Pipes live in a queue ordered oldest (leftmost) first. Spawning is
//! distance based: a new pipe appears once the newest one has scrolled
//! `pipe_spacing` pixels in from the right edge, so faster scrolling never
//! packs pipes closer together.

use std::collections::VecDeque;

use rand::Rng;

use super::state::Pipe;
use crate::tuning::Tuning;

/// Build a pipe at the right edge with a uniformly random gap position
pub fn generate<R: Rng>(rng: &mut R, tuning: &Tuning, gap_height: f32) -> Pipe {
    let min_top = tuning.gap_margin;
    let max_top = tuning.playfield_height - gap_height - tuning.gap_margin;
    debug_assert!(
        min_top <= max_top,
        "gap {gap_height} leaves no valid range in a {}px playfield",
        tuning.playfield_height
    );

    Pipe {
        x: tuning.playfield_width,
        gap_top: rng.random_range(min_top..=max_top),
        gap_height,
        passed: false,
    }
}

/// The live pipes, oldest first
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PipeField {
    pipes: VecDeque<Pipe>,
}

impl PipeField {
    pub fn iter(&self) -> impl Iterator<Item = &Pipe> {
        self.pipes.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Pipe> {
        self.pipes.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.pipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pipes.is_empty()
    }

    pub fn clear(&mut self) {
        self.pipes.clear();
    }

    pub fn push(&mut self, pipe: Pipe) {
        self.pipes.push_back(pipe);
    }

    /// Most recently created pipe
    pub fn newest(&self) -> Option<&Pipe> {
        self.pipes.back()
    }

    /// Scroll every pipe left by `speed` pixels
    pub fn advance(&mut self, speed: f32) {
        for pipe in &mut self.pipes {
            pipe.x -= speed;
        }
    }

    /// Drop the oldest pipe if it has fully left the playfield
    ///
    /// Pipes are evenly spaced and move together, so at most one can leave
    /// per tick.
    pub fn retire(&mut self, pipe_width: f32) -> Option<Pipe> {
        if self
            .pipes
            .front()
            .is_some_and(|p| p.trailing_edge(pipe_width) < 0.0)
        {
            return self.pipes.pop_front();
        }
        None
    }

    /// Whether the spacing policy wants a new pipe now
    pub fn wants_spawn(&self, tuning: &Tuning) -> bool {
        match self.newest() {
            None => true,
            Some(newest) => tuning.playfield_width - newest.x >= tuning.pipe_spacing,
        }
    }
}
