//! Circle vs. pipe collision
//!
//! Each pipe is two axis-aligned rectangles: ceiling down to the gap, and
//! gap bottom down to the floor. Their horizontal edges are pulled in by
//! `collision_inset` so grazing a pipe corner is forgiven.

use glam::Vec2;

use super::state::{Bird, Pipe};
use crate::tuning::Tuning;

/// Axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Closest point inside the rectangle to `point`
    #[inline]
    pub fn closest_point(&self, point: Vec2) -> Vec2 {
        point.clamp(self.min, self.max)
    }
}

/// Check if a circle overlaps a rectangle
///
/// Touching exactly at the radius is not an overlap.
#[inline]
pub fn circle_rect_overlap(center: Vec2, radius: f32, rect: &Aabb) -> bool {
    let nearest = rect.closest_point(center);
    center.distance_squared(nearest) < radius * radius
}

/// Solid regions of a pipe: (top, bottom)
pub fn pipe_hitboxes(pipe: &Pipe, tuning: &Tuning) -> (Aabb, Aabb) {
    let left = pipe.x + tuning.collision_inset;
    let right = pipe.trailing_edge(tuning.pipe_width) - tuning.collision_inset;
    let top = Aabb::new(Vec2::new(left, 0.0), Vec2::new(right, pipe.gap_top));
    let bottom = Aabb::new(
        Vec2::new(left, pipe.gap_bottom()),
        Vec2::new(right, tuning.playfield_height),
    );
    (top, bottom)
}

/// Check the bird against one pipe
pub fn bird_hits_pipe(bird: &Bird, pipe: &Pipe, tuning: &Tuning) -> bool {
    let (top, bottom) = pipe_hitboxes(pipe, tuning);
    circle_rect_overlap(bird.pos, bird.radius, &top)
        || circle_rect_overlap(bird.pos, bird.radius, &bottom)
}

/// Check the bird against every live pipe
pub fn bird_hits_any<'a>(
    bird: &Bird,
    mut pipes: impl Iterator<Item = &'a Pipe>,
    tuning: &Tuning,
) -> bool {
    pipes.any(|pipe| bird_hits_pipe(bird, pipe, tuning))
}
