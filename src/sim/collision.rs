//! Collision detection and scoring
//!
//! Everything is an axis-aligned box. A pipe's solid span is its drawn coral
//! body, inset from the pipe's full width; the wider rounded caps at the gap
//! are decoration and never collide.

use glam::Vec2;

use super::state::{CrashKind, GameEvent, GameState, Pipe};
use crate::tuning::Tuning;

/// Axis-aligned bounding box (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn from_pos_size(pos: Vec2, size: Vec2) -> Self {
        Self {
            min: pos,
            max: pos + size,
        }
    }

    pub fn left(&self) -> f32 {
        self.min.x
    }

    pub fn right(&self) -> f32 {
        self.max.x
    }

    pub fn top(&self) -> f32 {
        self.min.y
    }

    pub fn bottom(&self) -> f32 {
        self.max.y
    }

    /// Strict horizontal overlap with `[left, right]`
    pub fn overlaps_x(&self, left: f32, right: f32) -> bool {
        self.right() > left && self.left() < right
    }

    /// Vertical extent lies inside `[top, bottom]` (touching is inside)
    pub fn within_y(&self, top: f32, bottom: f32) -> bool {
        self.top() >= top && self.bottom() <= bottom
    }
}

/// The crab's current hitbox
pub fn crab_box(state: &GameState) -> Aabb {
    let size = state.tuning.crab_size;
    Aabb::from_pos_size(Vec2::new(state.crab_x(), state.crab.y), Vec2::splat(size))
}

/// Horizontal collision span of a pipe, inset on both sides
pub fn pipe_span(pipe: &Pipe, tuning: &Tuning) -> (f32, f32) {
    (
        pipe.x + tuning.pipe_hitbox_inset,
        pipe.x + tuning.pipe_width - tuning.pipe_hitbox_inset,
    )
}

/// Ceiling/floor test. Positions are never clamped; leaving the field ends the run.
pub fn check_world_bounds(crab: &Aabb, floor_y: f32) -> Option<CrashKind> {
    if crab.top() < 0.0 {
        Some(CrashKind::Ceiling)
    } else if crab.bottom() > floor_y {
        Some(CrashKind::Floor)
    } else {
        None
    }
}

/// Whether the crab overlaps a pipe's solid segments
pub fn crab_hits_pipe(crab: &Aabb, pipe: &Pipe, tuning: &Tuning) -> bool {
    let (left, right) = pipe_span(pipe, tuning);
    crab.overlaps_x(left, right) && !crab.within_y(pipe.gap_top, pipe.gap_bottom(tuning.pipe_gap))
}

/// Score passed pipes and look for a crash, front to back.
///
/// A pipe scores once, on the tick its inset left edge moves behind the
/// crab's left edge. Returns the first crash found; pipes after it are not
/// examined.
pub fn score_and_collide(state: &mut GameState) -> Option<CrashKind> {
    let crab = crab_box(state);

    if let Some(kind) = check_world_bounds(&crab, state.floor_y()) {
        return Some(kind);
    }

    let tuning = state.tuning;
    for pipe in state.pipes.iter_mut() {
        let (pipe_left, _) = pipe_span(pipe, &tuning);
        if !pipe.passed && pipe_left < crab.left() {
            pipe.passed = true;
            state.score += 1;
            state.events.push(GameEvent::Scored { score: state.score });
        }

        if crab_hits_pipe(&crab, pipe, &tuning) {
            return Some(CrashKind::Pipe { id: pipe.id });
        }
    }

    None
}
