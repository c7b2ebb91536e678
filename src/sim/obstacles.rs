//! Pipe scrolling, retirement and spawning

use rand::Rng;

use super::state::{GameState, Pipe};
use crate::tuning::Tuning;

/// Shift every pipe left and drop the ones fully past the left edge.
///
/// `retain` keeps relative order, so the vector stays front-to-back.
pub fn advance(pipes: &mut Vec<Pipe>, speed: f32, pipe_width: f32) {
    for pipe in pipes.iter_mut() {
        pipe.x -= speed;
    }
    pipes.retain(|p| p.x > -pipe_width);
}

/// Whether a new pipe is due: none on screen, or the rearmost has travelled
/// far enough from the right edge.
pub fn needs_spawn(pipes: &[Pipe], width: f32, spawn_distance: f32) -> bool {
    match pipes.last() {
        None => true,
        Some(rear) => rear.x < width - spawn_distance,
    }
}

/// Draw a gap-top height for a pipe at the given field height.
///
/// `None` when the field is too short to fit the gap.
pub fn random_gap_top<R: Rng>(rng: &mut R, tuning: &Tuning, height: f32) -> Option<f32> {
    let (lo, hi) = tuning.gap_top_range(height)?;
    if hi > lo {
        Some(rng.random_range(lo..hi))
    } else {
        Some(lo)
    }
}

/// Per-tick obstacle update: advance, retire, then spawn at most one pipe
pub fn update(state: &mut GameState) {
    advance(
        &mut state.pipes,
        state.tuning.pipe_speed,
        state.tuning.pipe_width,
    );

    if needs_spawn(
        &state.pipes,
        state.world.width,
        state.tuning.pipe_spawn_distance,
    ) {
        let Some(gap_top) = random_gap_top(&mut state.rng, &state.tuning, state.world.height)
        else {
            log::trace!("Field too short for a gap, no pipe spawned");
            return;
        };
        let id = state.next_entity_id();
        log::debug!("Spawning pipe {} with gap top {:.1}", id, gap_top);
        state.pipes.push(Pipe::new(id, state.world.width, gap_top));
    }
}
