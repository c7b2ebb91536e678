//! Idle/demo mode - the game plays itself
//!
//! Steers toward the centre of the next gap by flapping only while falling
//! below it. Good enough for an attract screen, not a perfect player.

use super::state::{GamePhase, GameState};

/// How far below the gap centre the crab may sink before flapping
const DEADBAND: f32 = 12.0;
/// Flap early when this close to the floor line
const FLOOR_MARGIN: f32 = 4.0;

/// Target y for the crab's centre
pub fn target_y(state: &GameState) -> f32 {
    let crab_left = state.crab_x();
    let tuning = &state.tuning;

    // First pipe whose right edge is still ahead of the crab
    state
        .pipes
        .iter()
        .find(|p| p.x + tuning.pipe_width > crab_left)
        .map(|p| p.gap_top + tuning.pipe_gap / 2.0)
        .unwrap_or_else(|| state.floor_y() / 2.0)
}

/// Whether the autopilot would press jump this tick
pub fn wants_jump(state: &GameState) -> bool {
    match state.phase {
        // Auto-start from the title screen
        GamePhase::Idle => true,
        GamePhase::Ended => false,
        GamePhase::Running => {
            let size = state.tuning.crab_size;
            let centre = state.crab.y + size / 2.0;
            let falling = state.crab.vel >= 0.0;
            let near_floor =
                state.crab.y + size + state.crab.vel > state.floor_y() - FLOOR_MARGIN;

            falling && (centre > target_y(state) + DEADBAND || near_floor)
        }
    }
}
