//! Cosmetic bubbles
//!
//! Bubbles draw from `fx_rng` only, so turning them off or changing how many
//! are spawned never shifts the pipe layout for a seed.

use glam::Vec2;
use rand::Rng;

use super::state::{Bubble, GameState};
use crate::consts::{BUBBLE_FADE, JUMP_BUBBLES};

/// Burst of bubbles from the crab on each flap
pub fn spawn_jump_bubbles(state: &mut GameState) {
    let origin = Vec2::new(state.crab_x(), state.crab.y);
    for _ in 0..JUMP_BUBBLES {
        let id = state.next_entity_id();
        let rng = &mut state.fx_rng;
        let bubble = Bubble {
            id,
            pos: origin + Vec2::new(rng.random::<f32>() * 30.0, rng.random::<f32>() * 30.0),
            size: 5.0 + rng.random::<f32>() * 10.0,
            speed: 1.0 + rng.random::<f32>() * 2.0,
            opacity: 0.3 + rng.random::<f32>() * 0.4,
        };
        state.bubbles.push(bubble);
    }
}

/// One bubble rising from the bottom of the field
pub fn spawn_ambient_bubble(state: &mut GameState) {
    let id = state.next_entity_id();
    let (width, height) = (state.world.width, state.world.height);
    let rng = &mut state.fx_rng;
    let bubble = Bubble {
        id,
        pos: Vec2::new(rng.random::<f32>() * width, height),
        size: 3.0 + rng.random::<f32>() * 8.0,
        speed: 0.5 + rng.random::<f32>() * 1.5,
        opacity: 0.2 + rng.random::<f32>() * 0.3,
    };
    state.bubbles.push(bubble);
}

/// Rise and fade; drop bubbles that are invisible or off the top
pub fn update_bubbles(bubbles: &mut Vec<Bubble>) {
    for bubble in bubbles.iter_mut() {
        bubble.pos.y -= bubble.speed;
        bubble.opacity -= BUBBLE_FADE;
    }
    bubbles.retain(|b| b.opacity > 0.0 && b.pos.y > 0.0);
}
