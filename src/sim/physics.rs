//! Vertical motion of the crab
//!
//! Semi-implicit Euler in per-tick units: the position moves by the
//! pre-tick velocity, then gravity is added. Jumping replaces the velocity.

use super::state::Crab;

/// Advance the crab by one tick
pub fn integrate(crab: &mut Crab, gravity: f32) {
    crab.y += crab.vel;
    crab.vel += gravity;
}

/// Overwrite velocity with the jump impulse
pub fn apply_jump(crab: &mut Crab, jump_velocity: f32) {
    crab.vel = jump_velocity;
}
