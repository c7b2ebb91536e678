//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (creation order)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod effects;
pub mod obstacles;
pub mod physics;
pub mod state;
pub mod tick;

pub use collision::{Aabb, check_world_bounds, crab_hits_pipe, score_and_collide};
pub use state::{Bubble, Crab, CrashKind, GameEvent, GamePhase, GameState, Pipe, World};
pub use tick::{TickInput, end_session, jump, tick};
