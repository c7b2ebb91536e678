//! Flappy Crab - a one-button underwater arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, obstacles, collisions, session)
//! - `renderer`: WebGPU rendering pipeline
//! - `platform`: Fixed-step clock and input mapping
//! - `persistence`: Key-value storage backends
//! - `highscores`: Best score port on top of persistence
//! - `tuning`: Data-driven game balance

pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use highscores::{BEST_SCORE_KEY, ScoreStore, StoredBestScore};
pub use settings::{QualityPreset, Settings};
pub use tuning::Tuning;

/// Game configuration constants
///
/// Distances are in world units (CSS pixels of the play field), velocities
/// in units per tick. The simulation never scales by wall-clock time.
pub mod consts {
    /// Fixed simulation rate
    pub const SIM_HZ: u32 = 60;
    /// Fixed simulation timestep in seconds
    pub const SIM_DT: f32 = 1.0 / SIM_HZ as f32;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Default play field size (2:3 portrait)
    pub const DEFAULT_WIDTH: f32 = 400.0;
    pub const DEFAULT_HEIGHT: f32 = 600.0;

    /// Downward acceleration added to velocity every tick
    pub const GRAVITY: f32 = 0.35;
    /// Velocity set (not added) on jump; negative is up
    pub const JUMP_VELOCITY: f32 = -7.0;

    /// Crab bounding box is a square of this side
    pub const CRAB_SIZE: f32 = 50.0;
    /// Crab left edge as a fraction of play field width
    pub const CRAB_X_FRACTION: f32 = 0.2;

    /// Pipe (coral column) width
    pub const PIPE_WIDTH: f32 = 80.0;
    /// Vertical opening between top and bottom segments
    pub const PIPE_GAP: f32 = 180.0;
    /// Leftward scroll per tick
    pub const PIPE_SPEED: f32 = 3.0;
    /// A new pipe spawns once the rearmost one is this far from the right edge
    pub const PIPE_SPAWN_DISTANCE: f32 = 250.0;
    /// Smallest top segment height at spawn
    pub const PIPE_MIN_TOP: f32 = 50.0;
    /// Extra space kept free above the floor when placing the gap
    pub const PIPE_FLOOR_RESERVE: f32 = 80.0;
    /// Collision shrink applied to each side of a pipe
    pub const PIPE_HITBOX_INSET: f32 = 10.0;

    /// Sea floor band height; touching it ends the run
    pub const FLOOR_HEIGHT: f32 = 64.0;

    /// Crab tilt: degrees per unit of velocity, clamped
    pub const TILT_PER_VELOCITY: f32 = 3.0;
    pub const TILT_MIN_DEG: f32 = -30.0;
    pub const TILT_MAX_DEG: f32 = 45.0;

    /// Bubbles released on each jump
    pub const JUMP_BUBBLES: usize = 5;
    /// Ticks between ambient bubbles (500 ms)
    pub const AMBIENT_BUBBLE_INTERVAL: u32 = 30;
    /// Opacity lost by a bubble per tick
    pub const BUBBLE_FADE: f32 = 0.01;
}
