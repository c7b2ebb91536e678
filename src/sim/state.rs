//! Game state and core simulation types
//!
//! Everything the renderer and HUD read each frame lives here as plain data.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::consts::*;
use crate::tuning::Tuning;

/// Salt mixed into the seed for the cosmetic RNG stream
const FX_STREAM_SALT: u64 = 0x9E37_79B9_7F4A_7C15;

/// Session phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Title screen; crab hidden, nothing moves
    Idle,
    /// Active gameplay
    Running,
    /// Run ended, waiting for input to return to Idle
    Ended,
}

/// The player character
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Crab {
    /// Top edge, world units (y grows downward)
    pub y: f32,
    /// Vertical velocity, units per tick (negative is up)
    pub vel: f32,
}

impl Crab {
    pub fn new(y: f32) -> Self {
        Self { y, vel: 0.0 }
    }

    /// Visual tilt derived from velocity, in degrees (positive is nose down)
    pub fn rotation_degrees(&self) -> f32 {
        (self.vel * TILT_PER_VELOCITY).clamp(TILT_MIN_DEG, TILT_MAX_DEG)
    }
}

/// A coral column pair with a passable gap between the segments
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pipe {
    pub id: u32,
    /// Left edge
    pub x: f32,
    /// Height of the top segment; the gap starts here
    pub gap_top: f32,
    /// Set once the crab has scored this pipe
    pub passed: bool,
}

impl Pipe {
    pub fn new(id: u32, x: f32, gap_top: f32) -> Self {
        Self {
            id,
            x,
            gap_top,
            passed: false,
        }
    }

    pub fn gap_bottom(&self, gap: f32) -> f32 {
        self.gap_top + gap
    }
}

/// A cosmetic rising bubble
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bubble {
    pub id: u32,
    pub pos: Vec2,
    pub size: f32,
    /// Rise per tick
    pub speed: f32,
    pub opacity: f32,
}

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrashKind {
    Ceiling,
    Floor,
    Pipe { id: u32 },
}

/// Things that happened during a tick or input, drained by the front end
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    Started,
    Flapped,
    Scored { score: u32 },
    Crashed(CrashKind),
    NewBest { score: u32 },
    Reset,
}

/// Play field dimensions
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct World {
    pub width: f32,
    pub height: f32,
}

impl Default for World {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
        }
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub world: World,
    pub tuning: Tuning,
    pub phase: GamePhase,
    pub crab: Crab,
    /// Front-to-back: creation order is horizontal order
    pub pipes: Vec<Pipe>,
    /// Visual only, never affects gameplay
    pub bubbles: Vec<Bubble>,
    pub score: u32,
    /// Cached copy of the persisted best
    pub best_score: u32,
    /// Simulation ticks spent Running, across all runs (drives animation)
    pub time_ticks: u64,
    /// Ticks since the current run started
    pub run_ticks: u32,
    /// Gameplay randomness (pipe placement)
    pub rng: Pcg32,
    /// Cosmetic randomness (bubbles)
    pub fx_rng: Pcg32,
    pub events: Vec<GameEvent>,
    next_id: u32,
}

impl GameState {
    /// Create a new game state with the given seed at the default field size
    pub fn new(seed: u64) -> Self {
        Self::with_world(seed, World::default(), Tuning::default())
    }

    pub fn with_world(seed: u64, world: World, tuning: Tuning) -> Self {
        Self {
            seed,
            world,
            tuning,
            phase: GamePhase::Idle,
            crab: Crab::new(world.height / 2.0),
            pipes: Vec::new(),
            bubbles: Vec::new(),
            score: 0,
            best_score: 0,
            time_ticks: 0,
            run_ticks: 0,
            rng: Pcg32::seed_from_u64(seed),
            fx_rng: Pcg32::seed_from_u64(seed ^ FX_STREAM_SALT),
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Crab left edge (fixed for a given field width)
    pub fn crab_x(&self) -> f32 {
        self.world.width * self.tuning.crab_x_fraction
    }

    /// Y coordinate of the sea floor line
    pub fn floor_y(&self) -> f32 {
        self.world.height - self.tuning.floor_height
    }

    /// Change the play field size (window resize)
    pub fn resize(&mut self, width: f32, height: f32) {
        if width > 0.0 && height > 0.0 {
            self.world = World { width, height };
            if self.phase == GamePhase::Idle {
                self.crab.y = height / 2.0;
            }
        }
    }

    /// True on the game-over screen when this run set or tied the best
    pub fn is_new_best(&self) -> bool {
        self.phase == GamePhase::Ended && self.score > 0 && self.score >= self.best_score
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
