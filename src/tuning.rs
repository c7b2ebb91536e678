//! Data-driven game balance
//!
//! Every gameplay constant in one serializable struct. Defaults come from
//! [`crate::consts`]; a JSON override only needs the fields it changes.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::persistence::KeyValueStore;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub gravity: f32,
    pub jump_velocity: f32,
    pub crab_size: f32,
    pub crab_x_fraction: f32,
    pub pipe_width: f32,
    pub pipe_gap: f32,
    pub pipe_speed: f32,
    pub pipe_spawn_distance: f32,
    pub pipe_min_top: f32,
    pub pipe_floor_reserve: f32,
    pub pipe_hitbox_inset: f32,
    pub floor_height: f32,
    pub ambient_bubble_interval: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            jump_velocity: JUMP_VELOCITY,
            crab_size: CRAB_SIZE,
            crab_x_fraction: CRAB_X_FRACTION,
            pipe_width: PIPE_WIDTH,
            pipe_gap: PIPE_GAP,
            pipe_speed: PIPE_SPEED,
            pipe_spawn_distance: PIPE_SPAWN_DISTANCE,
            pipe_min_top: PIPE_MIN_TOP,
            pipe_floor_reserve: PIPE_FLOOR_RESERVE,
            pipe_hitbox_inset: PIPE_HITBOX_INSET,
            floor_height: FLOOR_HEIGHT,
            ambient_bubble_interval: AMBIENT_BUBBLE_INTERVAL,
        }
    }
}

impl Tuning {
    /// Storage key for a balance override
    pub const STORAGE_KEY: &'static str = "flappy_crab_tuning";

    /// Load an override from storage, falling back to the built-in balance
    pub fn load(store: &dyn KeyValueStore) -> Self {
        match store.get_item(Self::STORAGE_KEY) {
            Ok(Some(json)) => match Self::from_json(&json) {
                Ok(tuning) => {
                    log::info!("Loaded tuning override");
                    tuning
                }
                Err(e) => {
                    log::warn!("Ignoring bad tuning override: {}", e);
                    Self::default()
                }
            },
            Ok(None) => Self::default(),
            Err(e) => {
                log::warn!("Could not read tuning override: {}", e);
                Self::default()
            }
        }
    }

    /// Parse a (possibly partial) JSON override
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Range for a spawned pipe's gap-top at the given field height.
    ///
    /// On short fields the lower bound drops below `pipe_min_top` so both
    /// coral segments keep a positive height. `None` when the field cannot
    /// hold the gap at all.
    pub fn gap_top_range(&self, height: f32) -> Option<(f32, f32)> {
        let spare = height - self.pipe_gap;
        if spare <= 0.0 {
            return None;
        }
        let lo = self.pipe_min_top.min(spare / 2.0).max(0.0);
        if lo <= 0.0 {
            return None;
        }
        let hi = height - self.pipe_gap - self.pipe_min_top - self.pipe_floor_reserve;
        Some((lo, hi.max(lo)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;

    #[test]
    fn test_partial_override_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "gravity": 0.5, "pipe_gap": 200.0 }"#).unwrap();
        assert_eq!(tuning.gravity, 0.5);
        assert_eq!(tuning.pipe_gap, 200.0);
        assert_eq!(tuning.jump_velocity, JUMP_VELOCITY);
        assert_eq!(tuning.pipe_speed, PIPE_SPEED);
    }

    #[test]
    fn test_gap_top_range_default_field() {
        let (lo, hi) = Tuning::default().gap_top_range(DEFAULT_HEIGHT).unwrap();
        assert_eq!(lo, 50.0);
        assert_eq!(hi, 600.0 - 180.0 - 50.0 - 80.0);
    }

    #[test]
    fn test_gap_top_range_short_field_pins_to_min() {
        let (lo, hi) = Tuning::default().gap_top_range(300.0).unwrap();
        assert_eq!(lo, hi);
        assert_eq!(lo, PIPE_MIN_TOP);
    }

    #[test]
    fn test_gap_top_range_tiny_field_keeps_bottom_segment() {
        // 200 - 180 leaves 20 units to split between the two segments
        let (lo, hi) = Tuning::default().gap_top_range(200.0).unwrap();
        assert_eq!((lo, hi), (10.0, 10.0));
        assert!(200.0 - hi - PIPE_GAP > 0.0);
    }

    #[test]
    fn test_gap_top_range_none_when_gap_does_not_fit() {
        assert_eq!(Tuning::default().gap_top_range(PIPE_GAP), None);
        assert_eq!(Tuning::default().gap_top_range(100.0), None);
    }

    #[test]
    fn test_load_override_from_store() {
        let mut store = MemoryStore::new();
        assert_eq!(Tuning::load(&store), Tuning::default());

        store
            .set_item(Tuning::STORAGE_KEY, r#"{ "pipe_speed": 4.5 }"#)
            .unwrap();
        let tuning = Tuning::load(&store);
        assert_eq!(tuning.pipe_speed, 4.5);
        assert_eq!(tuning.gravity, GRAVITY);

        store.set_item(Tuning::STORAGE_KEY, "garbage").unwrap();
        assert_eq!(Tuning::load(&store), Tuning::default());
    }

    #[test]
    fn test_bad_json_is_error() {
        assert!(Tuning::from_json("{ gravity: }").is_err());
    }
}
