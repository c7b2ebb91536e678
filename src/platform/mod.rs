//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Time/ticks (fixed-step accumulator)
//! - Input events (keys, pointer, touch -> jump)

pub mod clock;
pub mod input;

pub use clock::FixedTicker;
pub use input::{Action, key_action};
