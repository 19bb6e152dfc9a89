//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure and
//! deterministic:
//! - Frame-driven only (one tick per rendering callback)
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod collision;
pub mod state;
pub mod tick;

pub use collision::{Aabb, overlaps};
pub use state::{
    Asteroid, Bullet, Enemy, GameEvent, GamePhase, GameState, LifeMarker, Ship, Sprite,
};
pub use tick::{FrameInput, start_wave, tick};
