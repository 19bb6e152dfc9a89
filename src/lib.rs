//! Wave Invaders - single-screen arcade shooter simulation core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entity pools, collisions, scoring,
//!   wave progression, game-over state machine)
//!
//! Rendering, input binding, and animation playback live in an external
//! collaborator. The core consumes a per-frame snapshot of held keys,
//! exposes its state for read-only display, and queues fire-and-forget
//! events (impacts, wave transitions, game over) for the collaborator
//! to drain after each tick.

pub mod sim;

pub use sim::{FrameInput, GameEvent, GamePhase, GameState, tick};

/// Game configuration constants
///
/// Field dimensions and speeds are injected configuration; the sim never
/// measures anything at runtime.
pub mod consts {
    /// Visible screen dimensions in pixels, y growing downward
    pub const SCREEN_WIDTH: f32 = 1000.0;
    pub const SCREEN_HEIGHT: f32 = 800.0;
    /// Right-hand column reserved for the score/lives display
    pub const HUD_WIDTH: f32 = 200.0;
    /// Width of the playable field
    pub const PLAY_WIDTH: f32 = SCREEN_WIDTH - HUD_WIDTH;

    /// Ship movement speed (pixels/frame)
    pub const PLAYER_SPEED: f32 = 10.0;
    /// Bullet climb speed (pixels/frame)
    pub const BULLET_SPEED: f32 = 25.0;
    /// Live bullets allowed at once; firing above the cap is ignored
    pub const MAX_BULLETS: usize = 2;
    /// Lives at session start and after a restart
    pub const STARTING_LIVES: u32 = 3;

    /// Ship start/reset position
    pub const SHIP_START_X: f32 = 400.0;
    pub const SHIP_START_Y: f32 = 750.0;

    /// Sprite extents used for the collision boxes
    pub const SHIP_WIDTH: f32 = 98.0;
    pub const SHIP_HEIGHT: f32 = 75.0;
    pub const BULLET_WIDTH: f32 = 9.0;
    pub const BULLET_HEIGHT: f32 = 54.0;
    pub const ENEMY_WIDTH: f32 = 93.0;
    pub const ENEMY_HEIGHT: f32 = 84.0;
    pub const ASTEROID_WIDTH: f32 = 101.0;
    pub const ASTEROID_HEIGHT: f32 = 84.0;

    /// Hazard spawn band: x in [SPAWN_X_MIN, SPAWN_X_MIN + SPAWN_X_SPAN),
    /// y in (-SPAWN_DEPTH, 0]
    pub const SPAWN_X_MIN: f32 = 50.0;
    pub const SPAWN_X_SPAN: f32 = 700.0;
    pub const SPAWN_DEPTH: f32 = 1000.0;
    /// Hazards past this y are recycled back to RESPAWN_Y
    pub const RECYCLE_Y: f32 = 1100.0;
    pub const RESPAWN_Y: f32 = -100.0;

    /// Hazard fall speeds: base plus per-wave scaling (pixels/frame)
    pub const ENEMY_BASE_SPEED: f32 = 5.0;
    pub const ENEMY_SPEED_PER_WAVE: f32 = 1.5;
    pub const ASTEROID_BASE_SPEED: f32 = 4.0;
    pub const ASTEROID_SPEED_PER_WAVE: f32 = 1.0;
    /// Constant horizontal drift magnitude for asteroids
    pub const ASTEROID_DRIFT: f32 = 2.0;

    /// Wave composition and scoring, all scaled linearly by wave number
    pub const ENEMIES_PER_WAVE: u32 = 6;
    pub const ASTEROIDS_PER_WAVE: u32 = 2;
    pub const ENEMY_KILL_VALUE: u64 = 100;
    pub const ASTEROID_KILL_VALUE: u64 = 1000;
    pub const WAVE_CLEAR_BONUS: u64 = 10_000;

    /// Life-marker column in the HUD
    pub const LIFE_MARKER_X: f32 = 900.0;
    pub const LIFE_MARKER_Y: f32 = 125.0;
    pub const LIFE_MARKER_SPACING: f32 = 45.0;
    pub const LIFE_MARKER_SCALE: f32 = 0.5;
}
