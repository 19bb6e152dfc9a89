//! Per-frame update loop
//!
//! The orchestrator: one `tick` per rendering callback, run to completion
//! with no internal suspension points. Also home to the wave controller,
//! the death path, and the game-over/restart transitions.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::overlaps;
use super::state::{GameEvent, GamePhase, GameState};
use crate::consts::*;

/// Sampled key state for one frame.
///
/// Held state only. Press edges ("just pressed") are derived inside the
/// core by comparing against the previous frame's sample, never by an
/// engine-level edge facility.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameInput {
    pub left: bool,
    pub right: bool,
    pub fire: bool,
    pub restart: bool,
}

/// Advance the game by one frame.
pub fn tick(state: &mut GameState, input: &FrameInput) {
    match state.phase {
        GamePhase::Playing => play_frame(state, input),
        GamePhase::GameOver => {
            // Only the restart edge is polled; everything else is frozen.
            if input.restart && !state.prev_input.restart {
                restart(state);
            }
        }
        // Wave transitions resolve synchronously inside play_frame, so a
        // frame never begins in this phase.
        GamePhase::WaveClear => {}
    }

    state.prev_input = *input;
}

fn play_frame(state: &mut GameState, input: &FrameInput) {
    state.frame += 1;

    // Held-direction movement, clamped to the playable field.
    if input.left {
        state.ship.pos.x -= PLAYER_SPEED;
    }
    if input.right {
        state.ship.pos.x += PLAYER_SPEED;
    }
    state.ship.pos.x = state
        .ship
        .pos
        .x
        .clamp(SHIP_WIDTH / 2.0, PLAY_WIDTH - SHIP_WIDTH / 2.0);

    // Fire on the press edge only; over-cap attempts are silent no-ops.
    if input.fire && !state.prev_input.fire {
        let nose = state.ship.pos - Vec2::new(0.0, SHIP_HEIGHT / 2.0);
        state.spawn_bullet(nose);
    }

    // Drop whatever left the playable area.
    state.cull_offscreen();

    // Collisions. Bullets first, then hazards against the ship; each
    // ship overlap runs the death path on its own, deliberately without
    // deduplication of simultaneous hits.
    resolve_bullet_hits(state);
    resolve_ship_hits(state);

    // Movement. Fallen hazards are recycled before velocities apply.
    advance_bullets(state);
    state.recycle_fallen();
    advance_enemies(state);
    advance_asteroids(state);

    // End-of-frame compaction, then the terminal checks.
    state.compact();
    if state.enemies.is_empty() && state.asteroids.is_empty() {
        wave_cleared(state);
    }
    if state.life_markers.is_empty() {
        enter_game_over(state);
    }
}

/// Bullets against enemies, then against asteroids. A hit marks both
/// sides dead (compacted at end of frame), scores the current kill
/// value, and queues an impact event at the target's position.
fn resolve_bullet_hits(state: &mut GameState) {
    for bi in 0..state.bullets.len() {
        for ei in 0..state.enemies.len() {
            if !state.bullets[bi].alive || !state.enemies[ei].alive {
                continue;
            }
            if overlaps(&state.bullets[bi].aabb(), &state.enemies[ei].aabb()) {
                state.bullets[bi].alive = false;
                state.enemies[ei].alive = false;
                let pos = state.enemies[ei].pos;
                let value = state.enemy_kill_value;
                state.add_score(value);
                state.push_event(GameEvent::Impact { pos });
            }
        }
    }

    for bi in 0..state.bullets.len() {
        for ai in 0..state.asteroids.len() {
            if !state.bullets[bi].alive || !state.asteroids[ai].alive {
                continue;
            }
            if overlaps(&state.bullets[bi].aabb(), &state.asteroids[ai].aabb()) {
                state.bullets[bi].alive = false;
                state.asteroids[ai].alive = false;
                let pos = state.asteroids[ai].pos;
                let value = state.asteroid_kill_value;
                state.add_score(value);
                state.push_event(GameEvent::Impact { pos });
            }
        }
    }
}

fn resolve_ship_hits(state: &mut GameState) {
    for ai in 0..state.asteroids.len() {
        if state.asteroids[ai].alive
            && overlaps(&state.asteroids[ai].aabb(), &state.ship.aabb())
        {
            player_hit(state);
        }
    }
    for ei in 0..state.enemies.len() {
        if state.enemies[ei].alive && overlaps(&state.enemies[ei].aabb(), &state.ship.aabb()) {
            player_hit(state);
        }
    }
}

/// Death path: one life down, HUD markers rebuilt, every hazard thrown
/// back above the field. Hazards survive a ship collision; they are
/// respawned, never destroyed.
fn player_hit(state: &mut GameState) {
    let remaining = state.lives.saturating_sub(1);
    state.set_lives(remaining);
    state.respawn_hazards_above_field();
    state.push_event(GameEvent::LifeLost { remaining });
    log::debug!("ship hit, {remaining} lives remaining");
}

fn advance_bullets(state: &mut GameState) {
    for bullet in &mut state.bullets {
        bullet.pos.y -= BULLET_SPEED;
    }
}

fn advance_enemies(state: &mut GameState) {
    let speed = ENEMY_BASE_SPEED + state.wave as f32 * ENEMY_SPEED_PER_WAVE;
    for enemy in &mut state.enemies {
        enemy.pos.y += speed;
    }
}

fn advance_asteroids(state: &mut GameState) {
    let speed = ASTEROID_BASE_SPEED + state.wave as f32 * ASTEROID_SPEED_PER_WAVE;
    let right_edge = PLAY_WIDTH - ASTEROID_WIDTH / 2.0;
    let left_edge = ASTEROID_WIDTH / 2.0;
    for asteroid in &mut state.asteroids {
        if asteroid.pos.x > right_edge || asteroid.pos.x < left_edge {
            asteroid.drift = -asteroid.drift;
        }
        asteroid.pos.x += asteroid.drift;
        asteroid.pos.y += speed;
    }
}

/// Populate the next wave: bump the counter, spawn the escalated hazard
/// mix, recompute the per-kill values, rebuild the HUD markers, and hand
/// control back to the player.
pub fn start_wave(state: &mut GameState) {
    state.wave += 1;
    state.enemy_kill_value = ENEMY_KILL_VALUE * state.wave as u64;
    state.asteroid_kill_value = ASTEROID_KILL_VALUE * state.wave as u64;
    state.spawn_enemy_wave(ENEMIES_PER_WAVE * state.wave);
    state.spawn_asteroid_wave(ASTEROIDS_PER_WAVE * state.wave);
    state.set_lives(state.lives);
    state.push_event(GameEvent::WaveStarted { wave: state.wave });
    state.phase = GamePhase::Playing;
    log::info!("wave {} started", state.wave);
}

/// Both hazard pools emptied: award the bonus and the extra life, then
/// set up the next wave. Resolves fully within the current frame, with
/// player input suspended throughout.
fn wave_cleared(state: &mut GameState) {
    state.phase = GamePhase::WaveClear;
    let bonus = WAVE_CLEAR_BONUS * state.wave as u64;
    state.add_score(bonus);
    state.push_event(GameEvent::WaveCleared {
        wave: state.wave,
        bonus,
    });
    state.set_lives(state.lives + 1);
    start_wave(state);
}

/// Lives ran out. Everything in flight is discarded, the ship returns
/// to its starting spot, and only the restart key is polled from here.
fn enter_game_over(state: &mut GameState) {
    state.phase = GamePhase::GameOver;
    state.bullets.clear();
    state.enemies.clear();
    state.asteroids.clear();
    state.ship.pos = Vec2::new(SHIP_START_X, SHIP_START_Y);
    state.push_event(GameEvent::GameOver { score: state.score });
    log::info!("game over at wave {} with score {}", state.wave, state.score);
}

/// Edge-triggered restart from the game-over screen: counters reset,
/// then the usual wave setup produces wave 1.
fn restart(state: &mut GameState) {
    state.wave = 0;
    state.score = 0;
    state.set_lives(STARTING_LIVES);
    log::info!("restart requested, resetting session");
    start_wave(state);
}
