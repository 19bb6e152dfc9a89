//! Game state and entity pools
//!
//! Everything that describes one play session lives here, owned by a
//! single `GameState`: the ship, the bullet/enemy/asteroid pools, the
//! life-marker display entities, the counters, and the session RNG.
//! The only randomness in the whole sim flows through that RNG, so a
//! session is fully determined by its seed and its input script.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use super::tick::FrameInput;
use crate::consts::*;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// A cleared wave is being torn down and the next one populated.
    /// Player input is suspended; the whole transition resolves within
    /// one frame, so this phase is never observed between ticks.
    WaveClear,
    /// Run ended; only the restart key is polled
    GameOver,
}

/// Visual identity of an entity, for the rendering collaborator.
///
/// The core knows nothing about textures; it only tags entities so the
/// renderer can map them to images.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sprite {
    PlayerShip,
    LaserRed,
    EnemyGreen,
    MeteorBrown,
    Puff,
}

/// Outbound notification for the rendering collaborator.
///
/// The core never calls the renderer directly; it queues these and the
/// shell drains them after each tick. All of them are fire-and-forget.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A new wave was populated and control handed back to the player.
    WaveStarted { wave: u32 },
    /// Both hazard pools were emptied; the bonus has been applied.
    WaveCleared { wave: u32, bonus: u64 },
    /// A bullet destroyed a hazard at this position (puff anchor).
    Impact { pos: Vec2 },
    /// The ship was hit.
    LifeLost { remaining: u32 },
    /// Lives ran out; `score` is the terminal display value.
    GameOver { score: u64 },
}

/// The player's ship. One per session, never destroyed; on game over it
/// is repositioned to its starting spot instead.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ship {
    pub pos: Vec2,
}

impl Ship {
    pub fn new() -> Self {
        Self {
            pos: Vec2::new(SHIP_START_X, SHIP_START_Y),
        }
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.pos, SHIP_WIDTH, SHIP_HEIGHT)
    }

    pub fn sprite(&self) -> Sprite {
        Sprite::PlayerShip
    }
}

impl Default for Ship {
    fn default() -> Self {
        Self::new()
    }
}

/// A player bullet, climbing at a fixed speed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bullet {
    pub id: u32,
    pub pos: Vec2,
    /// Cleared on impact; dead entities are compacted at end of frame.
    pub alive: bool,
}

impl Bullet {
    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.pos, BULLET_WIDTH, BULLET_HEIGHT)
    }

    pub fn sprite(&self) -> Sprite {
        Sprite::LaserRed
    }
}

/// An enemy ship falling down the field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    pub pos: Vec2,
    pub alive: bool,
}

impl Enemy {
    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.pos, ENEMY_WIDTH, ENEMY_HEIGHT)
    }

    pub fn sprite(&self) -> Sprite {
        Sprite::EnemyGreen
    }
}

/// An asteroid: falls like an enemy but also drifts sideways, reflecting
/// off the edges of the playable field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Asteroid {
    pub id: u32,
    pub pos: Vec2,
    /// Signed horizontal speed; magnitude is constant, sign flips at edges.
    pub drift: f32,
    pub alive: bool,
}

impl Asteroid {
    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.pos, ASTEROID_WIDTH, ASTEROID_HEIGHT)
    }

    pub fn sprite(&self) -> Sprite {
        Sprite::MeteorBrown
    }
}

/// One HUD entity per remaining life. The whole collection is rebuilt
/// whenever the life count changes; game over triggers when it empties.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LifeMarker {
    pub pos: Vec2,
    pub scale: f32,
}

impl LifeMarker {
    pub fn sprite(&self) -> Sprite {
        Sprite::PlayerShip
    }
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Session seed for reproducibility
    pub seed: u64,
    /// Session RNG; every random spawn position comes from here
    rng: Pcg32,
    /// Current wave (0 before the first wave is populated)
    pub wave: u32,
    /// Remaining lives
    pub lives: u32,
    /// Score
    pub score: u64,
    /// Frames simulated while playing
    pub frame: u64,
    /// Current phase
    pub phase: GamePhase,
    /// Player ship
    pub ship: Ship,
    /// Live bullets, capped at `MAX_BULLETS`
    pub bullets: Vec<Bullet>,
    /// Live enemies
    pub enemies: Vec<Enemy>,
    /// Live asteroids
    pub asteroids: Vec<Asteroid>,
    /// HUD life markers, one per remaining life
    pub life_markers: Vec<LifeMarker>,
    /// Score per enemy kill for the current wave
    pub enemy_kill_value: u64,
    /// Score per asteroid kill for the current wave
    pub asteroid_kill_value: u64,
    /// Previous frame's sampled key state, for edge detection
    #[serde(default)]
    pub prev_input: FrameInput,
    /// Outbound events queued this frame, drained by the shell
    #[serde(skip)]
    events: Vec<GameEvent>,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a session: lives at 3, score 0, and the implicit
    /// wave-0 -> wave-1 transition already performed.
    pub fn new(seed: u64) -> Self {
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            wave: 0,
            lives: STARTING_LIVES,
            score: 0,
            frame: 0,
            phase: GamePhase::Playing,
            ship: Ship::new(),
            bullets: Vec::new(),
            enemies: Vec::new(),
            asteroids: Vec::new(),
            life_markers: Vec::new(),
            enemy_kill_value: 0,
            asteroid_kill_value: 0,
            prev_input: FrameInput::default(),
            events: Vec::new(),
            next_id: 1,
        };

        super::tick::start_wave(&mut state);
        state
    }

    /// Allocate a new entity ID
    fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Number of bullets still in play.
    pub fn live_bullets(&self) -> usize {
        self.bullets.iter().filter(|b| b.alive).count()
    }

    /// Append a bullet at the given origin, climbing. Silently ignored
    /// at the bullet cap; an over-cap fire input is policy, not an error.
    pub fn spawn_bullet(&mut self, origin: Vec2) {
        if self.live_bullets() >= MAX_BULLETS {
            return;
        }
        let id = self.next_entity_id();
        self.bullets.push(Bullet {
            id,
            pos: origin,
            alive: true,
        });
    }

    /// Append `count` enemies at random positions above the field.
    pub fn spawn_enemy_wave(&mut self, count: u32) {
        for _ in 0..count {
            let pos = self.roll_spawn_pos();
            let id = self.next_entity_id();
            self.enemies.push(Enemy {
                id,
                pos,
                alive: true,
            });
        }
    }

    /// Append `count` asteroids at random positions above the field,
    /// each with the initial rightward drift.
    pub fn spawn_asteroid_wave(&mut self, count: u32) {
        for _ in 0..count {
            let pos = self.roll_spawn_pos();
            let id = self.next_entity_id();
            self.asteroids.push(Asteroid {
                id,
                pos,
                drift: ASTEROID_DRIFT,
                alive: true,
            });
        }
    }

    /// Drop entities that left the playable area.
    ///
    /// Bullets go once they are fully above the top edge. Enemies and
    /// asteroids are tested on the horizontal axis even though they move
    /// vertically; the vertical exit path is handled by recycling instead.
    pub fn cull_offscreen(&mut self) {
        self.bullets.retain(|b| b.pos.y > -BULLET_HEIGHT / 2.0);
        self.enemies.retain(|e| e.pos.x > -ENEMY_WIDTH / 2.0);
        self.asteroids.retain(|a| a.pos.x > -ASTEROID_WIDTH / 2.0);
    }

    /// Reposition hazards that fell past the bottom edge back above the
    /// field at a fresh random x. Recycled, not destroyed.
    pub fn recycle_fallen(&mut self) {
        for i in 0..self.enemies.len() {
            if self.enemies[i].pos.y > RECYCLE_Y {
                let x = self.roll_spawn_x();
                self.enemies[i].pos = Vec2::new(x, RESPAWN_Y);
            }
        }
        for i in 0..self.asteroids.len() {
            if self.asteroids[i].pos.y > RECYCLE_Y {
                let x = self.roll_spawn_x();
                self.asteroids[i].pos = Vec2::new(x, RESPAWN_Y);
            }
        }
    }

    /// Throw every hazard back to a random spot above the field.
    /// Used by the death path: hazards survive a ship collision.
    pub fn respawn_hazards_above_field(&mut self) {
        for i in 0..self.enemies.len() {
            let pos = self.roll_spawn_pos();
            self.enemies[i].pos = pos;
        }
        for i in 0..self.asteroids.len() {
            let pos = self.roll_spawn_pos();
            self.asteroids[i].pos = pos;
        }
    }

    /// Remove entities marked dead during this frame's collision pass.
    pub fn compact(&mut self) {
        self.bullets.retain(|b| b.alive);
        self.enemies.retain(|e| e.alive);
        self.asteroids.retain(|a| a.alive);
    }

    pub fn add_score(&mut self, amount: u64) {
        self.score += amount;
    }

    /// Set the life counter and rebuild the HUD markers to exactly `n`
    /// entries. The old markers are discarded wholesale.
    pub fn set_lives(&mut self, n: u32) {
        self.lives = n;
        self.life_markers.clear();
        for i in 1..=n {
            self.life_markers.push(LifeMarker {
                pos: Vec2::new(
                    LIFE_MARKER_X,
                    LIFE_MARKER_Y + i as f32 * LIFE_MARKER_SPACING,
                ),
                scale: LIFE_MARKER_SCALE,
            });
        }
    }

    /// Queue an outbound event for the rendering collaborator.
    pub fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take all events queued since the last drain.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    fn roll_spawn_x(&mut self) -> f32 {
        self.rng.random_range(SPAWN_X_MIN..SPAWN_X_MIN + SPAWN_X_SPAN)
    }

    /// Random position above the visible field, within spawn bounds.
    fn roll_spawn_pos(&mut self) -> Vec2 {
        let x = self.roll_spawn_x();
        let y = -self.rng.random_range(0.0..SPAWN_DEPTH);
        Vec2::new(x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn base_state() -> GameState {
        GameState::new(7)
    }

    #[test]
    fn test_bullet_cap_is_enforced() {
        let mut state = base_state();
        for _ in 0..5 {
            state.spawn_bullet(Vec2::new(400.0, 700.0));
        }
        assert_eq!(state.live_bullets(), MAX_BULLETS);
    }

    #[test]
    fn test_cap_frees_up_after_compaction() {
        let mut state = base_state();
        state.spawn_bullet(Vec2::new(400.0, 700.0));
        state.spawn_bullet(Vec2::new(400.0, 700.0));
        state.bullets[0].alive = false;
        state.compact();
        state.spawn_bullet(Vec2::new(400.0, 700.0));
        assert_eq!(state.live_bullets(), 2);
    }

    #[test]
    fn test_wave_spawns_land_in_spawn_band() {
        let mut state = base_state();
        state.enemies.clear();
        state.spawn_enemy_wave(50);
        for enemy in &state.enemies {
            assert!(enemy.pos.x >= SPAWN_X_MIN);
            assert!(enemy.pos.x < SPAWN_X_MIN + SPAWN_X_SPAN);
            assert!(enemy.pos.y <= 0.0);
            assert!(enemy.pos.y > -SPAWN_DEPTH);
        }
    }

    #[test]
    fn test_set_lives_rebuilds_markers() {
        let mut state = base_state();
        state.set_lives(5);
        assert_eq!(state.life_markers.len(), 5);
        state.set_lives(2);
        assert_eq!(state.life_markers.len(), 2);
        assert_eq!(state.life_markers[0].pos.x, LIFE_MARKER_X);
        assert_eq!(
            state.life_markers[1].pos.y,
            LIFE_MARKER_Y + 2.0 * LIFE_MARKER_SPACING
        );
        state.set_lives(0);
        assert!(state.life_markers.is_empty());
    }

    #[test]
    fn test_cull_is_idempotent() {
        let mut state = base_state();
        state.spawn_bullet(Vec2::new(400.0, -100.0));
        state.enemies[0].pos.x = -200.0;
        state.cull_offscreen();
        let after_once = state.clone();
        state.cull_offscreen();
        assert_eq!(state.bullets, after_once.bullets);
        assert_eq!(state.enemies, after_once.enemies);
        assert_eq!(state.asteroids, after_once.asteroids);
    }

    #[test]
    fn test_hazard_cull_uses_horizontal_axis() {
        // An enemy far above the screen survives; one pushed off the left
        // edge is dropped. Vertical position is never consulted.
        let mut state = base_state();
        state.enemies.clear();
        state.spawn_enemy_wave(2);
        state.enemies[0].pos = Vec2::new(300.0, -5000.0);
        state.enemies[1].pos = Vec2::new(-ENEMY_WIDTH, 400.0);
        state.cull_offscreen();
        assert_eq!(state.enemies.len(), 1);
        assert_eq!(state.enemies[0].pos.y, -5000.0);
    }

    #[test]
    fn test_recycle_rerolls_x_and_resets_y() {
        let mut state = base_state();
        state.enemies[0].pos = Vec2::new(300.0, RECYCLE_Y + 50.0);
        state.recycle_fallen();
        assert_eq!(state.enemies[0].pos.y, RESPAWN_Y);
        assert!(state.enemies[0].pos.x >= SPAWN_X_MIN);
        assert!(state.enemies[0].pos.x < SPAWN_X_MIN + SPAWN_X_SPAN);
    }

    #[test]
    fn test_respawn_keeps_hazards_alive() {
        let mut state = base_state();
        let enemies_before = state.enemies.len();
        let asteroids_before = state.asteroids.len();
        state.respawn_hazards_above_field();
        assert_eq!(state.enemies.len(), enemies_before);
        assert_eq!(state.asteroids.len(), asteroids_before);
        for enemy in &state.enemies {
            assert!(enemy.pos.y <= 0.0);
        }
        for asteroid in &state.asteroids {
            assert!(asteroid.pos.y <= 0.0);
        }
    }

    #[test]
    fn test_drain_events_empties_queue() {
        let mut state = base_state();
        state.push_event(GameEvent::LifeLost { remaining: 2 });
        assert!(!state.drain_events().is_empty());
        assert!(state.drain_events().is_empty());
    }

    proptest! {
        /// Any script of fire attempts and kill/compact cycles keeps the
        /// live bullet count within the cap.
        #[test]
        fn bullet_cap_holds_under_any_script(script in prop::collection::vec(any::<bool>(), 0..64)) {
            let mut state = GameState::new(11);
            for fire in script {
                if fire {
                    state.spawn_bullet(Vec2::new(400.0, 700.0));
                } else if let Some(first) = state.bullets.first_mut() {
                    first.alive = false;
                    state.compact();
                }
                prop_assert!(state.live_bullets() <= MAX_BULLETS);
            }
        }
    }
}
