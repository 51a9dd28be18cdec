//! Game state and core simulation types
//!
//! Everything a round mutates lives on `GameState`; the static round data
//! (obstacles, spawn points) and the collision masks are owned alongside it
//! so the simulation has no reach into loaders or the renderer.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::collision::Aabb;
use super::mask::{MaskSet, PixelMask};
use crate::config::Config;

/// Top-level screen the outer loop dispatches on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameMode {
    /// Title screen: start/quit buttons, top-3 scores
    Menu,
    /// Active round
    Playing,
    /// Round frozen, toggled by the pause key
    Paused,
    /// Death banner holding for a fixed delay
    GameOver,
    /// High-score name entry
    EnterName,
}

/// Four-way sprite facing, chosen from the dominant movement axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Facing {
    #[default]
    Down,
    Up,
    Left,
    Right,
}

/// The player character
#[derive(Debug, Clone)]
pub struct Player {
    pub pos: Vec2,
    /// Remaining health; the round ends when this reaches 0
    pub health: i32,
    /// Unit vector toward the pointer
    pub aim: Vec2,
    /// Time until contact damage can apply again, milliseconds
    pub hurt_cooldown_ms: f32,
    pub facing: Facing,
    /// Whether movement input was nonzero this tick (drives walk animation)
    pub moving: bool,
    /// Animation clock, seconds
    pub anim_time: f32,
}

impl Player {
    pub fn new(pos: Vec2, health: i32) -> Self {
        Self {
            pos,
            health,
            aim: Vec2::new(1.0, 0.0),
            hurt_cooldown_ms: 0.0,
            facing: Facing::default(),
            moving: false,
            anim_time: 0.0,
        }
    }
}

/// A pursuing enemy
#[derive(Debug, Clone)]
pub struct Enemy {
    pub id: u32,
    pub pos: Vec2,
    /// Index into the loaded enemy types
    pub kind: usize,
    /// Animation clock, seconds
    pub anim_time: f32,
}

/// A bullet in flight
#[derive(Debug, Clone)]
pub struct Bullet {
    pub id: u32,
    pub pos: Vec2,
    /// Unit travel direction, fixed at fire time
    pub dir: Vec2,
    /// Time since fired, milliseconds
    pub age_ms: f32,
}

/// Per-round score and name-entry buffer
#[derive(Debug, Clone, Default)]
pub struct GameSession {
    pub score: u32,
    pub player_name: String,
}

impl GameSession {
    pub fn reset(&mut self) {
        self.score = 0;
        self.player_name.clear();
    }

    /// Append a character to the name buffer. Only alphanumerics are
    /// accepted, and the buffer never exceeds `max_len`.
    pub fn push_name_char(&mut self, c: char, max_len: usize) {
        if c.is_ascii_alphanumeric() && self.player_name.chars().count() < max_len {
            self.player_name.push(c);
        }
    }

    /// Remove the last character; no-op on an empty buffer
    pub fn pop_name_char(&mut self) {
        self.player_name.pop();
    }

    pub fn name_is_empty(&self) -> bool {
        self.player_name.is_empty()
    }
}

/// Static per-map data the simulation reads but never writes
#[derive(Debug, Clone)]
pub struct RoundSetup {
    /// Where the player starts each round
    pub player_spawn: Vec2,
    /// Enemy spawn positions; validated non-empty at map load
    pub spawn_points: Vec<Vec2>,
    /// Static collision rects
    pub obstacles: Vec<Aabb>,
    /// World extent; bullets despawn outside it
    pub bounds: Aabb,
}

/// Complete game state for one process lifetime
#[derive(Debug, Clone)]
pub struct GameState {
    pub config: Config,
    pub round: RoundSetup,
    pub masks: MaskSet,

    pub mode: GameMode,
    pub session: GameSession,
    pub player: Player,
    /// Live enemies in id order
    pub enemies: Vec<Enemy>,
    /// Bullets in flight in id order
    pub bullets: Vec<Bullet>,

    /// Time since the last enemy spawn, milliseconds
    pub spawn_timer_ms: f32,
    /// Time until the gun may fire again, milliseconds; 0 = ready
    pub gun_cooldown_ms: f32,
    /// Time spent on the game-over banner, milliseconds
    pub game_over_ms: f32,

    /// Seed of the current round, for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    /// Tick counter for the current round
    pub time_ticks: u64,
    next_id: u32,
}

impl GameState {
    /// Build the process-lifetime state, starting at the menu
    pub fn new(config: Config, round: RoundSetup, masks: MaskSet, seed: u64) -> Self {
        let player = Player::new(round.player_spawn, config.max_health);
        Self {
            config,
            round,
            masks,
            mode: GameMode::Menu,
            session: GameSession::default(),
            player,
            enemies: Vec::new(),
            bullets: Vec::new(),
            spawn_timer_ms: 0.0,
            gun_cooldown_ms: 0.0,
            game_over_ms: 0.0,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            time_ticks: 0,
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Tear down all dynamic entities and timers and start a fresh round
    /// from the static map data
    pub fn reset_round(&mut self, seed: u64) {
        self.enemies.clear();
        self.bullets.clear();
        self.session.reset();
        self.player = Player::new(self.round.player_spawn, self.config.max_health);
        self.spawn_timer_ms = 0.0;
        self.gun_cooldown_ms = 0.0;
        self.game_over_ms = 0.0;
        self.seed = seed;
        self.rng = Pcg32::seed_from_u64(seed);
        self.time_ticks = 0;
        self.next_id = 1;
    }

    pub fn player_mask(&self) -> &PixelMask {
        &self.masks.player
    }

    pub fn bullet_mask(&self) -> &PixelMask {
        &self.masks.bullet
    }

    /// Current animation frame index for an enemy
    pub fn enemy_frame(&self, enemy: &Enemy) -> usize {
        (enemy.anim_time * self.config.animation_fps) as usize
    }

    /// Current-frame collision mask for an enemy
    pub fn enemy_mask(&self, enemy: &Enemy) -> &PixelMask {
        self.masks.enemy_mask(enemy.kind, self.enemy_frame(enemy))
    }

    /// Player sprite footprint in pixels
    pub fn player_size(&self) -> Vec2 {
        Vec2::new(
            self.masks.player.width() as f32,
            self.masks.player.height() as f32,
        )
    }

    /// Footprint of an enemy's current frame in pixels
    pub fn enemy_size(&self, enemy: &Enemy) -> Vec2 {
        let mask = self.enemy_mask(enemy);
        Vec2::new(mask.width() as f32, mask.height() as f32)
    }
}
