//! Game configuration
//!
//! One immutable `Config` built at startup and passed by reference to every
//! component that needs it. Tunables live here instead of scattered
//! module-level constants so tests can shrink timers and cap spawns.

use std::path::PathBuf;

/// All startup-time tunables
#[derive(Debug, Clone)]
pub struct Config {
    // === Window ===
    /// Window width in pixels
    pub window_width: i32,
    /// Window height in pixels
    pub window_height: i32,
    /// Side length of one ground tile in pixels
    pub tile_size: f32,

    // === Paths ===
    /// Root directory for images and audio
    pub asset_dir: PathBuf,
    /// Map document
    pub map_path: PathBuf,
    /// High-score table
    pub highscore_path: PathBuf,

    // === Player ===
    /// Starting and maximum health
    pub max_health: i32,
    /// Movement speed, pixels per second
    pub player_speed: f32,
    /// Minimum time between contact-damage events, milliseconds
    pub hurt_cooldown_ms: f32,

    // === Enemies ===
    /// Pursuit speed, pixels per second
    pub enemy_speed: f32,
    /// Interval between spawns while playing, milliseconds
    pub spawn_interval_ms: f32,
    /// Optional ceiling on live enemies; `None` reproduces the source's
    /// unbounded growth
    pub max_enemies: Option<usize>,
    /// Animation rate, frames per second
    pub animation_fps: f32,

    // === Weapon ===
    /// Minimum time between shots, milliseconds
    pub gun_cooldown_ms: f32,
    /// Bullet speed, pixels per second
    pub bullet_speed: f32,
    /// Distance from the player center at which bullets appear
    pub bullet_offset: f32,
    /// Bullet lifetime, milliseconds
    pub bullet_lifetime_ms: f32,

    // === Scoring ===
    /// Points per destroyed enemy
    pub kill_score: u32,
    /// Maximum characters in a high-score name
    pub max_name_len: usize,

    // === Flow ===
    /// Time the game-over banner holds before name entry, milliseconds
    pub game_over_delay_ms: f32,
    /// Upper bound on a single tick's dt, seconds. Physics is
    /// frame-rate-independent only approximately; this bounds the error
    /// after a stall.
    pub max_dt: f32,
    /// Start the music loop on launch
    pub play_music: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            window_width: 1280,
            window_height: 720,
            tile_size: 64.0,

            asset_dir: PathBuf::from("assets"),
            map_path: PathBuf::from("assets/data/world.json"),
            highscore_path: PathBuf::from("highscores.json"),

            max_health: 5,
            player_speed: 500.0,
            hurt_cooldown_ms: 500.0,

            enemy_speed: 250.0,
            spawn_interval_ms: 1000.0,
            max_enemies: None,
            animation_fps: 6.0,

            gun_cooldown_ms: 100.0,
            bullet_speed: 1200.0,
            bullet_offset: 50.0,
            bullet_lifetime_ms: 1000.0,

            kill_score: 10,
            max_name_len: 4,

            game_over_delay_ms: 2000.0,
            max_dt: 0.1,
            play_music: false,
        }
    }
}
