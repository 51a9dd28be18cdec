//! Night Swarm - a top-down survival shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, collisions, combat, game modes)
//! - `map`: Map document parsing (ground tiles, obstacles, entity markers)
//! - `assets`: Sprite/sound loading and collision-mask construction
//! - `highscores`: Ranked score table
//! - `persistence`: JSON file save/load with atomic replace
//! - `app`: Per-mode frame handlers (input, camera, drawing, audio cues)

pub mod app;
pub mod assets;
pub mod audio;
pub mod config;
pub mod highscores;
pub mod map;
pub mod persistence;
pub mod sim;

pub use config::Config;
pub use highscores::{HighScores, ScoreEntry};
