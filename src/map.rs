//! Map document parsing
//!
//! The world is a single JSON document with named layers: a ground tile
//! grid, obstacle rects (with or without a sprite), and entity markers.
//! Exactly one marker named `Player` gives the player spawn; every other
//! marker is an enemy spawn point. Any structural problem here is fatal
//! at startup - the game never runs on a half-parsed map.

use std::fmt;
use std::fs;
use std::path::Path;

use glam::Vec2;
use serde::Deserialize;

use crate::sim::{Aabb, RoundSetup};

/// Why a map failed to load
#[derive(Debug)]
pub enum MapError {
    /// File I/O error
    Io(String),
    /// Malformed JSON
    Parse(String),
    /// Structurally valid JSON that is not a playable map
    Validation(String),
}

impl fmt::Display for MapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MapError::Io(msg) => write!(f, "I/O error: {msg}"),
            MapError::Parse(msg) => write!(f, "Parse error: {msg}"),
            MapError::Validation(msg) => write!(f, "Invalid map: {msg}"),
        }
    }
}

impl std::error::Error for MapError {}

impl From<std::io::Error> for MapError {
    fn from(e: std::io::Error) -> Self {
        MapError::Io(e.to_string())
    }
}

/// An obstacle that also draws a sprite
#[derive(Debug, Clone, Deserialize)]
pub struct ObjectDef {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
    /// Sprite name resolved by the asset loader
    pub sprite: String,
}

/// A bare collision rect
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct RectDef {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

/// A named world position
#[derive(Debug, Clone, Deserialize)]
pub struct MarkerDef {
    pub name: String,
    pub x: f32,
    pub y: f32,
}

/// Raw document shape, pre-validation
#[derive(Debug, Deserialize)]
struct MapDoc {
    /// Grid width in tiles
    width: u32,
    /// Grid height in tiles
    height: u32,
    /// Row-major tile ids
    ground: Vec<Vec<u16>>,
    #[serde(default)]
    objects: Vec<ObjectDef>,
    #[serde(default)]
    collisions: Vec<RectDef>,
    entities: Vec<MarkerDef>,
}

/// A validated, playable map
#[derive(Debug, Clone)]
pub struct MapData {
    /// Grid width in tiles
    pub width: u32,
    /// Grid height in tiles
    pub height: u32,
    /// Row-major tile ids for the ground layer
    pub ground: Vec<Vec<u16>>,
    /// Sprite-bearing obstacles, for drawing
    pub objects: Vec<ObjectDef>,
    /// All static collision rects (objects and bare collision rects)
    pub obstacles: Vec<Aabb>,
    pub player_spawn: Vec2,
    pub spawn_points: Vec<Vec2>,
}

impl MapData {
    pub fn load(path: &Path) -> Result<Self, MapError> {
        let text = fs::read_to_string(path)?;
        Self::parse(&text)
    }

    pub fn parse(text: &str) -> Result<Self, MapError> {
        let doc: MapDoc = serde_json::from_str(text).map_err(|e| MapError::Parse(e.to_string()))?;

        if doc.ground.len() != doc.height as usize {
            return Err(MapError::Validation(format!(
                "ground layer has {} rows, expected {}",
                doc.ground.len(),
                doc.height
            )));
        }
        if let Some(row) = doc.ground.iter().find(|r| r.len() != doc.width as usize) {
            return Err(MapError::Validation(format!(
                "ground row has {} tiles, expected {}",
                row.len(),
                doc.width
            )));
        }

        let mut player_spawn = None;
        let mut spawn_points = Vec::new();
        for marker in &doc.entities {
            let pos = Vec2::new(marker.x, marker.y);
            if marker.name == "Player" {
                if player_spawn.is_some() {
                    return Err(MapError::Validation(
                        "more than one Player marker".to_string(),
                    ));
                }
                player_spawn = Some(pos);
            } else {
                spawn_points.push(pos);
            }
        }
        let player_spawn = player_spawn
            .ok_or_else(|| MapError::Validation("no Player marker".to_string()))?;
        if spawn_points.is_empty() {
            return Err(MapError::Validation("no enemy spawn points".to_string()));
        }

        let mut obstacles: Vec<Aabb> = doc
            .objects
            .iter()
            .map(|o| Aabb::from_rect(o.x, o.y, o.w, o.h))
            .collect();
        obstacles.extend(
            doc.collisions
                .iter()
                .map(|c| Aabb::from_rect(c.x, c.y, c.w, c.h)),
        );

        Ok(Self {
            width: doc.width,
            height: doc.height,
            ground: doc.ground,
            objects: doc.objects,
            obstacles,
            player_spawn,
            spawn_points,
        })
    }

    /// The static data a round is seeded from
    pub fn round_setup(&self, tile_size: f32) -> RoundSetup {
        RoundSetup {
            player_spawn: self.player_spawn,
            spawn_points: self.spawn_points.clone(),
            obstacles: self.obstacles.clone(),
            bounds: Aabb::from_rect(
                0.0,
                0.0,
                self.width as f32 * tile_size,
                self.height as f32 * tile_size,
            ),
        }
    }
}
