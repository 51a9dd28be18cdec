//! Asset loading
//!
//! Decodes every sprite once at startup: PNG bytes become both a GPU
//! texture for drawing and a `PixelMask` for collision, so the two can
//! never drift apart. Anything missing or undecodable is fatal - the
//! loop starts with a complete asset set or not at all.

use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use macroquad::texture::{FilterMode, Texture2D};

use crate::map::MapData;
use crate::sim::{Facing, MaskSet, PixelMask};

/// Why asset loading failed
#[derive(Debug)]
pub enum AssetError {
    /// File I/O error
    Io(String),
    /// Undecodable or misnamed image
    Decode(String),
    /// A sprite or directory the game requires is absent
    Missing(String),
}

impl fmt::Display for AssetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetError::Io(msg) => write!(f, "I/O error: {msg}"),
            AssetError::Decode(msg) => write!(f, "Decode error: {msg}"),
            AssetError::Missing(msg) => write!(f, "Missing asset: {msg}"),
        }
    }
}

impl std::error::Error for AssetError {}

impl From<std::io::Error> for AssetError {
    fn from(e: std::io::Error) -> Self {
        AssetError::Io(e.to_string())
    }
}

/// A drawable sprite together with its collision mask
#[derive(Clone)]
pub struct Sprite {
    pub texture: Texture2D,
    pub mask: PixelMask,
    pub width: f32,
    pub height: f32,
}

/// Animation frames for one enemy type
pub struct FrameSet {
    /// Directory name, kept for logging
    pub name: String,
    pub frames: Vec<Sprite>,
}

/// Every image the game draws
pub struct Assets {
    pub bullet: Sprite,
    pub gun: Sprite,
    pub heart: Sprite,
    /// Ground tile sheet; tile ids index tiles left to right
    pub tiles: Sprite,
    /// Player walk frames, one row per facing
    pub player: [Vec<Sprite>; 4],
    /// Enemy types in sorted directory order, so RNG indices are stable
    pub enemies: Vec<FrameSet>,
    /// Obstacle sprites keyed by the map's sprite names
    pub objects: HashMap<String, Sprite>,
}

/// Sprite row for a facing, fixed by the player sprite layout
pub fn facing_row(facing: Facing) -> usize {
    match facing {
        Facing::Down => 0,
        Facing::Up => 1,
        Facing::Left => 2,
        Facing::Right => 3,
    }
}

fn load_sprite(path: &Path) -> Result<Sprite, AssetError> {
    let img = image::open(path)
        .map_err(|e| AssetError::Decode(format!("{}: {e}", path.display())))?
        .to_rgba8();
    let (w, h) = img.dimensions();
    let mask = PixelMask::from_rgba(w, h, img.as_raw());
    let texture = Texture2D::from_rgba8(w as u16, h as u16, img.as_raw());
    texture.set_filter(FilterMode::Nearest);
    Ok(Sprite {
        texture,
        mask,
        width: w as f32,
        height: h as f32,
    })
}

/// Load `<n>.png` frames from a directory, ordered by the numeric prefix
fn load_frames(dir: &Path) -> Result<Vec<Sprite>, AssetError> {
    let mut numbered: Vec<(u32, PathBuf)> = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.extension().and_then(|e| e.to_str()) != Some("png") {
            continue;
        }
        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or_default();
        let index: u32 = stem.parse().map_err(|_| {
            AssetError::Decode(format!("frame without numeric name: {}", path.display()))
        })?;
        numbered.push((index, path));
    }
    if numbered.is_empty() {
        return Err(AssetError::Missing(format!(
            "no frames in {}",
            dir.display()
        )));
    }
    numbered.sort_by_key(|(index, _)| *index);

    numbered
        .into_iter()
        .map(|(_, path)| load_sprite(&path))
        .collect()
}

impl Assets {
    /// Load every sprite under `dir`, including one obstacle sprite per
    /// distinct name the map references
    pub fn load(dir: &Path, map: &MapData) -> Result<Self, AssetError> {
        let images = dir.join("images");

        let bullet = load_sprite(&images.join("gun/bullet.png"))?;
        let gun = load_sprite(&images.join("gun/gun.png"))?;
        let heart = load_sprite(&images.join("ui/heart.png"))?;
        let tiles = load_sprite(&images.join("tiles.png"))?;

        let player_dir = images.join("player");
        let player = [
            load_frames(&player_dir.join("down"))?,
            load_frames(&player_dir.join("up"))?,
            load_frames(&player_dir.join("left"))?,
            load_frames(&player_dir.join("right"))?,
        ];

        // Enemy types are subdirectories of images/enemies, in name order
        let enemy_root = images.join("enemies");
        let mut type_dirs: Vec<PathBuf> = fs::read_dir(&enemy_root)?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|p| p.is_dir())
            .collect();
        type_dirs.sort();
        if type_dirs.is_empty() {
            return Err(AssetError::Missing(format!(
                "no enemy types in {}",
                enemy_root.display()
            )));
        }
        let mut enemies = Vec::with_capacity(type_dirs.len());
        for type_dir in type_dirs {
            let name = type_dir
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or_default()
                .to_string();
            let frames = load_frames(&type_dir)?;
            enemies.push(FrameSet { name, frames });
        }

        let mut objects = HashMap::new();
        for object in &map.objects {
            if !objects.contains_key(&object.sprite) {
                let sprite = load_sprite(&images.join(format!("objects/{}.png", object.sprite)))?;
                objects.insert(object.sprite.clone(), sprite);
            }
        }

        log::info!(
            "Loaded assets: {} enemy types, {} object sprites",
            enemies.len(),
            objects.len()
        );

        Ok(Self {
            bullet,
            gun,
            heart,
            tiles,
            player,
            enemies,
            objects,
        })
    }

    /// Collision masks for the simulation, cloned out of the sprites so
    /// the sim never touches textures
    pub fn mask_set(&self) -> MaskSet {
        MaskSet {
            player: self.player[facing_row(Facing::Down)][0].mask.clone(),
            bullet: self.bullet.mask.clone(),
            enemies: self
                .enemies
                .iter()
                .map(|set| set.frames.iter().map(|f| f.mask.clone()).collect())
                .collect(),
        }
    }
}
