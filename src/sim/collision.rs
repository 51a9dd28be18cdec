//! Collision detection and response
//!
//! Two regimes:
//! - movement vs static obstacles: axis-separated AABB rejection, so a
//!   diagonal move into a wall slides along the clear axis instead of
//!   stopping dead
//! - dynamic vs dynamic (bullet-enemy, player-enemy): rectangle gate first,
//!   then opaque-pixel mask overlap inside the intersection

use glam::Vec2;

use super::mask::PixelMask;

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Box of the given size centered on `pos`
    pub fn from_center(pos: Vec2, size: Vec2) -> Self {
        let half = size * 0.5;
        Self {
            min: pos - half,
            max: pos + half,
        }
    }

    /// Box from top-left corner and size
    pub fn from_rect(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            min: Vec2::new(x, y),
            max: Vec2::new(x + w, y + h),
        }
    }

    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }

    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }
}

fn overlaps_any(rect: &Aabb, obstacles: &[Aabb]) -> bool {
    obstacles.iter().any(|o| rect.overlaps(o))
}

/// Move a box-shaped entity by `delta`, rejecting each axis component that
/// would newly overlap an obstacle. Returns the resolved position.
pub fn move_axis_separated(pos: Vec2, size: Vec2, delta: Vec2, obstacles: &[Aabb]) -> Vec2 {
    let mut resolved = pos;

    resolved.x += delta.x;
    if overlaps_any(&Aabb::from_center(resolved, size), obstacles) {
        resolved.x = pos.x;
    }

    resolved.y += delta.y;
    if overlaps_any(&Aabb::from_center(resolved, size), obstacles) {
        resolved.y = pos.y;
    }

    resolved
}

/// Pixel-accurate collision between two sprites centered at `pos_a`/`pos_b`
///
/// The sprite rects are the mask dimensions centered on the positions. The
/// rect test is the cheap gate; the mask scan only runs on the overlap.
pub fn masks_collide(pos_a: Vec2, mask_a: &PixelMask, pos_b: Vec2, mask_b: &PixelMask) -> bool {
    let size_a = Vec2::new(mask_a.width() as f32, mask_a.height() as f32);
    let size_b = Vec2::new(mask_b.width() as f32, mask_b.height() as f32);

    let rect_a = Aabb::from_center(pos_a, size_a);
    let rect_b = Aabb::from_center(pos_b, size_b);
    if !rect_a.overlaps(&rect_b) {
        return false;
    }

    // Offset of b's top-left relative to a's top-left, in pixels
    let offset = rect_b.min - rect_a.min;
    mask_a.overlaps(mask_b, (offset.x.round() as i32, offset.y.round() as i32))
}
