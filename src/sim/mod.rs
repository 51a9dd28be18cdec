//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure and testable:
//! - dt clamped, seeded RNG only
//! - stable iteration order (by entity ID)
//! - no rendering, audio, or file I/O; outcomes surface via `TickEvents`

pub mod collision;
pub mod mask;
pub mod mode;
pub mod state;
pub mod tick;

pub use collision::{Aabb, masks_collide, move_axis_separated};
pub use mask::{MaskSet, PixelMask};
pub use mode::{EventOutcome, ModeAction, ModeEvent, transition};
pub use state::{
    Bullet, Enemy, Facing, GameMode, GameSession, GameState, Player, RoundSetup,
};
pub use tick::{TickEvents, TickInput, tick};
