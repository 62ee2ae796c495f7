//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Advanced one frame at a time by explicit input
//! - Seeded RNG only
//! - Stable iteration order (insertion order = spawn order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod spawner;
pub mod state;
pub mod tick;

pub use collision::{BoundingBox, overlaps};
pub use spawner::{ScheduledSpawn, SpawnHandle, Spawner};
pub use state::{
    GameEvent, GamePhase, GameState, Item, ItemKind, Particle, ParticleColor, Player, Star,
};
pub use tick::{FrameInput, tick};
