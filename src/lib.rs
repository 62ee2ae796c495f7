//! Cami Catch - a catch-the-falling-items arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, spawning, collisions, scoring)
//! - `catalog`: Opaque drawable-item catalog shared with the renderer
//! - `renderer`: 2D canvas scene composition behind a `Surface` trait
//!
//! The simulation is platform-free: `main.rs` feeds it per-frame input and
//! drives the spawn chain from browser timers.

pub mod catalog;
pub mod renderer;
pub mod sim;

pub use catalog::{SpriteCatalog, SpriteRef};
pub use sim::{FrameInput, GameEvent, GamePhase, GameState, tick};

/// Game configuration constants
pub mod consts {
    /// Playfield dimensions (fixed, not runtime-configurable)
    pub const BOARD_WIDTH: f32 = 400.0;
    pub const BOARD_HEIGHT: f32 = 650.0;

    /// Player sprite size and resting offset above the bottom edge
    pub const PLAYER_WIDTH: f32 = 100.0;
    pub const PLAYER_HEIGHT: f32 = 100.0;
    pub const PLAYER_BOTTOM_MARGIN: f32 = 15.0;
    /// Horizontal movement per held direction, pixels per frame
    pub const PLAYER_SPEED: f32 = 4.0;

    /// Falling item size
    pub const ITEM_WIDTH: f32 = 70.0;
    pub const ITEM_HEIGHT: f32 = 70.0;
    /// Base fall speed, pixels per frame
    pub const BASE_ITEM_SPEED: f32 = 5.5;
    /// Extra fall speed per score point
    pub const ITEM_SPEED_PER_POINT: f32 = 0.1;
    /// Vertical wobble: phase frequency over y, and amplitude
    pub const ITEM_WOBBLE_FREQ: f32 = 0.01;
    pub const ITEM_WOBBLE_AMPLITUDE: f32 = 0.5;
    /// Rotation per frame, radians
    pub const ITEM_SPIN: f32 = 0.02;
    /// Probability a spawned item is good (vs bad)
    pub const GOOD_ITEM_CHANCE: f32 = 0.75;

    /// Spawn cadence: starting interval, per-point speedup, hard floor
    pub const BASE_SPAWN_INTERVAL_MS: f64 = 800.0;
    pub const SPAWN_MS_PER_POINT: f64 = 5.0;
    pub const MIN_SPAWN_INTERVAL_MS: f64 = 300.0;
    /// Base interval reduction on each level-up
    pub const LEVEL_SPAWN_DROP_MS: f64 = 150.0;
    /// Score points per level
    pub const POINTS_PER_LEVEL: u32 = 10;

    /// Particle burst sizes for catches and bad hits
    pub const CATCH_BURST_COUNT: usize = 8;
    pub const BAD_HIT_BURST_COUNT: usize = 15;
    /// Particle integration constants, per frame. Alpha is f64 end to end:
    /// it decays in fixed steps and feeds the canvas global alpha directly.
    pub const PARTICLE_GRAVITY: f32 = 0.1;
    pub const PARTICLE_FADE: f64 = 0.02;
    pub const PARTICLE_SHRINK: f32 = 0.98;

    /// Decorative starfield
    pub const STAR_COUNT: usize = 20;
    pub const STAR_ALPHA_MAX: f64 = 0.8;
    pub const STAR_ALPHA_MIN: f64 = 0.1;

    /// Score-highlight duration in frames (cosmetic only)
    pub const SCORE_GLOW_FRAMES: u8 = 10;
}
