//! Game state and core simulation types
//!
//! One explicit state struct owned by the game loop; no hidden globals.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::spawner::Spawner;
use crate::catalog::SpriteRef;
use crate::consts::*;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Terminal until an explicit restart
    GameOver,
}

/// Item category, decides the scoring effect on collision
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    Good,
    Bad,
}

/// The player sprite, pinned near the bottom edge
#[derive(Debug, Clone)]
pub struct Player {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Player {
    /// Player at the horizontal center of the board
    pub fn centered() -> Self {
        Self {
            x: BOARD_WIDTH / 2.0 - PLAYER_WIDTH / 2.0,
            y: BOARD_HEIGHT - PLAYER_HEIGHT - PLAYER_BOTTOM_MARGIN,
            width: PLAYER_WIDTH,
            height: PLAYER_HEIGHT,
        }
    }

    /// Clamp x into the playfield
    pub fn clamp_to_board(&mut self) {
        self.x = self.x.clamp(0.0, BOARD_WIDTH - self.width);
    }
}

/// A falling item
#[derive(Debug, Clone)]
pub struct Item {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub kind: ItemKind,
    /// Rotation about the item center, radians
    pub rotation: f32,
    pub sprite: SpriteRef,
}

impl Item {
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

/// Burst particle colors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParticleColor {
    /// Good catch
    Green,
    /// Bad hit
    Red,
}

impl ParticleColor {
    pub fn css(&self) -> &'static str {
        match self {
            ParticleColor::Green => "#00ff00",
            ParticleColor::Red => "#ff0000",
        }
    }
}

/// A burst particle (visual only, never gameplay-affecting)
#[derive(Debug, Clone)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub color: ParticleColor,
    /// Opacity 1 -> 0; removed at <= 0
    pub alpha: f64,
    pub size: f32,
}

/// A decorative background star; created once, never destroyed
#[derive(Debug, Clone)]
pub struct Star {
    pub pos: Vec2,
    pub size: f32,
    pub alpha: f64,
    /// Signed per-frame alpha drift; sign flips at the alpha bounds
    pub twinkle: f64,
}

/// Events emitted by the simulation for the platform layer to react to
/// (scheduling the spawn chain, logging). Drained once per frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    /// A fresh spawn chain wants its first timer fired immediately.
    SpawnChainArmed(super::spawner::SpawnHandle),
    /// A good item was caught at this position.
    Caught { x: f32, y: f32 },
    /// Level increased to the given value.
    LevelUp(u32),
    /// A bad item ended the run.
    GameOver { score: u32 },
}

/// Complete game state (deterministic for a given seed + input sequence)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    /// Monotonic while Playing, frozen once GameOver
    pub score: u32,
    /// Starts at 1, +1 per 10 score points
    pub level: u32,
    pub phase: GamePhase,
    /// Base spawn interval; shrinks on level-up, floored at 300 ms
    pub spawn_interval_ms: f64,
    /// Score-highlight frames remaining (cosmetic, decremented by renderer)
    pub score_glow: u8,
    /// Frame counter
    pub frame: u64,
    pub player: Player,
    /// Insertion order = spawn order
    pub items: Vec<Item>,
    pub particles: Vec<Particle>,
    pub stars: Vec<Star>,
    pub spawner: Spawner,
    /// Pending events, drained by the platform layer each frame
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new game state with the given seed. The spawn chain starts
    /// disarmed; callers arm it via [`GameState::arm_spawn_chain`].
    pub fn new(seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let stars = (0..STAR_COUNT)
            .map(|_| Star {
                pos: Vec2::new(
                    rng.random::<f32>() * BOARD_WIDTH,
                    rng.random::<f32>() * BOARD_HEIGHT,
                ),
                size: rng.random::<f32>() * 2.0 + 1.0,
                alpha: rng.random::<f64>() * 0.5 + 0.3,
                twinkle: rng.random::<f64>() * 0.02 + 0.01,
            })
            .collect();

        Self {
            seed,
            rng,
            score: 0,
            level: 1,
            phase: GamePhase::Playing,
            spawn_interval_ms: BASE_SPAWN_INTERVAL_MS,
            score_glow: 0,
            frame: 0,
            player: Player::centered(),
            items: Vec::new(),
            particles: Vec::new(),
            stars,
            spawner: Spawner::new(),
            events: Vec::new(),
        }
    }

    /// Arm a fresh spawn chain and announce it. Any timer still scheduled
    /// from an earlier chain holds a stale handle and dies on its next fire.
    pub fn arm_spawn_chain(&mut self) {
        let handle = self.spawner.arm();
        self.events.push(GameEvent::SpawnChainArmed(handle));
    }

    /// Reset all counters and collections to their initial values and re-arm
    /// the spawn chain. Stars keep twinkling across runs.
    pub fn restart(&mut self) {
        self.score = 0;
        self.level = 1;
        self.phase = GamePhase::Playing;
        self.spawn_interval_ms = BASE_SPAWN_INTERVAL_MS;
        self.score_glow = 0;
        self.items.clear();
        self.particles.clear();
        self.player = Player::centered();
        self.arm_spawn_chain();
    }

    /// Spawn a particle burst centered on a point.
    pub fn spawn_burst(&mut self, center: Vec2, color: ParticleColor, count: usize) {
        for _ in 0..count {
            let vel = Vec2::new(
                (self.rng.random::<f32>() - 0.5) * 8.0,
                (self.rng.random::<f32>() - 0.5) * 8.0 - 2.0,
            );
            self.particles.push(Particle {
                pos: center,
                vel,
                color,
                alpha: 1.0,
                size: self.rng.random::<f32>() * 4.0 + 2.0,
            });
        }
    }

    /// Drain pending events for the platform layer.
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
