//! Self-rescheduling item spawn chain
//!
//! The chain is a single-owner resource: one live generation at a time.
//! Each [`fire`] spawns at most one item and hands back the delay for the
//! platform timer to schedule the next link. Cancel or re-arm bumps the
//! generation, so a stray timer scheduled before a restart dies on its next
//! fire instead of resuming the old chain.

use rand::Rng;

use super::state::{GamePhase, GameState, Item, ItemKind};
use crate::catalog::{SpriteCatalog, SpriteRef};
use crate::consts::*;

/// Token held by the platform timer; valid for exactly one chain generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpawnHandle {
    generation: u64,
}

/// The next link of the chain, to be scheduled after `delay_ms`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScheduledSpawn {
    pub handle: SpawnHandle,
    pub delay_ms: f64,
}

/// Spawn-chain ownership state, held inside [`GameState`].
#[derive(Debug, Clone)]
pub struct Spawner {
    armed: bool,
    generation: u64,
}

impl Spawner {
    pub fn new() -> Self {
        Self {
            armed: false,
            generation: 0,
        }
    }

    /// Tear down any previous chain and start a fresh one.
    pub fn arm(&mut self) -> SpawnHandle {
        self.generation += 1;
        self.armed = true;
        SpawnHandle {
            generation: self.generation,
        }
    }

    /// Terminate the chain. Idempotent; also invalidates outstanding handles.
    pub fn cancel(&mut self) {
        self.armed = false;
        self.generation += 1;
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    /// Whether a timer holding this handle still owns the live chain.
    pub fn accepts(&self, handle: SpawnHandle) -> bool {
        self.armed && handle.generation == self.generation
    }
}

impl Default for Spawner {
    fn default() -> Self {
        Self::new()
    }
}

/// One link of the spawn chain: spawn a single item, then compute the delay
/// until the next link. Returns `None` when the chain is dead (stale handle,
/// cancelled, or game over) so the platform stops scheduling.
pub fn fire(
    state: &mut GameState,
    catalog: &SpriteCatalog,
    handle: SpawnHandle,
) -> Option<ScheduledSpawn> {
    if !state.spawner.accepts(handle) || state.phase == GamePhase::GameOver {
        return None;
    }

    spawn_one(state, catalog);

    let delay_ms = (state.spawn_interval_ms - state.score as f64 * SPAWN_MS_PER_POINT)
        .max(MIN_SPAWN_INTERVAL_MS);
    Some(ScheduledSpawn { handle, delay_ms })
}

/// Spawn a single item just above the visible top edge. A category with no
/// drawables loaded skips the spawn silently; the chain keeps running.
fn spawn_one(state: &mut GameState, catalog: &SpriteCatalog) {
    let x = state.rng.random::<f32>() * (BOARD_WIDTH - ITEM_WIDTH);
    let kind = if state.rng.random::<f32>() < GOOD_ITEM_CHANCE {
        ItemKind::Good
    } else {
        ItemKind::Bad
    };

    if catalog.is_empty(kind) {
        return;
    }
    let index = state.rng.random_range(0..catalog.len(kind));

    state.items.push(Item {
        x,
        y: -ITEM_HEIGHT,
        width: ITEM_WIDTH,
        height: ITEM_HEIGHT,
        kind,
        rotation: 0.0,
        sprite: SpriteRef { kind, index },
    });
}
