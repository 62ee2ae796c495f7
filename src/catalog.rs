//! Drawable-item catalog
//!
//! The simulation never touches image data. Spawned items carry a
//! [`SpriteRef`] into the catalog; the platform layer pairs each slot with a
//! pre-loaded image before the first spawn, and the renderer resolves refs
//! back to those images at draw time.

use crate::sim::state::ItemKind;

/// Opaque reference to one drawable in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpriteRef {
    pub kind: ItemKind,
    pub index: usize,
}

/// Slot counts for the two item categories.
///
/// An empty category is a degenerate state, not an error: the spawner skips
/// spawns for that category silently.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpriteCatalog {
    pub good: usize,
    pub bad: usize,
}

impl SpriteCatalog {
    pub fn new(good: usize, bad: usize) -> Self {
        Self { good, bad }
    }

    /// Number of drawables available for a category.
    pub fn len(&self, kind: ItemKind) -> usize {
        match kind {
            ItemKind::Good => self.good,
            ItemKind::Bad => self.bad,
        }
    }

    pub fn is_empty(&self, kind: ItemKind) -> bool {
        self.len(kind) == 0
    }
}
