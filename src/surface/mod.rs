//! Capabilities a [`crate::tile_map::TileMap`] consumes from its surroundings:
//! an atlas that knows its pixel size, and a target that can copy a
//! rectangle out of that atlas.

pub mod canvas;

use std::rc::Rc;
use std::sync::Arc;

use crate::geometry::Rect;

pub use canvas::{Canvas, ImageAtlas};

// ── AtlasTexture ──────────────────────────────────────────────────────────────

/// An atlas image whose pixel size can be queried.
pub trait AtlasTexture {
    /// `(width, height)` in pixels.
    fn dimensions(&self) -> (u32, u32);
}

impl<T: AtlasTexture + ?Sized> AtlasTexture for &T {
    fn dimensions(&self) -> (u32, u32) {
        (**self).dimensions()
    }
}

impl<T: AtlasTexture + ?Sized> AtlasTexture for Rc<T> {
    fn dimensions(&self) -> (u32, u32) {
        (**self).dimensions()
    }
}

impl<T: AtlasTexture + ?Sized> AtlasTexture for Arc<T> {
    fn dimensions(&self) -> (u32, u32) {
        (**self).dimensions()
    }
}

// ── BlitTarget ────────────────────────────────────────────────────────────────

/// A drawable that accepts "copy `source` of `atlas` into `dest`".
///
/// `source` and `dest` may differ in size; the target scales. Neither
/// rectangle is guaranteed to lie inside its surface.
pub trait BlitTarget<A: ?Sized> {
    fn blit(&mut self, atlas: &A, source: Rect, dest: Rect);
}

// ── BlitRecorder ──────────────────────────────────────────────────────────────

/// Target that remembers every blit it receives, in order, without drawing.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BlitRecorder {
    pub blits: Vec<(Rect, Rect)>,
}

impl BlitRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.blits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blits.is_empty()
    }

    pub fn clear(&mut self) {
        self.blits.clear();
    }
}

impl<A: ?Sized> BlitTarget<A> for BlitRecorder {
    fn blit(&mut self, _atlas: &A, source: Rect, dest: Rect) {
        self.blits.push((source, dest));
    }
}
