//! Tile-grid renderer.
//!
//! A [`TileMap`] holds a fixed grid of atlas tile indices and draws itself by
//! issuing one blit per cell onto any [`BlitTarget`]: a software [`Canvas`],
//! the GPU [`QuadBatch`](renderer::QuadBatch), or a [`BlitRecorder`].

pub mod app;
pub mod atlas;
pub mod config;
pub mod error;
pub mod geometry;
pub mod renderer;
pub mod surface;
pub mod tile_map;
pub mod window;

pub use atlas::{AtlasGeometry, TileIndex};
pub use error::{SetupError, TileMapError, TileMapResult};
pub use geometry::Rect;
pub use surface::{AtlasTexture, BlitRecorder, BlitTarget, Canvas, ImageAtlas};
pub use tile_map::{TileBlit, TileMap};
