//! Error types for tile maps and for setting up the viewer.

use std::path::PathBuf;

use thiserror::Error;

/// Errors reported by [`crate::atlas::AtlasGeometry`] and [`crate::tile_map::TileMap`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TileMapError {
    /// A grid or atlas dimension is zero, or the atlas is too small to give
    /// every tile at least one pixel.
    #[error("invalid {what}: {value}")]
    InvalidDimension {
        /// Which dimension was rejected.
        what: &'static str,
        /// The rejected value.
        value: u32,
    },

    /// A cell address lies outside the grid.
    #[error("cell ({column}, {row}) is outside the {columns}x{rows} grid")]
    OutOfBounds {
        column: u32,
        row: u32,
        columns: u32,
        rows: u32,
    },

    /// A tile index does not name a tile of the atlas.
    #[error("tile index {index} is outside the atlas ({tile_count} tiles)")]
    InvalidAtlasIndex { index: u32, tile_count: u32 },

    /// Render scale must be a positive integer.
    #[error("invalid render scale: {0} (must be >= 1)")]
    InvalidScale(u32),
}

/// Result type for tile map operations.
pub type TileMapResult<T> = std::result::Result<T, TileMapError>;

/// Errors that abort start-up of the viewer.
#[derive(Debug, Error)]
pub enum SetupError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode image {path}: {source}")]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("invalid map description: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid tile map: {0}")]
    TileMap(#[from] TileMapError),

    #[error("event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),

    #[error("failed to create window: {0}")]
    Window(#[from] winit::error::OsError),

    #[error("failed to create surface: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),

    #[error("no suitable GPU adapter found: {0}")]
    Adapter(#[from] wgpu::RequestAdapterError),

    #[error("failed to create device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),

    #[error("surface reports no supported {0}")]
    SurfaceUnsupported(&'static str),

    #[error("snapshot of {width}x{height} px exceeds the {max}x{max} limit")]
    SnapshotTooLarge { width: u32, height: u32, max: u32 },
}
