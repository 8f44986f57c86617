//! JSON description of a tile map and how the viewer shows it.
//!
//! ```json
//! {
//!   "window": { "title": "town", "width": 0, "height": 0 },
//!   "atlas": { "path": "tiles.png", "columns": 8, "rows": 8 },
//!   "grid": { "columns": 20, "rows": 12 },
//!   "origin": [0, 0],
//!   "scale": 2,
//!   "fill": { "column": 1, "row": 0 },
//!   "tiles": [
//!     { "column": 0, "row": 0, "tile": 5 },
//!     { "column": 6, "row": 5, "tile": { "column": 3, "row": 2 } }
//!   ]
//! }
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::atlas::TileIndex;
use crate::error::{SetupError, TileMapError, TileMapResult};
use crate::surface::AtlasTexture;
use crate::tile_map::TileMap;
use crate::window::WindowConfig;

/// Atlas image and how it is cut into tiles.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct AtlasConfig {
    /// Image path; relative paths are resolved against the map file's folder
    /// by [`MapConfig::load`].
    pub path: PathBuf,
    pub columns: u32,
    pub rows: u32,
}

/// Grid dimensions in cells.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct GridConfig {
    pub columns: u32,
    pub rows: u32,
}

/// A tile either by atlas index or by its column/row inside the atlas.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum TileRef {
    Index(TileIndex),
    Source { column: u32, row: u32 },
}

/// One cell assignment.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct TilePlacement {
    pub column: u32,
    pub row: u32,
    pub tile: TileRef,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct MapConfig {
    #[serde(default)]
    pub window: WindowConfig,
    pub atlas: AtlasConfig,
    pub grid: GridConfig,
    /// Top-left corner of the grid on the surface, in pixels.
    #[serde(default)]
    pub origin: [i32; 2],
    #[serde(default = "default_scale")]
    pub scale: u32,
    /// RGBA background drawn before the grid.
    #[serde(default = "default_clear_color")]
    pub clear_color: [u8; 4],
    /// Tile written to every cell before `tiles` are applied.
    #[serde(default)]
    pub fill: Option<TileRef>,
    #[serde(default)]
    pub tiles: Vec<TilePlacement>,
    /// Reject tile indices past the last atlas tile instead of rendering
    /// whatever lies outside the atlas.
    #[serde(default)]
    pub strict: bool,
}

fn default_scale() -> u32 {
    1
}

fn default_clear_color() -> [u8; 4] {
    [0, 0, 0, 255]
}

impl MapConfig {
    pub fn from_json(json: &str) -> Result<Self, SetupError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read a map file.  A relative atlas path is rewritten to be relative
    /// to the folder containing the map file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SetupError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| SetupError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config = Self::from_json(&json)?;
        if config.atlas.path.is_relative() {
            if let Some(dir) = path.parent() {
                config.atlas.path = dir.join(&config.atlas.path);
            }
        }
        Ok(config)
    }

    /// Build the described tile map over `atlas`.
    ///
    /// Fails on zero dimensions, a zero scale, placements outside the grid
    /// and, when `strict` is set, tile indices outside the atlas.
    pub fn build<A: AtlasTexture>(&self, atlas: A) -> TileMapResult<TileMap<A>> {
        if self.scale == 0 {
            return Err(TileMapError::InvalidScale(self.scale));
        }
        let mut map = TileMap::new(
            atlas,
            self.atlas.columns,
            self.atlas.rows,
            self.grid.columns,
            self.grid.rows,
        )?;

        if let Some(fill) = self.fill {
            let index = resolve(&map, fill);
            if self.strict {
                map.geometry().check_index(index)?;
            }
            map.fill(index);
        }
        for placement in &self.tiles {
            let index = resolve(&map, placement.tile);
            if self.strict {
                map.set_tile_checked(placement.column, placement.row, index)?;
            } else {
                map.set_tile(placement.column, placement.row, index)?;
            }
        }
        Ok(map)
    }
}

fn resolve<A>(map: &TileMap<A>, tile: TileRef) -> TileIndex {
    match tile {
        TileRef::Index(index) => index,
        TileRef::Source { column, row } => map.get_index(column, row),
    }
}
