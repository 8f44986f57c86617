use tracing::{debug, trace};

use crate::atlas::{AtlasGeometry, TileIndex};
use crate::error::{TileMapError, TileMapResult};
use crate::geometry::{Rect, clamp_coord};
use crate::surface::{AtlasTexture, BlitTarget};

/// Tile index every cell holds after construction (the atlas's first tile).
pub const DEFAULT_INDEX: TileIndex = 0;

// ── TileBlit ──────────────────────────────────────────────────────────────────

/// One cell's contribution to a frame: which atlas tile it shows and where.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TileBlit {
    pub column: u32,
    pub row: u32,
    pub index: TileIndex,
    /// Pixel rectangle sampled from the atlas.
    pub source: Rect,
    /// Pixel rectangle written on the target.
    pub dest: Rect,
}

// ── TileMap ───────────────────────────────────────────────────────────────────

/// Fixed-size grid of atlas tile indices.
///
/// The map shares the atlas handle `A` it was built with (`&T`, `Rc<T>`,
/// `Arc<T>`, ...) and never modifies the atlas.  Its geometry is read from the
/// atlas once, at construction.
///
/// Cells are stored row-major: cell `(column, row)` lives at
/// `row * columns + column`.
#[derive(Clone, Debug)]
pub struct TileMap<A> {
    atlas: A,
    geometry: AtlasGeometry,
    columns: u32,
    rows: u32,
    cells: Vec<TileIndex>,
}

impl<A: AtlasTexture> TileMap<A> {
    /// Create a `grid_columns × grid_rows` map over an atlas cut into
    /// `atlas_columns × atlas_rows` tiles.  Every cell starts at
    /// [`DEFAULT_INDEX`].
    ///
    /// Fails with [`TileMapError::InvalidDimension`] when any count is zero or
    /// the atlas has fewer pixels than tiles along an axis.
    pub fn new(
        atlas: A,
        atlas_columns: u32,
        atlas_rows: u32,
        grid_columns: u32,
        grid_rows: u32,
    ) -> TileMapResult<Self> {
        if grid_columns == 0 {
            return Err(TileMapError::InvalidDimension { what: "grid columns", value: 0 });
        }
        if grid_rows == 0 {
            return Err(TileMapError::InvalidDimension { what: "grid rows", value: 0 });
        }
        let (atlas_w, atlas_h) = atlas.dimensions();
        let geometry = AtlasGeometry::new(atlas_w, atlas_h, atlas_columns, atlas_rows)?;

        debug!(
            grid_columns,
            grid_rows,
            atlas_w,
            atlas_h,
            tile_w = geometry.tile_width(),
            tile_h = geometry.tile_height(),
            "Created tile map"
        );

        Ok(Self {
            atlas,
            geometry,
            columns: grid_columns,
            rows: grid_rows,
            cells: vec![DEFAULT_INDEX; grid_columns as usize * grid_rows as usize],
        })
    }
}

impl<A> TileMap<A> {
    pub fn columns(&self) -> u32 { self.columns }
    pub fn rows(&self) -> u32 { self.rows }
    pub fn geometry(&self) -> &AtlasGeometry { &self.geometry }
    pub fn atlas(&self) -> &A { &self.atlas }

    /// All cells, row-major.
    pub fn cells(&self) -> &[TileIndex] {
        &self.cells
    }

    /// Set cell `(column, row)` to show atlas tile `index`.
    ///
    /// `index` is not checked against the atlas; an index past the last tile
    /// samples outside the atlas when rendered.  Use
    /// [`set_tile_checked`](Self::set_tile_checked) to reject it up front.
    pub fn set_tile(&mut self, column: u32, row: u32, index: TileIndex) -> TileMapResult<()> {
        let offset = self.offset(column, row)?;
        self.cells[offset] = index;
        Ok(())
    }

    /// Like [`set_tile`](Self::set_tile), but also fails with
    /// [`TileMapError::InvalidAtlasIndex`] when `index` names no atlas tile.
    /// The cell is left untouched on failure.
    pub fn set_tile_checked(&mut self, column: u32, row: u32, index: TileIndex) -> TileMapResult<()> {
        let offset = self.offset(column, row)?;
        self.cells[offset] = self.geometry.check_index(index)?;
        Ok(())
    }

    /// Tile index stored in cell `(column, row)`.
    pub fn tile(&self, column: u32, row: u32) -> TileMapResult<TileIndex> {
        self.offset(column, row).map(|offset| self.cells[offset])
    }

    /// Set every cell to `index`.
    pub fn fill(&mut self, index: TileIndex) {
        self.cells.fill(index);
    }

    /// Atlas index of the tile at `(source_column, source_row)`; see
    /// [`AtlasGeometry::index`].
    pub fn get_index(&self, source_column: u32, source_row: u32) -> TileIndex {
        self.geometry.index(source_column, source_row)
    }

    /// Destination rectangle of cell `(column, row)` for a render at
    /// `(origin_x, origin_y)` with magnification `scale`.
    ///
    /// Pure projection; the cell does not need to exist.
    pub fn cell_rect(&self, column: u32, row: u32, origin_x: i32, origin_y: i32, scale: u32) -> Rect {
        let tile_w = self.geometry.tile_width();
        let tile_h = self.geometry.tile_height();
        Rect {
            x: project(origin_x, column, tile_w, scale),
            y: project(origin_y, row, tile_h, scale),
            w: tile_w.saturating_mul(scale),
            h: tile_h.saturating_mul(scale),
        }
    }

    /// Inverse of [`cell_rect`](Self::cell_rect): the cell covering surface
    /// point `(x, y)`, or `None` if the point is outside the grid.
    pub fn cell_at(&self, x: i32, y: i32, origin_x: i32, origin_y: i32, scale: u32) -> Option<(u32, u32)> {
        let cell_w = self.geometry.tile_width() as i64 * scale as i64;
        let cell_h = self.geometry.tile_height() as i64 * scale as i64;
        if cell_w == 0 || cell_h == 0 {
            return None;
        }
        let dx = x as i64 - origin_x as i64;
        let dy = y as i64 - origin_y as i64;
        if dx < 0 || dy < 0 {
            return None;
        }
        let (column, row) = (dx / cell_w, dy / cell_h);
        if column >= self.columns as i64 || row >= self.rows as i64 {
            return None;
        }
        Some((column as u32, row as u32))
    }

    /// Surface area `(width, height)` covered by the whole grid at `scale`.
    pub fn pixel_size(&self, scale: u32) -> (u32, u32) {
        (
            self.columns
                .saturating_mul(self.geometry.tile_width())
                .saturating_mul(scale),
            self.rows
                .saturating_mul(self.geometry.tile_height())
                .saturating_mul(scale),
        )
    }

    /// Every cell's blit for a render at `(origin_x, origin_y)`, in draw
    /// order: row 0 first, left to right within a row.
    pub fn blits(&self, origin_x: i32, origin_y: i32, scale: u32) -> impl Iterator<Item = TileBlit> + '_ {
        (0..self.rows).flat_map(move |row| {
            (0..self.columns).map(move |column| {
                let index = self.cells[row as usize * self.columns as usize + column as usize];
                TileBlit {
                    column,
                    row,
                    index,
                    source: self.geometry.source_rect(index),
                    dest: self.cell_rect(column, row, origin_x, origin_y, scale),
                }
            })
        })
    }

    /// Draw the whole grid onto `target`, one blit per cell in
    /// [`blits`](Self::blits) order.
    ///
    /// Only writes into the target; presenting it is up to the caller.
    /// Fails with [`TileMapError::InvalidScale`] before drawing anything when
    /// `scale` is zero.
    pub fn render<T>(&self, target: &mut T, origin_x: i32, origin_y: i32, scale: u32) -> TileMapResult<()>
    where
        T: BlitTarget<A> + ?Sized,
    {
        if scale == 0 {
            return Err(TileMapError::InvalidScale(scale));
        }
        for blit in self.blits(origin_x, origin_y, scale) {
            target.blit(&self.atlas, blit.source, blit.dest);
        }
        trace!(cells = self.cells.len(), scale, "Rendered tile map");
        Ok(())
    }

    fn offset(&self, column: u32, row: u32) -> TileMapResult<usize> {
        if column >= self.columns || row >= self.rows {
            return Err(TileMapError::OutOfBounds {
                column,
                row,
                columns: self.columns,
                rows: self.rows,
            });
        }
        Ok(row as usize * self.columns as usize + column as usize)
    }
}

/// `origin + cell * tile * scale`, clamped to the `i32` range.
fn project(origin: i32, cell: u32, tile: u32, scale: u32) -> i32 {
    let offset = (cell as u64)
        .saturating_mul(tile as u64)
        .saturating_mul(scale as u64);
    let offset = i64::try_from(offset).unwrap_or(i64::MAX);
    clamp_coord((origin as i64).saturating_add(offset))
}

// ── Tests ──────────────────────────────────────────────────────────────────────
