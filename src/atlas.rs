use crate::error::{TileMapError, TileMapResult};
use crate::geometry::{Rect, to_coord};

/// Position of a tile inside the atlas, numbered row-major:
/// `row * columns + column`.
pub type TileIndex = u32;

// ── AtlasGeometry ─────────────────────────────────────────────────────────────

/// Layout of an atlas holding `columns × rows` equally sized tiles.
///
/// Tile size is derived with floor division, so pixels left over on the right
/// or bottom edge of an atlas that does not divide evenly are never sampled.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct AtlasGeometry {
    atlas_w: u32,
    atlas_h: u32,
    columns: u32,
    rows: u32,
    tile_w: u32,
    tile_h: u32,
}

impl AtlasGeometry {
    /// Describe an atlas of `atlas_w × atlas_h` pixels cut into
    /// `columns × rows` tiles.
    ///
    /// Fails with [`TileMapError::InvalidDimension`] when any value is zero or
    /// when a tile would end up narrower/shorter than one pixel.
    pub fn new(atlas_w: u32, atlas_h: u32, columns: u32, rows: u32) -> TileMapResult<Self> {
        positive("atlas columns", columns)?;
        positive("atlas rows", rows)?;
        positive("atlas width", atlas_w)?;
        positive("atlas height", atlas_h)?;
        if columns > atlas_w {
            return Err(TileMapError::InvalidDimension { what: "atlas columns", value: columns });
        }
        if rows > atlas_h {
            return Err(TileMapError::InvalidDimension { what: "atlas rows", value: rows });
        }

        Ok(Self {
            atlas_w,
            atlas_h,
            columns,
            rows,
            tile_w: atlas_w / columns,
            tile_h: atlas_h / rows,
        })
    }

    pub fn columns(&self) -> u32 { self.columns }
    pub fn rows(&self) -> u32 { self.rows }
    pub fn tile_width(&self) -> u32 { self.tile_w }
    pub fn tile_height(&self) -> u32 { self.tile_h }

    /// Full atlas size in pixels, including any unused remainder.
    pub fn atlas_size(&self) -> (u32, u32) {
        (self.atlas_w, self.atlas_h)
    }

    /// Number of distinct tiles in the atlas.
    pub fn tile_count(&self) -> u32 {
        self.columns.saturating_mul(self.rows)
    }

    /// Index of the tile at `(source_column, source_row)` in the atlas.
    ///
    /// Coordinates are not checked; passing a column `>= columns()` aliases
    /// into the next row.
    pub fn index(&self, source_column: u32, source_row: u32) -> TileIndex {
        source_row
            .wrapping_mul(self.columns)
            .wrapping_add(source_column)
    }

    /// Pixel rectangle of tile `index` inside the atlas.
    ///
    /// Indices `>= tile_count()` are not rejected: they produce a rectangle
    /// below the atlas's valid area.
    pub fn source_rect(&self, index: TileIndex) -> Rect {
        let col = (index % self.columns) as u64;
        let row = (index / self.columns) as u64;
        Rect {
            x: to_coord(col * self.tile_w as u64),
            y: to_coord(row * self.tile_h as u64),
            w: self.tile_w,
            h: self.tile_h,
        }
    }

    pub fn contains(&self, index: TileIndex) -> bool {
        index < self.tile_count()
    }

    /// Eager variant of the atlas bounds policy: `Ok(index)` when the index
    /// names a real tile, [`TileMapError::InvalidAtlasIndex`] otherwise.
    pub fn check_index(&self, index: TileIndex) -> TileMapResult<TileIndex> {
        if self.contains(index) {
            Ok(index)
        } else {
            Err(TileMapError::InvalidAtlasIndex { index, tile_count: self.tile_count() })
        }
    }

    /// Returns (uv_min, uv_max) of `source_rect(index)`, normalised against
    /// the full atlas size.
    pub fn uv_rect(&self, index: TileIndex) -> ([f32; 2], [f32; 2]) {
        uv_for_rect(&self.source_rect(index), self.atlas_w, self.atlas_h)
    }
}

/// Normalise a pixel rectangle against a texture of `tex_w × tex_h` pixels.
pub fn uv_for_rect(rect: &Rect, tex_w: u32, tex_h: u32) -> ([f32; 2], [f32; 2]) {
    let tw = tex_w.max(1) as f32;
    let th = tex_h.max(1) as f32;
    (
        [rect.x as f32 / tw, rect.y as f32 / th],
        [rect.right() as f32 / tw, rect.bottom() as f32 / th],
    )
}

fn positive(what: &'static str, value: u32) -> TileMapResult<u32> {
    if value == 0 {
        Err(TileMapError::InvalidDimension { what, value })
    } else {
        Ok(value)
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tile_size_is_floor_of_atlas_over_count() {
        let g = AtlasGeometry::new(100, 50, 3, 4).unwrap();
        assert_eq!(g.tile_width(), 33);
        assert_eq!(g.tile_height(), 12);
        assert_eq!(g.atlas_size(), (100, 50));
    }

    #[test]
    fn one_pixel_tiles_are_allowed() {
        let g = AtlasGeometry::new(4, 2, 4, 2).unwrap();
        assert_eq!((g.tile_width(), g.tile_height()), (1, 1));
    }

    #[test]
    fn zero_counts_are_rejected() {
        assert_eq!(
            AtlasGeometry::new(32, 32, 0, 2),
            Err(TileMapError::InvalidDimension { what: "atlas columns", value: 0 })
        );
        assert_eq!(
            AtlasGeometry::new(32, 32, 2, 0),
            Err(TileMapError::InvalidDimension { what: "atlas rows", value: 0 })
        );
    }

    #[test]
    fn empty_atlas_is_rejected() {
        assert!(matches!(
            AtlasGeometry::new(0, 32, 1, 1),
            Err(TileMapError::InvalidDimension { what: "atlas width", .. })
        ));
    }

    #[test]
    fn more_tiles_than_pixels_is_rejected() {
        assert_eq!(
            AtlasGeometry::new(8, 8, 9, 1),
            Err(TileMapError::InvalidDimension { what: "atlas columns", value: 9 })
        );
        assert_eq!(
            AtlasGeometry::new(8, 8, 1, 9),
            Err(TileMapError::InvalidDimension { what: "atlas rows", value: 9 })
        );
    }

    #[test]
    fn index_is_row_major_and_injective() {
        let g = AtlasGeometry::new(64, 48, 4, 3).unwrap();
        let mut seen = Vec::new();
        for r in 0..3 {
            for c in 0..4 {
                let i = g.index(c, r);
                assert_eq!(i, r * 4 + c);
                assert!(!seen.contains(&i));
                seen.push(i);
            }
        }
        assert_eq!(seen.len() as u32, g.tile_count());
    }

    #[test]
    fn source_rect_in_2x2_atlas() {
        let g = AtlasGeometry::new(32, 32, 2, 2).unwrap();
        assert_eq!(g.index(1, 0), 1);
        assert_eq!(g.source_rect(0), Rect::new(0, 0, 16, 16));
        assert_eq!(g.source_rect(1), Rect::new(16, 0, 16, 16));
        assert_eq!(g.source_rect(2), Rect::new(0, 16, 16, 16));
        assert_eq!(g.source_rect(3), Rect::new(16, 16, 16, 16));
    }

    #[test]
    fn source_rect_ignores_remainder_pixels() {
        // 35 / 2 = 17: column 1 starts at 17, pixel 34 is never sampled.
        let g = AtlasGeometry::new(35, 16, 2, 1).unwrap();
        assert_eq!(g.source_rect(1), Rect::new(17, 0, 17, 16));
    }

    #[test]
    fn out_of_range_index_lands_below_atlas() {
        let g = AtlasGeometry::new(32, 32, 2, 2).unwrap();
        let r = g.source_rect(5);
        assert_eq!(r, Rect::new(16, 32, 16, 16));
        assert!(r.y as u32 >= 32);
        assert!(!g.contains(5));
    }

    #[test]
    fn huge_index_saturates_instead_of_overflowing() {
        let g = AtlasGeometry::new(4096, 4096, 1, 1).unwrap();
        let r = g.source_rect(u32::MAX);
        assert_eq!(r.x, 0);
        assert_eq!(r.y, i32::MAX);
    }

    #[test]
    fn check_index_enforces_tile_count() {
        let g = AtlasGeometry::new(32, 32, 2, 2).unwrap();
        assert_eq!(g.check_index(3), Ok(3));
        assert_eq!(
            g.check_index(4),
            Err(TileMapError::InvalidAtlasIndex { index: 4, tile_count: 4 })
        );
    }

    #[test]
    fn uv_rect_covers_one_tile() {
        let g = AtlasGeometry::new(32, 32, 2, 2).unwrap();
        let (min, max) = g.uv_rect(3);
        assert_eq!(min, [0.5, 0.5]);
        assert_eq!(max, [1.0, 1.0]);
    }

    #[test]
    fn uv_rect_uses_full_atlas_size_with_remainder() {
        let g = AtlasGeometry::new(40, 20, 2, 1).unwrap();
        let (min, max) = g.uv_rect(1);
        assert!((min[0] - 0.5).abs() < 1e-6);
        assert!((max[0] - 1.0).abs() < 1e-6);
        assert_eq!(min[1], 0.0);
        assert_eq!(max[1], 1.0);
    }
}
