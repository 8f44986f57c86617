use crate::atlas::uv_for_rect;
use crate::geometry::Rect;
use crate::surface::{AtlasTexture, BlitTarget};

use super::pipeline::TileVertex;

/// Blit target that turns every blit into a textured quad for the tile
/// pipeline.
///
/// Each blit appends 6 vertices (two triangles, Y-axis pointing down):
///
/// ```text
/// 0──1
/// │ /│
/// 2──3
/// triangles: (0,1,2) and (1,3,2)
/// ```
///
/// UVs are not clamped. A tile index past the end of the atlas yields UVs
/// outside `[0, 1]`, which the atlas sampler clamps to the edge texels, while
/// [`Canvas`](crate::surface::Canvas) draws nothing for the same tile.
#[derive(Clone, Debug, Default)]
pub struct QuadBatch {
    vertices: Vec<TileVertex>,
}

impl QuadBatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop all quads but keep the allocation for the next frame.
    pub fn clear(&mut self) {
        self.vertices.clear();
    }

    pub fn vertices(&self) -> &[TileVertex] {
        &self.vertices
    }

    pub fn quad_count(&self) -> usize {
        self.vertices.len() / 6
    }
}

impl<A: AtlasTexture + ?Sized> BlitTarget<A> for QuadBatch {
    fn blit(&mut self, atlas: &A, source: Rect, dest: Rect) {
        let (atlas_w, atlas_h) = atlas.dimensions();
        let ([u0, v0], [u1, v1]) = uv_for_rect(&source, atlas_w, atlas_h);

        let x0 = dest.x as f32;
        let y0 = dest.y as f32;
        let x1 = dest.right() as f32;
        let y1 = dest.bottom() as f32;

        let corner = |x, y, u, v| TileVertex { position: [x, y], uv: [u, v] };
        let (tl, tr, bl, br) = (
            corner(x0, y0, u0, v0),
            corner(x1, y0, u1, v0),
            corner(x0, y1, u0, v1),
            corner(x1, y1, u1, v1),
        );
        self.vertices.extend_from_slice(&[tl, tr, bl, tr, br, bl]);
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Fixed(u32, u32);

    impl AtlasTexture for Fixed {
        fn dimensions(&self) -> (u32, u32) {
            (self.0, self.1)
        }
    }

    #[test]
    fn blit_emits_two_triangles() {
        let mut batch = QuadBatch::new();
        batch.blit(&Fixed(32, 32), Rect::new(16, 0, 16, 16), Rect::new(10, 20, 32, 32));
        assert_eq!(batch.quad_count(), 1);

        let v = batch.vertices();
        assert_eq!(v.len(), 6);
        assert_eq!(v[0], TileVertex { position: [10.0, 20.0], uv: [0.5, 0.0] });
        assert_eq!(v[1], TileVertex { position: [42.0, 20.0], uv: [1.0, 0.0] });
        assert_eq!(v[2], TileVertex { position: [10.0, 52.0], uv: [0.5, 0.5] });
        assert_eq!(v[4], TileVertex { position: [42.0, 52.0], uv: [1.0, 0.5] });
        assert_eq!(v[1], v[3]);
        assert_eq!(v[2], v[5]);
    }

    #[test]
    fn out_of_range_tile_uvs_leave_unit_square() {
        // Tile 4 of a 2x2 atlas starts one full atlas height down.
        let mut batch = QuadBatch::new();
        batch.blit(&Fixed(32, 32), Rect::new(0, 32, 16, 16), Rect::new(0, 0, 16, 16));
        let v = batch.vertices();
        assert_eq!(v[0].uv, [0.0, 1.0]);
        assert_eq!(v[4].uv, [0.5, 1.5]);
    }

    #[test]
    fn clear_keeps_nothing() {
        let mut batch = QuadBatch::new();
        batch.blit(&Fixed(8, 8), Rect::new(0, 0, 8, 8), Rect::new(0, 0, 8, 8));
        batch.clear();
        assert!(batch.vertices().is_empty());
        assert_eq!(batch.quad_count(), 0);
    }
}
