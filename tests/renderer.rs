use tilegrid::renderer::{QuadBatch, TileVertex};
use tilegrid::*;

#[derive(Debug)]
struct FakeAtlas(u32, u32);

impl AtlasTexture for FakeAtlas {
    fn dimensions(&self) -> (u32, u32) {
        (self.0, self.1)
    }
}

// ── Quad batching of a whole map ──────────────────────────────────────────

#[test]
fn one_quad_per_cell() {
    let atlas = FakeAtlas(32, 32);
    let map = TileMap::new(&atlas, 2, 2, 20, 12).unwrap();
    let mut batch = QuadBatch::new();
    map.render(&mut batch, 0, 0, 1).unwrap();
    assert_eq!(batch.quad_count(), 240);
    assert_eq!(batch.vertices().len(), 240 * 6);
}

#[test]
fn quad_positions_follow_dest_rects() {
    let atlas = FakeAtlas(32, 32);
    let map = TileMap::new(&atlas, 2, 2, 3, 2).unwrap();
    let mut batch = QuadBatch::new();
    map.render(&mut batch, 10, 20, 2).unwrap();

    // Last quad is cell (row 1, column 2): dest (74, 52, 32, 32).
    let last: &[TileVertex] = &batch.vertices()[5 * 6..];
    assert_eq!(last[0].position, [74.0, 52.0]);
    assert_eq!(last[4].position, [106.0, 84.0]);
}

#[test]
fn quad_uvs_select_tile() {
    let atlas = FakeAtlas(32, 32);
    let mut map = TileMap::new(&atlas, 2, 2, 1, 1).unwrap();
    map.set_tile(0, 0, 3).unwrap();
    let mut batch = QuadBatch::new();
    map.render(&mut batch, 0, 0, 1).unwrap();

    let v = batch.vertices();
    assert_eq!(v[0].uv, [0.5, 0.5]);
    assert_eq!(v[4].uv, [1.0, 1.0]);
}

#[test]
fn uvs_normalise_against_full_atlas_with_remainder() {
    // 36 px wide, 2 columns → 18 px tiles, no remainder; 33 px high, 2 rows →
    // 16 px tiles with one unused pixel row.
    let atlas = FakeAtlas(36, 33);
    let mut map = TileMap::new(&atlas, 2, 2, 1, 1).unwrap();
    map.set_tile(0, 0, 2).unwrap();
    let mut batch = QuadBatch::new();
    map.render(&mut batch, 0, 0, 1).unwrap();

    let v = batch.vertices();
    assert!((v[0].uv[1] - 16.0 / 33.0).abs() < 1e-6);
    assert!((v[4].uv[1] - 32.0 / 33.0).abs() < 1e-6);
}

#[test]
fn clearing_between_frames_keeps_one_frame_of_quads() {
    let atlas = FakeAtlas(32, 32);
    let map = TileMap::new(&atlas, 2, 2, 4, 4).unwrap();
    let mut batch = QuadBatch::new();
    for _ in 0..3 {
        batch.clear();
        map.render(&mut batch, 0, 0, 1).unwrap();
    }
    assert_eq!(batch.quad_count(), 16);
}

#[test]
fn vertices_cast_to_bytes() {
    let atlas = FakeAtlas(32, 32);
    let map = TileMap::new(&atlas, 2, 2, 2, 1).unwrap();
    let mut batch = QuadBatch::new();
    map.render(&mut batch, 0, 0, 1).unwrap();
    let bytes: &[u8] = bytemuck::cast_slice(batch.vertices());
    assert_eq!(bytes.len(), 2 * 6 * std::mem::size_of::<TileVertex>());
}
