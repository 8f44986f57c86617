// ── Software surface ──────────────────────────────────────────────────────────
//
// CPU counterparts of the GPU atlas and swapchain: an RGBA image used as the
// atlas, and an RGBA image used as the destination.  Used for headless
// snapshots and for checking rendered pixels in tests.

use std::borrow::Borrow;
use std::path::Path;

use image::{Pixel, Rgba, RgbaImage};

use super::{AtlasTexture, BlitTarget};
use crate::error::SetupError;
use crate::geometry::Rect;

// ── ImageAtlas ────────────────────────────────────────────────────────────────

/// Atlas image kept in system memory.
#[derive(Clone, Debug)]
pub struct ImageAtlas {
    image: RgbaImage,
}

impl ImageAtlas {
    pub fn from_image(image: RgbaImage) -> Self {
        Self { image }
    }

    /// Decode an encoded image (PNG) into an atlas.
    pub fn from_png_bytes(bytes: &[u8]) -> Result<Self, image::ImageError> {
        Ok(Self { image: image::load_from_memory(bytes)?.to_rgba8() })
    }

    /// Read and decode the atlas image at `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, SetupError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|source| SetupError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_png_bytes(&bytes).map_err(|source| SetupError::Image {
            path: path.to_path_buf(),
            source,
        })
    }

    /// The decoded pixels.
    pub fn image(&self) -> &RgbaImage {
        &self.image
    }
}

impl AtlasTexture for ImageAtlas {
    fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }
}

// ── Canvas ────────────────────────────────────────────────────────────────────

/// RGBA destination surface.
#[derive(Clone, Debug)]
pub struct Canvas {
    image: RgbaImage,
}

impl Canvas {
    /// Transparent canvas of `width × height` pixels.
    pub fn new(width: u32, height: u32) -> Self {
        Self { image: RgbaImage::new(width, height) }
    }

    pub fn clear(&mut self, color: Rgba<u8>) {
        for p in self.image.pixels_mut() {
            *p = color;
        }
    }

    pub fn width(&self) -> u32 { self.image.width() }
    pub fn height(&self) -> u32 { self.image.height() }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    /// Encode the canvas to `path`; the format follows the file extension.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SetupError> {
        let path = path.as_ref();
        self.image.save(path).map_err(|source| SetupError::Image {
            path: path.to_path_buf(),
            source,
        })
    }

    fn bounds(&self) -> Rect {
        Rect::new(0, 0, self.image.width(), self.image.height())
    }
}

/// Nearest-neighbour scaled copy with source-over blending.
///
/// Destination pixels outside the canvas are clipped.  Source pixels outside
/// the atlas are skipped, so an out-of-range tile index draws nothing.
impl<A: Borrow<ImageAtlas> + ?Sized> BlitTarget<A> for Canvas {
    fn blit(&mut self, atlas: &A, source: Rect, dest: Rect) {
        if source.is_empty() || dest.is_empty() {
            return;
        }
        let Some(clip) = dest.intersection(&self.bounds()) else { return };
        let src = &atlas.borrow().image;
        let (src_w, src_h) = (src.width() as i64, src.height() as i64);

        for py in clip.y as i64..clip.bottom() {
            let dy = (py - dest.y as i64) as u64;
            let sy = source.y as i64 + (dy * source.h as u64 / dest.h as u64) as i64;
            if sy < 0 || sy >= src_h {
                continue;
            }
            for px in clip.x as i64..clip.right() {
                let dx = (px - dest.x as i64) as u64;
                let sx = source.x as i64 + (dx * source.w as u64 / dest.w as u64) as i64;
                if sx < 0 || sx >= src_w {
                    continue;
                }
                let texel = *src.get_pixel(sx as u32, sy as u32);
                self.image.get_pixel_mut(px as u32, py as u32).blend(&texel);
            }
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);
    const GREEN: Rgba<u8> = Rgba([0, 255, 0, 255]);
    const CLEAR: Rgba<u8> = Rgba([0, 0, 0, 0]);

    // 2×1 atlas: red pixel, green pixel.
    fn two_pixel_atlas() -> ImageAtlas {
        let mut img = RgbaImage::new(2, 1);
        img.put_pixel(0, 0, RED);
        img.put_pixel(1, 0, GREEN);
        ImageAtlas::from_image(img)
    }

    #[test]
    fn atlas_reports_image_dimensions() {
        let atlas = ImageAtlas::from_image(RgbaImage::new(48, 16));
        assert_eq!(atlas.dimensions(), (48, 16));
    }

    #[test]
    fn blit_scales_with_nearest_neighbour() {
        let atlas = two_pixel_atlas();
        let mut canvas = Canvas::new(4, 2);
        canvas.blit(&atlas, Rect::new(0, 0, 2, 1), Rect::new(0, 0, 4, 2));
        for y in 0..2 {
            assert_eq!(*canvas.image().get_pixel(0, y), RED);
            assert_eq!(*canvas.image().get_pixel(1, y), RED);
            assert_eq!(*canvas.image().get_pixel(2, y), GREEN);
            assert_eq!(*canvas.image().get_pixel(3, y), GREEN);
        }
    }

    #[test]
    fn blit_clips_to_canvas() {
        let atlas = two_pixel_atlas();
        let mut canvas = Canvas::new(2, 2);
        canvas.blit(&atlas, Rect::new(1, 0, 1, 1), Rect::new(-1, 1, 2, 2));
        assert_eq!(*canvas.image().get_pixel(0, 1), GREEN);
        assert_eq!(*canvas.image().get_pixel(1, 1), CLEAR);
        assert_eq!(*canvas.image().get_pixel(0, 0), CLEAR);
    }

    #[test]
    fn blit_outside_atlas_draws_nothing() {
        let atlas = two_pixel_atlas();
        let mut canvas = Canvas::new(2, 2);
        canvas.blit(&atlas, Rect::new(0, 5, 1, 1), Rect::new(0, 0, 2, 2));
        assert!(canvas.image().pixels().all(|p| *p == CLEAR));
    }

    #[test]
    fn transparent_texels_keep_background() {
        let mut img = RgbaImage::new(1, 1);
        img.put_pixel(0, 0, CLEAR);
        let atlas = ImageAtlas::from_image(img);
        let mut canvas = Canvas::new(1, 1);
        canvas.clear(RED);
        canvas.blit(&atlas, Rect::new(0, 0, 1, 1), Rect::new(0, 0, 1, 1));
        assert_eq!(*canvas.image().get_pixel(0, 0), RED);
    }

    #[test]
    fn clear_fills_every_pixel() {
        let mut canvas = Canvas::new(3, 3);
        canvas.clear(GREEN);
        assert!(canvas.image().pixels().all(|p| *p == GREEN));
    }
}
