// ── Rect ──────────────────────────────────────────────────────────────────────

/// Axis-aligned pixel rectangle.
///
/// The origin is signed so destination rectangles can start left of / above
/// the surface; the extent is always non-negative.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rect {
    /// Left edge in pixels.
    pub x: i32,
    /// Top edge in pixels.
    pub y: i32,
    /// Width in pixels.
    pub w: u32,
    /// Height in pixels.
    pub h: u32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }

    /// Exclusive right edge, widened so it cannot overflow.
    pub fn right(&self) -> i64 {
        self.x as i64 + self.w as i64
    }

    /// Exclusive bottom edge, widened so it cannot overflow.
    pub fn bottom(&self) -> i64 {
        self.y as i64 + self.h as i64
    }

    pub fn is_empty(&self) -> bool {
        self.w == 0 || self.h == 0
    }

    /// Returns true if the point lies inside the rectangle (right/bottom
    /// edges exclusive).
    pub fn contains_point(&self, px: i32, py: i32) -> bool {
        let (px, py) = (px as i64, py as i64);
        px >= self.x as i64 && px < self.right() && py >= self.y as i64 && py < self.bottom()
    }

    /// Overlapping area of two rectangles, or `None` when they are disjoint.
    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        let left = (self.x as i64).max(other.x as i64);
        let top = (self.y as i64).max(other.y as i64);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        if right <= left || bottom <= top {
            return None;
        }
        Some(Rect {
            x: left as i32,
            y: top as i32,
            w: (right - left) as u32,
            h: (bottom - top) as u32,
        })
    }
}

/// Clamp an unsigned pixel coordinate into the signed range used by [`Rect`].
///
/// Coordinates that far out only arise from out-of-range tile indices; they
/// are pinned to `i32::MAX` so they stay off every real surface.
pub(crate) fn to_coord(value: u64) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}

/// Signed counterpart of [`to_coord`].
pub(crate) fn clamp_coord(value: i64) -> i32 {
    value.clamp(i32::MIN as i64, i32::MAX as i64) as i32
}

// ── Tests ──────────────────────────────────────────────────────────────────────
