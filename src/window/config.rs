use serde::Deserialize;

// ── WindowMode ────────────────────────────────────────────────────────────────

/// Controls how the OS window is presented.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WindowMode {
    /// Standard decorated window at the configured resolution.
    #[default]
    Windowed,
    /// Exclusive hardware fullscreen at the configured resolution.
    Fullscreen,
    /// Borderless window sized to match the monitor's native resolution.
    Borderless,
}

// ── WindowConfig ──────────────────────────────────────────────────────────────

/// Window settings of the viewer.  Missing fields fall back to
/// [`WindowConfig::default`].
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    /// Requested inner width in physical pixels.  `0` sizes the window to fit
    /// the tile map.
    pub width: u32,
    /// Requested inner height in physical pixels.  `0` sizes the window to
    /// fit the tile map.
    pub height: u32,
    pub mode: WindowMode,
}

impl Default for WindowConfig {
    /// 640 × 480, windowed.
    fn default() -> Self {
        Self {
            title: "tilegrid".to_string(),
            width: 640,
            height: 480,
            mode: WindowMode::Windowed,
        }
    }
}

impl WindowConfig {
    /// Inner size to request: the configured size, with any zero dimension
    /// replaced by the matching dimension of `content`.
    pub fn inner_size(&self, content: (u32, u32)) -> (u32, u32) {
        let width = if self.width == 0 { content.0 } else { self.width };
        let height = if self.height == 0 { content.1 } else { self.height };
        (width.max(1), height.max(1))
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
