pub mod config;

pub use config::{WindowConfig, WindowMode};

use winit::dpi::PhysicalSize;
use winit::window::{Fullscreen, Window};

/// Apply `config.mode` to `window`.
///
/// # Windowed
/// Leaves fullscreen, restores decorations and requests `size`.
///
/// # Fullscreen
/// Picks the current monitor's video mode whose area is closest to `size`.
/// Falls back to borderless when no monitor handle or video mode is
/// available.
///
/// # Borderless
/// Borderless fullscreen on the current monitor.
pub fn apply_window_settings(window: &Window, config: &WindowConfig, size: (u32, u32)) {
    match config.mode {
        WindowMode::Windowed => {
            window.set_fullscreen(None);
            window.set_decorations(true);
            // `None` means the resize arrives later as `WindowEvent::Resized`.
            let _ = window.request_inner_size(PhysicalSize::new(size.0, size.1));
        }

        WindowMode::Fullscreen => {
            let fullscreen = match window.current_monitor() {
                Some(monitor) => {
                    let target_area = size.0 as u64 * size.1 as u64;
                    let best = monitor.video_modes().min_by_key(|vm| {
                        let s = vm.size();
                        let area = s.width as u64 * s.height as u64;
                        area.abs_diff(target_area)
                    });
                    match best {
                        Some(vm) => Fullscreen::Exclusive(vm),
                        None => Fullscreen::Borderless(Some(monitor)),
                    }
                }
                None => Fullscreen::Borderless(None),
            };
            window.set_fullscreen(Some(fullscreen));
        }

        WindowMode::Borderless => {
            window.set_fullscreen(Some(Fullscreen::Borderless(None)));
        }
    }
}
