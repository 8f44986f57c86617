use std::path::Path;
use std::sync::Arc;

use image::Rgba;
use tracing::{error, info, warn};
use winit::application::ApplicationHandler;
use winit::event::{ElementState, KeyEvent, MouseButton, WindowEvent};
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

use crate::config::MapConfig;
use crate::error::{SetupError, TileMapResult};
use crate::renderer::{Atlas, QuadBatch, Renderer};
use crate::surface::{Canvas, ImageAtlas};
use crate::tile_map::{DEFAULT_INDEX, TileMap};
use crate::window::apply_window_settings;

/// Surface size needed to show the whole map at its configured origin and
/// scale.
pub fn content_size<A>(config: &MapConfig, map: &TileMap<A>) -> (u32, u32) {
    let (w, h) = map.pixel_size(config.scale);
    let extent = |origin: i32, len: u32| (origin as i64 + len as i64).clamp(1, u32::MAX as i64) as u32;
    (extent(config.origin[0], w), extent(config.origin[1], h))
}

/// Largest snapshot side, in pixels.
pub const MAX_SNAPSHOT_SIDE: u32 = 16384;

/// [`content_size`] for a snapshot canvas, rejecting sizes over
/// [`MAX_SNAPSHOT_SIDE`] before anything is allocated.
pub fn snapshot_size<A>(config: &MapConfig, map: &TileMap<A>) -> Result<(u32, u32), SetupError> {
    let (width, height) = content_size(config, map);
    if width > MAX_SNAPSHOT_SIDE || height > MAX_SNAPSHOT_SIDE {
        return Err(SetupError::SnapshotTooLarge { width, height, max: MAX_SNAPSHOT_SIDE });
    }
    Ok((width, height))
}

/// Render the map once on a [`Canvas`] and write it to `out` (PNG).
pub fn render_snapshot(config: &MapConfig, out: &Path) -> Result<(), SetupError> {
    let atlas = ImageAtlas::open(&config.atlas.path)?;
    let map = config.build(&atlas)?;
    let (width, height) = snapshot_size(config, &map)?;

    let mut canvas = Canvas::new(width, height);
    canvas.clear(Rgba(config.clear_color));
    map.render(&mut canvas, config.origin[0], config.origin[1], config.scale)?;
    canvas.save(out)?;

    info!(path = %out.display(), width, height, "Wrote snapshot");
    Ok(())
}

/// Convert an sRGB byte colour to the linear clear colour of an sRGB surface.
fn clear_color(rgba: [u8; 4]) -> wgpu::Color {
    let linear = |c: u8| {
        let c = c as f64 / 255.0;
        if c <= 0.04045 { c / 12.92 } else { ((c + 0.055) / 1.055).powf(2.4) }
    };
    wgpu::Color {
        r: linear(rgba[0]),
        g: linear(rgba[1]),
        b: linear(rgba[2]),
        a: rgba[3] as f64 / 255.0,
    }
}

/// Apply one mouse click to cell (`column`, `row`).
///
/// Left cycles to the next atlas tile, wrapping to 0 after the last one;
/// right resets to [`DEFAULT_INDEX`]. Other buttons leave the map untouched.
fn edit_cell<A>(map: &mut TileMap<A>, column: u32, row: u32, button: MouseButton) -> TileMapResult<()> {
    let next = match button {
        MouseButton::Left => {
            let tile_count = map.geometry().tile_count();
            map.tile(column, row)?.wrapping_add(1) % tile_count
        }
        MouseButton::Right => DEFAULT_INDEX,
        _ => return Ok(()),
    };
    map.set_tile(column, row, next)
}

// ── Viewer ──────────────────────────────────────────────────────────────────

/// Interactive window showing one tile map.
///
/// Left click cycles the clicked cell to the next atlas tile, right click
/// resets it, Escape quits.
pub struct Viewer {
    config: MapConfig,
    atlas_image: ImageAtlas,
    /// Pixel size of the map as configured, checked once in [`Viewer::new`].
    content: (u32, u32),
}

impl Viewer {
    /// Load the atlas and check the map description before any window opens.
    pub fn new(config: MapConfig) -> Result<Self, SetupError> {
        let atlas_image = ImageAtlas::open(&config.atlas.path)?;
        let content = content_size(&config, &config.build(&atlas_image)?);
        Ok(Self { config, atlas_image, content })
    }

    pub fn run(self) -> Result<(), SetupError> {
        let event_loop = EventLoop::new()?;
        let mut app = App { viewer: self, state: None, error: None };
        event_loop.run_app(&mut app)?;
        match app.error.take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

// ── App (winit ApplicationHandler) ──────────────────────────────────────────

struct ViewState {
    renderer: Renderer,
    map: TileMap<Arc<Atlas>>,
    batch: QuadBatch,
    cursor: [f64; 2],
}

struct App {
    viewer: Viewer,
    state: Option<ViewState>,
    /// First fatal error; returned from `Viewer::run` after the loop exits.
    error: Option<SetupError>,
}

impl App {
    fn init(&self, event_loop: &ActiveEventLoop) -> Result<ViewState, SetupError> {
        let config = &self.viewer.config;
        let (width, height) = config.window.inner_size(self.viewer.content);

        let window = Arc::new(
            event_loop.create_window(
                Window::default_attributes()
                    .with_title(&config.window.title)
                    .with_inner_size(winit::dpi::PhysicalSize::new(width, height)),
            )?,
        );
        apply_window_settings(&window, &config.window, (width, height));

        let renderer = pollster::block_on(Renderer::new(window, &self.viewer.atlas_image))?;
        let map = config.build(renderer.atlas())?;

        info!(
            columns = map.columns(),
            rows = map.rows(),
            scale = config.scale,
            width,
            height,
            "Viewer started"
        );

        Ok(ViewState { renderer, map, batch: QuadBatch::new(), cursor: [0.0, 0.0] })
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: SetupError) {
        error!("{err}");
        self.error.get_or_insert(err);
        event_loop.exit();
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_some() {
            return;
        }
        match self.init(event_loop) {
            Ok(state) => self.state = Some(state),
            Err(e) => self.fail(event_loop, e),
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(state) = self.state.as_ref() {
            state.renderer.window.request_redraw();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        let config = &self.viewer.config;
        let Some(state) = self.state.as_mut() else { return };

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),

            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        state: ElementState::Pressed,
                        ..
                    },
                ..
            } => event_loop.exit(),

            WindowEvent::Resized(size) => state.renderer.resize(size),

            WindowEvent::CursorMoved { position, .. } => {
                state.cursor = [position.x, position.y];
            }

            WindowEvent::MouseInput { button, state: ElementState::Pressed, .. } => {
                let [x, y] = state.cursor;
                let Some((column, row)) = state.map.cell_at(
                    x as i32,
                    y as i32,
                    config.origin[0],
                    config.origin[1],
                    config.scale,
                ) else {
                    return;
                };

                if let Err(e) = edit_cell(&mut state.map, column, row, button) {
                    warn!("{e}");
                }
            }

            WindowEvent::RedrawRequested => {
                state.batch.clear();
                if let Err(e) = state.map.render(&mut state.batch, config.origin[0], config.origin[1], config.scale) {
                    warn!("{e}");
                }

                match state.renderer.render(state.batch.vertices(), clear_color(config.clear_color)) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        let size = state.renderer.window.inner_size();
                        warn!(width = size.width, height = size.height, "Surface lost, reconfiguring");
                        state.renderer.resize(size);
                    }
                    Err(e) => error!("render error: {e}"),
                }
            }

            _ => {}
        }
    }
}
