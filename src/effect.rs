//! Windowed runner: the builder, the event loop, and frame pacing.

use std::sync::Arc;
use std::time::{Duration, Instant};

use winit::application::ApplicationHandler;
use winit::event::{ElementState, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

use crate::canvas::DrawList;
use crate::color::Rgba;
use crate::config::EffectConfig;
use crate::error::EffectError;
use crate::gpu::GpuContext;
use crate::input::PointerTracker;
use crate::scene::Scene;
use crate::timer::FrameTimer;

const DEFAULT_TITLE: &str = "Kaleido";
const DEFAULT_WIDTH: u32 = 1280;
const DEFAULT_HEIGHT: u32 = 720;

/// Windowed kaleidoscope effect.
///
/// Configure with the builder methods, then call [`run`](Self::run), which
/// blocks on the event loop until the window closes. Moving the pointer
/// spawns particles; Space pauses, Escape quits.
///
/// ```no_run
/// use kaleido::Kaleidoscope;
///
/// fn main() -> Result<(), kaleido::EffectError> {
///     Kaleidoscope::new()
///         .with_symmetry(12)
///         .with_fade_alpha(0.05)
///         .run()
/// }
/// ```
pub struct Kaleidoscope {
    config: EffectConfig,
    title: String,
    width: u32,
    height: u32,
    seed: Option<u64>,
}

impl Kaleidoscope {
    pub fn new() -> Self {
        Self {
            config: EffectConfig::default(),
            title: DEFAULT_TITLE.to_string(),
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            seed: None,
        }
    }

    /// Replace the whole configuration at once.
    pub fn with_config(mut self, config: EffectConfig) -> Self {
        self.config = config;
        self
    }

    /// Number of mirror slices around the canvas center.
    pub fn with_symmetry(mut self, symmetry: u32) -> Self {
        self.config.symmetry = symmetry;
        self
    }

    /// Particles spawned per pointer-move frame.
    pub fn with_spawn_per_move(mut self, count: u32) -> Self {
        self.config.spawn_per_move = count;
        self
    }

    /// Opacity of the per-frame background coat. Lower values leave longer
    /// trails.
    pub fn with_fade_alpha(mut self, alpha: f32) -> Self {
        self.config.fade_alpha = alpha;
        self
    }

    /// Degrees the spawn hue advances every frame.
    pub fn with_hue_step(mut self, degrees: f32) -> Self {
        self.config.hue_step = degrees;
        self
    }

    /// Range of spawn radii in pixels.
    pub fn with_spawn_radius(mut self, min: f32, max: f32) -> Self {
        self.config.spawn_radius_min = min;
        self.config.spawn_radius_max = max;
        self
    }

    /// Background color. Trails fade toward this.
    pub fn with_background(mut self, background: Rgba) -> Self {
        self.config.background = background;
        self
    }

    /// How long the pointer must sit still before spawning stops.
    pub fn with_pointer_quiet(mut self, quiet: Duration) -> Self {
        self.config.pointer_quiet = quiet;
        self
    }

    /// Window title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Initial window size in logical pixels.
    pub fn with_window_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Seed the spawn randomness for reproducible runs.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Open the window and run until it closes.
    ///
    /// Configuration errors are reported here, before any window or GPU
    /// work happens.
    pub fn run(self) -> Result<(), EffectError> {
        let scene = match self.seed {
            Some(seed) => Scene::with_seed(self.config, seed)?,
            None => Scene::new(self.config)?,
        };

        let event_loop = EventLoop::new()?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let mut app = App::new(scene, self.title, self.width, self.height);
        event_loop.run_app(&mut app)?;

        match app.fatal {
            Some(err) => Err(err),
            None => {
                log::info!(
                    "Rendered {} frames in {:.1}s",
                    app.timer.frame(),
                    app.timer.elapsed()
                );
                Ok(())
            }
        }
    }
}

impl Default for Kaleidoscope {
    fn default() -> Self {
        Self::new()
    }
}

struct App {
    window: Option<Arc<Window>>,
    gpu: Option<GpuContext>,
    scene: Scene,
    draw_list: DrawList,
    pointer: PointerTracker,
    timer: FrameTimer,
    title: String,
    width: u32,
    height: u32,
    fatal: Option<EffectError>,
}

impl App {
    fn new(scene: Scene, title: String, width: u32, height: u32) -> Self {
        let pointer = PointerTracker::new(scene.config().pointer_quiet);
        Self {
            window: None,
            gpu: None,
            scene,
            draw_list: DrawList::new(),
            pointer,
            timer: FrameTimer::new(),
            title,
            width,
            height,
            fatal: None,
        }
    }

    fn toggle_pause(&mut self) {
        self.timer.toggle_pause();
        if self.timer.is_paused() {
            log::info!("Paused at frame {}", self.timer.frame());
        } else {
            log::info!("Resumed");
        }
        self.refresh_title();
    }

    fn refresh_title(&self) {
        let Some(window) = &self.window else { return };
        if self.timer.is_paused() {
            window.set_title(&format!("{} (paused)", self.title));
        } else {
            window.set_title(&format!("{} ({:.0} fps)", self.title, self.timer.fps()));
        }
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        // While paused, nothing advances and nothing renders; the surface
        // keeps showing the last presented frame.
        if !self.timer.is_paused() {
            if let Some(gpu) = &mut self.gpu {
                self.timer.tick();
                let pointer = self.pointer.sample(Instant::now());
                self.draw_list.begin_frame();
                self.scene.advance(&mut self.draw_list, gpu.viewport(), pointer);

                match gpu.render(&self.draw_list) {
                    Ok(()) => {}
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        gpu.reconfigure();
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Surface memory exhausted");
                        event_loop.exit();
                    }
                    Err(err) => log::warn!("Render error: {err:?}"),
                }
            }
            if self.timer.frame() % 30 == 0 {
                self.refresh_title();
            }
        }
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attrs = Window::default_attributes()
            .with_title(self.title.clone())
            .with_inner_size(winit::dpi::LogicalSize::new(self.width, self.height));

        let window = match event_loop.create_window(attrs) {
            Ok(window) => Arc::new(window),
            Err(err) => {
                log::error!("Window creation failed: {err}");
                self.fatal = Some(EffectError::Window(err));
                event_loop.exit();
                return;
            }
        };
        self.window = Some(window.clone());

        let background = self.scene.config().background;
        match pollster::block_on(GpuContext::new(window, background)) {
            Ok(gpu) => self.gpu = Some(gpu),
            Err(err) => {
                log::error!("GPU initialization failed: {err}");
                self.fatal = Some(EffectError::Gpu(err));
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        self.pointer.handle_event(&event);

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(physical_size) => {
                if let Some(gpu) = &mut self.gpu {
                    gpu.resize(physical_size);
                }
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if event.state == ElementState::Pressed && !event.repeat {
                    match event.physical_key {
                        PhysicalKey::Code(KeyCode::Space) => self.toggle_pause(),
                        PhysicalKey::Code(KeyCode::Escape) => event_loop.exit(),
                        _ => {}
                    }
                }
            }
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            _ => {}
        }
    }
}
