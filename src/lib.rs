//! # Kaleido - Mouse-Reactive Kaleidoscope Particles
//!
//! Pointer-driven particle trails mirrored into rotational symmetry, drawn
//! on the GPU.
//!
//! Moving the pointer spawns short-lived particles at the cursor. Each
//! particle drifts, shrinks, and fades, and every frame it is drawn once per
//! mirror slice plus once reflected within the slice. A translucent coat of
//! background color laid down before the particles turns motion into light
//! trails.
//!
//! ## Quick Start
//!
//! ```no_run
//! use kaleido::Kaleidoscope;
//!
//! fn main() -> Result<(), kaleido::EffectError> {
//!     Kaleidoscope::new()
//!         .with_symmetry(8)
//!         .with_fade_alpha(0.1)
//!         .run()
//! }
//! ```
//!
//! ## Core Concepts
//!
//! ### Scene
//!
//! [`Scene`] owns the particles and advances one frame at a time into any
//! [`Canvas`]. It knows nothing about windows or GPUs, so it runs headless:
//!
//! ```
//! use kaleido::{DrawList, EffectConfig, PointerState, Scene, Vec2, Viewport};
//!
//! let mut scene = Scene::with_seed(EffectConfig::default(), 7).unwrap();
//! let mut list = DrawList::new();
//! let pointer = PointerState {
//!     position: Vec2::new(400.0, 300.0),
//!     moving: true,
//! };
//! scene.advance(&mut list, Viewport::new(800.0, 600.0), pointer);
//! assert!(scene.particle_count() > 0);
//! ```
//!
//! ### Canvas
//!
//! Drawing goes through the [`Canvas`] trait: translate/rotate/scale under a
//! save/restore stack, plus filled rects and circles. [`DrawList`] is the
//! recording implementation the GPU renderer consumes.
//!
//! ### Pointer
//!
//! [`PointerTracker`] folds window events into a per-frame [`PointerState`].
//! The pointer counts as moving until it has sat still for a quiet period
//! (100 ms by default), so spawning survives the gaps between move events.
//!
//! ## Configuration
//!
//! | Knob | Default | Effect |
//! |------|---------|--------|
//! | `symmetry` | 8 | mirror slices around the canvas center |
//! | `spawn_per_move` | 3 | particles spawned per moving frame |
//! | `fade_alpha` | 0.1 | trail length (lower is longer) |
//! | `hue_step` | 1.0 | spawn color cycling, degrees per frame |
//! | `spawn_radius_min..max` | 1.0..5.0 | particle size at spawn |
//! | `pointer_quiet` | 100 ms | stillness before spawning stops |
//!
//! See [`EffectConfig`] for the full set.

pub mod canvas;
pub mod color;
pub mod config;
mod effect;
pub mod error;
mod gpu;
pub mod input;
pub mod particle;
mod scene;
pub mod spawn;
pub mod timer;

pub use canvas::{Canvas, DrawList, Primitive, PrimitiveKind, Viewport};
pub use color::{hsl_to_rgb, Rgba};
pub use config::EffectConfig;
pub use effect::Kaleidoscope;
pub use error::{ConfigError, EffectError, GpuError};
pub use glam::Vec2;
pub use input::{PointerState, PointerTracker};
pub use particle::Particle;
pub use scene::Scene;
pub use spawn::Spawner;
pub use timer::FrameTimer;

/// Convenient re-exports for common usage.
///
/// # Usage
///
/// ```
/// use kaleido::prelude::*;
/// ```
///
/// This imports:
/// - [`Kaleidoscope`] - the windowed effect builder
/// - [`Scene`] - the headless frame stepper
/// - [`EffectConfig`] - all tunables
/// - [`Canvas`], [`DrawList`], [`Viewport`] - the drawing surface
/// - [`PointerTracker`], [`PointerState`] - pointer debouncing
/// - [`Rgba`], [`Vec2`] - color and vector types
pub mod prelude {
    pub use crate::canvas::{Canvas, DrawList, Viewport};
    pub use crate::color::Rgba;
    pub use crate::config::EffectConfig;
    pub use crate::effect::Kaleidoscope;
    pub use crate::error::EffectError;
    pub use crate::input::{PointerState, PointerTracker};
    pub use crate::particle::Particle;
    pub use crate::scene::Scene;
    pub use crate::spawn::Spawner;
    pub use crate::timer::FrameTimer;
    pub use crate::Vec2;
}
