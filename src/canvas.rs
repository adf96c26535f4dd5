//! Drawing abstraction between the scene and the renderer.
//!
//! The scene draws through the [`Canvas`] trait, which exposes the stateful
//! 2D surface contract: a transform stack (save/restore/translate/rotate/
//! scale), a current fill color, a global alpha, and rect/circle fills.
//!
//! [`DrawList`] is the canonical implementation: a CPU-side recorder that
//! flattens the transform stack into one affine transform per recorded
//! primitive. The GPU layer uploads the recorded primitives in order, and
//! tests inspect them directly.
//!
//! # Example
//!
//! ```ignore
//! use kaleido::{Canvas, DrawList, Rgba, Vec2};
//!
//! let mut list = DrawList::new();
//! list.save();
//! list.translate(Vec2::new(400.0, 300.0));
//! list.set_fill_color(Rgba::WHITE);
//! list.fill_circle(Vec2::ZERO, 4.0);
//! list.restore();
//!
//! assert_eq!(list.primitives().len(), 1);
//! ```

use crate::color::Rgba;
use glam::{Affine2, Vec2};

/// Canvas pixel dimensions, read freshly each frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    /// Create a viewport from pixel dimensions.
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Viewport from a physical surface size.
    pub fn from_physical(width: u32, height: u32) -> Self {
        Self::new(width as f32, height as f32)
    }

    /// The center point, origin of the symmetry.
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// Dimensions as a vector.
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }
}

/// A stateful 2D drawing surface.
///
/// Geometry passed to the fill methods is in the current local space;
/// implementations apply the accumulated transform. `save`/`restore`
/// snapshot the transform together with the fill color and global alpha.
/// Restoring with nothing saved is a no-op.
pub trait Canvas {
    /// Push the current transform and style onto the state stack.
    fn save(&mut self);
    /// Pop and reinstate the most recently saved state, if any.
    fn restore(&mut self);

    /// Append a translation to the current transform.
    fn translate(&mut self, offset: Vec2);
    /// Append a rotation (radians) to the current transform.
    fn rotate(&mut self, radians: f32);
    /// Append an axis scale to the current transform. `(1, -1)` mirrors
    /// across the local horizontal axis.
    fn scale(&mut self, factors: Vec2);

    /// Set the fill color used by subsequent fills.
    fn set_fill_color(&mut self, color: Rgba);
    /// Set the global alpha multiplier, clamped to 0.0-1.0.
    fn set_alpha(&mut self, alpha: f32);

    /// Fill an axis-aligned rectangle given its minimum corner and size
    /// (local space).
    fn fill_rect(&mut self, min: Vec2, size: Vec2);
    /// Fill a circle (local space).
    fn fill_circle(&mut self, center: Vec2, radius: f32);
}

/// What a recorded primitive rasterizes as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimitiveKind {
    /// A filled quad.
    Rect,
    /// A filled disk inscribed in its quad.
    Circle,
}

/// One recorded fill, with the transform that was current when it was
/// recorded and the fill color already multiplied by the global alpha.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Primitive {
    pub kind: PrimitiveKind,
    pub transform: Affine2,
    /// Local-space center of the quad.
    pub center: Vec2,
    /// Local-space half extents. Both components equal the radius for
    /// circles.
    pub half_size: Vec2,
    pub color: Rgba,
}

impl Primitive {
    /// The center after applying the recorded transform.
    pub fn device_center(&self) -> Vec2 {
        self.transform.transform_point2(self.center)
    }
}

#[derive(Debug, Clone, Copy)]
struct SavedState {
    transform: Affine2,
    fill: Rgba,
    alpha: f32,
}

/// Recording canvas.
///
/// Keeps the recorded primitives in draw order. Call [`DrawList::begin_frame`]
/// before each frame to discard the previous recording and reset the state.
#[derive(Debug)]
pub struct DrawList {
    primitives: Vec<Primitive>,
    transform: Affine2,
    fill: Rgba,
    alpha: f32,
    saved: Vec<SavedState>,
}

impl DrawList {
    /// Create an empty recorder with identity transform, white fill, and
    /// alpha 1.0.
    pub fn new() -> Self {
        Self {
            primitives: Vec::new(),
            transform: Affine2::IDENTITY,
            fill: Rgba::WHITE,
            alpha: 1.0,
            saved: Vec::new(),
        }
    }

    /// Discard the recording and reset transform and style, keeping the
    /// allocation.
    pub fn begin_frame(&mut self) {
        self.primitives.clear();
        self.saved.clear();
        self.transform = Affine2::IDENTITY;
        self.fill = Rgba::WHITE;
        self.alpha = 1.0;
    }

    /// The recorded primitives, in draw order.
    pub fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }

    /// Number of recorded primitives.
    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    /// Whether nothing has been recorded this frame.
    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }

    fn push(&mut self, kind: PrimitiveKind, center: Vec2, half_size: Vec2) {
        let a = (self.fill.a * self.alpha).clamp(0.0, 1.0);
        self.primitives.push(Primitive {
            kind,
            transform: self.transform,
            center,
            half_size,
            color: self.fill.with_alpha(a),
        });
    }
}

impl Default for DrawList {
    fn default() -> Self {
        Self::new()
    }
}

impl Canvas for DrawList {
    fn save(&mut self) {
        self.saved.push(SavedState {
            transform: self.transform,
            fill: self.fill,
            alpha: self.alpha,
        });
    }

    fn restore(&mut self) {
        if let Some(state) = self.saved.pop() {
            self.transform = state.transform;
            self.fill = state.fill;
            self.alpha = state.alpha;
        }
    }

    fn translate(&mut self, offset: Vec2) {
        self.transform = self.transform * Affine2::from_translation(offset);
    }

    fn rotate(&mut self, radians: f32) {
        self.transform = self.transform * Affine2::from_angle(radians);
    }

    fn scale(&mut self, factors: Vec2) {
        self.transform = self.transform * Affine2::from_scale(factors);
    }

    fn set_fill_color(&mut self, color: Rgba) {
        self.fill = color;
    }

    fn set_alpha(&mut self, alpha: f32) {
        self.alpha = alpha.clamp(0.0, 1.0);
    }

    fn fill_rect(&mut self, min: Vec2, size: Vec2) {
        self.push(PrimitiveKind::Rect, min + size * 0.5, size * 0.5);
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32) {
        self.push(PrimitiveKind::Circle, center, Vec2::splat(radius.max(0.0)));
    }
}
