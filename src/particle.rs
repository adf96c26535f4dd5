//! The particle entity.
//!
//! Positions are relative to the canvas center; the scene translates to the
//! center before drawing, so every rotation slice sees the same local
//! coordinates.

use crate::canvas::Canvas;
use crate::color::Rgba;
use crate::config::EffectConfig;
use glam::Vec2;

/// A single drifting, shrinking, fading particle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    /// Center-relative position in pixels.
    pub position: Vec2,
    /// Drift per frame in pixels.
    pub velocity: Vec2,
    /// Current radius in pixels.
    pub radius: f32,
    /// Fill color (opaque; opacity comes from the lifespan at draw time).
    pub color: Rgba,
    /// Remaining life, 1.0 down to 0. Doubles as the draw opacity.
    pub lifespan: f32,
}

impl Particle {
    /// Lifespan every particle starts with.
    pub const INITIAL_LIFESPAN: f32 = 1.0;

    /// Create a particle at full lifespan.
    pub fn new(position: Vec2, velocity: Vec2, radius: f32, color: Rgba) -> Self {
        Self {
            position,
            velocity,
            radius,
            color,
            lifespan: Self::INITIAL_LIFESPAN,
        }
    }

    /// Advance one frame: drift, fade, shrink toward the radius floor.
    ///
    /// Lifespan and radius never increase; the radius clamps at the floor
    /// and never goes negative.
    pub fn update(&mut self, config: &EffectConfig) {
        self.position += self.velocity;
        self.lifespan -= config.lifespan_decay;
        if self.radius > config.radius_floor {
            self.radius = (self.radius - config.radius_decay).max(config.radius_floor);
        }
    }

    /// Whether the particle is due for removal.
    pub fn is_expired(&self) -> bool {
        self.lifespan <= 0.0
    }

    /// Fill one circle at the particle's position with opacity equal to the
    /// current lifespan, then reset the global alpha.
    ///
    /// The canvas clamps non-positive alpha to zero, so a particle on its
    /// final frame still draws (invisibly) without issue.
    pub fn draw<C: Canvas>(&self, canvas: &mut C) {
        canvas.set_alpha(self.lifespan);
        canvas.set_fill_color(self.color);
        canvas.fill_circle(self.position, self.radius);
        canvas.set_alpha(1.0);
    }
}
