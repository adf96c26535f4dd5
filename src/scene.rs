//! The frame protocol.
//!
//! [`Scene`] owns the particle list, the spawn hue, and the spawner, and
//! advances them one frame at a time against any [`Canvas`]. Each frame:
//!
//! 1. a translucent coat of the background color is painted over the
//!    previous frame's image (the motion-trail fade),
//! 2. a burst spawns at the pointer if it is moving,
//! 3. every particle updates, draws into all `2 * symmetry` mirrored
//!    slices, and is swap-removed once its lifespan has run out (after one
//!    final draw),
//! 4. the spawn hue steps forward, wrapping at 360.
//!
//! The scene is host-agnostic: the winit/wgpu host drives it through a
//! [`DrawList`](crate::DrawList), and tests drive it the same way.

use crate::canvas::{Canvas, Viewport};
use crate::config::EffectConfig;
use crate::error::ConfigError;
use crate::input::PointerState;
use crate::particle::Particle;
use crate::spawn::Spawner;
use glam::Vec2;
use std::f32::consts::TAU;

/// Kaleidoscope scene state.
#[derive(Debug)]
pub struct Scene {
    config: EffectConfig,
    particles: Vec<Particle>,
    spawner: Spawner,
    hue: f32,
    frame: u64,
}

impl Scene {
    /// Create a scene after validating the configuration.
    pub fn new(config: EffectConfig) -> Result<Self, ConfigError> {
        Self::with_spawner(config, Spawner::new())
    }

    /// Create a scene with a seeded spawner for reproducible runs.
    pub fn with_seed(config: EffectConfig, seed: u64) -> Result<Self, ConfigError> {
        Self::with_spawner(config, Spawner::with_seed(seed))
    }

    fn with_spawner(config: EffectConfig, spawner: Spawner) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            particles: Vec::new(),
            spawner,
            hue: 0.0,
            frame: 0,
        })
    }

    /// Advance one frame, recording all fills into `canvas`.
    pub fn advance<C: Canvas>(&mut self, canvas: &mut C, viewport: Viewport, pointer: PointerState) {
        // Fade coat over the previous frame, in device space.
        canvas.set_fill_color(self.config.fade_coat());
        canvas.fill_rect(Vec2::ZERO, viewport.size());

        let burst = self.spawner.try_spawn(&self.config, pointer, viewport, self.hue);
        self.particles.extend(burst);

        let center = viewport.center();
        let slice_angle = TAU / self.config.symmetry as f32;

        // Backward scan so swap_remove only disturbs indices already visited.
        for i in (0..self.particles.len()).rev() {
            self.particles[i].update(&self.config);
            let particle = self.particles[i];

            canvas.save();
            canvas.translate(center);
            for _ in 0..self.config.symmetry {
                // Rotation accumulates across slices; only the mirror is
                // scoped by save/restore.
                canvas.rotate(slice_angle);
                particle.draw(canvas);

                canvas.save();
                canvas.scale(Vec2::new(1.0, -1.0));
                particle.draw(canvas);
                canvas.restore();
            }
            canvas.restore();

            // Expired particles got their final draw above.
            if particle.is_expired() {
                self.particles.swap_remove(i);
            }
        }

        self.hue = (self.hue + self.config.hue_step).rem_euclid(360.0);
        self.frame += 1;
    }

    /// Live particles, in storage order.
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Number of live particles.
    pub fn particle_count(&self) -> usize {
        self.particles.len()
    }

    /// The hue the next burst will spawn with, in degrees.
    pub fn hue(&self) -> f32 {
        self.hue
    }

    /// Frames advanced so far.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// The validated configuration.
    pub fn config(&self) -> &EffectConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::{DrawList, PrimitiveKind};
    use crate::color::Rgba;

    const VIEWPORT: Viewport = Viewport::new(800.0, 600.0);

    fn idle() -> PointerState {
        PointerState {
            position: Vec2::ZERO,
            moving: false,
        }
    }

    fn moving(x: f32, y: f32) -> PointerState {
        PointerState {
            position: Vec2::new(x, y),
            moving: true,
        }
    }

    fn scene() -> Scene {
        Scene::with_seed(EffectConfig::default(), 7).unwrap()
    }

    #[test]
    fn test_invalid_config_rejected_at_construction() {
        let config = EffectConfig {
            symmetry: 0,
            ..Default::default()
        };
        assert!(Scene::new(config).is_err());
    }

    #[test]
    fn test_overlay_is_first_and_device_spaced() {
        let mut scene = scene();
        let mut list = DrawList::new();
        scene.advance(&mut list, VIEWPORT, idle());

        let coat = list.primitives()[0];
        assert_eq!(coat.kind, PrimitiveKind::Rect);
        assert_eq!(coat.device_center(), Vec2::new(400.0, 300.0));
        assert_eq!(coat.half_size, Vec2::new(400.0, 300.0));
        assert!((coat.color.a - 0.1).abs() < 1e-6);
        assert_eq!((coat.color.r, coat.color.g, coat.color.b), (0.0, 0.0, 0.0));
    }

    #[test]
    fn test_idle_frame_draws_only_the_coat() {
        let mut scene = scene();
        let mut list = DrawList::new();
        scene.advance(&mut list, VIEWPORT, idle());

        assert_eq!(scene.particle_count(), 0);
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_moving_frame_spawns_burst_at_pointer() {
        let mut scene = scene();
        let mut list = DrawList::new();
        scene.advance(&mut list, VIEWPORT, moving(100.0, 100.0));

        assert_eq!(scene.particle_count(), 3);
        for p in scene.particles() {
            // Spawned at pointer minus center, then drifted once.
            let spawn = p.position - p.velocity;
            assert!((spawn.x - (-300.0)).abs() < 1e-4);
            assert!((spawn.y - (-200.0)).abs() < 1e-4);
        }
    }

    #[test]
    fn test_draw_count_is_two_per_slice_per_particle() {
        let mut scene = scene();
        let mut list = DrawList::new();
        scene.advance(&mut list, VIEWPORT, moving(100.0, 100.0));

        let circles = list
            .primitives()
            .iter()
            .filter(|p| p.kind == PrimitiveKind::Circle)
            .count();
        // 3 particles x 8 slices x (rotated + mirrored).
        assert_eq!(circles, 48);
        assert_eq!(list.len(), 49);
    }

    #[test]
    fn test_slice_transforms_rotate_and_mirror() {
        let config = EffectConfig {
            symmetry: 4,
            spawn_per_move: 0,
            ..Default::default()
        };
        let mut scene = Scene::with_seed(config, 1).unwrap();
        scene.particles.push(Particle::new(
            Vec2::new(0.0, 50.0),
            Vec2::ZERO,
            3.0,
            Rgba::WHITE,
        ));

        let mut list = DrawList::new();
        scene.advance(&mut list, VIEWPORT, idle());

        let centers: Vec<Vec2> = list
            .primitives()
            .iter()
            .filter(|p| p.kind == PrimitiveKind::Circle)
            .map(|p| p.device_center())
            .collect();
        assert_eq!(centers.len(), 8);

        // First slice: quarter turn maps (0, 50) to (-50, 0); its mirror
        // negates local y first, landing opposite.
        let expect = |v: Vec2, x: f32, y: f32| {
            assert!((v.x - x).abs() < 1e-3 && (v.y - y).abs() < 1e-3, "got {:?}", v);
        };
        expect(centers[0], 350.0, 300.0);
        expect(centers[1], 450.0, 300.0);
        // Second slice: rotation has accumulated to a half turn.
        expect(centers[2], 400.0, 250.0);
        expect(centers[3], 400.0, 350.0);
        // Fourth slice: full turn back to the local coordinates.
        expect(centers[6], 400.0, 350.0);
        expect(centers[7], 400.0, 250.0);
    }

    #[test]
    fn test_expired_particle_draws_once_more_then_leaves() {
        let mut scene = scene();
        scene.particles.push(Particle {
            position: Vec2::ZERO,
            velocity: Vec2::ZERO,
            radius: 1.0,
            color: Rgba::WHITE,
            lifespan: 0.01,
        });

        let mut list = DrawList::new();
        scene.advance(&mut list, VIEWPORT, idle());

        // 16 circle fills at (clamped) zero opacity, then eviction.
        let circles = list
            .primitives()
            .iter()
            .filter(|p| p.kind == PrimitiveKind::Circle)
            .count();
        assert_eq!(circles, 16);
        assert!(list.primitives()[1..].iter().all(|p| p.color.a == 0.0));
        assert_eq!(scene.particle_count(), 0);
    }

    #[test]
    fn test_eviction_keeps_survivors() {
        let mut scene = scene();
        for lifespan in [0.01, 0.5, 0.01, 0.9] {
            scene.particles.push(Particle {
                position: Vec2::ZERO,
                velocity: Vec2::ZERO,
                radius: 1.0,
                color: Rgba::WHITE,
                lifespan,
            });
        }

        let mut list = DrawList::new();
        scene.advance(&mut list, VIEWPORT, idle());

        assert_eq!(scene.particle_count(), 2);
        let decay = scene.config().lifespan_decay;
        for p in scene.particles() {
            assert!(
                (p.lifespan - (0.5 - decay)).abs() < 1e-5
                    || (p.lifespan - (0.9 - decay)).abs() < 1e-5
            );
        }
    }

    #[test]
    fn test_hue_steps_and_wraps() {
        let mut scene = scene();
        let mut list = DrawList::new();

        for _ in 0..5 {
            list.begin_frame();
            scene.advance(&mut list, VIEWPORT, idle());
        }
        assert_eq!(scene.hue(), 5.0);

        for _ in 5..360 {
            list.begin_frame();
            scene.advance(&mut list, VIEWPORT, idle());
        }
        assert_eq!(scene.hue(), 0.0);
        assert_eq!(scene.frame(), 360);
    }

    #[test]
    fn test_burst_color_follows_hue() {
        let mut scene = scene();
        let mut list = DrawList::new();

        // Advance the hue to 2 with idle frames, then spawn.
        scene.advance(&mut list, VIEWPORT, idle());
        scene.advance(&mut list, VIEWPORT, idle());
        list.begin_frame();
        scene.advance(&mut list, VIEWPORT, moving(400.0, 300.0));

        let expected = Rgba::from_hsl(2.0, 1.0, 0.5);
        assert!(scene.particles().iter().all(|p| p.color == expected));
    }
}
