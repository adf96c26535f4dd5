//! Particle spawning.
//!
//! The spawner owns the effect's RNG. Each pointer-move frame produces one
//! burst of particles at the pointer, all sharing the frame's hue but each
//! with its own radius and drift.

use crate::canvas::Viewport;
use crate::color::Rgba;
use crate::config::EffectConfig;
use crate::input::PointerState;
use crate::particle::Particle;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Burst spawner with its own small RNG.
#[derive(Debug)]
pub struct Spawner {
    rng: SmallRng,
}

impl Spawner {
    /// Create a spawner seeded from the system clock, so runs differ.
    pub fn new() -> Self {
        let seed = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(42);
        Self::with_seed(seed)
    }

    /// Create a spawner with an explicit seed for reproducible runs.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Spawn one burst at the pointer if it is moving.
    ///
    /// Returns an empty list while the pointer is idle. Otherwise returns
    /// exactly `config.spawn_per_move` particles positioned at the pointer
    /// relative to the viewport center, each with radius uniform in
    /// `[spawn_radius_min, spawn_radius_max]` and per-axis drift uniform in
    /// `[-drift_speed, drift_speed]`, colored `hsl(hue, 100%, 50%)`.
    pub fn try_spawn(
        &mut self,
        config: &EffectConfig,
        pointer: PointerState,
        viewport: Viewport,
        hue: f32,
    ) -> Vec<Particle> {
        if !pointer.moving {
            return Vec::new();
        }

        let origin = pointer.position - viewport.center();
        let color = Rgba::from_hsl(hue, 1.0, 0.5);

        (0..config.spawn_per_move)
            .map(|_| {
                let radius = self.random_range(config.spawn_radius_min, config.spawn_radius_max);
                let velocity = glam::Vec2::new(
                    self.random_range(-config.drift_speed, config.drift_speed),
                    self.random_range(-config.drift_speed, config.drift_speed),
                );
                Particle::new(origin, velocity, radius, color)
            })
            .collect()
    }

    /// Random f32 in the given inclusive range.
    #[inline]
    fn random_range(&mut self, min: f32, max: f32) -> f32 {
        self.rng.gen_range(min..=max)
    }
}

impl Default for Spawner {
    fn default() -> Self {
        Self::new()
    }
}
