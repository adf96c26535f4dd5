//! Effect configuration.
//!
//! All tunables live in [`EffectConfig`]. Validation is fail-fast: the
//! builder validates before any window or GPU work happens.

use crate::color::Rgba;
use crate::error::ConfigError;
use std::time::Duration;

/// Tunables for the kaleidoscope effect.
///
/// The defaults reproduce the classic look: 8-fold symmetry, bursts of 3
/// particles per pointer move, and a 10% dark coat per frame for trails.
#[derive(Debug, Clone)]
pub struct EffectConfig {
    /// Number of rotational slices around the canvas center. Each slice is
    /// also mirrored, so particles appear `2 * symmetry` times.
    pub symmetry: u32,
    /// Particles spawned per frame while the pointer is moving.
    pub spawn_per_move: u32,
    /// Alpha of the background coat painted over the previous frame.
    /// Smaller values leave longer trails.
    pub fade_alpha: f32,
    /// Degrees the spawn hue advances per frame, wrapping at 360.
    pub hue_step: f32,
    /// Lifespan lost per frame. Lifespan starts at 1.0 and doubles as the
    /// draw opacity.
    pub lifespan_decay: f32,
    /// Radius lost per frame while above the floor.
    pub radius_decay: f32,
    /// Radius at which shrinking stops.
    pub radius_floor: f32,
    /// Smallest spawn radius.
    pub spawn_radius_min: f32,
    /// Largest spawn radius.
    pub spawn_radius_max: f32,
    /// Per-axis drift velocity bound; each axis is uniform in
    /// `[-drift_speed, drift_speed]` pixels per frame.
    pub drift_speed: f32,
    /// How long after the last pointer move spawning stops.
    pub pointer_quiet: Duration,
    /// Background color; also the base of the fade coat.
    pub background: Rgba,
}

impl Default for EffectConfig {
    fn default() -> Self {
        Self {
            symmetry: 8,
            spawn_per_move: 3,
            fade_alpha: 0.1,
            hue_step: 1.0,
            lifespan_decay: 0.015,
            radius_decay: 0.05,
            radius_floor: 0.2,
            spawn_radius_min: 1.0,
            spawn_radius_max: 5.0,
            drift_speed: 1.5,
            pointer_quiet: Duration::from_millis(100),
            background: Rgba::BLACK,
        }
    }
}

impl EffectConfig {
    /// Check the tunables. Called by the builder and by [`crate::Scene::new`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.symmetry == 0 {
            return Err(ConfigError::Symmetry);
        }
        if !(self.fade_alpha > 0.0 && self.fade_alpha <= 1.0) {
            return Err(ConfigError::FadeAlpha(self.fade_alpha));
        }
        if self.lifespan_decay <= 0.0 || self.lifespan_decay.is_nan() {
            return Err(ConfigError::LifespanDecay(self.lifespan_decay));
        }
        if !(self.spawn_radius_min > 0.0
            && self.spawn_radius_min <= self.spawn_radius_max
            && self.spawn_radius_max.is_finite())
        {
            return Err(ConfigError::SpawnRadius {
                min: self.spawn_radius_min,
                max: self.spawn_radius_max,
            });
        }
        if self.drift_speed < 0.0 || !self.drift_speed.is_finite() {
            return Err(ConfigError::DriftSpeed(self.drift_speed));
        }
        if self.radius_floor < 0.0 || !self.radius_floor.is_finite() {
            return Err(ConfigError::RadiusFloor(self.radius_floor));
        }
        Ok(())
    }

    /// The translucent rectangle color painted over the previous frame.
    pub fn fade_coat(&self) -> Rgba {
        self.background.with_alpha(self.fade_alpha)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(EffectConfig::default().validate().is_ok());
    }

    #[test]
    fn test_zero_symmetry_rejected() {
        let config = EffectConfig {
            symmetry: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Symmetry)));
    }

    #[test]
    fn test_fade_alpha_bounds() {
        let mut config = EffectConfig {
            fade_alpha: 0.0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::FadeAlpha(_))));

        config.fade_alpha = 1.5;
        assert!(matches!(config.validate(), Err(ConfigError::FadeAlpha(_))));

        config.fade_alpha = 1.0;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_lifespan_decay_must_be_positive() {
        let config = EffectConfig {
            lifespan_decay: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::LifespanDecay(_))
        ));
    }

    #[test]
    fn test_spawn_radius_ordering() {
        let config = EffectConfig {
            spawn_radius_min: 6.0,
            spawn_radius_max: 5.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::SpawnRadius { .. })
        ));

        let config = EffectConfig {
            spawn_radius_min: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::SpawnRadius { .. })
        ));

        let config = EffectConfig {
            spawn_radius_max: f32::NAN,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::SpawnRadius { .. })
        ));
    }

    #[test]
    fn test_drift_speed_bounds() {
        let mut config = EffectConfig {
            drift_speed: -1.5,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::DriftSpeed(_))));

        config.drift_speed = f32::NAN;
        assert!(matches!(config.validate(), Err(ConfigError::DriftSpeed(_))));

        config.drift_speed = 0.0;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_negative_radius_floor_rejected() {
        let mut config = EffectConfig {
            radius_floor: -0.2,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::RadiusFloor(_))));

        config.radius_floor = 0.0;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_fade_coat_uses_background() {
        let config = EffectConfig::default();
        let coat = config.fade_coat();
        assert_eq!(coat.r, 0.0);
        assert!((coat.a - 0.1).abs() < 1e-6);
    }
}
