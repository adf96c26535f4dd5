//! Error types for kaleido.
//!
//! This module provides error types for configuration validation, GPU
//! initialization, and running the effect.

use std::fmt;

/// Errors raised by configuration validation, before any window or GPU work.
#[derive(Debug)]
pub enum ConfigError {
    /// Symmetry of zero slices was requested.
    Symmetry,
    /// Fade alpha outside the (0, 1] range.
    FadeAlpha(f32),
    /// Lifespan decay of zero or less (particles would never expire).
    LifespanDecay(f32),
    /// Spawn radius bounds are empty or non-positive.
    SpawnRadius {
        /// Lower bound that was rejected.
        min: f32,
        /// Upper bound that was rejected.
        max: f32,
    },
    /// Negative drift speed (the per-axis velocity range would be inverted).
    DriftSpeed(f32),
    /// Negative radius floor (particles could shrink past zero radius).
    RadiusFloor(f32),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Symmetry => {
                write!(f, "Symmetry must be at least 1. Use .with_symmetry() to set the slice count.")
            }
            ConfigError::FadeAlpha(a) => {
                write!(f, "Fade alpha must be in (0, 1], got {}. Use .with_fade_alpha() to adjust it.", a)
            }
            ConfigError::LifespanDecay(d) => {
                write!(f, "Lifespan decay must be positive, got {}.", d)
            }
            ConfigError::SpawnRadius { min, max } => {
                write!(f, "Spawn radius bounds must be finite and satisfy 0 < min <= max, got {}..={}.", min, max)
            }
            ConfigError::DriftSpeed(s) => {
                write!(f, "Drift speed must be non-negative, got {}.", s)
            }
            ConfigError::RadiusFloor(r) => {
                write!(f, "Radius floor must be non-negative, got {}.", r)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Errors that can occur during GPU initialization.
#[derive(Debug)]
pub enum GpuError {
    /// Failed to create a surface for rendering.
    SurfaceCreation(wgpu::CreateSurfaceError),
    /// No compatible GPU adapter found.
    NoAdapter,
    /// Failed to create GPU device.
    DeviceCreation(wgpu::RequestDeviceError),
}

impl fmt::Display for GpuError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GpuError::SurfaceCreation(e) => write!(f, "Failed to create GPU surface: {}", e),
            GpuError::NoAdapter => write!(f, "No compatible GPU adapter found. Ensure your system has a GPU with Vulkan/Metal/DX12 support."),
            GpuError::DeviceCreation(e) => write!(f, "Failed to create GPU device: {}", e),
        }
    }
}

impl std::error::Error for GpuError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GpuError::SurfaceCreation(e) => Some(e),
            GpuError::DeviceCreation(e) => Some(e),
            GpuError::NoAdapter => None,
        }
    }
}

impl From<wgpu::CreateSurfaceError> for GpuError {
    fn from(e: wgpu::CreateSurfaceError) -> Self {
        GpuError::SurfaceCreation(e)
    }
}

impl From<wgpu::RequestDeviceError> for GpuError {
    fn from(e: wgpu::RequestDeviceError) -> Self {
        GpuError::DeviceCreation(e)
    }
}

/// Errors that can occur when running the effect.
#[derive(Debug)]
pub enum EffectError {
    /// The configuration failed validation.
    Config(ConfigError),
    /// Failed to create event loop.
    EventLoop(winit::error::EventLoopError),
    /// Failed to create window.
    Window(winit::error::OsError),
    /// GPU initialization failed.
    Gpu(GpuError),
}

impl fmt::Display for EffectError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EffectError::Config(e) => write!(f, "Invalid configuration: {}", e),
            EffectError::EventLoop(e) => write!(f, "Failed to create event loop: {}", e),
            EffectError::Window(e) => write!(f, "Failed to create window: {}", e),
            EffectError::Gpu(e) => write!(f, "GPU error: {}", e),
        }
    }
}

impl std::error::Error for EffectError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EffectError::Config(e) => Some(e),
            EffectError::EventLoop(e) => Some(e),
            EffectError::Window(e) => Some(e),
            EffectError::Gpu(e) => Some(e),
        }
    }
}

impl From<ConfigError> for EffectError {
    fn from(e: ConfigError) -> Self {
        EffectError::Config(e)
    }
}

impl From<winit::error::EventLoopError> for EffectError {
    fn from(e: winit::error::EventLoopError) -> Self {
        EffectError::EventLoop(e)
    }
}

impl From<winit::error::OsError> for EffectError {
    fn from(e: winit::error::OsError) -> Self {
        EffectError::Window(e)
    }
}

impl From<GpuError> for EffectError {
    fn from(e: GpuError) -> Self {
        EffectError::Gpu(e)
    }
}
