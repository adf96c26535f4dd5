//! wgpu surface, device, and the two render passes of a frame.
//!
//! A frame is: record primitives into the [`DrawList`](crate::canvas::DrawList)
//! on the CPU, draw them instanced onto the persistent canvas texture, then
//! blit the canvas to the acquired surface frame. The canvas texture is the
//! piece that makes trails work; see [`blit::CanvasTarget`].

mod blit;
mod primitives;

use std::sync::Arc;

use winit::dpi::PhysicalSize;
use winit::window::Window;

use crate::canvas::{DrawList, Viewport};
use crate::color::Rgba;
use crate::error::GpuError;
use blit::CanvasTarget;
use primitives::PrimitivePass;

/// Owns the surface, device, and frame pipelines.
pub(crate) struct GpuContext {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    canvas: CanvasTarget,
    primitives: PrimitivePass,
    background: wgpu::Color,
}

impl GpuContext {
    pub async fn new(window: Arc<Window>, background: Rgba) -> Result<Self, GpuError> {
        let size = window.inner_size();

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY,
            ..Default::default()
        });

        let surface = instance.create_surface(window)?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or(GpuError::NoAdapter)?;
        log::info!("Adapter: {}", adapter.get_info().name);

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("Kaleido Device"),
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: Default::default(),
                },
                None,
            )
            .await?;

        let surface_caps = surface.get_capabilities(&adapter);
        let format = surface_caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .unwrap_or(surface_caps.formats[0]);
        log::debug!("Surface format: {format:?}");

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let canvas = CanvasTarget::new(&device, config.width, config.height, format);
        let primitives = PrimitivePass::new(&device, format);

        Ok(Self {
            surface,
            device,
            queue,
            config,
            canvas,
            primitives,
            background: wgpu::Color {
                r: background.r as f64,
                g: background.g as f64,
                b: background.b as f64,
                a: 1.0,
            },
        })
    }

    /// Reconfigure the surface and recreate the canvas texture. A no-op when
    /// the size is unchanged, so spurious resize events keep their trails.
    pub fn resize(&mut self, size: PhysicalSize<u32>) {
        let width = size.width.max(1);
        let height = size.height.max(1);
        if width == self.config.width && height == self.config.height {
            return;
        }
        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);
        self.canvas
            .resize(&self.device, width, height, self.config.format);
    }

    /// Reconfigure the surface at the current size after it was lost. The
    /// canvas texture is untouched.
    pub fn reconfigure(&mut self) {
        self.surface.configure(&self.device, &self.config);
    }

    /// Drawing area in physical pixels.
    pub fn viewport(&self) -> Viewport {
        Viewport::from_physical(self.config.width, self.config.height)
    }

    /// Draw the recorded frame onto the canvas texture and present it.
    pub fn render(&mut self, list: &DrawList) -> Result<(), wgpu::SurfaceError> {
        let frame = self.surface.get_current_texture()?;
        let frame_view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Frame Encoder"),
            });

        let viewport = self.viewport();
        let load = self.canvas.take_load_op(self.background);
        self.primitives.encode(
            &self.device,
            &self.queue,
            &mut encoder,
            self.canvas.view(),
            list,
            viewport,
            load,
        );
        self.canvas.blit(&mut encoder, &frame_view);

        self.queue.submit(std::iter::once(encoder.finish()));
        frame.present();

        Ok(())
    }
}
