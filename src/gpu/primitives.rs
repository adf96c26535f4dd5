//! Instanced rendering of recorded primitives.
//!
//! Every [`Primitive`](crate::canvas::Primitive) becomes one instanced quad.
//! The vertex shader applies the recorded affine transform and maps device
//! pixels to clip space; the fragment shader turns circle quads into soft
//! disks. Instances draw in recorded order with standard alpha blending, so
//! the fade coat composites over the previous frame's pixels exactly like a
//! translucent rectangle fill.

use crate::canvas::{DrawList, Primitive, PrimitiveKind, Viewport};
use glam::Vec2;
use wgpu::util::DeviceExt;

/// WGSL for the primitive pass.
pub(crate) const PRIMITIVE_SHADER: &str = r#"
struct Globals {
    resolution: vec2<f32>,
    pad: vec2<f32>,
}

@group(0) @binding(0)
var<uniform> globals: Globals;

struct VertexInput {
    @builtin(vertex_index) vertex_index: u32,
    @location(0) mat_x: vec2<f32>,
    @location(1) mat_y: vec2<f32>,
    @location(2) mat_t: vec2<f32>,
    @location(3) center: vec2<f32>,
    @location(4) half_size: vec2<f32>,
    @location(5) color: vec4<f32>,
    @location(6) kind: u32,
}

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) color: vec4<f32>,
    @location(1) uv: vec2<f32>,
    @location(2) @interpolate(flat) kind: u32,
}

@vertex
fn vs_main(in: VertexInput) -> VertexOutput {
    var quad_vertices = array<vec2<f32>, 6>(
        vec2<f32>(-1.0, -1.0),
        vec2<f32>( 1.0, -1.0),
        vec2<f32>(-1.0,  1.0),
        vec2<f32>(-1.0,  1.0),
        vec2<f32>( 1.0, -1.0),
        vec2<f32>( 1.0,  1.0),
    );

    let quad_pos = quad_vertices[in.vertex_index];
    let local = in.center + quad_pos * in.half_size;
    let device = in.mat_x * local.x + in.mat_y * local.y + in.mat_t;

    // Device pixels to clip space; canvas y points down.
    let ndc = vec2<f32>(
        device.x / globals.resolution.x * 2.0 - 1.0,
        1.0 - device.y / globals.resolution.y * 2.0,
    );

    var out: VertexOutput;
    out.clip_position = vec4<f32>(ndc, 0.0, 1.0);
    out.color = in.color;
    out.uv = quad_pos;
    out.kind = in.kind;
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    var alpha = in.color.a;
    if in.kind == 1u {
        let dist = length(in.uv);
        if dist > 1.0 {
            discard;
        }
        alpha = alpha * (1.0 - smoothstep(0.85, 1.0, dist));
    }
    return vec4<f32>(in.color.rgb, alpha);
}
"#;

const KIND_RECT: u32 = 0;
const KIND_CIRCLE: u32 = 1;

/// Viewport size uniform.
#[repr(C)]
#[derive(Debug, Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
struct Globals {
    resolution: Vec2,
    pad: Vec2,
}

/// One recorded primitive in GPU layout: the flattened affine transform
/// (two linear columns plus translation), the local quad, color, and kind.
/// `Vec2` is two packed `f32`s, so the layout matches [`Self::ATTRIBUTES`].
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct PrimitiveInstance {
    mat_x: Vec2,
    mat_y: Vec2,
    mat_t: Vec2,
    center: Vec2,
    half_size: Vec2,
    color: [f32; 4],
    kind: u32,
    pad: u32,
}

impl PrimitiveInstance {
    fn from_primitive(p: &Primitive) -> Self {
        Self {
            mat_x: p.transform.matrix2.x_axis,
            mat_y: p.transform.matrix2.y_axis,
            mat_t: p.transform.translation,
            center: p.center,
            half_size: p.half_size,
            color: p.color.to_array(),
            kind: match p.kind {
                PrimitiveKind::Rect => KIND_RECT,
                PrimitiveKind::Circle => KIND_CIRCLE,
            },
            pad: 0,
        }
    }

    const ATTRIBUTES: [wgpu::VertexAttribute; 7] = [
        wgpu::VertexAttribute {
            offset: 0,
            shader_location: 0,
            format: wgpu::VertexFormat::Float32x2,
        },
        wgpu::VertexAttribute {
            offset: 8,
            shader_location: 1,
            format: wgpu::VertexFormat::Float32x2,
        },
        wgpu::VertexAttribute {
            offset: 16,
            shader_location: 2,
            format: wgpu::VertexFormat::Float32x2,
        },
        wgpu::VertexAttribute {
            offset: 24,
            shader_location: 3,
            format: wgpu::VertexFormat::Float32x2,
        },
        wgpu::VertexAttribute {
            offset: 32,
            shader_location: 4,
            format: wgpu::VertexFormat::Float32x2,
        },
        wgpu::VertexAttribute {
            offset: 40,
            shader_location: 5,
            format: wgpu::VertexFormat::Float32x4,
        },
        wgpu::VertexAttribute {
            offset: 56,
            shader_location: 6,
            format: wgpu::VertexFormat::Uint32,
        },
    ];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<PrimitiveInstance>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

/// Pipeline and buffers for drawing a frame's primitives onto the canvas
/// texture.
pub(crate) struct PrimitivePass {
    pipeline: wgpu::RenderPipeline,
    globals_buffer: wgpu::Buffer,
    globals_bind_group: wgpu::BindGroup,
    instance_buffer: wgpu::Buffer,
    instance_capacity: usize,
    staging: Vec<PrimitiveInstance>,
}

const INITIAL_INSTANCE_CAPACITY: usize = 1024;

impl PrimitivePass {
    pub fn new(device: &wgpu::Device, target_format: wgpu::TextureFormat) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Primitive Shader"),
            source: wgpu::ShaderSource::Wgsl(PRIMITIVE_SHADER.into()),
        });

        let globals_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Globals Buffer"),
            contents: bytemuck::bytes_of(&Globals {
                resolution: Vec2::ONE,
                pad: Vec2::ZERO,
            }),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let globals_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Globals Bind Group Layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });

        let globals_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Globals Bind Group"),
            layout: &globals_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: globals_buffer.as_entire_binding(),
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Primitive Pipeline Layout"),
            bind_group_layouts: &[&globals_layout],
            push_constant_ranges: &[],
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Primitive Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[PrimitiveInstance::layout()],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: target_format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                ..Default::default()
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        let instance_buffer = Self::make_instance_buffer(device, INITIAL_INSTANCE_CAPACITY);

        Self {
            pipeline,
            globals_buffer,
            globals_bind_group,
            instance_buffer,
            instance_capacity: INITIAL_INSTANCE_CAPACITY,
            staging: Vec::with_capacity(INITIAL_INSTANCE_CAPACITY),
        }
    }

    fn make_instance_buffer(device: &wgpu::Device, capacity: usize) -> wgpu::Buffer {
        device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Primitive Instance Buffer"),
            size: (capacity * std::mem::size_of::<PrimitiveInstance>()) as wgpu::BufferAddress,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        })
    }

    /// Upload the frame's primitives and record the canvas render pass.
    ///
    /// `load` is `Clear` right after the canvas texture was (re)created and
    /// `Load` on every other frame, which is what keeps the trails.
    pub fn encode(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        encoder: &mut wgpu::CommandEncoder,
        target: &wgpu::TextureView,
        list: &DrawList,
        viewport: Viewport,
        load: wgpu::LoadOp<wgpu::Color>,
    ) {
        self.staging.clear();
        self.staging
            .extend(list.primitives().iter().map(PrimitiveInstance::from_primitive));

        if self.staging.len() > self.instance_capacity {
            self.instance_capacity = self.staging.len().next_power_of_two();
            self.instance_buffer = Self::make_instance_buffer(device, self.instance_capacity);
        }
        if !self.staging.is_empty() {
            queue.write_buffer(&self.instance_buffer, 0, bytemuck::cast_slice(&self.staging));
        }
        queue.write_buffer(
            &self.globals_buffer,
            0,
            bytemuck::bytes_of(&Globals {
                resolution: viewport.size(),
                pad: Vec2::ZERO,
            }),
        );

        let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Canvas Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target,
                resolve_target: None,
                ops: wgpu::Operations {
                    load,
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
        });
        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(0, &self.globals_bind_group, &[]);
        pass.set_vertex_buffer(0, self.instance_buffer.slice(..));
        pass.draw(0..6, 0..self.staging.len() as u32);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::Canvas;
    use crate::color::Rgba;
    use glam::Vec2;

    #[test]
    fn test_instance_layout_matches_attributes() {
        assert_eq!(std::mem::size_of::<PrimitiveInstance>(), 64);
        assert_eq!(std::mem::size_of::<Globals>(), 16);
    }

    #[test]
    fn test_instance_bytes_line_up_with_attribute_offsets() {
        let inst = PrimitiveInstance {
            mat_x: Vec2::new(1.0, 2.0),
            mat_y: Vec2::new(3.0, 4.0),
            mat_t: Vec2::new(5.0, 6.0),
            center: Vec2::new(7.0, 8.0),
            half_size: Vec2::new(9.0, 10.0),
            color: [11.0, 12.0, 13.0, 14.0],
            kind: KIND_CIRCLE,
            pad: 0,
        };

        let words: &[u32] = bytemuck::cast_slice(bytemuck::bytes_of(&inst));
        let leads = [1.0f32, 3.0, 5.0, 7.0, 9.0, 11.0];
        for (attr, lead) in PrimitiveInstance::ATTRIBUTES[..6].iter().zip(leads) {
            let word = words[attr.offset as usize / 4];
            assert_eq!(f32::from_bits(word), lead);
        }
        let kind_offset = PrimitiveInstance::ATTRIBUTES[6].offset as usize;
        assert_eq!(words[kind_offset / 4], KIND_CIRCLE);
    }

    #[test]
    fn test_instances_preserve_recorded_order_and_kinds() {
        let mut list = DrawList::new();
        list.set_fill_color(Rgba::BLACK.with_alpha(0.1));
        list.fill_rect(Vec2::ZERO, Vec2::new(800.0, 600.0));
        list.set_fill_color(Rgba::from_hsl(90.0, 1.0, 0.5));
        list.fill_circle(Vec2::new(4.0, 4.0), 2.0);

        let instances: Vec<PrimitiveInstance> = list
            .primitives()
            .iter()
            .map(PrimitiveInstance::from_primitive)
            .collect();

        assert_eq!(instances.len(), 2);
        assert_eq!(instances[0].kind, KIND_RECT);
        assert_eq!(instances[1].kind, KIND_CIRCLE);
        assert_eq!(instances[0].half_size, Vec2::new(400.0, 300.0));
        assert_eq!(instances[1].center, Vec2::new(4.0, 4.0));
        assert!((instances[0].color[3] - 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_instance_carries_flattened_transform() {
        let mut list = DrawList::new();
        list.translate(Vec2::new(400.0, 300.0));
        list.scale(Vec2::new(1.0, -1.0));
        list.fill_circle(Vec2::new(0.0, 50.0), 1.0);

        let inst = PrimitiveInstance::from_primitive(&list.primitives()[0]);
        assert_eq!(inst.mat_x, Vec2::new(1.0, 0.0));
        assert_eq!(inst.mat_y, Vec2::new(0.0, -1.0));
        assert_eq!(inst.mat_t, Vec2::new(400.0, 300.0));
    }

    #[test]
    fn test_primitive_shader_validates() {
        let module = naga::front::wgsl::parse_str(PRIMITIVE_SHADER).expect("shader parses");
        naga::valid::Validator::new(
            naga::valid::ValidationFlags::all(),
            naga::valid::Capabilities::default(),
        )
        .validate(&module)
        .expect("shader validates");
    }
}
