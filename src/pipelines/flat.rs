use std::borrow::Cow;

use crate::error::ViewerError;
use crate::factories::texture::TextureBundle;
use crate::factories::{BindGroupFactory, RenderPipelineFactory};
use crate::state::State;

use wgpu::PrimitiveTopology;

use super::{create_uniform_buffer, finish_compile_scope, write_uniform_buffer};

const SHADER_SRC: &'static str = "

struct RotationUniform {
    theta: vec3<f32>,
};

@group(0) @binding(0)
var<uniform> rotation: RotationUniform;

@group(1) @binding(0)
var t_photo: texture_2d<f32>;
@group(1) @binding(1)
var s_photo: sampler;

struct VertexInput {
    @location(0) position: vec4<f32>,
    @location(1) color: vec4<f32>,
    @location(2) uv: vec2<f32>,
};

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) color: vec4<f32>,
    @location(1) uv: vec2<f32>,
};

@vertex
fn vs_main(in: VertexInput) -> VertexOutput {
    let angles = radians(rotation.theta);
    let c = cos(angles);
    let s = sin(angles);

    let rx = mat4x4<f32>(
        vec4<f32>(1.0, 0.0, 0.0, 0.0),
        vec4<f32>(0.0, c.x, s.x, 0.0),
        vec4<f32>(0.0, -s.x, c.x, 0.0),
        vec4<f32>(0.0, 0.0, 0.0, 1.0),
    );
    let ry = mat4x4<f32>(
        vec4<f32>(c.y, 0.0, -s.y, 0.0),
        vec4<f32>(0.0, 1.0, 0.0, 0.0),
        vec4<f32>(s.y, 0.0, c.y, 0.0),
        vec4<f32>(0.0, 0.0, 0.0, 1.0),
    );
    let rz = mat4x4<f32>(
        vec4<f32>(c.z, s.z, 0.0, 0.0),
        vec4<f32>(-s.z, c.z, 0.0, 0.0),
        vec4<f32>(0.0, 0.0, 1.0, 0.0),
        vec4<f32>(0.0, 0.0, 0.0, 1.0),
    );

    var out: VertexOutput;
    out.clip_position = rz * ry * rx * in.position;
    out.color = in.color;
    out.uv = in.uv;
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    return textureSample(t_photo, s_photo, in.uv) * in.color;
}
";

#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct RotationUniform {
    pub theta: [f32; 3],
    pub _pad: f32,
}

const POSITION_ATTRIBS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x4];
const COLOR_ATTRIBS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![1 => Float32x4];
const UV_ATTRIBS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![2 => Float32x2];

/// Program for the flat-rotated shape family (cubes, platonic solids, OBJ
/// models): a vec3 of Euler angles in degrees drives the spin, positions,
/// colors and texture coordinates arrive in three separate buffers.
pub struct FlatPipeline {
    pub shader_module: wgpu::ShaderModule,
    pub pipeline: wgpu::RenderPipeline,
    pub bind_group_layout: wgpu::BindGroupLayout,
    pub bind_group: wgpu::BindGroup,

    pub texture_bind_group_layout: wgpu::BindGroupLayout,
    pub texture_bind_group: wgpu::BindGroup,

    pub rotation_buffer: wgpu::Buffer,
}

impl FlatPipeline {
    pub fn new(
        ctx: &State,
        texture: &TextureBundle,
        topology: PrimitiveTopology,
    ) -> Result<Self, ViewerError> {
        ctx.device.push_error_scope(wgpu::ErrorFilter::Validation);

        let shader_module = ctx
            .device
            .create_shader_module(wgpu::ShaderModuleDescriptor {
                label: Some("Flat rotation shader"),
                source: wgpu::ShaderSource::Wgsl(Cow::Borrowed(SHADER_SRC)),
            });

        let rotation_buffer = create_uniform_buffer::<RotationUniform>(&ctx.device, "Rotation");

        let mut bind_factory = BindGroupFactory::new();
        bind_factory.add_uniform(
            wgpu::ShaderStages::VERTEX,
            &rotation_buffer,
            wgpu::BufferSize::new(std::mem::size_of::<RotationUniform>() as _),
        );
        let (bind_group_layout, bind_group) = bind_factory.build(&ctx.device);

        let mut texture_factory = BindGroupFactory::new();
        texture_factory.add_texture_and_sampler(
            wgpu::ShaderStages::FRAGMENT,
            &texture.view,
            &texture.sampler,
        );
        let (texture_bind_group_layout, texture_bind_group) = texture_factory.build(&ctx.device);

        let mut pipeline_factory = RenderPipelineFactory::new();
        pipeline_factory.set_label("Flat rotation pipeline");
        pipeline_factory.add_vertex_attributes(&POSITION_ATTRIBS, 4 * 4);
        pipeline_factory.add_vertex_attributes(&COLOR_ATTRIBS, 4 * 4);
        pipeline_factory.add_vertex_attributes(&UV_ATTRIBS, 2 * 4);
        pipeline_factory.enable_depth();
        pipeline_factory.set_topology(topology);

        let pipeline = pipeline_factory.create_render_pipeline(
            ctx,
            &shader_module,
            &[&bind_group_layout, &texture_bind_group_layout],
        );

        finish_compile_scope(ctx, "flat")?;

        Ok(Self {
            shader_module,
            pipeline,
            bind_group_layout,
            bind_group,
            texture_bind_group_layout,
            texture_bind_group,
            rotation_buffer,
        })
    }

    /// Swaps the sampled texture; the bind group is rebuilt against the
    /// layout the pipeline was created with.
    pub fn set_texture(&mut self, ctx: &State, texture: &TextureBundle) {
        self.texture_bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &self.texture_bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&texture.view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&texture.sampler),
                },
            ],
            label: Some("Flat texture bind group"),
        });
    }

    pub fn write_rotation(&self, queue: &wgpu::Queue, theta: glam::Vec3) {
        let uniform = RotationUniform {
            theta: theta.to_array(),
            _pad: 0.0,
        };
        write_uniform_buffer(&uniform, &self.rotation_buffer, queue);
    }
}
