use std::borrow::Cow;

use crate::error::ViewerError;
use crate::factories::texture::TextureBundle;
use crate::factories::{BindGroupFactory, RenderPipelineFactory};
use crate::state::State;

use super::{create_uniform_buffer, finish_compile_scope, write_uniform_buffer};

const SHADER_SRC: &'static str = "

struct CameraUniform {
    model_view: mat4x4<f32>,
    projection: mat4x4<f32>,
    use_black: u32,
    has_texture: u32,
};

@group(0) @binding(0)
var<uniform> camera: CameraUniform;

@group(1) @binding(0)
var t_photo: texture_2d<f32>;
@group(1) @binding(1)
var s_photo: sampler;

struct VertexInput {
    @location(0) position: vec4<f32>,
    @location(1) uv: vec2<f32>,
};

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) uv: vec2<f32>,
};

@vertex
fn vs_main(in: VertexInput) -> VertexOutput {
    var out: VertexOutput;
    out.clip_position = camera.projection * camera.model_view * in.position;
    out.uv = in.uv;
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    if (camera.use_black != 0u) {
        return vec4<f32>(0.0, 0.0, 0.0, 1.0);
    }
    if (camera.has_texture != 0u) {
        return textureSample(t_photo, s_photo, in.uv);
    }
    return vec4<f32>(1.0, 1.0, 1.0, 1.0);
}
";

#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    pub model_view: [[f32; 4]; 4],
    pub projection: [[f32; 4]; 4],
    pub use_black: u32,
    pub has_texture: u32,
    pub _pad: [u32; 2],
}

const POSITION_ATTRIBS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x4];
const UV_ATTRIBS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![1 => Float32x2];

/// Program for the orbiting sphere: look-at model-view plus orthographic
/// projection, with flags selecting flat black (no photo yet) or the photo
/// texture. No color attribute exists in this family.
pub struct OrbitPipeline {
    pub shader_module: wgpu::ShaderModule,
    pub pipeline: wgpu::RenderPipeline,
    pub bind_group_layout: wgpu::BindGroupLayout,
    pub bind_group: wgpu::BindGroup,

    pub texture_bind_group_layout: wgpu::BindGroupLayout,
    pub texture_bind_group: wgpu::BindGroup,

    pub camera_buffer: wgpu::Buffer,
}

impl OrbitPipeline {
    pub fn new(ctx: &State, texture: &TextureBundle) -> Result<Self, ViewerError> {
        ctx.device.push_error_scope(wgpu::ErrorFilter::Validation);

        let shader_module = ctx
            .device
            .create_shader_module(wgpu::ShaderModuleDescriptor {
                label: Some("Orbit shader"),
                source: wgpu::ShaderSource::Wgsl(Cow::Borrowed(SHADER_SRC)),
            });

        let camera_buffer = create_uniform_buffer::<CameraUniform>(&ctx.device, "Orbit camera");

        let mut bind_factory = BindGroupFactory::new();
        bind_factory.add_uniform(
            wgpu::ShaderStages::VERTEX_FRAGMENT,
            &camera_buffer,
            wgpu::BufferSize::new(std::mem::size_of::<CameraUniform>() as _),
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
        pipeline_factory.set_label("Orbit pipeline");
        pipeline_factory.add_vertex_attributes(&POSITION_ATTRIBS, 4 * 4);
        pipeline_factory.add_vertex_attributes(&UV_ATTRIBS, 2 * 4);
        pipeline_factory.enable_depth();
        // The sphere draws as triangles no matter what render mode the
        // configuration asks for.
        pipeline_factory.set_topology(wgpu::PrimitiveTopology::TriangleList);

        let pipeline = pipeline_factory.create_render_pipeline(
            ctx,
            &shader_module,
            &[&bind_group_layout, &texture_bind_group_layout],
        );

        finish_compile_scope(ctx, "sphere")?;

        Ok(Self {
            shader_module,
            pipeline,
            bind_group_layout,
            bind_group,
            texture_bind_group_layout,
            texture_bind_group,
            camera_buffer,
        })
    }

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
            label: Some("Orbit texture bind group"),
        });
    }

    pub fn write_camera(
        &self,
        queue: &wgpu::Queue,
        model_view: glam::Mat4,
        projection: glam::Mat4,
        has_texture: bool,
    ) {
        let uniform = CameraUniform {
            model_view: model_view.to_cols_array_2d(),
            projection: projection.to_cols_array_2d(),
            use_black: (!has_texture) as u32,
            has_texture: has_texture as u32,
            _pad: [0; 2],
        };
        write_uniform_buffer(&uniform, &self.camera_buffer, queue);
    }
}
