use crate::state::State;
use wgpu::{PrimitiveTopology, ShaderModule, TextureFormat};

use super::texture::DepthTextureFactory;

pub struct RenderPipelineFactory<'a> {
    vertex_buffer_layouts: Vec<wgpu::VertexBufferLayout<'a>>,
    enable_depth: bool,

    color_target_format: Option<TextureFormat>,
    sample_count: Option<u32>,
    topology: PrimitiveTopology,
    label: Option<&'static str>,
}

impl<'a> RenderPipelineFactory<'a> {
    pub fn new() -> Self {
        RenderPipelineFactory {
            vertex_buffer_layouts: Vec::new(),
            enable_depth: false,
            color_target_format: None,
            sample_count: None,
            topology: PrimitiveTopology::TriangleList,
            label: Some("Pipeline from helper"),
        }
    }

    pub fn set_label(&mut self, label: &'static str) {
        self.label = Some(label);
    }

    /// Each call adds one vertex buffer slot; the spinning shapes bind
    /// position, color and texture coordinates from three separate buffers.
    pub fn add_vertex_attributes(
        &mut self,
        attribs: &'a [wgpu::VertexAttribute],
        stride: wgpu::BufferAddress,
    ) {
        self.vertex_buffer_layouts.push(wgpu::VertexBufferLayout {
            array_stride: stride,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: attribs,
        });
    }

    pub fn enable_depth(&mut self) {
        self.enable_depth = true;
    }

    pub fn set_sample_count(&mut self, sample_count: Option<u32>) {
        self.sample_count = sample_count;
    }

    pub fn set_color_target_format(&mut self, format: Option<TextureFormat>) {
        self.color_target_format = format;
    }

    pub fn set_topology(&mut self, value: PrimitiveTopology) {
        self.topology = value;
    }

    pub fn create_render_pipeline(
        &self,
        state: &State,
        shader_module: &ShaderModule,
        bind_group_layouts: &[&wgpu::BindGroupLayout],
    ) -> wgpu::RenderPipeline {
        let depth_config = if self.enable_depth {
            Some(wgpu::DepthStencilState {
                format: DepthTextureFactory::DEPTH_FORMAT,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            })
        } else {
            None
        };

        let sample_count = self.sample_count.unwrap_or(state.sample_count);

        let pipeline_layout = state
            .device
            .create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("PipelineLayout"),
                bind_group_layouts,
                push_constant_ranges: &[],
            });

        let color_target_format = self.color_target_format.unwrap_or(state.config.format);

        state
            .device
            .create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: self.label,
                layout: Some(&pipeline_layout),
                vertex: wgpu::VertexState {
                    module: shader_module,
                    entry_point: "vs_main",
                    buffers: &self.vertex_buffer_layouts[..],
                },
                fragment: Some(wgpu::FragmentState {
                    module: shader_module,
                    entry_point: "fs_main",
                    targets: &[Some(wgpu::ColorTargetState {
                        format: color_target_format,
                        blend: Some(wgpu::BlendState {
                            color: wgpu::BlendComponent {
                                src_factor: wgpu::BlendFactor::SrcAlpha,
                                dst_factor: wgpu::BlendFactor::OneMinusSrcAlpha,
                                operation: wgpu::BlendOperation::Add,
                            },
                            alpha: wgpu::BlendComponent::OVER,
                        }),
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                }),
                primitive: wgpu::PrimitiveState {
                    cull_mode: None,
                    topology: self.topology,
                    ..Default::default()
                },
                depth_stencil: depth_config,
                multisample: wgpu::MultisampleState {
                    count: sample_count,
                    ..Default::default()
                },
                multiview: None,
            })
    }
}
