use std::num::NonZeroU64;

/// Collects uniform/texture bindings in declaration order and builds the
/// matching layout and bind group in one go.
pub struct BindGroupFactory<'a> {
    resources: Vec<wgpu::BindGroupEntry<'a>>,
    binding_types: Vec<(wgpu::ShaderStages, wgpu::BindingType)>,
}

impl<'a> BindGroupFactory<'a> {
    pub fn new() -> Self {
        Self {
            resources: Vec::new(),
            binding_types: Vec::new(),
        }
    }

    pub fn add_uniform<'b>(
        &'b mut self,
        stage: wgpu::ShaderStages,
        buffer: &'a wgpu::Buffer,
        min_binding_size: Option<NonZeroU64>,
    ) -> &'b mut Self {
        self.binding_types.push((
            stage,
            wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size,
            },
        ));
        self.resources.push(wgpu::BindGroupEntry {
            binding: self.resources.len() as u32,
            resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                buffer,
                offset: 0,
                size: min_binding_size,
            }),
        });

        self
    }

    pub fn add_texture_and_sampler<'b>(
        &'b mut self,
        stage: wgpu::ShaderStages,
        texture_view: &'a wgpu::TextureView,
        sampler: &'a wgpu::Sampler,
    ) -> &'b mut Self {
        self.resources.push(wgpu::BindGroupEntry {
            binding: self.resources.len() as u32,
            resource: wgpu::BindingResource::TextureView(texture_view),
        });
        self.resources.push(wgpu::BindGroupEntry {
            binding: self.resources.len() as u32,
            resource: wgpu::BindingResource::Sampler(sampler),
        });

        self.binding_types.push((
            stage,
            wgpu::BindingType::Texture {
                multisampled: false,
                view_dimension: wgpu::TextureViewDimension::D2,
                sample_type: wgpu::TextureSampleType::Float { filterable: true },
            },
        ));
        self.binding_types.push((
            stage,
            wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
        ));

        self
    }

    pub fn build(&self, device: &wgpu::Device) -> (wgpu::BindGroupLayout, wgpu::BindGroup) {
        let layout_entries: Vec<wgpu::BindGroupLayoutEntry> = self
            .binding_types
            .iter()
            .enumerate()
            .map(|(index, (visibility, ty))| wgpu::BindGroupLayoutEntry {
                binding: index as u32,
                visibility: *visibility,
                ty: *ty,
                count: None,
            })
            .collect();

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            entries: layout_entries.as_slice(),
            label: Some("Bind group layout from helper"),
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &bind_group_layout,
            entries: self.resources.as_slice(),
            label: Some("Bind group from helper"),
        });

        (bind_group_layout, bind_group)
    }
}
