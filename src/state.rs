use wgpu::{CommandEncoder, TextureView};
use winit::dpi::PhysicalSize;

use crate::error::ViewerError;
use crate::factories::texture::{DepthTextureFactory, TextureBundle};

#[derive(Copy, Clone)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height as f32
    }
}

pub struct State {
    pub instance: wgpu::Instance,
    pub adapter: wgpu::Adapter,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,

    pub config: wgpu::SurfaceConfiguration,
    pub window_surface: wgpu::Surface<'static>,

    pub depth_texture: Option<TextureBundle>,

    pub window_size: Size,
    pub sample_count: u32,
}

pub struct PerFrameData {
    pub encoder: CommandEncoder,
    pub view: TextureView,
    pub multisampled_view: Option<TextureView>,
}

impl State {
    pub async fn new(
        sample_count: u32,
        instance: wgpu::Instance,
        window_surface: wgpu::Surface<'static>,
        window_size: Size,
    ) -> Result<State, ViewerError> {
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&window_surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or(ViewerError::ResourceUnavailable("compatible graphics adapter"))?;

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    label: None,
                },
                None,
            )
            .await
            .map_err(|_| ViewerError::ResourceUnavailable("graphics device"))?;

        let surface_caps = window_surface.get_capabilities(&adapter);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_caps.formats[0],
            view_formats: Vec::new(),
            width: window_size.width,
            height: window_size.height,
            alpha_mode: wgpu::CompositeAlphaMode::Opaque,
            present_mode: surface_caps.present_modes[0],
            desired_maximum_frame_latency: 2,
        };

        window_surface.configure(&device, &config);

        let depth_texture =
            DepthTextureFactory::new(&device, &config, sample_count, "Default depth texture");

        Ok(State {
            instance,
            adapter,
            device,
            queue,
            window_surface,
            config,
            depth_texture: Some(depth_texture),
            window_size,
            sample_count,
        })
    }

    pub fn resize(&mut self, new_size: PhysicalSize<u32>) {
        if new_size.width > 0 && new_size.height > 0 {
            self.config.width = new_size.width;
            self.config.height = new_size.height;
            self.window_size = Size::new(new_size.width, new_size.height);
            self.window_surface.configure(&self.device, &self.config);

            if self.depth_texture.is_some() {
                self.depth_texture = Some(DepthTextureFactory::new(
                    &self.device,
                    &self.config,
                    self.sample_count,
                    "Default depth texture",
                ));
            }
        }
    }

    /// Runs one frame's encoding through `render_callback` and presents.
    /// Losing the surface for a frame is not fatal; the frame is skipped.
    pub fn render<'a, F: 'a>(&self, render_callback: F)
    where
        F: FnOnce(&State, &mut PerFrameData),
    {
        let output_surface = match self.window_surface.get_current_texture() {
            Ok(frame) => frame,
            Err(err) => {
                log::warn!("skipping frame, surface unavailable: {}", err);
                return;
            }
        };

        let encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        let view = output_surface
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let multisampled_view = (self.sample_count > 1).then(|| {
            self.device
                .create_texture(&wgpu::TextureDescriptor {
                    size: wgpu::Extent3d {
                        width: self.config.width,
                        height: self.config.height,
                        depth_or_array_layers: 1,
                    },
                    mip_level_count: 1,
                    sample_count: self.sample_count,
                    view_formats: &[],
                    dimension: wgpu::TextureDimension::D2,
                    format: self.config.format,
                    usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
                    label: None,
                })
                .create_view(&wgpu::TextureViewDescriptor::default())
        });

        let mut per_frame_data = PerFrameData {
            encoder,
            view,
            multisampled_view,
        };

        render_callback(self, &mut per_frame_data);

        self.queue
            .submit(std::iter::once(per_frame_data.encoder.finish()));
        output_surface.present();
    }
}
