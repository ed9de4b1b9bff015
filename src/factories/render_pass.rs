use crate::state::State;

pub struct RenderPassFactory<'a> {
    color_attachments: Vec<Option<wgpu::RenderPassColorAttachment<'a>>>,
}

impl<'a> RenderPassFactory<'a> {
    pub fn new() -> Self {
        Self {
            color_attachments: Vec::new(),
        }
    }

    /// `resolve_target` is the surface view when multisampling; without MSAA
    /// the source view is the surface itself and no resolve happens.
    pub fn add_color_attachment(
        &mut self,
        clear_color: wgpu::Color,
        source: &'a wgpu::TextureView,
        resolve_target: Option<&'a wgpu::TextureView>,
    ) {
        self.color_attachments
            .push(Some(wgpu::RenderPassColorAttachment {
                view: source,
                resolve_target,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(clear_color),
                    store: if resolve_target.is_some() {
                        wgpu::StoreOp::Discard
                    } else {
                        wgpu::StoreOp::Store
                    },
                },
            }));
    }

    pub fn get_render_pass(
        &self,
        ctx: &'a State,
        encoder: &'a mut wgpu::CommandEncoder,
        enable_depth: bool,
    ) -> wgpu::RenderPass<'a> {
        let depth_stencil = if enable_depth {
            ctx.depth_texture
                .as_ref()
                .map(|bundle| wgpu::RenderPassDepthStencilAttachment {
                    view: &bundle.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Discard,
                    }),
                    stencil_ops: None,
                })
        } else {
            None
        };

        encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Render Pass"),
            color_attachments: &self.color_attachments,
            depth_stencil_attachment: depth_stencil,
            occlusion_query_set: None,
            timestamp_writes: None,
        })
    }
}
