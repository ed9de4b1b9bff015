pub mod bind_group;
pub mod render_pass;
pub mod render_pipeline;
pub mod texture;

pub use bind_group::BindGroupFactory;
pub use render_pipeline::RenderPipelineFactory;
