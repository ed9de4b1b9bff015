use crate::error::ViewerError;
use crate::state::State;

pub mod flat;
pub mod orbit;

pub use flat::FlatPipeline;
pub use orbit::OrbitPipeline;

pub fn create_uniform_buffer<T: bytemuck::Pod>(device: &wgpu::Device, label: &str) -> wgpu::Buffer {
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some(label),
        size: std::mem::size_of::<T>() as u64,
        usage: wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::UNIFORM,
        mapped_at_creation: false,
    })
}

pub fn write_uniform_buffer<T: bytemuck::Pod>(value: &T, buffer: &wgpu::Buffer, queue: &wgpu::Queue) {
    queue.write_buffer(buffer, 0, bytemuck::bytes_of(value));
}

/// Collects validation errors raised while building a shape's program.
/// Compilation problems must abort the shape switch instead of panicking the
/// render loop, so pipeline constructors run inside an error scope.
pub(crate) fn finish_compile_scope(ctx: &State, shape: &'static str) -> Result<(), ViewerError> {
    match pollster::block_on(ctx.device.pop_error_scope()) {
        None => Ok(()),
        Some(error) => Err(ViewerError::CompileFailure {
            shape,
            reason: error.to_string(),
        }),
    }
}
