pub mod cameras;
pub mod capture;
pub mod error;
pub mod factories;
pub mod framework;
pub mod geometry;
pub mod pipelines;
pub mod renderer;
pub mod state;
pub mod texture_binder;

pub use glam;
pub use image;
pub use wgpu;

pub use error::ViewerError;
pub use renderer::ShapeRenderer;
