use std::time::{Duration, Instant};

use wgpu::util::DeviceExt;

use crate::cameras::{CameraMode, OrbitState, RotationAxis, RotationState};
use crate::capture::{CaptureController, FrameRecorder};
use crate::error::ViewerError;
use crate::geometry::{self, MeshData, RenderMode, ShapeKind};
use crate::pipelines::{FlatPipeline, OrbitPipeline};
use crate::state::State;
use crate::texture_binder::TextureBinder;

/// Sphere azimuth advance per frame while a capture is recording it.
const CAPTURE_SPIN_STEP: f32 = 0.1;

enum ShapePipeline {
    Flat(FlatPipeline),
    Orbiting(OrbitPipeline),
}

#[derive(Default)]
struct MeshBuffers {
    vertex: Option<wgpu::Buffer>,
    color: Option<wgpu::Buffer>,
    tex_coord: Option<wgpu::Buffer>,
}

impl MeshBuffers {
    /// Device buffers from the previous shape must be released before new
    /// ones are created.
    fn destroy_all(&mut self) {
        for buffer in [
            self.vertex.take(),
            self.color.take(),
            self.tex_coord.take(),
        ]
        .into_iter()
        .flatten()
        {
            buffer.destroy();
        }
    }
}

/// The live render configuration: one active shape, its program, device
/// buffers, geometry and camera. All mutation happens on the event-loop
/// thread, either in a UI callback or inside the frame tick.
pub struct ShapeRenderer {
    kind: ShapeKind,
    pipeline: Option<ShapePipeline>,
    buffers: MeshBuffers,
    mesh: MeshData,
    camera: CameraMode,
    render_mode: RenderMode,
    uses_texture: bool,

    binder: TextureBinder,
    capture: CaptureController,
}

impl ShapeRenderer {
    pub fn new(state: &State) -> Self {
        let mut renderer = Self {
            kind: ShapeKind::Cube,
            pipeline: None,
            buffers: MeshBuffers::default(),
            mesh: MeshData::new(),
            camera: CameraMode::Flat(RotationState::new(ShapeKind::Cube.rotation_speed())),
            render_mode: RenderMode::Triangles,
            uses_texture: true,
            binder: TextureBinder::new(state),
            capture: CaptureController::new(),
        };
        renderer.switch_shape(state, ShapeKind::Cube);
        renderer
    }

    pub fn kind(&self) -> ShapeKind {
        self.kind
    }

    pub fn camera(&self) -> &CameraMode {
        &self.camera
    }

    pub fn is_capturing(&self) -> bool {
        self.capture.is_capturing()
    }

    pub fn capture_status(&self) -> &str {
        self.capture.status()
    }

    /// Tears down the previous shape's device resources and rebuilds the
    /// whole configuration for `kind`. A failed program build logs the error
    /// and leaves the renderer idle until the next switch.
    pub fn switch_shape(&mut self, state: &State, kind: ShapeKind) {
        log::debug!("switching shape to {}", kind.label());

        self.buffers.destroy_all();
        self.mesh = MeshData::new();
        self.pipeline = None;

        self.kind = kind;
        self.uses_texture = kind.uses_texture();
        self.render_mode = kind.render_mode();
        self.camera = if kind.uses_projection() {
            CameraMode::Orbiting(OrbitState::new())
        } else {
            CameraMode::Flat(RotationState::new(kind.rotation_speed()))
        };

        let pipeline = if kind.uses_projection() {
            OrbitPipeline::new(state, self.binder.bundle()).map(ShapePipeline::Orbiting)
        } else {
            FlatPipeline::new(state, self.binder.bundle(), self.render_mode.topology())
                .map(ShapePipeline::Flat)
        };

        match pipeline {
            Ok(pipeline) => self.pipeline = Some(pipeline),
            Err(err) => {
                log::error!("aborting shape switch: {}", err);
                return;
            }
        }

        self.mesh = geometry::build(kind);

        if !self.mesh.positions.is_empty() {
            self.buffers.vertex = Some(state.device.create_buffer_init(
                &wgpu::util::BufferInitDescriptor {
                    label: Some("Shape vertex buffer"),
                    contents: bytemuck::cast_slice(&self.mesh.positions),
                    usage: wgpu::BufferUsages::VERTEX,
                },
            ));
        }
        if !self.mesh.colors.is_empty() {
            self.buffers.color = Some(state.device.create_buffer_init(
                &wgpu::util::BufferInitDescriptor {
                    label: Some("Shape color buffer"),
                    contents: bytemuck::cast_slice(&self.mesh.colors),
                    usage: wgpu::BufferUsages::VERTEX,
                },
            ));
        }
        if !self.mesh.tex_coords.is_empty() {
            self.buffers.tex_coord = Some(state.device.create_buffer_init(
                &wgpu::util::BufferInitDescriptor {
                    label: Some("Shape texcoord buffer"),
                    contents: bytemuck::cast_slice(&self.mesh.tex_coords),
                    usage: wgpu::BufferUsages::VERTEX,
                },
            ));
        }
        // The pipeline was built against the binder's current bundle, so a
        // previously taken photo is already bound; nothing to defer.
    }

    /// Advances rotation/orbit state and uploads this frame's uniforms.
    pub fn update(&mut self, state: &State) {
        match (&mut self.camera, &self.pipeline) {
            (CameraMode::Orbiting(orbit), Some(ShapePipeline::Orbiting(pipeline))) => {
                if self.capture.is_capturing() {
                    orbit.azimuth += CAPTURE_SPIN_STEP;
                }
                orbit.normalize();
                pipeline.write_camera(
                    &state.queue,
                    orbit.view_matrix(),
                    OrbitState::projection_matrix(),
                    self.binder.has_photo(),
                );
            }
            (CameraMode::Flat(rotation), Some(ShapePipeline::Flat(pipeline))) => {
                rotation.tick();
                pipeline.write_rotation(&state.queue, rotation.theta());
            }
            _ => {}
        }
    }

    /// Encodes the draw for the active shape, or nothing at all while the
    /// configuration is incomplete (mid-switch, failed compile, empty mesh).
    pub fn draw<'rpass>(&'rpass self, render_pass: &mut wgpu::RenderPass<'rpass>) {
        let Some(pipeline) = &self.pipeline else {
            return;
        };
        let Some(vertex_buffer) = &self.buffers.vertex else {
            return;
        };
        if self.mesh.vertex_count == 0 {
            return;
        }

        match pipeline {
            ShapePipeline::Orbiting(orbit) => {
                // The sphere cannot draw without its texture coordinates.
                let Some(tex_coord_buffer) = &self.buffers.tex_coord else {
                    return;
                };

                render_pass.set_pipeline(&orbit.pipeline);
                render_pass.set_bind_group(0, &orbit.bind_group, &[]);
                render_pass.set_bind_group(1, &orbit.texture_bind_group, &[]);
                render_pass.set_vertex_buffer(0, vertex_buffer.slice(..));
                render_pass.set_vertex_buffer(1, tex_coord_buffer.slice(..));
            }
            ShapePipeline::Flat(flat) => {
                let (Some(color_buffer), Some(tex_coord_buffer)) =
                    (&self.buffers.color, &self.buffers.tex_coord)
                else {
                    return;
                };

                render_pass.set_pipeline(&flat.pipeline);
                render_pass.set_bind_group(0, &flat.bind_group, &[]);
                render_pass.set_bind_group(1, &flat.texture_bind_group, &[]);
                render_pass.set_vertex_buffer(0, vertex_buffer.slice(..));
                render_pass.set_vertex_buffer(1, color_buffer.slice(..));
                render_pass.set_vertex_buffer(2, tex_coord_buffer.slice(..));
            }
        }

        render_pass.draw(0..self.mesh.vertex_count as u32, 0..1);
    }

    /// Capture handoff, called after the frame was submitted. A finished or
    /// failed session restores the camera pose it snapshotted, provided the
    /// shape family has not changed underneath it.
    pub fn after_frame(&mut self, now: Instant) {
        let Some(saved) = self.capture.frame_rendered(now) else {
            return;
        };

        match (&self.camera, saved) {
            (CameraMode::Flat(_), saved @ CameraMode::Flat(_)) => self.camera = saved,
            (CameraMode::Orbiting(_), saved @ CameraMode::Orbiting(_)) => self.camera = saved,
            _ => log::debug!("shape family changed during capture; keeping current camera"),
        }
    }

    pub fn start_capture(
        &mut self,
        recorder: Box<dyn FrameRecorder>,
        name: impl Into<String>,
        duration: Duration,
        now: Instant,
    ) -> Result<(), ViewerError> {
        self.capture
            .start(recorder, name, duration, now, &self.camera)?;
        self.camera.set_rotate_on(true);
        Ok(())
    }

    // Photo lifecycle ------------------------------------------------------

    pub fn begin_photo_decode(&mut self) -> u64 {
        self.binder.begin_decode()
    }

    /// Binds a decoded photo unless a newer decode has already landed.
    pub fn submit_photo(&mut self, state: &State, ticket: u64, photo: &image::RgbaImage) -> bool {
        if !self.binder.submit_photo(state, ticket, photo) {
            return false;
        }
        self.rebind_texture(state);
        true
    }

    pub fn clear_photo(&mut self, state: &State) {
        self.binder.clear_photo(state);
        self.rebind_texture(state);
    }

    fn rebind_texture(&mut self, state: &State) {
        if !self.uses_texture {
            return;
        }
        match &mut self.pipeline {
            Some(ShapePipeline::Flat(pipeline)) => pipeline.set_texture(state, self.binder.bundle()),
            Some(ShapePipeline::Orbiting(pipeline)) => {
                pipeline.set_texture(state, self.binder.bundle())
            }
            None => {}
        }
    }

    // Controls -------------------------------------------------------------

    pub fn set_rotation_axis(&mut self, axis: RotationAxis) {
        if let CameraMode::Flat(rotation) = &mut self.camera {
            rotation.axis = axis;
        }
    }

    pub fn toggle_rotation(&mut self) {
        if let CameraMode::Flat(rotation) = &mut self.camera {
            rotation.rotate_on = !rotation.rotate_on;
        }
    }

    /// Arrow-key/WASD orbit control; only the sphere listens.
    pub fn nudge_orbit(&mut self, d_azimuth: f32, d_elevation: f32) {
        if let CameraMode::Orbiting(orbit) = &mut self.camera {
            orbit.nudge(d_azimuth, d_elevation);
        }
    }
}
