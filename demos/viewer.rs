use std::time::Instant;

use booth_viewer::capture::{FrameRecorder, DEFAULT_CAPTURE_DURATION};
use booth_viewer::cameras::RotationAxis;
use booth_viewer::error::ViewerError;
use booth_viewer::framework::{self, Application};
use booth_viewer::geometry::ShapeKind;
use booth_viewer::renderer::ShapeRenderer;
use booth_viewer::state::State;

use winit::dpi::PhysicalSize;
use winit::event::{ElementState, WindowEvent};
use winit::keyboard::{Key, NamedKey};

const ORBIT_STEP: f32 = 0.1;

/// Stand-in for an external GIF encoder: counts frames and logs them. The
/// real recorder would sit behind the same trait.
struct LoggingRecorder {
    frames: usize,
    name: String,
}

impl LoggingRecorder {
    fn new(name: &str) -> Self {
        Self {
            frames: 0,
            name: name.to_string(),
        }
    }
}

impl FrameRecorder for LoggingRecorder {
    fn start(&mut self) -> Result<(), ViewerError> {
        log::info!("recorder started for {}", self.name);
        Ok(())
    }

    fn capture_frame(&mut self) -> Result<(), ViewerError> {
        self.frames += 1;
        Ok(())
    }

    fn stop(&mut self) -> Result<(), ViewerError> {
        log::info!("recorder stopped after {} frames", self.frames);
        Ok(())
    }

    fn save(&mut self) -> Result<(), ViewerError> {
        log::info!("{} saved", self.name);
        Ok(())
    }
}

struct ViewerApp {
    renderer: ShapeRenderer,
    photo_path: Option<String>,
}

impl ViewerApp {
    fn load_photo(&mut self, state: &State) {
        let Some(path) = &self.photo_path else {
            log::warn!("no photo path given; pass one as the first argument");
            return;
        };

        let ticket = self.renderer.begin_photo_decode();
        match image::open(path) {
            Ok(decoded) => {
                let photo = decoded.to_rgba8();
                if self.renderer.submit_photo(state, ticket, &photo) {
                    log::info!("photo bound from {}", path);
                }
            }
            Err(err) => {
                log::warn!("{}", ViewerError::DecodeFailure(err));
            }
        }
    }

    fn handle_key(&mut self, state: &State, key: &Key) {
        let shape = match key {
            Key::Character(c) => match c.as_str() {
                "1" => Some(ShapeKind::Cube),
                "2" => Some(ShapeKind::CubeFast),
                "3" => Some(ShapeKind::Sphere),
                "4" => Some(ShapeKind::Tetrahedron),
                "5" => Some(ShapeKind::Octahedron),
                "6" => Some(ShapeKind::Polyhedron),
                _ => None,
            },
            _ => None,
        };
        if let Some(shape) = shape {
            self.renderer.switch_shape(state, shape);
            return;
        }

        match key {
            Key::Character(c) => match c.as_str() {
                "x" => self.renderer.set_rotation_axis(RotationAxis::X),
                "y" => self.renderer.set_rotation_axis(RotationAxis::Y),
                "z" => self.renderer.set_rotation_axis(RotationAxis::Z),
                "r" => self.renderer.toggle_rotation(),
                "a" => self.renderer.nudge_orbit(ORBIT_STEP, 0.0),
                "d" => self.renderer.nudge_orbit(-ORBIT_STEP, 0.0),
                "w" => self.renderer.nudge_orbit(0.0, ORBIT_STEP),
                "s" => self.renderer.nudge_orbit(0.0, -ORBIT_STEP),
                "p" => self.load_photo(state),
                "c" => self.renderer.clear_photo(state),
                "g" => self.start_export(),
                _ => {}
            },
            Key::Named(NamedKey::ArrowLeft) => self.renderer.nudge_orbit(ORBIT_STEP, 0.0),
            Key::Named(NamedKey::ArrowRight) => self.renderer.nudge_orbit(-ORBIT_STEP, 0.0),
            Key::Named(NamedKey::ArrowUp) => self.renderer.nudge_orbit(0.0, ORBIT_STEP),
            Key::Named(NamedKey::ArrowDown) => self.renderer.nudge_orbit(0.0, -ORBIT_STEP),
            _ => {}
        }
    }

    fn start_export(&mut self) {
        let name = format!("rotating_{}", self.renderer.kind().label());
        let recorder = Box::new(LoggingRecorder::new(&name));
        let started =
            self.renderer
                .start_capture(recorder, name, DEFAULT_CAPTURE_DURATION, Instant::now());
        if let Err(err) = started {
            log::warn!("{}", err);
        }
    }
}

impl Application for ViewerApp {
    fn clear_color(&self) -> wgpu::Color {
        wgpu::Color::WHITE
    }

    fn init(state: &State) -> Self {
        log::info!("keys: 1-6 shape, x/y/z axis, r rotate, arrows/wasd orbit, p photo, c clear, g export");
        Self {
            renderer: ShapeRenderer::new(state),
            photo_path: std::env::args().nth(1),
        }
    }

    fn event(&mut self, state: &State, event: &WindowEvent) {
        if let WindowEvent::KeyboardInput { event: key, .. } = event {
            if key.state == ElementState::Pressed && !key.repeat {
                self.handle_key(state, &key.logical_key);
            }
        }
    }

    fn update(&mut self, state: &State, frame_count: u64, _now: Instant) {
        self.renderer.update(state);

        if self.renderer.is_capturing() && frame_count % 30 == 0 {
            log::info!("{}", self.renderer.capture_status());
        }
    }

    fn render<'rpass>(&'rpass self, _state: &State, render_pass: &mut wgpu::RenderPass<'rpass>) {
        self.renderer.draw(render_pass);
    }

    fn post_render(&mut self, _state: &State, now: Instant) {
        self.renderer.after_frame(now);
    }
}

fn main() {
    env_logger::init();

    if let Err(err) = framework::run::<ViewerApp>(
        "Photo Booth Shapes",
        PhysicalSize::new(512, 512),
        4,
    ) {
        log::error!("viewer failed to start: {}", err);
        std::process::exit(1);
    }
}
