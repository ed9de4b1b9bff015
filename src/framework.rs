use std::sync::Arc;
use std::time::Instant;

use winit::{
    dpi::PhysicalSize,
    event::{Event, WindowEvent},
    event_loop::EventLoop,
    keyboard::{Key, NamedKey},
};

use crate::{
    error::ViewerError,
    factories::render_pass::RenderPassFactory,
    state::{Size, State},
};

pub trait Application: 'static + Sized {
    fn clear_color(&self) -> wgpu::Color {
        wgpu::Color::WHITE
    }

    fn init(state: &State) -> Self;

    fn event(&mut self, _state: &State, _event: &WindowEvent) {}

    /// Per-frame state advance, before encoding the draw.
    fn update(&mut self, state: &State, frame_count: u64, now: Instant);

    fn render<'rpass>(&'rpass self, state: &State, render_pass: &mut wgpu::RenderPass<'rpass>);

    /// After the frame was submitted; capture handoff happens here.
    fn post_render(&mut self, _state: &State, _now: Instant) {}
}

struct Setup {
    window: Arc<winit::window::Window>,
    event_loop: EventLoop<()>,
    state: State,
}

async fn setup(
    title: &str,
    size: PhysicalSize<u32>,
    sample_count: u32,
) -> Result<Setup, ViewerError> {
    let event_loop =
        EventLoop::new().map_err(|_| ViewerError::ResourceUnavailable("event loop"))?;

    let window = winit::window::WindowBuilder::new()
        .with_title(title)
        .with_inner_size(size)
        .build(&event_loop)
        .map_err(|_| ViewerError::ResourceUnavailable("window"))?;
    let window = Arc::new(window);

    let size = window.inner_size();
    let instance = wgpu::Instance::default();
    let window_surface = instance
        .create_surface(window.clone())
        .map_err(|_| ViewerError::ResourceUnavailable("window surface"))?;

    let state = State::new(
        sample_count,
        instance,
        window_surface,
        Size::new(size.width, size.height),
    )
    .await?;

    Ok(Setup {
        window,
        event_loop,
        state,
    })
}

fn start<E: Application>(
    Setup {
        window,
        event_loop,
        mut state,
    }: Setup,
) -> Result<(), ViewerError> {
    let mut application = E::init(&state);
    let mut frame_count: u64 = 0;

    event_loop
        .run(move |event, elwt| match event {
            Event::WindowEvent { ref event, .. } => {
                match event {
                    WindowEvent::CloseRequested | WindowEvent::Destroyed => elwt.exit(),
                    WindowEvent::Resized(physical_size) => state.resize(*physical_size),
                    WindowEvent::KeyboardInput { event: key, .. }
                        if key.logical_key == Key::Named(NamedKey::Escape) =>
                    {
                        elwt.exit()
                    }
                    WindowEvent::RedrawRequested => {
                        let now = Instant::now();
                        application.update(&state, frame_count, now);
                        frame_count += 1;

                        state.render(|ctx, frame_data| {
                            let mut render_pass_factory = RenderPassFactory::new();
                            match &frame_data.multisampled_view {
                                Some(multisampled) => render_pass_factory.add_color_attachment(
                                    application.clear_color(),
                                    multisampled,
                                    Some(&frame_data.view),
                                ),
                                None => render_pass_factory.add_color_attachment(
                                    application.clear_color(),
                                    &frame_data.view,
                                    None,
                                ),
                            }

                            let mut render_pass = render_pass_factory.get_render_pass(
                                ctx,
                                &mut frame_data.encoder,
                                true,
                            );
                            application.render(ctx, &mut render_pass);
                        });

                        application.post_render(&state, now);
                    }
                    _ => {}
                }
                application.event(&state, event);
            }
            Event::AboutToWait => window.request_redraw(),
            _ => {}
        })
        .map_err(|_| ViewerError::ResourceUnavailable("event loop"))?;

    Ok(())
}

pub fn run<E: Application>(
    title: &str,
    size: PhysicalSize<u32>,
    sample_count: u32,
) -> Result<(), ViewerError> {
    let setup = pollster::block_on(setup(title, size, sample_count))?;
    start::<E>(setup)
}
