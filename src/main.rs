// Declare modules directly in the binary crate root
pub mod app;
pub mod compute;
pub mod config;
pub mod error;
pub mod grid;
pub mod input;
pub mod lif;
pub mod model;
pub mod render;
pub mod rules;
pub mod simulation;
pub mod state;
pub mod timer;
pub mod ui;
pub mod view;

use crate::config::{Args, Config};
use crate::lif::LifPattern;
use crate::state::State;

use anyhow::Context as _;
use clap::Parser;
use std::sync::Arc;
use std::time::Instant;
use winit::{
    event::{Event, WindowEvent},
    event_loop::{ControlFlow, EventLoop},
    window::Window,
};

async fn run(event_loop: EventLoop<()>, window: Arc<Window>, seed: LifPattern, config: Config) -> anyhow::Result<()> {
    let mut state = State::new(window, seed, &config).await?;

    event_loop.run(move |event, window_target| {
        window_target.set_control_flow(ControlFlow::Poll);

        match event {
            Event::WindowEvent { window_id, ref event } if window_id == state.window.id() => {
                // Pass window-specific events to egui_winit first
                let response = state.egui_winit_state.on_window_event(&state.window, event);
                if response.repaint {
                    state.window.request_redraw();
                }

                // Resizes always reach the surface, even if egui used them.
                if response.consumed && !matches!(event, WindowEvent::Resized(_)) {
                    return;
                }

                match event {
                    WindowEvent::CloseRequested => {
                        window_target.exit();
                    }
                    WindowEvent::Resized(new_size) => {
                        state.resize(*new_size);
                    }
                    WindowEvent::MouseInput { state: element_state, button, .. } => {
                        input::handle_mouse_input(&mut state.app, *button, *element_state);
                    }
                    WindowEvent::CursorMoved { position, .. } => {
                        let position = input::to_points(*position, state.window.scale_factor());
                        input::handle_cursor_move(&mut state.app, position);
                    }
                    WindowEvent::CursorLeft { .. } => {
                        input::handle_cursor_left(&mut state.app);
                    }
                    WindowEvent::MouseWheel { delta, .. } => {
                        input::handle_zoom(&mut state.app, *delta);
                    }
                    WindowEvent::DroppedFile(path) => {
                        if let Err(e) = state.app.load_pattern_file(path) {
                            log::warn!("{:#}", e);
                        }
                        state.app.sync(Instant::now());
                    }
                    WindowEvent::RedrawRequested => {
                        state.app.tick(Instant::now());
                        match state.render() {
                            Ok(()) => {}
                            Err(wgpu::SurfaceError::Outdated) => state.resize(state.size),
                            Err(wgpu::SurfaceError::OutOfMemory) => {
                                log::error!("Out of GPU memory, exiting.");
                                window_target.exit();
                            }
                            Err(e) => log::warn!("Skipping frame due to surface error: {:?}", e),
                        }
                    }
                    _ => (),
                }
            }
            Event::AboutToWait => {
                state.window.request_redraw();
            }
            _ => (),
        }
    })?;
    Ok(())
}

fn load_seed(config: &Config) -> anyhow::Result<LifPattern> {
    let Some(path) = &config.pattern else {
        return Ok(lif::parse(lif::DEFAULT_PATTERN)?);
    };
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read pattern file {}", path.display()))?;
    lif::parse(&content).with_context(|| format!("failed to load pattern file {}", path.display()))
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let config = Config::from(Args::parse());
    let seed = load_seed(&config)?;

    let event_loop = EventLoop::new()?;
    let (width, height) = config.window_size;
    let window = Arc::new(
        winit::window::WindowBuilder::new()
            .with_title("Life History")
            .with_inner_size(winit::dpi::LogicalSize::new(width as f64, height as f64))
            .build(&event_loop)?,
    );

    pollster::block_on(run(event_loop, window, seed, config))
}
