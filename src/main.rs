use std::sync::Arc;

use anyhow::Result;
use log::{error, info};
use winit::{
    event::{Event, WindowEvent},
    event_loop::{ControlFlow, EventLoop},
    window::WindowBuilder,
};

mod core;
mod engine;
mod game;

use crate::core::Size;
use engine::renderer::Renderer;
use game::{Flow, GameConfig, Scene};

fn main() -> Result<()> {
    // Initialize logger
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let config = GameConfig::load()?;
    info!(
        "Starting DVD Bounce: logo {}, max velocity {}, tick {:?}",
        config.body_size,
        config.max_velocity,
        config.tick_interval()
    );

    // Create event loop and window
    let event_loop = EventLoop::new()?;
    let window = Arc::new(
        WindowBuilder::new()
            .with_title(config.window.title.as_str())
            .with_inner_size(winit::dpi::LogicalSize::new(
                config.window.width,
                config.window.height,
            ))
            .with_resizable(true)
            .build(&event_loop)?,
    );

    info!("Window created successfully");

    let mut renderer = pollster::block_on(Renderer::new(
        window.clone(),
        config.logo_path.as_deref(),
    ))?;

    let mut scene = Scene::new(&config);
    scene.resize(Size::from(window.inner_size()));

    // Main event loop
    event_loop
        .run(move |event, elwt| match event {
            Event::WindowEvent { event, .. } => match event {
                WindowEvent::CloseRequested => {
                    info!("Close requested, shutting down...");
                    elwt.exit();
                }
                WindowEvent::Resized(physical_size) => {
                    renderer.resize(physical_size);
                    scene.resize(Size::from(physical_size));
                }
                WindowEvent::RedrawRequested => {
                    if let Err(e) = renderer.render(scene.simulation()) {
                        error!("Render failed: {e:#}");
                    }
                }
                other => {
                    if scene.handle_window_event(&other) == Flow::Exit {
                        elwt.exit();
                    }
                }
            },
            Event::AboutToWait => {
                match scene.update() {
                    Ok(ticks) if ticks > 0 => window.request_redraw(),
                    Ok(_) => {}
                    Err(e) => {
                        error!("{e:#}");
                        elwt.exit();
                        return;
                    }
                }
                elwt.set_control_flow(ControlFlow::WaitUntil(scene.next_deadline()));
            }
            _ => {}
        })
        .map_err(|e| anyhow::anyhow!("Event loop error: {}", e))?;

    Ok(())
}
