use anyhow::Result;
use log::{error, info};
use winit::{
    event::{ElementState, Event, WindowEvent},
    event_loop::EventLoop,
    keyboard::{KeyCode, PhysicalKey},
    window::WindowBuilder,
};

mod core;
mod engine;
mod game;

use engine::game_loop::GameLoop;
use engine::input::{Action, InputManager, InputSource};
use game::characters::ControllerConfig;
use game::scene::{Scene, WORLD_SIZE};

fn main() -> Result<()> {
    // Initialize logger
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    info!("Starting Spine Runner...");

    // Create event loop and window
    let event_loop = EventLoop::new()?;
    let window = WindowBuilder::new()
        .with_title("Spine Runner")
        .with_inner_size(winit::dpi::LogicalSize::new(WORLD_SIZE.x, WORLD_SIZE.y))
        .with_resizable(true)
        .build(&event_loop)?;

    info!("Window created successfully");

    let mut scene = Scene::new(ControllerConfig::standard())?;
    let mut input = InputManager::default();
    // Space is an extra jump key on top of the arrow and WASD aliases
    input
        .config_mut()
        .bind(InputSource::key(KeyCode::Space), Action::Up);
    let mut game_loop = GameLoop::new();

    // Main event loop
    event_loop.run(move |event, elwt| {
        match event {
            Event::WindowEvent {
                event: WindowEvent::CloseRequested,
                ..
            } => {
                info!("Close requested, shutting down...");
                elwt.exit();
            }
            Event::WindowEvent {
                event: WindowEvent::KeyboardInput { event, .. },
                ..
            } => {
                if event.physical_key == PhysicalKey::Code(KeyCode::KeyP)
                    && event.state == ElementState::Pressed
                    && !event.repeat
                {
                    game_loop.toggle_pause();
                }
                input.process_keyboard_event(&event);
            }
            Event::WindowEvent {
                event: WindowEvent::Focused(false),
                ..
            } => {
                // Keys released while unfocused never reach us
                input.reset();
            }
            Event::WindowEvent {
                event: WindowEvent::RedrawRequested,
                ..
            } => {
                // Nothing is drawn yet; keep frames coming
                window.request_redraw();
            }
            Event::AboutToWait => {
                let steps = game_loop.begin_frame();
                for _ in 0..steps {
                    let time = game_loop.advance_tick();
                    if let Err(e) = scene.tick(time, input.player()) {
                        error!("Simulation failed: {}", e);
                        elwt.exit();
                        return;
                    }
                    // Each tick sees every press exactly once
                    input.update();
                }

                if game_loop.frame_count() % 600 == 0 {
                    log_status(&game_loop, &scene);
                }

                window.request_redraw();
            }
            _ => {}
        }
    }).map_err(|e| anyhow::anyhow!("Event loop error: {}", e))?;

    Ok(())
}

/// Periodic one-line summary of the simulation and the player
fn log_status(game_loop: &GameLoop, scene: &Scene) {
    let Some(player) = scene.player() else {
        return;
    };
    let controller = player.controller();
    let animation = player.animation();
    let offset = scene.physics().arcade_state(player.body_handle).offset;

    info!(
        "{:.0} fps, tick {}{}",
        game_loop.fps(),
        game_loop.tick_count(),
        if game_loop.is_paused() { " (paused)" } else { "" }
    );
    info!(
        "{} at {:?} facing {:?} (offset {:?}), grounded: {}, jumps: {}, clip: {:?}",
        player.name,
        player.position(scene.physics()),
        controller.facing(),
        offset,
        controller.is_grounded(),
        controller.jump_count(),
        controller.active_clip()
    );
    if let Some(entry) = animation.current(0) {
        info!(
            "Skeleton playing {} at {:.2}s, x{} speed, mix {:.0}%",
            entry.clip_name(),
            entry.track_time(),
            animation.time_scale(),
            entry.mix_alpha() * 100.0
        );
    }
}
