// The bouncing-logo scene: wires input and timing to the simulation

use std::time::Instant;

use anyhow::{Context, Result};
use glam::IVec2;
use log::{debug, info};
use winit::event::WindowEvent;

use super::config::GameConfig;
use crate::core::Size;
use crate::engine::game_loop::GameLoop;
use crate::engine::input::{Command, InputManager};
use crate::engine::physics::{Simulation, TickSummary};

/// How often frame statistics are logged, in frames
const STATS_INTERVAL: u64 = 600;

/// What the event loop should do after an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Owns the simulation and everything that drives it
pub struct Scene {
    simulation: Simulation,
    game_loop: GameLoop,
    input: InputManager,

    /// Running totals over every tick so far
    totals: TickSummary,
}

impl Scene {
    /// Create the scene with a single ghost logo in the top-left corner
    pub fn new(config: &GameConfig) -> Self {
        let mut simulation = match config.seed {
            Some(seed) => Simulation::with_seed(config.body_size, config.max_velocity, seed),
            None => Simulation::new(config.body_size, config.max_velocity),
        };
        simulation.spawn(IVec2::ZERO);

        Self {
            simulation,
            game_loop: GameLoop::new(config.tick_interval()),
            input: InputManager::new(config.body_size),
            totals: TickSummary::default(),
        }
    }

    /// Get the simulation, for drawing
    pub fn simulation(&self) -> &Simulation {
        &self.simulation
    }

    /// Apply a new window size to the simulation
    pub fn resize(&mut self, viewport: Size) {
        let removed = self.simulation.resize(viewport);
        info!(
            "Viewport resized to {viewport}, {removed} logos removed, {} remaining",
            self.simulation.body_count()
        );
    }

    /// Feed a window event through the input bindings
    pub fn handle_window_event(&mut self, event: &WindowEvent) -> Flow {
        let viewport = self.simulation.viewport().unwrap_or_default();
        match self.input.process_window_event(event, viewport) {
            Some(command) => self.apply(command),
            None => Flow::Continue,
        }
    }

    /// Carry out a user command
    pub fn apply(&mut self, command: Command) -> Flow {
        match command {
            Command::Spawn(position) => {
                let body = self.simulation.spawn(position);
                debug!("Click spawned ghost {} at {}", body.id(), body.position);
                Flow::Continue
            }
            Command::TogglePause => {
                self.game_loop.toggle_pause();
                Flow::Continue
            }
            Command::Quit => {
                info!("Quit requested");
                Flow::Exit
            }
        }
    }

    /// Run every tick that is due; returns how many ran
    pub fn update(&mut self) -> Result<u32> {
        let ticks = self.game_loop.begin_frame();

        for _ in 0..ticks {
            let summary = self.simulation.tick().context("simulation tick failed")?;
            if summary.promoted > 0 || summary.body_collisions > 0 {
                debug!(
                    "{} ghosts promoted, {} collisions, {} wall bounces, {} active",
                    summary.promoted,
                    summary.body_collisions,
                    summary.wall_bounces,
                    self.simulation.active().len()
                );
            }
            self.totals += summary;
        }

        if self.game_loop.frame_count() % STATS_INTERVAL == 0 {
            debug!(
                "{:.0} fps, {} ticks, {} active, {} pending, {} collisions, {} wall bounces",
                self.game_loop.fps(),
                self.game_loop.tick_count(),
                self.simulation.active().len(),
                self.simulation.pending().len(),
                self.totals.body_collisions,
                self.totals.wall_bounces
            );
        }

        Ok(ticks)
    }

    /// When the event loop should wake up for the next tick
    pub fn next_deadline(&self) -> Instant {
        self.game_loop.next_deadline()
    }

    /// Promotions, collisions and bounces counted since the scene started
    pub fn totals(&self) -> TickSummary {
        self.totals
    }

    /// Whether ticks are currently suspended
    pub fn is_paused(&self) -> bool {
        self.game_loop.is_paused()
    }
}
