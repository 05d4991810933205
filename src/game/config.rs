// Game configuration from command-line flags and DVD_* environment variables

use std::path::PathBuf;
use std::time::Duration;

use clap::{Args, Parser};

use crate::core::Size;

/// Environment variable names
pub const ENV_BODY_SIZE: &str = "DVD_BODY_SIZE";
pub const ENV_MAX_VELOCITY: &str = "DVD_MAX_VELOCITY";
pub const ENV_TICK_MS: &str = "DVD_TICK_MS";
pub const ENV_LOGO: &str = "DVD_LOGO";
pub const ENV_SEED: &str = "DVD_SEED";

const DEFAULT_BODY_SIZE: Size = Size::new(150, 75);
const DEFAULT_MAX_VELOCITY: u32 = 5;
const DEFAULT_TICK_MS: u64 = 10;

/// Configuration errors
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("expected WIDTHxHEIGHT, got {0:?}")]
    InvalidSize(String),

    #[error("Body size must be positive, got {0}")]
    EmptyBodySize(Size),

    #[error("Maximum velocity must be at least 1")]
    ZeroVelocity,

    #[error("Tick interval must be at least 1ms")]
    ZeroTickInterval,
}

/// Window settings
#[derive(Args, Debug, Clone, PartialEq)]
pub struct WindowConfig {
    /// Window title
    #[arg(long, default_value = "DVD Bounce")]
    pub title: String,

    /// Initial window width, in logical pixels
    #[arg(long, default_value_t = 1280)]
    pub width: u32,

    /// Initial window height, in logical pixels
    #[arg(long, default_value_t = 720)]
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "DVD Bounce".to_string(),
            width: 1280,
            height: 720,
        }
    }
}

/// Everything that can be tuned without recompiling
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "dvd-bounce", about = "Bouncing DVD logos: click to spawn, watch them collide")]
pub struct GameConfig {
    /// Size of every spawned logo, as WIDTHxHEIGHT
    #[arg(long, env = ENV_BODY_SIZE, default_value_t = DEFAULT_BODY_SIZE, value_parser = parse_size)]
    pub body_size: Size,

    /// Inclusive upper bound for each randomized velocity component
    #[arg(long, env = ENV_MAX_VELOCITY, default_value_t = DEFAULT_MAX_VELOCITY)]
    pub max_velocity: u32,

    /// Milliseconds between two simulation ticks
    #[arg(long, env = ENV_TICK_MS, default_value_t = DEFAULT_TICK_MS)]
    pub tick_ms: u64,

    /// Logo image; a placeholder is drawn when unset
    #[arg(long = "logo", env = ENV_LOGO)]
    pub logo_path: Option<PathBuf>,

    /// Fixed RNG seed for reproducible runs
    #[arg(long, env = ENV_SEED)]
    pub seed: Option<u64>,

    #[command(flatten)]
    pub window: WindowConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            body_size: DEFAULT_BODY_SIZE,
            max_velocity: DEFAULT_MAX_VELOCITY,
            tick_ms: DEFAULT_TICK_MS,
            logo_path: None,
            seed: None,
            window: WindowConfig::default(),
        }
    }
}

impl GameConfig {
    /// Parse the process arguments and environment, exiting on usage errors
    pub fn load() -> Result<Self, ConfigError> {
        Self::parse().checked()
    }

    /// Drop blank values and check what the simulation relies on
    fn checked(mut self) -> Result<Self, ConfigError> {
        if self
            .logo_path
            .as_ref()
            .is_some_and(|path| path.to_string_lossy().trim().is_empty())
        {
            self.logo_path = None;
        }

        self.validate()?;
        Ok(self)
    }

    /// Check the values the simulation relies on
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.body_size.is_empty() {
            return Err(ConfigError::EmptyBodySize(self.body_size));
        }
        if self.max_velocity == 0 {
            return Err(ConfigError::ZeroVelocity);
        }
        if self.tick_ms == 0 {
            return Err(ConfigError::ZeroTickInterval);
        }
        Ok(())
    }

    /// Time between two simulation ticks
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }
}

/// Parse `WIDTHxHEIGHT`, e.g. `150x75`
fn parse_size(value: &str) -> Result<Size, ConfigError> {
    let invalid = || ConfigError::InvalidSize(value.to_string());

    let (width, height) = value
        .trim()
        .split_once(['x', 'X'])
        .ok_or_else(invalid)?;

    Ok(Size::new(
        width.trim().parse().map_err(|_| invalid())?,
        height.trim().parse().map_err(|_| invalid())?,
    ))
}
