// Game layer: configuration and the bouncing-logo scene

pub mod config;
pub mod scene;

pub use config::GameConfig;
pub use scene::{Flow, Scene};
