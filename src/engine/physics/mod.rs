// Bouncing-rectangle physics: bodies, AABB tests and the simulation world

pub mod body;
mod collision;
mod world;

pub use body::Body;
pub use world::{Canvas, Layer, Simulation, TickSummary};
