// Engine modules: renderer, physics, input and the fixed-step loop

pub mod game_loop;
pub mod input;
pub mod physics;
pub mod renderer;
