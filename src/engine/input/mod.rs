// Input handling system
//
// Turns raw winit window events into simulation commands.
//
// ## Architecture
//
// - `action`: Defines user actions and default key/mouse bindings
// - `manager`: Tracks the cursor, resolves bindings and computes spawn points
//
// ## Usage Example
//
// ```rust
// use engine::input::{Command, InputManager};
//
// let mut input = InputManager::new(body_size);
//
// // In your event loop, feed every window event
// if let Some(command) = input.process_window_event(&event, viewport) {
//     match command {
//         Command::Spawn(position) => { simulation.spawn(position); }
//         Command::TogglePause => game_loop.toggle_pause(),
//         Command::Quit => elwt.exit(),
//     }
// }
// ```

pub mod action;
pub mod manager;

pub use manager::{Command, InputManager};
