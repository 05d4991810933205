// Input manager - turns window events into simulation commands

use std::collections::HashMap;

use glam::{DVec2, IVec2};
use winit::dpi::PhysicalPosition;
use winit::event::{ElementState, WindowEvent};
use winit::keyboard::PhysicalKey;

use super::action::{default_bindings, Action, InputSource};
use crate::core::Size;

/// Request produced by user input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Spawn a body with its top-left corner here
    Spawn(IVec2),
    TogglePause,
    Quit,
}

/// Tracks the cursor and maps pressed inputs to commands
pub struct InputManager {
    /// Mapping from input sources to actions
    bindings: HashMap<InputSource, Action>,

    /// Last known cursor position, in physical pixels
    cursor: Option<DVec2>,

    /// Size of the bodies being spawned
    body_size: Size,
}

impl InputManager {
    /// Create an input manager with the default bindings
    pub fn new(body_size: Size) -> Self {
        Self {
            bindings: default_bindings().into_iter().collect(),
            cursor: None,
            body_size,
        }
    }

    /// Process a window event from winit
    pub fn process_window_event(&mut self, event: &WindowEvent, viewport: Size) -> Option<Command> {
        match event {
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor_moved(*position);
                None
            }
            WindowEvent::CursorLeft { .. } => {
                self.cursor = None;
                None
            }
            WindowEvent::MouseInput {
                state: ElementState::Pressed,
                button,
                ..
            } => self.press(InputSource::mouse(*button), viewport),
            WindowEvent::KeyboardInput { event, .. }
                if event.state == ElementState::Pressed && !event.repeat =>
            {
                match event.physical_key {
                    PhysicalKey::Code(code) => self.press(InputSource::key(code), viewport),
                    PhysicalKey::Unidentified(_) => None,
                }
            }
            _ => None,
        }
    }

    /// Record the cursor position
    pub fn cursor_moved(&mut self, position: PhysicalPosition<f64>) {
        self.cursor = Some(DVec2::new(position.x, position.y));
    }

    /// Handle a pressed input source
    pub fn press(&self, source: InputSource, viewport: Size) -> Option<Command> {
        match self.bindings.get(&source)? {
            Action::Spawn => {
                let cursor = self.cursor?;
                Some(Command::Spawn(spawn_point(cursor, viewport, self.body_size)))
            }
            Action::TogglePause => Some(Command::TogglePause),
            Action::Quit => Some(Command::Quit),
        }
    }
}

/// Top-left corner for a body spawned by a click at `cursor`
///
/// The body opens toward the centre of the viewport: a click in the right
/// half puts the body to the left of the cursor, a click in the bottom half
/// puts it above. The halves are decided on the unrounded cursor position.
pub fn spawn_point(cursor: DVec2, viewport: Size, body_size: Size) -> IVec2 {
    let half = viewport.as_ivec2().as_dvec2() / 2.0;
    let mut point = cursor.floor().as_ivec2();

    if cursor.x > half.x {
        point.x -= body_size.width;
    }

    if cursor.y > half.y {
        point.y -= body_size.height;
    }

    point
}
