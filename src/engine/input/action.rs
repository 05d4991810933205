// Action definitions and default bindings

use winit::event::MouseButton;
use winit::keyboard::KeyCode;

/// Everything the user can ask for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Drop a new logo at the cursor
    Spawn,
    /// Freeze or unfreeze the simulation
    TogglePause,
    /// Close the window
    Quit,
}

/// Represents an input source (keyboard key or mouse button)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputSource {
    Keyboard(KeyCode),
    Mouse(MouseButton),
}

impl InputSource {
    /// Create a keyboard input source
    pub fn key(code: KeyCode) -> Self {
        Self::Keyboard(code)
    }

    /// Create a mouse button input source
    pub fn mouse(button: MouseButton) -> Self {
        Self::Mouse(button)
    }
}

/// Default keyboard/mouse bindings
pub fn default_bindings() -> Vec<(InputSource, Action)> {
    vec![
        (InputSource::mouse(MouseButton::Left), Action::Spawn),
        (InputSource::key(KeyCode::Space), Action::TogglePause),
        (InputSource::key(KeyCode::KeyP), Action::TogglePause),
        (InputSource::key(KeyCode::Escape), Action::Quit),
    ]
}
