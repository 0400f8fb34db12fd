use glam::Vec3;
use openskies_camera::Camera;
use serde::{Deserialize, Serialize};
use winit::keyboard::KeyCode;

/// A direction the camera can fly in, relative to its own basis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveDirection {
    Forward,
    Backward,
    Left,
    Right,
    Up,
    Down,
}

impl MoveDirection {
    /// Every direction, in the order the controller applies them.
    pub const ALL: [MoveDirection; 6] = [
        MoveDirection::Forward,
        MoveDirection::Backward,
        MoveDirection::Left,
        MoveDirection::Right,
        MoveDirection::Up,
        MoveDirection::Down,
    ];

    /// Unit vector for this direction in the camera's current basis.
    pub fn vector(self, camera: &Camera) -> Vec3 {
        match self {
            MoveDirection::Forward => camera.front(),
            MoveDirection::Backward => -camera.front(),
            MoveDirection::Left => -camera.right(),
            MoveDirection::Right => camera.right(),
            MoveDirection::Up => camera.up(),
            MoveDirection::Down => -camera.up(),
        }
    }

    /// Key bound to this direction.
    pub fn default_key(self) -> KeyCode {
        match self {
            MoveDirection::Forward => KeyCode::KeyW,
            MoveDirection::Backward => KeyCode::KeyS,
            MoveDirection::Left => KeyCode::KeyA,
            MoveDirection::Right => KeyCode::KeyD,
            MoveDirection::Up => KeyCode::Space,
            MoveDirection::Down => KeyCode::ShiftLeft,
        }
    }
}

/// A high-level action produced from raw key input.
///
/// The controller and the driver consume actions, never raw key codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Fly along a camera-relative direction while the key is held.
    Move(MoveDirection),
    /// Grab or release the mouse cursor.
    ToggleCursor,
    /// Ask the application to close.
    Quit,
    /// Unbound key.
    Noop,
}

impl Action {
    /// Map a physical key to its action using the default bindings.
    pub fn from_key(key: KeyCode) -> Self {
        match key {
            KeyCode::Escape => Action::ToggleCursor,
            KeyCode::KeyQ => Action::Quit,
            other => MoveDirection::ALL
                .into_iter()
                .find(|dir| dir.default_key() == other)
                .map_or(Action::Noop, Action::Move),
        }
    }

    /// Key bound to this action, if any.
    pub fn default_key(self) -> Option<KeyCode> {
        match self {
            Action::Move(dir) => Some(dir.default_key()),
            Action::ToggleCursor => Some(KeyCode::Escape),
            Action::Quit => Some(KeyCode::KeyQ),
            Action::Noop => None,
        }
    }
}
