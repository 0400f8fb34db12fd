use std::collections::HashSet;

use glam::{Vec2, Vec3};
use openskies_camera::Camera;
use winit::keyboard::KeyCode;

use crate::action::{Action, MoveDirection};
use crate::config::ControllerConfig;

/// Per-frame input state driving a free-fly camera.
///
/// Holds the keys currently down, the last cursor position and the
/// cursor-grab / quit flags. The camera itself is passed in per call.
#[derive(Debug, Clone)]
pub struct FlyController {
    config: ControllerConfig,
    keys_held: HashSet<KeyCode>,
    last_cursor: Option<Vec2>,
    cursor_grabbed: bool,
    focused: bool,
    quit_requested: bool,
}

impl Default for FlyController {
    fn default() -> Self {
        Self::new(ControllerConfig::default())
    }
}

impl FlyController {
    pub fn new(config: ControllerConfig) -> Self {
        Self {
            config,
            keys_held: HashSet::new(),
            last_cursor: None,
            cursor_grabbed: true,
            focused: true,
            quit_requested: false,
        }
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    /// Record a key press or release and return the mapped action.
    ///
    /// Cursor toggling and quit fire on press only. While unfocused every key
    /// is ignored and maps to [`Action::Noop`].
    pub fn handle_key(&mut self, key: KeyCode, pressed: bool) -> Action {
        if !self.focused {
            tracing::trace!(?key, pressed, "ignoring key while unfocused");
            return Action::Noop;
        }
        let action = Action::from_key(key);
        if !pressed {
            self.keys_held.remove(&key);
            return action;
        }
        self.keys_held.insert(key);

        match action {
            Action::ToggleCursor => {
                self.cursor_grabbed = !self.cursor_grabbed;
                tracing::debug!(grabbed = self.cursor_grabbed, "cursor grab toggled");
            }
            Action::Quit => {
                self.quit_requested = true;
                tracing::debug!("quit requested");
            }
            Action::Move(_) | Action::Noop => {}
        }
        action
    }

    pub fn is_held(&self, key: KeyCode) -> bool {
        self.keys_held.contains(&key)
    }

    /// Window focus. Losing focus drops held keys and the cursor reference.
    pub fn set_focused(&mut self, focused: bool) {
        if self.focused == focused {
            return;
        }
        self.focused = focused;
        if !focused {
            self.keys_held.clear();
            self.last_cursor = None;
        }
        tracing::debug!(focused, "focus changed");
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn cursor_grabbed(&self) -> bool {
        self.cursor_grabbed
    }

    pub fn quit_requested(&self) -> bool {
        self.quit_requested
    }

    /// Fly the camera along every held direction for `dt` seconds.
    pub fn update(&self, camera: &mut Camera, dt: f32) {
        if !self.focused {
            return;
        }
        let step = self.config.move_speed * dt;
        let delta: Vec3 = MoveDirection::ALL
            .into_iter()
            .filter(|dir| self.keys_held.contains(&dir.default_key()))
            .map(|dir| dir.vector(camera) * step)
            .sum();
        if delta != Vec3::ZERO {
            camera.translate(delta);
        }
    }

    /// Feed an absolute cursor position. The first sample only sets the reference.
    pub fn cursor_moved(&mut self, camera: &mut Camera, x: f32, y: f32) {
        if !self.focused {
            return;
        }
        let pos = Vec2::new(x, y);
        if let Some(last) = self.last_cursor.replace(pos) {
            let delta = pos - last;
            self.look(camera, delta.x, delta.y);
        }
    }

    /// Forget the last cursor position, e.g. after the cursor was re-grabbed.
    pub fn reset_cursor(&mut self) {
        self.last_cursor = None;
    }

    /// Apply a mouse delta in pixels. Screen y grows downward, so it lowers pitch.
    pub fn look(&self, camera: &mut Camera, dx: f32, dy: f32) {
        if !self.focused {
            return;
        }
        let sensitivity = self.config.look_sensitivity;
        camera.add_yaw(dx * sensitivity);
        camera.add_pitch(-dy * sensitivity);
    }

    /// Apply a scroll delta. Scrolling up narrows the field of view.
    pub fn scroll(&self, camera: &mut Camera, dy: f32) {
        camera.add_field_of_view(-dy * self.config.zoom_sensitivity);
    }

    /// Track a viewport resize. Zero-sized viewports (minimised windows) are ignored.
    pub fn resize(&self, camera: &mut Camera, width: u32, height: u32) {
        if width == 0 || height == 0 {
            tracing::debug!(width, height, "ignoring zero-sized viewport");
            return;
        }
        camera.set_aspect_ratio(width as f32 / height as f32);
        tracing::debug!(width, height, aspect = camera.aspect_ratio(), "viewport resized");
    }
}
