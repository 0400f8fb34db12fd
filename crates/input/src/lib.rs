//! Input handling for the free-fly camera.
//!
//! Raw keys are mapped to [`Action`]s; the [`FlyController`] keeps the input
//! state between frames and applies movement, look and zoom to a camera.
//!
//! # Invariants
//! - The controller never owns the camera; it mutates one passed in per call.
//! - Look and movement are ignored while the window is unfocused.
//! - The first cursor sample only establishes a reference position.

pub mod action;
pub mod config;
pub mod controller;

pub use action::{Action, MoveDirection};
pub use config::{ControllerConfig, InputError};
pub use controller::FlyController;

pub fn crate_info() -> &'static str {
    "openskies-input v0.1.0"
}
