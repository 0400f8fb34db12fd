//! Free-fly camera for the OpenSkies demo.
//!
//! Owns the viewer position and pitch/yaw orientation, derives an orthonormal
//! basis from the angles, and produces the view and projection matrices the
//! renderer consumes each frame.
//!
//! # Invariants
//! - Pitch stays within [-89°, 89°]; field of view within [1°, 90°].
//! - Front, up and right are unit length, pairwise orthogonal and right-handed.
//! - Angles are radians internally and degrees at every public method.
//! - Matrices are right-handed, column-major, depth range [0, 1].

mod camera;
mod error;
mod uniform;

pub use camera::{
    Camera, FAR_PLANE, MAX_FIELD_OF_VIEW, MIN_FIELD_OF_VIEW, NEAR_PLANE, PITCH_LIMIT, WORLD_UP,
};
pub use error::{CameraError, Quantity};
pub use uniform::CameraUniform;

pub fn crate_info() -> &'static str {
    "openskies-camera v0.1.0"
}
