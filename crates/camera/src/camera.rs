use glam::{Mat4, Vec3};

use crate::error::{CameraError, Quantity};

/// Near clipping plane distance used by [`Camera::projection_matrix`].
pub const NEAR_PLANE: f32 = 0.01;
/// Far clipping plane distance used by [`Camera::projection_matrix`].
pub const FAR_PLANE: f32 = 100.0;
/// Pitch is clamped to `[-PITCH_LIMIT, PITCH_LIMIT]` degrees.
pub const PITCH_LIMIT: f32 = 89.0;
pub const MIN_FIELD_OF_VIEW: f32 = 1.0;
pub const MAX_FIELD_OF_VIEW: f32 = 90.0;
/// World vertical axis the basis is built against.
pub const WORLD_UP: Vec3 = Vec3::Y;

/// Free-fly camera with position, pitch/yaw orientation and a perspective lens.
///
/// Angles are stored in radians and exposed in degrees. The front/up/right
/// basis is recomputed whenever pitch or yaw changes, never otherwise.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    /// Eye position in world space.
    pub position: Vec3,
    aspect_ratio: f32,
    pitch: f32,
    yaw: f32,
    fov: f32,
    front: Vec3,
    up: Vec3,
    right: Vec3,
}

impl Camera {
    /// Create a camera looking down -Z with a 90° vertical field of view.
    pub fn new(position: Vec3, aspect_ratio: f32) -> Self {
        debug_assert!(
            aspect_ratio > 0.0,
            "aspect ratio must be positive, got {aspect_ratio}"
        );
        Self {
            position,
            aspect_ratio,
            pitch: 0.0,
            yaw: -std::f32::consts::FRAC_PI_2,
            fov: std::f32::consts::FRAC_PI_2,
            front: Vec3::NEG_Z,
            up: Vec3::Y,
            right: Vec3::X,
        }
    }

    /// Pitch in degrees.
    pub fn pitch(&self) -> f32 {
        self.pitch.to_degrees()
    }

    /// Set the pitch in degrees, clamped to [-89, 89].
    ///
    /// Non-finite input is ignored.
    pub fn set_pitch(&mut self, degrees: f32) {
        let clamped = clamp_angle(Quantity::Pitch, degrees, -PITCH_LIMIT, PITCH_LIMIT);
        if let Some(angle) = clamped {
            self.pitch = angle.to_radians();
            self.update_vectors();
        }
    }

    /// Like [`Camera::set_pitch`], but rejects out-of-range input instead of clamping.
    pub fn try_set_pitch(&mut self, degrees: f32) -> Result<(), CameraError> {
        check_range(Quantity::Pitch, degrees, -PITCH_LIMIT, PITCH_LIMIT)?;
        self.set_pitch(degrees);
        Ok(())
    }

    /// Yaw in degrees.
    pub fn yaw(&self) -> f32 {
        self.yaw.to_degrees()
    }

    /// Set the yaw in degrees. Any finite value is accepted.
    pub fn set_yaw(&mut self, degrees: f32) {
        if !degrees.is_finite() {
            tracing::warn!(quantity = %Quantity::Yaw, degrees, "ignoring non-finite angle");
            return;
        }
        self.yaw = degrees.to_radians();
        self.update_vectors();
    }

    /// Vertical field of view in degrees.
    pub fn field_of_view(&self) -> f32 {
        self.fov.to_degrees()
    }

    /// Set the vertical field of view in degrees, clamped to [1, 90].
    pub fn set_field_of_view(&mut self, degrees: f32) {
        if let Some(angle) = clamp_angle(
            Quantity::FieldOfView,
            degrees,
            MIN_FIELD_OF_VIEW,
            MAX_FIELD_OF_VIEW,
        ) {
            self.fov = angle.to_radians();
        }
    }

    /// Like [`Camera::set_field_of_view`], but rejects out-of-range input instead of clamping.
    pub fn try_set_field_of_view(&mut self, degrees: f32) -> Result<(), CameraError> {
        check_range(
            Quantity::FieldOfView,
            degrees,
            MIN_FIELD_OF_VIEW,
            MAX_FIELD_OF_VIEW,
        )?;
        self.set_field_of_view(degrees);
        Ok(())
    }

    pub fn add_pitch(&mut self, delta: f32) {
        self.set_pitch(self.pitch() + delta);
    }

    pub fn add_yaw(&mut self, delta: f32) {
        self.set_yaw(self.yaw() + delta);
    }

    pub fn add_field_of_view(&mut self, delta: f32) {
        self.set_field_of_view(self.field_of_view() + delta);
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.aspect_ratio
    }

    /// Set the viewport width/height ratio. Not validated.
    pub fn set_aspect_ratio(&mut self, ratio: f32) {
        self.aspect_ratio = ratio;
    }

    pub fn front(&self) -> Vec3 {
        self.front
    }

    pub fn up(&self) -> Vec3 {
        self.up
    }

    pub fn right(&self) -> Vec3 {
        self.right
    }

    /// Move the eye by a world-space offset.
    pub fn translate(&mut self, delta: Vec3) {
        self.position += delta;
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.position + self.front, self.up)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov, self.aspect_ratio, NEAR_PLANE, FAR_PLANE)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    fn update_vectors(&mut self) {
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();

        self.front =
            Vec3::new(cos_pitch * cos_yaw, sin_pitch, cos_pitch * sin_yaw).normalize();
        self.right = self.front.cross(WORLD_UP).normalize();
        self.up = self.right.cross(self.front).normalize();
    }
}

/// Clamp a degree value into `[min, max]`, or `None` if it is not finite.
fn clamp_angle(quantity: Quantity, degrees: f32, min: f32, max: f32) -> Option<f32> {
    if !degrees.is_finite() {
        tracing::warn!(%quantity, degrees, "ignoring non-finite angle");
        return None;
    }
    let clamped = degrees.clamp(min, max);
    if clamped != degrees {
        tracing::trace!(%quantity, requested = degrees, clamped, "angle clamped");
    }
    Some(clamped)
}

fn check_range(quantity: Quantity, degrees: f32, min: f32, max: f32) -> Result<(), CameraError> {
    // NaN fails `contains`, so non-finite input is rejected here too.
    if (min..=max).contains(&degrees) {
        Ok(())
    } else {
        Err(CameraError::OutOfRange {
            quantity,
            value: degrees,
            min,
            max,
        })
    }
}
