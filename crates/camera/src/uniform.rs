use bytemuck::{Pod, Zeroable};

use crate::camera::Camera;

/// Camera state laid out for a GPU uniform buffer.
///
/// Matrices are column-major (`Mat4::to_cols_array_2d`) and expect column
/// vectors: `clip = view_proj * world`. `position.w` is always 1 and pads the
/// eye position to 16 bytes for std140.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct CameraUniform {
    pub view: [[f32; 4]; 4],
    pub projection: [[f32; 4]; 4],
    pub view_proj: [[f32; 4]; 4],
    pub position: [f32; 4],
}

impl CameraUniform {
    pub fn from_camera(camera: &Camera) -> Self {
        let view = camera.view_matrix();
        let projection = camera.projection_matrix();
        Self {
            view: view.to_cols_array_2d(),
            projection: projection.to_cols_array_2d(),
            view_proj: (projection * view).to_cols_array_2d(),
            position: camera.position.extend(1.0).to_array(),
        }
    }

    /// Raw bytes ready for `queue.write_buffer`.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }
}

impl From<&Camera> for CameraUniform {
    fn from(camera: &Camera) -> Self {
        Self::from_camera(camera)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{Mat4, Vec3, Vec4};

    #[test]
    fn layout_is_std140_friendly() {
        assert_eq!(std::mem::size_of::<CameraUniform>(), 3 * 64 + 16);
        assert_eq!(std::mem::size_of::<CameraUniform>() % 16, 0);
    }

    #[test]
    fn matrices_are_column_major() {
        let cam = Camera::new(Vec3::new(1.0, 2.0, 3.0), 4.0 / 3.0);
        let uniform = CameraUniform::from_camera(&cam);

        let view = Mat4::from_cols_array_2d(&uniform.view);
        assert_eq!(view, cam.view_matrix());
        // Translation lives in the fourth column.
        assert_eq!(uniform.view[3], cam.view_matrix().w_axis.to_array());

        let vp = Mat4::from_cols_array_2d(&uniform.view_proj);
        assert_eq!(vp, cam.view_projection());
    }

    #[test]
    fn position_is_padded_point() {
        let cam = Camera::new(Vec3::new(-1.0, 0.5, 8.0), 1.0);
        let uniform = CameraUniform::from(&cam);
        assert_eq!(Vec4::from_array(uniform.position), Vec4::new(-1.0, 0.5, 8.0, 1.0));
    }

    #[test]
    fn bytes_cover_whole_struct() {
        let cam = Camera::new(Vec3::ZERO, 16.0 / 9.0);
        let uniform = CameraUniform::from_camera(&cam);
        let bytes = uniform.as_bytes();
        assert_eq!(bytes.len(), std::mem::size_of::<CameraUniform>());
        let back: &CameraUniform = bytemuck::from_bytes(bytes);
        assert_eq!(*back, uniform);
    }
}
