//! Reusable camera abstraction.
//!
//! A positioned camera with an orthonormal rotation basis and an explicit
//! vertical field of view. The raymarch kernel keeps its own fixed pinhole
//! projection and does not consume this type; it is provided as an
//! independent building block for callers that need a movable camera, and
//! mirrors the push-constant layout (translation, 3x3 rotation, fov) a GPU
//! dispatch would bind.

use glam::{Mat3A, Vec3A};

/// Sensor height of a full-frame 35 mm camera, in millimetres.
const SENSOR_HEIGHT_MM: f32 = 24.0;

/// Camera with position, orientation, and vertical field of view.
#[derive(Debug, Clone, Copy)]
pub struct Camera {
    /// Camera position in world space
    pub position: Vec3A,
    /// Orthonormal basis: columns are right, up, forward
    pub rotation: Mat3A,
    /// Vertical field of view in radians
    pub field_of_view: f32,
}

impl Camera {
    /// Build a camera looking from `position` toward `target`.
    ///
    /// The basis is built Gram-Schmidt style: forward toward the target,
    /// right perpendicular to forward and the supplied up hint, and the true
    /// up completing the right-handed frame. `up` need not be perpendicular
    /// to the view direction, only non-parallel to it.
    pub fn look_at(position: Vec3A, target: Vec3A, up: Vec3A, field_of_view: f32) -> Self {
        let forward = (target - position).normalize();
        let right = forward.cross(up).normalize();
        let true_up = right.cross(forward);

        Self {
            position,
            rotation: Mat3A::from_cols(right, true_up, forward),
            field_of_view,
        }
    }

    /// Forward axis of the camera's basis.
    pub fn forward(&self) -> Vec3A {
        self.rotation.z_axis
    }
}

/// Convert a 35 mm-equivalent focal length to a vertical field of view.
///
/// Uses the standard full-frame convention of a 24 mm sensor height:
/// `fov = 2 * atan(24 / (2 * focal_length))`, in radians.
pub fn vertical_fov_from_focal_length(focal_length_mm: f32) -> f32 {
    2.0 * (SENSOR_HEIGHT_MM / (2.0 * focal_length_mm)).atan()
}
