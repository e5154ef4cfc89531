//! Ray representation for sphere tracing.
//!
//! A ray is the line r(t) = origin + t * direction, marched forward from
//! t = 0 by the raymarcher.

use glam::Vec3A;

/// Ray in 3D space defined by origin and direction.
///
/// Directions produced by the invocation mapper are unit length, so the
/// marcher's accumulated `t` is a true world-space distance. A ray is built
/// per pixel, consumed once, and never retained.
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    /// Starting point of the ray in world coordinates.
    pub origin: Vec3A,

    /// Unit-length direction of travel.
    pub direction: Vec3A,
}

impl Ray {
    /// Create a new ray with origin and direction.
    pub fn new(origin: Vec3A, direction: Vec3A) -> Self {
        Self { origin, direction }
    }

    /// Compute a point at parameter t along the ray.
    ///
    /// Returns r(t) = origin + t * direction.
    pub fn at(&self, t: f32) -> Vec3A {
        self.origin + t * self.direction
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn at_advances_along_direction() {
        let ray = Ray::new(Vec3A::new(0.0, 0.0, -2.0), Vec3A::new(0.0, 0.0, 1.0));
        assert!((ray.at(2.0) - Vec3A::ZERO).length() < 1e-6);
        assert!((ray.at(0.0) - ray.origin).length() < 1e-6);
    }
}
