//! Implicit scene description as a signed distance field.
//!
//! The scene is a single unit sphere centered at the world origin. Distances
//! are negative inside the surface, positive outside, and zero on it.

use glam::Vec3A;

/// Radius of the scene's sphere.
pub const SPHERE_RADIUS: f32 = 1.0;

/// Finite-difference offset for gradient estimation.
pub const NORMAL_EPSILON: f32 = 0.001;

/// Signed distance from `p` to the nearest surface.
///
/// Pure function: the marcher and the normal estimator both call it an
/// unbounded number of times per pixel and rely on identical results for
/// identical input.
pub fn distance(p: Vec3A) -> f32 {
    p.length() - SPHERE_RADIUS
}

/// Estimate the unit surface normal at `p` via central differences.
///
/// Only meaningful when `p` lies on or extremely near the surface, i.e.
/// immediately after a raymarch hit. Elsewhere the gradient is well defined
/// mathematically but has no geometric interpretation.
pub fn normal(p: Vec3A) -> Vec3A {
    let ex = Vec3A::new(NORMAL_EPSILON, 0.0, 0.0);
    let ey = Vec3A::new(0.0, NORMAL_EPSILON, 0.0);
    let ez = Vec3A::new(0.0, 0.0, NORMAL_EPSILON);

    Vec3A::new(
        distance(p + ex) - distance(p - ex),
        distance(p + ey) - distance(p - ey),
        distance(p + ez) - distance(p - ez),
    )
    .normalize()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_matches_analytic_sphere() {
        let points = [
            Vec3A::new(0.0, 0.0, 0.0),
            Vec3A::new(2.0, 0.0, 0.0),
            Vec3A::new(0.0, -3.0, 4.0),
            Vec3A::new(0.5, 0.5, 0.5),
        ];

        for p in points {
            assert!((distance(p) - (p.length() - SPHERE_RADIUS)).abs() < 1e-6);
        }
    }

    #[test]
    fn distance_sign_convention() {
        // Inside negative, outside positive, surface zero.
        assert!(distance(Vec3A::ZERO) < 0.0);
        assert!(distance(Vec3A::new(0.0, 5.0, 0.0)) > 0.0);
        assert!(distance(Vec3A::new(1.0, 0.0, 0.0)).abs() < 1e-6);
    }

    #[test]
    fn normal_points_radially_outward() {
        let p = Vec3A::new(0.0, 0.0, -1.0);
        let n = normal(p);

        assert!((n.length() - 1.0).abs() < 1e-4);
        assert!((n - Vec3A::new(0.0, 0.0, -1.0)).length() < 1e-3);
    }

    #[test]
    fn normal_is_unit_length_off_axis() {
        let p = Vec3A::new(0.577, 0.577, 0.577); // ~on surface
        let n = normal(p);
        assert!((n.length() - 1.0).abs() < 1e-4);
    }
}
