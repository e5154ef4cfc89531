//! Shading of raymarch results.
//!
//! A two-term lighting model: clamped Lambertian diffuse from a single
//! orbiting directional light plus a flat ambient term. Misses fall back to
//! a constant sky color. No shadows, no specular, no global illumination.

use glam::Vec3A;
use image::Rgba;

use crate::march::Hit;

/// RGB color type using Vec3A for SIMD optimization.
pub type Color = Vec3A;

/// Constant sky color returned for rays that hit nothing.
pub const SKY_COLOR: Color = Vec3A::new(0.6, 0.8, 1.0);

/// Base color of the directional light.
const LIGHT_COLOR: Color = Vec3A::new(1.0, 1.0, 1.0);

/// Flat ambient contribution applied to every lit surface.
const AMBIENT: Color = Vec3A::new(0.1, 0.1, 0.1);

/// Weight of the diffuse term relative to ambient.
const DIFFUSE_STRENGTH: f32 = 0.9;

/// Radians of light orbit per frame.
const LIGHT_ORBIT_RATE: f32 = 0.01;

/// Direction toward the light for a given frame counter.
///
/// The light slowly orbits the scene, driven purely by the frame index;
/// no animation state persists between frames. Always unit length.
pub fn light_direction(frame_count: u32) -> Vec3A {
    let angle = frame_count as f32 * LIGHT_ORBIT_RATE;
    Vec3A::new(angle.sin(), 1.0, angle.cos()).normalize()
}

/// Compute the final RGBA color for one invocation.
///
/// `None` (a raymarch miss) produces the sky color. The diffuse dot product
/// is clamped to zero so surfaces facing away from the light receive only
/// the ambient term. Alpha is always 1.0.
pub fn shade(hit: Option<&Hit>, frame_count: u32) -> Rgba<f32> {
    let color = match hit {
        Some(hit) => {
            let lambert = hit.normal.dot(light_direction(frame_count)).max(0.0);
            LIGHT_COLOR * lambert * DIFFUSE_STRENGTH + AMBIENT
        }
        None => SKY_COLOR,
    };

    Rgba([color.x, color.y, color.z, 1.0])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hit_with_normal(normal: Vec3A) -> Hit {
        Hit {
            t: 1.0,
            position: normal,
            normal,
        }
    }

    #[test]
    fn miss_shades_to_sky() {
        let Rgba([r, g, b, a]) = shade(None, 0);
        assert_eq!((r, g, b, a), (0.6, 0.8, 1.0, 1.0));
    }

    #[test]
    fn back_facing_surface_gets_ambient_only() {
        // Normal opposite the light: the diffuse dot product is negative and
        // must clamp to zero rather than darken below ambient.
        let light = light_direction(0);
        let hit = hit_with_normal(-light);

        let Rgba([r, g, b, a]) = shade(Some(&hit), 0);
        assert!((r - 0.1).abs() < 1e-6);
        assert!((g - 0.1).abs() < 1e-6);
        assert!((b - 0.1).abs() < 1e-6);
        assert_eq!(a, 1.0);
    }

    #[test]
    fn light_facing_surface_is_brightest() {
        let light = light_direction(0);
        let hit = hit_with_normal(light);

        let Rgba([r, ..]) = shade(Some(&hit), 0);
        assert!((r - 1.0).abs() < 1e-6); // 0.9 diffuse + 0.1 ambient
    }

    #[test]
    fn light_orbits_with_frame_counter() {
        let early = light_direction(0);
        let late = light_direction(100);

        assert!((early - late).length() > 1e-3);
        assert!((early.length() - 1.0).abs() < 1e-5);
        assert!((late.length() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn shaded_alpha_is_always_opaque() {
        let hit = hit_with_normal(Vec3A::new(0.0, 0.0, -1.0));
        assert_eq!(shade(Some(&hit), 7).0[3], 1.0);
        assert_eq!(shade(None, 7).0[3], 1.0);
    }
}
