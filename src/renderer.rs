//! Per-pixel invocation mapping and parallel frame dispatch.
//!
//! Each pixel is one independent invocation: map the coordinate to a primary
//! ray, march it through the distance field, shade the result, write exactly
//! one output slot. Invocations share no mutable state, so the dispatch is a
//! plain data-parallel map over the image.

use std::fmt;

use glam::Vec3A;
use image::{ImageBuffer, Rgba};
use indicatif::{ProgressBar, ProgressStyle};
use log::info;
use rayon::prelude::*;

use crate::march;
use crate::ray::Ray;
use crate::shade;

/// Fixed camera position: 2 units behind the world origin on the view axis.
pub const EYE: Vec3A = Vec3A::new(0.0, 0.0, -2.0);

/// Rendered frame buffer: RGBA, one slot per pixel, linear values.
pub type Frame = ImageBuffer<Rgba<f32>, Vec<f32>>;

/// Immutable per-dispatch parameters.
///
/// Constructed once per frame and shared read-only across all pixel
/// invocations. The frame counter is the only temporal input; it drives the
/// orbiting light and must increase monotonically across frames.
#[derive(Debug, Clone, Copy)]
pub struct FrameParams {
    /// Image width in pixels, always > 1
    pub width: u32,
    /// Image height in pixels, always > 1
    pub height: u32,
    /// Frame counter driving the light animation
    pub frame_count: u32,
}

/// Rejected frame dimensions.
///
/// The UV mapping divides by `dimension - 1`, so both dimensions must be
/// at least 2. This is a precondition violation at the boundary, never a
/// division by zero inside the kernel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DimensionError {
    /// Rejected width
    pub width: u32,
    /// Rejected height
    pub height: u32,
}

impl fmt::Display for DimensionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "frame dimensions must both exceed 1 pixel, got {}x{}",
            self.width, self.height
        )
    }
}

impl std::error::Error for DimensionError {}

impl FrameParams {
    /// Validate and build parameters for one dispatch.
    pub fn new(width: u32, height: u32, frame_count: u32) -> Result<Self, DimensionError> {
        if width <= 1 || height <= 1 {
            return Err(DimensionError { width, height });
        }

        Ok(Self {
            width,
            height,
            frame_count,
        })
    }

    /// Width-over-height aspect ratio. Exactly 1.0 for square frames.
    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height as f32
    }

    /// Normalized UV for a pixel: u left-to-right, v flipped so v = 0 is the
    /// image bottom (image coordinates put y = 0 at the top).
    fn pixel_uv(&self, x: u32, y: u32) -> (f32, f32) {
        let u = x as f32 / (self.width - 1) as f32;
        let v = 1.0 - y as f32 / (self.height - 1) as f32;
        (u, v)
    }
}

/// Build the primary ray for one pixel.
///
/// Returns `None` when the coordinate lies outside the image: invocations
/// on grid overhang (grids padded up to a tile size) must do no work and
/// write nothing. The projection is a fixed pinhole with implicit unit focal
/// distance; the horizontal axis is scaled by the aspect ratio so the
/// vertical field of view stays constant on non-square frames.
pub fn primary_ray(x: u32, y: u32, params: &FrameParams) -> Option<Ray> {
    if x >= params.width || y >= params.height {
        return None;
    }

    let (u, v) = params.pixel_uv(x, y);
    let ndc_x = (u * 2.0 - 1.0) * params.aspect();
    let ndc_y = v * 2.0 - 1.0;

    let direction = Vec3A::new(ndc_x, ndc_y, 1.0).normalize();
    Some(Ray::new(EYE, direction))
}

/// Run one full invocation: map, march, shade.
///
/// Returns the pixel's final color, or `None` for out-of-range coordinates.
pub fn trace_pixel(x: u32, y: u32, params: &FrameParams) -> Option<Rgba<f32>> {
    let ray = primary_ray(x, y, params)?;
    let hit = march::march(&ray);
    Some(shade::shade(hit.as_ref(), params.frame_count))
}

/// Render a complete frame on the CPU.
///
/// Parallel pixel processing using Rayon: every closure owns exactly one
/// output slot, so the writes are statically disjoint and need no locks.
pub fn render(params: &FrameParams) -> Frame {
    let mut image: Frame = ImageBuffer::new(params.width, params.height);

    info!(
        "Rendering frame {} at {}x{} using {} CPU cores...",
        params.frame_count,
        params.width,
        params.height,
        rayon::current_num_threads()
    );
    let render_start = std::time::Instant::now();
    let pb = ProgressBar::new(params.width as u64 * params.height as u64);
    pb.set_style(ProgressStyle::default_bar().template("{bar:40} {pos}/{len} ETA: {eta}").unwrap());

    image.enumerate_pixels_mut().par_bridge().for_each(|(x, y, pixel)| {
        if let Some(color) = trace_pixel(x, y, params) {
            *pixel = color;
        }
        pb.inc(1);
    });

    pb.finish();
    info!("Frame rendered in {:.2?}", render_start.elapsed());

    image
}
