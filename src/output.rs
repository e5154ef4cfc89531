//! # Output Module
//!
//! Sinks for rendered frames:
//! - Real-time visualization via TEV (The EXR Viewer)
//! - PNG file export with linear-to-sRGB encoding
//! - EXR file export preserving full linear HDR precision
//!
//! Frames are RGBA throughout; alpha is always fully opaque but is carried
//! end to end so the on-disk formats match the renderer's output contract.
//!
//! ## TEV Integration
//!
//! TEV displays HDR images sent over a TCP socket. The module handles the
//! connection, the interleaved-to-planar channel conversion TEV expects, and
//! per-frame updates so an animation shows up live while it renders.
//!
//! ## PNG Export
//!
//! Converts f32 linear frames to 8-bit PNG: color channels pass through the
//! sRGB transfer function, alpha stays linear, everything is clamped to
//! [0.0, 1.0] before quantization.

use exr::prelude::*;
use image::{ImageBuffer, Rgba};
use log::{debug, info, warn};
use std::net::TcpStream;
use tev_client::{PacketCreateImage, PacketUpdateImage, TevClient};

use marchlight::renderer::Frame;

/// Send an f32 RGBA frame to TEV for real-time visualization
///
/// Establishes a TCP connection to a running TEV instance, creates an image
/// named `image_name`, and uploads the frame's pixels. Rendering a sequence
/// with a distinct name per frame leaves the whole animation scrubbable in
/// TEV's image list.
///
/// Failures are logged as warnings and never abort the render: a missing
/// viewer must not cost a finished frame.
///
/// # Arguments
///
/// * `image` - f32 RGBA frame with linear values, typically in [0.0, 1.0]
/// * `tev_address` - TEV server address (IP:port or just IP, defaults to port 14158)
/// * `image_name` - name under which the frame appears in TEV
pub fn send_image_to_tev(image: &Frame, tev_address: &str, image_name: &str) {
    // Add default port if not specified
    let tev_address = if tev_address.contains(':') {
        tev_address.to_string()
    } else {
        format!("{}:14158", tev_address)
    };

    debug!("Attempting to connect to TEV at {}", tev_address);

    let stream = match TcpStream::connect(&tev_address) {
        Ok(stream) => stream,
        Err(e) => {
            warn!("Failed to connect to TEV on {}: {}", tev_address, e);
            return;
        }
    };

    // Configure TCP socket for optimal performance
    if let Err(e) = stream.set_nodelay(true) {
        debug!("Failed to set TCP_NODELAY: {}", e);
    }

    debug!("TCP connection established successfully");
    let mut client = TevClient::wrap(stream);

    let (width, height) = image.dimensions();

    // Create image in TEV
    let create_packet = PacketCreateImage {
        image_name,
        width,
        height,
        channel_names: &["R", "G", "B", "A"],
        grab_focus: true,
    };

    if let Err(e) = client.send(create_packet) {
        warn!("Failed to create image in TEV: {}", e);
        return;
    }

    // Convert pixel data from interleaved (RGBARGBA...) to planar
    // (RRR...GGG...BBB...AAA...) channel layout for TEV
    let data_prep_start = std::time::Instant::now();
    let pixel_count = width as usize * height as usize;
    let mut channel_data = Vec::with_capacity(pixel_count * 4);

    for channel in 0..4 {
        for pixel in image.pixels() {
            channel_data.push(pixel[channel]);
        }
    }

    debug!("Data preparation completed in {:.2?}", data_prep_start.elapsed());
    debug!(
        "Sending {} pixels to TEV ({:.1} MB)",
        pixel_count,
        channel_data.len() as f32 * 4.0 / 1_000_000.0
    );
    let send_start = std::time::Instant::now();

    let stride = width as u64 * height as u64;
    let update_packet = PacketUpdateImage {
        image_name,
        grab_focus: false,
        channel_names: &["R", "G", "B", "A"],
        x: 0,
        y: 0,
        width,
        height,
        channel_offsets: &[0, stride, 2 * stride, 3 * stride],
        channel_strides: &[1, 1, 1, 1],
        data: &channel_data,
    };

    match client.send(update_packet) {
        Ok(_) => info!(
            "Frame sent to TEV at {} in {:.2?}",
            tev_address,
            send_start.elapsed()
        ),
        Err(e) => warn!("Failed to send frame data to TEV: {}", e),
    }
}

/// Save an f32 RGBA frame as PNG with sRGB encoding
///
/// The color channels pass through the standard sRGB transfer function
/// (linear segment below 0.0031308, power curve above); alpha is stored
/// linearly. All channels are clamped to [0.0, 1.0] before scaling to
/// 8-bit integers.
///
/// # Errors
///
/// Logs warnings for I/O errors but does not panic. Common causes are an
/// invalid path, insufficient permissions, or a full disk.
pub fn save_image_as_png(image: &Frame, output_path: &str) {
    let (width, height) = image.dimensions();

    // sRGB transfer function with linear portion for dark values
    let linear_to_srgb = |linear: f32| -> f32 {
        if linear <= 0.0 {
            0.0
        } else if linear <= 0.0031308 {
            12.92 * linear
        } else {
            1.055 * linear.powf(1.0 / 2.4) - 0.055
        }
    };

    let u8_image: ImageBuffer<Rgba<u8>, Vec<u8>> = ImageBuffer::from_fn(width, height, |x, y| {
        let pixel = image.get_pixel(x, y);

        Rgba([
            (linear_to_srgb(pixel[0].clamp(0.0, 1.0)) * 255.0) as u8,
            (linear_to_srgb(pixel[1].clamp(0.0, 1.0)) * 255.0) as u8,
            (linear_to_srgb(pixel[2].clamp(0.0, 1.0)) * 255.0) as u8,
            (pixel[3].clamp(0.0, 1.0) * 255.0) as u8,
        ])
    });

    match u8_image.save(output_path) {
        Ok(_) => info!("Image saved as {}", output_path),
        Err(e) => warn!("Failed to save image: {}", e),
    }
}

/// Save an f32 RGBA frame as EXR with full HDR precision
///
/// Writes linear light values without tone mapping or gamma, 32-bit float
/// per channel, for post-processing or viewing with a display-transform
/// aware tool such as TEV.
///
/// # Errors
///
/// Logs warnings for I/O errors but does not panic.
pub fn save_image_as_exr(image: &Frame, output_path: &str) {
    let (width, height) = image.dimensions();

    let result = write_rgba_file(output_path, width as usize, height as usize, |x, y| {
        let pixel = image.get_pixel(x as u32, y as u32);
        (pixel[0], pixel[1], pixel[2], pixel[3])
    });

    match result {
        Ok(_) => info!("HDR image saved as EXR: {}", output_path),
        Err(e) => warn!("Failed to save EXR image: {}", e),
    }
}
