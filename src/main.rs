use clap::Parser;
use log::info;

mod cli;
mod logger;
mod output;

use cli::Args;
use logger::init_logger;
use marchlight::renderer::{self, FrameParams};
use output::{save_image_as_exr, save_image_as_png, send_image_to_tev};

fn main() {
    let args = Args::parse();

    init_logger(args.debug_level.into());

    // Log application startup with version information
    info!("MarchLight - Git Version {} ({})", env!("GIT_HASH"), env!("GIT_DATE"));
    info!(
        "Image resolution: {}x{}, rendering {} frame(s) starting at frame {}",
        args.width, args.height, args.frames, args.frame
    );

    if !args.output.ends_with(".png") && !args.output.ends_with(".exr") {
        log::error!(
            "Unsupported file extension '{}'. Only .png and .exr formats are supported.",
            std::path::Path::new(&args.output)
                .extension()
                .unwrap_or_default()
                .to_string_lossy()
        );
        std::process::exit(1);
    }

    let should_send_to_tev = args.tev || args.tev_address.is_some();

    for index in 0..args.frames {
        let frame_count = args.frame + index;
        let params = FrameParams::new(args.width, args.height, frame_count).unwrap_or_else(|e| {
            log::error!("{}", e);
            std::process::exit(1);
        });

        let image = renderer::render(&params);

        // Send frame to TEV if requested
        if should_send_to_tev {
            let tev_address = args.tev_address.as_deref().unwrap_or("localhost:14158");
            let image_name = format!("marchlight_{:04}", frame_count);
            send_image_to_tev(&image, tev_address, &image_name);
        }

        let output_path = frame_output_path(&args.output, frame_count, args.frames);
        if output_path.ends_with(".exr") {
            save_image_as_exr(&image, &output_path);
        } else {
            save_image_as_png(&image, &output_path);
        }
    }
}

/// Output path for one frame of a sequence.
///
/// Single frames keep the path as given; sequences get the frame counter
/// injected before the extension so files sort in render order.
fn frame_output_path(output: &str, frame_count: u32, total_frames: u32) -> String {
    if total_frames <= 1 {
        return output.to_string();
    }

    match output.rsplit_once('.') {
        Some((stem, extension)) => format!("{}_{:04}.{}", stem, frame_count, extension),
        None => format!("{}_{:04}", output, frame_count),
    }
}
