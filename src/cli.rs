use clap::{Parser, ValueEnum};
use log::LevelFilter;

/// Custom enum for log levels that can be used with clap's ValueEnum
#[derive(Debug, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convert our custom LogLevel enum to log crate's LevelFilter
impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Command line arguments structure using clap derive macros
#[derive(Parser)]
#[command(name = "marchlight")]
#[command(about = "A sphere-tracing SDF renderer in Rust")]
pub struct Args {
    /// Set the logging level (defaults to "info")
    #[arg(long, default_value = "info", help = "Set the logging level")]
    pub debug_level: LogLevel,

    /// Image width in pixels (must exceed 1)
    #[arg(long, default_value = "800", value_parser = clap::value_parser!(u32).range(2..), help = "Image width in pixels")]
    pub width: u32,

    /// Image height in pixels (must exceed 1)
    #[arg(long, default_value = "600", value_parser = clap::value_parser!(u32).range(2..), help = "Image height in pixels")]
    pub height: u32,

    /// Frame counter of the first rendered frame (drives the orbiting light)
    #[arg(long, short = 'f', default_value = "0", help = "Frame counter of the first rendered frame")]
    pub frame: u32,

    /// Number of consecutive frames to render
    #[arg(long, default_value = "1", value_parser = clap::value_parser!(u32).range(1..), help = "Number of consecutive frames to render")]
    pub frames: u32,

    /// Send frames to TEV for real-time visualization
    #[arg(long, help = "Send frames to TEV for real-time visualization")]
    pub tev: bool,

    /// TEV client IP address and port (automatically enables --tev)
    #[arg(long, help = "TEV client IP address and port (automatically enables --tev)")]
    pub tev_address: Option<String>,

    /// Output file path (.png for 8-bit with gamma correction, .exr for HDR linear)
    #[arg(short, long, default_value = "output.png", help = "Output file path (.png for 8-bit with gamma correction, .exr for HDR linear)")]
    pub output: String,
}
