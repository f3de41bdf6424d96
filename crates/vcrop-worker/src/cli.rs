use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "vcrop")]
#[command(author, version, about = "Center-crop videos to a target aspect ratio")]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Crop a batch of videos (exactly three by default)
    Run {
        /// Target aspect ratio, e.g. 16:9 or 4:3
        #[arg(short, long)]
        ratio: String,

        /// Directory for output_video_N.mp4 files (overrides VCROP_OUTPUT_DIR)
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Print the batch report as JSON
        #[arg(long)]
        json: bool,

        /// Input videos (mp4, avi, mov, mkv), processed in this order
        inputs: Vec<PathBuf>,
    },

    /// Show the crop plan for a frame size without touching any file
    Plan {
        /// Target aspect ratio, e.g. 16:9
        #[arg(short, long)]
        ratio: String,

        /// Source width in pixels
        #[arg(long)]
        width: u32,

        /// Source height in pixels
        #[arg(long)]
        height: u32,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Check that ffmpeg and ffprobe are available
    CheckTools,
}
