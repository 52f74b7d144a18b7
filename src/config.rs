// Command-line settings for the live viewer.

use std::path::PathBuf;

use clap::Parser;
use delaygrab::Mode;
use log::LevelFilter;

#[derive(Parser, Debug)]
#[command(
    name = "delaygrab",
    about = "Live camera time-echo: every block of the picture lags by its own number of frames"
)]
pub struct Args {
    /// Camera index (0 = default webcam)
    #[arg(short, long, default_value_t = 0)]
    pub camera: u32,

    /// Requested capture width; the camera may pick something close
    #[arg(long, default_value_t = 640)]
    pub width: u32,

    /// Requested capture height
    #[arg(long, default_value_t = 480)]
    pub height: u32,

    /// Starting block size in pixels
    #[arg(short, long, default_value_t = 2)]
    pub block_size: usize,

    /// Starting delay pattern
    #[arg(short, long, value_enum, default_value_t = Mode::HorizontalStripes)]
    pub mode: Mode,

    /// Fixed seed for the random pattern (default: reseed from the clock)
    #[arg(long)]
    pub seed: Option<u32>,

    /// Where P writes PNG snapshots
    #[arg(long, default_value = ".")]
    pub snapshot_dir: PathBuf,

    /// Log level: off, error, warn, info, debug, trace
    #[arg(long, default_value_t = LevelFilter::Info)]
    pub log_level: LevelFilter,
}
