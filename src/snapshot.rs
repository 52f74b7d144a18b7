// PNG snapshots of what the window is showing.
// Visual: pressing P drops the current effect frame next to the binary.

use std::path::{Path, PathBuf};

use image::{ImageBuffer, Rgb, RgbImage};
use log::info;

use crate::error::Result;
use crate::types::{FrameBuffer, unpack_rgb};

/// Convert 0x00RRGGBB pixels to an 8-bit RGB image.
pub fn to_rgb_image(fb: &FrameBuffer) -> RgbImage {
    ImageBuffer::from_fn(fb.width as u32, fb.height as u32, |x, y| {
        Rgb(unpack_rgb(fb.get(x as usize, y as usize)))
    })
}

/// `dir/delaygrab-000042.png` for frame 42.
pub fn snapshot_path(dir: &Path, frame_no: u64) -> PathBuf {
    dir.join(format!("delaygrab-{frame_no:06}.png"))
}

/// Write `fb` as a PNG at `path`.
pub fn save_png(fb: &FrameBuffer, path: &Path) -> Result<()> {
    to_rgb_image(fb).save_with_format(path, image::ImageFormat::Png)?;
    info!("snapshot: wrote {}x{} frame to {}", fb.width, fb.height, path.display());
    Ok(())
}
