// Frame type shared by the camera, the effect and the window.

use crate::error::{Error, Result};

#[derive(Clone)]
pub struct FrameBuffer {
    pub width: usize,      // how wide the frame is on screen (pixels)
    pub height: usize,     // how tall the frame is on screen (pixels)
    pub pixels: Vec<u32>,  // each entry is 0x00RRGGBB for minifb
}

impl FrameBuffer {
    /// Black frame of the given size.
    /// Fails only if the pixel storage cannot be reserved.
    pub fn new(width: usize, height: usize) -> Result<Self> {
        let len = width * height;
        let mut pixels = Vec::new();
        pixels.try_reserve_exact(len)?;
        pixels.resize(len, 0);
        Ok(Self { width, height, pixels })
    }

    /// Wrap an existing pixel vector, checking it matches the dimensions.
    pub fn from_pixels(width: usize, height: usize, pixels: Vec<u32>) -> Result<Self> {
        if pixels.len() != width * height {
            return Err(Error::invalid_argument(format!(
                "{} pixels do not fill a {}x{} frame",
                pixels.len(),
                width,
                height
            )));
        }
        Ok(Self { width, height, pixels })
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> u32 {
        self.pixels[y * self.width + x]
    }
}

/// Pack 8-bit channels as 0x00RRGGBB.
#[inline]
pub fn pack_rgb(r: u8, g: u8, b: u8) -> u32 {
    ((r as u32) << 16) | ((g as u32) << 8) | b as u32
}

/// Split 0x00RRGGBB back into channels; the top byte is ignored.
#[inline]
pub fn unpack_rgb(px: u32) -> [u8; 3] {
    [((px >> 16) & 0xFF) as u8, ((px >> 8) & 0xFF) as u8, (px & 0xFF) as u8]
}
