// Frame and block geometry.
// Frames are packed 32-bit pixels, row-major, with a stride of one full row.

use crate::error::{Error, Result};

/// Bits per pixel. Fixed: every frame is packed 0x00RRGGBB.
pub const BITS_PER_PIXEL: usize = 32;
pub const BYTES_PER_PIXEL: usize = BITS_PER_PIXEL / 8;

/// Static description of one frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Geometry {
    pub width: usize,
    pub height: usize,
    pub bits_per_pixel: usize,
    pub pitch_bytes: usize,      // one scanline in bytes
    pub frame_size_bytes: usize, // whole frame in bytes
}

impl Geometry {
    /// Fails when the frame size in bytes does not fit in `usize`.
    pub fn new(width: usize, height: usize) -> Result<Self> {
        let too_big = || Error::invalid_argument(format!("{width}x{height} frame is too large"));
        let pitch_bytes = width.checked_mul(BYTES_PER_PIXEL).ok_or_else(too_big)?;
        let frame_size_bytes = pitch_bytes.checked_mul(height).ok_or_else(too_big)?;
        Ok(Self {
            width,
            height,
            bits_per_pixel: BITS_PER_PIXEL,
            pitch_bytes,
            frame_size_bytes,
        })
    }

    /// Scanline stride in pixels.
    #[inline]
    pub fn pitch(&self) -> usize {
        self.pitch_bytes / BYTES_PER_PIXEL
    }

    /// Frame length in pixels.
    #[inline]
    pub fn frame_len(&self) -> usize {
        self.frame_size_bytes / BYTES_PER_PIXEL
    }
}

/// Block addressing derived from a `Geometry` and a block size.
///
/// The map covers `width / block_size` by `height / block_size` blocks. Any
/// partial block at the right or bottom edge is outside the map and is never
/// written by the effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BlockConfig {
    pub block_size: usize,
    pub map_width: usize,
    pub map_height: usize,
    pub cell_count: usize,
    pub bytes_per_block_row: usize,
    pub block_rows_to_copy: usize,
    pitch: usize,
}

impl BlockConfig {
    /// A block size of 0 is treated as 1.
    pub fn new(geo: &Geometry, block_size: usize) -> Self {
        let block_size = block_size.max(1);
        let map_width = geo.width / block_size;
        let map_height = geo.height / block_size;
        Self {
            block_size,
            map_width,
            map_height,
            cell_count: map_width * map_height,
            bytes_per_block_row: block_size * BYTES_PER_PIXEL,
            block_rows_to_copy: block_size,
            pitch: geo.pitch(),
        }
    }

    /// Pixels copied per block row.
    #[inline]
    pub fn block_row_len(&self) -> usize {
        self.bytes_per_block_row / BYTES_PER_PIXEL
    }

    /// Pixel offset of the top-left corner of block (x, y).
    #[inline]
    pub fn block_offset(&self, x: usize, y: usize) -> usize {
        y * self.block_size * self.pitch + x * self.block_size
    }

    /// Pixel stride between two rows of the same block.
    #[inline]
    pub fn pitch(&self) -> usize {
        self.pitch
    }
}
