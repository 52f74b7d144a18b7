// The time-echo effect: every block of the output comes from an older frame.
// Visual: stripes/rings/noise of the picture lag behind the rest, so motion
// smears across the screen in the shape of the current pattern.

use log::{info, warn};

use crate::delaymap::{DelayMap, DelayMapGenerator, Mode};
use crate::error::{Error, Result};
use crate::geometry::{BlockConfig, Geometry};
use crate::ring::{FrameRing, RING_DEPTH};

/// Block size a new instance starts with.
pub const DEFAULT_BLOCK_SIZE: usize = 2;
/// `Command::ShrinkBlock` never goes below this.
pub const MIN_CONTROL_BLOCK_SIZE: usize = 2;

/// Discrete controls a host can bind to keys or buttons.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    NextMode,
    PrevMode,
    GrowBlock,
    ShrinkBlock,
    /// Rebuild the map under the current mode (new pattern in random mode).
    Reseed,
}

/// One effect instance. Owns its history, its map and its geometry.
pub struct DelayGrab {
    geo: Geometry,
    blocks: BlockConfig,
    mode: Mode,
    generator: DelayMapGenerator,
    map: DelayMap,
    ring: FrameRing,
}

impl DelayGrab {
    /// Effect for `width` x `height` frames; random patterns are clock-seeded.
    pub fn new(width: usize, height: usize) -> Result<Self> {
        Self::with_generator(width, height, DelayMapGenerator::new())
    }

    /// Same as `new`, but every random pattern is built from `seed`.
    pub fn with_seed(width: usize, height: usize, seed: u32) -> Result<Self> {
        Self::with_generator(width, height, DelayMapGenerator::with_seed(seed))
    }

    pub fn with_generator(width: usize, height: usize, mut generator: DelayMapGenerator) -> Result<Self> {
        let geo = Geometry::new(width, height)?;
        let ring = FrameRing::new(&geo)?;
        let mode = Mode::default();
        let blocks = BlockConfig::new(&geo, DEFAULT_BLOCK_SIZE);
        let map = generator.generate(mode, &blocks)?;
        info!(
            "delaygrab: {}x{} frames, {} MiB history, block {} ({}x{} map), mode {:?}",
            width,
            height,
            geo.frame_size_bytes.saturating_mul(RING_DEPTH) >> 20,
            blocks.block_size,
            blocks.map_width,
            blocks.map_height,
            mode
        );
        Ok(Self { geo, blocks, mode, generator, map, ring })
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geo
    }

    pub fn blocks(&self) -> &BlockConfig {
        &self.blocks
    }

    pub fn block_size(&self) -> usize {
        self.blocks.block_size
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn delay_map(&self) -> &DelayMap {
        &self.map
    }

    pub fn ring(&self) -> &FrameRing {
        &self.ring
    }

    /// Switch pattern. Block layout is unchanged; the whole map is rebuilt.
    pub fn set_mode(&mut self, mode: Mode) -> Result<()> {
        self.map = self.generator.generate(mode, &self.blocks)?;
        self.mode = mode;
        info!("delaygrab: mode {} ({:?})", mode.number(), mode);
        Ok(())
    }

    /// Change block size, then rebuild the map under the current mode.
    /// On failure the previous layout and map are kept.
    pub fn set_block_size(&mut self, size: usize) -> Result<()> {
        let blocks = BlockConfig::new(&self.geo, size);
        self.map = self.generator.generate(self.mode, &blocks)?;
        self.blocks = blocks;
        info!(
            "delaygrab: block {} ({}x{} map)",
            blocks.block_size, blocks.map_width, blocks.map_height
        );
        Ok(())
    }

    /// Apply one control. Returns `false` when the command hit a limit and
    /// nothing changed.
    pub fn apply(&mut self, cmd: Command) -> Result<bool> {
        match cmd {
            Command::NextMode => match self.mode.next() {
                Some(mode) => self.set_mode(mode).map(|_| true),
                None => Ok(false),
            },
            Command::PrevMode => match self.mode.prev() {
                Some(mode) => self.set_mode(mode).map(|_| true),
                None => Ok(false),
            },
            Command::GrowBlock => {
                let limit = self.geo.width.min(self.geo.height).max(1);
                if self.blocks.block_size < limit {
                    self.set_block_size(self.blocks.block_size + 1).map(|_| true)
                } else {
                    Ok(false)
                }
            }
            Command::ShrinkBlock => {
                if self.blocks.block_size > MIN_CONTROL_BLOCK_SIZE {
                    self.set_block_size(self.blocks.block_size - 1).map(|_| true)
                } else {
                    Ok(false)
                }
            }
            Command::Reseed => self.set_mode(self.mode).map(|_| true),
        }
    }

    /// Run the effect on one frame.
    ///
    /// `input` joins the history, then every mapped block of `output` is
    /// copied from the frame its delay points at. Pixels right of or below
    /// the last whole block are left as they were. `_time` is the host's
    /// timestamp; the effect does not depend on it.
    pub fn update(&mut self, _time: f64, input: &[u32], output: &mut [u32]) -> Result<()> {
        let want = self.geo.frame_len();
        if output.len() != want {
            warn!("delaygrab: output is {} pixels (want {})", output.len(), want);
            return Err(Error::invalid_argument(format!(
                "output is {} pixels, expected {}",
                output.len(),
                want
            )));
        }
        self.ring.push(input)?;

        let b = &self.blocks;
        let row_len = b.block_row_len();
        let pitch = b.pitch();
        for y in 0..b.map_height {
            for x in 0..b.map_width {
                let delay = self.map.get(x, y) as usize;
                let src = self.ring.frame_at_age(delay);
                let mut ofs = b.block_offset(x, y);
                for _ in 0..b.block_rows_to_copy {
                    output[ofs..ofs + row_len].copy_from_slice(&src[ofs..ofs + row_len]);
                    ofs += pitch;
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::delaymap::MAX_DELAY;

    /// Frame whose every pixel encodes (tag, x, y) so copies can be traced.
    fn tagged(tag: u32, w: usize, h: usize) -> Vec<u32> {
        (0..h)
            .flat_map(|y| (0..w).map(move |x| (tag << 16) | ((y as u32) << 8) | x as u32))
            .collect()
    }

    #[test]
    fn starts_in_horizontal_mode_with_block_two() {
        let fx = DelayGrab::with_seed(8, 6, 1).unwrap();
        assert_eq!(fx.mode(), Mode::HorizontalStripes);
        assert_eq!(fx.block_size(), 2);
        assert_eq!(fx.delay_map().len(), 12);
    }

    #[test]
    fn zero_map_copies_input_through() {
        let (w, h) = (10, 7); // block 2: 5x3 map; last row is a remainder
        let mut fx = DelayGrab::with_seed(w, h, 0).unwrap();
        fx.map = DelayMap::uniform(&fx.blocks, 0).unwrap();

        let input = tagged(1, w, h);
        let mut output = vec![0xDEAD_BEEF; w * h];
        fx.update(0.0, &input, &mut output).unwrap();

        for y in 0..h {
            for x in 0..w {
                let i = y * w + x;
                if y < 6 {
                    assert_eq!(output[i], input[i], "({x},{y})");
                } else {
                    assert_eq!(output[i], 0xDEAD_BEEF, "remainder ({x},{y}) was touched");
                }
            }
        }
    }

    #[test]
    fn edge_remainder_columns_are_preserved() {
        let (w, h) = (7, 4); // block 2: 3x2 map, column 6 is a remainder
        let mut fx = DelayGrab::with_seed(w, h, 0).unwrap();
        let input = tagged(3, w, h);
        let mut output = vec![42; w * h];
        fx.update(0.0, &input, &mut output).unwrap();
        for y in 0..h {
            assert_eq!(output[y * w + 6], 42);
        }
    }

    #[test]
    fn blocks_come_from_the_frame_their_delay_names() {
        let (w, h) = (8, 4); // block 2: 4x2 map
        let mut fx = DelayGrab::with_seed(w, h, 0).unwrap();
        // Delay = column index: block column k shows the frame k pushes back.
        let cells: Vec<u32> = (0..2).flat_map(|_| 0..4u32).collect();
        fx.map = DelayMap::from_cells_for_test(&fx.blocks, cells);

        let mut output = vec![0; w * h];
        for tag in 1..=5 {
            fx.update(0.0, &tagged(tag, w, h), &mut output).unwrap();
        }
        for y in 0..h {
            for x in 0..w {
                let want_tag = 5 - (x / 2) as u32;
                let got = output[y * w + x];
                assert_eq!(got >> 16, want_tag, "({x},{y})");
                // Same position inside the source frame.
                assert_eq!(got & 0xFFFF, ((y as u32) << 8) | x as u32);
            }
        }
    }

    #[test]
    fn cold_start_delays_read_black() {
        let (w, h) = (4, 4);
        let mut fx = DelayGrab::with_seed(w, h, 0).unwrap();
        fx.map = DelayMap::uniform(&fx.blocks, MAX_DELAY).unwrap();
        let mut output = vec![7; w * h];
        fx.update(0.0, &tagged(1, w, h), &mut output).unwrap();
        assert!(output.iter().all(|&p| p == 0));

        // After a full ring of pushes the oldest frame is the first real one.
        for tag in 2..=RING_DEPTH as u32 {
            fx.update(0.0, &tagged(tag, w, h), &mut output).unwrap();
        }
        assert!(output.iter().all(|&p| p >> 16 == 1));
    }

    #[test]
    fn wrong_sizes_are_rejected_before_anything_changes() {
        let mut fx = DelayGrab::with_seed(4, 4, 0).unwrap();
        let mut output = vec![5; 16];
        let err = fx.update(0.0, &[0; 15], &mut output).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
        assert_eq!(fx.ring().pushed(), 0);
        assert!(output.iter().all(|&p| p == 5));

        let mut short = vec![5; 15];
        assert!(fx.update(0.0, &[0; 16], &mut short).is_err());
        assert_eq!(fx.ring().pushed(), 0);
    }

    #[test]
    fn growing_block_to_frame_size_leaves_one_cell() {
        let mut fx = DelayGrab::with_seed(4, 4, 0).unwrap();
        assert_eq!(fx.delay_map().len(), 4);
        fx.set_block_size(4).unwrap();
        let b = fx.blocks();
        assert_eq!((b.map_width, b.map_height), (1, 1));
        assert_eq!(fx.delay_map().len(), 1);
    }

    #[test]
    fn oversized_block_makes_update_a_no_op_on_output() {
        let mut fx = DelayGrab::with_seed(4, 4, 0).unwrap();
        fx.set_block_size(9).unwrap();
        assert!(fx.delay_map().is_empty());
        let mut output = vec![3; 16];
        fx.update(0.0, &tagged(1, 4, 4), &mut output).unwrap();
        assert!(output.iter().all(|&p| p == 3));
        assert_eq!(fx.ring().pushed(), 1);
    }

    #[test]
    fn set_mode_keeps_block_layout() {
        let mut fx = DelayGrab::with_seed(32, 16, 3).unwrap();
        fx.set_block_size(4).unwrap();
        fx.set_mode(Mode::RadialRings).unwrap();
        assert_eq!(fx.block_size(), 4);
        assert_eq!(fx.delay_map().len(), 8 * 4);
        assert_eq!(fx.delay_map().get(4, 2), 0);
    }

    #[test]
    fn commands_step_within_limits() {
        let mut fx = DelayGrab::with_seed(6, 4, 0).unwrap();
        assert!(fx.apply(Command::NextMode).unwrap());
        assert_eq!(fx.mode(), Mode::RadialRings);
        assert!(!fx.apply(Command::NextMode).unwrap());

        for _ in 0..3 {
            fx.apply(Command::PrevMode).unwrap();
        }
        assert_eq!(fx.mode(), Mode::RandomSquare);
        assert!(!fx.apply(Command::PrevMode).unwrap());

        assert!(!fx.apply(Command::ShrinkBlock).unwrap());
        assert_eq!(fx.block_size(), 2);
        assert!(fx.apply(Command::GrowBlock).unwrap());
        assert!(fx.apply(Command::GrowBlock).unwrap());
        assert_eq!(fx.block_size(), 4);
        assert!(!fx.apply(Command::GrowBlock).unwrap());
        assert!(fx.apply(Command::ShrinkBlock).unwrap());
        assert_eq!(fx.block_size(), 3);

        assert!(fx.apply(Command::Reseed).unwrap());
        assert_eq!(fx.mode(), Mode::RandomSquare);
    }

    #[test]
    fn reseed_with_fixed_seed_rebuilds_the_same_random_map() {
        let mut fx = DelayGrab::with_seed(64, 64, 77).unwrap();
        fx.set_mode(Mode::RandomSquare).unwrap();
        let before = fx.delay_map().clone();
        fx.apply(Command::Reseed).unwrap();
        assert_eq!(fx.delay_map(), &before);
    }
}
