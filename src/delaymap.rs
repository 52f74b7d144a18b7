// Delay map: how many frames back each block is taken from.
// Built once per mode/block-size change, read once per block per frame.

use std::time::{SystemTime, UNIX_EPOCH};

use log::debug;

use crate::error::Result;
use crate::geometry::BlockConfig;
use crate::isqrt::isqrt;
use crate::ring::RING_DEPTH;

/// Largest delay a cell may hold.
pub const MAX_DELAY: u32 = (RING_DEPTH - 1) as u32;

/// Spatial pattern used to fill the delay map.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "app", derive(clap::ValueEnum))]
pub enum Mode {
    /// Random delay per block, squared so short delays dominate.
    #[cfg_attr(feature = "app", value(name = "random"))]
    RandomSquare,
    /// Delay grows with distance from the center column.
    #[cfg_attr(feature = "app", value(name = "vertical"))]
    VerticalStripes,
    /// Delay grows with distance from the center row.
    #[default]
    #[cfg_attr(feature = "app", value(name = "horizontal"))]
    HorizontalStripes,
    /// Delay grows with distance from the center point.
    #[cfg_attr(feature = "app", value(name = "radial"))]
    RadialRings,
}

impl Mode {
    pub const ALL: [Mode; 4] = [
        Mode::RandomSquare,
        Mode::VerticalStripes,
        Mode::HorizontalStripes,
        Mode::RadialRings,
    ];

    /// 1-based position, as shown to the user.
    pub fn number(self) -> usize {
        match self {
            Mode::RandomSquare => 1,
            Mode::VerticalStripes => 2,
            Mode::HorizontalStripes => 3,
            Mode::RadialRings => 4,
        }
    }

    pub fn from_number(n: usize) -> Option<Mode> {
        n.checked_sub(1).and_then(|i| Mode::ALL.get(i).copied())
    }

    /// Following mode; `None` past the last one (no wrap).
    pub fn next(self) -> Option<Mode> {
        Mode::from_number(self.number() + 1)
    }

    /// Preceding mode; `None` before the first one (no wrap).
    pub fn prev(self) -> Option<Mode> {
        Mode::from_number(self.number() - 1)
    }

    pub fn name(self) -> &'static str {
        match self {
            Mode::RandomSquare => "RANDOM",
            Mode::VerticalStripes => "VERTICAL",
            Mode::HorizontalStripes => "HORIZONTAL",
            Mode::RadialRings => "RADIAL",
        }
    }
}

/// Linear congruential generator (the classic 1103515245/12345 pair).
/// Cheap and good enough for a per-block random pattern.
#[derive(Clone, Debug)]
pub struct Lcg {
    state: u32,
}

impl Lcg {
    pub fn from_seed(seed: u32) -> Self {
        Self { state: seed }
    }

    #[inline]
    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(1_103_515_245).wrapping_add(12_345);
        self.state
    }
}

/// Where the generator takes its seed from at each regeneration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SeedSource {
    /// Wall clock (seconds mixed with nanoseconds) plus a per-generation
    /// step, so back-to-back regenerations get different seeds.
    Clock,
    /// Same seed every time; maps are reproducible.
    Fixed(u32),
}

impl SeedSource {
    fn seed(self, generation: u32) -> u32 {
        match self {
            SeedSource::Fixed(seed) => seed,
            SeedSource::Clock => {
                let now = SystemTime::now()
                    .duration_since(UNIX_EPOCH)
                    .map(|d| d.as_secs() as u32 ^ d.subsec_nanos())
                    .unwrap_or(0);
                now.wrapping_add(generation.wrapping_mul(0x9E37_79B9))
            }
        }
    }
}

/// Row-major grid of delays, one per block, each in `0..=MAX_DELAY`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DelayMap {
    width: usize,
    height: usize,
    cells: Vec<u32>,
}

impl DelayMap {
    /// Map with every cell set to `delay` (clamped).
    #[cfg(test)]
    pub(crate) fn uniform(cfg: &BlockConfig, delay: u32) -> Result<Self> {
        let mut cells = Vec::new();
        cells.try_reserve_exact(cfg.cell_count)?;
        cells.resize(cfg.cell_count, delay.min(MAX_DELAY));
        Ok(Self { width: cfg.map_width, height: cfg.map_height, cells })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> u32 {
        self.cells[y * self.width + x]
    }

    pub fn cells(&self) -> &[u32] {
        &self.cells
    }

    #[cfg(test)]
    pub(crate) fn from_cells_for_test(cfg: &BlockConfig, cells: Vec<u32>) -> Self {
        assert_eq!(cells.len(), cfg.cell_count);
        Self { width: cfg.map_width, height: cfg.map_height, cells }
    }
}

/// Fold a raw pattern value into the ring's age range.
#[inline]
fn clamp_delay(v: i64) -> u32 {
    v.clamp(0, MAX_DELAY as i64) as u32
}

/// Builds delay maps. Owns the RNG used by `Mode::RandomSquare`.
#[derive(Clone, Debug)]
pub struct DelayMapGenerator {
    rng: Lcg,
    seed: SeedSource,
    generation: u32, // maps built so far
}

impl Default for DelayMapGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl DelayMapGenerator {
    /// Reseeds from the wall clock on every `generate`.
    pub fn new() -> Self {
        Self { rng: Lcg::from_seed(0), seed: SeedSource::Clock, generation: 0 }
    }

    /// Reseeds with `seed` on every `generate`, so output is deterministic.
    pub fn with_seed(seed: u32) -> Self {
        Self { rng: Lcg::from_seed(seed), seed: SeedSource::Fixed(seed), generation: 0 }
    }

    /// Fill a fresh map for `cfg` under `mode`.
    pub fn generate(&mut self, mode: Mode, cfg: &BlockConfig) -> Result<DelayMap> {
        let mut cells = Vec::new();
        cells.try_reserve_exact(cfg.cell_count)?;

        let seed = self.seed.seed(self.generation);
        self.generation = self.generation.wrapping_add(1);
        self.rng = Lcg::from_seed(seed);

        let cx = (cfg.map_width / 2) as i64;
        let cy = (cfg.map_height / 2) as i64;

        for y in 0..cfg.map_height as i64 {
            for x in 0..cfg.map_width as i64 {
                let raw = match mode {
                    Mode::RandomSquare => {
                        // d in [0, 2): the LCG spans u32 but is scaled as if capped at i32::MAX
                        let d = self.rng.next_u32() as f64 / i32::MAX as f64;
                        (d * d * 16.0) as i64
                    }
                    Mode::VerticalStripes => (x - cx).abs() / 2,
                    Mode::HorizontalStripes => (y - cy).abs() / 2,
                    Mode::RadialRings => {
                        let (dx, dy) = (x - cx, y - cy);
                        let dist2 = (dx * dx + dy * dy).min(u32::MAX as i64) as u32;
                        isqrt(dist2) as i64 / 2
                    }
                };
                cells.push(clamp_delay(raw));
            }
        }

        debug!(
            "delay map: mode={:?} {}x{} cells, seed={}",
            mode, cfg.map_width, cfg.map_height, seed
        );

        Ok(DelayMap { width: cfg.map_width, height: cfg.map_height, cells })
    }
}
