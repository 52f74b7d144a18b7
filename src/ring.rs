// Frame history: the last RING_DEPTH input frames, newest first by age.

use log::warn;

use crate::error::{Error, Result};
use crate::geometry::Geometry;

/// Number of frames kept. Also the number of distinct delays a block can have.
pub const RING_DEPTH: usize = 71;

/// Fixed-depth circular store of whole frames.
///
/// All slots are allocated and zero-filled up front. Until `RING_DEPTH`
/// frames have been pushed, ages past the number of pushes read those zero
/// (black) slots; blocks with long delays show black for the first couple of
/// seconds after start-up.
pub struct FrameRing {
    slots: Vec<Vec<u32>>,
    cursor: usize, // slot holding the newest frame
    pushed: u64,
    frame_len: usize,
}

impl FrameRing {
    pub fn new(geo: &Geometry) -> Result<Self> {
        let frame_len = geo.frame_len();
        let mut slots = Vec::new();
        slots.try_reserve_exact(RING_DEPTH)?;
        for _ in 0..RING_DEPTH {
            let mut slot = Vec::new();
            slot.try_reserve_exact(frame_len)?;
            slot.resize(frame_len, 0u32);
            slots.push(slot);
        }
        Ok(Self {
            slots,
            // First push lands in slot 0.
            cursor: RING_DEPTH - 1,
            pushed: 0,
            frame_len,
        })
    }

    /// Copy `frame` into the next slot, overwriting the oldest frame.
    pub fn push(&mut self, frame: &[u32]) -> Result<()> {
        if frame.len() != self.frame_len {
            warn!("ring: rejected frame of {} pixels (want {})", frame.len(), self.frame_len);
            return Err(Error::invalid_argument(format!(
                "frame is {} pixels, ring holds {}-pixel frames",
                frame.len(),
                self.frame_len
            )));
        }
        self.cursor = (self.cursor + 1) % RING_DEPTH;
        self.slots[self.cursor].copy_from_slice(frame);
        self.pushed += 1;
        Ok(())
    }

    #[inline]
    fn slot_for_age(&self, age: usize) -> usize {
        (self.cursor + RING_DEPTH - age % RING_DEPTH) % RING_DEPTH
    }

    /// The frame pushed `age` pushes ago; age 0 is the newest.
    /// Ages wrap modulo `RING_DEPTH`.
    #[inline]
    pub fn frame_at_age(&self, age: usize) -> &[u32] {
        &self.slots[self.slot_for_age(age)]
    }

    /// How many slots hold a real frame (saturates at `RING_DEPTH`).
    pub fn filled(&self) -> usize {
        self.pushed.min(RING_DEPTH as u64) as usize
    }

    pub fn pushed(&self) -> u64 {
        self.pushed
    }
}
