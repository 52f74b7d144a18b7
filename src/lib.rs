//! Time-echo video effect ("delaygrab").
//!
//! Each block of the output frame is copied from a frame that arrived some
//! number of frames earlier. How far back depends on where the block sits,
//! following one of four patterns (random, vertical stripes, horizontal
//! stripes, radial rings). The last [`RING_DEPTH`] input frames are kept.
//!
//! ```no_run
//! use delaygrab::{DelayGrab, Mode};
//!
//! let (w, h) = (640, 480);
//! let mut fx = DelayGrab::new(w, h)?;
//! fx.set_mode(Mode::RadialRings)?;
//!
//! let input = vec![0u32; w * h];
//! let mut output = vec![0u32; w * h];
//! fx.update(0.0, &input, &mut output)?;
//! # Ok::<(), delaygrab::Error>(())
//! ```

pub mod delaygrab;
pub mod delaymap;
pub mod error;
pub mod geometry;
pub mod isqrt;
pub mod ring;
pub mod snapshot;
pub mod types;

pub use delaygrab::{Command, DelayGrab};
pub use delaymap::{DelayMap, DelayMapGenerator, MAX_DELAY, Mode};
pub use error::{Error, Result};
pub use geometry::{BlockConfig, Geometry};
pub use isqrt::isqrt;
pub use ring::{FrameRing, RING_DEPTH};
pub use types::FrameBuffer;
