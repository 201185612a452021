pub mod dsp; // Envelope, ladder filter, oscillators
pub mod error;
pub mod io;
pub mod synth; // Note priority, glide and the per-sample signal path

pub use error::SynthError;

pub const MAX_BLOCK_SIZE: usize = 2048;
pub(crate) const MIN_TIME: f32 = 1.0 / 48_000.0;
