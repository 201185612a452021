//! Real-world scenario benchmarks.
//!
//! These drive the complete mono voice the way a player would.

mod voice;

pub use voice::bench_voice;
