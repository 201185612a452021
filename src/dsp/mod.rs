//! Low-level DSP primitives used by the voice.
//!
//! These components are allocation-free and realtime-safe, making them safe to
//! embed directly inside voice structs. They stay focused on the
//! signal-processing math; note handling and routing live in `synth`.

/// Attack/decay/sustain/release envelope generator.
pub mod envelope;
/// Four-pole nonlinear ladder low-pass filter.
pub mod ladder;
/// Vibrato LFO.
pub mod lfo;
/// Oscillator-bank contract and the PolyBLEP default.
pub mod oscillator;

pub use envelope::{Envelope, EnvelopeState};
pub use ladder::LadderFilter;
pub use lfo::Lfo;
pub use oscillator::{Oscillator, OscillatorWaveform, PolyBlepOscillator};
