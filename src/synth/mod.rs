// Purpose: note priority, glide, and the per-sample voice signal path.
// This layer sits above the dsp primitives and owns one complete voice.

pub mod controller;
pub mod message;
pub mod mono;
pub mod params;
pub mod voice;

pub use controller::{calculate_frequency, Gate, VoiceController};
pub use message::{MessageReceiver, SynthMessage};
pub use mono::MonoSynth;
pub use params::{EnvelopeParams, SynthParams};
pub use voice::MonoVoice;
