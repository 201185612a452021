#[cfg(feature = "rtrb")]
use rtrb::Consumer;

use crate::synth::params::SynthParams;

/// Control input for the voice, applied at the next block boundary.
#[derive(Debug, Copy, Clone)]
pub enum SynthMessage {
    NoteOn { note: u8, velocity: u8 },
    NoteOff { note: u8, velocity: u8 },
    /// Raw 14-bit wheel value, 8192 is centre.
    PitchBend { value: u16 },
    ControlChange { controller: u8, value: u8 },
    Params(SynthParams),
    AllNotesOff,
}

pub trait MessageReceiver {
    fn pop(&mut self) -> Option<SynthMessage>;
}

#[cfg(feature = "rtrb")]
impl MessageReceiver for Consumer<SynthMessage> {
    fn pop(&mut self) -> Option<SynthMessage> {
        Consumer::pop(self).ok()
    }
}
