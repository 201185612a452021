//! Sine LFO used for vibrato.

use std::f32::consts::TAU;

/*
Vibrato
=======

An LFO is an oscillator running below the audio band, ~1 to 10 Hz here. Its
bipolar output (-1.0 to +1.0) wobbles the oscillator frequency:

    frequency' = frequency + depth * frequency * lfo

With the mod wheel mapped to depth 0.0 - 0.05 the swing tops out at ±5%,
a little under a semitone. Scaling by the frequency itself keeps the
vibrato the same width in cents for every note.

The LFO is free-running: it does not restart on note-on, and it only
advances while the voice is sounding.
*/

pub struct Lfo {
    sample_rate: f32,
    frequency: f32,
    phase: f32, // 0.0 - 1.0
}

impl Lfo {
    pub fn new(sample_rate: f32, frequency: f32) -> Self {
        debug_assert!(sample_rate > 0.0);
        Self {
            sample_rate,
            frequency,
            phase: 0.0,
        }
    }

    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        debug_assert!(sample_rate > 0.0);
        self.sample_rate = sample_rate;
    }

    pub fn set_frequency(&mut self, frequency: f32) {
        self.frequency = frequency.max(0.0);
    }

    pub fn frequency(&self) -> f32 {
        self.frequency
    }

    /// Advance one sample and return the bipolar output.
    #[inline]
    pub fn next_sample(&mut self) -> f32 {
        let value = (TAU * self.phase).sin();

        self.phase += self.frequency / self.sample_rate;
        self.phase -= self.phase.floor();

        value
    }

    pub fn reset(&mut self) {
        self.phase = 0.0;
    }
}

/// Apply vibrato to a frequency.
#[inline]
pub fn vibrato(frequency: f32, depth: f32, lfo: f32) -> f32 {
    frequency + depth * frequency * lfo
}
