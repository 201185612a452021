use std::f32::consts::TAU;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/*
Oscillator Bank Contract
========================

The signal path does not care how a waveform is produced. It drives each
oscillator of the bank through four calls, once per sample per voice:

    set_sample_rate(rate)   at setup
    set_mode(waveform)      once per block
    set_frequency(hz)       every sample (glide and vibrato move it)
    next_sample()           every sample

`PolyBlepOscillator` is the default implementation. Anything else that can
honour the contract (wavetables, BLIT, a test stub) can be plugged in.


PolyBLEP in One Paragraph
-------------------------

A naive sawtooth jumps from +1 to -1 in a single sample. That step contains
energy far above Nyquist, which folds back as inharmonic aliasing. PolyBLEP
subtracts a two-sample polynomial approximation of a band-limited step
around every discontinuity:

    t < dt          (just after the jump)   2t' - t'^2 - 1,   t' = t / dt
    t > 1 - dt      (just before the jump)  t'^2 + 2t' + 1,   t' = (t - 1) / dt

where t is the phase in [0, 1) and dt = frequency / sample_rate. The sine
has no discontinuity and needs no correction.
*/

/// Waveform family of an oscillator voice. The discriminant is the slider index.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OscillatorWaveform {
    Sine = 0,
    #[default]
    Saw = 1,
    Square = 2,
}

/// What the signal path needs from one oscillator of the bank.
pub trait Oscillator: Send {
    fn set_sample_rate(&mut self, sample_rate: f32);

    fn set_frequency(&mut self, frequency: f32);

    fn set_mode(&mut self, waveform: OscillatorWaveform);

    /// Produce the next sample, roughly within [-1, 1].
    fn next_sample(&mut self) -> f32;

    /// Restart from phase zero.
    fn reset(&mut self) {}
}

pub struct PolyBlepOscillator {
    waveform: OscillatorWaveform,
    sample_rate: f32,
    frequency: f32,
    phase: f32,     // 0.0 - 1.0
    phase_inc: f32, // frequency / sample_rate, kept below 0.5
}

impl PolyBlepOscillator {
    pub fn new(sample_rate: f32, waveform: OscillatorWaveform) -> Self {
        let mut osc = Self {
            waveform,
            sample_rate,
            frequency: 440.0,
            phase: 0.0,
            phase_inc: 0.0,
        };
        osc.update_increment();
        osc
    }

    pub fn waveform(&self) -> OscillatorWaveform {
        self.waveform
    }

    pub fn frequency(&self) -> f32 {
        self.frequency
    }

    fn update_increment(&mut self) {
        self.phase_inc = (self.frequency / self.sample_rate).clamp(0.0, 0.499);
    }

    #[inline]
    fn poly_blep(&self, t: f32) -> f32 {
        let dt = self.phase_inc;
        if dt <= 0.0 {
            return 0.0;
        }

        if t < dt {
            let t = t / dt;
            t + t - t * t - 1.0
        } else if t > 1.0 - dt {
            let t = (t - 1.0) / dt;
            t * t + t + t + 1.0
        } else {
            0.0
        }
    }
}

impl Oscillator for PolyBlepOscillator {
    fn set_sample_rate(&mut self, sample_rate: f32) {
        debug_assert!(sample_rate > 0.0);
        self.sample_rate = sample_rate;
        self.update_increment();
    }

    fn set_frequency(&mut self, frequency: f32) {
        self.frequency = frequency;
        self.update_increment();
    }

    fn set_mode(&mut self, waveform: OscillatorWaveform) {
        self.waveform = waveform;
    }

    #[inline]
    fn next_sample(&mut self) -> f32 {
        let t = self.phase;

        let value = match self.waveform {
            OscillatorWaveform::Sine => (TAU * t).sin(),
            OscillatorWaveform::Saw => (2.0 * t - 1.0) - self.poly_blep(t),
            OscillatorWaveform::Square => {
                let naive = if t < 0.5 { 1.0 } else { -1.0 };
                naive + self.poly_blep(t) - self.poly_blep((t + 0.5).fract())
            }
        };

        self.phase += self.phase_inc;
        if self.phase >= 1.0 {
            self.phase -= 1.0;
        }

        value
    }

    fn reset(&mut self) {
        self.phase = 0.0;
    }
}
