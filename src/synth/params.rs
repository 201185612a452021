#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{dsp::oscillator::OscillatorWaveform, error::SynthError};

/// Mod wheel depth at full travel.
pub const MAX_VIBRATO_DEPTH: f32 = 0.05;

/// Times and level for one ADSR.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnvelopeParams {
    pub attack: f32,  // seconds
    pub decay: f32,   // seconds
    pub sustain: f32, // 0.0 - 1.0
    pub release: f32, // seconds
}

impl EnvelopeParams {
    pub const fn new(attack: f32, decay: f32, sustain: f32, release: f32) -> Self {
        Self {
            attack,
            decay,
            sustain,
            release,
        }
    }
}

impl Default for EnvelopeParams {
    fn default() -> Self {
        Self::new(0.01, 0.05, 0.3, 0.2)
    }
}

/// Everything the player can adjust between blocks.
///
/// Defaults match the instrument front panel. Values are
/// taken as-is by the voice; run [`SynthParams::validate`] on anything that
/// comes from outside.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SynthParams {
    /// Relative detune of oscillators 2 and 3, ±fraction of the frequency.
    pub oscillator_detune: f32,
    pub oscillator_modes: [OscillatorWaveform; 3],

    pub amp_envelope: EnvelopeParams,

    pub filter_cutoff: f32,   // Hz, baseline before envelope and tracking
    pub filter_contour: f32,  // Hz added at full filter-envelope level
    pub filter_q: f32,        // 0.0 - 4.0
    pub filter_tracking: f32, // fraction of the note frequency added to cutoff
    pub filter_drive: f32,
    pub filter_envelope: EnvelopeParams,

    pub vibrato_rate: f32, // Hz
    pub portamento_time: f32, // seconds
}

impl Default for SynthParams {
    fn default() -> Self {
        Self {
            oscillator_detune: 0.002,
            oscillator_modes: [OscillatorWaveform::Saw; 3],
            amp_envelope: EnvelopeParams::new(0.01, 0.05, 0.3, 0.2),
            filter_cutoff: 1_000.0,
            filter_contour: 2_000.0,
            filter_q: 0.0,
            filter_tracking: 0.33,
            filter_drive: 1.0,
            filter_envelope: EnvelopeParams::new(0.03, 0.2, 0.3, 0.2),
            vibrato_rate: 5.0,
            portamento_time: 0.001,
        }
    }
}

fn check(name: &'static str, value: f32, min: f32, max: f32) -> Result<(), SynthError> {
    if value >= min && value <= max {
        Ok(())
    } else {
        Err(SynthError::ParameterOutOfRange {
            name,
            value,
            min,
            max,
        })
    }
}

impl SynthParams {
    /// Check every field against the panel ranges.
    pub fn validate(&self) -> Result<(), SynthError> {
        check("oscillator_detune", self.oscillator_detune, 0.0, 0.01)?;

        let amp = &self.amp_envelope;
        check("amp_envelope.attack", amp.attack, 0.001, 0.1)?;
        check("amp_envelope.decay", amp.decay, 0.01, 0.3)?;
        check("amp_envelope.sustain", amp.sustain, 0.0, 1.0)?;
        check("amp_envelope.release", amp.release, 0.001, 2.0)?;

        check("filter_cutoff", self.filter_cutoff, 50.0, 5_000.0)?;
        check("filter_contour", self.filter_contour, 0.0, 5_000.0)?;
        check("filter_q", self.filter_q, 0.0, 4.0)?;
        check("filter_tracking", self.filter_tracking, 0.0, 1.0)?;
        check("filter_drive", self.filter_drive, 0.1, 5.0)?;

        let filt = &self.filter_envelope;
        check("filter_envelope.attack", filt.attack, 0.001, 0.2)?;
        check("filter_envelope.decay", filt.decay, 0.01, 1.0)?;
        check("filter_envelope.sustain", filt.sustain, 0.0, 1.0)?;
        check("filter_envelope.release", filt.release, 0.001, 2.0)?;

        check("vibrato_rate", self.vibrato_rate, 1.0, 10.0)?;
        check("portamento_time", self.portamento_time, 0.001, 0.3)?;

        Ok(())
    }

    /// Parse a JSON patch, filling missing fields with defaults, and validate it.
    #[cfg(feature = "serde")]
    pub fn from_json(json: &str) -> Result<Self, SynthError> {
        let params: Self = serde_json::from_str(json)?;
        if let Err(err) = params.validate() {
            log::warn!("rejecting synth parameters: {err}");
            return Err(err);
        }
        log::debug!("loaded synth parameters: {params:?}");
        Ok(params)
    }
}

/// Map a 7-bit mod wheel value to vibrato depth.
#[inline]
pub fn mod_wheel_depth(value: u8) -> f32 {
    f32::from(value.min(127)) / 127.0 * MAX_VIBRATO_DEPTH
}
