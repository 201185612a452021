use crate::{
    dsp::{
        envelope::Envelope,
        ladder::LadderFilter,
        lfo::{vibrato, Lfo},
        oscillator::{Oscillator, PolyBlepOscillator},
    },
    error::{check_sample_rate, SynthError},
    synth::{
        controller::{Gate, VoiceController},
        params::{mod_wheel_depth, EnvelopeParams, SynthParams},
    },
};

/*
Signal Path
===========

One monophonic voice, evaluated sample by sample:

    controller ─→ glide ─→ vibrato ─→ osc bank (3, detuned) ─→ average
                                                                  │
    filter env ─→ cutoff = base + contour·env + tracking·note     │
                      │                                           ↓
                      └─────────────────────────────────→ ladder filter
                                                                  │
    amp env ─────────────────────────────────────────────→ × 0.5·env ─→ out

While the amplitude envelope is Off the voice outputs exact zeros and
nothing advances: no glide, no envelopes, no oscillator phase, no LFO.

Ordering contract: note events and parameter changes are applied between
blocks. Everything in here is allocation-free and never blocks.
*/

/// Oscillators in the bank.
pub const NUM_OSCILLATORS: usize = 3;
/// Fixed output gain after the amplitude envelope.
pub const OUTPUT_GAIN: f32 = 0.5;
/// Mod wheel controller number.
pub const CC_MOD_WHEEL: u8 = 1;
/// "All notes off" channel-mode controller number.
pub const CC_ALL_NOTES_OFF: u8 = 123;

pub struct MonoVoice<O: Oscillator = PolyBlepOscillator> {
    sample_rate: f32,

    controller: VoiceController,
    oscillators: [O; NUM_OSCILLATORS],
    vibrato_lfo: Lfo,
    vibrato_depth: f32,

    amp_envelope: Envelope,
    filter_envelope: Envelope,
    filter: LadderFilter,

    params: SynthParams,
    applied_q: Option<f32>, // last Q pushed into the ladder
}

impl MonoVoice<PolyBlepOscillator> {
    /// A voice with the built-in PolyBLEP oscillator bank.
    pub fn new(sample_rate: f32, params: SynthParams) -> Result<Self, SynthError> {
        let sample_rate = check_sample_rate(sample_rate)?;
        let oscillators = params
            .oscillator_modes
            .map(|mode| PolyBlepOscillator::new(sample_rate, mode));
        Self::with_oscillators(sample_rate, params, oscillators)
    }
}

impl<O: Oscillator> MonoVoice<O> {
    /// A voice driving a caller-supplied oscillator bank.
    pub fn with_oscillators(
        sample_rate: f32,
        params: SynthParams,
        mut oscillators: [O; NUM_OSCILLATORS],
    ) -> Result<Self, SynthError> {
        let sample_rate = check_sample_rate(sample_rate)?;

        for osc in oscillators.iter_mut() {
            osc.set_sample_rate(sample_rate);
        }

        let mut voice = Self {
            sample_rate,
            controller: VoiceController::new(sample_rate),
            oscillators,
            vibrato_lfo: Lfo::new(sample_rate, params.vibrato_rate),
            vibrato_depth: 0.0,
            amp_envelope: Envelope::new(sample_rate),
            filter_envelope: Envelope::new(sample_rate),
            filter: LadderFilter::new(sample_rate),
            params,
            applied_q: None,
        };
        voice.set_params(&params);

        log::debug!("mono voice ready at {sample_rate} Hz");
        Ok(voice)
    }

    /// Change the sample rate of every component. Setup-time only: the voice
    /// falls silent and every phase and filter memory restarts from zero.
    pub fn set_sample_rate(&mut self, sample_rate: f32) -> Result<(), SynthError> {
        let sample_rate = check_sample_rate(sample_rate)?;
        self.sample_rate = sample_rate;

        self.controller.set_sample_rate(sample_rate);
        self.controller.all_notes_off();
        for osc in self.oscillators.iter_mut() {
            osc.set_sample_rate(sample_rate);
            osc.reset();
        }
        self.vibrato_lfo.set_sample_rate(sample_rate);
        self.vibrato_lfo.reset();
        self.amp_envelope.set_sample_rate(sample_rate);
        self.amp_envelope.reset();
        self.filter_envelope.set_sample_rate(sample_rate);
        self.filter_envelope.reset();
        self.filter.set_sample_rate(sample_rate);
        self.filter.reset();

        log::debug!("mono voice sample rate changed to {sample_rate} Hz");
        Ok(())
    }

    /// Apply a parameter snapshot. Call between blocks.
    pub fn set_params(&mut self, params: &SynthParams) {
        self.params = *params;

        apply_envelope(&mut self.amp_envelope, &params.amp_envelope);
        apply_envelope(&mut self.filter_envelope, &params.filter_envelope);

        // The resonance polynomial is the expensive part; skip it when unchanged
        if self.applied_q != Some(params.filter_q) {
            self.filter.set_q(params.filter_q);
            self.applied_q = Some(params.filter_q);
        }
        self.filter.set_drive(params.filter_drive);

        self.vibrato_lfo.set_frequency(params.vibrato_rate);
        self.controller.set_glide_time(params.portamento_time);

        for (osc, &mode) in self.oscillators.iter_mut().zip(&params.oscillator_modes) {
            osc.set_mode(mode);
        }
    }

    pub fn note_on(&mut self, note: u8, velocity: u8) {
        let gate = self.controller.note_on(note, velocity);
        self.apply_gate(gate);
    }

    pub fn note_off(&mut self, note: u8) {
        let gate = self.controller.note_off(note);
        self.apply_gate(gate);
    }

    pub fn all_notes_off(&mut self) {
        let gate = self.controller.all_notes_off();
        self.apply_gate(gate);
    }

    /// Raw 14-bit pitch-wheel value, centre 8192.
    pub fn pitch_wheel(&mut self, raw: u16) {
        self.controller.pitch_wheel(raw);
    }

    /// Mod wheel drives vibrato depth; "all notes off" clears the voice.
    pub fn control_change(&mut self, controller: u8, value: u8) {
        match controller {
            CC_MOD_WHEEL => self.vibrato_depth = mod_wheel_depth(value),
            CC_ALL_NOTES_OFF => self.all_notes_off(),
            _ => {}
        }
    }

    fn apply_gate(&mut self, gate: Gate) {
        match gate {
            Gate::Trigger => {
                self.amp_envelope.trigger();
                self.filter_envelope.trigger();
            }
            Gate::Release => {
                self.amp_envelope.release();
                self.filter_envelope.release();
            }
            Gate::Hold => {}
        }
    }

    /// Generate one output sample.
    #[inline]
    pub fn next_sample(&mut self) -> f32 {
        if !self.amp_envelope.is_active() {
            return 0.0;
        }

        let params = &self.params;

        // Vibrato on both ends of the glide, one LFO step per sample
        let lfo = self.vibrato_lfo.next_sample();
        let start = vibrato(self.controller.previous_frequency(), self.vibrato_depth, lfo);
        let end = vibrato(self.controller.current_frequency(), self.vibrato_depth, lfo);

        let frequency = self.controller.glide_between(start, end);
        self.controller.advance_glide();

        let detune = params.oscillator_detune;
        let [osc_a, osc_b, osc_c] = &mut self.oscillators;
        osc_a.set_frequency(frequency);
        osc_b.set_frequency(frequency * (1.0 + detune));
        osc_c.set_frequency(frequency * (1.0 - detune));

        let mixed = (osc_a.next_sample() + osc_b.next_sample() + osc_c.next_sample())
            / NUM_OSCILLATORS as f32;

        let cutoff = params.filter_cutoff
            + params.filter_contour * self.filter_envelope.next_value()
            + params.filter_tracking * self.controller.current_frequency();
        self.filter.set_frequency(cutoff);

        let filtered = self.filter.process(mixed);

        filtered * OUTPUT_GAIN * self.amp_envelope.next_value()
    }

    /// Render a block of mono samples.
    pub fn render_block(&mut self, out: &mut [f32]) {
        for sample in out.iter_mut() {
            *sample = self.next_sample();
        }
    }

    /// True while the amplitude envelope is sounding.
    pub fn is_active(&self) -> bool {
        self.amp_envelope.is_active()
    }

    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    pub fn params(&self) -> &SynthParams {
        &self.params
    }

    pub fn vibrato_depth(&self) -> f32 {
        self.vibrato_depth
    }

    pub fn controller(&self) -> &VoiceController {
        &self.controller
    }

    pub fn amp_envelope(&self) -> &Envelope {
        &self.amp_envelope
    }

    pub fn filter_envelope(&self) -> &Envelope {
        &self.filter_envelope
    }

    pub fn filter(&self) -> &LadderFilter {
        &self.filter
    }
}

fn apply_envelope(env: &mut Envelope, params: &EnvelopeParams) {
    env.set_attack(params.attack);
    env.set_decay(params.decay);
    env.set_sustain(params.sustain);
    env.set_release(params.release);
}
