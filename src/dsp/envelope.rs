use crate::MIN_TIME;

/*
ADSR Envelope Generator
=======================

A linear ADSR state machine. One instance shapes the amplitude of the voice,
a second one sweeps the ladder filter's cutoff.

Vocabulary
----------

  level       Current output value, 0.0 to 1.0. Continuous: it never jumps,
              except back to 0.0 when the envelope is reset.

  state       Off, Attack, Decay, Sustain or Release.

  ramp        Start level, target level and length in samples of the stage
              in progress. Snapshotted once when a stage is entered.


Interpolating, Not Accumulating
-------------------------------

Every ramped stage computes its level from the elapsed sample count:

    level = start + (target - start) * elapsed / total

The ramp lands on its target on exactly sample `total`, where
total = round(time * sample_rate).


Retriggering
------------

`trigger()` may arrive at any time, including halfway through a release.
The attack always ramps from the CURRENT level to 1.0 over `attack_time`.
Starting from zero instead would snap the level down and click.

    Level
      1.0 ┐      ╱╲            ╱╲
          │     ╱  ╲_____     ╱  ╲___
      S   │    ╱          ╲  ╱
          │   ╱            ╲╱  <- retrigger during release
      0.0 └──╱──────────────────────────→ Time


The State Machine
-----------------

    Off ──trigger──→ Attack ──ramp done──→ Decay ──ramp done──→ Sustain
     ↑                  │                     │                    │
     │                  └───────release───────┴────────────────────┘
     │                                        ↓
     └───────────────ramp done─────────── Release

`release()` from Off does nothing. Sustain never leaves on its own. A decay
that starts at or below the sustain level goes straight to Sustain, and a
release that starts at zero reaches Off on its first sample.
*/

/// The current stage of the envelope state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvelopeState {
    Off,     // Untriggered or fully released, level = 0
    Attack,  // Ramping up to 1.0
    Decay,   // Ramping down to the sustain level
    Sustain, // Holding the sustain level
    Release, // Ramping down to 0
}

pub struct Envelope {
    attack_time: f32,   // seconds
    decay_time: f32,    // seconds
    sustain_level: f32, // 0.0 - 1.0
    release_time: f32,  // seconds
    sample_rate: f32,

    state: EnvelopeState,
    level: f32,

    // Ramp bookkeeping for the stage in progress
    ramp_start: f32,
    ramp_target: f32,
    ramp_total: u32,
    ramp_elapsed: u32,
}

impl Envelope {
    pub fn new(sample_rate: f32) -> Self {
        Self::adsr(sample_rate, 0.01, 0.05, 0.3, 0.2)
    }

    pub fn adsr(sample_rate: f32, attack: f32, decay: f32, sustain: f32, release: f32) -> Self {
        debug_assert!(sample_rate > 0.0);

        Self {
            attack_time: attack.max(MIN_TIME),
            decay_time: decay.max(MIN_TIME),
            sustain_level: sustain.clamp(0.0, 1.0),
            release_time: release.max(MIN_TIME),
            sample_rate,

            state: EnvelopeState::Off,
            level: 0.0,

            ramp_start: 0.0,
            ramp_target: 0.0,
            ramp_total: 1,
            ramp_elapsed: 0,
        }
    }

    /// Only affects stages entered from now on.
    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        debug_assert!(sample_rate > 0.0);
        self.sample_rate = sample_rate;
    }

    pub fn set_attack(&mut self, seconds: f32) {
        self.attack_time = seconds.max(MIN_TIME);
    }

    pub fn set_decay(&mut self, seconds: f32) {
        self.decay_time = seconds.max(MIN_TIME);
    }

    pub fn set_sustain(&mut self, level: f32) {
        self.sustain_level = level.clamp(0.0, 1.0);
    }

    pub fn set_release(&mut self, seconds: f32) {
        self.release_time = seconds.max(MIN_TIME);
    }

    /// Enter Attack from whatever state and level we are in.
    pub fn trigger(&mut self) {
        self.state = EnvelopeState::Attack;
        self.start_ramp(1.0, self.attack_time);
    }

    /// Enter Release from the current level. No-op while Off.
    pub fn release(&mut self) {
        if self.state == EnvelopeState::Off {
            return;
        }

        self.state = EnvelopeState::Release;
        self.start_ramp(0.0, self.release_time);
    }

    fn start_ramp(&mut self, target: f32, seconds: f32) {
        self.ramp_start = self.level;
        self.ramp_target = target;
        self.ramp_total = (seconds * self.sample_rate).round().max(1.0) as u32;
        self.ramp_elapsed = 0;
    }

    /// Step the current ramp. Returns true once it has reached its target.
    fn advance_ramp(&mut self) -> bool {
        self.ramp_elapsed += 1;

        if self.ramp_elapsed >= self.ramp_total {
            self.level = self.ramp_target;
            return true;
        }

        let position = f64::from(self.ramp_elapsed) / f64::from(self.ramp_total);
        let start = f64::from(self.ramp_start);
        let target = f64::from(self.ramp_target);
        self.level = (start + (target - start) * position) as f32;
        false
    }

    fn enter_off(&mut self) {
        self.state = EnvelopeState::Off;
        self.level = 0.0;
        self.ramp_elapsed = 0;
    }

    /// Advance one sample and return the new level.
    pub fn next_value(&mut self) -> f32 {
        match self.state {
            EnvelopeState::Off => {
                self.level = 0.0;
            }

            EnvelopeState::Attack => {
                if self.advance_ramp() {
                    self.state = EnvelopeState::Decay;
                    if self.level <= self.sustain_level {
                        self.state = EnvelopeState::Sustain;
                    } else {
                        self.start_ramp(self.sustain_level, self.decay_time);
                    }
                }
            }

            EnvelopeState::Decay => {
                if self.advance_ramp() {
                    self.state = EnvelopeState::Sustain;
                }
            }

            EnvelopeState::Sustain => {
                // Picks up sustain edits made while holding
                self.level = self.sustain_level;
            }

            EnvelopeState::Release => {
                if self.ramp_start <= 0.0 || self.advance_ramp() {
                    self.enter_off();
                }
            }
        }

        debug_assert!((0.0..=1.0).contains(&self.level));
        self.level
    }

    /// Render a block of envelope values into the buffer.
    pub fn render(&mut self, buffer: &mut [f32]) {
        for sample in buffer.iter_mut() {
            *sample = self.next_value();
        }
    }

    pub fn is_active(&self) -> bool {
        self.state != EnvelopeState::Off
    }

    /// Back to Off at level zero.
    pub fn reset(&mut self) {
        self.enter_off();
    }

    pub fn level(&self) -> f32 {
        self.level
    }

    pub fn state(&self) -> EnvelopeState {
        self.state
    }

    pub fn sustain_level(&self) -> f32 {
        self.sustain_level
    }
}
