/*
Note Priority and Portamento
============================

A monophonic voice can only sound one pitch, but the player can hold many
keys. The controller keeps every held key in press order and always sounds
the most recent one (last-note priority):

    press C       held: [C]          sounds C   (envelopes trigger)
    press E       held: [C, E]       sounds E   (glide C → E)
    press G       held: [C, E, G]    sounds G   (glide E → G)
    release E     held: [C, G]       sounds G   (nothing changes)
    release G     held: [C]          sounds C   (glide G → C, no retrigger)
    release C     held: []           silence    (envelopes release)

Only the first key of a phrase triggers the envelopes. Later keys are played
legato: they retarget the pitch and restart the glide but leave the
envelopes alone.


Glide
-----

Every retarget remembers the frequency it is leaving and restarts a sample
counter t. The sounding frequency approaches the target exponentially:

    k = exp(-t / (glide_time * sample_rate))
    f = target * (1 - k) + start * k

At t = 0 this is exactly the start frequency. After one glide_time it is
63% of the way, after five it is within 1%. It never overshoots because
k stays within [0, 1].


Pitch Bend
----------

The 14-bit wheel value 0..16383 (centre 8192) maps linearly onto ±2
semitones. Bend moves the current target without restarting the glide.
*/

/// Maximum number of keys tracked at once. Further presses are ignored.
pub const MAX_HELD_NOTES: usize = 16;
/// Pitch-wheel centre value, no bend.
pub const PITCH_WHEEL_CENTER: u16 = 8192;
/// Semitones at either end of the wheel.
pub const PITCH_BEND_RANGE: f32 = 2.0;

/// Equal-tempered frequency of a MIDI note plus a bend in semitones.
/// MIDI note 69 (A4) is 440 Hz.
#[inline]
pub fn calculate_frequency(note: u8, bend_semitones: f32) -> f32 {
    let composite = f32::from(note) + bend_semitones;
    440.0 * 2.0_f32.powf((composite - 69.0) / 12.0)
}

/// Map a raw 14-bit pitch-wheel value to semitones.
#[inline]
pub fn pitch_wheel_semitones(raw: u16) -> f32 {
    let raw = raw.min(16_383);
    (f32::from(raw) - f32::from(PITCH_WHEEL_CENTER)) * PITCH_BEND_RANGE
        / f32::from(PITCH_WHEEL_CENTER)
}

/// What the envelopes should do after a note event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gate {
    /// First key of a phrase: trigger both envelopes.
    Trigger,
    /// Last key released: release both envelopes.
    Release,
    /// Leave the envelopes alone.
    Hold,
}

pub struct VoiceController {
    held: [u8; MAX_HELD_NOTES],
    held_count: usize,

    sample_rate: f32,
    current_frequency: f32,
    previous_frequency: f32,
    glide_elapsed: u64, // samples since the last retarget
    glide_time: f32,    // seconds
    pitch_bend: f32,    // semitones
}

impl VoiceController {
    pub fn new(sample_rate: f32) -> Self {
        debug_assert!(sample_rate > 0.0);
        Self {
            held: [0; MAX_HELD_NOTES],
            held_count: 0,
            sample_rate,
            current_frequency: 0.0,
            previous_frequency: 0.0,
            glide_elapsed: 0,
            glide_time: 0.05,
            pitch_bend: 0.0,
        }
    }

    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        debug_assert!(sample_rate > 0.0);
        self.sample_rate = sample_rate;
    }

    /// Portamento time in seconds, floored to one sample at 48 kHz.
    pub fn set_glide_time(&mut self, seconds: f32) {
        self.glide_time = seconds.max(crate::MIN_TIME);
    }

    /// Push a key. Velocity is accepted but the voice plays at unity gain.
    pub fn note_on(&mut self, note: u8, _velocity: u8) -> Gate {
        if self.held_count >= MAX_HELD_NOTES {
            return Gate::Hold;
        }

        self.held[self.held_count] = note;
        self.held_count += 1;

        self.retarget(note);

        if self.held_count == 1 {
            Gate::Trigger
        } else {
            Gate::Hold
        }
    }

    /// Remove every occurrence of `note`, keeping the order of the rest.
    pub fn note_off(&mut self, note: u8) -> Gate {
        let before = self.held_count;
        let top = self.most_recent_note();

        let mut kept = 0;
        for i in 0..before {
            let held = self.held[i];
            if held != note {
                self.held[kept] = held;
                kept += 1;
            }
        }
        self.held_count = kept;

        if kept == before || top != Some(note) {
            return Gate::Hold;
        }

        match self.most_recent_note() {
            None => Gate::Release,
            Some(next) => {
                self.retarget(next);
                Gate::Hold
            }
        }
    }

    /// Drop every held key. Releases the envelopes if anything was held.
    pub fn all_notes_off(&mut self) -> Gate {
        let was_holding = self.held_count > 0;
        self.held_count = 0;

        if was_holding {
            Gate::Release
        } else {
            Gate::Hold
        }
    }

    /// Apply a raw 14-bit pitch-wheel value to the sounding and future notes.
    pub fn pitch_wheel(&mut self, raw: u16) {
        self.pitch_bend = pitch_wheel_semitones(raw);

        if let Some(note) = self.most_recent_note() {
            self.current_frequency = calculate_frequency(note, self.pitch_bend);
        }
    }

    /// Exponential glide from `start` towards `end` at the current glide position.
    #[inline]
    pub fn glide_between(&self, start: f32, end: f32) -> f32 {
        let k = (-(self.glide_elapsed as f32) / (self.glide_time * self.sample_rate)).exp();
        // end·(1 − k) + start·k, written so rounding stays monotonic in t
        end + (start - end) * k
    }

    /// Instantaneous glide frequency, without vibrato.
    #[inline]
    pub fn glide_frequency(&self) -> f32 {
        self.glide_between(self.previous_frequency, self.current_frequency)
    }

    /// Move the glide forward by one sample.
    #[inline]
    pub fn advance_glide(&mut self) {
        self.glide_elapsed = self.glide_elapsed.saturating_add(1);
    }

    pub fn most_recent_note(&self) -> Option<u8> {
        self.held_notes().last().copied()
    }

    /// Held keys in press order.
    pub fn held_notes(&self) -> &[u8] {
        &self.held[..self.held_count]
    }

    pub fn current_frequency(&self) -> f32 {
        self.current_frequency
    }

    pub fn previous_frequency(&self) -> f32 {
        self.previous_frequency
    }

    pub fn pitch_bend(&self) -> f32 {
        self.pitch_bend
    }

    pub fn glide_elapsed(&self) -> u64 {
        self.glide_elapsed
    }

    fn retarget(&mut self, note: u8) {
        self.previous_frequency = self.current_frequency;
        self.glide_elapsed = 0;
        self.current_frequency = calculate_frequency(note, self.pitch_bend);
    }
}
