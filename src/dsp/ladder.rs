use std::f64::consts::TAU;

/*
Ladder Low-Pass Filter
======================

A virtual-analog model of the four-pole transistor ladder (Stilson/Smith,
Huovilainen, with the Krajeski polynomial tuning). Four one-pole low-pass
stages are cascaded and the last stage feeds back to the input.

    input ─→ [gain comp] ─→ (−) ─→ tanh ─→ [1] ─→ [2] ─→ [3] ─→ [4] ─┬─→ out
                             ↑                                        │
                             └──────────── 4 · g_res ←────────────────┘

Vocabulary
----------

  wc        Angular cutoff normalised to the sample rate: 2π · fc / fs.

  g         Per-stage coefficient. A fourth-order polynomial in wc that keeps
            the cutoff in tune as it approaches Nyquist.

  g_res     Feedback amount. Resonance scaled by a cubic in wc so the
            self-oscillation threshold sits at resonance ≈ 1 across the range.
            Recomputed on every cutoff or resonance change, and floored at
            zero where the cubic turns negative near the top of the range.

  g_comp    How much of the input is folded into the feedback term. The
            loop sees (y4 − g_comp · x), so the effective input gain is
            1 + 4 · g_res · g_comp and the passband does not collapse as
            resonance rises.


Stage Update
------------

Each stage averages its current input with the previous input (its delay
memory), 0.3 : 1.0, which is a cheap trapezoidal integration that lowers
aliasing compared to a plain one-pole:

    x = (0.3 · s[i] + 1.0 · d[i]) / 1.3
    s[i+1] += g · (tanh(x) − tanh(s[i+1]))

The tanh on every stage is what gives the ladder its saturated, singing
resonance. A linear ladder would just blow up or ring.


Stability
---------

The input stage is a tanh, so s[0] is always within ±1. Every later stage
moves towards a bounded target by at most g per sample, and the cutoff is
clamped to 0.45 · fs where g stays well below 2. Output is therefore bounded
for any resonance in 0..=4.
*/

/// Lowest cutoff the filter will accept.
pub const MIN_CUTOFF_HZ: f32 = 20.0;
/// Highest cutoff as a fraction of the sample rate.
pub const MAX_CUTOFF_RATIO: f32 = 0.45;
/// Upper bound for resonance. Self-oscillation starts a little above 1.
pub const MAX_RESONANCE: f32 = 4.0;
/// Drive never goes below this.
pub const MIN_DRIVE: f32 = 0.1;

const STAGES: usize = 5;

pub struct LadderFilter {
    sample_rate: f32,
    cutoff: f32,
    resonance: f32,
    drive: f64,
    g_comp: f64,

    state: [f64; STAGES], // output of the input stage and the four poles
    delay: [f64; STAGES], // previous input of each pole

    wc: f64,
    g: f64,
    g_res: f64,
}

impl LadderFilter {
    pub fn new(sample_rate: f32) -> Self {
        debug_assert!(sample_rate > 0.0);

        let mut filter = Self {
            sample_rate,
            cutoff: 1_000.0,
            resonance: 0.1,
            drive: 1.0,
            g_comp: 1.0,
            state: [0.0; STAGES],
            delay: [0.0; STAGES],
            wc: 0.0,
            g: 0.0,
            g_res: 0.0,
        };
        filter.update_cutoff();
        filter.update_resonance();
        filter
    }

    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        debug_assert!(sample_rate > 0.0);
        self.sample_rate = sample_rate;
        self.update_cutoff();
        self.update_resonance();
    }

    /// Clamped to `[MIN_CUTOFF_HZ, MAX_CUTOFF_RATIO × sample_rate]`.
    /// A NaN cutoff is ignored.
    pub fn set_frequency(&mut self, cutoff: f32) {
        if cutoff.is_nan() {
            return;
        }
        self.cutoff = cutoff;
        self.update_cutoff();
    }

    /// Clamped to `[0, MAX_RESONANCE]`.
    pub fn set_q(&mut self, resonance: f32) {
        self.resonance = resonance;
        self.update_resonance();
    }

    pub fn set_drive(&mut self, drive: f32) {
        self.drive = f64::from(drive.max(MIN_DRIVE));
    }

    /// Zero the stage and delay memory. Coefficients are kept.
    pub fn reset(&mut self) {
        self.state = [0.0; STAGES];
        self.delay = [0.0; STAGES];
    }

    pub fn cutoff(&self) -> f32 {
        self.cutoff
    }

    pub fn resonance(&self) -> f32 {
        self.resonance
    }

    pub fn drive(&self) -> f32 {
        self.drive as f32
    }

    fn update_cutoff(&mut self) {
        let max = (self.sample_rate * MAX_CUTOFF_RATIO).max(MIN_CUTOFF_HZ);
        let cutoff = self.cutoff.clamp(MIN_CUTOFF_HZ, max);
        self.cutoff = cutoff;

        let wc = TAU * f64::from(cutoff) / f64::from(self.sample_rate);
        let wc2 = wc * wc;
        self.wc = wc;
        self.g = 0.9892 * wc - 0.4342 * wc2 + 0.1381 * wc2 * wc - 0.0202 * wc2 * wc2;

        // g_res tracks wc, so it moves with every cutoff change
        self.update_feedback();
    }

    fn update_resonance(&mut self) {
        self.resonance = self.resonance.clamp(0.0, MAX_RESONANCE);
        self.update_feedback();
    }

    fn update_feedback(&mut self) {
        let wc = self.wc;
        let wc2 = wc * wc;
        // The cubic dips below zero near the top of the cutoff range
        let tuning = (1.0029 + 0.0526 * wc - 0.926 * wc2 + 0.0218 * wc2 * wc).max(0.0);
        self.g_res = f64::from(self.resonance) * tuning;
    }

    /// Filter one sample.
    #[inline]
    pub fn process(&mut self, input: f32) -> f32 {
        let x = f64::from(input);

        let feedback = 4.0 * self.g_res * (self.state[4] - self.g_comp * x);
        self.state[0] = (self.drive * (x - feedback)).tanh();

        for i in 0..4 {
            let averaged = (0.3 * self.state[i] + self.delay[i]) / 1.3;
            self.state[i + 1] += self.g * (averaged.tanh() - self.state[i + 1].tanh());
            self.delay[i] = self.state[i];
        }

        self.state[4] as f32
    }

    /// Filter a buffer in place.
    pub fn render(&mut self, buffer: &mut [f32]) {
        for sample in buffer.iter_mut() {
            *sample = self.process(*sample);
        }
    }
}
