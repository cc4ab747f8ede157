//! Phaser with a cascade of LFO-swept first-order allpass stages.
//!
//! Mixing the input with an allpass-shifted copy of itself carves notches
//! where the stages add up to 180 degrees; sweeping the stage frequencies
//! moves the notches and gives the familiar "swoosh".

use core::f32::consts::PI;
use libm::{log10f, powf, tanf};
use stompbox_core::{
    Effect, Lfo, ParamDescriptor, ParamUnit, ParameterInfo, SmoothedParam, flush_denormal,
    wet_dry_mix,
};

/// Number of allpass stages.
const STAGES: usize = 6;

/// Samples between allpass coefficient updates.
const COEFF_UPDATE_INTERVAL: u32 = 32;

/// Bottom of the logarithmic sweep range (Hz).
const SWEEP_MIN_HZ: f32 = 20.0;

/// Top of the logarithmic sweep range (Hz).
const SWEEP_MAX_HZ: f32 = 20000.0;

/// Phaser parameter table, in positional order.
pub const PHASER_PARAMS: [ParamDescriptor; 5] = [
    ParamDescriptor::new("rate_hz", "Rate", ParamUnit::Hertz, 0.0, 100.0, 1.0),
    ParamDescriptor::new("depth", "Depth", ParamUnit::None, 0.0, 1.0, 0.5),
    ParamDescriptor::new(
        "centre_frequency_hz",
        "Centre Frequency",
        ParamUnit::Hertz,
        0.0,
        1300.0,
        1300.0,
    ),
    ParamDescriptor::new("feedback", "Feedback", ParamUnit::None, -1.0, 1.0, 0.0),
    ParamDescriptor::new("mix", "Mix", ParamUnit::None, 0.0, 1.0, 0.5),
];

/// Six-stage phaser.
///
/// ## Parameter Indices (`ParameterInfo`)
///
/// | Index | Name | Range | Default |
/// |-------|------|-------|---------|
/// | 0 | rate_hz | 0–100 Hz | 1.0 |
/// | 1 | depth | 0–1 | 0.5 |
/// | 2 | centre_frequency_hz | 0–1300 Hz | 1300.0 |
/// | 3 | feedback | -1–1 | 0.0 |
/// | 4 | mix | 0–1 | 0.5 |
///
/// # Algorithm
///
/// The centre frequency is placed on a log scale spanning 20 Hz to 20 kHz.
/// The LFO moves that position by up to `depth / 2` of the full range either
/// way, and every stage is tuned to the resulting frequency (limited to just
/// under Nyquist). The last stage's output is fed back into the cascade input.
///
/// # Example
///
/// ```rust
/// use stompbox_effects::Phaser;
/// use stompbox_core::Effect;
///
/// let mut phaser = Phaser::new(44100.0);
/// phaser.set_depth(0.8);
/// phaser.set_feedback(0.5);
///
/// let output = phaser.process(0.5);
/// assert!(output.is_finite());
/// ```
#[derive(Debug, Clone)]
pub struct Phaser {
    allpass: [FirstOrderAllpass; STAGES],
    lfo: Lfo,
    rate_hz: f32,
    depth: SmoothedParam,
    centre_hz: SmoothedParam,
    feedback: SmoothedParam,
    mix: SmoothedParam,
    sample_rate: f32,
    feedback_sample: f32,
    /// Down-counter for block-rate coefficient updates. Starts at 1 so the
    /// first sample triggers an update.
    coeff_update_counter: u32,
}

/// First-order allpass: `y[n] = a*x[n] + x[n-1] - a*y[n-1]`
/// with `a = (tan(pi*fc/fs) - 1) / (tan(pi*fc/fs) + 1)`.
#[derive(Debug, Clone, Copy, Default)]
struct FirstOrderAllpass {
    a: f32,
    x1: f32,
    y1: f32,
}

impl FirstOrderAllpass {
    #[inline]
    fn set_frequency(&mut self, freq: f32, sample_rate: f32) {
        let t = tanf(PI * freq / sample_rate);
        self.a = (t - 1.0) / (t + 1.0);
    }

    #[inline]
    fn process(&mut self, input: f32) -> f32 {
        let output = flush_denormal(self.a * input + self.x1 - self.a * self.y1);
        self.x1 = input;
        self.y1 = output;
        output
    }

    fn clear(&mut self) {
        self.x1 = 0.0;
        self.y1 = 0.0;
    }
}

impl Phaser {
    /// Create a phaser with default parameters.
    pub fn new(sample_rate: f32) -> Self {
        let [rate, depth, centre, feedback, mix] = PHASER_PARAMS.map(|d| d.default);
        Self {
            allpass: [FirstOrderAllpass::default(); STAGES],
            lfo: Lfo::new(sample_rate, rate),
            rate_hz: rate,
            depth: SmoothedParam::standard(depth, sample_rate),
            centre_hz: SmoothedParam::standard(centre, sample_rate),
            feedback: SmoothedParam::standard(feedback, sample_rate),
            mix: SmoothedParam::standard(mix, sample_rate),
            sample_rate,
            feedback_sample: 0.0,
            coeff_update_counter: 1,
        }
    }

    /// Set LFO rate in Hz (0–100).
    pub fn set_rate(&mut self, rate_hz: f32) {
        self.rate_hz = PHASER_PARAMS[0].clamp(rate_hz);
        self.lfo.set_frequency(self.rate_hz);
    }

    /// Set sweep depth (0–1).
    pub fn set_depth(&mut self, depth: f32) {
        self.depth.set_target(PHASER_PARAMS[1].clamp(depth));
    }

    /// Set the sweep centre in Hz (0–1300).
    pub fn set_centre_frequency_hz(&mut self, hz: f32) {
        self.centre_hz.set_target(PHASER_PARAMS[2].clamp(hz));
    }

    /// Set feedback (-1–1).
    pub fn set_feedback(&mut self, feedback: f32) {
        self.feedback.set_target(PHASER_PARAMS[3].clamp(feedback));
    }

    /// Set wet/dry mix (0–1).
    pub fn set_mix(&mut self, mix: f32) {
        self.mix.set_target(PHASER_PARAMS[4].clamp(mix));
    }

    /// Stage frequency for a centre, depth and bipolar LFO value.
    fn sweep_frequency(&self, centre_hz: f32, depth: f32, lfo: f32) -> f32 {
        let decades = log10f(SWEEP_MAX_HZ / SWEEP_MIN_HZ);
        let centre_norm = log10f(centre_hz.max(SWEEP_MIN_HZ) / SWEEP_MIN_HZ) / decades;
        let norm = (centre_norm + lfo * depth * 0.5).clamp(0.0, 1.0);
        let freq = SWEEP_MIN_HZ * powf(10.0, norm * decades);
        // tan() blows up at Nyquist; stay just below it.
        freq.min(self.sample_rate * 0.49)
    }
}

impl Default for Phaser {
    fn default() -> Self {
        Self::new(48000.0)
    }
}

impl Effect for Phaser {
    #[inline]
    fn process(&mut self, input: f32) -> f32 {
        let depth = self.depth.advance();
        let centre = self.centre_hz.advance();
        let feedback = self.feedback.advance();
        let mix = self.mix.advance();

        // LFO advances every sample to keep its phase correct.
        let lfo = self.lfo.next();

        self.coeff_update_counter -= 1;
        if self.coeff_update_counter == 0 {
            self.coeff_update_counter = COEFF_UPDATE_INTERVAL;
            let freq = self.sweep_frequency(centre, depth, lfo);
            for stage in &mut self.allpass {
                stage.set_frequency(freq, self.sample_rate);
            }
        }

        let mut wet = input + self.feedback_sample * feedback;
        for stage in &mut self.allpass {
            wet = stage.process(wet);
        }
        self.feedback_sample = wet;

        wet_dry_mix(input, wet, mix)
    }

    fn set_sample_rate(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate;
        self.lfo.set_sample_rate(sample_rate);
        self.depth.set_sample_rate(sample_rate);
        self.centre_hz.set_sample_rate(sample_rate);
        self.feedback.set_sample_rate(sample_rate);
        self.mix.set_sample_rate(sample_rate);
        self.coeff_update_counter = 1;
    }

    fn reset(&mut self) {
        for stage in &mut self.allpass {
            stage.clear();
        }
        self.lfo.reset();
        self.feedback_sample = 0.0;
        self.coeff_update_counter = 1;
        self.depth.snap_to_target();
        self.centre_hz.snap_to_target();
        self.feedback.snap_to_target();
        self.mix.snap_to_target();
    }
}

impl ParameterInfo for Phaser {
    fn param_count(&self) -> usize {
        PHASER_PARAMS.len()
    }

    fn param_info(&self, index: usize) -> Option<ParamDescriptor> {
        PHASER_PARAMS.get(index).copied()
    }

    fn get_param(&self, index: usize) -> f32 {
        match index {
            0 => self.rate_hz,
            1 => self.depth.target(),
            2 => self.centre_hz.target(),
            3 => self.feedback.target(),
            4 => self.mix.target(),
            _ => 0.0,
        }
    }

    fn set_param(&mut self, index: usize, value: f32) {
        match index {
            0 => self.set_rate(value),
            1 => self.set_depth(value),
            2 => self.set_centre_frequency_hz(value),
            3 => self.set_feedback(value),
            4 => self.set_mix(value),
            _ => {}
        }
    }
}
