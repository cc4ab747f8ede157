//! Modulated-delay chorus.

use stompbox_core::{
    Effect, InterpolatedDelay, Lfo, ParamDescriptor, ParamUnit, ParameterInfo, SmoothedParam,
    flush_denormal, ms_to_samples, wet_dry_mix,
};

/// Largest centre delay accepted by [`Chorus::set_centre_delay_ms`].
pub const MAX_CENTRE_DELAY_MS: f32 = 100.0;

/// Delay excursion at full depth, in milliseconds either side of the centre.
const MAX_MODULATION_MS: f32 = 10.0;

/// Chorus parameter table, in positional order.
pub const CHORUS_PARAMS: [ParamDescriptor; 5] = [
    ParamDescriptor::new("rate_hz", "Rate", ParamUnit::Hertz, 0.0, 100.0, 1.0),
    ParamDescriptor::new("depth", "Depth", ParamUnit::None, 0.0, 1.0, 0.25),
    ParamDescriptor::new(
        "centre_delay_ms",
        "Centre Delay",
        ParamUnit::Milliseconds,
        0.0,
        MAX_CENTRE_DELAY_MS,
        7.0,
    ),
    ParamDescriptor::new("feedback", "Feedback", ParamUnit::None, -1.0, 1.0, 0.0),
    ParamDescriptor::new("mix", "Mix", ParamUnit::None, 0.0, 1.0, 0.5),
];

/// Single-voice chorus: an LFO sweeps a short delay around a centre time.
///
/// ## Parameter Indices (`ParameterInfo`)
///
/// | Index | Name | Range | Default |
/// |-------|------|-------|---------|
/// | 0 | rate_hz | 0–100 Hz | 1.0 |
/// | 1 | depth | 0–1 | 0.25 |
/// | 2 | centre_delay_ms | 0–100 ms | 7.0 |
/// | 3 | feedback | -1–1 | 0.0 |
/// | 4 | mix | 0–1 | 0.5 |
///
/// The delayed signal is `delay(centre + depth * 10 ms * lfo)`; the feedback
/// path writes `input + feedback * delayed` back into the line.
///
/// # Example
///
/// ```rust
/// use stompbox_effects::Chorus;
/// use stompbox_core::Effect;
///
/// let mut chorus = Chorus::new(44100.0);
/// chorus.set_rate(2.0);
/// chorus.set_depth(0.7);
/// chorus.set_mix(0.5);
///
/// let output = chorus.process(0.5);
/// assert!(output.is_finite());
/// ```
#[derive(Debug, Clone)]
pub struct Chorus {
    delay: InterpolatedDelay,
    lfo: Lfo,
    rate_hz: f32,
    depth: SmoothedParam,
    centre_delay_ms: SmoothedParam,
    feedback: SmoothedParam,
    mix: SmoothedParam,
    sample_rate: f32,
}

impl Chorus {
    /// Create a chorus with default parameters.
    pub fn new(sample_rate: f32) -> Self {
        let [rate, depth, centre, feedback, mix] = CHORUS_PARAMS.map(|d| d.default);
        Self {
            delay: Self::delay_line(sample_rate),
            lfo: Lfo::new(sample_rate, rate),
            rate_hz: rate,
            depth: SmoothedParam::standard(depth, sample_rate),
            centre_delay_ms: SmoothedParam::standard(centre, sample_rate),
            feedback: SmoothedParam::standard(feedback, sample_rate),
            mix: SmoothedParam::standard(mix, sample_rate),
            sample_rate,
        }
    }

    fn delay_line(sample_rate: f32) -> InterpolatedDelay {
        InterpolatedDelay::from_time(
            sample_rate,
            (MAX_CENTRE_DELAY_MS + MAX_MODULATION_MS) / 1000.0,
        )
    }

    /// Set LFO rate in Hz (0–100).
    pub fn set_rate(&mut self, rate_hz: f32) {
        self.rate_hz = CHORUS_PARAMS[0].clamp(rate_hz);
        self.lfo.set_frequency(self.rate_hz);
    }

    /// Set modulation depth (0–1).
    pub fn set_depth(&mut self, depth: f32) {
        self.depth.set_target(CHORUS_PARAMS[1].clamp(depth));
    }

    /// Set the centre delay in milliseconds (0–100).
    pub fn set_centre_delay_ms(&mut self, ms: f32) {
        self.centre_delay_ms.set_target(CHORUS_PARAMS[2].clamp(ms));
    }

    /// Set feedback (-1–1).
    pub fn set_feedback(&mut self, feedback: f32) {
        self.feedback.set_target(CHORUS_PARAMS[3].clamp(feedback));
    }

    /// Set wet/dry mix (0–1).
    pub fn set_mix(&mut self, mix: f32) {
        self.mix.set_target(CHORUS_PARAMS[4].clamp(mix));
    }
}

impl Default for Chorus {
    fn default() -> Self {
        Self::new(48000.0)
    }
}

impl Effect for Chorus {
    #[inline]
    fn process(&mut self, input: f32) -> f32 {
        let depth = self.depth.advance();
        let centre_ms = self.centre_delay_ms.advance();
        let feedback = self.feedback.advance();
        let mix = self.mix.advance();

        let delay_ms = (centre_ms + depth * MAX_MODULATION_MS * self.lfo.next()).max(0.0);
        let delayed = self.delay.read(ms_to_samples(delay_ms, self.sample_rate));
        self.delay.write(flush_denormal(input + delayed * feedback));

        wet_dry_mix(input, delayed, mix)
    }

    fn set_sample_rate(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate;
        self.delay = Self::delay_line(sample_rate);
        self.lfo.set_sample_rate(sample_rate);
        self.depth.set_sample_rate(sample_rate);
        self.centre_delay_ms.set_sample_rate(sample_rate);
        self.feedback.set_sample_rate(sample_rate);
        self.mix.set_sample_rate(sample_rate);
    }

    fn reset(&mut self) {
        self.delay.clear();
        self.lfo.reset();
        self.depth.snap_to_target();
        self.centre_delay_ms.snap_to_target();
        self.feedback.snap_to_target();
        self.mix.snap_to_target();
    }
}

impl ParameterInfo for Chorus {
    fn param_count(&self) -> usize {
        CHORUS_PARAMS.len()
    }

    fn param_info(&self, index: usize) -> Option<ParamDescriptor> {
        CHORUS_PARAMS.get(index).copied()
    }

    fn get_param(&self, index: usize) -> f32 {
        match index {
            0 => self.rate_hz,
            1 => self.depth.target(),
            2 => self.centre_delay_ms.target(),
            3 => self.feedback.target(),
            4 => self.mix.target(),
            _ => 0.0,
        }
    }

    fn set_param(&mut self, index: usize, value: f32) {
        match index {
            0 => self.set_rate(value),
            1 => self.set_depth(value),
            2 => self.set_centre_delay_ms(value),
            3 => self.set_feedback(value),
            4 => self.set_mix(value),
            _ => {}
        }
    }
}
