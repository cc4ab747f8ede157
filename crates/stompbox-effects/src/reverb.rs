//! Freeverb-style algorithmic reverb.
//!
//! Eight parallel lowpass-feedback combs followed by four series allpass
//! diffusers, processed as a single channel.

use stompbox_core::{
    AllpassFilter, CombFilter, Effect, ParamDescriptor, ParamUnit, ParameterInfo, SmoothedParam,
};

/// Comb delay lengths in samples at 44.1 kHz.
const COMB_TUNINGS_44K: [usize; 8] = [1116, 1188, 1277, 1356, 1422, 1491, 1557, 1617];

/// Allpass delay lengths in samples at 44.1 kHz.
const ALLPASS_TUNINGS_44K: [usize; 4] = [556, 441, 341, 225];

/// Sample rate the tunings were designed for.
const REFERENCE_RATE: f32 = 44100.0;

/// Input attenuation feeding the combs.
const FIXED_GAIN: f32 = 0.015;
const SCALE_WET: f32 = 3.0;
const SCALE_DRY: f32 = 2.0;
const SCALE_DAMP: f32 = 0.4;
const SCALE_ROOM: f32 = 0.28;
const OFFSET_ROOM: f32 = 0.7;

/// Reverb parameter table, in positional order.
pub const REVERB_PARAMS: [ParamDescriptor; 6] = [
    ParamDescriptor::new("room_size", "Room Size", ParamUnit::None, 0.0, 1.0, 0.5),
    ParamDescriptor::new("damping", "Damping", ParamUnit::None, 0.0, 1.0, 0.5),
    ParamDescriptor::new("wet_level", "Wet Level", ParamUnit::None, 0.0, 1.0, 0.33),
    ParamDescriptor::new("dry_level", "Dry Level", ParamUnit::None, 0.0, 1.0, 0.4),
    ParamDescriptor::new("width", "Width", ParamUnit::None, 0.0, 1.0, 1.0),
    ParamDescriptor::new("freeze_mode", "Freeze", ParamUnit::None, 0.0, 1.0, 0.0),
];

fn scale_to_rate(samples: usize, target_rate: f32) -> usize {
    ((samples as f32 * target_rate / REFERENCE_RATE).round() as usize).max(1)
}

/// Freeverb reverb.
///
/// ## Parameter Indices (`ParameterInfo`)
///
/// | Index | Name | Range | Default |
/// |-------|------|-------|---------|
/// | 0 | room_size | 0–1 | 0.5 |
/// | 1 | damping | 0–1 | 0.5 |
/// | 2 | wet_level | 0–1 | 0.33 |
/// | 3 | dry_level | 0–1 | 0.4 |
/// | 4 | width | 0–1 | 1.0 |
/// | 5 | freeze_mode | 0–1 | 0.0 |
///
/// Comb feedback is `room_size * 0.28 + 0.7`, comb damping `damping * 0.4`.
/// On a single channel, width scales the wet gain by `(1 + width) / 2`.
/// A `freeze_mode` of 0.5 or more mutes the comb input and holds the tail
/// (feedback 1, no damping).
///
/// # Example
///
/// ```rust
/// use stompbox_effects::Reverb;
/// use stompbox_core::Effect;
///
/// let mut reverb = Reverb::new(44100.0);
/// reverb.set_room_size(0.8);
/// reverb.set_wet_level(0.5);
///
/// let output = reverb.process(0.5);
/// assert!(output.is_finite());
/// ```
#[derive(Debug, Clone)]
pub struct Reverb {
    combs: [CombFilter; 8],
    allpasses: [AllpassFilter; 4],
    params: [f32; 6],
    wet_gain: SmoothedParam,
    dry_gain: SmoothedParam,
    input_gain: f32,
}

impl Reverb {
    /// Create a reverb with default parameters.
    pub fn new(sample_rate: f32) -> Self {
        let mut reverb = Self {
            combs: Self::build_combs(sample_rate),
            allpasses: Self::build_allpasses(sample_rate),
            params: REVERB_PARAMS.map(|d| d.default),
            wet_gain: SmoothedParam::standard(0.0, sample_rate),
            dry_gain: SmoothedParam::standard(0.0, sample_rate),
            input_gain: FIXED_GAIN,
        };
        reverb.update();
        reverb.wet_gain.snap_to_target();
        reverb.dry_gain.snap_to_target();
        reverb
    }

    fn build_combs(sample_rate: f32) -> [CombFilter; 8] {
        core::array::from_fn(|i| CombFilter::new(scale_to_rate(COMB_TUNINGS_44K[i], sample_rate)))
    }

    fn build_allpasses(sample_rate: f32) -> [AllpassFilter; 4] {
        core::array::from_fn(|i| {
            let mut ap = AllpassFilter::new(scale_to_rate(ALLPASS_TUNINGS_44K[i], sample_rate));
            ap.set_feedback(0.5);
            ap
        })
    }

    /// Set room size (0–1).
    pub fn set_room_size(&mut self, value: f32) {
        self.set_param(0, value);
    }

    /// Set high-frequency damping of the tail (0–1).
    pub fn set_damping(&mut self, value: f32) {
        self.set_param(1, value);
    }

    /// Set wet level (0–1).
    pub fn set_wet_level(&mut self, value: f32) {
        self.set_param(2, value);
    }

    /// Set dry level (0–1).
    pub fn set_dry_level(&mut self, value: f32) {
        self.set_param(3, value);
    }

    /// Set width (0–1).
    pub fn set_width(&mut self, value: f32) {
        self.set_param(4, value);
    }

    /// Set freeze mode; values of 0.5 and above freeze the tail.
    pub fn set_freeze_mode(&mut self, value: f32) {
        self.set_param(5, value);
    }

    /// Whether the tail is currently frozen.
    pub fn is_frozen(&self) -> bool {
        self.params[5] >= 0.5
    }

    fn update(&mut self) {
        let [room, damping, wet, dry, width, _] = self.params;

        self.wet_gain
            .set_target(wet * SCALE_WET * 0.5 * (1.0 + width));
        self.dry_gain.set_target(dry * SCALE_DRY);

        let (feedback, damp, input_gain) = if self.is_frozen() {
            (1.0, 0.0, 0.0)
        } else {
            (room * SCALE_ROOM + OFFSET_ROOM, damping * SCALE_DAMP, FIXED_GAIN)
        };
        self.input_gain = input_gain;
        for comb in &mut self.combs {
            comb.set_feedback(feedback);
            comb.set_damp(damp);
        }
    }
}

impl Default for Reverb {
    fn default() -> Self {
        Self::new(48000.0)
    }
}

impl Effect for Reverb {
    fn process(&mut self, input: f32) -> f32 {
        let wet_gain = self.wet_gain.advance();
        let dry_gain = self.dry_gain.advance();

        let fed = input * self.input_gain;
        let mut out = 0.0f32;
        for comb in &mut self.combs {
            out += comb.process(fed);
        }
        for allpass in &mut self.allpasses {
            out = allpass.process(out);
        }

        out * wet_gain + input * dry_gain
    }

    fn set_sample_rate(&mut self, sample_rate: f32) {
        self.combs = Self::build_combs(sample_rate);
        self.allpasses = Self::build_allpasses(sample_rate);
        self.wet_gain.set_sample_rate(sample_rate);
        self.dry_gain.set_sample_rate(sample_rate);
        self.update();
    }

    fn reset(&mut self) {
        for comb in &mut self.combs {
            comb.clear();
        }
        for allpass in &mut self.allpasses {
            allpass.clear();
        }
        self.wet_gain.snap_to_target();
        self.dry_gain.snap_to_target();
    }
}

impl ParameterInfo for Reverb {
    fn param_count(&self) -> usize {
        REVERB_PARAMS.len()
    }

    fn param_info(&self, index: usize) -> Option<ParamDescriptor> {
        REVERB_PARAMS.get(index).copied()
    }

    fn get_param(&self, index: usize) -> f32 {
        self.params.get(index).copied().unwrap_or(0.0)
    }

    fn set_param(&mut self, index: usize, value: f32) {
        if let Some(desc) = REVERB_PARAMS.get(index) {
            self.params[index] = desc.clamp(value);
            self.update();
        }
    }
}
