//! Drive-into-tanh distortion.

use stompbox_core::{
    Effect, ParamDescriptor, ParamUnit, ParameterInfo, SmoothedParam, db_to_linear, soft_clip,
};

/// Distortion parameter table, in positional order.
pub const DISTORTION_PARAMS: [ParamDescriptor; 1] = [ParamDescriptor::new(
    "drive_db",
    "Drive",
    ParamUnit::Decibels,
    0.0,
    50.0,
    25.0,
)];

/// Soft-clipping distortion: `tanh(input * 10^(drive_db / 20))`.
///
/// ## Parameter Indices (`ParameterInfo`)
///
/// | Index | Name | Range | Default |
/// |-------|------|-------|---------|
/// | 0 | drive_db | 0–50 dB | 25.0 |
///
/// Silence in gives silence out, and the output never exceeds ±1.
///
/// # Example
///
/// ```rust
/// use stompbox_effects::Distortion;
/// use stompbox_core::Effect;
///
/// let mut dist = Distortion::new(44100.0);
/// dist.set_drive_db(10.0);
/// assert_eq!(dist.process(0.0), 0.0);
/// ```
#[derive(Debug, Clone)]
pub struct Distortion {
    drive_db: f32,
    drive_gain: SmoothedParam,
}

impl Distortion {
    /// Create a distortion with the default drive.
    pub fn new(sample_rate: f32) -> Self {
        let drive_db = DISTORTION_PARAMS[0].default;
        Self {
            drive_db,
            drive_gain: SmoothedParam::standard(db_to_linear(drive_db), sample_rate),
        }
    }

    /// Set drive in dB (0–50).
    pub fn set_drive_db(&mut self, drive_db: f32) {
        self.drive_db = DISTORTION_PARAMS[0].clamp(drive_db);
        self.drive_gain.set_target(db_to_linear(self.drive_db));
    }

    /// Current drive in dB.
    pub fn drive_db(&self) -> f32 {
        self.drive_db
    }
}

impl Default for Distortion {
    fn default() -> Self {
        Self::new(48000.0)
    }
}

impl Effect for Distortion {
    #[inline]
    fn process(&mut self, input: f32) -> f32 {
        soft_clip(input * self.drive_gain.advance())
    }

    fn set_sample_rate(&mut self, sample_rate: f32) {
        self.drive_gain.set_sample_rate(sample_rate);
    }

    fn reset(&mut self) {
        self.drive_gain.snap_to_target();
    }
}

impl ParameterInfo for Distortion {
    fn param_count(&self) -> usize {
        DISTORTION_PARAMS.len()
    }

    fn param_info(&self, index: usize) -> Option<ParamDescriptor> {
        DISTORTION_PARAMS.get(index).copied()
    }

    fn get_param(&self, index: usize) -> f32 {
        match index {
            0 => self.drive_db,
            _ => 0.0,
        }
    }

    fn set_param(&mut self, index: usize, value: f32) {
        if index == 0 {
            self.set_drive_db(value);
        }
    }
}
