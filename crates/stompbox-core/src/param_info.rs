//! Parameter introspection for discoverable effect parameters.
//!
//! Each effect publishes a fixed, ordered table of [`ParamDescriptor`]s. The
//! order is part of the effect's contract: positional parameter lists are
//! matched against it, and the declared ranges are what validation checks
//! values against.
//!
//! # Example
//!
//! ```rust
//! use stompbox_core::{ParameterInfo, ParamDescriptor, ParamUnit};
//!
//! const GAIN_PARAMS: [ParamDescriptor; 1] = [
//!     ParamDescriptor::new("gain_db", "Gain", ParamUnit::Decibels, -60.0, 12.0, 0.0),
//! ];
//!
//! struct SimpleGain {
//!     gain_db: f32,
//! }
//!
//! impl ParameterInfo for SimpleGain {
//!     fn param_count(&self) -> usize { GAIN_PARAMS.len() }
//!
//!     fn param_info(&self, index: usize) -> Option<ParamDescriptor> {
//!         GAIN_PARAMS.get(index).copied()
//!     }
//!
//!     fn get_param(&self, index: usize) -> f32 {
//!         match index {
//!             0 => self.gain_db,
//!             _ => 0.0,
//!         }
//!     }
//!
//!     fn set_param(&mut self, index: usize, value: f32) {
//!         if index == 0 {
//!             self.gain_db = GAIN_PARAMS[0].clamp(value);
//!         }
//!     }
//! }
//!
//! let gain = SimpleGain { gain_db: 0.0 };
//! assert_eq!(gain.find_param_by_name("gain_db"), Some(0));
//! ```

#[cfg(not(feature = "std"))]
use alloc::{format, string::String};

/// Trait for effects that expose introspectable parameters.
///
/// Parameters are accessed by zero-based index. The index must be stable for
/// the lifetime of the effect instance.
pub trait ParameterInfo {
    /// Returns the number of parameters this effect exposes.
    fn param_count(&self) -> usize;

    /// Returns the descriptor for the parameter at the given index.
    ///
    /// Returns `None` if `index >= param_count()`.
    fn param_info(&self, index: usize) -> Option<ParamDescriptor>;

    /// Gets the current value of the parameter at the given index.
    ///
    /// Returns `0.0` for out-of-range indices.
    fn get_param(&self, index: usize) -> f32;

    /// Sets the value of the parameter at the given index.
    ///
    /// Implementations clamp to the descriptor range and ignore out-of-range
    /// indices. Range *validation* happens before an effect is built; this
    /// clamp only keeps a directly driven effect numerically sane.
    fn set_param(&mut self, index: usize, value: f32);

    /// Find a parameter index by name (case-insensitive).
    ///
    /// Matches against both [`ParamDescriptor::name`] and
    /// [`ParamDescriptor::label`].
    fn find_param_by_name(&self, name: &str) -> Option<usize> {
        (0..self.param_count()).find(|&i| {
            self.param_info(i).is_some_and(|desc| {
                desc.name.eq_ignore_ascii_case(name) || desc.label.eq_ignore_ascii_case(name)
            })
        })
    }
}

/// Describes a single parameter: identifier, display label, unit and range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamDescriptor {
    /// Stable snake_case identifier (e.g. `"centre_delay_ms"`).
    pub name: &'static str,

    /// Human readable label (e.g. `"Centre Delay"`).
    pub label: &'static str,

    /// Unit used when formatting the value.
    pub unit: ParamUnit,

    /// Minimum allowed value (inclusive).
    pub min: f32,

    /// Maximum allowed value (inclusive).
    pub max: f32,

    /// Value used when the parameter is not supplied.
    pub default: f32,
}

impl ParamDescriptor {
    /// Create a descriptor. Usable in `const` tables.
    pub const fn new(
        name: &'static str,
        label: &'static str,
        unit: ParamUnit,
        min: f32,
        max: f32,
        default: f32,
    ) -> Self {
        Self {
            name,
            label,
            unit,
            min,
            max,
            default,
        }
    }

    /// Returns `true` if `value` is finite and lies within `[min, max]`.
    #[inline]
    pub fn contains(&self, value: f32) -> bool {
        value.is_finite() && value >= self.min && value <= self.max
    }

    /// Clamp a value to this parameter's range.
    #[inline]
    pub fn clamp(&self, value: f32) -> f32 {
        if value < self.min {
            self.min
        } else if value > self.max {
            self.max
        } else {
            value
        }
    }

    /// Format a value with this parameter's unit suffix.
    ///
    /// ```rust
    /// use stompbox_core::{ParamDescriptor, ParamUnit};
    ///
    /// let drive = ParamDescriptor::new("drive_db", "Drive", ParamUnit::Decibels, 0.0, 50.0, 25.0);
    /// assert_eq!(drive.format_value(10.0), "10.00 dB");
    /// ```
    pub fn format_value(&self, value: f32) -> String {
        format!("{:.2}{}", value, self.unit.suffix())
    }
}

/// Unit of a parameter value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamUnit {
    /// Decibels (dB).
    Decibels,

    /// Hertz (Hz).
    Hertz,

    /// Milliseconds (ms).
    Milliseconds,

    /// Seconds (s).
    Seconds,

    /// Dimensionless amount, usually 0 to 1.
    None,
}

impl ParamUnit {
    /// Returns the unit suffix string for display.
    pub const fn suffix(&self) -> &'static str {
        match self {
            ParamUnit::Decibels => " dB",
            ParamUnit::Hertz => " Hz",
            ParamUnit::Milliseconds => " ms",
            ParamUnit::Seconds => " s",
            ParamUnit::None => "",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TABLE: [ParamDescriptor; 2] = [
        ParamDescriptor::new("rate_hz", "Rate", ParamUnit::Hertz, 0.0, 100.0, 1.0),
        ParamDescriptor::new("feedback", "Feedback", ParamUnit::None, -1.0, 1.0, 0.0),
    ];

    struct Dummy([f32; 2]);

    impl ParameterInfo for Dummy {
        fn param_count(&self) -> usize {
            TABLE.len()
        }
        fn param_info(&self, index: usize) -> Option<ParamDescriptor> {
            TABLE.get(index).copied()
        }
        fn get_param(&self, index: usize) -> f32 {
            self.0.get(index).copied().unwrap_or(0.0)
        }
        fn set_param(&mut self, index: usize, value: f32) {
            if let Some(desc) = TABLE.get(index) {
                self.0[index] = desc.clamp(value);
            }
        }
    }

    #[test]
    fn test_contains_is_inclusive() {
        let fb = TABLE[1];
        assert!(fb.contains(-1.0));
        assert!(fb.contains(1.0));
        assert!(fb.contains(0.0));
        assert!(!fb.contains(1.0001));
        assert!(!fb.contains(f32::NAN));
        assert!(!fb.contains(f32::INFINITY));
    }

    #[test]
    fn test_find_param_by_name() {
        let d = Dummy([1.0, 0.0]);
        assert_eq!(d.find_param_by_name("rate_hz"), Some(0));
        assert_eq!(d.find_param_by_name("FEEDBACK"), Some(1));
        assert_eq!(d.find_param_by_name("mix"), None);
    }

    #[test]
    fn test_set_param_clamps() {
        let mut d = Dummy([1.0, 0.0]);
        d.set_param(1, 4.0);
        assert_eq!(d.get_param(1), 1.0);
        d.set_param(7, 4.0);
        assert_eq!(d.get_param(7), 0.0);
    }

    #[test]
    fn test_format_value() {
        assert_eq!(TABLE[0].format_value(2.5), "2.50 Hz");
        assert_eq!(TABLE[1].format_value(-0.5), "-0.50");
    }
}
