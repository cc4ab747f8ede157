//! Validated parameter sets.
//!
//! Values outside a descriptor's range are rejected, never clamped.

use std::collections::BTreeMap;

use stompbox_core::{ParamDescriptor, ParamUnit};

use crate::{EffectKind, ValidationError};

/// A validated, schema-ordered set of values for one effect kind.
///
/// The only way to obtain one is through a validating constructor, so every
/// value is finite and within its declared range.
#[derive(Debug, Clone, PartialEq)]
pub struct EffectParams {
    kind: EffectKind,
    values: Vec<f32>,
}

impl EffectParams {
    /// Validate a positional value list against `kind`'s schema.
    ///
    /// # Errors
    ///
    /// [`ValidationError::CountMismatch`] if `values` is not exactly as long
    /// as the schema, [`ValidationError::NonFinite`] for NaN or infinity and
    /// [`ValidationError::OutOfRange`] for anything outside `[min, max]`.
    pub fn validate(kind: EffectKind, values: &[f32]) -> Result<Self, ValidationError> {
        let schema = kind.schema();
        if values.len() != schema.len() {
            return Err(ValidationError::CountMismatch {
                kind,
                expected: schema.len(),
                got: values.len(),
            });
        }
        for (desc, &value) in schema.iter().zip(values) {
            check_value(desc, value)?;
        }
        Ok(Self {
            kind,
            values: values.to_vec(),
        })
    }

    /// Schema defaults for `kind`.
    pub fn defaults(kind: EffectKind) -> Self {
        Self {
            kind,
            values: kind.schema().iter().map(|d| d.default).collect(),
        }
    }

    /// Validate a by-name mapping.
    ///
    /// Names not in the schema are rejected. A parameter that is absent takes
    /// its descriptor default, or fails with
    /// [`ValidationError::MissingParameter`] when `strict` is set.
    pub fn from_named(
        kind: EffectKind,
        named: &BTreeMap<String, f32>,
        strict: bool,
    ) -> Result<Self, ValidationError> {
        if let Some(unknown) = named.keys().find(|name| kind.param_index(name).is_none()) {
            return Err(ValidationError::UnknownParameter {
                kind,
                param: unknown.clone(),
            });
        }

        let mut values = Vec::with_capacity(kind.schema().len());
        for desc in kind.schema() {
            let value = match named.get(desc.name) {
                Some(&v) => v,
                None if strict => {
                    return Err(ValidationError::MissingParameter {
                        kind,
                        param: desc.name.to_string(),
                    });
                }
                None => desc.default,
            };
            values.push(value);
        }
        Self::validate(kind, &values)
    }

    /// Effect kind these values belong to.
    pub fn kind(&self) -> EffectKind {
        self.kind
    }

    /// Values in schema order.
    pub fn values(&self) -> &[f32] {
        &self.values
    }

    /// Value of the parameter called `name`.
    pub fn get(&self, name: &str) -> Option<f32> {
        self.kind.param_index(name).map(|i| self.values[i])
    }

    /// `(name, value)` pairs in schema order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, f32)> + '_ {
        self.kind
            .schema()
            .iter()
            .zip(&self.values)
            .map(|(d, &v)| (d.name, v))
    }

    /// By-name mapping, the inverse of [`EffectParams::from_named`].
    pub fn to_named(&self) -> BTreeMap<String, f32> {
        self.iter().map(|(n, v)| (n.to_string(), v)).collect()
    }
}

fn check_value(desc: &ParamDescriptor, value: f32) -> Result<(), ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::NonFinite {
            param: desc.name.to_string(),
        });
    }
    if !desc.contains(value) {
        return Err(ValidationError::OutOfRange {
            param: desc.name.to_string(),
            value,
            min: desc.min,
            max: desc.max,
        });
    }
    Ok(())
}

/// Split a `name=value` assignment and parse the value for `kind`.
///
/// ```rust
/// use stompbox_config::{EffectKind, params::parse_assignment};
///
/// let (name, value) = parse_assignment(EffectKind::Delay, "delay_time_s=250ms").unwrap();
/// assert_eq!(name, "delay_time_s");
/// assert!((value - 0.25).abs() < 1e-6);
/// ```
pub fn parse_assignment(kind: EffectKind, text: &str) -> Result<(String, f32), ValidationError> {
    let (name, raw) = text
        .split_once('=')
        .ok_or_else(|| ValidationError::InvalidFormat {
            param: text.to_string(),
            reason: "expected name=value".to_string(),
        })?;
    let name = name.trim();
    let index = kind
        .param_index(name)
        .ok_or_else(|| ValidationError::UnknownParameter {
            kind,
            param: name.to_string(),
        })?;
    let value = parse_value(&kind.schema()[index], raw)?;
    Ok((name.to_string(), value))
}

/// Parse a value for `desc`, accepting a unit suffix.
///
/// The descriptor's own unit may be written out (`"10dB"`, `"7ms"`,
/// `"1.5Hz"`), times may be given in the other time unit (`"250ms"` for a
/// seconds parameter), frequencies in `kHz`, and unitless values as a
/// percentage.
pub fn parse_value(desc: &ParamDescriptor, raw: &str) -> Result<f32, ValidationError> {
    let raw = raw.trim();
    let invalid = |reason: &str| ValidationError::InvalidFormat {
        param: desc.name.to_string(),
        reason: format!("{reason}: '{raw}'"),
    };
    let number = |s: &str| s.trim().parse::<f32>().map_err(|_| invalid("not a number"));

    let suffixed = |suffixes: &[&str]| {
        suffixes
            .iter()
            .find_map(|suffix| raw.strip_suffix(*suffix))
    };

    match desc.unit {
        ParamUnit::Decibels => match suffixed(&["dB", "db"]) {
            Some(v) => number(v),
            None => number(raw),
        },
        ParamUnit::Hertz => {
            if let Some(v) = suffixed(&["kHz", "khz"]) {
                number(v).map(|v| v * 1000.0)
            } else if let Some(v) = suffixed(&["Hz", "hz"]) {
                number(v)
            } else {
                number(raw)
            }
        }
        ParamUnit::Milliseconds => {
            if let Some(v) = raw.strip_suffix("ms") {
                number(v)
            } else if let Some(v) = raw.strip_suffix('s') {
                number(v).map(|v| v * 1000.0)
            } else {
                number(raw)
            }
        }
        ParamUnit::Seconds => {
            if let Some(v) = raw.strip_suffix("ms") {
                number(v).map(|v| v / 1000.0)
            } else if let Some(v) = raw.strip_suffix('s') {
                number(v)
            } else {
                number(raw)
            }
        }
        ParamUnit::None => match raw.strip_suffix('%') {
            Some(v) => number(v).map(|v| v / 100.0),
            None => number(raw),
        },
    }
}

/// Parse a comma-separated positional list such as `"1.0, 0.5"`.
pub fn parse_values(text: &str) -> Result<Vec<f32>, ValidationError> {
    text.split(',')
        .enumerate()
        .map(|(i, part)| {
            part.trim()
                .parse::<f32>()
                .map_err(|_| ValidationError::InvalidFormat {
                    param: format!("#{i}"),
                    reason: format!("not a number: '{}'", part.trim()),
                })
        })
        .collect()
}
