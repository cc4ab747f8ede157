//! The five effect kinds and their parameter schemas.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use stompbox_core::ParamDescriptor;
use stompbox_effects::{
    CHORUS_PARAMS, DISTORTION_PARAMS, ECHO_PARAMS, PHASER_PARAMS, REVERB_PARAMS,
};

use crate::ValidationError;

/// Which effect a request applies.
///
/// The kind fixes both the parameter schema and the processing path: the
/// first four run per channel and per chunk, [`EffectKind::Delay`] runs once
/// over the whole first channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EffectKind {
    /// Modulated short delay.
    Chorus,
    /// Freeverb-style room reverb.
    Reverb,
    /// Drive into a tanh waveshaper.
    Distortion,
    /// Swept allpass phaser.
    Phaser,
    /// Recursive feedback echo.
    Delay,
}

impl EffectKind {
    /// Every kind, in listing order.
    pub const ALL: [EffectKind; 5] = [
        EffectKind::Chorus,
        EffectKind::Reverb,
        EffectKind::Distortion,
        EffectKind::Phaser,
        EffectKind::Delay,
    ];

    /// Lowercase identifier used on the command line and in request files.
    pub const fn name(self) -> &'static str {
        match self {
            EffectKind::Chorus => "chorus",
            EffectKind::Reverb => "reverb",
            EffectKind::Distortion => "distortion",
            EffectKind::Phaser => "phaser",
            EffectKind::Delay => "delay",
        }
    }

    /// Ordered parameter schema.
    pub fn schema(self) -> &'static [ParamDescriptor] {
        match self {
            EffectKind::Chorus => &CHORUS_PARAMS,
            EffectKind::Reverb => &REVERB_PARAMS,
            EffectKind::Distortion => &DISTORTION_PARAMS,
            EffectKind::Phaser => &PHASER_PARAMS,
            EffectKind::Delay => &ECHO_PARAMS,
        }
    }

    /// One-line description for listings.
    pub const fn description(self) -> &'static str {
        match self {
            EffectKind::Chorus => "Modulated delay that thickens the sound",
            EffectKind::Reverb => "Algorithmic room reverb with freeze",
            EffectKind::Distortion => "Gain into a tanh soft clipper",
            EffectKind::Phaser => "Six-stage allpass phaser with LFO sweep",
            EffectKind::Delay => "Recursive echo over the first channel (mono output)",
        }
    }

    /// True when the effect must see the whole signal at once.
    ///
    /// Such effects only produce the first channel, and only their writes are
    /// chunked.
    pub const fn is_whole_signal(self) -> bool {
        matches!(self, EffectKind::Delay)
    }

    /// Position of `name` in the schema.
    pub fn param_index(self, name: &str) -> Option<usize> {
        self.schema().iter().position(|d| d.name == name)
    }
}

impl fmt::Display for EffectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for EffectKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        match lower.as_str() {
            "chorus" => Ok(EffectKind::Chorus),
            "reverb" => Ok(EffectKind::Reverb),
            "distortion" | "drive" => Ok(EffectKind::Distortion),
            "phaser" => Ok(EffectKind::Phaser),
            "delay" | "echo" => Ok(EffectKind::Delay),
            _ => Err(ValidationError::UnknownEffect(s.to_string())),
        }
    }
}
