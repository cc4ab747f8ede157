//! Builds per-channel effect instances from validated parameters.

use stompbox_core::EffectWithParams;
use stompbox_effects::{Chorus, Distortion, Phaser, Reverb};

use crate::{EffectKind, EffectParams};

/// Create one configured effect instance for a single channel.
///
/// Returns `None` for whole-signal kinds ([`EffectKind::Delay`]), which are
/// not streaming effects. Callers build one instance per channel and keep it
/// for the whole signal so state carries across chunk boundaries.
///
/// Parameter smoothing starts settled at the requested values: the effect is
/// reset after the values are applied.
///
/// # Example
///
/// ```rust
/// use stompbox_config::{EffectKind, EffectParams, create_effect};
///
/// let params = EffectParams::validate(EffectKind::Distortion, &[10.0]).unwrap();
/// let mut effect = create_effect(&params, 44100.0).unwrap();
/// assert_eq!(effect.process(0.0), 0.0);
///
/// let delay = EffectParams::defaults(EffectKind::Delay);
/// assert!(create_effect(&delay, 44100.0).is_none());
/// ```
pub fn create_effect(
    params: &EffectParams,
    sample_rate: f32,
) -> Option<Box<dyn EffectWithParams + Send>> {
    let mut effect: Box<dyn EffectWithParams + Send> = match params.kind() {
        EffectKind::Chorus => Box::new(Chorus::new(sample_rate)),
        EffectKind::Reverb => Box::new(Reverb::new(sample_rate)),
        EffectKind::Distortion => Box::new(Distortion::new(sample_rate)),
        EffectKind::Phaser => Box::new(Phaser::new(sample_rate)),
        EffectKind::Delay => return None,
    };
    effect.effect_apply_params(params.values());
    effect.reset();
    Some(effect)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn applies_every_value() {
        for kind in EffectKind::ALL.into_iter().filter(|k| !k.is_whole_signal()) {
            let values: Vec<f32> = kind
                .schema()
                .iter()
                .map(|d| d.min + 0.25 * (d.max - d.min))
                .collect();
            let params = EffectParams::validate(kind, &values).unwrap();
            let effect = create_effect(&params, 48000.0).unwrap();

            assert_eq!(effect.effect_param_count(), values.len());
            for (i, &v) in values.iter().enumerate() {
                assert!(
                    (effect.effect_get_param(i) - v).abs() < 1e-5,
                    "{kind} param {i}: {} != {v}",
                    effect.effect_get_param(i)
                );
            }
        }
    }

    #[test]
    fn descriptors_match_schema() {
        let params = EffectParams::defaults(EffectKind::Reverb);
        let effect = create_effect(&params, 44100.0).unwrap();
        for (i, desc) in EffectKind::Reverb.schema().iter().enumerate() {
            assert_eq!(effect.effect_param_info(i).as_ref(), Some(desc));
        }
    }

    #[test]
    fn instances_are_independent() {
        let params = EffectParams::validate(EffectKind::Chorus, &[1.0, 0.5, 7.0, 0.5, 1.0]).unwrap();
        let mut a = create_effect(&params, 44100.0).unwrap();
        let mut b = create_effect(&params, 44100.0).unwrap();
        for _ in 0..1000 {
            a.process(1.0);
        }
        let fresh = create_effect(&params, 44100.0).unwrap().process(0.25);
        assert_eq!(b.process(0.25), fresh);
    }
}
