//! Property-based tests for the stompbox effects.
//!
//! Covers the recursive echo's algebraic properties, finite output for every
//! effect across its declared parameter ranges, and chunk-split invariance of
//! the stateful effects.

use proptest::prelude::*;
use stompbox_core::{Effect, EffectWithParams, ParamDescriptor};
use stompbox_effects::echo::{apply_delay, delay_samples};
use stompbox_effects::{
    CHORUS_PARAMS, Chorus, DISTORTION_PARAMS, Distortion, PHASER_PARAMS, Phaser, REVERB_PARAMS,
    Reverb,
};

const SAMPLE_RATE: f32 = 44100.0;

/// Build effect `idx` with parameters interpolated from normalized values.
fn build_effect(idx: usize, t: &[f32; 8]) -> Box<dyn EffectWithParams + Send> {
    let mut effect: Box<dyn EffectWithParams + Send> = match idx % 4 {
        0 => Box::new(Chorus::new(SAMPLE_RATE)),
        1 => Box::new(Reverb::new(SAMPLE_RATE)),
        2 => Box::new(Distortion::new(SAMPLE_RATE)),
        _ => Box::new(Phaser::new(SAMPLE_RATE)),
    };
    let table: &[ParamDescriptor] = match idx % 4 {
        0 => &CHORUS_PARAMS,
        1 => &REVERB_PARAMS,
        2 => &DISTORTION_PARAMS,
        _ => &PHASER_PARAMS,
    };
    let values: Vec<f32> = table
        .iter()
        .zip(t.iter())
        .map(|(d, &t)| d.min + t * (d.max - d.min))
        .collect();
    effect.effect_apply_params(&values);
    effect.reset();
    effect
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Zero decay leaves the signal untouched for every delay time.
    #[test]
    fn echo_zero_decay_is_identity(
        input in prop::collection::vec(-1.0f32..=1.0f32, 0..512),
        sample_rate in 1u32..96000,
        delay_time_s in 0.0f32..=2.0f32,
    ) {
        let out = apply_delay(&input, sample_rate, delay_time_s, 0.0);
        prop_assert_eq!(out, input);
    }

    /// A delay at least as long as the signal leaves it untouched.
    #[test]
    fn echo_long_delay_is_identity(
        input in prop::collection::vec(-1.0f32..=1.0f32, 0..256),
        decay in 0.0f32..=1.0f32,
    ) {
        // 2 s at 256 Hz is 512 samples, longer than any generated input.
        prop_assert!(delay_samples(256, 2.0) >= input.len());
        let out = apply_delay(&input, 256, 2.0, decay);
        prop_assert_eq!(out, input);
    }

    /// Two runs over the same input agree bit for bit.
    #[test]
    fn echo_is_deterministic(
        input in prop::collection::vec(-1.0f32..=1.0f32, 0..1024),
        sample_rate in 1u32..48000,
        delay_time_s in 0.0f32..=2.0f32,
        decay in 0.0f32..=1.0f32,
    ) {
        let a = apply_delay(&input, sample_rate, delay_time_s, decay);
        let b = apply_delay(&input, sample_rate, delay_time_s, decay);
        prop_assert_eq!(a.len(), input.len());
        let a_bits: Vec<u32> = a.iter().map(|x| x.to_bits()).collect();
        let b_bits: Vec<u32> = b.iter().map(|x| x.to_bits()).collect();
        prop_assert_eq!(a_bits, b_bits);
    }

    /// Before the first repeat, output equals input.
    #[test]
    fn echo_prefix_is_dry(
        input in prop::collection::vec(-1.0f32..=1.0f32, 1..512),
        delay_time_s in 0.0f32..=2.0f32,
        decay in 0.0f32..=1.0f32,
    ) {
        let out = apply_delay(&input, 100, delay_time_s, decay);
        let d = delay_samples(100, delay_time_s).min(input.len());
        prop_assert_eq!(&out[..d], &input[..d]);
    }

    /// Every effect produces finite output anywhere in its parameter space.
    #[test]
    fn effects_finite_output(
        input in prop::array::uniform32(-1.0f32..=1.0f32),
        params in prop::array::uniform8(0.0f32..=1.0f32),
        effect_idx in 0usize..4,
    ) {
        let mut effect = build_effect(effect_idx, &params);
        for _ in 0..8 {
            for &x in &input {
                let y = effect.process(x);
                prop_assert!(y.is_finite(), "effect {} produced {} for {}", effect_idx, y, x);
            }
        }
    }

    /// Splitting a signal into chunks never changes the output.
    #[test]
    fn effects_chunk_split_invariant(
        input in prop::collection::vec(-1.0f32..=1.0f32, 2..2048),
        split in 1usize..2047,
        params in prop::array::uniform8(0.0f32..=1.0f32),
        effect_idx in 0usize..4,
    ) {
        let split = split.min(input.len() - 1);

        let mut whole = build_effect(effect_idx, &params);
        let mut expected = vec![0.0; input.len()];
        whole.process_block(&input, &mut expected);

        let mut chunked = build_effect(effect_idx, &params);
        let mut actual = vec![0.0; input.len()];
        let (head, tail) = actual.split_at_mut(split);
        chunked.process_block(&input[..split], head);
        chunked.process_block(&input[split..], tail);

        let e: Vec<u32> = expected.iter().map(|x| x.to_bits()).collect();
        let a: Vec<u32> = actual.iter().map(|x| x.to_bits()).collect();
        prop_assert_eq!(e, a);
    }
}
