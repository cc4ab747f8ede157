//! Criterion benchmarks for stompbox effects
//!
//! Each effect is timed on one-second chunks, the unit the streaming
//! processor feeds it. Run with: cargo bench
#![allow(missing_docs)]

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use stompbox_core::Effect;
use stompbox_effects::{Chorus, Distortion, Phaser, Reverb, apply_delay};

const SAMPLE_RATE: u32 = 44100;

fn test_signal(len: usize) -> Vec<f32> {
    (0..len)
        .map(|i| {
            let t = i as f32 / SAMPLE_RATE as f32;
            (2.0 * std::f32::consts::PI * 220.0 * t).sin() * 0.5
        })
        .collect()
}

fn bench_chunk<E: Effect>(c: &mut Criterion, name: &str, mut effect: E) {
    let input = test_signal(SAMPLE_RATE as usize);
    let mut output = vec![0.0; input.len()];
    c.bench_function(name, |b| {
        b.iter(|| {
            effect.process_block(black_box(&input), &mut output);
            black_box(output[0])
        })
    });
}

fn bench_effects(c: &mut Criterion) {
    let sr = SAMPLE_RATE as f32;
    bench_chunk(c, "chorus_1s", Chorus::new(sr));
    bench_chunk(c, "reverb_1s", Reverb::new(sr));
    bench_chunk(c, "distortion_1s", Distortion::new(sr));
    bench_chunk(c, "phaser_1s", Phaser::new(sr));
}

fn bench_echo(c: &mut Criterion) {
    let mut group = c.benchmark_group("echo");
    for secs in [1usize, 10, 60] {
        let input = test_signal(SAMPLE_RATE as usize * secs);
        group.bench_with_input(BenchmarkId::from_parameter(secs), &input, |b, input| {
            b.iter(|| black_box(apply_delay(black_box(input), SAMPLE_RATE, 0.25, 0.5)))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_effects, bench_echo);
criterion_main!(benches);
