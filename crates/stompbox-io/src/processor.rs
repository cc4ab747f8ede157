//! The chunked effect processor.
//!
//! A signal is streamed to disk one second (one `sample_rate` worth of
//! frames) at a time. Streaming effects run per channel per chunk, with one
//! effect instance per channel kept alive for the whole signal. The recursive
//! echo instead runs once over the complete first channel before any writing
//! starts; only its output is chunked.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use stompbox_config::{EffectParams, create_effect};
use stompbox_core::EffectWithParams;
use stompbox_effects::{ECHO_PARAMS, apply_delay};
use tracing::{debug, info};

use crate::{
    CancelToken, ChunkWriter, Error, NumericError, Progress, Result, Signal, WavFormat, WavSpec,
};

/// Where and how processed audio is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputSink {
    /// Destination file. Replaced atomically on success.
    pub path: PathBuf,
    /// Bit depth of the written samples.
    pub bits_per_sample: u16,
    /// Integer or float samples.
    pub format: WavFormat,
}

impl OutputSink {
    /// Write in the same sample format as `input`.
    pub fn matching(path: impl Into<PathBuf>, input: &WavSpec) -> Self {
        Self {
            path: path.into(),
            bits_per_sample: input.bits_per_sample,
            format: input.format,
        }
    }

    /// Write 32-bit float samples.
    pub fn float(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            bits_per_sample: 32,
            format: WavFormat::IeeeFloat,
        }
    }

    fn spec(&self, channels: u16, sample_rate: u32) -> WavSpec {
        WavSpec {
            channels,
            sample_rate,
            bits_per_sample: self.bits_per_sample,
            format: self.format,
        }
    }
}

/// Outcome of one [`process`] call.
#[derive(Debug, Clone)]
pub struct ProcessingResult {
    /// Effect output as handed to the writer, before any integer clamping
    /// or quantization. Read the file back for the stored samples.
    pub processed: Signal,
    /// Wall-clock time spent in the chunk loop.
    pub elapsed: Duration,
    /// Path of the finished output file.
    pub output_path: PathBuf,
}

enum ChunkSource {
    /// One streaming effect per input channel.
    PerChannel(Vec<Box<dyn EffectWithParams + Send>>),
    /// Fully computed mono output.
    Whole(Vec<f32>),
}

/// Apply `params` to `input` and write the result to `sink`.
///
/// `on_progress` is called after every written chunk with a non-decreasing
/// fraction that reaches exactly 1.0 on the last one. `cancel` is checked
/// before each chunk.
///
/// The output has the input's channel count, except for whole-signal effects
/// (the echo), which read and write the first channel only.
///
/// # Errors
///
/// - [`Error::EmptySignal`] if `input` has no frames
/// - [`Error::Cancelled`] if `cancel` fires; no output file is produced
/// - [`Error::Numeric`] if the effect produces NaN or infinity
/// - [`Error::Io`] / [`Error::Wav`] on any write failure
///
/// On every error the destination is left as it was before the call.
pub fn process<F>(
    input: &Signal,
    params: &EffectParams,
    sink: &OutputSink,
    mut on_progress: F,
    cancel: &CancelToken,
) -> Result<ProcessingResult>
where
    F: FnMut(Progress),
{
    if input.is_empty() {
        return Err(Error::EmptySignal);
    }

    let sample_rate = input.sample_rate();
    let frames = input.frames();
    let chunk_frames = sample_rate as usize;
    let chunks = frames.div_ceil(chunk_frames);

    let out_channels = if params.kind().is_whole_signal() {
        1
    } else {
        input.channels()
    };

    info!(
        effect = %params.kind(),
        sample_rate,
        channels = input.channels(),
        frames,
        chunks,
        "processing"
    );

    // Opening the writer validates the output format before any effect
    // buffers are sized from the sample rate.
    let mut writer = ChunkWriter::create(&sink.path, sink.spec(out_channels, sample_rate))?;
    let mut source = build_source(input, params);
    let out_stride = usize::from(out_channels);
    let mut processed = Vec::with_capacity(frames * out_stride);
    // A header rate can be far larger than the signal itself.
    let buffer_frames = chunk_frames.min(frames);
    let mut chunk_out = vec![0.0f32; buffer_frames * out_stride];
    let mut scratch_in = vec![0.0f32; buffer_frames];
    let mut scratch_out = vec![0.0f32; buffer_frames];

    let start = Instant::now();

    for chunk in 0..chunks {
        if cancel.is_cancelled() {
            info!(chunk, chunks, "processing cancelled");
            writer.discard();
            return Err(Error::Cancelled);
        }

        let first = chunk * chunk_frames;
        let end = (first + chunk_frames).min(frames);
        let len = end - first;
        let out = &mut chunk_out[..len * out_stride];

        match &mut source {
            ChunkSource::PerChannel(effects) => {
                let in_stride = usize::from(input.channels());
                let frame_samples = &input.samples()[first * in_stride..end * in_stride];
                for (ch, effect) in effects.iter_mut().enumerate() {
                    for (dst, frame) in scratch_in.iter_mut().zip(frame_samples.chunks_exact(in_stride)) {
                        *dst = frame[ch];
                    }
                    effect.process_block(&scratch_in[..len], &mut scratch_out[..len]);
                    for (frame, &y) in out.chunks_exact_mut(in_stride).zip(&scratch_out[..len]) {
                        frame[ch] = y;
                    }
                }
            }
            ChunkSource::Whole(mono) => out.copy_from_slice(&mono[first..end]),
        }

        if let Some(pos) = out.iter().position(|s| !s.is_finite()) {
            return Err(NumericError::NonFinite {
                stage: "effect",
                index: first * out_stride + pos,
            }
            .into());
        }

        writer.write_chunk(out)?;
        processed.extend_from_slice(out);

        debug!(chunk = chunk + 1, chunks, frames = len, "chunk written");
        on_progress(Progress {
            chunk: chunk + 1,
            chunks,
            fraction: (end as f64 / frames as f64).min(1.0),
        });
    }

    let elapsed = start.elapsed();
    let output_path = writer.finalize()?;

    info!(
        elapsed_ms = elapsed.as_secs_f64() * 1000.0,
        output = %output_path.display(),
        "processing complete"
    );

    Ok(ProcessingResult {
        processed: Signal::new(sample_rate, out_channels, processed)?,
        elapsed,
        output_path,
    })
}

fn build_source(input: &Signal, params: &EffectParams) -> ChunkSource {
    let sample_rate = input.sample_rate() as f32;
    match create_effect(params, sample_rate) {
        Some(first) => {
            let mut effects = Vec::with_capacity(usize::from(input.channels()));
            effects.push(first);
            for _ in 1..input.channels() {
                effects.extend(create_effect(params, sample_rate));
            }
            ChunkSource::PerChannel(effects)
        }
        None => {
            let delay_time_s = params
                .get(ECHO_PARAMS[0].name)
                .unwrap_or(ECHO_PARAMS[0].default);
            let decay = params.get(ECHO_PARAMS[1].name).unwrap_or(ECHO_PARAMS[1].default);
            let first_channel = input.channel(0);
            ChunkSource::Whole(apply_delay(
                &first_channel,
                input.sample_rate(),
                delay_time_s,
                decay,
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use stompbox_config::EffectKind;
    use tempfile::tempdir;

    fn run(
        input: &Signal,
        params: &EffectParams,
        dir: &Path,
    ) -> (ProcessingResult, Vec<Progress>) {
        let mut reports = Vec::new();
        let sink = OutputSink::float(dir.join("out.wav"));
        let result = process(input, params, &sink, |p| reports.push(p), &CancelToken::new())
            .unwrap();
        (result, reports)
    }

    #[test]
    fn delay_scenario() {
        let dir = tempdir().unwrap();
        let input = Signal::mono(4, vec![1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0]).unwrap();
        let params = EffectParams::validate(EffectKind::Delay, &[1.0, 0.5]).unwrap();

        let (result, reports) = run(&input, &params, dir.path());
        assert_eq!(
            result.processed.samples(),
            &[1.0, 0.0, 0.0, 0.0, 1.5, 0.0, 0.0, 0.0]
        );
        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0].fraction, 0.5);
        assert_eq!(reports[1].fraction, 1.0);
        assert!(reports[1].is_done());
    }

    #[test]
    fn delay_uses_first_channel_only() {
        let dir = tempdir().unwrap();
        let input =
            Signal::from_channels(4, &[vec![1.0, 0.0, 0.0, 0.0, 0.0], vec![9.0; 5]]).unwrap();
        let params = EffectParams::validate(EffectKind::Delay, &[1.0, 1.0]).unwrap();

        let (result, _) = run(&input, &params, dir.path());
        assert_eq!(result.processed.channels(), 1);
        assert_eq!(result.processed.samples(), &[1.0, 0.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn short_final_chunk() {
        let dir = tempdir().unwrap();
        let input = Signal::new(10, 2, vec![0.25; 2 * 25]).unwrap();
        let params = EffectParams::validate(EffectKind::Distortion, &[0.0]).unwrap();

        let (result, reports) = run(&input, &params, dir.path());
        assert_eq!(result.processed.frames(), 25);
        assert_eq!(result.processed.channels(), 2);
        let fractions: Vec<f64> = reports.iter().map(|p| p.fraction).collect();
        assert_eq!(fractions, [0.4, 0.8, 1.0]);
    }

    #[test]
    fn channels_do_not_share_state() {
        let dir = tempdir().unwrap();
        let impulse: Vec<f32> = (0..200).map(|i| if i == 0 { 1.0 } else { 0.0 }).collect();
        let silent = vec![0.0; 200];
        let input = Signal::from_channels(100, &[impulse, silent]).unwrap();
        let params =
            EffectParams::validate(EffectKind::Reverb, &[0.9, 0.1, 1.0, 0.0, 1.0, 0.0]).unwrap();

        let (result, _) = run(&input, &params, dir.path());
        assert!(result.processed.channel(1).iter().all(|&s| s == 0.0));
    }

    #[test]
    fn cancelled_before_start_writes_nothing() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("out.wav");
        let input = Signal::mono(10, vec![0.1; 30]).unwrap();
        let params = EffectParams::defaults(EffectKind::Chorus);
        let cancel = CancelToken::new();
        cancel.cancel();

        let mut calls = 0;
        let result = process(&input, &params, &OutputSink::float(&target), |_| calls += 1, &cancel);
        assert!(matches!(result, Err(Error::Cancelled)));
        assert_eq!(calls, 0);
        assert!(!target.exists());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn cancelled_mid_stream_keeps_previous_output() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("out.wav");
        std::fs::write(&target, b"old").unwrap();
        let input = Signal::mono(10, vec![0.1; 50]).unwrap();
        let params = EffectParams::defaults(EffectKind::Phaser);
        let cancel = CancelToken::new();

        let result = process(
            &input,
            &params,
            &OutputSink::float(&target),
            |p| {
                if p.chunk == 2 {
                    cancel.cancel();
                }
            },
            &cancel,
        );
        assert!(matches!(result, Err(Error::Cancelled)));
        assert_eq!(std::fs::read(&target).unwrap(), b"old");
    }

    #[test]
    fn non_finite_output_is_rejected() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("out.wav");
        let input = Signal::mono(4, vec![0.0, f32::INFINITY, 0.0, 0.0]).unwrap();
        let params = EffectParams::validate(EffectKind::Delay, &[0.5, 1.0]).unwrap();

        let result = process(
            &input,
            &params,
            &OutputSink::float(&target),
            |_| {},
            &CancelToken::new(),
        );
        assert!(matches!(
            result,
            Err(Error::Numeric(NumericError::NonFinite { index: 1, .. }))
        ));
        assert!(!target.exists());
    }

    #[test]
    fn header_rate_larger_than_signal() {
        let dir = tempdir().unwrap();
        let input = Signal::mono(500_000_000, vec![0.1, 0.2, 0.3, 0.4]).unwrap();
        let params = EffectParams::validate(EffectKind::Distortion, &[0.0]).unwrap();

        let (result, reports) = run(&input, &params, dir.path());
        assert_eq!(result.processed.frames(), 4);
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].fraction, 1.0);
    }

    #[test]
    fn unrepresentable_rate_is_an_error() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("out.wav");
        let input = Signal::mono(2_000_000_000, vec![0.1, 0.2]).unwrap();
        let params = EffectParams::validate(EffectKind::Distortion, &[0.0]).unwrap();

        let result = process(
            &input,
            &params,
            &OutputSink::float(&target),
            |_| {},
            &CancelToken::new(),
        );
        assert!(matches!(result, Err(Error::UnsupportedFormat(_))));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn empty_signal() {
        let dir = tempdir().unwrap();
        let input = Signal::mono(44100, vec![]).unwrap();
        let params = EffectParams::defaults(EffectKind::Reverb);
        let result = process(
            &input,
            &params,
            &OutputSink::float(dir.path().join("out.wav")),
            |_| {},
            &CancelToken::new(),
        );
        assert!(matches!(result, Err(Error::EmptySignal)));
    }
}
