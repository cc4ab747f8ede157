//! File-based effect processing command.

use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::{Context, bail};
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use stompbox_analysis::Comparison;
use stompbox_config::params::{parse_assignment, parse_values};
use stompbox_config::{DEFAULT_OUTPUT_PATH, EffectKind, EffectParams, Request};
use stompbox_io::{CancelToken, Error, OutputSink, WavFormat, WavSpec, process, read_signal};

#[derive(Args)]
pub struct ProcessArgs {
    /// Input WAV file (may come from --request instead)
    #[arg(value_name = "INPUT")]
    input: Option<PathBuf>,

    /// Effect to apply: chorus, reverb, distortion, phaser or delay
    #[arg(short, long)]
    effect: Option<String>,

    /// Effect parameter as name=value (e.g. "decay=0.5", "delay_time_s=250ms")
    #[arg(short, long, value_name = "NAME=VALUE")]
    param: Vec<String>,

    /// All parameters positionally, in schema order (e.g. "1.0,0.5")
    #[arg(long, value_name = "V1,V2,...", conflicts_with = "param")]
    values: Option<String>,

    /// Request file (TOML); command-line options override its fields
    #[arg(short, long)]
    request: Option<PathBuf>,

    /// Output WAV file
    #[arg(short, long, value_name = "OUTPUT")]
    output: Option<PathBuf>,

    /// Output bit depth (16, 24, or 32-bit float); defaults to the input's
    #[arg(long)]
    bit_depth: Option<u16>,

    /// Require every parameter to be given instead of using defaults
    #[arg(long)]
    strict: bool,

    /// Write a JSON comparison report
    #[arg(long, value_name = "FILE")]
    json: Option<PathBuf>,

    /// Save the resolved request as TOML
    #[arg(long, value_name = "FILE")]
    save_request: Option<PathBuf>,

    /// Hide the progress bar
    #[arg(long)]
    no_progress: bool,
}

/// Merge the request file and command-line options into one validated request.
fn resolve_request(args: &ProcessArgs) -> anyhow::Result<(Request, EffectParams)> {
    let base = match &args.request {
        Some(path) => Some(
            Request::load(path)
                .with_context(|| format!("failed to load request {}", path.display()))?,
        ),
        None => None,
    };

    let input = match (&args.input, &base) {
        (Some(input), _) => input.clone(),
        (None, Some(base)) => base.input.clone(),
        (None, None) => bail!("No input file. Pass INPUT or --request"),
    };

    let kind = match (&args.effect, &base) {
        (Some(name), _) => name.parse::<EffectKind>()?,
        (None, Some(base)) => base.effect,
        (None, None) => bail!("No effect specified. Use --effect or --request"),
    };

    let output = args
        .output
        .clone()
        .or_else(|| base.as_ref().map(|b| b.output.clone()))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_PATH));

    let params = if let Some(values) = &args.values {
        EffectParams::validate(kind, &parse_values(values)?)?
    } else {
        // Request-file params only apply when the effect was not switched.
        let mut named: BTreeMap<String, f32> = match &base {
            Some(base) if base.effect == kind => base.params.clone(),
            _ => BTreeMap::new(),
        };
        for assignment in &args.param {
            let (name, value) = parse_assignment(kind, assignment)?;
            named.insert(name, value);
        }
        EffectParams::from_named(kind, &named, args.strict)?
    };

    let request = Request::new(input, &params).with_output(output);
    Ok((request, params))
}

fn output_sink(
    args: &ProcessArgs,
    request: &Request,
    input: &WavSpec,
) -> anyhow::Result<OutputSink> {
    let sink = match args.bit_depth {
        None => OutputSink::matching(&request.output, input),
        Some(32) => OutputSink::float(&request.output),
        Some(bits @ (16 | 24)) => OutputSink {
            path: request.output.clone(),
            bits_per_sample: bits,
            format: WavFormat::Pcm,
        },
        Some(other) => bail!("Unsupported bit depth {other} (use 16, 24 or 32)"),
    };
    Ok(sink)
}

pub fn run(args: ProcessArgs) -> anyhow::Result<()> {
    let (request, params) = resolve_request(&args)?;

    if let Some(path) = &args.save_request {
        request
            .save(path)
            .with_context(|| format!("failed to save request {}", path.display()))?;
        println!("Saved request to {}", path.display());
    }

    println!("Reading {}...", request.input.display());
    let (signal, spec) = read_signal(&request.input)
        .with_context(|| format!("failed to read {}", request.input.display()))?;
    println!(
        "  {} frames, {} Hz, {} channel(s), {:.2}s",
        signal.frames(),
        signal.sample_rate(),
        signal.channels(),
        signal.duration_secs()
    );

    let settings: Vec<String> = params.iter().map(|(n, v)| format!("{n}={v}")).collect();
    println!("Applying {} ({})", params.kind(), settings.join(", "));
    if params.kind().is_whole_signal() && signal.channels() > 1 {
        println!("  {} uses the first channel only; output is mono", params.kind());
    }

    let sink = output_sink(&args, &request, &spec)?;

    let cancel = CancelToken::new();
    let handle = cancel.clone();
    ctrlc::set_handler(move || {
        eprintln!("\nCancelling...");
        handle.cancel();
    })?;

    let chunks = signal.frames().div_ceil(signal.sample_rate() as usize);
    let pb = if args.no_progress {
        ProgressBar::hidden()
    } else {
        ProgressBar::new(chunks as u64)
    };
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")?
            .progress_chars("##-"),
    );

    let result = match process(
        &signal,
        &params,
        &sink,
        |p| pb.set_position(p.chunk as u64),
        &cancel,
    ) {
        Ok(result) => result,
        Err(Error::Cancelled) => {
            pb.abandon();
            bail!("Cancelled; {} was not modified", request.output.display());
        }
        Err(e) => {
            pb.abandon();
            return Err(e)
                .with_context(|| format!("failed to process {}", request.input.display()));
        }
    };
    pb.finish();

    let comparison = Comparison::from_output(signal, result)
        .with_context(|| format!("failed to read back {}", request.output.display()))?;
    let report = comparison.report(&params);

    println!("\nWrote {}", comparison.output_path.display());
    println!("  Elapsed:    {:.3}s", report.elapsed_secs);
    println!(
        "  Peak:       original {:.1} dB, processed {:.1} dB",
        report.original.peak_db, report.processed.peak_db
    );
    println!("  Scale:      {:.4}", report.scale);
    println!(
        "  RMS:        original {:.1} dB, normalized {:.1} dB",
        report.original.rms_db, report.normalized.rms_db
    );
    println!("  RMSE:       {:.5}", report.rmse);
    match report.snr_db {
        Some(snr) => println!("  SNR:        {snr:.1} dB"),
        None => println!("  SNR:        inf (identical)"),
    }

    if let Some(path) = &args.json {
        let json = report.to_json()?;
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report {}", path.display()))?;
        println!("Report written to {}", path.display());
    }

    Ok(())
}
