//! Integration tests for the `stompbox` binary.

use std::path::Path;
use std::process::Command;

use stompbox_io::{Signal, WavSpec, read_signal, read_wav_info, write_signal};
use tempfile::tempdir;

/// Helper to get the path to the `stompbox` binary built by cargo.
fn stompbox_bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_stompbox"))
}

fn write_impulse(path: &Path) {
    let signal = Signal::mono(4, vec![1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0]).unwrap();
    write_signal(path, &signal, WavSpec::float(1, 4)).unwrap();
}

fn write_stereo_tone(path: &Path) {
    let left: Vec<f32> = (0..16000)
        .map(|i| 0.5 * (2.0 * std::f32::consts::PI * 440.0 * i as f32 / 8000.0).sin())
        .collect();
    let right: Vec<f32> = left.iter().map(|s| s * 0.5).collect();
    let signal = Signal::from_channels(8000, &[left, right]).unwrap();
    write_signal(path, &signal, WavSpec::pcm(2, 8000, 16)).unwrap();
}

// ---------------------------------------------------------------------------
// `stompbox effects`
// ---------------------------------------------------------------------------

#[test]
fn cli_effects_lists_all_effects() {
    let output = stompbox_bin()
        .arg("effects")
        .output()
        .expect("failed to run stompbox effects");

    assert!(output.status.success(), "stompbox effects failed");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Available Effects"));
    for effect in ["chorus", "reverb", "distortion", "phaser", "delay"] {
        assert!(stdout.contains(effect), "listing should contain '{effect}'");
    }
}

#[test]
fn cli_effects_detail_shows_parameters() {
    let output = stompbox_bin()
        .args(["effects", "delay"])
        .output()
        .expect("failed to run stompbox effects delay");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Parameters"));
    assert!(stdout.contains("delay_time_s"));
    assert!(stdout.contains("decay"));
}

#[test]
fn cli_effects_json_schema() {
    let output = stompbox_bin()
        .args(["effects", "--json", "phaser"])
        .output()
        .expect("failed to run stompbox effects --json");

    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let params = value[0]["params"].as_array().unwrap();
    assert_eq!(params.len(), 5);
    assert_eq!(params[2]["name"], "centre_frequency_hz");
    assert_eq!(params[2]["max"], 1300.0);
}

#[test]
fn cli_effects_unknown_fails() {
    let output = stompbox_bin().args(["effects", "wah"]).output().unwrap();
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("unknown effect"));
}

// ---------------------------------------------------------------------------
// `stompbox process`
// ---------------------------------------------------------------------------

#[test]
fn cli_process_delay_impulse() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("impulse.wav");
    let out = dir.path().join("out.wav");
    let report = dir.path().join("report.json");
    write_impulse(&input);

    let status = stompbox_bin()
        .arg("process")
        .arg(&input)
        .args(["--effect", "delay", "--values", "1.0,0.5", "--no-progress"])
        .arg("--output")
        .arg(&out)
        .arg("--json")
        .arg(&report)
        .status()
        .unwrap();
    assert!(status.success());

    let (processed, _) = read_signal(&out).unwrap();
    assert_eq!(processed.samples(), &[1.0, 0.0, 0.0, 0.0, 1.5, 0.0, 0.0, 0.0]);

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&report).unwrap()).unwrap();
    assert_eq!(json["effect"], "delay");
    assert_eq!(json["params"]["decay"], 0.5);
    assert_eq!(json["processed"]["frames"], 8);
    assert!(json["elapsed_secs"].as_f64().unwrap() >= 0.0);
    assert!(json["rmse"].as_f64().unwrap() > 0.0);
    assert!(json["original"]["peak_db"].as_f64().unwrap().abs() < 1e-4);
}

#[test]
fn cli_process_prints_level_summary() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("in.wav");
    write_impulse(&input);

    let output = stompbox_bin()
        .arg("process")
        .arg(&input)
        .args(["--effect", "delay", "--values", "1.0,0.5", "--no-progress"])
        .arg("--output")
        .arg(dir.path().join("out.wav"))
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("processed 3.5 dB"));
    assert!(stdout.contains("RMSE:"));
}

#[test]
fn cli_process_stereo_mirrors_format() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("tone.wav");
    let out = dir.path().join("chorus.wav");
    write_stereo_tone(&input);

    let status = stompbox_bin()
        .arg("process")
        .arg(&input)
        .args(["-e", "chorus", "-p", "rate_hz=2", "-p", "mix=50%", "--no-progress"])
        .arg("-o")
        .arg(&out)
        .status()
        .unwrap();
    assert!(status.success());

    let info = read_wav_info(&out).unwrap();
    assert_eq!(info.channels, 2);
    assert_eq!(info.bits_per_sample, 16);
    assert_eq!(info.num_frames, 16000);
}

#[test]
fn cli_process_default_output_path() {
    let dir = tempdir().unwrap();
    write_impulse(&dir.path().join("in.wav"));

    let status = stompbox_bin()
        .current_dir(dir.path())
        .args(["process", "in.wav", "--effect", "distortion", "--no-progress"])
        .status()
        .unwrap();
    assert!(status.success());
    assert!(dir.path().join("processed_output").join("output.wav").exists());
}

#[test]
fn cli_process_out_of_range_writes_nothing() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("in.wav");
    let out = dir.path().join("out.wav");
    write_impulse(&input);

    let output = stompbox_bin()
        .arg("process")
        .arg(&input)
        .args(["--effect", "distortion", "--param", "drive_db=80", "--no-progress"])
        .arg("--output")
        .arg(&out)
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("out of range"));
    assert!(!out.exists());
}

#[test]
fn cli_process_wrong_value_count_fails() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("in.wav");
    write_impulse(&input);

    let output = stompbox_bin()
        .arg("process")
        .arg(&input)
        .args(["--effect", "reverb", "--values", "0.5,0.5", "--no-progress"])
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("expects 6"));
}

#[test]
fn cli_process_strict_requires_all_params() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("in.wav");
    write_impulse(&input);

    let output = stompbox_bin()
        .arg("process")
        .arg(&input)
        .args(["--effect", "delay", "--param", "decay=0.5", "--strict", "--no-progress"])
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("missing parameter"));
}

#[test]
fn cli_process_request_round_trip() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("in.wav");
    let out = dir.path().join("out.wav");
    let saved = dir.path().join("requests").join("delay.toml");
    write_impulse(&input);

    let status = stompbox_bin()
        .arg("process")
        .arg(&input)
        .args(["--effect", "delay", "--param", "delay_time_s=1", "--param", "decay=0.25"])
        .arg("--output")
        .arg(&out)
        .arg("--save-request")
        .arg(&saved)
        .arg("--no-progress")
        .status()
        .unwrap();
    assert!(status.success());
    assert!(saved.exists());
    std::fs::remove_file(&out).unwrap();

    let status = stompbox_bin()
        .args(["process", "--no-progress", "--request"])
        .arg(&saved)
        .status()
        .unwrap();
    assert!(status.success());

    let (processed, _) = read_signal(&out).unwrap();
    assert_eq!(processed.samples()[4], 1.25);
}

// ---------------------------------------------------------------------------
// `stompbox info`
// ---------------------------------------------------------------------------

#[test]
fn cli_info_shows_header() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("tone.wav");
    write_stereo_tone(&input);

    let output = stompbox_bin()
        .arg("info")
        .arg(&input)
        .arg("--levels")
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("8000 Hz"));
    assert!(stdout.contains("PCM 16-bit"));
    assert!(stdout.contains("Channels:    2"));
    assert!(stdout.contains("Channel 1:"));
}
