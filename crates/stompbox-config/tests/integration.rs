//! File round-trips for request files.

use std::collections::BTreeMap;
use std::io::Write;

use stompbox_config::{ConfigError, EffectKind, EffectParams, Request};
use tempfile::{NamedTempFile, tempdir};

#[test]
fn save_and_load_request() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("presets").join("chorus.toml");

    let params = EffectParams::validate(EffectKind::Chorus, &[0.5, 0.4, 12.0, 0.2, 0.6]).unwrap();
    let request = Request::new("take1.wav", &params).with_output(dir.path().join("out.wav"));
    request.save(&path).unwrap();

    assert!(path.exists());
    let loaded = Request::load(&path).unwrap();
    assert_eq!(loaded, request);
    assert_eq!(loaded.resolve(true).unwrap(), params);
}

#[test]
fn load_handwritten_request() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(
        file,
        "input = \"voice.wav\"\neffect = \"delay\"\n\n[params]\ndelay_time_s = 1.0\ndecay = 0.5"
    )
    .unwrap();

    let request = Request::load(file.path()).unwrap();
    let params = request.resolve(true).unwrap();
    assert_eq!(params.values(), &[1.0, 0.5]);
}

#[test]
fn load_missing_file_reports_path() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nope.toml");
    let err = Request::load(&path).unwrap_err();
    assert!(matches!(err, ConfigError::ReadFile { .. }));
    assert!(err.to_string().contains("nope.toml"));
}

#[test]
fn unknown_param_in_file_fails_resolve() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(
        file,
        "input = \"a.wav\"\neffect = \"reverb\"\n[params]\nroom = 0.5"
    )
    .unwrap();
    let request = Request::load(file.path()).unwrap();
    let mut expected = BTreeMap::new();
    expected.insert("room".to_string(), 0.5);
    assert_eq!(request.params, expected);
    assert!(request.resolve(false).is_err());
}
