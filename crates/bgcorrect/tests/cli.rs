use assert_cmd::Command;
use bgcorrect::session::SessionReport;
use bgcorrect::SessionState;
use predicates::prelude::*;
use serde_json::{json, Value};
use std::fs;
use std::path::Path;

/// 60x40 image, brighter towards the right: `100 + x`.
fn write_ramp_png(path: &Path) {
    let img = image::GrayImage::from_fn(60, 40, |x, _| image::Luma([(100 + x) as u8]));
    img.save(path).expect("write input png");
}

fn write_config(dir: &Path, clicks: Value) -> std::path::PathBuf {
    let cfg = json!({
        "image_path": dir.join("input.png"),
        "identity": "ramp",
        "params": { "grid": { "columns": 2, "rows": 2 }, "border": 1, "preview_scale": 4 },
        "clicks": clicks,
        "preview_path": dir.join("preview.png"),
        "background_path": dir.join("background.png"),
        "corrected_path": dir.join("corrected.png"),
        "report_path": dir.join("report.json"),
    });
    let path = dir.join("replay.json");
    fs::write(&path, serde_json::to_string_pretty(&cfg).unwrap()).unwrap();
    path
}

#[test]
fn complete_replay_writes_flattened_image() {
    let dir = tempfile::tempdir().unwrap();
    write_ramp_png(&dir.path().join("input.png"));
    let config = write_config(dir.path(), json!([[1, 1], [59, 1], [1, 39], [59, 39]]));

    Command::cargo_bin("bgcorrect")
        .unwrap()
        .arg(&config)
        .arg("--log-level")
        .arg("warn")
        .assert()
        .success()
        .stdout(predicate::str::contains("background corrected"));

    let corrected = image::open(dir.path().join("corrected.png"))
        .unwrap()
        .to_luma8();
    assert_eq!(corrected.dimensions(), (60, 40));
    let (lo, hi) = corrected
        .pixels()
        .fold((u8::MAX, u8::MIN), |(lo, hi), p| (lo.min(p[0]), hi.max(p[0])));
    assert!(hi - lo <= 4, "corrected range {lo}..{hi}");
    assert!(dir.path().join("background.png").exists());

    let report = SessionReport::load_json(dir.path().join("report.json")).unwrap();
    assert_eq!(report.state, SessionState::Ready);
    assert_eq!(report.samples.len(), 4);
    assert!(report.missing.is_empty());
    assert!(report.darkest.is_some());
    assert!(report.error.is_none());
}

#[test]
fn incomplete_replay_writes_preview_only() {
    let dir = tempfile::tempdir().unwrap();
    write_ramp_png(&dir.path().join("input.png"));
    let config = write_config(dir.path(), json!([[1, 1], [80, 1], [59, 1]]));

    Command::cargo_bin("bgcorrect")
        .unwrap()
        .arg(&config)
        .assert()
        .code(2)
        .stdout(predicate::str::contains("1 rejected"));

    let preview = image::open(dir.path().join("preview.png"))
        .unwrap()
        .to_luma8();
    assert_eq!(preview.dimensions(), (15, 10));
    assert!(!dir.path().join("corrected.png").exists());

    let report = SessionReport::load_json(dir.path().join("report.json")).unwrap();
    assert_eq!(report.state, SessionState::Collecting);
    assert_eq!(report.missing.len(), 2);
    assert_eq!(report.rejected.len(), 1);
    assert_eq!((report.rejected[0].x, report.rejected[0].y), (80, 1));
}

#[test]
fn missing_config_fails() {
    Command::cargo_bin("bgcorrect")
        .unwrap()
        .arg("/no/such/replay.json")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error"));
}
