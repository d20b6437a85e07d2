use serde_json::Value;
use std::fs;
use std::path::Path;
use std::process::{Command, Output};

fn run_heatreel(args: &[&str], envs: &[(&str, &str)]) -> Output {
    let exe = env!("CARGO_BIN_EXE_heatreel");
    let mut cmd = Command::new(exe);
    cmd.args(args);
    cmd.env_remove("HEATREEL_ENCODER");
    cmd.env("RUST_LOG", "warn");
    for (key, value) in envs {
        cmd.env(key, value);
    }
    cmd.output().expect("run heatreel")
}

fn run_effective_config(args: &[&str], envs: &[(&str, &str)]) -> Value {
    let mut all = vec!["--print-effective-config"];
    all.extend_from_slice(args);
    let output = run_heatreel(&all, envs);
    assert!(
        output.status.success(),
        "expected success, got status {:?}, stderr: {}",
        output.status.code(),
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("parse effective config json")
}

fn write_snapshots(dir: &Path, count: usize) {
    for i in 0..count {
        fs::write(dir.join(format!("sol_{i:05}")), "0.0  0.5  \n0.5  1.0  \n").unwrap();
    }
}

#[test]
fn effective_config_defaults() {
    let cfg = run_effective_config(&[], &[]);
    assert_eq!(cfg["input_dir"], ".");
    assert_eq!(cfg["marker"], "sol");
    assert_eq!(cfg["naming"]["prefix"], "sol_");
    assert_eq!(cfg["naming"]["index_width"], 5);
    assert_eq!(cfg["colormap"], "jet");
    assert_eq!(cfg["data_range"]["min"], 0.0);
    assert_eq!(cfg["data_range"]["max"], 1.0);
    assert_eq!(cfg["video_name"], "heat.avi");
    assert_eq!(cfg["include_initial"], false);
    assert_eq!(cfg["encoder"]["program"], "ffmpeg");
    assert!(cfg["encoder"]["frame_rate"].is_null());
}

#[test]
fn effective_config_cli_overrides() {
    let cfg = run_effective_config(
        &[
            "runs/a",
            "--colormap",
            "viridis",
            "--vmin",
            "-1",
            "--vmax",
            "2",
            "--scale",
            "4",
            "--framerate",
            "25",
            "--include-initial",
            "--no-encode",
        ],
        &[],
    );
    assert_eq!(cfg["input_dir"], "runs/a");
    assert_eq!(cfg["colormap"], "viridis");
    assert_eq!(cfg["data_range"]["min"], -1.0);
    assert_eq!(cfg["data_range"]["max"], 2.0);
    assert_eq!(cfg["scale"], 4);
    assert_eq!(cfg["encoder"]["frame_rate"], 25);
    assert_eq!(cfg["include_initial"], true);
    assert_eq!(cfg["encode"], false);
}

#[test]
fn effective_config_encoder_from_env_and_flag() {
    let cfg = run_effective_config(&[], &[("HEATREEL_ENCODER", "/opt/ffmpeg/bin/ffmpeg")]);
    assert_eq!(cfg["encoder"]["program"], "/opt/ffmpeg/bin/ffmpeg");

    let cfg = run_effective_config(
        &["--encoder", "avconv"],
        &[("HEATREEL_ENCODER", "/opt/ffmpeg/bin/ffmpeg")],
    );
    assert_eq!(cfg["encoder"]["program"], "avconv");
}

#[test]
fn effective_config_file_then_flags() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("heatreel.json");
    fs::write(
        &config,
        r#"{ "marker": "u_", "naming": { "prefix": "u_", "index_width": 4 }, "scale": 3 }"#,
    )
    .unwrap();

    let cfg = run_effective_config(
        &["--config", config.to_str().unwrap(), "--scale", "8"],
        &[],
    );
    assert_eq!(cfg["marker"], "u_");
    assert_eq!(cfg["naming"]["index_width"], 4);
    assert_eq!(cfg["scale"], 8);
}

#[test]
fn no_encode_writes_frames() {
    let dir = tempfile::tempdir().unwrap();
    write_snapshots(dir.path(), 3);

    let output = run_heatreel(&[dir.path().to_str().unwrap(), "--no-encode"], &[]);
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(!dir.path().join("00000.png").exists());
    assert!(dir.path().join("00001.png").exists());
    assert!(dir.path().join("00002.png").exists());
    assert!(!dir.path().join("heat.avi").exists());
}

#[test]
fn missing_encoder_fails_the_run() {
    let dir = tempfile::tempdir().unwrap();
    write_snapshots(dir.path(), 2);

    let output = run_heatreel(
        &[
            dir.path().to_str().unwrap(),
            "--encoder",
            "heatreel-no-such-encoder",
        ],
        &[],
    );
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("heatreel-no-such-encoder"), "stderr: {stderr}");
    assert!(stderr.contains("failed to process"), "stderr: {stderr}");
    assert!(stderr.contains("Caused by"), "stderr: {stderr}");
    // Frames written before the encoder step stay on disk.
    assert!(dir.path().join("00001.png").exists());
}

#[test]
fn sequence_gap_fails_the_run() {
    let dir = tempfile::tempdir().unwrap();
    write_snapshots(dir.path(), 2);
    fs::write(dir.path().join("solver.log"), "converged\n").unwrap();

    let output = run_heatreel(&[dir.path().to_str().unwrap(), "--no-encode"], &[]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("sol_00002"), "stderr: {stderr}");
}

#[test]
fn unknown_colormap_fails_the_run() {
    let dir = tempfile::tempdir().unwrap();
    write_snapshots(dir.path(), 2);

    let output = run_heatreel(
        &[dir.path().to_str().unwrap(), "--colormap", "plasma"],
        &[],
    );
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("plasma"), "stderr: {stderr}");
}
