// CLASSIFICATION: COMMUNITY
// Filename: pwmctl.rs v0.1
// Author: Lukas Bower
// Date Modified: 2026-10-18

use std::fs;
use std::path::Path;

use sysfspwm::cli::{execute, parse_from};
use sysfspwm::config::load_config;
use tempfile::tempdir;

fn write_config(dir: &Path, root: &Path) -> std::path::PathBuf {
    let path = dir.join("pwm.toml");
    fs::write(
        &path,
        format!(
            "sysfs_root = {:?}\n\n[export]\nattempts = 2\ninterval_ms = 1\n",
            root.display().to_string()
        ),
    )
    .unwrap();
    path
}

#[test]
fn config_file_overrides_defaults() {
    let dir = tempdir().unwrap();
    let cfg_path = write_config(dir.path(), Path::new("/tmp/pwm"));
    let cfg = load_config(&cfg_path).unwrap();
    assert_eq!(cfg.sysfs_root, Path::new("/tmp/pwm"));
    assert_eq!(cfg.export.attempts, 2);
    assert_eq!(cfg.export.interval_ms, 1);
}

#[test]
fn invalid_config_is_reported() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("pwm.toml");
    fs::write(&path, "[export]\nattempts = 0\n").unwrap();
    let err = load_config(&path).unwrap_err();
    assert!(err.to_string().contains("export.attempts"));
    assert!(load_config(&dir.path().join("missing.toml")).is_err());
}

#[test]
fn execute_configures_channel_from_arguments() {
    let dir = tempdir().unwrap();
    let root = dir.path().join("pwm");
    let ch = root.join("pwmchip0/pwm0");
    fs::create_dir_all(&ch).unwrap();
    fs::write(ch.join("enable"), "0\n").unwrap();
    fs::write(ch.join("period"), "").unwrap();
    fs::write(ch.join("duty_cycle"), "").unwrap();
    let cfg_path = write_config(dir.path(), &root);

    let req = parse_from([
        "pwmctl",
        "-c",
        "0",
        "-f",
        "1000",
        "-d",
        "25",
        "--config",
        cfg_path.to_str().unwrap(),
    ])
    .unwrap();
    execute(&req).unwrap();
    assert_eq!(fs::read_to_string(ch.join("period")).unwrap(), "1000000000");
    assert_eq!(fs::read_to_string(ch.join("duty_cycle")).unwrap(), "250000000");
    assert_eq!(fs::read_to_string(ch.join("enable")).unwrap(), "1\n");
}

#[test]
fn execute_reports_timeout_with_short_policy() {
    let dir = tempdir().unwrap();
    let root = dir.path().join("pwm");
    let chip = root.join("pwmchip1");
    fs::create_dir_all(&chip).unwrap();
    fs::write(chip.join("npwm"), "1\n").unwrap();
    fs::write(chip.join("export"), "").unwrap();
    let cfg_path = write_config(dir.path(), &root);

    let req = parse_from([
        "pwmctl",
        "--chip",
        "1",
        "-c",
        "0",
        "-f",
        "0",
        "--config",
        cfg_path.to_str().unwrap(),
    ])
    .unwrap();
    let err = execute(&req).unwrap_err();
    let msg = format!("{err:#}");
    assert!(msg.contains("pwmchip1/pwm0"), "{msg}");
    assert!(msg.contains("could not export channel 0"), "{msg}");
}
