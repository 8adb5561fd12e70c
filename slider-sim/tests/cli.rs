use std::fs;

use assert_cmd::cargo::cargo_bin_cmd;
use serde_json::Value;

fn run_script(config: &str, script: &str, extra: &[&str]) -> Vec<Value> {
    let dir = tempfile::tempdir().expect("tempdir");
    let config_path = dir.path().join("slider.json");
    let script_path = dir.path().join("timeline.txt");
    fs::write(&config_path, config).expect("write config");
    fs::write(&script_path, script).expect("write script");

    let mut cmd = cargo_bin_cmd!("slider-sim");
    let output = cmd
        .arg("--config")
        .arg(&config_path)
        .arg("--script")
        .arg(&script_path)
        .args(extra)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    String::from_utf8_lossy(&output)
        .lines()
        .map(|line| serde_json::from_str(line).expect("json line"))
        .collect()
}

#[test]
fn autoplay_timeline_reports_three_advances() {
    let reports = run_script(
        r#"{"autoplay_interval_ms": 1000, "transition_duration_ms": 300}"#,
        "0 play\n",
        &["--until-ms", "3500"],
    );

    let last = reports.last().expect("final report");
    assert_eq!(last["at_ms"], 3500);
    assert_eq!(last["state"]["current_index"], 3);
    assert_eq!(last["state"]["autoplay"], "running");
}

#[test]
fn rejected_jump_is_reported() {
    let reports = run_script(
        r#"{"transition_duration_ms": 300}"#,
        "0 goto 3\n0 goto 4\n400 next\n",
        &["--slides", "5"],
    );

    let accepted: Vec<bool> = reports
        .iter()
        .take(3)
        .map(|report| report["accepted"].as_bool().expect("bool"))
        .collect();
    assert_eq!(accepted, vec![true, false, true]);
    assert_eq!(reports[2]["state"]["is_animating"], true);
    assert_eq!(reports[2]["track"], "translateX(-300%)");
}

#[test]
fn invalid_script_fails() {
    let dir = tempfile::tempdir().expect("tempdir");
    let script_path = dir.path().join("timeline.txt");
    fs::write(&script_path, "100 next\n50 prev\n").expect("write script");

    let mut cmd = cargo_bin_cmd!("slider-sim");
    cmd.arg("--script").arg(&script_path).assert().failure();
}

#[test]
fn realtime_reports_match_awaited_inputs() {
    let reports = run_script(
        r#"{"transition_duration_ms": 5000}"#,
        "0 goto 3\n0 goto 4\n20 items 2\n",
        &["--realtime"],
    );

    let pairs: Vec<(bool, bool)> = reports
        .iter()
        .take(3)
        .map(|report| {
            (
                report["accepted"].as_bool().expect("bool"),
                report["state"]["is_animating"].as_bool().expect("bool"),
            )
        })
        .collect();
    assert_eq!(pairs, vec![(true, true), (false, true), (false, false)]);
    assert_eq!(reports[2]["state"]["slide_count"], 2);
    assert!(reports.iter().all(|report| report.get("track").is_none()));
}
