use serde_json::Value;
use std::fs;
use std::path::PathBuf;
use std::process::Command;
use std::time::{SystemTime, UNIX_EPOCH};

fn unique_temp_dir(prefix: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("time went backwards")
        .as_nanos();
    let dir = std::env::temp_dir().join(format!(
        "wifi-dumbbell-{prefix}-{}-{nanos}",
        std::process::id()
    ));
    fs::create_dir_all(&dir).expect("create temp dir");
    dir
}

fn write_file(dir: &PathBuf, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).expect("write temp file");
    path
}

#[test]
fn wifi_dumbbell_prints_address_plan_with_defaults() {
    let output = Command::new(env!("CARGO_BIN_EXE_wifi_dumbbell"))
        .output()
        .expect("run wifi_dumbbell");
    assert!(
        output.status.success(),
        "wifi_dumbbell failed: stderr={}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("10.1.1.1 <-> 10.1.1.2"), "stdout={stdout}");
    assert!(stdout.contains("access point 10.1.2.4"), "stdout={stdout}");
    assert!(stdout.contains("-> 10.1.5.1:8080"), "stdout={stdout}");
    assert!(stdout.contains("ns3::TcpWestwood"), "stdout={stdout}");
    assert!(stdout.contains("stop at 21s"), "stdout={stdout}");
}

#[test]
fn wifi_dumbbell_writes_plan_json_with_overrides() {
    let dir = unique_temp_dir("plan");
    let out_json = dir.join("plan.json");

    let output = Command::new(env!("CARGO_BIN_EXE_wifi_dumbbell"))
        .args([
            "--n-left",
            "2",
            "--n-right",
            "3",
            "--tcp-variant",
            "westwoodplus",
            "--raa-algo",
            "minstrel",
            "--simulation-time",
            "5s",
            "--bounding-box",
            "-150,-150,150,150",
            "--ipv6",
            "--plan-json",
            out_json.to_str().unwrap(),
        ])
        .output()
        .expect("run wifi_dumbbell");
    assert!(
        output.status.success(),
        "wifi_dumbbell failed: stderr={}",
        String::from_utf8_lossy(&output.stderr)
    );

    let raw = fs::read_to_string(&out_json).expect("read plan.json");
    let v: Value = serde_json::from_str(&raw).expect("parse plan.json");
    assert_eq!(v["nodes"].as_array().map(|a| a.len()), Some(7));
    assert_eq!(v["flows"].as_array().map(|a| a.len()), Some(2));
    assert_eq!(v["sinks"].as_array().map(|a| a.len()), Some(3));
    assert_eq!(v["wifi"][0]["manager"], "ns3::MinstrelWifiManager");
    assert_eq!(v["stop_time_ns"], 6_000_000_000u64);
    assert_eq!(v["ipv6"].as_array().map(|a| a.len()), Some(11));
    assert_eq!(v["config_defaults"][0][1], "WestwoodPlus");

    // 左路由器在 (-50, 0)
    let rt0 = &v["nodes"][0]["position"];
    assert_eq!(rt0["x"].as_f64(), Some(-50.0));
    assert_eq!(rt0["y"].as_f64(), Some(0.0));

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn wifi_dumbbell_reads_scenario_file() {
    let dir = unique_temp_dir("scenario");
    let scenario = write_file(
        &dir,
        "scenario.json",
        r#"
{
    "n_left": 1,
    "n_right": 1,
    "left_base": "172.16.0.0/16",
    "sink_port": 9000
}
        "#,
    );
    let out_json = dir.join("plan.json");

    let output = Command::new(env!("CARGO_BIN_EXE_wifi_dumbbell"))
        .args([
            "--scenario",
            scenario.to_str().unwrap(),
            "--plan-json",
            out_json.to_str().unwrap(),
        ])
        .output()
        .expect("run wifi_dumbbell");
    assert!(
        output.status.success(),
        "wifi_dumbbell failed: stderr={}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("left[0]      172.16.0.1"), "stdout={stdout}");

    let v: Value = serde_json::from_str(&fs::read_to_string(&out_json).expect("read plan.json")).expect("parse plan.json");
    assert_eq!(v["flows"][0]["remote"], "10.1.3.1:9000");
    assert_eq!(v["sinks"][0]["port"], 9000);

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn wifi_dumbbell_fails_when_senders_outnumber_sinks() {
    let output = Command::new(env!("CARGO_BIN_EXE_wifi_dumbbell"))
        .args(["--n-left", "4", "--n-right", "2"])
        .output()
        .expect("run wifi_dumbbell");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("NotEnoughSinks"), "stderr={stderr}");
}
