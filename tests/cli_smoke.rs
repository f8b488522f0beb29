use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn daylog(root: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_daylog"))
        .arg("--root")
        .arg(root)
        .args(args)
        .output()
        .unwrap()
}

fn stdout(output: &Output) -> String {
    assert!(
        output.status.success(),
        "daylog failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8(output.stdout.clone()).unwrap()
}

#[test]
fn cli_event_to_rendered_dump() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();

    let created = stdout(&daylog(
        root,
        &["event", "add", "--title", "Beach day", "--date", "2025-06-01"],
    ));
    let event_id = created
        .lines()
        .find_map(|line| line.trim().strip_prefix("Id: "))
        .unwrap()
        .to_string();

    let refs: Vec<String> = (1..=6).map(|n| format!("beach-{n}.jpg")).collect();
    let mut add_args = vec!["photos", "add", event_id.as_str()];
    add_args.extend(refs.iter().map(String::as_str));
    let added = stdout(&daylog(root, &add_args));
    assert!(added.contains("Added 6 photos (6 total)"));

    let layouts = stdout(&daylog(root, &["layouts", &event_id]));
    assert!(layouts.contains("grid6 2x3"));
    assert!(!layouts.contains("grid8"));

    let composed = stdout(&daylog(
        root,
        &[
            "compose",
            &event_id,
            "--layout",
            "grid6",
            "--title",
            "Trip",
            "--background",
            "cream",
        ],
    ));
    assert!(composed.contains("(grid6, 2x3)"));
    assert!(composed.contains("Title: Trip"));

    let shown = stdout(&daylog(root, &["show", &event_id]));
    let json: serde_json::Value = serde_json::from_str(&shown).unwrap();
    assert_eq!(json["layout"], "grid6");
    assert_eq!(json["style"]["backgroundColor"], "#fef7ed");
    assert_eq!(json["photos"].as_array().unwrap().len(), 6);

    let html_path = root.join("dump.html");
    stdout(&daylog(
        root,
        &["render", &event_id, "--output", html_path.to_str().unwrap()],
    ));
    let html = std::fs::read_to_string(&html_path).unwrap();
    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("repeat(2, 1fr)"));
}

#[test]
fn cli_pick_beyond_layout_fails() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();
    let created = stdout(&daylog(
        root,
        &["event", "add", "--title", "Picnic", "--date", "2025-05-05"],
    ));
    let event_id = created
        .lines()
        .find_map(|line| line.trim().strip_prefix("Id: "))
        .unwrap()
        .to_string();
    stdout(&daylog(
        root,
        &["photos", "add", &event_id, "a.jpg", "b.jpg", "c.jpg", "d.jpg", "e.jpg"],
    ));

    let output = daylog(root, &["compose", &event_id, "--pick", "1,2,3,4,5"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("exactly 4 photos"));
    assert!(!root.join(".daylog/dumps").read_dir().unwrap().any(|_| true));
}

#[test]
fn cli_gen_config_prints_stock_file() {
    let tmp = TempDir::new().unwrap();
    let printed = stdout(&daylog(tmp.path(), &["gen-config"]));
    assert!(printed.contains("[style]"));
    assert!(printed.contains("max_per_event = 10"));
    assert!(!tmp.path().join(".daylog").exists());
}

#[test]
fn cli_list_numbers_match_pick_and_remove() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();
    let created = stdout(&daylog(
        root,
        &["event", "add", "--title", "Hike", "--date", "2025-04-04"],
    ));
    let event_id = created
        .lines()
        .find_map(|line| line.trim().strip_prefix("Id: "))
        .unwrap()
        .to_string();
    let added = stdout(&daylog(
        root,
        &["photos", "add", &event_id, "a", "a", "b", "c", "d", "e"],
    ));
    assert!(added.contains("Added 5 photos (5 total)"));
    assert!(added.contains("Skipped 1 already attached"));

    let listed = stdout(&daylog(root, &["photos", "list", &event_id]));
    assert!(listed.contains("003 ") && listed.contains("Source: c"));
    let third = listed
        .lines()
        .find(|line| line.starts_with("003 "))
        .unwrap()
        .trim_start_matches("003 ")
        .to_string();

    stdout(&daylog(root, &["compose", &event_id, "--pick", "3,1,2,4"]));
    let shown = stdout(&daylog(root, &["show", &event_id]));
    let json: serde_json::Value = serde_json::from_str(&shown).unwrap();
    assert_eq!(json["photos"][0], "c");

    let removed = stdout(&daylog(root, &["photos", "remove", &event_id, "3"]));
    assert!(removed.contains(&third));
    let listed = stdout(&daylog(root, &["photos", "list", &event_id]));
    assert!(!listed.contains("Source: c"));

    // The stored dump keeps the photos it was composed with.
    let shown = stdout(&daylog(root, &["show", &event_id]));
    let json: serde_json::Value = serde_json::from_str(&shown).unwrap();
    assert_eq!(json["photos"][0], "c");
}

#[test]
fn cli_no_color_strips_escapes_from_logs() {
    let tmp = TempDir::new().unwrap();
    let output = Command::new(env!("CARGO_BIN_EXE_daylog"))
        .env_remove("RUST_LOG")
        .arg("--root")
        .arg(tmp.path())
        .args(["--no-color", "-v", "event", "add", "--title", "Swim"])
        .args(["--date", "2025-07-07"])
        .output()
        .unwrap();
    stdout(&output);
    let logs = String::from_utf8_lossy(&output.stderr);
    assert!(logs.contains("event registered"));
    assert!(!logs.contains('\u{1b}'));
}
