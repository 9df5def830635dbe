//! Integration tests for the `fabricsim` CLI binary.
//!
//! Every test runs against its own temporary state file and config
//! directories so nothing touches the user's real data.
#![allow(clippy::unwrap_used)]

use std::path::PathBuf;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::TempDir;

// ── Helpers ─────────────────────────────────────────────────────────

struct Sandbox {
    dir: TempDir,
}

impl Sandbox {
    fn new() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
        }
    }

    fn state_file(&self) -> PathBuf {
        self.dir.path().join("state.json")
    }

    /// Build a [`Command`] for the `fabricsim` binary with env isolation.
    fn cmd(&self) -> assert_cmd::Command {
        let mut cmd = cargo_bin_cmd!("fabricsim");
        cmd.env("HOME", self.dir.path())
            .env("XDG_CONFIG_HOME", self.dir.path().join("config"))
            .env("XDG_DATA_HOME", self.dir.path().join("data"))
            .env("FABRICSIM_STATE_FILE", self.state_file())
            .env("NO_COLOR", "1")
            .env_remove("FABRICSIM_CONFIG")
            .env_remove("FABRICSIM_OUTPUT")
            .env_remove("FABRICSIM_DEFAULTS__OUTPUT")
            .env_remove("FABRICSIM_DEFAULTS__COLOR")
            .env_remove("FABRICSIM_ENGINE__PERSIST")
            .env_remove("FABRICSIM_ENGINE__STATE_FILE")
            .env_remove("FABRICSIM_ENGINE__PRELOAD_FABRICS")
            .env_remove("RUST_LOG");
        cmd
    }

    fn run(&self, args: &[&str]) {
        self.cmd().args(args).assert().success();
    }

    fn overview_json(&self, fabric: &str) -> serde_json::Value {
        let output = self
            .cmd()
            .args(["overview", fabric, "-o", "json"])
            .output()
            .unwrap();
        assert!(output.status.success(), "{}", combined_output(&output));
        serde_json::from_slice(&output.stdout).unwrap()
    }
}

/// Concatenate stdout + stderr from a command output for flexible matching.
fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let sandbox = Sandbox::new();
    let output = sandbox.cmd().output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    let text = combined_output(&output);
    assert!(text.contains("Usage"), "Expected 'Usage' in output:\n{text}");
}

#[test]
fn test_help_flag() {
    Sandbox::new().cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("overview")
            .and(predicate::str::contains("fabric"))
            .and(predicate::str::contains("replay")),
    );
}

#[test]
fn test_version_flag() {
    Sandbox::new()
        .cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("fabricsim"));
}

#[test]
fn test_completions_zsh() {
    Sandbox::new()
        .cmd()
        .args(["completions", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#compdef"));
}

#[test]
fn test_invalid_output_format() {
    let output = Sandbox::new()
        .cmd()
        .args(["roles", "-o", "xml"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
}

// ── Roles ───────────────────────────────────────────────────────────

#[test]
fn test_roles_json_lists_both_spellings() {
    let sandbox = Sandbox::new();
    let output = sandbox.cmd().args(["roles", "-o", "json"]).output().unwrap();
    assert!(output.status.success());
    let roles: Vec<serde_json::Value> = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(roles.len(), 14);
    assert!(roles.iter().any(|r| {
        r["external"] == "border gateway super spine" && r["internal"] == "border_gateway_super_spine"
    }));
}

#[test]
fn test_roles_plain() {
    Sandbox::new()
        .cmd()
        .args(["roles", "-o", "plain"])
        .assert()
        .success()
        .stdout(predicate::str::contains("core router\n"));
}

// ── Overview lifecycle ──────────────────────────────────────────────

#[test]
fn test_added_switch_shows_in_overview_across_runs() {
    let sandbox = Sandbox::new();
    sandbox.run(&["fabric", "init", "F1"]);
    sandbox.run(&[
        "switch",
        "add",
        "F1",
        "--sync",
        "In-Sync",
        "--health",
        "Healthy",
        "--hw-model",
        "N9K-C93180YC-EX",
        "--sw-version",
        "10.2(5)",
        "--role",
        "border gateway",
    ]);
    assert!(sandbox.state_file().exists());

    let snap = sandbox.overview_json("F1");
    assert_eq!(snap["switchConfig"]["in_sync"], 1);
    assert_eq!(snap["switchConfig"]["out_of_sync"], 0);
    assert_eq!(snap["switchHealth"]["Healthy"], 1);
    assert_eq!(snap["switchHWVersions"]["N9K-C93180YC-EX"], 1);
    assert_eq!(snap["switchSWVersions"]["10.2(5)"], 1);
    assert_eq!(snap["switchRoles"]["border gateway"], 1);
    assert_eq!(snap["switchRoles"]["leaf"], 0);
    assert_eq!(snap["switchRoles"].as_object().unwrap().len(), 14);
}

#[test]
fn test_set_role_accepts_url_encoded_values() {
    let sandbox = Sandbox::new();
    sandbox.run(&["switch", "add", "F1", "--role", "leaf"]);
    sandbox.run(&[
        "switch",
        "set-role",
        "F1",
        "--from",
        "Leaf",
        "--to",
        "Border%20Gateway",
    ]);

    let snap = sandbox.overview_json("F1");
    assert_eq!(snap["switchRoles"]["leaf"], 0);
    assert_eq!(snap["switchRoles"]["border gateway"], 1);
}

#[test]
fn test_set_moves_open_category_buckets() {
    let sandbox = Sandbox::new();
    sandbox.run(&["switch", "add", "F1", "--sw-version", "10.2(5)"]);
    sandbox.run(&[
        "switch",
        "set",
        "F1",
        "sw-version",
        "--from",
        "10.2(5)",
        "--to",
        "10.3(1)",
    ]);

    let snap = sandbox.overview_json("F1");
    assert!(snap["switchSWVersions"].get("10.2(5)").is_none());
    assert_eq!(snap["switchSWVersions"]["10.3(1)"], 1);
}

#[test]
fn test_remove_returns_counts_to_zero() {
    let sandbox = Sandbox::new();
    let attrs = ["--health", "Minor", "--hw-model", "N9K-C9336C-FX2"];
    sandbox.run(&[&["switch", "add", "F1"][..], &attrs[..]].concat());
    sandbox.run(&[&["switch", "remove", "F1"][..], &attrs[..]].concat());

    let snap = sandbox.overview_json("F1");
    assert_eq!(snap["switchHealth"]["Minor"], 0);
    assert!(snap["switchHWVersions"].as_object().unwrap().is_empty());
}

#[test]
fn test_fabric_list_and_delete() {
    let sandbox = Sandbox::new();
    sandbox.run(&["fabric", "init", "F2", "F1"]);
    sandbox
        .cmd()
        .args(["fabric", "list", "-o", "plain"])
        .assert()
        .success()
        .stdout(predicate::str::diff("F1\nF2\n"));

    sandbox.run(&["fabric", "delete", "F1"]);
    sandbox
        .cmd()
        .args(["fabric", "list", "-o", "plain"])
        .assert()
        .success()
        .stdout(predicate::str::diff("F2\n"));
}

#[test]
fn test_ephemeral_runs_leave_no_state() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .env_remove("FABRICSIM_STATE_FILE")
        .args(["--ephemeral", "fabric", "init", "F1"])
        .assert()
        .success();
    assert!(!sandbox.state_file().exists());
    assert!(!sandbox.dir.path().join("data").exists());
}

#[test]
fn test_parallel_adds_are_all_kept() {
    const RUNS: usize = 24;
    let sandbox = Sandbox::new();
    sandbox.run(&["fabric", "init", "F1"]);

    let outputs: Vec<_> = std::thread::scope(|s| {
        let handles: Vec<_> = (0..RUNS)
            .map(|_| {
                s.spawn(|| {
                    sandbox
                        .cmd()
                        .args(["switch", "add", "F1", "--sync", "in_sync", "--role", "leaf"])
                        .output()
                        .unwrap()
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });
    for output in &outputs {
        assert!(output.status.success(), "{}", combined_output(output));
    }

    let snap = sandbox.overview_json("F1");
    assert_eq!(snap["switchConfig"]["in_sync"], RUNS);
    assert_eq!(snap["switchRoles"]["leaf"], RUNS);
}

#[test]
fn test_fabric_names_ignore_surrounding_whitespace() {
    let sandbox = Sandbox::new();
    sandbox.run(&["fabric", "init", " F1"]);
    sandbox.run(&["switch", "add", "F1 ", "--health", "Healthy"]);
    sandbox
        .cmd()
        .args(["fabric", "list", "-o", "plain"])
        .assert()
        .success()
        .stdout(predicate::str::diff("F1\n"));

    let snap = sandbox.overview_json(" F1 ");
    assert_eq!(snap["switchHealth"]["Healthy"], 1);

    sandbox.run(&["fabric", "delete", "\tF1"]);
    let output = sandbox.cmd().args(["overview", "F1"]).output().unwrap();
    assert_eq!(output.status.code(), Some(4));
}

#[test]
fn test_blank_fabric_name_is_rejected() {
    let sandbox = Sandbox::new();
    let output = sandbox.cmd().args(["fabric", "init", "  "]).output().unwrap();
    assert_eq!(output.status.code(), Some(2));
    assert!(combined_output(&output).contains("blank"));
}

// ── Replay ──────────────────────────────────────────────────────────

#[test]
fn test_replay_yaml_batch() {
    let sandbox = Sandbox::new();
    let batch = sandbox.dir.path().join("events.yaml");
    std::fs::write(
        &batch,
        "\
- event: switch_added
  sync: out_of_sync
  health: Major
  role: spine
- event: attribute_changed
  change:
    category: sync
    old: out_of_sync
    new: in_sync
- event: attribute_changed
  change:
    category: role
    old: spine
    new: spine
",
    )
    .unwrap();

    let output = sandbox
        .cmd()
        .args(["replay", "F1"])
        .arg(&batch)
        .args(["-o", "json-compact"])
        .output()
        .unwrap();
    assert!(output.status.success(), "{}", combined_output(&output));
    assert_eq!(
        String::from_utf8_lossy(&output.stdout).trim(),
        r#"{"fabric":"F1","events":3,"applied":2}"#
    );

    let snap = sandbox.overview_json("F1");
    assert_eq!(snap["switchConfig"]["in_sync"], 1);
    assert_eq!(snap["switchConfig"]["out_of_sync"], 0);
    assert_eq!(snap["switchRoles"]["spine"], 1);
}

#[test]
fn test_replay_from_stdin_json() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .args(["replay", "F1", "-", "-o", "plain"])
        .write_stdin(r#"[{"event":"switch_added","hwModel":"N9K","swVersion":"9.3(8)"}]"#)
        .assert()
        .success()
        .stdout(predicate::str::diff("1\n"));

    let snap = sandbox.overview_json("F1");
    assert_eq!(snap["switchHWVersions"]["N9K"], 1);
    assert_eq!(snap["switchSWVersions"]["9.3(8)"], 1);
}

#[test]
fn test_rejected_batch_changes_nothing() {
    let sandbox = Sandbox::new();
    let batch = sandbox.dir.path().join("events.json");
    std::fs::write(
        &batch,
        r#"[
            {"event":"switch_added","health":"Healthy"},
            {"event":"switch_added","health":"Critical"}
        ]"#,
    )
    .unwrap();

    let output = sandbox.cmd().arg("replay").arg("F1").arg(&batch).output().unwrap();
    assert_eq!(output.status.code(), Some(2));
    assert!(combined_output(&output).contains("Critical"));

    let output = sandbox.cmd().args(["overview", "F1"]).output().unwrap();
    assert_eq!(output.status.code(), Some(4));
}

// ── Error handling ──────────────────────────────────────────────────

#[test]
fn test_invalid_role_is_a_usage_error() {
    let sandbox = Sandbox::new();
    let output = sandbox
        .cmd()
        .args(["switch", "add", "F1", "--role", "router"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    let text = combined_output(&output);
    assert!(text.contains("Invalid role"), "{text}");
    assert!(!sandbox.state_file().exists());
}

#[test]
fn test_unknown_fabric_is_not_found() {
    let output = Sandbox::new()
        .cmd()
        .args(["overview", "nope"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(4));
    assert!(combined_output(&output).contains("fabric list"));
}

#[test]
fn test_corrupt_state_file_is_reported() {
    let sandbox = Sandbox::new();
    std::fs::write(sandbox.state_file(), "{ not json").unwrap();
    let output = sandbox.cmd().args(["fabric", "list"]).output().unwrap();
    assert_eq!(output.status.code(), Some(7));
    assert!(combined_output(&output).contains("--ephemeral"));
}

// ── Config ──────────────────────────────────────────────────────────

#[test]
fn test_config_path_honors_flag() {
    let sandbox = Sandbox::new();
    let path = sandbox.dir.path().join("custom.toml");
    sandbox
        .cmd()
        .arg("--config")
        .arg(&path)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("custom.toml"));
}

#[test]
fn test_config_defaults_drive_output_and_preload() {
    let sandbox = Sandbox::new();
    let path = sandbox.dir.path().join("fabricsim.toml");
    std::fs::write(
        &path,
        "[defaults]\noutput = \"plain\"\n\n[engine]\npreload_fabrics = [\"EDGE\"]\n",
    )
    .unwrap();

    sandbox
        .cmd()
        .arg("--config")
        .arg(&path)
        .args(["fabric", "list"])
        .assert()
        .success()
        .stdout(predicate::str::diff("EDGE\n"));
}
