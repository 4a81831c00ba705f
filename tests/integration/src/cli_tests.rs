//! Workspace-level tests that drive the compiled `plug` binary through a
//! full configuration lifecycle inside a project.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

struct CliFixture {
    config: TempDir,
    project: TempDir,
}

impl CliFixture {
    fn new() -> Self {
        let fixture = Self {
            config: TempDir::new().unwrap(),
            project: TempDir::new().unwrap(),
        };
        std::fs::create_dir(fixture.project.path().join(".plug")).unwrap();
        fixture
    }

    fn plug(&self) -> Command {
        let mut cmd = Command::cargo_bin("plug").unwrap();
        cmd.env("PLUG_CONFIG_DIR", self.config.path())
            .env("NO_COLOR", "1")
            .current_dir(self.project.path());
        cmd
    }
}

#[test]
fn full_lifecycle_enable_snapshot_drift_apply_audit() {
    let fixture = CliFixture::new();

    // Build up configuration across scopes
    fixture
        .plug()
        .args(["enable", "formatter@core", "--scope", "user"])
        .assert()
        .success();
    fixture
        .plug()
        .args(["enable", "linter@core"])
        .assert()
        .success()
        .stdout(predicate::str::contains("project scope"));
    fixture
        .plug()
        .args(["marketplace", "add", "core", "--scope", "user"])
        .assert()
        .success();

    // Snapshot the merged state
    fixture
        .plug()
        .args(["profile", "save", "team"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2 plugins"));

    // Drift appears when live state changes
    fixture
        .plug()
        .args(["disable", "linter@core"])
        .assert()
        .success();
    fixture
        .plug()
        .args(["profile", "diff", "team"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 missing"));

    // Apply reconciles back to the profile
    fixture
        .plug()
        .args(["profile", "apply", "team"])
        .assert()
        .success();
    fixture
        .plug()
        .args(["profile", "diff", "team"])
        .assert()
        .success()
        .stdout(predicate::str::contains("no drift"));

    // The whole history is in the log and the report
    fixture
        .plug()
        .args(["events", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"operation\": \"apply\""))
        .stdout(predicate::str::contains("\"operation\": \"marketplace-add\""));
    fixture
        .plug()
        .args(["audit"])
        .assert()
        .success()
        .stdout(predicate::str::contains("errors: 0"));
}

#[test]
fn per_scope_diff_through_the_binary() {
    let fixture = CliFixture::new();

    fixture
        .plug()
        .args(["enable", "formatter@core", "--scope", "user"])
        .assert()
        .success();
    fixture
        .plug()
        .args(["enable", "linter@core", "--scope", "project"])
        .assert()
        .success();
    fixture
        .plug()
        .args(["profile", "save", "mixed"])
        .assert()
        .success();

    // Restricted to the project scope, the user-scope plugin is missing
    fixture
        .plug()
        .args(["profile", "diff", "mixed", "--scope", "project"])
        .assert()
        .success()
        .stdout(predicate::str::contains("missing"))
        .stdout(predicate::str::contains("formatter@core"));
}

#[test]
fn local_overrides_are_never_written_to_the_shared_document() {
    let fixture = CliFixture::new();

    fixture
        .plug()
        .args(["enable", "debugger@core", "--scope", "local"])
        .assert()
        .success();

    let local = std::fs::read_to_string(
        fixture.project.path().join(".plug/settings.local.json"),
    )
    .unwrap();
    assert!(local.contains("debugger@core"));
    assert!(!fixture.project.path().join(".plug/settings.json").exists());
}

#[test]
fn events_scope_filter_through_the_binary() {
    let fixture = CliFixture::new();

    fixture
        .plug()
        .args(["enable", "a@core", "--scope", "user"])
        .assert()
        .success();
    fixture
        .plug()
        .args(["enable", "b@core", "--scope", "project"])
        .assert()
        .success();

    fixture
        .plug()
        .args(["events", "--scope", "project", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"scope\": \"project\""))
        .stdout(predicate::str::contains("\"scope\": \"user\"").not());
}

#[test]
fn events_json_output_parses_as_an_array_of_records() {
    let fixture = CliFixture::new();

    fixture
        .plug()
        .args(["enable", "a@core", "--scope", "user"])
        .assert()
        .success();
    fixture
        .plug()
        .args(["disable", "a@core", "--scope", "user"])
        .assert()
        .success();

    let output = fixture.plug().args(["events", "--json"]).output().unwrap();
    let events: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("events --json should be valid JSON");
    let events = events.as_array().unwrap();
    assert_eq!(events.len(), 2);
    // Most recent first
    assert_eq!(events[0]["operation"], "disable");
    assert_eq!(events[1]["operation"], "enable");
}

#[test]
fn corrupt_settings_surface_as_an_error_not_an_empty_state() {
    let fixture = CliFixture::new();
    std::fs::write(
        fixture.project.path().join(".plug/settings.json"),
        "{ not json",
    )
    .unwrap();

    fixture
        .plug()
        .args(["list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Malformed settings"));
}
