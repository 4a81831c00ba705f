//! End-to-end integration tests for the reconciliation and audit core
//!
//! These tests exercise the complete flow across crate boundaries:
//! settings in three scopes -> precedence resolution -> profile snapshot ->
//! drift detection -> operation log -> audit report.

use chrono::Utc;
use plug_core::audit::{ReportOptions, generate, render_markdown, render_text};
use plug_core::events::describe_file;
use plug_core::{
    ChangeKind, ContentDescriptor, Event, EventFilter, EventLog, Profile, ProfileStore, Scope,
    SettingsDocument, SettingsStore, Workspace, compare, compare_with_scope, is_modified,
    merged_marketplaces, resolve,
};
use plug_test_utils::TestWorkspace;

fn workspace_for(fixture: &TestWorkspace) -> Workspace {
    Workspace::new(fixture.user_dir(), fixture.project_root())
}

fn borrowed(docs: &[(Scope, SettingsDocument)]) -> Vec<(Scope, &SettingsDocument)> {
    docs.iter().map(|(s, doc)| (*s, doc)).collect()
}

#[test]
fn three_scope_resolution_follows_precedence() {
    let fixture = TestWorkspace::with_project();
    fixture.write_user_settings(
        r#"{"enabledPlugins": {"formatter@core": true, "linter@core": true}}"#,
    );
    fixture.write_project_settings(r#"{"enabledPlugins": {"formatter@core": true}}"#);
    fixture.write_local_settings(r#"{"enabledPlugins": {"debugger@core": true}}"#);

    let ws = workspace_for(&fixture);
    let docs = SettingsStore::new(&ws).load_all().unwrap();
    let effective = resolve(&borrowed(&docs));

    assert_eq!(effective.winner("formatter@core"), Some(Scope::Project));
    assert_eq!(effective.winner("linter@core"), Some(Scope::User));
    assert_eq!(effective.winner("debugger@core"), Some(Scope::Local));
    assert_eq!(effective.len(), 3);
}

#[test]
fn disjoint_scopes_each_win_their_own_entries() {
    let fixture = TestWorkspace::with_project();
    fixture.write_user_settings(r#"{"enabledPlugins": {"x@core": true}}"#);
    fixture.write_project_settings(r#"{"enabledPlugins": {"y@core": true}}"#);

    let ws = workspace_for(&fixture);
    let docs = SettingsStore::new(&ws).load_all().unwrap();
    let effective = resolve(&borrowed(&docs));

    assert_eq!(effective.winner("x@core"), Some(Scope::User));
    assert_eq!(effective.winner("y@core"), Some(Scope::Project));
}

#[test]
fn snapshot_save_reload_then_drift_after_live_changes() {
    let fixture = TestWorkspace::with_project();
    fixture.write_user_settings(
        r#"{"enabledPlugins": {"formatter@core": true, "linter@core": true}, "marketplaces": ["core"]}"#,
    );

    let ws = workspace_for(&fixture);
    let settings = SettingsStore::new(&ws);
    let profiles = ProfileStore::new(&ws);

    // Capture and persist the current effective configuration
    let docs = settings.load_all().unwrap();
    let effective = resolve(&borrowed(&docs));
    let marketplaces = merged_marketplaces(&borrowed(&docs));
    let profile = Profile::snapshot("baseline", &effective, marketplaces, Utc::now());
    profiles.save(&profile).unwrap();

    // Unchanged live state: no drift, via the persisted copy
    let reloaded = profiles.load("baseline").unwrap();
    assert!(!is_modified(&reloaded, &effective, &["core".to_string()]));

    // Live state drifts: linter disabled, debugger enabled at local scope
    let mut user_doc = settings.load(Scope::User).unwrap().unwrap();
    user_doc.set_enabled("linter@core", false);
    settings.save(Scope::User, &user_doc).unwrap();
    let mut local_doc = settings.load_or_default(Scope::Local).unwrap();
    local_doc.set_enabled("debugger@core", true);
    settings.save(Scope::Local, &local_doc).unwrap();

    let docs = settings.load_all().unwrap();
    let live = resolve(&borrowed(&docs));
    let live_markets = merged_marketplaces(&borrowed(&docs));
    let diff = compare(&reloaded, &live, &live_markets);

    assert!(diff.missing.contains("linter@core"));
    assert!(diff.extra.contains("debugger@core"));
    assert!(diff.moved.is_empty());
    assert_eq!(diff.summarize(), "1 missing, 1 extra");
}

#[test]
fn scope_move_is_reported_as_moved_not_missing() {
    let fixture = TestWorkspace::with_project();
    fixture.write_user_settings(r#"{"enabledPlugins": {"formatter@core": true}}"#);

    let ws = workspace_for(&fixture);
    let settings = SettingsStore::new(&ws);
    let docs = settings.load_all().unwrap();
    let effective = resolve(&borrowed(&docs));
    let profile = Profile::snapshot("baseline", &effective, vec![], Utc::now());

    // The same plugin becomes enabled at local scope, which now wins
    let mut local_doc = settings.load_or_default(Scope::Local).unwrap();
    local_doc.set_enabled("formatter@core", true);
    settings.save(Scope::Local, &local_doc).unwrap();

    let docs = settings.load_all().unwrap();
    let live = resolve(&borrowed(&docs));
    let diff = compare(&profile, &live, &[]);

    assert!(diff.missing.is_empty());
    assert!(diff.extra.is_empty());
    assert!(diff.moved.contains("formatter@core"));
}

#[test]
fn per_scope_drift_narrows_the_live_side_only() {
    let fixture = TestWorkspace::with_project();
    fixture.write_user_settings(r#"{"enabledPlugins": {"formatter@core": true}}"#);
    fixture.write_project_settings(r#"{"enabledPlugins": {"linter@core": true}}"#);

    let ws = workspace_for(&fixture);
    let settings = SettingsStore::new(&ws);
    let docs = settings.load_all().unwrap();
    let effective = resolve(&borrowed(&docs));
    let profile = Profile::snapshot("everything", &effective, vec![], Utc::now());

    // Against the merged view there is no drift
    assert!(!compare(&profile, &effective, &[]).has_changes());

    // Against the project scope alone, the user-scope plugin is missing and
    // the project-scope one has a different attributed scope
    let project_doc = settings.load(Scope::Project).unwrap().unwrap();
    let diff = compare_with_scope(&profile, Scope::Project, &project_doc);
    assert!(diff.missing.contains("formatter@core"));
    assert!(!diff.missing.contains("linter@core"));
}

#[test]
fn mutation_history_flows_into_the_audit_report() {
    let fixture = TestWorkspace::with_project();
    let ws = workspace_for(&fixture);
    let settings = SettingsStore::new(&ws);
    let mut log = EventLog::for_workspace(&ws);

    // Perform three logged mutations the way the CLI does
    for (id, scope) in [
        ("formatter@core", Scope::User),
        ("linter@core", Scope::Project),
        ("debugger@core", Scope::Local),
    ] {
        let mut doc = settings.load_or_default(scope).unwrap();
        doc.set_enabled(id, true);
        let path = ws.settings_path(scope).unwrap();
        let before = describe_file(&path);
        settings.save(scope, &doc).unwrap();
        let after = describe_file(&path);
        let change = if before.is_some() {
            ChangeKind::Update
        } else {
            ChangeKind::Create
        };
        log.append(
            Event::new("enable", scope, &path, change)
                .with_before(before)
                .with_after(after),
        )
        .unwrap();
    }

    // Query everything, newest first
    let result = log.query(&EventFilter::default()).unwrap();
    assert!(result.log_exists);
    assert_eq!(result.events.len(), 3);
    assert_eq!(result.events[0].scope, Scope::Local);
    assert_eq!(result.events[2].scope, Scope::User);

    // Scope filter narrows to one mutation
    let filtered = log
        .query(&EventFilter {
            scope: Some(Scope::Project),
            ..Default::default()
        })
        .unwrap();
    assert_eq!(filtered.events.len(), 1);

    // The report aggregates what the filter returned
    let options = ReportOptions::default();
    let report = generate(result.events, options);
    assert_eq!(report.by_operation["enable"], 3);
    assert_eq!(report.by_scope.len(), 3);
    assert_eq!(report.errors, 0);
    // Every file was created fresh, so no event carries both descriptors
    assert_eq!(report.size_delta, 0);

    let text = render_text(&report);
    let markdown = render_markdown(&report);
    for needle in ["enable", "user", "project", "local"] {
        assert!(text.contains(needle), "text missing {needle}");
        assert!(markdown.contains(needle), "markdown missing {needle}");
    }
}

#[test]
fn size_delta_sums_only_events_with_both_descriptors() {
    let descriptor = |size| ContentDescriptor { size, sha256: None };
    let events = vec![
        Event::new("enable", Scope::User, "/tmp/a.json", ChangeKind::Update)
            .with_before(Some(descriptor(10)))
            .with_after(Some(descriptor(30))),
        Event::new("profile-delete", Scope::User, "/tmp/b.toml", ChangeKind::Delete)
            .with_before(Some(descriptor(50))),
    ];

    let report = generate(events, ReportOptions::default());
    assert_eq!(report.size_delta, 20);
}

#[test]
fn query_against_fresh_workspace_signals_log_absent() {
    let fixture = TestWorkspace::new();
    let ws = workspace_for(&fixture);
    let log = EventLog::for_workspace(&ws);

    let result = log.query(&EventFilter::default()).unwrap();
    assert!(!result.log_exists);
    assert!(result.events.is_empty());
}

#[test]
fn report_with_since_after_all_events_has_zero_statistics() {
    let fixture = TestWorkspace::new();
    let ws = workspace_for(&fixture);
    let mut log = EventLog::for_workspace(&ws);
    log.append(Event::new(
        "enable",
        Scope::User,
        "/tmp/settings.json",
        ChangeKind::Create,
    ))
    .unwrap();

    let options = ReportOptions {
        since: Some(Utc::now() + chrono::Duration::days(365)),
        ..Default::default()
    };
    let result = log.query(&options.to_filter()).unwrap();
    assert!(result.log_exists);

    let report = generate(result.events, options);
    assert!(report.events.is_empty());
    assert!(report.by_operation.is_empty());
    assert_eq!(report.errors, 0);
    assert_eq!(report.size_delta, 0);
}

#[test]
fn project_discovery_ties_the_scopes_to_the_marker() {
    let fixture = TestWorkspace::with_project();
    let project_root = fixture.project_root().unwrap();
    let nested = project_root.join("src/deep");
    std::fs::create_dir_all(&nested).unwrap();

    // Discovery from deep inside the project finds the same root
    assert_eq!(
        plug_fs::find_project_root(&nested),
        Some(project_root.clone())
    );

    let ws = Workspace::new(fixture.user_dir(), Some(project_root.clone()));
    assert_eq!(
        ws.settings_path(Scope::Project).unwrap(),
        project_root.join(".plug/settings.json")
    );
    assert_eq!(
        ws.settings_path(Scope::Local).unwrap(),
        project_root.join(".plug/settings.local.json")
    );
}
