//! Profile snapshot, drift, and reconciliation commands

use chrono::Utc;
use colored::Colorize;

use plug_core::events::describe_file;
use plug_core::{
    ChangeKind, Diff, Event, EventLog, Profile, ProfileStore, Scope, SettingsDocument,
    SettingsStore, Workspace, compare, compare_with_scope, merged_marketplaces, resolve,
};

use crate::error::Result;

/// Run the profile save command
pub fn run_profile_save(workspace: &Workspace, name: &str) -> Result<()> {
    let settings = SettingsStore::new(workspace);
    let docs = settings.load_all()?;
    let borrowed: Vec<(Scope, &SettingsDocument)> =
        docs.iter().map(|(s, doc)| (*s, doc)).collect();
    let effective = resolve(&borrowed);
    let marketplaces = merged_marketplaces(&borrowed);

    let profile = Profile::snapshot(name, &effective, marketplaces, Utc::now());

    let store = ProfileStore::new(workspace);
    let path = store.path_for(name)?;
    let before = describe_file(&path);
    store.save(&profile)?;
    let after = describe_file(&path);

    let change = if before.is_some() {
        ChangeKind::Update
    } else {
        ChangeKind::Create
    };
    let mut log = EventLog::for_workspace(workspace);
    log.append(
        Event::new("profile-save", Scope::User, &path, change)
            .with_before(before)
            .with_after(after),
    )?;

    println!(
        "{} profile {} ({} plugins, {} marketplaces)",
        "Saved".green(),
        name.cyan(),
        profile.plugins.len(),
        profile.marketplaces.len()
    );
    Ok(())
}

/// Run the profile list command
pub fn run_profile_list(workspace: &Workspace) -> Result<()> {
    let store = ProfileStore::new(workspace);
    let names = store.list()?;

    println!("{}", "Profiles".bold());
    for name in names {
        let on_disk = store.path_for(&name)?.exists();
        if store.is_builtin(&name) && !on_disk {
            println!("  {} {} {}", "+".green(), name.cyan(), "(built-in)".dimmed());
        } else {
            println!("  {} {}", "+".green(), name.cyan());
        }
    }
    Ok(())
}

/// Run the profile show command
pub fn run_profile_show(workspace: &Workspace, name: &str, json: bool) -> Result<()> {
    let store = ProfileStore::new(workspace);
    let profile = store.load(name)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&profile)?);
        return Ok(());
    }

    println!("{} {}", "Profile".bold(), profile.name.cyan());
    println!("{}:  {}", "Created".dimmed(), profile.created_at);
    println!("{}:  {}", "Updated".dimmed(), profile.updated_at);
    println!(
        "{}:  {}",
        "Marketplaces".dimmed(),
        if profile.marketplaces.is_empty() {
            "none".to_string()
        } else {
            profile.marketplaces.join(", ")
        }
    );
    println!();
    println!("{}:", "Captured plugins".bold());
    if profile.plugins.is_empty() {
        println!("  {}", "None".dimmed());
    }
    for (id, scope) in &profile.plugins {
        println!("  {} {} ({})", "+".green(), id.cyan(), scope);
    }
    Ok(())
}

/// Run the profile diff command
pub fn run_profile_diff(workspace: &Workspace, name: &str, scope: Option<Scope>) -> Result<()> {
    let store = ProfileStore::new(workspace);
    let profile = store.load(name)?;
    let diff = diff_against_live(workspace, &profile, scope)?;

    match scope {
        Some(scope) => println!(
            "{} {} vs {} scope: {}",
            "Drift".bold(),
            name.cyan(),
            scope,
            diff.summarize()
        ),
        None => println!("{} {}: {}", "Drift".bold(), name.cyan(), diff.summarize()),
    }

    for id in &diff.missing {
        println!("  {} {} (in profile, not enabled)", "-".red(), id);
    }
    for id in &diff.extra {
        println!("  {} {} (enabled, not in profile)", "+".yellow(), id);
    }
    for id in &diff.moved {
        println!("  {} {} (enabled at a different scope)", "~".yellow(), id);
    }
    for market in &diff.marketplace_drift {
        println!("  {} marketplace {}", "~".yellow(), market);
    }
    Ok(())
}

/// Run the profile apply command
pub fn run_profile_apply(
    workspace: &Workspace,
    name: &str,
    scope: Scope,
    dry_run: bool,
) -> Result<()> {
    let store = ProfileStore::new(workspace);
    let profile = store.load(name)?;
    let diff = diff_against_live(workspace, &profile, None)?;

    if diff.missing.is_empty() && diff.extra.is_empty() {
        println!("Already in sync with profile {}", name.cyan());
        if !diff.moved.is_empty() || !diff.marketplace_drift.is_empty() {
            println!("  ({}; apply does not reconcile these)", diff.summarize());
        }
        return Ok(());
    }

    if dry_run {
        println!("{} (dry run, nothing written)", "Plan".bold());
        for id in &diff.missing {
            println!("  would enable {} in the {} scope", id.cyan(), scope);
        }
        for id in &diff.extra {
            println!("  would disable {} in the {} scope", id.cyan(), scope);
        }
        return Ok(());
    }

    let settings = SettingsStore::new(workspace);
    let mut doc = settings.load_or_default(scope)?;
    for id in &diff.missing {
        doc.set_enabled(id, true);
    }
    for id in &diff.extra {
        doc.set_enabled(id, false);
    }

    let path = workspace.settings_path(scope)?;
    let before = describe_file(&path);
    settings.save(scope, &doc)?;
    let after = describe_file(&path);

    let change = if before.is_some() {
        ChangeKind::Update
    } else {
        ChangeKind::Create
    };
    let mut log = EventLog::for_workspace(workspace);
    log.append(
        Event::new("apply", scope, &path, change)
            .with_before(before)
            .with_after(after),
    )?;

    println!(
        "{} profile {} to the {} scope ({} enabled, {} disabled)",
        "Applied".green(),
        name.cyan(),
        scope,
        diff.missing.len(),
        diff.extra.len()
    );
    Ok(())
}

/// Run the profile delete command
pub fn run_profile_delete(workspace: &Workspace, name: &str) -> Result<()> {
    let store = ProfileStore::new(workspace);
    let path = store.path_for(name)?;
    let before = describe_file(&path);
    store.delete(name)?;

    let mut log = EventLog::for_workspace(workspace);
    log.append(
        Event::new("profile-delete", Scope::User, &path, ChangeKind::Delete).with_before(before),
    )?;

    println!("{} profile {}", "Deleted".green(), name.cyan());
    Ok(())
}

/// Diff a profile against the live side: one scope's document when `scope`
/// is given, the merged effective configuration otherwise.
fn diff_against_live(
    workspace: &Workspace,
    profile: &Profile,
    scope: Option<Scope>,
) -> Result<Diff> {
    let settings = SettingsStore::new(workspace);
    match scope {
        Some(scope) => {
            let doc = settings.load(scope)?.unwrap_or_default();
            Ok(compare_with_scope(profile, scope, &doc))
        }
        None => {
            let docs = settings.load_all()?;
            let borrowed: Vec<(Scope, &SettingsDocument)> =
                docs.iter().map(|(s, doc)| (*s, doc)).collect();
            let effective = resolve(&borrowed);
            let marketplaces = merged_marketplaces(&borrowed);
            Ok(compare(profile, &effective, &marketplaces))
        }
    }
}
