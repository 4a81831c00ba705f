//! Plugin enable/disable and effective-configuration listing

use colored::Colorize;

use plug_core::events::describe_file;
use plug_core::{
    ChangeKind, Event, EventLog, Scope, SettingsDocument, SettingsStore, Workspace, resolve,
};

use crate::error::{CliError, Result};

/// Run the enable command
pub fn run_enable(workspace: &Workspace, id: &str, scope: Scope) -> Result<()> {
    set_plugin(workspace, id, scope, true)
}

/// Run the disable command
pub fn run_disable(workspace: &Workspace, id: &str, scope: Scope) -> Result<()> {
    set_plugin(workspace, id, scope, false)
}

fn set_plugin(workspace: &Workspace, id: &str, scope: Scope, enabled: bool) -> Result<()> {
    if id.trim().is_empty() {
        return Err(CliError::user("plugin identifier must not be empty"));
    }

    let store = SettingsStore::new(workspace);
    let mut doc = store.load_or_default(scope)?;
    doc.set_enabled(id, enabled);

    let path = workspace.settings_path(scope)?;
    let before = describe_file(&path);
    store.save(scope, &doc)?;
    let after = describe_file(&path);

    let operation = if enabled { "enable" } else { "disable" };
    let change = if before.is_some() {
        ChangeKind::Update
    } else {
        ChangeKind::Create
    };
    let mut log = EventLog::for_workspace(workspace);
    log.append(
        Event::new(operation, scope, &path, change)
            .with_before(before)
            .with_after(after),
    )?;

    let verb = if enabled { "Enabled" } else { "Disabled" };
    println!("{} {} in the {} scope", verb.green(), id.cyan(), scope);
    Ok(())
}

/// Run the list command
pub fn run_list(workspace: &Workspace, scope: Option<Scope>, json: bool) -> Result<()> {
    let store = SettingsStore::new(workspace);
    let docs: Vec<(Scope, SettingsDocument)> = match scope {
        Some(scope) => store.load(scope)?.map(|doc| (scope, doc)).into_iter().collect(),
        None => store.load_all()?,
    };
    let borrowed: Vec<(Scope, &SettingsDocument)> =
        docs.iter().map(|(s, doc)| (*s, doc)).collect();
    let effective = resolve(&borrowed);

    if json {
        println!("{}", serde_json::to_string_pretty(&effective)?);
        return Ok(());
    }

    if effective.is_empty() {
        println!(
            "{} (use {} to add one)",
            "No plugins enabled".dimmed(),
            "plug enable".cyan()
        );
        return Ok(());
    }

    println!("{}", "Enabled plugins".bold());
    for (id, winner) in effective.iter() {
        println!("  {} {} ({})", "+".green(), id.cyan(), winner);
    }
    Ok(())
}
