//! Marketplace list management

use colored::Colorize;

use plug_core::events::describe_file;
use plug_core::{ChangeKind, Event, EventLog, Scope, SettingsStore, Workspace};

use crate::error::{CliError, Result};

/// Run the marketplace add command
pub fn run_marketplace_add(workspace: &Workspace, name: &str, scope: Scope) -> Result<()> {
    if name.trim().is_empty() {
        return Err(CliError::user("marketplace name must not be empty"));
    }

    let store = SettingsStore::new(workspace);
    let mut doc = store.load_or_default(scope)?;

    if !doc.add_marketplace(name) {
        println!(
            "Marketplace {} is already present in the {} scope",
            name.cyan(),
            scope
        );
        return Ok(());
    }

    record_save(workspace, &store, scope, &doc, "marketplace-add")?;
    println!("{} marketplace {} in the {} scope", "Added".green(), name.cyan(), scope);
    Ok(())
}

/// Run the marketplace remove command
pub fn run_marketplace_remove(workspace: &Workspace, name: &str, scope: Scope) -> Result<()> {
    let store = SettingsStore::new(workspace);
    let mut doc = store.load_or_default(scope)?;

    if !doc.remove_marketplace(name) {
        println!(
            "Marketplace {} is not present in the {} scope",
            name.cyan(),
            scope
        );
        return Ok(());
    }

    record_save(workspace, &store, scope, &doc, "marketplace-remove")?;
    println!(
        "{} marketplace {} from the {} scope",
        "Removed".green(),
        name.cyan(),
        scope
    );
    Ok(())
}

fn record_save(
    workspace: &Workspace,
    store: &SettingsStore,
    scope: Scope,
    doc: &plug_core::SettingsDocument,
    operation: &str,
) -> Result<()> {
    let path = workspace.settings_path(scope)?;
    let before = describe_file(&path);
    store.save(scope, doc)?;
    let after = describe_file(&path);

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
    Ok(())
}
