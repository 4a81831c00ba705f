//! Operation-log querying

use chrono::SecondsFormat;
use colored::Colorize;

use plug_core::{EventFilter, EventLog, Workspace};

use crate::error::Result;

/// Run the events command
pub fn run_events(workspace: &Workspace, filter: &EventFilter, json: bool) -> Result<()> {
    let log = EventLog::for_workspace(workspace);
    let result = log.query(filter)?;

    if !result.log_exists {
        println!("{}", "No operations recorded yet.".dimmed());
        println!(
            "The log appears after the first mutating command, e.g. {}.",
            "plug enable".cyan()
        );
        return Ok(());
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&result.events)?);
        return Ok(());
    }

    if result.events.is_empty() {
        println!("No events match the given filters.");
        return Ok(());
    }

    for event in &result.events {
        print!(
            "{}  {}  {}  {}  {}",
            event
                .timestamp
                .to_rfc3339_opts(SecondsFormat::Secs, true)
                .dimmed(),
            event.operation.cyan(),
            event.scope,
            event.change,
            event.file.display()
        );
        if let Some(error) = &event.error {
            print!("  {}", format!("(error: {error})").red());
        }
        println!();
    }
    Ok(())
}
