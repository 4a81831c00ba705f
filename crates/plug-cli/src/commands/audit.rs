//! Audit-report generation over the operation log

use colored::Colorize;

use plug_core::audit::{ReportOptions, generate, render_markdown, render_text};
use plug_core::{EventLog, Workspace};

use crate::error::Result;

/// Run the audit command
pub fn run_audit(workspace: &Workspace, options: ReportOptions, markdown: bool) -> Result<()> {
    let log = EventLog::for_workspace(workspace);
    let result = log.query(&options.to_filter())?;

    if !result.log_exists {
        println!("{}", "No operations recorded yet.".dimmed());
        println!(
            "The log appears after the first mutating command, e.g. {}.",
            "plug enable".cyan()
        );
        return Ok(());
    }

    let report = generate(result.events, options);
    let rendered = if markdown {
        render_markdown(&report)
    } else {
        render_text(&report)
    };
    print!("{rendered}");
    Ok(())
}
