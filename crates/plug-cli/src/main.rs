//! plug CLI
//!
//! The command-line interface for the layered plugin-configuration manager.

mod cli;
mod commands;
mod context;
mod error;

use clap::{CommandFactory, Parser};
use colored::Colorize;
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use cli::{Cli, Commands, MarketplaceAction, ProfileAction};
use error::Result;
use plug_core::audit::ReportOptions;
use plug_core::EventFilter;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    // Setup tracing if verbose
    if cli.verbose {
        let subscriber = FmtSubscriber::builder()
            .with_max_level(Level::DEBUG)
            .with_target(true)
            .finish();
        tracing::subscriber::set_global_default(subscriber)
            .expect("Failed to set tracing subscriber");
        tracing::debug!("Verbose mode enabled");
    }

    match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut command = Cli::command();
            clap_complete::generate(shell, &mut command, "plug", &mut std::io::stdout());
            Ok(())
        }
        Some(cmd) => execute_command(cmd, cli.config_dir),
        None => {
            // No command provided - show help hint
            println!("{} layered plugin configuration", "plug".green().bold());
            println!();
            println!("Run {} for available commands.", "plug --help".cyan());
            Ok(())
        }
    }
}

fn execute_command(cmd: Commands, config_dir: Option<PathBuf>) -> Result<()> {
    let workspace = context::build_workspace(config_dir)?;

    match cmd {
        Commands::Enable { id, scope } => {
            let scope = scope.unwrap_or_else(|| context::default_scope(&workspace));
            commands::run_enable(&workspace, &id, scope)
        }
        Commands::Disable { id, scope } => {
            let scope = scope.unwrap_or_else(|| context::default_scope(&workspace));
            commands::run_disable(&workspace, &id, scope)
        }
        Commands::List { scope, json } => commands::run_list(&workspace, scope, json),
        Commands::Marketplace { action } => match action {
            MarketplaceAction::Add { name, scope } => {
                let scope = scope.unwrap_or_else(|| context::default_scope(&workspace));
                commands::run_marketplace_add(&workspace, &name, scope)
            }
            MarketplaceAction::Remove { name, scope } => {
                let scope = scope.unwrap_or_else(|| context::default_scope(&workspace));
                commands::run_marketplace_remove(&workspace, &name, scope)
            }
        },
        Commands::Profile { action } => match action {
            ProfileAction::Save { name } => commands::run_profile_save(&workspace, &name),
            ProfileAction::List => commands::run_profile_list(&workspace),
            ProfileAction::Show { name, json } => {
                commands::run_profile_show(&workspace, &name, json)
            }
            ProfileAction::Diff { name, scope } => {
                commands::run_profile_diff(&workspace, &name, scope)
            }
            ProfileAction::Apply {
                name,
                scope,
                dry_run,
            } => {
                let scope = scope.unwrap_or_else(|| context::default_scope(&workspace));
                commands::run_profile_apply(&workspace, &name, scope, dry_run)
            }
            ProfileAction::Delete { name } => commands::run_profile_delete(&workspace, &name),
        },
        Commands::Events {
            file,
            operation,
            scope,
            since,
            limit,
            json,
        } => {
            let filter = EventFilter {
                file,
                operation,
                scope,
                since,
                limit,
            };
            commands::run_events(&workspace, &filter, json)
        }
        Commands::Audit {
            scope,
            operation,
            since,
            markdown,
        } => {
            let options = ReportOptions {
                scope,
                operation,
                since,
            };
            commands::run_audit(&workspace, options, markdown)
        }
        // Handled in run() before the workspace is built
        Commands::Completions { .. } => Ok(()),
    }
}
