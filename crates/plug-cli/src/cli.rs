//! CLI argument parsing using clap derive

use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use plug_core::Scope;

/// plug - Manage layered plugin configuration
#[derive(Parser, Debug)]
#[command(name = "plug")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Override the user configuration directory
    #[arg(long, global = true, env = "PLUG_CONFIG_DIR", value_name = "DIR")]
    pub config_dir: Option<PathBuf>,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Enable a plugin in one scope
    ///
    /// Examples:
    ///   plug enable formatter@core              # project scope inside a project
    ///   plug enable formatter@core --scope user # explicitly in the user scope
    Enable {
        /// Plugin identifier, e.g. "formatter@core"
        id: String,

        /// Scope to mutate (defaults to project inside a project, else user)
        #[arg(short, long)]
        scope: Option<Scope>,
    },

    /// Disable a plugin in one scope
    Disable {
        /// Plugin identifier to disable
        id: String,

        /// Scope to mutate (defaults to project inside a project, else user)
        #[arg(short, long)]
        scope: Option<Scope>,
    },

    /// Show the effective configuration
    ///
    /// Without --scope, merges every applicable scope by precedence
    /// (local > project > user) and shows the winning scope per plugin.
    /// With --scope, shows that single scope's view.
    List {
        /// Restrict to one scope instead of merging all of them
        #[arg(short, long)]
        scope: Option<Scope>,

        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Manage the marketplace list
    Marketplace {
        /// Marketplace action to perform
        #[command(subcommand)]
        action: MarketplaceAction,
    },

    /// Manage configuration profiles
    Profile {
        /// Profile action to perform
        #[command(subcommand)]
        action: ProfileAction,
    },

    /// Query the operation log
    ///
    /// Shows the file mutations plug has performed, most recent first.
    Events {
        /// Only events touching this exact file path
        #[arg(long)]
        file: Option<PathBuf>,

        /// Only events for this operation, e.g. "enable"
        #[arg(long)]
        operation: Option<String>,

        /// Only events in this scope
        #[arg(short, long)]
        scope: Option<Scope>,

        /// Only events at or after this RFC 3339 timestamp
        #[arg(long)]
        since: Option<DateTime<Utc>>,

        /// Maximum number of events to show (0 = unbounded)
        #[arg(short, long, default_value_t = 0)]
        limit: usize,

        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Generate an audit report over the operation log
    Audit {
        /// Only events in this scope
        #[arg(short, long)]
        scope: Option<Scope>,

        /// Only events for this operation
        #[arg(long)]
        operation: Option<String>,

        /// Only events at or after this RFC 3339 timestamp
        #[arg(long)]
        since: Option<DateTime<Utc>>,

        /// Render as Markdown instead of plain text
        #[arg(long)]
        markdown: bool,
    },

    /// Generate shell completions
    ///
    /// Examples:
    ///   plug completions bash > ~/.local/share/bash-completion/completions/plug
    ///   plug completions zsh > ~/.zfunc/_plug
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Marketplace management actions
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum MarketplaceAction {
    /// Add a marketplace to one scope
    Add {
        /// Marketplace name
        name: String,

        /// Scope to mutate (defaults to project inside a project, else user)
        #[arg(short, long)]
        scope: Option<Scope>,
    },

    /// Remove a marketplace from one scope
    Remove {
        /// Marketplace name
        name: String,

        /// Scope to mutate (defaults to project inside a project, else user)
        #[arg(short, long)]
        scope: Option<Scope>,
    },
}

/// Profile management actions
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum ProfileAction {
    /// Snapshot the current effective configuration under a name
    Save {
        /// Profile name
        name: String,
    },

    /// List saved and built-in profiles
    List,

    /// Show a profile's captured state
    Show {
        /// Profile name
        name: String,

        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Show drift between a profile and the live configuration
    Diff {
        /// Profile name
        name: String,

        /// Compare against one scope's document instead of the merged view
        #[arg(short, long)]
        scope: Option<Scope>,
    },

    /// Reconcile the live configuration to a profile
    ///
    /// Enables captured plugins that are missing and disables extras,
    /// writing to the target scope.
    Apply {
        /// Profile name
        name: String,

        /// Scope to write (defaults to project inside a project, else user)
        #[arg(short, long)]
        scope: Option<Scope>,

        /// Print the plan without changing anything
        #[arg(long)]
        dry_run: bool,
    },

    /// Delete a saved profile
    Delete {
        /// Profile name
        name: String,
    },
}
