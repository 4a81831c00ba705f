//! Workspace construction for one CLI invocation
//!
//! Every command builds one [`Workspace`] up front and passes it down; no
//! command reads global state after this point.

use std::path::PathBuf;

use plug_core::{Scope, Workspace};

use crate::error::Result;

/// Build the workspace for the current invocation.
///
/// `config_dir` (from `--config-dir` / `PLUG_CONFIG_DIR`) replaces the
/// platform config directory; the project root is still discovered by
/// walking up from the working directory.
pub fn build_workspace(config_dir: Option<PathBuf>) -> Result<Workspace> {
    let cwd = std::env::current_dir()?;
    match config_dir {
        Some(dir) => Ok(Workspace::new(dir, plug_fs::find_project_root(&cwd))),
        None => Ok(Workspace::discover(&cwd)?),
    }
}

/// The scope mutated when the user names none: project inside a project,
/// user otherwise.
pub fn default_scope(workspace: &Workspace) -> Scope {
    if workspace.project_root().is_some() {
        Scope::Project
    } else {
        Scope::User
    }
}
