//! Workspace paths for settings, profiles, and the event log
//!
//! The [`Workspace`] is an explicit value passed into every core entry
//! point; the core holds no process-wide mutable state. The CLI constructs
//! one per invocation — by discovery in normal use, or directly in tests.

use std::path::{Path, PathBuf};

use plug_fs::find_project_root;

use crate::error::{Error, Result};
use crate::scope::Scope;

/// Application directory name under the platform config dir.
const APP_DIR: &str = "plug";

/// Settings document name for the user and project scopes.
const SETTINGS_FILE: &str = "settings.json";

/// Settings document name for the machine-local scope (git-ignored).
const LOCAL_SETTINGS_FILE: &str = "settings.local.json";

/// Where one invocation's settings, profiles, and event log live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Workspace {
    /// Base directory for user-scope settings, profiles, and events
    user_dir: PathBuf,
    /// Discovered project root, if the working directory is inside one
    project_root: Option<PathBuf>,
}

impl Workspace {
    /// Create a workspace from explicit paths.
    ///
    /// Used by tests and by callers that already know where everything
    /// lives. `user_dir` plays the role the platform config directory plays
    /// in [`Workspace::discover`].
    pub fn new(user_dir: impl Into<PathBuf>, project_root: Option<PathBuf>) -> Self {
        Self {
            user_dir: user_dir.into(),
            project_root,
        }
    }

    /// Discover the workspace for a working directory.
    ///
    /// The user base directory is `<config_dir>/plug` (platform-appropriate
    /// via `dirs`); the project root is the nearest ancestor of
    /// `working_dir` carrying a `.plug/` marker, if any.
    pub fn discover(working_dir: &Path) -> Result<Self> {
        let user_dir = dirs::config_dir()
            .map(|d| d.join(APP_DIR))
            .ok_or(Error::NoUserDir)?;
        let project_root = find_project_root(working_dir);
        tracing::debug!(?user_dir, ?project_root, "Discovered workspace");
        Ok(Self {
            user_dir,
            project_root,
        })
    }

    /// Base directory for user-scope files.
    pub fn user_dir(&self) -> &Path {
        &self.user_dir
    }

    /// The discovered project root, if any.
    pub fn project_root(&self) -> Option<&Path> {
        self.project_root.as_deref()
    }

    /// The settings document path for one scope.
    ///
    /// Naming a project-level scope outside a project is a configuration
    /// error; scans over "all scopes" should use
    /// [`Workspace::available_scopes`] instead, which simply skips them.
    pub fn settings_path(&self, scope: Scope) -> Result<PathBuf> {
        match scope {
            Scope::User => Ok(self.user_dir.join(SETTINGS_FILE)),
            Scope::Project => self
                .project_dir()
                .map(|d| d.join(SETTINGS_FILE))
                .ok_or(Error::NoProject { scope }),
            Scope::Local => self
                .project_dir()
                .map(|d| d.join(LOCAL_SETTINGS_FILE))
                .ok_or(Error::NoProject { scope }),
        }
    }

    /// The scopes that apply to this workspace, in precedence order.
    ///
    /// Outside a project this is just `[User]`.
    pub fn available_scopes(&self) -> Vec<Scope> {
        Scope::precedence()
            .into_iter()
            .filter(|s| !s.requires_project() || self.project_root.is_some())
            .collect()
    }

    /// Directory holding user-saved profiles.
    pub fn profiles_dir(&self) -> PathBuf {
        self.user_dir.join("profiles")
    }

    /// The append-only event-log path.
    pub fn events_path(&self) -> PathBuf {
        self.user_dir.join("events").join("events.jsonl")
    }

    fn project_dir(&self) -> Option<PathBuf> {
        self.project_root
            .as_ref()
            .map(|root| root.join(plug_fs::PROJECT_MARKER))
    }
}
