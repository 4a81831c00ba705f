//! Shared test utilities for the plug workspace.
//!
//! This crate provides standardised test fixtures to eliminate duplication
//! across crate test suites. It is a dev-dependency only — never published.
//! It deliberately builds fixtures with raw file writes so it can be used
//! by every crate without depending on any of them.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A temporary directory laid out like a real plug installation: a user
/// configuration directory and, optionally, a project root carrying the
/// `.plug/` marker.
///
/// # Example
///
/// ```rust,no_run
/// use plug_test_utils::TestWorkspace;
///
/// let fixture = TestWorkspace::with_project();
/// fixture.write_project_settings(r#"{"enabledPlugins": {"fmt@core": true}}"#);
/// fixture.assert_file_exists("project/.plug/settings.json");
/// ```
pub struct TestWorkspace {
    temp_dir: TempDir,
    has_project: bool,
}

impl Default for TestWorkspace {
    fn default() -> Self {
        Self::new()
    }
}

impl TestWorkspace {
    /// A fixture with a user configuration directory only.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir_all(temp_dir.path().join("user")).unwrap();
        Self {
            temp_dir,
            has_project: false,
        }
    }

    /// A fixture that is also inside a project (a root with `.plug/`).
    pub fn with_project() -> Self {
        let fixture = Self::new();
        fs::create_dir_all(fixture.temp_dir.path().join("project/.plug")).unwrap();
        Self {
            has_project: true,
            ..fixture
        }
    }

    /// Root of the whole fixture.
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// The user configuration directory (plays the platform config dir).
    pub fn user_dir(&self) -> PathBuf {
        self.root().join("user")
    }

    /// The project root, when this fixture has one.
    pub fn project_root(&self) -> Option<PathBuf> {
        self.has_project.then(|| self.root().join("project"))
    }

    /// Write the user-scope settings document verbatim.
    pub fn write_user_settings(&self, json: &str) {
        self.write("user/settings.json", json);
    }

    /// Write the project-scope settings document verbatim.
    pub fn write_project_settings(&self, json: &str) {
        assert!(self.has_project, "fixture has no project");
        self.write("project/.plug/settings.json", json);
    }

    /// Write the local-scope settings document verbatim.
    pub fn write_local_settings(&self, json: &str) {
        assert!(self.has_project, "fixture has no project");
        self.write("project/.plug/settings.local.json", json);
    }

    /// Write any file relative to the fixture root.
    pub fn write(&self, relative: &str, content: &str) {
        let path = self.root().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    /// Read any file relative to the fixture root.
    pub fn read(&self, relative: &str) -> String {
        fs::read_to_string(self.root().join(relative)).unwrap()
    }

    /// Assert a file exists relative to the fixture root.
    pub fn assert_file_exists(&self, relative: &str) {
        assert!(
            self.root().join(relative).is_file(),
            "expected file to exist: {relative}"
        );
    }
}
