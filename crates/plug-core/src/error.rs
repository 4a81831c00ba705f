//! Error types for plug-core

use std::path::PathBuf;

use crate::scope::Scope;

/// Result type for plug-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in plug-core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A scope name outside {user, project, local}
    #[error("Unknown scope '{name}' (expected user, project, or local)")]
    InvalidScope { name: String },

    /// A project-level scope was named directly outside any project
    #[error("Scope '{scope}' requires a project, but no .plug directory was found")]
    NoProject { scope: Scope },

    /// The user configuration directory could not be determined
    #[error("Could not determine the user configuration directory")]
    NoUserDir,

    /// A settings document exists but cannot be parsed
    #[error("Malformed settings at {path}: {message}")]
    CorruptSettings { path: PathBuf, message: String },

    /// A profile document exists but cannot be parsed
    #[error("Malformed profile '{name}': {message}")]
    CorruptProfile { name: String, message: String },

    /// An event-log line other than a torn trailing record cannot be parsed
    #[error("Corrupt event record at {path}:{line}")]
    CorruptLogLine { path: PathBuf, line: usize },

    /// A named profile is missing from both disk and the embedded set
    #[error("Profile not found: {name}")]
    ProfileNotFound { name: String },

    /// A profile name that cannot be used as a file stem
    #[error("Invalid profile name '{name}'")]
    InvalidProfileName { name: String },

    /// Attempt to delete an embedded profile
    #[error("Profile '{name}' is built in and read-only")]
    BuiltinReadOnly { name: String },

    // Transparent wrappers for underlying crate errors
    /// Filesystem error from plug-fs
    #[error(transparent)]
    Fs(#[from] plug_fs::Error),

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// TOML deserialization error
    #[error(transparent)]
    TomlDe(#[from] toml::de::Error),

    /// TOML serialization error
    #[error(transparent)]
    TomlSer(#[from] toml::ser::Error),
}
