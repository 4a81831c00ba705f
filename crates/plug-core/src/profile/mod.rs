//! Named profiles: persisted snapshots of a desired configuration state
//!
//! A profile captures the effective configuration at one moment — which
//! plugins were enabled, at which scope each one won, and which
//! marketplaces were known — under a reusable name. Profiles are persisted
//! one TOML document per name; a small embedded set ships with the tool and
//! answers lookups that miss on disk. Embedded profiles are never mutated.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::PathBuf;

use crate::error::{Error, Result};
use crate::resolve::EffectiveConfig;
use crate::scope::Scope;
use crate::workspace::Workspace;

/// Profile document format version.
const FORMAT_VERSION: &str = "1";

/// Profiles compiled into the binary, checked only when disk lookup misses.
const BUILTIN_PROFILES: &[(&str, &str)] = &[
    ("default", include_str!("builtin/default.toml")),
    ("minimal", include_str!("builtin/minimal.toml")),
];

/// A named, persisted snapshot of configuration state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    /// Document format version for forward compatibility
    version: String,
    /// Unique profile name; doubles as the file stem on disk
    pub name: String,
    /// When this profile was first captured
    pub created_at: DateTime<Utc>,
    /// When the captured state last changed
    pub updated_at: DateTime<Utc>,
    /// Marketplaces known at capture time, sorted
    #[serde(default)]
    pub marketplaces: Vec<String>,
    /// Captured plugins: identifier -> the scope that won at capture time
    #[serde(default)]
    pub plugins: BTreeMap<String, Scope>,
}

impl Profile {
    /// Capture the live effective configuration into an in-memory profile.
    ///
    /// Nothing is persisted here — callers decide when drift becomes a new
    /// baseline by calling [`ProfileStore::save`].
    pub fn snapshot(
        name: &str,
        effective: &EffectiveConfig,
        marketplaces: Vec<String>,
        now: DateTime<Utc>,
    ) -> Self {
        let mut marketplaces = marketplaces;
        marketplaces.sort();
        marketplaces.dedup();
        Self {
            version: FORMAT_VERSION.to_string(),
            name: name.to_string(),
            created_at: now,
            updated_at: now,
            marketplaces,
            plugins: effective
                .iter()
                .map(|(id, scope)| (id.to_string(), scope))
                .collect(),
        }
    }

    /// The captured enabled-identifier set, in sorted order.
    pub fn plugin_ids(&self) -> Vec<&str> {
        self.plugins.keys().map(String::as_str).collect()
    }

    fn parse(name: &str, content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::CorruptProfile {
            name: name.to_string(),
            message: e.to_string(),
        })
    }
}

/// Persists and loads named profiles.
pub struct ProfileStore<'a> {
    workspace: &'a Workspace,
}

impl<'a> ProfileStore<'a> {
    pub fn new(workspace: &'a Workspace) -> Self {
        Self { workspace }
    }

    /// Save a profile to disk atomically.
    ///
    /// Saving the same profile value twice produces byte-identical output;
    /// timestamps belong to the captured state, not to the act of saving.
    pub fn save(&self, profile: &Profile) -> Result<PathBuf> {
        let path = self.path_for(&profile.name)?;
        let content = toml::to_string_pretty(profile)?;
        plug_fs::io::write_text(&path, &content)?;
        tracing::debug!(name = %profile.name, ?path, "Saved profile");
        Ok(path)
    }

    /// Load a profile by name: disk first, then the embedded set.
    ///
    /// Missing from both sources is [`Error::ProfileNotFound`]; a document
    /// that exists but does not parse is [`Error::CorruptProfile`].
    pub fn load(&self, name: &str) -> Result<Profile> {
        let path = self.path_for(name)?;
        if path.exists() {
            let content = plug_fs::io::read_text(&path)?;
            return Profile::parse(name, &content);
        }
        tracing::debug!(name, "No saved profile on disk, trying embedded set");
        self.load_embedded(name)
    }

    /// Load a profile from the read-only embedded set.
    pub fn load_embedded(&self, name: &str) -> Result<Profile> {
        let content = BUILTIN_PROFILES
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, content)| *content)
            .ok_or_else(|| Error::ProfileNotFound {
                name: name.to_string(),
            })?;
        Profile::parse(name, content)
    }

    /// All known profile names: user-saved and embedded, sorted, deduped.
    pub fn list(&self) -> Result<Vec<String>> {
        let mut names: BTreeSet<String> = BUILTIN_PROFILES
            .iter()
            .map(|(n, _)| n.to_string())
            .collect();

        let dir = self.workspace.profiles_dir();
        if dir.is_dir() {
            for entry in fs::read_dir(&dir)? {
                let path = entry?.path();
                if path.extension().is_some_and(|ext| ext == "toml")
                    && let Some(stem) = path.file_stem().and_then(|s| s.to_str())
                {
                    names.insert(stem.to_string());
                }
            }
        }
        Ok(names.into_iter().collect())
    }

    /// Delete a user-saved profile. Embedded profiles cannot be deleted.
    ///
    /// Returns the path that was removed, for event logging.
    pub fn delete(&self, name: &str) -> Result<PathBuf> {
        let path = self.path_for(name)?;
        if path.exists() {
            fs::remove_file(&path)?;
            return Ok(path);
        }
        if BUILTIN_PROFILES.iter().any(|(n, _)| *n == name) {
            return Err(Error::BuiltinReadOnly {
                name: name.to_string(),
            });
        }
        Err(Error::ProfileNotFound {
            name: name.to_string(),
        })
    }

    /// Whether a name belongs to the embedded set.
    pub fn is_builtin(&self, name: &str) -> bool {
        BUILTIN_PROFILES.iter().any(|(n, _)| *n == name)
    }

    /// The on-disk path a profile name maps to.
    ///
    /// Validates the name; callers use this to inspect the file around a
    /// save or delete (e.g. for event-log descriptors).
    pub fn path_for(&self, name: &str) -> Result<PathBuf> {
        if name.is_empty()
            || name.starts_with('.')
            || name.contains('/')
            || name.contains('\\')
        {
            return Err(Error::InvalidProfileName {
                name: name.to_string(),
            });
        }
        Ok(self.workspace.profiles_dir().join(format!("{name}.toml")))
    }
}
