//! Per-scope settings documents
//!
//! A settings document is a JSON file owned by exactly one scope. The store
//! understands two fields — the enabled-plugins map and the marketplace list
//! — and carries every other top-level key through load/save untouched, in
//! its original order. Absence of the file is the valid "not configured"
//! state; a file that exists but does not parse is an explicit error.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::error::{Error, Result};
use crate::scope::Scope;
use crate::workspace::Workspace;

/// One scope's settings document.
///
/// Unrecognized top-level keys are preserved verbatim through a load/save
/// cycle; only the typed fields are ever mutated.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SettingsDocument {
    /// Plugin identifier -> enabled flag. Absent identifiers are disabled.
    #[serde(
        rename = "enabledPlugins",
        default,
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    enabled_plugins: BTreeMap<String, bool>,

    /// Marketplaces this scope knows about.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    marketplaces: Vec<String>,

    /// Everything else in the document, in original key order.
    #[serde(flatten)]
    extra: serde_json::Map<String, Value>,
}

impl SettingsDocument {
    /// Whether `id` is enabled. An absent identifier is disabled.
    pub fn is_enabled(&self, id: &str) -> bool {
        self.enabled_plugins.get(id).copied().unwrap_or(false)
    }

    /// Set the enabled flag for `id`. Mutates only the enabled map.
    pub fn set_enabled(&mut self, id: &str, enabled: bool) {
        self.enabled_plugins.insert(id.to_string(), enabled);
    }

    /// Identifiers with a true flag, in sorted order.
    pub fn enabled_ids(&self) -> Vec<&str> {
        self.enabled_plugins
            .iter()
            .filter(|&(_, &on)| on)
            .map(|(id, _)| id.as_str())
            .collect()
    }

    /// Every identifier mentioned in the enabled map, regardless of flag.
    pub fn known_ids(&self) -> Vec<&str> {
        self.enabled_plugins.keys().map(String::as_str).collect()
    }

    /// The marketplaces this scope declares.
    pub fn marketplaces(&self) -> &[String] {
        &self.marketplaces
    }

    /// Add a marketplace if not already present. Returns whether it was added.
    pub fn add_marketplace(&mut self, name: &str) -> bool {
        if self.marketplaces.iter().any(|m| m == name) {
            return false;
        }
        self.marketplaces.push(name.to_string());
        true
    }

    /// Remove a marketplace. Returns whether it was present.
    pub fn remove_marketplace(&mut self, name: &str) -> bool {
        let before = self.marketplaces.len();
        self.marketplaces.retain(|m| m != name);
        self.marketplaces.len() != before
    }

    /// Replace the marketplace list wholesale.
    pub fn set_marketplaces(&mut self, marketplaces: Vec<String>) {
        self.marketplaces = marketplaces;
    }

    /// Canonical serialized form: pretty JSON with a trailing newline.
    pub fn to_canonical_json(&self) -> Result<String> {
        let mut out = serde_json::to_string_pretty(self)?;
        out.push('\n');
        Ok(out)
    }
}

/// Loads and saves one scope's settings document.
pub struct SettingsStore<'a> {
    workspace: &'a Workspace,
}

impl<'a> SettingsStore<'a> {
    pub fn new(workspace: &'a Workspace) -> Self {
        Self { workspace }
    }

    /// Load a scope's settings document.
    ///
    /// `Ok(None)` means the file does not exist — the empty/unconfigured
    /// state. A file that exists but does not parse is
    /// [`Error::CorruptSettings`], never silently coerced to empty.
    pub fn load(&self, scope: Scope) -> Result<Option<SettingsDocument>> {
        let path = self.workspace.settings_path(scope)?;
        if !path.exists() {
            return Ok(None);
        }
        let content = plug_fs::io::read_text(&path)?;
        let doc = serde_json::from_str(&content).map_err(|e| Error::CorruptSettings {
            path: path.clone(),
            message: e.to_string(),
        })?;
        Ok(Some(doc))
    }

    /// Load a scope's settings, falling back to an empty document.
    ///
    /// Write paths use this: the document is created on first save.
    pub fn load_or_default(&self, scope: Scope) -> Result<SettingsDocument> {
        Ok(self.load(scope)?.unwrap_or_default())
    }

    /// Save a scope's settings document atomically.
    ///
    /// Returns the path written, for callers recording the mutation in the
    /// event log.
    pub fn save(&self, scope: Scope, doc: &SettingsDocument) -> Result<PathBuf> {
        let path = self.workspace.settings_path(scope)?;
        plug_fs::io::write_text(&path, &doc.to_canonical_json()?)?;
        tracing::debug!(scope = %scope, ?path, "Saved settings document");
        Ok(path)
    }

    /// Load every applicable scope's document, in precedence order.
    ///
    /// Scopes whose file is absent are skipped (absence contributes no
    /// entries); scopes that do not apply outside a project are skipped
    /// entirely.
    pub fn load_all(&self) -> Result<Vec<(Scope, SettingsDocument)>> {
        let mut docs = Vec::new();
        for scope in self.workspace.available_scopes() {
            if let Some(doc) = self.load(scope)? {
                docs.push((scope, doc));
            }
        }
        Ok(docs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_identifier_is_disabled() {
        let doc = SettingsDocument::default();
        assert!(!doc.is_enabled("missing@market"));
    }

    #[test]
    fn set_enabled_round_trips() {
        let mut doc = SettingsDocument::default();
        doc.set_enabled("fmt@core", true);
        assert!(doc.is_enabled("fmt@core"));
        doc.set_enabled("fmt@core", false);
        assert!(!doc.is_enabled("fmt@core"));
    }

    #[test]
    fn enabled_ids_skip_false_flags() {
        let mut doc = SettingsDocument::default();
        doc.set_enabled("a@m", true);
        doc.set_enabled("b@m", false);
        doc.set_enabled("c@m", true);
        assert_eq!(doc.enabled_ids(), vec!["a@m", "c@m"]);
    }

    #[test]
    fn unknown_fields_survive_a_parse_serialize_cycle() {
        let raw = r#"{
  "theme": "dark",
  "enabledPlugins": {
    "fmt@core": true
  },
  "telemetry": {
    "enabled": false
  }
}"#;
        let doc: SettingsDocument = serde_json::from_str(raw).unwrap();
        let out = doc.to_canonical_json().unwrap();
        let reparsed: Value = serde_json::from_str(&out).unwrap();

        assert_eq!(reparsed["theme"], "dark");
        assert_eq!(reparsed["telemetry"]["enabled"], false);
        assert_eq!(reparsed["enabledPlugins"]["fmt@core"], true);
    }

    #[test]
    fn marketplace_add_is_idempotent() {
        let mut doc = SettingsDocument::default();
        assert!(doc.add_marketplace("core"));
        assert!(!doc.add_marketplace("core"));
        assert_eq!(doc.marketplaces(), ["core"]);
    }

    #[test]
    fn marketplace_remove_reports_presence() {
        let mut doc = SettingsDocument::default();
        doc.add_marketplace("core");
        assert!(doc.remove_marketplace("core"));
        assert!(!doc.remove_marketplace("core"));
    }
}
