//! Drift detection between a profile and live state
//!
//! Comparison is a set difference over identifier maps. Comparing against
//! the merged effective configuration and comparing against one scope's
//! document go through the same routine — the per-scope variant only
//! narrows the live side, it never changes edge-case handling.

use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

use crate::profile::Profile;
use crate::resolve::EffectiveConfig;
use crate::scope::Scope;
use crate::settings::SettingsDocument;

/// Structural difference between a profile's captured state and live state.
///
/// The identifier categories are disjoint. Marketplace drift is kept as its
/// own category; a diverging marketplace list counts as drift even when the
/// enabled sets are identical.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Diff {
    /// Captured in the profile, not enabled on the system
    pub missing: BTreeSet<String>,
    /// Enabled on the system, not captured in the profile
    pub extra: BTreeSet<String>,
    /// Enabled in both, but at a different scope than captured
    pub moved: BTreeSet<String>,
    /// Symmetric difference of captured vs live marketplace lists
    pub marketplace_drift: BTreeSet<String>,
}

impl Diff {
    /// Whether any category is non-empty.
    pub fn has_changes(&self) -> bool {
        !self.missing.is_empty()
            || !self.extra.is_empty()
            || !self.moved.is_empty()
            || !self.marketplace_drift.is_empty()
    }

    /// One-line human summary, e.g. `"2 missing, 1 extra"`.
    ///
    /// Zero-valued clauses are omitted entirely; the empty diff renders as
    /// `"no drift"`.
    pub fn summarize(&self) -> String {
        let mut clauses = Vec::new();
        if !self.missing.is_empty() {
            clauses.push(format!("{} missing", self.missing.len()));
        }
        if !self.extra.is_empty() {
            clauses.push(format!("{} extra", self.extra.len()));
        }
        if !self.moved.is_empty() {
            clauses.push(format!("{} moved", self.moved.len()));
        }
        if !self.marketplace_drift.is_empty() {
            clauses.push("marketplaces differ".to_string());
        }
        if clauses.is_empty() {
            return "no drift".to_string();
        }
        clauses.join(", ")
    }
}

/// Compare a profile against the merged effective configuration.
pub fn compare(
    profile: &Profile,
    effective: &EffectiveConfig,
    live_marketplaces: &[String],
) -> Diff {
    let live: BTreeMap<&str, Scope> = effective.iter().collect();
    diff_against(profile, &live, live_marketplaces)
}

/// Compare a profile against exactly one scope's settings document.
///
/// Every plugin enabled in the document is attributed to `scope`; the live
/// marketplace list is the document's own.
pub fn compare_with_scope(profile: &Profile, scope: Scope, doc: &SettingsDocument) -> Diff {
    let live: BTreeMap<&str, Scope> = doc.enabled_ids().into_iter().map(|id| (id, scope)).collect();
    diff_against(profile, &live, doc.marketplaces())
}

/// Fast boolean path, equivalent to `compare(..).has_changes()`.
pub fn is_modified(
    profile: &Profile,
    effective: &EffectiveConfig,
    live_marketplaces: &[String],
) -> bool {
    compare(profile, effective, live_marketplaces).has_changes()
}

fn diff_against(
    profile: &Profile,
    live: &BTreeMap<&str, Scope>,
    live_marketplaces: &[String],
) -> Diff {
    let mut diff = Diff::default();

    for (id, captured_scope) in &profile.plugins {
        match live.get(id.as_str()) {
            None => {
                diff.missing.insert(id.clone());
            }
            Some(live_scope) if live_scope != captured_scope => {
                diff.moved.insert(id.clone());
            }
            Some(_) => {}
        }
    }

    for id in live.keys() {
        if !profile.plugins.contains_key(*id) {
            diff.extra.insert((*id).to_string());
        }
    }

    let captured: BTreeSet<&String> = profile.marketplaces.iter().collect();
    let current: BTreeSet<&String> = live_marketplaces.iter().collect();
    diff.marketplace_drift = captured
        .symmetric_difference(&current)
        .map(|m| (*m).clone())
        .collect();

    diff
}
