//! Effective configuration: the precedence-merged view of all scopes
//!
//! Resolution is a pure computation over loaded settings documents and is
//! recomputed on every query — the scope files may have been mutated
//! externally between calls, so nothing here is cached.

use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

use crate::scope::Scope;
use crate::settings::SettingsDocument;

/// The merged "what is actually active" view.
///
/// Maps each enabled identifier to the single scope that wins for it.
/// Identifiers enabled in no considered scope are absent — absence is the
/// disabled state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EffectiveConfig {
    winners: BTreeMap<String, Scope>,
}

impl EffectiveConfig {
    /// The scope that wins for `id`, if it is enabled anywhere.
    pub fn winner(&self, id: &str) -> Option<Scope> {
        self.winners.get(id).copied()
    }

    /// Enabled identifiers in sorted order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.winners.keys().map(String::as_str)
    }

    /// Iterate `(identifier, winning scope)` pairs in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Scope)> {
        self.winners.iter().map(|(id, &scope)| (id.as_str(), scope))
    }

    pub fn len(&self) -> usize {
        self.winners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.winners.is_empty()
    }
}

impl FromIterator<(String, Scope)> for EffectiveConfig {
    fn from_iter<I: IntoIterator<Item = (String, Scope)>>(iter: I) -> Self {
        Self {
            winners: iter.into_iter().collect(),
        }
    }
}

/// Merge the given scopes' documents by precedence.
///
/// For each identifier mentioned anywhere, the first scope in precedence
/// order (restricted to `docs`) where it is enabled wins. Identifiers
/// enabled nowhere are omitted. Passing a single scope degenerates to a
/// direct lookup of that scope's enabled set.
pub fn resolve(docs: &[(Scope, &SettingsDocument)]) -> EffectiveConfig {
    let ids: BTreeSet<&str> = docs
        .iter()
        .flat_map(|(_, doc)| doc.known_ids())
        .collect();

    let mut winners = BTreeMap::new();
    for id in ids {
        let winner = Scope::precedence().into_iter().find(|scope| {
            docs.iter()
                .any(|(s, doc)| s == scope && doc.is_enabled(id))
        });
        if let Some(scope) = winner {
            winners.insert(id.to_string(), scope);
        }
    }
    tracing::debug!(entries = winners.len(), "Resolved effective configuration");
    EffectiveConfig { winners }
}

/// The live marketplace list: the union across the given documents, sorted
/// and deduplicated.
pub fn merged_marketplaces(docs: &[(Scope, &SettingsDocument)]) -> Vec<String> {
    let set: BTreeSet<&String> = docs
        .iter()
        .flat_map(|(_, doc)| doc.marketplaces())
        .collect();
    set.into_iter().cloned().collect()
}
