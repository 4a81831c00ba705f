//! The three configuration scopes and their precedence order
//!
//! Settings exist simultaneously at three levels. A plugin enabled in a
//! higher-precedence scope wins over the same plugin in a lower one:
//!
//! 1. `local` — machine-local overrides inside a project (never shared)
//! 2. `project` — shared project configuration
//! 3. `user` — the user's global configuration

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::Error;

/// One precedence layer at which settings can be declared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    /// The user's global configuration
    User,
    /// Shared project configuration
    Project,
    /// Machine-local overrides, highest precedence
    Local,
}

impl Scope {
    /// All scopes in precedence order, highest first.
    ///
    /// This order is fixed; resolution and drift detection both depend on
    /// it never being reordered at runtime.
    pub fn precedence() -> [Scope; 3] {
        [Scope::Local, Scope::Project, Scope::User]
    }

    /// The canonical lowercase name of this scope.
    pub fn name(&self) -> &'static str {
        match self {
            Scope::User => "user",
            Scope::Project => "project",
            Scope::Local => "local",
        }
    }

    /// Whether this scope only exists inside a project.
    pub fn requires_project(&self) -> bool {
        matches!(self, Scope::Project | Scope::Local)
    }
}

impl std::fmt::Display for Scope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Scope {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Scope::User),
            "project" => Ok(Scope::Project),
            "local" => Ok(Scope::Local),
            other => Err(Error::InvalidScope {
                name: other.to_string(),
            }),
        }
    }
}
