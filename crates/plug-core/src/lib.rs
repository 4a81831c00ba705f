//! State reconciliation and audit core for plug
//!
//! This crate implements the parts of the tool that carry non-trivial
//! invariants:
//!
//! - **Scope model**: three precedence layers (user, project, local) and the
//!   path rule for each layer's settings document
//! - **Settings store**: per-scope settings documents with round-trip
//!   preservation of unrecognized fields
//! - **Resolver**: the precedence-merged effective configuration
//! - **Profile store**: named snapshots with a read-only embedded fallback
//! - **Drift detector**: structural diff between a profile and live state
//! - **Event log**: append-only, durable record of every file mutation
//! - **Audit reporter**: timeline plus aggregate statistics over the log
//!
//! # Architecture
//!
//! `plug-core` sits above `plug-fs` and below the CLI:
//!
//! ```text
//!        plug-cli
//!            |
//!        plug-core
//!            |
//!         plug-fs
//! ```
//!
//! The core holds no process-wide mutable state; every entry point receives
//! an explicit [`Workspace`] describing where the scope, profile, and event
//! files live.

pub mod audit;
pub mod drift;
pub mod error;
pub mod events;
pub mod profile;
pub mod resolve;
pub mod scope;
pub mod settings;
pub mod workspace;

pub use audit::{AuditReport, ReportOptions, generate, render_markdown, render_text};
pub use drift::{Diff, compare, compare_with_scope, is_modified};
pub use error::{Error, Result};
pub use events::{ChangeKind, ContentDescriptor, Event, EventFilter, EventLog, QueryResult};
pub use profile::{Profile, ProfileStore};
pub use resolve::{EffectiveConfig, merged_marketplaces, resolve};
pub use scope::Scope;
pub use settings::{SettingsDocument, SettingsStore};
pub use workspace::Workspace;
