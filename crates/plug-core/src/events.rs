//! Append-only operation log
//!
//! Every file mutation the tool performs is recorded as one self-contained
//! JSON line in a single log file. The log is the source of truth for
//! "what happened": records are appended in call order, never rewritten or
//! reordered, and each append is flushed to disk before the call returns.

use chrono::{DateTime, Utc};
use fs2::FileExt;
use serde::{Deserialize, Serialize};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::scope::Scope;
use crate::workspace::Workspace;

/// What kind of change a mutation made to its file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeKind {
    Create,
    Update,
    Delete,
}

impl std::fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Create => write!(f, "create"),
            Self::Update => write!(f, "update"),
            Self::Delete => write!(f, "delete"),
        }
    }
}

/// Size and content hash of a file at one moment.
///
/// A `None` hash means the raw content was unavailable when the descriptor
/// was captured (e.g. the file could not be read back).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentDescriptor {
    pub size: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sha256: Option<String>,
}

/// Capture a file's current descriptor, or `None` if it does not exist.
pub fn describe_file(path: &Path) -> Option<ContentDescriptor> {
    let metadata = std::fs::metadata(path).ok()?;
    let sha256 = plug_fs::checksum::file_checksum(path).ok();
    Some(ContentDescriptor {
        size: metadata.len(),
        sha256,
    })
}

/// One immutable record of a file mutation performed by the tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    /// Operation name, e.g. "enable", "apply"
    pub operation: String,
    pub scope: Scope,
    /// Absolute path of the mutated file
    pub file: PathBuf,
    pub change: ChangeKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub before: Option<ContentDescriptor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub after: Option<ContentDescriptor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Event {
    pub fn new(
        operation: impl Into<String>,
        scope: Scope,
        file: impl Into<PathBuf>,
        change: ChangeKind,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            operation: operation.into(),
            scope,
            file: file.into(),
            change,
            before: None,
            after: None,
            error: None,
        }
    }

    pub fn with_before(mut self, before: Option<ContentDescriptor>) -> Self {
        self.before = before;
        self
    }

    pub fn with_after(mut self, after: Option<ContentDescriptor>) -> Self {
        self.after = after;
        self
    }

    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(error.into());
        self
    }
}

/// Filters for querying the log. All dimensions are ANDed.
#[derive(Debug, Clone, Default)]
pub struct EventFilter {
    /// Exact absolute-path match
    pub file: Option<PathBuf>,
    /// Exact operation-name match
    pub operation: Option<String>,
    pub scope: Option<Scope>,
    /// Inclusive lower bound on the timestamp
    pub since: Option<DateTime<Utc>>,
    /// Maximum number of records after filtering and sorting; 0 = unbounded
    pub limit: usize,
}

impl EventFilter {
    fn matches(&self, event: &Event) -> bool {
        if let Some(file) = &self.file
            && event.file != *file
        {
            return false;
        }
        if let Some(operation) = &self.operation
            && event.operation != *operation
        {
            return false;
        }
        if let Some(scope) = self.scope
            && event.scope != scope
        {
            return false;
        }
        if let Some(since) = self.since
            && event.timestamp < since
        {
            return false;
        }
        true
    }
}

/// Result of querying the log.
///
/// `log_exists` distinguishes "the log has never been written" from "your
/// filters matched nothing", so callers can print a first-run message.
#[derive(Debug, Clone, Default)]
pub struct QueryResult {
    pub log_exists: bool,
    /// Matching events, most recent first
    pub events: Vec<Event>,
}

/// The append-only event log.
pub struct EventLog {
    path: PathBuf,
    /// Highest timestamp appended through this handle
    last_timestamp: Option<DateTime<Utc>>,
}

impl EventLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            last_timestamp: None,
        }
    }

    pub fn for_workspace(workspace: &Workspace) -> Self {
        Self::new(workspace.events_path())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one record and flush it to disk before returning.
    ///
    /// Timestamps are clamped to be non-decreasing across appends through
    /// this handle. Returns the record as written.
    pub fn append(&mut self, mut event: Event) -> Result<Event> {
        if let Some(last) = self.last_timestamp
            && event.timestamp < last
        {
            event.timestamp = last;
        }
        self.last_timestamp = Some(event.timestamp);

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let line = serde_json::to_string(&event)?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.lock_exclusive()?;
        let written = writeln!(file, "{line}").and_then(|_| file.sync_all());
        let _ = FileExt::unlock(&file);
        written?;

        Ok(event)
    }

    /// Query the log, most recent first.
    ///
    /// A non-existent log is not an error: the result carries
    /// `log_exists = false` and no events. A torn trailing line (from a
    /// concurrent append or an interrupted process) is skipped; corruption
    /// anywhere else fails the query.
    pub fn query(&self, filter: &EventFilter) -> Result<QueryResult> {
        if !self.path.exists() {
            return Ok(QueryResult {
                log_exists: false,
                events: Vec::new(),
            });
        }

        let content = std::fs::read_to_string(&self.path)?;
        let lines: Vec<&str> = content.lines().filter(|l| !l.trim().is_empty()).collect();

        let mut events: Vec<Event> = Vec::with_capacity(lines.len());
        for (idx, line) in lines.iter().enumerate() {
            match serde_json::from_str(line) {
                Ok(event) => events.push(event),
                Err(e) if idx + 1 == lines.len() => {
                    // Torn trailing record; tolerate rather than fail the query
                    tracing::warn!(path = ?self.path, error = %e, "Skipping torn trailing log record");
                }
                Err(_) => {
                    return Err(Error::CorruptLogLine {
                        path: self.path.clone(),
                        line: idx + 1,
                    });
                }
            }
        }

        events.retain(|event| filter.matches(event));

        // Newest first; the stable sort keeps reverse append order for
        // records sharing a timestamp.
        events.reverse();
        events.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));

        if filter.limit > 0 {
            events.truncate(filter.limit);
        }

        Ok(QueryResult {
            log_exists: true,
            events,
        })
    }
}
