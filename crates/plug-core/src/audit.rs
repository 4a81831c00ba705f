//! Audit reports over the operation log
//!
//! A report is a pure computation over an already-filtered event sequence:
//! the timeline itself plus aggregate counts. Reports are recomputed per
//! query and never persisted. Two renderers present the same report value;
//! no statistic appears in one and not the other.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt::Write;

use crate::events::{Event, EventFilter};
use crate::scope::Scope;

/// Filter dimensions for a report, recorded in the header so the report is
/// reproducible.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ReportOptions {
    pub scope: Option<Scope>,
    pub operation: Option<String>,
    pub since: Option<DateTime<Utc>>,
}

impl ReportOptions {
    /// The equivalent event-log filter.
    pub fn to_filter(&self) -> EventFilter {
        EventFilter {
            file: None,
            operation: self.operation.clone(),
            scope: self.scope,
            since: self.since,
            limit: 0,
        }
    }

    fn label(&self) -> String {
        let mut parts = Vec::new();
        if let Some(scope) = self.scope {
            parts.push(format!("scope={scope}"));
        }
        if let Some(operation) = &self.operation {
            parts.push(format!("operation={operation}"));
        }
        if let Some(since) = self.since {
            parts.push(format!(
                "since={}",
                since.to_rfc3339_opts(SecondsFormat::Secs, true)
            ));
        }
        if parts.is_empty() {
            return "none".to_string();
        }
        parts.join(", ")
    }
}

/// Timeline plus aggregate statistics over a filtered event sequence.
#[derive(Debug, Clone, Serialize)]
pub struct AuditReport {
    /// The filters this report was generated with
    pub options: ReportOptions,
    /// The filtered events, in the order supplied (most recent first)
    pub events: Vec<Event>,
    /// Event count per operation name
    pub by_operation: BTreeMap<String, usize>,
    /// Event count per scope
    pub by_scope: BTreeMap<String, usize>,
    /// Events that recorded an error outcome
    pub errors: usize,
    /// Sum of `after.size - before.size` where both descriptors are present
    pub size_delta: i64,
}

/// Build a report from an already-filtered, time-ordered event sequence.
///
/// An empty sequence produces a report with zero-valued statistics.
pub fn generate(events: Vec<Event>, options: ReportOptions) -> AuditReport {
    let mut by_operation: BTreeMap<String, usize> = BTreeMap::new();
    let mut by_scope: BTreeMap<String, usize> = BTreeMap::new();
    let mut errors = 0;
    let mut size_delta: i64 = 0;

    for event in &events {
        *by_operation.entry(event.operation.clone()).or_default() += 1;
        *by_scope.entry(event.scope.name().to_string()).or_default() += 1;
        if event.error.is_some() {
            errors += 1;
        }
        if let (Some(before), Some(after)) = (&event.before, &event.after) {
            size_delta += after.size as i64 - before.size as i64;
        }
    }

    AuditReport {
        options,
        events,
        by_operation,
        by_scope,
        errors,
        size_delta,
    }
}

fn timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Render a report as plain text.
pub fn render_text(report: &AuditReport) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "Operation audit");
    let _ = writeln!(out, "  filters: {}", report.options.label());
    let _ = writeln!(out, "  events: {}", report.events.len());
    let _ = writeln!(out, "  errors: {}", report.errors);
    let _ = writeln!(out, "  size delta: {:+} bytes", report.size_delta);
    out.push('\n');

    let _ = writeln!(out, "Timeline (most recent first)");
    if report.events.is_empty() {
        let _ = writeln!(out, "  (no events)");
    }
    for event in &report.events {
        let _ = write!(
            out,
            "  {}  {}  {}  {}  {}",
            timestamp(&event.timestamp),
            event.operation,
            event.scope,
            event.change,
            event.file.display()
        );
        if let Some(error) = &event.error {
            let _ = write!(out, "  (error: {error})");
        }
        out.push('\n');
    }
    out.push('\n');

    let _ = writeln!(out, "Counts by operation");
    if report.by_operation.is_empty() {
        let _ = writeln!(out, "  (none)");
    }
    for (operation, count) in &report.by_operation {
        let _ = writeln!(out, "  {operation}: {count}");
    }
    out.push('\n');

    let _ = writeln!(out, "Counts by scope");
    if report.by_scope.is_empty() {
        let _ = writeln!(out, "  (none)");
    }
    for (scope, count) in &report.by_scope {
        let _ = writeln!(out, "  {scope}: {count}");
    }

    out
}

/// Render a report as Markdown. Same data as [`render_text`].
pub fn render_markdown(report: &AuditReport) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "# Operation audit");
    out.push('\n');
    let _ = writeln!(out, "Filters: {}", report.options.label());
    out.push('\n');
    let _ = writeln!(out, "- Events: {}", report.events.len());
    let _ = writeln!(out, "- Errors: {}", report.errors);
    let _ = writeln!(out, "- Size delta: {:+} bytes", report.size_delta);
    out.push('\n');

    let _ = writeln!(out, "## Timeline (most recent first)");
    out.push('\n');
    if report.events.is_empty() {
        let _ = writeln!(out, "(no events)");
    } else {
        let _ = writeln!(out, "| Timestamp | Operation | Scope | Change | File | Error |");
        let _ = writeln!(out, "|---|---|---|---|---|---|");
        for event in &report.events {
            let _ = writeln!(
                out,
                "| {} | {} | {} | {} | `{}` | {} |",
                timestamp(&event.timestamp),
                event.operation,
                event.scope,
                event.change,
                event.file.display(),
                event.error.as_deref().unwrap_or("-")
            );
        }
    }
    out.push('\n');

    let _ = writeln!(out, "## Counts by operation");
    out.push('\n');
    if report.by_operation.is_empty() {
        let _ = writeln!(out, "(none)");
    }
    for (operation, count) in &report.by_operation {
        let _ = writeln!(out, "- `{operation}`: {count}");
    }
    out.push('\n');

    let _ = writeln!(out, "## Counts by scope");
    out.push('\n');
    if report.by_scope.is_empty() {
        let _ = writeln!(out, "(none)");
    }
    for (scope, count) in &report.by_scope {
        let _ = writeln!(out, "- `{scope}`: {count}");
    }

    out
}
