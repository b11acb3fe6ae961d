//! Documents returned by the service and rendered by `cbk` commands.

use std::collections::BTreeMap;

use chrono::{DateTime, SecondsFormat, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::AuditEntry;

/// The downloadable audit log: `{ "exportedAt": ..., "entries": [...] }`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AuditExport {
    /// ISO-8601 with millisecond precision, e.g. `2026-03-01T09:00:00.000Z`.
    pub exported_at: String,
    pub entries: Vec<AuditEntry>,
}

impl AuditExport {
    #[must_use]
    pub fn new(exported_at: DateTime<Utc>, entries: Vec<AuditEntry>) -> Self {
        Self {
            exported_at: exported_at.to_rfc3339_opts(SecondsFormat::Millis, true),
            entries,
        }
    }

    /// Pretty-printed JSON with 2-space indentation.
    ///
    /// # Errors
    ///
    /// Returns `serde_json::Error` if an entry's details cannot be serialized.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// File name for an export taken at `at`: `audit-log-<unix millis>.json`.
    #[must_use]
    pub fn file_name(at: DateTime<Utc>) -> String {
        format!("audit-log-{}.json", at.timestamp_millis())
    }
}

/// Counts for the dashboard summary cards.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CaseStats {
    pub total: u32,
    /// Keyed by kind, then status. Only non-zero counts appear.
    pub by_kind: BTreeMap<String, BTreeMap<String, u32>>,
    /// Cases in a non-terminal status.
    pub open: u32,
    pub unassigned: u32,
}
