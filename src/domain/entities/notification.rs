use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::values::severity::Severity;

/// Where a notification came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationSource {
    Alert,
    System,
    Evaluation,
}

/// A uniform notification record.
///
/// The `id` is stable and derived from the source data, so re-ingesting the
/// same upstream snapshot produces identical ids and the ledger can
/// deduplicate. Records are never mutated; read state lives in a separate
/// set of read ids.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationItem {
    pub id: String,
    pub source: NotificationSource,
    pub severity: Severity,
    pub title: String,
    pub message: String,
    pub symbol: Option<String>,
    pub position_id: Option<String>,
    pub decision_ts: Option<DateTime<Utc>>,
    pub run_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub actionable: bool,
}

impl NotificationItem {
    /// Ad-hoc runtime event (failed fetch, sync result, …). The id is
    /// derived from title and timestamp; the ledger's dedup check handles
    /// same-millisecond collisions.
    pub fn system(title: impl Into<String>, message: impl Into<String>, severity: Severity) -> Self {
        let title = title.into();
        let now = Utc::now();
        Self {
            id: format!("system:{}:{}", title, now.timestamp_millis()),
            source: NotificationSource::System,
            severity,
            title,
            message: message.into(),
            symbol: None,
            position_id: None,
            decision_ts: None,
            run_id: None,
            created_at: now,
            actionable: false,
        }
    }
}

/// A display bucket of notifications ("Today", "This week", "Older").
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationGroup {
    pub label: String,
    pub items: Vec<NotificationItem>,
}
