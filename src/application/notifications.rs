//! Notification ledger — turns alerts, validation warnings, and runtime
//! events into one deduplicated, persisted stream.
//!
//! Producer ids are derived from the source data, never random: re-fetching
//! the same alerts snapshot reproduces the same ids, and a validation
//! warning keeps one id per calendar day no matter how often the pipeline
//! re-emits it intraday. Dedup then falls out of a plain id comparison.
//!
//! The ledger is the only stateful piece of the crate. Every storage access
//! is absorbed: a disabled or failing backend means empty reads and no-op
//! writes, never a crash.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::{DateTime, Duration, Local, TimeZone, Utc};
use log::warn;

use crate::domain::entities::notification::{
    NotificationGroup, NotificationItem, NotificationSource,
};
use crate::domain::entities::snapshots::{AlertsSnapshot, ValidationWarning};
use crate::domain::ports::kv_store::KeyValueStore;
use crate::domain::values::severity::Severity;

/// Pending queue cap; oldest entries are evicted first on overflow.
pub const MAX_PENDING: usize = 50;

const PENDING_KEY: &str = "notifications:pending";
const READ_KEY: &str = "notifications:read";

/// One notification per alert item. Stateless; ids repeat exactly on a
/// re-fetch of the same snapshot.
pub fn from_alerts(snapshot: &AlertsSnapshot) -> Vec<NotificationItem> {
    let created_at = snapshot.as_of.unwrap_or_else(Utc::now);
    let as_of_part = snapshot
        .as_of
        .map(|t| t.timestamp().to_string())
        .unwrap_or_default();

    snapshot
        .items
        .iter()
        .enumerate()
        .map(|(index, item)| NotificationItem {
            id: format!(
                "alert:{}:{}:{}:{}",
                as_of_part,
                index,
                item.code,
                item.symbol.as_deref().unwrap_or("")
            ),
            source: NotificationSource::Alert,
            severity: item.severity.unwrap_or(Severity::Warning),
            title: item.title.clone(),
            message: item.message.clone(),
            symbol: item.symbol.clone(),
            position_id: item.position_id.clone(),
            decision_ts: None,
            run_id: None,
            created_at,
            actionable: item.symbol.is_some() || item.position_id.is_some(),
        })
        .collect()
}

/// One notification per validation warning. The id uses only the calendar
/// day of `evaluated_at`, so the same warning recurring across intraday
/// runs collides onto one id instead of spamming the queue.
pub fn from_validation_warnings(
    warnings: &[ValidationWarning],
    evaluated_at: DateTime<Utc>,
) -> Vec<NotificationItem> {
    let day = evaluated_at.format("%Y-%m-%d").to_string();

    warnings
        .iter()
        .map(|w| NotificationItem {
            id: format!(
                "eval:{}:{}:{}",
                w.code,
                day,
                w.affected_id.as_deref().unwrap_or("")
            ),
            source: NotificationSource::Evaluation,
            severity: w.severity.unwrap_or(Severity::Warning),
            title: w.code.clone(),
            message: w.message.clone(),
            symbol: w.affected_id.clone(),
            position_id: None,
            decision_ts: Some(evaluated_at),
            run_id: w.run_id.clone(),
            created_at: evaluated_at,
            actionable: false,
        })
        .collect()
}

/// Partition into "Today" / "This week" / "Older" using the local clock.
pub fn group_by_time(items: Vec<NotificationItem>) -> Vec<NotificationGroup> {
    group_by_time_at(items, Local::now())
}

/// Deterministic variant of [`group_by_time`]: "Today" starts at local
/// midnight of `now`, "This week" seven days before that. Empty buckets are
/// omitted.
pub fn group_by_time_at(
    items: Vec<NotificationItem>,
    now: DateTime<Local>,
) -> Vec<NotificationGroup> {
    let midnight_naive = now
        .date_naive()
        .and_hms_opt(0, 0, 0)
        .unwrap_or_else(|| now.naive_local());
    let midnight = now
        .timezone()
        .from_local_datetime(&midnight_naive)
        .earliest()
        .unwrap_or(now)
        .with_timezone(&Utc);
    let week_start = midnight - Duration::days(7);

    let mut today = Vec::new();
    let mut this_week = Vec::new();
    let mut older = Vec::new();

    for item in items {
        if item.created_at >= midnight {
            today.push(item);
        } else if item.created_at >= week_start {
            this_week.push(item);
        } else {
            older.push(item);
        }
    }

    [("Today", today), ("This week", this_week), ("Older", older)]
        .into_iter()
        .filter(|(_, items)| !items.is_empty())
        .map(|(label, items)| NotificationGroup {
            label: label.to_string(),
            items,
        })
        .collect()
}

pub struct NotificationLedger {
    store: Arc<dyn KeyValueStore>,
}

impl NotificationLedger {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// The persisted pending queue, oldest first. Empty when storage is
    /// unavailable.
    pub fn pending(&self) -> Vec<NotificationItem> {
        self.load_pending()
    }

    /// Pending items not yet marked read.
    pub fn unread(&self) -> Vec<NotificationItem> {
        let read = self.read_ids();
        self.load_pending()
            .into_iter()
            .filter(|item| !read.contains(&item.id))
            .collect()
    }

    /// Append one item unless a pending item already carries its id.
    /// Returns whether it was added.
    pub fn push(&self, item: NotificationItem) -> bool {
        self.extend(vec![item]) == 1
    }

    /// Append a batch, skipping ids already pending (or duplicated within
    /// the batch). Returns how many were added.
    pub fn extend(&self, items: Vec<NotificationItem>) -> usize {
        let mut pending = self.load_pending();
        let mut ids: HashSet<String> = pending.iter().map(|i| i.id.clone()).collect();

        let mut added = 0usize;
        for item in items {
            if ids.contains(&item.id) {
                continue;
            }
            ids.insert(item.id.clone());
            pending.push(item);
            added += 1;
        }

        if added > 0 {
            if pending.len() > MAX_PENDING {
                let excess = pending.len() - MAX_PENDING;
                pending.drain(..excess);
            }
            self.save_pending(&pending);
        }
        added
    }

    /// Build and enqueue an ad-hoc runtime notification.
    pub fn notify_system(
        &self,
        title: impl Into<String>,
        message: impl Into<String>,
        severity: Severity,
    ) -> NotificationItem {
        let item = NotificationItem::system(title, message, severity);
        self.push(item.clone());
        item
    }

    pub fn read_ids(&self) -> HashSet<String> {
        let raw = match self.store.get(READ_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return HashSet::new(),
            Err(e) => {
                warn!("read-state load failed: {e}");
                return HashSet::new();
            }
        };
        serde_json::from_str::<Vec<String>>(&raw)
            .map(|ids| ids.into_iter().collect())
            .unwrap_or_default()
    }

    pub fn is_read(&self, id: &str) -> bool {
        self.read_ids().contains(id)
    }

    /// Idempotent: marking an already-read id changes nothing.
    pub fn mark_read(&self, id: &str) {
        let mut read = self.read_ids();
        if read.insert(id.to_string()) {
            self.save_read(&read);
        }
    }

    /// Union the given ids into the read set.
    pub fn mark_all_read(&self, ids: &[String]) {
        let mut read = self.read_ids();
        let before = read.len();
        read.extend(ids.iter().cloned());
        if read.len() != before {
            self.save_read(&read);
        }
    }

    fn load_pending(&self) -> Vec<NotificationItem> {
        let raw = match self.store.get(PENDING_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                warn!("pending-queue load failed: {e}");
                return Vec::new();
            }
        };
        serde_json::from_str(&raw).unwrap_or_default()
    }

    fn save_pending(&self, items: &[NotificationItem]) {
        let encoded = match serde_json::to_string(items) {
            Ok(encoded) => encoded,
            Err(e) => {
                warn!("failed to encode pending queue: {e}");
                return;
            }
        };
        if let Err(e) = self.store.set(PENDING_KEY, &encoded) {
            warn!("failed to persist pending queue: {e}");
        }
    }

    fn save_read(&self, read: &HashSet<String>) {
        let mut ids: Vec<&String> = read.iter().collect();
        ids.sort();
        let encoded = match serde_json::to_string(&ids) {
            Ok(encoded) => encoded,
            Err(e) => {
                warn!("failed to encode read state: {e}");
                return;
            }
        };
        if let Err(e) = self.store.set(READ_KEY, &encoded) {
            warn!("failed to persist read state: {e}");
        }
    }
}
