pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;

use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;

use crate::application::notifications::{
    from_alerts, from_validation_warnings, group_by_time, NotificationLedger,
};
use crate::application::preferences::{self, TablePreferences};
use crate::application::ranking::{OpportunitiesUseCase, RankedView};
use crate::application::reconcile::{ReconcileScan, ReconcileUseCase};
use crate::domain::entities::notification::{NotificationGroup, NotificationItem};
use crate::domain::error::DomainError;
use crate::domain::ports::kv_store::KeyValueStore;
use crate::domain::values::severity::Severity;
use crate::domain::values::sorting::{FilterSpec, SortField};
use crate::infrastructure::feeds::http::HttpFeed;
use crate::infrastructure::feeds::SnapshotFeed;
use crate::infrastructure::storage::sqlite_store::SqliteKvStore;

/// Result of pulling the alert and validation-warning feeds into the
/// notification ledger.
#[derive(Debug, Serialize)]
pub struct SyncReport {
    pub synced_at: chrono::DateTime<Utc>,
    pub alerts_added: usize,
    pub warnings_added: usize,
    pub errors: Vec<String>,
}

pub struct SignalDesk {
    reconcile_uc: ReconcileUseCase,
    opportunities_uc: OpportunitiesUseCase,
    ledger: NotificationLedger,
    store: Arc<dyn KeyValueStore>,
    feed: Arc<dyn SnapshotFeed>,
}

impl SignalDesk {
    pub fn new(db_path: &str) -> Result<Self, DomainError> {
        let api_base = std::env::var("SIGNALDESK_API_BASE")
            .unwrap_or_else(|_| "http://localhost:8000".into());

        let store: Arc<dyn KeyValueStore> = Arc::new(SqliteKvStore::open(db_path)?);
        let feed: Arc<dyn SnapshotFeed> = Arc::new(HttpFeed::new(api_base));
        Ok(Self::with_providers(store, feed))
    }

    pub fn with_providers(store: Arc<dyn KeyValueStore>, feed: Arc<dyn SnapshotFeed>) -> Self {
        Self {
            reconcile_uc: ReconcileUseCase::new(feed.clone()),
            opportunities_uc: OpportunitiesUseCase::new(feed.clone(), store.clone()),
            ledger: NotificationLedger::new(store.clone()),
            store,
            feed,
        }
    }

    // Delegating methods
    pub async fn rows(&self) -> Result<ReconcileScan, DomainError> {
        self.reconcile_uc.execute().await
    }

    pub async fn top_opportunities(&self, limit: Option<usize>) -> Result<RankedView, DomainError> {
        self.opportunities_uc.top(limit).await
    }

    pub async fn opportunities_table(
        &self,
        view: &str,
        filters: Option<FilterSpec>,
        sort_field: Option<SortField>,
    ) -> Result<RankedView, DomainError> {
        self.opportunities_uc.table(view, filters, sort_field).await
    }

    /// Pull alerts and the latest run's validation warnings into the
    /// ledger. Feed failures become system notifications instead of
    /// aborting the sync.
    pub async fn sync_notifications(&self) -> SyncReport {
        let mut report = SyncReport {
            synced_at: Utc::now(),
            alerts_added: 0,
            warnings_added: 0,
            errors: Vec::new(),
        };

        match self.feed.alerts().await {
            Ok(snapshot) => {
                report.alerts_added = self.ledger.extend(from_alerts(&snapshot));
            }
            Err(e) => {
                self.ledger
                    .notify_system("Alerts fetch failed", e.to_string(), Severity::Error);
                report.errors.push(e.to_string());
            }
        }

        match self.feed.decision_run().await {
            Ok(Some(run)) => {
                let evaluated_at = run.pipeline_timestamp.unwrap_or_else(Utc::now);
                report.warnings_added = self
                    .ledger
                    .extend(from_validation_warnings(&run.warnings, evaluated_at));
            }
            Ok(None) => {}
            Err(e) => {
                self.ledger
                    .notify_system("Decision fetch failed", e.to_string(), Severity::Error);
                report.errors.push(e.to_string());
            }
        }

        report
    }

    /// Grouped notification view; unread only unless `include_read`.
    pub fn notifications(&self, include_read: bool) -> Vec<NotificationGroup> {
        let items = if include_read {
            self.ledger.pending()
        } else {
            self.ledger.unread()
        };
        group_by_time(items)
    }

    pub fn pending_notifications(&self) -> Vec<NotificationItem> {
        self.ledger.pending()
    }

    pub fn notify_system(
        &self,
        title: impl Into<String>,
        message: impl Into<String>,
        severity: Severity,
    ) -> NotificationItem {
        self.ledger.notify_system(title, message, severity)
    }

    pub fn mark_read(&self, id: &str) {
        self.ledger.mark_read(id);
    }

    /// Mark every currently-pending notification read. Returns how many ids
    /// went into the read set.
    pub fn mark_all_read(&self) -> usize {
        let ids: Vec<String> = self.ledger.pending().into_iter().map(|i| i.id).collect();
        let count = ids.len();
        self.ledger.mark_all_read(&ids);
        count
    }

    pub fn ledger(&self) -> &NotificationLedger {
        &self.ledger
    }

    pub fn preferences(&self, view: &str) -> TablePreferences {
        preferences::load(self.store.as_ref(), view)
    }

    pub fn reset_preferences(&self, view: &str) {
        preferences::reset(self.store.as_ref(), view);
    }
}
