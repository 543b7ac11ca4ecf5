use async_trait::async_trait;

use super::{FeedError, SnapshotFeed};
use crate::domain::entities::opportunity::OpportunityRow;
use crate::domain::entities::snapshots::{AlertsSnapshot, DecisionRun, UniverseSnapshot};

/// Canned-document implementation of [`SnapshotFeed`] for tests and offline
/// runs.
#[derive(Default)]
pub struct FixtureFeed {
    universe: UniverseSnapshot,
    decision: Option<DecisionRun>,
    opportunities: Vec<OpportunityRow>,
    alerts: AlertsSnapshot,
}

impl FixtureFeed {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_universe(mut self, universe: UniverseSnapshot) -> Self {
        self.universe = universe;
        self
    }

    pub fn with_decision(mut self, decision: DecisionRun) -> Self {
        self.decision = Some(decision);
        self
    }

    pub fn with_opportunities(mut self, rows: Vec<OpportunityRow>) -> Self {
        self.opportunities = rows;
        self
    }

    pub fn with_alerts(mut self, alerts: AlertsSnapshot) -> Self {
        self.alerts = alerts;
        self
    }
}

#[async_trait]
impl SnapshotFeed for FixtureFeed {
    fn name(&self) -> &str {
        "fixture"
    }

    async fn universe(&self) -> Result<UniverseSnapshot, FeedError> {
        Ok(self.universe.clone())
    }

    async fn decision_run(&self) -> Result<Option<DecisionRun>, FeedError> {
        Ok(self.decision.clone())
    }

    async fn opportunities(&self) -> Result<Vec<OpportunityRow>, FeedError> {
        Ok(self.opportunities.clone())
    }

    async fn alerts(&self) -> Result<AlertsSnapshot, FeedError> {
        Ok(self.alerts.clone())
    }
}
