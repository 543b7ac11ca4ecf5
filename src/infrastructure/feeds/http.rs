use async_trait::async_trait;
use reqwest::StatusCode;

use super::payload::{RawAlertsDoc, RawDecisionDoc, RawOpportunitiesDoc, RawUniverseDoc};
use super::{FeedError, SnapshotFeed};
use crate::domain::entities::opportunity::OpportunityRow;
use crate::domain::entities::snapshots::{AlertsSnapshot, DecisionRun, UniverseSnapshot};

/// HTTP implementation of [`SnapshotFeed`] against the evaluation service's
/// REST API.
pub struct HttpFeed {
    base_url: String,
    client: reqwest::Client,
}

impl HttpFeed {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::builder()
                .user_agent("signaldesk/0.1")
                .build()
                .unwrap_or_default(),
        }
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T, FeedError> {
        let url = format!("{}{}", self.base_url, path);
        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| FeedError::Network(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(FeedError::Network(format!(
                "API returned {} for {path}",
                resp.status()
            )));
        }

        resp.json().await.map_err(|e| FeedError::Parse(e.to_string()))
    }
}

#[async_trait]
impl SnapshotFeed for HttpFeed {
    fn name(&self) -> &str {
        "dashboard_api"
    }

    async fn universe(&self) -> Result<UniverseSnapshot, FeedError> {
        let doc: RawUniverseDoc = self.get_json("/api/universe").await?;
        Ok(doc.into_snapshot())
    }

    async fn decision_run(&self) -> Result<Option<DecisionRun>, FeedError> {
        // No run yet is a normal state, not an error.
        let url = format!("{}/api/decisions/latest", self.base_url);
        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| FeedError::Network(e.to_string()))?;

        if resp.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !resp.status().is_success() {
            return Err(FeedError::Network(format!(
                "API returned {} for /api/decisions/latest",
                resp.status()
            )));
        }

        let doc: RawDecisionDoc = resp
            .json()
            .await
            .map_err(|e| FeedError::Parse(e.to_string()))?;
        Ok(Some(doc.into_run()))
    }

    async fn opportunities(&self) -> Result<Vec<OpportunityRow>, FeedError> {
        let doc: RawOpportunitiesDoc = self.get_json("/api/opportunities").await?;
        Ok(doc.into_rows())
    }

    async fn alerts(&self) -> Result<AlertsSnapshot, FeedError> {
        let doc: RawAlertsDoc = self.get_json("/api/alerts").await?;
        Ok(doc.into_snapshot())
    }
}
