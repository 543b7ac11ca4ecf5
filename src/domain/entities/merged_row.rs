//! The canonical per-symbol row: universe entry reconciled with the latest
//! decision run.
//!
//! Every field is always populated. A symbol the run never covered gets the
//! explicit `NOT_EVALUATED`/`NOT_RUN` sentinels instead of blanks, so view
//! code never has to guess what an absent value means.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entities::snapshots::{DecisionCandidate, UniverseSymbol};
use crate::domain::values::band::Band;
use crate::domain::values::stage_status::StageStatus;

/// Verdict sentinel for symbols not covered by the decision run.
pub const NOT_EVALUATED: &str = "NOT_EVALUATED";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MergedRow {
    /// Uniqueness key. Matching against inputs is case-insensitive since
    /// providers are case-inconsistent; display keeps the universe casing.
    pub symbol: String,
    pub verdict: String,
    pub final_verdict: String,
    pub score: Option<f64>,
    pub band: Option<Band>,
    pub primary_reason: Option<String>,
    pub price: Option<f64>,
    /// Normalized to the 10-character date prefix (`2026-04-18`).
    pub expiration: Option<String>,
    pub stage_status: StageStatus,
    pub stage1_status: StageStatus,
    pub stage2_status: StageStatus,
    pub provider_status: StageStatus,
    pub data_freshness: Option<DateTime<Utc>>,
    pub evaluated_at: Option<DateTime<Utc>>,
    pub has_candidates: bool,
    pub strategy: Option<String>,
}

impl MergedRow {
    /// Row for a universe symbol the decision run did not cover.
    pub fn fallback(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            verdict: NOT_EVALUATED.to_string(),
            final_verdict: NOT_EVALUATED.to_string(),
            score: None,
            band: None,
            primary_reason: None,
            price: None,
            expiration: None,
            stage_status: StageStatus::NotRun,
            stage1_status: StageStatus::NotRun,
            stage2_status: StageStatus::NotRun,
            provider_status: StageStatus::NotRun,
            data_freshness: None,
            evaluated_at: None,
            has_candidates: false,
            strategy: None,
        }
    }

    /// Row for a symbol the run evaluated. Contract data wins over the
    /// universe entry for price/expiration; candidate score/band/reason win
    /// over the universe's prior values.
    pub fn from_candidate(
        symbol: impl Into<String>,
        candidate: &DecisionCandidate,
        universe: Option<&UniverseSymbol>,
        pipeline_timestamp: Option<DateTime<Utc>>,
    ) -> Self {
        let contract = candidate.contract.as_ref();

        let price = contract
            .and_then(|c| c.strike)
            .or(universe.and_then(|u| u.last_price));
        let expiration = contract
            .and_then(|c| c.expiry.as_deref())
            .and_then(normalize_expiry);

        let stage2 = if contract.is_some_and(|c| c.is_concrete()) {
            StageStatus::Pass
        } else {
            StageStatus::Run
        };

        Self {
            symbol: symbol.into(),
            verdict: candidate.verdict.clone(),
            final_verdict: candidate.verdict.clone(),
            score: candidate.score.or(universe.and_then(|u| u.prior_score)),
            band: candidate.band.or(universe.and_then(|u| u.prior_band)),
            primary_reason: candidate.primary_reason.clone(),
            price,
            expiration,
            stage_status: StageStatus::Run,
            stage1_status: StageStatus::Pass,
            stage2_status: stage2,
            provider_status: StageStatus::Run,
            data_freshness: pipeline_timestamp,
            evaluated_at: pipeline_timestamp,
            has_candidates: true,
            strategy: contract.and_then(|c| c.strategy.clone()),
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.verdict == NOT_EVALUATED
    }
}

/// Keep the 10-character date portion of an expiry string; longer forms
/// (`2026-04-18T00:00:00Z`) are truncated, shorter ones dropped.
fn normalize_expiry(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.len() < 10 {
        return None;
    }
    Some(trimmed.chars().take(10).collect())
}
