//! Wire formats of the dashboard API, and their conversion into the strict
//! domain snapshot types.
//!
//! Upstream payloads are loosely typed and case-inconsistent; everything
//! optional absorbs absence via `#[serde(default)]`, and categorical strings
//! (band, risk, severity) coalesce to `None` when unrecognized. This is the
//! only place raw JSON shapes are visible; the merge/ranking logic works on
//! the parsed types exclusively.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::domain::entities::opportunity::OpportunityRow;
use crate::domain::entities::snapshots::{
    AlertItem, AlertsSnapshot, ContractIdea, DecisionCandidate, DecisionRun, UniverseSnapshot,
    UniverseSymbol, ValidationWarning,
};
use crate::domain::values::band::Band;
use crate::domain::values::risk_status::RiskStatus;
use crate::domain::values::severity::Severity;

fn parse_ts(raw: &Option<String>) -> Option<DateTime<Utc>> {
    raw.as_deref()
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|dt| dt.with_timezone(&Utc))
}

// ── Universe ─────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct RawUniverseDoc {
    #[serde(default)]
    pub symbols: Vec<RawUniverseSymbol>,
}

#[derive(Debug, Deserialize)]
pub struct RawUniverseSymbol {
    #[serde(default)]
    pub symbol: String,
    #[serde(default, alias = "price", alias = "lastPrice")]
    pub last_price: Option<f64>,
    #[serde(default, alias = "verdict")]
    pub prior_verdict: Option<String>,
    #[serde(default, alias = "score")]
    pub prior_score: Option<f64>,
    #[serde(default, alias = "band")]
    pub prior_band: Option<String>,
}

impl RawUniverseDoc {
    pub fn into_snapshot(self) -> UniverseSnapshot {
        let symbols = self
            .symbols
            .into_iter()
            .filter(|s| !s.symbol.trim().is_empty())
            .map(|s| UniverseSymbol {
                symbol: s.symbol.trim().to_string(),
                last_price: s.last_price,
                prior_verdict: s.prior_verdict,
                prior_score: s.prior_score,
                prior_band: s.prior_band.as_deref().and_then(Band::parse_loose),
            })
            .collect();
        UniverseSnapshot { symbols }
    }
}

// ── Decision run ─────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
pub struct RawDecisionDoc {
    #[serde(default)]
    pub candidates: Vec<RawCandidate>,
    #[serde(default)]
    pub selected_signals: Vec<RawCandidate>,
    #[serde(default)]
    pub warnings: Vec<RawWarning>,
    #[serde(default)]
    pub metadata: RawDecisionMeta,
}

#[derive(Debug, Default, Deserialize)]
pub struct RawDecisionMeta {
    #[serde(default)]
    pub pipeline_timestamp: Option<String>,
    #[serde(default)]
    pub run_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RawCandidate {
    #[serde(default)]
    pub symbol: String,
    #[serde(default)]
    pub verdict: Option<String>,
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default)]
    pub band: Option<String>,
    #[serde(default, alias = "reason")]
    pub primary_reason: Option<String>,
    #[serde(default, alias = "contract")]
    pub candidate: Option<RawContract>,
}

#[derive(Debug, Deserialize)]
pub struct RawContract {
    #[serde(default)]
    pub strategy: Option<String>,
    #[serde(default, alias = "expiration")]
    pub expiry: Option<String>,
    #[serde(default)]
    pub strike: Option<f64>,
    #[serde(default)]
    pub delta: Option<f64>,
    #[serde(default, alias = "credit")]
    pub credit_estimate: Option<f64>,
    #[serde(default)]
    pub rationale: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RawWarning {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub severity: Option<String>,
    #[serde(default, alias = "symbol")]
    pub affected_id: Option<String>,
    #[serde(default)]
    pub run_id: Option<String>,
}

impl RawCandidate {
    fn into_domain(self) -> DecisionCandidate {
        DecisionCandidate {
            symbol: self.symbol.trim().to_string(),
            verdict: self.verdict.unwrap_or_else(|| "UNKNOWN".to_string()),
            score: self.score,
            band: self.band.as_deref().and_then(Band::parse_loose),
            primary_reason: self.primary_reason,
            contract: self.candidate.map(|c| ContractIdea {
                strategy: c.strategy,
                expiry: c.expiry,
                strike: c.strike,
                delta: c.delta,
                credit_estimate: c.credit_estimate,
                rationale: c.rationale,
            }),
        }
    }
}

impl RawDecisionDoc {
    pub fn into_run(self) -> DecisionRun {
        let run_id = self.metadata.run_id.clone();
        DecisionRun {
            pipeline_timestamp: parse_ts(&self.metadata.pipeline_timestamp),
            candidates: self
                .candidates
                .into_iter()
                .filter(|c| !c.symbol.trim().is_empty())
                .map(RawCandidate::into_domain)
                .collect(),
            selected_signals: self
                .selected_signals
                .into_iter()
                .filter(|c| !c.symbol.trim().is_empty())
                .map(RawCandidate::into_domain)
                .collect(),
            warnings: self
                .warnings
                .into_iter()
                .map(|w| ValidationWarning {
                    code: w.code,
                    message: w.message,
                    severity: w.severity.as_deref().and_then(|s| s.parse().ok()),
                    affected_id: w.affected_id,
                    run_id: w.run_id.or_else(|| run_id.clone()),
                })
                .collect(),
        }
    }
}

// ── Opportunities ────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct RawOpportunitiesDoc {
    #[serde(default, alias = "opportunities")]
    pub rows: Vec<RawOpportunity>,
}

#[derive(Debug, Deserialize)]
pub struct RawOpportunity {
    #[serde(default)]
    pub symbol: String,
    #[serde(default)]
    pub rank: Option<u32>,
    #[serde(default)]
    pub band: Option<String>,
    #[serde(default, alias = "risk")]
    pub risk_status: Option<String>,
    #[serde(default)]
    pub strategy: Option<String>,
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default)]
    pub capital_required: Option<f64>,
    #[serde(default)]
    pub capital_pct: Option<f64>,
    #[serde(default)]
    pub rank_reason: Option<String>,
    #[serde(default)]
    pub position_open: bool,
}

impl RawOpportunitiesDoc {
    pub fn into_rows(self) -> Vec<OpportunityRow> {
        self.rows
            .into_iter()
            .filter(|r| !r.symbol.trim().is_empty())
            .map(|r| OpportunityRow {
                symbol: r.symbol.trim().to_string(),
                rank: r.rank,
                band: r.band.as_deref().and_then(Band::parse_loose),
                risk_status: r.risk_status.as_deref().and_then(RiskStatus::parse_loose),
                strategy: r.strategy,
                score: r.score,
                capital_required: r.capital_required,
                capital_pct: r.capital_pct,
                rank_reason: r.rank_reason,
                position_open: r.position_open,
            })
            .collect()
    }
}

// ── Alerts ───────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct RawAlertsDoc {
    #[serde(default)]
    pub as_of: Option<String>,
    #[serde(default, alias = "alerts")]
    pub items: Vec<RawAlert>,
}

#[derive(Debug, Deserialize)]
pub struct RawAlert {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub title: String,
    #[serde(default, alias = "detail")]
    pub message: String,
    #[serde(default)]
    pub severity: Option<String>,
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default)]
    pub position_id: Option<String>,
}

impl RawAlertsDoc {
    pub fn into_snapshot(self) -> AlertsSnapshot {
        AlertsSnapshot {
            as_of: parse_ts(&self.as_of),
            items: self
                .items
                .into_iter()
                .map(|a| AlertItem {
                    code: a.code,
                    title: a.title,
                    message: a.message,
                    severity: a
                        .severity
                        .as_deref()
                        .and_then(|s| s.parse::<Severity>().ok()),
                    symbol: a.symbol,
                    position_id: a.position_id,
                })
                .collect(),
        }
    }
}
