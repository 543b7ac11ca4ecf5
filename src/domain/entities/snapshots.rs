//! Upstream snapshot types consumed by the reconciler and the ledger.
//!
//! These are the strict shapes produced once at the feed boundary; the
//! merge and notification logic never touches raw JSON. Each snapshot is
//! immutable per fetch.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::values::band::Band;
use crate::domain::values::severity::Severity;

/// One entry from the configured symbol universe.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UniverseSymbol {
    pub symbol: String,
    pub last_price: Option<f64>,
    /// Verdict carried over from the previous evaluation, if any.
    pub prior_verdict: Option<String>,
    pub prior_score: Option<f64>,
    pub prior_band: Option<Band>,
}

impl UniverseSymbol {
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            last_price: None,
            prior_verdict: None,
            prior_score: None,
            prior_band: None,
        }
    }
}

/// The universe document returned by the listing endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UniverseSnapshot {
    pub symbols: Vec<UniverseSymbol>,
}

/// Candidate contract attached to a decision, when the pipeline got far
/// enough to propose one.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContractIdea {
    pub strategy: Option<String>,
    pub expiry: Option<String>,
    pub strike: Option<f64>,
    pub delta: Option<f64>,
    pub credit_estimate: Option<f64>,
    pub rationale: Option<String>,
}

impl ContractIdea {
    /// A contract counts as concrete once it names a strategy or an expiry.
    pub fn is_concrete(&self) -> bool {
        self.strategy.as_deref().is_some_and(|s| !s.is_empty())
            || self.expiry.as_deref().is_some_and(|e| !e.is_empty())
    }
}

/// One per-symbol entry from a decision run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionCandidate {
    pub symbol: String,
    pub verdict: String,
    pub score: Option<f64>,
    pub band: Option<Band>,
    pub primary_reason: Option<String>,
    pub contract: Option<ContractIdea>,
}

impl DecisionCandidate {
    pub fn new(symbol: impl Into<String>, verdict: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            verdict: verdict.into(),
            score: None,
            band: None,
            primary_reason: None,
            contract: None,
        }
    }
}

/// One execution of the backend evaluation pipeline.
///
/// `candidates` is everything the run considered; `selected_signals` is the
/// subset the pipeline finally chose. The reconciler consults both.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DecisionRun {
    pub pipeline_timestamp: Option<DateTime<Utc>>,
    pub candidates: Vec<DecisionCandidate>,
    pub selected_signals: Vec<DecisionCandidate>,
    /// Validator warnings emitted alongside the run.
    #[serde(default)]
    pub warnings: Vec<ValidationWarning>,
}

impl DecisionRun {
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty() && self.selected_signals.is_empty()
    }
}

/// One item from the alerts endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertItem {
    pub code: String,
    pub title: String,
    pub message: String,
    pub severity: Option<Severity>,
    pub symbol: Option<String>,
    pub position_id: Option<String>,
}

/// The alerts document: a point-in-time view of active alerts.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AlertsSnapshot {
    pub as_of: Option<DateTime<Utc>>,
    pub items: Vec<AlertItem>,
}

/// A validation warning emitted alongside a decision run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationWarning {
    pub code: String,
    pub message: String,
    pub severity: Option<Severity>,
    /// Symbol (or other entity id) the warning is about.
    pub affected_id: Option<String>,
    pub run_id: Option<String>,
}
