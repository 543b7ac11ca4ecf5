//! Row reconciler — merges a universe snapshot with a decision-run snapshot
//! into one canonical row per symbol.
//!
//! Pure transforms: no I/O, no failure modes. Missing or malformed optional
//! data degrades to `None` or the explicit fallback sentinels, never to an
//! error. The [`ReconcileUseCase`] wrapper fetches the two snapshots and
//! picks the merge path.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;

use crate::domain::entities::merged_row::MergedRow;
use crate::domain::entities::snapshots::{DecisionCandidate, DecisionRun, UniverseSymbol};
use crate::domain::error::DomainError;
use crate::infrastructure::feeds::SnapshotFeed;

/// Result of reconciling the two snapshots.
#[derive(Debug, Serialize)]
pub struct ReconcileScan {
    pub fetched_at: chrono::DateTime<Utc>,
    pub evaluated_at: Option<chrono::DateTime<Utc>>,
    pub total_rows: usize,
    pub evaluated_rows: usize,
    pub fallback_rows: usize,
    pub rows: Vec<MergedRow>,
}

/// Case-insensitive lookup key. Providers disagree on symbol casing, so
/// every comparison goes through this.
fn symbol_key(symbol: &str) -> String {
    symbol.trim().to_uppercase()
}

/// Candidate lookup across both decision lists. Populated from `candidates`
/// first, then overlaid by `selected_signals`; the pipeline's final choice
/// wins when a symbol appears in both.
fn candidate_index(decision: &DecisionRun) -> HashMap<String, &DecisionCandidate> {
    let mut index = HashMap::new();
    for candidate in &decision.candidates {
        index.insert(symbol_key(&candidate.symbol), candidate);
    }
    for signal in &decision.selected_signals {
        index.insert(symbol_key(&signal.symbol), signal);
    }
    index
}

/// Merge the universe with a decision run into canonical rows.
///
/// Every universe symbol yields exactly one row: a merged row when the run
/// covered it, the `NOT_EVALUATED` fallback otherwise. Symbols the run
/// evaluated that are missing from the universe are appended afterwards, so
/// the output covers the union of both snapshots.
pub fn merge(universe: &[UniverseSymbol], decision: Option<&DecisionRun>) -> Vec<MergedRow> {
    let empty = DecisionRun::default();
    let decision = decision.unwrap_or(&empty);
    let index = candidate_index(decision);

    let mut rows = Vec::with_capacity(universe.len());
    let mut consumed: HashSet<String> = HashSet::new();

    for entry in universe {
        let key = symbol_key(&entry.symbol);
        if !consumed.insert(key.clone()) {
            continue;
        }

        match index.get(&key) {
            Some(candidate) => rows.push(MergedRow::from_candidate(
                entry.symbol.trim(),
                candidate,
                Some(entry),
                decision.pipeline_timestamp,
            )),
            None => rows.push(MergedRow::fallback(entry.symbol.trim())),
        }
    }

    // Decision-only symbols, in candidate order.
    for candidate in decision.candidates.iter().chain(&decision.selected_signals) {
        let key = symbol_key(&candidate.symbol);
        if !consumed.insert(key.clone()) {
            continue;
        }
        if let Some(resolved) = index.get(&key) {
            rows.push(MergedRow::from_candidate(
                candidate.symbol.trim(),
                resolved,
                None,
                decision.pipeline_timestamp,
            ));
        }
    }

    rows
}

/// Build rows from a decision run alone, for the case where the universe
/// fetch came back empty. Deduplicates by symbol; `selected_signals`
/// override `candidates` (same precedence as [`merge`]), first occurrence
/// fixes the position.
pub fn build_from_decision_only(decision: &DecisionRun) -> Vec<MergedRow> {
    let index = candidate_index(decision);
    let mut seen: HashSet<String> = HashSet::new();
    let mut rows = Vec::new();

    for candidate in decision.candidates.iter().chain(&decision.selected_signals) {
        let key = symbol_key(&candidate.symbol);
        if key.is_empty() || !seen.insert(key.clone()) {
            continue;
        }
        if let Some(resolved) = index.get(&key) {
            rows.push(MergedRow::from_candidate(
                candidate.symbol.trim(),
                resolved,
                None,
                decision.pipeline_timestamp,
            ));
        }
    }

    rows
}

pub struct ReconcileUseCase {
    feed: Arc<dyn SnapshotFeed>,
}

impl ReconcileUseCase {
    pub fn new(feed: Arc<dyn SnapshotFeed>) -> Self {
        Self { feed }
    }

    /// Fetch both snapshots and reconcile them.
    pub async fn execute(&self) -> Result<ReconcileScan, DomainError> {
        let universe = self
            .feed
            .universe()
            .await
            .map_err(|e| DomainError::Feed(e.to_string()))?;
        let decision = self
            .feed
            .decision_run()
            .await
            .map_err(|e| DomainError::Feed(e.to_string()))?;

        let rows = if universe.symbols.is_empty() {
            match &decision {
                Some(run) => build_from_decision_only(run),
                None => Vec::new(),
            }
        } else {
            merge(&universe.symbols, decision.as_ref())
        };

        let fallback_rows = rows.iter().filter(|r| r.is_fallback()).count();
        Ok(ReconcileScan {
            fetched_at: Utc::now(),
            evaluated_at: decision.as_ref().and_then(|d| d.pipeline_timestamp),
            total_rows: rows.len(),
            evaluated_rows: rows.len() - fallback_rows,
            fallback_rows,
            rows,
        })
    }
}
