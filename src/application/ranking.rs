//! Ranking/filter pipeline for opportunity rows.
//!
//! The backend already scored and ranked everything; this only re-orders
//! and filters a fetched snapshot for display. Two orderings exist:
//!
//! - the fixed four-key default ranking of the Top Opportunities view
//!   (band, then risk, then capital ascending, then score descending), and
//! - a single user-chosen column for the sortable tables.
//!
//! Null handling differs deliberately between the two: the default ranking
//! treats unknown capital as worst-case (cannot confirm the capital need),
//! while user sorts treat null numerics as 0.

use std::cmp::Ordering;
use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;

use crate::application::preferences;
use crate::domain::entities::opportunity::OpportunityRow;
use crate::domain::error::DomainError;
use crate::domain::ports::kv_store::KeyValueStore;
use crate::domain::values::band::Band;
use crate::domain::values::risk_status::RiskStatus;
use crate::domain::values::sorting::{FilterSpec, SortDirection, SortField, SortSpec};
use crate::infrastructure::feeds::SnapshotFeed;

fn band_priority(band: Option<Band>) -> u8 {
    band.map(|b| b.priority()).unwrap_or(3)
}

fn risk_priority(risk: Option<RiskStatus>) -> u8 {
    risk.map(|r| r.priority()).unwrap_or(3)
}

/// Unknown capital ranks as the full bankroll, so such rows sort last
/// under the default ranking.
fn capital_rank_value(capital_pct: Option<f64>) -> f64 {
    capital_pct.unwrap_or(1.0)
}

fn matches_filters(row: &OpportunityRow, filters: &FilterSpec) -> bool {
    if let Some(band) = filters.band {
        if row.band != Some(band) {
            return false;
        }
    }
    if let Some(strategy) = &filters.strategy {
        if row.strategy.as_deref() != Some(strategy.as_str()) {
            return false;
        }
    }
    if let Some(risk) = filters.risk {
        if !risk.matches(row.risk_status) {
            return false;
        }
    }
    if let Some(cap) = filters.max_capital_pct {
        // Unknown capital is never excluded by the ceiling.
        if row.capital_pct.is_some_and(|pct| pct > cap / 100.0) {
            return false;
        }
    }
    true
}

/// Fixed multi-key comparison for the Top Opportunities view. Band always
/// dominates risk, risk dominates capital, score is the tie-break of last
/// resort; a final symbol compare makes the order total.
fn default_order(a: &OpportunityRow, b: &OpportunityRow) -> Ordering {
    band_priority(a.band)
        .cmp(&band_priority(b.band))
        .then_with(|| risk_priority(a.risk_status).cmp(&risk_priority(b.risk_status)))
        .then_with(|| {
            capital_rank_value(a.capital_pct)
                .partial_cmp(&capital_rank_value(b.capital_pct))
                .unwrap_or(Ordering::Equal)
        })
        .then_with(|| {
            b.score
                .unwrap_or(0.0)
                .partial_cmp(&a.score.unwrap_or(0.0))
                .unwrap_or(Ordering::Equal)
        })
        .then_with(|| a.symbol.cmp(&b.symbol))
}

/// Single-column comparison for the sortable tables. String keys compare
/// case-insensitively; numeric keys treat null as 0.
fn user_order(a: &OpportunityRow, b: &OpportunityRow, spec: &SortSpec) -> Ordering {
    let ordering = match spec.field {
        SortField::Symbol => a.symbol.to_lowercase().cmp(&b.symbol.to_lowercase()),
        SortField::Strategy => a
            .strategy
            .as_deref()
            .unwrap_or("")
            .to_lowercase()
            .cmp(&b.strategy.as_deref().unwrap_or("").to_lowercase()),
        SortField::Band => band_priority(a.band).cmp(&band_priority(b.band)),
        SortField::Risk => risk_priority(a.risk_status).cmp(&risk_priority(b.risk_status)),
        SortField::Score => a
            .score
            .unwrap_or(0.0)
            .partial_cmp(&b.score.unwrap_or(0.0))
            .unwrap_or(Ordering::Equal),
        SortField::CapitalRequired => a
            .capital_required
            .unwrap_or(0.0)
            .partial_cmp(&b.capital_required.unwrap_or(0.0))
            .unwrap_or(Ordering::Equal),
        SortField::CapitalPct => a
            .capital_pct
            .unwrap_or(0.0)
            .partial_cmp(&b.capital_pct.unwrap_or(0.0))
            .unwrap_or(Ordering::Equal),
        SortField::Rank => a.rank.unwrap_or(0).cmp(&b.rank.unwrap_or(0)),
    };
    match spec.direction {
        SortDirection::Ascending => ordering,
        SortDirection::Descending => ordering.reverse(),
    }
}

/// Filter then order rows by a user-chosen column. Returns derived copies;
/// the input snapshot is never mutated.
pub fn rank_and_filter(
    rows: &[OpportunityRow],
    filters: &FilterSpec,
    sort: &SortSpec,
) -> Vec<OpportunityRow> {
    let mut out: Vec<OpportunityRow> = rows
        .iter()
        .filter(|r| matches_filters(r, filters))
        .cloned()
        .collect();
    out.sort_by(|a, b| user_order(a, b, sort));
    out
}

/// Filter then apply the fixed default ranking.
pub fn default_rank(rows: &[OpportunityRow], filters: &FilterSpec) -> Vec<OpportunityRow> {
    let mut out: Vec<OpportunityRow> = rows
        .iter()
        .filter(|r| matches_filters(r, filters))
        .cloned()
        .collect();
    out.sort_by(default_order);
    out
}

/// An ordered, filtered view of the opportunities snapshot.
#[derive(Debug, Serialize)]
pub struct RankedView {
    pub ranked_at: chrono::DateTime<Utc>,
    pub view: String,
    pub total: usize,
    pub shown: usize,
    pub sort: Option<SortSpec>,
    pub filters: FilterSpec,
    pub rows: Vec<OpportunityRow>,
}

pub struct OpportunitiesUseCase {
    feed: Arc<dyn SnapshotFeed>,
    store: Arc<dyn KeyValueStore>,
}

impl OpportunitiesUseCase {
    pub fn new(feed: Arc<dyn SnapshotFeed>, store: Arc<dyn KeyValueStore>) -> Self {
        Self { feed, store }
    }

    /// Top Opportunities: default ranking, optional result cap, no
    /// persisted preferences.
    pub async fn top(&self, limit: Option<usize>) -> Result<RankedView, DomainError> {
        let rows = self
            .feed
            .opportunities()
            .await
            .map_err(|e| DomainError::Feed(e.to_string()))?;
        let total = rows.len();

        let mut ranked = default_rank(&rows, &FilterSpec::default());
        if let Some(max) = limit {
            ranked.truncate(max);
        }

        Ok(RankedView {
            ranked_at: Utc::now(),
            view: "top".to_string(),
            total,
            shown: ranked.len(),
            sort: None,
            filters: FilterSpec::default(),
            rows: ranked,
        })
    }

    /// A sortable-table view. Passing `filters` replaces the persisted
    /// filters; passing `sort_field` applies column-header click semantics
    /// (same column toggles direction). Both changes persist per view key.
    pub async fn table(
        &self,
        view: &str,
        filters: Option<FilterSpec>,
        sort_field: Option<SortField>,
    ) -> Result<RankedView, DomainError> {
        let rows = self
            .feed
            .opportunities()
            .await
            .map_err(|e| DomainError::Feed(e.to_string()))?;
        let total = rows.len();

        let mut prefs = preferences::load(self.store.as_ref(), view);
        if let Some(f) = filters {
            prefs.filters = f;
        }
        if let Some(field) = sort_field {
            prefs.sort = prefs.sort.toggle(field);
        }
        preferences::save(self.store.as_ref(), view, &prefs);

        let ranked = rank_and_filter(&rows, &prefs.filters, &prefs.sort);

        Ok(RankedView {
            ranked_at: Utc::now(),
            view: view.to_string(),
            total,
            shown: ranked.len(),
            sort: Some(prefs.sort),
            filters: prefs.filters,
            rows: ranked,
        })
    }
}
