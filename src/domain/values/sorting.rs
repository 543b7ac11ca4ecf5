//! Sort and filter specifications for the opportunity table views.
//!
//! A [`SortSpec`] holds the single user-chosen column plus direction; the
//! default ranking of the Top Opportunities view lives in the ranking
//! pipeline and does not use these. A [`FilterSpec`] field set to `None`
//! is the "ALL" sentinel: that predicate is a no-op.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::values::band::Band;
use crate::domain::values::risk_status::RiskStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    Symbol,
    Band,
    Risk,
    Strategy,
    Score,
    CapitalRequired,
    CapitalPct,
    Rank,
}

impl SortField {
    /// Direction applied on the first click of a column. Score is the only
    /// column where "best first" means descending.
    pub fn default_direction(&self) -> SortDirection {
        match self {
            SortField::Score => SortDirection::Descending,
            _ => SortDirection::Ascending,
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SortField::Symbol => "symbol",
            SortField::Band => "band",
            SortField::Risk => "risk",
            SortField::Strategy => "strategy",
            SortField::Score => "score",
            SortField::CapitalRequired => "capital_required",
            SortField::CapitalPct => "capital_pct",
            SortField::Rank => "rank",
        };
        write!(f, "{s}")
    }
}

impl FromStr for SortField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "symbol" => Ok(SortField::Symbol),
            "band" => Ok(SortField::Band),
            "risk" => Ok(SortField::Risk),
            "strategy" => Ok(SortField::Strategy),
            "score" => Ok(SortField::Score),
            "capital_required" | "capital" => Ok(SortField::CapitalRequired),
            "capital_pct" | "cap_pct" => Ok(SortField::CapitalPct),
            "rank" => Ok(SortField::Rank),
            _ => Err(format!("Unknown sort field: {s}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn flipped(&self) -> SortDirection {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

/// The active sort of a sortable-table view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    pub field: SortField,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn new(field: SortField) -> Self {
        Self {
            field,
            direction: field.default_direction(),
        }
    }

    /// Click behavior of a sortable column header: clicking the active
    /// column flips direction, clicking another column switches to it with
    /// that column's default direction.
    pub fn toggle(&self, field: SortField) -> SortSpec {
        if self.field == field {
            SortSpec {
                field,
                direction: self.direction.flipped(),
            }
        } else {
            SortSpec::new(field)
        }
    }
}

impl Default for SortSpec {
    /// Fresh tables follow the backend's rank order; any column click
    /// switches away from it with that column's default direction.
    fn default() -> Self {
        SortSpec::new(SortField::Rank)
    }
}

/// Risk-status filter value. `Unknown` is a real bucket matching rows
/// whose risk status is absent; "ALL" is expressed as `None` at the
/// [`FilterSpec`] level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskFilter {
    Ok,
    Warn,
    Blocked,
    Unknown,
}

impl RiskFilter {
    pub fn matches(&self, status: Option<RiskStatus>) -> bool {
        match self {
            RiskFilter::Ok => status == Some(RiskStatus::Ok),
            RiskFilter::Warn => status == Some(RiskStatus::Warn),
            RiskFilter::Blocked => status == Some(RiskStatus::Blocked),
            RiskFilter::Unknown => status.is_none(),
        }
    }
}

impl FromStr for RiskFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "OK" => Ok(RiskFilter::Ok),
            "WARN" => Ok(RiskFilter::Warn),
            "BLOCKED" => Ok(RiskFilter::Blocked),
            "UNKNOWN" => Ok(RiskFilter::Unknown),
            _ => Err(format!("Unknown risk filter: {s}")),
        }
    }
}

/// Conjunction of independent row predicates. Every `None` is the ALL
/// sentinel and filters nothing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterSpec {
    pub band: Option<Band>,
    pub strategy: Option<String>,
    pub risk: Option<RiskFilter>,
    /// Capital ceiling in percent (10 means 10%). Rows with unknown
    /// `capital_pct` are never excluded by the ceiling.
    pub max_capital_pct: Option<f64>,
}
