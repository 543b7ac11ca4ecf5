use serde::{Deserialize, Serialize};

use crate::domain::values::band::Band;
use crate::domain::values::risk_status::RiskStatus;

/// One pre-scored opportunity from the ranking endpoint.
///
/// Produced fresh on every fetch and never mutated in place; the ranking
/// pipeline returns derived copies. Scores come from the backend; this crate
/// only re-orders and filters them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpportunityRow {
    pub symbol: String,
    pub rank: Option<u32>,
    pub band: Option<Band>,
    pub risk_status: Option<RiskStatus>,
    pub strategy: Option<String>,
    pub score: Option<f64>,
    pub capital_required: Option<f64>,
    /// Fraction of available capital (0.07 = 7%), when the backend could
    /// compute it.
    pub capital_pct: Option<f64>,
    pub rank_reason: Option<String>,
    pub position_open: bool,
}

impl OpportunityRow {
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            rank: None,
            band: None,
            risk_status: None,
            strategy: None,
            score: None,
            capital_required: None,
            capital_pct: None,
            rank_reason: None,
            position_open: false,
        }
    }
}
