//! Shared test helpers.

use std::sync::Arc;

use signaldesk::domain::entities::opportunity::OpportunityRow;
use signaldesk::domain::entities::snapshots::{
    ContractIdea, DecisionCandidate, UniverseSnapshot, UniverseSymbol,
};
use signaldesk::domain::error::DomainError;
use signaldesk::domain::ports::kv_store::KeyValueStore;
use signaldesk::domain::values::band::Band;
use signaldesk::domain::values::risk_status::RiskStatus;
use signaldesk::infrastructure::feeds::fixture::FixtureFeed;
use signaldesk::infrastructure::storage::memory::MemoryStore;
use signaldesk::SignalDesk;

pub fn setup_with_feed(feed: FixtureFeed) -> SignalDesk {
    SignalDesk::with_providers(Arc::new(MemoryStore::new()), Arc::new(feed))
}

pub fn universe_of(symbols: &[&str]) -> UniverseSnapshot {
    UniverseSnapshot {
        symbols: symbols.iter().map(|s| UniverseSymbol::new(*s)).collect(),
    }
}

pub fn candidate(symbol: &str, verdict: &str) -> DecisionCandidate {
    DecisionCandidate::new(symbol, verdict)
}

pub fn candidate_with_contract(
    symbol: &str,
    verdict: &str,
    strategy: &str,
    expiry: &str,
) -> DecisionCandidate {
    let mut c = DecisionCandidate::new(symbol, verdict);
    c.contract = Some(ContractIdea {
        strategy: Some(strategy.to_string()),
        expiry: Some(expiry.to_string()),
        ..Default::default()
    });
    c
}

pub fn opportunity(
    symbol: &str,
    band: Option<Band>,
    risk: Option<RiskStatus>,
    capital_pct: Option<f64>,
    score: Option<f64>,
) -> OpportunityRow {
    let mut row = OpportunityRow::new(symbol);
    row.band = band;
    row.risk_status = risk;
    row.capital_pct = capital_pct;
    row.score = score;
    row
}

/// Store whose every operation fails, for degradation tests.
pub struct FailingStore;

impl KeyValueStore for FailingStore {
    fn get(&self, _key: &str) -> Result<Option<String>, DomainError> {
        Err(DomainError::Storage("storage disabled".into()))
    }

    fn set(&self, _key: &str, _value: &str) -> Result<(), DomainError> {
        Err(DomainError::Storage("storage disabled".into()))
    }

    fn remove(&self, _key: &str) -> Result<(), DomainError> {
        Err(DomainError::Storage("storage disabled".into()))
    }
}
