pub mod fixture;
pub mod http;
pub mod payload;

use async_trait::async_trait;

use crate::domain::entities::opportunity::OpportunityRow;
use crate::domain::entities::snapshots::{AlertsSnapshot, DecisionRun, UniverseSnapshot};

/// Source of the four upstream dashboard documents.
///
/// Implementations fetch already-materialized snapshots; no streaming, no
/// retry policy. The HTTP implementation talks to the evaluation service,
/// the fixture implementation serves canned documents for tests.
#[async_trait]
pub trait SnapshotFeed: Send + Sync {
    /// Human-readable name of this feed.
    fn name(&self) -> &str;

    async fn universe(&self) -> Result<UniverseSnapshot, FeedError>;

    /// The latest decision run, or `None` when no run exists yet.
    async fn decision_run(&self) -> Result<Option<DecisionRun>, FeedError>;

    async fn opportunities(&self) -> Result<Vec<OpportunityRow>, FeedError>;

    async fn alerts(&self) -> Result<AlertsSnapshot, FeedError>;
}

#[derive(Debug)]
pub enum FeedError {
    /// HTTP or network error
    Network(String),
    /// Response parsing error
    Parse(String),
    /// Configuration error (missing base URL, etc.)
    Config(String),
}

impl std::fmt::Display for FeedError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FeedError::Network(msg) => write!(f, "Network error: {msg}"),
            FeedError::Parse(msg) => write!(f, "Parse error: {msg}"),
            FeedError::Config(msg) => write!(f, "Config error: {msg}"),
        }
    }
}

impl std::error::Error for FeedError {}
