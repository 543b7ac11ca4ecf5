use serde::{Deserialize, Serialize};
use std::fmt;

/// Pipeline stage outcome attached to every reconciled row.
///
/// A symbol the latest decision run never touched carries `NotRun` on every
/// stage field: the explicit fallback state, never a blank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StageStatus {
    NotRun,
    Run,
    Pass,
}

impl fmt::Display for StageStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StageStatus::NotRun => write!(f, "NOT_RUN"),
            StageStatus::Run => write!(f, "RUN"),
            StageStatus::Pass => write!(f, "PASS"),
        }
    }
}
