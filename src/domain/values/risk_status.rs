use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Position-level risk classification for an opportunity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskStatus {
    Ok,
    Warn,
    Blocked,
}

impl RiskStatus {
    /// Ranking priority: OK sorts first, unknown (absent) worst of all.
    pub fn priority(&self) -> u8 {
        match self {
            RiskStatus::Ok => 0,
            RiskStatus::Warn => 1,
            RiskStatus::Blocked => 2,
        }
    }

    /// Lenient parse for upstream payloads. Values outside OK/WARN/BLOCKED
    /// coalesce to `None` so they land in the "unknown" bucket downstream.
    pub fn parse_loose(s: &str) -> Option<RiskStatus> {
        match s.trim().to_ascii_uppercase().as_str() {
            "OK" => Some(RiskStatus::Ok),
            "WARN" => Some(RiskStatus::Warn),
            "BLOCKED" => Some(RiskStatus::Blocked),
            _ => None,
        }
    }
}

impl fmt::Display for RiskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RiskStatus::Ok => write!(f, "OK"),
            RiskStatus::Warn => write!(f, "WARN"),
            RiskStatus::Blocked => write!(f, "BLOCKED"),
        }
    }
}

impl FromStr for RiskStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RiskStatus::parse_loose(s).ok_or_else(|| format!("Unknown risk status: {s}"))
    }
}
