use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Coarse confidence grade assigned by the backend to an opportunity.
/// A is best, C is worst.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Band {
    A,
    B,
    C,
}

impl Band {
    /// Ranking priority: lower sorts first. Rows with no band rank after
    /// every graded row (see `band_priority` in the ranking pipeline).
    pub fn priority(&self) -> u8 {
        match self {
            Band::A => 0,
            Band::B => 1,
            Band::C => 2,
        }
    }

    /// Lenient parse for upstream payloads. Anything that is not exactly
    /// one of the three grades (after trimming and case-folding) is `None`.
    pub fn parse_loose(s: &str) -> Option<Band> {
        match s.trim().to_ascii_uppercase().as_str() {
            "A" => Some(Band::A),
            "B" => Some(Band::B),
            "C" => Some(Band::C),
            _ => None,
        }
    }
}

impl fmt::Display for Band {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Band::A => write!(f, "A"),
            Band::B => write!(f, "B"),
            Band::C => write!(f, "C"),
        }
    }
}

impl FromStr for Band {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Band::parse_loose(s).ok_or_else(|| format!("Unknown band: {s}"))
    }
}
