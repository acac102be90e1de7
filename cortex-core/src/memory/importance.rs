use serde::{Deserialize, Serialize};

/// Ordinal importance, 1..5, with a derived numeric weight used in scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Importance {
    Minimal = 1,
    Low = 2,
    Medium = 3,
    High = 4,
    Critical = 5,
}

impl Importance {
    /// Numeric score in [0.0, 1.0], used by §4.3.1's `w_imp * (importance/5)` term.
    pub fn score(self) -> f64 {
        (self as u8 as f64) / 5.0
    }

    /// 1-based ordinal, as spec.md §3 describes it ("ordinal 1..5").
    pub fn ordinal(self) -> u8 {
        self as u8
    }

    pub fn from_ordinal(value: u8) -> Option<Self> {
        match value {
            1 => Some(Importance::Minimal),
            2 => Some(Importance::Low),
            3 => Some(Importance::Medium),
            4 => Some(Importance::High),
            5 => Some(Importance::Critical),
            _ => None,
        }
    }
}

impl Default for Importance {
    fn default() -> Self {
        Importance::Medium
    }
}
