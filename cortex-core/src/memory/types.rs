use serde::{Deserialize, Serialize};

/// The six memory kinds the system classifies content into.
///
/// Routing (see `cortex-hierarchy`) and decay half-lives both key off this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemoryType {
    Factual,
    Episodic,
    Semantic,
    Procedural,
    Preference,
    Contextual,
}

impl MemoryType {
    pub const ALL: [MemoryType; 6] = [
        MemoryType::Factual,
        MemoryType::Episodic,
        MemoryType::Semantic,
        MemoryType::Procedural,
        MemoryType::Preference,
        MemoryType::Contextual,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            MemoryType::Factual => "factual",
            MemoryType::Episodic => "episodic",
            MemoryType::Semantic => "semantic",
            MemoryType::Procedural => "procedural",
            MemoryType::Preference => "preference",
            MemoryType::Contextual => "contextual",
        }
    }
}

impl std::fmt::Display for MemoryType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_variants_round_trip_through_json() {
        for t in MemoryType::ALL {
            let json = serde_json::to_string(&t).unwrap();
            let back: MemoryType = serde_json::from_str(&json).unwrap();
            assert_eq!(t, back);
        }
    }
}
