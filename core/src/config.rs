use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Which priority queue backs the diameter analyzer's Dijkstra runs.
///
/// Both produce the same diameter; they may pick different witness paths
/// when several shortest paths tie.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueueKind {
    /// Linear-scan queue, O(V) per operation.
    #[default]
    Unsorted,
    /// Binary heap with lazy deletion, O(log V) per operation.
    Heap,
}

impl FromStr for QueueKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "unsorted" | "scan" => Ok(QueueKind::Unsorted),
            "heap" | "binary_heap" => Ok(QueueKind::Heap),
            other => Err(format!(
                "invalid queue kind '{}': use 'unsorted' or 'heap'",
                other
            )),
        }
    }
}

impl fmt::Display for QueueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueueKind::Unsorted => f.write_str("unsorted"),
            QueueKind::Heap => f.write_str("heap"),
        }
    }
}

/// Tunables shared by all analyses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub queue: QueueKind,
}

impl AnalysisConfig {
    pub fn with_queue(queue: QueueKind) -> Self {
        Self { queue }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_queue_is_unsorted() {
        assert_eq!(AnalysisConfig::default().queue, QueueKind::Unsorted);
    }

    #[test]
    fn test_parse_queue_kind() {
        assert_eq!("heap".parse::<QueueKind>(), Ok(QueueKind::Heap));
        assert_eq!("UNSORTED".parse::<QueueKind>(), Ok(QueueKind::Unsorted));
        assert!("fibonacci".parse::<QueueKind>().is_err());
    }

    #[test]
    fn test_config_deserializes_with_defaults() {
        let cfg: AnalysisConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(cfg, AnalysisConfig::default());
        let cfg: AnalysisConfig = serde_json::from_str(r#"{"queue":"heap"}"#).unwrap();
        assert_eq!(cfg.queue, QueueKind::Heap);
    }

    #[test]
    fn test_display_round_trips() {
        for kind in [QueueKind::Unsorted, QueueKind::Heap] {
            assert_eq!(kind.to_string().parse::<QueueKind>(), Ok(kind));
        }
    }
}
