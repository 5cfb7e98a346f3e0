use serde::{Deserialize, Serialize};

/// One append-only metric event emitted by an agent
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Metric {
    pub id: i64,
    pub agent_id: i64,
    pub metric_name: String,
    pub value: f64,
    pub timestamp: String,
}
