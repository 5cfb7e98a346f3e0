use serde::{Deserialize, Serialize};
use strum::{EnumIter, EnumString, IntoStaticStr};

/// The fixed agent categories. One agent row exists per kind.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter, EnumString, IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum AgentKind {
    Sales,
    Support,
    Operations,
}

impl AgentKind {
    /// Every kind seeded at startup, in seeding order
    pub const ALL: [AgentKind; 3] = [AgentKind::Sales, AgentKind::Support, AgentKind::Operations];

    pub fn as_str(&self) -> &'static str {
        self.into()
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            AgentKind::Sales => "Sales Agent",
            AgentKind::Support => "Support Agent",
            AgentKind::Operations => "Operations Agent",
        }
    }
}

impl std::fmt::Display for AgentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, EnumString, IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum AgentStatus {
    #[default]
    Idle,
    Busy,
    Error,
}

impl AgentStatus {
    pub fn as_str(&self) -> &'static str {
        self.into()
    }
}

impl std::fmt::Display for AgentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Agent {
    pub id: i64,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: AgentKind,
    pub status: AgentStatus,
    pub last_active: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn test_kind_round_trips_through_text() {
        for kind in AgentKind::iter() {
            assert_eq!(AgentKind::from_str(kind.as_str()).unwrap(), kind);
        }
        assert_eq!(AgentKind::from_str("SALES").unwrap(), AgentKind::Sales);
        assert!(AgentKind::from_str("marketing").is_err());
    }

    #[test]
    fn test_all_matches_iter() {
        let iterated: Vec<AgentKind> = AgentKind::iter().collect();
        assert_eq!(iterated, AgentKind::ALL.to_vec());
    }

    #[test]
    fn test_agent_serializes_kind_as_type() {
        let agent = Agent {
            id: 1,
            name: "Support Agent".to_string(),
            kind: AgentKind::Support,
            status: AgentStatus::Busy,
            last_active: "2024-01-01T00:00:00+00:00".to_string(),
        };
        let json = serde_json::to_value(&agent).unwrap();
        assert_eq!(json["type"], "support");
        assert_eq!(json["status"], "busy");
        assert!(json.get("kind").is_none());
    }

    #[test]
    fn test_agents_start_idle() {
        assert_eq!(AgentStatus::default(), AgentStatus::Idle);
    }
}
