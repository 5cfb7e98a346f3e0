use serde::{Deserialize, Serialize};
use strum::{EnumString, IntoStaticStr};

/// Lifecycle of a task: pending -> in_progress -> completed | failed
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, EnumString, IntoStaticStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum TaskStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
    Failed,
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        self.into()
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, TaskStatus::Completed | TaskStatus::Failed)
    }

    pub fn can_transition(from: TaskStatus, to: TaskStatus) -> bool {
        match from {
            TaskStatus::Pending => to == TaskStatus::InProgress,
            TaskStatus::InProgress => matches!(to, TaskStatus::Completed | TaskStatus::Failed),
            TaskStatus::Completed | TaskStatus::Failed => false,
        }
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: i64,
    pub description: String,
    pub status: TaskStatus,
    pub result: Option<String>,
    pub created_at: String,
    pub completed_at: Option<String>,
    pub agent_id: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateTaskRequest {
    pub description: String,
    pub agent_type: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_status_text_form() {
        assert_eq!(TaskStatus::InProgress.as_str(), "in_progress");
        assert_eq!(TaskStatus::from_str("in_progress").unwrap(), TaskStatus::InProgress);
        assert_eq!(
            serde_json::to_value(TaskStatus::InProgress).unwrap(),
            serde_json::json!("in_progress")
        );
    }

    #[test]
    fn test_allowed_transitions() {
        use TaskStatus::*;
        assert!(TaskStatus::can_transition(Pending, InProgress));
        assert!(TaskStatus::can_transition(InProgress, Completed));
        assert!(TaskStatus::can_transition(InProgress, Failed));

        assert!(!TaskStatus::can_transition(Pending, Completed));
        assert!(!TaskStatus::can_transition(Pending, Failed));
        assert!(!TaskStatus::can_transition(InProgress, Pending));
        assert!(!TaskStatus::can_transition(Completed, InProgress));
        assert!(!TaskStatus::can_transition(Failed, Pending));
    }

    #[test]
    fn test_terminal_states() {
        assert!(!TaskStatus::Pending.is_terminal());
        assert!(!TaskStatus::InProgress.is_terminal());
        assert!(TaskStatus::Completed.is_terminal());
        assert!(TaskStatus::Failed.is_terminal());
    }

    #[test]
    fn test_new_tasks_default_to_pending() {
        assert_eq!(TaskStatus::default(), TaskStatus::Pending);
    }
}
