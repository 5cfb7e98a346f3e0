pub mod agent;
pub mod metric;
pub mod task;

pub use agent::{Agent, AgentKind, AgentStatus};
pub use metric::Metric;
pub use task::{CreateTaskRequest, Task, TaskStatus};

use serde::Deserialize;

/// Default number of rows returned by list endpoints
pub const DEFAULT_LIST_LIMIT: i64 = 20;
/// Hard cap on rows returned by list endpoints
pub const MAX_LIST_LIMIT: i64 = 200;

/// `?limit=` query parameter shared by the list endpoints
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub limit: Option<i64>,
}

impl ListQuery {
    pub fn effective_limit(&self) -> i64 {
        clamp_limit(self.limit)
    }
}

pub fn clamp_limit(limit: Option<i64>) -> i64 {
    limit.unwrap_or(DEFAULT_LIST_LIMIT).clamp(1, MAX_LIST_LIMIT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_limit() {
        assert_eq!(clamp_limit(None), 20);
        assert_eq!(clamp_limit(Some(5)), 5);
        assert_eq!(clamp_limit(Some(0)), 1);
        assert_eq!(clamp_limit(Some(-3)), 1);
        assert_eq!(clamp_limit(Some(10_000)), 200);
    }
}
