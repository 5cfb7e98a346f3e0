use super::{respond, Match, Rule, TaskHandler};
use crate::models::AgentKind;

const RULES: &[Rule] = &[
    (
        Match::Any(&["sla"]),
        "SLA Monitor: Current uptime 99.98%. Response time within limits.",
    ),
    (
        Match::Any(&["error"]),
        "Error Report: 500 Internal Server Error detected in log stream.",
    ),
    (
        Match::Any(&["manage", "task"]),
        "Task Management: Reallocated server resources for peak load.",
    ),
];

const FALLBACK: &str = "Operations task completed: System check passed.";

pub struct OperationsHandler;

impl TaskHandler for OperationsHandler {
    fn kind(&self) -> AgentKind {
        AgentKind::Operations
    }

    fn metric_name(&self) -> &'static str {
        "ops_checks"
    }

    fn handle(&self, description: &str) -> Result<String, String> {
        Ok(respond(RULES, FALLBACK, description).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reply(description: &str) -> String {
        OperationsHandler.handle(description).unwrap()
    }

    #[test]
    fn test_operations_replies() {
        assert_eq!(
            reply("Monitor SLA status"),
            "SLA Monitor: Current uptime 99.98%. Response time within limits."
        );
        assert_eq!(
            reply("Report system errors"),
            "Error Report: 500 Internal Server Error detected in log stream."
        );
        assert_eq!(
            reply("Manage background tasks and resources"),
            "Task Management: Reallocated server resources for peak load."
        );
        assert_eq!(reply("Ping the fleet"), FALLBACK);
    }
}
