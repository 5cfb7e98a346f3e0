use super::{respond, Match, Rule, TaskHandler};
use crate::models::AgentKind;

const RULES: &[Rule] = &[
    (
        Match::Any(&["product"]),
        "Product query answered: Please refer to the user manual section 3.2.",
    ),
    (
        Match::All(&["ticket", "update"]),
        "Fetched ticket update: Ticket #404 is currently being reviewed by engineering.",
    ),
    (
        Match::Any(&["unresolved", "issue"]),
        "Issue unresolved. Created new support ticket #505.",
    ),
];

const FALLBACK: &str = "Support query processed: Standard troubleshooting steps provided.";

pub struct SupportHandler;

impl TaskHandler for SupportHandler {
    fn kind(&self) -> AgentKind {
        AgentKind::Support
    }

    fn metric_name(&self) -> &'static str {
        "tickets_processed"
    }

    fn handle(&self, description: &str) -> Result<String, String> {
        Ok(respond(RULES, FALLBACK, description).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reply(description: &str) -> String {
        SupportHandler.handle(description).unwrap()
    }

    #[test]
    fn test_support_replies() {
        assert_eq!(
            reply("Answer product query: How to reset password?"),
            "Product query answered: Please refer to the user manual section 3.2."
        );
        assert_eq!(
            reply("Fetch ticket update for #404"),
            "Fetched ticket update: Ticket #404 is currently being reviewed by engineering."
        );
        assert_eq!(
            reply("Issue unresolved. Create ticket for login error."),
            "Issue unresolved. Created new support ticket #505."
        );
    }

    #[test]
    fn test_ticket_without_update_falls_through() {
        assert_eq!(reply("Check ticket status #123"), FALLBACK);
    }
}
