use super::{respond, Match, Rule, TaskHandler};
use crate::models::AgentKind;

const RULES: &[Rule] = &[
    (
        Match::Any(&["reach out", "lead"]),
        "Reached out to inbound lead. Initial contact email sent.",
    ),
    (
        Match::Any(&["pricing"]),
        "Pricing query answered: Our enterprise plan starts at $99/mo.",
    ),
    (
        Match::Any(&["product"]),
        "Product query answered: Features include AI automation and real-time analytics.",
    ),
    (
        Match::Any(&["purchase", "schedule"]),
        "Customer interested in purchase. Appointment scheduled for demo.",
    ),
];

const FALLBACK: &str = "Task processed: General sales inquiry handled.";

pub struct SalesHandler;

impl TaskHandler for SalesHandler {
    fn kind(&self) -> AgentKind {
        AgentKind::Sales
    }

    fn metric_name(&self) -> &'static str {
        "sales_activities"
    }

    fn handle(&self, description: &str) -> Result<String, String> {
        Ok(respond(RULES, FALLBACK, description).to_string())
    }
}
