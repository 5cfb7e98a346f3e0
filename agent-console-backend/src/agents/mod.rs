//! Canned task handlers, one per agent kind.
//!
//! Each handler matches the lowercased task description against an ordered
//! list of keyword rules; the first matching rule supplies the result text.

mod operations;
mod sales;
mod support;

pub use operations::OperationsHandler;
pub use sales::SalesHandler;
pub use support::SupportHandler;

use std::collections::HashMap;
use std::sync::Arc;

use crate::models::AgentKind;

/// Processes the description of a task assigned to one kind of agent
pub trait TaskHandler: Send + Sync {
    fn kind(&self) -> AgentKind;

    /// Name of the metric logged after each successfully handled task
    fn metric_name(&self) -> &'static str;

    /// Produce the task result, or an error message that fails the task
    fn handle(&self, description: &str) -> Result<String, String>;
}

/// How a rule's keywords are combined
#[derive(Debug, Clone, Copy)]
pub enum Match {
    /// At least one keyword appears
    Any(&'static [&'static str]),
    /// Every keyword appears
    All(&'static [&'static str]),
}

impl Match {
    fn matches(&self, haystack: &str) -> bool {
        match self {
            Match::Any(words) => words.iter().any(|w| haystack.contains(w)),
            Match::All(words) => words.iter().all(|w| haystack.contains(w)),
        }
    }
}

/// A keyword rule and the canned reply it produces
pub type Rule = (Match, &'static str);

/// First matching rule wins; `fallback` when nothing matches.
pub fn respond(rules: &[Rule], fallback: &'static str, description: &str) -> &'static str {
    let lowered = description.to_lowercase();
    rules
        .iter()
        .find(|(m, _)| m.matches(&lowered))
        .map(|(_, reply)| *reply)
        .unwrap_or(fallback)
}

/// Lookup table from agent kind to its handler
pub struct HandlerRegistry {
    handlers: HashMap<AgentKind, Arc<dyn TaskHandler>>,
}

impl HandlerRegistry {
    pub fn empty() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// Register a handler, replacing any existing one for the same kind
    pub fn register(&mut self, handler: Arc<dyn TaskHandler>) {
        self.handlers.insert(handler.kind(), handler);
    }

    pub fn get(&self, kind: AgentKind) -> Option<Arc<dyn TaskHandler>> {
        self.handlers.get(&kind).cloned()
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }
}

impl Default for HandlerRegistry {
    fn default() -> Self {
        let mut registry = Self::empty();
        registry.register(Arc::new(SalesHandler));
        registry.register(Arc::new(SupportHandler));
        registry.register(Arc::new(OperationsHandler));
        registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_registry_covers_every_kind() {
        let registry = HandlerRegistry::default();
        assert_eq!(registry.len(), 3);
        for kind in AgentKind::ALL {
            let handler = registry.get(kind).expect("handler registered");
            assert_eq!(handler.kind(), kind);
        }
    }

    #[test]
    fn test_empty_registry() {
        let registry = HandlerRegistry::empty();
        assert_eq!(registry.len(), 0);
        assert!(registry.get(AgentKind::Sales).is_none());
    }

    #[test]
    fn test_first_rule_wins() {
        const RULES: &[Rule] = &[
            (Match::Any(&["alpha"]), "first"),
            (Match::Any(&["alpha", "beta"]), "second"),
        ];
        assert_eq!(respond(RULES, "none", "ALPHA beta"), "first");
        assert_eq!(respond(RULES, "none", "just beta"), "second");
        assert_eq!(respond(RULES, "none", "gamma"), "none");
    }

    #[test]
    fn test_all_requires_every_keyword() {
        const RULES: &[Rule] = &[(Match::All(&["ticket", "update"]), "both")];
        assert_eq!(respond(RULES, "none", "Ticket update please"), "both");
        assert_eq!(respond(RULES, "none", "ticket only"), "none");
    }
}
