//! Database table modules - extends Database with domain-specific methods
//!
//! Each module adds `impl Database` blocks with methods for a specific table.

mod agents;  // agents (one row per AgentKind)
mod tasks;   // tasks (pending -> in_progress -> completed | failed)
mod metrics; // metrics (append-only event log)
