//! Task table operations
//!
//! Status changes are conditional updates guarded by the current status, so a
//! task can only move along pending -> in_progress -> completed | failed and a
//! second worker (or a second tick) can never claim the same row.

use rusqlite::{Connection, OptionalExtension, Result as SqliteResult};

use super::super::sqlite::parse_text_column;
use super::super::{now_timestamp, Database};
use super::metrics::insert_metric;
use crate::models::{AgentStatus, Task, TaskStatus};

const TASK_COLUMNS: &str = "id, description, status, result, created_at, completed_at, agent_id";

fn map_task_row(row: &rusqlite::Row) -> SqliteResult<Task> {
    Ok(Task {
        id: row.get(0)?,
        description: row.get(1)?,
        status: parse_text_column(row, 2)?,
        result: row.get(3)?,
        created_at: row.get(4)?,
        completed_at: row.get(5)?,
        agent_id: row.get(6)?,
    })
}

impl Database {
    pub fn create_task(&self, description: &str, agent_id: i64) -> SqliteResult<Task> {
        let conn = self.conn.lock().unwrap();
        let now = now_timestamp();

        conn.execute(
            "INSERT INTO tasks (description, status, created_at, agent_id) VALUES (?1, ?2, ?3, ?4)",
            rusqlite::params![description, TaskStatus::Pending.as_str(), now, agent_id],
        )?;

        Ok(Task {
            id: conn.last_insert_rowid(),
            description: description.to_string(),
            status: TaskStatus::Pending,
            result: None,
            created_at: now,
            completed_at: None,
            agent_id,
        })
    }

    pub fn get_task(&self, id: i64) -> SqliteResult<Option<Task>> {
        let conn = self.conn.lock().unwrap();
        conn.query_row(
            &format!("SELECT {} FROM tasks WHERE id = ?1", TASK_COLUMNS),
            [id],
            map_task_row,
        )
        .optional()
    }

    /// Newest tasks first
    pub fn list_recent_tasks(&self, limit: i64) -> SqliteResult<Vec<Task>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM tasks ORDER BY created_at DESC, id DESC LIMIT ?1",
            TASK_COLUMNS
        ))?;
        let tasks = stmt
            .query_map([limit], map_task_row)?
            .collect::<SqliteResult<Vec<_>>>()?;
        Ok(tasks)
    }

    /// Pending tasks in submission order (oldest first)
    pub fn list_pending_tasks(&self) -> SqliteResult<Vec<Task>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM tasks WHERE status = ?1 ORDER BY created_at ASC, id ASC",
            TASK_COLUMNS
        ))?;
        let tasks = stmt
            .query_map([TaskStatus::Pending.as_str()], map_task_row)?
            .collect::<SqliteResult<Vec<_>>>()?;
        Ok(tasks)
    }

    /// Move a task from pending to in_progress. Returns false if it was no longer pending.
    pub fn claim_task(&self, id: i64) -> SqliteResult<bool> {
        let conn = self.conn.lock().unwrap();
        let rows = conn.execute(
            "UPDATE tasks SET status = ?1 WHERE id = ?2 AND status = ?3",
            rusqlite::params![TaskStatus::InProgress.as_str(), id, TaskStatus::Pending.as_str()],
        )?;
        Ok(rows > 0)
    }

    /// Record a failure, storing the error text as the result. Only applies to an in_progress task.
    pub fn fail_task(&self, id: i64, error: &str) -> SqliteResult<bool> {
        let conn = self.conn.lock().unwrap();
        finish_task(&conn, id, TaskStatus::Failed, error, &now_timestamp())
    }

    /// Complete an in_progress task, log its metric and return the agent to idle in one
    /// transaction. Nothing is written if any step fails or the task is no longer in_progress.
    pub fn complete_task_with_metric(
        &self,
        id: i64,
        result: &str,
        agent_id: i64,
        metric_name: &str,
        metric_value: f64,
    ) -> SqliteResult<bool> {
        let mut conn = self.conn.lock().unwrap();
        let tx = conn.transaction()?;
        let now = now_timestamp();

        if !finish_task(&tx, id, TaskStatus::Completed, result, &now)? {
            // Dropping the transaction rolls it back
            return Ok(false);
        }

        insert_metric(&tx, agent_id, metric_name, metric_value, &now)?;
        tx.execute(
            "UPDATE agents SET status = ?1, last_active = ?2 WHERE id = ?3",
            rusqlite::params![AgentStatus::Idle.as_str(), now, agent_id],
        )?;

        tx.commit()?;
        Ok(true)
    }
}

/// Move an in_progress task to a terminal status
fn finish_task(
    conn: &Connection,
    id: i64,
    status: TaskStatus,
    result: &str,
    now: &str,
) -> SqliteResult<bool> {
    debug_assert!(status.is_terminal() && TaskStatus::can_transition(TaskStatus::InProgress, status));
    let rows = conn.execute(
        "UPDATE tasks SET status = ?1, result = ?2, completed_at = ?3 WHERE id = ?4 AND status = ?5",
        rusqlite::params![status.as_str(), result, now, id, TaskStatus::InProgress.as_str()],
    )?;
    Ok(rows > 0)
}
