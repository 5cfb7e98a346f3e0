//! Metric event log operations

use rusqlite::{Connection, Result as SqliteResult};

#[cfg(test)]
use super::super::now_timestamp;
use super::super::Database;
use crate::models::Metric;

/// Append one metric row on an open connection or transaction
pub(super) fn insert_metric(
    conn: &Connection,
    agent_id: i64,
    metric_name: &str,
    value: f64,
    timestamp: &str,
) -> SqliteResult<Metric> {
    conn.execute(
        "INSERT INTO metrics (agent_id, metric_name, value, timestamp) VALUES (?1, ?2, ?3, ?4)",
        rusqlite::params![agent_id, metric_name, value, timestamp],
    )?;

    Ok(Metric {
        id: conn.last_insert_rowid(),
        agent_id,
        metric_name: metric_name.to_string(),
        value,
        timestamp: timestamp.to_string(),
    })
}

impl Database {
    /// Outside tests metrics are only written together with a task completion
    #[cfg(test)]
    pub fn record_metric(&self, agent_id: i64, metric_name: &str, value: f64) -> SqliteResult<Metric> {
        let conn = self.conn.lock().unwrap();
        insert_metric(&conn, agent_id, metric_name, value, &now_timestamp())
    }

    /// Newest metrics first
    pub fn list_recent_metrics(&self, limit: i64) -> SqliteResult<Vec<Metric>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            "SELECT id, agent_id, metric_name, value, timestamp
             FROM metrics ORDER BY timestamp DESC, id DESC LIMIT ?1",
        )?;
        let metrics = stmt
            .query_map([limit], |row| {
                Ok(Metric {
                    id: row.get(0)?,
                    agent_id: row.get(1)?,
                    metric_name: row.get(2)?,
                    value: row.get(3)?,
                    timestamp: row.get(4)?,
                })
            })?
            .collect::<SqliteResult<Vec<_>>>()?;
        Ok(metrics)
    }
}
