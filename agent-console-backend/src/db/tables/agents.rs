//! Agent table operations

use rusqlite::{OptionalExtension, Result as SqliteResult};

use super::super::sqlite::parse_text_column;
use super::super::{now_timestamp, Database};
use crate::models::{Agent, AgentKind, AgentStatus};

const AGENT_COLUMNS: &str = "id, name, type, status, last_active";

fn map_agent_row(row: &rusqlite::Row) -> SqliteResult<Agent> {
    Ok(Agent {
        id: row.get(0)?,
        name: row.get(1)?,
        kind: parse_text_column(row, 2)?,
        status: parse_text_column(row, 3)?,
        last_active: row.get(4)?,
    })
}

impl Database {
    /// Insert one idle agent for every kind that has none yet. Returns how many were created.
    pub fn seed_agents(&self) -> SqliteResult<usize> {
        let conn = self.conn.lock().unwrap();
        let mut created = 0;

        for kind in AgentKind::ALL {
            let exists: Option<i64> = conn
                .query_row(
                    "SELECT id FROM agents WHERE type = ?1 LIMIT 1",
                    [kind.as_str()],
                    |row| row.get(0),
                )
                .optional()?;

            if exists.is_none() {
                conn.execute(
                    "INSERT INTO agents (name, type, status, last_active) VALUES (?1, ?2, ?3, ?4)",
                    rusqlite::params![
                        kind.display_name(),
                        kind.as_str(),
                        AgentStatus::Idle.as_str(),
                        now_timestamp()
                    ],
                )?;
                log::info!("Created {} ({})", kind.display_name(), kind);
                created += 1;
            }
        }

        Ok(created)
    }

    pub fn list_agents(&self) -> SqliteResult<Vec<Agent>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(&format!("SELECT {} FROM agents ORDER BY id ASC", AGENT_COLUMNS))?;
        let agents = stmt
            .query_map([], map_agent_row)?
            .collect::<SqliteResult<Vec<_>>>()?;
        Ok(agents)
    }

    pub fn get_agent(&self, id: i64) -> SqliteResult<Option<Agent>> {
        let conn = self.conn.lock().unwrap();
        conn.query_row(
            &format!("SELECT {} FROM agents WHERE id = ?1", AGENT_COLUMNS),
            [id],
            map_agent_row,
        )
        .optional()
    }

    /// First agent of the given kind (lowest id)
    pub fn get_agent_by_kind(&self, kind: AgentKind) -> SqliteResult<Option<Agent>> {
        let conn = self.conn.lock().unwrap();
        conn.query_row(
            &format!(
                "SELECT {} FROM agents WHERE type = ?1 ORDER BY id ASC LIMIT 1",
                AGENT_COLUMNS
            ),
            [kind.as_str()],
            map_agent_row,
        )
        .optional()
    }

    /// Set the agent's status and bump `last_active`. Returns false if the agent does not exist.
    pub fn set_agent_status(&self, id: i64, status: AgentStatus) -> SqliteResult<bool> {
        let conn = self.conn.lock().unwrap();
        let rows = conn.execute(
            "UPDATE agents SET status = ?1, last_active = ?2 WHERE id = ?3",
            rusqlite::params![status.as_str(), now_timestamp(), id],
        )?;
        Ok(rows > 0)
    }
}
