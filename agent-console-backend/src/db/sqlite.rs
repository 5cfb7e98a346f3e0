use chrono::{SecondsFormat, Utc};
use rusqlite::{Connection, Result as SqliteResult};
use std::path::Path;
use std::str::FromStr;
use std::sync::Mutex;

pub struct Database {
    pub(super) conn: Mutex<Connection>,
}

/// Current time as a fixed-width RFC 3339 UTC string.
///
/// Fixed width keeps lexical order equal to chronological order, which the
/// `ORDER BY created_at` / `ORDER BY timestamp` queries rely on.
pub fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}

impl Database {
    /// Open (or create) the database at `database_url`. `:memory:` opens a private in-memory db.
    pub fn new(database_url: &str) -> SqliteResult<Self> {
        let conn = if database_url == ":memory:" {
            Connection::open_in_memory()?
        } else {
            // Create parent directory if it doesn't exist
            if let Some(parent) = Path::new(database_url).parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent).ok();
                }
            }
            Connection::open(database_url)?
        };

        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        let db = Self {
            conn: Mutex::new(conn),
        };
        db.init()?;
        Ok(db)
    }

    fn init(&self) -> SqliteResult<()> {
        let conn = self.conn.lock().unwrap();

        conn.execute(
            "CREATE TABLE IF NOT EXISTS agents (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                type TEXT NOT NULL,
                status TEXT NOT NULL DEFAULT 'idle',
                last_active TEXT NOT NULL
            )",
            [],
        )?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS tasks (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                description TEXT NOT NULL,
                status TEXT NOT NULL DEFAULT 'pending',
                result TEXT,
                created_at TEXT NOT NULL,
                completed_at TEXT,
                agent_id INTEGER NOT NULL,
                FOREIGN KEY (agent_id) REFERENCES agents(id)
            )",
            [],
        )?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS metrics (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                agent_id INTEGER NOT NULL,
                metric_name TEXT NOT NULL,
                value REAL NOT NULL,
                timestamp TEXT NOT NULL,
                FOREIGN KEY (agent_id) REFERENCES agents(id)
            )",
            [],
        )?;

        conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_tasks_status ON tasks(status, created_at)",
            [],
        )?;
        conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_tasks_created ON tasks(created_at DESC)",
            [],
        )?;
        conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_metrics_timestamp ON metrics(timestamp DESC)",
            [],
        )?;

        Ok(())
    }
}

#[cfg(test)]
impl Database {
    /// Run arbitrary SQL, for tests that need to break or rewrite rows behind the API
    pub fn run_sql(&self, sql: &str) -> SqliteResult<()> {
        self.conn.lock().unwrap().execute_batch(sql)
    }
}

/// Read a TEXT column and parse it into one of the model enums
pub(super) fn parse_text_column<T>(row: &rusqlite::Row, idx: usize) -> SqliteResult<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let raw: String = row.get(idx)?;
    T::from_str(&raw).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(e))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_file_backed_db_persists_schema() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("console.db");
        let path = path.to_string_lossy().to_string();

        {
            let db = Database::new(&path).expect("open db");
            assert_eq!(db.seed_agents().unwrap(), 3);
        }

        // Reopening must not recreate or reseed anything
        let db = Database::new(&path).expect("reopen db");
        assert_eq!(db.seed_agents().unwrap(), 0);
        assert_eq!(db.list_agents().unwrap().len(), 3);
    }

    #[test]
    fn test_foreign_keys_enforced() {
        let db = Database::new(":memory:").unwrap();
        assert!(db.create_task("orphan", 999).is_err());
        assert!(db.record_metric(999, "ops_checks", 1.0).is_err());
    }

    #[test]
    fn test_now_timestamp_is_fixed_width() {
        let a = now_timestamp();
        let b = now_timestamp();
        assert_eq!(a.len(), b.len());
        assert!(a.ends_with('Z'));
        assert!(a <= b);
    }
}
