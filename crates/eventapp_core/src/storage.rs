//! SQLite storage for local client state: a key/value config table holding the persisted
//! sign-in session. Remote records are never cached here.

use crate::subscription::lock;
use rusqlite::{params, Connection};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Mutex;

const SESSION_KEY: &str = "session";

/// What the Firebase identity adapter needs to resume without a fresh sign-in.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedSession {
    pub uid: String,
    pub email: Option<String>,
    pub id_token: String,
    pub refresh_token: String,
    /// RFC 3339 instant after which `id_token` must be refreshed.
    pub expires_at: String,
}

pub struct Storage {
    conn: Mutex<Connection>,
}

impl Storage {
    /// Open (or create) `eventapp.db` under `dir`.
    pub fn open(dir: &Path) -> Result<Self, String> {
        std::fs::create_dir_all(dir).map_err(|e| e.to_string())?;
        let db_path = dir.join("eventapp.db");
        log::debug!("storage: open {:?}", db_path);
        let conn = Connection::open(&db_path).map_err(|e| e.to_string())?;
        Self::with_connection(conn)
    }

    pub fn in_memory() -> Result<Self, String> {
        let conn = Connection::open_in_memory().map_err(|e| e.to_string())?;
        Self::with_connection(conn)
    }

    fn with_connection(conn: Connection) -> Result<Self, String> {
        conn.execute_batch("CREATE TABLE IF NOT EXISTS config (key TEXT PRIMARY KEY, value TEXT);")
            .map_err(|e| e.to_string())?;
        Ok(Self { conn: Mutex::new(conn) })
    }

    fn with_db<F, T>(&self, f: F) -> Result<T, String>
    where
        F: FnOnce(&Connection) -> Result<T, rusqlite::Error>,
    {
        let conn = lock(&self.conn);
        f(&conn).map_err(|e| e.to_string())
    }

    pub fn config_get(&self, key: &str) -> Result<Option<String>, String> {
        self.with_db(|conn| {
            let mut stmt = conn.prepare("SELECT value FROM config WHERE key = ?1")?;
            let mut rows = stmt.query(params![key])?;
            if let Some(row) = rows.next()? {
                return Ok(Some(row.get(0)?));
            }
            Ok(None)
        })
    }

    pub fn config_set(&self, key: &str, value: &str) -> Result<(), String> {
        self.with_db(|conn| {
            conn.execute(
                "INSERT INTO config (key, value) VALUES (?1, ?2) \
                 ON CONFLICT(key) DO UPDATE SET value = ?2",
                params![key, value],
            )?;
            Ok(())
        })
    }

    pub fn config_remove(&self, key: &str) -> Result<(), String> {
        self.with_db(|conn| {
            conn.execute("DELETE FROM config WHERE key = ?1", params![key])?;
            Ok(())
        })
    }

    pub fn session_save(&self, session: &PersistedSession) -> Result<(), String> {
        let json = serde_json::to_string(session).map_err(|e| e.to_string())?;
        self.config_set(SESSION_KEY, &json)
    }

    /// A row that no longer parses is treated as "signed out".
    pub fn session_load(&self) -> Result<Option<PersistedSession>, String> {
        Ok(self
            .config_get(SESSION_KEY)?
            .and_then(|json| match serde_json::from_str(&json) {
                Ok(s) => Some(s),
                Err(e) => {
                    log::warn!("storage: discarding unreadable session: {}", e);
                    None
                }
            }))
    }

    pub fn session_clear(&self) -> Result<(), String> {
        self.config_remove(SESSION_KEY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> PersistedSession {
        PersistedSession {
            uid: "alice".into(),
            email: Some("alice@example.com".into()),
            id_token: "id".into(),
            refresh_token: "refresh".into(),
            expires_at: "2030-01-01T00:00:00Z".into(),
        }
    }

    #[test]
    fn open_creates_db_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let db_path = dir.path().join("eventapp.db");
        assert!(!db_path.exists());
        Storage::open(dir.path()).expect("open");
        assert!(db_path.exists(), "eventapp.db should exist after open");
    }

    #[test]
    fn session_survives_reopen_and_clears() {
        let dir = tempfile::tempdir().expect("tempdir");
        {
            let storage = Storage::open(dir.path()).expect("open");
            storage.session_save(&session()).expect("save");
        }
        let storage = Storage::open(dir.path()).expect("reopen");
        assert_eq!(storage.session_load().expect("load"), Some(session()));
        storage.session_clear().expect("clear");
        assert_eq!(storage.session_load().expect("load"), None);
    }

    #[test]
    fn corrupt_session_row_reads_as_signed_out() {
        let storage = Storage::in_memory().expect("open");
        storage.config_set("session", "{not json").expect("set");
        assert_eq!(storage.session_load().expect("load"), None);
    }

    #[test]
    fn config_set_overwrites() {
        let storage = Storage::in_memory().expect("open");
        storage.config_set("k", "1").expect("set");
        storage.config_set("k", "2").expect("set");
        assert_eq!(storage.config_get("k").expect("get").as_deref(), Some("2"));
    }
}
