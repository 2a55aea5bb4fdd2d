//! SQLite-backed store for pitches and subscriptions.
//!
//! One connection behind a mutex; every call re-reads from disk and nothing
//! is cached between calls.

use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use rusqlite::{params, Connection, OptionalExtension};
use tracing::{info, warn};

use crate::schema::SCHEMA_SQL;
use crate::types::*;
use catalyst_core::{Error, Result};

/// SQLite store holding the `pitches` and `subscriptions` tables.
pub struct SqliteStore {
    conn: Mutex<Connection>,
    db_path: PathBuf,
}

impl SqliteStore {
    /// Open or create the database file at `db_path`.
    pub fn open(db_path: impl AsRef<Path>) -> Result<Self> {
        let db_path = db_path.as_ref().to_path_buf();
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Self::create_connection(&db_path)?;
        conn.execute_batch(SCHEMA_SQL)
            .map_err(|e| Error::Database(format!("Schema init failed: {}", e)))?;

        let store = Self {
            conn: Mutex::new(conn),
            db_path,
        };

        info!(
            "SqliteStore initialized: {} pitches, path={}",
            store.count_pitches()?,
            store.db_path.display()
        );

        Ok(store)
    }

    fn create_connection(db_path: &Path) -> Result<Connection> {
        let conn = Connection::open(db_path).map_err(|e| Error::Database(e.to_string()))?;
        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA foreign_keys = ON;
             PRAGMA synchronous = NORMAL;",
        )
        .map_err(|e| Error::Database(e.to_string()))?;
        Ok(conn)
    }

    // ---------------------------------------------------------------
    // Pitches
    // ---------------------------------------------------------------

    /// Insert a pitch and return the stored row.
    pub fn insert_pitch(&self, new: &NewPitch) -> Result<Pitch> {
        let now = now_millis();
        let created_at = new.created_at.unwrap_or(now);
        let uuid = uuid::Uuid::new_v4().to_string();
        let tags_json = if new.tags.is_empty() {
            None
        } else {
            Some(serde_json::to_string(&new.tags)?)
        };

        let conn = self.conn.lock();
        let id = conn
            .prepare_cached(
                "INSERT INTO pitches
                    (uuid, title, description, transcript, quote, audio_url, tags, status, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
            )
            .map_err(|e| Error::Database(e.to_string()))?
            .insert(params![
                uuid,
                new.title,
                new.description,
                new.transcript,
                new.quote,
                new.audio_url,
                tags_json,
                new.status.as_str(),
                created_at,
                created_at,
            ])
            .map_err(|e| Error::Database(e.to_string()))?;

        Ok(Pitch {
            id,
            uuid,
            title: new.title.clone(),
            description: new.description.clone(),
            transcript: new.transcript.clone(),
            quote: new.quote.clone(),
            audio_url: new.audio_url.clone(),
            tags: new.tags.clone(),
            status: new.status,
            created_at,
            updated_at: created_at,
        })
    }

    /// Get a pitch by ID.
    pub fn get_pitch(&self, id: i64) -> Result<Option<Pitch>> {
        let conn = self.conn.lock();
        let row = conn
            .prepare_cached("SELECT * FROM pitches WHERE id = ?1")
            .map_err(|e| Error::Database(e.to_string()))?
            .query_row(params![id], |row| Ok(Self::row_to_pitch(row)))
            .optional()
            .map_err(|e| Error::Database(e.to_string()))?;
        Ok(row)
    }

    /// All pitches with `status`, oldest first.
    pub fn list_pitches_by_status(&self, status: PitchStatus) -> Result<Vec<Pitch>> {
        let conn = self.conn.lock();
        let mut stmt = conn
            .prepare_cached("SELECT * FROM pitches WHERE status = ?1 ORDER BY created_at ASC, id ASC")
            .map_err(|e| Error::Database(e.to_string()))?;
        let rows = stmt
            .query_map(params![status.as_str()], |row| Ok(Self::row_to_pitch(row)))
            .map_err(|e| Error::Database(e.to_string()))?;
        rows.collect::<rusqlite::Result<Vec<_>>>()
            .map_err(|e| Error::Database(e.to_string()))
    }

    /// Pitches of any status whose quote has never been set.
    pub fn pitches_without_quote(&self) -> Result<Vec<Pitch>> {
        let conn = self.conn.lock();
        let mut stmt = conn
            .prepare_cached("SELECT * FROM pitches WHERE quote IS NULL ORDER BY id ASC")
            .map_err(|e| Error::Database(e.to_string()))?;
        let rows = stmt
            .query_map([], |row| Ok(Self::row_to_pitch(row)))
            .map_err(|e| Error::Database(e.to_string()))?;
        rows.collect::<rusqlite::Result<Vec<_>>>()
            .map_err(|e| Error::Database(e.to_string()))
    }

    /// Set the quote on a pitch. Returns false if the pitch does not exist.
    pub fn update_quote(&self, id: i64, quote: &str) -> Result<bool> {
        let conn = self.conn.lock();
        let count = conn
            .execute(
                "UPDATE pitches SET quote = ?1, updated_at = ?2 WHERE id = ?3",
                params![quote, now_millis(), id],
            )
            .map_err(|e| Error::Database(e.to_string()))?;
        Ok(count > 0)
    }

    /// Count all pitches.
    pub fn count_pitches(&self) -> Result<i64> {
        let conn = self.conn.lock();
        conn.query_row("SELECT COUNT(*) FROM pitches", [], |row| row.get(0))
            .map_err(|e| Error::Database(e.to_string()))
    }

    // ---------------------------------------------------------------
    // Subscriptions
    // ---------------------------------------------------------------

    /// Add an active subscription. A repeated email is `Error::Duplicate`.
    pub fn add_subscription(&self, email: &str, source: &str) -> Result<Subscription> {
        let uuid = uuid::Uuid::new_v4().to_string();
        let created_at = now_millis();

        let conn = self.conn.lock();
        let id = conn
            .prepare_cached(
                "INSERT INTO subscriptions (uuid, email, created_at, source, status)
                 VALUES (?1, ?2, ?3, ?4, 'active')",
            )
            .map_err(|e| Error::Database(e.to_string()))?
            .insert(params![uuid, email, created_at, source])
            .map_err(|e| {
                if e.to_string().contains("UNIQUE constraint") {
                    Error::Duplicate(email.to_string())
                } else {
                    Error::Database(e.to_string())
                }
            })?;

        Ok(Subscription {
            id,
            uuid,
            email: email.to_string(),
            source: source.to_string(),
            status: "active".into(),
            created_at,
        })
    }

    /// Find a subscription by email.
    pub fn get_subscription_by_email(&self, email: &str) -> Result<Option<Subscription>> {
        let conn = self.conn.lock();
        let row = conn
            .prepare_cached("SELECT * FROM subscriptions WHERE email = ?1")
            .map_err(|e| Error::Database(e.to_string()))?
            .query_row(params![email], |row| {
                Ok(Subscription {
                    id: row.get("id")?,
                    uuid: row.get("uuid")?,
                    email: row.get("email")?,
                    source: row.get("source")?,
                    status: row.get("status")?,
                    created_at: row.get("created_at")?,
                })
            })
            .optional()
            .map_err(|e| Error::Database(e.to_string()))?;
        Ok(row)
    }

    // ---------------------------------------------------------------
    // Row Mapping Helpers
    // ---------------------------------------------------------------

    fn row_to_pitch(row: &rusqlite::Row<'_>) -> Pitch {
        let id: i64 = row.get("id").unwrap_or(0);
        let tags = row
            .get::<_, Option<String>>("tags")
            .ok()
            .flatten()
            .map(|raw| decode_tags(id, &raw))
            .unwrap_or_default();
        let status: String = row.get("status").unwrap_or_default();

        Pitch {
            id,
            uuid: row.get("uuid").unwrap_or_default(),
            title: row.get("title").unwrap_or_default(),
            description: row.get("description").ok().flatten(),
            transcript: row.get("transcript").unwrap_or_default(),
            quote: row.get("quote").ok().flatten(),
            audio_url: row.get("audio_url").ok().flatten(),
            tags,
            status: PitchStatus::from_db(&status),
            created_at: row.get("created_at").unwrap_or(0),
            updated_at: row.get("updated_at").unwrap_or(0),
        }
    }
}

fn decode_tags(pitch_id: i64, raw: &str) -> Vec<String> {
    match serde_json::from_str(raw) {
        Ok(tags) => tags,
        Err(e) => {
            warn!("Pitch {} has undecodable tags ({}); treating as empty", pitch_id, e);
            Vec::new()
        }
    }
}

fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
