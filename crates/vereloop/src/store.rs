//! Generic keyed record storage.
//!
//! Each store is one sqlite database file under the vereloop data directory,
//! holding one category of record. Bodies are serde types stored as JSON; ids
//! and timestamps are assigned by the store. A store opened with a retention
//! cap evicts its oldest records inside the same transaction as the insert
//! that pushed it over the cap.

use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::marker::PhantomData;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
  #[error("local storage unavailable: {message}")]
  StorageUnavailable { message: String },

  #[error("no record with id {id} in the {store} store")]
  NotFound { store: &'static str, id: i64 },

  #[error("record encoding failed: {0}")]
  Encoding(#[from] serde_json::Error),

  #[error(transparent)]
  Backend(#[from] rusqlite::Error),
}

/// A record as returned by the store: the caller's body plus the fields the
/// store assigned on insert.
#[derive(Debug, Clone)]
pub struct Stored<T> {
  pub id: i64,
  /// Millisecond timestamps. `updated` starts equal to `created` and is
  /// refreshed only by `update`.
  pub created: i64,
  pub updated: i64,
  pub body: T,
}

pub struct RecordStore<T> {
  conn: Connection,
  name: &'static str,
  keep_newest: Option<usize>,
  _body: PhantomData<T>,
}

/// Resolve the vereloop data directory (~/.vereloop), creating it on first use.
pub fn data_root() -> Result<PathBuf, StoreError> {
  // Tests and callers can override the root via env var
  let root = if let Ok(custom) = std::env::var("VERELOOP_DATA_DIR") {
    PathBuf::from(custom)
  } else {
    let home = dirs::home_dir().ok_or_else(|| StoreError::StorageUnavailable {
      message: "could not find home directory".to_string(),
    })?;
    home.join(".vereloop")
  };

  fs::create_dir_all(&root)
    .map_err(|e| StoreError::StorageUnavailable { message: e.to_string() })?;
  Ok(root)
}

impl<T: Serialize + DeserializeOwned> RecordStore<T> {
  /// Open the named store, creating its database on first use. Idempotent.
  pub fn open(name: &'static str) -> Result<Self, StoreError> {
    Self::open_inner(name, None)
  }

  /// Open the named store with a keep-newest retention cap.
  pub fn open_with_retention(name: &'static str, keep_newest: usize) -> Result<Self, StoreError> {
    Self::open_inner(name, Some(keep_newest))
  }

  fn open_inner(name: &'static str, keep_newest: Option<usize>) -> Result<Self, StoreError> {
    let path = data_root()?.join(format!("{name}.db"));
    let conn = Connection::open(&path)
      .map_err(|e| StoreError::StorageUnavailable { message: e.to_string() })?;

    conn
      .execute(
        "CREATE TABLE IF NOT EXISTS records (
           id INTEGER PRIMARY KEY AUTOINCREMENT,
           created INTEGER NOT NULL,
           updated INTEGER NOT NULL,
           body TEXT NOT NULL
         )",
        [],
      )
      .map_err(|e| StoreError::StorageUnavailable { message: e.to_string() })?;

    Ok(Self { conn, name, keep_newest, _body: PhantomData })
  }

  /// Insert a new record and return the id the store assigned to it.
  pub fn add(&mut self, body: &T) -> Result<i64, StoreError> {
    let encoded = serde_json::to_string(body)?;
    let now = Utc::now().timestamp_millis();

    let tx = self.conn.transaction()?;
    tx.execute(
      "INSERT INTO records (created, updated, body) VALUES (?1, ?1, ?2)",
      params![now, encoded],
    )?;
    let id = tx.last_insert_rowid();

    if let Some(keep) = self.keep_newest {
      // Count-and-evict shares the insert's transaction, so a concurrent
      // insert cannot interleave with the read-then-delete.
      let count: i64 = tx.query_row("SELECT COUNT(*) FROM records", [], |row| row.get(0))?;
      let excess = count - keep as i64;
      if excess > 0 {
        tx.execute(
          "DELETE FROM records WHERE id IN (
             SELECT id FROM records ORDER BY created ASC, id ASC LIMIT ?1
           )",
          [excess],
        )?;
      }
    }

    tx.commit()?;
    Ok(id)
  }

  /// Fetch one record. A missing id is `None`, not an error.
  pub fn get(&self, id: i64) -> Result<Option<Stored<T>>, StoreError> {
    let row = self
      .conn
      .query_row(
        "SELECT id, created, updated, body FROM records WHERE id = ?1",
        [id],
        |row| {
          Ok((
            row.get::<_, i64>(0)?,
            row.get::<_, i64>(1)?,
            row.get::<_, i64>(2)?,
            row.get::<_, String>(3)?,
          ))
        },
      )
      .optional()?;

    match row {
      Some((id, created, updated, encoded)) => {
        let body = serde_json::from_str(&encoded)?;
        Ok(Some(Stored { id, created, updated, body }))
      }
      None => Ok(None),
    }
  }

  /// Fetch all records in unspecified order. Callers sort for display.
  pub fn get_all(&self) -> Result<Vec<Stored<T>>, StoreError> {
    let mut stmt = self.conn.prepare("SELECT id, created, updated, body FROM records")?;
    let rows = stmt.query_map([], |row| {
      Ok((
        row.get::<_, i64>(0)?,
        row.get::<_, i64>(1)?,
        row.get::<_, i64>(2)?,
        row.get::<_, String>(3)?,
      ))
    })?;

    let mut records = Vec::new();
    for row in rows {
      let (id, created, updated, encoded) = row?;
      records.push(Stored { id, created, updated, body: serde_json::from_str(&encoded)? });
    }
    Ok(records)
  }

  /// Apply a patch to an existing record and persist it, refreshing the
  /// `updated` timestamp. Fails with `NotFound` for a missing id.
  pub fn update(&mut self, id: i64, patch: impl FnOnce(&mut T)) -> Result<(), StoreError> {
    let tx = self.conn.transaction()?;

    let encoded = tx
      .query_row("SELECT body FROM records WHERE id = ?1", [id], |row| row.get::<_, String>(0))
      .optional()?;
    let Some(encoded) = encoded else {
      return Err(StoreError::NotFound { store: self.name, id });
    };

    let mut body: T = serde_json::from_str(&encoded)?;
    patch(&mut body);

    let now = Utc::now().timestamp_millis();
    tx.execute(
      "UPDATE records SET body = ?1, updated = ?2 WHERE id = ?3",
      params![serde_json::to_string(&body)?, now, id],
    )?;

    tx.commit()?;
    Ok(())
  }

  /// Delete by id. Removing a non-existent id is not an error.
  pub fn remove(&mut self, id: i64) -> Result<(), StoreError> {
    self.conn.execute("DELETE FROM records WHERE id = ?1", [id])?;
    Ok(())
  }
}
