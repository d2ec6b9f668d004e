use anyhow::Result;
use serde::{Deserialize, Serialize};
use serial_test::serial;
use std::env;
use tempfile::TempDir;
use vereloop::store::{RecordStore, StoreError};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Note {
  text: String,
}

fn note(text: &str) -> Note {
  Note { text: text.to_string() }
}

fn setup_temp_data_dir() -> TempDir {
  let temp_dir = TempDir::new().unwrap();
  env::set_var("VERELOOP_DATA_DIR", temp_dir.path());
  temp_dir
}

#[test]
#[serial]
fn test_ids_are_unique_and_persist_across_reopen() -> Result<()> {
  let _temp = setup_temp_data_dir();

  let mut store: RecordStore<Note> = RecordStore::open("notes")?;
  let a = store.add(&note("first"))?;
  let b = store.add(&note("second"))?;
  let c = store.add(&note("third"))?;
  assert_ne!(a, b);
  assert_ne!(b, c);
  drop(store);

  // Reopen the same store: records and ids survive, new ids stay distinct.
  let mut reopened: RecordStore<Note> = RecordStore::open("notes")?;
  let all = reopened.get_all()?;
  assert_eq!(all.len(), 3);
  let mut ids: Vec<i64> = all.iter().map(|r| r.id).collect();
  ids.sort();
  assert_eq!(ids, vec![a, b, c]);

  let d = reopened.add(&note("fourth"))?;
  assert!(!ids.contains(&d));

  Ok(())
}

#[test]
#[serial]
fn test_get_after_add_returns_inserted_body() -> Result<()> {
  let _temp = setup_temp_data_dir();

  let mut store: RecordStore<Note> = RecordStore::open("notes")?;
  let id = store.add(&note("hello"))?;

  let stored = store.get(id)?.expect("record should exist");
  assert_eq!(stored.id, id);
  assert_eq!(stored.body, note("hello"));
  assert_eq!(stored.created, stored.updated);

  Ok(())
}

#[test]
#[serial]
fn test_get_missing_id_is_none() -> Result<()> {
  let _temp = setup_temp_data_dir();

  let store: RecordStore<Note> = RecordStore::open("notes")?;
  assert!(store.get(999)?.is_none());

  Ok(())
}

#[test]
#[serial]
fn test_update_patches_body() -> Result<()> {
  let _temp = setup_temp_data_dir();

  let mut store: RecordStore<Note> = RecordStore::open("notes")?;
  let id = store.add(&note("before"))?;

  store.update(id, |body| body.text = "after".to_string())?;

  let stored = store.get(id)?.expect("record should exist");
  assert_eq!(stored.body, note("after"));
  assert!(stored.updated >= stored.created);

  Ok(())
}

#[test]
#[serial]
fn test_update_missing_id_fails_and_leaves_store_unchanged() -> Result<()> {
  let _temp = setup_temp_data_dir();

  let mut store: RecordStore<Note> = RecordStore::open("notes")?;
  let id = store.add(&note("only"))?;

  let result = store.update(id + 1, |body| body.text = "changed".to_string());
  assert!(matches!(result, Err(StoreError::NotFound { id: missing, .. }) if missing == id + 1));

  let all = store.get_all()?;
  assert_eq!(all.len(), 1);
  assert_eq!(all[0].body, note("only"));

  Ok(())
}

#[test]
#[serial]
fn test_remove_is_idempotent() -> Result<()> {
  let _temp = setup_temp_data_dir();

  let mut store: RecordStore<Note> = RecordStore::open("notes")?;
  let id = store.add(&note("ephemeral"))?;

  store.remove(id)?;
  assert!(store.get(id)?.is_none());

  // Removing again is not an error
  store.remove(id)?;

  Ok(())
}

#[test]
#[serial]
fn test_retention_caps_store_at_ten_newest() -> Result<()> {
  let _temp = setup_temp_data_dir();

  let mut store: RecordStore<Note> = RecordStore::open_with_retention("capped", 10)?;

  let mut ids = Vec::new();
  for i in 1..=11 {
    ids.push(store.add(&note(&format!("response {i}")))?);
  }

  let all = store.get_all()?;
  assert_eq!(all.len(), 10);

  // The oldest insert was evicted; the ten newest remain.
  let mut remaining: Vec<i64> = all.iter().map(|r| r.id).collect();
  remaining.sort();
  assert_eq!(remaining, ids[1..].to_vec());

  Ok(())
}

#[test]
#[serial]
fn test_retention_never_exceeds_cap_after_any_insert() -> Result<()> {
  let _temp = setup_temp_data_dir();

  let mut store: RecordStore<Note> = RecordStore::open_with_retention("capped", 10)?;

  for i in 1..=25 {
    store.add(&note(&format!("response {i}")))?;
    assert!(store.get_all()?.len() <= 10);
  }

  Ok(())
}

#[test]
#[serial]
fn test_stores_are_independent() -> Result<()> {
  let _temp = setup_temp_data_dir();

  let mut left: RecordStore<Note> = RecordStore::open("left")?;
  let mut right: RecordStore<Note> = RecordStore::open("right")?;

  left.add(&note("left only"))?;
  right.add(&note("right only"))?;
  right.add(&note("right again"))?;

  assert_eq!(left.get_all()?.len(), 1);
  assert_eq!(right.get_all()?.len(), 2);

  Ok(())
}
