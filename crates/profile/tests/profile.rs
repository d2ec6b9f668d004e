use anyhow::Result;
use profile::Profile;
use serial_test::serial;
use std::env;
use tempfile::TempDir;

fn setup_temp_data_dir() -> TempDir {
  let temp_dir = TempDir::new().unwrap();
  env::set_var("VERELOOP_DATA_DIR", temp_dir.path());
  temp_dir
}

#[test]
#[serial]
fn test_save_and_load_round_trips() -> Result<()> {
  let _temp = setup_temp_data_dir();

  profile::save(&Profile { full_name: "Ada Lovelace".to_string() })?;

  let loaded = profile::load()?;
  assert_eq!(loaded.full_name, "Ada Lovelace");

  Ok(())
}

#[test]
#[serial]
fn test_save_trims_whitespace() -> Result<()> {
  let _temp = setup_temp_data_dir();

  profile::save(&Profile { full_name: "  Ada Lovelace \n".to_string() })?;

  let loaded = profile::load()?;
  assert_eq!(loaded.full_name, "Ada Lovelace");

  Ok(())
}

#[test]
#[serial]
fn test_load_without_saved_profile_is_empty() -> Result<()> {
  let _temp = setup_temp_data_dir();

  let loaded = profile::load()?;
  assert_eq!(loaded, Profile::default());

  Ok(())
}

#[test]
#[serial]
fn test_save_overwrites_previous_name() -> Result<()> {
  let _temp = setup_temp_data_dir();

  profile::save(&Profile { full_name: "First Name".to_string() })?;
  profile::save(&Profile { full_name: "Second Name".to_string() })?;

  let loaded = profile::load()?;
  assert_eq!(loaded.full_name, "Second Name");

  Ok(())
}
