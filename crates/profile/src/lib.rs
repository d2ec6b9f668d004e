//! Companion preference storage for vereloop.
//!
//! Persists a single user preference record (the full name used to fill
//! application forms) as JSON in the shared data directory.

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Profile {
  #[serde(default)]
  pub full_name: String,
}

/// Resolve the profile file path (~/.vereloop/profile.json).
pub fn profile_path() -> Result<PathBuf> {
  // Tests and callers can override the root via env var
  let root = if let Ok(custom) = std::env::var("VERELOOP_DATA_DIR") {
    PathBuf::from(custom)
  } else {
    let home = dirs::home_dir().ok_or_else(|| anyhow!("Could not find home directory"))?;
    home.join(".vereloop")
  };

  fs::create_dir_all(&root)?;
  Ok(root.join("profile.json"))
}

/// Load the saved profile; a missing file reads as an empty profile.
pub fn load() -> Result<Profile> {
  let path = profile_path()?;
  if !path.exists() {
    return Ok(Profile::default());
  }

  let content = fs::read_to_string(&path)?;
  Ok(serde_json::from_str(&content)?)
}

/// Save the profile, trimming the stored name.
pub fn save(profile: &Profile) -> Result<()> {
  let trimmed = Profile { full_name: profile.full_name.trim().to_string() };

  let path = profile_path()?;
  fs::write(&path, serde_json::to_string_pretty(&trimmed)?)?;
  Ok(())
}
