//! User-facing command implementations for the vereloop CLI.

use anyhow::{anyhow, Result};
use chrono::{Local, TimeZone};
use colored::*;
use std::path::PathBuf;

use crate::analyze;
use crate::client;
use crate::records::{ResponseRecord, ResumeRecord, MAX_RESPONSES, RESPONSES, RESUMES};
use crate::store::RecordStore;
use crate::util::format_bytes;

fn open_resumes() -> Result<RecordStore<ResumeRecord>> {
  Ok(RecordStore::open(RESUMES)?)
}

fn open_responses() -> Result<RecordStore<ResponseRecord>> {
  Ok(RecordStore::open_with_retention(RESPONSES, MAX_RESPONSES)?)
}

fn fmt_millis(millis: i64) -> String {
  Local
    .timestamp_millis_opt(millis)
    .single()
    .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
    .unwrap_or_else(|| "-".to_string())
}

fn confirm(prompt: &str) -> Result<bool> {
  println!("{prompt} [y/N]");
  let mut input = String::new();
  std::io::stdin().read_line(&mut input)?;
  Ok(input.trim().to_lowercase().starts_with('y'))
}

/// Analyze a resume against a job description and persist the results.
pub async fn analyze_resume(
  file: Option<PathBuf>,
  saved: Option<i64>,
  job_description: String,
) -> Result<()> {
  let mut resumes = open_resumes()?;
  let mut responses = open_responses()?;
  let client = client::get_client();

  let outcome = analyze::run(
    &client,
    file.as_deref(),
    saved,
    &job_description,
    &mut resumes,
    &mut responses,
  )
  .await?;

  if let Some(id) = outcome.saved_resume_id {
    println!("{} Saved uploaded resume as #{id}", "✓".green());
  }
  println!(
    "{} Analysis saved: {} (#{})",
    "✓".green(),
    outcome.label.yellow(),
    outcome.response_id
  );
  println!("  view: {}", outcome.detail_address.cyan());

  // Refreshing the saved-resume listing is best effort; a stale listing is
  // acceptable.
  match resumes.get_all() {
    Ok(all) => println!("  {} resume(s) on file", all.len()),
    Err(e) => tracing::warn!("could not refresh resume listing: {e}"),
  }

  Ok(())
}

/// List saved resumes, most recently touched first.
pub fn list_resumes() -> Result<()> {
  let resumes = open_resumes()?;
  let mut items = resumes.get_all()?;

  if items.is_empty() {
    println!("No saved resumes");
    return Ok(());
  }

  items.sort_by(|a, b| b.updated.cmp(&a.updated).then(b.created.cmp(&a.created)));
  for item in items {
    println!(
      "#{} {} • {} • {} • {}",
      item.id,
      item.body.name.yellow(),
      format_bytes(item.body.data.len() as u64),
      item.body.mime,
      fmt_millis(item.created),
    );
  }

  Ok(())
}

/// Write a saved resume's binary back out to a file.
pub fn export_resume(id: i64, out: Option<PathBuf>) -> Result<()> {
  let resumes = open_resumes()?;
  let Some(stored) = resumes.get(id)? else {
    return Err(anyhow!("Resume #{id} not found"));
  };

  let out = out.unwrap_or_else(|| PathBuf::from(&stored.body.name));
  std::fs::write(&out, &stored.body.data)?;

  println!("{} Exported {} to {}", "✓".green(), stored.body.name.yellow(), out.display());
  Ok(())
}

/// Delete a saved resume.
pub fn delete_resume(id: i64, force: bool) -> Result<()> {
  let mut resumes = open_resumes()?;
  let Some(stored) = resumes.get(id)? else {
    return Err(anyhow!("Resume #{id} not found"));
  };

  if !force && !confirm(&format!("Delete resume {}?", stored.body.name.yellow()))? {
    println!("Deletion cancelled");
    return Ok(());
  }

  resumes.remove(id)?;
  println!("{} Deleted resume #{id}", "✓".green());
  Ok(())
}

/// List saved responses, newest first.
pub fn list_responses() -> Result<()> {
  let responses = open_responses()?;
  let mut items = responses.get_all()?;

  if items.is_empty() {
    println!("No saved responses");
    return Ok(());
  }

  items.sort_by(|a, b| b.created.cmp(&a.created));
  for item in items {
    println!("#{} {} • {}", item.id, item.body.label.yellow(), fmt_millis(item.created));
  }

  Ok(())
}

/// Pretty-print a saved response payload.
pub fn show_response(id: i64) -> Result<()> {
  let responses = open_responses()?;
  let Some(stored) = responses.get(id)? else {
    return Err(anyhow!("Response #{id} not found"));
  };

  println!("{} • {}", stored.body.label.yellow(), fmt_millis(stored.created));
  println!("{}", serde_json::to_string_pretty(&stored.body.data)?);
  Ok(())
}

/// Print the detail-view address for a saved response.
pub fn open_response(id: i64) -> Result<()> {
  let responses = open_responses()?;
  if responses.get(id)?.is_none() {
    return Err(anyhow!("Response #{id} not found"));
  }

  println!("{}", analyze::detail_address(id));
  Ok(())
}

/// Rename a saved response.
pub fn rename_response(id: i64, label: &str) -> Result<()> {
  let label = label.trim();
  if label.is_empty() {
    return Err(anyhow!("Label cannot be empty"));
  }

  let mut responses = open_responses()?;
  responses.update(id, |body| body.label = label.to_string())?;

  println!("{} Renamed response #{id} to {}", "✓".green(), label.yellow());
  Ok(())
}

/// Delete a saved response. Deleting an id that is already gone succeeds.
pub fn delete_response(id: i64, force: bool) -> Result<()> {
  let mut responses = open_responses()?;
  let Some(stored) = responses.get(id)? else {
    println!("Response #{id} is already gone");
    return Ok(());
  };

  let prompt =
    format!("Delete response {}? This cannot be undone.", stored.body.label.yellow());
  if !force && !confirm(&prompt)? {
    println!("Deletion cancelled");
    return Ok(());
  }

  responses.remove(id)?;
  println!("{} Deleted response #{id}", "✓".green());
  Ok(())
}
