//! The analyze flow: resolve the active resume, extract text when the format
//! calls for it, submit to the remote endpoint, persist the outcome.

use anyhow::Result;
use serde_json::Value;
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::client::AnalysisClient;
use crate::extract;
use crate::records::{derive_label, mime_for_path, ResponseRecord, ResumeRecord, DOCX_MIME};
use crate::store::RecordStore;

#[derive(Error, Debug)]
pub enum AnalyzeError {
  #[error("no resume selected: upload a file or pick a saved resume")]
  NoResumeSelected,

  #[error("analysis submission failed: {message}")]
  SubmissionFailed { message: String },
}

/// Where the active resume came from. Fresh uploads are persisted after a
/// successful submission; saved resumes are reused as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResumeSource {
  Upload,
  Saved(i64),
}

#[derive(Debug, Clone)]
pub struct ChosenResume {
  pub record: ResumeRecord,
  pub source: ResumeSource,
}

/// What a completed analysis run produced.
#[derive(Debug)]
pub struct AnalysisOutcome {
  /// Set when a freshly uploaded resume was persisted.
  pub saved_resume_id: Option<i64>,
  pub response_id: i64,
  pub label: String,
  pub detail_address: String,
}

/// Resolve the active resume. An uploaded file takes priority over a saved
/// selection, regardless of both being present. A saved id that points at
/// nothing counts as no selection.
pub fn resolve_resume(
  upload: Option<&Path>,
  saved: Option<i64>,
  resumes: &RecordStore<ResumeRecord>,
) -> Result<ChosenResume> {
  if let Some(path) = upload {
    let data = fs::read(path)?;
    let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("resume").to_string();
    let mime = mime_for_path(path).to_string();
    return Ok(ChosenResume {
      record: ResumeRecord { name, mime, data },
      source: ResumeSource::Upload,
    });
  }

  if let Some(id) = saved {
    match resumes.get(id)? {
      Some(stored) => {
        return Ok(ChosenResume { record: stored.body, source: ResumeSource::Saved(id) });
      }
      None => {
        tracing::warn!(id, "saved resume selection points at a missing record");
      }
    }
  }

  Err(AnalyzeError::NoResumeSelected.into())
}

/// Detail-view address for a stored response.
pub fn detail_address(response_id: i64) -> String {
  format!("/resume/resume/ai_response.html?id={response_id}")
}

/// Persist a successful analysis: the fresh upload (if any) into the resumes
/// store, then the payload into the responses store, which enforces retention.
pub fn persist_outcome(
  chosen: &ChosenResume,
  payload: Value,
  resumes: &mut RecordStore<ResumeRecord>,
  responses: &mut RecordStore<ResponseRecord>,
) -> Result<AnalysisOutcome> {
  let saved_resume_id = match chosen.source {
    ResumeSource::Upload => Some(resumes.add(&chosen.record)?),
    ResumeSource::Saved(_) => None,
  };

  let label = derive_label(&payload);
  let response_id = responses.add(&ResponseRecord { label: label.clone(), data: payload })?;

  Ok(AnalysisOutcome {
    saved_resume_id,
    response_id,
    label,
    detail_address: detail_address(response_id),
  })
}

/// Run the full analyze flow against the remote endpoint.
pub async fn run(
  client: &AnalysisClient,
  upload: Option<&Path>,
  saved: Option<i64>,
  job_description: &str,
  resumes: &mut RecordStore<ResumeRecord>,
  responses: &mut RecordStore<ResponseRecord>,
) -> Result<AnalysisOutcome> {
  let chosen = resolve_resume(upload, saved, resumes)?;

  let extracted_text = if chosen.record.mime == DOCX_MIME {
    extract::docx_to_text(&chosen.record.data)?
  } else {
    String::new()
  };

  // Fails closed: nothing is persisted unless the endpoint answered with a
  // parsable payload.
  let payload = client
    .analyze(&chosen.record, job_description, &extracted_text)
    .await
    .map_err(|e| AnalyzeError::SubmissionFailed { message: e.to_string() })?;

  persist_outcome(&chosen, payload, resumes, responses)
}
