//! HTTP client for the remote analysis endpoint.
//!
//! The endpoint receives a multipart form and answers with a JSON payload
//! whose shape is opaque to this crate.

use anyhow::{anyhow, Result};
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tokio::time::timeout;

use crate::records::ResumeRecord;

/// Webhook the hosted analysis pipeline listens on.
const DEFAULT_ENDPOINT: &str =
  "https://n8n.srv968815.hstgr.cloud/webhook/dea597e9-2b33-4067-a662-3087c45a956d";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for the analysis HTTP client
#[derive(Debug, Clone)]
pub struct ClientConfig {
  pub endpoint: String,
  /// Request timeout in seconds
  pub timeout_secs: u64,
}

impl Default for ClientConfig {
  fn default() -> Self {
    Self { endpoint: DEFAULT_ENDPOINT.to_string(), timeout_secs: DEFAULT_TIMEOUT_SECS }
  }
}

pub struct AnalysisClient {
  client: Client,
  config: ClientConfig,
}

impl Default for AnalysisClient {
  fn default() -> Self {
    Self::new()
  }
}

impl AnalysisClient {
  /// Create a new client with default configuration
  pub fn new() -> Self {
    Self::with_config(ClientConfig::default())
  }

  /// Create a new client with custom configuration
  pub fn with_config(config: ClientConfig) -> Self {
    let client = Client::builder()
      .timeout(Duration::from_secs(config.timeout_secs))
      .build()
      .expect("Failed to create HTTP client");

    Self { client, config }
  }

  /// Submit a resume and job description for analysis and return the parsed
  /// response payload.
  pub async fn analyze(
    &self,
    resume: &ResumeRecord,
    job_description: &str,
    extracted_text: &str,
  ) -> Result<Value> {
    let resume_part = Part::bytes(resume.data.clone())
      .file_name(resume.name.clone())
      .mime_str(&resume.mime)?;

    // Field names are the wire contract expected by the analysis webhook.
    let form = Form::new()
      .part("Upload Resume", resume_part)
      .text("Upload the Job description", job_description.to_string())
      .text("Resume2", extracted_text.to_string())
      .text("type", resume.mime.clone());

    let response = timeout(
      Duration::from_secs(self.config.timeout_secs),
      self.client.post(&self.config.endpoint).multipart(form).send(),
    )
    .await??;

    if !response.status().is_success() {
      return Err(anyhow!("analysis endpoint returned HTTP {}", response.status()));
    }

    response.json::<Value>().await.map_err(|e| anyhow!("could not parse analysis response: {e}"))
  }
}

/// Get the configured client (checks environment variables)
pub fn get_client() -> AnalysisClient {
  let endpoint =
    std::env::var("VERELOOP_ENDPOINT").unwrap_or_else(|_| DEFAULT_ENDPOINT.to_string());

  let timeout_secs = std::env::var("VERELOOP_TIMEOUT_SECS")
    .unwrap_or_else(|_| DEFAULT_TIMEOUT_SECS.to_string())
    .parse()
    .unwrap_or(DEFAULT_TIMEOUT_SECS);

  AnalysisClient::with_config(ClientConfig { endpoint, timeout_secs })
}
