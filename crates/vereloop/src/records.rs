//! Record bodies for the two vereloop stores.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;

/// Store names. Each store keeps its own database file under the data dir.
pub const RESUMES: &str = "resumes";
pub const RESPONSES: &str = "responses";

/// Cap on retained responses; the oldest beyond this are evicted on insert.
pub const MAX_RESPONSES: usize = 10;

pub const DOCX_MIME: &str =
  "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
pub const FALLBACK_MIME: &str = "application/octet-stream";

/// A saved resume: the original binary plus its declared media type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResumeRecord {
  pub name: String,
  pub mime: String,
  #[serde(with = "blob")]
  pub data: Vec<u8>,
}

/// A saved analysis response. The payload shape is decided by the remote
/// service and kept opaque here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseRecord {
  pub label: String,
  pub data: Value,
}

/// Base64 wrapping for binary blobs inside JSON record bodies.
mod blob {
  use base64::engine::general_purpose::STANDARD;
  use base64::Engine;
  use serde::{Deserialize, Deserializer, Serializer};

  pub fn serialize<S: Serializer>(data: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&STANDARD.encode(data))
  }

  pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
    let encoded = String::deserialize(deserializer)?;
    STANDARD.decode(encoded).map_err(serde::de::Error::custom)
  }
}

/// Derive a short display label from an analysis payload: the overall-match
/// summary when present, then a generic title, then a timestamp.
pub fn derive_label(payload: &Value) -> String {
  if let Some(overall) = payload.pointer("/analysis/overall_match").and_then(Value::as_str) {
    return truncate_chars(overall, 60);
  }
  if let Some(title) = payload.get("title").and_then(Value::as_str) {
    return title.to_string();
  }
  format!("AI Response – {}", chrono::Local::now().format("%Y-%m-%d %H:%M"))
}

fn truncate_chars(text: &str, max: usize) -> String {
  text.chars().take(max).collect()
}

/// Guess a media type from the file extension, the way a browser tags an
/// upload. Unknown extensions fall back to an opaque binary type.
pub fn mime_for_path(path: &Path) -> &'static str {
  let ext = path.extension().and_then(|e| e.to_str()).map(|e| e.to_ascii_lowercase());
  match ext.as_deref() {
    Some("pdf") => "application/pdf",
    Some("docx") => DOCX_MIME,
    Some("doc") => "application/msword",
    Some("txt") => "text/plain",
    _ => FALLBACK_MIME,
  }
}
