//! Document-to-text extraction for word-processor resumes.

use anyhow::{anyhow, Result};
use docx_rs::{read_docx, DocumentChild, ParagraphChild, RunChild};

/// Extract plain text from a DOCX binary, one paragraph per line.
pub fn docx_to_text(data: &[u8]) -> Result<String> {
  let docx = read_docx(data).map_err(|e| anyhow!("could not read docx: {e:?}"))?;

  let mut text = String::new();
  for child in docx.document.children {
    if let DocumentChild::Paragraph(paragraph) = child {
      for child in paragraph.children {
        if let ParagraphChild::Run(run) = child {
          for child in run.children {
            if let RunChild::Text(t) = child {
              text.push_str(&t.text);
            }
          }
        }
      }
      text.push('\n');
    }
  }

  Ok(text.trim().to_string())
}
