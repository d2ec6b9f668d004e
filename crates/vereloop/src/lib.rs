//! Vereloop - Resume Analysis Workbench
//!
//! Local-first storage for resumes and AI analysis responses, plus the
//! orchestration that submits a resume and job description to the remote
//! analysis endpoint.

pub mod analyze;
pub mod client;
pub mod commands;
pub mod extract;
pub mod records;
pub mod store;
pub mod util;
