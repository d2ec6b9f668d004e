use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use vereloop::commands;

#[derive(Parser)]
#[command(name = "vereloop")]
#[command(
  about = "Vereloop - Resume Analysis Workbench\nLocal-first resume storage and AI-assisted job matching"
)]
#[command(version)]
struct Cli {
  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Analyze a resume against a job description
  Analyze {
    /// Resume file to upload (takes priority over --saved)
    #[arg(short, long)]
    file: Option<PathBuf>,
    /// Id of a previously saved resume
    #[arg(short, long)]
    saved: Option<i64>,
    /// Job description text
    #[arg(short, long, conflicts_with = "job_file")]
    job: Option<String>,
    /// Read the job description from a file
    #[arg(long)]
    job_file: Option<PathBuf>,
  },
  /// Manage saved resumes
  Resumes {
    #[command(subcommand)]
    action: ResumeAction,
  },
  /// Manage saved analysis responses
  Responses {
    #[command(subcommand)]
    action: ResponseAction,
  },
}

#[derive(Subcommand)]
enum ResumeAction {
  /// List saved resumes, most recently used first
  #[command(visible_alias = "ls")]
  List,
  /// Write a saved resume back out to a file
  Export {
    id: i64,
    /// Output path (defaults to the stored file name)
    #[arg(short, long)]
    out: Option<PathBuf>,
  },
  /// Delete a saved resume
  Delete {
    id: i64,
    /// Skip confirmation prompt
    #[arg(short, long)]
    force: bool,
  },
}

#[derive(Subcommand)]
enum ResponseAction {
  /// List saved responses, newest first
  #[command(visible_alias = "ls")]
  List,
  /// Print a saved response payload
  Show { id: i64 },
  /// Print the detail-view address for a response
  Open { id: i64 },
  /// Rename a saved response
  Rename { id: i64, label: String },
  /// Delete a saved response
  Delete {
    id: i64,
    /// Skip confirmation prompt
    #[arg(short, long)]
    force: bool,
  },
}

#[tokio::main]
async fn main() -> Result<()> {
  tracing_subscriber::fmt::init();

  let cli = Cli::parse();

  match cli.command {
    Commands::Analyze { file, saved, job, job_file } => {
      let job_description = match (job, job_file) {
        (Some(text), _) => text,
        (None, Some(path)) => std::fs::read_to_string(path)?,
        (None, None) => String::new(),
      };
      commands::analyze_resume(file, saved, job_description.trim().to_string()).await?;
    }
    Commands::Resumes { action } => match action {
      ResumeAction::List => commands::list_resumes()?,
      ResumeAction::Export { id, out } => commands::export_resume(id, out)?,
      ResumeAction::Delete { id, force } => commands::delete_resume(id, force)?,
    },
    Commands::Responses { action } => match action {
      ResponseAction::List => commands::list_responses()?,
      ResponseAction::Show { id } => commands::show_response(id)?,
      ResponseAction::Open { id } => commands::open_response(id)?,
      ResponseAction::Rename { id, label } => commands::rename_response(id, &label)?,
      ResponseAction::Delete { id, force } => commands::delete_response(id, force)?,
    },
  }

  Ok(())
}
