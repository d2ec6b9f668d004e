use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::*;
use profile::Profile;

#[derive(Parser)]
#[command(name = "vereloop-profile")]
#[command(about = "Vereloop profile settings")]
#[command(version)]
struct Cli {
  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Show the saved full name
  Show,
  /// Save the full name used to fill application forms
  Set {
    /// Full name to store
    full_name: String,
  },
}

fn main() -> Result<()> {
  let cli = Cli::parse();

  match cli.command {
    Commands::Show => {
      let saved = profile::load()?;
      if saved.full_name.is_empty() {
        println!("No full name saved");
      } else {
        println!("{}", saved.full_name);
      }
    }
    Commands::Set { full_name } => {
      profile::save(&Profile { full_name })?;
      println!("{} Saved", "✓".green());
    }
  }

  Ok(())
}
