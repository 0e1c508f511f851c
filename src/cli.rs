use std::path::PathBuf;

use clap::Parser;

/// Files password-manager logins into folders using a local Ollama model.
#[derive(Debug, Parser)]
#[command(name = "password-folders", version, long_about = None)]
pub struct Cli {
    /// CSV export to categorize
    #[arg(value_parser = existing_file)]
    pub csv_file: PathBuf,

    /// Show categorization without writing an output file
    #[arg(long)]
    pub dry_run: bool,

    /// Output file (default: <input>_categorized.csv next to the input)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Model to ask instead of OLLAMA_MODEL
    #[arg(long)]
    pub model: Option<String>,

    /// Ollama base URL instead of OLLAMA_HOST
    #[arg(long)]
    pub host: Option<String>,

    /// Do not check that the model is installed before starting
    #[arg(long)]
    pub skip_preflight: bool,

    /// Pull the model if the preflight check cannot find it
    #[arg(long, conflicts_with = "skip_preflight")]
    pub pull: bool,

    /// Verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

fn existing_file(raw: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(raw);
    if path.is_file() {
        Ok(path)
    } else {
        Err(format!("file {raw} does not exist"))
    }
}
