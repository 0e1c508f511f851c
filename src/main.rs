mod ai;
mod app;
mod cli;
mod config;
mod csv_io;
mod domain;
mod infrastructure;
mod tasks;

use anyhow::Result;
use clap::Parser;
use infrastructure::{directories, logging};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = cli::Cli::parse();
    let config = config::load_config()?;
    let paths = directories::ensure_directories(&config.directories)?;
    logging::init_tracing(&config, &paths, cli.verbose)?;

    let app = app::CategorizerApp::initialize(config, cli)?;
    app.run().await
}
