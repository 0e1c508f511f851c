use std::path::Path;

use anyhow::{bail, Result};

use crate::{
    ai::OllamaClient,
    cli::Cli,
    config::{validate_host, validate_model, AppConfig},
    csv_io,
    domain::{Category, Entry, Table},
    infrastructure::notifier::{Diagnostics, TracingDiagnostics},
    tasks::{verify, Categorizer},
};

pub struct CategorizerApp {
    cli: Cli,
    config: AppConfig,
    client: OllamaClient,
}

impl CategorizerApp {
    pub fn initialize(mut config: AppConfig, cli: Cli) -> Result<Self> {
        if let Some(host) = cli.host.as_deref() {
            config.ollama.host = validate_host(host)?;
        }
        if let Some(model) = cli.model.as_deref() {
            config.ollama.model = validate_model(model)?;
        }

        let client = OllamaClient::from_config(config.ollama.clone())?;
        Ok(Self {
            cli,
            config,
            client,
        })
    }

    pub async fn run(self) -> Result<()> {
        let CategorizerApp {
            cli,
            config,
            client,
        } = self;

        let table = csv_io::read_table(&cli.csv_file)?;
        tracing::info!(
            target: "app",
            model = %config.ollama.model,
            host = %client.base_url(),
            rows = table.entries.len(),
            dry_run = cli.dry_run,
            "categorizing entries"
        );

        if !cli.skip_preflight && !table.entries.is_empty() {
            preflight(&client, &config.ollama.model, cli.pull).await;
        }

        let diagnostics = TracingDiagnostics;
        let categorizer = Categorizer::new(client, config.ollama.model.clone(), diagnostics);
        let labeled = categorizer.run(&table.entries).await;

        if cli.dry_run {
            for line in dry_run_lines(&labeled) {
                println!("{line}");
            }
            return Ok(());
        }

        let output = cli
            .output
            .clone()
            .unwrap_or_else(|| csv_io::output_path(&cli.csv_file));
        write_verified(&table, labeled, &output, &diagnostics)?;
        println!("Categorized entries written to {}", output.display());
        Ok(())
    }
}

/// Writes the labeled rows only when they still match the input; otherwise
/// nothing is persisted.
pub fn write_verified<D: Diagnostics>(
    table: &Table,
    labeled: Vec<Entry>,
    output: &Path,
    diagnostics: &D,
) -> Result<()> {
    if !verify(&table.entries, &labeled, diagnostics) {
        diagnostics.report("Aborting due to data verification failure.");
        bail!("data verification failed; {} was not written", output.display());
    }

    let categorized = Table::new(table.output_headers(), labeled);
    csv_io::write_table(output, &categorized)
}

pub fn dry_run_lines(labeled: &[Entry]) -> Vec<String> {
    labeled
        .iter()
        .map(|entry| {
            format!(
                "{} ({}) -> {}",
                entry.name(),
                entry.login_uri(),
                entry.folder().unwrap_or(Category::NoFolder.label())
            )
        })
        .collect()
}

/// Best effort: an unreachable server or a missing model only warns, since
/// every entry already degrades to the sentinel on its own.
async fn preflight(client: &OllamaClient, model: &str, pull: bool) {
    match client.list_models().await {
        Ok(models) if model_installed(&models, model) => {
            tracing::debug!(target: "app", model, "model is installed");
        }
        Ok(_) if pull => {
            tracing::info!(target: "app", model, "model not installed; pulling");
            if let Err(err) = client.pull_model(model).await {
                tracing::warn!(target: "app", model, error = %err, "failed to pull model");
            }
        }
        Ok(_) => {
            tracing::warn!(
                target: "app",
                model,
                "model is not installed; rerun with --pull or run `ollama pull {model}`"
            );
        }
        Err(err) => {
            tracing::warn!(target: "app", error = %err, "could not list Ollama models");
        }
    }
}

/// Ollama lists untagged models as `<name>:latest`.
fn model_installed(models: &[String], model: &str) -> bool {
    models.iter().any(|name| {
        name == model || (!model.contains(':') && name.strip_prefix(model) == Some(":latest"))
    })
}
