use std::collections::HashSet;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use tempfile::NamedTempFile;

use crate::domain::{Entry, Table};

pub fn read_table(path: &Path) -> Result<Table> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("failed to open {}", path.display()))?;
    let headers: Vec<String> = reader
        .headers()
        .with_context(|| format!("failed to read header row of {}", path.display()))?
        .iter()
        .map(str::to_string)
        .collect();
    // Entries are keyed by column name.
    let mut seen = HashSet::new();
    if let Some(duplicate) = headers.iter().find(|header| !seen.insert(header.as_str())) {
        bail!(
            "duplicate column {duplicate:?} in header of {}",
            path.display()
        );
    }

    let mut entries = Vec::new();
    for (index, record) in reader.records().enumerate() {
        let record = record
            .with_context(|| format!("failed to read row {} of {}", index + 1, path.display()))?;
        let entry: Entry = headers
            .iter()
            .map(String::as_str)
            .zip(record.iter())
            .collect();
        entries.push(entry);
    }

    tracing::info!(
        target: "csv",
        path = %path.display(),
        columns = headers.len(),
        rows = entries.len(),
        "input loaded"
    );
    Ok(Table::new(headers, entries))
}

/// Writes through a temporary sibling file so the destination is either fully
/// written or untouched.
pub fn write_table(path: &Path, table: &Table) -> Result<()> {
    let dir = path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let mut temp = NamedTempFile::new_in(dir)
        .with_context(|| format!("failed to create temporary file in {}", dir.display()))?;

    {
        let mut writer = csv::Writer::from_writer(&mut temp);
        writer.write_record(&table.headers)?;
        for entry in &table.entries {
            writer.write_record(
                table
                    .headers
                    .iter()
                    .map(|header| entry.get_or_empty(header)),
            )?;
        }
        writer.flush()?;
    }

    temp.persist(path)
        .map_err(|err| err.error)
        .with_context(|| format!("failed to write {}", path.display()))?;
    tracing::info!(target: "csv", path = %path.display(), rows = table.entries.len(), "output written");
    Ok(())
}

/// `<stem>_categorized.<ext>` next to the input; `csv` when there is no extension.
pub fn output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "entries".to_string());
    let extension = input
        .extension()
        .map(|ext| ext.to_string_lossy().into_owned())
        .unwrap_or_else(|| "csv".to_string());
    input.with_file_name(format!("{stem}_categorized.{extension}"))
}
