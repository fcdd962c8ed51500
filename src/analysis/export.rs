use std::{
    fs,
    io::Write,
    path::{
        Path,
        PathBuf,
    },
};

use serde::{
    Deserialize,
    Serialize,
};
use tempfile::NamedTempFile;

use super::table::FrequencyTable;
use crate::core::DocFreqError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Json,
    Csv,
}

impl ExportFormat {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "json" => Some(ExportFormat::Json),
            "csv" => Some(ExportFormat::Csv),
            _ => None,
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Csv => "csv",
        }
    }
}

#[derive(Debug, Clone)]
pub struct ExportOptions {
    pub format: ExportFormat,
    pub pretty_json: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self { format: ExportFormat::Json, pretty_json: true }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    Written { path: PathBuf, entries: usize },
    /// Nothing to export; no file was touched.
    Skipped,
}

/// Writes `table` as an indented JSON object in table order.
pub fn export_json(
    table: &FrequencyTable,
    destination: &Path,
) -> Result<ExportOutcome, DocFreqError> {
    export_table(table, destination, &ExportOptions::default())
}

pub fn export_table(
    table: &FrequencyTable,
    destination: &Path,
    options: &ExportOptions,
) -> Result<ExportOutcome, DocFreqError> {
    if table.is_empty() {
        log::info!("No word frequency data to export");
        return Ok(ExportOutcome::Skipped);
    }

    let contents = match options.format {
        ExportFormat::Json => render_json(table, options.pretty_json)?,
        ExportFormat::Csv => render_csv(table),
    };

    write_replacing(destination, contents.as_bytes())?;

    log::info!(
        "{} file with word frequencies created: {}",
        options.format.extension().to_uppercase(),
        destination.display()
    );

    Ok(ExportOutcome::Written { path: destination.to_path_buf(), entries: table.len() })
}

pub fn render_json(table: &FrequencyTable, pretty: bool) -> Result<String, DocFreqError> {
    let json =
        if pretty { serde_json::to_string_pretty(table) } else { serde_json::to_string(table) }?;
    Ok(json)
}

pub fn render_csv(table: &FrequencyTable) -> String {
    let mut csv = String::from("Rank,Word,Frequency\n");
    for (entry, rank) in table.iter().zip(table.ranks()) {
        csv.push_str(&format!(
            "{},\"{}\",{}\n",
            rank,
            entry.word.replace('"', "\"\""),
            entry.count
        ));
    }
    csv
}

// Stages the bytes in the destination directory, then renames over the target,
// so readers see either the old file or the complete new one.
fn write_replacing(destination: &Path, bytes: &[u8]) -> Result<(), DocFreqError> {
    let write_error = |source: std::io::Error| DocFreqError::Write {
        path: destination.to_path_buf(),
        source,
    };

    if destination.as_os_str().is_empty() || destination.is_dir() {
        return Err(write_error(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            "destination is not a file path",
        )));
    }

    let directory = match destination.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    if !directory.is_dir() {
        return Err(write_error(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("directory {} does not exist", directory.display()),
        )));
    }

    let mut staged = NamedTempFile::new_in(&directory).map_err(write_error)?;
    staged.write_all(bytes).map_err(write_error)?;
    staged.flush().map_err(write_error)?;
    staged.persist(destination).map_err(|e| write_error(e.error))?;

    Ok(())
}

/// Reads a previously exported JSON document back into a table.
pub fn load_json(path: &Path) -> Result<FrequencyTable, DocFreqError> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}
