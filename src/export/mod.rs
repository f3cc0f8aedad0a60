//! Turns recorded measurements into export files.
//!
//! Measurements arrive as JSON lines on stdin or from a file, standing in
//! for whatever store the collector keeps them in.

use std::{
    fs::File,
    io::{self, BufRead, BufReader, BufWriter, Write},
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use clap::ValueEnum;
use tracing::{info, warn};

use crate::{config::Config, files, measurement::Measurement};

mod csv;
mod json;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    fn extension(self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }
}

pub fn run(
    config: &Config,
    format: ExportFormat,
    input: Option<&Path>,
    output: Option<&Path>,
) -> Result<PathBuf> {
    let measurements = match input {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("Failed to open {}", path.display()))?;
            load(BufReader::new(file))?
        }
        None => load(io::stdin().lock())?,
    };

    let dir = match output {
        Some(x) => x.to_path_buf(),
        None => config.app_dir(),
    };
    let path = files::combine_path(&dir, files::current_file_name("", format.extension()));
    files::check_access(&path)?;

    let file = File::create(&path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    match format {
        ExportFormat::Csv => csv::write(&mut writer, &measurements)?,
        ExportFormat::Json => json::write(&mut writer, &measurements)?,
    }
    writer.flush()?;

    info!(
        "exported {} measurements to {}",
        measurements.len(),
        path.display()
    );
    Ok(path)
}

fn load(reader: impl BufRead) -> Result<Vec<Measurement>> {
    let mut output = Vec::new();
    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let measurement: Measurement = serde_json::from_str(&line)?;
        if measurement.cells.is_empty() {
            // never persisted or exported without a cell
            warn!(
                "skipping measurement at {} with no cells",
                measurement.measured_at
            );
            continue;
        }
        output.push(measurement);
    }
    Ok(output)
}
