use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod backup;
mod config;
mod export;
mod files;
mod measurement;

#[derive(Debug, Parser)]
struct Cli {
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Write measurements read as JSON lines into a timestamped export file
    Export {
        #[arg(short, long, value_enum)]
        format: export::ExportFormat,

        /// JSON lines file; stdin when omitted
        input: Option<PathBuf>,

        /// Target directory; the app storage directory when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Copy a file into the export directory under a timestamped name
    Backup {
        src: PathBuf,

        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let cli = Cli::parse();

    let path = match cli.config.as_deref() {
        Some(x) => x,
        None => Path::new("config.toml"),
    };
    let config = config::load(path)?;

    match cli.command {
        Command::Export {
            format,
            input,
            output,
        } => {
            let path = export::run(&config, format, input.as_deref(), output.as_deref())?;
            println!("{}", path.display());
        }
        Command::Backup { src, output } => {
            let path = backup::run(&config, &src, output.as_deref())?;
            println!("{}", path.display());
        }
    };

    Ok(())
}
