/*
 * main.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! citesort - Pandoc JSON filter reordering citation clusters

use std::fs::File;
use std::io::{self, BufReader, BufWriter};
use std::path::PathBuf;

use anyhow::{Context, Result};
use citesort::{FilterContext, run_filter};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "citesort")]
#[command(version, about = "Sort citation clusters in a Pandoc JSON document", long_about = None)]
struct Cli {
    /// Target format passed by pandoc (ignored)
    target_format: Option<String>,

    /// Read the document from FILE instead of stdin
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Write the document to FILE instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Directory bibliography paths are resolved against (defaults to the
    /// current directory)
    #[arg(long)]
    working_dir: Option<PathBuf>,
}

fn main() -> Result<()> {
    // stdout carries the document, so logs go to stderr
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_env("CITESORT_LOG")
                .unwrap_or_else(|_| "citesort=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();
    if let Some(format) = &cli.target_format {
        tracing::debug!(format = %format, "Target format");
    }

    let working_dir = match cli.working_dir {
        Some(dir) => dir,
        None => std::env::current_dir().context("Failed to determine current directory")?,
    };
    let mut ctx = FilterContext::new(working_dir);

    let reader: Box<dyn io::Read> = match &cli.input {
        Some(path) => Box::new(BufReader::new(
            File::open(path).with_context(|| format!("Failed to open {}", path.display()))?,
        )),
        None => Box::new(BufReader::new(io::stdin().lock())),
    };
    let writer: Box<dyn io::Write> = match &cli.output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("Failed to create {}", path.display()))?,
        )),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };

    let report = run_filter(reader, writer, &mut ctx)?;
    tracing::debug!(
        clusters = report.clusters,
        reordered = report.reordered,
        reference_lists = report.reference_lists,
        "Done"
    );
    Ok(())
}
