//! `harvest-summarizer` — summarize harvested tool output into definition fragments.
//!
//! # Flow
//! 1. Parse CLI arguments ([`cli`]).
//! 2. Load the facet config ([`config::load_config`]).
//! 3. Read each harvested JSON document and run the summarizer for `--tool`.
//! 4. Render the requested report ([`report`]).
//! 5. Exit `0` (all documents summarized) or `1` (at least one failed).

mod cli;
mod report;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use cli::{Cli, ReportFormat};
use harvest_summarizer::config::load_config;
use harvest_summarizer::models::{Coordinates, Definition, Facets};
use harvest_summarizer::{summarize, Tool};

fn init_logger(verbose: bool) {
    let default_filter = if verbose {
        "harvest_summarizer=debug,info"
    } else {
        "harvest_summarizer=warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .compact(),
        )
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    let cwd = std::env::current_dir()?;
    let config = load_config(&cwd, cli.config.as_deref())?;
    let facets = (!cli.no_facets).then_some(&config.facets);
    let tool = Tool::from(cli.tool);

    let pb = if cli.files.len() > 1 && !cli.quiet {
        let pb = ProgressBar::new(cli.files.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template(
                    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}",
                )?
                .progress_chars("#>-"),
        );
        Some(pb)
    } else {
        None
    };

    let mut results: Vec<(PathBuf, Definition)> = Vec::new();
    let mut failures = 0;

    for path in &cli.files {
        match summarize_file(path, tool, &cli.coordinates, facets) {
            Ok(definition) => results.push((path.clone(), definition)),
            Err(err) => {
                failures += 1;
                let line = format!("  {} {}: {:#}", "✗".red(), path.display(), err);
                match &pb {
                    Some(pb) => pb.println(line),
                    None => eprintln!("{}", line),
                }
            }
        }
        if let Some(pb) = &pb {
            pb.inc(1);
        }
    }

    if let Some(pb) = pb {
        pb.finish_with_message("Done");
    }

    match cli.report {
        ReportFormat::Json => report::json::render(&results)?,
        ReportFormat::Terminal => {
            for (path, definition) in &results {
                report::terminal::render(definition, path, &cli.coordinates, cli.quiet)?;
            }
        }
    }

    if failures > 0 {
        std::process::exit(1);
    }

    Ok(())
}

fn summarize_file(
    path: &Path,
    tool: Tool,
    coordinates: &Coordinates,
    facets: Option<&Facets>,
) -> Result<Definition> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    let document: serde_json::Value = serde_json::from_str(&content)
        .with_context(|| format!("parsing {} as JSON", path.display()))?;
    let definition = summarize(tool, coordinates, &document, facets)
        .with_context(|| format!("summarizing {} as {} output", path.display(), tool))?;
    Ok(definition)
}
