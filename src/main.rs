//! CLI entry point for the pdfgrab tool.

use std::io::IsTerminal;
use std::path::Path;

use anyhow::{Context, Result, bail};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use pdfgrab_core::{
    Credentials, CustomSearchClient, DownloadEngine, DownloadLog, LinkReport, MAX_API_RESULTS,
    PdfClient, SearchProvider, WebSearchClient, normalize_query,
};
use tracing::{debug, info, warn};

mod cli;
mod prompt;

use cli::{Args, Provider};

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments first (before tracing, so --help works without logs)
    let args = Args::parse();

    // Determine log level based on verbose/quiet flags
    // Priority: RUST_LOG env var > quiet flag > verbose flag > default (info)
    let default_level = if args.quiet {
        "error"
    } else {
        match args.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    tracing_subscriber::fmt().with_env_filter(filter).init();

    debug!(?args, "CLI arguments parsed");

    let interactive = std::io::stdin().is_terminal();

    // Build the selected search provider. Credentials are loaded before
    // any network activity; missing credentials halt the run here.
    let provider: Box<dyn SearchProvider> = match args.provider {
        Provider::Api => {
            let credentials = Credentials::from_env()
                .context("cannot use the Custom Search API without credentials")?;
            Box::new(CustomSearchClient::new(credentials))
        }
        Provider::Web => Box::new(WebSearchClient::new()),
    };

    // Query: flag, or interactive prompt. Empty input is an error.
    let raw_query = match args.query {
        Some(query) => query,
        None if interactive => prompt::read_line("Enter your search query: ")?,
        None => bail!("no search query provided (pass one as an argument, e.g. `pdfgrab \"machine learning\"`)"),
    };
    if raw_query.trim().is_empty() {
        bail!("search query cannot be empty");
    }

    let count = match args.count {
        Some(count) => usize::from(count),
        None if interactive => prompt::read_count(MAX_API_RESULTS)?,
        None => prompt::DEFAULT_RESULT_COUNT,
    };

    let query = normalize_query(&raw_query);
    info!(query = %query, count, provider = provider.name(), "searching");

    let urls = provider.search(&query, count).await?;

    if urls.is_empty() {
        info!("No PDF results found.");
        return Ok(());
    }
    info!(found = urls.len(), "search complete");

    // Record the discovered links before any download. A failure here is
    // terminal: without the report the run has no durable output yet.
    // The report carries the query as the user entered it; the appended
    // file-type restriction is provider plumbing.
    let report = LinkReport::new(raw_query.trim(), &urls);
    let report_path = report
        .write_to(Path::new("."))
        .context("failed to write the link report")?;
    info!(path = %report_path.display(), "PDF links saved");

    // Confirm before downloading. Non-interactive runs without --yes keep
    // the link report and skip the download step.
    let proceed = if args.yes {
        true
    } else if interactive {
        prompt::confirm("Do you want to download these PDFs? (yes/no): ")?
    } else {
        warn!("stdin is not a terminal and --yes was not passed; skipping downloads");
        false
    };

    if !proceed {
        info!("PDF links have been saved to a text file. You can download them later.");
        return Ok(());
    }

    std::fs::create_dir_all(&args.output_dir).with_context(|| {
        format!(
            "failed to create output directory {}",
            args.output_dir.display()
        )
    })?;

    let mut log =
        DownloadLog::create(Path::new("."), urls.len()).context("failed to create download log")?;

    let engine = DownloadEngine::new(PdfClient::new());

    let progress = ProgressBar::new(urls.len() as u64);
    progress.set_style(
        ProgressStyle::with_template("{bar:40} {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );

    let stats = engine
        .run(&urls, &args.output_dir, &mut log, |entry| {
            let label = if entry.outcome.is_success() {
                "downloaded"
            } else {
                "failed"
            };
            progress.set_message(format!("{label}: {}", entry.url));
            progress.inc(1);
        })
        .await
        .context("failed to append to the download log")?;
    progress.finish_and_clear();

    info!(
        succeeded = stats.succeeded(),
        failed = stats.failed(),
        total = stats.total(),
        log = %log.path().display(),
        "Download complete"
    );

    Ok(())
}
