//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// Search for PDF documents and batch download them.
///
/// pdfgrab queries a search provider for PDFs matching a term, saves
/// the discovered links to a timestamped report, and (after
/// confirmation) downloads each file with validation and logging.
#[derive(Parser, Debug)]
#[command(name = "pdfgrab")]
#[command(author, version, about)]
pub struct Args {
    /// Search query (prompted for interactively when omitted)
    pub query: Option<String>,

    /// Number of results to retrieve (1-100; prompted for when omitted)
    #[arg(short = 'n', long, value_parser = clap::value_parser!(u8).range(1..=100))]
    pub count: Option<u8>,

    /// Search provider to use
    #[arg(short = 'p', long, value_enum, default_value_t = Provider::Api)]
    pub provider: Provider,

    /// Directory for downloaded PDF files
    #[arg(short = 'o', long, default_value = "downloaded_pdfs")]
    pub output_dir: PathBuf,

    /// Download without asking for confirmation
    #[arg(short = 'y', long)]
    pub yes: bool,

    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long)]
    pub quiet: bool,
}

/// Which search provider variant to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Provider {
    /// Authenticated Custom Search API (requires credentials)
    Api,
    /// Unauthenticated scraped web search
    Web,
}
