// src/cli.rs
// =============================================================================
// Command-line interface, built with clap's derive API.
//
// Subcommands:
// - crawl:    crawl a site and write its datasets
// - classify: print the role of some URLs under a site's route table
// - sites:    list the built-in site presets
// =============================================================================

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "statute-crawler",
    version,
    about = "Crawl statute websites and extract section text into datasets",
    long_about = "statute-crawler visits a statute website breadth-first, follows only the \
                  links its route table recognises, records chapter and part pages by URL \
                  and extracts section pages into JSON-Lines datasets."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Crawl a site and append its records to the datasets
    ///
    /// Example: statute-crawler crawl --site mn-statutes --max-requests 50
    Crawl {
        #[command(flatten)]
        site: SiteArgs,

        /// Start URL, replacing the site's own (repeatable)
        #[arg(long = "start-url", value_name = "URL")]
        start_urls: Vec<String>,

        /// Maximum number of pages to visit
        #[arg(long, default_value_t = 20)]
        max_requests: usize,

        /// Directory that receives datasets/<name>.jsonl
        #[arg(long, default_value = "storage")]
        storage: PathBuf,

        /// Pages rendered at the same time
        #[arg(long, default_value_t = 1)]
        concurrency: usize,

        /// Pause between page batches, in milliseconds
        #[arg(long, default_value_t = 100)]
        delay_ms: u64,

        /// Retries for a page that fails to load
        #[arg(long, default_value_t = 3)]
        retries: u32,

        /// Per-request timeout, in seconds
        #[arg(long, default_value_t = 30)]
        timeout_secs: u64,

        /// How long to wait for a section title, in milliseconds
        #[arg(long, default_value_t = 1000)]
        title_timeout_ms: u64,

        /// Delete datasets from earlier runs before crawling
        #[arg(long)]
        purge: bool,

        /// Print the run summary as JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Show which role each URL gets under a site's route table
    ///
    /// Example: statute-crawler classify --site mn-statutes https://www.revisor.mn.gov/statutes/cite/1.01
    Classify {
        #[command(flatten)]
        site: SiteArgs,

        /// URLs to classify
        #[arg(required = true)]
        urls: Vec<String>,
    },

    /// List the built-in site presets
    Sites,
}

/// Which site to use: a preset name or a JSON site file.
#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
pub struct SiteArgs {
    /// Built-in site preset (see `statute-crawler sites`)
    #[arg(long)]
    pub site: Option<String>,

    /// JSON site configuration file
    #[arg(long, value_name = "PATH")]
    pub site_file: Option<PathBuf>,
}
