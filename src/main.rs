// src/main.rs
// =============================================================================
// Entry point of the statute-crawler CLI.
//
// What happens here:
// 1. Install the tracing subscriber (RUST_LOG, default "info", on stderr)
// 2. Parse command-line arguments using clap
// 3. Dispatch to the subcommand handler
// 4. Exit with 0 on success, 2 on error
// =============================================================================

mod classify;
mod cli;
mod crawl;
mod error;
mod extract;
mod record;
mod render;
mod sink;
mod site;

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands, SiteArgs};
use crawl::{CrawlOptions, CrawlSummary, Crawler};
use render::{HttpRenderer, RendererOptions};
use sink::{Dataset, JsonlSink};
use site::Site;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();

    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

async fn run() -> Result<i32> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Crawl {
            site,
            start_urls,
            max_requests,
            storage,
            concurrency,
            delay_ms,
            retries,
            timeout_secs,
            title_timeout_ms,
            purge,
            json,
        } => {
            let mut site = load_site(&site)?;
            if !start_urls.is_empty() {
                site = site.with_start_urls(start_urls)?;
            }

            let renderer = HttpRenderer::new(RendererOptions {
                timeout: Duration::from_secs(timeout_secs),
                max_retries: retries,
                ..RendererOptions::default()
            })
            .context("could not build HTTP client")?;

            let options = CrawlOptions {
                concurrency,
                delay: Duration::from_millis(delay_ms),
                title_timeout: Duration::from_millis(title_timeout_ms),
            };

            handle_crawl(&site, &renderer, storage, max_requests, options, purge, json).await
        }
        Commands::Classify { site, urls } => {
            let site = load_site(&site)?;
            handle_classify(&site, &urls);
            Ok(0)
        }
        Commands::Sites => {
            handle_sites();
            Ok(0)
        }
    }
}

fn load_site(args: &SiteArgs) -> Result<Site> {
    let site = match (&args.site, &args.site_file) {
        (Some(name), _) => Site::from_preset(name)?,
        (None, Some(path)) => Site::from_file(path)?,
        (None, None) => anyhow::bail!("either --site or --site-file is required"),
    };
    Ok(site)
}

async fn handle_crawl(
    site: &Site,
    renderer: &HttpRenderer,
    storage: PathBuf,
    max_requests: usize,
    options: CrawlOptions,
    purge: bool,
    json: bool,
) -> Result<i32> {
    let sink = JsonlSink::open(&storage).await?;
    if purge {
        sink.purge().await?;
        info!("Purged datasets under {}", storage.display());
    }

    info!(
        "Crawling {} from {} start URL(s), budget {} page(s)",
        site.name(),
        site.start_urls().len(),
        max_requests
    );

    let crawler = Crawler::new(site, renderer, &sink, options);
    let summary = crawler.run(site.start_urls(), max_requests).await?;

    print_summary(&summary, &sink, json)?;
    Ok(0)
}

fn handle_classify(site: &Site, urls: &[String]) {
    let classifier = site.classifier();
    if classifier.is_empty() {
        println!("Site {} has no routes; only its start URLs are visited", site.name());
    }
    for url in urls {
        let role = classifier
            .classify(url)
            .map(|role| role.as_str())
            .unwrap_or("none");
        println!("{:<14} {}", role, url);
    }
}

fn handle_sites() {
    for (name, description) in site::PRESETS {
        println!("{:<14} {}", name, description);
        if let Some(config) = site::preset(name) {
            for url in &config.start_urls {
                println!("{:<14} start: {}", "", url);
            }
        }
    }
}

// Prints the run summary either as a table or JSON
fn print_summary(summary: &CrawlSummary, sink: &JsonlSink, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(summary)?);
    } else {
        print_table(summary, sink);
    }
    Ok(())
}

fn print_table(summary: &CrawlSummary, sink: &JsonlSink) {
    println!("{:<20} {:>8}", "ITEM", "COUNT");
    println!("{}", "=".repeat(29));
    println!("{:<20} {:>8}", "Pages visited", summary.visited);
    println!("{:<20} {:>8}", "  seed pages", summary.seeds);
    println!("{:<20} {:>8}", "Section records", summary.records);
    println!("{:<20} {:>8}", "  without title", summary.empty_records);
    println!("{:<20} {:>8}", "Chapters", summary.chapters);
    println!("{:<20} {:>8}", "Parts", summary.parts);
    println!("{:<20} {:>8}", "Failed pages", summary.failed);
    println!("{:<20} {:>8}", "Links queued", summary.enqueued);
    println!("{:<20} {:>8}", "Left unvisited", summary.unvisited);
    println!();

    println!("Datasets:");
    for dataset in Dataset::ALL {
        println!("   {:<10} {}", dataset.name(), sink.path(dataset).display());
    }
}
