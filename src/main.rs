//! brand-scraper: scrape the built-in sites and write `data.json`.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::{info, warn};

use brand_scraper::{sites, write_document, AssetMaterializer, Config, HttpFetcher};

#[derive(Parser)]
#[command(
    name = "brand-scraper",
    about = "Extract company names, logos and partner logos from known sites",
    version
)]
struct Cli {
    /// JSON config file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output document path.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Directory for downloaded logos.
    #[arg(long)]
    assets: Option<PathBuf>,

    /// Only scrape sites with this name (repeatable).
    #[arg(long = "site")]
    sites: Vec<String>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let mut config = match &cli.config {
        Some(path) => Config::load(path).with_context(|| format!("loading {}", path.display()))?,
        None => Config::default(),
    };
    if let Some(output) = cli.output {
        config.output_path = output;
    }
    if let Some(assets) = cli.assets {
        config.asset_root = assets;
    }

    let registry: Vec<_> = sites::registry()?
        .into_iter()
        .filter(|site| cli.sites.is_empty() || cli.sites.iter().any(|s| s.eq_ignore_ascii_case(site.name())))
        .collect();
    if registry.is_empty() {
        warn!(requested = ?cli.sites, "no matching sites");
    }

    let fetcher = HttpFetcher::new(&config.fetch);
    let mut records = Vec::with_capacity(registry.len());
    for site in &registry {
        info!(site = site.name(), url = site.url(), "scraping");
        records.push(site.scrape(&fetcher));
        info!(site = site.name(), "finished");
    }

    let materializer = AssetMaterializer::new(&fetcher, &config.asset_root);
    write_document(&records, &materializer, &config.output_path)
        .with_context(|| format!("writing {}", config.output_path.display()))?;

    info!(
        sites = records.len(),
        output = %config.output_path.display(),
        "scrape complete"
    );
    Ok(())
}
