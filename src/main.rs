mod client;
mod config;
mod error;
mod logging;
mod news;
mod scraper;
mod utils;

use crate::client::Client;
use crate::config::Config;
use crate::error::{ClientError, Result};
use crate::logging::{init_logging, LoggerConfig};
use crate::news::{
    Article, DownloadManager, DownloadOutcome, NewsSite, PassKind, TableOfContents, WebResource,
};
use clap::{Parser, Subcommand};
use rayon::prelude::*;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "gazet-scraper", version, about = "Scrapes news articles into readable text")]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Download the front page and list the articles it links to
    Toc,
    /// Download the front page and then the articles it links to
    Articles {
        /// Overrides download.max_articles
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// Scrape article pages saved by an earlier run
    Offline {
        /// Directory with saved pages, defaults to output.html_dir
        dir: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_found = cli.config.exists();
    let config = if config_found {
        Config::from_file(&cli.config)?
    } else {
        Config::default()
    };

    init_logging(LoggerConfig::from_log_config(&config.logging)?)?;
    if !config_found {
        log_warn!("[main] No config at {:?}, using defaults", cli.config);
    }

    let site = NewsSite::from_config(&config);
    log_info!(
        "[main] Scraping {} ({}) from {}",
        site.name(),
        site.locale(),
        site.toc_url()
    );

    match cli.command {
        Command::Toc => {
            let toc = download_toc(&config, &site).await?;
            for entry in &toc.entries {
                log_info!("[main] {} -> {}", entry.text, entry.url);
            }
        }
        Command::Articles { limit } => {
            let limit = limit.unwrap_or(config.download.max_articles);
            download_articles(&config, &site, limit).await?;
        }
        Command::Offline { dir } => {
            let dir = dir.unwrap_or_else(|| PathBuf::from(&config.output.html_dir));
            process_snapshots(&config, &site, &dir)?;
        }
    }

    log_info!("[main] Completed successfully");
    Ok(())
}

async fn download_toc(config: &Config, site: &NewsSite) -> Result<TableOfContents> {
    let client = Client::for_site(config)?;
    let mut manager = DownloadManager::new(
        client,
        site.clone(),
        PassKind::TableOfContents,
        config.download.clone(),
    )
    .with_snapshots(&config.output.html_dir);

    manager.schedule(site.table_of_contents());
    let outcome = manager.run().await.into_iter().next();

    match outcome {
        Some(DownloadOutcome::Completed(resource)) => {
            let toc = TableOfContents::from_resource(&resource);
            let path = Path::new(&config.output.json_dir).join("table_of_contents.json");
            utils::save_json(&toc, &path)?;
            log_info!(
                "[main] Found {} articles, saved to {:?}",
                toc.entries.len(),
                path
            );
            Ok(toc)
        }
        Some(DownloadOutcome::Failed { message, .. }) => {
            Err(ClientError::RequestFailed(message).into())
        }
        None => Err(ClientError::RequestFailed(format!(
            "{} was not downloaded",
            site.toc_url()
        ))
        .into()),
    }
}

async fn download_articles(config: &Config, site: &NewsSite, limit: usize) -> Result<()> {
    let toc = download_toc(config, site).await?;

    let client = Client::for_site(config)?;
    let mut manager =
        DownloadManager::new(client, site.clone(), PassKind::Article, config.download.clone())
            .with_snapshots(&config.output.html_dir);

    for article in toc.articles().into_iter().take(limit) {
        if let Some(outcome) = manager.schedule(article) {
            save_article(config, outcome.resource())?;
        }
    }
    log_info!("[main] Downloading {} articles", manager.pending());

    for outcome in manager.run().await {
        match outcome {
            DownloadOutcome::Completed(resource) => save_article(config, &resource)?,
            DownloadOutcome::Failed { resource, message } => {
                log_error!("[main] Skipping {}: {}", resource.url(), message);
            }
        }
    }

    manager.stats().print_report();
    Ok(())
}

fn process_snapshots(config: &Config, site: &NewsSite, dir: &Path) -> Result<()> {
    let files = utils::read_html_files(dir)?;
    if files.is_empty() {
        log_error!("[main] No HTML files found in {:?}", dir);
        return Ok(());
    }
    log_info!("[main] Processing {} saved pages from {:?}", files.len(), dir);

    let results: Vec<(PathBuf, Result<WebResource>)> = files
        .par_iter()
        .map(|(path, html)| {
            let mut resource = WebResource::new(path.to_string_lossy());
            let result = site
                .scrape(PassKind::Article, html, &mut resource)
                .map(|_| resource);
            (path.clone(), result)
        })
        .collect();

    for (path, result) in results {
        match result {
            Ok(resource) if resource.has_content() => save_article(config, &resource)?,
            Ok(_) => log_warn!("[main] No article text in {:?}", path),
            Err(e) => log_error!(&e => "[main] Failed to process {:?}", path),
        }
    }

    Ok(())
}

fn save_article(config: &Config, resource: &WebResource) -> Result<()> {
    let article = Article::from_resource(resource);
    let path = Path::new(&config.output.json_dir)
        .join(format!("{}.json", utils::slug_for_url(resource.url())));

    utils::save_json(&article, &path)?;
    log_info!(
        "[main] Saved {} paragraphs to {:?}",
        article.paragraphs.len(),
        path
    );
    Ok(())
}
