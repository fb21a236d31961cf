//! Command-line front-end for an anthology
//!
//! `render` performs one page load and writes the HTML page, `entries` lists
//! what the document contains, `sitemap` writes an XML sitemap of the entry
//! links, and `serve` turns every HTTP request into a page load.

use anthology_core::{
    ConfigLoader, DocumentSource, EntryList, EntryLoader, FileSource, HttpSource, LoadError,
    PageView, Sitemap, SourceConfig, DEFAULT_SITE_URL,
};
use anthology_server::{shutdown_signal, AnthologyServer, ServerConfig};
use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};
use clap::{Parser, Subcommand};
use log::LevelFilter;
use std::path::PathBuf;

const PREVIEW_CHARS: usize = 72;

#[derive(Parser, Debug)]
#[clap(name = "anthology", author, version, about = "Render a plain-text anthology as a web page")]
struct Cli {
    #[clap(subcommand)]
    command: Commands,

    #[clap(
        long,
        short,
        global = true,
        help = "Source configuration: YAML file path or github:owner/repo@branch/path"
    )]
    config: Option<String>,

    #[clap(long, short, global = true, default_value = "info")]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Load the anthology once and write the HTML page
    Render {
        #[clap(long, short, help = "Zero-based entry to show; anything else shows all entries")]
        entry: Option<String>,

        #[clap(long, short, help = "Write the page here instead of stdout")]
        output: Option<PathBuf>,

        #[clap(long, help = "Read the document from a local file instead of fetching it")]
        input: Option<PathBuf>,
    },
    /// List entry indices with a short preview
    Entries {
        #[clap(long, help = "Read the document from a local file instead of fetching it")]
        input: Option<PathBuf>,
    },
    /// Write an XML sitemap with the index page and one URL per entry
    Sitemap {
        #[clap(long, default_value = DEFAULT_SITE_URL, help = "Public URL of the published page")]
        base_url: String,

        #[clap(long, short, help = "Write the sitemap here instead of stdout")]
        output: Option<PathBuf>,

        #[clap(long, help = "Read the document from a local file instead of fetching it")]
        input: Option<PathBuf>,

        #[clap(long, help = "Last modification date (YYYY-MM-DD); defaults to today in UTC")]
        lastmod: Option<NaiveDate>,
    },
    /// Serve the page over HTTP, one load per request
    Serve {
        #[clap(long, default_value = "127.0.0.1:3002")]
        bind_addr: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level_filter = cli.log_level.parse().unwrap_or(LevelFilter::Info);
    env_logger::Builder::new()
        .filter_level(log_level_filter)
        .init();

    let config = load_config(cli.config.as_deref()).await?;
    log::debug!("Using source {}", config.raw_file_url());

    match cli.command {
        Commands::Render {
            entry,
            output,
            input,
        } => render(&config, entry.as_deref(), output, input).await,
        Commands::Entries { input } => list_entries(&config, input).await,
        Commands::Sitemap {
            base_url,
            output,
            input,
            lastmod,
        } => {
            let lastmod = lastmod.unwrap_or_else(|| Utc::now().date_naive());
            write_sitemap(&config, &base_url, lastmod, output, input).await
        }
        Commands::Serve { bind_addr } => serve(config, &bind_addr).await,
    }
}

async fn load_config(source: Option<&str>) -> Result<SourceConfig> {
    let config = match source {
        Some(source) => {
            log::info!("Loading configuration from: {}", source);
            ConfigLoader::from_source(source).await?
        }
        None => ConfigLoader::from_defaults()?,
    };
    Ok(config)
}

async fn load_entries(config: &SourceConfig, input: Option<PathBuf>) -> Result<EntryList, LoadError> {
    match input {
        Some(path) => load_with(FileSource::new(path)).await,
        None => load_with(HttpSource::new(config)?).await,
    }
}

async fn load_with<S: DocumentSource>(source: S) -> Result<EntryList, LoadError> {
    EntryLoader::new(source).load().await
}

async fn render(
    config: &SourceConfig,
    entry: Option<&str>,
    output: Option<PathBuf>,
    input: Option<PathBuf>,
) -> Result<()> {
    let outcome = load_entries(config, input).await;
    let page = PageView::from_outcome(config, &outcome, entry);
    let html = page.to_html();

    match output {
        Some(path) => {
            tokio::fs::write(&path, &html)
                .await
                .with_context(|| format!("Failed to write page to {}", path.display()))?;
            log::info!("Wrote page to {}", path.display());
        }
        None => print!("{}", html),
    }

    // The error page is still written; the exit status reports the failure.
    outcome.map(|_| ()).map_err(|e| {
        anyhow::anyhow!(
            "Error loading content from {} on branch '{}': {}",
            config.file_path,
            config.branch,
            e
        )
    })
}

async fn list_entries(config: &SourceConfig, input: Option<PathBuf>) -> Result<()> {
    let entries = load_entries(config, input).await.with_context(|| {
        format!(
            "Error loading content from {} on branch '{}'",
            config.file_path, config.branch
        )
    })?;

    for (index, entry) in entries.iter().enumerate() {
        println!("{:>4}  {}", index, entry.preview(PREVIEW_CHARS));
    }
    if let Some(last) = entries.last_index() {
        println!("{} entries, last entry: ?entry={}", entries.len(), last);
    }
    Ok(())
}

async fn write_sitemap(
    config: &SourceConfig,
    base_url: &str,
    lastmod: NaiveDate,
    output: Option<PathBuf>,
    input: Option<PathBuf>,
) -> Result<()> {
    let entries = load_entries(config, input).await.with_context(|| {
        format!(
            "Error loading content from {} on branch '{}'",
            config.file_path, config.branch
        )
    })?;

    let sitemap = Sitemap::for_entries(base_url, &entries, Some(lastmod));
    let xml = sitemap.to_xml();

    match output {
        Some(path) => {
            tokio::fs::write(&path, &xml)
                .await
                .with_context(|| format!("Failed to write sitemap to {}", path.display()))?;
            log::info!(
                "Sitemap generated with {} URLs: {}",
                sitemap.urls().len(),
                path.display()
            );
        }
        None => print!("{}", xml),
    }
    Ok(())
}

async fn serve(config: SourceConfig, bind_addr: &str) -> Result<()> {
    let server_config = ServerConfig::default()
        .with_bind_addr_str(bind_addr)?
        .with_logging(true);

    let server = AnthologyServer::from_source_config(config)?.with_config(server_config);

    if let Err(e) = server.serve_with_shutdown(shutdown_signal()).await {
        log::error!("Server failed: {}", e);
        return Err(e.into());
    }
    Ok(())
}
