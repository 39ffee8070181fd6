//! jubelogs - landing page composer
//!
//! Loads a served page, runs the document-ready scripts against it and writes
//! the composed document.

use clap::{Parser, Subcommand};
use jubelogs::network::NetworkStack;
use jubelogs::utils::error::{FetchError, ParseError};
use jubelogs::{BlogEngine, Feed, NAME, Page, SiteConfig, VERSION};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::path::{Path, PathBuf};
use url::Url;

#[derive(Parser, Debug)]
#[command(name = "jubelogs", version)]
#[command(about = "Compose the jubelogs landing page", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Render a page with its feed and layout
    Render {
        /// Served page, as a file path or URL
        #[arg(long)]
        page: String,

        /// JSON feed with `posts` and `splashes`
        #[arg(long)]
        feed: PathBuf,

        /// URL the page is served from; defaults to the page location
        #[arg(long)]
        base_url: Option<String>,

        /// Site settings
        #[arg(long, default_value = "jubelogs.json")]
        config: PathBuf,

        /// Seed for the splash picker
        #[arg(long)]
        seed: Option<u64>,

        /// Output file; stdout when absent
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Render {
            page,
            feed,
            base_url,
            config,
            seed,
            output,
        } => {
            render(
                &page,
                &feed,
                base_url.as_deref(),
                &config,
                seed,
                output.as_deref(),
            )
            .await
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", NAME, e);
        std::process::exit(1);
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
    log::debug!("{} v{}", NAME, VERSION);
}

async fn render(
    page_location: &str,
    feed_path: &Path,
    base_url: Option<&str>,
    config_path: &Path,
    seed: Option<u64>,
    output: Option<&Path>,
) -> jubelogs::Result<()> {
    let config = SiteConfig::load(config_path)?;
    let feed = Feed::load(feed_path)?;
    let network = NetworkStack::new();

    let page_url = location_url(page_location)?;
    let markup = network.fetch_str(page_url.as_str()).await?;
    let base = match base_url {
        Some(url) => Url::parse(url)
            .map_err(|e| FetchError::InvalidUrl(format!("{url}: {e}")))?,
        None => page_url,
    };
    let markup = std::str::from_utf8(markup.body())
        .map_err(|e| ParseError::Encoding(e.to_string()))?;
    let mut page = Page::load(base, markup)?;

    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let engine = BlogEngine::with_fetcher(config, network);
    let report = engine.on_document_ready(&mut page, &feed, &mut rng).await?;
    if page.console().has_errors() {
        log::warn!("page rendered with errors: {:?}", report);
    }

    let html = page.to_html();
    match output {
        Some(path) => std::fs::write(path, html)?,
        None => println!("{}", html),
    }
    Ok(())
}

/// Accept either a URL or a filesystem path
fn location_url(location: &str) -> jubelogs::Result<Url> {
    if let Ok(url) = Url::parse(location) {
        return Ok(url);
    }
    let path = std::fs::canonicalize(location)?;
    Url::from_file_path(&path).map_err(|_| {
        FetchError::InvalidUrl(path.display().to_string()).into()
    })
}
