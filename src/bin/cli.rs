//! gol.gg Match Crawler CLI
//!
//! Every command exits zero; failures are reported through log lines.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use gol_crawler::{
    error::Result,
    models::Config,
    pipeline,
    utils::HttpFetcher,
};

/// gol-crawler - Tournament match list and game statistics crawler
#[derive(Parser, Debug)]
#[command(
    name = "gol-crawler",
    version,
    about = "Crawls gol.gg match lists and game statistics into datasets"
)]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long, default_value = "gol-crawler.toml", global = true)]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Crawl a tournament match list into a listing dataset
    List {
        /// Match list URL (default: site.listing_url)
        #[arg(long)]
        url: Option<String>,

        /// Listing dataset path (default: paths.listing_output)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Crawl game statistics for every match in a listing dataset
    Details {
        /// Listing dataset path (default: paths.listing_output)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Detail dataset path (default: paths.detail_output)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Skip matches already present in the output and merge into it
        #[arg(long)]
        resume: bool,
    },

    /// Collect game links from any page
    Links {
        #[arg(long)]
        url: String,

        #[arg(short, long)]
        output: PathBuf,
    },

    /// Run full pipeline: List → Details
    Pipeline,

    /// Validate the configuration file
    Validate,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    log::info!("gol-crawler starting...");

    let config = Config::load_or_default(&cli.config);
    if let Err(e) = run(cli.command, &config).await {
        log::error!("{}", e);
    }

    log::info!("Done!");
}

async fn run(command: Command, config: &Config) -> Result<()> {
    let listing_path = PathBuf::from(&config.paths.listing_output);
    let detail_path = PathBuf::from(&config.paths.detail_output);

    if !matches!(command, Command::Validate) {
        config.validate()?;
    }

    match command {
        Command::List { url, output } => {
            let fetcher = HttpFetcher::new(&config.crawler)?;
            let url = url.unwrap_or_else(|| config.site.listing_url.clone());
            let output = output.unwrap_or(listing_path);
            pipeline::run_listing(config, &fetcher, &url, &output).await?;
        }

        Command::Details {
            input,
            output,
            resume,
        } => {
            let fetcher = HttpFetcher::new(&config.crawler)?;
            let input = input.unwrap_or(listing_path);
            let output = output.unwrap_or(detail_path);
            pipeline::run_details(config, &fetcher, &input, &output, resume).await?;
        }

        Command::Links { url, output } => {
            let fetcher = HttpFetcher::new(&config.crawler)?;
            pipeline::run_links(config, &fetcher, &url, &output).await?;
        }

        Command::Pipeline => {
            let fetcher = HttpFetcher::new(&config.crawler)?;
            pipeline::run_pipeline(config, &fetcher, &listing_path, &detail_path).await?;
            log::info!("Pipeline complete!");
        }

        Command::Validate => pipeline::run_validate(config)?,
    }

    Ok(())
}
