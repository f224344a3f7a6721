// src/pipeline/pipeline.rs

use std::path::Path;

use crate::error::Result;
use crate::models::{Config, CrawlSummary};
use crate::utils::PageFetcher;

use super::crawl::{detail_stage, run_listing};

/// Run the full pipeline: match list, then details for every listed match.
pub async fn run_pipeline(
    config: &Config,
    fetcher: &dyn PageFetcher,
    listing_output: &Path,
    detail_output: &Path,
) -> Result<CrawlSummary> {
    log::info!("[STEP 1/2] Listing - Discovering matches");
    let stubs = run_listing(config, fetcher, &config.site.listing_url, listing_output).await?;

    log::info!("[STEP 2/2] Details - Fetching game statistics");
    detail_stage(config, fetcher, stubs, detail_output, false).await
}
