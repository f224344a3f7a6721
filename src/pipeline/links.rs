// src/pipeline/links.rs

use std::path::Path;

use scraper::Html;
use url::Url;

use crate::error::Result;
use crate::models::{Config, Record};
use crate::services::LinkDiscovery;
use crate::storage;
use crate::utils::PageFetcher;

/// Discover game links on `url` and write them as a one-column dataset.
pub async fn run_links(
    config: &Config,
    fetcher: &dyn PageFetcher,
    url: &str,
    output: &Path,
) -> Result<Vec<String>> {
    let page_url = Url::parse(url)?;
    let body = fetcher.fetch(url).await?;

    let discovery = LinkDiscovery::new(config)?;
    let links = discovery.discover(&Html::parse_document(&body), &page_url);

    let rows: Vec<Record> = links
        .iter()
        .map(|link| [("url", link.as_str())].into_iter().collect())
        .collect();
    storage::for_path(output).write_rows(&rows, output).await?;

    log::info!("Discovered {} game links on {}", links.len(), url);
    Ok(links)
}
