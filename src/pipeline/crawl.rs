// src/pipeline/crawl.rs

//! Two-stage crawl: match list, then one detail page per match.
//!
//! Requests are issued one at a time and spaced by the configured delay.
//! A failure on one match is logged and the batch moves on.

use std::collections::HashSet;
use std::path::Path;

use scraper::Html;

use crate::error::{AppError, Result};
use crate::models::{Config, CrawlSummary, MatchDetail, MatchStub, Record};
use crate::services::{DetailExtractor, ListExtractor};
use crate::storage::{self, merge_by_key};
use crate::utils::url::game_id;
use crate::utils::{PageFetcher, Throttle};

/// Column used to match detail rows across runs.
const DETAIL_KEY: &str = "url";

/// Column that every extracted detail row carries, sentinel or not.
const DETAIL_MARKER: &str = "duration";

/// Fetch a match list and extract its stubs.
///
/// A missing listing table yields zero stubs; a failed fetch is an error
/// since there is nothing to iterate.
pub async fn crawl_listing(
    fetcher: &dyn PageFetcher,
    extractor: &ListExtractor,
    url: &str,
) -> Result<Vec<MatchStub>> {
    let body = fetcher.fetch(url).await?;
    match parse_listing(extractor, &body) {
        Ok(stubs) => Ok(stubs),
        Err(AppError::StructureNotFound(what)) => {
            log::warn!("No {} found at {}; treating as zero matches", what, url);
            Ok(Vec::new())
        }
        Err(e) => Err(e),
    }
}

fn parse_listing(extractor: &ListExtractor, body: &str) -> Result<Vec<MatchStub>> {
    extractor.extract(&Html::parse_document(body))
}

fn parse_detail(extractor: &DetailExtractor, body: &str) -> MatchDetail {
    extractor.extract(&Html::parse_document(body))
}

/// Fetch and extract each stub's detail page, in order.
///
/// Returns one merged record (stub fields followed by detail fields) per
/// successfully fetched match. A page answering with an error status keeps
/// its stub fields only; unreachable pages produce no record. Stubs without
/// a URL are skipped and do not consume a request slot.
pub async fn crawl_details(
    fetcher: &dyn PageFetcher,
    extractor: &DetailExtractor,
    stubs: &[MatchStub],
    throttle: &mut Throttle,
) -> (Vec<Record>, CrawlSummary) {
    let mut summary = CrawlSummary::start(stubs.len());
    let mut records = Vec::with_capacity(stubs.len());

    for (i, stub) in stubs.iter().enumerate() {
        let position = (i + 1, stubs.len());
        if let Some(record) = crawl_one(fetcher, extractor, stub, position, throttle, &mut summary).await {
            records.push(record);
        }
    }

    summary.finished_at = chrono::Utc::now();
    (records, summary)
}

/// Process a single stub, updating `summary`. `position` is `(index, total)`
/// for progress logging.
async fn crawl_one(
    fetcher: &dyn PageFetcher,
    extractor: &DetailExtractor,
    stub: &MatchStub,
    position: (usize, usize),
    throttle: &mut Throttle,
    summary: &mut CrawlSummary,
) -> Option<Record> {
    if !stub.has_url() {
        log::warn!("Skipping match {}: no detail URL", stub.sequence_id);
        summary.skipped += 1;
        return None;
    }

    throttle.wait().await;
    log::debug!(
        "[{}/{}] Fetching game {} ({})",
        position.0,
        position.1,
        game_id(&stub.detail_url).unwrap_or_default(),
        stub.detail_url
    );

    match fetcher.fetch(&stub.detail_url).await {
        Ok(body) => {
            let detail = parse_detail(extractor, &body);
            let mut record = stub.to_record();
            record.merge(detail.to_record());
            summary.fetched += 1;
            Some(record)
        }
        Err(e) => {
            summary.failed += 1;
            if e.is_recoverable() {
                log::warn!("Failed to process {}: {}", stub.detail_url, e);
            } else {
                log::error!("Failed to process {}: {}", stub.detail_url, e);
            }
            // an error status still yields the stub row; an unreachable page yields nothing
            matches!(e, AppError::Transport { .. }).then(|| stub.to_record())
        }
    }
}

/// Crawl a match list and persist its stubs to `output`.
pub async fn run_listing(
    config: &Config,
    fetcher: &dyn PageFetcher,
    url: &str,
    output: &Path,
) -> Result<Vec<MatchStub>> {
    log::info!("Crawling match list {}", url);

    let extractor = ListExtractor::new(config)?;
    let stubs = crawl_listing(fetcher, &extractor, url).await?;

    let rows: Vec<Record> = stubs.iter().map(MatchStub::to_record).collect();
    storage::for_path(output).write_rows(&rows, output).await?;

    log::info!("Found {} matches", stubs.len());
    Ok(stubs)
}

/// Crawl details for a persisted match list.
///
/// With `resume`, matches already detailed in `output` are skipped and the
/// new rows are merged into the existing dataset by URL. Rows left without
/// detail fields by an earlier failed fetch are crawled again.
pub async fn run_details(
    config: &Config,
    fetcher: &dyn PageFetcher,
    input: &Path,
    output: &Path,
    resume: bool,
) -> Result<CrawlSummary> {
    if !tokio::fs::try_exists(input).await? {
        return Err(AppError::crawl(
            input.display().to_string(),
            "listing dataset not found, run `list` first",
        ));
    }

    let rows = storage::for_path(input).read_rows(input).await?;
    let stubs: Vec<MatchStub> = rows
        .iter()
        .enumerate()
        .map(|(i, row)| MatchStub::from_record(row, i + 1))
        .collect();

    log::info!("Loaded {} matches from {}", stubs.len(), input.display());
    detail_stage(config, fetcher, stubs, output, resume).await
}

/// Run the detail stage over `stubs` and write the results to `output`.
///
/// The dataset is rewritten after every record, so an interrupted run leaves
/// all completed matches on disk for a later `resume`.
pub(crate) async fn detail_stage(
    config: &Config,
    fetcher: &dyn PageFetcher,
    stubs: Vec<MatchStub>,
    output: &Path,
    resume: bool,
) -> Result<CrawlSummary> {
    let sink = storage::for_path(output);
    let existing = if resume {
        sink.read_existing(output).await?
    } else {
        Vec::new()
    };

    let (pending, already_done): (Vec<MatchStub>, Vec<MatchStub>) = {
        let done: HashSet<&str> = existing
            .iter()
            .filter(|row| is_detailed(row))
            .filter_map(|row| row.get(DETAIL_KEY))
            .collect();
        stubs
            .into_iter()
            .partition(|stub| !done.contains(stub.key().as_str()))
    };
    if !already_done.is_empty() {
        log::info!("Resuming: {} matches already detailed", already_done.len());
    }

    let extractor = DetailExtractor::new(config)?;
    let mut throttle = Throttle::from_millis(config.crawler.request_delay_ms);
    let mut summary = CrawlSummary::start(pending.len() + already_done.len());
    summary.skipped += already_done.len();

    let mut rows = existing;
    for (i, stub) in pending.iter().enumerate() {
        let position = (i + 1, pending.len());
        if let Some(record) = crawl_one(fetcher, &extractor, stub, position, &mut throttle, &mut summary).await {
            rows = merge_by_key(rows, vec![record], DETAIL_KEY);
            sink.write_rows(&rows, output).await?;
        }
    }
    summary.finished_at = chrono::Utc::now();

    // covers runs that produced no record
    sink.write_rows(&rows, output).await?;

    log::info!(
        "Detail crawl finished in {}s: {} fetched, {} skipped, {} failed of {}",
        summary.elapsed_secs(),
        summary.fetched,
        summary.skipped,
        summary.failed,
        summary.total
    );
    Ok(summary)
}

/// Whether a persisted row holds extracted detail fields.
fn is_detailed(row: &Record) -> bool {
    row.get(DETAIL_MARKER).is_some_and(|value| !value.is_empty())
}
