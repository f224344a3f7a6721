// src/models/mod.rs

//! Domain models for the crawler application.
//!
//! This module contains all data structures used throughout the application,
//! organized by their primary purpose.

mod config;
mod detail;
mod record;
mod stub;

// Re-export all public types
pub use config::{
    Config, CrawlerConfig, DetailSelectors, ListingSelectors, PathsConfig, SiteConfig,
    parse_selector,
};
pub use detail::{MatchDetail, NOT_AVAILABLE, Stat, TeamSide, TeamStats};
pub use record::Record;
pub use stub::{MatchStub, STUB_COLUMNS};

use chrono::{DateTime, Utc};

/// Summary of one detail crawl run.
#[derive(Debug, Clone)]
pub struct CrawlSummary {
    /// Stubs considered
    pub total: usize,
    /// Detail pages fetched and extracted
    pub fetched: usize,
    /// Stubs skipped for a blank URL or because they were already detailed
    pub skipped: usize,
    /// Stubs whose fetch or extraction failed
    pub failed: usize,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl CrawlSummary {
    pub fn start(total: usize) -> Self {
        let now = Utc::now();
        Self {
            total,
            fetched: 0,
            skipped: 0,
            failed: 0,
            started_at: now,
            finished_at: now,
        }
    }

    pub fn elapsed_secs(&self) -> i64 {
        (self.finished_at - self.started_at).num_seconds()
    }
}
