//! Application configuration structures.

use std::fs;
use std::path::Path;

use scraper::Selector;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// HTTP and politeness settings
    #[serde(default)]
    pub crawler: CrawlerConfig,

    /// Source site locations
    #[serde(default)]
    pub site: SiteConfig,

    /// Match list page structure
    #[serde(default)]
    pub listing: ListingSelectors,

    /// Game detail page structure
    #[serde(default)]
    pub detail: DetailSelectors,

    /// Default dataset locations
    #[serde(default)]
    pub paths: PathsConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| AppError::config(format!("cannot read {}: {e}", path.display())))?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.crawler.user_agent.trim().is_empty() {
            return Err(AppError::validation("crawler.user_agent is empty"));
        }
        if self.crawler.timeout_secs == 0 {
            return Err(AppError::validation("crawler.timeout_secs must be > 0"));
        }
        if self.listing.min_cells == 0 {
            return Err(AppError::validation("listing.min_cells must be > 0"));
        }
        url::Url::parse(&self.site.base_url)
            .map_err(|e| AppError::validation(format!("site.base_url is invalid: {e}")))?;
        url::Url::parse(&self.site.listing_url)
            .map_err(|e| AppError::validation(format!("site.listing_url is invalid: {e}")))?;

        for selector in self.listing.selectors().into_iter().chain(self.detail.selectors()) {
            parse_selector(selector)?;
        }
        Ok(())
    }
}

/// Parse a CSS selector, mapping failures into [`AppError::Selector`].
pub fn parse_selector(s: &str) -> Result<Selector> {
    Selector::parse(s).map_err(|e| AppError::selector(s, format!("{e:?}")))
}

/// HTTP client and politeness settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlerConfig {
    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,

    /// Minimum delay between detail page requests in milliseconds
    #[serde(default = "defaults::request_delay")]
    pub request_delay_ms: u64,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
            request_delay_ms: defaults::request_delay(),
        }
    }
}

/// Source site locations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Base URL that stripped detail paths are appended to
    #[serde(default = "defaults::base_url")]
    pub base_url: String,

    /// Tournament match list crawled by default
    #[serde(default = "defaults::listing_url")]
    pub listing_url: String,

    /// Leading href segments used only for site navigation
    #[serde(default = "defaults::strip_segments")]
    pub strip_segments: usize,

    /// Substring identifying game links during link discovery
    #[serde(default = "defaults::link_marker")]
    pub link_marker: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::base_url(),
            listing_url: defaults::listing_url(),
            strip_segments: defaults::strip_segments(),
            link_marker: defaults::link_marker(),
        }
    }
}

/// Match list table layout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListingSelectors {
    #[serde(default = "defaults::listing_table")]
    pub table: String,
    #[serde(default = "defaults::listing_row")]
    pub row: String,
    #[serde(default = "defaults::listing_cell")]
    pub cell: String,
    #[serde(default = "defaults::listing_link")]
    pub link: String,

    /// Rows with fewer cells are skipped
    #[serde(default = "defaults::min_cells")]
    pub min_cells: usize,

    #[serde(default = "defaults::team1_col")]
    pub team1_col: usize,
    #[serde(default = "defaults::score_col")]
    pub score_col: usize,
    #[serde(default = "defaults::team2_col")]
    pub team2_col: usize,
    #[serde(default = "defaults::week_col")]
    pub week_col: usize,
    #[serde(default = "defaults::date_col")]
    pub date_col: usize,
}

impl ListingSelectors {
    fn selectors(&self) -> Vec<&str> {
        vec![
            self.table.as_str(),
            self.row.as_str(),
            self.cell.as_str(),
            self.link.as_str(),
        ]
    }
}

impl Default for ListingSelectors {
    fn default() -> Self {
        Self {
            table: defaults::listing_table(),
            row: defaults::listing_row(),
            cell: defaults::listing_cell(),
            link: defaults::listing_link(),
            min_cells: defaults::min_cells(),
            team1_col: defaults::team1_col(),
            score_col: defaults::score_col(),
            team2_col: defaults::team2_col(),
            week_col: defaults::week_col(),
            date_col: defaults::date_col(),
        }
    }
}

/// Game detail page layout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetailSelectors {
    /// Blocks scanned for the game time label
    #[serde(default = "defaults::duration_block")]
    pub duration_block: String,

    /// Label text identifying the game time block
    #[serde(default = "defaults::duration_label")]
    pub duration_label: String,

    /// Heading holding the game time inside its block
    #[serde(default = "defaults::duration_value")]
    pub duration_value: String,

    /// Per-team stat containers, team 1 first
    #[serde(default = "defaults::team_block")]
    pub team_block: String,

    #[serde(default = "defaults::score_box")]
    pub score_box: String,

    /// Column marker holding the "Bans"/"Picks" labels
    #[serde(default = "defaults::column_marker")]
    pub column_marker: String,

    /// Sibling following a column marker that holds the champion icons
    #[serde(default = "defaults::marker_sibling")]
    pub marker_sibling: String,

    /// Team block columns, shared with the bans/picks markers
    #[serde(default = "defaults::stat_column")]
    pub stat_column: String,

    /// Index of the stat column listing slain dragon types
    #[serde(default = "defaults::dragon_column")]
    pub dragon_column: usize,

    #[serde(default = "defaults::icon")]
    pub icon: String,

    /// Dragon icons inside the dragon stat column
    #[serde(default = "defaults::dragon_icon")]
    pub dragon_icon: String,
}

impl DetailSelectors {
    fn selectors(&self) -> Vec<&str> {
        vec![
            self.duration_block.as_str(),
            self.duration_value.as_str(),
            self.team_block.as_str(),
            self.score_box.as_str(),
            self.column_marker.as_str(),
            self.marker_sibling.as_str(),
            self.stat_column.as_str(),
            self.icon.as_str(),
            self.dragon_icon.as_str(),
        ]
    }
}

impl Default for DetailSelectors {
    fn default() -> Self {
        Self {
            duration_block: defaults::duration_block(),
            duration_label: defaults::duration_label(),
            duration_value: defaults::duration_value(),
            team_block: defaults::team_block(),
            score_box: defaults::score_box(),
            column_marker: defaults::column_marker(),
            marker_sibling: defaults::marker_sibling(),
            stat_column: defaults::stat_column(),
            dragon_column: defaults::dragon_column(),
            icon: defaults::icon(),
            dragon_icon: defaults::dragon_icon(),
        }
    }
}

/// Default dataset locations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    #[serde(default = "defaults::listing_output")]
    pub listing_output: String,

    #[serde(default = "defaults::detail_output")]
    pub detail_output: String,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            listing_output: defaults::listing_output(),
            detail_output: defaults::detail_output(),
        }
    }
}

mod defaults {
    // Crawler defaults
    pub fn user_agent() -> String {
        "Mozilla/5.0".into()
    }
    pub fn timeout() -> u64 {
        30
    }
    pub fn request_delay() -> u64 {
        1000
    }

    // Site defaults
    pub fn base_url() -> String {
        "https://gol.gg/game/".into()
    }
    pub fn listing_url() -> String {
        "https://gol.gg/tournament/tournament-matchlist/LTA%20South%202025%20Split%202/".into()
    }
    pub fn strip_segments() -> usize {
        2
    }
    pub fn link_marker() -> String {
        "game/stats".into()
    }

    // Listing defaults
    pub fn listing_table() -> String {
        "table.table_list".into()
    }
    pub fn listing_row() -> String {
        "tr".into()
    }
    pub fn listing_cell() -> String {
        "td".into()
    }
    pub fn listing_link() -> String {
        "a".into()
    }
    pub fn min_cells() -> usize {
        5
    }
    pub fn team1_col() -> usize {
        1
    }
    pub fn score_col() -> usize {
        2
    }
    pub fn team2_col() -> usize {
        3
    }
    pub fn week_col() -> usize {
        4
    }
    pub fn date_col() -> usize {
        6
    }

    // Detail defaults
    // Exact class attribute: blocks carrying extra classes are other widgets
    pub fn duration_block() -> String {
        r#"div[class="col-6 text-center"]"#.into()
    }
    pub fn duration_label() -> String {
        "Game Time".into()
    }
    pub fn duration_value() -> String {
        "h1".into()
    }
    pub fn team_block() -> String {
        r#"div[class="col-12 col-sm-6"]"#.into()
    }
    pub fn score_box() -> String {
        "span.score-box".into()
    }
    pub fn column_marker() -> String {
        "div.col-2".into()
    }
    pub fn marker_sibling() -> String {
        "div".into()
    }
    pub fn stat_column() -> String {
        "div.col-2".into()
    }
    pub fn dragon_column() -> usize {
        2
    }
    pub fn icon() -> String {
        "img".into()
    }
    pub fn dragon_icon() -> String {
        "img.champion_icon_XS".into()
    }

    // Path defaults
    pub fn listing_output() -> String {
        "data/raw/lta_south_matches.csv".into()
    }
    pub fn detail_output() -> String {
        "data/raw/detailed_matches.csv".into()
    }
}
