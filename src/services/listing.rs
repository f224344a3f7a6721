// src/services/listing.rs

//! Tournament match list extraction.
//!
//! Turns the match list table into ordered [`MatchStub`]s. Malformed rows are
//! skipped silently; only a missing table is reported.

use scraper::{ElementRef, Html, Selector};

use crate::error::{AppError, Result};
use crate::models::{Config, ListingSelectors, MatchStub, parse_selector};
use crate::utils::element_text;
use crate::utils::url::detail_url;

/// Extracts match stubs from a tournament match list page.
pub struct ListExtractor {
    table: Selector,
    row: Selector,
    cell: Selector,
    link: Selector,
    layout: ListingSelectors,
    base_url: String,
    strip_segments: usize,
}

impl ListExtractor {
    /// Create an extractor from the configured listing layout.
    pub fn new(config: &Config) -> Result<Self> {
        let layout = config.listing.clone();
        Ok(Self {
            table: parse_selector(&layout.table)?,
            row: parse_selector(&layout.row)?,
            cell: parse_selector(&layout.cell)?,
            link: parse_selector(&layout.link)?,
            layout,
            base_url: config.site.base_url.clone(),
            strip_segments: config.site.strip_segments,
        })
    }

    /// Extract stubs in table row order.
    ///
    /// Returns [`AppError::StructureNotFound`] when the listing table is
    /// absent; callers treat that as zero matches.
    pub fn extract(&self, document: &Html) -> Result<Vec<MatchStub>> {
        let table = document
            .select(&self.table)
            .next()
            .ok_or_else(|| AppError::structure(format!("listing table ({})", self.layout.table)))?;

        // ids count every data row, so a skipped row still consumes its id
        let stubs: Vec<MatchStub> = table
            .select(&self.row)
            .skip(1) // header
            .enumerate()
            .filter_map(|(i, row)| {
                self.parse_row(&row).map(|stub| MatchStub {
                    sequence_id: i + 1,
                    ..stub
                })
            })
            .collect();

        log::debug!("Listing table yielded {} match stubs", stubs.len());
        Ok(stubs)
    }

    /// Parse one data row; `None` for rows that are short or lack a usable link.
    fn parse_row(&self, row: &ElementRef) -> Option<MatchStub> {
        let cells: Vec<ElementRef> = row.select(&self.cell).collect();
        if cells.len() < self.layout.min_cells {
            return None;
        }

        let text = |col: usize| cells.get(col).map(element_text).unwrap_or_default();

        let href = cells
            .first()?
            .select(&self.link)
            .next()
            .and_then(|a| a.value().attr("href"))?;
        let detail_url = detail_url(&self.base_url, href, self.strip_segments)?;

        let (wins1, wins2) = split_score(&text(self.layout.score_col));

        Some(MatchStub {
            sequence_id: 0,
            team1: text(self.layout.team1_col),
            team2: text(self.layout.team2_col),
            wins1,
            wins2,
            week: last_char(&text(self.layout.week_col)),
            date: text(self.layout.date_col),
            detail_url,
        })
    }
}

/// Split a combined score by position: first and last character.
///
/// `"2-0"` gives `("2", "0")`; a single character appears on both sides.
pub fn split_score(score: &str) -> (String, String) {
    let first = score.chars().next().map(String::from).unwrap_or_default();
    (first, last_char(score))
}

/// Last character of a cell, e.g. `"WEEK3"` gives `"3"`.
fn last_char(text: &str) -> String {
    text.chars().last().map(String::from).unwrap_or_default()
}
