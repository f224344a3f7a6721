// src/services/links.rs

//! Game link discovery.
//!
//! Collects every anchor whose href mentions the configured game marker,
//! resolved to an absolute URL. Useful for pages that link games outside the
//! match list table (tournament overviews, team pages).

use std::collections::HashSet;

use scraper::{Html, Selector};
use url::Url;

use crate::error::Result;
use crate::models::{Config, parse_selector};
use crate::utils::url::resolve;

/// Discovers game detail links on arbitrary pages.
pub struct LinkDiscovery {
    anchor: Selector,
    marker: String,
}

impl LinkDiscovery {
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            anchor: parse_selector("a[href]")?,
            marker: config.site.link_marker.clone(),
        })
    }

    /// Absolute game links in first-seen order, without duplicates.
    pub fn discover(&self, document: &Html, page_url: &Url) -> Vec<String> {
        let mut seen = HashSet::new();
        document
            .select(&self.anchor)
            .filter_map(|a| a.value().attr("href"))
            .filter(|href| href.contains(&self.marker))
            .filter_map(|href| resolve(page_url, href))
            .filter(|link| seen.insert(link.clone()))
            .collect()
    }
}
