// src/services/detail.rs

//! Game detail page extraction.
//!
//! Every field is looked up independently. A lookup miss leaves the field at
//! its default, which renders as a sentinel, so one absent element never
//! fails the whole record.
//!
//! The two team blocks are paired positionally: the first block in document
//! order is team 1, the second is team 2.

use scraper::{ElementRef, Html, Selector};

use crate::error::Result;
use crate::models::{Config, MatchDetail, Stat, TeamSide, TeamStats, parse_selector};
use crate::utils::{element_text, enclosing, icon_alts, next_sibling_matching};

const BANS_LABEL: &str = "Bans";
const PICKS_LABEL: &str = "Picks";
const FIRST_BLOOD_ALT: &str = "First Blood";
const FIRST_TOWER_ALT: &str = "First Tower";

/// Extraction step for one team field. `None` means the source was not found.
type TeamField = fn(&DetailExtractor, &ElementRef, &mut TeamStats) -> Option<()>;

/// Per-team field extractors, applied in order.
const TEAM_FIELDS: [(&str, TeamField); 4] = [
    ("score boxes", DetailExtractor::score_boxes),
    ("bans", DetailExtractor::bans),
    ("picks", DetailExtractor::picks),
    ("dragon types", DetailExtractor::dragon_types),
];

/// Extracts [`MatchDetail`] records from game detail pages.
pub struct DetailExtractor {
    duration_block: Selector,
    duration_value: Selector,
    duration_label: String,
    team_block: Selector,
    score_box: Selector,
    column_marker: Selector,
    marker_sibling: Selector,
    stat_column: Selector,
    dragon_column: usize,
    icon: Selector,
    dragon_icon: Selector,
}

impl DetailExtractor {
    /// Create an extractor from the configured detail layout.
    pub fn new(config: &Config) -> Result<Self> {
        let d = &config.detail;
        Ok(Self {
            duration_block: parse_selector(&d.duration_block)?,
            duration_value: parse_selector(&d.duration_value)?,
            duration_label: d.duration_label.clone(),
            team_block: parse_selector(&d.team_block)?,
            score_box: parse_selector(&d.score_box)?,
            column_marker: parse_selector(&d.column_marker)?,
            marker_sibling: parse_selector(&d.marker_sibling)?,
            stat_column: parse_selector(&d.stat_column)?,
            dragon_column: d.dragon_column,
            icon: parse_selector(&d.icon)?,
            dragon_icon: parse_selector(&d.dragon_icon)?,
        })
    }

    /// Extract all statistics from a detail page.
    pub fn extract(&self, document: &Html) -> MatchDetail {
        let blocks: Vec<ElementRef> = document.select(&self.team_block).take(2).collect();
        if blocks.len() < 2 {
            log::debug!("Found {} of 2 team blocks", blocks.len());
        }

        let mut detail = MatchDetail {
            duration: self.duration(document),
            ..MatchDetail::default()
        };

        for (side, block) in TeamSide::BOTH.into_iter().zip(&blocks) {
            let stats = &mut detail.teams[side.index() - 1];
            for (name, field) in TEAM_FIELDS {
                if field(self, block, stats).is_none() {
                    log::debug!("Team {} {} not found", side, name);
                }
            }
        }

        detail.first_blood = self.owning_team(document, &blocks, FIRST_BLOOD_ALT);
        detail.first_tower = self.owning_team(document, &blocks, FIRST_TOWER_ALT);
        detail
    }

    /// Game clock from the heading of the first labelled block.
    ///
    /// Only the first labelled block is read; later blocks are never consulted
    /// even when the first one has no heading.
    fn duration(&self, document: &Html) -> Option<String> {
        document
            .select(&self.duration_block)
            .find(|block| element_text(block).contains(&self.duration_label))
            .and_then(|block| block.select(&self.duration_value).next())
            .map(|heading| element_text(&heading))
    }

    /// Numeric stats from labelled score boxes. Later boxes overwrite earlier ones.
    fn score_boxes(&self, block: &ElementRef, stats: &mut TeamStats) -> Option<()> {
        let mut found = false;
        for score_box in block.select(&self.score_box) {
            let Some(stat) = score_box
                .select(&self.icon)
                .next()
                .and_then(|img| img.value().attr("alt"))
                .and_then(Stat::from_label)
            else {
                continue;
            };
            let text = element_text(&score_box);
            if let Some(value) = text.split_whitespace().last() {
                stats.set(stat, value);
                found = true;
            }
        }
        found.then_some(())
    }

    fn bans(&self, block: &ElementRef, stats: &mut TeamStats) -> Option<()> {
        stats.bans = self.champion_column(block, BANS_LABEL)?;
        Some(())
    }

    fn picks(&self, block: &ElementRef, stats: &mut TeamStats) -> Option<()> {
        stats.picks = self.champion_column(block, PICKS_LABEL)?;
        Some(())
    }

    /// Champion icons in the sibling following the marker labelled `label`.
    fn champion_column(&self, block: &ElementRef, label: &str) -> Option<Vec<String>> {
        let marker = block
            .select(&self.column_marker)
            .find(|marker| element_text(marker).contains(label))?;
        let icons = next_sibling_matching(&marker, &self.marker_sibling)?;
        Some(icon_alts(&icons, &self.icon))
    }

    /// Dragon subtypes from the dragon stat column, generic words stripped.
    fn dragon_types(&self, block: &ElementRef, stats: &mut TeamStats) -> Option<()> {
        let column = block.select(&self.stat_column).nth(self.dragon_column)?;
        stats.dragon_types = icon_alts(&column, &self.dragon_icon)
            .into_iter()
            .filter(|alt| alt.contains("Drake") || alt.contains("Dragon"))
            .map(|alt| alt.replace("Drake", "").replace("Dragon", "").trim().to_string())
            .filter(|kind| !kind.is_empty())
            .collect();
        Some(())
    }

    /// Which team block encloses the icon with alt text exactly `alt`.
    fn owning_team(&self, document: &Html, blocks: &[ElementRef], alt: &str) -> Option<TeamSide> {
        let icon = document
            .select(&self.icon)
            .find(|img| img.value().attr("alt") == Some(alt))?;
        let owner = enclosing(&icon, &self.team_block)?;

        TeamSide::BOTH
            .into_iter()
            .zip(blocks)
            .find(|(_, block)| block.id() == owner.id())
            .map(|(side, _)| side)
    }
}
