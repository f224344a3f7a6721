//! Match stub discovered on a tournament match list.

use serde::{Deserialize, Serialize};

use crate::models::Record;

/// Dataset columns written for each stub, in order.
pub const STUB_COLUMNS: [&str; 8] = ["id", "team1", "team2", "wins1", "wins2", "week", "date", "url"];

/// One row of a tournament match list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchStub {
    /// 1-based position in the listing, stable only within one crawl run
    pub sequence_id: usize,

    pub team1: String,
    pub team2: String,

    /// First character of the combined score
    pub wins1: String,

    /// Last character of the combined score
    pub wins2: String,

    pub week: String,

    /// Date as displayed on the listing
    pub date: String,

    /// Absolute URL of the game detail page
    pub detail_url: String,
}

impl MatchStub {
    /// Key used when merging into a dataset: the detail URL, or the
    /// sequence id when the URL is blank.
    pub fn key(&self) -> String {
        if self.detail_url.trim().is_empty() {
            self.sequence_id.to_string()
        } else {
            self.detail_url.clone()
        }
    }

    pub fn has_url(&self) -> bool {
        !self.detail_url.trim().is_empty()
    }

    pub fn to_record(&self) -> Record {
        let mut record = Record::new();
        record.insert("id", self.sequence_id.to_string());
        record.insert("team1", self.team1.as_str());
        record.insert("team2", self.team2.as_str());
        record.insert("wins1", self.wins1.as_str());
        record.insert("wins2", self.wins2.as_str());
        record.insert("week", self.week.as_str());
        record.insert("date", self.date.as_str());
        record.insert("url", self.detail_url.as_str());
        record
    }

    /// Rebuild a stub from a persisted listing row.
    ///
    /// Missing columns become empty strings; a missing or unparsable `id`
    /// falls back to `position` (1-based row index in the dataset).
    pub fn from_record(record: &Record, position: usize) -> Self {
        let field = |key: &str| record.get(key).unwrap_or_default().trim().to_string();
        let sequence_id = record
            .get("id")
            .and_then(|id| id.trim().parse().ok())
            .unwrap_or(position);

        Self {
            sequence_id,
            team1: field("team1"),
            team2: field("team2"),
            wins1: field("wins1"),
            wins2: field("wins2"),
            week: field("week"),
            date: field("date"),
            detail_url: field("url"),
        }
    }
}
