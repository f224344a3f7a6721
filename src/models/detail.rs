//! Per-game statistics extracted from a detail page.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::models::Record;

/// Placeholder written for a stat whose source element is absent.
pub const NOT_AVAILABLE: &str = "N/A";

/// Team position on the detail page (first or second stat block).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TeamSide {
    One,
    Two,
}

impl TeamSide {
    pub const BOTH: [TeamSide; 2] = [TeamSide::One, TeamSide::Two];

    /// 1-based team index.
    pub fn index(self) -> usize {
        match self {
            TeamSide::One => 1,
            TeamSide::Two => 2,
        }
    }
}

impl fmt::Display for TeamSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.index())
    }
}

/// Numeric stats shown in a team's score boxes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stat {
    Kills,
    Towers,
    Dragons,
    Barons,
    Gold,
}

impl Stat {
    /// Label fragments matched against an icon's alt text, checked in order.
    const LABELS: [(&'static str, Stat); 6] = [
        ("kill", Stat::Kills),
        ("tower", Stat::Towers),
        ("dragon", Stat::Dragons),
        ("nashor", Stat::Barons),
        ("baron", Stat::Barons),
        ("gold", Stat::Gold),
    ];

    /// Classify an icon alt text (case-insensitive substring match).
    pub fn from_label(alt: &str) -> Option<Stat> {
        let alt = alt.to_lowercase();
        Self::LABELS
            .iter()
            .find(|(fragment, _)| alt.contains(fragment))
            .map(|(_, stat)| *stat)
    }

    pub fn column(self) -> &'static str {
        match self {
            Stat::Kills => "kills",
            Stat::Towers => "towers",
            Stat::Dragons => "dragons",
            Stat::Barons => "barons",
            Stat::Gold => "gold",
        }
    }
}

/// Statistics for one team. `None` means the element was not found.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamStats {
    pub kills: Option<String>,
    pub towers: Option<String>,
    pub dragons: Option<String>,
    pub barons: Option<String>,
    pub gold: Option<String>,

    /// Banned champions in draft order
    pub bans: Vec<String>,

    /// Picked champions in draft order
    pub picks: Vec<String>,

    /// Slain dragon subtypes, e.g. "Infernal"
    pub dragon_types: Vec<String>,
}

impl TeamStats {
    /// Overwrite a stat; repeated labels keep the last value.
    pub fn set(&mut self, stat: Stat, value: impl Into<String>) {
        let slot = match stat {
            Stat::Kills => &mut self.kills,
            Stat::Towers => &mut self.towers,
            Stat::Dragons => &mut self.dragons,
            Stat::Barons => &mut self.barons,
            Stat::Gold => &mut self.gold,
        };
        *slot = Some(value.into());
    }

    pub fn get(&self, stat: Stat) -> Option<&str> {
        match stat {
            Stat::Kills => self.kills.as_deref(),
            Stat::Towers => self.towers.as_deref(),
            Stat::Dragons => self.dragons.as_deref(),
            Stat::Barons => self.barons.as_deref(),
            Stat::Gold => self.gold.as_deref(),
        }
    }

    /// Append this team's columns, each prefixed `team{n}_`.
    fn write_fields(&self, side: TeamSide, record: &mut Record) {
        let prefix = format!("team{side}");
        for stat in [Stat::Kills, Stat::Towers, Stat::Dragons, Stat::Barons, Stat::Gold] {
            record.insert(
                format!("{prefix}_{}", stat.column()),
                self.get(stat).unwrap_or(NOT_AVAILABLE),
            );
        }
        record.insert(format!("{prefix}_bans"), self.bans.join(", "));
        record.insert(format!("{prefix}_picks"), self.picks.join(", "));

        let dragon_types = if self.dragon_types.is_empty() {
            NOT_AVAILABLE.to_string()
        } else {
            self.dragon_types.join(", ")
        };
        record.insert(format!("{prefix}_dragon_types"), dragon_types);
    }
}

/// Statistics extracted from one game detail page.
///
/// `MatchDetail::default()` is the empty record: every field renders as
/// its sentinel.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchDetail {
    /// Game clock, e.g. "31:42"
    pub duration: Option<String>,

    /// Team 1 then team 2, in page order
    pub teams: [TeamStats; 2],

    pub first_blood: Option<TeamSide>,
    pub first_tower: Option<TeamSide>,
}

impl MatchDetail {
    pub fn team(&self, side: TeamSide) -> &TeamStats {
        &self.teams[side.index() - 1]
    }

    /// Render as dataset fields, substituting sentinels for missing values.
    ///
    /// Column order: `duration, fb, ft`, then team 1 and team 2 columns.
    pub fn to_record(&self) -> Record {
        let mut record = Record::new();
        record.insert("duration", self.duration.as_deref().unwrap_or(NOT_AVAILABLE));
        record.insert("fb", side_or_sentinel(self.first_blood));
        record.insert("ft", side_or_sentinel(self.first_tower));
        for side in TeamSide::BOTH {
            self.team(side).write_fields(side, &mut record);
        }
        record
    }
}

fn side_or_sentinel(side: Option<TeamSide>) -> String {
    side.map_or_else(|| NOT_AVAILABLE.to_string(), |s| s.to_string())
}
