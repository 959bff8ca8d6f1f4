// Scoring categories: the fixed skater and goalie stat columns.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single statistical dimension a player is scored on.
///
/// Declaration order is the display order: skater categories first, then
/// goalie categories. `Ord` follows that order so `BTreeMap<Category, _>`
/// iterates the way the report renders. Serializes as the CSV column name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "G")]
    Goals,
    #[serde(rename = "A")]
    Assists,
    #[serde(rename = "PTS")]
    Points,
    #[serde(rename = "BLK")]
    Blocks,
    #[serde(rename = "FOW")]
    FaceoffWins,
    #[serde(rename = "HIT")]
    Hits,
    #[serde(rename = "SOG")]
    ShotsOnGoal,
    #[serde(rename = "STP")]
    SpecialTeamsPoints,
    #[serde(rename = "Tk")]
    Takeaways,
    #[serde(rename = "GAA")]
    GoalsAgainstAverage,
    #[serde(rename = "SV%")]
    SavePercentage,
    #[serde(rename = "SHO")]
    Shutouts,
    #[serde(rename = "W")]
    Wins,
    #[serde(rename = "SV")]
    Saves,
    #[serde(rename = "GA")]
    GoalsAgainst,
}

/// Skater categories, in display order.
pub const SKATER_CATEGORIES: [Category; 9] = [
    Category::Goals,
    Category::Assists,
    Category::Points,
    Category::Blocks,
    Category::FaceoffWins,
    Category::Hits,
    Category::ShotsOnGoal,
    Category::SpecialTeamsPoints,
    Category::Takeaways,
];

/// Goalie categories, in display order.
pub const GOALIE_CATEGORIES: [Category; 6] = [
    Category::GoalsAgainstAverage,
    Category::SavePercentage,
    Category::Shutouts,
    Category::Wins,
    Category::Saves,
    Category::GoalsAgainst,
];

/// Union of skater and goalie categories.
pub const ALL_CATEGORIES: [Category; 15] = [
    Category::Goals,
    Category::Assists,
    Category::Points,
    Category::Blocks,
    Category::FaceoffWins,
    Category::Hits,
    Category::ShotsOnGoal,
    Category::SpecialTeamsPoints,
    Category::Takeaways,
    Category::GoalsAgainstAverage,
    Category::SavePercentage,
    Category::Shutouts,
    Category::Wins,
    Category::Saves,
    Category::GoalsAgainst,
];

impl Category {
    /// Parse a CSV header / config key into a category. Case-sensitive, as the
    /// league export authors them (`Tk`, `SV%`).
    pub fn from_column(s: &str) -> Option<Self> {
        match s {
            "G" => Some(Category::Goals),
            "A" => Some(Category::Assists),
            "PTS" => Some(Category::Points),
            "BLK" => Some(Category::Blocks),
            "FOW" => Some(Category::FaceoffWins),
            "HIT" => Some(Category::Hits),
            "SOG" => Some(Category::ShotsOnGoal),
            "STP" => Some(Category::SpecialTeamsPoints),
            "Tk" => Some(Category::Takeaways),
            "GAA" => Some(Category::GoalsAgainstAverage),
            "SV%" => Some(Category::SavePercentage),
            "SHO" => Some(Category::Shutouts),
            "W" => Some(Category::Wins),
            "SV" => Some(Category::Saves),
            "GA" => Some(Category::GoalsAgainst),
            _ => None,
        }
    }

    /// The CSV column name for this category.
    pub fn column(&self) -> &'static str {
        match self {
            Category::Goals => "G",
            Category::Assists => "A",
            Category::Points => "PTS",
            Category::Blocks => "BLK",
            Category::FaceoffWins => "FOW",
            Category::Hits => "HIT",
            Category::ShotsOnGoal => "SOG",
            Category::SpecialTeamsPoints => "STP",
            Category::Takeaways => "Tk",
            Category::GoalsAgainstAverage => "GAA",
            Category::SavePercentage => "SV%",
            Category::Shutouts => "SHO",
            Category::Wins => "W",
            Category::Saves => "SV",
            Category::GoalsAgainst => "GA",
        }
    }

    pub fn is_goalie(&self) -> bool {
        GOALIE_CATEGORIES.contains(self)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}
