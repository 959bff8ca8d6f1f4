// Roster entries and how they resolve against the current player index.

use serde::{Deserialize, Serialize};

use crate::players::index::PlayerIndex;
use crate::players::record::PlayerRecord;

/// Draft-pick round recognized from a free-text asset label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PickRound {
    First,
    Second,
}

impl PickRound {
    /// Classify a label by substring: anything mentioning "1st" is a first
    /// rounder, otherwise anything mentioning "2nd" is a second rounder.
    ///
    /// This is a plain substring test, so "21st overall" reads as a first
    /// rounder and "22nd overall" as a second.
    pub fn from_label(label: &str) -> Option<Self> {
        let l = label.to_lowercase();
        if l.contains("1st") {
            Some(PickRound::First)
        } else if l.contains("2nd") {
            Some(PickRound::Second)
        } else {
            None
        }
    }
}

/// One line on a team's side of the trade.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RosterEntry {
    /// A player added by name and already validated against the index.
    Player(String),
    /// Free text typed into an asset slot: a partial player name, a pick
    /// label, or nothing yet.
    Asset(String),
}

/// What a roster entry means against a particular player index.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Resolved<'a> {
    Player(&'a PlayerRecord),
    Pick(PickRound),
    /// Blank asset slot.
    Empty,
    /// Key no longer indexed, or text matching neither a player nor a pick.
    Unresolved,
}

impl RosterEntry {
    /// Resolve against `index`. Never fails: anything unknown is `Unresolved`.
    ///
    /// Free text is tried as a player first (case-insensitive substring over
    /// display names) and only then as a draft pick.
    pub fn resolve<'a>(&self, index: &'a PlayerIndex) -> Resolved<'a> {
        match self {
            RosterEntry::Player(key) => match index.get(key) {
                Some(rec) => Resolved::Player(rec),
                None => Resolved::Unresolved,
            },
            RosterEntry::Asset(text) => {
                if text.trim().is_empty() {
                    return Resolved::Empty;
                }
                if let Some(rec) = index.find_by_substring(text) {
                    return Resolved::Player(rec);
                }
                match PickRound::from_label(text) {
                    Some(round) => Resolved::Pick(round),
                    None => Resolved::Unresolved,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::players::csv_import::parse_players;

    fn index() -> PlayerIndex {
        PlayerIndex::build(
            parse_players("Name,Position,G\nConnor McDavid,C,64\nJuuse Saros,G,0").unwrap(),
        )
    }

    #[test]
    fn pick_round_from_label() {
        assert_eq!(PickRound::from_label("2024 1st"), Some(PickRound::First));
        assert_eq!(PickRound::from_label("2025 2ND round pick"), Some(PickRound::Second));
        assert_eq!(PickRound::from_label("1st and 2nd"), Some(PickRound::First));
        assert_eq!(PickRound::from_label("2026 3rd"), None);
        assert_eq!(PickRound::from_label("pick"), None);
    }

    #[test]
    fn pick_round_substring_quirk_is_kept() {
        assert_eq!(PickRound::from_label("21st overall"), Some(PickRound::First));
        assert_eq!(PickRound::from_label("22nd overall"), Some(PickRound::Second));
    }

    #[test]
    fn player_entry_resolves_by_exact_key() {
        let idx = index();
        let entry = RosterEntry::Player("connormcdavid".into());
        match entry.resolve(&idx) {
            Resolved::Player(p) => assert_eq!(p.name, "Connor McDavid"),
            other => panic!("expected player, got {other:?}"),
        }
        assert_eq!(RosterEntry::Player("gone".into()).resolve(&idx), Resolved::Unresolved);
    }

    #[test]
    fn asset_text_resolution_order() {
        let idx = index();
        match RosterEntry::Asset("mcdav".into()).resolve(&idx) {
            Resolved::Player(p) => assert_eq!(p.key, "connormcdavid"),
            other => panic!("expected player, got {other:?}"),
        }
        assert_eq!(
            RosterEntry::Asset("2025 1st".into()).resolve(&idx),
            Resolved::Pick(PickRound::First)
        );
        assert_eq!(RosterEntry::Asset("  ".into()).resolve(&idx), Resolved::Empty);
        assert_eq!(
            RosterEntry::Asset("future considerations".into()).resolve(&idx),
            Resolved::Unresolved
        );
    }
}
