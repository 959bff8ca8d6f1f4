// Team rosters: ordered entries with resolve-or-reject player adds.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::asset::RosterEntry;
use crate::players::index::PlayerIndex;
use crate::players::record::normalize_key;

/// Outcome of [`Roster::add_player`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddOutcome {
    /// The player was appended under this key.
    Added(String),
    /// The key was already on the roster; nothing changed.
    Duplicate(String),
    /// The name did not resolve in the current index; nothing changed.
    NotFound,
}

/// One team's side of a trade, in the order entries were added.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roster {
    entries: Vec<RosterEntry>,
}

impl Roster {
    pub fn new() -> Self {
        Roster::default()
    }

    /// Add a player by typed name.
    ///
    /// The name is normalized and must already resolve in `index`; unknown
    /// names and keys already on the roster leave it untouched.
    pub fn add_player(&mut self, name: &str, index: &PlayerIndex) -> AddOutcome {
        let key = normalize_key(name);
        if key.is_empty() || !index.contains_key(&key) {
            debug!("rejecting roster add for unknown player '{}'", name);
            return AddOutcome::NotFound;
        }
        if self.contains_player(&key) {
            return AddOutcome::Duplicate(key);
        }
        self.entries.push(RosterEntry::Player(key.clone()));
        AddOutcome::Added(key)
    }

    /// Remove a player by key. Returns whether anything was removed.
    pub fn remove_player(&mut self, key: &str) -> bool {
        let before = self.entries.len();
        self.entries
            .retain(|e| !matches!(e, RosterEntry::Player(k) if k == key));
        self.entries.len() != before
    }

    pub fn contains_player(&self, key: &str) -> bool {
        self.entries
            .iter()
            .any(|e| matches!(e, RosterEntry::Player(k) if k == key))
    }

    /// Append a free-text asset slot and return its position.
    pub fn push_asset(&mut self, text: &str) -> usize {
        self.entries.push(RosterEntry::Asset(text.to_string()));
        self.entries.len() - 1
    }

    /// Overwrite the text of the asset slot at `slot`. Returns `false` if
    /// `slot` is out of range or holds a player rather than an asset.
    pub fn set_asset(&mut self, slot: usize, text: &str) -> bool {
        match self.entries.get_mut(slot) {
            Some(RosterEntry::Asset(current)) => {
                *current = text.to_string();
                true
            }
            _ => false,
        }
    }

    /// Remove the entry at `slot`, whatever it holds.
    pub fn remove_slot(&mut self, slot: usize) -> Option<RosterEntry> {
        if slot < self.entries.len() {
            Some(self.entries.remove(slot))
        } else {
            None
        }
    }

    pub fn entries(&self) -> &[RosterEntry] {
        &self.entries
    }

    /// Keys of player entries, in roster order.
    pub fn player_keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().filter_map(|e| match e {
            RosterEntry::Player(k) => Some(k.as_str()),
            RosterEntry::Asset(_) => None,
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
