// Player index: normalized key → record, rebuilt wholesale on every upload.

use std::collections::HashMap;

use tracing::{debug, warn};

use super::record::{normalize_key, PlayerRecord};

/// Lookup table over the current player set.
///
/// Iteration follows first-appearance order of each key. When two rows
/// normalize to the same key the later row replaces the earlier one in place,
/// so the position is kept but the data is last-write-wins.
#[derive(Debug, Clone, Default)]
pub struct PlayerIndex {
    records: Vec<PlayerRecord>,
    by_key: HashMap<String, usize>,
}

impl PlayerIndex {
    /// Build the index from parsed records. Rows with an empty key are not indexed.
    pub fn build(records: Vec<PlayerRecord>) -> Self {
        let mut index = PlayerIndex {
            records: Vec::with_capacity(records.len()),
            by_key: HashMap::with_capacity(records.len()),
        };

        for rec in records {
            if rec.key.is_empty() {
                debug!("not indexing row without a usable name: {:?}", rec.name);
                continue;
            }
            match index.by_key.get(&rec.key) {
                Some(&slot) => {
                    warn!(
                        "key collision on '{}': '{}' replaces '{}'",
                        rec.key, rec.name, index.records[slot].name
                    );
                    index.records[slot] = rec;
                }
                None => {
                    index.by_key.insert(rec.key.clone(), index.records.len());
                    index.records.push(rec);
                }
            }
        }

        index
    }

    /// Exact lookup by normalized key.
    pub fn get(&self, key: &str) -> Option<&PlayerRecord> {
        self.by_key.get(key).map(|&i| &self.records[i])
    }

    /// Normalize a typed name and look it up.
    pub fn lookup_name(&self, name: &str) -> Option<&PlayerRecord> {
        self.get(&normalize_key(name))
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.by_key.contains_key(key)
    }

    /// Case-insensitive substring match against display names. First match in
    /// iteration order wins. A blank query matches nothing.
    pub fn find_by_substring(&self, query: &str) -> Option<&PlayerRecord> {
        let q = query.trim().to_lowercase();
        if q.is_empty() {
            return None;
        }
        self.records
            .iter()
            .find(|r| r.name.to_lowercase().contains(&q))
    }

    pub fn iter(&self) -> impl Iterator<Item = &PlayerRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::players::category::Category;
    use crate::players::csv_import::parse_players;

    fn index_from(csv: &str) -> PlayerIndex {
        PlayerIndex::build(parse_players(csv).unwrap())
    }

    #[test]
    fn lookup_by_key_and_name() {
        let index = index_from("Name,G\nJoe Smith,10\nAnn Lee,3");
        assert_eq!(index.len(), 2);
        assert_eq!(index.get("joesmith").unwrap().name, "Joe Smith");
        assert_eq!(index.lookup_name("ANN  LEE").unwrap().name, "Ann Lee");
        assert!(index.get("nobody").is_none());
        assert!(index.lookup_name("").is_none());
    }

    #[test]
    fn collision_last_write_wins_in_first_position() {
        let index = index_from("Name,G\nJ.T. Miller,20\nOther Guy,1\nJT Miller,31");
        assert_eq!(index.len(), 2);
        assert_eq!(index.get("jtmiller").unwrap().stat(Category::Goals), 31.0);
        assert_eq!(index.get("jtmiller").unwrap().name, "JT Miller");

        let order: Vec<&str> = index.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(order, vec!["JT Miller", "Other Guy"]);
    }

    #[test]
    fn rows_without_key_not_indexed() {
        let index = index_from("Name,G\n123,5\n,6\nReal Name,7");
        assert_eq!(index.len(), 1);
        assert!(index.contains_key("realname"));
    }

    #[test]
    fn substring_match_first_wins() {
        let index = index_from("Name,G\nElias Pettersson,30\nMarcus Pettersson,2");
        assert_eq!(index.find_by_substring("pettersson").unwrap().name, "Elias Pettersson");
        assert_eq!(index.find_by_substring("MARCUS").unwrap().name, "Marcus Pettersson");
        assert!(index.find_by_substring("crosby").is_none());
        assert!(index.find_by_substring("   ").is_none());
    }

    #[test]
    fn rebuild_replaces_everything() {
        let first = index_from("Name,G\nOld Player,5");
        assert!(first.contains_key("oldplayer"));
        let second = index_from("Name,G\nNew Player,6");
        assert!(!second.contains_key("oldplayer"));
        assert!(second.contains_key("newplayer"));
    }

    #[test]
    fn empty_index() {
        let index = PlayerIndex::default();
        assert!(index.is_empty());
        assert!(index.get("anyone").is_none());
    }
}
