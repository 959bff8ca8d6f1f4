// Player records: one normalized CSV row with typed stat accessors.

use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

use super::category::Category;

/// Header names that carry the player's display name, in priority order.
pub const NAME_COLUMNS: [&str; 2] = ["Name", "Player"];

/// Header names that carry the player's cap hit, in priority order.
pub const SALARY_COLUMNS: [&str; 2] = ["Salary", "AAV"];

pub const POSITION_COLUMN: &str = "Position";
pub const AGE_COLUMN: &str = "Age";

/// Position string that marks a goalie. Anything else is a skater.
pub const GOALIE_POSITION: &str = "G";

/// One parsed CSV row.
///
/// Recognized columns are lifted into typed fields; every column (recognized
/// or not) stays available as its trimmed string via [`PlayerRecord::column`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerRecord {
    /// Normalized identity: lowercase name with everything outside `[a-z]` removed.
    pub key: String,
    pub name: String,
    pub position: String,
    /// `None` when the column is missing, blank or unparseable.
    pub age: Option<f64>,
    /// Cap hit from `Salary`, falling back to `AAV`. `None` when neither parses.
    pub salary: Option<f64>,
    stats: HashMap<Category, f64>,
    columns: BTreeMap<String, String>,
}

impl PlayerRecord {
    /// Build a record from header → trimmed value pairs.
    pub fn from_columns(columns: BTreeMap<String, String>) -> Self {
        let name = first_non_empty(&columns, &NAME_COLUMNS)
            .unwrap_or_default()
            .to_string();
        let position = columns
            .get(POSITION_COLUMN)
            .cloned()
            .unwrap_or_default();
        let age = columns.get(AGE_COLUMN).and_then(|v| parse_number(v));
        let salary = SALARY_COLUMNS
            .iter()
            .find_map(|c| columns.get(*c).and_then(|v| parse_number(v)));

        let stats = columns
            .iter()
            .filter_map(|(header, value)| {
                let cat = Category::from_column(header)?;
                parse_number(value).map(|n| (cat, n))
            })
            .collect();

        PlayerRecord {
            key: normalize_key(&name),
            name,
            position,
            age,
            salary,
            stats,
            columns,
        }
    }

    /// Raw category value with fail-soft coercion: absent or unparseable is 0.
    pub fn stat(&self, cat: Category) -> f64 {
        self.stats.get(&cat).copied().unwrap_or(0.0)
    }

    /// Salary with fail-soft coercion.
    pub fn salary_or_zero(&self) -> f64 {
        self.salary.unwrap_or(0.0)
    }

    pub fn is_goalie(&self) -> bool {
        self.position == GOALIE_POSITION
    }

    /// The trimmed string value of any column, recognized or not.
    pub fn column(&self, header: &str) -> Option<&str> {
        self.columns.get(header).map(String::as_str)
    }

    /// Columns that are neither identity, position, age, salary nor a category.
    pub fn extra_columns(&self) -> impl Iterator<Item = (&str, &str)> {
        self.columns
            .iter()
            .filter(|(h, _)| !is_recognized_column(h))
            .map(|(h, v)| (h.as_str(), v.as_str()))
    }
}

fn is_recognized_column(header: &str) -> bool {
    NAME_COLUMNS.contains(&header)
        || SALARY_COLUMNS.contains(&header)
        || header == POSITION_COLUMN
        || header == AGE_COLUMN
        || Category::from_column(header).is_some()
}

fn first_non_empty<'a>(columns: &'a BTreeMap<String, String>, keys: &[&str]) -> Option<&'a str> {
    keys.iter()
        .filter_map(|k| columns.get(*k))
        .map(String::as_str)
        .find(|v| !v.is_empty())
}

// ---------------------------------------------------------------------------
// Key normalization and numeric coercion
// ---------------------------------------------------------------------------

/// Lowercase the name and keep only ASCII letters.
///
/// `"Joe Smith"` → `"joesmith"`, `"J.T. Miller"` → `"jtmiller"`. Accented
/// letters are dropped, so `"Stützle"` and `"Stutzle"` do not collide.
pub fn normalize_key(name: &str) -> String {
    name.chars()
        .flat_map(char::to_lowercase)
        .filter(|c| c.is_ascii_lowercase())
        .collect()
}

/// Parse a numeric field leniently.
///
/// Accepts a full float, or failing that the longest leading numeric prefix
/// (`"12 GP"` → 12). Blank, non-numeric and non-finite input yields `None`.
pub fn parse_number(raw: &str) -> Option<f64> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }
    let parsed = match s.parse::<f64>() {
        Ok(n) => Some(n),
        Err(_) => {
            let prefix = numeric_prefix(s);
            if prefix.is_empty() {
                None
            } else {
                prefix.parse::<f64>().ok()
            }
        }
    };
    parsed.filter(|n| n.is_finite())
}

/// [`parse_number`] with missing/invalid input coerced to 0.
pub fn coerce_number(raw: &str) -> f64 {
    parse_number(raw).unwrap_or(0.0)
}

/// Longest prefix of `s` that looks like a decimal float literal.
fn numeric_prefix(s: &str) -> &str {
    let bytes = s.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut has_digits = end > int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut j = frac_start;
        while j < bytes.len() && bytes[j].is_ascii_digit() {
            j += 1;
        }
        if has_digits || j > frac_start {
            has_digits = true;
            end = j;
        }
    }

    if !has_digits {
        return "";
    }

    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut j = end + 1;
        if j < bytes.len() && matches!(bytes[j], b'+' | b'-') {
            j += 1;
        }
        let exp_start = j;
        while j < bytes.len() && bytes[j].is_ascii_digit() {
            j += 1;
        }
        if j > exp_start {
            end = j;
        }
    }

    &s[..end]
}
