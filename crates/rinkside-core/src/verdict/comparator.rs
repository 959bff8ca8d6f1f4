// Category comparison: deadband head-to-head and multi-way winner sets.

use serde::Serialize;

use crate::players::category::Category;

/// A side's result in one category relative to the field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Win,
    Loss,
    Even,
}

/// Head-to-head comparison with a deadband: values within `deadband` of each
/// other (inclusive) are even, otherwise the larger wins.
pub fn compare_category(a: f64, b: f64, deadband: f64) -> Direction {
    if (a - b).abs() <= deadband {
        Direction::Even
    } else if a > b {
        Direction::Win
    } else {
        Direction::Loss
    }
}

/// Compare team `team` against its strongest opponent. With two teams this is
/// the plain head-to-head; a team with no opponents is even.
pub fn direction_vs_field(values: &[f64], team: usize, deadband: f64) -> Direction {
    let best_other = values
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != team)
        .map(|(_, v)| *v)
        .fold(None, |acc: Option<f64>, v| Some(acc.map_or(v, |a| a.max(v))));

    match (values.get(team), best_other) {
        (Some(&mine), Some(other)) => compare_category(mine, other, deadband),
        _ => Direction::Even,
    }
}

/// Indices of every team holding the maximum value. Exact equality: the
/// deadband does not apply here.
pub fn category_winners(values: &[f64]) -> Vec<usize> {
    let Some(max) = values.iter().copied().reduce(f64::max) else {
        return Vec::new();
    };
    values
        .iter()
        .enumerate()
        .filter(|(_, v)| **v == max)
        .map(|(i, _)| i)
        .collect()
}

/// Outcome of one category across every side.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryResult {
    pub category: Category,
    /// Per-team value, in team order.
    pub values: Vec<f64>,
    /// Teams at the maximum. More than one means the category is tied.
    pub winners: Vec<usize>,
    /// Per-team deadband direction against the strongest opponent.
    pub directions: Vec<Direction>,
}

impl CategoryResult {
    pub fn new(category: Category, values: Vec<f64>, deadband: f64) -> Self {
        let winners = category_winners(&values);
        let directions = (0..values.len())
            .map(|i| direction_vs_field(&values, i, deadband))
            .collect();
        CategoryResult {
            category,
            values,
            winners,
            directions,
        }
    }

    /// The single team at the maximum, if there is exactly one.
    pub fn sole_winner(&self) -> Option<usize> {
        match self.winners.as_slice() {
            [only] => Some(*only),
            _ => None,
        }
    }

    pub fn is_tie(&self) -> bool {
        self.winners.len() > 1
    }
}
