// Per-category weighted totals for multi-team comparison.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::debug;

use super::weights::CategoryWeights;
use crate::players::category::{Category, ALL_CATEGORIES};
use crate::players::index::PlayerIndex;
use crate::trade::asset::Resolved;
use crate::trade::roster::Roster;

/// One side's weighted category totals and raw salary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryValuation {
    /// Every category is present, starting at 0.
    pub totals: BTreeMap<Category, f64>,
    /// Raw, unweighted salary sum.
    pub salary: f64,
}

impl Default for CategoryValuation {
    fn default() -> Self {
        CategoryValuation {
            totals: ALL_CATEGORIES.iter().map(|&c| (c, 0.0)).collect(),
            salary: 0.0,
        }
    }
}

impl CategoryValuation {
    pub fn total(&self, cat: Category) -> f64 {
        self.totals.get(&cat).copied().unwrap_or(0.0)
    }
}

/// Accumulate `weight(cat) × value(cat)` over every resolved player for
/// every category. A skater's goalie columns are absent and add 0, and
/// vice versa. Draft picks carry no categories and are skipped.
pub fn value_team(
    roster: &Roster,
    index: &PlayerIndex,
    weights: &CategoryWeights,
    playoff_focus: bool,
) -> CategoryValuation {
    let mut acc = CategoryValuation::default();

    for entry in roster.entries() {
        let player = match entry.resolve(index) {
            Resolved::Player(p) => p,
            Resolved::Pick(_) | Resolved::Empty => continue,
            Resolved::Unresolved => {
                debug!("roster entry {:?} contributes nothing", entry);
                continue;
            }
        };

        acc.salary += player.salary_or_zero();
        for cat in ALL_CATEGORIES {
            let weighted = player.stat(cat) * weights.weight(cat, playoff_focus);
            *acc.totals.entry(cat).or_insert(0.0) += weighted;
        }
    }

    acc
}
