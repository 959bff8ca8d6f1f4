// Category weighting: base weights times the optional playoff multiplier.

use std::collections::HashMap;

use crate::players::category::Category;

/// Playoff multipliers used when no league override is configured.
///
/// Elimination play rewards goal-scoring, short-handed production and elite
/// goaltending, and discounts volume stats like hits, blocks and saves.
pub const DEFAULT_PLAYOFF_WEIGHTS: [(Category, f64); 15] = [
    (Category::Goals, 1.15),
    (Category::Assists, 1.0),
    (Category::Points, 1.0),
    (Category::ShotsOnGoal, 0.85),
    (Category::Hits, 0.85),
    (Category::Blocks, 0.85),
    (Category::FaceoffWins, 0.85),
    (Category::SpecialTeamsPoints, 1.25),
    (Category::Takeaways, 1.1),
    (Category::Wins, 1.15),
    (Category::Shutouts, 1.3),
    (Category::SavePercentage, 1.1),
    (Category::GoalsAgainstAverage, 1.1),
    (Category::Saves, 0.85),
    (Category::GoalsAgainst, 0.85),
];

/// Per-category weights. Categories absent from either table weigh 1.0.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryWeights {
    base: HashMap<Category, f64>,
    playoff: HashMap<Category, f64>,
}

impl CategoryWeights {
    pub fn new(base: HashMap<Category, f64>, playoff: HashMap<Category, f64>) -> Self {
        CategoryWeights { base, playoff }
    }

    /// Effective weight for `cat`: `base × (playoff multiplier if focused)`.
    pub fn weight(&self, cat: Category, playoff_focus: bool) -> f64 {
        let base = self.base.get(&cat).copied().unwrap_or(1.0);
        if playoff_focus {
            base * self.playoff.get(&cat).copied().unwrap_or(1.0)
        } else {
            base
        }
    }

    pub fn playoff_multiplier(&self, cat: Category) -> Option<f64> {
        self.playoff.get(&cat).copied()
    }
}

impl Default for CategoryWeights {
    fn default() -> Self {
        CategoryWeights {
            base: HashMap::new(),
            playoff: DEFAULT_PLAYOFF_WEIGHTS.into_iter().collect(),
        }
    }
}
