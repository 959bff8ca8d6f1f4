// Valuation engine: scalar trade value and per-category weighted totals.

pub mod per_category;
pub mod scalar;
pub mod weights;

use serde::Serialize;

pub use per_category::CategoryValuation;
pub use scalar::ScalarValuation;
pub use weights::CategoryWeights;

/// A side's valuation under whichever strategy produced it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TeamValuation {
    Scalar(ScalarValuation),
    PerCategory(CategoryValuation),
}

impl TeamValuation {
    /// Aggregate raw salary, whichever the shape.
    pub fn salary(&self) -> f64 {
        match self {
            TeamValuation::Scalar(v) => v.salary,
            TeamValuation::PerCategory(v) => v.salary,
        }
    }
}
