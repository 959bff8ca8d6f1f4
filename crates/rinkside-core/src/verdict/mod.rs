// Trade verdicts: category win tallies or scalar value comparison.

pub mod comparator;

use serde::Serialize;

pub use comparator::{compare_category, CategoryResult, Direction};

/// Final judgment on a trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Verdict {
    Balanced,
    /// Index of the side that comes out ahead.
    Gainer { team: usize },
}

impl Verdict {
    pub fn gainer(&self) -> Option<usize> {
        match self {
            Verdict::Balanced => None,
            Verdict::Gainer { team } => Some(*team),
        }
    }
}

/// Per team, the number of categories where it is the only team at the max.
pub fn tally_sole_wins(results: &[CategoryResult], team_count: usize) -> Vec<usize> {
    let mut tallies = vec![0; team_count];
    for winner in results.iter().filter_map(CategoryResult::sole_winner) {
        if let Some(t) = tallies.get_mut(winner) {
            *t += 1;
        }
    }
    tallies
}

/// Rank by tally; a tie between the top two is balanced.
pub fn category_verdict(tallies: &[usize]) -> Verdict {
    let mut ranked: Vec<(usize, usize)> = tallies.iter().copied().enumerate().collect();
    // Stable: equal tallies keep team order.
    ranked.sort_by(|a, b| b.1.cmp(&a.1));

    match ranked.as_slice() {
        [(top, top_wins), (_, next_wins), ..] if top_wins != next_wins => {
            Verdict::Gainer { team: *top }
        }
        [(top, _)] => Verdict::Gainer { team: *top },
        _ => Verdict::Balanced,
    }
}

/// Compare total values: if any other side is within `deadband` of the best
/// (strictly less than), the trade is even; otherwise the best side gains.
pub fn scalar_verdict(totals: &[f64], deadband: f64) -> Verdict {
    let Some(best) = totals.iter().copied().reduce(f64::max) else {
        return Verdict::Balanced;
    };
    let close = totals.iter().filter(|v| (*v - best).abs() < deadband).count();
    if close > 1 {
        return Verdict::Balanced;
    }
    match totals.iter().position(|v| *v == best) {
        Some(team) => Verdict::Gainer { team },
        None => Verdict::Balanced,
    }
}
