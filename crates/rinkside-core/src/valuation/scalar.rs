// Scalar trade value: present production, future value, and cap impact.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::debug;

use crate::config::{AgeCurveConfig, LeagueConfig, ModeMultipliers, PickConfig, TradeMode};
use crate::players::category::{Category, GOALIE_CATEGORIES, SKATER_CATEGORIES};
use crate::players::index::PlayerIndex;
use crate::players::record::PlayerRecord;
use crate::trade::asset::{PickRound, Resolved};
use crate::trade::roster::Roster;

/// One side's scalar components plus the raw category breakdown.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ScalarValuation {
    /// Sum of raw position-appropriate category values.
    pub now: f64,
    /// Age-curve adjustments plus draft-pick value.
    pub future: f64,
    /// Negative salary in millions.
    pub cap: f64,
    /// Raw (unweighted) category sums across resolved players.
    pub categories: BTreeMap<Category, f64>,
    /// Raw aggregate salary, for the cap flag.
    pub salary: f64,
}

impl ScalarValuation {
    /// Combine the components under a mode's multipliers.
    pub fn total_value(&self, m: &ModeMultipliers) -> f64 {
        self.now * m.now + self.future * m.future + self.cap * m.cap
    }
}

/// Future-value adjustment from age alone.
pub fn age_adjustment(age: Option<f64>, curve: &AgeCurveConfig) -> f64 {
    let age = age.unwrap_or(curve.default_age);
    if age < curve.young_age {
        curve.young_bonus
    } else if age > curve.veteran_age {
        -curve.veteran_penalty
    } else {
        0.0
    }
}

/// Future value of a draft pick under a trade mode.
pub fn pick_value(round: PickRound, picks: &PickConfig, m: &ModeMultipliers) -> f64 {
    let base = match round {
        PickRound::First => picks.first_round,
        PickRound::Second => picks.second_round,
    };
    base * m.picks
}

/// Score a single resolved player. Goalies sum goalie categories, everyone
/// else sums skater categories; category weights are not applied here.
pub fn score_player(player: &PlayerRecord, curve: &AgeCurveConfig) -> ScalarValuation {
    let cats: &[Category] = if player.is_goalie() {
        &GOALIE_CATEGORIES
    } else {
        &SKATER_CATEGORIES
    };

    let categories: BTreeMap<Category, f64> =
        cats.iter().map(|&c| (c, player.stat(c))).collect();
    let salary = player.salary_or_zero();

    ScalarValuation {
        now: categories.values().sum(),
        future: age_adjustment(player.age, curve),
        cap: -salary / curve.salary_unit,
        categories,
        salary,
    }
}

/// Value one side of the trade.
pub fn value_team(
    roster: &Roster,
    index: &PlayerIndex,
    league: &LeagueConfig,
    mode: TradeMode,
) -> ScalarValuation {
    let multipliers = league.modes.for_mode(mode);
    let mut acc = ScalarValuation::default();

    for entry in roster.entries() {
        match entry.resolve(index) {
            Resolved::Player(p) => {
                let s = score_player(p, &league.valuation);
                acc.now += s.now;
                acc.future += s.future;
                acc.cap += s.cap;
                acc.salary += s.salary;
                for (cat, v) in s.categories {
                    *acc.categories.entry(cat).or_insert(0.0) += v;
                }
            }
            Resolved::Pick(round) => {
                acc.future += pick_value(round, &league.picks, multipliers);
            }
            Resolved::Empty => {}
            Resolved::Unresolved => {
                debug!("roster entry {:?} contributes nothing", entry);
            }
        }
    }

    acc
}
