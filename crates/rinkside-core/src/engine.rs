// Pure recomputation: snapshot of inputs in, full trade report out.
//
// Nothing here mutates the snapshot or keeps state between calls. Every
// derived value (valuations, category results, verdict, cap flags) is rebuilt
// from scratch on each call.

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};

use crate::config::{LeagueConfig, ScoringStrategy, TradeMode, MIN_TEAMS};
use crate::players::category::ALL_CATEGORIES;
use crate::players::index::PlayerIndex;
use crate::trade::roster::Roster;
use crate::valuation::{per_category, scalar, TeamValuation};
use crate::verdict::{self, CategoryResult, Verdict};

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    #[error("a trade needs at least two teams, got {count}")]
    TooFewTeams { count: usize },

    #[error("no team at position {team} (trade has {count} teams)")]
    UnknownTeam { team: usize, count: usize },
}

// ---------------------------------------------------------------------------
// Inputs
// ---------------------------------------------------------------------------

/// One side of the trade.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Team {
    pub name: String,
    pub roster: Roster,
}

impl Team {
    pub fn new(name: impl Into<String>) -> Self {
        Team {
            name: name.into(),
            roster: Roster::new(),
        }
    }
}

/// Display name for the team at `position`: "Team A", "Team B", ...
pub fn default_team_name(position: usize) -> String {
    match u8::try_from(position).ok().filter(|p| *p < 26) {
        Some(p) => format!("Team {}", char::from(b'A' + p)),
        None => format!("Team {}", position + 1),
    }
}

/// Everything a recompute reads.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub index: PlayerIndex,
    pub teams: Vec<Team>,
    pub strategy: ScoringStrategy,
    pub mode: TradeMode,
    pub playoff_focus: bool,
}

// ---------------------------------------------------------------------------
// Outputs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamReport {
    pub name: String,
    pub valuation: TeamValuation,
    /// Mode-weighted total. Only set under the scalar strategy.
    pub total_value: Option<f64>,
    pub salary: f64,
    pub over_cap: bool,
    /// Categories this side wins outright.
    pub category_wins: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TradeReport {
    pub strategy: ScoringStrategy,
    pub mode: TradeMode,
    pub playoff_focus: bool,
    pub teams: Vec<TeamReport>,
    pub categories: Vec<CategoryResult>,
    pub verdict: Verdict,
    /// One-line verdict text naming the gaining side, if any.
    pub headline: String,
}

// ---------------------------------------------------------------------------
// Recompute
// ---------------------------------------------------------------------------

/// Evaluate the trade described by `snapshot`.
pub fn recompute(snapshot: &Snapshot, league: &LeagueConfig) -> Result<TradeReport, EngineError> {
    let count = snapshot.teams.len();
    if count < MIN_TEAMS {
        return Err(EngineError::TooFewTeams { count });
    }

    let valuations: Vec<TeamValuation> = match snapshot.strategy {
        ScoringStrategy::Scalar => snapshot
            .teams
            .iter()
            .map(|t| {
                TeamValuation::Scalar(scalar::value_team(
                    &t.roster,
                    &snapshot.index,
                    league,
                    snapshot.mode,
                ))
            })
            .collect(),
        ScoringStrategy::PerCategory => {
            let weights = league.category_weights();
            snapshot
                .teams
                .iter()
                .map(|t| {
                    TeamValuation::PerCategory(per_category::value_team(
                        &t.roster,
                        &snapshot.index,
                        &weights,
                        snapshot.playoff_focus,
                    ))
                })
                .collect()
        }
    };

    let deadband = league.scoring.category_deadband;
    let categories: Vec<CategoryResult> = ALL_CATEGORIES
        .iter()
        .map(|&cat| {
            let values = valuations
                .iter()
                .map(|v| match v {
                    TeamValuation::Scalar(s) => s.categories.get(&cat).copied().unwrap_or(0.0),
                    TeamValuation::PerCategory(p) => p.total(cat),
                })
                .collect();
            CategoryResult::new(cat, values, deadband)
        })
        .collect();

    let tallies = verdict::tally_sole_wins(&categories, count);

    let totals: Option<Vec<f64>> = match snapshot.strategy {
        ScoringStrategy::Scalar => {
            let m = league.modes.for_mode(snapshot.mode);
            Some(
                valuations
                    .iter()
                    .map(|v| match v {
                        TeamValuation::Scalar(s) => s.total_value(m),
                        TeamValuation::PerCategory(_) => 0.0,
                    })
                    .collect(),
            )
        }
        ScoringStrategy::PerCategory => None,
    };

    let verdict = match &totals {
        Some(t) => verdict::scalar_verdict(t, league.scoring.verdict_deadband),
        None => verdict::category_verdict(&tallies),
    };

    let teams: Vec<TeamReport> = snapshot
        .teams
        .iter()
        .zip(valuations)
        .enumerate()
        .map(|(i, (team, valuation))| {
            let salary = valuation.salary();
            TeamReport {
                name: team.name.clone(),
                total_value: totals.as_ref().map(|t| t[i]),
                salary,
                over_cap: salary > league.salary_cap,
                category_wins: tallies[i],
                valuation,
            }
        })
        .collect();

    for t in teams.iter().filter(|t| t.over_cap) {
        debug!("{} is over the cap at {:.0}", t.name, t.salary);
    }

    let headline = headline_for(snapshot.strategy, verdict, &teams);
    info!(
        "Recomputed {} team trade ({}, {}, playoff_focus={}): {}",
        count, snapshot.strategy, snapshot.mode, snapshot.playoff_focus, headline
    );

    Ok(TradeReport {
        strategy: snapshot.strategy,
        mode: snapshot.mode,
        playoff_focus: snapshot.playoff_focus,
        teams,
        categories,
        verdict,
        headline,
    })
}

fn headline_for(strategy: ScoringStrategy, verdict: Verdict, teams: &[TeamReport]) -> String {
    let gainer = verdict.gainer().and_then(|i| teams.get(i)).map(|t| t.name.as_str());
    match (strategy, gainer) {
        (ScoringStrategy::PerCategory, None) => "Trade is balanced".to_string(),
        (ScoringStrategy::PerCategory, Some(name)) => format!("{name} gains the most value"),
        (ScoringStrategy::Scalar, None) => "Even Trade".to_string(),
        (ScoringStrategy::Scalar, Some(name)) => format!("{name} Wins"),
    }
}
