// Trade session: the mutable owner of one snapshot.
//
// The presentation layer drives a session with user events (upload, add,
// remove, toggle) and asks it for a report. Each event swaps a field of the
// snapshot; the report is always a fresh `engine::recompute`.

use tracing::{info, warn};

use crate::config::{LeagueConfig, ScoringStrategy, TradeConfig, TradeMode};
use crate::engine::{self, default_team_name, EngineError, Snapshot, Team, TradeReport};
use crate::players::csv_import::{parse_player_bytes, parse_players, LoadError};
use crate::players::index::PlayerIndex;
use crate::players::record::PlayerRecord;
use crate::trade::roster::{AddOutcome, Roster};

#[derive(Debug, Clone)]
pub struct TradeSession {
    snapshot: Snapshot,
}

impl TradeSession {
    /// Empty session with `team_count` sides named "Team A", "Team B", ...
    pub fn new(team_count: usize, strategy: ScoringStrategy) -> Self {
        let names = (0..team_count).map(default_team_name).collect();
        Self::with_team_names(names, strategy)
    }

    pub fn with_team_names(names: Vec<String>, strategy: ScoringStrategy) -> Self {
        TradeSession {
            snapshot: Snapshot {
                index: PlayerIndex::default(),
                teams: names.into_iter().map(Team::new).collect(),
                strategy,
                mode: TradeMode::default(),
                playoff_focus: false,
            },
        }
    }

    /// Session shaped by a trade.toml: team names and mode flags. Rosters are
    /// left empty since players can only be added once a CSV is loaded; see
    /// [`TradeSession::apply_rosters`].
    pub fn from_trade_config(trade: &TradeConfig) -> Self {
        let names = trade
            .teams
            .iter()
            .enumerate()
            .map(|(i, t)| t.name.clone().unwrap_or_else(|| default_team_name(i)))
            .collect();
        let mut session = Self::with_team_names(names, trade.strategy);
        session.set_mode(trade.mode);
        session.set_playoff_focus(trade.playoff_focus);
        session
    }

    /// Fill rosters from a trade.toml against the current index. Returns the
    /// names that did not resolve.
    pub fn apply_rosters(&mut self, trade: &TradeConfig) -> Vec<String> {
        let mut rejected = Vec::new();
        for (team, spec) in self.snapshot.teams.iter_mut().zip(&trade.teams) {
            for name in &spec.players {
                if team.roster.add_player(name, &self.snapshot.index) == AddOutcome::NotFound {
                    warn!("{}: '{}' is not in the player list", team.name, name);
                    rejected.push(name.clone());
                }
            }
            for asset in &spec.assets {
                team.roster.push_asset(asset);
            }
        }
        rejected
    }

    // -----------------------------------------------------------------------
    // Player set
    // -----------------------------------------------------------------------

    /// Parse CSV text and replace the whole player set. On error the previous
    /// player set is kept. Returns the number of indexed players.
    pub fn load_csv_text(&mut self, text: &str) -> Result<usize, LoadError> {
        let records = parse_players(text)?;
        Ok(self.replace_players(records))
    }

    /// Like [`TradeSession::load_csv_text`] for raw file contents. Bytes that
    /// are not valid UTF-8 are decoded lossily rather than rejected.
    pub fn load_csv_bytes(&mut self, bytes: &[u8]) -> Result<usize, LoadError> {
        let records = parse_player_bytes(bytes)?;
        Ok(self.replace_players(records))
    }

    /// Replace the whole player set. Roster entries are kept; any whose key
    /// disappears simply stops resolving.
    pub fn replace_players(&mut self, records: Vec<PlayerRecord>) -> usize {
        self.snapshot.index = PlayerIndex::build(records);
        info!("Player set replaced: {} players indexed", self.snapshot.index.len());
        self.snapshot.index.len()
    }

    pub fn index(&self) -> &PlayerIndex {
        &self.snapshot.index
    }

    // -----------------------------------------------------------------------
    // Rosters
    // -----------------------------------------------------------------------

    fn roster_mut(&mut self, team: usize) -> Result<&mut Roster, EngineError> {
        let count = self.snapshot.teams.len();
        self.snapshot
            .teams
            .get_mut(team)
            .map(|t| &mut t.roster)
            .ok_or(EngineError::UnknownTeam { team, count })
    }

    pub fn add_player(&mut self, team: usize, name: &str) -> Result<AddOutcome, EngineError> {
        let count = self.snapshot.teams.len();
        let Snapshot { index, teams, .. } = &mut self.snapshot;
        let t = teams
            .get_mut(team)
            .ok_or(EngineError::UnknownTeam { team, count })?;
        Ok(t.roster.add_player(name, index))
    }

    pub fn remove_player(&mut self, team: usize, key: &str) -> Result<bool, EngineError> {
        Ok(self.roster_mut(team)?.remove_player(key))
    }

    pub fn push_asset(&mut self, team: usize, text: &str) -> Result<usize, EngineError> {
        Ok(self.roster_mut(team)?.push_asset(text))
    }

    pub fn set_asset(&mut self, team: usize, slot: usize, text: &str) -> Result<bool, EngineError> {
        Ok(self.roster_mut(team)?.set_asset(slot, text))
    }

    pub fn teams(&self) -> &[Team] {
        &self.snapshot.teams
    }

    // -----------------------------------------------------------------------
    // Mode flags
    // -----------------------------------------------------------------------

    pub fn set_mode(&mut self, mode: TradeMode) {
        self.snapshot.mode = mode;
    }

    pub fn set_playoff_focus(&mut self, on: bool) {
        self.snapshot.playoff_focus = on;
    }

    pub fn set_strategy(&mut self, strategy: ScoringStrategy) {
        self.snapshot.strategy = strategy;
    }

    // -----------------------------------------------------------------------
    // Evaluation
    // -----------------------------------------------------------------------

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    pub fn evaluate(&self, league: &LeagueConfig) -> Result<TradeReport, EngineError> {
        engine::recompute(&self.snapshot, league)
    }
}
