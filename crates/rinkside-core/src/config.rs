// Configuration loading and parsing (league.toml, trade.toml).

use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

use crate::players::category::Category;
use crate::valuation::weights::{CategoryWeights, DEFAULT_PLAYOFF_WEIGHTS};

/// League salary cap used when league.toml does not set one.
pub const DEFAULT_SALARY_CAP: f64 = 117_600_000.0;

/// Inclusive bounds on the number of sides in a trade.
pub const MIN_TEAMS: usize = 2;
pub const MAX_TEAMS: usize = 3;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },

    #[error("failed to initialize config from defaults: {message}")]
    DefaultsCopyError { message: String },
}

// ---------------------------------------------------------------------------
// Top-level assembled Config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct Config {
    pub league: LeagueConfig,
    pub trade: TradeConfig,
}

// ---------------------------------------------------------------------------
// Mode flags
// ---------------------------------------------------------------------------

/// Whether the user's side is chasing a title now or building for later.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TradeMode {
    #[default]
    Contend,
    Rebuild,
}

impl fmt::Display for TradeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TradeMode::Contend => f.write_str("contend"),
            TradeMode::Rebuild => f.write_str("rebuild"),
        }
    }
}

/// Which valuation and verdict pair to run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoringStrategy {
    /// One number per side (now / future / cap), verdict by total value.
    Scalar,
    /// Weighted per-category totals, verdict by sole category wins.
    #[default]
    PerCategory,
}

impl fmt::Display for ScoringStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScoringStrategy::Scalar => f.write_str("scalar"),
            ScoringStrategy::PerCategory => f.write_str("per_category"),
        }
    }
}

// ---------------------------------------------------------------------------
// league.toml structs
// ---------------------------------------------------------------------------

/// Wrapper for the top-level `[league]` table in league.toml.
#[derive(Debug, Clone, Deserialize)]
struct LeagueFile {
    league: LeagueConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LeagueConfig {
    pub name: String,
    /// Aggregate salary above which a side is flagged over the cap.
    pub salary_cap: f64,
    pub scoring: ScoringConfig,
    pub valuation: AgeCurveConfig,
    pub picks: PickConfig,
    pub modes: ModeTable,
}

impl Default for LeagueConfig {
    fn default() -> Self {
        LeagueConfig {
            name: "Fantasy Hockey League".into(),
            salary_cap: DEFAULT_SALARY_CAP,
            scoring: ScoringConfig::default(),
            valuation: AgeCurveConfig::default(),
            picks: PickConfig::default(),
            modes: ModeTable::default(),
        }
    }
}

impl LeagueConfig {
    /// Typed category weights. Assumes the config passed validation, so
    /// unknown column names have already been rejected.
    pub fn category_weights(&self) -> CategoryWeights {
        CategoryWeights::new(
            typed_weight_table(&self.scoring.category_weights),
            typed_weight_table(&self.scoring.playoff_weights),
        )
    }
}

fn typed_weight_table(raw: &BTreeMap<String, f64>) -> HashMap<Category, f64> {
    raw.iter()
        .filter_map(|(col, w)| Category::from_column(col).map(|c| (c, *w)))
        .collect()
}

/// `[league.scoring]`: comparator deadbands and category weight tables keyed
/// by CSV column name (`G`, `SV%`, ...).
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Two category totals within this distance are even.
    pub category_deadband: f64,
    /// Two scalar trade values closer than this are an even trade.
    pub verdict_deadband: f64,
    pub category_weights: BTreeMap<String, f64>,
    pub playoff_weights: BTreeMap<String, f64>,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        ScoringConfig {
            category_deadband: 1.0,
            verdict_deadband: 5.0,
            category_weights: BTreeMap::new(),
            playoff_weights: DEFAULT_PLAYOFF_WEIGHTS
                .iter()
                .map(|(c, w)| (c.column().to_string(), *w))
                .collect(),
        }
    }
}

/// `[league.valuation]`: age curve and cap scaling for the scalar strategy.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AgeCurveConfig {
    /// Players strictly younger than this get `young_bonus` future value.
    pub young_age: f64,
    pub young_bonus: f64,
    /// Players strictly older than this lose `veteran_penalty` future value.
    pub veteran_age: f64,
    pub veteran_penalty: f64,
    /// Age assumed when the CSV has none.
    pub default_age: f64,
    /// Salary is divided by this to get cap impact.
    pub salary_unit: f64,
}

impl Default for AgeCurveConfig {
    fn default() -> Self {
        AgeCurveConfig {
            young_age: 24.0,
            young_bonus: 30.0,
            veteran_age: 30.0,
            veteran_penalty: 20.0,
            default_age: 28.0,
            salary_unit: 1_000_000.0,
        }
    }
}

/// `[league.picks]`: base future value of a draft pick by round.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PickConfig {
    pub first_round: f64,
    pub second_round: f64,
}

impl Default for PickConfig {
    fn default() -> Self {
        PickConfig {
            first_round: 55.0,
            second_round: 35.0,
        }
    }
}

/// Multipliers applied to a side's components under one trade mode.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct ModeMultipliers {
    pub now: f64,
    pub future: f64,
    pub cap: f64,
    /// Scales draft-pick base value before it enters `future`.
    pub picks: f64,
}

/// `[league.modes.contend]` / `[league.modes.rebuild]`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ModeTable {
    pub contend: ModeMultipliers,
    pub rebuild: ModeMultipliers,
}

impl ModeTable {
    pub fn for_mode(&self, mode: TradeMode) -> &ModeMultipliers {
        match mode {
            TradeMode::Contend => &self.contend,
            TradeMode::Rebuild => &self.rebuild,
        }
    }
}

impl Default for ModeTable {
    fn default() -> Self {
        ModeTable {
            contend: ModeMultipliers {
                now: 1.25,
                future: 0.8,
                cap: 0.7,
                picks: 0.7,
            },
            rebuild: ModeMultipliers {
                now: 0.85,
                future: 1.4,
                cap: 1.1,
                picks: 1.4,
            },
        }
    }
}

// ---------------------------------------------------------------------------
// trade.toml structs
// ---------------------------------------------------------------------------

/// The trade under evaluation: where the players come from, the mode flags,
/// and what each side puts in.
#[derive(Debug, Clone, Deserialize)]
pub struct TradeConfig {
    pub players_csv: String,
    #[serde(default)]
    pub strategy: ScoringStrategy,
    #[serde(default)]
    pub mode: TradeMode,
    #[serde(default)]
    pub playoff_focus: bool,
    pub teams: Vec<TeamSpec>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TeamSpec {
    /// Display name. Defaults to "Team A", "Team B", ... by position.
    #[serde(default)]
    pub name: Option<String>,
    /// Names added through the resolve-or-reject path.
    #[serde(default)]
    pub players: Vec<String>,
    /// Free-text asset slots: partial names or pick labels.
    #[serde(default)]
    pub assets: Vec<String>,
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Parse and validate league.toml text on its own.
pub fn parse_league_config(text: &str, path: &Path) -> Result<LeagueConfig, ConfigError> {
    let league_file: LeagueFile = toml::from_str(text).map_err(|e| ConfigError::ParseError {
        path: path.to_path_buf(),
        source: e,
    })?;
    validate_league(&league_file.league)?;
    Ok(league_file.league)
}

/// Files `load_config` needs in `config/`, seeded from `defaults/` when absent.
pub const CONFIG_FILES: [&str; 2] = ["league.toml", "trade.toml"];

/// Environment variable naming the directory that holds `config/` and
/// `defaults/`. Falls back to the working directory.
pub const HOME_ENV: &str = "RINKSIDE_HOME";

/// Load and validate `config/league.toml` and `config/trade.toml` under
/// `base_dir`. Both files are required; nothing is seeded here.
pub fn load_config_from(base_dir: &Path) -> Result<Config, ConfigError> {
    let config_dir = base_dir.join("config");

    let (league_path, league_text) = read_config_file(&config_dir, "league.toml")?;
    let league = parse_league_config(&league_text, &league_path)?;

    let (trade_path, trade_text) = read_config_file(&config_dir, "trade.toml")?;
    let trade: TradeConfig = toml::from_str(&trade_text).map_err(|e| ConfigError::ParseError {
        path: trade_path,
        source: e,
    })?;
    validate_trade(&trade)?;

    Ok(Config { league, trade })
}

/// Seed each of [`CONFIG_FILES`] missing from `config/` with its copy in
/// `defaults/`. Existing files are never overwritten and nothing else in
/// `defaults/` is touched. Returns the paths that were written.
pub fn ensure_config_files(base_dir: &Path) -> Result<Vec<PathBuf>, ConfigError> {
    let defaults_dir = base_dir.join("defaults");
    let config_dir = base_dir.join("config");

    if !defaults_dir.is_dir() {
        if config_dir.is_dir() {
            return Ok(Vec::new());
        }
        return Err(seed_error(format!(
            "neither defaults/ nor config/ found under {}; run rinkside from the \
             rinkside-app directory or set {HOME_ENV}",
            base_dir.display()
        )));
    }

    std::fs::create_dir_all(&config_dir)
        .map_err(|e| seed_error(format!("cannot create {}: {e}", config_dir.display())))?;

    let mut seeded = Vec::new();
    for name in CONFIG_FILES {
        let source = defaults_dir.join(name);
        let target = config_dir.join(name);
        if target.exists() || !source.is_file() {
            continue;
        }
        std::fs::copy(&source, &target).map_err(|e| {
            seed_error(format!(
                "cannot seed {} from {}: {e}",
                target.display(),
                source.display()
            ))
        })?;
        info!("Seeded {} from defaults", target.display());
        seeded.push(target);
    }

    Ok(seeded)
}

/// Resolve the base directory ([`HOME_ENV`] or the working directory), seed
/// missing config files, then load.
pub fn load_config() -> Result<Config, ConfigError> {
    let base_dir = match std::env::var_os(HOME_ENV) {
        Some(dir) => PathBuf::from(dir),
        None => std::env::current_dir().map_err(|e| {
            seed_error(format!("cannot resolve the working directory: {e}"))
        })?,
    };
    ensure_config_files(&base_dir)?;
    load_config_from(&base_dir)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn read_config_file(config_dir: &Path, name: &str) -> Result<(PathBuf, String), ConfigError> {
    let path = config_dir.join(name);
    match std::fs::read_to_string(&path) {
        Ok(text) => Ok((path, text)),
        Err(_) => Err(ConfigError::FileNotFound { path }),
    }
}

fn seed_error(message: String) -> ConfigError {
    ConfigError::DefaultsCopyError { message }
}

fn invalid(field: impl Into<String>, message: impl Into<String>) -> ConfigError {
    ConfigError::ValidationError {
        field: field.into(),
        message: message.into(),
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate_league(league: &LeagueConfig) -> Result<(), ConfigError> {
    if !(league.salary_cap > 0.0) {
        return Err(invalid(
            "league.salary_cap",
            format!("must be > 0, got {}", league.salary_cap),
        ));
    }

    let scoring = &league.scoring;
    let deadbands: &[(&str, f64)] = &[
        ("scoring.category_deadband", scoring.category_deadband),
        ("scoring.verdict_deadband", scoring.verdict_deadband),
    ];
    for (name, val) in deadbands {
        if !(*val >= 0.0) {
            return Err(invalid(*name, format!("must be >= 0, got {val}")));
        }
    }

    let tables: &[(&str, &BTreeMap<String, f64>)] = &[
        ("scoring.category_weights", &scoring.category_weights),
        ("scoring.playoff_weights", &scoring.playoff_weights),
    ];
    for (table, weights) in tables {
        for (col, w) in weights.iter() {
            let field = format!("{table}.{col}");
            if Category::from_column(col).is_none() {
                return Err(invalid(field, "unknown category"));
            }
            if !(*w > 0.0) {
                return Err(invalid(field, format!("must be > 0, got {w}")));
            }
        }
    }

    if !(league.valuation.salary_unit > 0.0) {
        return Err(invalid(
            "valuation.salary_unit",
            format!("must be > 0, got {}", league.valuation.salary_unit),
        ));
    }

    let picks: &[(&str, f64)] = &[
        ("picks.first_round", league.picks.first_round),
        ("picks.second_round", league.picks.second_round),
    ];
    for (name, val) in picks {
        if !(*val >= 0.0) {
            return Err(invalid(*name, format!("must be >= 0, got {val}")));
        }
    }

    Ok(())
}

fn validate_trade(trade: &TradeConfig) -> Result<(), ConfigError> {
    if trade.players_csv.trim().is_empty() {
        return Err(invalid("trade.players_csv", "must not be empty"));
    }

    let n = trade.teams.len();
    if !(MIN_TEAMS..=MAX_TEAMS).contains(&n) {
        return Err(invalid(
            "trade.teams",
            format!("expected {MIN_TEAMS} to {MAX_TEAMS} teams, got {n}"),
        ));
    }

    for (i, team) in trade.teams.iter().enumerate() {
        if team.name.as_deref().is_some_and(|s| s.trim().is_empty()) {
            return Err(invalid(format!("trade.teams[{i}].name"), "must not be blank"));
        }
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
