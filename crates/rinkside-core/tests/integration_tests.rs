// Integration tests for the trade evaluator core.
//
// These tests drive the public API end-to-end: CSV import from disk, index
// build, roster edits through a session, both scoring strategies, and the
// JSON report shape.

use std::collections::BTreeMap;
use std::path::Path;

use rinkside_core::config::{LeagueConfig, ScoringStrategy, TradeMode};
use rinkside_core::engine::{recompute, Snapshot, Team};
use rinkside_core::players::{load_players, parse_players, Category, LoadError, PlayerIndex};
use rinkside_core::session::TradeSession;
use rinkside_core::trade::{AddOutcome, Resolved, Roster};
use rinkside_core::valuation::{per_category, scalar, CategoryWeights, TeamValuation};
use rinkside_core::verdict::{compare_category, Direction, Verdict};

// ===========================================================================
// Test helpers
// ===========================================================================

/// Fixture directory path (relative to the package root, which is the cwd
/// for `cargo test`).
const FIXTURES: &str = "tests/fixtures";

fn approx_eq(a: f64, b: f64, epsilon: f64) -> bool {
    (a - b).abs() < epsilon
}

fn fixture_index() -> PlayerIndex {
    let records = load_players(&Path::new(FIXTURES).join("players.csv")).unwrap();
    PlayerIndex::build(records)
}

fn fixture_session(teams: usize, strategy: ScoringStrategy) -> TradeSession {
    let text = std::fs::read_to_string(Path::new(FIXTURES).join("players.csv")).unwrap();
    let mut session = TradeSession::new(teams, strategy);
    session.load_csv_text(&text).unwrap();
    session
}

// ===========================================================================
// CSV import
// ===========================================================================

#[test]
fn joe_smith_row_normalizes() {
    let records = parse_players("Name,G,A\nJoe Smith,10,5").unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].key, "joesmith");
    assert_eq!(records[0].column("G"), Some("10"));
    assert_eq!(records[0].column("A"), Some("5"));
    assert_eq!(records[0].stat(Category::Goals), 10.0);
}

#[test]
fn fixture_loads_leniently() {
    let index = fixture_index();
    // Blank line skipped; short and malformed row kept.
    assert_eq!(index.len(), 5);

    let obrien = index.get("ryanobrien").unwrap();
    assert_eq!(obrien.name, "Ryan O'Brien");
    assert_eq!(obrien.age, Some(22.0));
    assert_eq!(obrien.salary, Some(3_000_000.0));

    let spare = index.get("petespare").unwrap();
    assert_eq!(spare.age, None);
    assert_eq!(spare.salary_or_zero(), 0.0);
    assert_eq!(spare.stat(Category::Goals), 7.0);
    assert_eq!(spare.stat(Category::Assists), 0.0);
    assert_eq!(spare.stat(Category::Hits), 0.0);

    let keeper = index.get("samkeeper").unwrap();
    assert!(keeper.is_goalie());
    assert!(approx_eq(keeper.stat(Category::SavePercentage), 0.915, 1e-12));
}

#[test]
fn missing_file_is_io_error() {
    let err = load_players(&Path::new(FIXTURES).join("no_such_file.csv")).unwrap_err();
    match err {
        LoadError::Io { path, .. } => assert!(path.ends_with("no_such_file.csv")),
        other => panic!("expected Io, got: {other}"),
    }
}

#[test]
fn empty_text_has_no_header() {
    assert!(matches!(parse_players(""), Err(LoadError::MissingHeader)));
}

// ===========================================================================
// Rosters
// ===========================================================================

#[test]
fn adding_unknown_name_is_a_noop() {
    let index = fixture_index();
    let mut roster = Roster::new();
    assert!(matches!(roster.add_player("Luke Hansen", &index), AddOutcome::Added(_)));
    let before = roster.clone();

    assert_eq!(roster.add_player("Wayne Gretzky", &index), AddOutcome::NotFound);
    assert_eq!(roster, before);
    assert_eq!(
        roster.add_player("LUKE hansen!", &index),
        AddOutcome::Duplicate("lukehansen".into())
    );
    assert_eq!(roster, before);
}

#[test]
fn asset_text_resolves_player_then_pick() {
    let index = fixture_index();
    let mut roster = Roster::new();
    roster.push_asset("tremblay");
    roster.push_asset("2024 1st");
    roster.push_asset("  ");
    roster.push_asset("future considerations");

    let resolved: Vec<Resolved> = roster.entries().iter().map(|e| e.resolve(&index)).collect();
    assert!(matches!(resolved[0], Resolved::Player(p) if p.key == "marcandretremblay"));
    assert!(matches!(resolved[1], Resolved::Pick(_)));
    assert_eq!(resolved[2], Resolved::Empty);
    assert_eq!(resolved[3], Resolved::Unresolved);
}

// ===========================================================================
// Valuation
// ===========================================================================

#[test]
fn pick_only_roster_under_rebuild() {
    let index = PlayerIndex::default();
    let mut roster = Roster::new();
    roster.push_asset("2024 1st");
    roster.push_asset("2025 2nd");

    let v = scalar::value_team(&roster, &index, &LeagueConfig::default(), TradeMode::Rebuild);
    assert!(approx_eq(v.future, 126.0, 1e-9));
    assert_eq!(v.now, 0.0);
    assert_eq!(v.cap, 0.0);
}

#[test]
fn playoff_focus_only_moves_listed_categories() {
    let index = fixture_index();
    let mut roster = Roster::new();
    roster.add_player("Ryan O'Brien", &index);

    let mut playoff = std::collections::HashMap::new();
    playoff.insert(Category::Goals, 1.15);
    playoff.insert(Category::Hits, 0.85);
    let weights = CategoryWeights::new(Default::default(), playoff);

    let off = per_category::value_team(&roster, &index, &weights, false);
    let on = per_category::value_team(&roster, &index, &weights, true);

    assert!(approx_eq(on.total(Category::Goals), 30.0 * 1.15, 1e-9));
    assert!(approx_eq(on.total(Category::Hits), 20.0 * 0.85, 1e-9));
    for cat in [Category::Assists, Category::Points, Category::ShotsOnGoal, Category::Takeaways] {
        assert_eq!(on.total(cat), off.total(cat), "{cat} should be unchanged");
    }
    assert_eq!(on.salary, off.salary);
}

// ===========================================================================
// Comparator and verdict
// ===========================================================================

#[test]
fn near_equal_totals_are_even_both_ways() {
    for (a, b) in [(3.0, 4.0), (100.0, 99.5), (0.0, 0.0)] {
        assert_eq!(compare_category(a, b, 1.0), Direction::Even);
        assert_eq!(compare_category(b, a, 1.0), Direction::Even);
    }
}

#[test]
fn three_team_tie_at_max_counts_for_nobody() {
    let csv = "Name,G,A\nA One,10,3\nB One,10,1\nC One,5,1";
    let mut session = TradeSession::new(3, ScoringStrategy::PerCategory);
    session.load_csv_text(csv).unwrap();
    session.add_player(0, "A One").unwrap();
    session.add_player(1, "B One").unwrap();
    session.add_player(2, "C One").unwrap();

    let report = session.evaluate(&LeagueConfig::default()).unwrap();
    let goals = &report.categories[0];
    assert_eq!(goals.category, Category::Goals);
    assert_eq!(goals.winners, vec![0, 1]);
    assert_eq!(goals.sole_winner(), None);

    // Only A's assists count.
    assert_eq!(report.teams.iter().map(|t| t.category_wins).collect::<Vec<_>>(), vec![1, 0, 0]);
    assert_eq!(report.verdict, Verdict::Gainer { team: 0 });
}

#[test]
fn per_category_three_team_trade() {
    let mut session = fixture_session(3, ScoringStrategy::PerCategory);
    session.add_player(0, "Ryan O'Brien").unwrap();
    session.add_player(1, "Marc-Andre Tremblay").unwrap();
    session.add_player(2, "Luke Hansen").unwrap();
    session.add_player(2, "Sam Keeper").unwrap();

    let report = session.evaluate(&LeagueConfig::default()).unwrap();

    // A: G A PTS SOG; B: HIT; C: Tk plus all six goalie categories.
    let wins: Vec<usize> = report.teams.iter().map(|t| t.category_wins).collect();
    assert_eq!(wins, vec![4, 1, 7]);
    assert_eq!(report.verdict, Verdict::Gainer { team: 2 });
    assert_eq!(report.headline, "Team C gains the most value");

    assert!(approx_eq(report.teams[2].salary, 5_500_000.0, 1e-6));
    assert!(report.teams.iter().all(|t| !t.over_cap));
    assert!(report.teams.iter().all(|t| t.total_value.is_none()));
}

#[test]
fn scalar_two_team_trade_with_pick() {
    let mut session = fixture_session(2, ScoringStrategy::Scalar);
    session.add_player(0, "Ryan O'Brien").unwrap();
    session.add_player(1, "Marc-Andre Tremblay").unwrap();
    session.push_asset(1, "2025 1st").unwrap();

    let report = session.evaluate(&LeagueConfig::default()).unwrap();

    // O'Brien: now 375, future +30 (age 22), cap -3
    // 375*1.25 + 30*0.8 - 3*0.7 = 490.65
    assert!(approx_eq(report.teams[0].total_value.unwrap(), 490.65, 1e-9));
    // Tremblay: now 310, future -20 (age 33) + 55*0.7, cap -8
    // 310*1.25 + 18.5*0.8 - 8*0.7 = 396.7
    assert!(approx_eq(report.teams[1].total_value.unwrap(), 396.7, 1e-9));

    match &report.teams[1].valuation {
        TeamValuation::Scalar(v) => assert!(approx_eq(v.future, 18.5, 1e-9)),
        other => panic!("expected scalar valuation, got {other:?}"),
    }
    assert_eq!(report.verdict, Verdict::Gainer { team: 0 });
    assert_eq!(report.headline, "Team A Wins");
}

#[test]
fn all_ties_is_balanced() {
    let session = fixture_session(3, ScoringStrategy::PerCategory);
    let report = session.evaluate(&LeagueConfig::default()).unwrap();
    assert_eq!(report.verdict, Verdict::Balanced);
    assert!(report.categories.iter().all(|c| c.is_tie()));
}

// ===========================================================================
// Re-upload and snapshot semantics
// ===========================================================================

#[test]
fn reupload_replaces_players_and_orphans_keys() {
    let mut session = fixture_session(2, ScoringStrategy::PerCategory);
    session.add_player(0, "Luke Hansen").unwrap();
    session.add_player(1, "Pete Spare").unwrap();
    assert_eq!(
        session.evaluate(&LeagueConfig::default()).unwrap().verdict,
        Verdict::Gainer { team: 0 }
    );

    let count = session.load_csv_text("Name,G\nPete Spare,7").unwrap();
    assert_eq!(count, 1);
    assert!(session.index().get("lukehansen").is_none());

    let report = session.evaluate(&LeagueConfig::default()).unwrap();
    match &report.teams[0].valuation {
        TeamValuation::PerCategory(v) => assert!(v.totals.values().all(|t| *t == 0.0)),
        other => panic!("expected per-category valuation, got {other:?}"),
    }
    assert_eq!(report.verdict, Verdict::Gainer { team: 1 });
}

#[test]
fn recompute_is_pure_over_a_snapshot() {
    let index = fixture_index();
    let mut a = Team::new("Mine");
    a.roster.add_player("Sam Keeper", &index);
    let snapshot = Snapshot {
        index,
        teams: vec![a, Team::new("Theirs")],
        strategy: ScoringStrategy::PerCategory,
        mode: TradeMode::Contend,
        playoff_focus: true,
    };
    let league = LeagueConfig::default();

    let first = recompute(&snapshot, &league).unwrap();
    let second = recompute(&snapshot, &league).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.headline, "Mine gains the most value");
}

#[test]
fn report_json_shape() {
    let mut session = fixture_session(2, ScoringStrategy::Scalar);
    session.add_player(0, "Sam Keeper").unwrap();
    let report = session.evaluate(&LeagueConfig::default()).unwrap();

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["strategy"], "scalar");
    assert_eq!(json["mode"], "contend");
    assert_eq!(json["teams"][0]["valuation"]["kind"], "scalar");
    assert_eq!(json["teams"][0]["over_cap"], false);
    assert_eq!(json["verdict"]["kind"], "gainer");
    assert_eq!(json["verdict"]["team"], 0);

    let cats: BTreeMap<String, serde_json::Value> =
        serde_json::from_value(json["teams"][0]["valuation"]["categories"].clone()).unwrap();
    assert!(cats.contains_key("SV%"));
    assert!(!cats.contains_key("G"));
}
