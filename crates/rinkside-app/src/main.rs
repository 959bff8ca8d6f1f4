// Trade evaluator entry point.
//
// Startup sequence:
// 1. Initialize tracing (log to stderr, report goes to stdout)
// 2. Load config (copies defaults/ into config/ on first run)
// 3. Build the trade session from trade.toml
// 4. Read the player CSV and index it
// 5. Fill rosters
// 6. Evaluate and print the report (text, or JSON with --json)

use rinkside_core::config;
use rinkside_core::engine::TradeReport;
use rinkside_core::session::TradeSession;
use rinkside_core::valuation::TeamValuation;
use rinkside_core::verdict::Direction;

use anyhow::Context;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Initialize tracing
    init_tracing()?;
    let json = std::env::args().skip(1).any(|a| a == "--json");

    // 2. Load config
    let config = config::load_config().context("failed to load configuration")?;
    info!(
        "Config loaded: league={}, ${} salary cap, {} teams",
        config.league.name,
        config.league.salary_cap,
        config.trade.teams.len()
    );

    // 3. Session
    let mut session = TradeSession::from_trade_config(&config.trade);

    // 4. Player CSV
    let csv_bytes = tokio::fs::read(&config.trade.players_csv)
        .await
        .with_context(|| format!("failed to read player list {}", config.trade.players_csv))?;
    let count = session
        .load_csv_bytes(&csv_bytes)
        .with_context(|| format!("failed to parse player list {}", config.trade.players_csv))?;
    info!("Loaded {} players from {}", count, config.trade.players_csv);

    // 5. Rosters
    let rejected = session.apply_rosters(&config.trade);
    if !rejected.is_empty() {
        warn!("{} roster names did not match any player", rejected.len());
    }

    // 6. Evaluate
    let report = session
        .evaluate(&config.league)
        .context("failed to evaluate trade")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", render_text(&report, config.league.salary_cap));
    }
    Ok(())
}

/// Plain-text report: one block per team, then a category grid, then the verdict.
fn render_text(report: &TradeReport, salary_cap: f64) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "Strategy: {}  Mode: {}  Playoff focus: {}\n\n",
        report.strategy,
        report.mode,
        if report.playoff_focus { "on" } else { "off" }
    ));

    for team in &report.teams {
        out.push_str(&format!("{}\n", team.name));
        out.push_str(&format!(
            "  Salary: ${:.1}M / ${:.1}M{}\n",
            team.salary / 1e6,
            salary_cap / 1e6,
            if team.over_cap { "  OVER CAP" } else { "" }
        ));
        if let TeamValuation::Scalar(v) = &team.valuation {
            out.push_str(&format!(
                "  Now {:.1}  Future {:.1}  Cap {:.1}\n",
                v.now, v.future, v.cap
            ));
        }
        if let Some(total) = team.total_value {
            out.push_str(&format!("  Total value: {total:.1}\n"));
        }
        out.push_str(&format!("  Categories won: {}\n", team.category_wins));
    }

    out.push_str("\nCategory");
    for team in &report.teams {
        out.push_str(&format!(" | {:>12}", truncate(&team.name, 12)));
    }
    out.push('\n');

    for result in &report.categories {
        out.push_str(&format!("{:<8}", result.category.column()));
        for (value, dir) in result.values.iter().zip(&result.directions) {
            let mark = match dir {
                Direction::Win => '+',
                Direction::Loss => '-',
                Direction::Even => '=',
            };
            out.push_str(&format!(" | {value:>10.2} {mark}"));
        }
        out.push('\n');
    }

    out.push_str(&format!("\n{}\n", report.headline));
    out
}

fn truncate(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}

/// Initialize tracing to stderr so stdout carries only the report.
fn init_tracing() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("rinkside_core=info,rinkside=info,warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}
