//! IPL Insights CLI
//!
//! Command-line interface over the same queries the API serves:
//! - Player search
//! - Squad lookup
//! - Leaderboards
//! - Team, player and season directories

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::path::PathBuf;

use ipl_insights::config::{generate_default_config, Config};
use ipl_insights::data::{Dataset, DatasetLoader};
use ipl_insights::logging;
use ipl_insights::query::{
    directory, player_report, squad_for, Board, BoardOutcome, PlayerOutcome, PlayerQuery,
    SquadOutcome, TeamSummary,
};

#[derive(Parser)]
#[command(name = "ipl-insights")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "IPL match and ball-by-ball analytics")]
#[command(long_about = "IPL Insights loads the league's match and delivery tables.\nSearch players, look up squads and browse leaderboards.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (default: <config_dir>/ipl-insights/config.toml, then ./config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Match table, overrides the configured path
    #[arg(long, global = true)]
    pub matches: Option<PathBuf>,

    /// Delivery table, overrides the configured path
    #[arg(long, global = true)]
    pub deliveries: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table", global = true)]
    pub format: OutputFormat,

    /// Log at the configured level instead of warnings only
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Per-season batting and bowling for a player
    Player {
        /// Player name, matched case-insensitively
        name: String,
        /// Match the stored name exactly
        #[arg(long)]
        exact: bool,
    },

    /// Everyone who batted or bowled for a team in one season
    Squad {
        /// Team name; historical names are accepted
        team: String,
        /// Season year
        year: i32,
    },

    /// Show one leaderboard
    Board {
        /// Board name (see `boards`)
        board: String,
        /// Number of entries (default: 10, all teams for team-wins)
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// List available leaderboards
    Boards,

    /// List teams in the match table
    Teams,

    /// List players
    Players {
        /// Case-insensitive substring filter
        #[arg(long)]
        filter: Option<String>,
    },

    /// Load statistics and season range
    Summary,

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_with_env(path)
            .with_context(|| format!("Cannot load config from {:?}", path))?,
        None => Config::load_default(),
    };
    if let Some(path) = &cli.matches {
        config.data.matches_path = path.display().to_string();
    }
    if let Some(path) = &cli.deliveries {
        config.data.deliveries_path = path.display().to_string();
    }
    if !cli.verbose {
        config.logging.level = "warn".to_string();
    }
    logging::init(&config.logging);

    let format = cli.format;

    match cli.command {
        Commands::Config { output } => {
            let content = generate_default_config();
            match output {
                Some(path) => {
                    std::fs::write(&path, content)
                        .with_context(|| format!("Cannot write config to {:?}", path))?;
                    println!("Config written to {:?}", path);
                }
                None => print!("{}", content),
            }
        }

        Commands::Player { name, exact } => {
            let data = load(&config)?;
            let query = if exact {
                PlayerQuery::Exact(&name)
            } else {
                PlayerQuery::Search(&name)
            };
            let outcome = player_report(&data, query)?;
            emit(format, &outcome, print_player)?;
        }

        Commands::Squad { team, year } => {
            let data = load(&config)?;
            let outcome = squad_for(&data, &team, year)?;
            emit(format, &outcome, print_squad)?;
        }

        Commands::Board { board, limit } => {
            let data = load(&config)?;
            let board: Board = board.parse()?;
            let outcome = board.compute(&data, limit)?;
            emit(format, &outcome, print_board)?;
        }

        Commands::Boards => {
            let boards: Vec<BoardRow> = Board::all()
                .iter()
                .map(|board| BoardRow {
                    board: board.slug(),
                    title: board.title(),
                    metric: board.metric(),
                })
                .collect();
            emit(format, &boards, |rows| {
                println!("{:<20} {:<10} {}", "Board", "Metric", "Title");
                println!("{}", "-".repeat(70));
                for row in rows {
                    println!("{:<20} {:<10} {}", row.board, row.metric, row.title);
                }
            })?;
        }

        Commands::Teams => {
            let data = load(&config)?;
            let teams = directory::teams(&data);
            emit(format, &teams, |teams| print_teams(teams))?;
        }

        Commands::Players { filter } => {
            let data = load(&config)?;
            let players = directory::players(&data, filter.as_deref());
            emit(format, &players, |players| {
                if players.is_empty() {
                    println!("No players match");
                    return;
                }
                for name in players {
                    println!("{}", name);
                }
                println!();
                println!("{} players", players.len());
            })?;
        }

        Commands::Summary => {
            let data = load(&config)?;
            let summary = Summary {
                report: &data.report,
                seasons: directory::seasons(&data),
                teams: data.teams().len(),
                players: data.players().len(),
                loaded_at: data.loaded_at.to_rfc3339(),
            };
            emit(format, &summary, print_summary)?;
        }
    }

    Ok(())
}

fn load(config: &Config) -> anyhow::Result<Dataset> {
    let source = config.data.source();
    let loader = DatasetLoader::new(std::sync::Arc::new(config.franchise_table()));
    let data = loader.load(&source).with_context(|| {
        format!(
            "Cannot load {:?} and {:?}",
            source.matches_path, source.deliveries_path
        )
    })?;

    if data.report.rows_failed > 0 {
        eprintln!(
            "Warning: {} rows could not be read (run `summary` for details)",
            data.report.rows_failed
        );
    }
    Ok(data)
}

/// Print as JSON or hand off to the table printer
fn emit<T: Serialize + ?Sized>(
    format: OutputFormat,
    value: &T,
    table: impl FnOnce(&T),
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(value)?),
        OutputFormat::Table => table(value),
    }
    Ok(())
}

#[derive(Serialize)]
struct BoardRow {
    board: &'static str,
    title: &'static str,
    metric: &'static str,
}

#[derive(Serialize)]
struct Summary<'a> {
    report: &'a ipl_insights::data::LoadReport,
    seasons: directory::SeasonSummary,
    teams: usize,
    players: usize,
    loaded_at: String,
}

fn print_player(outcome: &PlayerOutcome) {
    let report = match outcome {
        PlayerOutcome::Found(report) => report,
        PlayerOutcome::NotFound { query } => {
            println!("No player named '{}'", query);
            println!();
            println!("Browse names with:");
            println!("  ipl-insights players --filter {}", query);
            return;
        }
        PlayerOutcome::NoData { player } => {
            println!("No batting or bowling data for {}", player);
            return;
        }
    };

    println!("{}", report.player);
    println!();

    if report.batting.is_empty() {
        println!("Batting: no seasons on record");
    } else {
        println!("{:<8} {:>8} {:>8} {:>8} {:>10}", "Season", "Runs", "Balls", "Matches", "SR");
        println!("{}", "-".repeat(46));
        for row in &report.batting {
            println!(
                "{:<8} {:>8} {:>8} {:>8} {:>10.2}",
                row.season, row.runs, row.balls, row.matches, row.strike_rate
            );
        }
    }
    println!();

    if report.bowling.is_empty() {
        println!("Bowling: no seasons on record");
    } else {
        println!("{:<8} {:>8} {:>8}", "Season", "Balls", "Wickets");
        println!("{}", "-".repeat(26));
        for row in &report.bowling {
            println!("{:<8} {:>8} {:>8}", row.season, row.balls, row.wickets);
        }
    }
    println!();

    let career = &report.career;
    let sr = career
        .strike_rate
        .map(|sr| format!("{:.2}", sr))
        .unwrap_or_else(|| "-".to_string());
    println!(
        "Career: {} runs off {} balls (SR {}), {} wickets in {} balls",
        career.runs, career.balls_faced, sr, career.wickets, career.balls_bowled
    );
}

fn print_squad(outcome: &SquadOutcome) {
    match outcome {
        SquadOutcome::Squad {
            team,
            year,
            players,
        } => {
            println!("{} squad, {}", team, year);
            println!("{}", "-".repeat(40));
            for name in players {
                println!("  {}", name);
            }
            println!();
            println!("{} players", players.len());
        }
        SquadOutcome::DidNotPlay { team, year, active } => {
            let spans: Vec<String> = active.iter().map(|span| span.to_string()).collect();
            println!(
                "{} did not play in {} (active: {})",
                team,
                year,
                spans.join(", ")
            );
        }
        SquadOutcome::NoMatches { team, year } => {
            println!("No matches recorded for {} in {}", team, year);
        }
        SquadOutcome::NoSquadData { team, year } => {
            println!("No squad data for {} in {}", team, year);
        }
    }
}

fn print_board(outcome: &BoardOutcome) {
    let board = match outcome {
        BoardOutcome::Ranked(board) => board,
        BoardOutcome::NoResult { board } => {
            println!("{}: no qualifying entries", board.title());
            return;
        }
    };

    println!("{}", board.title);
    println!();
    println!("{:>4}  {:<40} {:>10}", "#", "Name", board.metric);
    println!("{}", "-".repeat(56));
    for entry in &board.entries {
        println!("{:>4}  {:<40} {:>10}", entry.rank, entry.label, entry.value.to_string());
    }
}

fn print_teams(teams: &[TeamSummary]) {
    if teams.is_empty() {
        println!("No teams in the match table");
        return;
    }

    println!("{:<36} {:>8} {}", "Team", "Matches", "Active");
    println!("{}", "-".repeat(64));
    for team in teams {
        let active = if team.active.is_empty() {
            "-".to_string()
        } else {
            team.active
                .iter()
                .map(|span| span.to_string())
                .collect::<Vec<_>>()
                .join(", ")
        };
        let marker = if team.unmapped { " (unmapped)" } else { "" };
        println!("{:<36} {:>8} {}{}", team.name, team.matches, active, marker);
    }
}

fn print_summary(summary: &Summary<'_>) {
    let report = summary.report;

    println!("IPL Insights v{}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Loaded at: {}", summary.loaded_at);
    println!("  Matches: {}", report.matches);
    println!("  Deliveries: {}", report.deliveries);
    println!("  Teams: {}", summary.teams);
    println!("  Players: {}", summary.players);

    match summary.seasons.latest {
        Some(latest) => println!(
            "  Seasons: {} on record, {}-{}",
            summary.seasons.seasons.len(),
            summary.seasons.first,
            latest
        ),
        None => println!("  Seasons: none"),
    }

    println!();
    println!("Data quality:");
    println!("  Rows failed: {}", report.rows_failed);
    println!("  Invalid seasons: {}", report.invalid_seasons);
    println!("  Duplicate matches: {}", report.duplicate_matches);
    println!("  Dangling deliveries: {}", report.dangling_deliveries);
    if !report.unmapped_teams.is_empty() {
        println!("  Unmapped teams:");
        for team in &report.unmapped_teams {
            println!("    {}", team);
        }
    }

    if !report.errors.is_empty() {
        println!();
        println!("Errors (first 10):");
        for error in report.errors.iter().take(10) {
            println!("  {}", error);
        }
    }
}
