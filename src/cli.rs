// src/cli.rs
use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use color_eyre::eyre::{eyre, Result, WrapErr};

use chrono::{Datelike, Local};

use crate::board::{self, Board, SortKey};
use crate::chart::{GameWindow, Metric};
use crate::config::consts::*;
use crate::config::options::{DatePolicy, ExportFormat, InputSource, OutputPaths, PipelineOptions};
use crate::progress::Progress;
use crate::store::{self, LeagueIndex, PlayerStore};
use crate::{chart_png, pipeline, query, series, stats};

#[derive(Parser)]
#[command(name = "cli")]
#[command(about = "Clean LoL esports match exports and chart per-player stats", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Extract, clean and write the cleaned table plus one file per player
    Etl {
        /// Input file, or a pattern like data/raw/*.csv
        #[arg(short, long, default_value = DEFAULT_INPUT_PATTERN)]
        input: String,
        /// Cleaned table file (default: data/processed/cleaned_data.<ext>)
        #[arg(short, long)]
        out: Option<PathBuf>,
        /// Per-player directory (default: data/processed/players)
        #[arg(long)]
        players_dir: Option<PathBuf>,
        #[arg(long, value_enum, default_value_t = Format::Csv)]
        format: Format,
        /// Fail on an unparseable date instead of dropping the row
        #[arg(long)]
        abort_on_bad_date: bool,
        /// Delete player files this run did not produce
        #[arg(long)]
        prune: bool,
    },
    /// List players with a file in the players directory
    Players {
        #[arg(long)]
        players_dir: Option<PathBuf>,
        #[arg(long, value_enum, default_value_t = Format::Csv)]
        format: Format,
    },
    /// Print the chart for one player
    Chart {
        player: String,
        /// Minimum kills per game
        #[arg(long, default_value = "")]
        min_kills: String,
        #[arg(long, value_enum, default_value_t = MetricArg::Kills)]
        metric: MetricArg,
        /// Only the most recent N games
        #[arg(long)]
        last: Option<usize>,
        /// Print the whole description as JSON
        #[arg(long)]
        json: bool,
        /// Also write a PNG snapshot
        #[arg(long)]
        png: Option<PathBuf>,
        #[arg(long)]
        players_dir: Option<PathBuf>,
        #[arg(long, value_enum, default_value_t = Format::Csv)]
        format: Format,
    },
    /// Career summary for one player
    Stats {
        player: String,
        /// Also report how often the last N games went over this kills line
        #[arg(long)]
        line: Option<f64>,
        #[arg(long, default_value_t = 10)]
        last: usize,
        #[arg(long)]
        players_dir: Option<PathBuf>,
        #[arg(long, value_enum, default_value_t = Format::Csv)]
        format: Format,
    },
    /// Group one player's games into series (bo1/bo3/bo5) and chart them
    Series {
        player: String,
        #[arg(long, value_enum, default_value_t = MetricArg::Kills)]
        metric: MetricArg,
        /// Only the most recent N series
        #[arg(long)]
        last: Option<usize>,
        /// Print the series as JSON
        #[arg(long)]
        json: bool,
        /// Also write a PNG snapshot of the series chart
        #[arg(long)]
        png: Option<PathBuf>,
        #[arg(long)]
        players_dir: Option<PathBuf>,
        #[arg(long, value_enum, default_value_t = Format::Csv)]
        format: Format,
    },
    /// One line per player: career or a single year, or recent form
    Board {
        /// Only games played in this year
        #[arg(long)]
        year: Option<i32>,
        #[arg(long, default_value = "")]
        league: String,
        #[arg(long, default_value = "")]
        team: String,
        #[arg(long, value_enum, default_value_t = SortArg::WinRate)]
        sort: SortArg,
        /// Ascending instead of descending
        #[arg(long)]
        asc: bool,
        /// Hide players with fewer games in the period
        #[arg(long, default_value_t = 1)]
        min_games: usize,
        /// Form table in this metric instead (last 3/5/10, year, % over average)
        #[arg(long, value_enum)]
        form: Option<MetricArg>,
        /// Cleaned table, for the league/team filters
        #[arg(long)]
        table_file: Option<PathBuf>,
        #[arg(long)]
        json: bool,
        #[arg(long)]
        players_dir: Option<PathBuf>,
        #[arg(long, value_enum, default_value_t = Format::Csv)]
        format: Format,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Csv,
    Tsv,
}

impl From<Format> for ExportFormat {
    fn from(f: Format) -> Self {
        match f { Format::Csv => ExportFormat::Csv, Format::Tsv => ExportFormat::Tsv }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum MetricArg {
    Kills,
    Deaths,
    Assists,
}

impl From<MetricArg> for Metric {
    fn from(m: MetricArg) -> Self {
        match m {
            MetricArg::Kills => Metric::Kills,
            MetricArg::Deaths => Metric::Deaths,
            MetricArg::Assists => Metric::Assists,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum SortArg {
    Player,
    Games,
    WinRate,
    Kills,
    Deaths,
    Assists,
    Kda,
}

impl From<SortArg> for SortKey {
    fn from(s: SortArg) -> Self {
        match s {
            SortArg::Player => SortKey::Player,
            SortArg::Games => SortKey::Games,
            SortArg::WinRate => SortKey::WinRate,
            SortArg::Kills => SortKey::Kills,
            SortArg::Deaths => SortKey::Deaths,
            SortArg::Assists => SortKey::Assists,
            SortArg::Kda => SortKey::Kda,
        }
    }
}

/// Prints stage changes for humans; details go to the log.
struct StderrProgress;

impl Progress for StderrProgress {
    fn stage(&mut self, name: &str) {
        eprintln!("» {name}");
    }
    fn log(&mut self, msg: &str) {
        eprintln!("{msg}");
    }
}

pub fn run() -> Result<()> {
    color_eyre::install()?;
    crate::log::init_stderr();
    let cli = Cli::parse();

    match cli.command {
        Command::Etl { input, out, players_dir, format, abort_on_bad_date, prune } => {
            let format = ExportFormat::from(format);
            let defaults = OutputPaths::under(&PathBuf::from(DEFAULT_OUT_DIR), format);
            let opts = PipelineOptions {
                input: InputSource::parse(&input),
                output: OutputPaths {
                    table_file: out.unwrap_or(defaults.table_file),
                    players_dir: players_dir.unwrap_or(defaults.players_dir),
                },
                format,
                date_policy: if abort_on_bad_date { DatePolicy::Abort } else { DatePolicy::Drop },
                prune_stale: prune,
            };
            let mut progress = StderrProgress;
            let sum = pipeline::run(&opts, Some(&mut progress))
                .wrap_err_with(|| format!("pipeline failed for {}", opts.input.describe()))?;

            let r = &sum.report;
            println!("sources:            {}", sum.sources.len());
            println!("rows in:            {}", r.input_rows);
            println!("missing fields:     {}", r.dropped_missing);
            println!("bad dates:          {}", r.dropped_bad_date);
            println!("duplicates:         {}", r.duplicates_removed + r.join_duplicates_removed);
            println!("unknown opponents:  {}", r.unknown_opponents);
            println!("rows out:           {}", r.output_rows);
            println!("table:              {}", sum.table_file.display());
            println!("player files:       {}", sum.player_files.len());
            if !sum.pruned.is_empty() {
                println!("pruned:             {}", sum.pruned.len());
            }
        }

        Command::Players { players_dir, format } => {
            let store = store_at(players_dir, format);
            for p in store.list_players()? {
                println!("{p}");
            }
        }

        Command::Chart { player, min_kills, metric, last, json, png, players_dir, format } => {
            let store = store_at(players_dir, format);
            let chart = query::chart_for(
                &store,
                Some(&player),
                &min_kills,
                metric.into(),
                GameWindow::from_last(last),
            );

            if json {
                println!("{}", serde_json::to_string_pretty(&chart)?);
            } else {
                println!("{}  (y max {})", chart.title, chart.y_max);
                for b in &chart.bars {
                    let wl = match b.win { Some(true) => "W", Some(false) => "L", None => "-" };
                    println!("{:<14} {:>3}  {}  vs {}", b.label, b.value, wl, b.hover.opponent);
                }
            }
            if let Some(note) = &chart.notice {
                eprintln!("{note}");
            }
            if let Some(path) = png {
                chart_png::save(&chart, &path, 1200, 600)
                    .wrap_err_with(|| format!("writing {}", path.display()))?;
                eprintln!("Wrote {}", path.display());
            }
        }

        Command::Stats { player, line, last, players_dir, format } => {
            let store = store_at(players_dir, format);
            if !store.contains(&player) {
                return Err(eyre!("no data for player {player:?} in {}", store.dir().display()));
            }
            let rows = store.load_player(&player)?;
            let Some(sum) = stats::summarize(&player, &rows) else {
                println!("{player}: no games");
                return Ok(());
            };

            let o = &sum.overall;
            println!("{} ({})", sum.player, sum.team);
            println!(
                "all   {:>4} games  {:>5.1}% wins  {:.2}/{:.2}/{:.2}  KDA {:.2}",
                o.games, o.win_rate, o.avg_kills, o.avg_deaths, o.avg_assists, o.kda
            );
            for (year, y) in &sum.years {
                println!(
                    "{year}  {:>4} games  {:>5.1}% wins  {:.2}/{:.2}/{:.2}  KDA {:.2}",
                    y.games, y.win_rate, y.avg_kills, y.avg_deaths, y.avg_assists, y.kda
                );
            }
            println!(
                "kills, last {last} vs career: {:+.0}%",
                stats::recent_form(&rows, Metric::Kills, last)
            );
            if let Some(line) = line {
                if let Some(rate) = stats::over_line_rate(&rows, Metric::Kills, line, last) {
                    println!("over {line} kills in last {last}: {:.0}%", rate * 100.0);
                }
            }
        }

        Command::Series { player, metric, last, json, png, players_dir, format } => {
            let store = store_at(players_dir, format);
            if !store.contains(&player) {
                return Err(eyre!("no data for player {player:?} in {}", store.dir().display()));
            }
            let rows = store.load_player(&player)?;
            let window = GameWindow::from_last(last);
            let all = series::group_series(&rows);
            let shown = &all[window.skip(all.len())..];

            if json {
                println!("{}", serde_json::to_string_pretty(shown)?);
            } else {
                let won = all.iter().filter(|s| s.won).count();
                println!("{player}: {} series, {won} won", all.len());
                for s in shown {
                    println!(
                        "{:<24} {:<8} {}  K/D/A {}/{}/{}",
                        s.label(),
                        s.score(),
                        if s.won { "W" } else { "L" },
                        s.kills,
                        s.deaths,
                        s.assists
                    );
                }
            }
            if let Some(path) = png {
                let chart = series::series_chart(&rows, metric.into(), window);
                chart_png::save(&chart, &path, 1200, 600)
                    .wrap_err_with(|| format!("writing {}", path.display()))?;
                eprintln!("Wrote {}", path.display());
            }
        }

        Command::Board {
            year, league, team, sort, asc, min_games, form, table_file, json, players_dir, format,
        } => {
            let store = store_at(players_dir, format);
            let b = Board::load(&store)?;

            if let Some(metric) = form {
                let year = year.unwrap_or_else(|| Local::now().year());
                let lines = b.form(metric.into(), year);
                if json {
                    println!("{}", serde_json::to_string_pretty(&lines)?);
                    return Ok(());
                }
                println!(
                    "{:<20} {:<14} {:>6} {:>6} {:>6} {:>6} {:>6} {:>7}",
                    "player", "team", "avg", "L3", "L5", "L10", year, "% over"
                );
                for f in &lines {
                    let last: Vec<String> = f.last.iter().map(|(_, d)| format!("{d:>+6.0}")).collect();
                    println!(
                        "{:<20} {:<14} {:>6.2} {} {:>+6.0} {:>7.0}",
                        f.player,
                        f.team,
                        f.average,
                        last.join(" "),
                        f.year_diff,
                        f.percent_over
                    );
                }
                return Ok(());
            }

            let mut rows = b.lines(year);
            if !league.is_empty() || !team.is_empty() {
                let path = table_file.unwrap_or_else(|| {
                    PathBuf::from(DEFAULT_OUT_DIR).join(join!(DEFAULT_TABLE_FILE, ".", ExportFormat::from(format).ext()))
                });
                let index = LeagueIndex::from_records(
                    &store::load_table(&path).wrap_err("league/team filters need the cleaned table")?,
                );
                rows = board::narrow(rows, &index, &league, &team);
            }
            rows.retain(|r| r.line.games >= min_games);
            board::sort_rows(&mut rows, sort.into(), !asc);

            if json {
                println!("{}", serde_json::to_string_pretty(&rows)?);
                return Ok(());
            }
            println!(
                "{:<20} {:<14} {:>5} {:>6} {:>5} {:>5} {:>5} {:>5}",
                "player", "team", "games", "win %", "K", "D", "A", "KDA"
            );
            for r in &rows {
                let l = &r.line;
                println!(
                    "{:<20} {:<14} {:>5} {:>6.1} {:>5.2} {:>5.2} {:>5.2} {:>5.2}",
                    r.player, r.team, l.games, l.win_rate, l.avg_kills, l.avg_deaths, l.avg_assists, l.kda
                );
            }
        }
    }

    Ok(())
}

fn store_at(players_dir: Option<PathBuf>, format: Format) -> PlayerStore {
    let dir = players_dir
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUT_DIR).join(DEFAULT_PLAYERS_SUBDIR));
    PlayerStore::new(dir, format.into())
}
