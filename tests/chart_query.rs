// tests/chart_query.rs
use std::fs;
use std::path::PathBuf;

use lol_analytics::chart::{build_chart, ChartRequest, GameWindow, Metric};
use lol_analytics::config::options::{ExportFormat, InputSource, OutputPaths, PipelineOptions};
use lol_analytics::store::{self, PlayerStore};
use lol_analytics::{pipeline, query, stats};
use pretty_assertions::assert_eq;

const RAW: &str = "\
gameid,league,year,date,side,playername,playerid,teamname,teamid,champion,gamelength,kills,deaths,assists,result
A,LCK,2025,2025-02-01 08:00:00,Blue,Faker,p1,T1,t1,Ahri,1800,2,1,3,1
A,LCK,2025,2025-02-01 08:00:00,Red,Chovy,p2,GEN,g1,Azir,1800,4,2,1,0
B,LCK,2025,2025-02-01 10:00:00,Red,Faker,p1,T1,t1,Azir,1700,5,2,6,0
B,LCK,2025,2025-02-01 10:00:00,Blue,Chovy,p2,GEN,g1,Yone,1700,3,3,3,1
C,LCK,2025,2025-02-01 12:00:00,Blue,Faker,p1,T1,t1,Sylas,1900,7,0,2,1
D,LCK,2025,2025-01-30 18:00:00,Red,Faker,p1,T1,t1,Ryze,2000,1,4,1,0
";

fn tmp_dir(name: &str) -> PathBuf {
    let mut p = std::env::temp_dir();
    p.push(format!("lol_chart_{}", name));
    let _ = fs::remove_dir_all(&p);
    fs::create_dir_all(&p).unwrap();
    p
}

/// Run the pipeline into a fresh dir; returns (store, table file).
fn processed(name: &str) -> (PlayerStore, PathBuf) {
    let dir = tmp_dir(name);
    let raw = dir.join("raw.csv");
    fs::write(&raw, RAW).unwrap();
    let out = dir.join("processed");
    let opts = PipelineOptions {
        input: InputSource::Path(raw),
        output: OutputPaths::under(&out, ExportFormat::Csv),
        ..PipelineOptions::default()
    };
    let sum = pipeline::run(&opts, None).unwrap();
    (PlayerStore::new(out.join("players"), ExportFormat::Csv), sum.table_file)
}

#[test]
fn same_day_games_are_numbered_in_date_order() {
    let (store, _) = processed("ordinals");
    let chart = query::chart_for(&store, Some("Faker"), "", Metric::Kills, GameWindow::All);

    assert_eq!(
        chart.labels(),
        vec!["01/30/25 (1)", "02/01/25 (1)", "02/01/25 (2)", "02/01/25 (3)"]
    );
    assert_eq!(chart.values(), vec![1, 2, 5, 7]);
    assert_eq!(chart.y_max, 9);
    assert_eq!(chart.notice, None);
    assert_eq!(chart.bars[1].hover.opponent, "GEN");
    assert_eq!(chart.bars[1].hover.league, "LCK");
    assert_eq!(chart.bars[3].hover.opponent, "Unknown Opponent");
}

#[test]
fn full_table_with_player_filter_matches_player_file() {
    let (store, table_file) = processed("table_vs_file");
    let table = store::load_table(&table_file).unwrap();

    let req = ChartRequest { player: Some("Faker".into()), ..Default::default() };
    let from_table = build_chart(&table, &req);
    let from_file = query::chart_for(&store, Some("Faker"), "", Metric::Kills, GameWindow::All);
    assert_eq!(from_table.bars, from_file.bars);
    assert_eq!(from_table.y_max, from_file.y_max);
}

#[test]
fn threshold_text_filters_or_is_reported() {
    let (store, _) = processed("threshold");

    let chart = query::chart_for(&store, Some("Faker"), "5", Metric::Kills, GameWindow::All);
    assert_eq!(chart.values(), vec![5, 7]);

    let chart = query::chart_for(&store, Some("Faker"), "lots", Metric::Kills, GameWindow::All);
    assert_eq!(chart.bars.len(), 4);
    assert!(chart.notice.is_some());

    let chart = query::chart_for(&store, Some("Faker"), "50", Metric::Kills, GameWindow::All);
    assert!(chart.is_empty());
    assert_eq!(chart.y_max, 1);
    assert!(chart.notice.is_some());
}

#[test]
fn loaded_rows_chart_like_the_file() {
    let (store, _) = processed("loaded_rows");
    let rows = store.load_player("Faker").unwrap();

    for text in ["", "5", "lots", "50"] {
        let from_file = query::chart_for(&store, Some("Faker"), text, Metric::Kills, GameWindow::All);
        let from_rows = query::chart_from_rows(&rows, text, Metric::Kills, GameWindow::All);
        assert_eq!(from_rows, from_file);
    }
}

#[test]
fn unknown_player_gets_empty_chart() {
    let (store, _) = processed("unknown");
    let chart = query::chart_for(&store, Some("Nobody"), "3", Metric::Kills, GameWindow::All);
    assert!(chart.is_empty());
    assert_eq!(chart.y_max, 1);
    assert!(chart.notice.unwrap().contains("Nobody"));
}

#[test]
fn metric_and_window() {
    let (store, _) = processed("metric_window");
    let chart = query::chart_for(&store, Some("Faker"), "", Metric::Assists, GameWindow::Last(2));
    assert_eq!(chart.labels(), vec!["02/01/25 (2)", "02/01/25 (3)"]);
    assert_eq!(chart.values(), vec![6, 2]);
    assert_eq!(chart.bars.iter().map(|b| b.win).collect::<Vec<_>>(), vec![Some(false), Some(true)]);
}

#[test]
fn stats_over_player_file() {
    let (store, _) = processed("stats");
    let rows = store.load_player("Faker").unwrap();
    let sum = stats::summarize("Faker", &rows).unwrap();
    assert_eq!(sum.overall.games, 4);
    assert_eq!(sum.overall.wins, 2);
    assert_eq!(sum.team, "T1");
    // 15 kills + 12 assists over 7 deaths
    assert!((sum.overall.kda - 27.0 / 7.0).abs() < 1e-9);
    assert_eq!(stats::over_line_rate(&rows, Metric::Kills, 4.5, 2), Some(1.0));
}

#[test]
fn chart_json_has_bars_and_axis() {
    let (store, _) = processed("json");
    let chart = query::chart_for(&store, Some("Faker"), "", Metric::Kills, GameWindow::All);
    let v: serde_json::Value = serde_json::to_value(&chart).unwrap();
    assert_eq!(v["metric"], "kills");
    assert_eq!(v["y_max"], 9);
    assert_eq!(v["bars"].as_array().unwrap().len(), 4);
    assert!(v.get("notice").is_none());
}
