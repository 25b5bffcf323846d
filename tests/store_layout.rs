// tests/store_layout.rs
use std::fs;
use std::path::PathBuf;

use lol_analytics::chart::{GameWindow, Metric};
use lol_analytics::config::options::{ExportFormat, InputSource, OutputPaths, PipelineOptions};
use lol_analytics::store::{self, LeagueIndex, PlayerStore};
use lol_analytics::{pipeline, query};

const RAW: &str = "\
gameid,league,year,date,side,playername,playerid,teamname,teamid,champion,gamelength,kills,deaths,assists,result
A,LCK,2025,2025-02-01,Blue,Faker,p1,T1,t1,Ahri,1800,2,1,3,1
A,LCK,2025,2025-02-01,Red,Chovy,p2,GEN,g1,Azir,1800,4,2,1,0
E,LEC,2025,2025-02-02,Blue,Caps,p3,G2,g2,Sylas,1800,6,1,5,1
E,LEC,2025,2025-02-02,Red,A/B,p4,FNC,f1,Ahri,1800,1,4,2,0
";

fn tmp_dir(name: &str) -> PathBuf {
    let mut p = std::env::temp_dir();
    p.push(format!("lol_store_{}", name));
    let _ = fs::remove_dir_all(&p);
    fs::create_dir_all(&p).unwrap();
    p
}

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
fn players_are_listed_by_file_stem() {
    let (store, _) = processed("stems");
    assert_eq!(store.list_players().unwrap(), vec!["A_B", "Caps", "Chovy", "Faker"]);

    // Selection by file works even though the name was sanitized
    let chart = query::chart_for(&store, Some("A_B"), "", Metric::Kills, GameWindow::All);
    assert_eq!(chart.values(), vec![1]);
    assert_eq!(chart.title, "A/B Kills");
}

#[test]
fn missing_players_dir_lists_nothing() {
    let dir = tmp_dir("missing");
    let store = PlayerStore::new(dir.join("nope"), ExportFormat::Csv);
    assert!(store.list_players().unwrap().is_empty());
    assert!(store.load_player("Faker").is_err());
}

#[test]
fn league_index_from_cleaned_table() {
    let (_, table_file) = processed("index");
    let idx = LeagueIndex::from_records(&store::load_table(&table_file).unwrap());
    assert_eq!(idx.leagues().collect::<Vec<_>>(), vec!["LCK", "LEC"]);
    assert_eq!(idx.teams("LEC").collect::<Vec<_>>(), vec!["FNC", "G2"]);
    assert_eq!(idx.players("LEC", "G2").into_iter().collect::<Vec<_>>(), vec!["Caps"]);
    assert_eq!(idx.players("", "").len(), 4);
}

#[test]
fn league_filter_keeps_sanitized_players() {
    let (store, table_file) = processed("filtered");
    let idx = LeagueIndex::from_records(&store::load_table(&table_file).unwrap());
    let files = store.list_players().unwrap();

    assert_eq!(idx.visible(&files, "LEC", ""), vec!["A_B", "Caps"]);
    assert_eq!(idx.visible(&files, "", "FNC"), vec!["A_B"]);
    assert_eq!(idx.visible(&files, "", ""), files);
    // Every listed stem is loadable
    for stem in idx.visible(&files, "LEC", "") {
        assert!(store.contains(&stem));
    }
}
