// tests/board.rs
use std::fs;
use std::path::PathBuf;

use pretty_assertions::assert_eq;

use lol_analytics::board::{self, Board, SortKey};
use lol_analytics::chart::{GameWindow, Metric};
use lol_analytics::config::options::{ExportFormat, InputSource, OutputPaths, PipelineOptions};
use lol_analytics::series::{self, SeriesKind};
use lol_analytics::store::{self, LeagueIndex, PlayerStore};
use lol_analytics::pipeline;

// One bo1 in 2024, one bo3 in 2025, both T1 vs GEN
const RAW: &str = "\
gameid,league,year,date,side,playername,playerid,teamname,teamid,champion,gamelength,kills,deaths,assists,result
Z,LCK,2024,2024-06-01 10:00:00,Blue,Faker,p1,T1,t1,Ahri,1800,3,1,2,1
Z,LCK,2024,2024-06-01 10:00:00,Red,Chovy,p2,GEN,g1,Azir,1800,1,3,1,0
A,LCK,2025,2025-02-01 10:00:00,Blue,Faker,p1,T1,t1,Ahri,1800,2,1,3,1
A,LCK,2025,2025-02-01 10:00:00,Red,Chovy,p2,GEN,g1,Azir,1800,4,2,1,0
B,LCK,2025,2025-02-01 11:00:00,Red,Faker,p1,T1,t1,Orianna,1800,5,2,1,0
B,LCK,2025,2025-02-01 11:00:00,Blue,Chovy,p2,GEN,g1,Azir,1800,6,1,4,1
C,LCK,2025,2025-02-01 12:00:00,Blue,Faker,p1,T1,t1,Ahri,1800,4,0,6,1
C,LCK,2025,2025-02-01 12:00:00,Red,Chovy,p2,GEN,g1,Syndra,1800,1,4,0,0
";

fn tmp_dir(name: &str) -> PathBuf {
    let mut p = std::env::temp_dir();
    p.push(format!("lol_board_{}", name));
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

fn names(rows: &[board::BoardRow]) -> Vec<&str> {
    rows.iter().map(|r| r.player.as_str()).collect()
}

#[test]
fn board_over_every_player_file() {
    let (store, _) = processed("lines");
    // Not a player export; skipped with an error in the log
    fs::write(store.dir().join("Broken.csv"), "hello,world\n1,2\n").unwrap();

    let b = Board::load(&store).unwrap();
    assert_eq!(b.len(), 2);
    assert_eq!(b.years(), &[2025, 2024]);

    let mut career = b.lines(None);
    board::sort_rows(&mut career, SortKey::WinRate, true);
    assert_eq!(names(&career), vec!["Faker", "Chovy"]);
    assert_eq!(career[0].line.games, 4);
    assert!((career[0].line.win_rate - 75.0).abs() < 1e-9);
    assert!((career[0].line.avg_kills - 3.5).abs() < 1e-9);

    let y2024 = b.lines(Some(2024));
    assert_eq!(y2024.iter().map(|r| r.line.games).collect::<Vec<_>>(), vec![1, 1]);
    assert!(b.lines(Some(2023)).is_empty());
}

#[test]
fn board_narrows_by_league_and_team() {
    let (store, table) = processed("narrow");
    let index = LeagueIndex::from_records(&store::load_table(&table).unwrap());
    let b = Board::load(&store).unwrap();

    let r#gen = board::narrow(b.lines(None), &index, "LCK", "GEN");
    assert_eq!(names(&r#gen), vec!["Chovy"]);
    assert_eq!(r#gen[0].stem, "Chovy");
    assert!(board::narrow(b.lines(None), &index, "LEC", "").is_empty());
    assert_eq!(board::narrow(b.lines(None), &index, "", "").len(), 2);
}

#[test]
fn form_table_for_a_season() {
    let (store, _) = processed("form");
    let form = Board::load(&store).unwrap().form(Metric::Kills, 2025);
    assert_eq!(form.iter().map(|f| f.player.as_str()).collect::<Vec<_>>(), vec!["Chovy", "Faker"]);

    // Faker: career 14/4 = 3.5, 2025 is 11/3
    let faker = &form[1];
    assert!((faker.average - 3.5).abs() < 1e-9);
    assert!((faker.year_diff - (11.0 / 3.0 - 3.5) / 3.5 * 100.0).abs() < 1e-9);
    // 5 and 4 are over 3.5
    assert!((faker.percent_over - 50.0).abs() < 1e-9);
}

#[test]
fn series_from_processed_player_file() {
    let (store, _) = processed("series");
    let rows = store.load_player("Faker").unwrap();

    let all = series::group_series(&rows);
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].kind, SeriesKind::Bo1);
    assert_eq!(all[1].kind, SeriesKind::Bo3);
    assert_eq!(all[1].opponent, "GEN");
    assert_eq!(all[1].score(), "BO3 2-1");
    assert!(all.iter().all(|s| s.won));

    let chart = series::series_chart(&rows, Metric::Kills, GameWindow::All);
    assert_eq!(chart.values(), vec![3, 11]);
    assert_eq!(chart.labels(), vec!["06/01/24: GEN (1)", "02/01/25: GEN (3)"]);
    assert!(chart.bars[1].hover.text().contains("Ahri, Orianna"));
}
