// benches/pipeline.rs
use criterion::{criterion_group, criterion_main, Criterion, black_box};

use lol_analytics::chart::{build_chart, ChartRequest};
use lol_analytics::config::options::DatePolicy;
use lol_analytics::record::RawRecord;
use lol_analytics::extract::RawTable;
use lol_analytics::transform::transform;

/// Synthetic season: `games` two-team games, five players a side, every
/// tenth game exported twice.
fn synthetic(games: usize) -> Vec<RawRecord> {
    let mut rows = Vec::with_capacity(games * 11);
    for g in 0..games {
        let day = 1 + (g / 3) % 28;
        let hour = 8 + (g % 3) * 2;
        for (side, team) in [("Blue", g % 8), ("Red", (g + 3) % 8)] {
            for slot in 0..5 {
                let player = format!("P{}_{}", team, slot);
                rows.push(RawRecord {
                    gameid: Some(format!("G{g}")),
                    league: Some("LCK".into()),
                    year: Some("2025".into()),
                    date: Some(format!("2025-03-{day:02} {hour:02}:00:00")),
                    side: Some(side.into()),
                    playername: Some(player.clone()),
                    playerid: Some(format!("id-{player}")),
                    teamname: Some(format!("Team {team}")),
                    teamid: Some(format!("t{team}")),
                    champion: Some("Ahri".into()),
                    gamelength: Some("1800".into()),
                    kills: Some(((g + slot) % 9).to_string()),
                    deaths: Some(((g * 3 + slot) % 6).to_string()),
                    assists: Some(((g * 7 + slot) % 12).to_string()),
                    result: Some(if side == "Blue" { "1" } else { "0" }.into()),
                });
            }
        }
        if g % 10 == 0 {
            let tail = rows[rows.len() - 10..].to_vec();
            rows.extend(tail);
        }
    }
    rows
}

fn bench_pipeline(c: &mut Criterion) {
    let raw = RawTable::from(synthetic(2_000));

    c.bench_function("transform_2k_games", |b| {
        b.iter(|| {
            let out = transform(black_box(&raw), DatePolicy::Drop).map(|t| t.rows.len());
            black_box(out)
        })
    });

    let cleaned = match transform(&raw, DatePolicy::Drop) {
        Ok(t) => t.rows,
        Err(e) => panic!("synthetic data failed to transform: {e}"),
    };
    let req = ChartRequest { player: Some("P1_2".into()), min_kills: Some(2), ..Default::default() };

    c.bench_function("chart_from_full_table", |b| {
        b.iter(|| {
            let chart = build_chart(black_box(&cleaned), black_box(&req));
            black_box(chart.bars.len())
        })
    });
}

criterion_group!(benches, bench_pipeline);
criterion_main!(benches);
