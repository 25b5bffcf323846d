// src/stats.rs
//
// Career numbers for one player's series.

use std::collections::BTreeMap;

use chrono::Datelike;
use serde::Serialize;

use crate::chart::Metric;
use crate::config::consts::FORM_WINDOWS;
use crate::record::MatchRecord;

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Line {
    pub games: usize,
    pub wins: usize,
    /// Percent
    pub win_rate: f64,
    pub avg_kills: f64,
    pub avg_deaths: f64,
    pub avg_assists: f64,
    pub kda: f64,
}

impl Line {
    pub fn from_rows<'a>(rows: impl IntoIterator<Item = &'a MatchRecord>) -> Self {
        let (mut games, mut wins, mut k, mut d, mut a) = (0usize, 0usize, 0u64, 0u64, 0u64);
        for r in rows {
            games += 1;
            if r.is_win() { wins += 1; }
            k += u64::from(r.kills);
            d += u64::from(r.deaths);
            a += u64::from(r.assists);
        }
        if games == 0 {
            return Self::default();
        }
        let n = games as f64;
        Self {
            games,
            wins,
            win_rate: wins as f64 / n * 100.0,
            avg_kills: k as f64 / n,
            avg_deaths: d as f64 / n,
            avg_assists: a as f64 / n,
            kda: kda(k, d, a),
        }
    }
}

/// (kills + assists) / deaths; deathless careers just sum.
pub fn kda(kills: u64, deaths: u64, assists: u64) -> f64 {
    if deaths > 0 {
        (kills + assists) as f64 / deaths as f64
    } else {
        (kills + assists) as f64
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PlayerSummary {
    pub player: String,
    /// Team of the most recent game
    pub team: String,
    pub overall: Line,
    /// Newest year first
    pub years: Vec<(i32, Line)>,
}

pub fn summarize(player: &str, rows: &[MatchRecord]) -> Option<PlayerSummary> {
    let latest = rows.iter().max_by_key(|r| r.date)?;

    let mut by_year: BTreeMap<i32, Vec<&MatchRecord>> = BTreeMap::new();
    for r in rows {
        by_year.entry(r.date.year()).or_default().push(r);
    }

    Some(PlayerSummary {
        player: s!(player),
        team: latest.team_name.clone(),
        overall: Line::from_rows(rows),
        years: by_year
            .into_iter()
            .rev()
            .map(|(y, games)| (y, Line::from_rows(games)))
            .collect(),
    })
}

/// Most recent `n` games, newest first.
fn last_n(rows: &[MatchRecord], n: usize) -> Vec<&MatchRecord> {
    let mut sorted: Vec<&MatchRecord> = rows.iter().collect();
    sorted.sort_by(|a, b| b.date.cmp(&a.date));
    sorted.truncate(n);
    sorted
}

pub fn average(rows: &[&MatchRecord], metric: Metric) -> Option<f64> {
    if rows.is_empty() {
        return None;
    }
    let sum: u64 = rows.iter().map(|r| u64::from(metric.of(r))).sum();
    Some(sum as f64 / rows.len() as f64)
}

/// Share (0..=1) of the last `n` games where `metric` went strictly over
/// `line`. `None` without games.
pub fn over_line_rate(rows: &[MatchRecord], metric: Metric, line: f64, n: usize) -> Option<f64> {
    let recent = last_n(rows, n);
    if recent.is_empty() {
        return None;
    }
    let over = recent.iter().filter(|r| f64::from(metric.of(r)) > line).count();
    Some(over as f64 / recent.len() as f64)
}

/// Percent difference between the last-`n` average and the career average.
pub fn recent_form(rows: &[MatchRecord], metric: Metric, n: usize) -> f64 {
    let all: Vec<&MatchRecord> = rows.iter().collect();
    period_diff(&last_n(rows, n), &all, metric)
}

/// Percent difference between the average over `period` and over `all`.
/// 0 when either is empty or the overall average is 0.
pub fn period_diff(period: &[&MatchRecord], all: &[&MatchRecord], metric: Metric) -> f64 {
    match (average(period, metric), average(all, metric)) {
        (Some(p), Some(a)) if a > 0.0 => (p - a) / a * 100.0,
        _ => 0.0,
    }
}

/// Percent of games where `metric` went strictly over the player's own average.
pub fn percent_over_average(rows: &[MatchRecord], metric: Metric) -> f64 {
    let all: Vec<&MatchRecord> = rows.iter().collect();
    let Some(avg) = average(&all, metric) else { return 0.0 };
    let over = rows.iter().filter(|r| f64::from(metric.of(r)) > avg).count();
    over as f64 / rows.len() as f64 * 100.0
}

/* ---------------- Form ---------------- */

/// One player's recent form in one metric, all differences in percent
/// against the career average.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FormLine {
    pub player: String,
    pub team: String,
    pub metric: Metric,
    pub average: f64,
    /// (N, diff) for each of FORM_WINDOWS
    pub last: Vec<(usize, f64)>,
    pub year: i32,
    /// 0 when the player has no games in `year`
    pub year_diff: f64,
    pub percent_over: f64,
}

pub fn form_line(player: &str, rows: &[MatchRecord], metric: Metric, year: i32) -> Option<FormLine> {
    let latest = rows.iter().max_by_key(|r| r.date)?;
    let all: Vec<&MatchRecord> = rows.iter().collect();
    let in_year: Vec<&MatchRecord> = rows.iter().filter(|r| r.date.year() == year).collect();

    Some(FormLine {
        player: s!(player),
        team: latest.team_name.clone(),
        metric,
        average: average(&all, metric).unwrap_or(0.0),
        last: FORM_WINDOWS.iter().map(|&n| (n, recent_form(rows, metric, n))).collect(),
        year,
        year_diff: period_diff(&in_year, &all, metric),
        percent_over: percent_over_average(rows, metric),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::dates;
    use crate::record::MatchResult;

    fn game(date: &str, team: &str, k: u32, d: u32, a: u32, win: bool) -> MatchRecord {
        MatchRecord {
            game_id: join!("G", date),
            league: s!("LCK"),
            year: None,
            date: dates::parse(date).unwrap(),
            side: None,
            player_name: s!("Faker"),
            player_id: s!("p1"),
            team_name: s!(team),
            team_id: s!(),
            champion: s!("Ahri"),
            game_length: None,
            kills: k,
            deaths: d,
            assists: a,
            result: Some(if win { MatchResult::Win } else { MatchResult::Loss }),
            opponent_team_name: s!("GEN"),
            opponent_team_id: s!(),
        }
    }

    #[test]
    fn career_and_years() {
        let rows = vec![
            game("2024-06-01", "SKT", 4, 2, 6, true),
            game("2025-02-01", "T1", 2, 0, 3, false),
            game("2025-01-01", "T1", 6, 2, 1, true),
        ];
        let sum = summarize("Faker", &rows).unwrap();
        assert_eq!(sum.team, "T1");
        assert_eq!(sum.overall.games, 3);
        assert_eq!(sum.overall.wins, 2);
        assert!((sum.overall.kda - 22.0 / 4.0).abs() < 1e-9);
        assert_eq!(sum.years.iter().map(|(y, _)| *y).collect::<Vec<_>>(), vec![2025, 2024]);
        assert_eq!(sum.years[1].1.games, 1);
        assert!((sum.years[1].1.kda - 5.0).abs() < 1e-9);
    }

    #[test]
    fn deathless_kda_is_a_sum() {
        assert_eq!(kda(3, 0, 4), 7.0);
        assert!(summarize("x", &[]).is_none());
    }

    #[test]
    fn over_line_uses_most_recent_games() {
        let rows = vec![
            game("2025-01-01", "T1", 9, 1, 1, true),
            game("2025-01-02", "T1", 1, 1, 1, true),
            game("2025-01-03", "T1", 5, 1, 1, true),
            game("2025-01-04", "T1", 3, 1, 1, true),
        ];
        // Last three: 3, 5, 1 → one over 3.5
        let rate = over_line_rate(&rows, Metric::Kills, 3.5, 3).unwrap();
        assert!((rate - 1.0 / 3.0).abs() < 1e-9);
        assert_eq!(over_line_rate(&[], Metric::Kills, 3.5, 3), None);
        // Last two average 4 against a career 4.5
        assert!(recent_form(&rows, Metric::Kills, 2) < 0.0);
    }

    #[test]
    fn form_against_own_average() {
        let rows = vec![
            game("2024-06-01", "SKT", 2, 1, 1, true),
            game("2025-01-01", "T1", 4, 1, 1, true),
            game("2025-01-02", "T1", 6, 1, 1, false),
            game("2025-01-03", "T1", 8, 1, 1, true),
        ];
        // Career 5 kills; 2025 averages 6
        let form = form_line("Faker", &rows, Metric::Kills, 2025).unwrap();
        assert_eq!(form.team, "T1");
        assert!((form.average - 5.0).abs() < 1e-9);
        assert!((form.year_diff - 20.0).abs() < 1e-9);
        // Last 3 average 6 too; last 5 is the whole career
        assert_eq!(form.last.iter().map(|(n, _)| *n).collect::<Vec<_>>(), vec![3, 5, 10]);
        assert!((form.last[0].1 - 20.0).abs() < 1e-9);
        assert!(form.last[1].1.abs() < 1e-9);
        // 6 and 8 are over 5
        assert!((form.percent_over - 50.0).abs() < 1e-9);

        // No games that year, no difference
        assert_eq!(form_line("Faker", &rows, Metric::Kills, 2023).unwrap().year_diff, 0.0);
        assert!(form_line("Faker", &[], Metric::Kills, 2025).is_none());
    }

    #[test]
    fn zero_average_has_no_diff() {
        let rows = vec![game("2025-01-01", "T1", 0, 0, 0, true)];
        assert_eq!(recent_form(&rows, Metric::Kills, 3), 0.0);
        assert_eq!(percent_over_average(&rows, Metric::Kills), 0.0);
        assert_eq!(percent_over_average(&[], Metric::Kills), 0.0);
    }
}
