// src/series.rs
//
// Series view of one player's games. Consecutive games against the same
// opponent, each within SERIES_MAX_GAP_HOURS of the previous one, form a
// series. The game count decides the format:
//
//   1 → bo1, 2-3 → bo3, 4-5 → bo5, more → other
//
// A bo3 is won with 2 wins, a bo5 with 3; anything else needs more wins
// than losses. Games against the "Unknown Opponent" cannot be grouped and
// are left out.

use chrono::{Duration, NaiveDateTime};
use serde::Serialize;

use crate::chart::{y_axis_max, Bar, ChartSpec, GameWindow, Hover, Metric};
use crate::config::consts::{HOVER_DATE_FMT, LABEL_DATE_FMT, MAX_LABELLED_BARS, SERIES_MAX_GAP_HOURS};
use crate::core::dates;
use crate::record::MatchRecord;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SeriesKind {
    Bo1,
    Bo3,
    Bo5,
    Other,
}

impl SeriesKind {
    pub fn from_games(n: usize) -> Self {
        match n {
            1 => SeriesKind::Bo1,
            2 | 3 => SeriesKind::Bo3,
            4 | 5 => SeriesKind::Bo5,
            _ => SeriesKind::Other,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SeriesKind::Bo1 => "BO1",
            SeriesKind::Bo3 => "BO3",
            SeriesKind::Bo5 => "BO5",
            SeriesKind::Other => "Other",
        }
    }

    fn is_won(self, wins: usize, losses: usize) -> bool {
        match self {
            SeriesKind::Bo3 => wins >= 2,
            SeriesKind::Bo5 => wins >= 3,
            SeriesKind::Bo1 | SeriesKind::Other => wins > losses,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SeriesGame {
    pub game_id: String,
    #[serde(with = "dates::serde_store")]
    pub date: NaiveDateTime,
    pub champion: String,
    pub kills: u32,
    pub deaths: u32,
    pub assists: u32,
    pub win: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Series {
    pub opponent: String,
    pub team: String,
    pub league: String,
    #[serde(with = "dates::serde_store")]
    pub start: NaiveDateTime,
    #[serde(with = "dates::serde_store")]
    pub end: NaiveDateTime,
    pub kind: SeriesKind,
    pub won: bool,
    pub wins: usize,
    /// Games not won, including ones with no recorded result
    pub losses: usize,
    pub kills: u32,
    pub deaths: u32,
    pub assists: u32,
    pub games: Vec<SeriesGame>,
}

impl Series {
    fn from_games(games: &[&MatchRecord]) -> Option<Self> {
        let (first, last) = (games.first()?, games.last()?);
        let wins = games.iter().filter(|r| r.is_win()).count();
        let losses = games.len() - wins;
        let kind = SeriesKind::from_games(games.len());

        Some(Self {
            opponent: first.opponent_team_name.clone(),
            team: first.team_name.clone(),
            league: first.league.clone(),
            start: first.date,
            end: last.date,
            kind,
            won: kind.is_won(wins, losses),
            wins,
            losses,
            kills: games.iter().map(|r| r.kills).sum(),
            deaths: games.iter().map(|r| r.deaths).sum(),
            assists: games.iter().map(|r| r.assists).sum(),
            games: games
                .iter()
                .map(|r| SeriesGame {
                    game_id: r.game_id.clone(),
                    date: r.date,
                    champion: r.champion.clone(),
                    kills: r.kills,
                    deaths: r.deaths,
                    assists: r.assists,
                    win: r.is_win(),
                })
                .collect(),
        })
    }

    pub fn game_count(&self) -> usize { self.games.len() }

    pub fn total(&self, metric: Metric) -> u32 {
        match metric {
            Metric::Kills => self.kills,
            Metric::Deaths => self.deaths,
            Metric::Assists => self.assists,
        }
    }

    pub fn average(&self, metric: Metric) -> f64 {
        if self.games.is_empty() {
            return 0.0;
        }
        f64::from(self.total(metric)) / self.games.len() as f64
    }

    /// "MM/DD/YY: <opponent> (<games>)"
    pub fn label(&self) -> String {
        format!("{}: {} ({})", self.start.format(LABEL_DATE_FMT), self.opponent, self.game_count())
    }

    /// "BO3 2-1", the score line of the hover text.
    pub fn score(&self) -> String {
        format!("{} {}-{}", self.kind.label(), self.wins, self.losses)
    }
}

/// Group one player's rows into series, oldest first.
pub fn group_series(rows: &[MatchRecord]) -> Vec<Series> {
    let mut sorted: Vec<&MatchRecord> = rows.iter().filter(|r| r.has_known_opponent()).collect();
    let skipped = rows.len() - sorted.len();
    // Stable: same timestamp keeps file order
    sorted.sort_by_key(|r| r.date);

    let max_gap = Duration::hours(SERIES_MAX_GAP_HOURS);
    let mut groups: Vec<Vec<&MatchRecord>> = Vec::new();
    for r in sorted {
        match groups.last_mut() {
            Some(cur)
                if cur.last().is_some_and(|prev| {
                    prev.opponent_team_name == r.opponent_team_name && r.date - prev.date <= max_gap
                }) =>
            {
                cur.push(r)
            }
            _ => groups.push(vec![r]),
        }
    }

    let series: Vec<Series> = groups.iter().filter_map(|g| Series::from_games(g)).collect();
    logd!("Series: {} game(s) → {} series, {} without opponent", rows.len() - skipped, series.len(), skipped);
    series
}

/// One bar per series: the metric summed over its games, coloured by the
/// series result. The window counts series, not games.
pub fn series_chart(rows: &[MatchRecord], metric: Metric, window: GameWindow) -> ChartSpec {
    let player = rows.first().map(|r| r.player_name.as_str()).unwrap_or_default();
    let mut title = format!("{player} {metric} per series").trim().to_string();
    if let GameWindow::Last(n) = window {
        title.push_str(&format!(", last {n}"));
    }

    let series = group_series(rows);
    let bars: Vec<Bar> = series
        .iter()
        .skip(window.skip(series.len()))
        .map(|s| series_bar(s, metric))
        .collect();

    if bars.is_empty() {
        return ChartSpec::empty(title, metric, Some(s!("No series with a known opponent")));
    }

    let max = bars.iter().map(|b| b.value).max().unwrap_or(0);
    ChartSpec {
        title,
        metric,
        y_max: y_axis_max(max),
        show_labels: bars.len() <= MAX_LABELLED_BARS,
        bars,
        notice: None,
    }
}

fn series_bar(s: &Series, metric: Metric) -> Bar {
    let mut champions: Vec<&str> = Vec::new();
    for g in &s.games {
        if !g.champion.is_empty() && !champions.contains(&g.champion.as_str()) {
            champions.push(&g.champion);
        }
    }

    Bar {
        label: s.label(),
        value: s.total(metric),
        win: Some(s.won),
        hover: Hover {
            timestamp: s.start.format(HOVER_DATE_FMT).to_string(),
            opponent: s.opponent.clone(),
            league: s.league.clone(),
            champion: champions.join(", "),
            kills: s.kills,
            deaths: s.deaths,
            assists: s.assists,
            note: Some(format!(
                "{}, avg {:.1}/{:.1}/{:.1}",
                s.score(),
                s.average(Metric::Kills),
                s.average(Metric::Deaths),
                s.average(Metric::Assists)
            )),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::consts::UNKNOWN_OPPONENT;
    use crate::record::MatchResult;
    use pretty_assertions::assert_eq;

    fn game(date: &str, opponent: &str, kills: u32, win: bool) -> MatchRecord {
        MatchRecord {
            game_id: join!("G-", date),
            league: s!("LCK"),
            year: Some(2025),
            date: dates::parse(date).unwrap(),
            side: None,
            player_name: s!("Faker"),
            player_id: s!("p1"),
            team_name: s!("T1"),
            team_id: s!("t1"),
            champion: s!("Ahri"),
            game_length: None,
            kills,
            deaths: 1,
            assists: 2,
            result: Some(if win { MatchResult::Win } else { MatchResult::Loss }),
            opponent_team_name: s!(opponent),
            opponent_team_id: s!(),
        }
    }

    #[test]
    fn kinds_follow_game_count() {
        let kinds: Vec<_> = (1..=6).map(SeriesKind::from_games).collect();
        assert_eq!(
            kinds,
            vec![
                SeriesKind::Bo1,
                SeriesKind::Bo3,
                SeriesKind::Bo3,
                SeriesKind::Bo5,
                SeriesKind::Bo5,
                SeriesKind::Other
            ]
        );
    }

    #[test]
    fn consecutive_games_against_one_opponent_group() {
        // Out of order on purpose; grouping works on date order
        let rows = vec![
            game("2025-01-15 12:00:00", "GEN", 4, true),
            game("2025-01-15 08:00:00", "GEN", 2, true),
            game("2025-01-15 10:00:00", "GEN", 1, false),
            game("2025-01-17 09:00:00", "HLE", 6, false),
            game("2025-01-17 11:00:00", "DK", 3, true),
        ];
        let series = group_series(&rows);

        assert_eq!(series.len(), 3);
        let bo3 = &series[0];
        assert_eq!(bo3.opponent, "GEN");
        assert_eq!(bo3.kind, SeriesKind::Bo3);
        assert_eq!((bo3.wins, bo3.losses), (2, 1));
        assert!(bo3.won);
        assert_eq!(bo3.kills, 7);
        assert_eq!(bo3.games.iter().map(|g| g.kills).collect::<Vec<_>>(), vec![2, 1, 4]);
        assert_eq!(bo3.start, dates::parse("2025-01-15 08:00:00").unwrap());
        assert_eq!(bo3.end, dates::parse("2025-01-15 12:00:00").unwrap());
        assert!((bo3.average(Metric::Kills) - 7.0 / 3.0).abs() < 1e-9);

        assert_eq!(series[1].opponent, "HLE");
        assert_eq!(series[1].kind, SeriesKind::Bo1);
        assert!(!series[1].won);
        assert_eq!(series[2].opponent, "DK");
    }

    #[test]
    fn same_opponent_weeks_apart_is_two_series() {
        let rows = vec![
            game("2025-01-15 08:00:00", "GEN", 2, true),
            game("2025-02-20 08:00:00", "GEN", 3, false),
        ];
        let series = group_series(&rows);
        assert_eq!(series.len(), 2);
        assert!(series.iter().all(|s| s.kind == SeriesKind::Bo1));
    }

    #[test]
    fn series_results_by_format() {
        // 1-1 over two games is a bo3 that was not won
        let split = group_series(&[
            game("2025-01-15 08:00:00", "GEN", 1, true),
            game("2025-01-15 09:00:00", "GEN", 1, false),
        ]);
        assert_eq!(split[0].kind, SeriesKind::Bo3);
        assert!(!split[0].won);

        let bo5: Vec<_> = [true, false, false, true, true]
            .iter()
            .enumerate()
            .map(|(i, w)| game(&format!("2025-03-01 {:02}:00:00", 8 + i), "GEN", 1, *w))
            .collect();
        let series = group_series(&bo5);
        assert_eq!(series[0].kind, SeriesKind::Bo5);
        assert!(series[0].won);
        assert_eq!(series[0].score(), "BO5 3-2");
    }

    #[test]
    fn unknown_opponents_are_left_out() {
        let rows = vec![
            game("2025-01-15 08:00:00", UNKNOWN_OPPONENT, 9, true),
            game("2025-01-15 09:00:00", "GEN", 2, true),
        ];
        let series = group_series(&rows);
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].kills, 2);
    }

    #[test]
    fn chart_has_one_bar_per_series() {
        let rows = vec![
            game("2025-01-15 08:00:00", "GEN", 2, true),
            game("2025-01-15 10:00:00", "GEN", 5, true),
            game("2025-01-17 09:00:00", "HLE", 6, false),
        ];
        let chart = series_chart(&rows, Metric::Kills, GameWindow::All);
        assert_eq!(chart.title, "Faker Kills per series");
        assert_eq!(chart.labels(), vec!["01/15/25: GEN (2)", "01/17/25: HLE (1)"]);
        assert_eq!(chart.values(), vec![7, 6]);
        assert_eq!(chart.bars.iter().map(|b| b.win).collect::<Vec<_>>(), vec![Some(true), Some(false)]);
        assert_eq!(chart.y_max, 9);
        assert!(chart.bars[0].hover.text().contains("BO3 2-0"));

        let last = series_chart(&rows, Metric::Assists, GameWindow::Last(1));
        assert_eq!(last.values(), vec![2]);

        let empty = series_chart(&[], Metric::Kills, GameWindow::All);
        assert!(empty.is_empty());
        assert_eq!(empty.y_max, 1);
        assert!(empty.notice.is_some());
    }
}
