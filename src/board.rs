// src/board.rs
//
// All players at once. Loads every player file in the store and answers
// two tables: career or single-year lines (games, win rate, averages, KDA)
// and per-metric form against each player's own average.

use std::cmp::Ordering;

use chrono::Datelike;
use serde::Serialize;

use crate::chart::Metric;
use crate::error::Result;
use crate::record::MatchRecord;
use crate::stats::{self, FormLine, Line};
use crate::store::{LeagueIndex, PlayerStore};

struct PlayerGames {
    stem: String,
    rows: Vec<MatchRecord>,
}

#[derive(Default)]
pub struct Board {
    players: Vec<PlayerGames>,
    /// Newest first
    years: Vec<i32>,
}

/// One row of the all-players table. `year` is `None` for career lines.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BoardRow {
    pub player: String,
    /// File stem in the store, the key for selection
    pub stem: String,
    /// Team of the latest game in the period
    pub team: String,
    pub year: Option<i32>,
    #[serde(flatten)]
    pub line: Line,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SortKey {
    Player,
    Games,
    #[default]
    WinRate,
    Kills,
    Deaths,
    Assists,
    Kda,
}

impl SortKey {
    pub fn label(self) -> &'static str {
        match self {
            SortKey::Player => "Player",
            SortKey::Games => "Games",
            SortKey::WinRate => "Win %",
            SortKey::Kills => "K",
            SortKey::Deaths => "D",
            SortKey::Assists => "A",
            SortKey::Kda => "KDA",
        }
    }

    fn value(self, line: &Line) -> f64 {
        match self {
            SortKey::Player => 0.0,
            SortKey::Games => line.games as f64,
            SortKey::WinRate => line.win_rate,
            SortKey::Kills => line.avg_kills,
            SortKey::Deaths => line.avg_deaths,
            SortKey::Assists => line.avg_assists,
            SortKey::Kda => line.kda,
        }
    }
}

impl Board {
    /// Every file in the store. Files that fail to load are logged and
    /// skipped; only an unreadable players dir is an error.
    pub fn load(store: &PlayerStore) -> Result<Self> {
        let mut players = Vec::new();
        for stem in store.list_players()? {
            match store.load_player(&stem) {
                Ok(rows) if !rows.is_empty() => players.push((stem, rows)),
                Ok(_) => {}
                Err(e) => loge!("Board: {e}"),
            }
        }
        let board = Self::from_players(players);
        logf!("Board: {} player(s), years {:?}", board.len(), board.years);
        Ok(board)
    }

    /// (file stem, rows) per player.
    pub fn from_players(players: Vec<(String, Vec<MatchRecord>)>) -> Self {
        let mut years: Vec<i32> = players
            .iter()
            .flat_map(|(_, rows)| rows.iter().map(|r| r.date.year()))
            .collect();
        years.sort_unstable_by(|a, b| b.cmp(a));
        years.dedup();

        Self {
            players: players.into_iter().map(|(stem, rows)| PlayerGames { stem, rows }).collect(),
            years,
        }
    }

    pub fn len(&self) -> usize { self.players.len() }
    pub fn is_empty(&self) -> bool { self.players.is_empty() }

    /// Years with at least one game, newest first.
    pub fn years(&self) -> &[i32] { &self.years }

    /// Career lines (`None`) or lines for one year; players without games
    /// in that year are left out. Sorted by player.
    pub fn lines(&self, year: Option<i32>) -> Vec<BoardRow> {
        let mut out: Vec<BoardRow> = self
            .players
            .iter()
            .filter_map(|p| {
                let period: Vec<&MatchRecord> = p
                    .rows
                    .iter()
                    .filter(|r| year.is_none_or(|y| r.date.year() == y))
                    .collect();
                let latest = period.iter().max_by_key(|r| r.date)?;
                Some(BoardRow {
                    player: latest.player_name.clone(),
                    stem: p.stem.clone(),
                    team: latest.team_name.clone(),
                    year,
                    line: Line::from_rows(period.iter().copied()),
                })
            })
            .collect();
        sort_rows(&mut out, SortKey::Player, false);
        out
    }

    /// Form of every player in `metric`, `year` being the "this season" column.
    pub fn form(&self, metric: Metric, year: i32) -> Vec<FormLine> {
        let mut out: Vec<FormLine> = self
            .players
            .iter()
            .filter_map(|p| {
                let name = p.rows.first().map(|r| r.player_name.as_str()).unwrap_or(p.stem.as_str());
                stats::form_line(name, &p.rows, metric, year)
            })
            .collect();
        out.sort_by(|a, b| a.player.to_lowercase().cmp(&b.player.to_lowercase()));
        out
    }
}

/// Keep rows whose player belongs to the league/team ("" = any).
pub fn narrow(rows: Vec<BoardRow>, index: &LeagueIndex, league: &str, team: &str) -> Vec<BoardRow> {
    if league.is_empty() && team.is_empty() {
        return rows;
    }
    let allowed = index.players(league, team);
    rows.into_iter().filter(|r| allowed.contains(r.stem.as_str())).collect()
}

/// Stable sort; ties (and `SortKey::Player`) fall back to the player name.
pub fn sort_rows(rows: &mut [BoardRow], key: SortKey, descending: bool) {
    rows.sort_by(|a, b| {
        let by_name = || a.player.to_lowercase().cmp(&b.player.to_lowercase());
        let ord = match key {
            SortKey::Player => by_name(),
            _ => key
                .value(&a.line)
                .partial_cmp(&key.value(&b.line))
                .unwrap_or(Ordering::Equal)
                .then_with(by_name),
        };
        if descending { ord.reverse() } else { ord }
    });
}
