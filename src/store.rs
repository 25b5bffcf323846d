// src/store.rs
//
// Read side of the processed data: the per-player files and the full table.

use std::{
    collections::{BTreeMap, BTreeSet},
    fs,
    path::{Path, PathBuf},
};

use crate::config::options::ExportFormat;
use crate::error::{Error, Result, Stage};
use crate::file::player_stems;
use crate::record::{is_known_team, MatchRecord};
use crate::table::read_cleaned_file;

/// Per-player files under one directory.
#[derive(Clone, Debug)]
pub struct PlayerStore {
    dir: PathBuf,
    format: ExportFormat,
}

impl PlayerStore {
    pub fn new(dir: impl Into<PathBuf>, format: ExportFormat) -> Self {
        Self { dir: dir.into(), format }
    }

    pub fn dir(&self) -> &Path { &self.dir }

    pub fn path_for(&self, player: &str) -> PathBuf {
        self.dir.join(join!(player, ".", self.format.ext()))
    }

    /// Sorted file stems. A missing directory is an empty list.
    pub fn list_players(&self) -> Result<Vec<String>> {
        if !self.dir.exists() {
            return Ok(Vec::new());
        }
        let io_err = |e| Error::io(Stage::Load, &self.dir, e);

        let mut players = Vec::new();
        for entry in fs::read_dir(&self.dir).map_err(io_err)? {
            let path = entry.map_err(io_err)?.path();
            if !path.is_file() { continue; }
            if path.extension().and_then(|s| s.to_str()) != Some(self.format.ext()) { continue; }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                players.push(s!(stem));
            }
        }
        players.sort_by_key(|p| p.to_lowercase());
        Ok(players)
    }

    pub fn contains(&self, player: &str) -> bool {
        self.path_for(player).is_file()
    }

    /// Rows of `<dir>/<player>.<ext>`, in file order.
    pub fn load_player(&self, player: &str) -> Result<Vec<MatchRecord>> {
        let path = self.path_for(player);
        let rows = read_cleaned_file(&path, self.format.delim())?;
        logd!("Store: {} row(s) from {}", rows.len(), path.display());
        Ok(rows)
    }
}

/// Full cleaned table; the delimiter follows the file extension.
pub fn load_table(path: &Path) -> Result<Vec<MatchRecord>> {
    let format = path
        .extension()
        .and_then(|s| s.to_str())
        .and_then(ExportFormat::from_ext)
        .unwrap_or_default();
    read_cleaned_file(path, format.delim())
}

/* ---------------- League → team → player ---------------- */

/// Players are kept as file stems, the same keys `PlayerStore` lists.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LeagueIndex {
    leagues: BTreeMap<String, BTreeMap<String, BTreeSet<String>>>,
}

impl LeagueIndex {
    pub fn from_records(rows: &[MatchRecord]) -> Self {
        // Stems over every name in the table, as the writer assigned them
        let stems = player_stems(rows.iter().map(|r| r.player_name.as_str()));

        let mut leagues: BTreeMap<String, BTreeMap<String, BTreeSet<String>>> = BTreeMap::new();
        for r in rows {
            let (league, team) = (r.league.trim(), r.team_name.trim());
            if league.is_empty() || r.player_name.trim().is_empty() || !is_known_team(team) { continue; }
            let Some(stem) = stems.get(r.player_name.as_str()) else { continue };
            leagues
                .entry(s!(league))
                .or_default()
                .entry(s!(team))
                .or_default()
                .insert(stem.clone());
        }
        Self { leagues }
    }

    pub fn is_empty(&self) -> bool { self.leagues.is_empty() }

    pub fn leagues(&self) -> impl Iterator<Item = &str> {
        self.leagues.keys().map(String::as_str)
    }

    pub fn teams(&self, league: &str) -> impl Iterator<Item = &str> {
        self.leagues.get(league).into_iter().flat_map(|t| t.keys().map(String::as_str))
    }

    /// Players narrowed by league and team; "" means any.
    pub fn players(&self, league: &str, team: &str) -> BTreeSet<&str> {
        self.leagues
            .iter()
            .filter(|(l, _)| league.is_empty() || l.as_str() == league)
            .flat_map(|(_, teams)| teams.iter())
            .filter(|(t, _)| team.is_empty() || t.as_str() == team)
            .flat_map(|(_, players)| players.iter().map(String::as_str))
            .collect()
    }

    /// `files` narrowed to the league/team filter, in their given order.
    pub fn visible(&self, files: &[String], league: &str, team: &str) -> Vec<String> {
        if league.is_empty() && team.is_empty() {
            return files.to_vec();
        }
        let allowed = self.players(league, team);
        files.iter().filter(|p| allowed.contains(p.as_str())).cloned().collect()
    }
}
