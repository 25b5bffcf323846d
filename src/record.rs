// src/record.rs
//
// Row shapes.
//
// - RawRecord:   one row of a raw export, already projected onto the
//                canonical columns (serde picks them out by header name and
//                ignores the rest). Every cell is optional text.
// - MatchRecord: one cleaned (game, player) row plus its opponent link.

use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::config::consts::{UNKNOWN_OPPONENT, UNKNOWN_TEAM};
use crate::core::dates;

/// Canonical columns, in output order.
pub const CANONICAL_COLUMNS: [&str; 15] = [
    "gameid", "league", "year", "date", "side", "playername", "playerid",
    "teamname", "teamid", "champion", "gamelength", "kills", "deaths",
    "assists", "result",
];

/// Appended by the transformer.
pub const OPPONENT_COLUMNS: [&str; 2] = ["opponent_teamname", "opponent_teamid"];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Side {
    Blue,
    Red,
}

impl Side {
    pub fn parse(cell: &str) -> Option<Self> {
        match cell.trim().to_ascii_lowercase().as_str() {
            "blue" => Some(Side::Blue),
            "red" => Some(Side::Red),
            _ => None,
        }
    }

    pub fn opposite(self) -> Self {
        match self { Side::Blue => Side::Red, Side::Red => Side::Blue }
    }

    pub fn as_str(self) -> &'static str {
        match self { Side::Blue => "Blue", Side::Red => "Red" }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MatchResult {
    Win,
    Loss,
}

impl MatchResult {
    pub fn parse(cell: &str) -> Option<Self> {
        match crate::core::numbers::parse_count(cell)? {
            1 => Some(MatchResult::Win),
            0 => Some(MatchResult::Loss),
            _ => None,
        }
    }

    pub fn code(self) -> u8 {
        match self { MatchResult::Win => 1, MatchResult::Loss => 0 }
    }

    pub fn is_win(self) -> bool { self == MatchResult::Win }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct RawRecord {
    pub gameid: Option<String>,
    pub league: Option<String>,
    pub year: Option<String>,
    pub date: Option<String>,
    pub side: Option<String>,
    pub playername: Option<String>,
    pub playerid: Option<String>,
    pub teamname: Option<String>,
    pub teamid: Option<String>,
    pub champion: Option<String>,
    pub gamelength: Option<String>,
    pub kills: Option<String>,
    pub deaths: Option<String>,
    pub assists: Option<String>,
    pub result: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MatchRecord {
    #[serde(rename = "gameid")]
    pub game_id: String,
    pub league: String,
    #[serde(default, deserialize_with = "lenient_count")]
    pub year: Option<i32>,
    #[serde(with = "dates::serde_store")]
    pub date: NaiveDateTime,
    #[serde(default, serialize_with = "ser_side", deserialize_with = "de_side")]
    pub side: Option<Side>,
    #[serde(rename = "playername")]
    pub player_name: String,
    #[serde(rename = "playerid")]
    pub player_id: String,
    #[serde(rename = "teamname")]
    pub team_name: String,
    #[serde(rename = "teamid")]
    pub team_id: String,
    pub champion: String,
    /// Seconds
    #[serde(rename = "gamelength", default, deserialize_with = "lenient_count")]
    pub game_length: Option<u32>,
    pub kills: u32,
    pub deaths: u32,
    pub assists: u32,
    #[serde(default, serialize_with = "ser_result", deserialize_with = "de_result")]
    pub result: Option<MatchResult>,
    #[serde(rename = "opponent_teamname")]
    pub opponent_team_name: String,
    #[serde(rename = "opponent_teamid", default)]
    pub opponent_team_id: String,
}

impl MatchRecord {
    pub fn has_known_team(&self) -> bool {
        is_known_team(&self.team_name)
    }

    pub fn has_known_opponent(&self) -> bool {
        self.opponent_team_name != UNKNOWN_OPPONENT
    }

    pub fn is_win(&self) -> bool {
        self.result.map(MatchResult::is_win).unwrap_or(false)
    }

    /// (game id, date, player, team, kills, deaths, assists)
    pub fn identity_key(&self) -> IdentityKey<'_> {
        (
            self.game_id.as_str(),
            self.date,
            self.player_name.as_str(),
            self.team_name.as_str(),
            self.kills,
            self.deaths,
            self.assists,
        )
    }
}

pub type IdentityKey<'a> = (&'a str, NaiveDateTime, &'a str, &'a str, u32, u32, u32);

pub fn is_known_team(name: &str) -> bool {
    let t = name.trim();
    !t.is_empty() && !t.eq_ignore_ascii_case(UNKNOWN_TEAM)
}

/// Header row for cleaned files.
pub fn cleaned_headers() -> Vec<&'static str> {
    CANONICAL_COLUMNS.iter().chain(OPPONENT_COLUMNS.iter()).copied().collect()
}

/* ---------------- serde helpers ---------------- */

fn lenient_count<'de, D, T>(de: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: TryFrom<u32>,
{
    let s: Option<String> = Option::deserialize(de)?;
    Ok(s.as_deref()
        .and_then(crate::core::numbers::parse_count)
        .and_then(|v| T::try_from(v).ok()))
}

fn ser_side<S: Serializer>(side: &Option<Side>, ser: S) -> Result<S::Ok, S::Error> {
    ser.serialize_str(side.map(Side::as_str).unwrap_or(""))
}

fn de_side<'de, D: Deserializer<'de>>(de: D) -> Result<Option<Side>, D::Error> {
    let s: Option<String> = Option::deserialize(de)?;
    Ok(s.as_deref().and_then(Side::parse))
}

fn ser_result<S: Serializer>(res: &Option<MatchResult>, ser: S) -> Result<S::Ok, S::Error> {
    match res {
        Some(r) => ser.serialize_u8(r.code()),
        None => ser.serialize_str(""),
    }
}

fn de_result<'de, D: Deserializer<'de>>(de: D) -> Result<Option<MatchResult>, D::Error> {
    let s: Option<String> = Option::deserialize(de)?;
    Ok(s.as_deref().and_then(MatchResult::parse))
}
