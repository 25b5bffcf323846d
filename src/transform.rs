// src/transform.rs
//
// Match Transformer. Input is the concatenated raw table (already projected
// onto the canonical columns by RawRecord); output is the cleaned table:
//
//   1. drop rows missing kills/deaths/assists/date/playername/playerid
//   2. parse dates (DatePolicy decides drop vs abort)
//   3. drop exact duplicates
//   4. attach the opponent team from the other side of the same game
//   5. drop duplicates on (game, date, player, team, k, d, a) again, since
//      a malformed game with several teams per side multiplies rows in step 4
//
// Row order is preserved throughout (first occurrence wins), so the same
// input always produces the same output.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use crate::config::consts::UNKNOWN_OPPONENT;
use crate::config::options::DatePolicy;
use crate::core::{dates, numbers::parse_count, numbers::parse_year, sanitize::non_blank};
use crate::error::{Error, Result};
use crate::extract::RawTable;
use crate::record::{is_known_team, MatchRecord, MatchResult, RawRecord, Side};

/// What happened to the rows. Drops are counted, never silent.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TransformReport {
    pub input_rows: usize,
    pub dropped_missing: usize,
    pub dropped_bad_date: usize,
    pub duplicates_removed: usize,
    pub unknown_opponents: usize,
    pub join_duplicates_removed: usize,
    pub output_rows: usize,
}

impl TransformReport {
    pub fn dropped_total(&self) -> usize {
        self.dropped_missing + self.dropped_bad_date + self.duplicates_removed + self.join_duplicates_removed
    }
}

#[derive(Clone, Debug, Default)]
pub struct Transformed {
    pub rows: Vec<MatchRecord>,
    pub report: TransformReport,
}

pub fn transform(raw: &RawTable, policy: DatePolicy) -> Result<Transformed> {
    let mut report = TransformReport { input_rows: raw.len(), ..Default::default() };

    // Steps 1-2: critical fields + dates
    let mut parsed = Vec::with_capacity(raw.len());
    for (i, r) in raw.rows.iter().enumerate() {
        match parse_row(r) {
            Parse::Ok(rec) => parsed.push(rec),
            Parse::Missing => report.dropped_missing += 1,
            Parse::BadDate(value) => match policy {
                DatePolicy::Drop => report.dropped_bad_date += 1,
                DatePolicy::Abort => {
                    let (path, line) = raw.locate(i);
                    return Err(Error::BadDate { path: path.map(Path::to_path_buf), line, value });
                }
            },
        }
    }

    // Step 3: exact duplicates
    let before = parsed.len();
    let parsed = dedup_by(parsed, |r| r.clone());
    report.duplicates_removed = before - parsed.len();

    // Step 4: opponent link
    let joined = link_opponents(parsed);
    report.unknown_opponents = joined.iter().filter(|r| !r.has_known_opponent()).count();

    // Step 5: identity duplicates introduced by the join
    let before = joined.len();
    let rows = dedup_identity(joined);
    report.join_duplicates_removed = before - rows.len();
    report.output_rows = rows.len();

    logf!(
        "Transform: in={} out={} missing={} bad_date={} dup={} join_dup={} unknown_opp={}",
        report.input_rows,
        report.output_rows,
        report.dropped_missing,
        report.dropped_bad_date,
        report.duplicates_removed,
        report.join_duplicates_removed,
        report.unknown_opponents,
    );

    Ok(Transformed { rows, report })
}

/* ---------------- Row parsing ---------------- */

enum Parse {
    Ok(MatchRecord),
    Missing,
    BadDate(String),
}

fn parse_row(r: &RawRecord) -> Parse {
    let cell = |c: &Option<String>| non_blank(c.as_deref());

    let (Some(kills), Some(deaths), Some(assists)) = (
        cell(&r.kills).and_then(|v| parse_count(&v)),
        cell(&r.deaths).and_then(|v| parse_count(&v)),
        cell(&r.assists).and_then(|v| parse_count(&v)),
    ) else {
        return Parse::Missing;
    };
    let (Some(date_text), Some(player_name), Some(player_id)) =
        (cell(&r.date), cell(&r.playername), cell(&r.playerid))
    else {
        return Parse::Missing;
    };
    let Some(date) = dates::parse(&date_text) else {
        return Parse::BadDate(date_text);
    };

    Parse::Ok(MatchRecord {
        game_id: cell(&r.gameid).unwrap_or_default(),
        league: cell(&r.league).unwrap_or_default(),
        year: cell(&r.year).and_then(|v| parse_year(&v)),
        date,
        side: cell(&r.side).and_then(|v| Side::parse(&v)),
        player_name,
        player_id,
        team_name: cell(&r.teamname).unwrap_or_default(),
        team_id: cell(&r.teamid).unwrap_or_default(),
        champion: cell(&r.champion).unwrap_or_default(),
        game_length: cell(&r.gamelength).and_then(|v| parse_count(&v)),
        kills,
        deaths,
        assists,
        result: cell(&r.result).and_then(|v| MatchResult::parse(&v)),
        opponent_team_name: s!(UNKNOWN_OPPONENT),
        opponent_team_id: s!(),
    })
}

/* ---------------- Opponent link ---------------- */

/// One output row per (record, opponent team) pair; records with no known
/// opposite side keep the "Unknown Opponent" sentinel.
pub fn link_opponents(rows: Vec<MatchRecord>) -> Vec<MatchRecord> {
    // (game, side) → distinct known teams, first-seen order
    let mut teams: HashMap<(String, Side), Vec<(String, String)>> = HashMap::new();
    for r in &rows {
        let Some(side) = r.side else { continue };
        if r.game_id.is_empty() || !r.has_known_team() { continue; }
        let entry = teams.entry((r.game_id.clone(), side)).or_default();
        if !entry.iter().any(|(name, id)| *name == r.team_name && *id == r.team_id) {
            entry.push((r.team_name.clone(), r.team_id.clone()));
        }
    }

    let mut out = Vec::with_capacity(rows.len());
    for mut r in rows {
        let opponents = match r.side {
            Some(side) if !r.game_id.is_empty() && r.has_known_team() => {
                teams.get(&(r.game_id.clone(), side.opposite()))
            }
            _ => None,
        };

        match opponents.and_then(|list| list.split_last()) {
            Some((last, rest)) => {
                for (name, id) in rest {
                    let mut dup = r.clone();
                    dup.opponent_team_name = name.clone();
                    dup.opponent_team_id = id.clone();
                    out.push(dup);
                }
                r.opponent_team_name = last.0.clone();
                r.opponent_team_id = last.1.clone();
                out.push(r);
            }
            None => {
                r.opponent_team_name = s!(UNKNOWN_OPPONENT);
                r.opponent_team_id = s!();
                out.push(r);
            }
        }
    }
    out
}

/* ---------------- Dedup ---------------- */

fn dedup_by<K, F>(rows: Vec<MatchRecord>, key: F) -> Vec<MatchRecord>
where
    K: std::hash::Hash + Eq,
    F: Fn(&MatchRecord) -> K,
{
    let mut seen = HashSet::with_capacity(rows.len());
    rows.into_iter().filter(|r| seen.insert(key(r))).collect()
}

fn dedup_identity(rows: Vec<MatchRecord>) -> Vec<MatchRecord> {
    let keep: Vec<bool> = {
        let mut seen = HashSet::with_capacity(rows.len());
        rows.iter().map(|r| seen.insert(r.identity_key())).collect()
    };
    rows.into_iter().zip(keep).filter_map(|(r, k)| k.then_some(r)).collect()
}
