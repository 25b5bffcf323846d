// src/chart.rs
//
// Chart Builder. Turns one player's rows into a bar-chart description that
// any renderer (egui window, PNG snapshot, JSON on stdout) can draw as is.

use std::fmt;

use serde::Serialize;

use crate::config::consts::{
    EMPTY_Y_MAX, HEADROOM_RATIO, HOVER_DATE_FMT, LABEL_DATE_FMT, MAX_LABELLED_BARS, MIN_HEADROOM,
};
use crate::record::MatchRecord;

/* ---------------- Request ---------------- */

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    #[default]
    Kills,
    Deaths,
    Assists,
}

impl Metric {
    pub const ALL: [Metric; 3] = [Metric::Kills, Metric::Deaths, Metric::Assists];

    pub fn of(self, r: &MatchRecord) -> u32 {
        match self {
            Metric::Kills => r.kills,
            Metric::Deaths => r.deaths,
            Metric::Assists => r.assists,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Metric::Kills => "Kills",
            Metric::Deaths => "Deaths",
            Metric::Assists => "Assists",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// How many of the most recent games to plot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum GameWindow {
    #[default]
    All,
    Last(usize),
}

impl GameWindow {
    pub fn from_last(n: Option<usize>) -> Self {
        match n {
            Some(n) if n > 0 => GameWindow::Last(n),
            _ => GameWindow::All,
        }
    }

    /// Leading entries to drop from a series of `len`.
    pub fn skip(self, len: usize) -> usize {
        match self {
            GameWindow::Last(n) => len.saturating_sub(n),
            GameWindow::All => 0,
        }
    }

    pub fn label(self) -> String {
        match self {
            GameWindow::All => s!("All games"),
            GameWindow::Last(n) => format!("Last {n}"),
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct ChartRequest {
    /// Keep only rows with this exact player name. `None` takes the rows as
    /// already selected (one player's file).
    pub player: Option<String>,
    /// Rows with fewer kills are dropped. `None` or `Some(0)` keeps all.
    pub min_kills: Option<u32>,
    pub metric: Metric,
    pub window: GameWindow,
}

/* ---------------- Description ---------------- */

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Hover {
    pub timestamp: String,
    pub opponent: String,
    pub league: String,
    pub champion: String,
    pub kills: u32,
    pub deaths: u32,
    pub assists: u32,
    /// Extra line, e.g. series type and score
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl Hover {
    pub fn text(&self) -> String {
        let mut text = format!(
            "{}\nvs {}\n{} · {}\nK/D/A {}/{}/{}",
            self.timestamp, self.opponent, self.league, self.champion, self.kills, self.deaths, self.assists
        );
        if let Some(note) = &self.note {
            text.push('\n');
            text.push_str(note);
        }
        text
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Bar {
    pub label: String,
    pub value: u32,
    /// `None` when the row carried no result
    pub win: Option<bool>,
    pub hover: Hover,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ChartSpec {
    pub title: String,
    pub metric: Metric,
    pub bars: Vec<Bar>,
    pub y_max: u32,
    pub show_labels: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
}

impl ChartSpec {
    /// Valid chart with no bars.
    pub fn empty(title: impl Into<String>, metric: Metric, notice: Option<String>) -> Self {
        Self {
            title: title.into(),
            metric,
            bars: Vec::new(),
            y_max: EMPTY_Y_MAX,
            show_labels: true,
            notice,
        }
    }

    pub fn is_empty(&self) -> bool { self.bars.is_empty() }

    pub fn labels(&self) -> Vec<&str> {
        self.bars.iter().map(|b| b.label.as_str()).collect()
    }

    pub fn values(&self) -> Vec<u32> {
        self.bars.iter().map(|b| b.value).collect()
    }
}

/* ---------------- Builder ---------------- */

pub fn build_chart(rows: &[MatchRecord], req: &ChartRequest) -> ChartSpec {
    let title = chart_title(rows, req);

    let threshold = req.min_kills.filter(|k| *k > 0);
    let mut selected: Vec<&MatchRecord> = rows
        .iter()
        .filter(|r| req.player.as_deref().is_none_or(|p| r.player_name == p))
        .filter(|r| threshold.is_none_or(|k| r.kills >= k))
        .collect();

    // Stable: same timestamp keeps input order
    selected.sort_by_key(|r| r.date);

    let labels = ordinal_labels(&selected);
    let skip = req.window.skip(selected.len());

    let bars: Vec<Bar> = selected
        .iter()
        .zip(labels)
        .skip(skip)
        .map(|(r, label)| Bar {
            label,
            value: req.metric.of(r),
            win: r.result.map(|res| res.is_win()),
            hover: hover_for(r),
        })
        .collect();

    if bars.is_empty() {
        return ChartSpec::empty(title, req.metric, None);
    }

    let max = bars.iter().map(|b| b.value).max().unwrap_or(0);
    logd!("Chart: {} bar(s), max {} {}", bars.len(), max, req.metric);

    ChartSpec {
        title,
        metric: req.metric,
        y_max: y_axis_max(max),
        show_labels: bars.len() <= MAX_LABELLED_BARS,
        bars,
        notice: None,
    }
}

/// "MM/DD/YY (n)", n counting games on that calendar date in sorted order.
fn ordinal_labels(sorted: &[&MatchRecord]) -> Vec<String> {
    let mut out = Vec::with_capacity(sorted.len());
    let mut current = None;
    let mut n = 0;
    for r in sorted {
        let day = r.date.date();
        if current != Some(day) {
            current = Some(day);
            n = 0;
        }
        n += 1;
        out.push(format!("{} ({n})", day.format(LABEL_DATE_FMT)));
    }
    out
}

/// max + max(1, ceil(0.2 · max))
pub fn y_axis_max(max: u32) -> u32 {
    let headroom = (f64::from(max) * HEADROOM_RATIO).ceil() as u32;
    max + headroom.max(MIN_HEADROOM)
}

fn hover_for(r: &MatchRecord) -> Hover {
    Hover {
        timestamp: r.date.format(HOVER_DATE_FMT).to_string(),
        opponent: r.opponent_team_name.clone(),
        league: r.league.clone(),
        champion: r.champion.clone(),
        kills: r.kills,
        deaths: r.deaths,
        assists: r.assists,
        note: None,
    }
}

fn chart_title(rows: &[MatchRecord], req: &ChartRequest) -> String {
    let player = req
        .player
        .clone()
        .or_else(|| rows.first().map(|r| r.player_name.clone()))
        .unwrap_or_default();
    let mut title = format!("{} {}", player, req.metric).trim().to_string();
    if let Some(k) = req.min_kills.filter(|k| *k > 0) {
        title.push_str(&format!(" (min {k} kills)"));
    }
    if let GameWindow::Last(n) = req.window {
        title.push_str(&format!(", last {n}"));
    }
    title
}
