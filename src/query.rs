// src/query.rs
//
// What the dashboard asks for: a player name (a file in the store) plus the
// raw text of the minimum-kills box. Always answers with a chart; problems
// come back as a notice on an empty or unfiltered chart.

use crate::chart::{build_chart, ChartRequest, ChartSpec, GameWindow, Metric};
use crate::record::MatchRecord;
use crate::store::PlayerStore;

/// Blank → no threshold; non-negative integer → threshold; anything else is
/// an error message for the notice.
pub fn parse_threshold(text: &str) -> Result<Option<u32>, String> {
    let t = text.trim();
    if t.is_empty() {
        return Ok(None);
    }
    t.parse::<u32>()
        .map(Some)
        .map_err(|_| format!("Ignoring minimum kills {t:?}: not a whole number ≥ 0"))
}

pub fn chart_for(
    store: &PlayerStore,
    player: Option<&str>,
    min_kills_text: &str,
    metric: Metric,
    window: GameWindow,
) -> ChartSpec {
    let Some(player) = player.map(str::trim).filter(|p| !p.is_empty()) else {
        return ChartSpec::empty(s!(), metric, Some(s!("Select a player")));
    };

    if !store.contains(player) {
        logd!("Query: unknown player {player:?}");
        return ChartSpec::empty(player, metric, Some(format!("No data for player {player:?}")));
    }

    let rows = match store.load_player(player) {
        Ok(rows) => rows,
        Err(e) => {
            loge!("Query: {e}");
            return ChartSpec::empty(player, metric, Some(e.to_string()));
        }
    };

    chart_from_rows(&rows, min_kills_text, metric, window)
}

/// Chart over rows already loaded for one player (the selection), with the
/// same threshold handling and notices as `chart_for`.
pub fn chart_from_rows(
    rows: &[MatchRecord],
    min_kills_text: &str,
    metric: Metric,
    window: GameWindow,
) -> ChartSpec {
    let (min_kills, notice) = match parse_threshold(min_kills_text) {
        Ok(k) => (k, None),
        Err(msg) => (None, Some(msg)),
    };

    // The file already is the selection; its stem may differ from the
    // player name when the name needed sanitizing.
    let req = ChartRequest { player: None, min_kills, metric, window };
    let mut chart = build_chart(rows, &req);
    chart.notice = notice.or_else(|| {
        chart.is_empty().then(|| match min_kills {
            Some(k) if k > 0 => format!("No games with at least {k} kills"),
            _ => s!("No games"),
        })
    });
    chart
}
