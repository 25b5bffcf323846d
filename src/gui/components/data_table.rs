// src/gui/components/data_table.rs
//
// Selected player's rows, newest first. Purely a view.

use eframe::egui::{self, Align, Color32, Layout, RichText, TextWrapMode};
use egui_extras::{Column, TableBuilder};

use crate::config::consts::HOVER_DATE_FMT;
use crate::gui::app::App;
use crate::record::MatchRecord;

const HEADERS: [&str; 10] = [
    "Date", "League", "Side", "Team", "Opponent", "Champion", "K", "D", "A", "Result",
];
const WIDTHS: [f32; 10] = [120.0, 60.0, 40.0, 140.0, 140.0, 90.0, 28.0, 28.0, 28.0, 50.0];
// K, D, A, Result
const FIRST_NUMERIC: usize = 6;

pub fn draw(ui: &mut egui::Ui, app: &mut App) {
    if app.rows.is_empty() {
        return;
    }

    let mut order: Vec<&MatchRecord> = app.rows.iter().collect();
    order.sort_by(|a, b| b.date.cmp(&a.date));

    {
        let s = &mut ui.style_mut().spacing.scroll;
        s.floating = false;
        s.bar_width = 10.0;
        s.handle_min_length = 48.0;
    }

    let avail_h = ui.available_height();
    let mut table = TableBuilder::new(ui)
        .striped(true)
        .min_scrolled_height(0.0)
        .max_scroll_height(avail_h);
    for w in WIDTHS {
        table = table.column(Column::initial(w).resizable(true).clip(true).at_least(20.0));
    }

    table
        .header(22.0, |mut header| {
            for (ci, h) in HEADERS.iter().enumerate() {
                header.col(|ui| {
                    let text = RichText::new(*h).strong();
                    if ci >= FIRST_NUMERIC {
                        ui.centered_and_justified(|ui| { ui.label(text); });
                    } else {
                        ui.label(text);
                    }
                });
            }
        })
        .body(|body| {
            body.rows(20.0, order.len(), |mut row| {
                let r = order[row.index()];
                let cells = cells(r);
                for (ci, cell) in cells.into_iter().enumerate() {
                    row.col(|ui| {
                        ui.style_mut().wrap_mode = Some(TextWrapMode::Extend);
                        let mut rt = RichText::new(cell);
                        if ci == HEADERS.len() - 1 {
                            rt = match r.result.map(|res| res.is_win()) {
                                Some(true) => rt.color(Color32::from_rgb(0x2E, 0x8B, 0x57)),
                                Some(false) => rt.color(Color32::from_rgb(0xC8, 0x3C, 0x3C)),
                                None => rt,
                            };
                        }
                        if ci >= FIRST_NUMERIC {
                            ui.centered_and_justified(|ui| { ui.label(rt); });
                        } else {
                            ui.with_layout(Layout::left_to_right(Align::Center), |ui| { ui.label(rt); });
                        }
                    });
                }
            });
        });
}

fn cells(r: &MatchRecord) -> [String; 10] {
    [
        r.date.format(HOVER_DATE_FMT).to_string(),
        r.league.clone(),
        r.side.map(|s| s!(s.as_str())).unwrap_or_default(),
        r.team_name.clone(),
        r.opponent_team_name.clone(),
        r.champion.clone(),
        r.kills.to_string(),
        r.deaths.to_string(),
        r.assists.to_string(),
        match r.result.map(|res| res.is_win()) {
            Some(true) => s!("Win"),
            Some(false) => s!("Loss"),
            None => s!(),
        },
    ]
}
