// src/gui/components/board_table.rs
//
// All players, one line each: career or a single year, narrowed by the
// league/team filters of the side panel. Clicking a header sorts (again to
// flip), clicking a player opens their games.

use eframe::egui::{self, Align, CursorIcon, Layout, RichText, Sense, TextWrapMode};
use egui_extras::{Column, TableBuilder};

use crate::board::{self, BoardRow, SortKey};
use crate::gui::app::App;

// Team has no sort key
const COLUMNS: [Option<SortKey>; 8] = [
    Some(SortKey::Player),
    None,
    Some(SortKey::Games),
    Some(SortKey::WinRate),
    Some(SortKey::Kills),
    Some(SortKey::Deaths),
    Some(SortKey::Assists),
    Some(SortKey::Kda),
];
const WIDTHS: [f32; 8] = [150.0, 140.0, 56.0, 56.0, 48.0, 48.0, 48.0, 56.0];

pub fn draw(ui: &mut egui::Ui, app: &mut App) {
    app.ensure_board();
    let Some(b) = &app.board else { return };

    let years: Vec<i32> = b.years().to_vec();
    let gui = &mut app.state.gui;
    let mut rows = b.lines(gui.board_year);
    rows = board::narrow(rows, &app.index, &gui.league_filter, &gui.team_filter);
    board::sort_rows(&mut rows, gui.board_sort, gui.board_desc);

    ui.horizontal(|ui| {
        ui.strong("All players");
        ui.separator();
        let before = gui.board_year;
        egui::ComboBox::from_id_salt("board_year")
            .selected_text(year_label(gui.board_year))
            .show_ui(ui, |ui| {
                ui.selectable_value(&mut gui.board_year, None, "Career");
                for y in &years {
                    ui.selectable_value(&mut gui.board_year, Some(*y), y.to_string());
                }
            });
        if before != gui.board_year {
            logf!("UI: Board year → {}", year_label(gui.board_year));
        }
        ui.separator();
        ui.label(format!("{} player(s)", rows.len()));
    });
    ui.separator();

    if rows.is_empty() {
        ui.weak("No players");
        return;
    }

    {
        let s = &mut ui.style_mut().spacing.scroll;
        s.floating = false;
        s.bar_width = 10.0;
        s.handle_min_length = 48.0;
    }

    let mut sort_by = None;
    let mut open = None;

    let avail_h = ui.available_height();
    let mut table = TableBuilder::new(ui)
        .striped(true)
        .min_scrolled_height(0.0)
        .max_scroll_height(avail_h);
    for w in WIDTHS {
        table = table.column(Column::initial(w).resizable(true).clip(true).at_least(20.0));
    }

    let (sorted, desc) = (gui.board_sort, gui.board_desc);
    table
        .header(22.0, |mut header| {
            for (ci, key) in COLUMNS.into_iter().enumerate() {
                header.col(|ui| {
                    let text = match key {
                        Some(k) if k == sorted => join!(k.label(), if desc { " ▼" } else { " ▲" }),
                        Some(k) => s!(k.label()),
                        None => s!("Team"),
                    };
                    let text = RichText::new(text).strong();
                    if ci >= 2 {
                        ui.centered_and_justified(|ui| { ui.label(text); });
                    } else {
                        ui.label(text);
                    }

                    let Some(k) = key else { return };
                    let id = ui.id().with("board_hdr").with(ci);
                    let resp = ui.interact(ui.max_rect(), id, Sense::click());
                    if resp.hovered() {
                        ui.output_mut(|o| o.cursor_icon = CursorIcon::PointingHand);
                    }
                    if resp.clicked() {
                        sort_by = Some(k);
                    }
                });
            }
        })
        .body(|body| {
            body.rows(20.0, rows.len(), |mut row| {
                let r = &rows[row.index()];
                for (ci, cell) in cells(r).into_iter().enumerate() {
                    row.col(|ui| {
                        ui.style_mut().wrap_mode = Some(TextWrapMode::Extend);
                        if ci == 0 {
                            if ui.link(cell).on_hover_text("Open games").clicked() {
                                open = Some(r.stem.clone());
                            }
                        } else if ci >= 2 {
                            ui.centered_and_justified(|ui| { ui.label(cell); });
                        } else {
                            ui.with_layout(Layout::left_to_right(Align::Center), |ui| { ui.label(cell); });
                        }
                    });
                }
            });
        });

    if let Some(k) = sort_by {
        if k == gui.board_sort {
            gui.board_desc = !gui.board_desc;
        } else {
            gui.board_sort = k;
            // Names A→Z, numbers high to low
            gui.board_desc = k != SortKey::Player;
        }
        logf!("UI: Board sort → {} {}", gui.board_sort.label(), if gui.board_desc { "desc" } else { "asc" });
    }
    if let Some(stem) = open {
        logf!("UI: Board → {stem}");
        app.open_player(stem);
    }
}

fn cells(r: &BoardRow) -> [String; 8] {
    let l = &r.line;
    [
        r.player.clone(),
        r.team.clone(),
        l.games.to_string(),
        format!("{:.1}", l.win_rate),
        format!("{:.2}", l.avg_kills),
        format!("{:.2}", l.avg_deaths),
        format!("{:.2}", l.avg_assists),
        format!("{:.2}", l.kda),
    ]
}

fn year_label(year: Option<i32>) -> String {
    year.map(|y| y.to_string()).unwrap_or_else(|| s!("Career"))
}
