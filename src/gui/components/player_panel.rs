// src/gui/components/player_panel.rs
//
// Left panel: league/team narrowing and the player list. Clicking a player
// selects it on `app`, which reloads rows and the chart.

use std::collections::BTreeSet;

use eframe::egui;
use crate::gui::app::App;

pub fn draw(ui: &mut egui::Ui, app: &mut App) {
    ui.heading("Players");

    if !app.index.is_empty() {
        let gui = &mut app.state.gui;
        let before = (gui.league_filter.clone(), gui.team_filter.clone());

        egui::ComboBox::from_label("League")
            .selected_text(any_or(&gui.league_filter))
            .show_ui(ui, |ui| {
                ui.selectable_value(&mut gui.league_filter, s!(), "Any");
                for league in app.index.leagues() {
                    ui.selectable_value(&mut gui.league_filter, s!(league), league);
                }
            });

        egui::ComboBox::from_label("Team")
            .selected_text(any_or(&gui.team_filter))
            .show_ui(ui, |ui| {
                ui.selectable_value(&mut gui.team_filter, s!(), "Any");
                let teams: BTreeSet<&str> = if gui.league_filter.is_empty() {
                    app.index.leagues().flat_map(|l| app.index.teams(l)).collect()
                } else {
                    app.index.teams(&gui.league_filter).collect()
                };
                for team in teams {
                    ui.selectable_value(&mut gui.team_filter, s!(team), team);
                }
            });

        if before.0 != gui.league_filter {
            // A team from another league would hide everyone
            gui.team_filter.clear();
        }
        if before != (gui.league_filter.clone(), gui.team_filter.clone()) {
            logf!("UI: Filter league={:?} team={:?}", gui.league_filter, gui.team_filter);
        }
    }

    ui.separator();

    // Match the scroll bar aesthetics used in the main table
    {
        let s = &mut ui.style_mut().spacing.scroll;
        s.floating = false;
        s.bar_width = 10.0;
        s.handle_min_length = 48.0;
        let visuals = &mut ui.style_mut().visuals;
        visuals.extreme_bg_color = visuals.panel_fill;
    }

    let visible = {
        let gui = &app.state.gui;
        app.index.visible(&app.players, &gui.league_filter, &gui.team_filter)
    };

    let mut clicked = None;
    egui::ScrollArea::vertical()
        .id_salt("players_panel_scroll")
        .show(ui, |ui| {
            let w = ui.available_width();
            ui.set_min_width(w);

            if visible.is_empty() {
                ui.weak("No players");
            }
            for name in &visible {
                let is_selected = app.state.gui.selected_player.as_deref() == Some(name.as_str());
                if ui.selectable_label(is_selected, name).clicked() && !is_selected {
                    clicked = Some(name.clone());
                }
            }
        });

    if let Some(name) = clicked {
        app.select(Some(name));
    }
}

fn any_or(text: &str) -> String {
    if text.is_empty() { s!("Any") } else { s!(text) }
}
