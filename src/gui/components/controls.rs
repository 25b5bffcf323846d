// src/gui/components/controls.rs
//
// Top bar: view and chart controls, then the ETL input + button and status
// text. The kills threshold only applies to the per-game view.

use eframe::egui::{self, widgets::Spinner};

use crate::chart::{GameWindow, Metric};
use crate::config::state::View;
use crate::gui::app::App;

const WINDOWS: [GameWindow; 4] = [
    GameWindow::All,
    GameWindow::Last(5),
    GameWindow::Last(10),
    GameWindow::Last(20),
];

pub fn draw(ui: &mut egui::Ui, app: &mut App) {
    let mut changed = false;

    ui.horizontal(|ui| {
        let gui = &mut app.state.gui;

        let prev_view = gui.view;
        for v in View::ALL {
            ui.selectable_value(&mut gui.view, v, v.label());
        }
        if gui.view != prev_view {
            logf!("UI: View → {}", gui.view.label());
            changed = true;
        }

        ui.separator();

        ui.label("Min kills:");
        let resp = ui.add_enabled(
            gui.view == View::Games,
            egui::TextEdit::singleline(&mut gui.min_kills_text)
                .desired_width(48.0)
                .hint_text("0"),
        );
        changed |= resp.changed();

        ui.separator();

        let prev_metric = gui.metric;
        for m in Metric::ALL {
            ui.selectable_value(&mut gui.metric, m, m.label());
        }
        if gui.metric != prev_metric {
            logf!("UI: Metric → {}", gui.metric);
            changed = true;
        }

        ui.separator();

        let prev_window = gui.window;
        egui::ComboBox::from_id_salt("game_window")
            .selected_text(gui.window.label())
            .show_ui(ui, |ui| {
                for w in WINDOWS {
                    ui.selectable_value(&mut gui.window, w, w.label());
                }
            });
        if gui.window != prev_window {
            logf!("UI: Window → {:?}", gui.window);
            changed = true;
        }

        ui.separator();
        ui.checkbox(&mut gui.show_table, "Table");
    });

    ui.horizontal(|ui| {
        ui.label("Input:");
        ui.add_enabled(
            !app.running,
            egui::TextEdit::singleline(&mut app.state.paths.input).desired_width(260.0),
        );
        if ui.add_enabled(!app.running, egui::Button::new("Run ETL")).clicked() {
            app.run_etl();
            changed = true;
        }
        if ui.button("Reload").clicked() {
            app.reload();
        }
        if app.running {
            ui.add(Spinner::new());
        }
        ui.separator();
        ui.label(app.status_text());
    });

    if changed {
        app.refresh_chart();
    }
}
