// src/gui/components/chart_view.rs
//
// Paints the current ChartSpec: y grid with tick labels, one bar per game
// coloured by result, slanted x labels when there are few enough bars, and
// hover text per bar. Below it, the career summary line.

use std::f32::consts::FRAC_PI_4;

use eframe::egui::{self, epaint::TextShape, Align2, Color32, FontId, Pos2, Rect, Sense, Stroke, Vec2};

use crate::chart_png::bar_colour;
use crate::gui::app::App;
use crate::stats;

const LEFT_GUTTER: f32 = 36.0;
const LABEL_GUTTER: f32 = 64.0;
const CHART_SHARE: f32 = 0.55;
const FORM_GAMES: usize = 5;

pub fn draw(ui: &mut egui::Ui, app: &mut App) {
    let chart = &app.chart;

    ui.horizontal(|ui| {
        ui.strong(&chart.title);
        if let Some(note) = &chart.notice {
            ui.separator();
            ui.colored_label(ui.visuals().warn_fg_color, note);
        }
    });

    let height = if app.state.gui.show_table {
        (ui.available_height() * CHART_SHARE).max(160.0)
    } else {
        ui.available_height() - 24.0
    };
    let (resp, painter) = ui.allocate_painter(Vec2::new(ui.available_width(), height), Sense::hover());
    let outer = resp.rect;

    let bottom_gutter = if chart.show_labels && !chart.bars.is_empty() { LABEL_GUTTER } else { 8.0 };
    let plot = Rect::from_min_max(
        Pos2::new(outer.left() + LEFT_GUTTER, outer.top() + 8.0),
        Pos2::new(outer.right() - 8.0, outer.bottom() - bottom_gutter),
    );

    let visuals = ui.visuals();
    let text_color = visuals.text_color();
    let grid = Stroke::new(1.0, visuals.widgets.noninteractive.bg_stroke.color);
    let axis = Stroke::new(1.0, text_color);
    let font = FontId::proportional(11.0);

    // Y grid + ticks
    let y_max = chart.y_max.max(1) as f32;
    let step = (chart.y_max / 10).max(1);
    let y_of = |v: f32| plot.bottom() - v / y_max * plot.height();
    let mut v = 0;
    while v <= chart.y_max {
        let y = y_of(v as f32);
        painter.line_segment([Pos2::new(plot.left(), y), Pos2::new(plot.right(), y)], grid);
        painter.text(Pos2::new(plot.left() - 4.0, y), Align2::RIGHT_CENTER, v.to_string(), font.clone(), text_color);
        v += step;
    }

    if chart.bars.is_empty() {
        painter.text(plot.center(), Align2::CENTER_CENTER, "No games to show", FontId::proportional(14.0), text_color);
    } else {
        let slot = plot.width() / chart.bars.len() as f32;
        let bar_w = (slot * 0.8).max(1.0);

        for (i, bar) in chart.bars.iter().enumerate() {
            let x0 = plot.left() + i as f32 * slot + (slot - bar_w) / 2.0;
            let rect = Rect::from_min_max(
                Pos2::new(x0, y_of(bar.value as f32)),
                Pos2::new(x0 + bar_w, plot.bottom()),
            );
            let [r, g, b, _] = bar_colour(bar.win).0;
            painter.rect_filled(rect, 0.0, Color32::from_rgb(r, g, b));

            // Hover covers the whole column so zero-height bars still answer
            let column = Rect::from_x_y_ranges(x0..=x0 + bar_w, plot.top()..=plot.bottom());
            ui.interact(column, resp.id.with(i), Sense::hover())
                .on_hover_text(format!("{}\n{}: {}\n{}", bar.label, chart.metric, bar.value, bar.hover.text()));

            if chart.show_labels {
                let galley = painter.layout_no_wrap(bar.label.clone(), font.clone(), text_color);
                let anchor = Pos2::new(x0 + bar_w / 2.0, plot.bottom() + 4.0);
                painter.add(TextShape::new(anchor, galley, text_color).with_angle(FRAC_PI_4));
            }
        }
    }

    painter.line_segment([plot.left_bottom(), plot.right_bottom()], axis);
    painter.line_segment([plot.left_top(), plot.left_bottom()], axis);

    summary_line(ui, app);
}

fn summary_line(ui: &mut egui::Ui, app: &App) {
    let Some(sum) = &app.summary else { return };
    let o = &sum.overall;
    ui.horizontal_wrapped(|ui| {
        ui.strong(&sum.player);
        ui.label(format!("({})", sum.team));
        ui.separator();
        ui.label(format!("{} games, {:.1}% wins", o.games, o.win_rate));
        ui.separator();
        ui.label(format!(
            "avg {:.2} / {:.2} / {:.2}, KDA {:.2}",
            o.avg_kills, o.avg_deaths, o.avg_assists, o.kda
        ));
        if let Some((year, y)) = sum.years.first() {
            ui.separator();
            ui.label(format!("{year}: {} games, KDA {:.2}", y.games, y.kda));
        }
        let metric = app.state.gui.metric;
        ui.separator();
        ui.label(format!(
            "last {FORM_GAMES} {}: {:+.0}% vs career",
            metric.label().to_lowercase(),
            stats::recent_form(&app.rows, metric, FORM_GAMES)
        ));
    });
}
