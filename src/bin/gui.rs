// src/bin/gui.rs
#![cfg_attr(target_os = "windows", windows_subsystem = "windows")]
use eframe::egui::{IconData, ViewportBuilder};
use image::{Rgba, RgbaImage};
use lol_analytics::{config::state::GuiState, gui, log};

const ICON_SIZE: u32 = 32;

/// Three ascending bars on a dark tile.
fn app_icon() -> IconData {
    let bars = [(6, 14, 12), (14, 22, 20), (22, 30, 28)];
    let rgba = RgbaImage::from_fn(ICON_SIZE, ICON_SIZE, |x, y| {
        let lit = bars
            .iter()
            .any(|&(x0, x1, h)| x >= x0 && x < x1 && y >= ICON_SIZE - 2 - h && y < ICON_SIZE - 2);
        if lit { Rgba([200, 155, 60, 255]) } else { Rgba([20, 28, 40, 255]) }
    });
    let (w, h) = rgba.dimensions();
    IconData { rgba: rgba.into_raw(), width: w, height: h }
}

fn main() {
    if let Err(e) = log::init_file(None) {
        eprintln!("Log file unavailable: {e}");
    }

    let gui = GuiState::default();
    let options = eframe::NativeOptions {
        // eframe 0.32: icon set via viewport builder
        viewport: ViewportBuilder::default()
            .with_inner_size([gui.window_w as f32, gui.window_h as f32])
            .with_icon(app_icon()),
        ..Default::default()
    };

    if let Err(e) = gui::run(options) {
        eprintln!("GUI failed: {}", e);
        std::process::exit(1);
    }
}
