// src/chart_png.rs
//
// Raster snapshot of a chart: bars, y grid and axes. No text; labels and
// hover data live in the JSON/egui renderings.

use std::path::Path;

use image::{ImageResult, Rgba, RgbaImage};

use crate::chart::ChartSpec;

const BG: Rgba<u8> = Rgba([255, 255, 255, 255]);
const AXIS: Rgba<u8> = Rgba([60, 60, 60, 255]);
const GRID: Rgba<u8> = Rgba([225, 225, 225, 255]);
pub const WIN: Rgba<u8> = Rgba([46, 139, 87, 255]);
pub const LOSS: Rgba<u8> = Rgba([200, 60, 60, 255]);
pub const NEUTRAL: Rgba<u8> = Rgba([70, 110, 190, 255]);

const MARGIN: u32 = 24;

pub fn bar_colour(win: Option<bool>) -> Rgba<u8> {
    match win {
        Some(true) => WIN,
        Some(false) => LOSS,
        None => NEUTRAL,
    }
}

pub fn render(chart: &ChartSpec, width: u32, height: u32) -> RgbaImage {
    let width = width.max(MARGIN * 2 + 1);
    let height = height.max(MARGIN * 2 + 1);
    let mut img = RgbaImage::from_pixel(width, height, BG);

    let (left, right) = (MARGIN, width - MARGIN);
    let (top, bottom) = (MARGIN, height - MARGIN);
    let plot_h = (bottom - top) as f64;
    let y_max = chart.y_max.max(1) as f64;

    // One grid line per unit while that stays readable, else ~10 lines
    let step = (chart.y_max / 10).max(1);
    let mut v = step;
    while v <= chart.y_max {
        let y = bottom - ((v as f64 / y_max) * plot_h).round() as u32;
        hline(&mut img, left, right, y, GRID);
        v += step;
    }

    if !chart.bars.is_empty() {
        let slot = (right - left) as f64 / chart.bars.len() as f64;
        let bar_w = (slot * 0.8).max(1.0);
        for (i, bar) in chart.bars.iter().enumerate() {
            let x0 = left as f64 + i as f64 * slot + (slot - bar_w) / 2.0;
            let h = (bar.value as f64 / y_max * plot_h).round() as u32;
            fill(
                &mut img,
                x0.round() as u32,
                (x0 + bar_w).round() as u32,
                bottom.saturating_sub(h),
                bottom,
                bar_colour(bar.win),
            );
        }
    }

    hline(&mut img, left, right, bottom, AXIS);
    vline(&mut img, left, top, bottom, AXIS);
    img
}

pub fn save(chart: &ChartSpec, path: &Path, width: u32, height: u32) -> ImageResult<()> {
    render(chart, width, height).save(path)
}

fn fill(img: &mut RgbaImage, x0: u32, x1: u32, y0: u32, y1: u32, c: Rgba<u8>) {
    let (w, h) = img.dimensions();
    for y in y0.min(h)..y1.min(h) {
        for x in x0.min(w)..x1.min(w) {
            img.put_pixel(x, y, c);
        }
    }
}

fn hline(img: &mut RgbaImage, x0: u32, x1: u32, y: u32, c: Rgba<u8>) {
    fill(img, x0, x1 + 1, y, y + 1, c);
}

fn vline(img: &mut RgbaImage, x: u32, y0: u32, y1: u32, c: Rgba<u8>) {
    fill(img, x, x + 1, y0, y1 + 1, c);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::{Bar, Hover, Metric};

    fn bar(value: u32, win: Option<bool>) -> Bar {
        Bar {
            label: s!("01/01/25 (1)"),
            value,
            win,
            hover: Hover {
                timestamp: s!(),
                opponent: s!(),
                league: s!(),
                champion: s!(),
                kills: value,
                deaths: 0,
                assists: 0,
                note: None,
            },
        }
    }

    #[test]
    fn bars_take_result_colours() {
        let mut chart = ChartSpec::empty("t", Metric::Kills, None);
        chart.bars = vec![bar(5, Some(true)), bar(5, Some(false))];
        chart.y_max = 5;
        let img = render(&chart, 200, 100);
        assert_eq!(img.dimensions(), (200, 100));
        // Just above the x axis, in the middle of each slot
        assert_eq!(*img.get_pixel(62, 70), WIN);
        assert_eq!(*img.get_pixel(138, 70), LOSS);
    }

    #[test]
    fn empty_chart_still_renders() {
        let chart = ChartSpec::empty("t", Metric::Kills, None);
        let img = render(&chart, 10, 10);
        assert_eq!(img.dimensions(), (49, 49));
    }
}
