//! Line chart of the potential sequence.

use image::{Rgba, RgbaImage};
use life_core::{Error, Result};
use std::path::Path;

const WIDTH: u32 = 640;
const HEIGHT: u32 = 360;
const MARGIN: i32 = 24;

const BACKGROUND: Rgba<u8> = Rgba([255, 255, 255, 255]);
const AXIS: Rgba<u8> = Rgba([120, 120, 120, 255]);
const LINE: Rgba<u8> = Rgba([40, 80, 170, 255]);

/// Plot the potential sequence as a PNG line chart.
///
/// The leading infinity sentinel (and any other non-finite entry) is
/// skipped; the remaining values are scaled to fit the chart area.
pub fn save_potential_chart<P: AsRef<Path>>(potentials: &[f64], path: P) -> Result<()> {
    if potentials.is_empty() {
        return Err(Error::InvalidState(
            "call run() before plotting the potential".to_string(),
        ));
    }

    let points: Vec<(usize, f64)> = potentials
        .iter()
        .copied()
        .enumerate()
        .filter(|(_, p)| p.is_finite())
        .collect();

    let mut chart = RgbaImage::from_pixel(WIDTH, HEIGHT, BACKGROUND);
    draw_axes(&mut chart);

    if !points.is_empty() {
        let max_potential = points.iter().map(|&(_, p)| p).fold(0.0, f64::max).max(1.0);
        let max_index = points[points.len() - 1].0.max(1);

        let plot_w = (WIDTH as i32 - 2 * MARGIN) as f64;
        let plot_h = (HEIGHT as i32 - 2 * MARGIN) as f64;

        let mut previous: Option<(i32, i32)> = None;
        for &(i, p) in &points {
            let x = MARGIN + (i as f64 / max_index as f64 * plot_w) as i32;
            let y = HEIGHT as i32 - MARGIN - (p / max_potential * plot_h) as i32;

            if let Some(from) = previous {
                draw_line(&mut chart, from, (x, y), LINE);
            }
            previous = Some((x, y));
        }
    }

    chart
        .save(path.as_ref())
        .map_err(|e| Error::Render(e.to_string()))
}

fn draw_axes(chart: &mut RgbaImage) {
    let bottom = HEIGHT as i32 - MARGIN;
    let right = WIDTH as i32 - MARGIN;
    draw_line(chart, (MARGIN, MARGIN), (MARGIN, bottom), AXIS);
    draw_line(chart, (MARGIN, bottom), (right, bottom), AXIS);
}

fn draw_line(chart: &mut RgbaImage, from: (i32, i32), to: (i32, i32), color: Rgba<u8>) {
    let dx = to.0 - from.0;
    let dy = to.1 - from.1;
    let steps = dx.abs().max(dy.abs()).max(1);

    for i in 0..=steps {
        let x = from.0 + dx * i / steps;
        let y = from.1 + dy * i / steps;
        if x >= 0 && y >= 0 && (x as u32) < chart.width() && (y as u32) < chart.height() {
            chart.put_pixel(x as u32, y as u32, color);
        }
    }
}
