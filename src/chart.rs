//! SVG bar chart of a jump count table.
//!
//! One bar per configured range, left to right in configuration order, each
//! annotated with its count. The output is a standalone SVG document.

use std::fs;
use std::path::Path;
use tracing::info;

use crate::classifier::JumpCountTable;
use crate::error::{AnalysisError, Result};

const WIDTH: f64 = 1000.0;
const HEIGHT: f64 = 600.0;
const MARGIN_LEFT: f64 = 80.0;
const MARGIN_RIGHT: f64 = 30.0;
const MARGIN_TOP: f64 = 60.0;
const MARGIN_BOTTOM: f64 = 80.0;
/// Bar width as a share of its slot.
const BAR_WIDTH: f64 = 0.35;
const Y_TICKS: usize = 5;
const BAR_COLOR: &str = "#1f77b4";

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Smallest "nice" axis maximum (1, 2 or 5 times a power of ten) >= `max`.
fn axis_max(max: usize) -> f64 {
    if max == 0 {
        return 1.0;
    }
    let max = max as f64;
    let magnitude = 10f64.powf(max.log10().floor());
    [1.0, 2.0, 5.0, 10.0]
        .iter()
        .map(|m| m * magnitude)
        .find(|&v| v >= max)
        .unwrap_or(10.0 * magnitude)
}

pub fn render_svg(table: &JumpCountTable, asset: &str) -> String {
    let plot_w = WIDTH - MARGIN_LEFT - MARGIN_RIGHT;
    let plot_h = HEIGHT - MARGIN_TOP - MARGIN_BOTTOM;
    let base_y = MARGIN_TOP + plot_h;
    let y_max = axis_max(table.max_count());
    let slot = plot_w / table.len().max(1) as f64;
    let bar_w = slot * BAR_WIDTH;

    let mut lines = Vec::new();
    lines.push(format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{WIDTH}" height="{HEIGHT}" viewBox="0 0 {WIDTH} {HEIGHT}" font-family="sans-serif">"#
    ));
    lines.push(r#"<rect width="100%" height="100%" fill="white"/>"#.to_string());
    lines.push(format!(
        r#"<text x="{}" y="{}" font-size="20" text-anchor="middle">{} Jumps Frequency</text>"#,
        WIDTH / 2.0,
        MARGIN_TOP / 2.0 + 6.0,
        escape(asset)
    ));

    // Y axis grid and tick labels.
    for i in 0..=Y_TICKS {
        let value = y_max * i as f64 / Y_TICKS as f64;
        let y = base_y - plot_h * i as f64 / Y_TICKS as f64;
        lines.push(format!(
            r##"<line x1="{MARGIN_LEFT}" y1="{y:.1}" x2="{:.1}" y2="{y:.1}" stroke="#dddddd"/>"##,
            MARGIN_LEFT + plot_w
        ));
        lines.push(format!(
            r#"<text x="{:.1}" y="{:.1}" font-size="12" text-anchor="end">{}</text>"#,
            MARGIN_LEFT - 8.0,
            y + 4.0,
            value
        ));
    }

    for (i, (range, count)) in table.iter().enumerate() {
        let center = MARGIN_LEFT + slot * (i as f64 + 0.5);
        let bar_h = plot_h * count as f64 / y_max;
        let top = base_y - bar_h;
        lines.push(format!(
            r#"<rect class="bar" x="{:.1}" y="{top:.1}" width="{bar_w:.1}" height="{bar_h:.1}" fill="{BAR_COLOR}"/>"#,
            center - bar_w / 2.0
        ));
        lines.push(format!(
            r#"<text class="count" x="{center:.1}" y="{:.1}" font-size="12" text-anchor="middle">{count}</text>"#,
            top - 4.0
        ));
        lines.push(format!(
            r#"<text class="tick" x="{center:.1}" y="{:.1}" font-size="12" text-anchor="middle">{range}</text>"#,
            base_y + 18.0
        ));
    }

    // Axes, labels and legend.
    lines.push(format!(
        r#"<line x1="{MARGIN_LEFT}" y1="{base_y}" x2="{}" y2="{base_y}" stroke="black"/>"#,
        MARGIN_LEFT + plot_w
    ));
    lines.push(format!(
        r#"<line x1="{MARGIN_LEFT}" y1="{MARGIN_TOP}" x2="{MARGIN_LEFT}" y2="{base_y}" stroke="black"/>"#
    ));
    lines.push(format!(
        r#"<text x="{}" y="{}" font-size="14" text-anchor="middle">Percentage Range</text>"#,
        MARGIN_LEFT + plot_w / 2.0,
        HEIGHT - 25.0
    ));
    lines.push(format!(
        r#"<text x="20" y="{0}" font-size="14" text-anchor="middle" transform="rotate(-90 20 {0})">Frequency</text>"#,
        MARGIN_TOP + plot_h / 2.0
    ));
    let legend_x = WIDTH - MARGIN_RIGHT - 140.0;
    lines.push(format!(
        r#"<rect x="{legend_x}" y="{}" width="14" height="14" fill="{BAR_COLOR}"/>"#,
        MARGIN_TOP + 5.0
    ));
    lines.push(format!(
        r#"<text x="{}" y="{}" font-size="12">Jump Frequency</text>"#,
        legend_x + 20.0,
        MARGIN_TOP + 16.0
    ));
    lines.push("</svg>\n".to_string());
    lines.join("\n")
}

/// Renders the chart and writes it to `path`, replacing any existing file.
pub fn write_svg(table: &JumpCountTable, asset: &str, path: &Path) -> Result<()> {
    let svg = render_svg(table, asset);
    fs::write(path, svg).map_err(|e| AnalysisError::io(path, e))?;
    info!("Graph saved as '{}'.", path.display());
    Ok(())
}
