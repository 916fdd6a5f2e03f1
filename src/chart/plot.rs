//! Candlestick and volume rendering.
//!
//! Thin adapter over plotters: the series is drawn into an RGB buffer,
//! encoded as PNG and handed to the webview as a base64 `img` source. The
//! label areas match [`CHART_MARGIN`] so the SVG drawing overlay and the
//! bitmap agree on the plotting area.

use std::io::Cursor;

use anyhow::{Context, anyhow};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use chrono::DateTime;
use plotters::coord::Shift;
use plotters::coord::types::RangedCoordf64;
use plotters::prelude::*;
use plotters_bitmap::BitMapBackend;

use crate::chart::coords::CHART_MARGIN;
use crate::data::OhlcBar;

const UP: RGBColor = RGBColor(0x10, 0xB9, 0x81);
const DOWN: RGBColor = RGBColor(0xEF, 0x44, 0x44);
const VOLUME: RGBColor = RGBColor(0x4B, 0x55, 0x63);
const BACKGROUND: RGBColor = RGBColor(0x1F, 0x29, 0x37);
const GRID: RGBColor = RGBColor(0x37, 0x41, 0x51);
const TEXT: RGBColor = RGBColor(0x9C, 0xA3, 0xAF);

/// Renders the price candlesticks for the visible series.
pub fn render_price_chart(
    data: &[OhlcBar],
    width: u32,
    height: u32,
    x_domain: (f64, f64),
    y_domain: (f64, f64),
) -> anyhow::Result<String> {
    let mut buf = vec![0u8; (width * height * 3) as usize];
    {
        let root = BitMapBackend::with_buffer(&mut buf, (width, height)).into_drawing_area();
        root.fill(&BACKGROUND)?;

        let mut chart = chart_on(&root, x_domain, y_domain)?;
        chart
            .configure_mesh()
            .light_line_style(&TRANSPARENT)
            .bold_line_style(&GRID.mix(0.5))
            .label_style(("sans-serif", 12).into_font().color(&TEXT))
            .x_label_formatter(&format_date_label)
            .y_label_formatter(&|price| format!("{price:.4}"))
            .draw()?;

        let candle_px = candle_width_px(data.len(), width);
        chart.draw_series(data.iter().map(|bar| {
            CandleStick::new(
                bar.timestamp_ms(),
                bar.open,
                bar.high,
                bar.low,
                bar.close,
                UP.filled(),
                DOWN.filled(),
                candle_px,
            )
        }))?;

        root.present()?;
    }
    encode_data_uri(buf, width, height)
}

/// Renders the volume histogram shown below the price chart.
pub fn render_volume_chart(
    data: &[OhlcBar],
    width: u32,
    height: u32,
    x_domain: (f64, f64),
) -> anyhow::Result<String> {
    let max_volume = data.iter().map(|bar| bar.volume).fold(0.0_f64, f64::max);
    let y_domain = (0.0, if max_volume > 0.0 { max_volume * 1.05 } else { 1.0 });

    let mut buf = vec![0u8; (width * height * 3) as usize];
    {
        let root = BitMapBackend::with_buffer(&mut buf, (width, height)).into_drawing_area();
        root.fill(&BACKGROUND)?;

        let mut chart = chart_on(&root, x_domain, y_domain)?;
        chart
            .configure_mesh()
            .x_labels(0)
            .light_line_style(&TRANSPARENT)
            .bold_line_style(&GRID.mix(0.5))
            .label_style(("sans-serif", 12).into_font().color(&TEXT))
            .y_label_formatter(&|v| format!("{:.0}M", v / 1_000_000.0))
            .draw()?;

        let half = bar_half_width_ms(data);
        chart.draw_series(data.iter().map(|bar| {
            let x = bar.timestamp_ms();
            Rectangle::new([(x - half, 0.0), (x + half, bar.volume)], VOLUME.filled())
        }))?;

        root.present()?;
    }
    encode_data_uri(buf, width, height)
}

type PlotChart<'a, 'b> =
    ChartContext<'a, BitMapBackend<'b>, Cartesian2d<RangedCoordf64, RangedCoordf64>>;

fn chart_on<'a, 'b>(
    root: &'a DrawingArea<BitMapBackend<'b>, Shift>,
    x_domain: (f64, f64),
    y_domain: (f64, f64),
) -> anyhow::Result<PlotChart<'a, 'b>> {
    let (x0, x1) = non_degenerate(x_domain);
    let (y0, y1) = non_degenerate(y_domain);
    ChartBuilder::on(root)
        .margin_top(CHART_MARGIN.top as u32)
        .margin_left(CHART_MARGIN.left as u32)
        .set_label_area_size(LabelAreaPosition::Right, CHART_MARGIN.right as u32)
        .set_label_area_size(LabelAreaPosition::Bottom, CHART_MARGIN.bottom as u32)
        .build_cartesian_2d(x0..x1, y0..y1)
        .map_err(|e| anyhow!("chart layout failed: {e}"))
}

fn non_degenerate((lo, hi): (f64, f64)) -> (f64, f64) {
    if lo == hi { (lo, hi + 1.0) } else { (lo, hi) }
}

fn candle_width_px(bars: usize, width: u32) -> u32 {
    if bars == 0 {
        return 1;
    }
    let plot_width = width as f64 - CHART_MARGIN.left - CHART_MARGIN.right;
    ((plot_width / bars as f64) * 0.6).max(1.0) as u32
}

fn bar_half_width_ms(data: &[OhlcBar]) -> f64 {
    const HALF_DAY_MS: f64 = 12.0 * 3600.0 * 1000.0;
    if data.len() < 2 {
        return HALF_DAY_MS * 0.6;
    }
    let span = data[data.len() - 1].timestamp_ms() - data[0].timestamp_ms();
    (span / data.len() as f64 * 0.3).max(1.0)
}

fn format_date_label(ts: &f64) -> String {
    DateTime::from_timestamp_millis(*ts as i64)
        .map(|dt| dt.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

fn encode_data_uri(buf: Vec<u8>, width: u32, height: u32) -> anyhow::Result<String> {
    let img = image::RgbImage::from_raw(width, height, buf)
        .context("bitmap buffer has the wrong size")?;
    let mut png = Vec::new();
    img.write_to(&mut Cursor::new(&mut png), image::ImageFormat::Png)?;
    Ok(format!("data:image/png;base64,{}", BASE64_STANDARD.encode(&png)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn candle_width_never_collapses_to_zero() {
        assert_eq!(candle_width_px(0, 900), 1);
        assert!(candle_width_px(10_000, 900) >= 1);
        assert!(candle_width_px(50, 900) > 5);
    }

    #[test]
    fn degenerate_domains_are_widened() {
        assert_eq!(non_degenerate((3.0, 3.0)), (3.0, 4.0));
        assert_eq!(non_degenerate((1.0, 2.0)), (1.0, 2.0));
    }

    #[test]
    fn renders_an_empty_series_without_failing() {
        let uri = render_price_chart(&[], 300, 200, (0.0, 0.0), (0.0, 0.0)).unwrap();
        assert!(uri.starts_with("data:image/png;base64,"));
    }
}
