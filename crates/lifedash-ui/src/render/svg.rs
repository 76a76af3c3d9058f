//! Inline SVG charts.

use lifedash_air::{AqiLevel, HistoryPoint, GAUGE_CIRCUMFERENCE};

use super::escape;

const TRACK_COLOR: &str = "#e5e7eb";

/// Ring gauge on a 100×100 viewBox, r = 45, filled clockwise from the top.
pub fn ring(fraction_offset: f64, color: &str, label: &str) -> String {
    format!(
        concat!(
            r#"<svg class="ring" viewBox="0 0 100 100" width="120" height="120">"#,
            r#"<circle cx="50" cy="50" r="45" fill="none" stroke="{track}" stroke-width="10"/>"#,
            r#"<circle cx="50" cy="50" r="45" fill="none" stroke="{color}" stroke-width="10" "#,
            r#"stroke-linecap="round" stroke-dasharray="{circ}" stroke-dashoffset="{offset:.2}" "#,
            r#"transform="rotate(-90 50 50)"/>"#,
            r#"<text x="50" y="57" text-anchor="middle" font-size="22" font-weight="bold">{label}</text>"#,
            "</svg>"
        ),
        track = TRACK_COLOR,
        color = escape(color),
        circ = GAUGE_CIRCUMFERENCE,
        offset = fraction_offset,
        label = escape(label),
    )
}

/// Dash offset for a ring `percent` full.
pub fn ring_offset(percent: f64) -> f64 {
    GAUGE_CIRCUMFERENCE - GAUGE_CIRCUMFERENCE * percent.clamp(0.0, 100.0) / 100.0
}

/// Price line from precomputed `points` ("x,y x,y …").
pub fn sparkline(points: &str, stroke: &str) -> String {
    if points.is_empty() {
        return String::new();
    }
    format!(
        concat!(
            r#"<svg class="spark" viewBox="0 0 100 100" preserveAspectRatio="none" width="100" height="32">"#,
            r#"<polyline points="{points}" fill="none" stroke="{stroke}" stroke-width="3" "#,
            r#"vector-effect="non-scaling-stroke"/>"#,
            "</svg>"
        ),
        points = escape(points),
        stroke = escape(stroke),
    )
}

/// Seven bars, one per day, height proportional to the AQI level.
pub fn history_bars(history: &[HistoryPoint]) -> String {
    let width = 100.0 / history.len().max(1) as f64;
    let bars: String = history
        .iter()
        .enumerate()
        .map(|(i, point)| {
            let height = f64::from(point.level.value()) * 20.0;
            format!(
                r#"<rect x="{x:.2}" y="{y:.0}" width="{w:.2}" height="{h:.0}" rx="2" fill="{fill}"><title>{title}</title></rect>"#,
                x = i as f64 * width + width * 0.15,
                y = 100.0 - height,
                w = width * 0.7,
                h = height,
                fill = point.level.color(),
                title = escape(&format!("{}: {}", point.date.format("%a"), point.level.category())),
            )
        })
        .collect();
    format!(
        r#"<svg class="bars" viewBox="0 0 100 100" preserveAspectRatio="none" width="210" height="60">{}</svg>"#,
        bars
    )
}

/// Horizontal bar `percent` full.
pub fn progress_bar(percent: f64, color: &str) -> String {
    format!(
        concat!(
            r#"<svg class="progress" viewBox="0 0 100 4" preserveAspectRatio="none" width="100%" height="8">"#,
            r#"<rect width="100" height="4" rx="2" fill="{track}"/>"#,
            r#"<rect width="{pct:.1}" height="4" rx="2" fill="{color}"/>"#,
            "</svg>"
        ),
        track = TRACK_COLOR,
        pct = percent.clamp(0.0, 100.0),
        color = escape(color),
    )
}

/// Ring gauge for an AQI level.
pub fn aqi_ring(level: AqiLevel) -> String {
    ring(
        lifedash_air::view::gauge_offset(level),
        level.color(),
        &level.value().to_string(),
    )
}
