//! Price sparklines on a 100×100 viewBox, and price formatting.

use lifedash_core::format::format_number;

pub const UP_COLOR: &str = "#10b981";
pub const DOWN_COLOR: &str = "#ef4444";

/// Polyline points for `prices`, x spread evenly and y inverted so higher
/// prices sit nearer the top. A single price sits at x = 0; a flat series
/// runs along y = 50.
pub fn points(prices: &[f64]) -> Vec<(f64, f64)> {
    let Some(min) = prices.iter().copied().reduce(f64::min) else {
        return Vec::new();
    };
    let max = prices.iter().copied().fold(min, f64::max);
    let range = max - min;
    let last = prices.len().saturating_sub(1);

    prices
        .iter()
        .enumerate()
        .map(|(i, &price)| {
            let x = if last == 0 {
                0.0
            } else {
                i as f64 / last as f64 * 100.0
            };
            let y = if range > 0.0 {
                100.0 - (price - min) / range * 100.0
            } else {
                50.0
            };
            (x, y)
        })
        .collect()
}

/// `points` in SVG `points` attribute form: "x,y x,y …".
pub fn svg_points(prices: &[f64]) -> String {
    points(prices)
        .iter()
        .map(|(x, y)| format!("{},{}", trim_float(*x), trim_float(*y)))
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn stroke_color(change_24h: f64) -> &'static str {
    if change_24h >= 0.0 {
        UP_COLOR
    } else {
        DOWN_COLOR
    }
}

/// Group thousands and keep up to three decimals: 65432.1 → "65,432.1".
pub fn format_price(price: f64) -> String {
    format_number(price, 3)
}

fn trim_float(v: f64) -> String {
    let s = format!("{:.2}", v);
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}
