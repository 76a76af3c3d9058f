//! Terminal rendering.

use lifedash_crypto::NO_FAVORITES;

use crate::view::{DashboardView, PanelView};

const HOURS_IN_TEXT: usize = 6;
const RETRY_HINT: &str = "Refresh to try again.";

struct Out(Vec<String>);

impl Out {
    fn line(&mut self, text: impl Into<String>) {
        self.0.push(text.into());
    }

    fn blank(&mut self) {
        self.0.push(String::new());
    }
}

/// Chrome shared by every panel; returns the body when there is one to draw.
fn panel<'a, V>(out: &mut Out, view: &'a PanelView<V>) -> Option<&'a V> {
    let mut header = format!("== {} ==", view.title);
    if view.refreshing {
        header.push_str(" (refreshing)");
    }
    out.line(header);

    if view.skeleton {
        out.line("  Loading...");
        return None;
    }
    if let Some(notice) = &view.notice {
        out.line(format!("  ! {}", notice));
    }
    if let Some(error) = &view.error {
        out.line(format!("  x {}. {}", error, RETRY_HINT));
    }
    view.body.as_ref()
}

fn footer<V>(out: &mut Out, view: &PanelView<V>) {
    if let Some(updated) = &view.updated {
        out.line(format!("  Updated {}", updated));
    }
    out.blank();
}

pub fn render(view: &DashboardView) -> String {
    let mut out = Out(Vec::new());

    out.line(format!("LifeDash  {}  {}", view.clock.time, view.clock.date));
    match &view.location {
        Some(loc) => {
            out.line(format!(
                "{} | {} | IP {} | {} | {}",
                loc.place, loc.country, loc.ip, loc.isp, loc.timezone
            ));
            let accuracy = if loc.accurate { "precise" } else { "approximate" };
            out.line(format!("Coordinates {} ({})", loc.coordinates, accuracy));
        }
        None => out.line("Locating..."),
    }
    out.blank();

    weather(&mut out, view);
    air(&mut out, view);
    crypto(&mut out, view);
    currency(&mut out, view);
    speed(&mut out, view);
    holidays(&mut out, view);

    let mut text = out.0.join("\n");
    text.push('\n');
    text
}

fn weather(out: &mut Out, view: &DashboardView) {
    if let Some(w) = panel(out, &view.weather) {
        let c = &w.current;
        out.line(format!(
            "  {} {:.0}°C {} (feels like {:.0}°C)",
            c.condition.glyph(),
            c.temperature,
            c.description,
            c.feels_like
        ));
        out.line(format!(
            "  Humidity {:.0}% | Wind {:.0} km/h | Precipitation {:.1} mm",
            c.humidity, c.wind_speed, c.precipitation
        ));
        if !w.hourly.is_empty() {
            let hours: Vec<String> = w
                .hourly
                .iter()
                .take(HOURS_IN_TEXT)
                .map(|h| format!("{} {:.0}°", h.label, h.temperature))
                .collect();
            out.line(format!("  Next hours: {}", hours.join(" | ")));
        }
        for day in &w.daily {
            out.line(format!(
                "  {:<12} {} {:>3.0}° / {:>3.0}°  {:<24} sunrise {} sunset {}",
                day.label,
                day.condition.glyph(),
                day.high,
                day.low,
                day.description,
                day.sunrise,
                day.sunset
            ));
        }
    }
    footer(out, &view.weather);
}

fn air(out: &mut Out, view: &DashboardView) {
    if let Some(a) = panel(out, &view.air) {
        out.line(format!("  AQI {} - {}", a.level.value(), a.category));
        out.line(format!("  {}", a.description));
        out.line(format!("  {}", a.recommendation));
        for row in &a.pollutants {
            out.line(format!(
                "  {:<6} {:>8.1} {}  {}",
                row.name,
                row.value,
                row.unit,
                row.level.label()
            ));
        }
        let history: Vec<String> = a
            .history
            .iter()
            .map(|p| format!("{} {}", p.date.format("%a"), p.level.value()))
            .collect();
        out.line(format!("  Last 7 days: {}", history.join(" | ")));
    }
    footer(out, &view.air);
}

fn crypto(out: &mut Out, view: &DashboardView) {
    if let Some(c) = panel(out, &view.crypto) {
        for row in &c.all {
            let arrow = if row.is_up { "+" } else { "-" };
            let star = if row.favorite { "*" } else { " " };
            out.line(format!(
                "  {} {:<6} {:<14} {:>16}  {}{}",
                star, row.symbol, row.name, row.price, arrow, row.change_text
            ));
        }
        if c.favorites.is_empty() {
            out.line(format!("  Favorites: {}", NO_FAVORITES));
        } else {
            let symbols: Vec<&str> = c.favorites.iter().map(|r| r.symbol.as_str()).collect();
            out.line(format!("  Favorites: {}", symbols.join(", ")));
        }
    }
    footer(out, &view.crypto);
}

fn currency(out: &mut Out, view: &DashboardView) {
    if let Some(c) = panel(out, &view.currency) {
        out.line(format!("  {} ({} to {})", c.summary, c.from_name, c.to_name));
        out.line(format!("  {}", c.unit_summary));
    }
    footer(out, &view.currency);
}

fn speed(out: &mut Out, view: &DashboardView) {
    let body = panel(out, &view.speed);
    if let Some((stage, percent)) = &view.speed_progress {
        out.line(format!("  {} {}%", stage, percent));
    }
    match body {
        Some(s) => {
            out.line(format!(
                "  Download {} Mbps ({}) | Upload {} Mbps ({})",
                s.download.mbps, s.download.grade, s.upload.mbps, s.upload.grade
            ));
            out.line(format!("  Ping {} | Jitter {} | {}", s.ping, s.jitter, s.isp));
            out.line(format!("  Last tested: {}", s.last_tested));
        }
        None if view.speed_progress.is_none() && !view.speed.skeleton => {
            out.line("  No recent test. Run `lifedash speedtest` to measure your connection.");
        }
        None => {}
    }
    footer(out, &view.speed);
}

fn holidays(out: &mut Out, view: &DashboardView) {
    let Some(holidays) = &view.holidays else {
        return;
    };
    if let Some(h) = panel(out, holidays) {
        let days = match h.days_remaining {
            0 => "today".to_string(),
            1 => "in 1 day".to_string(),
            n => format!("in {} days", n),
        };
        out.line(format!("  {} ({}) {}", h.local_name, h.date, days));
        if h.from_fallback {
            out.line("  (Using local data)");
        }
    }
    footer(out, holidays);
}
