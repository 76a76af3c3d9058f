//! Single-page HTML rendering with inline SVG. Every user-visible string
//! goes through `escape`.

use lifedash_crypto::{CoinRow, NO_FAVORITES};
use lifedash_speed::SpeedFigure;

use super::escape;
use super::svg;
use crate::view::{DashboardView, PanelView};

const STYLE: &str = r#"
body { font-family: system-ui, sans-serif; margin: 0; background: #f3f4f6; color: #1f2937; }
header { display: flex; justify-content: space-between; align-items: center; padding: 1rem 2rem; background: #fff; border-bottom: 1px solid #e5e7eb; }
main { display: grid; grid-template-columns: repeat(auto-fill, minmax(340px, 1fr)); gap: 1rem; padding: 1rem 2rem; }
section { background: #fff; border-radius: 12px; padding: 1rem 1.25rem; box-shadow: 0 1px 2px rgba(0,0,0,.06); }
h2 { font-size: 1.1rem; margin: 0 0 .75rem; }
table { width: 100%; border-collapse: collapse; font-size: .9rem; }
td { padding: .25rem .35rem; }
.notice { color: #b45309; font-size: .8rem; }
.error { color: #dc2626; }
.muted { color: #6b7280; font-size: .8rem; }
.skeleton { height: 8rem; border-radius: 8px; background: #e5e7eb; }
.up { color: #10b981; }
.down { color: #ef4444; }
.big { font-size: 2rem; font-weight: 700; }
"#;

/// Opens a panel and draws its chrome. Returns the body when there is one.
fn open<'a, V>(out: &mut String, view: &'a PanelView<V>) -> Option<&'a V> {
    out.push_str(&format!(
        r#"<section id="{id}"><h2>{title}{refreshing}</h2>"#,
        id = format!("{:?}", view.panel).to_lowercase(),
        title = escape(view.title),
        refreshing = if view.refreshing {
            r#" <span class="muted">refreshing…</span>"#
        } else {
            ""
        },
    ));
    if view.skeleton {
        out.push_str(r#"<div class="skeleton"></div>"#);
        return None;
    }
    if let Some(notice) = &view.notice {
        out.push_str(&format!(r#"<p class="notice">{}</p>"#, escape(notice)));
    }
    if let Some(error) = &view.error {
        out.push_str(&format!(
            r#"<p class="error">{}. Refresh to try again.</p>"#,
            escape(error)
        ));
    }
    view.body.as_ref()
}

fn close<V>(out: &mut String, view: &PanelView<V>) {
    if let Some(updated) = &view.updated {
        out.push_str(&format!(r#"<p class="muted">Updated {}</p>"#, escape(updated)));
    }
    out.push_str("</section>");
}

pub fn render(view: &DashboardView) -> String {
    let mut out = String::new();
    out.push_str("<!DOCTYPE html><html lang=\"en\"><head><meta charset=\"utf-8\">");
    out.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">");
    out.push_str("<title>LifeDash</title><style>");
    out.push_str(STYLE);
    out.push_str("</style></head><body>");

    header(&mut out, view);
    out.push_str("<main>");
    weather(&mut out, view);
    air(&mut out, view);
    crypto(&mut out, view);
    currency(&mut out, view);
    speed(&mut out, view);
    holidays(&mut out, view);
    out.push_str("</main></body></html>\n");
    out
}

fn header(out: &mut String, view: &DashboardView) {
    out.push_str("<header><div><strong>LifeDash</strong>");
    match &view.location {
        Some(loc) => out.push_str(&format!(
            r#"<div>{place} &middot; {country}</div><div class="muted">IP {ip} &middot; {isp} &middot; {tz} &middot; {coords}{accuracy}</div>"#,
            place = escape(&loc.place),
            country = escape(&loc.country),
            ip = escape(&loc.ip),
            isp = escape(&loc.isp),
            tz = escape(&loc.timezone),
            coords = escape(&loc.coordinates),
            accuracy = if loc.accurate { " (precise)" } else { "" },
        )),
        None => out.push_str(r#"<div class="muted">Locating…</div>"#),
    }
    out.push_str(&format!(
        r#"</div><div><div class="big">{}</div><div class="muted">{}</div></div></header>"#,
        escape(&view.clock.time),
        escape(&view.clock.date)
    ));
}

fn weather(out: &mut String, view: &DashboardView) {
    if let Some(w) = open(out, &view.weather) {
        let c = &w.current;
        out.push_str(&format!(
            r#"<div class="big">{glyph} {temp:.0}°C</div><p>{desc} &middot; feels like {feels:.0}°C</p><p class="muted">Humidity {hum:.0}% &middot; Wind {wind:.0} km/h &middot; Precipitation {precip:.1} mm</p>"#,
            glyph = c.condition.glyph(),
            temp = c.temperature,
            desc = escape(c.description),
            feels = c.feels_like,
            hum = c.humidity,
            wind = c.wind_speed,
            precip = c.precipitation,
        ));

        out.push_str("<table><tr>");
        for hour in &w.hourly {
            out.push_str(&format!(
                r#"<td title="{time}">{label}<br>{glyph}<br>{temp:.0}°{precip}</td>"#,
                time = escape(&hour.time),
                label = escape(&hour.label),
                glyph = hour.condition.glyph(),
                temp = hour.temperature,
                precip = hour
                    .precipitation_chance
                    .map(|p| format!(r#"<br><span class="muted">{:.0}%</span>"#, p))
                    .unwrap_or_default(),
            ));
        }
        out.push_str("</tr></table><table>");
        for day in &w.daily {
            out.push_str(&format!(
                r#"<tr><td>{label}</td><td>{glyph}</td><td>{desc}</td><td>{high:.0}° / {low:.0}°</td><td class="muted">↑{rise} ↓{set}</td></tr>"#,
                label = escape(&day.label),
                glyph = day.condition.glyph(),
                desc = escape(day.description),
                high = day.high,
                low = day.low,
                rise = escape(&day.sunrise),
                set = escape(&day.sunset),
            ));
        }
        out.push_str("</table>");
    }
    close(out, &view.weather);
}

fn air(out: &mut String, view: &DashboardView) {
    if let Some(a) = open(out, &view.air) {
        out.push_str(&svg::aqi_ring(a.level));
        out.push_str(&format!(
            r#"<p><strong style="color:{color}">{category}</strong></p><p>{desc}</p><p class="muted">{rec}</p><table>"#,
            color = escape(a.color),
            category = escape(a.category),
            desc = escape(a.description),
            rec = escape(a.recommendation),
        ));
        for row in &a.pollutants {
            out.push_str(&format!(
                r#"<tr><td>{name}</td><td>{value:.1} {unit}</td><td style="width:40%">{bar}</td><td style="color:{color}">{level}</td></tr>"#,
                name = escape(row.name),
                value = row.value,
                unit = escape(row.unit),
                bar = svg::progress_bar(row.percent, row.level.color()),
                color = escape(row.level.color()),
                level = escape(row.level.label()),
            ));
        }
        out.push_str("</table><p class=\"muted\">Last 7 days</p>");
        out.push_str(&svg::history_bars(&a.history));
    }
    close(out, &view.air);
}

fn coin_rows(out: &mut String, rows: &[CoinRow]) {
    out.push_str("<table>");
    for row in rows {
        out.push_str(&format!(
            r#"<tr><td>{star}</td><td><strong>{symbol}</strong> <span class="muted">{name}</span></td><td>{price}</td><td class="{dir}">{sign}{change}</td><td>{spark}</td></tr>"#,
            star = if row.favorite { "★" } else { "☆" },
            symbol = escape(&row.symbol),
            name = escape(&row.name),
            price = escape(&row.price),
            dir = if row.is_up { "up" } else { "down" },
            sign = if row.is_up { "▲" } else { "▼" },
            change = escape(&row.change_text),
            spark = svg::sparkline(&row.sparkline, row.stroke),
        ));
    }
    out.push_str("</table>");
}

fn crypto(out: &mut String, view: &DashboardView) {
    if let Some(c) = open(out, &view.crypto) {
        coin_rows(out, &c.all);
        out.push_str("<h2>Favorites</h2>");
        if c.favorites.is_empty() {
            out.push_str(&format!(r#"<p class="muted">{}</p>"#, escape(NO_FAVORITES)));
        } else {
            coin_rows(out, &c.favorites);
        }
    }
    close(out, &view.crypto);
}

fn currency(out: &mut String, view: &DashboardView) {
    if let Some(c) = open(out, &view.currency) {
        out.push_str(&format!(
            r#"<div class="big">{summary}</div><p>{from_name} → {to_name}</p><p class="muted">{unit}</p>"#,
            summary = escape(&c.summary),
            from_name = escape(&c.from_name),
            to_name = escape(&c.to_name),
            unit = escape(&c.unit_summary),
        ));
    }
    close(out, &view.currency);
}

fn figure(label: &str, f: &SpeedFigure) -> String {
    format!(
        r#"<div><span class="muted">{label}</span><div class="big" style="color:{color}">{mbps} <small>Mbps</small></div><span>{grade}</span></div>"#,
        label = escape(label),
        color = escape(f.color),
        mbps = escape(&f.mbps),
        grade = escape(f.grade),
    )
}

fn speed(out: &mut String, view: &DashboardView) {
    let body = open(out, &view.speed);
    if let Some((stage, percent)) = &view.speed_progress {
        out.push_str(&format!("<h3>{}</h3>", escape(stage)));
        out.push_str(&svg::progress_bar(f64::from(*percent), "#3b82f6"));
    }
    if let Some(s) = body {
        out.push_str(&figure("Download Speed", &s.download));
        out.push_str(&figure("Upload Speed", &s.upload));
        out.push_str(&format!(
            r#"<p>Ping {ping} &middot; Jitter {jitter} &middot; {isp}</p><p class="muted">Last tested: {at}</p>"#,
            ping = escape(&s.ping),
            jitter = escape(&s.jitter),
            isp = escape(&s.isp),
            at = escape(&s.last_tested),
        ));
    } else if view.speed_progress.is_none() && !view.speed.skeleton {
        out.push_str(r#"<p class="muted">Measure your connection's download and upload speeds, ping, and jitter with <code>lifedash speedtest</code>.</p>"#);
    }
    close(out, &view.speed);
}

fn holidays(out: &mut String, view: &DashboardView) {
    let Some(holidays) = &view.holidays else {
        return;
    };
    if let Some(h) = open(out, holidays) {
        if h.from_fallback {
            out.push_str(r#"<p class="notice">(Using local data)</p>"#);
        }
        out.push_str(&svg::ring(
            svg::ring_offset(h.progress),
            "#9333ea",
            &h.days_remaining.to_string(),
        ));
        out.push_str(&format!(
            r#"<p><strong>{name}</strong></p><p class="muted">{date}</p>"#,
            name = escape(&h.local_name),
            date = escape(&h.date),
        ));
    }
    close(out, holidays);
}
