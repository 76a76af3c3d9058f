//! Loads a dashboard against a mock server and renders it both ways.

use std::sync::Arc;

use chrono::{FixedOffset, TimeZone, Utc};
use lifedash_cache::{Favorites, KvStore, MemoryStore, ReadingCache, SystemClock};
use lifedash_core::Config;
use lifedash_location::{LocationFix, PlaceCandidate};
use lifedash_ui::render::{html, text};
use lifedash_ui::{Dashboard, DashboardView, PanelServices};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn forecast() -> serde_json::Value {
    serde_json::json!({
        "utc_offset_seconds": 0,
        "current": {
            "temperature_2m": 18.2, "apparent_temperature": 17.0,
            "relative_humidity_2m": 60.0, "precipitation": 0.0,
            "weather_code": 0, "wind_speed_10m": 11.5, "is_day": 1
        },
        "daily": {
            "time": ["2025-05-01"], "temperature_2m_max": [21.0],
            "temperature_2m_min": [9.0], "weather_code": [0],
            "sunrise": ["2025-05-01T05:36"], "sunset": ["2025-05-01T19:45"]
        }
    })
}

async fn server() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast()))
        .mount(&server)
        .await;
    server
}

fn dashboard(server: &MockServer) -> Dashboard {
    let mut config = Config::default();
    config.http.timeout_secs = 2;
    let uri = server.uri();
    config.endpoints.open_meteo = uri.clone();
    config.endpoints.waqi = uri.clone();
    config.endpoints.coingecko = uri.clone();
    config.endpoints.er_api = uri.clone();
    config.endpoints.exchangerate_host = uri.clone();
    config.endpoints.exchangerate_api = uri.clone();
    config.endpoints.nager = uri;

    let store: Arc<dyn KvStore> = Arc::new(MemoryStore::new());
    let cache = ReadingCache::new(Arc::clone(&store), Arc::new(SystemClock));
    let services = PanelServices::from_config(&config, cache).unwrap().with_air_seed(11);
    let mut dash = Dashboard::new(Arc::new(services), Favorites::load(store), "USD");
    dash.set_location(LocationFix {
        ip: "198.51.100.4".into(),
        city: "Boston".into(),
        region: "Massachusetts".into(),
        country: "US".into(),
        loc: "42.3601,-71.0589".into(),
        timezone: "America/New_York".into(),
        org: "AS7922 Comcast Cable".into(),
        postal: Some("02108".into()),
        is_accurate: false,
    });
    dash
}

fn view(dash: &Dashboard) -> DashboardView {
    let now = Utc.with_ymd_and_hms(2025, 5, 1, 12, 0, 0).unwrap();
    DashboardView::build(dash, now, FixedOffset::east_opt(0).unwrap())
}

#[tokio::test]
async fn text_dashboard_shows_every_panel_state() {
    let server = server().await;
    let mut dash = dashboard(&server);
    dash.toggle_favorite("ethereum").unwrap();
    dash.load_all();
    dash.settle().await;

    let out = text::render(&view(&dash));
    assert!(out.contains("Boston, Massachusetts | United States | IP 198.51.100.4 | Comcast Cable"));
    assert!(out.contains("== Weather =="));
    assert!(out.contains("18°C Clear sky"));
    assert!(out.contains("Thu, May 1"));
    // The Boston estimate is deterministic
    assert!(out.contains("! Using estimated air quality data"));
    assert!(out.contains("AQI 2 - Fair"));
    assert!(out.contains("! Using estimated crypto data"));
    assert!(out.contains("Favorites: ETH"));
    assert!(out.contains("1 USD = 1 USD"));
    assert!(out.contains("No recent test"));
    assert!(!out.contains("Holiday Countdown"));
}

#[tokio::test]
async fn html_dashboard_is_escaped_and_has_charts() {
    let server = server().await;
    let mut dash = dashboard(&server).with_holidays(true);
    dash.load_all();
    dash.settle().await;
    dash.relocate(&PlaceCandidate {
        city: "<script>alert(1)</script>".into(),
        region: "Ruritania & Co".into(),
        country: "US".into(),
        loc: "40.0,-75.0".into(),
        timezone: "America/New_York".into(),
        display_name: "x".into(),
    });
    dash.settle().await;

    let page = html::render(&view(&dash));
    assert!(page.starts_with("<!DOCTYPE html>"));
    assert!(!page.contains("<script>"));
    assert!(page.contains("&lt;script&gt;alert(1)&lt;/script&gt;, Ruritania &amp; Co"));
    assert!(page.contains(r#"<svg class="ring""#));
    assert!(page.contains(r#"<svg class="bars""#));
    assert!(page.contains(r#"<svg class="spark""#));
    assert!(page.contains(r#"<section id="holidays">"#));
    assert!(page.contains("(Using local data)"));
}
