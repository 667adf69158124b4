//! In-process stand-ins for OpenWeather and the imagery gateway.

use std::collections::HashMap;
use std::net::SocketAddr;

use axum::{
    extract::Query,
    http::{HeaderMap, StatusCode},
    routing::{get, post},
    Json, Router,
};
use chrono::NaiveDate;
use secrecy::Secret;
use serde_json::{json, Value};

use heat_monitor::configuration::{
    ApplicationSettings, ImagerySettings, MapSettings, RegionSettings, Settings, WeatherSettings,
};
use heat_monitor::http::{create_router, AppState};

pub const API_KEY: &str = "test-key";

/// Delhi 41, Gurgaon 37, Noida 33, Faridabad 30; Ghaziabad answers 500.
fn reading_for(lat: f64) -> Option<f64> {
    let table = [
        (28.6139, 41.0),
        (28.4595, 37.0),
        (28.5355, 33.0),
        (28.4089, 30.0),
    ];
    table
        .iter()
        .find(|(l, _)| (l - lat).abs() < 1e-6)
        .map(|(_, t)| *t)
}

async fn weather(Query(params): Query<HashMap<String, String>>) -> (StatusCode, Json<Value>) {
    if params.get("appid").map(String::as_str) != Some(API_KEY) {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"cod": 401, "message": "Invalid API key."})),
        );
    }
    if params.get("units").map(String::as_str) != Some("metric") {
        return (StatusCode::BAD_REQUEST, Json(json!({"cod": 400})));
    }
    let lat: f64 = params
        .get("lat")
        .and_then(|s| s.parse().ok())
        .unwrap_or(f64::NAN);
    match reading_for(lat) {
        Some(t) => (
            StatusCode::OK,
            Json(json!({"main": {"temp": t, "feels_like": t + 2.0, "humidity": 40}})),
        ),
        None => (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({"cod": 500}))),
    }
}

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(|v| v.starts_with("Basic "))
        .unwrap_or(false)
}

pub const TILE_URL: &str = "http://tiles.test/lst/{z}/{x}/{y}";

/// Composite windows starting on or after this date hold no images.
pub const FIRST_EMPTY_DAY: &str = "2030-01-01";

async fn tiles(headers: HeaderMap, Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    if !authorized(&headers) {
        return (StatusCode::UNAUTHORIZED, Json(json!({})));
    }
    if body["crs"] != "EPSG:4326"
        || body["scale"] != 250
        || body["resample"] != "bilinear"
        || body["scale_factor"] != 0.02
        || body["offset"] != -273.15
        || body["band"] != "LST_Day_1km"
    {
        return (StatusCode::BAD_REQUEST, Json(json!({"error": "unexpected composite"})));
    }
    let start = body["start"].as_str().unwrap_or_default();
    if start >= FIRST_EMPTY_DAY {
        return (StatusCode::OK, Json(json!({"band_count": 0, "url_format": null})));
    }
    (StatusCode::OK, Json(json!({"band_count": 1, "url_format": TILE_URL})))
}

async fn timeseries(headers: HeaderMap, Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    if !authorized(&headers) {
        return (StatusCode::UNAUTHORIZED, Json(json!({})));
    }
    if body["reducer"] != "mean" || body["scale"] != 1000 || body["band"] != "LST_Day_1km" {
        return (StatusCode::BAD_REQUEST, Json(json!({"error": "unexpected query"})));
    }
    (
        StatusCode::OK,
        Json(json!({"type": "FeatureCollection", "features": [
            {"type": "Feature", "geometry": null, "properties": {"date": "2026-01-05", "mean_value": 24.0}},
            {"type": "Feature", "geometry": null, "properties": {"date": "2026-01-03", "mean_value": null}},
            {"type": "Feature", "geometry": null, "properties": {"date": "2026-01-01", "mean_value": 20.0}},
        ]})),
    )
}

pub async fn spawn(router: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    addr
}

pub fn settings(weather_addr: SocketAddr, imagery_addr: SocketAddr) -> Settings {
    Settings {
        application: ApplicationSettings {
            host: "127.0.0.1".into(),
            port: 0,
            refresh_interval_secs: 60,
            map: MapSettings {
                center_latitude: 28.6139,
                center_longitude: 77.2090,
                zoom: 10,
            },
        },
        weather: WeatherSettings {
            base_url: format!("http://{}", weather_addr),
            api_key: Secret::new(API_KEY.to_string()),
            timeout_secs: 5,
        },
        imagery: ImagerySettings {
            base_url: format!("http://{}/", imagery_addr),
            service_account: "dashboard@example.iam".into(),
            private_key: Secret::new("pem".to_string()),
            timeout_secs: 5,
            collection: "MODIS/061/MOD11A1".into(),
            band: "LST_Day_1km".into(),
            region: RegionSettings {
                west: 76.84,
                south: 27.39,
                east: 78.57,
                north: 28.88,
            },
            composite_start: NaiveDate::from_ymd_opt(2025, 12, 31).unwrap(),
            composite_end: NaiveDate::from_ymd_opt(2026, 1, 30).unwrap(),
        },
    }
}

/// Starts both stubs and the dashboard; returns the dashboard's base URL and its settings.
pub async fn start_dashboard() -> (String, Settings) {
    start_dashboard_with_composite(
        NaiveDate::from_ymd_opt(2025, 12, 31).unwrap(),
        NaiveDate::from_ymd_opt(2026, 1, 30).unwrap(),
    )
    .await
}

pub async fn start_dashboard_with_composite(start: NaiveDate, end: NaiveDate) -> (String, Settings) {
    let weather_addr = spawn(Router::new().route("/data/2.5/weather", get(weather))).await;
    let imagery_addr = spawn(
        Router::new()
            .route("/v1/lst/tiles", post(tiles))
            .route("/v1/lst/timeseries", post(timeseries)),
    )
    .await;

    let mut settings = settings(weather_addr, imagery_addr);
    settings.imagery.composite_start = start;
    settings.imagery.composite_end = end;
    let state = AppState::from_settings(settings.clone()).unwrap();
    let addr = spawn(create_router(state)).await;
    (format!("http://{}", addr), settings)
}
