//! HTTP handlers. Each one runs what it needs of a refresh cycle and shapes the result.

use axum::{
    extract::{Query, State},
    response::Html,
    Json,
};
use chrono::{Local, NaiveDate};

use super::dto::{
    DistrictsResponse, HealthResponse, RangeQuery, TimeSeriesResponse, UhiResponse,
};
use super::error::AppError;
use super::state::AppState;
use crate::dashboard::RefreshCycle;
use crate::districts::DistrictTable;
use crate::models::LOCATIONS;
use crate::render::{render_page, PageOptions};
use crate::uhi::UhiSummary;

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// GET /health
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// GET /?start=YYYY-MM-DD&end=YYYY-MM-DD
///
/// The dashboard page. An inverted range only breaks the time series section.
pub async fn dashboard_page(
    State(state): State<AppState>,
    Query(query): Query<RangeQuery>,
) -> Result<Html<String>, AppError> {
    let (start, end) = query.bounds(today())?;
    let composite = state
        .settings
        .imagery
        .composite_range()
        .map_err(|e| AppError::Internal(e.to_string()))?;

    let cycle = RefreshCycle {
        weather: state.weather.as_ref(),
        imagery: state.imagery.as_ref(),
        composite,
    };
    let dashboard = cycle.run(start, end).await;

    let options = PageOptions {
        refresh_interval_secs: state.settings.application.refresh_interval_secs,
        map: &state.settings.application.map,
    };
    Ok(Html(render_page(&dashboard, &options)?))
}

/// GET /api/districts
pub async fn get_districts(State(state): State<AppState>) -> HandlerResult<DistrictsResponse> {
    let table = DistrictTable::collect(state.weather.as_ref(), &LOCATIONS).await;
    Ok(Json(DistrictsResponse::from(&table)))
}

/// GET /api/uhi
///
/// Computed over whichever districts answered; fails only when none did.
pub async fn get_uhi(State(state): State<AppState>) -> HandlerResult<UhiResponse> {
    let table = DistrictTable::collect(state.weather.as_ref(), &LOCATIONS).await;
    let summary = UhiSummary::compute(&table.samples).map_err(|_| {
        AppError::Upstream(format!(
            "no district readings available ({} failed)",
            table.failures.len()
        ))
    })?;
    Ok(Json(UhiResponse::new(summary, &table)))
}

/// GET /api/lst/timeseries?start=YYYY-MM-DD&end=YYYY-MM-DD
pub async fn get_lst_time_series(
    State(state): State<AppState>,
    Query(query): Query<RangeQuery>,
) -> HandlerResult<TimeSeriesResponse> {
    let range = query.range(today())?;
    let series = state.imagery.lst_time_series(&range).await?;
    Ok(Json(TimeSeriesResponse::new(range, series)))
}
