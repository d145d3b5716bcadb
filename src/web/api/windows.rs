use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;

use super::look::utc;
use super::resolve_site;
use crate::abort::AbortFlag;
use crate::predict::VisibilityReport;
use crate::time::{parse_instant, parse_step};
use crate::web::api::error::{ApiError, ApiResult, ErrorResponse};
use crate::web::AppState;

const MAX_SAMPLES: i64 = 2_000_000;

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct WindowsQuery {
    /// RFC3339 start of the scan
    pub start: String,
    /// RFC3339 end of the scan, inclusive
    pub end: String,
    /// Sampling step such as `1s` or `1m`
    pub step: Option<String>,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub alt: Option<f64>,
}

/// Raises the flag when dropped, so a scan stops once its client is gone.
struct AbortOnDrop(AbortFlag);

impl Drop for AbortOnDrop {
    fn drop(&mut self) {
        self.0.raise();
    }
}

#[utoipa::path(
    get,
    path = "/api/windows",
    tag = "tracking",
    params(WindowsQuery),
    responses(
        (status = 200, description = "Visibility windows in the range", body = VisibilityReport),
        (status = 400, description = "Invalid parameters", body = ErrorResponse),
        (status = 422, description = "Propagation failed", body = ErrorResponse)
    )
)]
pub async fn visibility_windows(
    State(state): State<AppState>,
    Query(query): Query<WindowsQuery>,
) -> ApiResult<Json<VisibilityReport>> {
    let site = resolve_site(&state, query.lat, query.lon, query.alt)?;
    let start = parse_instant(&query.start, utc())?;
    let end = parse_instant(&query.end, utc())?;
    let step = match query.step.as_deref() {
        Some(s) => parse_step(s)?,
        None => state.default_step,
    };

    let too_many = match ((end - start).num_microseconds(), step.num_microseconds()) {
        (Some(span_us), Some(step_us)) if step_us > 0 => span_us / step_us > MAX_SAMPLES,
        _ => true,
    };
    if too_many {
        return Err(ApiError::Validation(format!(
            "range needs more than {MAX_SAMPLES} samples, use a larger step"
        )));
    }

    let guard = AbortOnDrop(AbortFlag::new());
    let abort = guard.0.clone();
    let tracker = state.tracker.clone();
    let scanner = state.scanner;

    let report = tokio::task::spawn_blocking(move || {
        tracker.visibility_windows(&scanner, site, start, end, step, Some(&abort))
    })
    .await
    .map_err(|e| ApiError::Internal(e.to_string()))??;

    drop(guard);
    Ok(Json(report))
}
