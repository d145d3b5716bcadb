use axum::{
    extract::{Query, State},
    Json,
};
use chrono::{FixedOffset, Offset, Utc};
use serde::Deserialize;
use utoipa::IntoParams;

use super::resolve_site;
use crate::predict::SampleInstant;
use crate::time::parse_instant;
use crate::web::api::error::{ApiResult, ErrorResponse};
use crate::web::AppState;

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct LookQuery {
    /// RFC3339 instant; now if omitted
    pub time: Option<String>,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub alt: Option<f64>,
}

#[utoipa::path(
    get,
    path = "/api/look",
    tag = "tracking",
    params(LookQuery),
    responses(
        (status = 200, description = "Look angle at the requested time", body = SampleInstant),
        (status = 400, description = "Invalid parameters", body = ErrorResponse),
        (status = 422, description = "Propagation failed", body = ErrorResponse)
    )
)]
pub async fn look_angle(
    State(state): State<AppState>,
    Query(query): Query<LookQuery>,
) -> ApiResult<Json<SampleInstant>> {
    let site = resolve_site(&state, query.lat, query.lon, query.alt)?;
    let at = match query.time.as_deref() {
        Some(s) => parse_instant(s, utc())?,
        None => Utc::now(),
    };

    let sample = state.tracker.look_angle(&site, at)?;
    Ok(Json(sample))
}

pub(super) fn utc() -> FixedOffset {
    Utc.fix()
}
