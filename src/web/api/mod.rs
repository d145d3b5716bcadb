pub mod error;
pub mod look;
pub mod windows;

use crate::coords::GeodeticPosition;
use crate::web::AppState;
use error::ApiError;

/// Site from query parameters, falling back to the configured station.
fn resolve_site(
    state: &AppState,
    lat: Option<f64>,
    lon: Option<f64>,
    alt: Option<f64>,
) -> Result<GeodeticPosition, ApiError> {
    match (lat, lon) {
        (Some(lat), Some(lon)) => Ok(GeodeticPosition::new(lat, lon, alt.unwrap_or(0.0))?),
        (None, None) => state
            .station
            .ok_or_else(|| ApiError::Validation("no site given and no station configured".into())),
        _ => Err(ApiError::Validation("lat and lon must be given together".into())),
    }
}
