use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum SiteError {
    #[error("latitude {0} outside [-90, 90]")]
    Latitude(f64),
    #[error("longitude {0} outside [-180, 180]")]
    Longitude(f64),
    #[error("altitude is not finite")]
    Altitude,
    #[error("bad coordinates {0:?}, expected \"lat, lon\"")]
    Coordinates(String),
}
