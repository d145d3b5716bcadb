use serde::Serialize;
use std::ops::Sub;
use utoipa::ToSchema;

use super::error::SiteError;

pub const SEMI_MAJOR_AXIS_M: f64 = 6_378_137.0;
pub const SEMI_MINOR_AXIS_M: f64 = 6_356_752.3142;

const INVERSE_ITERATIONS: usize = 10;

/// A point on (or above) the ellipsoid, in degrees and meters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, ToSchema)]
pub struct GeodeticPosition {
    pub latitude_deg: f64,
    pub longitude_deg: f64,
    pub altitude_m: f64,
}

impl GeodeticPosition {
    pub fn new(latitude_deg: f64, longitude_deg: f64, altitude_m: f64) -> Result<Self, SiteError> {
        let position = Self {
            latitude_deg,
            longitude_deg,
            altitude_m,
        };
        position.validate()?;
        Ok(position)
    }

    /// Parses `"lat, lon"` as written in the station config.
    pub fn from_coordinates(coordinates: &str, altitude_m: f64) -> Result<Self, SiteError> {
        let bad = || SiteError::Coordinates(coordinates.to_string());
        let (lat, lon) = coordinates.split_once(',').ok_or_else(bad)?;
        let lat = lat.trim().parse::<f64>().map_err(|_| bad())?;
        let lon = lon.trim().parse::<f64>().map_err(|_| bad())?;
        Self::new(lat, lon, altitude_m)
    }

    pub fn validate(&self) -> Result<(), SiteError> {
        if !(-90.0..=90.0).contains(&self.latitude_deg) {
            return Err(SiteError::Latitude(self.latitude_deg));
        }
        if !(-180.0..=180.0).contains(&self.longitude_deg) {
            return Err(SiteError::Longitude(self.longitude_deg));
        }
        if !self.altitude_m.is_finite() {
            return Err(SiteError::Altitude);
        }
        Ok(())
    }

    pub fn lat_rad(&self) -> f64 {
        self.latitude_deg.to_radians()
    }

    pub fn lon_rad(&self) -> f64 {
        self.longitude_deg.to_radians()
    }

    pub fn to_earth_fixed(&self) -> EcefVector {
        let a2 = SEMI_MAJOR_AXIS_M * SEMI_MAJOR_AXIS_M;
        let b2 = SEMI_MINOR_AXIS_M * SEMI_MINOR_AXIS_M;
        let (sin_lat, cos_lat) = self.lat_rad().sin_cos();
        let (sin_lon, cos_lon) = self.lon_rad().sin_cos();
        let n = prime_vertical_radius(sin_lat, cos_lat);
        let alt = self.altitude_m;
        EcefVector {
            x: (n + alt) * cos_lat * cos_lon,
            y: (n + alt) * cos_lat * sin_lon,
            z: (b2 / a2 * n + alt) * sin_lat,
        }
    }
}

fn prime_vertical_radius(sin_lat: f64, cos_lat: f64) -> f64 {
    let a2 = SEMI_MAJOR_AXIS_M * SEMI_MAJOR_AXIS_M;
    let b2 = SEMI_MINOR_AXIS_M * SEMI_MINOR_AXIS_M;
    a2 / (a2 * cos_lat * cos_lat + b2 * sin_lat * sin_lat).sqrt()
}

/// Earth-fixed Cartesian vector in meters. Used both for positions and for
/// displacements between them.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EcefVector {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl EcefVector {
    pub fn from_km(km: [f64; 3]) -> Self {
        Self {
            x: km[0] * 1000.0,
            y: km[1] * 1000.0,
            z: km[2] * 1000.0,
        }
    }

    pub fn norm(&self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    /// Recovers geodetic coordinates by fixed-point iteration on latitude.
    pub fn to_geodetic(&self) -> GeodeticPosition {
        let a2 = SEMI_MAJOR_AXIS_M * SEMI_MAJOR_AXIS_M;
        let b2 = SEMI_MINOR_AXIS_M * SEMI_MINOR_AXIS_M;
        let e2 = 1.0 - b2 / a2;

        let p = self.x.hypot(self.y);
        let lon = self.y.atan2(self.x);
        let mut lat = self.z.atan2(p * (1.0 - e2));
        let mut alt = 0.0;

        for _ in 0..INVERSE_ITERATIONS {
            let (sin_lat, cos_lat) = lat.sin_cos();
            let n = prime_vertical_radius(sin_lat, cos_lat);
            // p / cos(lat) degrades near the poles
            alt = if cos_lat.abs() > sin_lat.abs() {
                p / cos_lat - n
            } else {
                self.z / sin_lat - n * (1.0 - e2)
            };
            lat = self.z.atan2(p * (1.0 - e2 * n / (n + alt)));
        }

        GeodeticPosition {
            latitude_deg: lat.to_degrees(),
            longitude_deg: lon.to_degrees(),
            altitude_m: alt,
        }
    }
}

impl Sub for EcefVector {
    type Output = EcefVector;

    fn sub(self, rhs: EcefVector) -> EcefVector {
        EcefVector {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
            z: self.z - rhs.z,
        }
    }
}
