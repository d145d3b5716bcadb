use serde::Serialize;
use utoipa::ToSchema;

use super::geodetic::{EcefVector, GeodeticPosition};

/// Topocentric look angle, azimuth clockwise from north.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, ToSchema)]
pub struct LookAngle {
    pub azimuth_deg: f64,
    pub elevation_deg: f64,
}

/// Local tangent-plane coordinates, same linear unit as the displacement
/// they were rotated from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Enu {
    pub east: f64,
    pub north: f64,
    pub up: f64,
}

impl Enu {
    pub fn from_displacement(dr: EcefVector, origin: &GeodeticPosition) -> Self {
        let (sin_lat, cos_lat) = origin.lat_rad().sin_cos();
        let (sin_lon, cos_lon) = origin.lon_rad().sin_cos();

        Self {
            east: -sin_lon * dr.x + cos_lon * dr.y,
            north: -sin_lat * cos_lon * dr.x - sin_lat * sin_lon * dr.y + cos_lat * dr.z,
            up: cos_lat * cos_lon * dr.x + cos_lat * sin_lon * dr.y + sin_lat * dr.z,
        }
    }

    pub fn look_angle(&self) -> LookAngle {
        let mut azimuth_deg = self.east.atan2(self.north).to_degrees().rem_euclid(360.0);
        // rem_euclid rounds tiny negative angles up to exactly 360
        if azimuth_deg >= 360.0 {
            azimuth_deg = 0.0;
        }

        let horizontal = self.north.hypot(self.east);
        let elevation_deg = if horizontal > 0.0 {
            (self.up / horizontal).atan().to_degrees()
        } else if self.up > 0.0 {
            90.0
        } else if self.up < 0.0 {
            -90.0
        } else {
            0.0
        };

        LookAngle {
            azimuth_deg,
            elevation_deg,
        }
    }
}
