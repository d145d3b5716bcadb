//! Swappable collaborators between an element set and an Earth-fixed
//! position. The core only sees these traits, so tests can stand in
//! synthetic orbits.

mod error;
mod sgp4_propagator;

pub use error::PropagationError;
pub use sgp4_propagator::{GmstRotation, Sgp4Propagator};

use chrono::{DateTime, Utc};

use crate::elements::ElementSet;

/// Inertial (TEME) state in km and km/s.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InertialState {
    pub position_km: [f64; 3],
    pub velocity_km_s: [f64; 3],
}

pub trait Propagator: Send + Sync {
    fn propagate(
        &self,
        elements: &ElementSet,
        at: DateTime<Utc>,
    ) -> Result<InertialState, PropagationError>;
}

pub trait EarthRotation: Send + Sync {
    /// Returns the Earth-fixed position in km.
    fn to_earth_fixed(&self, at: DateTime<Utc>, state: &InertialState) -> [f64; 3];
}
