//! Synthetic collaborators for exercising the pipeline without a network
//! or a real orbit.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::coords::{GeodeticPosition, SEMI_MAJOR_AXIS_M};
use crate::elements::fixtures::iss;
use crate::elements::{ElementSet, ElementSetError, ElementSetProvider};
use crate::propagation::{EarthRotation, InertialState, PropagationError, Propagator};

pub const SCRIPTED_RANGE_KM: f64 = 1000.0;

pub fn equator_site() -> GeodeticPosition {
    GeodeticPosition::new(0.0, 0.0, 0.0).unwrap()
}

pub struct IdentityRotation;

impl EarthRotation for IdentityRotation {
    fn to_earth_fixed(&self, _at: DateTime<Utc>, state: &InertialState) -> [f64; 3] {
        state.position_km
    }
}

/// Places the target due north of [`equator_site`] at a fixed range, with
/// the elevation for each step taken from a script.
pub struct ScriptedOrbit {
    start: DateTime<Utc>,
    step: Duration,
    elevations_deg: Vec<f64>,
}

impl ScriptedOrbit {
    pub fn new(start: DateTime<Utc>, step: Duration, elevations_deg: Vec<f64>) -> Self {
        Self {
            start,
            step,
            elevations_deg,
        }
    }
}

impl Propagator for ScriptedOrbit {
    fn propagate(
        &self,
        _elements: &ElementSet,
        at: DateTime<Utc>,
    ) -> Result<InertialState, PropagationError> {
        let index = ((at - self.start).num_milliseconds() / self.step.num_milliseconds()) as usize;
        let elevation = self
            .elevations_deg
            .get(index)
            .ok_or_else(|| PropagationError::Epoch(format!("no scripted sample at {at}")))?
            .to_radians();

        // at (0, 0) up is +x and north is +z
        Ok(InertialState {
            position_km: [
                SEMI_MAJOR_AXIS_M / 1000.0 + SCRIPTED_RANGE_KM * elevation.sin(),
                0.0,
                SCRIPTED_RANGE_KM * elevation.cos(),
            ],
            velocity_km_s: [0.0; 3],
        })
    }
}

pub struct FailingPropagator;

impl Propagator for FailingPropagator {
    fn propagate(
        &self,
        _elements: &ElementSet,
        _at: DateTime<Utc>,
    ) -> Result<InertialState, PropagationError> {
        Err(PropagationError::Sgp4("satellite has decayed".into()))
    }
}

#[derive(Default)]
pub struct CountingPropagator {
    pub calls: Arc<AtomicUsize>,
}

impl Propagator for CountingPropagator {
    fn propagate(
        &self,
        _elements: &ElementSet,
        _at: DateTime<Utc>,
    ) -> Result<InertialState, PropagationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(InertialState {
            position_km: [SEMI_MAJOR_AXIS_M / 1000.0 + 500.0, 0.0, 0.0],
            velocity_km_s: [0.0; 3],
        })
    }
}

pub struct FailingProvider;

#[async_trait]
impl ElementSetProvider for FailingProvider {
    async fn fetch(&self, _catalog_id: u32) -> Result<ElementSet, ElementSetError> {
        Err(ElementSetError::Io(std::io::Error::new(
            std::io::ErrorKind::ConnectionRefused,
            "network unreachable",
        )))
    }
}

pub struct StaticProvider;

#[async_trait]
impl ElementSetProvider for StaticProvider {
    async fn fetch(&self, catalog_id: u32) -> Result<ElementSet, ElementSetError> {
        let set = iss();
        if set.catalog_id == catalog_id {
            Ok(set)
        } else {
            Err(ElementSetError::NotFound(catalog_id))
        }
    }
}
