use chrono::{DateTime, Duration, Utc};

use super::error::TrackerError;
use super::look_angle::observe;
use crate::abort::AbortFlag;
use crate::coords::{EcefVector, GeodeticPosition};
use crate::elements::{ElementSet, ElementSetProvider};
use crate::predict::{LookAngleSource, PassScanner, SampleInstant, ScanRequest, VisibilityReport};
use crate::propagation::{EarthRotation, Propagator};

/// One orbiting object as seen from the ground. The element set is fixed
/// at construction; every look angle is a function of (elements, site, time).
pub struct Tracker {
    elements: ElementSet,
    propagator: Box<dyn Propagator>,
    rotation: Box<dyn EarthRotation>,
}

impl Tracker {
    pub fn new(
        elements: ElementSet,
        propagator: impl Propagator + 'static,
        rotation: impl EarthRotation + 'static,
    ) -> Self {
        Self {
            elements,
            propagator: Box::new(propagator),
            rotation: Box::new(rotation),
        }
    }

    /// Fetches the element set before anything is propagated. A provider
    /// failure leaves no tracker behind.
    pub async fn connect(
        provider: &dyn ElementSetProvider,
        catalog_id: u32,
        propagator: impl Propagator + 'static,
        rotation: impl EarthRotation + 'static,
    ) -> Result<Self, TrackerError> {
        let elements = provider
            .fetch(catalog_id)
            .await
            .map_err(|source| TrackerError::ElementSetUnavailable { catalog_id, source })?;

        log::info!(
            "Tracking {} (catalog id {})",
            elements.display_name(),
            elements.catalog_id
        );
        log::debug!("{}\n{}", elements.line1, elements.line2);
        Ok(Self::new(elements, propagator, rotation))
    }

    pub fn elements(&self) -> &ElementSet {
        &self.elements
    }

    pub fn look_angle(
        &self,
        site: &GeodeticPosition,
        at: DateTime<Utc>,
    ) -> Result<SampleInstant, TrackerError> {
        site.validate()?;

        let target = self.earth_fixed_position(at)?;
        let (look, range_m) = observe(site, target);

        Ok(SampleInstant {
            timestamp: at,
            azimuth_deg: look.azimuth_deg,
            elevation_deg: look.elevation_deg,
            range_km: range_m / 1000.0,
        })
    }

    /// Point on the ellipsoid directly beneath the target.
    pub fn sub_satellite_point(&self, at: DateTime<Utc>) -> Result<GeodeticPosition, TrackerError> {
        Ok(self.earth_fixed_position(at)?.to_geodetic())
    }

    fn earth_fixed_position(&self, at: DateTime<Utc>) -> Result<EcefVector, TrackerError> {
        let state = self
            .propagator
            .propagate(&self.elements, at)
            .map_err(|source| TrackerError::Propagation {
                catalog_id: self.elements.catalog_id,
                timestamp: at,
                source,
            })?;
        log::trace!(
            "{at}: r = {:?} km, v = {:?} km/s",
            state.position_km,
            state.velocity_km_s
        );

        // propagation works in km, the site in m
        Ok(EcefVector::from_km(self.rotation.to_earth_fixed(at, &state)))
    }

    pub fn visibility_windows(
        &self,
        scanner: &PassScanner,
        site: GeodeticPosition,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        step: Duration,
        abort: Option<&AbortFlag>,
    ) -> Result<VisibilityReport, TrackerError> {
        let request = ScanRequest {
            site,
            start,
            end,
            step,
        };
        let outcome = scanner.scan(self, &request, abort)?;

        Ok(VisibilityReport {
            satellite: self.elements.display_name(),
            catalog_id: self.elements.catalog_id,
            site,
            start,
            end,
            step_seconds: step.num_microseconds().unwrap_or(i64::MAX) as f64 / 1e6,
            trailing_window: scanner.trailing,
            windows: outcome.windows,
            cancelled_at: outcome.cancelled_at,
        })
    }
}

impl LookAngleSource for Tracker {
    fn look_angle(
        &self,
        site: &GeodeticPosition,
        at: DateTime<Utc>,
    ) -> Result<SampleInstant, TrackerError> {
        Tracker::look_angle(self, site, at)
    }
}
