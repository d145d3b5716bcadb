use chrono::{DateTime, Utc};
use sgp4::Constants;

use super::{EarthRotation, InertialState, PropagationError, Propagator};
use crate::elements::ElementSet;

/// SGP4/SDP4 through the `sgp4` crate. Output is TEME, km and km/s; time
/// goes in as minutes since the element epoch, computed from UTC.
#[derive(Debug, Default, Clone, Copy)]
pub struct Sgp4Propagator;

impl Propagator for Sgp4Propagator {
    fn propagate(
        &self,
        elements: &ElementSet,
        at: DateTime<Utc>,
    ) -> Result<InertialState, PropagationError> {
        let elements = elements.elements();
        // Initialisation is cheap and keeps every call independent of the last.
        let constants = Constants::from_elements(elements)
            .map_err(|e| PropagationError::Sgp4(e.to_string()))?;
        let minutes = elements
            .datetime_to_minutes_since_epoch(&at.naive_utc())
            .map_err(|e| PropagationError::Epoch(e.to_string()))?;
        let prediction = constants
            .propagate(minutes)
            .map_err(|e| PropagationError::Sgp4(e.to_string()))?;

        Ok(InertialState {
            position_km: prediction.position,
            velocity_km_s: prediction.velocity,
        })
    }
}

/// TEME to Earth-fixed by rotating through Greenwich mean sidereal time.
/// Polar motion is ignored; only position is rotated, so the velocity unit
/// does not matter here.
#[derive(Debug, Default, Clone, Copy)]
pub struct GmstRotation;

impl EarthRotation for GmstRotation {
    fn to_earth_fixed(&self, at: DateTime<Utc>, state: &InertialState) -> [f64; 3] {
        let gmst =
            sgp4::iau_epoch_to_sidereal_time(sgp4::julian_years_since_j2000(&at.naive_utc()));
        teme_to_ecef_position(state.position_km, gmst)
    }
}

pub fn teme_to_ecef_position(pos_teme: [f64; 3], gmst: f64) -> [f64; 3] {
    let (sin_gmst, cos_gmst) = gmst.sin_cos();
    [
        pos_teme[0] * cos_gmst + pos_teme[1] * sin_gmst,
        -pos_teme[0] * sin_gmst + pos_teme[1] * cos_gmst,
        pos_teme[2],
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elements::fixtures::iss;
    use chrono::TimeZone;

    #[test]
    fn iss_stays_in_low_earth_orbit() {
        let set = iss();
        let at = Utc.with_ymd_and_hms(2020, 7, 13, 0, 0, 0).unwrap();
        let state = Sgp4Propagator.propagate(&set, at).unwrap();

        let r = state.position_km.iter().map(|c| c * c).sum::<f64>().sqrt();
        let v = state.velocity_km_s.iter().map(|c| c * c).sum::<f64>().sqrt();
        assert!((6600.0..6900.0).contains(&r), "radius {r} km");
        assert!((7.0..8.0).contains(&v), "speed {v} km/s");
    }

    #[test]
    fn far_future_epoch_is_rejected() {
        let at = Utc.with_ymd_and_hms(2400, 1, 1, 0, 0, 0).unwrap();
        assert!(matches!(
            Sgp4Propagator.propagate(&iss(), at),
            Err(PropagationError::Epoch(_))
        ));
    }

    #[test]
    fn propagation_is_repeatable() {
        let set = iss();
        let at = Utc.with_ymd_and_hms(2020, 7, 14, 12, 30, 0).unwrap();
        let a = Sgp4Propagator.propagate(&set, at).unwrap();
        let b = Sgp4Propagator.propagate(&set, at).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn rotation_preserves_radius_and_z() {
        let pos = [4000.0, -3000.0, 4500.0];
        let ecef = teme_to_ecef_position(pos, 1.234);
        let r0 = (pos[0] * pos[0] + pos[1] * pos[1]).sqrt();
        let r1 = (ecef[0] * ecef[0] + ecef[1] * ecef[1]).sqrt();
        assert!((r0 - r1).abs() < 1e-9);
        assert_eq!(ecef[2], pos[2]);

        let quarter = teme_to_ecef_position([1.0, 0.0, 0.0], std::f64::consts::FRAC_PI_2);
        assert!(quarter[0].abs() < 1e-12 && (quarter[1] + 1.0).abs() < 1e-12);
    }
}
