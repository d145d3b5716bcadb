use crate::coords::{EcefVector, Enu, GeodeticPosition, LookAngle};

/// Look angle and slant range (m) from `site` to an Earth-fixed target.
pub fn observe(site: &GeodeticPosition, target: EcefVector) -> (LookAngle, f64) {
    let dr = target - site.to_earth_fixed();
    let look = Enu::from_displacement(dr, site).look_angle();
    (look, dr.norm())
}
