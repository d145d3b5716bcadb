mod enu;
mod error;
mod geodetic;

pub use enu::{Enu, LookAngle};
pub use error::SiteError;
pub use geodetic::{EcefVector, GeodeticPosition};

#[cfg(test)]
pub use geodetic::SEMI_MAJOR_AXIS_M;
