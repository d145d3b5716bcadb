mod error;
mod look_angle;
mod tracker;

#[cfg(test)]
pub(crate) mod testing;

pub use error::TrackerError;
pub use tracker::Tracker;
