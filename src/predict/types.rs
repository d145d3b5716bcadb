use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use utoipa::ToSchema;

use crate::coords::GeodeticPosition;

/// Look angle of the target at one sampled instant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, ToSchema)]
pub struct SampleInstant {
    pub timestamp: DateTime<Utc>,
    pub azimuth_deg: f64,
    pub elevation_deg: f64,
    pub range_km: f64,
}

impl SampleInstant {
    pub fn is_visible(&self) -> bool {
        self.elevation_deg > 0.0
    }
}

/// What to do with a window still open when the scan stops.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema, Display, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum TrailingWindow {
    /// End it at the last sample taken.
    #[default]
    Close,
    /// Leave it out of the results.
    Drop,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum WindowClosure {
    /// The target was seen going back below the horizon.
    Set,
    /// The scan ended first.
    Truncated,
}

/// A contiguous run of samples above the horizon.
///
/// `samples` is in chronological order. For a [`WindowClosure::Set`] window
/// the last sample is the first one observed at or below the horizon.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct VisibilityWindow {
    pub start_time: DateTime<Utc>,
    pub start_azimuth_deg: f64,
    pub end_time: DateTime<Utc>,
    pub end_azimuth_deg: f64,
    pub samples: Vec<SampleInstant>,
    pub peak: SampleInstant,
    pub closure: WindowClosure,
}

impl VisibilityWindow {
    /// Builds a window from its samples; `None` if there are fewer than two.
    pub fn from_samples(samples: Vec<SampleInstant>, closure: WindowClosure) -> Option<Self> {
        let first = *samples.first()?;
        let last = *samples.last()?;
        if samples.len() < 2 {
            return None;
        }

        // strict comparison keeps the earliest of equal peaks
        let peak = samples.iter().skip(1).fold(first, |best, s| {
            if s.elevation_deg > best.elevation_deg {
                *s
            } else {
                best
            }
        });

        Some(Self {
            start_time: first.timestamp,
            start_azimuth_deg: first.azimuth_deg,
            end_time: last.timestamp,
            end_azimuth_deg: last.azimuth_deg,
            samples,
            peak,
            closure,
        })
    }

    pub fn duration(&self) -> Duration {
        self.end_time - self.start_time
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct VisibilityReport {
    pub satellite: String,
    pub catalog_id: u32,
    pub site: GeodeticPosition,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub step_seconds: f64,
    pub trailing_window: TrailingWindow,
    pub windows: Vec<VisibilityWindow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cancelled_at: Option<DateTime<Utc>>,
}
