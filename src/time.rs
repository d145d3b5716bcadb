use chrono::{DateTime, Duration, FixedOffset, NaiveDateTime, Offset, TimeZone, Utc};

use crate::tracker::TrackerError;

const NAIVE_FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"];

/// Normalises a user-supplied instant to UTC. RFC3339 strings carry their
/// own offset; naive local date-times are read in `local_offset`.
pub fn parse_instant(s: &str, local_offset: FixedOffset) -> Result<DateTime<Utc>, TrackerError> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }

    let naive = NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .ok_or_else(|| TrackerError::InvalidInput(format!("unrecognised time {s:?}")))?;

    local_offset
        .from_local_datetime(&naive)
        .single()
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or_else(|| TrackerError::InvalidInput(format!("ambiguous local time {s:?}")))
}

/// Parses `+03:00`, `-0530` or `Z`.
pub fn parse_utc_offset(s: &str) -> Result<FixedOffset, TrackerError> {
    let s = s.trim();
    if s.eq_ignore_ascii_case("z") {
        return Ok(Utc.fix());
    }
    s.parse::<FixedOffset>()
        .map_err(|e| TrackerError::InvalidInput(format!("bad utc offset {s:?}: {e}")))
}

/// Human step durations such as `1m`, `30s` or `1m 30s`.
pub fn parse_step(s: &str) -> Result<Duration, TrackerError> {
    let step = humantime::parse_duration(s.trim())
        .map_err(|e| TrackerError::InvalidInput(format!("bad step {s:?}: {e}")))
        .and_then(|d| {
            Duration::from_std(d).map_err(|e| TrackerError::InvalidInput(e.to_string()))
        })?;
    if step < Duration::milliseconds(1) {
        return Err(TrackerError::InvalidInput(format!(
            "step {s:?} is shorter than 1ms"
        )));
    }
    Ok(step)
}

/// `start, start + step, ...` up to and including `end`.
pub struct SampleInstants {
    next: Option<DateTime<Utc>>,
    end: DateTime<Utc>,
    step: Duration,
}

impl SampleInstants {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>, step: Duration) -> Self {
        Self {
            next: Some(start),
            end,
            step,
        }
    }
}

impl Iterator for SampleInstants {
    type Item = DateTime<Utc>;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next.filter(|t| *t <= self.end)?;
        self.next = current.checked_add_signed(self.step);
        Some(current)
    }
}
