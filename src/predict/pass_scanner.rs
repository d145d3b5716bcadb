use chrono::{DateTime, Duration, Utc};

use super::types::{SampleInstant, TrailingWindow, VisibilityWindow, WindowClosure};
use crate::abort::AbortFlag;
use crate::coords::GeodeticPosition;
use crate::time::SampleInstants;
use crate::tracker::TrackerError;

/// Anything that can answer "where is the target from this site at this time".
pub trait LookAngleSource {
    fn look_angle(
        &self,
        site: &GeodeticPosition,
        at: DateTime<Utc>,
    ) -> Result<SampleInstant, TrackerError>;
}

#[derive(Debug, Clone, Copy)]
pub struct ScanRequest {
    pub site: GeodeticPosition,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub step: Duration,
}

impl ScanRequest {
    pub fn validate(&self) -> Result<(), TrackerError> {
        self.site.validate()?;
        if self.start > self.end {
            return Err(TrackerError::InvalidInput(format!(
                "scan start {} is after end {}",
                self.start, self.end
            )));
        }
        if self.step <= Duration::zero() {
            return Err(TrackerError::InvalidInput("step must be positive".into()));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
pub struct ScanOutcome {
    pub windows: Vec<VisibilityWindow>,
    pub samples_taken: usize,
    /// First instant not sampled because the scan was aborted.
    pub cancelled_at: Option<DateTime<Utc>>,
}

/// Folds a chronological stream of samples into visibility windows.
///
/// Idle until a sample is above the horizon, then tracking until a sample
/// at or below it. Only the open window is kept in memory.
#[derive(Debug, Default)]
pub struct WindowFolder {
    open: Option<Vec<SampleInstant>>,
}

impl WindowFolder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_tracking(&self) -> bool {
        self.open.is_some()
    }

    /// Feeds the next sample; returns a window when this sample closes one.
    pub fn push(&mut self, sample: SampleInstant) -> Option<VisibilityWindow> {
        let visible = sample.is_visible();

        let Some(samples) = self.open.as_mut() else {
            if visible {
                log::debug!(
                    "window opens at {} (az {:.1})",
                    sample.timestamp,
                    sample.azimuth_deg
                );
                self.open = Some(vec![sample]);
            }
            return None;
        };

        debug_assert!(samples.last().map_or(true, |s| s.timestamp < sample.timestamp));
        samples.push(sample);
        if visible {
            return None;
        }

        log::debug!("window closes at {}", sample.timestamp);
        let samples = self.open.take()?;
        VisibilityWindow::from_samples(samples, WindowClosure::Set)
    }

    /// Ends the stream, applying `policy` to a window that is still open.
    pub fn finish(self, policy: TrailingWindow) -> Option<VisibilityWindow> {
        let samples = self.open?;
        match policy {
            TrailingWindow::Close => {
                VisibilityWindow::from_samples(samples, WindowClosure::Truncated)
            }
            TrailingWindow::Drop => {
                log::debug!("dropping window open since {}", samples[0].timestamp);
                None
            }
        }
    }
}

/// Samples a time range at a fixed cadence and reports the visibility
/// windows found in it.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassScanner {
    pub trailing: TrailingWindow,
    /// Windows peaking below this are left out of the result.
    pub min_peak_elevation_deg: f64,
}

impl PassScanner {
    pub fn new(trailing: TrailingWindow) -> Self {
        Self {
            trailing,
            min_peak_elevation_deg: 0.0,
        }
    }

    pub fn with_min_peak_elevation(mut self, min_peak_elevation_deg: f64) -> Self {
        self.min_peak_elevation_deg = min_peak_elevation_deg;
        self
    }

    /// A failed look angle aborts the whole scan; open windows are discarded.
    pub fn scan<S: LookAngleSource + ?Sized>(
        &self,
        source: &S,
        request: &ScanRequest,
        abort: Option<&AbortFlag>,
    ) -> Result<ScanOutcome, TrackerError> {
        request.validate()?;

        let mut outcome = ScanOutcome::default();
        let mut folder = WindowFolder::new();

        for at in SampleInstants::new(request.start, request.end, request.step) {
            if abort.is_some_and(|flag| flag.is_raised()) {
                log::warn!(
                    "scan aborted at {at}{}",
                    if folder.is_tracking() { " with a window open" } else { "" }
                );
                outcome.cancelled_at = Some(at);
                break;
            }

            let sample = source.look_angle(&request.site, at)?;
            outcome.samples_taken += 1;
            if let Some(window) = folder.push(sample) {
                outcome.windows.push(window);
            }
        }

        if let Some(window) = folder.finish(self.trailing) {
            outcome.windows.push(window);
        }

        let found = outcome.windows.len();
        outcome
            .windows
            .retain(|w| w.peak.elevation_deg >= self.min_peak_elevation_deg);

        log::info!(
            "scanned {} samples from {} to {}: {} windows ({} below minimum peak)",
            outcome.samples_taken,
            request.start,
            request.end,
            outcome.windows.len(),
            found - outcome.windows.len()
        );
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::propagation::PropagationError;
    use chrono::TimeZone;
    use std::cell::Cell;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2021, 11, 25, 0, 0, 0).unwrap()
    }

    fn site() -> GeodeticPosition {
        GeodeticPosition::new(55.93, 37.52, 193.0).unwrap()
    }

    /// Replays fixed azimuth/elevation pairs, one per step from `t0`.
    struct ScriptedSky {
        angles: Vec<(f64, f64)>,
        step: Duration,
        fail_at: Option<usize>,
        abort_after: Option<(usize, AbortFlag)>,
        calls: Cell<usize>,
    }

    impl ScriptedSky {
        fn elevations(elevations: &[f64]) -> Self {
            Self::angles(elevations.iter().map(|el| (180.0, *el)).collect())
        }

        fn angles(angles: Vec<(f64, f64)>) -> Self {
            Self {
                angles,
                step: Duration::minutes(1),
                fail_at: None,
                abort_after: None,
                calls: Cell::new(0),
            }
        }

        fn request(&self) -> ScanRequest {
            ScanRequest {
                site: site(),
                start: t0(),
                end: t0() + self.step * (self.angles.len() as i32 - 1),
                step: self.step,
            }
        }
    }

    impl LookAngleSource for ScriptedSky {
        fn look_angle(
            &self,
            _site: &GeodeticPosition,
            at: DateTime<Utc>,
        ) -> Result<SampleInstant, TrackerError> {
            let index = ((at - t0()).num_seconds() / self.step.num_seconds()) as usize;
            self.calls.set(self.calls.get() + 1);
            if let Some((after, flag)) = &self.abort_after {
                if index + 1 == *after {
                    flag.raise();
                }
            }
            if self.fail_at == Some(index) {
                return Err(TrackerError::Propagation {
                    catalog_id: 28654,
                    timestamp: at,
                    source: PropagationError::Sgp4("diverged".into()),
                });
            }
            let (azimuth_deg, elevation_deg) = self.angles[index];
            Ok(SampleInstant {
                timestamp: at,
                azimuth_deg,
                elevation_deg,
                range_km: 1500.0,
            })
        }
    }

    fn minute(n: i64) -> DateTime<Utc> {
        t0() + Duration::minutes(n)
    }

    #[test]
    fn single_pass_with_peak() {
        let sky = ScriptedSky::elevations(&[-5.0, -1.0, 2.0, 10.0, 15.0, 8.0, -3.0]);
        let outcome = PassScanner::default().scan(&sky, &sky.request(), None).unwrap();

        assert_eq!(outcome.samples_taken, 7);
        assert_eq!(outcome.windows.len(), 1);
        let window = &outcome.windows[0];
        assert_eq!(window.start_time, minute(2));
        assert_eq!(window.end_time, minute(6));
        assert_eq!(window.closure, WindowClosure::Set);
        assert_eq!(window.peak.timestamp, minute(4));
        assert_eq!(window.peak.elevation_deg, 15.0);

        let elevations: Vec<_> = window.samples.iter().map(|s| s.elevation_deg).collect();
        assert_eq!(elevations, vec![2.0, 10.0, 15.0, 8.0, -3.0]);
    }

    #[test]
    fn never_above_horizon() {
        let sky = ScriptedSky::elevations(&[-5.0, -1.0, -0.5, -10.0, -20.0]);
        let outcome = PassScanner::default().scan(&sky, &sky.request(), None).unwrap();
        assert!(outcome.windows.is_empty());
    }

    #[test]
    fn zero_elevation_is_not_visible() {
        let sky = ScriptedSky::elevations(&[0.0, 1.0, 0.0, 0.0]);
        let outcome = PassScanner::default().scan(&sky, &sky.request(), None).unwrap();
        assert_eq!(outcome.windows.len(), 1);
        assert_eq!(outcome.windows[0].start_time, minute(1));
        assert_eq!(outcome.windows[0].end_time, minute(2));
    }

    #[test]
    fn trailing_window_is_closed_by_default() {
        let sky = ScriptedSky::elevations(&[-2.0, 3.0, 9.0, 12.0]);
        let outcome = PassScanner::default().scan(&sky, &sky.request(), None).unwrap();

        assert_eq!(outcome.windows.len(), 1);
        let window = &outcome.windows[0];
        assert_eq!(window.closure, WindowClosure::Truncated);
        assert_eq!(window.start_time, minute(1));
        assert_eq!(window.end_time, minute(3));
        assert_eq!(window.samples.len(), 3);
        assert_eq!(window.peak.timestamp, minute(3));
    }

    #[test]
    fn trailing_window_can_be_dropped() {
        let sky = ScriptedSky::elevations(&[5.0, -1.0, -2.0, 3.0, 9.0, 12.0]);
        let outcome = PassScanner::new(TrailingWindow::Drop)
            .scan(&sky, &sky.request(), None)
            .unwrap();

        assert_eq!(outcome.windows.len(), 1);
        assert_eq!(outcome.windows[0].start_time, minute(0));
        assert_eq!(outcome.windows[0].closure, WindowClosure::Set);
    }

    #[test]
    fn single_sample_trailing_window_is_dropped() {
        let sky = ScriptedSky::elevations(&[-2.0, -1.0, 4.0]);
        let outcome = PassScanner::new(TrailingWindow::Close)
            .scan(&sky, &sky.request(), None)
            .unwrap();
        assert!(outcome.windows.is_empty());
    }

    #[test]
    fn several_windows_in_order() {
        let sky = ScriptedSky::elevations(&[1.0, 4.0, -1.0, -2.0, 6.0, 6.0, -4.0, 2.0, -1.0]);
        let outcome = PassScanner::default().scan(&sky, &sky.request(), None).unwrap();

        let spans: Vec<_> = outcome
            .windows
            .iter()
            .map(|w| (w.start_time, w.end_time, w.peak.timestamp))
            .collect();
        assert_eq!(
            spans,
            vec![
                (minute(0), minute(2), minute(1)),
                (minute(4), minute(6), minute(4)),
                (minute(7), minute(8), minute(7)),
            ]
        );
        for window in &outcome.windows {
            assert!(window.start_time < window.end_time);
            assert!(window.samples.windows(2).all(|p| p[0].timestamp < p[1].timestamp));
            assert!(window
                .samples
                .iter()
                .all(|s| s.elevation_deg <= window.peak.elevation_deg));
        }
    }

    #[test]
    fn azimuth_may_wrap_through_north() {
        let sky = ScriptedSky::angles(vec![
            (340.0, -1.0),
            (350.0, 5.0),
            (359.5, 20.0),
            (4.0, 18.0),
            (15.0, -0.5),
        ]);
        let outcome = PassScanner::default().scan(&sky, &sky.request(), None).unwrap();

        let window = &outcome.windows[0];
        assert_eq!(window.start_azimuth_deg, 350.0);
        assert_eq!(window.end_azimuth_deg, 15.0);
        assert_eq!(window.peak.azimuth_deg, 359.5);
        let azimuths: Vec<_> = window.samples.iter().map(|s| s.azimuth_deg).collect();
        assert_eq!(azimuths, vec![350.0, 359.5, 4.0, 15.0]);
    }

    #[test]
    fn propagation_failure_aborts_the_scan() {
        let mut sky = ScriptedSky::elevations(&[-1.0, 5.0, 10.0, 2.0, -1.0]);
        sky.fail_at = Some(3);

        match PassScanner::default().scan(&sky, &sky.request(), None) {
            Err(TrackerError::Propagation { timestamp, .. }) => assert_eq!(timestamp, minute(3)),
            other => panic!("expected propagation failure, got {other:?}"),
        }
        assert_eq!(sky.calls.get(), 4);
    }

    #[test]
    fn abort_applies_trailing_policy() {
        let flag = AbortFlag::new();
        let mut sky = ScriptedSky::elevations(&[-1.0, 5.0, 10.0, 12.0, 2.0, -1.0]);
        sky.abort_after = Some((3, flag.clone()));

        let closed = PassScanner::default()
            .scan(&sky, &sky.request(), Some(&flag))
            .unwrap();
        assert_eq!(closed.samples_taken, 3);
        assert_eq!(closed.cancelled_at, Some(minute(3)));
        assert_eq!(closed.windows.len(), 1);
        assert_eq!(closed.windows[0].closure, WindowClosure::Truncated);
        assert_eq!(closed.windows[0].end_time, minute(2));

        let flag = AbortFlag::new();
        sky.abort_after = Some((3, flag.clone()));
        let dropped = PassScanner::new(TrailingWindow::Drop)
            .scan(&sky, &sky.request(), Some(&flag))
            .unwrap();
        assert!(dropped.windows.is_empty());
        assert_eq!(dropped.cancelled_at, Some(minute(3)));
    }

    #[test]
    fn minimum_peak_filters_low_passes() {
        let sky = ScriptedSky::elevations(&[3.0, 4.0, -1.0, 20.0, 35.0, -2.0]);
        let outcome = PassScanner::default()
            .with_min_peak_elevation(10.0)
            .scan(&sky, &sky.request(), None)
            .unwrap();
        assert_eq!(outcome.windows.len(), 1);
        assert_eq!(outcome.windows[0].peak.elevation_deg, 35.0);
    }

    #[test]
    fn rejects_bad_requests_before_sampling() {
        let sky = ScriptedSky::elevations(&[1.0, 2.0]);

        let mut backwards = sky.request();
        backwards.start = backwards.end + Duration::seconds(1);
        assert!(matches!(
            PassScanner::default().scan(&sky, &backwards, None),
            Err(TrackerError::InvalidInput(_))
        ));

        let mut no_step = sky.request();
        no_step.step = Duration::zero();
        assert!(PassScanner::default().scan(&sky, &no_step, None).is_err());

        let mut bad_site = sky.request();
        bad_site.site.longitude_deg = 200.0;
        assert!(PassScanner::default().scan(&sky, &bad_site, None).is_err());

        assert_eq!(sky.calls.get(), 0);
    }

    #[test]
    fn folder_emits_on_falling_edge() {
        let mut folder = WindowFolder::new();
        let at = |m| SampleInstant {
            timestamp: minute(m),
            azimuth_deg: 90.0,
            elevation_deg: if m == 1 { 7.0 } else { -1.0 },
            range_km: 900.0,
        };

        assert!(folder.push(at(0)).is_none());
        assert!(folder.push(at(1)).is_none());
        assert!(folder.is_tracking());
        let window = folder.push(at(2)).unwrap();
        assert!(!folder.is_tracking());
        assert_eq!(window.samples.len(), 2);
        assert!(folder.finish(TrailingWindow::Close).is_none());
    }
}
