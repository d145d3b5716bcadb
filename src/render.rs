use std::fmt::Write;

use crate::coords::GeodeticPosition;
use crate::predict::{SampleInstant, VisibilityReport};

pub fn sample_line(sample: &SampleInstant) -> String {
    format!(
        "{}  az {:7.2}°  el {:6.2}°  range {:9.1} km",
        sample.timestamp.to_rfc3339(),
        sample.azimuth_deg,
        sample.elevation_deg,
        sample.range_km
    )
}

pub fn sub_point_line(point: &GeodeticPosition) -> String {
    format!(
        "sub-satellite point {:.4}, {:.4} at {:.1} km",
        point.latitude_deg,
        point.longitude_deg,
        point.altitude_m / 1000.0
    )
}

pub fn report_table(report: &VisibilityReport) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} (NORAD {}) from {:.4}, {:.4} @ {:.0} m",
        report.satellite,
        report.catalog_id,
        report.site.latitude_deg,
        report.site.longitude_deg,
        report.site.altitude_m
    );
    let _ = writeln!(
        out,
        "{} .. {} every {} s, trailing window: {}",
        report.start.to_rfc3339(),
        report.end.to_rfc3339(),
        report.step_seconds,
        report.trailing_window
    );
    if let Some(at) = report.cancelled_at {
        let _ = writeln!(out, "cancelled at {}", at.to_rfc3339());
    }

    if report.windows.is_empty() {
        let _ = writeln!(out, "no visibility windows");
        return out;
    }

    let _ = writeln!(
        out,
        "{:<3} {:<25} {:>7} {:<25} {:>7} {:>8} {:>8}  {}",
        "#", "start", "az", "end", "az", "peak el", "min", "closure"
    );
    for (i, w) in report.windows.iter().enumerate() {
        let _ = writeln!(
            out,
            "{:<3} {:<25} {:>7.2} {:<25} {:>7.2} {:>8.2} {:>8.1}  {}",
            i + 1,
            w.start_time.to_rfc3339(),
            w.start_azimuth_deg,
            w.end_time.to_rfc3339(),
            w.end_azimuth_deg,
            w.peak.elevation_deg,
            w.duration().num_seconds() as f64 / 60.0,
            w.closure
        );
    }
    out
}
