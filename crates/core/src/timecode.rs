//! Conversions between playback seconds, display strings, and timeline
//! percentages.
//!
//! Every function here is pure and total: non-finite or negative input
//! is treated as zero rather than panicking, because callers feed these
//! straight from player events that can briefly report garbage while
//! media metadata is still loading.

/* --------------------------------------------------------------------------
   Helpers
   -------------------------------------------------------------------------- */

/// Collapse non-finite or negative seconds to zero.
fn sanitize(seconds: f64) -> f64 {
    if seconds.is_finite() && seconds > 0.0 {
        seconds
    } else {
        0.0
    }
}

/// Clamp a ratio into `[0, 1]`, mapping non-finite input to zero.
fn clamp_unit(ratio: f64) -> f64 {
    if !ratio.is_finite() {
        return 0.0;
    }
    ratio.min(1.0).max(0.0)
}

/* --------------------------------------------------------------------------
   Formatting
   -------------------------------------------------------------------------- */

/// Format seconds as `M:SS` for display next to the timeline.
///
/// Minutes are not zero-padded, seconds are floored and padded to two
/// digits: `format_display(125.0) == "2:05"`.
pub fn format_display(seconds: f64) -> String {
    let seconds = sanitize(seconds);
    let mins = (seconds / 60.0).floor() as u64;
    let secs = (seconds % 60.0).floor() as u64;
    format!("{mins}:{secs:02}")
}

/// Format seconds as an SRT timestamp, `HH:MM:SS,mmm`.
///
/// Uses floor/modulo throughout; milliseconds are truncated, never
/// rounded up: `format_srt(65.25) == "00:01:05,250"`.
pub fn format_srt(seconds: f64) -> String {
    let seconds = sanitize(seconds);
    let whole = seconds.floor();
    let total = whole as u64;
    let hours = total / 3600;
    let mins = (total % 3600) / 60;
    let secs = total % 60;
    let millis = ((seconds - whole) * 1000.0).floor() as u64;
    format!("{hours:02}:{mins:02}:{secs:02},{millis:03}")
}

/* --------------------------------------------------------------------------
   Timeline geometry
   -------------------------------------------------------------------------- */

/// Map a timeline ratio (`0.0..=1.0`) to playback seconds.
///
/// The ratio is clamped into `[0, 1]` first, so the result always lies
/// in `[0, duration]`. A zero or unknown duration yields `0.0`.
pub fn percent_to_time(percent: f64, duration: f64) -> f64 {
    clamp_unit(percent) * sanitize(duration)
}

/// Map playback seconds to a timeline percentage (`0.0..=100.0`).
///
/// Returns `0.0` when the duration is zero or unknown.
pub fn time_to_percent(seconds: f64, duration: f64) -> f64 {
    let duration = sanitize(duration);
    if duration <= 0.0 {
        return 0.0;
    }
    clamp_unit(seconds / duration) * 100.0
}

/* --------------------------------------------------------------------------
   Tests
   -------------------------------------------------------------------------- */

#[cfg(test)]
mod tests {
    use super::*;

    // -- format_display ------------------------------------------------------

    #[test]
    fn display_zero() {
        assert_eq!(format_display(0.0), "0:00");
    }

    #[test]
    fn display_pads_seconds() {
        assert_eq!(format_display(125.0), "2:05");
    }

    #[test]
    fn display_floors_fractional_seconds() {
        assert_eq!(format_display(59.9), "0:59");
    }

    #[test]
    fn display_does_not_pad_minutes() {
        assert_eq!(format_display(754.0), "12:34");
    }

    #[test]
    fn display_tolerates_negative_and_nan() {
        assert_eq!(format_display(-3.0), "0:00");
        assert_eq!(format_display(f64::NAN), "0:00");
    }

    // -- format_srt ----------------------------------------------------------

    #[test]
    fn srt_basic() {
        assert_eq!(format_srt(65.25), "00:01:05,250");
    }

    #[test]
    fn srt_zero() {
        assert_eq!(format_srt(0.0), "00:00:00,000");
    }

    #[test]
    fn srt_hours() {
        assert_eq!(format_srt(3661.5), "01:01:01,500");
    }

    #[test]
    fn srt_truncates_milliseconds() {
        // 0.9999 s must not round up to the next second.
        assert_eq!(format_srt(1.9999), "00:00:01,999");
    }

    #[test]
    fn srt_tolerates_negative_input() {
        assert_eq!(format_srt(-5.0), "00:00:00,000");
    }

    // -- percent_to_time -----------------------------------------------------

    #[test]
    fn percent_maps_linearly() {
        assert_eq!(percent_to_time(0.5, 100.0), 50.0);
    }

    #[test]
    fn percent_clamps_below_zero() {
        assert_eq!(percent_to_time(-0.5, 100.0), 0.0);
    }

    #[test]
    fn percent_clamps_above_one() {
        assert_eq!(percent_to_time(1.5, 100.0), 100.0);
    }

    #[test]
    fn percent_with_zero_duration() {
        assert_eq!(percent_to_time(0.5, 0.0), 0.0);
    }

    #[test]
    fn percent_is_monotonic_and_bounded() {
        let duration = 123.4;
        let width = 640.0;
        let mut last = 0.0;
        for px in 0..=640 {
            let t = percent_to_time(px as f64 / width, duration);
            assert!(t >= last);
            assert!((0.0..=duration).contains(&t));
            last = t;
        }
    }

    // -- time_to_percent -----------------------------------------------------

    #[test]
    fn time_to_percent_midpoint() {
        assert_eq!(time_to_percent(50.0, 100.0), 50.0);
    }

    #[test]
    fn time_to_percent_clamps_past_duration() {
        assert_eq!(time_to_percent(150.0, 100.0), 100.0);
    }

    #[test]
    fn time_to_percent_zero_duration() {
        assert_eq!(time_to_percent(10.0, 0.0), 0.0);
    }

    #[test]
    fn time_to_percent_negative_duration() {
        assert_eq!(time_to_percent(10.0, -4.0), 0.0);
    }
}
