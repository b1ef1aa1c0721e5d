//! CF time axes and start/end window resolution.

use std::ops::Range;

use chrono::{NaiveDate, NaiveDateTime, TimeDelta};

use crate::error::IoError;

/// Unit of a CF `"<unit> since <epoch>"` time axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeUnit {
    /// Seconds.
    Seconds,
    /// Minutes.
    Minutes,
    /// Hours.
    Hours,
    /// Days.
    Days,
}

impl TimeUnit {
    fn seconds(self) -> f64 {
        match self {
            Self::Seconds => 1.0,
            Self::Minutes => 60.0,
            Self::Hours => 3_600.0,
            Self::Days => 86_400.0,
        }
    }

    fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "second" | "seconds" | "s" => Some(Self::Seconds),
            "minute" | "minutes" | "min" => Some(Self::Minutes),
            "hour" | "hours" | "h" => Some(Self::Hours),
            "day" | "days" | "d" => Some(Self::Days),
            _ => None,
        }
    }
}

/// Parse a date or datetime.
///
/// Accepts `YYYY-MM-DD`, `YYYY-MM-DD HH:MM:SS` and `YYYY-MM-DDTHH:MM:SS`.
/// A bare date is midnight.
pub fn parse_datetime(s: &str) -> Result<NaiveDateTime, IoError> {
    let s = s.trim();
    for fmt in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Ok(dt);
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map(|d| d.and_time(chrono::NaiveTime::MIN))
        .map_err(|e| IoError::InvalidTime {
            reason: format!("failed to parse datetime '{s}': {e}"),
        })
}

/// Parse CF units such as `"seconds since 1970-01-01 00:00:00"`.
pub fn parse_time_units(units: &str) -> Result<(TimeUnit, NaiveDateTime), IoError> {
    let parts: Vec<&str> = units.trim().splitn(3, ' ').collect();
    if parts.len() < 3 || !parts[1].eq_ignore_ascii_case("since") {
        return Err(IoError::InvalidTime {
            reason: format!("unexpected time units format: '{units}'"),
        });
    }
    let unit = TimeUnit::parse(parts[0]).ok_or_else(|| IoError::InvalidTime {
        reason: format!("unsupported time unit '{}'", parts[0]),
    })?;
    // Trailing timezone markers such as "UTC" or "Z" are ignored.
    let epoch = parts[2]
        .trim()
        .trim_end_matches("UTC")
        .trim_end_matches('Z')
        .trim();
    Ok((unit, parse_datetime(epoch)?))
}

/// Convert numeric offsets into datetimes.
///
/// Offsets are rounded to the nearest second.
pub fn offsets_to_datetimes(
    unit: TimeUnit,
    epoch: NaiveDateTime,
    offsets: &[f64],
) -> Result<Vec<NaiveDateTime>, IoError> {
    offsets
        .iter()
        .map(|&offset| {
            let secs = (offset * unit.seconds()).round();
            if !secs.is_finite() {
                return Err(IoError::InvalidTime {
                    reason: format!("non-finite time offset {offset}"),
                });
            }
            epoch
                .checked_add_signed(TimeDelta::seconds(secs as i64))
                .ok_or_else(|| IoError::InvalidTime {
                    reason: format!("date overflow adding {offset} to {epoch}"),
                })
        })
        .collect()
}

/// Resolve an optional start/end filter to a contiguous index range.
///
/// Both bounds are inclusive. With no bounds the result is `None`, meaning
/// the whole series.
///
/// # Errors
///
/// Returns [`IoError::EmptyTimeWindow`] if the filter matches nothing and
/// [`IoError::InvalidTime`] if a filter is given but the dataset has no
/// time axis.
pub fn time_window(
    times: Option<&[NaiveDateTime]>,
    start: Option<NaiveDateTime>,
    end: Option<NaiveDateTime>,
) -> Result<Option<Range<usize>>, IoError> {
    if start.is_none() && end.is_none() {
        return Ok(None);
    }
    let times = times.ok_or_else(|| IoError::InvalidTime {
        reason: "time window requested but the dataset has no time axis".to_string(),
    })?;
    let inside = |t: &NaiveDateTime| start.is_none_or(|s| *t >= s) && end.is_none_or(|e| *t <= e);
    let first = times.iter().position(inside);
    let last = times.iter().rposition(inside);
    match (first, last) {
        (Some(f), Some(l)) => Ok(Some(f..l + 1)),
        _ => Err(IoError::EmptyTimeWindow {
            start: start.map_or_else(|| "-".to_string(), |s| s.to_string()),
            end: end.map_or_else(|| "-".to_string(), |e| e.to_string()),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dt(s: &str) -> NaiveDateTime {
        parse_datetime(s).unwrap()
    }

    #[test]
    fn parse_datetime_formats() {
        assert_eq!(dt("2015-07-01"), dt("2015-07-01 00:00:00"));
        assert_eq!(dt("2015-07-01T06:30:00"), dt("2015-07-01 06:30:00"));
        assert!(parse_datetime("01/07/2015").is_err());
    }

    #[test]
    fn parse_units_variants() {
        let (unit, epoch) = parse_time_units("seconds since 1970-01-01 00:00:00").unwrap();
        assert_eq!(unit, TimeUnit::Seconds);
        assert_eq!(epoch, dt("1970-01-01"));

        let (unit, epoch) = parse_time_units("hours since 2000-01-01").unwrap();
        assert_eq!(unit, TimeUnit::Hours);
        assert_eq!(epoch, dt("2000-01-01"));

        let (unit, _) = parse_time_units("days since 1980-01-01 00:00:00 UTC").unwrap();
        assert_eq!(unit, TimeUnit::Days);
    }

    #[test]
    fn parse_units_rejects_garbage() {
        assert!(parse_time_units("fortnights since 2000-01-01").is_err());
        assert!(parse_time_units("days after 2000-01-01").is_err());
        assert!(parse_time_units("days").is_err());
    }

    #[test]
    fn offsets_hours() {
        let epoch = dt("2000-01-01");
        let out = offsets_to_datetimes(TimeUnit::Hours, epoch, &[0.0, 3.0, 27.0]).unwrap();
        assert_eq!(out[1], dt("2000-01-01 03:00:00"));
        assert_eq!(out[2], dt("2000-01-02 03:00:00"));
    }

    #[test]
    fn window_none_is_whole_series() {
        assert_eq!(time_window(None, None, None).unwrap(), None);
    }

    #[test]
    fn window_inclusive_bounds() {
        let times: Vec<_> = (1..=5).map(|d| dt(&format!("2020-01-0{d}"))).collect();
        let r = time_window(Some(&times), Some(dt("2020-01-02")), Some(dt("2020-01-04")))
            .unwrap()
            .unwrap();
        assert_eq!(r, 1..4);

        let r = time_window(Some(&times), Some(dt("2020-01-04")), None)
            .unwrap()
            .unwrap();
        assert_eq!(r, 3..5);
    }

    #[test]
    fn window_empty_is_error() {
        let times: Vec<_> = (1..=3).map(|d| dt(&format!("2020-01-0{d}"))).collect();
        let err = time_window(Some(&times), Some(dt("2021-01-01")), None).unwrap_err();
        assert!(matches!(err, IoError::EmptyTimeWindow { .. }));
    }

    #[test]
    fn window_without_time_axis_is_error() {
        let err = time_window(None, Some(dt("2021-01-01")), None).unwrap_err();
        assert!(matches!(err, IoError::InvalidTime { .. }));
    }
}
