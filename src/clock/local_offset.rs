use crate::annotate::offset_label::{offset_label, offset_minutes};
use chrono::{DateTime, Offset, Timelike, Utc};
use chrono_tz::Tz;
use log::*;

/// Degrees of longitude per hour of offset.
const DEGREES_PER_HOUR: f64 = 15.0;

/// How the local UTC offset is obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OffsetMethod {
    /// Difference of two wall-clock readings of the same instant, local and UTC.
    #[default]
    WallClock,
    /// Offset reported by the zone database for the instant.
    Direct,
}

/// The caller's timezone and offset, captured once per run.
#[derive(Debug, Clone)]
pub struct LocalObservation {
    pub timezone_name: String,
    pub local_instant: DateTime<Tz>,
    pub utc_instant: DateTime<Utc>,
    /// Signed fractional hours in (-12, +12], whole minutes only.
    pub utc_offset_hours: f64,
    /// Only used to frame the map, not a zone centroid.
    pub center_longitude: f64,
}
impl LocalObservation {
    pub fn offset_label(&self) -> String {
        offset_label(self.utc_offset_hours)
    }
}


pub fn resolve(now: DateTime<Utc>, local_zone_name: &str, method: OffsetMethod) -> LocalObservation {
    let zone = match local_zone_name.parse::<Tz>() {
        Ok(zone) => zone,
        Err(_) => {
            warn!("Unknown timezone '{}', falling back to UTC", local_zone_name);
            chrono_tz::UTC
        }
    };

    let local_instant = now.with_timezone(&zone);
    let measured_hours = match method {
        OffsetMethod::WallClock => offset_from_wall_clocks(hour_fraction(&local_instant), hour_fraction(&now)),
        OffsetMethod::Direct => {
            let seconds = local_instant.offset().fix().local_minus_utc();
            normalize_offset(f64::from(seconds) / 3600.0)
        },
    };
    // whole minutes, so both methods yield bit-identical offsets
    let utc_offset_hours = offset_minutes(measured_hours) as f64 / 60.0;

    debug!("Resolved {} to offset {} hours ({:?})", zone.name(), utc_offset_hours, method);

    LocalObservation {
        timezone_name: zone.name().to_string(),
        local_instant,
        utc_instant: now,
        utc_offset_hours,
        center_longitude: utc_offset_hours * DEGREES_PER_HOUR,
    }
}

/// Hour of day as a real number; minutes become a fraction of an hour, seconds are dropped.
pub fn hour_fraction<T: Timelike>(time: &T) -> f64 {
    f64::from(time.hour()) + f64::from(time.minute()) / 60.0
}

pub fn offset_from_wall_clocks(local_hour: f64, utc_hour: f64) -> f64 {
    normalize_offset(local_hour - utc_hour)
}

/// Wraps an offset into (-12, +12], e.g. readings 23.9 and 0.1 straddling midnight give -0.2.
pub fn normalize_offset(hours: f64) -> f64 {
    if hours > 12.0 {
        hours - 24.0
    } else if hours < -12.0 {
        hours + 24.0
    } else {
        hours
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotate::features::ZoneClock;
    use chrono::TimeZone;

    fn approx(actual: f64, expected: f64) -> bool {
        (actual - expected).abs() < 1e-9
    }

    fn new_year() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
    }

    #[test]
    fn readings_straddling_midnight_give_small_offset() {
        let offset = offset_from_wall_clocks(23.9, 0.1);
        assert!(approx(offset, -0.2), "got {}", offset);

        let offset = offset_from_wall_clocks(0.1, 23.9);
        assert!(approx(offset, 0.2), "got {}", offset);
    }

    #[test]
    fn normalization_keeps_in_range_values() {
        assert_eq!(normalize_offset(12.0), 12.0);
        assert_eq!(normalize_offset(-12.0), -12.0);
        assert_eq!(normalize_offset(5.5), 5.5);
        assert_eq!(normalize_offset(13.0), -11.0);
        assert_eq!(normalize_offset(-13.0), 11.0);
    }

    #[test]
    fn hour_fraction_includes_minutes() {
        let instant = Utc.with_ymd_and_hms(2024, 1, 1, 5, 45, 59).unwrap();
        assert_eq!(hour_fraction(&instant), 5.75);
    }

    #[test]
    fn fractional_zone_resolves_with_both_methods() {
        for method in [OffsetMethod::WallClock, OffsetMethod::Direct] {
            let observation = resolve(new_year(), "Asia/Kathmandu", method);
            assert!(approx(observation.utc_offset_hours, 5.75), "{:?}", method);
            assert!(approx(observation.center_longitude, 86.25), "{:?}", method);
            assert_eq!(observation.offset_label(), "UTC+5:45");
        }
    }

    #[test]
    fn zone_behind_utc_falls_on_previous_day() {
        let observation = resolve(new_year(), "America/New_York", OffsetMethod::WallClock);

        assert!(approx(observation.utc_offset_hours, -5.0));
        assert_eq!(observation.local_instant.format("%Y-%m-%d %H:%M").to_string(), "2023-12-31 19:00");
        assert_eq!(observation.utc_instant, new_year());
        assert_eq!(observation.offset_label(), "UTC-5");
    }

    #[test]
    fn zone_ahead_of_utc_past_midnight() {
        let late = Utc.with_ymd_and_hms(2024, 1, 1, 23, 30, 0).unwrap();
        let observation = resolve(late, "Europe/Berlin", OffsetMethod::WallClock);
        assert!(approx(observation.utc_offset_hours, 1.0));
    }

    #[test]
    fn both_methods_agree_on_half_hour_zone() {
        let instant = Utc.with_ymd_and_hms(2024, 7, 15, 9, 20, 0).unwrap();
        let wall = resolve(instant, "America/St_Johns", OffsetMethod::WallClock);
        let direct = resolve(instant, "America/St_Johns", OffsetMethod::Direct);

        assert!(approx(wall.utc_offset_hours, -2.5));
        assert!(approx(direct.utc_offset_hours, -2.5));
        assert_eq!(wall.offset_label(), "UTC-2:30");
    }

    #[test]
    fn minute_bearing_instant_gives_exact_offset() {
        // 10:20 local against 04:50 UTC leaves float noise in the raw difference
        let instant = Utc.with_ymd_and_hms(2024, 1, 1, 4, 50, 0).unwrap();
        let wall = resolve(instant, "Asia/Kolkata", OffsetMethod::WallClock);
        let direct = resolve(instant, "Asia/Kolkata", OffsetMethod::Direct);

        assert_eq!(wall.utc_offset_hours, 5.5);
        assert_eq!(wall.utc_offset_hours, direct.utc_offset_hours);
        assert_eq!(wall.center_longitude, 82.5);

        for observation in [&wall, &direct] {
            let offset = observation.utc_offset_hours;
            assert!(!ZoneClock::compute(6.0, instant, offset).is_user_zone);
            assert!(!ZoneClock::compute(5.0, instant, offset).is_user_zone);
            assert!(ZoneClock::compute(5.5, instant, offset).is_user_zone);
            assert!(ZoneClock::compute(5.75, instant, offset).is_user_zone);
        }
    }

    #[test]
    fn offsets_beyond_twelve_hours_are_wrapped() {
        let observation = resolve(new_year(), "Pacific/Kiritimati", OffsetMethod::Direct);
        assert!(approx(observation.utc_offset_hours, -10.0));
    }

    #[test]
    fn unknown_zone_falls_back_to_utc() {
        let observation = resolve(new_year(), "Mars/Olympus_Mons", OffsetMethod::WallClock);

        assert_eq!(observation.timezone_name, "UTC");
        assert_eq!(observation.utc_offset_hours, 0.0);
        assert_eq!(observation.center_longitude, 0.0);
        assert_eq!(observation.offset_label(), "UTC");
    }
}
