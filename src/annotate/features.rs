use super::offset_label::{offset_label, offset_minutes};
use crate::sources::timezones::TimezoneFeature;
use chrono::{DateTime, Duration, NaiveDateTime, Timelike, Utc};
use serde::Serialize;

/// Two features count as the user's zone when their offsets differ by less than this many hours.
pub const USER_ZONE_TOLERANCE_HOURS: f64 = 0.5;

/// Time-of-day class of a local hour. Dawn (6-8) and dusk (18-20) are neither day nor night.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DayPhase {
    Night,
    Twilight,
    Day,
}
impl DayPhase {
    pub fn of_hour(hour: u32) -> DayPhase {
        if is_night_hour(hour) {
            DayPhase::Night
        } else if is_day_hour(hour) {
            DayPhase::Day
        } else {
            DayPhase::Twilight
        }
    }
}

pub fn is_night_hour(hour: u32) -> bool {
    hour < 6 || hour >= 20
}

pub fn is_day_hour(hour: u32) -> bool {
    (8..18).contains(&hour)
}

/// Everything derived for a single feature at the shared reference instant.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ZoneClock {
    pub offset_minutes: i64,
    #[serde(skip)]
    pub local_time: NaiveDateTime,
    pub time_24: String,
    pub time_12: String,
    pub date_label: String,
    pub is_night: bool,
    pub is_day: bool,
    pub offset_label: String,
    pub is_user_zone: bool,
}
impl ZoneClock {
    pub fn compute(raw_zone_offset: f64, utc_now: DateTime<Utc>, user_offset_hours: f64) -> ZoneClock {
        let offset_minutes = offset_minutes(raw_zone_offset);
        let local_time = utc_now.naive_utc() + Duration::minutes(offset_minutes);
        let hour = local_time.hour();

        ZoneClock {
            offset_minutes,
            local_time,
            time_24: local_time.format("%H:%M").to_string(),
            time_12: twelve_hour_time(&local_time),
            date_label: local_time.format("%a, %b %d").to_string(),
            is_night: is_night_hour(hour),
            is_day: is_day_hour(hour),
            offset_label: offset_label(raw_zone_offset),
            is_user_zone: (raw_zone_offset - user_offset_hours).abs() < USER_ZONE_TOLERANCE_HOURS,
        }
    }

    pub fn phase(&self) -> DayPhase {
        DayPhase::of_hour(self.local_time.hour())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnnotatedFeature {
    pub feature: TimezoneFeature,
    pub clock: ZoneClock,
}


/// Annotates every feature against the same `utc_now`. Output order matches input order.
pub fn annotate(features: Vec<TimezoneFeature>, utc_now: DateTime<Utc>, user_offset_hours: f64)
    -> Vec<AnnotatedFeature>
{
    features.into_iter()
        .map(|feature| {
            let clock = ZoneClock::compute(feature.raw_zone_offset, utc_now, user_offset_hours);
            AnnotatedFeature { feature, clock }
        })
        .collect()
}

/// `%I:%M %p` without the leading zero, e.g. "7:05 PM".
pub fn twelve_hour_time(time: &NaiveDateTime) -> String {
    let formatted = time.format("%I:%M %p").to_string();
    match formatted.strip_prefix('0') {
        Some(stripped) => stripped.to_string(),
        None => formatted,
    }
}
