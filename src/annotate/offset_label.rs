/// Converts a fractional-hour offset into whole minutes, so +5.75 becomes exactly 345.
pub fn offset_minutes(offset_hours: f64) -> i64 {
    (offset_hours * 60.0).round() as i64
}

/// Human-readable form of a UTC offset, e.g. `UTC+5:30` or `UTC-9.75`.
///
/// The fractional part is taken with floor semantics (`rem_euclid`), so a negative `.75`
/// offset has fraction `.25` and falls through to the plain numeric form, while a
/// negative `.25` offset lands in the `:45` branch.
pub fn offset_label(offset_hours: f64) -> String {
    let fraction = offset_hours.rem_euclid(1.0);

    if offset_hours == 0.0 {
        "UTC".to_string()
    } else if offset_hours.fract() == 0.0 {
        // sign is carried by the integer itself when negative
        if offset_hours > 0.0 {
            format!("UTC+{}", offset_hours as i64)
        } else {
            format!("UTC{}", offset_hours as i64)
        }
    } else if fraction == 0.5 {
        minutes_label(offset_hours, 30)
    } else if fraction == 0.75 {
        minutes_label(offset_hours, 45)
    } else if offset_hours > 0.0 {
        format!("UTC+{}", offset_hours)
    } else {
        format!("UTC{}", offset_hours)
    }
}

fn minutes_label(offset_hours: f64, minutes: u8) -> String {
    if offset_hours > 0.0 {
        format!("UTC+{}:{}", offset_hours.floor() as i64, minutes)
    } else {
        format!("UTC{}:{}", offset_hours.ceil() as i64, minutes)
    }
}
