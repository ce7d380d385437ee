use log::*;

const FALLBACK_ZONE: &str = "UTC";

/// Name of the zone the host is configured for, or `UTC` if none can be found.
///
/// A non-empty `TZ` variable wins over the zone the operating system reports.
/// The name is not validated here; an unknown name is handled by the offset resolver.
pub fn detect_zone_name() -> String {
    let from_env = std::env::var("TZ").ok();
    let from_system = iana_time_zone::get_timezone()
        .map_err(|e| debug!("System timezone lookup failed: {}", e))
        .ok();

    match pick_zone_name(from_env.as_deref(), from_system) {
        Some(name) => {
            debug!("Detected host timezone '{}'", name);
            name
        },
        None => {
            warn!("Could not detect the host timezone, assuming {}", FALLBACK_ZONE);
            FALLBACK_ZONE.to_string()
        }
    }
}

fn pick_zone_name(tz_var: Option<&str>, system_zone: Option<String>) -> Option<String> {
    let non_empty = |s: &str| {
        // POSIX allows a leading ':' in TZ to mark an implementation-defined value
        let trimmed = s.trim().trim_start_matches(':');
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    };

    tz_var.and_then(non_empty)
        .or_else(|| system_zone.as_deref().and_then(non_empty))
}
