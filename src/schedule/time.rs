use chrono::NaiveTime;

/// Fallback opening time for a day whose start is missing or malformed
pub const FALLBACK_DAY_START: &str = "09:00";
/// Fallback closing time for a day whose end is missing or malformed
pub const FALLBACK_DAY_END: &str = "18:00";
/// Fallback start for a break whose start is missing or malformed
pub const FALLBACK_BREAK_START: &str = "12:00";
/// Fallback end for a break whose end is missing or malformed
pub const FALLBACK_BREAK_END: &str = "13:00";

/// Parse time string in HH:MM format
pub fn parse_time(time_str: &str) -> Option<(u32, u32)> {
    let parts: Vec<&str> = time_str.split(':').collect();
    if parts.len() != 2 {
        return None;
    }
    let hour = parts[0].trim().parse::<u32>().ok()?;
    let minute = parts[1].trim().parse::<u32>().ok()?;
    if hour > 23 || minute > 59 {
        return None;
    }
    Some((hour, minute))
}

/// Minutes since midnight for a parseable time string
pub fn minutes_of(time_str: &str) -> Option<u32> {
    let (hour, minute) = parse_time(time_str)?;
    Some(hour * 60 + minute)
}

/// Normalize a time string to zero-padded HH:MM, falling back when malformed
///
/// Accepts the loose forms seen in incoming data ("9:00", "8.30", a bare
/// hour) in addition to well-formed HH:MM. Anything unparseable, including
/// a missing value, becomes the given fallback.
pub fn normalize_time(raw: Option<&str>, fallback: &str) -> String {
    let Some(time_str) = raw else {
        return fallback.to_string();
    };

    // Remove any extra whitespace
    let time_str = time_str.trim();

    // Replace commas with periods
    let time_str = time_str.replace(',', ".");

    if time_str.contains(':') {
        // Time already has a colon, just format it properly
        if let Some((hour, minute)) = parse_time(&time_str) {
            return format!("{:02}:{:02}", hour, minute);
        }
    } else if time_str.contains('.') {
        // Time has a period (e.g., "8.30")
        let parts: Vec<&str> = time_str.split('.').collect();
        if parts.len() == 2 {
            if let (Ok(hours), Ok(minutes)) = (parts[0].parse::<u32>(), parts[1].parse::<u32>()) {
                if hours < 24 && minutes < 60 {
                    return format!("{:02}:{:02}", hours, minutes);
                }
            }
        }
    } else {
        // Just a number (e.g., "8"), assume it's hours
        if let Ok(hours) = time_str.parse::<u32>() {
            if hours < 24 {
                return format!("{:02}:00", hours);
            }
        }
    }

    fallback.to_string()
}

/// Check whether a string is already in canonical zero-padded HH:MM form
pub fn is_canonical(time_str: &str) -> bool {
    NaiveTime::parse_from_str(time_str, "%H:%M")
        .map(|time| time.format("%H:%M").to_string() == time_str)
        .unwrap_or(false)
}
