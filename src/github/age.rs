//! Human readable release age ("3h ago", "1y2mo ago").

use chrono::{DateTime, Utc};

const MINUTE: i64 = 60;
const HOUR: i64 = 60 * MINUTE;
const DAY: i64 = 24 * HOUR;

/// Label for the time elapsed between `created_at` and `now`.
pub fn time_difference_label(now: DateTime<Utc>, created_at: DateTime<Utc>) -> String {
    format_age((now - created_at).num_seconds())
}

/// Formats an elapsed duration in seconds. Negative values count as zero.
///
/// The first matching unit wins: years (with months, when non-zero), days,
/// hours, minutes, then seconds. A year is 365 days and a month 30 days.
pub fn format_age(elapsed_secs: i64) -> String {
    let seconds = elapsed_secs.max(0);
    let minutes = seconds / MINUTE;
    let hours = seconds / HOUR;
    let days = seconds / DAY;
    let years = days / 365;
    let months = (days % 365) / 30;

    if years > 0 {
        if months > 0 {
            format!("{}y{}mo ago", years, months)
        } else {
            format!("{}y ago", years)
        }
    } else if days >= 1 {
        format!("{}d ago", days)
    } else if hours >= 1 {
        format!("{}h ago", hours)
    } else if minutes >= 1 {
        format!("{}min ago", minutes)
    } else {
        format!("{}s ago", seconds)
    }
}
