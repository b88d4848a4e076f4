//! Unix seconds rendered as ISO-8601 UTC for reports and run logs.

use std::time::{SystemTime, UNIX_EPOCH};

const SECONDS_PER_DAY: u64 = 86_400;

/// 9999-12-31T23:59:59Z, the last instant with a four-digit year.
const LAST_RENDERABLE: u64 = 253_402_300_799;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UtcTimestamp {
    pub year: u64,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
}

impl UtcTimestamp {
    pub fn from_unix(ts: u64) -> Option<Self> {
        if ts > LAST_RENDERABLE {
            return None;
        }
        let (year, month, day) = civil_from_days(ts / SECONDS_PER_DAY);
        let seconds = (ts % SECONDS_PER_DAY) as u32;
        Some(Self {
            year,
            month,
            day,
            hour: seconds / 3_600,
            minute: seconds % 3_600 / 60,
            second: seconds % 60,
        })
    }
}

/// `YYYY-MM-DDTHH:MM:SSZ`, or `<ts>s` past year 9999.
pub fn format_utc(ts: u64) -> String {
    match UtcTimestamp::from_unix(ts) {
        Some(t) => format!(
            "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}Z",
            t.year, t.month, t.day, t.hour, t.minute, t.second
        ),
        None => format!("{ts}s"),
    }
}

/// Wall clock in unix seconds; a clock set before 1970 reads as 0.
pub fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}

/// Days since 1970-01-01 to a proleptic Gregorian (year, month, day).
/// Counts from 0000-03-01 so the leap day closes each year (H. Hinnant).
fn civil_from_days(days: u64) -> (u64, u32, u32) {
    let shifted = days + 719_468;
    let era = shifted / 146_097;
    let day_of_era = shifted % 146_097;
    let year_of_era =
        (day_of_era - day_of_era / 1_460 + day_of_era / 36_524 - day_of_era / 146_096) / 365;
    let day_of_year = day_of_era - (365 * year_of_era + year_of_era / 4 - year_of_era / 100);
    let march_based_month = (5 * day_of_year + 2) / 153;

    let day = (day_of_year - (153 * march_based_month + 2) / 5 + 1) as u32;
    let month = (if march_based_month < 10 {
        march_based_month + 3
    } else {
        march_based_month - 9
    }) as u32;
    let year = era * 400 + year_of_era + u64::from(month <= 2);
    (year, month, day)
}
