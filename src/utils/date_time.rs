use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};

const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Format a backend timestamp as `YYYY-MM-DD HH:mm:ss` in the viewer's local zone.
pub fn format_date_time(raw: Option<&str>) -> String {
    format_date_time_in(raw, &Local)
}

/// Same as [`format_date_time`] for an explicit zone.
///
/// Timestamps without an offset are wall-clock time in `tz`. Timestamps with an
/// offset are converted into `tz`. A bare date is midnight UTC. Missing, empty or
/// unparseable input renders as `-`.
pub fn format_date_time_in<Tz: TimeZone>(raw: Option<&str>, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    let s = match raw.map(str::trim) {
        Some(s) if !s.is_empty() => s,
        _ => return "-".to_string(),
    };

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return dt.with_timezone(tz).format(DISPLAY_FORMAT).to_string();
    }

    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return naive.format(DISPLAY_FORMAT).to_string();
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        if let Some(midnight) = date.and_hms_opt(0, 0, 0) {
            let utc = Utc.from_utc_datetime(&midnight);
            return utc.with_timezone(tz).format(DISPLAY_FORMAT).to_string();
        }
    }

    tracing::debug!(raw = s, "Unparseable timestamp");
    "-".to_string()
}

/// Shortest decimal form of a balance: `100`, `100.5`.
pub fn format_balance(balance: f64) -> String {
    balance.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    #[test]
    fn offsets_are_converted_into_the_viewer_zone() {
        let shanghai = FixedOffset::east_opt(8 * 3600).unwrap();
        assert_eq!(
            format_date_time_in(Some("2024-03-05T01:07:02Z"), &shanghai),
            "2024-03-05 09:07:02"
        );
    }

    #[test]
    fn bare_dates_are_utc_midnight() {
        let behind = FixedOffset::west_opt(3600).unwrap();
        assert_eq!(
            format_date_time_in(Some("2024-03-05"), &behind),
            "2024-03-04 23:00:00"
        );
    }
}
