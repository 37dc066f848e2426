use chrono::{DateTime, Duration, NaiveDate, Utc};

use super::i18n::Locale;

/// Age after which timestamps are shown as a calendar date.
const RELATIVE_DAYS_LIMIT: i64 = 30;

/// Format a timestamp relative to `now`: minutes, hours or days ago, or an
/// absolute date once it is 30 or more days old.
///
/// Timestamps in the future count as zero minutes ago.
pub fn format_relative(value: DateTime<Utc>, now: DateTime<Utc>, locale: Locale) -> String {
    let elapsed = now.signed_duration_since(value).max(Duration::zero());
    let days = elapsed.num_days();

    if days == 0 {
        let hours = elapsed.num_hours();
        if hours == 0 {
            return locale.minutes_ago(elapsed.num_minutes());
        }
        return locale.hours_ago(hours);
    }

    if days < RELATIVE_DAYS_LIMIT {
        return locale.days_ago(days);
    }

    format_date(value.date_naive(), locale)
}

/// Calendar date in the locale's short form (`1/15/2024`, `15/01/2024`).
pub fn format_date(date: NaiveDate, locale: Locale) -> String {
    match locale {
        Locale::En => date.format("%-m/%-d/%Y").to_string(),
        Locale::Fr => date.format("%d/%m/%Y").to_string(),
    }
}

/// Modification column text; directories and unknown times show `-`.
pub fn format_modified(value: Option<DateTime<Utc>>, now: DateTime<Utc>, locale: Locale) -> String {
    value
        .map(|v| format_relative(v, now, locale))
        .unwrap_or_else(|| "-".to_string())
}
