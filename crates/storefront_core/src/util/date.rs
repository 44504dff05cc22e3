//! Date helpers for epoch-millisecond timestamps.
//!
//! All calendar math is done in UTC.

use chrono::{DateTime, Utc};

const MS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// Rendering style for [`format_date`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DateStyle {
    /// `October 19, 2026`
    #[default]
    Long,
    /// `Oct 19, 2026`
    Medium,
    /// `2026-10-19`
    Iso,
}

impl DateStyle {
    fn pattern(self) -> &'static str {
        match self {
            Self::Long => "%B %-d, %Y",
            Self::Medium => "%b %-d, %Y",
            Self::Iso => "%Y-%m-%d",
        }
    }
}

/// Formats an epoch-millisecond timestamp as a calendar date.
///
/// Returns `None` when the timestamp is outside chrono's supported range.
pub fn format_date(epoch_ms: i64, style: DateStyle) -> Option<String> {
    let at: DateTime<Utc> = DateTime::from_timestamp_millis(epoch_ms)?;
    Some(at.format(style.pattern()).to_string())
}

/// Whole days between two instants, order-insensitive, rounded up.
pub fn days_between(start_ms: i64, end_ms: i64) -> i64 {
    let diff = start_ms.abs_diff(end_ms);
    let days = diff.div_ceil(MS_PER_DAY as u64);
    i64::try_from(days).unwrap_or(i64::MAX)
}

/// Shifts an instant by `days` (negative moves backwards).
pub fn add_days(epoch_ms: i64, days: i64) -> i64 {
    epoch_ms.saturating_add(days.saturating_mul(MS_PER_DAY))
}

#[cfg(test)]
mod tests {
    use super::{add_days, days_between, format_date, DateStyle, MS_PER_DAY};

    // 2026-10-19T12:00:00Z
    const SAMPLE_MS: i64 = 1_792_411_200_000;

    #[test]
    fn formats_each_style() {
        assert_eq!(
            format_date(SAMPLE_MS, DateStyle::Long).as_deref(),
            Some("October 19, 2026")
        );
        assert_eq!(
            format_date(SAMPLE_MS, DateStyle::Medium).as_deref(),
            Some("Oct 19, 2026")
        );
        assert_eq!(
            format_date(SAMPLE_MS, DateStyle::Iso).as_deref(),
            Some("2026-10-19")
        );
    }

    #[test]
    fn days_between_rounds_up_and_ignores_order() {
        assert_eq!(days_between(0, 0), 0);
        assert_eq!(days_between(0, 1), 1);
        assert_eq!(days_between(3 * MS_PER_DAY, 0), 3);
        assert_eq!(days_between(0, 2 * MS_PER_DAY + 1), 3);
    }

    #[test]
    fn add_days_moves_both_directions() {
        assert_eq!(add_days(SAMPLE_MS, 1) - SAMPLE_MS, MS_PER_DAY);
        assert_eq!(
            format_date(add_days(SAMPLE_MS, -19), DateStyle::Iso).as_deref(),
            Some("2026-09-30")
        );
    }
}
