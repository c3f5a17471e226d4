use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Wall clock plus a way to wait. Swapped for a fake in tests.
#[async_trait]
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
    async fn sleep(&self, duration: Duration);
}

/// The real clock, backed by `chrono::Utc` and `tokio::time`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

#[async_trait]
impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Formats the time between `from` and `to` as
/// `"<d> days, <h> hours, <m> minutes, <s> seconds"`. Truncates; negative spans show as zero.
pub fn format_elapsed(from: DateTime<Utc>, to: DateTime<Utc>) -> String {
    let total = to.signed_duration_since(from).num_seconds().max(0);
    let days = total / 86_400;
    let hours = (total % 86_400) / 3_600;
    let minutes = (total % 3_600) / 60;
    let seconds = total % 60;
    format!("{days} days, {hours} hours, {minutes} minutes, {seconds} seconds")
}

/// `17 October 2026`
pub fn format_date(at: DateTime<Utc>) -> String {
    at.format("%d %B %Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration as ChronoDuration, TimeZone};

    #[test]
    fn elapsed_is_decomposed_by_truncation() {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let end = start
            + ChronoDuration::days(2)
            + ChronoDuration::hours(3)
            + ChronoDuration::minutes(4)
            + ChronoDuration::seconds(5)
            + ChronoDuration::milliseconds(999);
        assert_eq!(format_elapsed(start, end), "2 days, 3 hours, 4 minutes, 5 seconds");
    }

    #[test]
    fn elapsed_never_goes_negative() {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 10).unwrap();
        let end = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(format_elapsed(start, end), "0 days, 0 hours, 0 minutes, 0 seconds");
    }

    #[test]
    fn date_uses_day_month_year() {
        let at = Utc.with_ymd_and_hms(2024, 3, 7, 12, 0, 0).unwrap();
        assert_eq!(format_date(at), "07 March 2024");
    }
}
