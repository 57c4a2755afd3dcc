//! Injectable source of the current time.
//!
//! Audit stamping and day-scoped queries read the time through [`Clock`]
//! so tests can pin it with [`FixedClock`].

use chrono::{Days, NaiveTime, Utc};

use crate::types::Timestamp;

/// Source of the current UTC time.
pub trait Clock: Send + Sync {
    fn now(&self) -> Timestamp;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Utc::now()
    }
}

/// A clock that always reports the same instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub Timestamp);

impl Clock for FixedClock {
    fn now(&self) -> Timestamp {
        self.0
    }
}

/// Half-open UTC day `[start, end)` containing a given instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayWindow {
    pub start: Timestamp,
    pub end: Timestamp,
}

impl DayWindow {
    /// The UTC calendar day containing `at`.
    pub fn containing(at: Timestamp) -> Self {
        let start = at.date_naive().and_time(NaiveTime::MIN).and_utc();
        let end = start
            .checked_add_days(Days::new(1))
            .unwrap_or(Timestamp::MAX_UTC);
        Self { start, end }
    }

    /// The UTC day the clock is currently in.
    pub fn today(clock: &dyn Clock) -> Self {
        Self::containing(clock.now())
    }

    pub fn contains(&self, at: Timestamp) -> bool {
        self.start <= at && at < self.end
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn fixed_clock_reports_pinned_instant() {
        let at = Utc.with_ymd_and_hms(2024, 3, 9, 17, 45, 0).unwrap();
        assert_eq!(FixedClock(at).now(), at);
    }

    #[test]
    fn window_spans_the_utc_day() {
        let at = Utc.with_ymd_and_hms(2024, 3, 9, 17, 45, 12).unwrap();
        let window = DayWindow::containing(at);

        assert_eq!(window.start, Utc.with_ymd_and_hms(2024, 3, 9, 0, 0, 0).unwrap());
        assert_eq!(window.end, Utc.with_ymd_and_hms(2024, 3, 10, 0, 0, 0).unwrap());
    }

    #[test]
    fn window_is_half_open() {
        let window = DayWindow::today(&FixedClock(
            Utc.with_ymd_and_hms(2024, 12, 31, 23, 59, 59).unwrap(),
        ));

        assert!(window.contains(window.start));
        assert!(!window.contains(window.end));
        assert_eq!(window.end, Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap());
    }
}
