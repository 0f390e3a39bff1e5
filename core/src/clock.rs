//! Time-of-day arithmetic and identifier generation
//!
//! Schedule times travel as `HH:MM` strings; all arithmetic happens on a
//! minutes-since-midnight value and converts back at the boundary.

use std::sync::atomic::{AtomicI64, Ordering};

/// A wall-clock time of day in minutes since midnight (0..1440).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TimeOfDay(u16);

pub const MINUTES_PER_DAY: i64 = 24 * 60;

impl TimeOfDay {
    /// Builds a time from hour/minute components, wrapping out-of-range input.
    pub fn from_hm(hours: u16, minutes: u16) -> Self {
        let total = i64::from(hours) * 60 + i64::from(minutes);
        TimeOfDay((total.rem_euclid(MINUTES_PER_DAY)) as u16)
    }

    /// Parses `HH:MM` (24-hour). Returns `None` for anything malformed;
    /// callers fall back to their own defaults rather than erroring.
    pub fn parse(s: &str) -> Option<Self> {
        let (h, m) = s.split_once(':')?;
        let hours: u16 = h.trim().parse().ok()?;
        let minutes: u16 = m.trim().parse().ok()?;
        if hours >= 24 || minutes >= 60 {
            return None;
        }
        Some(TimeOfDay(hours * 60 + minutes))
    }

    /// Adds (or subtracts) minutes with 24-hour wraparound.
    pub fn add_minutes(self, delta: i64) -> Self {
        let total = (i64::from(self.0) + delta).rem_euclid(MINUTES_PER_DAY);
        TimeOfDay(total as u16)
    }

    pub fn hours(self) -> u16 {
        self.0 / 60
    }

    pub fn minutes(self) -> u16 {
        self.0 % 60
    }
}

impl std::fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}:{:02}", self.hours(), self.minutes())
    }
}

/// Shifts an `HH:MM` string by `delta` minutes, `None` if it does not parse.
pub fn shift_time(time: &str, delta: i64) -> Option<String> {
    Some(TimeOfDay::parse(time)?.add_minutes(delta).to_string())
}

// Last issued id. Ids are Unix millisecond timestamps, nudged forward when
// two are requested within the same millisecond.
static LAST_ID: AtomicI64 = AtomicI64::new(0);

/// Generates an opaque schedule-entity id: the current Unix millisecond
/// timestamp as a decimal string, strictly increasing within this process.
pub fn next_entity_id() -> String {
    let now = chrono::Utc::now().timestamp_millis();
    let mut last = LAST_ID.load(Ordering::Relaxed);
    loop {
        let candidate = if now > last { now } else { last + 1 };
        match LAST_ID.compare_exchange_weak(last, candidate, Ordering::Relaxed, Ordering::Relaxed) {
            Ok(_) => return candidate.to_string(),
            Err(observed) => last = observed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_padded_and_unpadded() {
        assert_eq!(TimeOfDay::parse("09:05"), Some(TimeOfDay::from_hm(9, 5)));
        assert_eq!(TimeOfDay::parse("9:05"), Some(TimeOfDay::from_hm(9, 5)));
        assert_eq!(TimeOfDay::parse("23:59"), Some(TimeOfDay::from_hm(23, 59)));
        assert_eq!(TimeOfDay::parse("00:00"), Some(TimeOfDay::from_hm(0, 0)));
    }

    #[test]
    fn rejects_malformed_input() {
        for bad in ["", "9", "24:00", "12:60", "ab:cd", "12:", ":30", "12:34:56"] {
            assert_eq!(TimeOfDay::parse(bad), None, "accepted {bad:?}");
        }
    }

    #[test]
    fn formats_zero_padded() {
        assert_eq!(TimeOfDay::from_hm(9, 5).to_string(), "09:05");
        assert_eq!(TimeOfDay::from_hm(0, 0).to_string(), "00:00");
        assert_eq!(TimeOfDay::from_hm(23, 59).to_string(), "23:59");
    }

    #[test]
    fn addition_wraps_midnight() {
        assert_eq!(shift_time("23:50", 15).as_deref(), Some("00:05"));
        assert_eq!(shift_time("00:10", -30).as_deref(), Some("23:40"));
        assert_eq!(shift_time("17:00", 15).as_deref(), Some("17:15"));
        assert_eq!(shift_time("bogus", 15), None);
    }

    #[test]
    fn ids_increase_within_one_millisecond() {
        let ids: Vec<i64> = (0..64)
            .map(|_| next_entity_id().parse().unwrap())
            .collect();
        for pair in ids.windows(2) {
            assert!(pair[1] > pair[0], "{} !> {}", pair[1], pair[0]);
        }
    }
}
