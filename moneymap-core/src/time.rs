//! Time utilities: timezone-aware "now" behind a Clock so parsing is
//! deterministic under test.

use anyhow::Result;
use chrono::{NaiveDate, NaiveDateTime, Utc};
use chrono_tz::Tz;

/// Source of the current local time for extraction defaults.
pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;

    /// Current calendar month as "YYYY-MM"
    fn current_month(&self) -> String {
        month_of(self.now())
    }
}

/// Wall clock in a configured IANA timezone (month boundaries are local)
#[derive(Debug, Clone)]
pub struct SystemClock {
    tz: Tz,
}

impl SystemClock {
    pub fn new(tz: &str) -> Result<Self> {
        let tz: Tz = tz
            .parse()
            .map_err(|_| anyhow::anyhow!("invalid timezone: {tz}"))?;
        Ok(Self { tz })
    }

    /// Default timezone for the app's message formats (KST)
    pub fn seoul() -> Self {
        Self {
            tz: chrono_tz::Asia::Seoul,
        }
    }
}

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Utc::now().with_timezone(&self.tz).naive_local()
    }
}

/// A pinned clock for tests and reproducible runs
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

/// Format the month of `dt` as "YYYY-MM"
pub fn month_of(dt: NaiveDateTime) -> String {
    dt.format("%Y-%m").to_string()
}

/// True if `s` is a well-formed "YYYY-MM" month
pub fn is_valid_month(s: &str) -> bool {
    if s.len() != 7 {
        return false;
    }
    NaiveDate::parse_from_str(&format!("{s}-01"), "%Y-%m-%d").is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_month_of() {
        let dt = NaiveDate::from_ymd_opt(2025, 11, 13)
            .unwrap()
            .and_hms_opt(14, 23, 0)
            .unwrap();
        assert_eq!(month_of(dt), "2025-11");
        assert_eq!(FixedClock(dt).current_month(), "2025-11");
    }

    #[test]
    fn test_is_valid_month() {
        assert!(is_valid_month("2025-11"));
        assert!(is_valid_month("2025-01"));
        assert!(!is_valid_month("2025-13"));
        assert!(!is_valid_month("2025-1"));
        assert!(!is_valid_month("2025/11"));
        assert!(!is_valid_month("november"));
        assert!(!is_valid_month(""));
    }

    #[test]
    fn test_system_clock_rejects_bad_tz() {
        assert!(SystemClock::new("Asia/Seoul").is_ok());
        assert!(SystemClock::new("Mars/Olympus").is_err());
    }
}
