//! Clock capability.
//!
//! Record timestamps come from an injected clock so stores and info
//! builders can be exercised against a pinned time.

use chrono::{Local, NaiveDateTime};

/// Wall-clock source consumed by the stores and the register-info builder.
///
/// The record file format stores naive local timestamps (no offset), so
/// that is what implementations hand out.
pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;
}

/// The system wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// A clock pinned to a fixed instant.
#[cfg(any(test, feature = "test_utils"))]
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDateTime);

#[cfg(any(test, feature = "test_utils"))]
impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

#[cfg(any(test, feature = "test_utils"))]
impl FixedClock {
    /// Midday on an arbitrary fixed date, for tests that only care that
    /// the value is stable.
    pub fn default_instant() -> Self {
        FixedClock(
            chrono::NaiveDate::from_ymd_opt(2024, 6, 1)
                .unwrap()
                .and_hms_opt(12, 30, 0)
                .unwrap(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_clock_returns_the_pinned_instant() {
        let clock = FixedClock::default_instant();
        assert_eq!(clock.now(), clock.now());
        assert_eq!(clock.now().format("%Y-%m-%d %H:%M").to_string(), "2024-06-01 12:30");
    }

    #[test]
    fn system_clock_is_roughly_now() {
        let before = Local::now().naive_local();
        let observed = SystemClock.now();
        let after = Local::now().naive_local();
        assert!(observed >= before && observed <= after);
    }
}
