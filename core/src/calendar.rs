//! Wall-clock activation windows for the seasonal effects.
//!
//! Both windows are short and hour-granular, so nothing here caches: every
//! call re-reads the clock and a caller polling across a boundary sees the
//! change immediately.

use chrono::{Datelike, Local, NaiveDateTime, Timelike};
use std::sync::{Arc, Mutex};

/// Source of the current local wall-clock time.
pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;
}

/// Reads the operating system's local time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// A clock that only moves when told to. Shared clones observe the same time.
#[derive(Debug, Clone)]
pub struct FixedClock {
    now: Arc<Mutex<NaiveDateTime>>,
}

impl FixedClock {
    pub fn new(now: NaiveDateTime) -> Self {
        Self {
            now: Arc::new(Mutex::new(now)),
        }
    }

    pub fn set(&self, now: NaiveDateTime) {
        match self.now.lock() {
            Ok(mut guard) => *guard = now,
            Err(poisoned) => *poisoned.into_inner() = now,
        }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        match self.now.lock() {
            Ok(guard) => *guard,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }
}

/// December 24th through 27th, inclusive, at any hour.
pub fn is_winter_season_at(at: NaiveDateTime) -> bool {
    at.month() == 12 && (24..=27).contains(&at.day())
}

/// The last hour of December 31st or the first hour of January 1st.
pub fn is_year_transition_at(at: NaiveDateTime) -> bool {
    let new_years_eve = at.month() == 12 && at.day() == 31 && at.hour() == 23;
    let new_years_day = at.month() == 1 && at.day() == 1 && at.hour() == 0;
    new_years_eve || new_years_day
}

/// Evaluates the seasonal windows against a [`Clock`].
#[derive(Clone)]
pub struct CalendarGate {
    clock: Arc<dyn Clock>,
}

impl CalendarGate {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }

    pub fn system() -> Self {
        Self::new(Arc::new(SystemClock))
    }

    pub fn is_winter_season(&self) -> bool {
        let active = is_winter_season_at(self.clock.now());
        log::debug!("Winter season window active: {active}");
        active
    }

    pub fn is_year_transition_moment(&self) -> bool {
        let active = is_year_transition_at(self.clock.now());
        log::debug!("Year transition window active: {active}");
        active
    }
}

impl Default for CalendarGate {
    fn default() -> Self {
        Self::system()
    }
}

impl std::fmt::Debug for CalendarGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CalendarGate")
            .field("now", &self.clock.now())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(year, month, day)
            .and_then(|date| date.and_hms_opt(hour, minute, 0))
            .unwrap()
    }

    #[test]
    fn test_winter_season_bounds() {
        for hour in [0, 12, 23] {
            assert!(!is_winter_season_at(at(2025, 12, 23, hour, 59)));
            for day in 24..=27 {
                assert!(is_winter_season_at(at(2025, 12, day, hour, 0)));
            }
            assert!(!is_winter_season_at(at(2025, 12, 28, hour, 0)));
        }
    }

    #[test]
    fn test_winter_season_requires_december() {
        assert!(!is_winter_season_at(at(2025, 11, 25, 10, 0)));
        assert!(!is_winter_season_at(at(2026, 1, 25, 10, 0)));
    }

    #[test]
    fn test_year_transition_bounds() {
        assert!(!is_year_transition_at(at(2025, 12, 31, 22, 59)));
        assert!(is_year_transition_at(at(2025, 12, 31, 23, 0)));
        assert!(is_year_transition_at(at(2025, 12, 31, 23, 59)));
        assert!(is_year_transition_at(at(2026, 1, 1, 0, 0)));
        assert!(is_year_transition_at(at(2026, 1, 1, 0, 59)));
        assert!(!is_year_transition_at(at(2026, 1, 1, 1, 0)));
        assert!(!is_year_transition_at(at(2026, 12, 1, 0, 30)));
    }

    #[test]
    fn test_gate_re_reads_clock_on_every_call() {
        let clock = FixedClock::new(at(2025, 12, 27, 23, 59));
        let gate = CalendarGate::new(Arc::new(clock.clone()));

        assert!(gate.is_winter_season());
        clock.set(at(2025, 12, 28, 0, 0));
        assert!(!gate.is_winter_season());

        clock.set(at(2025, 12, 31, 23, 15));
        assert!(gate.is_year_transition_moment());
    }
}
