//! Calendar source for streaks and daily resets.

use chrono::{Days, Local, NaiveDate};
use std::cell::Cell;

pub trait Clock {
    fn today(&self) -> NaiveDate;
}

/// Local calendar date of the host
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Clock driven by hand, for tests and replays
#[derive(Debug, Clone)]
pub struct ManualClock {
    today: Cell<NaiveDate>,
}

impl ManualClock {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            today: Cell::new(today),
        }
    }

    pub fn set(&self, today: NaiveDate) {
        self.today.set(today);
    }

    pub fn advance_days(&self, days: u64) {
        let next = self
            .today
            .get()
            .checked_add_days(Days::new(days))
            .unwrap_or(NaiveDate::MAX);
        self.today.set(next);
    }
}

impl Clock for ManualClock {
    fn today(&self) -> NaiveDate {
        self.today.get()
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn today(&self) -> NaiveDate {
        (**self).today()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_clock_advances() {
        let clock = ManualClock::new(NaiveDate::from_ymd_opt(2026, 12, 31).unwrap());
        clock.advance_days(1);
        assert_eq!(clock.today(), NaiveDate::from_ymd_opt(2027, 1, 1).unwrap());
    }
}
