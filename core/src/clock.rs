//! Simulation clock: the current year and month, and where the run stops.
//!
//! RULE: only the reporter task advances the clock, and only between the
//! "commit done" and "report done" barriers. Every other task just reads it.

use crate::types::{Month, Year, MONTHS_PER_YEAR};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU32, Ordering};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct SimClock {
    pub start_year:    Year,
    pub current_year:  Year,
    pub current_month: Month,
    pub horizon_year:  Year,
}

impl SimClock {
    pub fn new(start_year: Year, horizon_year: Year) -> Self {
        Self {
            start_year,
            current_year: start_year,
            current_month: 0,
            horizon_year,
        }
    }

    /// True while another round must run.
    pub fn is_running(&self) -> bool {
        self.current_year < self.horizon_year
    }

    /// Advance one month, rolling the year when the month wraps past 11.
    pub fn advance(&mut self) {
        self.current_month += 1;
        if self.current_month >= MONTHS_PER_YEAR {
            self.current_month = 0;
            self.current_year += 1;
        }
    }

    /// Months elapsed since the start of the run. Used as the CSV x-axis.
    pub fn linear_month(&self) -> u64 {
        let years = u64::from(self.current_year - self.start_year);
        years * u64::from(MONTHS_PER_YEAR) + u64::from(self.current_month)
    }

    /// 1-based month for display.
    pub fn display_month(&self) -> Month {
        self.current_month + 1
    }

    /// Rounds left before the horizon is reached.
    pub fn rounds_remaining(&self) -> u64 {
        if !self.is_running() {
            return 0;
        }
        let years = u64::from(self.horizon_year - self.current_year);
        years * u64::from(MONTHS_PER_YEAR) - u64::from(self.current_month)
    }
}

/// The clock as seen by the worker threads.
///
/// The reporter is the single writer. Workers load the year to decide
/// whether to start another round; the barriers order those loads after the
/// reporter's store.
#[derive(Debug)]
pub struct SharedClock {
    start_year:    Year,
    horizon_year:  Year,
    current_year:  AtomicU32,
    current_month: AtomicU32,
}

impl SharedClock {
    pub fn new(clock: SimClock) -> Self {
        Self {
            start_year:    clock.start_year,
            horizon_year:  clock.horizon_year,
            current_year:  AtomicU32::new(clock.current_year),
            current_month: AtomicU32::new(clock.current_month),
        }
    }

    pub fn load(&self) -> SimClock {
        SimClock {
            start_year:    self.start_year,
            current_year:  self.current_year.load(Ordering::Acquire),
            current_month: self.current_month.load(Ordering::Acquire),
            horizon_year:  self.horizon_year,
        }
    }

    pub fn is_running(&self) -> bool {
        self.current_year.load(Ordering::Acquire) < self.horizon_year
    }

    pub(crate) fn store(&self, clock: SimClock) {
        self.current_month.store(clock.current_month, Ordering::Release);
        self.current_year.store(clock.current_year, Ordering::Release);
    }
}
